use super::traversal_steps::Step;

/// The query fragment and diagnostics of one nesting level (root query,
/// nested traversal, union branch or where block).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScopeBuilder {
    fragment: Vec<Step>,
    errors: Vec<String>,
}

impl ScopeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, step: Step) -> &mut Self {
        self.fragment.push(step);
        self
    }

    pub fn push_err(&mut self, error: impl Into<String>) {
        self.errors.push(error.into());
    }

    pub fn fragment(&self) -> &[Step] {
        &self.fragment
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn render(&self) -> String {
        self.fragment.iter().map(|step| step.to_string()).collect()
    }

    /// The rendered fragment and the recorded errors.
    pub fn into_parts(self) -> (String, Vec<String>) {
        (self.render(), self.errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_concatenates_steps() {
        let mut scope = ScopeBuilder::new();
        scope
            .push(Step::Start)
            .push(Step::NodeType("pnf".to_string()))
            .push(Step::Store);
        assert_eq!(
            scope.render(),
            "builder.getVerticesByProperty('aai-node-type', 'pnf').store('x')"
        );
        assert!(scope.errors().is_empty());
    }

    #[test]
    fn test_errors_are_kept_in_order() {
        let mut scope = ScopeBuilder::new();
        scope.push_err("first");
        scope.push_err(String::from("second"));
        let (fragment, errors) = scope.into_parts();
        assert!(fragment.is_empty());
        assert_eq!(errors, vec!["first", "second"]);
    }
}
