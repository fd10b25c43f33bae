/// Cross-scope bookkeeping for a single compilation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TraversalState {
    /// Node labels in scope; the top is the source of the next edge step.
    node_stack: Vec<String>,
    /// One list of collected result labels per open union/where block.
    result_stack: Vec<Vec<String>>,
    /// Every `(from, to)` edge step emitted, across all scopes.
    edge_log: Vec<(String, String)>,
    node_count: usize,
    output_marked: bool,
    /// Labels constraining the next edge step only.
    edge_label_filter: Vec<String>,
}

impl TraversalState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn node_stack(&self) -> &[String] {
        &self.node_stack
    }

    pub fn result_stack(&self) -> &[Vec<String>] {
        &self.result_stack
    }

    pub fn edge_log(&self) -> &[(String, String)] {
        &self.edge_log
    }

    pub fn node_count(&self) -> usize {
        self.node_count
    }

    pub fn output_marked(&self) -> bool {
        self.output_marked
    }

    pub fn edge_label_filter(&self) -> &[String] {
        &self.edge_label_filter
    }

    pub fn current_node(&self) -> Option<&str> {
        self.node_stack.last().map(String::as_str)
    }

    pub(crate) fn push_node(&mut self, label: String) {
        self.node_stack.push(label);
    }

    /// Pops up to `count` labels and returns how many were actually popped.
    pub(crate) fn pop_nodes(&mut self, count: usize) -> usize {
        let popped = count.min(self.node_stack.len());
        self.node_stack.truncate(self.node_stack.len() - popped);
        popped
    }

    pub(crate) fn open_results(&mut self) {
        self.result_stack.push(Vec::new());
    }

    pub(crate) fn close_results(&mut self) -> Option<Vec<String>> {
        self.result_stack.pop()
    }

    /// Records a result label in the innermost open block. Returns false when
    /// no block is open.
    pub(crate) fn collect_result(&mut self, label: String) -> bool {
        match self.result_stack.last_mut() {
            Some(results) => {
                results.push(label);
                true
            }
            None => false,
        }
    }

    pub(crate) fn log_edge(&mut self, from: String, to: String) {
        self.edge_log.push((from, to));
    }

    pub(crate) fn count_node(&mut self) {
        self.node_count += 1;
    }

    pub(crate) fn mark_output(&mut self) {
        self.output_marked = true;
    }

    pub(crate) fn set_edge_label_filter(&mut self, labels: Vec<String>) {
        self.edge_label_filter = labels;
    }

    pub(crate) fn take_edge_label_filter(&mut self) -> Vec<String> {
        std::mem::take(&mut self.edge_label_filter)
    }

    pub(crate) fn clear_edge_label_filter(&mut self) {
        self.edge_label_filter.clear();
    }
}
