use super::utils::{GeneratedValue, NODE_TYPE_KEY, STORE_KEY, quote, write_list};
use core::fmt;
use std::fmt::Display;

/// One token of a scope's query fragment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Step {
    /// Opens the root traversal of a start statement.
    Start,
    /// Opens an anonymous traversal inside a union or where block.
    StartInstance,
    /// Root vertex selection by node type.
    NodeType(String),
    Edge(EdgeStep),
    Filter(FilterStep),
    Comma,
    Limit(u64),
    UnionOpen,
    UnionClose,
    WhereOpen { negated: bool },
    WhereClose { negated: bool },
    Store,
    End { aggregate: bool },
}

impl Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Start => write!(f, "builder"),
            Step::StartInstance => write!(f, "builder.newInstance()"),
            Step::NodeType(label) => write!(
                f,
                ".getVerticesByProperty({}, {})",
                quote(NODE_TYPE_KEY),
                quote(label)
            ),
            Step::Edge(edge) => write!(f, "{edge}"),
            Step::Filter(filter) => write!(f, "{filter}"),
            Step::Comma => write!(f, ","),
            Step::Limit(n) => write!(f, ".limit({n})"),
            Step::UnionOpen => write!(f, ".union("),
            Step::UnionClose => write!(f, ")"),
            Step::WhereOpen { negated: false } => write!(f, ".where("),
            Step::WhereOpen { negated: true } => write!(f, ".where(builder.newInstance().not("),
            Step::WhereClose { negated: false } => write!(f, ")"),
            Step::WhereClose { negated: true } => write!(f, "))"),
            Step::Store => write!(f, ".store({})", quote(STORE_KEY)),
            Step::End { aggregate: false } => {
                write!(f, ".cap({}).unfold().dedup()", quote(STORE_KEY))
            }
            Step::End { aggregate: true } => write!(f, ".cap({})", quote(STORE_KEY)),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EdgeStep {
    pub from: String,
    pub to: String,
    pub labels: Vec<String>,
}

impl Display for EdgeStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.labels.is_empty() {
            write!(
                f,
                ".createEdgeTraversal({}, {})",
                quote(&self.from),
                quote(&self.to)
            )
        } else {
            let labels = self.labels.iter().map(|l| quote(l)).collect::<Vec<_>>();
            write!(
                f,
                ".createEdgeTraversalWithLabels({}, {}, {})",
                quote(&self.from),
                quote(&self.to),
                write_list(&labels)
            )
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FilterStep {
    /// Node type the filter applies to.
    pub node: String,
    pub key: String,
    pub negated: bool,
    pub values: Vec<GeneratedValue>,
}

impl Display for FilterStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let key = quote(&self.key);
        match (self.values.as_slice(), self.negated) {
            ([], false) => write!(f, ".has({key})"),
            ([], true) => write!(f, ".hasNot({key})"),
            ([GeneratedValue::Boolean(b)], false) => {
                write!(f, ".getVerticesByBooleanProperty({key}, {b})")
            }
            ([GeneratedValue::Boolean(b)], true) => {
                write!(f, ".getVerticesExcludeByBooleanProperty({key}, {b})")
            }
            ([value], false) => write!(f, ".getVerticesByProperty({key}, {value})"),
            ([value], true) => write!(f, ".getVerticesExcludeByProperty({key}, {value})"),
            (values, false) => {
                write!(f, ".getVerticesByProperty({key}, {})", write_list(values))
            }
            (values, true) => write!(
                f,
                ".getVerticesExcludeByProperty({key}, {})",
                write_list(values)
            ),
        }
    }
}
