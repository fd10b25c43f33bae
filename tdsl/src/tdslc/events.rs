//! Grammar-recognition events consumed by the compiler.
//!
//! The parser (or any other front-end) is responsible for producing a
//! well-formed stream: every scope-opening event has a matching closing event,
//! in strictly LIFO order.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DslEvent {
    QueryEnter,
    QueryExit,
    StartEnter,
    StartExit,
    NestedEnter,
    /// `count` is 1 + the number of traversal steps inside the nested statement,
    /// i.e. how many node labels it pushed.
    NestedExit {
        count: usize,
    },
    VertexEnter {
        label: String,
    },
    /// `filter_keys` is `Some` only for the root vertex of a start statement.
    VertexExit {
        has_store: bool,
        filter_keys: Option<Vec<String>>,
    },
    Comma,
    EdgeFilter {
        labels: Vec<String>,
    },
    PropertyFilter(PropertyFilter),
    Limit(u64),
    UnionEnter,
    UnionExit {
        has_store: bool,
    },
    WhereEnter {
        negated: bool,
    },
    WhereExit {
        negated: bool,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PropertyFilter {
    pub key: String,
    pub negated: bool,
    pub string_values: Vec<String>,
    /// Numeric literals as they appeared in the source.
    pub numeric_values: Vec<String>,
    pub boolean_values: Vec<String>,
}

impl PropertyFilter {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ..Default::default()
        }
    }

    pub fn negated(mut self) -> Self {
        self.negated = true;
        self
    }

    pub fn with_strings<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.string_values.extend(values.into_iter().map(Into::into));
        self
    }

    pub fn with_numbers<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.numeric_values.extend(values.into_iter().map(Into::into));
        self
    }

    pub fn with_booleans<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.boolean_values.extend(values.into_iter().map(Into::into));
        self
    }
}

impl DslEvent {
    pub fn vertex(label: impl Into<String>) -> Self {
        DslEvent::VertexEnter {
            label: label.into(),
        }
    }

    pub fn vertex_exit(has_store: bool) -> Self {
        DslEvent::VertexExit {
            has_store,
            filter_keys: None,
        }
    }

    pub fn root_vertex_exit<I, S>(has_store: bool, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        DslEvent::VertexExit {
            has_store,
            filter_keys: Some(keys.into_iter().map(Into::into).collect()),
        }
    }
}

impl fmt::Display for DslEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DslEvent::QueryEnter => write!(f, "query-enter"),
            DslEvent::QueryExit => write!(f, "query-exit"),
            DslEvent::StartEnter => write!(f, "start-enter"),
            DslEvent::StartExit => write!(f, "start-exit"),
            DslEvent::NestedEnter => write!(f, "nested-enter"),
            DslEvent::NestedExit { count } => write!(f, "nested-exit({count})"),
            DslEvent::VertexEnter { label } => write!(f, "vertex-enter({label})"),
            DslEvent::VertexExit {
                has_store,
                filter_keys,
            } => match filter_keys {
                Some(keys) => write!(
                    f,
                    "vertex-exit(store={has_store}, keys=[{}])",
                    keys.join(", ")
                ),
                None => write!(f, "vertex-exit(store={has_store})"),
            },
            DslEvent::Comma => write!(f, "comma"),
            DslEvent::EdgeFilter { labels } => write!(f, "edge-filter([{}])", labels.join(", ")),
            DslEvent::PropertyFilter(filter) => write!(
                f,
                "property-filter({}, negated={}, strings=[{}], numbers=[{}], booleans=[{}])",
                filter.key,
                filter.negated,
                filter.string_values.join(", "),
                filter.numeric_values.join(", "),
                filter.boolean_values.join(", ")
            ),
            DslEvent::Limit(n) => write!(f, "limit({n})"),
            DslEvent::UnionEnter => write!(f, "union-enter"),
            DslEvent::UnionExit { has_store } => write!(f, "union-exit(store={has_store})"),
            DslEvent::WhereEnter { negated } => write!(f, "where-enter(negated={negated})"),
            DslEvent::WhereExit { negated } => write!(f, "where-exit(negated={negated})"),
        }
    }
}
