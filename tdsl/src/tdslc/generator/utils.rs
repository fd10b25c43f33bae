use itertools::Itertools;
use std::fmt::{self, Display};

/// Node-type property every vertex carries; root vertex steps select on it.
pub const NODE_TYPE_KEY: &str = "aai-node-type";

/// Side-effect key used by `store` and read back by `cap` at the end.
pub const STORE_KEY: &str = "x";

/// A literal rendered into the target query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeneratedValue {
    Literal(String),
    Number(String),
    Boolean(bool),
}

impl Display for GeneratedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeneratedValue::Literal(s) => write!(f, "{}", quote(s)),
            GeneratedValue::Number(n) => write!(f, "{n}"),
            GeneratedValue::Boolean(b) => write!(f, "{b}"),
        }
    }
}

impl GeneratedValue {
    /// The raw source text of the literal, used to compare against filter keys.
    pub fn raw(&self) -> String {
        match self {
            GeneratedValue::Literal(s) | GeneratedValue::Number(s) => s.clone(),
            GeneratedValue::Boolean(b) => b.to_string(),
        }
    }
}

/// Single-quoted Groovy string with `\` and `'` escaped.
pub fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('\'');
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            c => out.push(c),
        }
    }
    out.push('\'');
    out
}

/// `['a', 'b']`
pub fn write_list<T: Display>(items: &[T]) -> String {
    format!("[{}]", items.iter().join(", "))
}
