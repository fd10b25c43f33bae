pub mod error;

pub use error::{DslError, ErrorCategory};
