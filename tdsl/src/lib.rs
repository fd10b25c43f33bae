pub mod config;
pub mod protocol;
pub mod schema;
pub mod tdslc;

pub use config::DslConfig;
pub use protocol::error::{DslError, ErrorCategory};
pub use schema::{SchemaOracle, StaticSchema};
pub use tdslc::{DslProcessor, compile_events, generator::CompiledQuery};
#[cfg(feature = "parser")]
pub use tdslc::compile;
