pub mod check;
pub mod compile;
pub mod events;

use std::sync::Arc;
use tdsl::{DslError, DslProcessor, ErrorCategory, tdslc::parser::ariadne_render};

use crate::{
    CompileArgs, QueryArgs,
    config::{load_schema, read_query, resolve_config},
    errors::CliError,
    output,
};

/// Query text plus a processor configured from file, environment and flags.
pub(crate) struct Prepared {
    pub query: String,
    pub source_name: String,
    pub processor: DslProcessor,
}

pub(crate) fn prepare<F>(query: &QueryArgs, args: &CompileArgs, env: F) -> Result<Prepared, CliError>
where
    F: Fn(&str) -> Option<String>,
{
    let (query, source_name) = read_query(query)?;
    let config = resolve_config(args, env)?;
    output::detail(&format!(
        "rules={} max_node_count={} validate_structure={} aggregate={}",
        config.validation_rules,
        config.max_node_count,
        config.validate_structure,
        config.aggregate
    ));

    let mut processor = DslProcessor::new(config);
    if let Some(schema) = load_schema(args)? {
        processor = processor.with_schema(Arc::new(schema));
    }
    Ok(Prepared {
        query,
        source_name,
        processor,
    })
}

/// Parse errors get an annotated source excerpt; everything else a short
/// message with the error code and a hint.
pub fn render_error(err: &DslError, src: &str, source_name: &str) -> String {
    match err {
        DslError::Parse(parse_err) => ariadne_render::render(parse_err, src, source_name),
        other => {
            let hint = match other.category() {
                ErrorCategory::Malformed => {
                    "check the node types and edge labels against the schema"
                }
                ErrorCategory::Structural => "mark at least one node for output with `*`",
                ErrorCategory::TooExpensive => {
                    "narrow the traversal, or relax --rules / --max-node-count"
                }
            };
            CliError::new(other.to_string())
                .with_context(format!("[{}] in {source_name}", other.code()))
                .with_hint(hint)
                .render()
        }
    }
}
