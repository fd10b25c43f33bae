use eyre::Result;
use tdsl::{DslError, tdslc::parser::DslParser};

use crate::{QueryArgs, commands::render_error, config::read_query};

/// Prints the event stream the parser produces, one event per line.
pub fn run(query: &QueryArgs) -> Result<String> {
    let (query, source_name) = read_query(query).map_err(|e| eyre::eyre!("{}", e.render()))?;
    let events = DslParser::parse_events(&query).map_err(|e| {
        eyre::eyre!("{}", render_error(&DslError::from(e), &query, &source_name))
    })?;
    Ok(events
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n"))
}
