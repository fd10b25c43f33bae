use eyre::Result;

use crate::{
    CompileArgs, QueryArgs,
    commands::{prepare, render_error},
    output,
};

/// Compiles one query and returns what should be printed on stdout.
pub fn run<F>(query: &QueryArgs, args: &CompileArgs, json: bool, env: F) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    let prepared = prepare(query, args, env).map_err(|e| eyre::eyre!("{}", e.render()))?;

    match prepared.processor.compile(&prepared.query) {
        Ok(compiled) => {
            output::detail(&format!(
                "{} nodes, {} edges",
                compiled.node_count, compiled.edge_count
            ));
            if json {
                Ok(serde_json::to_string_pretty(&compiled)?)
            } else {
                Ok(compiled.query)
            }
        }
        Err(e) => Err(eyre::eyre!(
            "{}",
            render_error(&e, &prepared.query, &prepared.source_name)
        )),
    }
}
