use eyre::Result;

use crate::{
    CompileArgs, QueryArgs,
    commands::{prepare, render_error},
    output,
};

/// Compiles the query only to validate it.
pub fn run<F>(query: &QueryArgs, args: &CompileArgs, env: F) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    let prepared = prepare(query, args, env).map_err(|e| eyre::eyre!("{}", e.render()))?;

    match prepared.processor.compile(&prepared.query) {
        Ok(_) => {
            output::success(&format!("{} is valid", prepared.source_name));
            Ok("ok".to_string())
        }
        Err(e) => {
            output::failure(&format!("{} is invalid", prepared.source_name));
            Err(eyre::eyre!(
                "{}",
                render_error(&e, &prepared.query, &prepared.source_name)
            ))
        }
    }
}
