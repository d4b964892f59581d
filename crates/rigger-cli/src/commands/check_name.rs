//! `rigger check-name`: test a name against the identifier grammar.

use serde_json::json;

use rigger_core::{
    domain::{NameRules, QualifiedName},
    error::RiggerError,
};

use crate::{cli::CheckNameArgs, error::CliResult, output::OutputManager};

/// Succeeds when the name is valid; otherwise fails with the grammar
/// violation (exit code 2).
pub fn execute(args: CheckNameArgs, output: OutputManager) -> CliResult<()> {
    let checked = if args.no_namespace {
        NameRules::validate_identifier(&args.name)
    } else {
        QualifiedName::parse(&args.name).map(|_| ())
    };
    checked.map_err(RiggerError::from)?;

    if output.is_json() {
        output.json(&json!({ "name": args.name, "valid": true }))?;
    } else {
        output.success(&format!("'{}' is a valid name", args.name))?;
    }
    Ok(())
}
