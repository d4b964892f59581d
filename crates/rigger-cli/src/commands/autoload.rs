//! `rigger autoload`: maintain a package's class-location manifest.

use std::path::Path;

use serde_json::json;
use tracing::instrument;

use rigger_core::{
    domain::{NameRules, QualifiedName, RelativePath},
    error::RiggerError,
};

use crate::{
    cli::{AutoloadAddArgs, AutoloadCommands, AutoloadFindArgs, PackageArgs},
    commands::{Workspace, package_name},
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Dispatch to the correct autoload subcommand.
pub fn execute(cmd: AutoloadCommands, packages_dir: &Path, output: OutputManager) -> CliResult<()> {
    let workspace = Workspace::open(packages_dir);
    match cmd {
        AutoloadCommands::Init(args) => init(&workspace, args, &output),
        AutoloadCommands::Add(args) => add(&workspace, args, &output),
        AutoloadCommands::Find(args) => find(&workspace, args, &output),
        AutoloadCommands::Rebuild(args) => rebuild(&workspace, args, &output),
    }
}

fn init(workspace: &Workspace, args: PackageArgs, output: &OutputManager) -> CliResult<()> {
    let package = package_name(&args.package)?;
    let path = workspace.autoloader.init(&package)?;
    if output.is_json() {
        output.json(&json!({ "autoloader": path }))?;
    } else {
        output.success(&format!("Empty autoloader written to {}", path.display()))?;
    }
    Ok(())
}

#[instrument(skip_all, fields(package = %args.package, file = %args.file))]
fn add(workspace: &Workspace, args: AutoloadAddArgs, output: &OutputManager) -> CliResult<()> {
    let package = package_name(&args.package)?;
    let file = RelativePath::try_new(args.file).map_err(RiggerError::from)?;
    let classes = (!args.classes.is_empty()).then_some(args.classes.as_slice());

    let outcome = workspace.autoloader.add(&package, &file, classes)?;

    if output.is_json() {
        output.json(&json!({
            "autoloader": outcome.autoloader,
            "file": outcome.file.as_str(),
            "classes": outcome.classes.iter().map(ToString::to_string).collect::<Vec<_>>(),
            "added": outcome.added,
        }))?;
        return Ok(());
    }

    if outcome.classes.is_empty() {
        output.warning(&format!("No declarations found in {}", outcome.file))?;
        return Ok(());
    }
    output.success(&format!(
        "{} registered ({} new, {} total)",
        outcome.file,
        outcome.added,
        outcome.classes.len()
    ))?;
    for class in &outcome.classes {
        output.print(&format!("  {class}"))?;
    }
    Ok(())
}

fn find(workspace: &Workspace, args: AutoloadFindArgs, output: &OutputManager) -> CliResult<()> {
    let package = package_name(&args.package)?;
    let class = QualifiedName::parse(&NameRules::normalize_separators(&args.class))
        .map_err(RiggerError::from)?;

    let Some(file) = workspace.autoloader.lookup(&package, &class)? else {
        return Err(CliError::ClassNotRegistered {
            class: class.to_string(),
            package: package.to_string(),
        });
    };

    if output.is_json() {
        output.json(&json!({ "class": class.to_string(), "file": file.as_str() }))?;
    } else {
        output.print(file.as_str())?;
    }
    Ok(())
}

fn rebuild(workspace: &Workspace, args: PackageArgs, output: &OutputManager) -> CliResult<()> {
    let package = package_name(&args.package)?;
    let outcome = workspace.autoloader.rebuild(&package)?;

    if output.is_json() {
        output.json(&json!({
            "autoloader": outcome.autoloader,
            "files": outcome.files,
            "classes": outcome.classes,
            "skipped": outcome.skipped.iter().map(ToString::to_string).collect::<Vec<_>>(),
        }))?;
        return Ok(());
    }

    for class in &outcome.skipped {
        output.warning(&format!("Skipped {class}: outside the package namespace"))?;
    }
    output.success(&format!(
        "Autoloader rebuilt: {} classes in {} files",
        outcome.classes, outcome.files
    ))?;
    Ok(())
}
