//! `rigger route`: maintain a package's route table.

use std::path::Path;

use tracing::instrument;

use rigger_core::{
    application::RouteRequest,
    domain::{
        HttpMethods, NUMERIC_CONSTRAINT, PathSegment, Permission, Route, RoutePath,
        RoutePatternCompiler,
    },
    error::RiggerError,
};

use crate::{
    cli::{PackageArgs, RouteAddArgs, RouteCommands, RouteCompileArgs},
    commands::{Workspace, package_name},
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Dispatch to the correct route subcommand.
pub fn execute(cmd: RouteCommands, packages_dir: &Path, output: OutputManager) -> CliResult<()> {
    match cmd {
        RouteCommands::Init(args) => init(&Workspace::open(packages_dir), args, &output),
        RouteCommands::Add(args) => add(&Workspace::open(packages_dir), args, &output),
        RouteCommands::List(args) => list(&Workspace::open(packages_dir), args, &output),
        RouteCommands::Compile(args) => compile(args, &output),
    }
}

fn init(workspace: &Workspace, args: PackageArgs, output: &OutputManager) -> CliResult<()> {
    let package = package_name(&args.package)?;
    let path = workspace.router.init(&package)?;
    if output.is_json() {
        output.json(&serde_json::json!({ "routing": path }))?;
    } else {
        output.success(&format!("Empty routing table written to {}", path.display()))?;
    }
    Ok(())
}

#[instrument(skip_all, fields(package = %args.package, address = %args.address))]
fn add(workspace: &Workspace, args: RouteAddArgs, output: &OutputManager) -> CliResult<()> {
    let package = package_name(&args.package)?;
    let request = RouteRequest {
        method: http_methods(&args.methods)?,
        absolute: args.absolute.then_some(true),
        api: args.api.as_deref().map(permission),
        ajax: args.ajax.as_deref().map(permission),
        ..RouteRequest::new(args.address, args.controller)
    };

    let route = workspace.router.add(&package, request)?;

    if output.is_json() {
        output.json(&route)?;
    } else {
        output.success(&format!("Route added: {}", describe(&route)))?;
    }
    Ok(())
}

fn list(workspace: &Workspace, args: PackageArgs, output: &OutputManager) -> CliResult<()> {
    let package = package_name(&args.package)?;
    let table = workspace.router.list(&package)?;

    if output.is_json() {
        output.json(&table)?;
        return Ok(());
    }
    if table.is_empty() {
        output.info(&format!("Package '{package}' has no routes"))?;
        return Ok(());
    }
    output.header(&format!("Routes of '{package}' ({}):", table.len()))?;
    for route in table.routes() {
        output.print(&format!("  {}", describe(route)))?;
    }
    Ok(())
}

fn compile(args: RouteCompileArgs, output: &OutputManager) -> CliResult<()> {
    let compiled = RoutePatternCompiler::compile(&args.address).map_err(RiggerError::from)?;

    if output.is_json() {
        output.json(&compiled.into_route_path())?;
        return Ok(());
    }
    for segment in compiled.segments() {
        let line = match segment {
            PathSegment::Literal(text) => format!("literal   {text}"),
            PathSegment::Variable(name) => format!("variable  {name}"),
            PathSegment::Wildcard(name) => format!("wildcard  {name}"),
            PathSegment::TypedVariable { name, constraint } => {
                format!("typed     {name} {constraint}")
            }
        };
        output.print(&line)?;
    }
    Ok(())
}

// ── helpers ───────────────────────────────────────────────────────────────────

/// `None` for no `--method`; one method stays a plain string. Methods are
/// stored as typed.
fn http_methods(methods: &[String]) -> CliResult<Option<HttpMethods>> {
    if let Some(bad) = methods
        .iter()
        .find(|m| m.is_empty() || !m.chars().all(|c| c.is_ascii_alphabetic()))
    {
        return Err(CliError::InvalidInput {
            message: format!("'{bad}' is not an HTTP method"),
            source: None,
        });
    }

    let mut methods = methods.to_vec();
    Ok(match methods.len() {
        0 => None,
        1 => methods.pop().map(HttpMethods::One),
        _ => Some(HttpMethods::Many(methods)),
    })
}

/// `true` / `false`, anything else is a controller reference.
fn permission(value: &str) -> Permission {
    match value {
        "true" => Permission::Flag(true),
        "false" => Permission::Flag(false),
        reference => Permission::Controller(reference.to_string()),
    }
}

/// One-line summary: `GET,POST /users/:id:int -> controllers\Users@show`.
fn describe(route: &Route) -> String {
    let methods = match &route.method {
        None => "ANY".to_string(),
        Some(HttpMethods::One(method)) => method.clone(),
        Some(HttpMethods::Many(methods)) => methods.join(","),
    };
    let mut line = format!("{methods} {} -> {}", address(&route.path), route.controller);
    if route.absolute == Some(true) {
        line.push_str(" [absolute]");
    }
    line
}

/// Address text equivalent to the compiled path.
fn address(path: &RoutePath) -> String {
    match path {
        RoutePath::Literal(text) => format!("/{text}"),
        RoutePath::Segments(segments) => segments
            .iter()
            .map(|segment| match segment {
                PathSegment::Literal(text) => format!("/{text}"),
                PathSegment::Variable(name) => format!("/:{name}"),
                PathSegment::Wildcard(name) => format!("/:{name}..."),
                PathSegment::TypedVariable { name, constraint } => {
                    if constraint == NUMERIC_CONSTRAINT {
                        format!("/:{name}:int")
                    } else {
                        format!("/:{name}{{{constraint}}}")
                    }
                }
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn method_list_shapes() {
        assert_eq!(http_methods(&[]).unwrap(), None);
        assert_eq!(
            http_methods(&["GET".to_string()]).unwrap(),
            Some(HttpMethods::One("GET".into()))
        );
        assert_eq!(
            http_methods(&["GET".to_string(), "POST".to_string()]).unwrap(),
            Some(HttpMethods::Many(vec!["GET".into(), "POST".into()]))
        );
    }

    #[test]
    fn method_case_is_preserved() {
        assert_eq!(
            http_methods(&["get".to_string()]).unwrap(),
            Some(HttpMethods::One("get".into()))
        );
        assert_eq!(
            http_methods(&["Get".to_string(), "post".to_string()]).unwrap(),
            Some(HttpMethods::Many(vec!["Get".into(), "post".into()]))
        );
    }

    #[test]
    fn bad_method_is_invalid_input() {
        let err = http_methods(&["GE T".to_string()]).unwrap_err();
        assert!(matches!(err, CliError::InvalidInput { .. }));
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn permission_values() {
        assert_eq!(permission("true"), Permission::Flag(true));
        assert_eq!(permission("false"), Permission::Flag(false));
        assert_eq!(
            permission("controllers/Api@users"),
            Permission::Controller("controllers/Api@users".into())
        );
    }

    #[test]
    fn address_round_trips_through_compiler() {
        for text in ["/users/:id/posts/:postId:int", "/files/:path...", "/about/team"] {
            let path = RoutePatternCompiler::compile(text).unwrap().into_route_path();
            assert_eq!(address(&path), text);
        }
    }

    #[test]
    fn describe_route() {
        let mut route = Route::new(
            RoutePath::Literal("about".into()),
            "controllers\\Pages@about",
        );
        assert_eq!(describe(&route), "ANY /about -> controllers\\Pages@about");

        route.method = Some(HttpMethods::Many(vec!["GET".into(), "HEAD".into()]));
        route.absolute = Some(true);
        assert_eq!(
            describe(&route),
            "GET,HEAD /about -> controllers\\Pages@about [absolute]"
        );
    }
}
