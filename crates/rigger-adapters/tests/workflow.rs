//! End-to-end workflows over the real PHP parser.

use std::path::Path;
use std::sync::Arc;

use rigger_adapters::{LocalFilesystem, MemoryFilesystem, PhpSourceParser};
use rigger_core::{
    application::{
        ApplicationError, AutoloaderService, ControllerService, PackageLocator, RouteRequest,
        RouterService, ports::Filesystem,
    },
    domain::{ControllerRef, Manifest, PackageName, QualifiedName, RelativePath, RoutePath},
    error::RiggerError,
};

const USERS: &str = r#"<?php
namespace packages\blog\controllers;

use packages\base\controller;

class Users extends controller {
    public function index() {
    }

    public function show($data) {
    }
}
"#;

const POST: &str = r#"<?php
namespace packages\blog\models;

interface Publishable {}
trait HasSlug {}
class Post implements Publishable {
    use HasSlug;
}
"#;

struct Services {
    autoloader: Arc<AutoloaderService>,
    router: RouterService,
    controllers: Arc<ControllerService>,
}

fn services(fs: Arc<dyn Filesystem>, packages_dir: &Path) -> Services {
    let packages = PackageLocator::new(Arc::clone(&fs), packages_dir);
    let autoloader = Arc::new(AutoloaderService::new(
        packages.clone(),
        Arc::clone(&fs),
        Arc::new(PhpSourceParser::new()),
    ));
    let controllers = Arc::new(ControllerService::new(
        packages.clone(),
        Arc::clone(&fs),
        Arc::clone(&autoloader),
    ));
    let router = RouterService::new(packages, fs, Arc::clone(&controllers));
    Services {
        autoloader,
        router,
        controllers,
    }
}

fn blog_fs() -> MemoryFilesystem {
    MemoryFilesystem::new()
        .with_file(
            "packages/blog/package.json",
            r#"{"permissions":"*","routing":"routing.json","autoload":"autoloader.json"}"#,
        )
        .with_file("packages/blog/controllers/Users.php", USERS)
        .with_file("packages/blog/models/Post.php", POST)
}

fn blog() -> PackageName {
    PackageName::new("blog").unwrap()
}

fn rel(path: &str) -> RelativePath {
    RelativePath::try_new(path).unwrap()
}

#[test]
fn register_then_route_to_controller() {
    let fs = blog_fs();
    let svc = services(Arc::new(fs.clone()), Path::new("packages"));

    svc.autoloader.init(&blog()).unwrap();
    svc.router.init(&blog()).unwrap();

    let outcome = svc
        .autoloader
        .add(&blog(), &rel("controllers/Users.php"), None)
        .unwrap();
    assert_eq!(outcome.classes.len(), 1);
    assert_eq!(outcome.classes[0].to_string(), "controllers\\Users");

    let reference = ControllerRef::parse("controllers/Users@show").unwrap();
    assert!(svc.controllers.exists(&blog(), &reference).unwrap());

    let route = svc
        .router
        .add(&blog(), RouteRequest::new("/users/:id", "controllers/Users@show"))
        .unwrap();
    assert!(matches!(route.path, RoutePath::Segments(_)));

    let routing = fs.read_file(Path::new("packages/blog/routing.json")).unwrap();
    assert_eq!(
        routing,
        r#"[
    {
        "path": [
            "users",
            {
                "type": "dynamic",
                "name": "id"
            }
        ],
        "controller": "controllers\\Users@show"
    }
]
"#
    );
}

#[test]
fn scanning_registers_every_declaration_kind() {
    let fs = blog_fs();
    let svc = services(Arc::new(fs.clone()), Path::new("packages"));
    svc.autoloader.init(&blog()).unwrap();

    svc.autoloader
        .add(&blog(), &rel("models/Post.php"), None)
        .unwrap();

    let manifest = svc.autoloader.load(&blog()).unwrap();
    let classes: Vec<String> = manifest.entries()[0]
        .classes
        .iter()
        .map(ToString::to_string)
        .collect();
    assert_eq!(
        classes,
        ["models\\Publishable", "models\\HasSlug", "models\\Post"]
    );
}

#[test]
fn rebuild_indexes_the_whole_package() {
    let fs = blog_fs().with_file("packages/blog/views/home.php", "<?php echo 1;");
    let svc = services(Arc::new(fs.clone()), Path::new("packages"));

    let outcome = svc.autoloader.rebuild(&blog()).unwrap();
    assert_eq!(outcome.files, 2);
    assert_eq!(outcome.classes, 4);

    let manifest =
        Manifest::from_json(&fs.read_file(Path::new("packages/blog/autoloader.json")).unwrap())
            .unwrap();
    let files: Vec<&str> = manifest.entries().iter().map(|e| e.file.as_str()).collect();
    assert_eq!(files, ["controllers/Users.php", "models/Post.php"]);
}

#[test]
fn syntax_errors_abort_without_writing() {
    let fs = blog_fs().with_file("packages/blog/Broken.php", "<?php class {");
    let svc = services(Arc::new(fs.clone()), Path::new("packages"));
    svc.autoloader.init(&blog()).unwrap();
    let before = fs.read_file(Path::new("packages/blog/autoloader.json"));

    let err = svc
        .autoloader
        .add(&blog(), &rel("Broken.php"), None)
        .unwrap_err();
    assert!(matches!(
        err,
        RiggerError::Application(ApplicationError::ParseFailure { .. })
    ));
    assert_eq!(fs.read_file(Path::new("packages/blog/autoloader.json")), before);
}

#[test]
fn route_to_missing_method_is_rejected() {
    let fs = blog_fs();
    let svc = services(Arc::new(fs.clone()), Path::new("packages"));
    svc.autoloader.init(&blog()).unwrap();
    svc.router.init(&blog()).unwrap();
    svc.autoloader
        .add(&blog(), &rel("controllers/Users.php"), None)
        .unwrap();

    let err = svc
        .router
        .add(&blog(), RouteRequest::new("/users", "controllers\\Users@destroy"))
        .unwrap_err();
    assert!(matches!(
        err,
        RiggerError::Application(ApplicationError::ControllerNotExist { .. })
    ));
    assert_eq!(
        fs.read_file(Path::new("packages/blog/routing.json")).as_deref(),
        Some("[]\n")
    );
}

#[test]
fn local_filesystem_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let package_dir = dir.path().join("blog");
    std::fs::create_dir_all(package_dir.join("controllers")).unwrap();
    std::fs::write(
        package_dir.join("package.json"),
        r#"{"autoload":"autoloader.json"}"#,
    )
    .unwrap();
    std::fs::write(package_dir.join("controllers/Users.php"), USERS).unwrap();

    let svc = services(Arc::new(LocalFilesystem::new()), dir.path());
    svc.autoloader.init(&blog()).unwrap();
    svc.autoloader
        .add(&blog(), &rel("controllers/Users.php"), None)
        .unwrap();

    let users = QualifiedName::parse("controllers\\Users").unwrap();
    assert_eq!(
        svc.autoloader.lookup(&blog(), &users).unwrap(),
        Some(rel("controllers/Users.php"))
    );

    let text = std::fs::read_to_string(package_dir.join("autoloader.json")).unwrap();
    let json: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(json["files"][0]["file"], "controllers/Users.php");
}
