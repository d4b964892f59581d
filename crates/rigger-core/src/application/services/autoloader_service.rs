//! Autoloader Service - maintains a package's class-location manifest.
//!
//! Every operation is a whole-file read-modify-write of the package's
//! autoloader file. Nothing is cached between calls and there is no locking:
//! two concurrent writers race and the last one wins. The new manifest is
//! fully built in memory before anything is written.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use crate::{
    application::{
        ApplicationError,
        ports::{Filesystem, SourceParser},
        services::PackageLocator,
    },
    domain::{
        Declaration, DeclarationScanner, Manifest, NameRules, PackageName, QualifiedName,
        RelativePath, SourceNode,
    },
    error::{RiggerError, RiggerResult},
};

/// Result of an `add`/`register` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddOutcome {
    pub autoloader: PathBuf,
    pub file: RelativePath,
    pub classes: Vec<QualifiedName>,
    /// How many of `classes` were not registered before.
    pub added: usize,
}

/// Result of a `rebuild` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RebuildOutcome {
    pub autoloader: PathBuf,
    pub files: usize,
    pub classes: usize,
    pub skipped: Vec<QualifiedName>,
}

pub struct AutoloaderService {
    packages: PackageLocator,
    filesystem: Arc<dyn Filesystem>,
    parser: Arc<dyn SourceParser>,
}

impl AutoloaderService {
    pub fn new(
        packages: PackageLocator,
        filesystem: Arc<dyn Filesystem>,
        parser: Arc<dyn SourceParser>,
    ) -> Self {
        Self {
            packages,
            filesystem,
            parser,
        }
    }

    /// Overwrite the package's autoloader with an empty manifest.
    #[instrument(skip(self), fields(package = %package))]
    pub fn init(&self, package: &PackageName) -> RiggerResult<PathBuf> {
        self.packages.require(package)?;
        let path = self.packages.require_autoloader(package)?;
        self.write_manifest(&path, &Manifest::empty())?;
        info!(path = %path.display(), "Autoloader initialised");
        Ok(path)
    }

    /// The package's manifest.
    pub fn load(&self, package: &PackageName) -> RiggerResult<Manifest> {
        let path = self.packages.require_autoloader(package)?;
        self.read_manifest(&path)
    }

    /// Register classes for `file`.
    ///
    /// With `classes` given, each name has `/` normalised to `\` and must be
    /// a valid qualified name. Without, the file is parsed and every declared
    /// class, interface and trait is registered with its
    /// `packages\<package>\` prefix removed.
    #[instrument(skip(self, classes), fields(package = %package, file = %file))]
    pub fn add(
        &self,
        package: &PackageName,
        file: &RelativePath,
        classes: Option<&[String]>,
    ) -> RiggerResult<AddOutcome> {
        self.packages.require(package)?;
        let classes = match classes {
            Some(names) => parse_class_names(names)?,
            None => self.classes_in_file(package, file)?,
        };
        self.merge(package, file, classes, false)
    }

    /// Like [`Self::add`] with explicit classes, but refuses any class that
    /// is already registered under a different file.
    #[instrument(skip(self, classes), fields(package = %package, file = %file))]
    pub fn register(
        &self,
        package: &PackageName,
        file: &RelativePath,
        classes: &[String],
    ) -> RiggerResult<AddOutcome> {
        self.packages.require(package)?;
        let classes = parse_class_names(classes)?;
        self.merge(package, file, classes, true)
    }

    /// File that declares `class`, relative to the package.
    pub fn lookup(
        &self,
        package: &PackageName,
        class: &QualifiedName,
    ) -> RiggerResult<Option<RelativePath>> {
        let manifest = self.load(package)?;
        Ok(manifest.lookup_file(class).cloned())
    }

    pub fn class_exists(&self, package: &PackageName, class: &QualifiedName) -> RiggerResult<bool> {
        Ok(self.lookup(package, class)?.is_some())
    }

    /// Replace the manifest with one built by scanning every `.php` file in
    /// the package.
    ///
    /// Files are listed in path order; files without declarations are left
    /// out. Declarations outside the package namespace are skipped.
    #[instrument(skip(self), fields(package = %package))]
    pub fn rebuild(&self, package: &PackageName) -> RiggerResult<RebuildOutcome> {
        let dir = self.packages.require(package)?;
        let path = self.packages.require_autoloader(package)?;

        let mut manifest = Manifest::empty();
        let mut skipped = Vec::new();
        let mut classes = 0;
        for source in self.filesystem.list_files(&dir, "php")? {
            let file = RelativePath::from_package_path(&dir, &source)?;
            let mut names = Vec::new();
            for decl in self.scan(&source, &file)? {
                match decl.name.strip_package_prefix(package) {
                    Ok(name) => names.push(name),
                    Err(_) => {
                        warn!(
                            class = %decl.name,
                            file = %file,
                            "Declaration outside the package namespace"
                        );
                        skipped.push(decl.name);
                    }
                }
            }
            if names.is_empty() {
                continue;
            }
            classes += manifest.merge_insert(file, names);
        }

        self.write_manifest(&path, &manifest)?;
        info!(files = manifest.entries().len(), classes, "Autoloader rebuilt");
        Ok(RebuildOutcome {
            autoloader: path,
            files: manifest.entries().len(),
            classes,
            skipped,
        })
    }

    /// Parse and scan the source file at `path`.
    pub fn scan(&self, path: &Path, file: &RelativePath) -> RiggerResult<Vec<Declaration>> {
        let nodes = self.parse_file(path)?;
        Ok(DeclarationScanner::scan(&nodes, file)?)
    }

    /// Parse the source file at `path` into a declaration tree.
    pub fn parse_file(&self, path: &Path) -> RiggerResult<Vec<SourceNode>> {
        let source = self.filesystem.read_to_string(path)?;
        self.parser.parse(&source).map_err(|e| {
            ApplicationError::ParseFailure {
                path: path.to_path_buf(),
                reason: e.to_string(),
            }
            .into()
        })
    }

    // -------------------------------------------------------------------------
    // Internal Helpers
    // -------------------------------------------------------------------------

    fn classes_in_file(
        &self,
        package: &PackageName,
        file: &RelativePath,
    ) -> RiggerResult<Vec<QualifiedName>> {
        let source = self.packages.resolve(package, file);
        let declarations = self.scan(&source, file)?;
        debug!(count = declarations.len(), "Declarations found");
        declarations
            .into_iter()
            .map(|decl| decl.name.strip_package_prefix(package).map_err(RiggerError::from))
            .collect()
    }

    fn merge(
        &self,
        package: &PackageName,
        file: &RelativePath,
        classes: Vec<QualifiedName>,
        exclusive: bool,
    ) -> RiggerResult<AddOutcome> {
        let path = self.packages.require_autoloader(package)?;
        let mut manifest = self.read_manifest(&path)?;

        if exclusive {
            for class in &classes {
                if let Some(owner) = manifest.lookup_file(class).filter(|owner| *owner != file) {
                    return Err(ApplicationError::AlreadyRegistered {
                        class: class.to_string(),
                        file: owner.to_string(),
                    }
                    .into());
                }
            }
        }

        let added = manifest.merge_insert(file.clone(), classes.iter().cloned());
        self.write_manifest(&path, &manifest)?;
        info!(added, total = classes.len(), "Autoloader updated");

        Ok(AddOutcome {
            autoloader: path,
            file: file.clone(),
            classes,
            added,
        })
    }

    fn read_manifest(&self, path: &Path) -> RiggerResult<Manifest> {
        let text = self.filesystem.read_to_string(path)?;
        Manifest::from_json(&text).map_err(|e| {
            ApplicationError::CorruptManifest {
                path: path.to_path_buf(),
                reason: e.to_string(),
            }
            .into()
        })
    }

    fn write_manifest(&self, path: &Path, manifest: &Manifest) -> RiggerResult<()> {
        let json = manifest.to_json()?;
        if let Some(parent) = path.parent() {
            self.filesystem.create_dir_all(parent)?;
        }
        self.filesystem.write_file(path, &json)
    }
}

fn parse_class_names(names: &[String]) -> RiggerResult<Vec<QualifiedName>> {
    names
        .iter()
        .map(|name| {
            QualifiedName::parse(&NameRules::normalize_separators(name)).map_err(RiggerError::from)
        })
        .collect()
}
