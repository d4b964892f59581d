//! The autoloader manifest: which package file declares which classes.
//!
//! ```json
//! {
//!     "files": [
//!         { "file": "controllers/Users.php", "classes": ["controllers\\Users"] }
//!     ]
//! }
//! ```
//!
//! Entries keep their insertion order and every mutation goes through
//! [`Manifest::merge_insert`], which is idempotent. Persisting is whole-file;
//! there is no append-only on-disk form.

use serde::{Deserialize, Serialize};

use crate::domain::{
    entities::common::RelativePath, error::DomainError, json, value_objects::QualifiedName,
};

const DOCUMENT: &str = "autoloader";

/// One file and the classes it declares.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestEntry {
    pub file: RelativePath,
    pub classes: Vec<QualifiedName>,
}

impl ManifestEntry {
    pub fn contains(&self, class: &QualifiedName) -> bool {
        self.classes.contains(class)
    }
}

/// The class-location index of a single package.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    files: Vec<ManifestEntry>,
}

impl Manifest {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Decode a manifest document. A missing `files` key is an error.
    pub fn from_json(text: &str) -> Result<Self, DomainError> {
        let manifest: Self = json::from_json(text, DOCUMENT)?;
        manifest.check_unique_files()?;
        Ok(manifest)
    }

    pub fn to_json(&self) -> Result<String, DomainError> {
        json::to_pretty_json(self, DOCUMENT)
    }

    pub fn entries(&self) -> &[ManifestEntry] {
        &self.files
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// The file of the first entry that lists `class`.
    ///
    /// First match wins: entries are appended in registration order, so the
    /// earliest owner is reported when a name was registered twice.
    pub fn lookup_file(&self, class: &QualifiedName) -> Option<&RelativePath> {
        self.files
            .iter()
            .find(|entry| entry.contains(class))
            .map(|entry| &entry.file)
    }

    pub fn class_exists(&self, class: &QualifiedName) -> bool {
        self.lookup_file(class).is_some()
    }

    /// Union `classes` into the entry for `file`, or append a new entry.
    ///
    /// Names already present are skipped and new ones keep their first-seen
    /// order, so repeating a call never changes the manifest. Returns the
    /// number of names actually added.
    pub fn merge_insert<I>(&mut self, file: RelativePath, classes: I) -> usize
    where
        I: IntoIterator<Item = QualifiedName>,
    {
        let index = match self.files.iter().position(|entry| entry.file == file) {
            Some(index) => index,
            None => {
                self.files.push(ManifestEntry {
                    file,
                    classes: Vec::new(),
                });
                self.files.len() - 1
            }
        };

        let entry = &mut self.files[index];
        let mut added = 0;
        for class in classes {
            if !entry.contains(&class) {
                entry.classes.push(class);
                added += 1;
            }
        }
        added
    }

    fn check_unique_files(&self) -> Result<(), DomainError> {
        for (i, entry) in self.files.iter().enumerate() {
            if self.files[..i].iter().any(|prev| prev.file == entry.file) {
                return Err(DomainError::Decode {
                    document: DOCUMENT,
                    reason: format!("file '{}' is listed more than once", entry.file),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(p: &str) -> RelativePath {
        RelativePath::try_new(p).unwrap()
    }

    fn name(n: &str) -> QualifiedName {
        QualifiedName::parse(n).unwrap()
    }

    #[test]
    fn empty_manifest_serializes_with_files_key() {
        let text = Manifest::empty().to_json().unwrap();
        assert_eq!(text, "{\n    \"files\": []\n}\n");
    }

    #[test]
    fn merge_insert_then_lookup() {
        let mut m = Manifest::empty();
        m.merge_insert(path("controllers/Foo.php"), [name("controllers\\Foo")]);

        assert!(m.class_exists(&name("controllers\\Foo")));
        assert!(!m.class_exists(&name("controllers\\Bar")));
        assert_eq!(
            m.lookup_file(&name("controllers\\Foo")).map(RelativePath::as_str),
            Some("controllers/Foo.php")
        );
    }

    #[test]
    fn merge_insert_is_idempotent() {
        let mut once = Manifest::empty();
        once.merge_insert(path("a.php"), [name("A"), name("B")]);

        let mut twice = once.clone();
        let added = twice.merge_insert(path("a.php"), [name("A"), name("B")]);

        assert_eq!(added, 0);
        assert_eq!(once, twice);
        assert_eq!(once.to_json().unwrap(), twice.to_json().unwrap());
    }

    #[test]
    fn merge_insert_unions_into_existing_entry() {
        let mut m = Manifest::empty();
        m.merge_insert(path("a.php"), [name("A")]);
        m.merge_insert(path("b.php"), [name("B")]);
        let added = m.merge_insert(path("a.php"), [name("A"), name("C"), name("C")]);

        assert_eq!(added, 1);
        assert_eq!(m.entries().len(), 2);
        assert_eq!(m.entries()[0].classes, vec![name("A"), name("C")]);
    }

    #[test]
    fn lookup_survives_unrelated_inserts() {
        let mut m = Manifest::empty();
        m.merge_insert(path("f.php"), [name("x\\N")]);
        m.merge_insert(path("f2.php"), [name("x\\N2")]);
        assert_eq!(
            m.lookup_file(&name("x\\N")).map(RelativePath::as_str),
            Some("f.php")
        );
    }

    #[test]
    fn first_registered_owner_wins() {
        let mut m = Manifest::empty();
        m.merge_insert(path("first.php"), [name("Dup")]);
        m.merge_insert(path("second.php"), [name("Dup")]);
        assert_eq!(
            m.lookup_file(&name("Dup")).map(RelativePath::as_str),
            Some("first.php")
        );
    }

    #[test]
    fn round_trip_through_json() {
        let mut m = Manifest::empty();
        m.merge_insert(path("libraries/Post.php"), [name("Post"), name("post\\Tag")]);
        m.merge_insert(path("controllers/Posts.php"), [name("controllers\\Posts")]);

        let text = m.to_json().unwrap();
        assert!(text.contains("libraries/Post.php"));
        assert_eq!(Manifest::from_json(&text).unwrap(), m);
    }

    #[test]
    fn missing_files_key_is_rejected() {
        assert!(matches!(
            Manifest::from_json("{}"),
            Err(DomainError::Decode { .. })
        ));
        assert!(Manifest::from_json("not json").is_err());
        assert!(Manifest::from_json("[]").is_err());
    }

    #[test]
    fn duplicate_file_entries_are_rejected() {
        let text = r#"{"files":[{"file":"a.php","classes":["A"]},{"file":"a.php","classes":["B"]}]}"#;
        assert!(Manifest::from_json(text).is_err());
    }
}
