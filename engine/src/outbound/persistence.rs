//! File-backed preference storage.
//!
//! The dashboard keeps saved row orders and pinned routes in browser
//! local storage; the engine's equivalent is a single JSON document next
//! to the installation. Writes go through a temp-file-and-rename cycle
//! so a crash mid-write never corrupts the document.

use std::io::{self, Write};
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use async_trait::async_trait;
use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs::{Dir, OpenOptions};

use crate::domain::points::BoardPreferences;
use crate::domain::ports::{PreferencesRepository, PreferencesRepositoryError};

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Preference store writing one JSON document under a directory handle.
#[derive(Debug)]
pub struct JsonPreferencesStore {
    dir: Dir,
    file_name: Utf8PathBuf,
}

impl JsonPreferencesStore {
    /// Opens a store rooted at the document's parent directory.
    ///
    /// The directory must already exist; the document itself may not,
    /// in which case [`PreferencesRepository::load`] returns defaults.
    pub fn open(path: &Path) -> Result<Self, PreferencesRepositoryError> {
        let path = Utf8Path::from_path(path).ok_or_else(|| {
            PreferencesRepositoryError::storage(format!(
                "preference path is not valid UTF-8: {}",
                path.display()
            ))
        })?;
        let file_name = path.file_name().ok_or_else(|| {
            PreferencesRepositoryError::storage(format!(
                "preference path has no file name: {path}"
            ))
        })?;
        let parent = match path.parent() {
            Some(parent) if !parent.as_str().is_empty() => parent,
            _ => Utf8Path::new("."),
        };
        let dir = Dir::open_ambient_dir(parent, ambient_authority()).map_err(|err| {
            PreferencesRepositoryError::storage(format!(
                "cannot open preference directory {parent}: {err}"
            ))
        })?;
        Ok(Self {
            dir,
            file_name: Utf8PathBuf::from(file_name),
        })
    }

    fn write_atomic(&self, contents: &str) -> Result<(), PreferencesRepositoryError> {
        let counter = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);
        let suffix = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |elapsed| elapsed.as_nanos());
        let tmp_name = format!(
            ".{}.tmp.{}.{}.{}",
            self.file_name,
            std::process::id(),
            suffix,
            counter
        );

        self.write_temp_file(&tmp_name, contents)?;
        if let Err(err) = self.rename_temp(&tmp_name) {
            // Best-effort cleanup of the orphaned temp file.
            drop(self.dir.remove_file(&tmp_name));
            return Err(PreferencesRepositoryError::storage(format!(
                "cannot replace {}: {err}",
                self.file_name
            )));
        }
        Ok(())
    }

    fn write_temp_file(
        &self,
        tmp_name: &str,
        contents: &str,
    ) -> Result<(), PreferencesRepositoryError> {
        let mut options = OpenOptions::new();
        options.write(true).create_new(true);
        let mut file = self.dir.open_with(tmp_name, &options).map_err(|err| {
            PreferencesRepositoryError::storage(format!("cannot create {tmp_name}: {err}"))
        })?;

        let written = file
            .write_all(contents.as_bytes())
            .and_then(|()| file.sync_all());
        if let Err(err) = written {
            drop(file);
            drop(self.dir.remove_file(tmp_name));
            return Err(PreferencesRepositoryError::storage(format!(
                "cannot write {tmp_name}: {err}"
            )));
        }
        Ok(())
    }

    #[cfg(windows)]
    fn rename_temp(&self, tmp_name: &str) -> io::Result<()> {
        // Windows rename fails if the target exists, so remove it first.
        match self.dir.remove_file(&self.file_name) {
            Ok(()) => {}
            Err(err) if err.kind() == io::ErrorKind::NotFound => {}
            Err(err) => return Err(err),
        }
        self.dir.rename(tmp_name, &self.dir, &self.file_name)
    }

    #[cfg(not(windows))]
    fn rename_temp(&self, tmp_name: &str) -> io::Result<()> {
        self.dir.rename(tmp_name, &self.dir, &self.file_name)
    }
}

#[async_trait]
impl PreferencesRepository for JsonPreferencesStore {
    async fn load(&self) -> Result<BoardPreferences, PreferencesRepositoryError> {
        let contents = match self.dir.read_to_string(&self.file_name) {
            Ok(contents) => contents,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return Ok(BoardPreferences::default());
            }
            Err(err) => {
                return Err(PreferencesRepositoryError::storage(format!(
                    "cannot read {}: {err}",
                    self.file_name
                )));
            }
        };
        serde_json::from_str(&contents).map_err(|err| {
            PreferencesRepositoryError::storage(format!(
                "preference document {} is malformed: {err}",
                self.file_name
            ))
        })
    }

    async fn save(&self, preferences: &BoardPreferences) -> Result<(), PreferencesRepositoryError> {
        let contents = serde_json::to_string_pretty(preferences).map_err(|err| {
            PreferencesRepositoryError::storage(format!("cannot serialize preferences: {err}"))
        })?;
        self.write_atomic(&contents)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use rstest::rstest;
    use uuid::Uuid;

    use crate::domain::points::SavedRowOrder;

    use super::*;

    fn sample_preferences() -> BoardPreferences {
        BoardPreferences {
            saved_orders: vec![SavedRowOrder {
                id: Uuid::new_v4(),
                label: "Morning sweep".to_owned(),
                codes: vec!["2".to_owned(), "9".to_owned(), "10".to_owned()],
            }],
            pinned_route_ids: vec![Uuid::new_v4()],
        }
    }

    #[rstest]
    #[tokio::test]
    async fn missing_document_loads_defaults() {
        let dir = tempfile::tempdir().expect("temp dir");
        let store = JsonPreferencesStore::open(&dir.path().join("preferences.json"))
            .expect("store opens");

        let loaded = store.load().await.expect("load succeeds");
        assert_eq!(loaded, BoardPreferences::default());
    }

    #[rstest]
    #[tokio::test]
    async fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().expect("temp dir");
        let store = JsonPreferencesStore::open(&dir.path().join("preferences.json"))
            .expect("store opens");
        let preferences = sample_preferences();

        store.save(&preferences).await.expect("save succeeds");
        let loaded = store.load().await.expect("load succeeds");
        assert_eq!(loaded, preferences);
    }

    #[rstest]
    #[tokio::test]
    async fn save_overwrites_an_existing_document() {
        let dir = tempfile::tempdir().expect("temp dir");
        let store = JsonPreferencesStore::open(&dir.path().join("preferences.json"))
            .expect("store opens");

        store
            .save(&sample_preferences())
            .await
            .expect("first save succeeds");
        let replacement = BoardPreferences::default();
        store.save(&replacement).await.expect("second save succeeds");

        let loaded = store.load().await.expect("load succeeds");
        assert_eq!(loaded, replacement);
    }

    #[rstest]
    #[tokio::test]
    async fn malformed_document_is_a_storage_error() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("preferences.json");
        std::fs::write(&path, "{not json").expect("write fixture");

        let store = JsonPreferencesStore::open(&path).expect("store opens");
        let error = store.load().await.expect_err("malformed document");
        assert!(matches!(error, PreferencesRepositoryError::Storage { .. }));
    }
}
