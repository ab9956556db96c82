use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::ArtifactError;

/// Creates uniquely named transient audio files, e.g. `speech_<hex>.mp3`.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    dir: PathBuf,
    prefix: String,
    suffix: String,
}

/// A transient audio file. Removed when released or dropped, whichever
/// comes first.
#[derive(Debug)]
pub struct AudioArtifact {
    file: NamedTempFile,
}

impl ArtifactStore {
    pub fn new(dir: impl Into<PathBuf>, prefix: impl Into<String>, extension: &str) -> Self {
        Self {
            dir: dir.into(),
            prefix: prefix.into(),
            suffix: format!(".{}", extension.trim_start_matches('.')),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Reserve an empty artifact for an adapter to write into.
    pub fn acquire(&self) -> Result<AudioArtifact, ArtifactError> {
        let file = tempfile::Builder::new()
            .prefix(&self.prefix)
            .suffix(&self.suffix)
            .rand_bytes(16)
            .tempfile_in(&self.dir)
            .map_err(|source| ArtifactError::Create {
                dir: self.dir.display().to_string(),
                source,
            })?;

        debug!(path = %file.path().display(), "Acquired audio artifact");
        Ok(AudioArtifact { file })
    }

    pub fn materialize(&self, bytes: &[u8]) -> Result<AudioArtifact, ArtifactError> {
        let mut artifact = self.acquire()?;
        artifact
            .file
            .write_all(bytes)
            .and_then(|_| artifact.file.flush())
            .map_err(ArtifactError::Write)?;
        Ok(artifact)
    }
}

impl AudioArtifact {
    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Read the full contents, then remove the file. Removal happens even
    /// when the read fails.
    pub fn read_and_release(self) -> Result<Vec<u8>, ArtifactError> {
        let read = std::fs::read(self.file.path()).map_err(ArtifactError::Read);
        let path = self.file.path().to_path_buf();
        let released = self.file.close().map_err(ArtifactError::Remove);

        let bytes = read?;
        released?;
        debug!(path = %path.display(), bytes = bytes.len(), "Released audio artifact");
        Ok(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries(dir: &Path) -> usize {
        std::fs::read_dir(dir).unwrap().count()
    }

    #[test]
    fn names_follow_prefix_and_extension() {
        let dir = tempfile::tempdir().unwrap();
        let store = ArtifactStore::new(dir.path(), "speech_", "mp3");

        let first = store.acquire().unwrap();
        let second = store.acquire().unwrap();
        let name = first.path().file_name().unwrap().to_string_lossy().to_string();

        assert!(name.starts_with("speech_"));
        assert!(name.ends_with(".mp3"));
        assert_ne!(first.path(), second.path());
        assert_eq!(first.path().parent().unwrap(), dir.path());
    }

    #[test]
    fn materialize_then_release_returns_bytes_and_removes_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = ArtifactStore::new(dir.path(), "speech_", ".mp3");

        let artifact = store.materialize(b"\xFF\xD8\x00\x10").unwrap();
        let path = artifact.path().to_path_buf();
        assert!(path.exists());

        let bytes = artifact.read_and_release().unwrap();
        assert_eq!(bytes, b"\xFF\xD8\x00\x10".to_vec());
        assert!(!path.exists());
        assert_eq!(entries(dir.path()), 0);
    }

    #[test]
    fn dropping_an_unread_artifact_removes_it() {
        let dir = tempfile::tempdir().unwrap();
        let store = ArtifactStore::new(dir.path(), "speech_", "mp3");

        for _ in 0..5 {
            let artifact = store.materialize(b"abc").unwrap();
            assert!(artifact.path().exists());
        }
        assert_eq!(entries(dir.path()), 0);
    }

    #[test]
    fn failed_read_still_releases() {
        let dir = tempfile::tempdir().unwrap();
        let store = ArtifactStore::new(dir.path(), "speech_", "mp3");

        let artifact = store.materialize(b"abc").unwrap();
        std::fs::remove_file(artifact.path()).unwrap();

        let err = artifact.read_and_release().unwrap_err();
        assert!(matches!(err, ArtifactError::Read(_)));
        assert_eq!(entries(dir.path()), 0);
    }

    #[test]
    fn missing_directory_is_a_create_error() {
        let store = ArtifactStore::new("/nonexistent/artifact/dir", "speech_", "mp3");
        assert!(matches!(store.acquire(), Err(ArtifactError::Create { .. })));
    }
}
