//! File payload source: a saved endpoint response on disk.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;

use super::{FetchError, PayloadSource};

pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PayloadSource for FileSource {
    fn fetch(&self) -> Result<Value, FetchError> {
        let origin = self.path.display().to_string();
        let data = fs::read_to_string(&self.path).map_err(|source| FetchError::Io {
            path: origin.clone(),
            source,
        })?;
        serde_json::from_str(&data).map_err(|e| FetchError::Parse {
            origin,
            message: e.to_string(),
        })
    }

    fn describe(&self) -> String {
        format!("file://{}", self.path.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn reads_saved_payload() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"json_company_data": [], "cleaned_pdf": {{}}}}"#).unwrap();

        let source = FileSource::new(file.path());
        let value = source.fetch().unwrap();
        assert!(value["json_company_data"].as_array().unwrap().is_empty());
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let source = FileSource::new(dir.path().join("absent.json"));
        assert!(matches!(source.fetch(), Err(FetchError::Io { .. })));
    }

    #[test]
    fn garbage_is_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        let source = FileSource::new(file.path());
        assert!(matches!(source.fetch(), Err(FetchError::Parse { .. })));
    }

    #[test]
    fn describe_uses_file_scheme() {
        let source = FileSource::new("/tmp/payload.json");
        assert_eq!(source.describe(), "file:///tmp/payload.json");
        assert_eq!(source.path(), Path::new("/tmp/payload.json"));
    }
}
