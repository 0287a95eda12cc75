use answer_dns_application::ports::AnswersSource;
use answer_dns_domain::ConfigError;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Reads the answers document from disk on every load.
pub struct FileAnswersSource {
    path: PathBuf,
}

impl FileAnswersSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl AnswersSource for FileAnswersSource {
    async fn load(&self) -> Result<String, ConfigError> {
        debug!(path = %self.path.display(), "Reading answers file");
        tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| ConfigError::FileRead(self.path.display().to_string(), e.to_string()))
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn test_reads_file_contents() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{\"default\": {{}}}}").unwrap();

        let source = FileAnswersSource::new(file.path());
        assert_eq!(source.load().await.unwrap(), "{\"default\": {}}");
        assert_eq!(source.describe(), file.path().display().to_string());
    }

    #[tokio::test]
    async fn test_missing_file() {
        let source = FileAnswersSource::new("/nonexistent/answers.json");
        assert!(matches!(
            source.load().await,
            Err(ConfigError::FileRead(path, _)) if path == "/nonexistent/answers.json"
        ));
    }
}
