//! Reading queries and model responses from arguments, files or stdin

use crate::error::CliError;
use std::path::{Path, PathBuf};
use tokio::io::AsyncReadExt;

/// Resolves the positional query or `--file`, exactly one of which must be given
pub async fn read_query(query: &Option<String>, file: &Option<PathBuf>) -> Result<String, CliError> {
    match (query, file) {
        (Some(query), None) => Ok(query.clone()),
        (None, Some(path)) => read_text(path).await,
        (Some(_), Some(_)) => Err(CliError::Input(
            "pass either a QUERY argument or --file, not both".to_string(),
        )),
        (None, None) => Err(CliError::Input(
            "a QUERY argument or --file is required".to_string(),
        )),
    }
}

/// Reads a file, or stdin when the path is `-`
pub async fn read_text(path: &Path) -> Result<String, CliError> {
    if path == Path::new("-") {
        let mut buffer = String::new();
        tokio::io::stdin().read_to_string(&mut buffer).await?;
        return Ok(buffer);
    }

    tokio::fs::read_to_string(path)
        .await
        .map_err(|e| CliError::Input(format!("Failed to read {}: {}", path.display(), e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[tokio::test]
    async fn test_read_query_from_argument() {
        let query = read_query(&Some("SELECT 1".to_string()), &None).await.unwrap();
        assert_eq!(query, "SELECT 1");
    }

    #[tokio::test]
    async fn test_read_query_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "SELECT * FROM users;").unwrap();

        let query = read_query(&None, &Some(file.path().to_path_buf())).await.unwrap();
        assert_eq!(query, "SELECT * FROM users;\n");
    }

    #[tokio::test]
    async fn test_read_query_requires_exactly_one_source() {
        let err = read_query(&None, &None).await.unwrap_err();
        assert_eq!(err.exit_code(), 4);

        let err = read_query(&Some("SELECT 1".to_string()), &Some(PathBuf::from("q.sql")))
            .await
            .unwrap_err();
        assert!(matches!(err, CliError::Input(_)));
    }

    #[tokio::test]
    async fn test_missing_file_is_input_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_text(&dir.path().join("missing.sql")).await.unwrap_err();
        assert!(err.to_string().contains("missing.sql"));
    }
}
