//! Things the user can do with generated interface code.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{error, info};

use crate::error::{ActionError, ClipboardError};

pub fn download_file_name() -> String {
    format!(
        "generated-interface-{}.html",
        chrono::Utc::now().timestamp_millis()
    )
}

fn write_file(path: PathBuf, code: &str) -> Result<PathBuf, ActionError> {
    fs::write(&path, code).map_err(|source| ActionError::Write {
        path: path.clone(),
        source,
    })?;
    Ok(path)
}

/// Save the code as a timestamped HTML file in `dir`.
pub fn download(dir: &Path, code: &str) -> Result<PathBuf, ActionError> {
    let path = write_file(dir.join(download_file_name()), code)?;
    info!(path = %path.display(), "saved generated interface");
    Ok(path)
}

pub fn copy_to_clipboard(code: &str) -> Result<(), ClipboardError> {
    let mut clipboard = arboard::Clipboard::new()?;
    clipboard.set_text(code)?;
    Ok(())
}

/// Write the code to a temporary file and open it in the default browser.
pub fn open_in_browser(code: &str) -> Result<PathBuf, ActionError> {
    let path = write_file(std::env::temp_dir().join(download_file_name()), code)?;
    open::that(&path).map_err(|e| {
        error!("failed to open browser: {}", e);
        ActionError::Open(e)
    })?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_name_pattern() {
        let name = download_file_name();
        assert!(name.starts_with("generated-interface-"));
        assert!(name.ends_with(".html"));
        let stamp = &name["generated-interface-".len()..name.len() - ".html".len()];
        assert!(stamp.parse::<i64>().is_ok());
    }

    #[test]
    fn test_download_writes_code_unescaped() {
        let dir = tempfile::tempdir().unwrap();
        let code = "<html><body><p>Tom & Jerry's \"quiz\"</p></body></html>";
        let path = download(dir.path(), code).unwrap();
        assert_eq!(path.parent(), Some(dir.path()));
        assert_eq!(fs::read_to_string(path).unwrap(), code);
    }

    #[test]
    fn test_download_into_missing_dir_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = download(&dir.path().join("absent"), "x").unwrap_err();
        assert!(matches!(err, ActionError::Write { .. }));
    }
}
