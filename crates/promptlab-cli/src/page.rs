//! The JSON page file standing in for the browser form.

use anyhow::{Context, Result};
use promptlab_core::MemoryPage;
use std::fs;
use std::path::Path;

use crate::cli::PageArgs;

pub fn load(path: &Path) -> Result<MemoryPage> {
    if !path.exists() {
        return Ok(MemoryPage::new());
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("reading page file {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("parsing page file {}", path.display()))
}

pub fn save(page: &MemoryPage, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, serde_json::to_string_pretty(page)?)
        .with_context(|| format!("writing page file {}", path.display()))
}

/// Build the page for this run: the page file if any, then command line fields.
pub fn assemble(args: &PageArgs) -> Result<MemoryPage> {
    let mut page = match &args.page {
        Some(path) => load(path)?,
        None => MemoryPage::new(),
    };

    for (id, value) in &args.fields {
        page.fields.insert(id.clone(), value.clone());
    }
    for (group, value) in &args.pushes {
        page.push_to_group(group, value);
    }

    Ok(page)
}

#[cfg(test)]
mod tests {
    use super::*;
    use promptlab_core::fields::{FieldReader, RESPONSES, USER_PROMPTS};

    #[test]
    fn test_assemble_layers_fields_over_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("page.json");

        let stored = MemoryPage::new()
            .with_field("skills", "average")
            .with_field("mathProblem", "0.0, 0.4, 0.8")
            .with_group(RESPONSES, &["Which is larger?"]);
        save(&stored, &path).unwrap();

        let args = PageArgs {
            page: Some(path),
            fields: vec![("skills".to_string(), "good".to_string())],
            pushes: vec![(USER_PROMPTS.to_string(), "0.8".to_string())],
            ..Default::default()
        };
        let page = assemble(&args).unwrap();

        assert_eq!(page.read("skills"), "good");
        assert_eq!(page.read("mathProblem"), "0.0, 0.4, 0.8");
        assert_eq!(page.read_all(USER_PROMPTS), vec!["0.8"]);
        assert_eq!(page.read_all(RESPONSES), vec!["Which is larger?"]);
    }

    #[test]
    fn test_missing_page_file_is_empty_page() {
        let dir = tempfile::tempdir().unwrap();
        let page = load(&dir.path().join("absent.json")).unwrap();
        assert_eq!(page, MemoryPage::new());
    }

    #[test]
    fn test_minimal_page_file_parses() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("page.json");
        fs::write(&path, r#"{"fields": {"prompt-input": "hi"}}"#).unwrap();
        assert_eq!(load(&path).unwrap().read("prompt-input"), "hi");
    }
}
