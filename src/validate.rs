use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::ShoutoutError;

static EXCEL_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\.(xlsx|xls)$").expect("valid regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkbookFormat {
    Xlsx,
    Xls,
}

/// Accept a file name only when it ends in `.xlsx` or `.xls`, ignoring case.
pub fn validate_file_name(name: &str) -> Result<WorkbookFormat, ShoutoutError> {
    let caps = EXCEL_NAME
        .captures(name)
        .ok_or_else(|| ShoutoutError::InvalidExtension { name: name.to_string() })?;
    if caps[1].eq_ignore_ascii_case("xlsx") {
        Ok(WorkbookFormat::Xlsx)
    } else {
        Ok(WorkbookFormat::Xls)
    }
}

pub fn validate_path(path: &Path) -> Result<WorkbookFormat, ShoutoutError> {
    let name = path
        .file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();
    validate_file_name(&name)
}
