// Author: Dustin Pilgrim
// License: MIT

use std::fs;
use std::path::{Path, PathBuf};

use crate::ast::Document;
use crate::parser;
use crate::printer;
use crate::PatchError;

mod access;
mod conversion;
mod validation;

pub use access::ConfigValue;

/// Default storage variable: the `$CONFIG` array Nextcloud keeps in
/// `config/config.php`.
pub const DEFAULT_STORAGE_VAR: &str = "CONFIG";

/// A value-level view over one array literal embedded in a PHP source
/// file, with read, write and render operations. Everything outside the
/// recognized assignment is preserved exactly.
#[derive(Debug)]
pub struct ConfigTree {
    document: Document,
    path: Option<PathBuf>,
    storage_var: String,
}

impl ConfigTree {
    /// Load a PHP config file using the default `$CONFIG` storage variable.
    ///
    /// # Example
    /// ```ignore
    /// let tree = ConfigTree::from_file("config/config.php")?;
    /// ```
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, PatchError> {
        Self::from_file_with_var(path, DEFAULT_STORAGE_VAR)
    }

    /// Load a PHP config file that stores its settings under a different
    /// variable name. `~/` paths are expanded against the home directory.
    pub fn from_file_with_var<P: AsRef<Path>>(
        path: P,
        storage_var: &str,
    ) -> Result<Self, PatchError> {
        validation::validate_storage_var(storage_var)?;

        let resolved = resolve_config_path(path.as_ref());
        let content = fs::read_to_string(&resolved).map_err(|e| PatchError::FileError {
            message: format!("Failed to read file: {}", e),
            path: resolved.to_string_lossy().to_string(),
            hint: Some("Check that the file exists and is readable".into()),
            code: Some(301),
        })?;

        let document = parser::parse_document(&content, storage_var)?;

        Ok(Self {
            document,
            path: Some(resolved),
            storage_var: storage_var.to_string(),
        })
    }

    /// Parse a config from a string (no file I/O; `save` is unavailable
    /// on the resulting tree).
    pub fn from_str(content: &str) -> Result<Self, PatchError> {
        Self::from_str_with_var(content, DEFAULT_STORAGE_VAR)
    }

    pub fn from_str_with_var(content: &str, storage_var: &str) -> Result<Self, PatchError> {
        validation::validate_storage_var(storage_var)?;
        let document = parser::parse_document(content, storage_var)?;

        Ok(Self {
            document,
            path: None,
            storage_var: storage_var.to_string(),
        })
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn storage_var(&self) -> &str {
        &self.storage_var
    }

    /// Serialize the (possibly mutated) tree back to PHP source.
    pub fn render(&self) -> String {
        printer::print_document(&self.document)
    }

    /// Render and overwrite the backing file. The in-memory tree is
    /// untouched by a failed write, so the caller may retry.
    pub fn save(&self) -> Result<(), PatchError> {
        let path = self.path.as_ref().ok_or_else(|| PatchError::FileError {
            message: "Tree has no backing file".into(),
            path: String::new(),
            hint: Some("Trees built with from_str cannot be saved in place".into()),
            code: Some(305),
        })?;

        fs::write(path, self.render()).map_err(|e| PatchError::FileError {
            message: format!("Failed to write file: {}", e),
            path: path.to_string_lossy().to_string(),
            hint: Some("Check that the file is writable".into()),
            code: Some(302),
        })
    }
}

/// Expand "~/" against the home directory, like shell config paths.
fn resolve_config_path(raw: &Path) -> PathBuf {
    if let Some(rest) = raw.to_str().and_then(|s| s.strip_prefix("~/")) {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    raw.to_path_buf()
}
