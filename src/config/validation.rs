use once_cell::sync::Lazy;
use regex::Regex;

use crate::PatchError;

/// PHP variable-name rule, ASCII subset.
static STORAGE_VAR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").unwrap());

pub(super) fn validate_storage_var(var: &str) -> Result<(), PatchError> {
    if STORAGE_VAR_RE.is_match(var) {
        Ok(())
    } else {
        Err(PatchError::SyntaxError {
            message: format!("Invalid storage variable name '{}'", var),
            line: 0,
            column: 0,
            hint: Some("Use a plain PHP identifier such as CONFIG".into()),
            code: Some(303),
        })
    }
}
