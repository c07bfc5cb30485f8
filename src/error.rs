use std::fmt;

/// The main error type for parsing, patching and file handling.
#[derive(Debug, Clone, PartialEq)]
pub enum PatchError {
    SyntaxError {
        message: String,
        line: usize,
        column: usize,
        hint: Option<String>,
        code: Option<u32>,
    },
    InvalidToken {
        token: String,
        line: usize,
        column: usize,
        hint: Option<String>,
        code: Option<u32>,
    },
    UnexpectedEof {
        message: String,
        line: usize,
        column: usize,
        hint: Option<String>,
        code: Option<u32>,
    },
    /// Raised when a string literal is not closed.
    UnclosedString {
        quote: char,
        line: usize,
        column: usize,
        hint: Option<String>,
        code: Option<u32>,
    },
    /// Raised when a native value cannot be converted to the requested type.
    TypeError {
        message: String,
        hint: Option<String>,
        code: Option<u32>,
    },
    FileError {
        message: String,
        path: String,
        hint: Option<String>,
        code: Option<u32>,
    },
    /// Raised by `set` when the file carries no storage-variable assignment
    /// to append into.
    MissingStorageVar {
        var: String,
        hint: Option<String>,
        code: Option<u32>,
    },
}

impl fmt::Display for PatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatchError::SyntaxError { message, line, column, hint, code } =>
                write!(f, "[CONFPATCH] Syntax Error at {}:{}: {}{}{}",
                    line, column, message,
                    hint.as_ref().map_or(String::new(), |h| format!(" Hint: {}", h)),
                    code.map_or(String::new(), |c| format!(" Code: {}", c))
                ),
            PatchError::InvalidToken { token, line, column, hint, code } =>
                write!(f, "[CONFPATCH] Invalid Token '{}' at {}:{}{}{}",
                    token, line, column,
                    hint.as_ref().map_or(String::new(), |h| format!(" Hint: {}", h)),
                    code.map_or(String::new(), |c| format!(" Code: {}", c))
                ),
            PatchError::UnexpectedEof { message, line, column, hint, code } =>
                write!(f, "[CONFPATCH] Unexpected EOF at {}:{}: {}{}{}",
                    line, column, message,
                    hint.as_ref().map_or(String::new(), |h| format!(" Hint: {}", h)),
                    code.map_or(String::new(), |c| format!(" Code: {}", c))
                ),
            PatchError::UnclosedString { quote, line, column, hint, code } =>
                write!(f, "[CONFPATCH] Unclosed string starting with {} at {}:{}{}{}",
                    quote, line, column,
                    hint.as_ref().map_or(String::new(), |h| format!(" Hint: {}", h)),
                    code.map_or(String::new(), |c| format!(" Code: {}", c))
                ),
            PatchError::TypeError { message, hint, code } =>
                write!(f, "[CONFPATCH] Type Error: {}{}{}",
                    message,
                    hint.as_ref().map_or(String::new(), |h| format!(" Hint: {}", h)),
                    code.map_or(String::new(), |c| format!(" Code: {}", c))
                ),
            PatchError::FileError { message, path, hint, code } =>
                write!(f, "[CONFPATCH] File Error '{}': {}{}{}",
                    path, message,
                    hint.as_ref().map_or(String::new(), |h| format!(" Hint: {}", h)),
                    code.map_or(String::new(), |c| format!(" Code: {}", c))
                ),
            PatchError::MissingStorageVar { var, hint, code } =>
                write!(f, "[CONFPATCH] Missing storage variable ${}{}{}",
                    var,
                    hint.as_ref().map_or(String::new(), |h| format!(" Hint: {}", h)),
                    code.map_or(String::new(), |c| format!(" Code: {}", c))
                ),
        }
    }
}

impl std::error::Error for PatchError {}
