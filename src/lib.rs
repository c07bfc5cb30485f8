pub mod ast;
pub mod error;
pub mod eval;
pub mod export;
pub mod lexer;
pub mod parser;
pub mod printer;
pub mod utils;
pub mod config;

pub use ast::{Document, Expr, Stmt, Value};
pub use error::PatchError;
pub use config::{ConfigTree, ConfigValue, DEFAULT_STORAGE_VAR};
