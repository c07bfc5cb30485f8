use super::*;

use crate::ast::{ArrayItem, Expr, Stmt, Value};
use crate::eval;

/// What reading a key produced: either a folded constant or, for
/// expressions that cannot be evaluated without running PHP, the
/// expression's rendered source text. Callers that need the distinction
/// get it explicitly instead of a loosely typed string.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigValue {
    Evaluated(Value),
    Raw(String),
}

impl ConfigValue {
    pub fn is_constant(&self) -> bool {
        matches!(self, ConfigValue::Evaluated(_))
    }

    /// The folded value, if this entry was a constant expression.
    pub fn value(&self) -> Option<&Value> {
        if let ConfigValue::Evaluated(v) = self {
            Some(v)
        } else {
            None
        }
    }

    /// The rendered source text, if this entry was not a constant.
    pub fn source(&self) -> Option<&str> {
        if let ConfigValue::Raw(s) = self {
            Some(s)
        } else {
            None
        }
    }
}

impl ConfigTree {
    /// Index of the storage assignment, scanning statements in file order.
    /// First match wins; `None` means the file has no configuration block.
    fn storage_stmt(&self) -> Option<usize> {
        self.document.storage_assignment(&self.storage_var)
    }

    fn entries(&self) -> Option<&[ArrayItem]> {
        let idx = self.storage_stmt()?;
        match &self.document.statements[idx] {
            Stmt::Assign {
                value: Expr::Array { items, .. },
                ..
            } => Some(items),
            _ => None,
        }
    }

    fn entries_mut(&mut self) -> Option<&mut Vec<ArrayItem>> {
        let idx = self.storage_stmt()?;
        match &mut self.document.statements[idx] {
            Stmt::Assign {
                value: Expr::Array { items, .. },
                ..
            } => Some(items),
            _ => None,
        }
    }

    /// Read one key of the configuration block.
    ///
    /// Returns `None` when the block or the key is missing. Constant
    /// expressions come back folded; anything else comes back as its
    /// source text.
    ///
    /// # Examples
    /// ```no_run
    /// # use confpatch::{ConfigTree, ConfigValue};
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let tree = ConfigTree::from_file("config.php")?;
    /// match tree.get("dbname") {
    ///     Some(ConfigValue::Evaluated(value)) => println!("dbname = {:?}", value),
    ///     Some(ConfigValue::Raw(source)) => println!("dbname is computed: {}", source),
    ///     None => println!("dbname not set"),
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub fn get(&self, key: &str) -> Option<ConfigValue> {
        let entries = self.entries()?;
        let item = entries.iter().find(|item| item.string_key() == Some(key))?;

        Some(match eval::fold(&item.value) {
            Some(value) => ConfigValue::Evaluated(value),
            None => ConfigValue::Raw(crate::printer::print_expr(&item.value)),
        })
    }

    /// Read a key with a fallback default.
    ///
    /// # Examples
    /// ```no_run
    /// # use confpatch::ConfigTree;
    /// # let tree = ConfigTree::from_file("config.php").unwrap();
    /// let host = tree.get_or("dbhost", "localhost");
    /// ```
    pub fn get_or(&self, key: &str, default: impl Into<Value>) -> ConfigValue {
        self.get(key)
            .unwrap_or_else(|| ConfigValue::Evaluated(default.into()))
    }

    /// Typed read. A non-constant entry is a `TypeError`: use `get` when
    /// the source text matters.
    pub fn get_as<T>(&self, key: &str) -> Result<Option<T>, PatchError>
    where
        T: TryFrom<Value, Error = PatchError>,
    {
        match self.get(key) {
            None => Ok(None),
            Some(ConfigValue::Evaluated(value)) => T::try_from(value).map(Some),
            Some(ConfigValue::Raw(source)) => Err(PatchError::TypeError {
                message: format!("Key '{}' is not a constant expression: {}", key, source),
                hint: Some("Use get() to inspect the raw source".into()),
                code: Some(408),
            }),
        }
    }

    pub fn has(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// All string-literal keys of the block, in file order.
    pub fn keys(&self) -> Vec<String> {
        self.entries()
            .map(|items| {
                items
                    .iter()
                    .filter_map(|item| item.string_key().map(str::to_string))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Upsert: replace the value of `key`, or append a new entry at the
    /// end of the block. Fails when the file carries no configuration
    /// block to append into; a precondition violation, not a recoverable
    /// state.
    pub fn set(&mut self, key: &str, value: impl Into<Value>) -> Result<&mut Self, PatchError> {
        let expr = conversion::value_to_expr(&value.into());
        let var = self.storage_var.clone();
        let Some(items) = self.entries_mut() else {
            return Err(PatchError::MissingStorageVar {
                var,
                hint: Some("The file has no storage assignment to append into".into()),
                code: Some(304),
            });
        };
        match items.iter_mut().find(|item| item.string_key() == Some(key)) {
            Some(item) => item.value = expr,
            None => items.push(ArrayItem {
                key: Some(Expr::String(key.to_string())),
                value: expr,
            }),
        }

        Ok(self)
    }

    /// Update-only variant of `set`: a missing block or missing key is a
    /// no-op, never an insert.
    pub fn replace(&mut self, key: &str, value: impl Into<Value>) -> &mut Self {
        let expr = conversion::value_to_expr(&value.into());
        if let Some(items) = self.entries_mut() {
            if let Some(item) = items.iter_mut().find(|item| item.string_key() == Some(key)) {
                item.value = expr;
            }
        }
        self
    }
}
