// Author: Dustin Pilgrim
// License: MIT

use serde::Serialize;
use serde_json::json;

use crate::ast::Value;
use crate::config::{ConfigTree, ConfigValue};
use crate::PatchError;

/// JSON shape of an exported configuration block.
///
/// Entries are a list, not an object, so file order survives and
/// non-constant values stay distinguishable from plain strings.
#[derive(Serialize)]
struct ConfigExport {
    storage_var: String,
    entries: Vec<EntryExport>,
}

#[derive(Serialize)]
struct EntryExport {
    key: String,
    value: serde_json::Value,
    constant: bool,
}

/// Export the recognized configuration block to pretty JSON.
///
/// Folded values map directly; anything non-constant is exported as its
/// source text with `constant` set to false.
///
/// # Examples
/// ```no_run
/// use confpatch::{ConfigTree, export};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let tree = ConfigTree::from_file("config.php")?;
/// println!("{}", export::export_config_to_json(&tree)?);
/// # Ok(())
/// # }
/// ```
pub fn export_config_to_json(tree: &ConfigTree) -> Result<String, PatchError> {
    let mut entries = Vec::new();

    for key in tree.keys() {
        let exported = match tree.get(&key) {
            Some(ConfigValue::Evaluated(value)) => EntryExport {
                key,
                value: value_to_json(&value),
                constant: true,
            },
            Some(ConfigValue::Raw(source)) => EntryExport {
                key,
                value: json!(source),
                constant: false,
            },
            None => continue,
        };
        entries.push(exported);
    }

    let export = ConfigExport {
        storage_var: tree.storage_var().to_string(),
        entries,
    };

    Ok(serde_json::to_string_pretty(&export).unwrap())
}

/// Export a PHP config file directly to JSON.
///
/// Convenience function that reads, parses, and exports in one call.
///
/// # Errors
/// Returns error if the file doesn't exist or doesn't parse.
pub fn export_config_file(path: &str) -> Result<String, PatchError> {
    let tree = ConfigTree::from_file(path)?;
    export_config_to_json(&tree)
}

fn value_to_json(v: &Value) -> serde_json::Value {
    match v {
        Value::Null => serde_json::Value::Null,
        Value::Bool(b) => json!(b),
        Value::Int(i) => json!(i),
        Value::Float(f) => json!(f),
        Value::String(s) => json!(s),
        Value::List(items) => {
            json!(items.iter().map(value_to_json).collect::<Vec<_>>())
        }
        Value::Map(map) => {
            let object: serde_json::Map<String, serde_json::Value> = map
                .iter()
                .map(|(k, v)| (k.clone(), value_to_json(v)))
                .collect();
            serde_json::Value::Object(object)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigTree;

    #[test]
    fn test_export_mixed_entries() {
        let source = "<?php\n$CONFIG = array(\n  'dbname' => 'nextcloud',\n  'loglevel' => 1 + 1,\n  'secret' => getenv('NC_SECRET'),\n);\n";
        let tree = ConfigTree::from_str(source).unwrap();

        let json_output = export_config_to_json(&tree).unwrap();
        let v: serde_json::Value = serde_json::from_str(&json_output).unwrap();

        assert_eq!(v["storage_var"], "CONFIG");
        assert_eq!(v["entries"][0]["key"], "dbname");
        assert_eq!(v["entries"][0]["value"], "nextcloud");
        assert_eq!(v["entries"][0]["constant"], true);
        assert_eq!(v["entries"][1]["value"], 2);
        assert_eq!(v["entries"][2]["value"], "getenv('NC_SECRET')");
        assert_eq!(v["entries"][2]["constant"], false);
    }

    #[test]
    fn test_export_preserves_entry_order() {
        let source = "<?php\n$CONFIG = ['zeta' => 1, 'alpha' => 2];\n";
        let tree = ConfigTree::from_str(source).unwrap();

        let json_output = export_config_to_json(&tree).unwrap();
        let v: serde_json::Value = serde_json::from_str(&json_output).unwrap();

        assert_eq!(v["entries"][0]["key"], "zeta");
        assert_eq!(v["entries"][1]["key"], "alpha");
    }

    #[test]
    fn test_export_nested_array() {
        let source =
            "<?php\n$CONFIG = array('trusted_domains' => array('cloud.example.com', 'localhost'));\n";
        let tree = ConfigTree::from_str(source).unwrap();

        let json_output = export_config_to_json(&tree).unwrap();
        let v: serde_json::Value = serde_json::from_str(&json_output).unwrap();

        assert_eq!(v["entries"][0]["value"][0], "cloud.example.com");
        assert_eq!(v["entries"][0]["value"][1], "localhost");
    }
}
