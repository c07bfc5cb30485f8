// Author: Dustin Pilgrim
// License: MIT

use crate::ast::{ArrayItem, Document, Expr, Stmt, UnaryOp};
use crate::utils::float_source;

/// Postfix and literal expressions never need parentheses.
const ATOM_PREC: u8 = 100;
const UNARY_PREC: u8 = 35;

/// Serialize a document back to PHP source. The header and opaque
/// statements are reproduced verbatim; parsed assignments are printed
/// deterministically.
pub fn print_document(doc: &Document) -> String {
    let mut out = String::with_capacity(doc.header.len() + 64 * doc.statements.len());
    out.push_str(&doc.header);

    for stmt in &doc.statements {
        match stmt {
            Stmt::Opaque(raw) => out.push_str(raw),
            Stmt::Assign { leading, var, value } => {
                out.push_str(leading);
                out.push('$');
                out.push_str(var);
                out.push_str(" = ");
                out.push_str(&print_expr_prec(value, 0, 0));
                out.push(';');
            }
        }
    }

    out
}

/// Render a single expression as source text.
pub fn print_expr(expr: &Expr) -> String {
    print_expr_prec(expr, 0, 0)
}

fn print_expr_prec(expr: &Expr, parent_prec: u8, indent: usize) -> String {
    match expr {
        Expr::Null => "null".to_string(),
        Expr::Bool(true) => "true".to_string(),
        Expr::Bool(false) => "false".to_string(),
        Expr::Int(i) => i.to_string(),
        Expr::Float(f) => float_source(*f),
        Expr::String(s) => quote_single(s),
        Expr::InterpString(raw) => raw.clone(),
        Expr::Array { items, long_syntax } => print_array(items, *long_syntax, indent),
        Expr::Variable(name) => format!("${}", name),
        Expr::Const(name) => name.clone(),
        Expr::ClassConst { class, name } => {
            format!("{}::{}", print_expr_prec(class, ATOM_PREC, indent), name)
        }
        Expr::Property { target, name } => {
            format!("{}->{}", print_expr_prec(target, ATOM_PREC, indent), name)
        }
        Expr::Index { target, index } => format!(
            "{}[{}]",
            print_expr_prec(target, ATOM_PREC, indent),
            print_expr_prec(index, 0, indent)
        ),
        Expr::Call { target, args } => {
            let rendered: Vec<String> = args
                .iter()
                .map(|a| print_expr_prec(a, 0, indent))
                .collect();
            format!(
                "{}({})",
                print_expr_prec(target, ATOM_PREC, indent),
                rendered.join(", ")
            )
        }
        Expr::Unary { op, expr } => {
            let symbol = match op {
                UnaryOp::Neg => "-",
                UnaryOp::Plus => "+",
                UnaryOp::Not => "!",
            };
            let body = format!("{}{}", symbol, print_expr_prec(expr, UNARY_PREC, indent));
            parenthesize(body, UNARY_PREC, parent_prec)
        }
        Expr::Binary { op, left, right } => {
            let (prec, right_assoc) = op.precedence();
            let (left_ctx, right_ctx) = if right_assoc {
                (prec + 1, prec)
            } else {
                (prec, prec + 1)
            };
            let body = format!(
                "{} {} {}",
                print_expr_prec(left, left_ctx, indent),
                op.symbol(),
                print_expr_prec(right, right_ctx, indent)
            );
            parenthesize(body, prec, parent_prec)
        }
    }
}

fn parenthesize(body: String, prec: u8, parent_prec: u8) -> String {
    if prec < parent_prec {
        format!("({})", body)
    } else {
        body
    }
}

/// Arrays print one item per line with four-space indentation and a
/// trailing comma, the style the target files conventionally carry.
fn print_array(items: &[ArrayItem], long_syntax: bool, indent: usize) -> String {
    let (open, close) = if long_syntax {
        ("array(", ")")
    } else {
        ("[", "]")
    };

    if items.is_empty() {
        return format!("{}{}", open, close);
    }

    let pad = "    ".repeat(indent + 1);
    let mut out = String::from(open);
    out.push('\n');
    for item in items {
        out.push_str(&pad);
        if let Some(key) = &item.key {
            out.push_str(&print_expr_prec(key, 0, indent + 1));
            out.push_str(" => ");
        }
        out.push_str(&print_expr_prec(&item.value, 0, indent + 1));
        out.push_str(",\n");
    }
    out.push_str(&"    ".repeat(indent));
    out.push_str(close);
    out
}

/// Single-quoted PHP string: only `\` and `'` need escaping.
fn quote_single(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('\'');
    for ch in s.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            _ => out.push(ch),
        }
    }
    out.push('\'');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{BinaryOp, Expr};

    fn concat(left: Expr, right: Expr) -> Expr {
        Expr::Binary {
            op: BinaryOp::Concat,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    #[test]
    fn test_string_quoting() {
        assert_eq!(print_expr(&Expr::String("plain".into())), "'plain'");
        assert_eq!(print_expr(&Expr::String("it's".into())), "'it\\'s'");
        assert_eq!(print_expr(&Expr::String("a\\b".into())), "'a\\\\b'");
    }

    #[test]
    fn test_float_always_reparses_as_float() {
        assert_eq!(print_expr(&Expr::Float(1.5)), "1.5");
        assert_eq!(print_expr(&Expr::Float(2.0)), "2.0");
    }

    #[test]
    fn test_array_layout() {
        let expr = Expr::Array {
            items: vec![
                ArrayItem {
                    key: Some(Expr::String("dbname".into())),
                    value: Expr::String("nextcloud".into()),
                },
                ArrayItem {
                    key: Some(Expr::String("loglevel".into())),
                    value: Expr::Int(2),
                },
            ],
            long_syntax: true,
        };
        assert_eq!(
            print_expr(&expr),
            "array(\n    'dbname' => 'nextcloud',\n    'loglevel' => 2,\n)"
        );
    }

    #[test]
    fn test_nested_array_indentation() {
        let inner = Expr::Array {
            items: vec![ArrayItem {
                key: Some(Expr::String("path".into())),
                value: Expr::String("/apps".into()),
            }],
            long_syntax: false,
        };
        let outer = Expr::Array {
            items: vec![ArrayItem {
                key: Some(Expr::String("apps_paths".into())),
                value: inner,
            }],
            long_syntax: true,
        };
        assert_eq!(
            print_expr(&outer),
            "array(\n    'apps_paths' => [\n        'path' => '/apps',\n    ],\n)"
        );
    }

    #[test]
    fn test_empty_array_stays_inline() {
        let long = Expr::Array {
            items: vec![],
            long_syntax: true,
        };
        let short = Expr::Array {
            items: vec![],
            long_syntax: false,
        };
        assert_eq!(print_expr(&long), "array()");
        assert_eq!(print_expr(&short), "[]");
    }

    #[test]
    fn test_precedence_parentheses() {
        // (1 + 2) * 3 keeps its parentheses, 1 + 2 * 3 does not need any
        let grouped = Expr::Binary {
            op: BinaryOp::Mul,
            left: Box::new(Expr::Binary {
                op: BinaryOp::Add,
                left: Box::new(Expr::Int(1)),
                right: Box::new(Expr::Int(2)),
            }),
            right: Box::new(Expr::Int(3)),
        };
        assert_eq!(print_expr(&grouped), "(1 + 2) * 3");

        let natural = Expr::Binary {
            op: BinaryOp::Add,
            left: Box::new(Expr::Int(1)),
            right: Box::new(Expr::Binary {
                op: BinaryOp::Mul,
                left: Box::new(Expr::Int(2)),
                right: Box::new(Expr::Int(3)),
            }),
        };
        assert_eq!(print_expr(&natural), "1 + 2 * 3");
    }

    #[test]
    fn test_concat_chain() {
        let expr = concat(
            concat(Expr::String("/var/".into()), Expr::Variable("dir".into())),
            Expr::String("/data".into()),
        );
        assert_eq!(print_expr(&expr), "'/var/' . $dir . '/data'");
    }

    #[test]
    fn test_call_and_class_const() {
        let call = Expr::Call {
            target: Box::new(Expr::Const("getenv".into())),
            args: vec![Expr::String("NC_HOST".into())],
        };
        assert_eq!(print_expr(&call), "getenv('NC_HOST')");

        let class_const = Expr::ClassConst {
            class: Box::new(Expr::Const("\\OC\\Memcache\\APCu".into())),
            name: "class".into(),
        };
        assert_eq!(print_expr(&class_const), "\\OC\\Memcache\\APCu::class");
    }
}
