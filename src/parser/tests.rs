#[cfg(test)]
use super::*;

use crate::ast::{ArrayItem, BinaryOp, Expr, Stmt};
use crate::PatchError;

const STORAGE: &str = "CONFIG";

fn parse(source: &str) -> Document {
    parse_document(source, STORAGE).expect("Failed to parse document")
}

#[test]
fn test_header_and_opaque_statements_kept_verbatim() {
    let source = "<?php\ndeclare(strict_types=1);\n// managed file\n$other = foo();\n";
    let doc = parse(source);

    assert_eq!(doc.header, "<?php");
    assert_eq!(doc.statements.len(), 3);
    assert_eq!(
        doc.statements[0],
        Stmt::Opaque("\ndeclare(strict_types=1);".into())
    );
    assert_eq!(
        doc.statements[1],
        Stmt::Opaque("\n// managed file\n$other = foo();".into())
    );
    assert_eq!(doc.statements[2], Stmt::Opaque("\n".into()));
}

#[test]
fn test_storage_assignment_is_parsed() {
    let source = "<?php\n$CONFIG = array('dbname' => 'nextcloud');\n";
    let doc = parse(source);

    match &doc.statements[0] {
        Stmt::Assign { leading, var, value } => {
            assert_eq!(leading, "\n");
            assert_eq!(var, "CONFIG");
            match value {
                Expr::Array { items, long_syntax } => {
                    assert!(long_syntax);
                    assert_eq!(items.len(), 1);
                    assert_eq!(items[0].string_key(), Some("dbname"));
                    assert_eq!(items[0].value, Expr::String("nextcloud".into()));
                }
                other => panic!("Expected array literal, got {:?}", other),
            }
        }
        other => panic!("Expected assignment, got {:?}", other),
    }
}

#[test]
fn test_leading_comment_attached_to_assignment() {
    let source = "<?php\n/* autogenerated */\n$CONFIG = [];\n";
    let doc = parse(source);

    match &doc.statements[0] {
        Stmt::Assign { leading, .. } => assert_eq!(leading, "\n/* autogenerated */\n"),
        other => panic!("Expected assignment, got {:?}", other),
    }
}

#[test]
fn test_semicolons_inside_strings_and_comments_do_not_split() {
    let source = "<?php\n$x = 'a;b';\n// c;d\n$CONFIG = ['k' => 'v;w'];\n";
    let doc = parse(source);

    assert_eq!(doc.statements.len(), 3);
    assert_eq!(doc.statements[0], Stmt::Opaque("\n$x = 'a;b';".into()));
    assert!(matches!(&doc.statements[1], Stmt::Assign { .. }));
}

#[test]
fn test_braced_statements_stay_single_segment() {
    let source = "<?php\nfunction f() { return 1; }\n$CONFIG = [];\n";
    let doc = parse(source);

    // the function body's `;` sits at brace depth 1, so the whole
    // definition travels with the following statement boundary
    assert_eq!(
        doc.statements[0],
        Stmt::Opaque("\nfunction f() { return 1; }\n$CONFIG = [];".into())
    );
}

#[test]
fn test_storage_var_on_its_own_statement_line() {
    let source = "<?php\nfunction f() { return 1; };\n$CONFIG = [];\n";
    let doc = parse(source);

    assert!(matches!(&doc.statements[1], Stmt::Assign { .. }));
}

#[test]
fn test_non_array_assignment_is_not_a_storage_block() {
    let source = "<?php\n$CONFIG = 5;\n";
    let doc = parse(source);

    assert!(matches!(&doc.statements[0], Stmt::Assign { .. }));
    assert_eq!(doc.storage_assignment(STORAGE), None);
}

#[test]
fn test_first_matching_statement_wins() {
    let source = "<?php\n$CONFIG = 5;\n$CONFIG = array('a' => 1);\n$CONFIG = array('b' => 2);\n";
    let doc = parse(source);

    assert_eq!(doc.storage_assignment(STORAGE), Some(1));
}

#[test]
fn test_other_variables_stay_opaque() {
    let source = "<?php\n$OTHER = array('a' => 1);\n";
    let doc = parse(source);

    assert_eq!(
        doc.statements[0],
        Stmt::Opaque("\n$OTHER = array('a' => 1);".into())
    );
}

#[test]
fn test_missing_open_tag_is_error() {
    let err = parse_document("$CONFIG = [];\n", STORAGE).unwrap_err();
    match err {
        PatchError::SyntaxError { code, .. } => assert_eq!(code, Some(204)),
        other => panic!("Expected SyntaxError, got {:?}", other),
    }
}

#[test]
fn test_malformed_storage_assignment_is_error() {
    let source = "<?php\n$CONFIG = array('dbname' => );\n";
    let err = parse_document(source, STORAGE).unwrap_err();
    match err {
        PatchError::InvalidToken { line, .. } => assert_eq!(line, 2),
        other => panic!("Expected InvalidToken, got {:?}", other),
    }
}

#[test]
fn test_malformed_other_statement_stays_opaque() {
    // not our statement shape, so not our problem
    let source = "<?php\n$other = array('dbname' => );\n$CONFIG = [];\n";
    let doc = parse(source);
    assert_eq!(doc.storage_assignment(STORAGE), Some(1));
}

#[test]
fn test_unclosed_string_in_body_is_error() {
    let source = "<?php\n$x = 'never;\n";
    let err = parse_document(source, STORAGE).unwrap_err();
    assert!(matches!(err, PatchError::UnclosedString { .. }));
}

#[test]
fn test_close_tag_makes_rest_opaque() {
    let source = "<?php\n$CONFIG = [];\n?>\ntrailing text; not code\n";
    let doc = parse(source);

    assert_eq!(
        doc.statements.last(),
        Some(&Stmt::Opaque("\n?>\ntrailing text; not code\n".into()))
    );
}

#[test]
fn test_trailing_commas_and_nesting() {
    let source = "<?php\n$CONFIG = array(\n  'apps_paths' => [\n    ['path' => '/a',],\n  ],\n);\n";
    let doc = parse(source);

    let idx = doc.storage_assignment(STORAGE).unwrap();
    let Stmt::Assign { value: Expr::Array { items, .. }, .. } = &doc.statements[idx] else {
        panic!("Expected storage assignment");
    };
    let Expr::Array { items: outer, long_syntax } = &items[0].value else {
        panic!("Expected nested array");
    };
    assert!(!long_syntax);
    let Expr::Array { items: inner, .. } = &outer[0].value else {
        panic!("Expected inner array");
    };
    assert_eq!(inner[0].string_key(), Some("path"));
}

#[test]
fn test_expression_forms() {
    let source = "<?php\n$CONFIG = [\n  'ttl' => 60 * 60 * 24,\n  'root' => '/var/' . DIRNAME,\n  'cache' => \\OC\\Memcache\\APCu::class,\n  'host' => getenv('DB_HOST'),\n  'port' => $_SERVER['DB_PORT'],\n  'debug' => !true,\n];\n";
    let doc = parse(source);

    let idx = doc.storage_assignment(STORAGE).unwrap();
    let Stmt::Assign { value: Expr::Array { items, .. }, .. } = &doc.statements[idx] else {
        panic!("Expected storage assignment");
    };

    assert!(matches!(
        items[0].value,
        Expr::Binary { op: BinaryOp::Mul, .. }
    ));
    assert!(matches!(
        items[1].value,
        Expr::Binary { op: BinaryOp::Concat, .. }
    ));
    assert!(matches!(items[2].value, Expr::ClassConst { .. }));
    assert!(matches!(items[3].value, Expr::Call { .. }));
    assert!(matches!(items[4].value, Expr::Index { .. }));
    assert!(matches!(items[5].value, Expr::Unary { .. }));
}

#[test]
fn test_precedence() {
    let mut parser = Parser::new("$CONFIG = 1 + 2 * 3;").unwrap();
    let (_, expr) = parser.parse_assignment().unwrap();

    let Expr::Binary { op: BinaryOp::Add, right, .. } = expr else {
        panic!("Expected + at the root");
    };
    assert!(matches!(*right, Expr::Binary { op: BinaryOp::Mul, .. }));
}

#[test]
fn test_concat_binds_below_addition() {
    let mut parser = Parser::new("$CONFIG = 'n=' . 1 + 2;").unwrap();
    let (_, expr) = parser.parse_assignment().unwrap();

    // PHP 8: `.` binds below `+`, so this is 'n=' . (1 + 2)
    let Expr::Binary { op: BinaryOp::Concat, right, .. } = expr else {
        panic!("Expected . at the root");
    };
    assert!(matches!(*right, Expr::Binary { op: BinaryOp::Add, .. }));
}

#[test]
fn test_grouping_parentheses() {
    let mut parser = Parser::new("$CONFIG = (1 + 2) * 3;").unwrap();
    let (_, expr) = parser.parse_assignment().unwrap();

    let Expr::Binary { op: BinaryOp::Mul, left, .. } = expr else {
        panic!("Expected * at the root");
    };
    assert!(matches!(*left, Expr::Binary { op: BinaryOp::Add, .. }));
}

#[test]
fn test_positional_and_keyed_items() {
    let mut parser = Parser::new("$CONFIG = array(5 => 'a', 'b');").unwrap();
    let (_, expr) = parser.parse_assignment().unwrap();

    let Expr::Array { items, .. } = expr else {
        panic!("Expected array");
    };
    assert_eq!(items[0].key, Some(Expr::Int(5)));
    assert_eq!(items[1], ArrayItem { key: None, value: Expr::String("b".into()) });
}
