use super::*;
use crate::ast::{ArrayItem, BinaryOp, Expr, UnaryOp};

/// Unary operators bind tighter than every binary operator except `**`,
/// so `-2 ** 2` is `-(2 ** 2)`.
const UNARY_PREC: u8 = 35;

pub(super) fn parse_assignment(parser: &mut Parser) -> Result<(String, Expr), PatchError> {
    let var = if let Token::Variable(name) = parser.bump()? {
        name
    } else {
        return Err(PatchError::SyntaxError {
            message: "Expected variable at start of assignment".into(),
            line: parser.line(),
            column: parser.column(),
            hint: None,
            code: Some(205),
        });
    };

    parser.expect(Token::Assign)?;
    let value = parse_expr(parser, 0)?;
    parser.expect(Token::Semicolon)?;
    parser.expect(Token::Eof)?;

    Ok((var, value))
}

pub(super) fn parse_expr(parser: &mut Parser, min_prec: u8) -> Result<Expr, PatchError> {
    let mut left = parse_unary(parser)?;

    while let Some(op) = binary_op(parser.peek()) {
        let (prec, right_assoc) = op.precedence();
        if prec < min_prec {
            break;
        }
        parser.bump()?;
        let next_min = if right_assoc { prec } else { prec + 1 };
        let right = parse_expr(parser, next_min)?;
        left = Expr::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        };
    }

    Ok(left)
}

fn binary_op(token: Option<&Token>) -> Option<BinaryOp> {
    match token {
        Some(Token::Dot) => Some(BinaryOp::Concat),
        Some(Token::Plus) => Some(BinaryOp::Add),
        Some(Token::Minus) => Some(BinaryOp::Sub),
        Some(Token::Star) => Some(BinaryOp::Mul),
        Some(Token::Slash) => Some(BinaryOp::Div),
        Some(Token::Percent) => Some(BinaryOp::Mod),
        Some(Token::Pow) => Some(BinaryOp::Pow),
        _ => None,
    }
}

fn parse_unary(parser: &mut Parser) -> Result<Expr, PatchError> {
    let op = match parser.peek() {
        Some(Token::Minus) => Some(UnaryOp::Neg),
        Some(Token::Plus) => Some(UnaryOp::Plus),
        Some(Token::Bang) => Some(UnaryOp::Not),
        _ => None,
    };

    if let Some(op) = op {
        parser.bump()?;
        let operand = parse_expr(parser, UNARY_PREC)?;
        return Ok(Expr::Unary {
            op,
            expr: Box::new(operand),
        });
    }

    parse_postfix(parser)
}

fn parse_postfix(parser: &mut Parser) -> Result<Expr, PatchError> {
    let mut expr = parse_primary(parser)?;

    loop {
        match parser.peek() {
            Some(Token::LParen) => {
                parser.bump()?;
                let args = parse_call_args(parser)?;
                expr = Expr::Call {
                    target: Box::new(expr),
                    args,
                };
            }
            Some(Token::LBracket) => {
                parser.bump()?;
                let index = parse_expr(parser, 0)?;
                parser.expect(Token::RBracket)?;
                expr = Expr::Index {
                    target: Box::new(expr),
                    index: Box::new(index),
                };
            }
            Some(Token::ObjectArrow) => {
                parser.bump()?;
                let name = expect_member_name(parser)?;
                expr = Expr::Property {
                    target: Box::new(expr),
                    name,
                };
            }
            Some(Token::DoubleColon) => {
                parser.bump()?;
                let name = expect_member_name(parser)?;
                expr = Expr::ClassConst {
                    class: Box::new(expr),
                    name,
                };
            }
            _ => break,
        }
    }

    Ok(expr)
}

fn expect_member_name(parser: &mut Parser) -> Result<String, PatchError> {
    match parser.bump()? {
        Token::Ident(name) => Ok(name),
        other => Err(PatchError::SyntaxError {
            message: format!("Expected member name, got {:?}", other),
            line: parser.line(),
            column: parser.column(),
            hint: None,
            code: Some(207),
        }),
    }
}

fn parse_call_args(parser: &mut Parser) -> Result<Vec<Expr>, PatchError> {
    let mut args = Vec::new();

    loop {
        if parser.peek() == Some(&Token::RParen) {
            parser.bump()?;
            break;
        }
        args.push(parse_expr(parser, 0)?);
        match parser.peek() {
            Some(Token::Comma) => {
                parser.bump()?;
            }
            Some(Token::RParen) => {
                parser.bump()?;
                break;
            }
            other => {
                return Err(PatchError::InvalidToken {
                    token: format!("{:?}", other),
                    line: parser.line(),
                    column: parser.column(),
                    hint: Some("Expected ',' or ')' in argument list".into()),
                    code: Some(206),
                });
            }
        }
    }

    Ok(args)
}

fn parse_primary(parser: &mut Parser) -> Result<Expr, PatchError> {
    match parser.peek() {
        Some(Token::String(_)) => {
            if let Token::String(s) = parser.bump()? {
                Ok(Expr::String(s))
            } else {
                unreachable!()
            }
        }
        Some(Token::InterpString(_)) => {
            if let Token::InterpString(raw) = parser.bump()? {
                Ok(Expr::InterpString(raw))
            } else {
                unreachable!()
            }
        }
        Some(Token::Int(_)) => {
            if let Token::Int(i) = parser.bump()? {
                Ok(Expr::Int(i))
            } else {
                unreachable!()
            }
        }
        Some(Token::Float(_)) => {
            if let Token::Float(f) = parser.bump()? {
                Ok(Expr::Float(f))
            } else {
                unreachable!()
            }
        }
        Some(Token::Bool(_)) => {
            if let Token::Bool(b) = parser.bump()? {
                Ok(Expr::Bool(b))
            } else {
                unreachable!()
            }
        }
        Some(Token::Null) => {
            parser.bump()?;
            Ok(Expr::Null)
        }
        Some(Token::Variable(_)) => {
            if let Token::Variable(name) = parser.bump()? {
                Ok(Expr::Variable(name))
            } else {
                unreachable!()
            }
        }
        Some(Token::Ident(_)) => parse_name_or_array(parser),
        Some(Token::Backslash) => parse_qualified_name(parser, String::new()),
        Some(Token::LBracket) => {
            parser.bump()?;
            let items = parse_array_items(parser, Token::RBracket)?;
            Ok(Expr::Array {
                items,
                long_syntax: false,
            })
        }
        Some(Token::LParen) => {
            parser.bump()?;
            let inner = parse_expr(parser, 0)?;
            parser.expect(Token::RParen)?;
            Ok(inner)
        }
        _ => {
            let token = parser.bump()?;
            Err(PatchError::InvalidToken {
                token: format!("{:?}", token),
                line: parser.line(),
                column: parser.column(),
                hint: Some("Unexpected token in value position".into()),
                code: Some(203),
            })
        }
    }
}

/// An identifier is either the `array(...)` constructor or the first
/// segment of a (possibly qualified) constant name.
fn parse_name_or_array(parser: &mut Parser) -> Result<Expr, PatchError> {
    let name = if let Token::Ident(name) = parser.bump()? {
        name
    } else {
        unreachable!()
    };

    if name.eq_ignore_ascii_case("array") && parser.peek() == Some(&Token::LParen) {
        parser.bump()?;
        let items = parse_array_items(parser, Token::RParen)?;
        return Ok(Expr::Array {
            items,
            long_syntax: true,
        });
    }

    parse_qualified_name(parser, name)
}

/// Continue a constant name across `\` separators: `\OC\Memcache\APCu`.
fn parse_qualified_name(parser: &mut Parser, mut name: String) -> Result<Expr, PatchError> {
    while parser.peek() == Some(&Token::Backslash) {
        parser.bump()?;
        match parser.bump()? {
            Token::Ident(segment) => {
                name.push('\\');
                name.push_str(&segment);
            }
            other => {
                return Err(PatchError::SyntaxError {
                    message: format!("Expected identifier after '\\', got {:?}", other),
                    line: parser.line(),
                    column: parser.column(),
                    hint: None,
                    code: Some(207),
                });
            }
        }
    }

    Ok(Expr::Const(name))
}

fn parse_array_items(parser: &mut Parser, closer: Token) -> Result<Vec<ArrayItem>, PatchError> {
    let mut items = Vec::new();

    loop {
        if parser.peek() == Some(&closer) {
            parser.bump()?;
            break;
        }

        let first = parse_expr(parser, 0)?;
        let item = if parser.peek() == Some(&Token::Arrow) {
            parser.bump()?;
            let value = parse_expr(parser, 0)?;
            ArrayItem {
                key: Some(first),
                value,
            }
        } else {
            ArrayItem {
                key: None,
                value: first,
            }
        };
        items.push(item);

        match parser.peek() {
            Some(Token::Comma) => {
                parser.bump()?;
            }
            Some(tok) if *tok == closer => {
                parser.bump()?;
                break;
            }
            other => {
                return Err(PatchError::InvalidToken {
                    token: format!("{:?}", other),
                    line: parser.line(),
                    column: parser.column(),
                    hint: Some("Expected ',' or the array closer".into()),
                    code: Some(206),
                });
            }
        }
    }

    Ok(items)
}
