use super::*;
use super::scanner::{bump, peek_next, skip_whitespace_and_comments};

pub(super) fn next_token(lexer: &mut Lexer) -> Result<Token, PatchError> {
    skip_whitespace_and_comments(lexer)?;
    lexer.token_start = lexer.pos;

    match lexer.peek {
        Some('$') => tokenize_variable(lexer),
        Some('\'') => tokenize_single_quoted(lexer),
        Some('"') => tokenize_double_quoted(lexer),
        Some('(') => tokenize_symbol(lexer, Token::LParen),
        Some(')') => tokenize_symbol(lexer, Token::RParen),
        Some('[') => tokenize_symbol(lexer, Token::LBracket),
        Some(']') => tokenize_symbol(lexer, Token::RBracket),
        Some('{') => tokenize_symbol(lexer, Token::LBrace),
        Some('}') => tokenize_symbol(lexer, Token::RBrace),
        Some(',') => tokenize_symbol(lexer, Token::Comma),
        Some(';') => tokenize_symbol(lexer, Token::Semicolon),
        Some('=') => tokenize_equals(lexer),
        Some('-') => tokenize_minus(lexer),
        Some(':') => tokenize_colon(lexer),
        Some('*') => tokenize_star(lexer),
        Some('.') => tokenize_dot(lexer),
        Some('+') => tokenize_symbol(lexer, Token::Plus),
        Some('/') => tokenize_symbol(lexer, Token::Slash),
        Some('%') => tokenize_symbol(lexer, Token::Percent),
        Some('!') => tokenize_symbol(lexer, Token::Bang),
        Some('\\') => tokenize_symbol(lexer, Token::Backslash),
        Some(c) if c.is_ascii_digit() => tokenize_number(lexer),
        Some(c) if c.is_alphabetic() || c == '_' => tokenize_identifier_or_keyword(lexer),
        Some(ch) => {
            bump(lexer);
            Ok(Token::Other(ch))
        }
        None => Ok(Token::Eof),
    }
}

fn tokenize_symbol(lexer: &mut Lexer, token: Token) -> Result<Token, PatchError> {
    bump(lexer);
    Ok(token)
}

fn tokenize_variable(lexer: &mut Lexer) -> Result<Token, PatchError> {
    bump(lexer); // consume '$'

    let mut name = String::new();
    while let Some(ch) = lexer.peek {
        if ch.is_alphanumeric() || ch == '_' {
            name.push(ch);
            bump(lexer);
        } else {
            break;
        }
    }

    if name.is_empty() {
        // `$$x` and friends stay outside the grammar
        Ok(Token::Other('$'))
    } else {
        Ok(Token::Variable(name))
    }
}

/// `=`, `=>`, or `==`/`===` (comparison is outside the grammar).
fn tokenize_equals(lexer: &mut Lexer) -> Result<Token, PatchError> {
    bump(lexer);
    match lexer.peek {
        Some('>') => {
            bump(lexer);
            Ok(Token::Arrow)
        }
        Some('=') => {
            bump(lexer);
            if lexer.peek == Some('=') {
                bump(lexer);
            }
            Ok(Token::Other('='))
        }
        _ => Ok(Token::Assign),
    }
}

fn tokenize_minus(lexer: &mut Lexer) -> Result<Token, PatchError> {
    bump(lexer);
    if lexer.peek == Some('>') {
        bump(lexer);
        Ok(Token::ObjectArrow)
    } else {
        Ok(Token::Minus)
    }
}

fn tokenize_colon(lexer: &mut Lexer) -> Result<Token, PatchError> {
    bump(lexer);
    if lexer.peek == Some(':') {
        bump(lexer);
        Ok(Token::DoubleColon)
    } else {
        Ok(Token::Other(':'))
    }
}

fn tokenize_star(lexer: &mut Lexer) -> Result<Token, PatchError> {
    bump(lexer);
    if lexer.peek == Some('*') {
        bump(lexer);
        Ok(Token::Pow)
    } else {
        Ok(Token::Star)
    }
}

/// `.` is concat unless a digit follows, then it starts a float like `.5`.
fn tokenize_dot(lexer: &mut Lexer) -> Result<Token, PatchError> {
    if peek_next(lexer).is_some_and(|c| c.is_ascii_digit()) {
        let mut num = String::from("0.");
        bump(lexer); // consume '.'
        collect_digits(lexer, &mut num);
        collect_exponent(lexer, &mut num);
        return parse_float(lexer, &num);
    }
    bump(lexer);
    Ok(Token::Dot)
}

/// Single-quoted string: only `\'` and `\\` are escapes, everything else
/// is literal.
fn tokenize_single_quoted(lexer: &mut Lexer) -> Result<Token, PatchError> {
    bump(lexer); // consume opening quote
    let mut content = String::new();

    while let Some(ch) = bump(lexer) {
        match ch {
            '\'' => return Ok(Token::String(content)),
            '\\' => match bump(lexer) {
                Some('\'') => content.push('\''),
                Some('\\') => content.push('\\'),
                Some(other) => {
                    content.push('\\');
                    content.push(other);
                }
                None => break,
            },
            _ => content.push(ch),
        }
    }

    Err(PatchError::UnclosedString {
        quote: '\'',
        line: lexer.line,
        column: lexer.column,
        hint: Some("String literal not closed".into()),
        code: Some(101),
    })
}

/// Double-quoted string. Escapes are cooked; a string containing `$`
/// interpolation is returned raw instead, since it is not a constant.
fn tokenize_double_quoted(lexer: &mut Lexer) -> Result<Token, PatchError> {
    bump(lexer); // consume opening quote
    let mut cooked = String::new();
    let mut raw = String::new();
    let mut interpolated = false;

    while let Some(ch) = bump(lexer) {
        match ch {
            '"' => {
                return if interpolated {
                    Ok(Token::InterpString(format!("\"{}\"", raw)))
                } else {
                    Ok(Token::String(cooked))
                };
            }
            '\\' => {
                raw.push('\\');
                match bump(lexer) {
                    Some(esc) => {
                        raw.push(esc);
                        let resolved = match esc {
                            'n' => '\n',
                            't' => '\t',
                            'r' => '\r',
                            'v' => '\u{000b}',
                            'f' => '\u{000c}',
                            'e' => '\u{001b}',
                            '\\' => '\\',
                            '$' => '$',
                            '"' => '"',
                            other => {
                                // PHP keeps unknown escapes verbatim
                                cooked.push('\\');
                                other
                            }
                        };
                        cooked.push(resolved);
                    }
                    None => break,
                }
            }
            '$' => {
                raw.push('$');
                cooked.push('$');
                if lexer.peek.is_some_and(|c| c.is_alphabetic() || c == '_' || c == '{') {
                    interpolated = true;
                }
            }
            _ => {
                raw.push(ch);
                cooked.push(ch);
            }
        }
    }

    Err(PatchError::UnclosedString {
        quote: '"',
        line: lexer.line,
        column: lexer.column,
        hint: Some("String literal not closed".into()),
        code: Some(101),
    })
}

fn collect_digits(lexer: &mut Lexer, out: &mut String) {
    while let Some(ch) = lexer.peek {
        if ch.is_ascii_digit() {
            out.push(ch);
            bump(lexer);
        } else if ch == '_' {
            bump(lexer); // digit group separator
        } else {
            break;
        }
    }
}

fn collect_exponent(lexer: &mut Lexer, out: &mut String) {
    if lexer.peek == Some('e') || lexer.peek == Some('E') {
        let follows = peek_next(lexer);
        if follows.is_some_and(|c| c.is_ascii_digit() || c == '+' || c == '-') {
            out.push('e');
            bump(lexer);
            if lexer.peek == Some('+') || lexer.peek == Some('-') {
                out.push(lexer.peek.unwrap());
                bump(lexer);
            }
            collect_digits(lexer, out);
        }
    }
}

fn tokenize_number(lexer: &mut Lexer) -> Result<Token, PatchError> {
    // Radix prefixes: 0x, 0b, 0o and legacy 0-prefixed octal
    if lexer.peek == Some('0') {
        match peek_next(lexer) {
            Some('x') | Some('X') => return tokenize_radix(lexer, 16),
            Some('b') | Some('B') => return tokenize_radix(lexer, 2),
            Some('o') | Some('O') => return tokenize_radix(lexer, 8),
            _ => {}
        }
    }

    let mut num = String::new();
    collect_digits(lexer, &mut num);

    let mut is_float = false;
    if lexer.peek == Some('.') && peek_next(lexer).is_some_and(|c| c.is_ascii_digit()) {
        is_float = true;
        num.push('.');
        bump(lexer);
        collect_digits(lexer, &mut num);
    }
    let before = num.len();
    collect_exponent(lexer, &mut num);
    if num.len() > before {
        is_float = true;
    }

    if is_float {
        return parse_float(lexer, &num);
    }

    // Legacy octal: leading zero and only octal digits, e.g. file modes
    if num.len() > 1 && num.starts_with('0') && num.bytes().all(|b| (b'0'..=b'7').contains(&b)) {
        if let Ok(i) = i64::from_str_radix(&num[1..], 8) {
            return Ok(Token::Int(i));
        }
    }

    match num.parse::<i64>() {
        Ok(i) => Ok(Token::Int(i)),
        // PHP silently widens overflowing integers to floats
        Err(_) => parse_float(lexer, &num),
    }
}

fn tokenize_radix(lexer: &mut Lexer, radix: u32) -> Result<Token, PatchError> {
    bump(lexer); // consume '0'
    bump(lexer); // consume radix letter

    let mut num = String::new();
    while let Some(ch) = lexer.peek {
        if ch.is_digit(radix) {
            num.push(ch);
            bump(lexer);
        } else if ch == '_' {
            bump(lexer);
        } else {
            break;
        }
    }

    i64::from_str_radix(&num, radix)
        .map(Token::Int)
        .map_err(|_| PatchError::TypeError {
            message: format!("Invalid number literal '{}'", num),
            hint: None,
            code: Some(102),
        })
}

fn parse_float(lexer: &Lexer, num: &str) -> Result<Token, PatchError> {
    num.parse::<f64>()
        .map(Token::Float)
        .map_err(|_| PatchError::TypeError {
            message: format!(
                "Invalid number literal '{}' at {}:{}",
                num,
                lexer.line,
                lexer.column
            ),
            hint: None,
            code: Some(102),
        })
}

fn tokenize_identifier_or_keyword(lexer: &mut Lexer) -> Result<Token, PatchError> {
    let mut ident = String::new();

    while let Some(ch) = lexer.peek {
        if ch.is_alphanumeric() || ch == '_' {
            ident.push(ch);
            bump(lexer);
        } else {
            break;
        }
    }

    // PHP keywords are case-insensitive
    let token = match ident.to_ascii_lowercase().as_str() {
        "true" => Token::Bool(true),
        "false" => Token::Bool(false),
        "null" => Token::Null,
        _ => Token::Ident(ident),
    };

    Ok(token)
}
