use super::*;

/// Advance the character iterator and update line/column/offset tracking
pub(super) fn bump(lexer: &mut Lexer) -> Option<char> {
    let curr = lexer.peek;
    if let Some(c) = curr {
        if c == '\n' {
            lexer.line += 1;
            lexer.column = 0;
        } else {
            lexer.column += 1;
        }
        lexer.pos += c.len_utf8();
    }
    lexer.peek = lexer.input.next();
    curr
}

/// Peek one character past the current one without consuming anything
pub(super) fn peek_next(lexer: &Lexer) -> Option<char> {
    lexer.input.clone().next()
}

/// Skip whitespace and PHP comments: `//`, `#` and `/* ... */`.
/// An unterminated block comment is an error.
pub(super) fn skip_whitespace_and_comments(lexer: &mut Lexer) -> Result<(), PatchError> {
    while let Some(c) = lexer.peek {
        match c {
            ' ' | '\t' | '\r' | '\n' => {
                bump(lexer);
            }
            '#' => {
                skip_line_comment(lexer);
            }
            '/' => match peek_next(lexer) {
                Some('/') => {
                    skip_line_comment(lexer);
                }
                Some('*') => {
                    skip_block_comment(lexer)?;
                }
                _ => break,
            },
            _ => break,
        }
    }
    Ok(())
}

fn skip_line_comment(lexer: &mut Lexer) {
    while let Some(ch) = lexer.peek {
        if ch == '\n' {
            break;
        }
        bump(lexer);
    }
}

fn skip_block_comment(lexer: &mut Lexer) -> Result<(), PatchError> {
    bump(lexer); // consume '/'
    bump(lexer); // consume '*'

    while let Some(ch) = bump(lexer) {
        if ch == '*' && lexer.peek == Some('/') {
            bump(lexer);
            return Ok(());
        }
    }

    Err(PatchError::UnexpectedEof {
        message: "Unclosed block comment".into(),
        line: lexer.line,
        column: lexer.column,
        hint: Some("Close the comment with */".into()),
        code: Some(103),
    })
}
