use super::*;
use crate::ast::Stmt;
use crate::lexer::{Lexer, Token};

/// A raw top-level statement slice and the line it starts on.
struct Segment {
    text: String,
    line: usize,
}

pub(super) fn parse_document(source: &str, storage_var: &str) -> Result<Document, PatchError> {
    let (header, body, base_line) = split_header(source)?;
    let segments = split_statements(body, base_line)?;

    let mut statements = Vec::with_capacity(segments.len());
    for segment in segments {
        match recognize_assignment(&segment, storage_var)? {
            Some(stmt) => statements.push(stmt),
            None => statements.push(Stmt::Opaque(segment.text)),
        }
    }

    Ok(Document {
        header: header.to_string(),
        statements,
    })
}

/// Split off the `<?php` opening tag. Only a BOM and whitespace may
/// precede it.
fn split_header(source: &str) -> Result<(&str, &str, usize), PatchError> {
    let mut rest = source;
    if let Some(stripped) = rest.strip_prefix('\u{feff}') {
        rest = stripped;
    }

    let trimmed = rest.trim_start();
    let lines_before = rest[..rest.len() - trimmed.len()].matches('\n').count();

    let tag_len = 5; // "<?php"
    let has_tag = trimmed.as_bytes().len() >= tag_len
        && trimmed.as_bytes()[..tag_len].eq_ignore_ascii_case(b"<?php")
        && trimmed[tag_len..]
            .chars()
            .next()
            .is_none_or(|c| c.is_whitespace());

    if !has_tag {
        return Err(PatchError::SyntaxError {
            message: "Missing <?php opening tag".into(),
            line: lines_before + 1,
            column: 0,
            hint: Some("PHP configuration files must start with <?php".into()),
            code: Some(204),
        });
    }

    let header_len = source.len() - trimmed.len() + tag_len;
    Ok((
        &source[..header_len],
        &source[header_len..],
        lines_before + 1,
    ))
}

/// Cut the body into raw statement slices, each ending at a `;` outside
/// strings, comments and brackets. Anything after a `?>` close tag, and
/// any trailing text without a `;`, becomes a final opaque slice.
fn split_statements(body: &str, base_line: usize) -> Result<Vec<Segment>, PatchError> {
    #[derive(Clone, Copy, PartialEq)]
    enum State {
        Normal,
        LineComment,
        BlockComment,
        Single,
        Double,
    }

    let mut segments = Vec::new();
    let mut state = State::Normal;
    let mut depth: i32 = 0;
    let mut escaped = false;
    let mut line = base_line;
    let mut column = 0usize;
    let mut seg_start = 0usize;
    let mut seg_line = base_line;

    let mut chars = body.char_indices().peekable();
    while let Some((idx, ch)) = chars.next() {
        if ch == '\n' {
            line += 1;
            column = 0;
        } else {
            column += 1;
        }

        match state {
            State::Normal => match ch {
                '\'' => state = State::Single,
                '"' => state = State::Double,
                '#' => state = State::LineComment,
                '/' => match chars.peek() {
                    Some((_, '/')) => state = State::LineComment,
                    Some((_, '*')) => {
                        chars.next();
                        column += 1;
                        state = State::BlockComment;
                    }
                    _ => {}
                },
                '(' | '[' | '{' => depth += 1,
                ')' | ']' | '}' => depth -= 1,
                '?' if matches!(chars.peek(), Some((_, '>'))) => {
                    // close tag: the rest of the file is opaque
                    segments.push(Segment {
                        text: body[seg_start..].to_string(),
                        line: seg_line,
                    });
                    return Ok(segments);
                }
                ';' if depth == 0 => {
                    let end = idx + 1;
                    segments.push(Segment {
                        text: body[seg_start..end].to_string(),
                        line: seg_line,
                    });
                    seg_start = end;
                    seg_line = line;
                }
                _ => {}
            },
            State::LineComment => {
                if ch == '\n' {
                    state = State::Normal;
                }
            }
            State::BlockComment => {
                if ch == '*' && matches!(chars.peek(), Some((_, '/'))) {
                    chars.next();
                    column += 1;
                    state = State::Normal;
                }
            }
            State::Single | State::Double => {
                if escaped {
                    escaped = false;
                } else if ch == '\\' {
                    escaped = true;
                } else if (ch == '\'' && state == State::Single)
                    || (ch == '"' && state == State::Double)
                {
                    state = State::Normal;
                }
            }
        }
    }

    match state {
        State::Single | State::Double => {
            return Err(PatchError::UnclosedString {
                quote: if state == State::Single { '\'' } else { '"' },
                line,
                column,
                hint: Some("String literal not closed".into()),
                code: Some(101),
            });
        }
        State::BlockComment => {
            return Err(PatchError::UnexpectedEof {
                message: "Unclosed block comment".into(),
                line,
                column,
                hint: Some("Close the comment with */".into()),
                code: Some(103),
            });
        }
        _ => {}
    }

    if seg_start < body.len() {
        segments.push(Segment {
            text: body[seg_start..].to_string(),
            line: seg_line,
        });
    }

    Ok(segments)
}

/// Parse a segment as `$VAR = <expr>;` when it starts with the storage
/// variable. Other segments stay opaque; a malformed storage assignment
/// is a hard parse error.
fn recognize_assignment(segment: &Segment, storage_var: &str) -> Result<Option<Stmt>, PatchError> {
    if !is_candidate(&segment.text, storage_var) {
        return Ok(None);
    }

    let mut parser = Parser::new(&segment.text).map_err(|e| offset_lines(e, segment.line - 1))?;
    let leading = segment.text[..parser.token_start()].to_string();
    let (var, value) = parser
        .parse_assignment()
        .map_err(|e| offset_lines(e, segment.line - 1))?;

    Ok(Some(Stmt::Assign {
        leading,
        var,
        value,
    }))
}

/// Cheap two-token lookahead: does this segment begin `$<storage_var> =`?
fn is_candidate(text: &str, storage_var: &str) -> bool {
    let mut lexer = Lexer::new(text);
    match lexer.next_token() {
        Ok(Token::Variable(name)) if name == storage_var => {}
        _ => return false,
    }
    matches!(lexer.next_token(), Ok(Token::Assign))
}

/// Rebase an error's line number from segment-relative to file-absolute.
fn offset_lines(err: PatchError, offset: usize) -> PatchError {
    match err {
        PatchError::SyntaxError { message, line, column, hint, code } =>
            PatchError::SyntaxError { message, line: line + offset, column, hint, code },
        PatchError::InvalidToken { token, line, column, hint, code } =>
            PatchError::InvalidToken { token, line: line + offset, column, hint, code },
        PatchError::UnexpectedEof { message, line, column, hint, code } =>
            PatchError::UnexpectedEof { message, line: line + offset, column, hint, code },
        PatchError::UnclosedString { quote, line, column, hint, code } =>
            PatchError::UnclosedString { quote, line: line + offset, column, hint, code },
        other => other,
    }
}
