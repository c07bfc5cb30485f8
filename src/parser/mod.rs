use crate::lexer::{Lexer, Token};
use crate::ast::Document;
use crate::PatchError;

mod document;
mod expr;

/// Parse a whole source file: `<?php` header, opaque statement
/// segmentation, and full parsing of the storage-variable assignment.
pub fn parse_document(source: &str, storage_var: &str) -> Result<Document, PatchError> {
    document::parse_document(source, storage_var)
}

pub struct Parser<'a> {
    lexer: Lexer<'a>,
    peek: Option<Token>,
}

impl<'a> Parser<'a> {
    pub fn new(input: &'a str) -> Result<Self, PatchError> {
        let mut lexer = Lexer::new(input);
        let peek = Some(lexer.next_token()?);
        Ok(Self { lexer, peek })
    }

    pub(crate) fn bump(&mut self) -> Result<Token, PatchError> {
        let curr = self.peek.take().ok_or(PatchError::UnexpectedEof {
            message: "Unexpected end of input".into(),
            line: self.lexer.line(),
            column: self.lexer.column(),
            hint: None,
            code: Some(201),
        })?;
        self.peek = Some(self.lexer.next_token()?);
        Ok(curr)
    }

    pub(crate) fn peek(&self) -> Option<&Token> {
        self.peek.as_ref()
    }

    pub(crate) fn expect(&mut self, expected: Token) -> Result<Token, PatchError> {
        let token = self.bump()?;
        if token != expected {
            return Err(PatchError::SyntaxError {
                message: format!("Expected {:?}, got {:?}", expected, token),
                line: self.lexer.line(),
                column: self.lexer.column(),
                hint: Some("Check your syntax".into()),
                code: Some(202),
            });
        }
        Ok(token)
    }

    pub(crate) fn line(&self) -> usize {
        self.lexer.line()
    }

    pub(crate) fn column(&self) -> usize {
        self.lexer.column()
    }

    /// Byte offset of the first significant token, available right after
    /// construction. Everything before it is the statement's leading trivia.
    pub fn token_start(&self) -> usize {
        self.lexer.token_start()
    }

    /// Parse one `$VAR = <expr>;` statement.
    pub fn parse_assignment(&mut self) -> Result<(String, crate::ast::Expr), PatchError> {
        expr::parse_assignment(self)
    }
}

#[cfg(test)]
mod tests;
