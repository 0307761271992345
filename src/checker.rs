use thiserror::Error;

use crate::scanner::is_identifier;
use crate::token::{Token, TokenKind};

/// The first grammar violation found. `line` is `None` when input ran out.
#[derive(Debug, Error, PartialEq)]
pub enum SyntaxError {
    #[error("[line {}] Syntax error: expected {}, but found {}", display_line(.line), .expected, .found)]
    Expected {
        line: Option<usize>,
        expected: String,
        found: String,
    },
    #[error("[line {line}] Syntax error: unexpected keyword '{keyword}'")]
    UnexpectedKeyword { line: usize, keyword: String },
    #[error("[line {line}] Syntax error: unexpected token '{lexeme}'")]
    UnexpectedToken { line: usize, lexeme: String },
}

impl SyntaxError {
    pub fn line(&self) -> Option<usize> {
        match self {
            SyntaxError::Expected { line, .. } => *line,
            SyntaxError::UnexpectedKeyword { line, .. }
            | SyntaxError::UnexpectedToken { line, .. } => Some(*line),
        }
    }
}

fn display_line(line: &Option<usize>) -> String {
    match line {
        Some(line) => line.to_string(),
        None => "unknown".to_string(),
    }
}

/// Validates a whole token sequence against the statement grammar.
#[tracing::instrument(skip_all, fields(token_count = tokens.len()))]
pub fn check(tokens: &[Token]) -> Result<(), SyntaxError> {
    let result = SyntaxChecker::new(tokens).check_program();
    if let Err(error) = &result {
        tracing::debug!(line = ?error.line(), %error, "input rejected");
    }
    result
}

/// Recursive descent over a borrowed token slice. The only state is the cursor position.
pub struct SyntaxChecker<'a> {
    tokens: &'a [Token],
    position: usize,
}

impl<'a> SyntaxChecker<'a> {
    pub fn new(tokens: &'a [Token]) -> SyntaxChecker<'a> {
        SyntaxChecker {
            tokens,
            position: 0,
        }
    }

    pub fn check_program(&mut self) -> Result<(), SyntaxError> {
        while self.current().is_some() {
            self.check_statement()?;
        }
        Ok(())
    }

    fn check_statement(&mut self) -> Result<(), SyntaxError> {
        let Some(token) = self.current() else {
            return Err(self.expected("a statement"));
        };
        tracing::trace!(line = token.line, lexeme = %token.lexeme, "statement");
        match token.kind {
            TokenKind::Preprocessor => self.check_preprocessor(),
            TokenKind::Keyword => match token.lexeme.as_str() {
                "int" | "float" | "char" | "void" => self.check_declaration(),
                "if" => self.check_conditional(),
                "while" => self.check_while(),
                "for" => self.check_for(),
                "return" => self.check_return(),
                "using" => self.check_using(),
                keyword => Err(SyntaxError::UnexpectedKeyword {
                    line: token.line,
                    keyword: keyword.to_string(),
                }),
            },
            TokenKind::Identifier => {
                self.check_expression()?;
                self.expect(TokenKind::Delimiter, Some(";"))
            }
            TokenKind::Delimiter if token.lexeme == "{" => self.check_block(),
            _ => Err(SyntaxError::UnexpectedToken {
                line: token.line,
                lexeme: token.lexeme.clone(),
            }),
        }
    }

    /// Variable or function: the two only differ in whether `(` follows the name.
    fn check_declaration(&mut self) -> Result<(), SyntaxError> {
        self.expect(TokenKind::Keyword, None)?;
        self.expect(TokenKind::Identifier, None)?;

        if self.current_is(TokenKind::Delimiter, "(") {
            self.advance();
            if self
                .current()
                .is_some_and(|token| token.kind != TokenKind::Delimiter)
            {
                self.check_parameters()?;
            }
            self.expect(TokenKind::Delimiter, Some(")"))?;
            return self.check_block();
        }

        if self.current_is(TokenKind::Operator, "=") {
            self.advance();
            self.check_expression()?;
        }
        self.expect(TokenKind::Delimiter, Some(";"))
    }

    fn check_parameters(&mut self) -> Result<(), SyntaxError> {
        self.check_parameter()?;
        while self.current_is(TokenKind::Delimiter, ",") {
            self.advance();
            self.check_parameter()?;
        }
        Ok(())
    }

    fn check_parameter(&mut self) -> Result<(), SyntaxError> {
        self.expect(TokenKind::Keyword, None)?;
        self.expect(TokenKind::Identifier, None)
    }

    /// At most one binary operator, no grouping.
    fn check_expression(&mut self) -> Result<(), SyntaxError> {
        self.check_value()?;
        if self
            .current()
            .is_some_and(|token| token.kind == TokenKind::Operator)
        {
            self.advance();
            self.check_value()?;
        }
        Ok(())
    }

    fn check_value(&mut self) -> Result<(), SyntaxError> {
        match self.current() {
            Some(Token {
                kind: TokenKind::Identifier | TokenKind::Number | TokenKind::StringLiteral,
                ..
            }) => {
                self.advance();
                Ok(())
            }
            _ => Err(self.expected("a value (identifier, number or string)")),
        }
    }

    fn check_conditional(&mut self) -> Result<(), SyntaxError> {
        self.expect(TokenKind::Keyword, Some("if"))?;
        self.expect(TokenKind::Delimiter, Some("("))?;
        self.check_expression()?;
        self.expect(TokenKind::Delimiter, Some(")"))?;
        self.check_block()?;
        if self.current_is(TokenKind::Keyword, "else") {
            self.advance();
            self.check_block()?;
        }
        Ok(())
    }

    fn check_while(&mut self) -> Result<(), SyntaxError> {
        self.expect(TokenKind::Keyword, Some("while"))?;
        self.expect(TokenKind::Delimiter, Some("("))?;
        self.check_expression()?;
        self.expect(TokenKind::Delimiter, Some(")"))?;
        self.check_block()
    }

    // The initializer is a full declaration and brings its own `;`.
    fn check_for(&mut self) -> Result<(), SyntaxError> {
        self.expect(TokenKind::Keyword, Some("for"))?;
        self.expect(TokenKind::Delimiter, Some("("))?;
        self.check_declaration()?;
        self.check_expression()?;
        self.expect(TokenKind::Delimiter, Some(";"))?;
        self.check_expression()?;
        self.expect(TokenKind::Delimiter, Some(")"))?;
        self.check_block()
    }

    fn check_block(&mut self) -> Result<(), SyntaxError> {
        self.expect(TokenKind::Delimiter, Some("{"))?;
        while self
            .current()
            .is_some_and(|token| !token.is(TokenKind::Delimiter, "}"))
        {
            self.check_statement()?;
        }
        self.expect(TokenKind::Delimiter, Some("}"))
    }

    fn check_return(&mut self) -> Result<(), SyntaxError> {
        self.expect(TokenKind::Keyword, Some("return"))?;
        self.check_value()?;
        self.expect(TokenKind::Delimiter, Some(";"))
    }

    fn check_using(&mut self) -> Result<(), SyntaxError> {
        self.expect(TokenKind::Keyword, Some("using"))?;
        self.expect(TokenKind::Keyword, Some("namespace"))?;
        self.expect(TokenKind::Identifier, None)?;
        self.expect(TokenKind::Delimiter, Some(";"))
    }

    /// `#include <name>` or `#include "name"` / `#include "name.ext"`.
    /// The quoted form arrives from the scanner as a single string literal.
    fn check_preprocessor(&mut self) -> Result<(), SyntaxError> {
        self.expect(TokenKind::Preprocessor, Some("#include"))?;
        match self.current() {
            Some(token) if token.is(TokenKind::Operator, "<") => {
                self.advance();
                self.expect(TokenKind::Identifier, None)?;
                self.expect(TokenKind::Operator, Some(">"))
            }
            Some(token) if token.kind == TokenKind::StringLiteral => {
                if !is_header_name(&token.lexeme) {
                    return Err(self.expected("a header name like \"name\" or \"name.ext\""));
                }
                self.advance();
                Ok(())
            }
            _ => Err(self.expected("'<' or a quoted header name after #include")),
        }
    }

    fn current(&self) -> Option<&'a Token> {
        self.tokens.get(self.position)
    }

    fn current_is(&self, kind: TokenKind, lexeme: &str) -> bool {
        self.current().is_some_and(|token| token.is(kind, lexeme))
    }

    fn advance(&mut self) -> Option<&'a Token> {
        if self.position < self.tokens.len() {
            self.position += 1;
        }
        self.current()
    }

    fn expect(&mut self, kind: TokenKind, lexeme: Option<&str>) -> Result<(), SyntaxError> {
        let matches = self.current().is_some_and(|token| {
            token.kind == kind && lexeme.map_or(true, |lexeme| token.lexeme == lexeme)
        });
        if !matches {
            let expected = match lexeme {
                Some(lexeme) => format!("{kind} '{lexeme}'"),
                None => kind.to_string(),
            };
            return Err(self.expected(&expected));
        }
        self.advance();
        Ok(())
    }

    /// Error describing what was wanted against the token under the cursor.
    fn expected(&self, expected: &str) -> SyntaxError {
        let (line, found) = match self.current() {
            Some(token) => (Some(token.line), format!("'{}'", token.lexeme)),
            None => (None, "end of input".to_string()),
        };
        SyntaxError::Expected {
            line,
            expected: expected.to_string(),
            found,
        }
    }
}

fn is_header_name(lexeme: &str) -> bool {
    let Some(inner) = lexeme
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
    else {
        return false;
    };
    match inner.split_once('.') {
        Some((name, extension)) => is_identifier(name) && is_identifier(extension),
        None => is_identifier(inner),
    }
}
