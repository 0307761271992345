use crate::checker::{check, SyntaxError};
use crate::scanner::tokenize;
use crate::token::TokenKind;

// Shortcuts for tests that only care about one stage's result.

#[allow(dead_code)]
pub fn check_source(code: &str) -> Result<(), SyntaxError> {
    check(&tokenize(code))
}

#[allow(dead_code)]
pub fn kinds_of(code: &str) -> Vec<TokenKind> {
    tokenize(code).into_iter().map(|token| token.kind).collect()
}
