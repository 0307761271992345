use std::fmt::{Display, Formatter};

#[derive(Debug, PartialEq, Clone)]
pub struct Token {
    pub(crate) kind: TokenKind,
    pub(crate) lexeme: String,
    pub(crate) line: usize,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: &str, line: usize) -> Token {
        Token {
            kind,
            lexeme: lexeme.to_string(),
            line,
        }
    }

    /// true when both the kind and the lexeme match.
    pub fn is(&self, kind: TokenKind, lexeme: &str) -> bool {
        self.kind == kind && self.lexeme == lexeme
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    Number,
    Identifier,
    Keyword,
    Operator,
    Delimiter,
    StringLiteral,
    Preprocessor,
    Unknown,
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenKind::Number => write!(f, "Number"),
            TokenKind::Identifier => write!(f, "Identifier"),
            TokenKind::Keyword => write!(f, "Keyword"),
            TokenKind::Operator => write!(f, "Operator"),
            TokenKind::Delimiter => write!(f, "Delimiter"),
            TokenKind::StringLiteral => write!(f, "String"),
            TokenKind::Preprocessor => write!(f, "Preprocessor"),
            TokenKind::Unknown => write!(f, "Unknown"),
        }
    }
}

pub const KEYWORDS: [&str; 11] = [
    "int",
    "if",
    "while",
    "else",
    "for",
    "float",
    "return",
    "char",
    "void",
    "using",
    "namespace",
];

/// Must stay ordered longest first: the scanner takes the first pattern that matches.
pub const OPERATORS: [&str; 18] = [
    "++", "--", "==", "!=", "<=", ">=", "&&", "||", "<<", ">>", "+", "-", "*", "/", "%", "=", "<",
    ">",
];

pub const DELIMITERS: [char; 8] = [';', ',', '(', ')', '{', '}', '[', ']'];

pub fn is_keyword(lexeme: &str) -> bool {
    KEYWORDS.contains(&lexeme)
}

#[cfg(test)]
mod tests {
    use crate::token::{is_keyword, Token, TokenKind, OPERATORS};

    #[test]
    fn test_operators_are_sorted_longest_first() {
        for pair in OPERATORS.windows(2) {
            assert!(
                pair[0].len() >= pair[1].len(),
                "{} listed before {}",
                pair[0],
                pair[1]
            );
        }
    }

    #[test]
    fn test_keywords_are_case_sensitive() {
        assert!(is_keyword("namespace"));
        assert!(!is_keyword("Int"));
        assert!(!is_keyword("main"));
    }

    #[test]
    fn test_token_is() {
        let token = Token::new(TokenKind::Delimiter, ";", 3);
        assert!(token.is(TokenKind::Delimiter, ";"));
        assert!(!token.is(TokenKind::Operator, ";"));
        assert_eq!(format!("{}", TokenKind::StringLiteral), "String");
    }
}
