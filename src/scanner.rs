use crate::token::{is_keyword, Token, TokenKind, DELIMITERS, OPERATORS};

/// public interface for tokenizing. Never fails: characters no category accepts become
/// `TokenKind::Unknown` tokens.
#[tracing::instrument(skip_all, fields(source_len = source.len()))]
pub fn tokenize(source: &str) -> Vec<Token> {
    Scanner::new(source).filter_map(Lexeme::into_token).collect()
}

/// Pattern categories, in the order they are tried at each position.
#[derive(Debug, PartialEq, Clone, Copy)]
pub(crate) enum Category {
    Number,
    Identifier,
    Operator,
    Delimiter,
    StringLiteral,
    Preprocessor,
    Whitespace,
    Newline,
    Unknown,
}

/// Returns the byte length of the match at the start of the input, if any.
type Matcher = fn(&str) -> Option<usize>;

// Earlier entries shadow later ones: the first category that matches wins, even if a later
// one would match more text.
const CATEGORIES: [(Category, Matcher); 9] = [
    (Category::Number, match_number),
    (Category::Identifier, match_identifier),
    (Category::Operator, match_operator),
    (Category::Delimiter, match_delimiter),
    (Category::StringLiteral, match_string),
    (Category::Preprocessor, match_preprocessor),
    (Category::Whitespace, match_whitespace),
    (Category::Newline, match_newline),
    (Category::Unknown, match_any),
];

/// One raw match, skipped categories included.
#[derive(Debug, PartialEq, Clone, Copy)]
pub(crate) struct Lexeme<'a> {
    pub(crate) category: Category,
    pub(crate) text: &'a str,
    pub(crate) line: usize,
}

impl Lexeme<'_> {
    fn into_token(self) -> Option<Token> {
        let kind = match self.category {
            Category::Number => TokenKind::Number,
            Category::Identifier if is_keyword(self.text) => TokenKind::Keyword,
            Category::Identifier => TokenKind::Identifier,
            Category::Operator => TokenKind::Operator,
            Category::Delimiter => TokenKind::Delimiter,
            Category::StringLiteral => TokenKind::StringLiteral,
            Category::Preprocessor => TokenKind::Preprocessor,
            Category::Whitespace | Category::Newline => return None,
            Category::Unknown => TokenKind::Unknown,
        };
        let text = match kind {
            TokenKind::Preprocessor => self.text.trim(),
            _ => self.text,
        };
        Some(Token::new(kind, text, self.line))
    }
}

pub(crate) struct Scanner<'a> {
    source: &'a str,
    // byte offset of the next match
    current: usize,
    line: usize,
    // byte offset where the current line begins
    line_start: usize,
}

impl<'a> Scanner<'a> {
    pub(crate) fn new(source: &'a str) -> Scanner<'a> {
        Scanner {
            source,
            current: 0,
            line: 1,
            line_start: 0,
        }
    }
}

impl<'a> Iterator for Scanner<'a> {
    type Item = Lexeme<'a>;

    fn next(&mut self) -> Option<Lexeme<'a>> {
        let rest = &self.source[self.current..];
        if rest.is_empty() {
            return None;
        }
        // match_any accepts any non-empty input, so this only bails out at the end.
        let (category, length) = CATEGORIES
            .iter()
            .find_map(|(category, matcher)| matcher(rest).map(|length| (*category, length)))?;
        let text = &rest[..length];

        if category == Category::Unknown {
            tracing::debug!(
                line = self.line,
                column = self.current - self.line_start + 1,
                character = text,
                "unrecognized character"
            );
        }

        let lexeme = Lexeme {
            category,
            text,
            line: self.line,
        };
        self.current += length;

        // only a Newline match moves the counter, even if a string literal spans lines
        if category == Category::Newline {
            self.line += 1;
            self.line_start = self.current;
        }
        Some(lexeme)
    }
}

fn match_number(input: &str) -> Option<usize> {
    let length = input.bytes().take_while(u8::is_ascii_digit).count();
    (length > 0).then_some(length)
}

fn match_identifier(input: &str) -> Option<usize> {
    let mut chars = input.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {
            let tail: usize = chars
                .take_while(|c| is_word(*c))
                .map(char::len_utf8)
                .sum();
            Some(1 + tail)
        }
        _ => None,
    }
}

fn match_operator(input: &str) -> Option<usize> {
    OPERATORS
        .iter()
        .find(|operator| input.starts_with(**operator))
        .map(|operator| operator.len())
}

fn match_delimiter(input: &str) -> Option<usize> {
    input
        .chars()
        .next()
        .filter(|c| DELIMITERS.contains(c))
        .map(char::len_utf8)
}

fn match_string(input: &str) -> Option<usize> {
    let body = input.strip_prefix('"')?;
    // both quotes included
    body.find('"').map(|closing| closing + 2)
}

fn match_preprocessor(input: &str) -> Option<usize> {
    let after_hash = input.strip_prefix('#')?;
    let spaces: usize = after_hash
        .chars()
        .take_while(|c| c.is_whitespace())
        .map(char::len_utf8)
        .sum();
    let word: usize = after_hash[spaces..]
        .chars()
        .take_while(|c| is_word(*c))
        .map(char::len_utf8)
        .sum();
    (word > 0).then_some(1 + spaces + word)
}

fn match_whitespace(input: &str) -> Option<usize> {
    let length = input
        .bytes()
        .take_while(|b| *b == b' ' || *b == b'\t')
        .count();
    (length > 0).then_some(length)
}

fn match_newline(input: &str) -> Option<usize> {
    input.starts_with('\n').then_some(1)
}

fn match_any(input: &str) -> Option<usize> {
    input.chars().next().map(char::len_utf8)
}

fn is_word(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// A name the grammar would accept as an identifier: identifier-shaped and not reserved.
pub(crate) fn is_identifier(text: &str) -> bool {
    match_identifier(text) == Some(text.len()) && !is_keyword(text)
}
