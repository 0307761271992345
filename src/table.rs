use crate::token::Token;

const KIND_WIDTH: usize = 20;
const LEXEME_WIDTH: usize = 30;
const LINE_WIDTH: usize = 10;

/// Fixed-width listing of a token sequence, one token per row.
pub fn format_token_table(tokens: &[Token]) -> String {
    let mut table = format_row("Kind", "Lexeme", "Line");
    table.push_str(&"-".repeat(KIND_WIDTH + LEXEME_WIDTH + LINE_WIDTH));
    table.push('\n');
    for token in tokens {
        // a multi-line string literal would break the row
        let lexeme = token.lexeme.replace('\n', "\\n");
        table.push_str(&format_row(
            &token.kind.to_string(),
            &lexeme,
            &token.line.to_string(),
        ));
    }
    table
}

fn format_row(kind: &str, lexeme: &str, line: &str) -> String {
    format!("{kind:<KIND_WIDTH$} {lexeme:<LEXEME_WIDTH$} {line:<LINE_WIDTH$}\n")
}
