use std::io::{self, BufRead, Lines};

/// Groups interactive input lines into snippets worth analyzing.
/// A snippet ends on an empty line, or when braces and parentheses are balanced and the last
/// line closes a statement (`;`, `}`) or is a directive.
pub struct MultilineInput<T: BufRead> {
    lines: Lines<T>,
}

impl<T: BufRead> MultilineInput<T> {
    pub fn new(lines: Lines<T>) -> MultilineInput<T> {
        MultilineInput { lines }
    }
}

impl<T: BufRead> Iterator for MultilineInput<T> {
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut current_input = String::new();
        loop {
            let line = match self.lines.next() {
                // stdin closed: whatever is pending still gets analyzed.
                None if current_input.is_empty() => return None,
                None => return Some(Ok(current_input)),
                Some(Err(error)) => return Some(Err(error)),
                Some(Ok(line)) => line,
            };
            if !current_input.is_empty() {
                current_input.push('\n');
            }
            current_input.push_str(&line);

            if is_finished(&current_input, &line) {
                return Some(Ok(current_input));
            }
        }
    }
}

fn is_finished(input: &str, last_line: &str) -> bool {
    let last_line = last_line.trim();
    if last_line.is_empty() {
        return true;
    }
    let mut open_braces: i32 = 0;
    let mut open_parens: i32 = 0;
    for char in input.chars() {
        match char {
            '{' => open_braces += 1,
            '}' => open_braces -= 1,
            '(' => open_parens += 1,
            ')' => open_parens -= 1,
            _ => {}
        }
    }
    // going negative is left for the checker to report
    let balanced = open_braces <= 0 && open_parens <= 0;
    balanced && (last_line.ends_with(';') || last_line.ends_with('}') || last_line.starts_with('#'))
}

#[cfg(test)]
mod tests {
    use crate::repl::MultilineInput;
    use std::io::{BufRead, Cursor};

    fn snippets(input: &str) -> Vec<String> {
        MultilineInput::new(Cursor::new(input.to_string()).lines())
            .collect::<Result<Vec<_>, _>>()
            .unwrap()
    }

    #[test]
    fn test_single_line_statements() {
        assert_eq!(
            snippets("int x = 1;\n#include <iostream>\n"),
            vec!["int x = 1;", "#include <iostream>"]
        );
    }

    #[test]
    fn test_block_waits_for_closing_brace() {
        assert_eq!(
            snippets("int main() {\n  int x = 1;\n  return x;\n}\nx = 2;\n"),
            vec!["int main() {\n  int x = 1;\n  return x;\n}", "x = 2;"]
        );
    }

    #[test]
    fn test_empty_line_flushes() {
        assert_eq!(snippets("x = 1\n\n"), vec!["x = 1\n"]);
    }

    #[test]
    fn test_pending_input_on_close() {
        assert_eq!(snippets("int main() {"), vec!["int main() {"]);
        assert_eq!(snippets(""), Vec::<String>::new());
    }
}
