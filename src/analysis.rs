use crate::checker::{check, SyntaxError};
use crate::scanner::tokenize;
use crate::token::{Token, TokenKind};

/// Both stages run over one source string.
#[derive(Debug, PartialEq)]
pub struct Analysis {
    pub tokens: Vec<Token>,
    pub outcome: Result<(), SyntaxError>,
}

impl Analysis {
    pub fn is_accepted(&self) -> bool {
        self.outcome.is_ok()
    }

    /// Characters the scanner could not classify.
    pub fn anomalies(&self) -> impl Iterator<Item = &Token> {
        self.tokens
            .iter()
            .filter(|token| token.kind == TokenKind::Unknown)
    }
}

pub fn analyze(source: &str) -> Analysis {
    let tokens = tokenize(source);
    let outcome = check(&tokens);
    Analysis { tokens, outcome }
}

#[cfg(test)]
mod tests {
    use crate::analysis::analyze;
    use crate::checker::SyntaxError;
    use crate::token::{Token, TokenKind};

    #[test]
    fn test_accepted_source() {
        let analysis = analyze("int x = 5;");
        assert!(analysis.is_accepted());
        assert_eq!(analysis.tokens.len(), 5);
        assert_eq!(analysis.anomalies().count(), 0);
    }

    #[test]
    fn test_rejected_source_keeps_tokens() {
        let analysis = analyze("int x = 5;\nx = $;");
        assert!(!analysis.is_accepted());
        assert_eq!(
            analysis.anomalies().collect::<Vec<_>>(),
            vec![&Token::new(TokenKind::Unknown, "$", 2)]
        );
        assert_eq!(
            analysis.outcome,
            Err(SyntaxError::Expected {
                line: Some(2),
                expected: "a value (identifier, number or string)".to_string(),
                found: "'$'".to_string(),
            })
        );
    }
}
