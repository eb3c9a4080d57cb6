use super::ast::{SExpr, SExprKind};
use crate::error::{Error, Result};
use crate::lexer::{Token, TokenKind};

/// Parser from tokens to S-expression trees
pub struct SExprParser {
    tokens: Vec<Token>,
    current: usize,
}

impl SExprParser {
    /// Creates a new S-expression parser
    pub fn new(tokens: Vec<Token>) -> Self {
        SExprParser { tokens, current: 0 }
    }

    /// Parses every top-level form
    pub fn parse(&mut self) -> Result<Vec<SExpr>> {
        let mut forms = Vec::new();

        while !self.is_at_end() {
            if self.check(&TokenKind::RightParen) {
                return Err(Error::UnexpectedToken {
                    expected: "`(`".to_string(),
                    got: format!("{} at line {}", TokenKind::RightParen, self.peek().line),
                });
            }
            forms.push(self.parse_expression()?);
        }

        Ok(forms)
    }

    fn parse_expression(&mut self) -> Result<SExpr> {
        let token = self.advance();
        let kind = match token.kind {
            TokenKind::LeftParen => {
                let mut items = Vec::new();
                while !self.check(&TokenKind::RightParen) {
                    if self.is_at_end() {
                        return Err(Error::UnexpectedEof);
                    }
                    items.push(self.parse_expression()?);
                }
                self.advance(); // Closing )
                SExprKind::List(items)
            }
            TokenKind::Number(n) => SExprKind::Number(n),
            TokenKind::Symbol(s) => SExprKind::Symbol(s),
            TokenKind::RightParen => {
                return Err(Error::SyntaxError {
                    line: token.line,
                    col: token.column,
                    message: "Unbalanced `)`".to_string(),
                })
            }
            TokenKind::Eof => return Err(Error::UnexpectedEof),
        };

        Ok(SExpr {
            kind,
            line: token.line,
            column: token.column,
        })
    }

    fn is_at_end(&self) -> bool {
        matches!(self.peek().kind, TokenKind::Eof)
    }

    fn peek(&self) -> &Token {
        &self.tokens[self.current.min(self.tokens.len() - 1)]
    }

    fn advance(&mut self) -> Token {
        let token = self.peek().clone();
        if !self.is_at_end() {
            self.current += 1;
        }
        token
    }

    fn check(&self, kind: &TokenKind) -> bool {
        if self.is_at_end() {
            return false;
        }
        std::mem::discriminant(&self.peek().kind) == std::mem::discriminant(kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::SExprScanner;

    fn parse(source: &str) -> Result<Vec<SExpr>> {
        let tokens = SExprScanner::new(source).scan_tokens()?;
        SExprParser::new(tokens).parse()
    }

    #[test]
    fn test_nested() {
        let forms = parse("(hyp (> (+ x 1) 0)) (goal false)").unwrap();
        assert_eq!(forms.len(), 2);
        assert_eq!(forms[0].to_string(), "(hyp (> (+ x 1) 0))");
        let (head, args) = forms[0].as_application().unwrap();
        assert_eq!(head, "hyp");
        assert_eq!((args[0].line, args[0].column), (1, 6));
    }

    #[test]
    fn test_unbalanced() {
        assert_eq!(parse("(goal (< x 1)"), Err(Error::UnexpectedEof));
        assert!(matches!(
            parse("(goal false))"),
            Err(Error::UnexpectedToken { .. })
        ));
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(parse("  ; nothing\n").unwrap(), Vec::new());
    }
}
