use super::token::{Token, TokenKind};
use crate::error::{Error, Result};
use crate::term::Rational;
use num_bigint::BigInt;
use num_traits::Zero;

/// Scanner for the S-expression problem syntax
pub struct SExprScanner {
    /// Source code as character vector
    source: Vec<char>,
    /// Accumulated tokens
    tokens: Vec<Token>,
    /// Start position of current token
    start: usize,
    /// Column where the current token starts
    start_column: usize,
    /// Current position in source
    current: usize,
    /// Current line number (1-indexed)
    line: usize,
    /// Current column number (1-indexed)
    column: usize,
}

impl SExprScanner {
    /// Creates a new S-expression scanner from source code
    pub fn new(source: &str) -> Self {
        SExprScanner {
            source: source.chars().collect(),
            tokens: Vec::new(),
            start: 0,
            start_column: 1,
            current: 0,
            line: 1,
            column: 1,
        }
    }

    /// Scans all tokens from source code and returns them as a vector
    pub fn scan_tokens(&mut self) -> Result<Vec<Token>> {
        while !self.is_at_end() {
            self.start = self.current;
            self.start_column = self.column;
            self.scan_token()?;
        }

        self.tokens.push(Token::new(
            TokenKind::Eof,
            String::new(),
            self.line,
            self.column,
        ));

        Ok(std::mem::take(&mut self.tokens))
    }

    fn scan_token(&mut self) -> Result<()> {
        let c = self.advance();

        match c {
            ' ' | '\r' | '\t' => {}
            '\n' => {
                self.line += 1;
                self.column = 1;
            }

            ';' => self.skip_line_comment(),

            '(' => self.add_token(TokenKind::LeftParen),
            ')' => self.add_token(TokenKind::RightParen),

            // Negative numeral or the minus operator
            '-' if self.peek().is_ascii_digit() => self.scan_number(true)?,

            c if c.is_ascii_digit() => self.scan_number(false)?,

            c if is_symbol_char(c) => self.scan_symbol(),

            _ => {
                return Err(self.error(format!("Unexpected character '{}'", c)));
            }
        }

        Ok(())
    }

    fn skip_line_comment(&mut self) {
        while !self.is_at_end() && self.peek() != '\n' {
            self.advance();
        }
    }

    fn scan_number(&mut self, negative: bool) -> Result<()> {
        // An unsigned numeral's first digit is already consumed
        let mut integer = if negative {
            String::new()
        } else {
            self.source[self.start].to_string()
        };
        integer.push_str(&self.digits());

        let mut value = if self.peek() == '.' && self.peek_next().is_ascii_digit() {
            self.advance(); // consume .
            let fraction = self.digits();
            let scale = BigInt::from(10u32).pow(fraction.len() as u32);
            let numer = self.big_int(&format!("{}{}", integer, fraction))?;
            Rational::new(numer, scale)
        } else if self.peek() == '/' && self.peek_next().is_ascii_digit() {
            self.advance(); // consume /
            let denom = self.digits();
            let denom = self.big_int(&denom)?;
            if denom.is_zero() {
                return Err(self.error("Zero denominator in numeral"));
            }
            Rational::new(self.big_int(&integer)?, denom)
        } else {
            Rational::from_integer(self.big_int(&integer)?)
        };

        // `2x` is neither a numeral nor a symbol
        if is_symbol_char(self.peek()) || self.peek().is_ascii_digit() {
            let text: String = self.source[self.start..=self.current].iter().collect();
            return Err(self.error(format!("Invalid numeral '{}'", text)));
        }

        if negative {
            value = -value;
        }
        self.add_token(TokenKind::Number(value));
        Ok(())
    }

    fn digits(&mut self) -> String {
        let mut text = String::new();
        while self.peek().is_ascii_digit() {
            text.push(self.advance());
        }
        text
    }

    fn big_int(&self, digits: &str) -> Result<BigInt> {
        digits
            .parse()
            .map_err(|_| self.error(format!("Invalid numeral '{}'", digits)))
    }

    fn scan_symbol(&mut self) {
        while is_symbol_char(self.peek()) || self.peek().is_ascii_digit() {
            self.advance();
        }

        let text: String = self.source[self.start..self.current].iter().collect();
        self.add_token(TokenKind::Symbol(text));
    }

    fn is_at_end(&self) -> bool {
        self.current >= self.source.len()
    }

    fn advance(&mut self) -> char {
        let c = self.source[self.current];
        self.current += 1;
        self.column += 1;
        c
    }

    fn peek(&self) -> char {
        if self.is_at_end() {
            '\0'
        } else {
            self.source[self.current]
        }
    }

    fn peek_next(&self) -> char {
        if self.current + 1 >= self.source.len() {
            '\0'
        } else {
            self.source[self.current + 1]
        }
    }

    fn add_token(&mut self, kind: TokenKind) {
        let lexeme: String = self.source[self.start..self.current].iter().collect();
        self.tokens
            .push(Token::new(kind, lexeme, self.line, self.start_column));
    }

    fn error(&self, message: impl Into<String>) -> Error {
        Error::SyntaxError {
            line: self.line,
            col: self.start_column,
            message: message.into(),
        }
    }
}

fn is_symbol_char(c: char) -> bool {
    c.is_alphabetic()
        || matches!(
            c,
            '_' | '-' | '+' | '*' | '/' | '<' | '>' | '=' | '!' | '?' | '.' | '\'' | '^'
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::term::{ratio, rational};

    fn kinds(source: &str) -> Vec<TokenKind> {
        SExprScanner::new(source)
            .scan_tokens()
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn test_simple_sexpr() {
        assert_eq!(
            kinds("(<= x 1)"),
            vec![
                TokenKind::LeftParen,
                TokenKind::Symbol("<=".into()),
                TokenKind::Symbol("x".into()),
                TokenKind::Number(rational(1)),
                TokenKind::RightParen,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_numerals_are_exact() {
        assert_eq!(
            kinds("0.25 -3 1/3 -0.5"),
            vec![
                TokenKind::Number(ratio(1, 4)),
                TokenKind::Number(rational(-3)),
                TokenKind::Number(ratio(1, 3)),
                TokenKind::Number(ratio(-1, 2)),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_unsigned_numerals_keep_leading_digit() {
        assert_eq!(
            kinds("1 10 12.5 7/2"),
            vec![
                TokenKind::Number(rational(1)),
                TokenKind::Number(rational(10)),
                TokenKind::Number(ratio(25, 2)),
                TokenKind::Number(ratio(7, 2)),
                TokenKind::Eof,
            ]
        );
        let tokens = SExprScanner::new("(< x 12)").scan_tokens().unwrap();
        assert_eq!(tokens[3].lexeme, "12");
        assert_eq!(tokens[3].column, 6);
    }

    #[test]
    fn test_minus_operator() {
        assert_eq!(
            kinds("(- x 1)")[1],
            TokenKind::Symbol("-".into())
        );
    }

    #[test]
    fn test_comment_and_positions() {
        let tokens = SExprScanner::new("; header\n  (goal false)")
            .scan_tokens()
            .unwrap();
        assert_eq!(tokens[0].kind, TokenKind::LeftParen);
        assert_eq!((tokens[0].line, tokens[0].column), (2, 3));
        assert_eq!((tokens[1].line, tokens[1].column), (2, 4));
        assert_eq!(tokens[1].lexeme, "goal");
    }

    #[test]
    fn test_bad_input() {
        assert!(matches!(
            SExprScanner::new("(hyp 2x)").scan_tokens(),
            Err(Error::SyntaxError { line: 1, col: 6, .. })
        ));
        assert!(matches!(
            SExprScanner::new("1/0").scan_tokens(),
            Err(Error::SyntaxError { .. })
        ));
        assert!(matches!(
            SExprScanner::new("(hyp #t)").scan_tokens(),
            Err(Error::SyntaxError { .. })
        ));
    }
}
