use crate::term::Rational;
use std::fmt;

/// A parsed S-expression with the position of its first token
#[derive(Debug, Clone, PartialEq)]
pub struct SExpr {
    /// What was parsed
    pub kind: SExprKind,
    /// Line number (1-indexed)
    pub line: usize,
    /// Column number (1-indexed)
    pub column: usize,
}

/// S-expression shapes
#[derive(Debug, Clone, PartialEq)]
pub enum SExprKind {
    /// Exact numeral
    Number(Rational),
    /// Bare symbol
    Symbol(String),
    /// Parenthesized list
    List(Vec<SExpr>),
}

impl SExpr {
    /// Symbol name, if this is a symbol
    pub fn as_symbol(&self) -> Option<&str> {
        match &self.kind {
            SExprKind::Symbol(name) => Some(name),
            _ => None,
        }
    }

    /// List items, if this is a list
    pub fn as_list(&self) -> Option<&[SExpr]> {
        match &self.kind {
            SExprKind::List(items) => Some(items),
            _ => None,
        }
    }

    /// Head symbol and arguments, if this is a list starting with a symbol
    pub fn as_application(&self) -> Option<(&str, &[SExpr])> {
        let (head, args) = self.as_list()?.split_first()?;
        Some((head.as_symbol()?, args))
    }
}

impl fmt::Display for SExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            SExprKind::Number(n) => write!(f, "{}", n),
            SExprKind::Symbol(s) => write!(f, "{}", s),
            SExprKind::List(items) => {
                write!(f, "(")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, ")")
            }
        }
    }
}
