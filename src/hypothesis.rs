//! Hypotheses as a closed set of proposition shapes

use crate::term::{Term, Variable};
use std::fmt;

/// A proposition the tactic can read
///
/// Relational shapes carry their two sides unevaluated; typed facts carry the
/// declared variable whose sort and sign are the fact.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Prop {
    /// Literal truth value
    Bool(bool),
    /// `L = R`
    Eq(Term, Term),
    /// `L ≤ R`
    Leq(Term, Term),
    /// `L < R`
    Lt(Term, Term),
    /// `L ≥ R`
    Geq(Term, Term),
    /// `L > R`
    Gt(Term, Term),
    /// `L ≠ R`
    Ne(Term, Term),
    /// Declared sort/sign of a single variable
    Type(Variable),
    /// Any other proposition; carried for display only
    Opaque(String),
}

impl Prop {
    /// Logical negation
    ///
    /// Relations flip to their complement. A positivity fact negates to the
    /// corresponding bound; facts with no sign content and opaque
    /// propositions stay opaque.
    pub fn negate(&self) -> Prop {
        match self {
            Prop::Bool(b) => Prop::Bool(!b),
            Prop::Eq(l, r) => Prop::Ne(l.clone(), r.clone()),
            Prop::Ne(l, r) => Prop::Eq(l.clone(), r.clone()),
            Prop::Leq(l, r) => Prop::Gt(l.clone(), r.clone()),
            Prop::Lt(l, r) => Prop::Geq(l.clone(), r.clone()),
            Prop::Geq(l, r) => Prop::Lt(l.clone(), r.clone()),
            Prop::Gt(l, r) => Prop::Leq(l.clone(), r.clone()),
            Prop::Type(v) if v.is_real() && v.is_positive() => Prop::Leq(Term::var(v), Term::int(0)),
            Prop::Type(v) if v.is_real() && v.is_nonnegative() => Prop::Lt(Term::var(v), Term::int(0)),
            other => Prop::Opaque(format!("¬{}", other)),
        }
    }

    /// Shape is one of the six binary relations
    pub fn is_relation(&self) -> bool {
        matches!(
            self,
            Prop::Eq(..) | Prop::Leq(..) | Prop::Lt(..) | Prop::Geq(..) | Prop::Gt(..) | Prop::Ne(..)
        )
    }
}

impl fmt::Display for Prop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Prop::Bool(b) => write!(f, "{}", b),
            Prop::Eq(l, r) => write!(f, "{} = {}", l, r),
            Prop::Leq(l, r) => write!(f, "{} <= {}", l, r),
            Prop::Lt(l, r) => write!(f, "{} < {}", l, r),
            Prop::Geq(l, r) => write!(f, "{} >= {}", l, r),
            Prop::Gt(l, r) => write!(f, "{} > {}", l, r),
            Prop::Ne(l, r) => write!(f, "{} != {}", l, r),
            Prop::Type(v) => {
                write!(f, "{}: {}", v.name, v.sort)?;
                if v.is_positive() {
                    write!(f, " positive")
                } else if v.is_nonnegative() {
                    write!(f, " nonnegative")
                } else {
                    Ok(())
                }
            }
            Prop::Opaque(text) => write!(f, "{}", text),
        }
    }
}
