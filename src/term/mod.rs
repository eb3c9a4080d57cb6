//! # Symbolic Terms
//!
//! Variables carry their declared sort (real, integer or vector) and any sign
//! assumption (positive, non-negative). Terms are small arithmetic trees over
//! variables and exact rational constants; the only thing the tactic asks of
//! them is [`Linearize`]: the coefficient map and constant of a difference.
//!
//! ```lisp
//! (var x real)
//! (var n integer positive)
//! (var v vector)
//!
//! (+ (* 2 x) (- n 1))   ; linear: 2*x + n - 1
//! (* x n)               ; parses, but is not linear
//! ```

mod linear;

pub use linear::{LinearForm, Linearize};

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Zero};
use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Exact rational number used for every coefficient and constant
pub type Rational = BigRational;

/// Build a rational from an integer
pub fn rational(n: i64) -> Rational {
    BigRational::from_integer(BigInt::from(n))
}

/// Build a rational `numer / denom`
///
/// Panics if `denom` is zero, like `BigRational::new`.
pub fn ratio(numer: i64, denom: i64) -> Rational {
    BigRational::new(BigInt::from(numer), BigInt::from(denom))
}

/// The sort a variable ranges over
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Sort {
    /// Real number
    Real,
    /// Integer (a subset of the reals)
    Integer,
    /// Element of a vector space other than the reals
    Vector,
}

/// Sign assumption attached to a variable declaration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum Sign {
    /// No sign information
    #[default]
    Unknown,
    /// Strictly positive
    Positive,
    /// Zero or positive
    Nonnegative,
}

/// A declared variable
///
/// Identity is the name alone: two values with the same name are the same
/// coefficient key whatever sort or sign they carry.
#[derive(Debug, Clone)]
pub struct Variable {
    /// Variable name, unique within a proof state
    pub name: String,
    /// Declared sort
    pub sort: Sort,
    /// Declared sign
    pub sign: Sign,
}

impl Variable {
    /// A real variable without sign information
    pub fn real(name: &str) -> Self {
        Variable {
            name: name.to_string(),
            sort: Sort::Real,
            sign: Sign::Unknown,
        }
    }

    /// An integer variable without sign information
    pub fn integer(name: &str) -> Self {
        Variable {
            name: name.to_string(),
            sort: Sort::Integer,
            sign: Sign::Unknown,
        }
    }

    /// A vector-valued variable
    pub fn vector(name: &str) -> Self {
        Variable {
            name: name.to_string(),
            sort: Sort::Vector,
            sign: Sign::Unknown,
        }
    }

    /// Same variable with a sign assumption
    pub fn with_sign(mut self, sign: Sign) -> Self {
        self.sign = sign;
        self
    }

    /// Shorthand for `with_sign(Sign::Positive)`
    pub fn positive(self) -> Self {
        self.with_sign(Sign::Positive)
    }

    /// Shorthand for `with_sign(Sign::Nonnegative)`
    pub fn nonnegative(self) -> Self {
        self.with_sign(Sign::Nonnegative)
    }

    /// Real-valued (reals and integers)
    pub fn is_real(&self) -> bool {
        matches!(self.sort, Sort::Real | Sort::Integer)
    }

    /// Integer-valued
    pub fn is_integer(&self) -> bool {
        self.sort == Sort::Integer
    }

    /// Declared strictly positive
    pub fn is_positive(&self) -> bool {
        self.sign == Sign::Positive
    }

    /// Declared non-negative (positive implies non-negative)
    pub fn is_nonnegative(&self) -> bool {
        matches!(self.sign, Sign::Positive | Sign::Nonnegative)
    }
}

impl PartialEq for Variable {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Variable {}

impl Hash for Variable {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl PartialOrd for Variable {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Variable {
    fn cmp(&self, other: &Self) -> Ordering {
        self.name.cmp(&other.name)
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl fmt::Display for Sort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sort::Real => write!(f, "real"),
            Sort::Integer => write!(f, "integer"),
            Sort::Vector => write!(f, "vector"),
        }
    }
}

/// Arithmetic term
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Term {
    /// Exact rational constant
    Const(Rational),
    /// Variable reference
    Var(Variable),
    /// Sum of terms
    Add(Vec<Term>),
    /// Product of terms
    Mul(Vec<Term>),
    /// Negation
    Neg(Box<Term>),
    /// Quotient
    Div(Box<Term>, Box<Term>),
}

impl Term {
    /// Integer constant
    pub fn int(n: i64) -> Self {
        Term::Const(rational(n))
    }

    /// Variable reference
    pub fn var(v: &Variable) -> Self {
        Term::Var(v.clone())
    }

    /// `self + other`
    pub fn add(self, other: Term) -> Self {
        Term::Add(vec![self, other])
    }

    /// `self - other`
    pub fn sub(self, other: Term) -> Self {
        Term::Add(vec![self, Term::Neg(Box::new(other))])
    }

    /// `self * other`
    pub fn mul(self, other: Term) -> Self {
        Term::Mul(vec![self, other])
    }

    /// `self / other`
    pub fn div(self, other: Term) -> Self {
        Term::Div(Box::new(self), Box::new(other))
    }

    /// Variables occurring anywhere in the term
    pub fn variables(&self) -> BTreeSet<Variable> {
        let mut out = BTreeSet::new();
        self.collect_variables(&mut out);
        out
    }

    fn collect_variables(&self, out: &mut BTreeSet<Variable>) {
        match self {
            Term::Const(_) => {}
            Term::Var(v) => {
                out.insert(v.clone());
            }
            Term::Add(terms) | Term::Mul(terms) => {
                for t in terms {
                    t.collect_variables(out);
                }
            }
            Term::Neg(t) => t.collect_variables(out),
            Term::Div(n, d) => {
                n.collect_variables(out);
                d.collect_variables(out);
            }
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn join(f: &mut fmt::Formatter<'_>, op: &str, terms: &[Term]) -> fmt::Result {
            write!(f, "({}", op)?;
            for t in terms {
                write!(f, " {}", t)?;
            }
            write!(f, ")")
        }

        match self {
            Term::Const(c) => write!(f, "{}", c),
            Term::Var(v) => write!(f, "{}", v),
            Term::Add(terms) => join(f, "+", terms),
            Term::Mul(terms) => join(f, "*", terms),
            Term::Neg(t) => write!(f, "(- {})", t),
            Term::Div(n, d) => write!(f, "(/ {} {})", n, d),
        }
    }
}

/// Write `coeff * name` as part of a sum, handling signs and unit coefficients
pub(crate) fn write_monomial(
    f: &mut fmt::Formatter<'_>,
    first: bool,
    coeff: &Rational,
    name: &str,
) -> fmt::Result {
    let negative = coeff < &Rational::zero();
    let magnitude = if negative { -coeff.clone() } else { coeff.clone() };
    match (first, negative) {
        (true, true) => write!(f, "-")?,
        (true, false) => {}
        (false, true) => write!(f, " - ")?,
        (false, false) => write!(f, " + ")?,
    }
    if magnitude.is_one() {
        write!(f, "{}", name)
    } else {
        write!(f, "{}*{}", magnitude, name)
    }
}
