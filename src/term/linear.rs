use super::{write_monomial, Rational, Term, Variable};
use crate::error::{Error, Result};
use num_traits::{One, Zero};
use std::collections::BTreeMap;
use std::fmt;

/// `Σ coefficients[v]·v + constant`, with no zero coefficients stored
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct LinearForm {
    /// Variable coefficients (never zero)
    pub coefficients: BTreeMap<Variable, Rational>,
    /// Constant term
    pub constant: Rational,
}

impl LinearForm {
    /// The constant form `c`
    pub fn constant(c: Rational) -> Self {
        LinearForm {
            coefficients: BTreeMap::new(),
            constant: c,
        }
    }

    /// The form `1·v`
    pub fn variable(v: &Variable) -> Self {
        let mut coefficients = BTreeMap::new();
        coefficients.insert(v.clone(), Rational::one());
        LinearForm {
            coefficients,
            constant: Rational::zero(),
        }
    }

    /// No variable has a coefficient
    pub fn is_constant(&self) -> bool {
        self.coefficients.is_empty()
    }

    /// Add `factor * other` into `self`
    pub fn add_scaled(&mut self, other: &LinearForm, factor: &Rational) {
        for (v, c) in &other.coefficients {
            let entry = self
                .coefficients
                .entry(v.clone())
                .or_insert_with(Rational::zero);
            *entry += c * factor;
            if entry.is_zero() {
                self.coefficients.remove(v);
            }
        }
        self.constant += &other.constant * factor;
    }

    /// `self * factor`
    pub fn scaled(&self, factor: &Rational) -> Self {
        let mut out = LinearForm::default();
        out.add_scaled(self, factor);
        out
    }

    /// `self - other`
    pub fn minus(&self, other: &LinearForm) -> Self {
        let mut out = self.clone();
        out.add_scaled(other, &-Rational::one());
        out
    }
}

impl fmt::Display for LinearForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (v, c) in &self.coefficients {
            write_monomial(f, first, c, &v.name)?;
            first = false;
        }
        if first {
            write!(f, "{}", self.constant)
        } else if self.constant > Rational::zero() {
            write!(f, " + {}", self.constant)
        } else if self.constant < Rational::zero() {
            write!(f, " - {}", -self.constant.clone())
        } else {
            Ok(())
        }
    }
}

/// Extraction of linear structure from a term
pub trait Linearize {
    /// Coefficient map and constant of the term, or `Error::NonLinear`
    fn linearize(&self) -> Result<LinearForm>;

    /// Linear form of `self - other`
    fn linear_difference(&self, other: &Self) -> Result<LinearForm> {
        Ok(self.linearize()?.minus(&other.linearize()?))
    }
}

impl Linearize for Term {
    fn linearize(&self) -> Result<LinearForm> {
        match self {
            Term::Const(c) => Ok(LinearForm::constant(c.clone())),
            Term::Var(v) => Ok(LinearForm::variable(v)),
            Term::Add(terms) => {
                let mut sum = LinearForm::default();
                for t in terms {
                    sum.add_scaled(&t.linearize()?, &Rational::one());
                }
                Ok(sum)
            }
            Term::Neg(t) => Ok(t.linearize()?.scaled(&-Rational::one())),
            Term::Mul(factors) => {
                // At most one factor may mention a variable
                let mut scale = Rational::one();
                let mut symbolic: Option<LinearForm> = None;
                for t in factors {
                    let form = t.linearize()?;
                    if form.is_constant() {
                        scale *= form.constant;
                    } else if symbolic.is_none() {
                        symbolic = Some(form);
                    } else {
                        return Err(Error::NonLinear {
                            term: self.to_string(),
                        });
                    }
                }
                Ok(match symbolic {
                    Some(form) => form.scaled(&scale),
                    None => LinearForm::constant(scale),
                })
            }
            Term::Div(numer, denom) => {
                let denom = denom.linearize()?;
                if !denom.is_constant() {
                    return Err(Error::NonLinear {
                        term: self.to_string(),
                    });
                }
                if denom.constant.is_zero() {
                    return Err(Error::DivisionByZero);
                }
                Ok(numer.linearize()?.scaled(&denom.constant.recip()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::term::{rational, ratio};

    #[test]
    fn test_linearize_sum() {
        let x = Variable::real("x");
        let y = Variable::real("y");
        // 2x - y/2 + 3
        let t = Term::Add(vec![
            Term::int(2).mul(Term::var(&x)),
            Term::Neg(Box::new(Term::var(&y).div(Term::int(2)))),
            Term::int(3),
        ]);
        let form = t.linearize().unwrap();
        assert_eq!(form.coefficients[&x], rational(2));
        assert_eq!(form.coefficients[&y], ratio(-1, 2));
        assert_eq!(form.constant, rational(3));
        assert_eq!(form.to_string(), "2*x - 1/2*y + 3");
    }

    #[test]
    fn test_cancellation_removes_variable() {
        let x = Variable::real("x");
        let form = Term::var(&x).sub(Term::var(&x)).linearize().unwrap();
        assert!(form.is_constant());
        assert!(form.constant.is_zero());
    }

    #[test]
    fn test_difference() {
        let x = Variable::real("x");
        let form = Term::var(&x)
            .linear_difference(&Term::int(1))
            .unwrap();
        assert_eq!(form.coefficients[&x], rational(1));
        assert_eq!(form.constant, rational(-1));
    }

    #[test]
    fn test_nonlinear_product() {
        let x = Variable::real("x");
        let y = Variable::real("y");
        let err = Term::var(&x).mul(Term::var(&y)).linearize().unwrap_err();
        assert!(matches!(err, Error::NonLinear { .. }));
    }

    #[test]
    fn test_division() {
        let x = Variable::real("x");
        assert!(matches!(
            Term::int(1).div(Term::var(&x)).linearize(),
            Err(Error::NonLinear { .. })
        ));
        assert_eq!(
            Term::var(&x).div(Term::int(0)).linearize(),
            Err(Error::DivisionByZero)
        );
    }
}
