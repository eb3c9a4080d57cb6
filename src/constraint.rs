//! # Constraint Model
//!
//! A [`Constraint`] is `Σ coefficients[v]·v  relation  constant` over exact
//! rationals; a [`Scenario`] is a set of constraints. Both are plain values:
//! constructed, compared, printed, never mutated in place.

use crate::term::{write_monomial, LinearForm, Rational, Variable};
use num_traits::Zero;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Relation between the linear side and the constant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Relation {
    /// `=`
    Eq,
    /// `≤`
    Leq,
    /// `<`
    Lt,
    /// `≥`
    Geq,
    /// `>`
    Gt,
}

impl Relation {
    /// Whether `lhs relation rhs` holds
    pub fn holds(self, lhs: &Rational, rhs: &Rational) -> bool {
        match self {
            Relation::Eq => lhs == rhs,
            Relation::Leq => lhs <= rhs,
            Relation::Lt => lhs < rhs,
            Relation::Geq => lhs >= rhs,
            Relation::Gt => lhs > rhs,
        }
    }

    /// Strict inequality
    pub fn is_strict(self) -> bool {
        matches!(self, Relation::Lt | Relation::Gt)
    }

    /// Printed symbol
    pub fn symbol(self) -> &'static str {
        match self {
            Relation::Eq => "=",
            Relation::Leq => "<=",
            Relation::Lt => "<",
            Relation::Geq => ">=",
            Relation::Gt => ">",
        }
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// A single normalized linear constraint
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Constraint {
    coefficients: BTreeMap<Variable, Rational>,
    relation: Relation,
    constant: Rational,
}

impl Constraint {
    /// Build a constraint, dropping zero coefficients
    pub fn new(
        coefficients: impl IntoIterator<Item = (Variable, Rational)>,
        relation: Relation,
        constant: Rational,
    ) -> Self {
        let coefficients = coefficients
            .into_iter()
            .filter(|(_, c)| !c.is_zero())
            .collect();
        Constraint {
            coefficients,
            relation,
            constant,
        }
    }

    /// `form relation 0`, i.e. the variable part against the negated constant
    pub fn from_form(form: LinearForm, relation: Relation) -> Self {
        Constraint::new(form.coefficients, relation, -form.constant)
    }

    /// `coeff·v relation constant`
    pub fn single(v: &Variable, coeff: Rational, relation: Relation, constant: Rational) -> Self {
        Constraint::new([(v.clone(), coeff)], relation, constant)
    }

    /// The canonical false constraint `0 < 0`
    pub fn falsum() -> Self {
        Constraint::new([], Relation::Lt, Rational::zero())
    }

    /// Variable coefficients (never zero)
    pub fn coefficients(&self) -> &BTreeMap<Variable, Rational> {
        &self.coefficients
    }

    /// Relation kind
    pub fn relation(&self) -> Relation {
        self.relation
    }

    /// Right-hand constant
    pub fn constant(&self) -> &Rational {
        &self.constant
    }

    /// Variables with a nonzero coefficient
    pub fn variables(&self) -> impl Iterator<Item = &Variable> {
        self.coefficients.keys()
    }

    /// No variables and the constant comparison fails, e.g. `0 < 0`
    pub fn is_statically_false(&self) -> bool {
        self.coefficients.is_empty() && !self.relation.holds(&Rational::zero(), &self.constant)
    }

    /// No variables and the constant comparison holds, e.g. `0 <= 1`
    pub fn is_statically_true(&self) -> bool {
        self.coefficients.is_empty() && self.relation.holds(&Rational::zero(), &self.constant)
    }

    /// Evaluate under an assignment; variables missing from it make the check fail
    pub fn is_satisfied_by(&self, values: &BTreeMap<Variable, Rational>) -> bool {
        let mut lhs = Rational::zero();
        for (v, c) in &self.coefficients {
            match values.get(v) {
                Some(value) => lhs += c * value,
                None => return false,
            }
        }
        self.relation.holds(&lhs, &self.constant)
    }

    /// Rewrite as `Σ a·v (= | ≤ | <) b`
    pub fn canonical(&self) -> Canonical {
        let flip = matches!(self.relation, Relation::Geq | Relation::Gt);
        let kind = if self.relation == Relation::Eq {
            CanonicalKind::Equal
        } else if self.relation.is_strict() {
            CanonicalKind::Strict
        } else {
            CanonicalKind::NonStrict
        };
        if flip {
            Canonical {
                coefficients: self
                    .coefficients
                    .iter()
                    .map(|(v, c)| (v.clone(), -c.clone()))
                    .collect(),
                bound: -self.constant.clone(),
                kind,
            }
        } else {
            Canonical {
                coefficients: self.coefficients.clone(),
                bound: self.constant.clone(),
                kind,
            }
        }
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.coefficients.is_empty() {
            write!(f, "0")?;
        }
        let mut first = true;
        for (v, c) in &self.coefficients {
            write_monomial(f, first, c, &v.name)?;
            first = false;
        }
        write!(f, " {} {}", self.relation, self.constant)
    }
}

/// Shape of a canonical constraint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CanonicalKind {
    /// `Σ a·v = b`
    Equal,
    /// `Σ a·v ≤ b`
    NonStrict,
    /// `Σ a·v < b`
    Strict,
}

/// A constraint in upper-bound orientation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canonical {
    /// Variable coefficients
    pub coefficients: BTreeMap<Variable, Rational>,
    /// Right-hand bound
    pub bound: Rational,
    /// Relation shape
    pub kind: CanonicalKind,
}

/// A set of constraints read as their conjunction
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Scenario {
    constraints: BTreeSet<Constraint>,
}

impl Scenario {
    /// Empty scenario (trivially feasible)
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct constraints
    pub fn len(&self) -> usize {
        self.constraints.len()
    }

    /// No constraints
    pub fn is_empty(&self) -> bool {
        self.constraints.is_empty()
    }

    /// Constraints in their total order
    pub fn iter(&self) -> impl Iterator<Item = &Constraint> {
        self.constraints.iter()
    }

    /// Membership test
    pub fn contains(&self, constraint: &Constraint) -> bool {
        self.constraints.contains(constraint)
    }

    /// Every variable mentioned by some constraint
    pub fn variables(&self) -> BTreeSet<Variable> {
        self.constraints
            .iter()
            .flat_map(|c| c.variables().cloned())
            .collect()
    }

    /// Some member is statically false, so the scenario is vacuous
    pub fn has_static_falsehood(&self) -> bool {
        self.constraints.iter().any(Constraint::is_statically_false)
    }
}

impl FromIterator<Constraint> for Scenario {
    fn from_iter<I: IntoIterator<Item = Constraint>>(iter: I) -> Self {
        Scenario {
            constraints: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Scenario {
    type Item = &'a Constraint;
    type IntoIter = std::collections::btree_set::Iter<'a, Constraint>;

    fn into_iter(self) -> Self::IntoIter {
        self.constraints.iter()
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, c) in self.constraints.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", c)?;
        }
        write!(f, "}}")
    }
}
