//! Fourier–Motzkin elimination over exact rationals
//!
//! Every constraint is put in upper-bound form `Σ a·x ≤ b` (or `< b`);
//! an equality becomes two opposite rows. Variables are eliminated one at a
//! time in ascending order by pairing each row bounding the variable from
//! above with each row bounding it from below. Each row remembers the
//! multipliers of the input constraints it was built from, so a false constant
//! row is itself the Farkas certificate.
//!
//! When elimination finishes without contradiction the rows recorded at each
//! stage are replayed backwards to pick a value for each variable inside its
//! bounds.

use super::{Certificate, FeasibilityOracle, InfeasibilityProof, Witness};
use crate::constraint::{CanonicalKind, Constraint, Scenario};
use crate::error::Result;
use crate::term::{rational, Rational, Variable};
use num_traits::{One, Signed, Zero};
use std::collections::{BTreeMap, BTreeSet};
use tracing::trace;

/// Reference feasibility oracle
#[derive(Debug, Clone, Copy, Default)]
pub struct FourierMotzkin;

impl FourierMotzkin {
    /// Create the oracle
    pub fn new() -> Self {
        FourierMotzkin
    }
}

impl FeasibilityOracle for FourierMotzkin {
    fn feasibility(&self, scenario: &Scenario) -> Result<Certificate> {
        let constraints: Vec<&Constraint> = scenario.iter().collect();
        let rows = initial_rows(&constraints);

        let certificate = match eliminate(rows) {
            Elimination::Contradiction(origin) => {
                Certificate::Infeasible(proof_from_origin(&constraints, &origin))
            }
            Elimination::Consistent(stages) => {
                let mut values = back_substitute(&stages);
                for v in scenario.variables() {
                    values.entry(v).or_insert_with(Rational::zero);
                }
                Certificate::Feasible(Witness::new(values))
            }
        };
        Ok(certificate)
    }
}

/// `Σ coefficients·x ≤ bound` (`<` when strict), built from input
/// constraint `i` with multiplier `origin[i]`
#[derive(Debug, Clone)]
struct Row {
    coefficients: BTreeMap<Variable, Rational>,
    bound: Rational,
    strict: bool,
    origin: BTreeMap<usize, Rational>,
}

impl Row {
    fn coefficient(&self, v: &Variable) -> Option<&Rational> {
        self.coefficients.get(v)
    }

    fn is_constant(&self) -> bool {
        self.coefficients.is_empty()
    }

    /// Constant row that cannot hold
    fn is_contradiction(&self) -> bool {
        self.is_constant()
            && if self.strict {
                self.bound <= Rational::zero()
            } else {
                self.bound < Rational::zero()
            }
    }

    /// `self * lhs + other * rhs` for non-negative multipliers
    fn combine(&self, lhs: &Rational, other: &Row, rhs: &Rational) -> Row {
        let mut coefficients = BTreeMap::new();
        for (v, a) in &self.coefficients {
            coefficients.insert(v.clone(), a * lhs);
        }
        for (v, a) in &other.coefficients {
            let entry = coefficients
                .entry(v.clone())
                .or_insert_with(Rational::zero);
            *entry += a * rhs;
        }
        coefficients.retain(|_, a| !a.is_zero());

        let mut origin = BTreeMap::new();
        for (i, m) in &self.origin {
            origin.insert(*i, m * lhs);
        }
        for (i, m) in &other.origin {
            *origin.entry(*i).or_insert_with(Rational::zero) += m * rhs;
        }

        Row {
            coefficients,
            bound: &self.bound * lhs + &other.bound * rhs,
            strict: self.strict || other.strict,
            origin,
        }
    }
}

fn initial_rows(constraints: &[&Constraint]) -> Vec<Row> {
    let mut rows = Vec::new();
    for (i, constraint) in constraints.iter().enumerate() {
        let canonical = constraint.canonical();
        let row = Row {
            coefficients: canonical.coefficients.clone(),
            bound: canonical.bound.clone(),
            strict: canonical.kind == CanonicalKind::Strict,
            origin: BTreeMap::from([(i, Rational::one())]),
        };
        if canonical.kind == CanonicalKind::Equal {
            let mirrored = Row {
                coefficients: canonical
                    .coefficients
                    .iter()
                    .map(|(v, a)| (v.clone(), -a.clone()))
                    .collect(),
                bound: -canonical.bound,
                strict: false,
                origin: BTreeMap::from([(i, -Rational::one())]),
            };
            rows.push(row);
            rows.push(mirrored);
        } else {
            rows.push(row);
        }
    }
    rows
}

enum Elimination {
    /// Multipliers of a false constant row
    Contradiction(BTreeMap<usize, Rational>),
    /// For each eliminated variable, the rows that mentioned it
    Consistent(Vec<(Variable, Vec<Row>)>),
}

fn eliminate(rows: Vec<Row>) -> Elimination {
    let mut current = Vec::new();
    for row in rows {
        if row.is_contradiction() {
            return Elimination::Contradiction(row.origin);
        }
        if !row.is_constant() {
            current.push(row);
        }
    }

    let variables: BTreeSet<Variable> = current
        .iter()
        .flat_map(|r| r.coefficients.keys().cloned())
        .collect();

    let mut stages = Vec::with_capacity(variables.len());
    for v in variables {
        let (with, without): (Vec<Row>, Vec<Row>) = current
            .into_iter()
            .partition(|r| r.coefficient(&v).is_some());

        let mut next = Tightest::default();
        for row in without {
            next.insert(row);
        }

        let zero = Rational::zero();
        let uppers = with.iter().filter(|r| r.coefficient(&v).is_some_and(|a| a > &zero));
        for upper in uppers {
            let lowers = with.iter().filter(|r| r.coefficient(&v).is_some_and(|a| a < &zero));
            for lower in lowers {
                let (Some(a), Some(b)) = (upper.coefficient(&v), lower.coefficient(&v)) else {
                    continue;
                };
                let derived = upper.combine(&a.recip(), lower, &(-b).recip());
                if derived.is_contradiction() {
                    trace!(variable = %v, "elimination reached a contradiction");
                    return Elimination::Contradiction(derived.origin);
                }
                if !derived.is_constant() {
                    next.insert(derived);
                }
            }
        }

        trace!(variable = %v, rows = next.len(), "eliminated variable");
        stages.push((v, with));
        current = next.into_rows();
    }

    Elimination::Consistent(stages)
}

/// Keeps, per coefficient vector, only the tightest row
#[derive(Default)]
struct Tightest {
    rows: BTreeMap<BTreeMap<Variable, Rational>, Row>,
}

impl Tightest {
    fn insert(&mut self, row: Row) {
        // Scale so the leading coefficient has magnitude one
        let Some(lead) = row.coefficients.values().next().map(|a| a.abs()) else {
            return;
        };
        let row = if lead.is_one() {
            row
        } else {
            let factor = lead.recip();
            Row {
                coefficients: row
                    .coefficients
                    .iter()
                    .map(|(v, a)| (v.clone(), a * &factor))
                    .collect(),
                bound: &row.bound * &factor,
                strict: row.strict,
                origin: row
                    .origin
                    .iter()
                    .map(|(i, m)| (*i, m * &factor))
                    .collect(),
            }
        };

        let superseded = self
            .rows
            .get(&row.coefficients)
            .map_or(true, |kept| tighter(&row, kept));
        if superseded {
            self.rows.insert(row.coefficients.clone(), row);
        }
    }

    fn len(&self) -> usize {
        self.rows.len()
    }

    fn into_rows(self) -> Vec<Row> {
        self.rows.into_values().collect()
    }
}

fn tighter(row: &Row, than: &Row) -> bool {
    row.bound < than.bound || (row.bound == than.bound && row.strict && !than.strict)
}

/// A bound on one variable: value and whether it is strict
type Bound = (Rational, bool);

fn back_substitute(stages: &[(Variable, Vec<Row>)]) -> BTreeMap<Variable, Rational> {
    let mut values: BTreeMap<Variable, Rational> = BTreeMap::new();

    for (v, rows) in stages.iter().rev() {
        let mut lower: Option<Bound> = None;
        let mut upper: Option<Bound> = None;

        for row in rows {
            let Some(a) = row.coefficient(v) else {
                continue;
            };
            let mut rest = Rational::zero();
            for (u, c) in &row.coefficients {
                if u != v {
                    rest += c * values.get(u).cloned().unwrap_or_else(Rational::zero);
                }
            }
            let limit = (&row.bound - rest) / a;
            if a > &Rational::zero() {
                upper = Some(match upper {
                    Some(current) => min_bound(current, (limit, row.strict)),
                    None => (limit, row.strict),
                });
            } else {
                lower = Some(match lower {
                    Some(current) => max_bound(current, (limit, row.strict)),
                    None => (limit, row.strict),
                });
            }
        }

        values.insert(v.clone(), choose(lower, upper));
    }

    values
}

fn min_bound(a: Bound, b: Bound) -> Bound {
    if b.0 < a.0 || (b.0 == a.0 && b.1) {
        b
    } else {
        a
    }
}

fn max_bound(a: Bound, b: Bound) -> Bound {
    if b.0 > a.0 || (b.0 == a.0 && b.1) {
        b
    } else {
        a
    }
}

/// Pick a value in the interval: zero if allowed, else a closed end, else the
/// midpoint, else one step past an open end
fn choose(lower: Option<Bound>, upper: Option<Bound>) -> Rational {
    let zero = Rational::zero();
    let above_lower = |x: &Rational| {
        lower
            .as_ref()
            .map_or(true, |(l, strict)| if *strict { x > l } else { x >= l })
    };
    let below_upper = |x: &Rational| {
        upper
            .as_ref()
            .map_or(true, |(u, strict)| if *strict { x < u } else { x <= u })
    };
    if above_lower(&zero) && below_upper(&zero) {
        return zero;
    }

    match (&lower, &upper) {
        (Some((l, false)), _) => l.clone(),
        (_, Some((u, false))) => u.clone(),
        (Some((l, true)), Some((u, true))) => (l + u) / rational(2),
        (Some((l, true)), None) => l + Rational::one(),
        (None, Some((u, true))) => u - Rational::one(),
        (None, None) => zero,
    }
}

fn proof_from_origin(
    constraints: &[&Constraint],
    origin: &BTreeMap<usize, Rational>,
) -> InfeasibilityProof {
    let coefficients = constraints
        .iter()
        .enumerate()
        .map(|(i, c)| {
            let m = origin.get(&i).cloned().unwrap_or_else(Rational::zero);
            ((*c).clone(), m)
        })
        .collect();
    InfeasibilityProof::new(coefficients)
}
