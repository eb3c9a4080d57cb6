//! # Feasibility Oracle
//!
//! The tactic asks one question per scenario: is this conjunction of linear
//! constraints satisfiable over the rationals? The [`FeasibilityOracle`]
//! answers with a [`Certificate`]:
//!
//! - a [`Witness`] assignment when the scenario is feasible, or
//! - an [`InfeasibilityProof`]: non-negative multipliers whose weighted sum of
//!   the scenario's constraints is a statically false constraint.
//!
//! [`consult`] is the adapter the tactic goes through; it additionally
//! re-checks witnesses, which only affects how a refutation is reported.
//!
//! A reference oracle based on Fourier–Motzkin elimination lives in
//! [`fourier_motzkin`].

pub mod fourier_motzkin;

pub use fourier_motzkin::FourierMotzkin;

use crate::constraint::{CanonicalKind, Constraint, Relation, Scenario};
use crate::error::Result;
use crate::term::{Rational, Variable};
use num_traits::Zero;
use std::collections::BTreeMap;
use std::fmt;
use tracing::{trace, warn};

/// Assignment of rational values to variables
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Witness {
    values: BTreeMap<Variable, Rational>,
}

impl Witness {
    /// Wrap an assignment
    pub fn new(values: BTreeMap<Variable, Rational>) -> Self {
        Witness { values }
    }

    /// Value of one variable
    pub fn get(&self, v: &Variable) -> Option<&Rational> {
        self.values.get(v)
    }

    /// All assigned values in variable order
    pub fn values(&self) -> &BTreeMap<Variable, Rational> {
        &self.values
    }

    /// Every constraint of the scenario holds under this assignment
    pub fn satisfies(&self, scenario: &Scenario) -> bool {
        scenario.iter().all(|c| c.is_satisfied_by(&self.values))
    }
}

impl fmt::Display for Witness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (v, value)) in self.values.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{} = {}", v, value)?;
        }
        Ok(())
    }
}

/// Multipliers over a scenario's constraints witnessing infeasibility
///
/// Inequalities carry non-negative multipliers. Equalities are two-sided, so
/// their multiplier may have either sign. A zero multiplier marks a
/// constraint not used by the combination.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InfeasibilityProof {
    coefficients: BTreeMap<Constraint, Rational>,
}

impl InfeasibilityProof {
    /// Wrap a multiplier map
    pub fn new(coefficients: BTreeMap<Constraint, Rational>) -> Self {
        InfeasibilityProof { coefficients }
    }

    /// Every entry, including zero multipliers
    pub fn coefficients(&self) -> &BTreeMap<Constraint, Rational> {
        &self.coefficients
    }

    /// Entries with a nonzero multiplier
    pub fn used(&self) -> impl Iterator<Item = (&Constraint, &Rational)> {
        self.coefficients.iter().filter(|(_, m)| !m.is_zero())
    }

    /// The weighted sum of the constraints, or `None` when an inequality has a
    /// negative multiplier
    pub fn combination(&self) -> Option<Constraint> {
        let mut coefficients: BTreeMap<Variable, Rational> = BTreeMap::new();
        let mut bound = Rational::zero();
        let mut kind = CanonicalKind::Equal;

        for (constraint, multiplier) in self.used() {
            let canonical = constraint.canonical();
            if canonical.kind != CanonicalKind::Equal && multiplier < &Rational::zero() {
                return None;
            }
            for (v, a) in &canonical.coefficients {
                *coefficients.entry(v.clone()).or_insert_with(Rational::zero) += a * multiplier;
            }
            bound += &canonical.bound * multiplier;
            kind = match (kind, canonical.kind) {
                (CanonicalKind::Strict, _) | (_, CanonicalKind::Strict) => CanonicalKind::Strict,
                (CanonicalKind::NonStrict, _) | (_, CanonicalKind::NonStrict) => {
                    CanonicalKind::NonStrict
                }
                _ => CanonicalKind::Equal,
            };
        }

        let relation = match kind {
            CanonicalKind::Equal => Relation::Eq,
            CanonicalKind::NonStrict => Relation::Leq,
            CanonicalKind::Strict => Relation::Lt,
        };
        Some(Constraint::new(coefficients, relation, bound))
    }

    /// The combination exists and is statically false
    pub fn is_valid(&self) -> bool {
        self.combination()
            .is_some_and(|c| c.is_statically_false())
    }
}

/// What the oracle says about one scenario
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Certificate {
    /// Satisfiable, with a satisfying assignment
    Feasible(Witness),
    /// Unsatisfiable, with a Farkas-style combination
    Infeasible(InfeasibilityProof),
}

/// Decision procedure for finite conjunctions of linear constraints
pub trait FeasibilityOracle {
    /// Decide the scenario
    ///
    /// Must terminate with one of the two certificates; failures are fatal
    /// to the caller.
    fn feasibility(&self, scenario: &Scenario) -> Result<Certificate>;

    /// Independent check that a witness really satisfies the scenario
    fn is_valid_counterexample(&self, scenario: &Scenario, witness: &Witness) -> bool {
        witness.satisfies(scenario)
    }
}

impl<O: FeasibilityOracle + ?Sized> FeasibilityOracle for &O {
    fn feasibility(&self, scenario: &Scenario) -> Result<Certificate> {
        (**self).feasibility(scenario)
    }

    fn is_valid_counterexample(&self, scenario: &Scenario, witness: &Witness) -> bool {
        (**self).is_valid_counterexample(scenario, witness)
    }
}

/// Outcome of consulting the oracle on one scenario
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScenarioOutcome {
    /// Feasible; `verified` tells whether the witness re-checked
    Feasible {
        /// Oracle-supplied assignment
        witness: Witness,
        /// Witness passed `is_valid_counterexample`
        verified: bool,
    },
    /// Infeasible, with the oracle's proof
    Infeasible(InfeasibilityProof),
}

/// Query the oracle about a scenario and interpret the answer
pub fn consult<O: FeasibilityOracle + ?Sized>(
    oracle: &O,
    scenario: &Scenario,
) -> Result<ScenarioOutcome> {
    trace!(%scenario, "querying feasibility oracle");
    match oracle.feasibility(scenario)? {
        Certificate::Feasible(witness) => {
            let verified = oracle.is_valid_counterexample(scenario, &witness);
            if !verified {
                warn!(%scenario, %witness, "oracle witness does not satisfy the scenario");
            }
            Ok(ScenarioOutcome::Feasible { witness, verified })
        }
        Certificate::Infeasible(proof) => Ok(ScenarioOutcome::Infeasible(proof)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::term::rational;

    fn x() -> Variable {
        Variable::real("x")
    }

    fn c(relation: Relation, constant: i64) -> Constraint {
        Constraint::single(&x(), rational(1), relation, rational(constant))
    }

    #[test]
    fn test_combination_of_bounds() {
        // x > 0 and x < 0: 1*(x < 0) + 1*(-x < 0) => 0 < 0
        let mut m = BTreeMap::new();
        m.insert(c(Relation::Gt, 0), rational(1));
        m.insert(c(Relation::Lt, 0), rational(1));
        let proof = InfeasibilityProof::new(m);
        assert_eq!(proof.combination(), Some(Constraint::falsum()));
        assert!(proof.is_valid());
    }

    #[test]
    fn test_equality_may_be_negated() {
        // x = 1 and x < 1: (x < 1) - (x = 1) => 0 < 0
        let mut m = BTreeMap::new();
        m.insert(c(Relation::Eq, 1), rational(-1));
        m.insert(c(Relation::Lt, 1), rational(1));
        m.insert(c(Relation::Gt, 0), rational(0));
        let proof = InfeasibilityProof::new(m);
        assert!(proof.is_valid());
        assert_eq!(proof.used().count(), 2);
    }

    #[test]
    fn test_negative_inequality_multiplier_rejected() {
        let mut m = BTreeMap::new();
        m.insert(c(Relation::Lt, 1), rational(-1));
        let proof = InfeasibilityProof::new(m);
        assert_eq!(proof.combination(), None);
        assert!(!proof.is_valid());
    }

    #[test]
    fn test_empty_proof_is_not_valid() {
        assert!(!InfeasibilityProof::default().is_valid());
    }

    struct Lying;

    impl FeasibilityOracle for Lying {
        fn feasibility(&self, _scenario: &Scenario) -> Result<Certificate> {
            let mut values = BTreeMap::new();
            values.insert(x(), rational(5));
            Ok(Certificate::Feasible(Witness::new(values)))
        }
    }

    struct Broken;

    impl FeasibilityOracle for Broken {
        fn feasibility(&self, _scenario: &Scenario) -> Result<Certificate> {
            Err(Error::oracle("numeric overflow"))
        }
    }

    #[test]
    fn test_consult_marks_unverified_witness() {
        let scenario: Scenario = vec![c(Relation::Lt, 1)].into_iter().collect();
        match consult(&Lying, &scenario).unwrap() {
            ScenarioOutcome::Feasible { verified, .. } => assert!(!verified),
            other => panic!("expected feasible, got {:?}", other),
        }
    }

    #[test]
    fn test_consult_propagates_failure() {
        let scenario = Scenario::new();
        assert!(matches!(
            consult(&Broken, &scenario),
            Err(Error::OracleFailure { .. })
        ));
    }
}
