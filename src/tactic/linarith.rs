//! # Linear arithmetic
//!
//! Proves a goal by refuting its negation. The real-valued hypotheses and the
//! negated goal are normalized into option lists of linear constraints, the
//! scenario space is walked in order, and each scenario goes to the
//! feasibility oracle. The first feasible scenario ends the search with a
//! refutation; if every scenario is infeasible the goal is closed.

use super::trace::{Trace, TraceEvent};
use super::Tactic;
use crate::constraint::Scenario;
use crate::error::{Error, Result};
use crate::normalize;
use crate::oracle::{
    consult, FeasibilityOracle, FourierMotzkin, InfeasibilityProof, ScenarioOutcome, Witness,
};
use crate::proof_state::ProofState;
use crate::scenario::{IndexedScenario, ScenarioEnumerator};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info};

/// Configuration accepted by [`Linarith`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LinarithConfig {
    /// Report every scenario checked and the certificate found for it
    pub verbose: bool,
}

impl LinarithConfig {
    /// Parse a JSON object such as `{"verbose": true}`
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| Error::InvalidConfig(e.to_string()))
    }
}

/// An infeasible scenario and the proof of its infeasibility
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvedCase {
    /// Position in enumeration order
    pub index: usize,
    /// The scenario
    pub scenario: Scenario,
    /// Oracle certificate
    pub proof: InfeasibilityProof,
}

/// Result of deciding a proof state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// Some scenario is feasible, so the goal is not established
    Refuted {
        /// Position of the feasible scenario
        index: usize,
        /// The feasible scenario
        scenario: Scenario,
        /// Oracle assignment
        witness: Witness,
        /// The assignment re-checked against the scenario
        verified: bool,
    },
    /// Every scenario is infeasible
    Proved {
        /// One entry per scenario, in enumeration order
        cases: Vec<ProvedCase>,
    },
}

impl Verdict {
    /// The goal was closed
    pub fn is_proved(&self) -> bool {
        matches!(self, Verdict::Proved { .. })
    }
}

/// The linear arithmetic tactic
#[derive(Debug, Clone)]
pub struct Linarith<O = FourierMotzkin> {
    config: LinarithConfig,
    oracle: O,
}

impl Linarith<FourierMotzkin> {
    /// Tactic backed by the built-in oracle
    pub fn new(config: LinarithConfig) -> Self {
        Linarith {
            config,
            oracle: FourierMotzkin::new(),
        }
    }

    /// Built-in oracle, verbose reporting
    pub fn verbose() -> Self {
        Self::new(LinarithConfig { verbose: true })
    }
}

impl Default for Linarith<FourierMotzkin> {
    fn default() -> Self {
        Self::new(LinarithConfig::default())
    }
}

impl<O: FeasibilityOracle> Linarith<O> {
    /// Tactic backed by a caller-supplied oracle
    pub fn with_oracle(config: LinarithConfig, oracle: O) -> Self {
        Linarith { config, oracle }
    }

    /// The oracle in use
    pub fn oracle(&self) -> &O {
        &self.oracle
    }

    /// Walk the scenario space of `state` and decide it
    ///
    /// Stops at the first feasible scenario. Oracle failures abort the whole
    /// run.
    pub fn decide(&self, state: &ProofState) -> Result<Verdict> {
        let mut hypotheses = state.list_hypotheses(true);
        hypotheses.push(state.negated_goal());

        let lists = normalize::option_lists(&hypotheses);
        let mut scenarios = ScenarioEnumerator::new(lists);
        debug!(
            hypotheses = hypotheses.len(),
            space = scenarios.space_size(),
            "enumerating scenarios"
        );

        let mut cases = Vec::new();
        while let Some(IndexedScenario { index, scenario }) = scenarios.next() {
            match consult(&self.oracle, &scenario)? {
                ScenarioOutcome::Feasible { witness, verified } => {
                    debug!(index, stats = ?scenarios.stats(), "feasible scenario");
                    return Ok(Verdict::Refuted {
                        index,
                        scenario,
                        witness,
                        verified,
                    });
                }
                ScenarioOutcome::Infeasible(proof) => {
                    cases.push(ProvedCase {
                        index,
                        scenario,
                        proof,
                    });
                }
            }
        }

        debug!(cases = cases.len(), stats = ?scenarios.stats(), "all scenarios infeasible");
        Ok(Verdict::Proved { cases })
    }

    /// Append the report for `verdict` to `trace`
    pub fn report(&self, verdict: &Verdict, trace: &mut Trace) {
        match verdict {
            Verdict::Refuted {
                index,
                scenario,
                witness,
                verified,
            } => {
                if !self.config.verbose {
                    trace.push(TraceEvent::Unproved);
                    return;
                }
                trace.push(TraceEvent::Checking {
                    index: *index,
                    constraints: scenario.iter().cloned().collect(),
                });
                if *verified {
                    trace.push(TraceEvent::FeasibleWith(witness.clone()));
                    trace.push(TraceEvent::Counterexample);
                } else {
                    trace.push(TraceEvent::Unproved);
                }
            }
            Verdict::Proved { cases } => {
                if !self.config.verbose {
                    trace.push(TraceEvent::Solved);
                    return;
                }
                if cases.is_empty() {
                    trace.push(TraceEvent::Tautology);
                }
                for case in cases {
                    trace.push(TraceEvent::Checking {
                        index: case.index,
                        constraints: case.scenario.iter().cloned().collect(),
                    });
                    trace.push(TraceEvent::InfeasibleBy(
                        case.proof
                            .used()
                            .map(|(c, m)| (c.clone(), m.clone()))
                            .collect(),
                    ));
                }
            }
        }
    }
}

impl<O: FeasibilityOracle + Send + Sync> Tactic for Linarith<O> {
    fn name(&self) -> &str {
        "linarith"
    }

    fn label(&self) -> &str {
        "Linear arithmetic"
    }

    fn description(&self) -> &str {
        "A tactic to try to establish a goal via linear arithmetic.  Inspired by the linarith tactic in Lean."
    }

    fn arguments(&self) -> &[&str] {
        &["verbose"]
    }

    fn activate(&self, state: &ProofState, trace: &mut Trace) -> Result<Vec<ProofState>> {
        let verdict = self.decide(state)?;
        self.report(&verdict, trace);
        match verdict {
            Verdict::Proved { cases } => {
                info!(cases = cases.len(), "goal solved by linear arithmetic");
                Ok(Vec::new())
            }
            Verdict::Refuted { index, verified, .. } => {
                info!(index, verified, "linear arithmetic was unable to prove goal");
                Ok(vec![state.clone()])
            }
        }
    }
}

impl<O> fmt::Display for Linarith<O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "linarith")
    }
}
