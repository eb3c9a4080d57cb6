use crate::constraint::Constraint;
use crate::oracle::Witness;
use crate::term::Rational;
use std::fmt;

/// One step of a reported derivation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TraceEvent {
    /// A scenario's constraints, as sent to the oracle
    Checking {
        /// Position of the scenario in enumeration order
        index: usize,
        /// Its constraints
        constraints: Vec<Constraint>,
    },
    /// The oracle's satisfying assignment
    FeasibleWith(Witness),
    /// The assignment re-checked, so the goal is false under the hypotheses
    Counterexample,
    /// Infeasibility multipliers, zero entries removed
    InfeasibleBy(Vec<(Constraint, Rational)>),
    /// Every scenario was vacuous
    Tautology,
    /// Goal closed (non-verbose summary)
    Solved,
    /// Goal left open
    Unproved,
}

impl fmt::Display for TraceEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TraceEvent::Checking { constraints, .. } => {
                write!(f, "Checking feasibility of the following inequalities:")?;
                for c in constraints {
                    write!(f, "\n{}", c)?;
                }
                Ok(())
            }
            TraceEvent::FeasibleWith(witness) => {
                write!(f, "Feasible with the following values:")?;
                for (v, value) in witness.values() {
                    write!(f, "\n{} = {}", v, value)?;
                }
                Ok(())
            }
            TraceEvent::Counterexample => {
                write!(f, "The counterexample proves the goal to be false.")
            }
            TraceEvent::InfeasibleBy(terms) => {
                write!(f, "Infeasible by summing the following:")?;
                for (c, m) in terms {
                    write!(f, "\n{} multiplied by {}", c, m)?;
                }
                Ok(())
            }
            TraceEvent::Tautology => {
                write!(f, "Conclusion followed tautologically from hypotheses.")
            }
            TraceEvent::Solved => write!(f, "Goal solved by linear arithmetic!"),
            TraceEvent::Unproved => write!(f, "Linear arithmetic was unable to prove goal."),
        }
    }
}

/// Append-only log of a tactic run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Trace {
    events: Vec<TraceEvent>,
}

impl Trace {
    /// Empty trace
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an event
    pub fn push(&mut self, event: TraceEvent) {
        self.events.push(event);
    }

    /// Events in order
    pub fn events(&self) -> &[TraceEvent] {
        &self.events
    }

    /// No events recorded
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl fmt::Display for Trace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for event in &self.events {
            writeln!(f, "{}", event)?;
        }
        Ok(())
    }
}
