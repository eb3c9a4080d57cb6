//! Tactic framework
//!
//! A tactic takes a proof state and returns the states still left to prove:
//! an empty list closes the goal, a list holding the unchanged state means
//! the tactic did not apply.

mod linarith;
mod trace;

pub use linarith::{Linarith, LinarithConfig, ProvedCase, Verdict};
pub use trace::{Trace, TraceEvent};

use crate::error::{Error, Result};
use crate::proof_state::ProofState;
use std::collections::HashMap;
use std::sync::Arc;

/// Tactic trait - every tactic a front-end can list implements this
pub trait Tactic: Send + Sync {
    /// Short name used to invoke the tactic
    fn name(&self) -> &str;

    /// One-line label
    fn label(&self) -> &str;

    /// Tactic description
    fn description(&self) -> &str;

    /// Accepted configuration keys
    fn arguments(&self) -> &[&str] {
        &[]
    }

    /// Run the tactic, reporting into `trace` and returning the residual
    /// proof states
    fn activate(&self, state: &ProofState, trace: &mut Trace) -> Result<Vec<ProofState>>;
}

/// Tactic registry
pub struct TacticRegistry {
    tactics: HashMap<String, Arc<dyn Tactic>>,
}

impl TacticRegistry {
    /// Create a registry holding the built-in tactics
    pub fn new() -> Self {
        let mut registry = TacticRegistry::empty();
        registry.register(Linarith::default());
        registry
    }

    /// Create empty registry (for testing)
    pub fn empty() -> Self {
        TacticRegistry {
            tactics: HashMap::new(),
        }
    }

    /// Register a tactic, replacing any tactic of the same name
    pub fn register<T: Tactic + 'static>(&mut self, tactic: T) {
        let name = tactic.name().to_string();
        self.tactics.insert(name, Arc::new(tactic));
    }

    /// Get tactic by name (case-insensitive fallback)
    pub fn get(&self, name: &str) -> Result<Arc<dyn Tactic>> {
        if let Some(tactic) = self.tactics.get(name) {
            return Ok(tactic.clone());
        }

        let name_lower = name.to_lowercase();
        self.tactics
            .iter()
            .find(|(key, _)| key.to_lowercase() == name_lower)
            .map(|(_, tactic)| tactic.clone())
            .ok_or_else(|| Error::InvalidConfig(format!("Unknown tactic: {}", name)))
    }

    /// Check if tactic exists
    pub fn has(&self, name: &str) -> bool {
        self.tactics.contains_key(name)
    }

    /// List all tactic names, sorted
    pub fn list_tactics(&self) -> Vec<String> {
        let mut names: Vec<_> = self.tactics.keys().cloned().collect();
        names.sort();
        names
    }

    /// Number of registered tactics
    pub fn count(&self) -> usize {
        self.tactics.len()
    }
}

impl Default for TacticRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hypothesis::Prop;
    use crate::term::{Term, Variable};

    struct Trivial;

    impl Tactic for Trivial {
        fn name(&self) -> &str {
            "trivial"
        }

        fn label(&self) -> &str {
            "Trivial"
        }

        fn description(&self) -> &str {
            "Closes goals that are literally true"
        }

        fn activate(&self, state: &ProofState, _trace: &mut Trace) -> Result<Vec<ProofState>> {
            if *state.goal() == Prop::Bool(true) {
                Ok(Vec::new())
            } else {
                Ok(vec![state.clone()])
            }
        }
    }

    #[test]
    fn test_registry_has_linarith() {
        let registry = TacticRegistry::new();
        assert!(registry.has("linarith"));
        assert_eq!(registry.count(), 1);
        let tactic = registry.get("LINARITH").unwrap();
        assert_eq!(tactic.label(), "Linear arithmetic");
        assert_eq!(tactic.arguments(), &["verbose"]);
    }

    #[test]
    fn test_register_and_list() {
        let mut registry = TacticRegistry::empty();
        registry.register(Trivial);
        registry.register(Linarith::default());
        assert_eq!(registry.list_tactics(), vec!["linarith", "trivial"]);
        assert!(registry.get("missing").is_err());

        let trivial = registry.get("trivial").unwrap();
        assert!(trivial.arguments().is_empty());
        assert!(trivial
            .activate(&ProofState::new(Prop::Bool(true)), &mut Trace::new())
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_registry_tactic_reports_into_trace() {
        let mut registry = TacticRegistry::empty();
        registry.register(Linarith::verbose());
        let tactic = registry.get("linarith").unwrap();

        let x = Variable::real("x");
        let state = ProofState::new(Prop::Gt(Term::var(&x), Term::int(0)));
        let mut trace = Trace::new();
        let remaining = tactic.activate(&state, &mut trace).unwrap();
        assert_eq!(remaining, vec![state]);
        assert!(trace
            .to_string()
            .starts_with("Checking feasibility of the following inequalities:"));

        let mut quiet = Trace::new();
        TacticRegistry::new()
            .get("linarith")
            .unwrap()
            .activate(&ProofState::new(Prop::Bool(true)), &mut quiet)
            .unwrap();
        assert_eq!(quiet.events(), &[TraceEvent::Solved]);
    }
}
