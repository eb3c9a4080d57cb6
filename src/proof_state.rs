//! Proof state handed to a tactic: declared variables, hypotheses and a goal

use crate::error::{Error, Result};
use crate::hypothesis::Prop;
use crate::term::Variable;
use std::collections::BTreeMap;
use std::fmt;

/// A named hypothesis
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hypothesis {
    /// Name the hypothesis is referred to by
    pub name: String,
    /// The proposition assumed
    pub prop: Prop,
}

/// Variables, hypotheses and the goal of one proof obligation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProofState {
    variables: BTreeMap<String, Variable>,
    hypotheses: Vec<Hypothesis>,
    goal: Prop,
}

impl ProofState {
    /// A state with no variables or hypotheses
    pub fn new(goal: Prop) -> Self {
        ProofState {
            variables: BTreeMap::new(),
            hypotheses: Vec::new(),
            goal,
        }
    }

    /// Declare a variable; names must be unique
    pub fn declare(&mut self, variable: Variable) -> Result<()> {
        if self.variables.contains_key(&variable.name) {
            return Err(Error::DuplicateVariable {
                name: variable.name,
            });
        }
        self.variables.insert(variable.name.clone(), variable);
        Ok(())
    }

    /// Add a hypothesis; an empty name is replaced by `h<k>`
    pub fn assume(&mut self, name: impl Into<String>, prop: Prop) {
        let mut name = name.into();
        if name.is_empty() {
            name = format!("h{}", self.hypotheses.len() + 1);
        }
        self.hypotheses.push(Hypothesis { name, prop });
    }

    /// Replace the goal
    pub fn set_goal(&mut self, goal: Prop) {
        self.goal = goal;
    }

    /// Look up a declared variable
    pub fn variable(&self, name: &str) -> Option<&Variable> {
        self.variables.get(name)
    }

    /// Declared variables in name order
    pub fn variables(&self) -> impl Iterator<Item = &Variable> {
        self.variables.values()
    }

    /// Hypotheses in the order they were assumed
    pub fn hypotheses(&self) -> &[Hypothesis] {
        &self.hypotheses
    }

    /// Current goal
    pub fn goal(&self) -> &Prop {
        &self.goal
    }

    /// Negation of the goal
    pub fn negated_goal(&self) -> Prop {
        self.goal.negate()
    }

    /// Typed facts about declared variables followed by the hypotheses
    ///
    /// With `reals_only`, typed facts about non-real variables are left out.
    /// Relational hypotheses are always returned; deciding whether one is
    /// usable is the normalizer's job.
    pub fn list_hypotheses(&self, reals_only: bool) -> Vec<Prop> {
        self.variables
            .values()
            .filter(|v| !reals_only || v.is_real())
            .map(|v| Prop::Type(v.clone()))
            .chain(self.hypotheses.iter().map(|h| h.prop.clone()))
            .collect()
    }
}

impl fmt::Display for ProofState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for v in self.variables.values() {
            writeln!(f, "{}", Prop::Type(v.clone()))?;
        }
        for h in &self.hypotheses {
            writeln!(f, "{}: {}", h.name, h.prop)?;
        }
        write!(f, "|- {}", self.goal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::term::Term;

    #[test]
    fn test_declare_twice() {
        let mut state = ProofState::new(Prop::Bool(false));
        state.declare(Variable::real("x")).unwrap();
        assert_eq!(
            state.declare(Variable::integer("x")),
            Err(Error::DuplicateVariable { name: "x".into() })
        );
    }

    #[test]
    fn test_list_hypotheses_order() {
        let x = Variable::real("x");
        let v = Variable::vector("v");
        let mut state = ProofState::new(Prop::Gt(Term::var(&x), Term::int(0)));
        state.declare(x.clone()).unwrap();
        state.declare(v.clone()).unwrap();
        state.assume("h", Prop::Geq(Term::var(&x), Term::int(0)));

        let all = state.list_hypotheses(false);
        assert_eq!(all.len(), 3);
        assert_eq!(all[0], Prop::Type(v.clone()));
        assert_eq!(all[1], Prop::Type(x.clone()));

        let reals = state.list_hypotheses(true);
        assert_eq!(reals, vec![Prop::Type(x.clone()), Prop::Geq(Term::var(&x), Term::int(0))]);
        assert_eq!(state.negated_goal(), Prop::Leq(Term::var(&x), Term::int(0)));
    }

    #[test]
    fn test_auto_names() {
        let mut state = ProofState::new(Prop::Bool(false));
        state.assume("", Prop::Bool(true));
        state.assume("named", Prop::Bool(true));
        state.assume("", Prop::Bool(true));
        let names: Vec<_> = state.hypotheses().iter().map(|h| h.name.as_str()).collect();
        assert_eq!(names, vec!["h1", "named", "h3"]);
    }
}
