//! End-to-end scenarios for the linear arithmetic tactic
//!
//! Each test states a proof state in the problem language, runs the tactic,
//! and checks the verdict together with its certificates.

use linarith::normalize::option_lists;
use linarith::oracle::{consult, ScenarioOutcome};
use linarith::scenario::enumerate;
use linarith::{
    parse_problem, Certificate, FeasibilityOracle, FourierMotzkin, Linarith, LinarithConfig,
    ProofState, Result, Scenario, Tactic, Trace, TraceEvent, Verdict,
};
use std::cell::RefCell;

fn decide(source: &str) -> Verdict {
    let state = parse_problem(source).expect("problem should parse");
    Linarith::default().decide(&state).expect("oracle should not fail")
}

fn assert_sound(verdict: &Verdict) {
    match verdict {
        Verdict::Proved { cases } => {
            for case in cases {
                assert!(
                    case.proof.is_valid(),
                    "certificate for scenario {} does not sum to a contradiction",
                    case.scenario
                );
                assert!(case.proof.used().all(|(c, _)| case.scenario.contains(c)));
            }
        }
        Verdict::Refuted {
            scenario,
            witness,
            verified,
            ..
        } => {
            assert!(*verified);
            assert!(witness.satisfies(scenario));
        }
    }
}

/// Records every scenario it is asked about
#[derive(Default)]
struct Recording {
    seen: RefCell<Vec<Scenario>>,
}

impl FeasibilityOracle for Recording {
    fn feasibility(&self, scenario: &Scenario) -> Result<Certificate> {
        self.seen.borrow_mut().push(scenario.clone());
        FourierMotzkin::new().feasibility(scenario)
    }
}

// =============================================================================
// ACCEPTANCE SCENARIOS
// =============================================================================

#[test]
fn test_open_interval_excludes_endpoint() {
    let verdict = decide(
        r#"
        (var x real)
        (hyp (> x 0))
        (hyp (< x 1))
        (goal (!= x 1))
    "#,
    );

    match &verdict {
        Verdict::Proved { cases } => {
            assert_eq!(cases.len(), 1);
            assert_eq!(cases[0].scenario.len(), 3);
        }
        other => panic!("expected Proved, got {:?}", other),
    }
    assert_sound(&verdict);
}

#[test]
fn test_nonnegative_is_not_positive() {
    let verdict = decide(
        r#"
        (var x real)
        (hyp (>= x 0))
        (goal (> x 0))
    "#,
    );

    match &verdict {
        Verdict::Refuted { index, witness, .. } => {
            assert_eq!(*index, 0);
            let (_, value) = witness.values().iter().next().expect("x has a value");
            assert_eq!(*value, linarith::term::rational(0));
        }
        other => panic!("expected Refuted, got {:?}", other),
    }
    assert_sound(&verdict);
}

#[test]
fn test_disequality_alone_gives_two_consistent_scenarios() {
    let state = parse_problem(
        r#"
        (var x real)
        (var y real)
        (hyp (!= x y))
    "#,
    )
    .unwrap();

    let mut hypotheses = state.list_hypotheses(true);
    hypotheses.push(state.negated_goal());
    let scenarios = enumerate(option_lists(&hypotheses));
    assert_eq!(scenarios.len(), 2);

    for scenario in &scenarios {
        assert_eq!(scenario.len(), 1);
        match consult(&FourierMotzkin::new(), scenario).unwrap() {
            ScenarioOutcome::Feasible { verified, .. } => assert!(verified),
            other => panic!("expected {} to be feasible, got {:?}", scenario, other),
        }
    }
    assert!(!decide("(var x real) (var y real) (hyp (!= x y))").is_proved());
}

#[test]
fn test_positive_integer_is_at_least_one() {
    let verdict = decide(
        r#"
        (var n integer positive)
        (goal (>= n 1))
    "#,
    );
    assert!(verdict.is_proved());
    assert_sound(&verdict);

    // Without integrality, a positive real may sit below one
    let verdict = decide(
        r#"
        (var r real positive)
        (goal (>= r 1))
    "#,
    );
    assert!(!verdict.is_proved());
    assert_sound(&verdict);
}

#[test]
fn test_vector_hypothesis_is_ignored() {
    let with_vectors = r#"
        (var x real)
        (var v vector)
        (var w vector)
        (hyp (= v w))
        (hyp (> x 2))
        (goal (> x 1))
    "#;
    let without_vectors = r#"
        (var x real)
        (hyp (> x 2))
        (goal (> x 1))
    "#;

    let a = decide(with_vectors);
    let b = decide(without_vectors);
    assert!(a.is_proved());
    assert_eq!(a, b);
}

// =============================================================================
// ENUMERATION AND REPORTING
// =============================================================================

#[test]
fn test_scenarios_are_queried_in_order_and_stop_early() {
    let state = parse_problem(
        r#"
        (var x real)
        (var y real)
        (hyp (!= x 0))
        (hyp (!= y 0))
        (goal false)
    "#,
    )
    .unwrap();

    let tactic = Linarith::with_oracle(LinarithConfig::default(), Recording::default());
    let verdict = tactic.decide(&state).unwrap();
    assert!(!verdict.is_proved());
    // {x < 0, y < 0} is feasible, nothing after it is asked
    assert_eq!(tactic.oracle().seen.borrow().len(), 1);
}

#[test]
fn test_every_case_of_a_proof_is_reported() {
    let state = parse_problem(
        r#"
        (var x real)
        (hyp (!= x 0))
        (hyp (>= x 0))
        (hyp (<= x 0))
    "#,
    )
    .unwrap();

    let mut trace = Trace::new();
    let remaining = Linarith::verbose()
        .activate(&state, &mut trace)
        .unwrap();
    assert!(remaining.is_empty());

    let checks = trace
        .events()
        .iter()
        .filter(|e| matches!(e, TraceEvent::Checking { .. }))
        .count();
    assert_eq!(checks, 2);
    let text = trace.to_string();
    assert!(text.contains("Infeasible by summing the following:"));
    assert!(text.contains("multiplied by"));
    assert!(!text.contains("multiplied by 0\n"));
}

#[test]
fn test_refutation_trace_and_residual_state() {
    let state = parse_problem("(var x real) (hyp (>= x 0)) (goal (> x 0))").unwrap();

    let mut trace = Trace::new();
    let remaining = Linarith::verbose()
        .activate(&state, &mut trace)
        .unwrap();
    assert_eq!(remaining, vec![state]);

    let text = trace.to_string();
    assert!(text.starts_with("Checking feasibility of the following inequalities:"));
    assert!(text.contains("Feasible with the following values:\nx = 0\n"));
    assert!(text.ends_with("The counterexample proves the goal to be false.\n"));

    let mut quiet = Trace::new();
    Linarith::default()
        .activate(&parse_problem("(var x real) (goal (> x 0))").unwrap(), &mut quiet)
        .unwrap();
    assert_eq!(quiet.to_string(), "Linear arithmetic was unable to prove goal.\n");
}

#[test]
fn test_contradictory_hypotheses_prove_anything() {
    let verdict = decide(
        r#"
        (var x real)
        (hyp (< x 0))
        (hyp (> x 0))
    "#,
    );
    assert!(verdict.is_proved());
    assert_sound(&verdict);
}

#[test]
fn test_nonlinear_hypothesis_is_dropped() {
    let state = parse_problem(
        r#"
        (var x real)
        (var y real)
        (hyp (> (* x y) 0))
        (hyp (> x 3))
        (goal (> (* 2 x) 5))
    "#,
    )
    .unwrap();
    assert!(Linarith::default()
        .activate(&state, &mut Trace::new())
        .unwrap().is_empty());
}

#[test]
fn test_activate_does_not_touch_input() {
    let state: ProofState = parse_problem("(var x real) (goal (< x x))").unwrap();
    let before = state.clone();
    let remaining = Linarith::default()
        .activate(&state, &mut Trace::new())
        .unwrap();
    assert_eq!(state, before);
    assert_eq!(remaining, vec![before]);
}
