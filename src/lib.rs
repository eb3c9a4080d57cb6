//! # Linarith - Linear Arithmetic Proof Tactic
//!
//! A decision procedure that closes a goal when it follows from the
//! hypotheses by linear arithmetic over the rationals. It negates the goal,
//! turns every usable hypothesis into a short list of alternative linear
//! constraints, and asks a feasibility oracle whether any combination of
//! alternatives is satisfiable. If none is, the goal is proved and each case
//! comes with a certificate of infeasibility; otherwise the satisfying
//! assignment is a counterexample.
//!
//! ## Quick Start
//!
//! ```rust
//! use linarith::{parse_problem, Linarith, Tactic, Trace};
//!
//! # fn main() -> linarith::Result<()> {
//! let state = parse_problem(
//!     r#"
//!     (var x real)
//!     (hyp h1 (> x 1))
//!     (goal (> x 0))
//! "#,
//! )?;
//!
//! // No residual goals: the tactic closed it
//! let remaining = Linarith::default().activate(&state, &mut Trace::new())?;
//! assert!(remaining.is_empty());
//! # Ok(())
//! # }
//! ```
//!
//! ### Verbose derivations
//!
//! ```rust
//! use linarith::{parse_problem, Linarith, Tactic, Trace};
//!
//! # fn main() -> linarith::Result<()> {
//! let state = parse_problem("(var x real) (goal (!= x 1))")?;
//!
//! let mut trace = Trace::new();
//! let remaining = Linarith::verbose().activate(&state, &mut trace)?;
//!
//! // x = 1 is feasible, so the goal stays open
//! assert_eq!(remaining.len(), 1);
//! assert!(trace.to_string().contains("x = 1"));
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ProofState → Normalizer → option lists → Scenario Enumerator → Oracle → Verdict
//! ```
//!
//! - [`normalize`] - hypotheses to alternative constraints (integrality gap,
//!   disequality split, non-real and non-linear hypotheses dropped)
//! - [`scenario`] - lazy Cartesian product with set semantics
//! - [`oracle`] - feasibility with witnesses or Farkas certificates
//! - [`tactic`] - the [`Linarith`] tactic, [`Verdict`] and the [`Trace`] sink
//! - [`parser`] - the S-expression problem language
//!
//! ## Error Handling
//!
//! All fallible operations return [`Result<T>`]. Hypotheses that cannot be
//! linearized are dropped rather than reported; oracle failures abort the
//! tactic with [`Error::OracleFailure`].

/// Version of the linarith crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod constraint;
pub mod error;
pub mod hypothesis;
pub mod lexer;
pub mod normalize;
pub mod oracle;
pub mod parser;
pub mod proof_state;
pub mod scenario;
pub mod tactic;
pub mod term;

// Re-export main types
pub use constraint::{Constraint, Relation, Scenario};
pub use error::{Error, ErrorSeverity, Result};
pub use hypothesis::Prop;
pub use lexer::{SExprScanner, Token, TokenKind};
pub use oracle::{Certificate, FeasibilityOracle, FourierMotzkin, InfeasibilityProof, Witness};
pub use parser::{parse_problem, SExprParser};
pub use proof_state::{Hypothesis, ProofState};
pub use scenario::ScenarioEnumerator;
pub use tactic::{Linarith, LinarithConfig, Tactic, TacticRegistry, Trace, TraceEvent, Verdict};
pub use term::{LinearForm, Linearize, Rational, Sign, Sort, Term, Variable};

/// Type alias for the S-expression scanner (lexer).
pub type Scanner = SExprScanner;

/// Type alias for the S-expression parser.
pub type Parser = SExprParser;
