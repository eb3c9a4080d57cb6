//! Problem parser
//!
//! Parses LISP-style S-expressions into trees, then reads the `var`, `hyp`
//! and `goal` forms into a [`ProofState`](crate::proof_state::ProofState).

mod ast;
mod problem;
mod sexpr_parser;

pub use ast::{SExpr, SExprKind};
pub use problem::ProblemBuilder;
pub use sexpr_parser::SExprParser;

use crate::error::Result;
use crate::lexer::SExprScanner;
use crate::proof_state::ProofState;

/// Scan, parse and interpret a problem file
pub fn parse_problem(source: &str) -> Result<ProofState> {
    let tokens = SExprScanner::new(source).scan_tokens()?;
    let forms = SExprParser::new(tokens).parse()?;
    ProblemBuilder::new().build(&forms)
}
