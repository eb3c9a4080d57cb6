//! # Hypothesis Normalization
//!
//! Turns one hypothesis into its option list: the alternative constraints it
//! may stand for. Ordinary facts give one option, a disequality gives two
//! (`L < R` or `L > R`), and anything the tactic cannot read gives none.
//!
//! | Hypothesis            | Options                 |
//! |-----------------------|-------------------------|
//! | `n : integer positive`| `n >= 1`                |
//! | `x : real positive`   | `x > 0`                 |
//! | `x : nonnegative`     | `x >= 0`                |
//! | `L rel R`             | `L - R rel 0`           |
//! | `L != R`              | `L - R < 0`, `L - R > 0`|
//! | `false`               | `0 < 0`                 |
//! | mentions a vector     | (none)                  |

use crate::constraint::{Constraint, Relation};
use crate::hypothesis::Prop;
use crate::term::{rational, Linearize, Term, Variable};
use tracing::debug;

/// Option list for one hypothesis
pub fn options(hypothesis: &Prop) -> Vec<Constraint> {
    match hypothesis {
        Prop::Type(v) => positivity(v).into_iter().collect(),
        Prop::Eq(l, r) => relational(l, r, Relation::Eq).into_iter().collect(),
        Prop::Leq(l, r) => relational(l, r, Relation::Leq).into_iter().collect(),
        Prop::Lt(l, r) => relational(l, r, Relation::Lt).into_iter().collect(),
        Prop::Geq(l, r) => relational(l, r, Relation::Geq).into_iter().collect(),
        Prop::Gt(l, r) => relational(l, r, Relation::Gt).into_iter().collect(),
        Prop::Ne(l, r) => {
            match (
                relational(l, r, Relation::Lt),
                relational(l, r, Relation::Gt),
            ) {
                (Some(below), Some(above)) => vec![below, above],
                _ => Vec::new(),
            }
        }
        Prop::Bool(false) => vec![Constraint::falsum()],
        Prop::Bool(true) => Vec::new(),
        Prop::Opaque(text) => {
            debug!(hypothesis = %text, "ignoring unrecognized hypothesis");
            Vec::new()
        }
    }
}

/// Option lists for every hypothesis that contributes at least one option
pub fn option_lists<'a>(hypotheses: impl IntoIterator<Item = &'a Prop>) -> Vec<Vec<Constraint>> {
    hypotheses
        .into_iter()
        .map(options)
        .filter(|opts| !opts.is_empty())
        .collect()
}

fn positivity(v: &Variable) -> Option<Constraint> {
    if !v.is_real() {
        return None;
    }
    let one = rational(1);
    if v.is_positive() {
        if v.is_integer() {
            // Integers above zero are at least one
            Some(Constraint::single(v, one.clone(), Relation::Geq, one))
        } else {
            Some(Constraint::single(v, one, Relation::Gt, rational(0)))
        }
    } else if v.is_nonnegative() {
        Some(Constraint::single(v, one, Relation::Geq, rational(0)))
    } else {
        None
    }
}

fn relational(left: &Term, right: &Term, relation: Relation) -> Option<Constraint> {
    let form = match left.linear_difference(right) {
        Ok(form) => form,
        Err(err) => {
            debug!(%left, %right, error = %err, "dropping hypothesis that is not linear");
            return None;
        }
    };

    if let Some(v) = form.coefficients.keys().find(|v| !v.is_real()) {
        debug!(%left, %right, variable = %v, sort = %v.sort, "dropping hypothesis over a non-real quantity");
        return None;
    }

    Some(Constraint::from_form(form, relation))
}
