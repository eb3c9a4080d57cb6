use super::ast::{SExpr, SExprKind};
use crate::error::{Error, Result};
use crate::hypothesis::Prop;
use crate::proof_state::ProofState;
use crate::term::{Sign, Term, Variable};

/// Builds a [`ProofState`] from top-level `var`, `hyp` and `goal` forms
///
/// Variables must be declared before a hypothesis or goal mentions them.
/// Without a `goal` form the goal is `false`.
pub struct ProblemBuilder {
    state: ProofState,
    has_goal: bool,
}

impl ProblemBuilder {
    /// Start from an empty state
    pub fn new() -> Self {
        ProblemBuilder {
            state: ProofState::new(Prop::Bool(false)),
            has_goal: false,
        }
    }

    /// Interpret every form in order
    pub fn build(mut self, forms: &[SExpr]) -> Result<ProofState> {
        for form in forms {
            self.form(form)?;
        }
        Ok(self.state)
    }

    fn form(&mut self, form: &SExpr) -> Result<()> {
        match form.as_application() {
            Some(("var", args)) => self.declare(form, args),
            Some(("hyp", [prop])) => {
                let prop = self.prop(prop)?;
                self.state.assume("", prop);
                Ok(())
            }
            Some(("hyp", [name, prop])) => {
                let name = name
                    .as_symbol()
                    .ok_or_else(|| error(name, "Hypothesis name must be a symbol"))?;
                let prop = self.prop(prop)?;
                self.state.assume(name, prop);
                Ok(())
            }
            Some(("goal", [prop])) => {
                if self.has_goal {
                    return Err(Error::DuplicateGoal);
                }
                let prop = self.prop(prop)?;
                self.state.set_goal(prop);
                self.has_goal = true;
                Ok(())
            }
            Some((head @ ("hyp" | "goal"), _)) => {
                Err(error(form, format!("Malformed `{}` form: {}", head, form)))
            }
            _ => Err(error(
                form,
                format!("Expected `(var ...)`, `(hyp ...)` or `(goal ...)`, found {}", form),
            )),
        }
    }

    fn declare(&mut self, form: &SExpr, args: &[SExpr]) -> Result<()> {
        let symbols: Option<Vec<&str>> = args.iter().map(SExpr::as_symbol).collect();
        let (name, sort, sign) = match symbols.as_deref() {
            Some([name, sort]) => (*name, *sort, Sign::Unknown),
            Some([name, sort, "positive"]) => (*name, *sort, Sign::Positive),
            Some([name, sort, "nonnegative"]) => (*name, *sort, Sign::Nonnegative),
            _ => {
                return Err(error(
                    form,
                    "Expected `(var NAME real|integer|vector [positive|nonnegative])`",
                ))
            }
        };

        let variable = match sort {
            "real" => Variable::real(name),
            "integer" => Variable::integer(name),
            "vector" => Variable::vector(name),
            other => return Err(error(&args[1], format!("Unknown sort `{}`", other))),
        };
        self.state.declare(variable.with_sign(sign))
    }

    fn prop(&self, expr: &SExpr) -> Result<Prop> {
        match &expr.kind {
            SExprKind::Symbol(s) if s == "true" => return Ok(Prop::Bool(true)),
            SExprKind::Symbol(s) if s == "false" => return Ok(Prop::Bool(false)),
            SExprKind::Symbol(s) => return Ok(Prop::Opaque(s.clone())),
            SExprKind::Number(_) => {
                return Err(error(expr, format!("Expected a proposition, found {}", expr)))
            }
            SExprKind::List(_) => {}
        }

        let (head, args) = expr
            .as_application()
            .ok_or_else(|| error(expr, format!("Expected a proposition, found {}", expr)))?;

        let relation: Option<fn(Term, Term) -> Prop> = match head {
            "=" => Some(Prop::Eq),
            "!=" => Some(Prop::Ne),
            "<" => Some(Prop::Lt),
            "<=" => Some(Prop::Leq),
            ">" => Some(Prop::Gt),
            ">=" => Some(Prop::Geq),
            _ => None,
        };

        match (relation, head, args) {
            (Some(build), _, [lhs, rhs]) => Ok(build(self.term(lhs)?, self.term(rhs)?)),
            (Some(_), _, _) => Err(error(
                expr,
                format!("`{}` takes exactly two arguments", head),
            )),
            (None, "not", [inner]) => Ok(self.prop(inner)?.negate()),
            (None, "not", _) => Err(error(expr, "`not` takes exactly one argument")),
            (None, _, _) => Ok(Prop::Opaque(expr.to_string())),
        }
    }

    fn term(&self, expr: &SExpr) -> Result<Term> {
        match &expr.kind {
            SExprKind::Number(n) => Ok(Term::Const(n.clone())),
            SExprKind::Symbol(name) => self
                .state
                .variable(name)
                .map(Term::var)
                .ok_or_else(|| Error::UnknownVariable { name: name.clone() }),
            SExprKind::List(_) => {
                let (head, args) = expr
                    .as_application()
                    .ok_or_else(|| error(expr, format!("Expected a term, found {}", expr)))?;
                let args = args
                    .iter()
                    .map(|a| self.term(a))
                    .collect::<Result<Vec<_>>>()?;

                match (head, args.as_slice()) {
                    ("+", _) => Ok(Term::Add(args)),
                    ("*", _) => Ok(Term::Mul(args)),
                    ("-", [t]) => Ok(Term::Neg(Box::new(t.clone()))),
                    ("-", [first, rest @ ..]) => {
                        let mut terms = vec![first.clone()];
                        terms.extend(rest.iter().map(|t| Term::Neg(Box::new(t.clone()))));
                        Ok(Term::Add(terms))
                    }
                    ("/", [numer, denom]) => Ok(numer.clone().div(denom.clone())),
                    ("-", []) | ("/", _) => Err(error(
                        expr,
                        format!("Wrong number of arguments to `{}`", head),
                    )),
                    _ => Err(error(expr, format!("Unknown operator `{}`", head))),
                }
            }
        }
    }
}

impl Default for ProblemBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn error(at: &SExpr, message: impl Into<String>) -> Error {
    Error::SyntaxError {
        line: at.line,
        col: at.column,
        message: message.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_problem;
    use crate::term::ratio;

    #[test]
    fn test_declarations() {
        let state = parse_problem("(var x real) (var n integer positive) (var v vector)").unwrap();
        assert!(state.variable("x").unwrap().is_real());
        assert!(state.variable("n").unwrap().is_positive());
        assert!(!state.variable("v").unwrap().is_real());
        assert_eq!(*state.goal(), Prop::Bool(false));
    }

    #[test]
    fn test_terms() {
        let state = parse_problem("(var x real) (goal (< (- (* 2 x) 1 x) (/ x 0.5)))").unwrap();
        let x = Term::var(state.variable("x").unwrap());
        let lhs = Term::Add(vec![
            Term::Mul(vec![Term::int(2), x.clone()]),
            Term::Neg(Box::new(Term::int(1))),
            Term::Neg(Box::new(x.clone())),
        ]);
        let rhs = x.div(Term::Const(ratio(1, 2)));
        assert_eq!(*state.goal(), Prop::Lt(lhs, rhs));
    }

    #[test]
    fn test_not_and_opaque() {
        let state = parse_problem("(var x real) (hyp (not (<= x 0))) (hyp (continuous f))").unwrap();
        let x = Term::var(state.variable("x").unwrap());
        assert_eq!(state.hypotheses()[0].prop, Prop::Gt(x, Term::int(0)));
        assert_eq!(state.hypotheses()[1].prop, Prop::Opaque("(continuous f)".into()));
    }

    #[test]
    fn test_errors() {
        assert_eq!(
            parse_problem("(hyp (< y 1))"),
            Err(Error::UnknownVariable { name: "y".into() })
        );
        assert_eq!(
            parse_problem("(goal true) (goal false)"),
            Err(Error::DuplicateGoal)
        );
        assert!(matches!(
            parse_problem("(var x complex)"),
            Err(Error::SyntaxError { line: 1, col: 8, .. })
        ));
        assert!(matches!(
            parse_problem("(var x real)\n(hyp (< x 1 2))"),
            Err(Error::SyntaxError { line: 2, col: 6, .. })
        ));
        assert!(matches!(
            parse_problem("(lemma foo)"),
            Err(Error::SyntaxError { .. })
        ));
    }
}
