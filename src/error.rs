//! Error types for the linarith tactic

use thiserror::Error;

/// Linarith errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    // Parse errors
    /// Syntax error encountered while reading a problem
    ///
    /// **Triggered by:** Malformed S-expressions in a problem file
    /// **Example:** `(hyp (> x 0)` (missing closing parenthesis)
    #[error("Syntax error at line {line}, column {col}: {message}")]
    SyntaxError {
        /// Line number where error occurred
        line: usize,
        /// Column number where error occurred
        col: usize,
        /// Error description
        message: String,
    },

    /// Unexpected end of input during parsing
    #[error("Unexpected end of file")]
    UnexpectedEof,

    /// Unexpected token encountered during parsing
    #[error("Unexpected token: expected {expected}, got {got}")]
    UnexpectedToken {
        /// Expected token description
        expected: String,
        /// Actual token received
        got: String,
    },

    // Problem errors
    /// Reference to a variable that was never declared
    ///
    /// **Triggered by:** Using `y` in a hypothesis without `(var y real)`
    #[error("Undeclared variable: {name}")]
    UnknownVariable {
        /// Variable name
        name: String,
    },

    /// Variable declared more than once
    #[error("Variable declared twice: {name}")]
    DuplicateVariable {
        /// Variable name
        name: String,
    },

    /// More than one goal in a problem
    #[error("Problem already has a goal")]
    DuplicateGoal,

    // Normalization errors
    /// A term is not linear in its variables
    ///
    /// **Triggered by:** Products of two variables, division by a variable
    /// **Example:** `(< (* x y) 1)`
    /// **Recovery:** Recoverable - the hypothesis is dropped
    #[error("Non-linear term: {term}")]
    NonLinear {
        /// Printed form of the offending term
        term: String,
    },

    /// Division by a constant zero inside a term
    #[error("Division by zero")]
    DivisionByZero,

    // Configuration
    /// Tactic configuration could not be read
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // Oracle
    /// The feasibility oracle failed to produce an outcome
    ///
    /// **Recovery:** Fatal - propagated unchanged out of `activate`
    #[error("Feasibility oracle failed: {message}")]
    OracleFailure {
        /// Error message
        message: String,
    },
}

/// Error severity classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// Fatal error that cannot be recovered from
    Fatal,
    /// Recoverable error; the offending hypothesis is skipped
    Recoverable,
}

impl Error {
    /// Create an oracle failure with a message
    pub fn oracle(msg: impl Into<String>) -> Self {
        Error::OracleFailure {
            message: msg.into(),
        }
    }

    /// Classify error severity
    pub fn classify(&self) -> ErrorSeverity {
        match self {
            Error::NonLinear { .. } => ErrorSeverity::Recoverable,
            Error::DivisionByZero => ErrorSeverity::Recoverable,

            Error::SyntaxError { .. }
            | Error::DuplicateGoal
            | Error::UnexpectedEof
            | Error::UnexpectedToken { .. }
            | Error::UnknownVariable { .. }
            | Error::DuplicateVariable { .. }
            | Error::InvalidConfig(_)
            | Error::OracleFailure { .. } => ErrorSeverity::Fatal,
        }
    }

    /// Whether a hypothesis failing with this error is simply dropped
    pub fn is_recoverable(&self) -> bool {
        self.classify() == ErrorSeverity::Recoverable
    }
}

/// Result type for linarith operations
pub type Result<T> = std::result::Result<T, Error>;
