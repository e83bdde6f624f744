/*!
Error types used in the library.

Most of these are programmer/structural errors, surfaced synchronously and
never retried. Ordinary negative results of search --- a failed unification,
a clause that turns out to be a tautology, a subsumption-index miss --- are
not errors: they are returned as `None`/`bool` by the relevant function.

Names of the error enums overlap with the component that raises them.
*/

use std::fmt;

use crate::symbol::{Identity, SymbolKind};

/// A union of the error kinds the core can raise.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    /// An error from the symbol table.
    Symbol(SymbolError),

    /// An error raised while rendering or otherwise using a term/formula at a use site.
    Arity(ArityError),

    /// The clause extractor observed a node outside `{Atom, Not(Atom), And, Or}`.
    NotInCnf,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::Symbol(e) => write!(f, "{e}"),
            ErrorKind::Arity(e) => write!(f, "{e}"),
            ErrorKind::NotInCnf => write!(f, "clause extraction observed a non-CNF node"),
        }
    }
}

impl std::error::Error for ErrorKind {}

impl From<SymbolError> for ErrorKind {
    fn from(e: SymbolError) -> Self {
        ErrorKind::Symbol(e)
    }
}

impl From<ArityError> for ErrorKind {
    fn from(e: ArityError) -> Self {
        ErrorKind::Arity(e)
    }
}

/// Errors raised by the [symbol table](crate::symbol::SymbolTable).
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SymbolError {
    /// Lookup by identity, or by (kind, index), missed.
    UnresolvedSymbol,

    /// A re-intern attempt disagreed with the existing entry's kind or arity.
    KindOrArityConflict {
        /// The kind already recorded for this identity.
        existing_kind: SymbolKind,
        /// The kind requested by the conflicting intern.
        requested_kind: SymbolKind,
    },
}

impl fmt::Display for SymbolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SymbolError::UnresolvedSymbol => write!(f, "unresolved symbol"),
            SymbolError::KindOrArityConflict {
                existing_kind,
                requested_kind,
            } => write!(
                f,
                "re-intern conflict: existing kind {existing_kind:?}, requested kind {requested_kind:?}"
            ),
        }
    }
}

impl std::error::Error for SymbolError {}

/// Raised at a use site (rendering, inference) when an argument list does not match a symbol's declared arity.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ArityError {
    /// The identity of the symbol whose arity was violated.
    pub identity: Identity,
    /// The arity declared for the symbol.
    pub expected: usize,
    /// The number of arguments actually supplied.
    pub found: usize,
}

impl fmt::Display for ArityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "arity mismatch for symbol {:?}: expected {}, found {}",
            self.identity, self.expected, self.found
        )
    }
}

impl std::error::Error for ArityError {}
