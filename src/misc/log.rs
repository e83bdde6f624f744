/*!
Miscellaneous items related to [logging](log).

Calls to the log macro are made throughout the library to help diagnose a
stuck or surprising proof attempt. No log implementation is provided: a
consuming binary picks one (e.g. `env_logger`) and filters by the targets
below.
*/

/// Targets to be used within a [log]! macro.
pub mod targets {
    /// Logs related to the [symbol table](crate::symbol)
    pub const SYMBOL: &str = "symbol";

    /// Logs related to the [CNF pipeline](crate::cnf)
    pub const CNF: &str = "cnf";

    /// Logs related to [unification](crate::unify)
    pub const UNIFICATION: &str = "unification";

    /// Logs related to [resolution and factoring](crate::resolution)
    pub const RESOLUTION: &str = "resolution";

    /// Logs related to the [subsumption index](crate::subsumption)
    pub const SUBSUMPTION: &str = "subsumption";

    /// Logs related to the [clause set](crate::clause_set)
    pub const CLAUSE_SET: &str = "clause_set";

    /// Logs related to the [prover driver](crate::prover)
    pub const PROVER: &str = "prover";
}
