/*!
A library for determining whether a first-order goal follows from a set of axioms, by
clausifying both and searching for a resolution refutation.

otter_prove takes a theory (a set of first-order formulas) and a goal, and tries to show the
goal is a logical consequence of the theory by negating it, converting everything to
conjunctive normal form, and saturating a clause set under binary resolution and factoring
until either the empty clause is derived (the goal is proved) or the search exhausts its
budget. The search follows the Otter given-clause architecture: an active set of clauses
already resolved against each other, and two passive queues (oldest-first and
simplest-first) that together decide what gets activated next.

otter_prove is developed as a teaching-scale refutation prover: enough of the classical
machinery (unification, Skolemization, prenex conversion, set-of-support resolution, a
fingerprint-indexed clause set) to prove or fail to prove a goal in a legible way, not a
competition-grade first-order ATP. It does not implement subsumption under substitution,
only tautology and literal-duplicate removal plus a fingerprint-level over-approximation
used to index clauses for future redundancy work.

# Orientation

The pipeline from formula to verdict runs through a handful of stages, each with its own
module:
- [term] and [formula] define the term and formula trees, over symbols interned in a
  [symbol::SymbolTable].
- [cnf] converts a formula to conjunctive normal form (implication elimination, negation
  descent, quantifier renaming, prenex conversion, Skolemization, distribution) and extracts
  [clause::Clause]s from the result.
- [unify] and [subst] provide Martelli-Montanari unification and the substitutions it
  produces, used by both [cnf]'s Skolemization step and [resolution].
- [resolution] implements binary resolution and factoring over standardized-apart clauses.
- [subsumption] provides a fingerprint-based over-approximation of clause subsumption,
  sound only for rejection, and a bucketed index of candidates it could ever be true for.
- [clause_set] ties the above together into the active/passive clause set the saturation
  loop operates over.
- [prover] is the entry point: [prover::proves] and [prover::proves_with_stats] run the
  saturation loop to a verdict.
- [render] turns terms, formulas, and clauses back into readable concrete syntax for
  diagnostics, via the [render::Renderable] trait.

# Examples

+ Prove a goal from an empty theory.

```rust
use otter_prove::{config::Config, formula::Formula, prover, symbol::{SymbolKind, SymbolTable}, term::Term};

let mut symbols = SymbolTable::new();
let p = symbols.intern(SymbolKind::Relation, "p".to_string(), Some(1)).unwrap().index;
let a = symbols.intern(SymbolKind::Constant, "a".to_string(), None).unwrap().index;

let goal = Formula::implies(
    Formula::Atom(p, vec![Term::Const(a)]),
    Formula::Atom(p, vec![Term::Const(a)]),
);

assert!(prover::proves(&[], &goal, &mut symbols, &Config::default()));
```

# Logs

Calls to [log!](log) are made throughout the pipeline to help diagnose a stuck or surprising
proof attempt. The targets are listed in [misc::log].

For example, when used with [env_logger](https://docs.rs/env_logger/latest/env_logger/):
- Logs of the saturation loop's given-clause selections can be filtered with `RUST_LOG=prover=trace …`
- Logs of subsumption decisions can be found with `RUST_LOG=subsumption=trace …`

*/

#![allow(clippy::collapsible_else_if)]
#![allow(clippy::derivable_impls)]
#![allow(clippy::single_match)]

pub mod symbol;
pub mod term;
pub mod formula;
pub mod subst;
pub mod unify;
pub mod clause;
pub mod cnf;
pub mod resolution;
pub mod subsumption;
pub mod clause_set;
pub mod prover;
pub mod render;

pub mod config;
pub mod generic;
pub mod types;
pub mod misc;
