/*!
Formulas --- the first-order propositions built over terms.

As with [Term](crate::term::Term), a [Formula] is a tagged tree over symbol
indices. It is immutable once built: the CNF pipeline ([cnf](crate::cnf))
consumes a formula and produces a new one at each stage rather than mutating
in place.
*/

use crate::symbol::SymbolKind;
use crate::term::Term;
use crate::types::err::ArityError;

/// A first-order formula.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum Formula {
    /// An atomic proposition: a relation's dense index and its arguments.
    Atom(usize, Vec<Term>),
    /// Negation.
    Not(Box<Formula>),
    /// Conjunction.
    And(Box<Formula>, Box<Formula>),
    /// Disjunction.
    Or(Box<Formula>, Box<Formula>),
    /// Implication, `l -> r`.
    Implies(Box<Formula>, Box<Formula>),
    /// Universal quantification over one or more variable indices.
    ForAll(Vec<usize>, Box<Formula>),
    /// Existential quantification over one or more variable indices.
    Exists(Vec<usize>, Box<Formula>),
}

impl Formula {
    /// Convenience constructor for a negation.
    pub fn not(f: Formula) -> Formula {
        Formula::Not(Box::new(f))
    }

    /// Convenience constructor for a conjunction.
    pub fn and(l: Formula, r: Formula) -> Formula {
        Formula::And(Box::new(l), Box::new(r))
    }

    /// Convenience constructor for a disjunction.
    pub fn or(l: Formula, r: Formula) -> Formula {
        Formula::Or(Box::new(l), Box::new(r))
    }

    /// Convenience constructor for an implication.
    pub fn implies(l: Formula, r: Formula) -> Formula {
        Formula::Implies(Box::new(l), Box::new(r))
    }

    /// Structural equality; quantifier binder lists compare position-wise, with no alpha
    /// equivalence (the CNF pipeline renames apart before this matters).
    pub fn equal(&self, other: &Formula) -> bool {
        self == other
    }

    /// The free variables of this formula, in order of occurrence, with duplicates preserved.
    /// Bound variables are excluded via a scope set threaded through the traversal.
    pub fn free_vars(&self) -> Vec<usize> {
        let mut out = Vec::new();
        let mut bound = Vec::new();
        self.collect_free_vars(&mut bound, &mut out);
        out
    }

    fn collect_free_vars(&self, bound: &mut Vec<usize>, out: &mut Vec<usize>) {
        match self {
            Formula::Atom(_, args) => {
                for t in args {
                    for v in t.free_vars() {
                        if !bound.contains(&v) {
                            out.push(v);
                        }
                    }
                }
            }
            Formula::Not(f) => f.collect_free_vars(bound, out),
            Formula::And(l, r) | Formula::Or(l, r) | Formula::Implies(l, r) => {
                l.collect_free_vars(bound, out);
                r.collect_free_vars(bound, out);
            }
            Formula::ForAll(vars, body) | Formula::Exists(vars, body) => {
                let added = vars.len();
                bound.extend(vars.iter().copied());
                body.collect_free_vars(bound, out);
                bound.truncate(bound.len() - added);
            }
        }
    }

    /// Checks arity of every atom reachable from this formula against the symbol table.
    pub fn check_arity(&self, symbols: &crate::symbol::SymbolTable) -> Result<(), ArityError> {
        match self {
            Formula::Atom(idx, args) => {
                for a in args {
                    a.check_arity(symbols)?;
                }
                let entry = symbols
                    .resolve(SymbolKind::Relation, *idx)
                    .expect("well-formed formula references an interned relation");
                let expected = entry.arity.unwrap_or(0);
                if args.len() != expected {
                    return Err(ArityError {
                        identity: entry.identity,
                        expected,
                        found: args.len(),
                    });
                }
                Ok(())
            }
            Formula::Not(f) => f.check_arity(symbols),
            Formula::And(l, r) | Formula::Or(l, r) | Formula::Implies(l, r) => {
                l.check_arity(symbols)?;
                r.check_arity(symbols)
            }
            Formula::ForAll(_, body) | Formula::Exists(_, body) => body.check_arity(symbols),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn free_vars_exclude_bound() {
        let atom_x = Formula::Atom(0, vec![Term::Var(0)]);
        let atom_y = Formula::Atom(1, vec![Term::Var(1)]);
        let f = Formula::ForAll(vec![0], Box::new(Formula::and(atom_x, atom_y)));
        assert_eq!(f.free_vars(), vec![1]);
    }

    #[test]
    fn free_vars_restore_scope_on_exit() {
        // forall x. P(x) /\ Q(x)   (outer Q(x) is free, since x here is a distinct outer var)
        let inner = Formula::ForAll(vec![0], Box::new(Formula::Atom(0, vec![Term::Var(0)])));
        let outer = Formula::and(inner, Formula::Atom(1, vec![Term::Var(0)]));
        assert_eq!(outer.free_vars(), vec![0]);
    }
}
