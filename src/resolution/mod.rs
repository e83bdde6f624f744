/*!
Binary resolution and factoring --- the two inference rules the saturation
loop in [clause_set](crate::clause_set) combines into resolvents.

Both rules bottom out in [unify_atoms](crate::unify::unify_atoms): resolution
unifies a positive/negative pair of literals drawn from two different
clauses, factoring unifies a same-polarity pair within one clause. Before two
clauses are resolved against each other, the second clause's variables are
renamed apart with fresh symbols --- otherwise a variable index shared by
coincidence between two independently-quantified clauses would be unified
as if it were the same variable.
*/

use crate::clause::{Atom, Clause, Literal};
use crate::subst::Substitution;
use crate::symbol::{SymbolKind, SymbolTable};
use crate::term::Term;
use crate::unify::unify_atoms;

fn apply_literal(subst: &Substitution, lit: &Literal) -> Literal {
    let args = lit.atom.args.iter().map(|t| subst.apply_term(t)).collect();
    Literal::new(Atom::new(lit.atom.relation, args), lit.negated)
}

fn apply_to_clause(subst: &Substitution, clause: &Clause) -> Clause {
    let literals = clause.literals.iter().map(|l| apply_literal(subst, l)).collect();
    Clause::raw(literals, clause.sos)
}

/// Rename every variable of `clause` to a fresh symbol, so that its variable indices cannot
/// coincide with those of another, independently-quantified clause.
pub fn standardize_apart(clause: &Clause, symbols: &mut SymbolTable) -> Clause {
    let mut seen: Vec<usize> = Vec::new();
    let mut subst = Substitution::empty();
    for lit in &clause.literals {
        for arg in &lit.atom.args {
            for v in arg.free_vars() {
                if !seen.contains(&v) {
                    seen.push(v);
                    let name = symbols
                        .resolve(SymbolKind::Variable, v)
                        .map(|e| e.name)
                        .unwrap_or_else(|_| "x".to_string());
                    let fresh = symbols.fresh(SymbolKind::Variable, &name, None);
                    subst.bind(v, Term::Var(fresh.index));
                }
            }
        }
    }
    apply_to_clause(&subst, clause)
}

/// Resolve literal `i` of `c1` against literal `j` of `c2`, which callers are expected to have
/// already standardized apart from `c1` if the two clauses might otherwise share a variable
/// index. Fails if the literals do not have opposite polarity, a matching relation, and
/// unifiable arguments. On success the resolvent inherits set-of-support from either parent.
pub fn apply_resolution(c1: &Clause, i: usize, c2: &Clause, j: usize) -> Option<Clause> {
    let l1 = c1.literals.get(i)?;
    let l2 = c2.literals.get(j)?;
    if l1.negated == l2.negated || l1.atom.relation != l2.atom.relation {
        return None;
    }
    let subst = unify_atoms(
        l1.atom.relation,
        &l1.atom.args,
        l2.atom.relation,
        &l2.atom.args,
    )?;
    let mut literals = Vec::with_capacity(c1.len() + c2.len() - 2);
    for (k, lit) in c1.literals.iter().enumerate() {
        if k != i {
            literals.push(apply_literal(&subst, lit));
        }
    }
    for (k, lit) in c2.literals.iter().enumerate() {
        if k != j {
            literals.push(apply_literal(&subst, lit));
        }
    }
    Some(Clause::built(literals, c1.sos || c2.sos))
}

/// Every non-tautologous resolvent of `c1` against `c2`, trying every complementary literal
/// pair. `c2` is standardized apart internally, once, before the pairwise search.
pub fn get_resolutions(c1: &Clause, c2: &Clause, symbols: &mut SymbolTable) -> Vec<Clause> {
    let c2r = standardize_apart(c2, symbols);
    let mut out = Vec::new();
    for i in 0..c1.literals.len() {
        for j in 0..c2r.literals.len() {
            if let Some(resolvent) = apply_resolution(c1, i, &c2r, j) {
                if !resolvent.is_tautology() {
                    out.push(resolvent);
                }
            }
        }
    }
    out
}

/// Factor literal `j` of `c` into literal `i`: unify their atoms and drop `j`, keeping `i`'s
/// slot (and therefore the clause's remaining literal count one smaller). Fails if the two
/// literals do not share polarity, relation, and a unifier.
pub fn apply_factor(c: &Clause, i: usize, j: usize) -> Option<Clause> {
    if i == j {
        return None;
    }
    let l1 = c.literals.get(i)?;
    let l2 = c.literals.get(j)?;
    if l1.negated != l2.negated || l1.atom.relation != l2.atom.relation {
        return None;
    }
    let subst = unify_atoms(
        l1.atom.relation,
        &l1.atom.args,
        l2.atom.relation,
        &l2.atom.args,
    )?;
    let literals = c
        .literals
        .iter()
        .enumerate()
        .filter(|(k, _)| *k != j)
        .map(|(_, lit)| apply_literal(&subst, lit))
        .collect();
    Some(Clause::built(literals, c.sos))
}

/// Every non-tautologous factor of `c`, trying every same-polarity literal pair.
pub fn get_factors(c: &Clause) -> Vec<Clause> {
    let mut out = Vec::new();
    for i in 0..c.literals.len() {
        for j in (i + 1)..c.literals.len() {
            if let Some(factor) = apply_factor(c, i, j) {
                if !factor.is_tautology() {
                    out.push(factor);
                }
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (SymbolTable, usize, usize) {
        let mut symbols = SymbolTable::new();
        let p = symbols
            .intern(SymbolKind::Relation, "p".into(), Some(1))
            .unwrap()
            .index;
        let x0 = symbols
            .intern(SymbolKind::Variable, "x0".into(), None)
            .unwrap()
            .index;
        (symbols, p, x0)
    }

    #[test]
    fn resolution_of_complementary_units_is_empty_clause() {
        let (mut symbols, p, x0) = setup();
        let a = symbols
            .intern(SymbolKind::Constant, "a".into(), None)
            .unwrap()
            .index;
        let c1 = Clause::built(
            vec![Literal::positive(Atom::new(p, vec![Term::Var(x0)]))],
            false,
        );
        let c2 = Clause::built(
            vec![Literal::negative(Atom::new(p, vec![Term::Const(a)]))],
            true,
        );
        let resolvents = get_resolutions(&c1, &c2, &mut symbols);
        assert_eq!(resolvents.len(), 1);
        assert!(resolvents[0].is_empty());
        assert!(resolvents[0].sos, "resolvent inherits set-of-support");
    }

    #[test]
    fn resolution_standardizes_apart_shared_variable_index() {
        let mut symbols = SymbolTable::new();
        let p = symbols.intern(SymbolKind::Relation, "p".into(), Some(1)).unwrap().index;
        let q = symbols.intern(SymbolKind::Relation, "q".into(), Some(1)).unwrap().index;
        let r = symbols.intern(SymbolKind::Relation, "r".into(), Some(1)).unwrap().index;
        let x0 = symbols.intern(SymbolKind::Variable, "x0".into(), None).unwrap().index;

        // P(x0) \/ Q(x0)   and   ~P(x0) \/ R(x0)  -- both clauses reuse variable index x0,
        // but as independently-quantified clauses they must not be conflated.
        let c1 = Clause::built(
            vec![
                Literal::positive(Atom::new(p, vec![Term::Var(x0)])),
                Literal::positive(Atom::new(q, vec![Term::Var(x0)])),
            ],
            false,
        );
        let c2 = Clause::built(
            vec![
                Literal::negative(Atom::new(p, vec![Term::Var(x0)])),
                Literal::positive(Atom::new(r, vec![Term::Var(x0)])),
            ],
            false,
        );
        let resolvents = get_resolutions(&c1, &c2, &mut symbols);
        assert_eq!(resolvents.len(), 1);
        let resolvent = &resolvents[0];
        assert_eq!(resolvent.len(), 2);
        // Q and R must keep distinct argument variables, not be forced equal.
        let q_lit = resolvent.literals.iter().find(|l| l.atom.relation == q).unwrap();
        let r_lit = resolvent.literals.iter().find(|l| l.atom.relation == r).unwrap();
        assert_ne!(q_lit.atom.args[0], r_lit.atom.args[0]);
    }

    #[test]
    fn resolution_rejects_mismatched_relation_or_polarity() {
        let (mut symbols, p, x0) = setup();
        let c1 = Clause::built(
            vec![Literal::positive(Atom::new(p, vec![Term::Var(x0)]))],
            false,
        );
        let c2 = Clause::built(
            vec![Literal::positive(Atom::new(p, vec![Term::Var(x0)]))],
            false,
        );
        assert!(get_resolutions(&c1, &c2, &mut symbols).is_empty());
    }

    #[test]
    fn resolution_drops_tautologous_resolvents() {
        let mut symbols = SymbolTable::new();
        let p = symbols.intern(SymbolKind::Relation, "p".into(), Some(1)).unwrap().index;
        let q = symbols.intern(SymbolKind::Relation, "q".into(), Some(1)).unwrap().index;
        let a = symbols.intern(SymbolKind::Constant, "a".into(), None).unwrap().index;
        // P(a) \/ Q(a)  and  ~P(a) \/ Q(a)  resolve (on P) to Q(a) \/ Q(a) -> Q(a): not a
        // tautology. Use a genuinely tautologous pair instead: P(a) \/ Q(a) and ~P(a) \/ ~Q(a).
        let c1 = Clause::built(
            vec![
                Literal::positive(Atom::new(p, vec![Term::Const(a)])),
                Literal::positive(Atom::new(q, vec![Term::Const(a)])),
            ],
            false,
        );
        let c2 = Clause::built(
            vec![
                Literal::negative(Atom::new(p, vec![Term::Const(a)])),
                Literal::negative(Atom::new(q, vec![Term::Const(a)])),
            ],
            false,
        );
        let resolvents = get_resolutions(&c1, &c2, &mut symbols);
        // Resolving on P gives Q(a) \/ ~Q(a), a tautology, dropped.
        // Resolving on Q gives P(a) \/ ~P(a), a tautology, dropped too.
        assert!(resolvents.is_empty());
    }

    #[test]
    fn factoring_merges_unifiable_literals() {
        let mut symbols = SymbolTable::new();
        let p = symbols.intern(SymbolKind::Relation, "p".into(), Some(1)).unwrap().index;
        let x0 = symbols.intern(SymbolKind::Variable, "x0".into(), None).unwrap().index;
        let a = symbols.intern(SymbolKind::Constant, "a".into(), None).unwrap().index;
        // P(x0) \/ P(a)  factors to  P(a)
        let c = Clause::built(
            vec![
                Literal::positive(Atom::new(p, vec![Term::Var(x0)])),
                Literal::positive(Atom::new(p, vec![Term::Const(a)])),
            ],
            true,
        );
        let factors = get_factors(&c);
        assert_eq!(factors.len(), 1);
        assert_eq!(factors[0].len(), 1);
        assert!(factors[0].sos);
        assert_eq!(factors[0].literals[0].atom.args[0], Term::Const(a));
    }

    #[test]
    fn factoring_rejects_unmatched_polarity() {
        let mut symbols = SymbolTable::new();
        let p = symbols.intern(SymbolKind::Relation, "p".into(), Some(1)).unwrap().index;
        let a = symbols.intern(SymbolKind::Constant, "a".into(), None).unwrap().index;
        let c = Clause::built(
            vec![
                Literal::positive(Atom::new(p, vec![Term::Const(a)])),
                Literal::negative(Atom::new(p, vec![Term::Const(a)])),
            ],
            false,
        );
        assert!(get_factors(&c).is_empty());
        let _ = symbols;
    }
}
