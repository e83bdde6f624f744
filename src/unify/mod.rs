/*!
Syntactic unification --- the naive, queue-based Martelli--Montanari
algorithm over first-order terms.

The six named steps of spec §4.C collapse into three match arms below:
*Delete* (structural-equality pairs are dropped), the combination of *Swap*
and *Eliminate* / *Check* (a pair with a variable on the left is eliminated
directly; a pair with a variable only on the right is first re-queued
swapped), and *Decompose* / *Conflict* (same-head function pairs recurse into
their arguments; anything else fails). This is the textbook presentation,
not the near-linear union-find variant: per spec §9 it is quadratic in the
typical case and exponential on pathological input, and that tradeoff is
accepted for the sake of returning an explicit substitution map.
*/

use std::collections::VecDeque;

use crate::misc::log::targets;
use crate::subst::Substitution;
use crate::term::Term;

fn substitute_var(t: &Term, var: usize, replacement: &Term) -> Term {
    let mut single = Substitution::empty();
    single.bind(var, replacement.clone());
    single.apply_term(t)
}

/// Attempt to unify a list of term pairs, returning the most general unifier on success.
/// Determinism: for a fixed order of `pairs`, the returned substitution's contents are fixed.
pub fn unify(pairs: Vec<(Term, Term)>) -> Option<Substitution> {
    let mut queue: VecDeque<(Term, Term)> = pairs.into();
    let mut subst = Substitution::empty();

    while let Some((s, t)) = queue.pop_front() {
        if s.equal(&t) {
            // Delete
            continue;
        }

        match (&s, &t) {
            (Term::Var(v), _) => {
                let v = *v;
                if t.free_vars().contains(&v) {
                    // Check (occurs): v occurs properly in t, which is not v itself
                    // (ruled out by the Delete case above).
                    log::trace!(target: targets::UNIFICATION, "occurs check failed for var {v}");
                    return None;
                }
                for pair in queue.iter_mut() {
                    pair.0 = substitute_var(&pair.0, v, &t);
                    pair.1 = substitute_var(&pair.1, v, &t);
                }
                subst.eliminate(v, &t);
                subst.bind(v, t);
            }
            (_, Term::Var(_)) => {
                // Swap: orient (non-var, var) into (var, non-var) and retry.
                queue.push_front((t, s));
            }
            (Term::FunApp(f1, args1), Term::FunApp(f2, args2)) => {
                if f1 != f2 || args1.len() != args2.len() {
                    // Conflict: distinct function symbols or mismatched arity.
                    return None;
                }
                for (a, b) in args1.iter().cloned().zip(args2.iter().cloned()) {
                    queue.push_back((a, b));
                }
            }
            _ => {
                // Conflict: a constant against a different constant, or a constant against
                // a function application. (Matching constants were already removed by Delete.)
                return None;
            }
        }
    }

    Some(subst)
}

/// Unify two atoms: rejects immediately if their relation indices differ, otherwise unifies
/// argument-wise.
pub fn unify_atoms(
    relation_a: usize,
    args_a: &[Term],
    relation_b: usize,
    args_b: &[Term],
) -> Option<Substitution> {
    if relation_a != relation_b || args_a.len() != args_b.len() {
        return None;
    }
    let pairs = args_a
        .iter()
        .cloned()
        .zip(args_b.iter().cloned())
        .collect();
    unify(pairs)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn f(idx: usize, args: Vec<Term>) -> Term {
        Term::FunApp(idx, args)
    }

    #[test]
    fn unifies_variable_with_constant() {
        let s = unify(vec![(Term::Var(0), Term::Const(1))]).unwrap();
        assert_eq!(s.apply_term(&Term::Var(0)), Term::Const(1));
    }

    #[test]
    fn unifies_regardless_of_orientation() {
        let s = unify(vec![(Term::Const(1), Term::Var(0))]).unwrap();
        assert_eq!(s.apply_term(&Term::Var(0)), Term::Const(1));
    }

    #[test]
    fn occurs_check_rejects_self_reference() {
        let t = f(0, vec![Term::Var(0)]);
        assert!(unify(vec![(Term::Var(0), t)]).is_none());
    }

    #[test]
    fn decomposes_matching_function_applications() {
        let a = f(0, vec![Term::Var(0), Term::Const(1)]);
        let b = f(0, vec![Term::Const(2), Term::Var(1)]);
        let s = unify(vec![(a, b)]).unwrap();
        assert_eq!(s.apply_term(&Term::Var(0)), Term::Const(2));
        assert_eq!(s.apply_term(&Term::Var(1)), Term::Const(1));
    }

    #[test]
    fn conflict_on_distinct_function_symbols() {
        let a = f(0, vec![Term::Const(0)]);
        let b = f(1, vec![Term::Const(0)]);
        assert!(unify(vec![(a, b)]).is_none());
    }

    #[test]
    fn conflict_on_distinct_constants() {
        assert!(unify(vec![(Term::Const(0), Term::Const(1))]).is_none());
    }

    #[test]
    fn conflict_on_constant_vs_function() {
        let a = Term::Const(0);
        let b = f(0, vec![Term::Const(1)]);
        assert!(unify(vec![(a, b)]).is_none());
    }

    #[test]
    fn elimination_propagates_into_already_recorded_bindings() {
        // {x = f(y), y = a} must resolve x all the way to f(a), not f(y).
        let pairs = vec![
            (Term::Var(0), f(0, vec![Term::Var(1)])),
            (Term::Var(1), Term::Const(9)),
        ];
        let s = unify(pairs).unwrap();
        assert_eq!(s.apply_term(&Term::Var(0)), f(0, vec![Term::Const(9)]));
    }

    #[test]
    fn unifier_soundness_on_toy_cases() {
        // For any successful unification, applying the unifier to both sides of every
        // original pair must yield structurally equal terms.
        let cases: Vec<Vec<(Term, Term)>> = vec![
            vec![(Term::Var(0), Term::Const(1))],
            vec![(
                f(0, vec![Term::Var(0), Term::Const(1)]),
                f(0, vec![Term::Const(2), Term::Var(1)]),
            )],
            vec![
                (Term::Var(0), f(0, vec![Term::Var(1)])),
                (Term::Var(1), Term::Const(9)),
            ],
        ];
        for pairs in cases {
            if let Some(s) = unify(pairs.clone()) {
                for (lhs, rhs) in &pairs {
                    assert_eq!(s.apply_term(lhs), s.apply_term(rhs));
                }
            }
        }
    }

    #[test]
    fn unify_atoms_rejects_distinct_relations() {
        assert!(unify_atoms(0, &[Term::Const(0)], 1, &[Term::Const(0)]).is_none());
    }

    #[test]
    fn unify_atoms_unifies_matching_relations() {
        let s = unify_atoms(0, &[Term::Var(0)], 0, &[Term::Const(5)]).unwrap();
        assert_eq!(s.apply_term(&Term::Var(0)), Term::Const(5));
    }
}
