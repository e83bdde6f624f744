/*!
The CNF pipeline --- seven ordered stages that turn an arbitrary first-order
formula into an equisatisfiable quantifier-free matrix, followed by clause
extraction.

Each stage below is written as a single recursive descent rather than an
explicit "apply until no change" loop. For stages 2 (negation descent), 3
(double-negation elimination), 5 (prenex lifting), and 7 (distribution) this
is the same fixed point spec §4.D asks for: because every recursive call
fully normalises its subtree before the caller combines the results, the
top-level call is already a fixed point of the corresponding rewrite rules
by induction on formula structure.
*/

use std::collections::HashMap;

use crate::clause::{Atom, Clause, Literal};
use crate::formula::Formula;
use crate::subst::Substitution;
use crate::symbol::{SymbolKind, SymbolTable};
use crate::term::Term;
use crate::types::err::ErrorKind;

/// Run the full seven-stage pipeline, returning a quantifier-free matrix.
///
/// Pure with respect to prover state: the only state touched is `symbols`, which gains the
/// fresh variable and Skolem function symbols minted along the way.
pub fn to_cnf(formula: &Formula, symbols: &mut SymbolTable) -> Formula {
    let f = eliminate_implications(formula);
    let f = negation_descent(&f);
    let f = eliminate_double_negation(&f);
    let f = freshen_quantifiers(&f, symbols);
    let f = prenex(&f);
    let f = skolemize(&f, symbols);
    let f = distribute(&f);
    drop_outer_foralls(&f)
}

/// Extract clauses from a quantifier-free CNF matrix: split on top-level `And`, then each
/// conjunct on top-level `Or`. Fails with [NotInCnf](ErrorKind::NotInCnf) if a node outside
/// `{Atom, Not(Atom), And, Or}` is reached.
pub fn cnf_to_clauses(matrix: &Formula, sos: bool) -> Result<Vec<Clause>, ErrorKind> {
    split_and(matrix)
        .into_iter()
        .map(|conjunct| split_or(&conjunct).map(|literals| Clause::built(literals, sos)))
        .collect()
}

/// Run the pipeline and extract clauses in one step: the composition the prover driver uses
/// for both axioms and the negated goal.
pub fn clausify(
    formula: &Formula,
    symbols: &mut SymbolTable,
    sos: bool,
) -> Result<Vec<Clause>, ErrorKind> {
    let matrix = to_cnf(formula, symbols);
    cnf_to_clauses(&matrix, sos)
}

// --- Stage 1: implication elimination -------------------------------------------------

fn eliminate_implications(f: &Formula) -> Formula {
    match f {
        Formula::Atom(..) => f.clone(),
        Formula::Not(inner) => Formula::not(eliminate_implications(inner)),
        Formula::And(l, r) => {
            Formula::and(eliminate_implications(l), eliminate_implications(r))
        }
        Formula::Or(l, r) => Formula::or(eliminate_implications(l), eliminate_implications(r)),
        Formula::Implies(l, r) => Formula::or(
            Formula::not(eliminate_implications(l)),
            eliminate_implications(r),
        ),
        Formula::ForAll(vars, body) => {
            Formula::ForAll(vars.clone(), Box::new(eliminate_implications(body)))
        }
        Formula::Exists(vars, body) => {
            Formula::Exists(vars.clone(), Box::new(eliminate_implications(body)))
        }
    }
}

// --- Stage 2: negation descent (De Morgan + quantifier duality) ----------------------

fn negation_descent(f: &Formula) -> Formula {
    match f {
        Formula::Atom(..) => f.clone(),
        Formula::Not(inner) => negation_descent_not(inner),
        Formula::And(l, r) => Formula::and(negation_descent(l), negation_descent(r)),
        Formula::Or(l, r) => Formula::or(negation_descent(l), negation_descent(r)),
        Formula::Implies(l, r) => Formula::implies(negation_descent(l), negation_descent(r)),
        Formula::ForAll(vars, body) => {
            Formula::ForAll(vars.clone(), Box::new(negation_descent(body)))
        }
        Formula::Exists(vars, body) => {
            Formula::Exists(vars.clone(), Box::new(negation_descent(body)))
        }
    }
}

/// Push a negation one level into `inner`, recursing further where the shape admits it.
/// Double negations are deliberately *not* collapsed here --- that is stage 3's job --- so a
/// `Not(Not(..))` produced by quantifier duality is left for the next stage to clean up.
fn negation_descent_not(inner: &Formula) -> Formula {
    match inner {
        Formula::Atom(..) => Formula::not(inner.clone()),
        Formula::Not(inner2) => Formula::not(negation_descent(inner2)),
        Formula::And(a, b) => Formula::or(negation_descent_not(a), negation_descent_not(b)),
        Formula::Or(a, b) => Formula::and(negation_descent_not(a), negation_descent_not(b)),
        Formula::Implies(a, b) => {
            // Defensive: implications are eliminated in stage 1, but ¬(A -> B) = A /\ ¬B
            // if one ever reaches here.
            Formula::and(negation_descent(a), negation_descent_not(b))
        }
        Formula::ForAll(vars, body) => {
            Formula::Exists(vars.clone(), Box::new(negation_descent_not(body)))
        }
        Formula::Exists(vars, body) => {
            Formula::ForAll(vars.clone(), Box::new(negation_descent_not(body)))
        }
    }
}

// --- Stage 3: double-negation elimination ---------------------------------------------

fn eliminate_double_negation(f: &Formula) -> Formula {
    match f {
        Formula::Atom(..) => f.clone(),
        Formula::Not(inner) => match inner.as_ref() {
            Formula::Not(inner2) => eliminate_double_negation(inner2),
            _ => Formula::not(eliminate_double_negation(inner)),
        },
        Formula::And(l, r) => {
            Formula::and(eliminate_double_negation(l), eliminate_double_negation(r))
        }
        Formula::Or(l, r) => {
            Formula::or(eliminate_double_negation(l), eliminate_double_negation(r))
        }
        Formula::Implies(l, r) => Formula::implies(
            eliminate_double_negation(l),
            eliminate_double_negation(r),
        ),
        Formula::ForAll(vars, body) => {
            Formula::ForAll(vars.clone(), Box::new(eliminate_double_negation(body)))
        }
        Formula::Exists(vars, body) => {
            Formula::Exists(vars.clone(), Box::new(eliminate_double_negation(body)))
        }
    }
}

// --- Stage 4: quantifier freshening -----------------------------------------------------

fn rename_term(t: &Term, rename: &HashMap<usize, usize>) -> Term {
    match t {
        Term::Var(v) => Term::Var(*rename.get(v).unwrap_or(v)),
        Term::Const(_) => t.clone(),
        Term::FunApp(idx, args) => {
            Term::FunApp(*idx, args.iter().map(|a| rename_term(a, rename)).collect())
        }
    }
}

/// Replace every re-bound variable with a fresh variable symbol, so that stage 5's prenex
/// lifting cannot capture a free occurrence. `seen` accumulates every bound variable index
/// encountered so far on the path from the root; `rename` is the currently-installed mapping
/// from original to fresh index, pushed on binder entry and rolled back on exit.
fn freshen_quantifiers(f: &Formula, symbols: &mut SymbolTable) -> Formula {
    let mut seen: Vec<usize> = Vec::new();
    let mut rename: HashMap<usize, usize> = HashMap::new();
    freshen_rec(f, symbols, &mut seen, &mut rename)
}

fn freshen_rec(
    f: &Formula,
    symbols: &mut SymbolTable,
    seen: &mut Vec<usize>,
    rename: &mut HashMap<usize, usize>,
) -> Formula {
    match f {
        Formula::Atom(rel, args) => {
            Formula::Atom(*rel, args.iter().map(|t| rename_term(t, rename)).collect())
        }
        Formula::Not(inner) => Formula::not(freshen_rec(inner, symbols, seen, rename)),
        Formula::And(l, r) => Formula::and(
            freshen_rec(l, symbols, seen, rename),
            freshen_rec(r, symbols, seen, rename),
        ),
        Formula::Or(l, r) => Formula::or(
            freshen_rec(l, symbols, seen, rename),
            freshen_rec(r, symbols, seen, rename),
        ),
        Formula::Implies(l, r) => Formula::implies(
            freshen_rec(l, symbols, seen, rename),
            freshen_rec(r, symbols, seen, rename),
        ),
        Formula::ForAll(vars, body) | Formula::Exists(vars, body) => {
            let mut new_vars = Vec::with_capacity(vars.len());
            let mut pushed = 0usize;
            let mut installed: Vec<usize> = Vec::new();

            for &v in vars {
                if seen.contains(&v) {
                    let name = symbols
                        .resolve(SymbolKind::Variable, v)
                        .map(|e| e.name)
                        .unwrap_or_else(|_| "x".to_string());
                    let fresh = symbols.fresh(SymbolKind::Variable, &name, None);
                    rename.insert(v, fresh.index);
                    installed.push(v);
                    new_vars.push(fresh.index);
                    seen.push(fresh.index);
                } else {
                    new_vars.push(v);
                    seen.push(v);
                }
                pushed += 1;
            }

            let new_body = freshen_rec(body, symbols, seen, rename);

            seen.truncate(seen.len() - pushed);
            for v in installed {
                rename.remove(&v);
            }

            match f {
                Formula::ForAll(..) => Formula::ForAll(new_vars, Box::new(new_body)),
                Formula::Exists(..) => Formula::Exists(new_vars, Box::new(new_body)),
                _ => unreachable!(),
            }
        }
    }
}

// --- Stage 5: prenex lifting -------------------------------------------------------------

enum Quant {
    ForAll(Vec<usize>),
    Exists(Vec<usize>),
}

impl Quant {
    fn wrap(self, body: Formula) -> Formula {
        match self {
            Quant::ForAll(vars) => Formula::ForAll(vars, Box::new(body)),
            Quant::Exists(vars) => Formula::Exists(vars, Box::new(body)),
        }
    }
}

fn strip_quantifiers(f: Formula) -> (Vec<Quant>, Formula) {
    match f {
        Formula::ForAll(vars, body) => {
            let (mut qs, inner) = strip_quantifiers(*body);
            qs.insert(0, Quant::ForAll(vars));
            (qs, inner)
        }
        Formula::Exists(vars, body) => {
            let (mut qs, inner) = strip_quantifiers(*body);
            qs.insert(0, Quant::Exists(vars));
            (qs, inner)
        }
        other => (Vec::new(), other),
    }
}

fn rewrap(quants: Vec<Quant>, body: Formula) -> Formula {
    let mut result = body;
    for q in quants.into_iter().rev() {
        result = q.wrap(result);
    }
    result
}

fn combine_quantifiers(l: Formula, r: Formula, is_and: bool) -> Formula {
    let (l_quants, l_body) = strip_quantifiers(l);
    let (r_quants, r_body) = strip_quantifiers(r);
    let combined = if is_and {
        Formula::and(l_body, r_body)
    } else {
        Formula::or(l_body, r_body)
    };
    let with_right = rewrap(r_quants, combined);
    rewrap(l_quants, with_right)
}

fn prenex(f: &Formula) -> Formula {
    match f {
        Formula::Atom(..) => f.clone(),
        Formula::Not(inner) => Formula::not(prenex(inner)),
        Formula::And(l, r) => combine_quantifiers(prenex(l), prenex(r), true),
        Formula::Or(l, r) => combine_quantifiers(prenex(l), prenex(r), false),
        Formula::Implies(l, r) => Formula::implies(prenex(l), prenex(r)),
        Formula::ForAll(vars, body) => Formula::ForAll(vars.clone(), Box::new(prenex(body))),
        Formula::Exists(vars, body) => Formula::Exists(vars.clone(), Box::new(prenex(body))),
    }
}

// --- Stage 6: Skolemisation --------------------------------------------------------------

/// Scans the (now-prenex) prefix top-down, tracking the universally-bound variables in
/// scope. Each existential binder is removed in favour of fresh Skolem functions of arity
/// equal to the number of universals currently in scope.
fn skolemize(f: &Formula, symbols: &mut SymbolTable) -> Formula {
    let mut universals: Vec<usize> = Vec::new();
    skolemize_rec(f, symbols, &mut universals)
}

fn skolemize_rec(f: &Formula, symbols: &mut SymbolTable, universals: &mut Vec<usize>) -> Formula {
    match f {
        Formula::ForAll(vars, body) => {
            universals.extend(vars.iter().copied());
            let new_body = skolemize_rec(body, symbols, universals);
            universals.truncate(universals.len() - vars.len());
            Formula::ForAll(vars.clone(), Box::new(new_body))
        }
        Formula::Exists(vars, body) => {
            let mut subst = Substitution::empty();
            let arity = universals.len();
            for &y in vars {
                let entry = symbols.fresh(SymbolKind::Function, "sk", Some(arity));
                let skolem_term = Term::FunApp(
                    entry.index,
                    universals.iter().map(|&v| Term::Var(v)).collect(),
                );
                subst.bind(y, skolem_term);
            }
            let substituted_body = subst.apply_formula(body);
            skolemize_rec(&substituted_body, symbols, universals)
        }
        other => other.clone(),
    }
}

// --- Stage 7: distribution of Or over And -------------------------------------------------

fn distribute(f: &Formula) -> Formula {
    match f {
        Formula::Atom(..) => f.clone(),
        Formula::Not(inner) => Formula::not(distribute(inner)),
        Formula::And(l, r) => Formula::and(distribute(l), distribute(r)),
        Formula::Or(l, r) => distribute_or(distribute(l), distribute(r)),
        Formula::ForAll(vars, body) => Formula::ForAll(vars.clone(), Box::new(distribute(body))),
        Formula::Exists(..) => {
            unreachable!("no existentials remain in a formula after skolemisation")
        }
        Formula::Implies(..) => unreachable!("implications are eliminated in stage 1"),
    }
}

fn distribute_or(l: Formula, r: Formula) -> Formula {
    match (l, r) {
        (Formula::And(a, b), r) => {
            Formula::and(distribute_or(*a, r.clone()), distribute_or(*b, r))
        }
        (l, Formula::And(a, b)) => {
            Formula::and(distribute_or(l.clone(), *a), distribute_or(l, *b))
        }
        (l, r) => Formula::or(l, r),
    }
}

fn drop_outer_foralls(f: &Formula) -> Formula {
    match f {
        Formula::ForAll(_, body) => drop_outer_foralls(body),
        other => other.clone(),
    }
}

// --- Clause extraction ---------------------------------------------------------------------

fn split_and(f: &Formula) -> Vec<Formula> {
    match f {
        Formula::And(l, r) => {
            let mut out = split_and(l);
            out.extend(split_and(r));
            out
        }
        other => vec![other.clone()],
    }
}

fn split_or(f: &Formula) -> Result<Vec<Literal>, ErrorKind> {
    match f {
        Formula::Or(l, r) => {
            let mut out = split_or(l)?;
            out.extend(split_or(r)?);
            Ok(out)
        }
        Formula::Atom(rel, args) => Ok(vec![Literal::positive(Atom::new(*rel, args.clone()))]),
        Formula::Not(inner) => match inner.as_ref() {
            Formula::Atom(rel, args) => {
                Ok(vec![Literal::negative(Atom::new(*rel, args.clone()))])
            }
            _ => Err(ErrorKind::NotInCnf),
        },
        _ => Err(ErrorKind::NotInCnf),
    }
}
