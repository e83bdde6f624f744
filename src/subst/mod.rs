/*!
Substitutions --- finite mappings from variable index to term, and their
capture-respecting application to terms and formulas.
*/

use std::collections::HashMap;

use crate::formula::Formula;
use crate::term::Term;

/// A finite mapping from variable index to term.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Substitution {
    bindings: HashMap<usize, Term>,
}

impl Substitution {
    /// The empty substitution.
    pub fn empty() -> Self {
        Substitution {
            bindings: HashMap::new(),
        }
    }

    /// Look up the binding for a variable, if any.
    pub fn get(&self, var: usize) -> Option<&Term> {
        self.bindings.get(&var)
    }

    /// Record a binding. Overwrites any previous binding for `var`.
    pub fn bind(&mut self, var: usize, term: Term) {
        self.bindings.insert(var, term);
    }

    /// True if this substitution binds no variables.
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Rewrite every already-recorded binding by replacing occurrences of `var` with
    /// `replacement`. Used by the unifier's Eliminate step to keep the final substitution
    /// idempotent regardless of the order pairs were processed in.
    pub(crate) fn eliminate(&mut self, var: usize, replacement: &Term) {
        let mut single = Substitution::empty();
        single.bind(var, replacement.clone());
        for v in self.bindings.values_mut() {
            *v = single.apply_term(v);
        }
    }

    /// Apply this substitution to a term: every free variable `v` is replaced by `sigma(v)`,
    /// recursively (a bound variable, introduced in `t` by the substitution's own range, is
    /// not re-substituted --- terms contain no binders, so this only matters when a binding's
    /// right-hand side is itself substituted into).
    pub fn apply_term(&self, t: &Term) -> Term {
        match t {
            Term::Var(v) => match self.bindings.get(v) {
                Some(replacement) => replacement.clone(),
                None => t.clone(),
            },
            Term::Const(_) => t.clone(),
            Term::FunApp(idx, args) => {
                Term::FunApp(*idx, args.iter().map(|a| self.apply_term(a)).collect())
            }
        }
    }

    /// Apply this substitution to a formula. Quantified variables shadow any binding for the
    /// same index within their body: the scope set below is exactly the set of variable
    /// indices currently shadowed, and a shadowed variable is left untouched rather than
    /// substituted.
    pub fn apply_formula(&self, f: &Formula) -> Formula {
        let mut scope: Vec<usize> = Vec::new();
        self.apply_formula_scoped(f, &mut scope)
    }

    fn apply_term_scoped(&self, t: &Term, scope: &[usize]) -> Term {
        match t {
            Term::Var(v) => {
                if scope.contains(v) {
                    t.clone()
                } else {
                    match self.bindings.get(v) {
                        Some(replacement) => replacement.clone(),
                        None => t.clone(),
                    }
                }
            }
            Term::Const(_) => t.clone(),
            Term::FunApp(idx, args) => Term::FunApp(
                *idx,
                args.iter().map(|a| self.apply_term_scoped(a, scope)).collect(),
            ),
        }
    }

    fn apply_formula_scoped(&self, f: &Formula, scope: &mut Vec<usize>) -> Formula {
        match f {
            Formula::Atom(idx, args) => Formula::Atom(
                *idx,
                args.iter().map(|a| self.apply_term_scoped(a, scope)).collect(),
            ),
            Formula::Not(inner) => Formula::not(self.apply_formula_scoped(inner, scope)),
            Formula::And(l, r) => Formula::and(
                self.apply_formula_scoped(l, scope),
                self.apply_formula_scoped(r, scope),
            ),
            Formula::Or(l, r) => Formula::or(
                self.apply_formula_scoped(l, scope),
                self.apply_formula_scoped(r, scope),
            ),
            Formula::Implies(l, r) => Formula::implies(
                self.apply_formula_scoped(l, scope),
                self.apply_formula_scoped(r, scope),
            ),
            Formula::ForAll(vars, body) => {
                let added = vars.len();
                scope.extend(vars.iter().copied());
                let new_body = self.apply_formula_scoped(body, scope);
                scope.truncate(scope.len() - added);
                Formula::ForAll(vars.clone(), Box::new(new_body))
            }
            Formula::Exists(vars, body) => {
                let added = vars.len();
                scope.extend(vars.iter().copied());
                let new_body = self.apply_formula_scoped(body, scope);
                scope.truncate(scope.len() - added);
                Formula::Exists(vars.clone(), Box::new(new_body))
            }
        }
    }
}
