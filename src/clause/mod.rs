/*!
Literals and clauses --- the quantifier-free disjunctions the saturation
loop operates over, plus the local reductions (duplicate-literal removal,
tautology detection) applied whenever a clause is built.
*/

use crate::term::Term;

/// An atomic proposition: a relation's dense index and its arguments.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Atom {
    /// Dense index of the relation symbol.
    pub relation: usize,
    /// The atom's arguments.
    pub args: Vec<Term>,
}

impl Atom {
    /// Construct an atom.
    pub fn new(relation: usize, args: Vec<Term>) -> Self {
        Atom { relation, args }
    }

    /// Structural equality.
    pub fn equal(&self, other: &Atom) -> bool {
        self == other
    }

    /// True if every argument of this atom is ground.
    pub fn is_ground(&self) -> bool {
        self.args.iter().all(Term::is_ground)
    }

    /// The maximum depth over this atom's argument terms, or 0 if it is nullary.
    pub fn max_arg_depth(&self) -> usize {
        self.args.iter().map(Term::depth).max().unwrap_or(0)
    }

    /// The summed node count of this atom's argument terms.
    pub fn total_size(&self) -> usize {
        self.args.iter().map(Term::size).sum()
    }
}

/// An atom paired with a polarity.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Literal {
    /// The underlying atom.
    pub atom: Atom,
    /// `true` if the literal is negated.
    pub negated: bool,
}

impl Literal {
    /// Construct a literal.
    pub fn new(atom: Atom, negated: bool) -> Self {
        Literal { atom, negated }
    }

    /// A positive literal over `atom`.
    pub fn positive(atom: Atom) -> Self {
        Literal::new(atom, false)
    }

    /// A negative literal over `atom`.
    pub fn negative(atom: Atom) -> Self {
        Literal::new(atom, true)
    }

    /// The negation of this literal --- same atom, opposite polarity.
    pub fn complement(&self) -> Self {
        Literal::new(self.atom.clone(), !self.negated)
    }

    /// True if `self` and `other` have structurally equal atoms.
    pub fn atoms_equal(&self, other: &Literal) -> bool {
        self.atom.equal(&other.atom)
    }
}

/// A clause: an ordered disjunction of literals, plus a set-of-support flag.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Clause {
    /// The literals of this clause.
    pub literals: Vec<Literal>,
    /// Set-of-support: true if this clause descends from the negated goal.
    pub sos: bool,
}

impl Clause {
    /// Build a clause from literals, without deduplicating or checking for tautology.
    /// Most callers want [Clause::built](Clause::built) instead.
    pub fn raw(literals: Vec<Literal>, sos: bool) -> Self {
        Clause { literals, sos }
    }

    /// Build a clause, first removing syntactically duplicate literals. This is the
    /// constructor every producer of a clause (CNF extraction, resolution, factoring)
    /// should use.
    pub fn built(literals: Vec<Literal>, sos: bool) -> Self {
        Clause {
            literals: remove_duplicates(literals),
            sos,
        }
    }

    /// The empty clause --- no literals, i.e. `false`. Deriving this signals refutation.
    pub fn empty(sos: bool) -> Self {
        Clause {
            literals: Vec::new(),
            sos,
        }
    }

    /// True if this clause has no literals.
    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    /// The number of literals.
    pub fn len(&self) -> usize {
        self.literals.len()
    }

    /// True if some pair of literals in this clause is `(P, not P)` for structurally equal `P`.
    pub fn is_tautology(&self) -> bool {
        is_tautology(&self.literals)
    }

    /// The complexity heuristic used to order the weight-based passive queue:
    /// `atomCount * 10 + avgDepth * 10 + totalTermSize * 5`, where depth/size are computed
    /// over every argument term of every literal.
    pub fn complexity(&self) -> u64 {
        let atom_count = self.literals.len() as u64;
        if atom_count == 0 {
            return 0;
        }
        let depths: Vec<usize> = self
            .literals
            .iter()
            .flat_map(|l| l.atom.args.iter().map(Term::depth))
            .collect();
        let avg_depth = if depths.is_empty() {
            0
        } else {
            (depths.iter().sum::<usize>() / depths.len()) as u64
        };
        let total_size: u64 = self
            .literals
            .iter()
            .map(|l| l.atom.total_size() as u64)
            .sum();
        atom_count * 10 + avg_depth * 10 + total_size * 5
    }
}

/// Structural equality between two atoms.
pub fn atoms_equal(a: &Atom, b: &Atom) -> bool {
    a.equal(b)
}

/// Structural equality between two terms.
pub fn terms_equal(a: &Term, b: &Term) -> bool {
    a.equal(b)
}

/// Remove syntactically duplicate literals (same atom, same polarity), preserving the first
/// occurrence and its polarity. O(n^2), per spec §4.E.
pub fn remove_duplicates(literals: Vec<Literal>) -> Vec<Literal> {
    let mut out: Vec<Literal> = Vec::with_capacity(literals.len());
    for lit in literals {
        let already_present = out
            .iter()
            .any(|kept| kept.atoms_equal(&lit) && kept.negated == lit.negated);
        if !already_present {
            out.push(lit);
        }
    }
    out
}

/// True if some pair `(i, j)` has structurally equal atoms and opposite polarity.
pub fn is_tautology(literals: &[Literal]) -> bool {
    for i in 0..literals.len() {
        for j in (i + 1)..literals.len() {
            if literals[i].negated != literals[j].negated && literals[i].atoms_equal(&literals[j])
            {
                return true;
            }
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    fn atom(rel: usize, args: Vec<Term>) -> Atom {
        Atom::new(rel, args)
    }

    #[test]
    fn dedup_preserves_first_occurrence() {
        let a = atom(0, vec![Term::Var(0)]);
        let lits = vec![
            Literal::positive(a.clone()),
            Literal::positive(a.clone()),
            Literal::negative(a),
        ];
        let out = remove_duplicates(lits);
        assert_eq!(out.len(), 2);
        assert!(!out[0].negated);
        assert!(out[1].negated);
    }

    #[test]
    fn tautology_detected_across_positions() {
        let a = atom(0, vec![Term::Const(1)]);
        let lits = vec![
            Literal::negative(atom(1, vec![Term::Const(0)])),
            Literal::positive(a.clone()),
            Literal::negative(a),
        ];
        assert!(is_tautology(&lits));
    }

    #[test]
    fn non_tautology_clause() {
        let lits = vec![
            Literal::positive(atom(0, vec![Term::Const(1)])),
            Literal::positive(atom(1, vec![Term::Const(2)])),
        ];
        assert!(!is_tautology(&lits));
    }

    #[test]
    fn empty_clause_is_not_tautology_and_has_zero_complexity() {
        let c = Clause::empty(true);
        assert!(!c.is_tautology());
        assert_eq!(c.complexity(), 0);
    }

    #[test]
    fn built_clause_deduplicates() {
        let a = atom(0, vec![Term::Var(0)]);
        let c = Clause::built(vec![Literal::positive(a.clone()), Literal::positive(a)], false);
        assert_eq!(c.len(), 1);
    }
}
