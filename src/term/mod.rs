/*!
Terms --- the first-order expressions built from variables, constants, and
function application.

A [Term] is a tagged tree over *indices* into a [SymbolTable](crate::symbol::SymbolTable),
not over symbol entries directly: the tree is cheap to build, clone, and
compare, and a symbol's declared arity is checked only at use sites
(rendering, unification), per the design note in spec §4.B.
*/

use crate::symbol::SymbolKind;
use crate::types::err::ArityError;

/// A first-order term.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum Term {
    /// A variable, identified by its dense index among variables.
    Var(usize),
    /// A constant, identified by its dense index among constants.
    Const(usize),
    /// Function application: the function's dense index among functions, and its arguments.
    FunApp(usize, Vec<Term>),
}

impl Term {
    /// Structural equality. Variable occurrences compare by index --- the CNF pipeline has
    /// already renamed apart any binders that would otherwise need alpha-equivalence.
    pub fn equal(&self, other: &Term) -> bool {
        self == other
    }

    /// The free variables of this term, in order of (first) occurrence. Duplicates are
    /// preserved; callers that need a set build one from this list.
    pub fn free_vars(&self) -> Vec<usize> {
        let mut out = Vec::new();
        self.collect_free_vars(&mut out);
        out
    }

    fn collect_free_vars(&self, out: &mut Vec<usize>) {
        match self {
            Term::Var(v) => out.push(*v),
            Term::Const(_) => {}
            Term::FunApp(_, args) => {
                for a in args {
                    a.collect_free_vars(out);
                }
            }
        }
    }

    /// The depth of this term: a leaf (variable or constant) has depth 1, and `f(t1..tn)`
    /// has depth `1 + max(depth(ti))`.
    pub fn depth(&self) -> usize {
        match self {
            Term::Var(_) | Term::Const(_) => 1,
            Term::FunApp(_, args) => 1 + args.iter().map(Term::depth).max().unwrap_or(0),
        }
    }

    /// The node count of this term, used by the clause-set complexity heuristic.
    pub fn size(&self) -> usize {
        match self {
            Term::Var(_) | Term::Const(_) => 1,
            Term::FunApp(_, args) => 1 + args.iter().map(Term::size).sum::<usize>(),
        }
    }

    /// True if this term contains no variables.
    pub fn is_ground(&self) -> bool {
        match self {
            Term::Var(_) => false,
            Term::Const(_) => true,
            Term::FunApp(_, args) => args.iter().all(Term::is_ground),
        }
    }

    /// Checks that a function-application term's argument count matches the symbol table's
    /// declared arity for its function index. Only ever called at a use site (rendering,
    /// inference) --- construction itself is not checked, per spec §4.B.
    pub fn check_arity(&self, symbols: &crate::symbol::SymbolTable) -> Result<(), ArityError> {
        match self {
            Term::Var(_) | Term::Const(_) => Ok(()),
            Term::FunApp(idx, args) => {
                for a in args {
                    a.check_arity(symbols)?;
                }
                let entry = symbols
                    .resolve(SymbolKind::Function, *idx)
                    .expect("well-formed term references an interned function");
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
        }
    }
}
