/*!
Rendering terms, formulas, and clauses as concrete syntax.

Every type here needs a [SymbolTable] to recover human-readable names from
dense indices, so none of them can implement [core::fmt::Display] directly.
Instead [Renderable::display] wraps a value together with the table it
should be rendered against in a small [Render] adaptor that *does*
implement `Display`, so call sites read naturally: `format!("{}", clause.display(&symbols))`.

Operator precedence, tightest to loosest: `¬`, `∧`, `∨`, `→`, with
quantifiers printed as a prefix that extends as far right as the rest of
the formula allows. A subformula is parenthesised only when printing it
flat would change which operator binds it.
*/

use std::fmt;

use crate::clause::{Atom, Clause, Literal};
use crate::formula::Formula;
use crate::symbol::SymbolKind;
use crate::symbol::SymbolTable;
use crate::term::Term;

const PREC_QUANTIFIER: u8 = 0;
const PREC_IMPLIES: u8 = 1;
const PREC_OR: u8 = 2;
const PREC_AND: u8 = 3;
const PREC_UNARY: u8 = 4;

fn name_of(symbols: &SymbolTable, kind: SymbolKind, index: usize, fallback: char) -> String {
    symbols
        .resolve(kind, index)
        .map(|e| e.name)
        .unwrap_or_else(|_| format!("{fallback}{index}"))
}

/// Render a term as concrete syntax: `f(a, g(x))`.
pub fn render_term(t: &Term, symbols: &SymbolTable) -> String {
    match t {
        Term::Var(v) => name_of(symbols, SymbolKind::Variable, *v, 'x'),
        Term::Const(c) => name_of(symbols, SymbolKind::Constant, *c, 'c'),
        Term::FunApp(f, args) => {
            let name = name_of(symbols, SymbolKind::Function, *f, 'f');
            if args.is_empty() {
                name
            } else {
                let rendered: Vec<String> = args.iter().map(|a| render_term(a, symbols)).collect();
                format!("{name}({})", rendered.join(", "))
            }
        }
    }
}

fn render_atom(atom: &Atom, symbols: &SymbolTable) -> String {
    let name = name_of(symbols, SymbolKind::Relation, atom.relation, 'r');
    if atom.args.is_empty() {
        name
    } else {
        let rendered: Vec<String> = atom.args.iter().map(|a| render_term(a, symbols)).collect();
        format!("{name}({})", rendered.join(", "))
    }
}

/// Render a literal: `P(x)` or `¬P(x)`.
pub fn render_literal(lit: &Literal, symbols: &SymbolTable) -> String {
    if lit.negated {
        format!("¬{}", render_atom(&lit.atom, symbols))
    } else {
        render_atom(&lit.atom, symbols)
    }
}

/// Render a clause as a disjunction of literals, or `⊥` if empty.
pub fn render_clause(clause: &Clause, symbols: &SymbolTable) -> String {
    if clause.literals.is_empty() {
        return "\u{22a5}".to_string();
    }
    clause
        .literals
        .iter()
        .map(|l| render_literal(l, symbols))
        .collect::<Vec<_>>()
        .join(" \u{2228} ")
}

fn parenthesize_if(s: String, prec: u8, parent_prec: u8) -> String {
    if prec < parent_prec {
        format!("({s})")
    } else {
        s
    }
}

fn var_list(vars: &[usize], symbols: &SymbolTable) -> String {
    vars.iter()
        .map(|v| name_of(symbols, SymbolKind::Variable, *v, 'x'))
        .collect::<Vec<_>>()
        .join(", ")
}

fn render_formula_prec(f: &Formula, symbols: &SymbolTable, parent_prec: u8) -> String {
    match f {
        Formula::Atom(rel, args) => render_atom(&Atom::new(*rel, args.clone()), symbols),
        Formula::Not(inner) => format!("\u{ac}{}", render_formula_prec(inner, symbols, PREC_UNARY)),
        Formula::And(l, r) => {
            let s = format!(
                "{} \u{2227} {}",
                render_formula_prec(l, symbols, PREC_AND),
                render_formula_prec(r, symbols, PREC_AND)
            );
            parenthesize_if(s, PREC_AND, parent_prec)
        }
        Formula::Or(l, r) => {
            let s = format!(
                "{} \u{2228} {}",
                render_formula_prec(l, symbols, PREC_OR),
                render_formula_prec(r, symbols, PREC_OR)
            );
            parenthesize_if(s, PREC_OR, parent_prec)
        }
        Formula::Implies(l, r) => {
            let s = format!(
                "{} \u{2192} {}",
                render_formula_prec(l, symbols, PREC_OR),
                render_formula_prec(r, symbols, PREC_IMPLIES)
            );
            parenthesize_if(s, PREC_IMPLIES, parent_prec)
        }
        Formula::ForAll(vars, body) => {
            let s = format!("\u{2200}{}. {}", var_list(vars, symbols), render_formula_prec(body, symbols, PREC_QUANTIFIER));
            parenthesize_if(s, PREC_QUANTIFIER, parent_prec)
        }
        Formula::Exists(vars, body) => {
            let s = format!("\u{2203}{}. {}", var_list(vars, symbols), render_formula_prec(body, symbols, PREC_QUANTIFIER));
            parenthesize_if(s, PREC_QUANTIFIER, parent_prec)
        }
    }
}

/// Render a formula as concrete syntax, using Unicode connectives.
pub fn render_formula(f: &Formula, symbols: &SymbolTable) -> String {
    render_formula_prec(f, symbols, PREC_QUANTIFIER)
}

/// A value paired with the symbol table needed to render it, implementing [fmt::Display].
pub struct Render<'a, T> {
    value: &'a T,
    symbols: &'a SymbolTable,
}

/// Implemented by every type that needs a [SymbolTable] to render as concrete syntax.
pub trait Renderable {
    /// Render this value against `symbols`.
    fn rendered(&self, symbols: &SymbolTable) -> String;

    /// Pair this value with `symbols` in a [Render] adaptor that implements [fmt::Display].
    fn display<'a>(&'a self, symbols: &'a SymbolTable) -> Render<'a, Self>
    where
        Self: Sized,
    {
        Render {
            value: self,
            symbols,
        }
    }
}

impl<'a, T: Renderable> fmt::Display for Render<'a, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value.rendered(self.symbols))
    }
}

impl Renderable for Term {
    fn rendered(&self, symbols: &SymbolTable) -> String {
        render_term(self, symbols)
    }
}

impl Renderable for Atom {
    fn rendered(&self, symbols: &SymbolTable) -> String {
        render_atom(self, symbols)
    }
}

impl Renderable for Literal {
    fn rendered(&self, symbols: &SymbolTable) -> String {
        render_literal(self, symbols)
    }
}

impl Renderable for Clause {
    fn rendered(&self, symbols: &SymbolTable) -> String {
        render_clause(self, symbols)
    }
}

impl Renderable for Formula {
    fn rendered(&self, symbols: &SymbolTable) -> String {
        render_formula(self, symbols)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbol::SymbolKind;

    fn symbols_with_pq() -> (SymbolTable, usize, usize, usize) {
        let mut symbols = SymbolTable::new();
        let p = symbols.intern(SymbolKind::Relation, "P".into(), Some(1)).unwrap().index;
        let q = symbols.intern(SymbolKind::Relation, "Q".into(), Some(1)).unwrap().index;
        let x = symbols.intern(SymbolKind::Variable, "x".into(), None).unwrap().index;
        (symbols, p, q, x)
    }

    #[test]
    fn empty_clause_renders_as_bottom() {
        let symbols = SymbolTable::new();
        assert_eq!(render_clause(&Clause::empty(false), &symbols), "\u{22a5}");
    }

    #[test]
    fn negation_of_conjunction_is_parenthesized() {
        let (symbols, p, q, x) = symbols_with_pq();
        let f = Formula::not(Formula::and(
            Formula::Atom(p, vec![Term::Var(x)]),
            Formula::Atom(q, vec![Term::Var(x)]),
        ));
        assert_eq!(render_formula(&f, &symbols), "\u{ac}(P(x) \u{2227} Q(x))");
    }

    #[test]
    fn conjunction_inside_disjunction_has_no_parens() {
        let (symbols, p, q, x) = symbols_with_pq();
        let f = Formula::or(
            Formula::Atom(p, vec![Term::Var(x)]),
            Formula::and(Formula::Atom(p, vec![Term::Var(x)]), Formula::Atom(q, vec![Term::Var(x)])),
        );
        assert_eq!(render_formula(&f, &symbols), "P(x) \u{2228} P(x) \u{2227} Q(x)");
    }

    #[test]
    fn quantifier_nested_in_disjunction_is_parenthesized() {
        let (symbols, p, _q, x) = symbols_with_pq();
        let f = Formula::or(
            Formula::ForAll(vec![x], Box::new(Formula::Atom(p, vec![Term::Var(x)]))),
            Formula::Atom(p, vec![Term::Var(x)]),
        );
        assert_eq!(render_formula(&f, &symbols), "(\u{2200}x. P(x)) \u{2228} P(x)");
    }

    #[test]
    fn display_adaptor_matches_render_function() {
        let (symbols, p, _q, x) = symbols_with_pq();
        let t = Term::Var(x);
        let atom = Formula::Atom(p, vec![t.clone()]);
        assert_eq!(format!("{}", atom.display(&symbols)), render_formula(&atom, &symbols));
    }
}
