/*!
The refutation driver: given a theory and a goal, clausify `theory ∪ {¬goal}`
under set-of-support and saturate with [ClauseSet] until either the empty
clause is derived (the goal is proved) or the passive pool runs dry or the
active set outgrows [Config::max_active_clauses] (the goal is not proved
within budget --- which, for an incomplete strategy like set-of-support
resolution, is not the same as the goal being false).
*/

use crate::clause::Clause;
use crate::clause_set::ClauseSet;
use crate::cnf::clausify;
use crate::config::Config;
use crate::formula::Formula;
use crate::misc::log::targets;
use crate::resolution::{get_factors, get_resolutions};
use crate::subsumption::FingerprintConfig;
use crate::symbol::SymbolTable;

/// Cap on how many clauses the axiom-only contradiction check in
/// [axioms_are_contradictory] will generate before giving up. Theory clauses are typically
/// few and small (this is a pre-check, not the main search), so this is set far below
/// [Config::max_active_clauses].
const AXIOM_SATURATION_LIMIT: usize = 512;

/// Saturates `axioms` under unrestricted binary resolution and factoring, independent of
/// set-of-support, to detect a theory that is contradictory on its own --- something the
/// SOS-gated main loop can never find, since SOS only combines two non-support clauses when
/// the goal's negation is involved. Stops at [AXIOM_SATURATION_LIMIT] clauses if no
/// contradiction is found by then.
fn axioms_are_contradictory(axioms: &[Clause], symbols: &mut SymbolTable, limit: usize) -> bool {
    let mut clauses: Vec<Clause> = axioms.to_vec();
    if clauses.iter().any(Clause::is_empty) {
        return true;
    }

    let mut frontier: Vec<usize> = (0..clauses.len()).collect();
    while !frontier.is_empty() && clauses.len() < limit {
        let mut generated = Vec::new();
        for &i in &frontier {
            for clause in get_factors(&clauses[i]) {
                if clause.is_empty() {
                    return true;
                }
                generated.push(clause);
            }
            for j in 0..clauses.len() {
                if j == i {
                    continue;
                }
                for clause in get_resolutions(&clauses[i], &clauses[j], symbols) {
                    if clause.is_empty() {
                        return true;
                    }
                    generated.push(clause);
                }
            }
        }

        frontier = Vec::new();
        for clause in generated {
            if clauses.len() >= limit {
                break;
            }
            if clauses.contains(&clause) {
                continue;
            }
            clauses.push(clause);
            frontier.push(clauses.len() - 1);
        }
    }
    false
}

/// Counters describing one run of the saturation loop, returned alongside the verdict by
/// [proves_with_stats].
#[derive(Clone, Copy, Debug, Default)]
pub struct Stats {
    /// True if the empty clause was derived.
    pub proved: bool,
    /// The number of given clauses selected from the passive pool and activated.
    pub given_clause_selections: usize,
    /// The total number of clauses ever produced (initial clausification plus every
    /// resolvent and factor), whether or not they were ultimately retained.
    pub clauses_generated: usize,
    /// The number of those clauses actually kept in the clause set (survived the tautology
    /// check in [ClauseSet::insert]).
    pub clauses_retained: usize,
    /// The largest active-set size reached during the run.
    pub max_active_reached: usize,
}

/// True if `theory` entails `goal`, searched for via refutation within `config`'s budget.
/// A `false` result means no refutation was found within budget --- for an incomplete
/// strategy like set-of-support resolution, that is weaker than a guarantee that `goal` does
/// not follow from `theory`.
pub fn proves(theory: &[Formula], goal: &Formula, symbols: &mut SymbolTable, config: &Config) -> bool {
    proves_with_stats(theory, goal, symbols, config).proved
}

/// As [proves], but also returns the [Stats] collected during the search.
pub fn proves_with_stats(
    theory: &[Formula],
    goal: &Formula,
    symbols: &mut SymbolTable,
    config: &Config,
) -> Stats {
    let mut stats = Stats::default();
    let fingerprint_cfg = FingerprintConfig {
        seed: 42,
        bits_per_mask: config.fingerprint_bits_per_mask,
    };
    let mut set = ClauseSet::new(fingerprint_cfg, config.heuristic_ratio);

    let mut axiom_clauses = Vec::new();
    for axiom in theory {
        match clausify(axiom, symbols, false) {
            Ok(clauses) => axiom_clauses.extend(clauses),
            Err(e) => {
                log::warn!(target: targets::PROVER, "axiom failed to clausify: {e}");
                return stats;
            }
        }
    }
    let goal_clauses = match clausify(&Formula::not(goal.clone()), symbols, true) {
        Ok(clauses) => clauses,
        Err(e) => {
            log::warn!(target: targets::PROVER, "negated goal failed to clausify: {e}");
            return stats;
        }
    };

    if axioms_are_contradictory(&axiom_clauses, symbols, AXIOM_SATURATION_LIMIT) {
        log::info!(target: targets::PROVER, "theory is contradictory on its own, independent of the goal");
        stats.proved = true;
        return stats;
    }

    let mut initial = axiom_clauses;
    initial.extend(goal_clauses);

    for clause in initial {
        stats.clauses_generated += 1;
        let is_empty = clause.is_empty();
        if set.insert(clause).is_some() {
            stats.clauses_retained += 1;
        }
        if is_empty {
            stats.proved = true;
            return stats;
        }
    }

    loop {
        if set.active_len() >= config.max_active_clauses {
            log::info!(target: targets::PROVER, "budget exhausted at {} active clauses", set.active_len());
            break;
        }

        let Some(given_id) = set.select_clause() else {
            log::info!(target: targets::PROVER, "passive pool exhausted after {} selections", stats.given_clause_selections);
            break;
        };
        stats.given_clause_selections += 1;
        set.activate(given_id);

        if set.clause(given_id).is_empty() {
            stats.proved = true;
            break;
        }

        let mut generated = set.generate_factors(given_id);
        generated.extend(set.generate_resolvents(given_id, symbols));

        let mut derived_empty = false;
        for clause in generated {
            stats.clauses_generated += 1;
            let is_empty = clause.is_empty();
            if set.insert(clause).is_some() {
                stats.clauses_retained += 1;
            }
            derived_empty |= is_empty;
        }

        stats.max_active_reached = stats.max_active_reached.max(set.active_len());
        if derived_empty {
            stats.proved = true;
            break;
        }
    }

    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbol::SymbolKind;
    use crate::term::Term;

    fn rel(symbols: &mut SymbolTable, name: &str, arity: usize) -> usize {
        symbols.intern(SymbolKind::Relation, name.to_string(), Some(arity)).unwrap().index
    }

    fn var(symbols: &mut SymbolTable, name: &str) -> usize {
        symbols.intern(SymbolKind::Variable, name.to_string(), None).unwrap().index
    }

    fn constant(symbols: &mut SymbolTable, name: &str) -> usize {
        symbols.intern(SymbolKind::Constant, name.to_string(), None).unwrap().index
    }

    #[test]
    fn reflexivity_of_implication() {
        let mut symbols = SymbolTable::new();
        let p = rel(&mut symbols, "p", 1);
        let a = constant(&mut symbols, "a");
        let goal = Formula::implies(
            Formula::Atom(p, vec![Term::Const(a)]),
            Formula::Atom(p, vec![Term::Const(a)]),
        );
        assert!(proves(&[], &goal, &mut symbols, &Config::default()));
    }

    #[test]
    fn contrapositive_is_provable_from_implication() {
        let mut symbols = SymbolTable::new();
        let p = rel(&mut symbols, "p", 1);
        let q = rel(&mut symbols, "q", 1);
        let x = var(&mut symbols, "x0");
        let axiom = Formula::ForAll(
            vec![x],
            Box::new(Formula::implies(
                Formula::Atom(p, vec![Term::Var(x)]),
                Formula::Atom(q, vec![Term::Var(x)]),
            )),
        );
        let goal = Formula::ForAll(
            vec![x],
            Box::new(Formula::implies(
                Formula::not(Formula::Atom(q, vec![Term::Var(x)])),
                Formula::not(Formula::Atom(p, vec![Term::Var(x)])),
            )),
        );
        assert!(proves(&[axiom], &goal, &mut symbols, &Config::default()));
    }

    #[test]
    fn modus_ponens() {
        let mut symbols = SymbolTable::new();
        let p = rel(&mut symbols, "p", 1);
        let q = rel(&mut symbols, "q", 1);
        let a = constant(&mut symbols, "a");
        let x = var(&mut symbols, "x0");
        let fact = Formula::Atom(p, vec![Term::Const(a)]);
        let rule = Formula::ForAll(
            vec![x],
            Box::new(Formula::implies(
                Formula::Atom(p, vec![Term::Var(x)]),
                Formula::Atom(q, vec![Term::Var(x)]),
            )),
        );
        let goal = Formula::Atom(q, vec![Term::Const(a)]);
        assert!(proves(&[fact, rule], &goal, &mut symbols, &Config::default()));
    }

    #[test]
    fn universal_instantiation() {
        let mut symbols = SymbolTable::new();
        let p = rel(&mut symbols, "p", 1);
        let a = constant(&mut symbols, "a");
        let x = var(&mut symbols, "x0");
        let axiom = Formula::ForAll(vec![x], Box::new(Formula::Atom(p, vec![Term::Var(x)])));
        let goal = Formula::Atom(p, vec![Term::Const(a)]);
        assert!(proves(&[axiom], &goal, &mut symbols, &Config::default()));
    }

    #[test]
    fn non_theorem_is_not_proved_within_budget() {
        let mut symbols = SymbolTable::new();
        let p = rel(&mut symbols, "p", 1);
        let a = constant(&mut symbols, "a");
        let goal = Formula::Atom(p, vec![Term::Const(a)]);
        assert!(!proves(&[], &goal, &mut symbols, &Config::default()));
    }

    #[test]
    fn factoring_is_required_to_close_the_refutation() {
        // {P(x) \/ P(y), ~P(u) \/ ~P(v)} is unsatisfiable, but only via factoring P(x) \/ P(y)
        // down to a unit clause first: plain binary resolution alone keeps producing
        // two-literal clauses of the same shape without ever reaching the empty clause.
        let mut symbols = SymbolTable::new();
        let p = rel(&mut symbols, "p", 1);
        let x = var(&mut symbols, "x0");
        let y = var(&mut symbols, "y0");
        let u = var(&mut symbols, "u0");
        let v = var(&mut symbols, "v0");

        let disj = Formula::ForAll(
            vec![x, y],
            Box::new(Formula::or(
                Formula::Atom(p, vec![Term::Var(x)]),
                Formula::Atom(p, vec![Term::Var(y)]),
            )),
        );
        let neg_disj = Formula::ForAll(
            vec![u, v],
            Box::new(Formula::or(
                Formula::not(Formula::Atom(p, vec![Term::Var(u)])),
                Formula::not(Formula::Atom(p, vec![Term::Var(v)])),
            )),
        );
        // Goal is irrelevant to the contradiction directly, but must share the symbol `p` for
        // its negation to participate in set-of-support resolution with the axioms.
        let goal = Formula::Atom(p, vec![Term::Var(x)]);
        assert!(proves(&[disj, neg_disj], &goal, &mut symbols, &Config::default()));
    }

    #[test]
    fn contradictory_theory_proves_a_goal_sharing_its_symbol() {
        let mut symbols = SymbolTable::new();
        let p = rel(&mut symbols, "p", 1);
        let a = constant(&mut symbols, "a");
        let theory = vec![
            Formula::Atom(p, vec![Term::Const(a)]),
            Formula::not(Formula::Atom(p, vec![Term::Const(a)])),
        ];
        let goal = Formula::Atom(p, vec![Term::Const(a)]);
        let stats = proves_with_stats(&theory, &goal, &mut symbols, &Config::default());
        assert!(stats.proved);
        assert_eq!(stats.given_clause_selections, 0, "contradiction found during initial clausification");
    }

    #[test]
    fn contradictory_theory_proves_a_goal_sharing_no_symbol() {
        // theory = {P(a), ~P(a)}, goal = Q(b); the theory is contradictory on its own and the
        // goal shares no relation symbol with it, so set-of-support resolution alone could
        // never reach this refutation.
        let mut symbols = SymbolTable::new();
        let p = rel(&mut symbols, "p", 1);
        let q = rel(&mut symbols, "q", 1);
        let a = constant(&mut symbols, "a");
        let b = constant(&mut symbols, "b");
        let theory = vec![
            Formula::Atom(p, vec![Term::Const(a)]),
            Formula::not(Formula::Atom(p, vec![Term::Const(a)])),
        ];
        let goal = Formula::Atom(q, vec![Term::Const(b)]);
        let stats = proves_with_stats(&theory, &goal, &mut symbols, &Config::default());
        assert!(stats.proved);
        assert_eq!(stats.given_clause_selections, 0, "contradiction found during initial clausification");
    }

    #[test]
    fn determinism_across_repeated_runs() {
        fn run() -> Stats {
            let mut symbols = SymbolTable::new();
            let p = rel(&mut symbols, "p", 1);
            let a = constant(&mut symbols, "a");
            let x = var(&mut symbols, "x0");
            let axiom = Formula::ForAll(vec![x], Box::new(Formula::Atom(p, vec![Term::Var(x)])));
            let goal = Formula::Atom(p, vec![Term::Const(a)]);
            proves_with_stats(&[axiom], &goal, &mut symbols, &Config::default())
        }

        let first = run();
        let second = run();
        assert_eq!(first.proved, second.proved);
        assert_eq!(first.given_clause_selections, second.given_clause_selections);
        assert_eq!(first.clauses_generated, second.clauses_generated);
    }
}
