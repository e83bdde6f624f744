/*!
The Otter-architecture clause set: an *active* set of clauses that have
already been resolved against each other, and a *passive* pool of clauses
still waiting their turn, selected round-robin between two priority queues
so that the saturation loop in [prover](crate::prover) neither starves on
deeply nested clauses (pure weight ordering) nor stalls on a few cheap but
useless ones (pure age ordering).

Clauses are stored once, densely, in an append-only `store: Vec<Clause>`
indexed by a `usize` id handed back from [insert](ClauseSet::insert).
Both passive queues and the active set refer to clauses by this id rather
than owning a copy. "Soft deletion" means a removed or already-selected id
is dropped from whichever [IndexHeap](crate::generic::index_heap::IndexHeap)
it lived in and flagged in `no_longer_passive`, rather than compacting the
store --- ids stay stable for the lifetime of the clause set.
*/

use std::cmp::Reverse;
use std::collections::HashSet;

use crate::clause::Clause;
use crate::generic::index_heap::IndexHeap;
use crate::misc::log::targets;
use crate::resolution::{get_factors, get_resolutions};
use crate::subsumption::{fingerprint, Fingerprint, FingerprintConfig, SubsumptionIndex};
use crate::symbol::SymbolTable;

/// The clause set: active clauses, two passive priority queues, and a fingerprint index kept
/// for future redundancy-elimination work. The index is populated on every insert and
/// activation but nothing currently queries it to discard a clause --- this prover implements
/// no subsumption beyond tautology and literal-duplicate removal (see [Clause::is_tautology]
/// and [Clause::built]).
pub struct ClauseSet {
    store: Vec<Clause>,
    fingerprints: Vec<Fingerprint>,
    no_longer_passive: Vec<bool>,
    active_ids: HashSet<usize>,
    age_queue: IndexHeap<Reverse<u64>>,
    heuristic_queue: IndexHeap<Reverse<u64>>,
    subsumption_index: SubsumptionIndex,
    fingerprint_cfg: FingerprintConfig,
    next_age: u64,
    selection_counter: usize,
    /// Every `ratio`th selection is drawn from the heuristic (complexity) queue; the rest come
    /// from the age queue.
    ratio: usize,
}

impl ClauseSet {
    /// Construct an empty clause set. `ratio` is the Otter selection ratio `R`: one in every
    /// `R` selections favours simplicity over age.
    pub fn new(fingerprint_cfg: FingerprintConfig, ratio: usize) -> Self {
        ClauseSet {
            store: Vec::new(),
            fingerprints: Vec::new(),
            no_longer_passive: Vec::new(),
            active_ids: HashSet::new(),
            age_queue: IndexHeap::default(),
            heuristic_queue: IndexHeap::default(),
            subsumption_index: SubsumptionIndex::new(),
            fingerprint_cfg,
            next_age: 0,
            selection_counter: 0,
            ratio: ratio.max(1),
        }
    }

    /// The clause stored under `id`.
    pub fn clause(&self, id: usize) -> &Clause {
        &self.store[id]
    }

    /// The number of clauses currently in the active set.
    pub fn active_len(&self) -> usize {
        self.active_ids.len()
    }

    /// The total number of clauses ever inserted (active, passive, or soft-deleted).
    pub fn total_len(&self) -> usize {
        self.store.len()
    }

    /// True if `id` is a member of the active set.
    pub fn is_active(&self, id: usize) -> bool {
        self.active_ids.contains(&id)
    }

    /// Insert a new clause into the passive pool. Rejects tautologies outright. Returns the
    /// freshly assigned id, or `None` if the clause was discarded.
    pub fn insert(&mut self, clause: Clause) -> Option<usize> {
        if clause.is_tautology() {
            return None;
        }
        let fp = fingerprint(&clause, &self.fingerprint_cfg);

        let id = self.store.len();
        let age = self.next_age;
        self.next_age += 1;
        let complexity = clause.complexity();

        self.store.push(clause);
        self.fingerprints.push(fp);
        self.no_longer_passive.push(false);

        self.age_queue.add(id, Reverse(age));
        self.age_queue.activate(id);
        self.heuristic_queue.add(id, Reverse(complexity));
        self.heuristic_queue.activate(id);

        log::trace!(target: targets::CLAUSE_SET, "inserted clause {id} (complexity {complexity})");
        Some(id)
    }

    /// Select the next given clause per the age/heuristic ratio, removing it from both passive
    /// queues. Returns `None` once the passive pool is exhausted.
    pub fn select_clause(&mut self) -> Option<usize> {
        self.selection_counter += 1;
        let use_heuristic = self.selection_counter % self.ratio == 0;

        let id = if use_heuristic {
            self.heuristic_queue.pop_max()
        } else {
            self.age_queue.pop_max()
        }?;

        if use_heuristic {
            self.age_queue.remove(id);
        } else {
            self.heuristic_queue.remove(id);
        }
        self.no_longer_passive[id] = true;
        log::trace!(target: targets::CLAUSE_SET, "selected clause {id} via {}", if use_heuristic { "heuristic" } else { "age" });
        Some(id)
    }

    /// Move a selected clause into the active set, indexing its fingerprint.
    pub fn activate(&mut self, id: usize) {
        self.active_ids.insert(id);
        let fp = self.fingerprints[id];
        self.subsumption_index.insert(id, fp);
    }

    /// Remove a clause entirely: drop it from the active set (if present), both passive queues,
    /// and the subsumption index.
    pub fn remove(&mut self, id: usize) {
        self.active_ids.remove(&id);
        self.no_longer_passive[id] = true;
        self.age_queue.remove(id);
        self.heuristic_queue.remove(id);
        self.subsumption_index.remove(id);
    }

    /// Every non-tautologous resolvent of the given clause `given_id` against the rest of the
    /// active set, gated by the set-of-support restriction: a pair is skipped unless at least
    /// one of the two parents carries `sos`.
    pub fn generate_resolvents(&self, given_id: usize, symbols: &mut SymbolTable) -> Vec<Clause> {
        let given = self.store[given_id].clone();
        let mut out = Vec::new();
        for &other_id in &self.active_ids {
            if other_id == given_id {
                continue;
            }
            let other = &self.store[other_id];
            if !given.sos && !other.sos {
                continue;
            }
            out.extend(get_resolutions(&given, other, symbols));
        }
        out
    }

    /// Every non-tautologous factor of the given clause.
    pub fn generate_factors(&self, given_id: usize) -> Vec<Clause> {
        get_factors(&self.store[given_id])
    }
}
