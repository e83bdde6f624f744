/*!
The symbol table --- interns variable, constant, function, and relation names.

Mirrors the structure of the teacher's atom database: a dense, per-kind
index assigned at insertion order, backed by a `Vec` of entries and a
`HashMap` from external identity to that entry, so lookup by identity is
amortised constant-time and lookup by (kind, index) is a direct index.

# Example

```rust
# use otter_prove::symbol::{SymbolTable, SymbolKind};
let mut table = SymbolTable::new();
let p = table.intern(SymbolKind::Relation, "p".to_string(), Some(1)).unwrap();
assert_eq!(p.index, 0);
assert_eq!(table.resolve(SymbolKind::Relation, 0).unwrap().name, "p");
```
*/

use std::collections::HashMap;
use std::fmt;

use crate::misc::log::targets;
use crate::types::err::SymbolError;

/// External identity of a symbol: anything with O(1) equality and hash.
///
/// The teacher ports a language-level unique token; here that token is a
/// plain interned string, since the core has no parser of its own supplying
/// pointer-stable handles. Two symbols are the same iff their identities
/// compare equal.
pub type Identity = String;

/// The closed set of symbol kinds.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum SymbolKind {
    /// A variable, bound by a quantifier or (in a clause) implicitly universal.
    Variable,
    /// A 0-ary constant.
    Constant,
    /// A function symbol of arity >= 1.
    Function,
    /// A relation symbol of arity >= 0.
    Relation,
}

impl fmt::Display for SymbolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SymbolKind::Variable => "variable",
            SymbolKind::Constant => "constant",
            SymbolKind::Function => "function",
            SymbolKind::Relation => "relation",
        };
        write!(f, "{s}")
    }
}

/// A single entry in the symbol table.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Entry {
    /// The external identity used to detect re-intern attempts.
    pub identity: Identity,
    /// The human-readable name consumed by rendering.
    pub name: String,
    /// The kind of this symbol.
    pub kind: SymbolKind,
    /// The arity, for functions and relations. `None` for variables and constants.
    pub arity: Option<usize>,
    /// The dense index assigned to this symbol within its kind, at insertion order.
    pub index: usize,
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[derive(Default)]
struct KindTable {
    entries: Vec<Entry>,
}

/// Interns symbols and assigns them dense, per-kind indices.
pub struct SymbolTable {
    by_identity: HashMap<Identity, (SymbolKind, usize)>,
    variables: KindTable,
    constants: KindTable,
    functions: KindTable,
    relations: KindTable,
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}

impl SymbolTable {
    /// Construct an empty symbol table.
    pub fn new() -> Self {
        SymbolTable {
            by_identity: HashMap::new(),
            variables: KindTable::default(),
            constants: KindTable::default(),
            functions: KindTable::default(),
            relations: KindTable::default(),
        }
    }

    fn table(&self, kind: SymbolKind) -> &KindTable {
        match kind {
            SymbolKind::Variable => &self.variables,
            SymbolKind::Constant => &self.constants,
            SymbolKind::Function => &self.functions,
            SymbolKind::Relation => &self.relations,
        }
    }

    fn table_mut(&mut self, kind: SymbolKind) -> &mut KindTable {
        match kind {
            SymbolKind::Variable => &mut self.variables,
            SymbolKind::Constant => &mut self.constants,
            SymbolKind::Function => &mut self.functions,
            SymbolKind::Relation => &mut self.relations,
        }
    }

    /// Intern a symbol, or return the existing entry if `identity` was already interned
    /// with the same kind and arity.
    ///
    /// Fails with [KindOrArityConflict](SymbolError::KindOrArityConflict) if `identity`
    /// was previously interned with a different kind or arity.
    pub fn intern(
        &mut self,
        kind: SymbolKind,
        identity: Identity,
        arity: Option<usize>,
    ) -> Result<Entry, SymbolError> {
        if let Some(&(existing_kind, index)) = self.by_identity.get(&identity) {
            let existing = self.table(existing_kind).entries[index].clone();
            if existing_kind != kind || existing.arity != arity {
                log::debug!(target: targets::SYMBOL, "conflicting re-intern of {identity}");
                return Err(SymbolError::KindOrArityConflict {
                    existing_kind,
                    requested_kind: kind,
                });
            }
            return Ok(existing);
        }

        let table = self.table_mut(kind);
        let index = table.entries.len();
        let name = identity.clone();
        let entry = Entry {
            identity: identity.clone(),
            name,
            kind,
            arity,
            index,
        };
        table.entries.push(entry.clone());
        self.by_identity.insert(identity, (kind, index));
        log::trace!(target: targets::SYMBOL, "interned {kind} #{index}: {}", entry.name);
        Ok(entry)
    }

    /// Intern a symbol with a display name distinct from its identity (used by the CNF
    /// pipeline's quantifier-freshening stage to derive a fresh variable from an existing one).
    pub fn intern_named(
        &mut self,
        kind: SymbolKind,
        identity: Identity,
        name: String,
        arity: Option<usize>,
    ) -> Result<Entry, SymbolError> {
        let entry = self.intern(kind, identity, arity)?;
        if entry.name != name {
            let table = self.table_mut(kind);
            table.entries[entry.index].name = name.clone();
            let updated = table.entries[entry.index].clone();
            self.by_identity
                .entry(entry.identity.clone())
                .or_insert((kind, entry.index));
            return Ok(updated);
        }
        Ok(entry)
    }

    /// Resolve a symbol by its external identity.
    pub fn resolve_identity(&self, identity: &str) -> Result<Entry, SymbolError> {
        self.by_identity
            .get(identity)
            .map(|&(kind, index)| self.table(kind).entries[index].clone())
            .ok_or(SymbolError::UnresolvedSymbol)
    }

    /// Resolve a symbol by its (kind, dense index) pair.
    pub fn resolve(&self, kind: SymbolKind, index: usize) -> Result<Entry, SymbolError> {
        self.table(kind)
            .entries
            .get(index)
            .cloned()
            .ok_or(SymbolError::UnresolvedSymbol)
    }

    /// The number of symbols interned under `kind`.
    pub fn count(&self, kind: SymbolKind) -> usize {
        self.table(kind).entries.len()
    }

    /// Iterate over all entries of a given kind, in insertion order.
    pub fn iter(&self, kind: SymbolKind) -> impl Iterator<Item = &Entry> {
        self.table(kind).entries.iter()
    }

    /// Allocate a fresh symbol of `kind` with a synthetic identity not otherwise reachable
    /// from user input. Used by quantifier freshening and Skolemisation, both of which must
    /// mint symbols with no pre-existing identity to collide with.
    pub fn fresh(&mut self, kind: SymbolKind, name_hint: &str, arity: Option<usize>) -> Entry {
        let mut counter = self.table(kind).entries.len();
        loop {
            let identity = format!("${kind}#{counter}");
            if !self.by_identity.contains_key(&identity) {
                let entry = self
                    .intern_named(kind, identity, format!("{name_hint}#{counter}"), arity)
                    .expect("freshly minted identity cannot conflict");
                return entry;
            }
            counter += 1;
        }
    }
}
