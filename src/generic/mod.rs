//! Generic, domain-agnostic data structures used by more than one component.

pub mod index_heap;
