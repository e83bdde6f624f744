//! Miscellaneous support code not specific to any one component.

pub mod log;
