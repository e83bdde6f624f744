/*!
Run configuration for the prover.

Simplified from the teacher's `ConfigOption<T>` wrapper (which tracks a
min/max/default for runtime-adjustable solver knobs): every option here is
fixed for the duration of a single [proves](crate::prover::proves) call, so
a plain struct with a [Default] impl is enough.
*/

/// Options governing the given-clause saturation loop.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    /// The search gives up (declaring the goal not proved within budget) once the active set
    /// reaches this many clauses.
    pub max_active_clauses: usize,
    /// The Otter selection ratio `R`: one in every `R` given-clause selections is drawn from
    /// the complexity-ordered passive queue, the rest from the age-ordered one.
    pub heuristic_ratio: usize,
    /// The number of bits set per symbol in a subsumption fingerprint mask, in `3..=5`.
    pub fingerprint_bits_per_mask: u8,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            max_active_clauses: 10_000,
            heuristic_ratio: 4,
            fingerprint_bits_per_mask: 4,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_documented_values() {
        let cfg = Config::default();
        assert_eq!(cfg.heuristic_ratio, 4);
        assert_eq!(cfg.fingerprint_bits_per_mask, 4);
    }
}
