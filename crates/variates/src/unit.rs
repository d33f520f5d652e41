//! Park-Miller "minimal standard" generator
//!
//! Multiplicative linear congruential generator with modulus 2^31 - 1 and
//! multiplier 16807, computed with Schrage's decomposition so intermediate
//! products never exceed 31 bits. Every other family in this crate is built
//! on one or two of these unit streams.
//!
//! Reference: S. K. Park and K. W. Miller, "Random Number Generators: Good
//! Ones are Hard to Find", CACM 31(10), 1988.

/// Modulus of the generator (2^31 - 1)
pub const MODULUS: i64 = 2_147_483_647;

const MULTIPLIER: i64 = 16_807;
const SCHRAGE_Q: i64 = 127_773; // MODULUS / MULTIPLIER
const SCHRAGE_R: i64 = 2_836; // MODULUS % MULTIPLIER

/// Seed used by a freshly constructed generator
pub const DEFAULT_SEED: i64 = 65_521;

/// Seed halfway through the period, used for the second stream of the
/// two-stream families so the streams do not overlap in practice.
pub const HALFWAY_SEED: i64 = 676_806_766;

/// Seeds that split the period into 12 evenly spaced ranges of
/// 178,956,970 draws each, for callers that want independent streams.
pub const STREAM_SEEDS: [i64; 12] = [
    1_101_211_447,
    2_021_127_233,
    1_925_176_231,
    1_304_948_567,
    1_375_081_611,
    774_234_184,
    676_806_766,
    934_251_302,
    1_589_551_955,
    1_316_071_563,
    1_713_378_112,
    573_050_001,
];

/// Uniform generator over [0, 1)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitRandom {
    seed: i64,
}

impl Default for UnitRandom {
    fn default() -> Self {
        Self::new()
    }
}

impl UnitRandom {
    pub fn new() -> Self {
        UnitRandom { seed: DEFAULT_SEED }
    }

    /// Create a generator positioned at `seed` (see [`UnitRandom::seed`])
    pub fn with_seed(seed: i64) -> Self {
        let mut unit = Self::new();
        unit.seed(seed);
        unit
    }

    /// Reseed the generator.
    ///
    /// Zero and the modulus are fixed points of the recurrence, so
    /// non-positive seeds become 1 and the modulus becomes modulus - 1.
    pub fn seed(&mut self, seed: i64) {
        self.seed = if seed <= 0 {
            1
        } else if seed == MODULUS {
            MODULUS - 1
        } else {
            seed % MODULUS
        };
    }

    /// Current internal state
    pub fn state(&self) -> i64 {
        self.seed
    }

    /// Advance and return the next integer in [1, MODULUS - 1]
    pub fn next_integer(&mut self) -> i64 {
        let hi = self.seed / SCHRAGE_Q;
        let lo = self.seed % SCHRAGE_Q;
        let test = MULTIPLIER * lo - SCHRAGE_R * hi;
        self.seed = if test > 0 { test } else { test + MODULUS };
        self.seed
    }

    /// Advance and return a real in [0.0, 0.999999999534339]
    pub fn next_real(&mut self) -> f64 {
        (self.next_integer() - 1) as f64 / (MODULUS - 1) as f64
    }
}
