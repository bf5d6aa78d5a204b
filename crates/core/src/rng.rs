//! RNG module - seeded linear congruential generator
//!
//! Card layouts must be reproducible from the room number the player picks,
//! so card generation runs on this fixed LCG instead of a general-purpose
//! source. The output stream is bit-exact:
//!
//! ```text
//! state  = (state * 1664525 + 1013904223) mod 2^32
//! output = state / 2^32
//! ```
//!
//! Call order (which balls come out, and when) is deliberately *not* seeded;
//! see [`crate::scheduler`].

/// 2^32 as a float, the LCG modulus
const MODULUS: f64 = 4_294_967_296.0;

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeededRng {
    state: u32,
}

impl SeededRng {
    /// Create a new RNG with the given seed.
    ///
    /// Any integer is accepted; it is reduced modulo 2^32 (Euclidean, so
    /// negative seeds land in range too). Zero is a valid seed.
    pub fn new(seed: i64) -> Self {
        Self {
            state: seed.rem_euclid(1 << 32) as u32,
        }
    }

    /// Current internal state
    pub fn state(&self) -> u32 {
        self.state
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m, m = 2^32 via wrapping arithmetic
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Next value in [0, 1)
    pub fn next_f64(&mut self) -> f64 {
        self.next_u32() as f64 / MODULUS
    }

    /// Random index in [0, bound), computed as `floor(next_f64() * bound)`
    pub fn next_index(&mut self, bound: usize) -> usize {
        (self.next_f64() * bound as f64) as usize
    }

    /// Shuffle a slice using Fisher-Yates
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.next_index(i + 1);
            slice.swap(i, j);
        }
    }
}

/// Infinite stream of `next_f64` values
impl Iterator for SeededRng {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        Some(self.next_f64())
    }
}
