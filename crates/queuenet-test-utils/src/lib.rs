//! Test utilities and fixtures for queuenet development.
//!
//! Provides [`ScriptedRng`], a generator that replays a fixed list of unit
//! draws so tests can pin exact sample values, and topology fixtures in
//! [`fixtures`].

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

use rand::RngCore;

/// Replays a cyclic script of unit draws.
///
/// Each `next_u64` encodes the next scripted value `u` so that
/// `rng.gen::<f64>()` yields exactly `u` whenever `u` is a multiple of
/// `2^-53` in `[0, 1)` (any dyadic fraction such as `0.5` or `0.25`).
/// Other values are truncated to the nearest multiple below.
#[derive(Clone, Debug)]
pub struct ScriptedRng {
    units: Vec<f64>,
    cursor: usize,
    draws: usize,
}

impl ScriptedRng {
    /// # Panics
    ///
    /// Panics if `units` is empty or any value lies outside `[0, 1)`.
    pub fn new(units: &[f64]) -> Self {
        assert!(!units.is_empty(), "ScriptedRng needs at least one unit draw");
        assert!(
            units.iter().all(|u| (0.0..1.0).contains(u)),
            "scripted unit draws must lie in [0, 1)"
        );
        Self {
            units: units.to_vec(),
            cursor: 0,
            draws: 0,
        }
    }

    /// Number of 64-bit words handed out so far.
    pub fn draws(&self) -> usize {
        self.draws
    }

    fn next_unit(&mut self) -> f64 {
        let u = self.units[self.cursor];
        self.cursor = (self.cursor + 1) % self.units.len();
        self.draws += 1;
        u
    }
}

impl RngCore for ScriptedRng {
    fn next_u32(&mut self) -> u32 {
        (self.next_u64() >> 32) as u32
    }

    fn next_u64(&mut self) -> u64 {
        let u = self.next_unit();
        ((u * (1u64 << 53) as f64) as u64) << 11
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(8) {
            let bytes = self.next_u64().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn replays_dyadic_units_exactly() {
        let mut rng = ScriptedRng::new(&[0.0, 0.25, 0.5, 0.875]);
        assert_eq!(rng.gen::<f64>(), 0.0);
        assert_eq!(rng.gen::<f64>(), 0.25);
        assert_eq!(rng.gen::<f64>(), 0.5);
        assert_eq!(rng.gen::<f64>(), 0.875);
        // Script cycles.
        assert_eq!(rng.gen::<f64>(), 0.0);
        assert_eq!(rng.draws(), 5);
    }

    #[test]
    #[should_panic(expected = "[0, 1)")]
    fn rejects_unit_one() {
        ScriptedRng::new(&[1.0]);
    }
}
