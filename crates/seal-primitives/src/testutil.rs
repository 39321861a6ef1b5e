//! Deterministic and failing RNGs for exercising random-draw paths.

use rand::{CryptoRng, RngCore};

/// Yields all-0xff blocks (above the curve order) `rejects_left` times,
/// then 0x11 blocks forever.
pub(crate) struct OutOfRangeThenValid {
    pub(crate) rejects_left: usize,
}

impl RngCore for OutOfRangeThenValid {
    fn next_u32(&mut self) -> u32 {
        unimplemented!()
    }
    fn next_u64(&mut self) -> u64 {
        unimplemented!()
    }
    fn fill_bytes(&mut self, dest: &mut [u8]) {
        if self.rejects_left > 0 {
            self.rejects_left -= 1;
            dest.fill(0xff);
        } else {
            dest.fill(0x11);
        }
    }
    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl CryptoRng for OutOfRangeThenValid {}

/// Always fails, like an exhausted or unavailable entropy source.
pub(crate) struct BrokenRng;

impl RngCore for BrokenRng {
    fn next_u32(&mut self) -> u32 {
        unimplemented!()
    }
    fn next_u64(&mut self) -> u64 {
        unimplemented!()
    }
    fn fill_bytes(&mut self, _dest: &mut [u8]) {
        unimplemented!()
    }
    fn try_fill_bytes(&mut self, _dest: &mut [u8]) -> Result<(), rand::Error> {
        Err(rand::Error::new("entropy source exhausted"))
    }
}

impl CryptoRng for BrokenRng {}

/// Repeats a fixed byte, for reproducible nonces.
pub(crate) struct FixedRng(pub(crate) u8);

impl RngCore for FixedRng {
    fn next_u32(&mut self) -> u32 {
        unimplemented!()
    }
    fn next_u64(&mut self) -> u64 {
        unimplemented!()
    }
    fn fill_bytes(&mut self, dest: &mut [u8]) {
        dest.fill(self.0);
    }
    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl CryptoRng for FixedRng {}
