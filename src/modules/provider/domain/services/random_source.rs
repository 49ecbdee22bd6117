use rand::Rng;

/// Source of randomness for choices that tests need to pin down
pub trait RandomSource: Send + Sync {
    /// Index in `0..len`. Callers never pass `len == 0`.
    fn pick_index(&self, len: usize) -> usize;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRandomSource;

impl RandomSource for ThreadRandomSource {
    fn pick_index(&self, len: usize) -> usize {
        if len <= 1 {
            return 0;
        }
        rand::thread_rng().gen_range(0..len)
    }
}

/// Always picks the same index (wrapped into range)
#[derive(Debug, Clone, Copy)]
pub struct FixedRandomSource(pub usize);

impl RandomSource for FixedRandomSource {
    fn pick_index(&self, len: usize) -> usize {
        if len == 0 {
            0
        } else {
            self.0 % len
        }
    }
}
