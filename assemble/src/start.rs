//! Choice of the pool index accumulation starts from.

/// Picks the starting paragraph for an accumulation pass.
pub trait StartIndex {
    /// Returns an index in `0..len`. Never called with `len == 0`.
    fn pick(&mut self, len: usize) -> usize;
}

/// Uniformly random start. The default for real runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomStart;

impl StartIndex for RandomStart {
    fn pick(&mut self, len: usize) -> usize {
        rand::random_range(0..len)
    }
}

/// Fixed start, wrapped into range. Used for reproducible output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedStart(pub usize);

impl StartIndex for FixedStart {
    fn pick(&mut self, len: usize) -> usize {
        self.0 % len
    }
}

impl<T: StartIndex + ?Sized> StartIndex for &mut T {
    fn pick(&mut self, len: usize) -> usize {
        (**self).pick(len)
    }
}
