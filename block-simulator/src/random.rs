use rand::Rng;

/// Source of uniform integer draws
///
/// Production code uses [`ThreadRandom`]; tests substitute a fixed sequence.
#[cfg_attr(test, mockall::automock)]
pub trait RandomSource: Send + Sync {
    /// Uniform draw in `[0, bound)`
    fn below(&self, bound: u64) -> u64;
}

/// Thread-local RNG from the `rand` crate
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn below(&self, bound: u64) -> u64 {
        rand::thread_rng().gen_range(0..bound)
    }
}

/// Draw in `[0, bound)` and lift anything under `floor` by `floor`
///
/// The result is never below `floor`, but values in `[floor, 2 * floor)` come
/// up twice as often as the rest of the range.
pub fn biased_draw(source: &dyn RandomSource, bound: u64, floor: u64) -> u64 {
    let raw = source.below(bound);
    if raw < floor {
        raw + floor
    } else {
        raw
    }
}
