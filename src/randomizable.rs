use rand::Rng;

/// A type that can produce a random instance of itself.
///
/// Implemented for primitives, strings, common containers and tuples, and by
/// `#[derive(Randomize)]` for user types. Only [`random_with`] is required.
///
/// [`random_with`]: Randomizable::random_with
pub trait Randomizable: Sized {
    /// Produce a random value drawing from `rng`.
    fn random_with<R: Rng + ?Sized>(rng: &mut R) -> Self;

    /// Produce a random value using the thread-local generator.
    fn random() -> Self {
        Self::random_with(&mut rand::thread_rng())
    }

    /// Produce `count` independent random values.
    fn sample(count: usize) -> Vec<Self> {
        Self::sample_with(count, &mut rand::thread_rng())
    }

    /// Produce `count` independent random values drawing from `rng`.
    fn sample_with<R: Rng + ?Sized>(count: usize, rng: &mut R) -> Vec<Self> {
        (0..count).map(|_| Self::random_with(rng)).collect()
    }
}

/// A type that can produce a random value bounded by `Rg`.
///
/// For numbers `Rg` is a `Range` or `RangeInclusive` of the same type. For
/// strings and vectors it is a range of lengths. An empty range yields its
/// lower bound instead of panicking.
pub trait RandomizableInRange<Rg>: Sized {
    /// Produce a random value within `range`, drawing from `rng`.
    fn random_in<R: Rng + ?Sized>(range: Rg, rng: &mut R) -> Self;
}
