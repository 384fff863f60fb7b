//! [`Randomizable`] and [`RandomizableInRange`] for std types.

use rand::distributions::Alphanumeric;
use rand::Rng;
use std::ops::{Range, RangeInclusive};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crate::config::{DEFAULT_DURATION_MAX, DEFAULT_STRING_LENGTH, DEFAULT_TIME_SPAN, DEFAULT_VEC_LENGTH};
use crate::{Randomizable, RandomizableInRange};

macro_rules! uniform_in_range {
    ($($ty:ty),* $(,)?) => {$(
        impl RandomizableInRange<Range<$ty>> for $ty {
            fn random_in<R: Rng + ?Sized>(range: Range<$ty>, rng: &mut R) -> Self {
                if range.is_empty() {
                    return range.start;
                }
                rng.gen_range(range)
            }
        }

        impl RandomizableInRange<RangeInclusive<$ty>> for $ty {
            fn random_in<R: Rng + ?Sized>(range: RangeInclusive<$ty>, rng: &mut R) -> Self {
                if range.is_empty() {
                    return *range.start();
                }
                rng.gen_range(range)
            }
        }
    )*};
}

uniform_in_range!(
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, char, Duration,
);

// Numbers default to the unit interval, integers to `0` or `1`.
macro_rules! unit_interval {
    ($($ty:ty => $range:expr),* $(,)?) => {$(
        impl Randomizable for $ty {
            fn random_with<R: Rng + ?Sized>(rng: &mut R) -> Self {
                rng.gen_range($range)
            }
        }
    )*};
}

unit_interval!(
    i8 => 0..=1, i16 => 0..=1, i32 => 0..=1, i64 => 0..=1, i128 => 0..=1, isize => 0..=1,
    u8 => 0..=1, u16 => 0..=1, u32 => 0..=1, u64 => 0..=1, u128 => 0..=1, usize => 0..=1,
    f32 => 0.0..=1.0, f64 => 0.0..=1.0,
);

impl Randomizable for bool {
    fn random_with<R: Rng + ?Sized>(rng: &mut R) -> Self {
        rng.gen()
    }
}

impl Randomizable for char {
    fn random_with<R: Rng + ?Sized>(rng: &mut R) -> Self {
        char::from(rng.sample(Alphanumeric))
    }
}

impl Randomizable for () {
    fn random_with<R: Rng + ?Sized>(_rng: &mut R) -> Self {}
}

fn alphanumeric<R: Rng + ?Sized>(len: usize, rng: &mut R) -> String {
    (0..len).map(|_| char::from(rng.sample(Alphanumeric))).collect()
}

impl Randomizable for String {
    fn random_with<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::random_in(DEFAULT_STRING_LENGTH, rng)
    }
}

impl RandomizableInRange<Range<usize>> for String {
    fn random_in<R: Rng + ?Sized>(range: Range<usize>, rng: &mut R) -> Self {
        let len = usize::random_in(range, rng);
        alphanumeric(len, rng)
    }
}

impl RandomizableInRange<RangeInclusive<usize>> for String {
    fn random_in<R: Rng + ?Sized>(range: RangeInclusive<usize>, rng: &mut R) -> Self {
        let len = usize::random_in(range, rng);
        alphanumeric(len, rng)
    }
}

impl Randomizable for Duration {
    fn random_with<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::random_in(Duration::ZERO..DEFAULT_DURATION_MAX, rng)
    }
}

impl Randomizable for SystemTime {
    /// A point within the last [`DEFAULT_TIME_SPAN`].
    fn random_with<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let now = SystemTime::now();
        let start = now.checked_sub(DEFAULT_TIME_SPAN).unwrap_or(UNIX_EPOCH);
        Self::random_in(start..now, rng)
    }
}

impl RandomizableInRange<Range<SystemTime>> for SystemTime {
    fn random_in<R: Rng + ?Sized>(range: Range<SystemTime>, rng: &mut R) -> Self {
        match range.end.duration_since(range.start) {
            Ok(span) if !span.is_zero() => range.start + rng.gen_range(Duration::ZERO..span),
            _ => range.start,
        }
    }
}

/// Always `Some`.
impl<T: Randomizable> Randomizable for Option<T> {
    fn random_with<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Some(T::random_with(rng))
    }
}

impl<T: Randomizable> Randomizable for Box<T> {
    fn random_with<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Box::new(T::random_with(rng))
    }
}

impl<T: Randomizable> Randomizable for Vec<T> {
    fn random_with<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::random_in(DEFAULT_VEC_LENGTH, rng)
    }
}

impl<T: Randomizable> RandomizableInRange<Range<usize>> for Vec<T> {
    fn random_in<R: Rng + ?Sized>(range: Range<usize>, rng: &mut R) -> Self {
        let len = usize::random_in(range, rng);
        T::sample_with(len, rng)
    }
}

impl<T: Randomizable> RandomizableInRange<RangeInclusive<usize>> for Vec<T> {
    fn random_in<R: Rng + ?Sized>(range: RangeInclusive<usize>, rng: &mut R) -> Self {
        let len = usize::random_in(range, rng);
        T::sample_with(len, rng)
    }
}

impl<T: Randomizable, const N: usize> Randomizable for [T; N] {
    fn random_with<R: Rng + ?Sized>(rng: &mut R) -> Self {
        std::array::from_fn(|_| T::random_with(rng))
    }
}

macro_rules! tuple_impls {
    ($($name:ident)+) => {
        impl<$($name: Randomizable),+> Randomizable for ($($name,)+) {
            fn random_with<R: Rng + ?Sized>(rng: &mut R) -> Self {
                ($($name::random_with(rng),)+)
            }
        }
    };
}

tuple_impls!(A);
tuple_impls!(A B);
tuple_impls!(A B C);
tuple_impls!(A B C D);
