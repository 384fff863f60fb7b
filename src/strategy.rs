//! Named value generators for `#[randomize(strategy = ...)]`.

use rand::{Rng, RngCore};
use std::borrow::Cow;
use std::fmt;
use std::ops::Range;
use std::sync::Arc;
use tracing::trace;

use crate::config::{month_name, PhoneticConfig};
use crate::phonetic::PhoneticGenerator;
use crate::RandomizableInRange;

type Producer<T> = dyn Fn(&mut dyn RngCore) -> T + Send + Sync;

/// A named, shareable generator of `T` values.
///
/// Strategies replace a field's default generator:
///
/// ```ignore
/// #[derive(Randomize)]
/// struct Post {
///     #[randomize(strategy = Strategy::sentence())]
///     title: String,
///     #[randomize(strategy = Strategy::year(2015..2020))]
///     year: String,
/// }
/// ```
pub struct Strategy<T> {
    name: Cow<'static, str>,
    produce: Arc<Producer<T>>,
}

impl<T> Clone for Strategy<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            produce: Arc::clone(&self.produce),
        }
    }
}

impl<T> fmt::Debug for Strategy<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Strategy").field("name", &self.name).finish()
    }
}

impl<T> Strategy<T> {
    pub fn new(
        name: impl Into<Cow<'static, str>>,
        produce: impl Fn(&mut dyn RngCore) -> T + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            produce: Arc::new(produce),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Produce a value using the thread-local generator.
    pub fn random(&self) -> T {
        self.random_with(&mut rand::thread_rng())
    }

    /// Produce a value drawing from `rng`.
    pub fn random_with<R: Rng + ?Sized>(&self, rng: &mut R) -> T {
        trace!(strategy = %self.name, "producing value");
        let mut rng = rng;
        (self.produce)(&mut rng)
    }

    /// A strategy applying `f` to every value this one produces.
    pub fn map<U>(self, f: impl Fn(T) -> U + Send + Sync + 'static) -> Strategy<U>
    where
        T: 'static,
        U: 'static,
    {
        let produce = self.produce;
        Strategy {
            name: self.name,
            produce: Arc::new(move |rng: &mut dyn RngCore| f(produce(rng))),
        }
    }
}

impl Strategy<String> {
    /// A pronounceable word of exactly `length` characters.
    pub fn word(length: usize) -> Self {
        Self::new("word", move |rng: &mut dyn RngCore| {
            PhoneticGenerator::word(length, rng)
        })
    }

    pub fn words() -> Self {
        Self::words_with(PhoneticConfig::default())
    }

    pub fn words_with(config: PhoneticConfig) -> Self {
        Self::new("words", move |rng: &mut dyn RngCore| {
            PhoneticGenerator::words(&config, rng)
        })
    }

    pub fn sentence() -> Self {
        Self::sentence_with(PhoneticConfig::default())
    }

    pub fn sentence_with(config: PhoneticConfig) -> Self {
        Self::new("sentence", move |rng: &mut dyn RngCore| {
            PhoneticGenerator::sentence(&config, rng)
        })
    }

    pub fn paragraph() -> Self {
        Self::paragraph_with(PhoneticConfig::default())
    }

    pub fn paragraph_with(config: PhoneticConfig) -> Self {
        Self::new("paragraph", move |rng: &mut dyn RngCore| {
            PhoneticGenerator::paragraph(&config, rng)
        })
    }

    pub fn text() -> Self {
        Self::text_with(PhoneticConfig::default())
    }

    pub fn text_with(config: PhoneticConfig) -> Self {
        Self::new("text", move |rng: &mut dyn RngCore| {
            PhoneticGenerator::text(&config, rng)
        })
    }

    /// A year from `years`, e.g. `"2017"`. See [`DEFAULT_YEARS`](crate::DEFAULT_YEARS).
    pub fn year(years: Range<i32>) -> Self {
        Self::new("year", move |rng: &mut dyn RngCore| {
            i32::random_in(years.clone(), rng).to_string()
        })
    }

    /// A day of the month from `days`.
    pub fn day(days: Range<u32>) -> Self {
        Self::new("day", move |rng: &mut dyn RngCore| {
            u32::random_in(days.clone(), rng).to_string()
        })
    }

    /// A wall-clock time formatted `hour:minute`, without padding.
    pub fn time() -> Self {
        Self::new("time", |rng: &mut dyn RngCore| {
            let hour = rng.gen_range(0..24);
            let minute = rng.gen_range(0..60);
            format!("{hour}:{minute}")
        })
    }

    /// An English short month name for a month number drawn from `months`.
    /// Numbers outside `1..=12` are rendered as digits.
    pub fn month(months: Range<u32>) -> Self {
        Self::new("month", move |rng: &mut dyn RngCore| {
            let month = u32::random_in(months.clone(), rng);
            match month_name(month) {
                Some(name) => name.to_string(),
                None => month.to_string(),
            }
        })
    }
}
