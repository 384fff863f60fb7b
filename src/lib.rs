#![doc = include_str!("../README.md")]

// Allow the derive to reference `::randomize` inside this crate
extern crate self as randomize;

mod config;
mod impls;
pub mod phonetic;
mod randomizable;
mod strategy;

pub use config::{
    month_name, PhoneticConfig, DEFAULT_DAYS, DEFAULT_DURATION_MAX, DEFAULT_MONTHS,
    DEFAULT_STRING_LENGTH, DEFAULT_TIME_SPAN, DEFAULT_VEC_LENGTH, DEFAULT_WORD_LENGTH,
    DEFAULT_YEARS, MAX_REJECTIONS, MONTH_NAMES, SENTENCE_TERMINATORS,
};
pub use phonetic::PhoneticGenerator;
pub use randomizable::{Randomizable, RandomizableInRange};
pub use strategy::Strategy;

#[cfg(feature = "derive")]
pub use randomize_macros::Randomize;

// Generated factories name `rand` through this crate
pub use rand;

#[cfg(all(test, feature = "derive"))]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[derive(Debug, Randomize)]
    struct Reading {
        #[randomize(in = 10..20)]
        sensor: u16,
        #[randomize(strategy = Strategy::word(4))]
        label: String,
    }

    #[test]
    fn test_derive_inside_crate() {
        let mut rng = StdRng::seed_from_u64(3);
        let reading = Reading::random_with(&mut rng);
        assert!((10..20).contains(&reading.sensor));
        assert_eq!(reading.label.len(), 4);

        let readings = <Reading as Randomizable>::sample_with(3, &mut rng);
        assert_eq!(readings.len(), 3);
    }
}
