//! Procedural macros for randomize.
//!
//! `#[derive(Randomize)]` analyzes a struct or enum declaration and emits a
//! factory producing random instances of it, plus an implementation of
//! `randomize::Randomizable`. Both are compiled only under
//! `cfg(any(test, randomizing))`.
//!
//! # Struct Example
//!
//! ```ignore
//! use randomize::{Randomize, Strategy};
//!
//! #[derive(Randomize)]
//! pub struct Player {
//!     #[randomize(in = 1..=99)]
//!     level: u8,
//!     #[randomize(strategy = Strategy::word(8))]
//!     name: String,
//!     #[randomize(skip)]
//!     session: Option<Session>,
//!     score: f64,
//! }
//!
//! // Generates:
//! // impl Player { pub fn random() -> Self; pub fn random_with(rng) -> Self }
//! // impl Randomizable for Player { ... }
//! ```
//!
//! # Enum Example
//!
//! ```ignore
//! use randomize::Randomize;
//!
//! #[derive(Randomize)]
//! pub enum Shape {
//!     Point,
//!     #[randomize(case = 0.5..2.0)]
//!     Circle(f64),
//!     #[randomize(case = (1..10, , 1..10))]
//!     Cuboid(u32, u32, u32),
//! }
//! ```

mod analyze;
mod attr;
mod conform;
mod diagnostics;
mod model;
mod synth;

use darling::FromDeriveInput as _;
use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, DeriveInput};

use crate::{
    analyze::analyze,
    attr::ContainerAttr,
    conform::conform,
    diagnostics::{warnings_as_error, DiagnosticCollector},
    synth::{synthesize, EmitOptions},
};

/// Derive a random-instance factory for a struct or enum.
///
/// # Container Attributes
///
/// - `strict`: report degraded fields and overrides as compile errors
/// - `ungated`: do not wrap the output in `#[cfg(any(test, randomizing))]`
/// - `crate = "path"`: path of the runtime crate (default: `::randomize`)
///
/// # Field Attributes
///
/// - `in = <range>`: draw uniformly from the range (wins over `strategy`)
/// - `strategy = <expr>`: draw from a `Strategy`
/// - `skip`: fill with `Default::default()`
///
/// # Variant Attributes
///
/// - `case = <range>`: range for the variant's first field
/// - `case = (<range>, , <range>)`: ranges aligned to the variant's fields;
///   empty slots keep the field's own generator
///
/// # Example
///
/// ```ignore
/// use randomize::Randomize;
///
/// #[derive(Randomize)]
/// #[randomize(strict)]
/// pub struct Reading {
///     #[randomize(in = -40.0..60.0)]
///     celsius: f32,
///     sensor: u16,
/// }
///
/// let reading = Reading::random();
/// ```
#[proc_macro_derive(Randomize, attributes(randomize))]
pub fn derive_randomize(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    let attr = match ContainerAttr::from_derive_input(&input) {
        Ok(v) => v,
        Err(e) => return TokenStream::from(e.write_errors()),
    };

    match expand(attr, &input) {
        Ok(tokens) => tokens.into(),
        Err(e) => e.to_compile_error().into(),
    }
}

fn expand(attr: ContainerAttr, input: &DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    let collector = DiagnosticCollector::new();
    let spec = analyze(input, &collector);

    if attr.strict.is_present() {
        if let Some(err) = warnings_as_error(&collector.take()) {
            return Err(err);
        }
    }

    let Some(spec) = spec else {
        return Ok(proc_macro2::TokenStream::new());
    };

    let mut options = EmitOptions {
        gated: !attr.ungated.is_present(),
        ..EmitOptions::default()
    };
    if let Some(krate) = attr.krate {
        options.krate = krate;
    }

    let factory = synthesize(&spec, &options)?;
    let conformance = conform(&spec, &options);

    Ok(quote! {
        #factory
        #conformance
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    fn expand_input(input: DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
        let attr = ContainerAttr::from_derive_input(&input).unwrap();
        expand(attr, &input)
    }

    fn squash(tokens: proc_macro2::TokenStream) -> String {
        tokens.to_string().split_whitespace().collect()
    }

    #[test]
    fn test_expand_struct_emits_factory_and_conformance() {
        let output = squash(
            expand_input(parse_quote! {
                pub struct Sample {
                    a: i64,
                    #[randomize(skip)]
                    b: String,
                    c: f64,
                }
            })
            .unwrap(),
        );

        assert!(output.contains("implSample{"));
        assert!(output.contains("impl::randomize::RandomizableforSample{"));
        assert_eq!(output.matches("#[cfg(any(test,randomizing))]").count(), 2);

        let a = output.find("a:<i64as::randomize::Randomizable>::random_with(rng)");
        let c = output.find("c:<f64as::randomize::Randomizable>::random_with(rng)");
        assert!(a.unwrap() < c.unwrap());
        assert!(output.contains("b:::core::default::Default::default()"));
        assert_eq!(output.matches("::random_with(rng)").count(), 3);
    }

    #[test]
    fn test_expand_enum_has_one_wildcard_last() {
        let output = squash(
            expand_input(parse_quote! {
                enum Direction { North, East, South, West }
            })
            .unwrap(),
        );

        assert!(output.contains("0=>Self::North,1=>Self::East,2=>Self::South,_=>Self::West,"));
        assert_eq!(output.matches("_=>").count(), 1);
    }

    #[test]
    fn test_expand_union_is_noop() {
        let output = expand_input(parse_quote! {
            union Bits { a: u32, b: f32 }
        })
        .unwrap();
        assert!(output.is_empty());
    }

    #[test]
    fn test_strict_turns_warnings_into_errors() {
        let result = expand_input(parse_quote! {
            #[randomize(strict)]
            struct Broken<'a> {
                name: &'a str,
            }
        });
        let err = result.unwrap_err();
        assert!(err.to_string().contains("borrowed type"));
    }

    #[test]
    fn test_strict_ignores_notes() {
        let result = expand_input(parse_quote! {
            #[randomize(strict)]
            struct Cached {
                #[randomize(skip)]
                cache: Vec<u8>,
            }
        });
        assert!(result.is_ok());
    }

    #[test]
    fn test_custom_crate_path_and_ungated() {
        let output = squash(
            expand_input(parse_quote! {
                #[randomize(ungated, crate = "my_random")]
                struct Unit;
            })
            .unwrap(),
        );

        assert!(!output.contains("cfg"));
        assert!(output.contains("implmy_random::RandomizableforUnit"));
    }
}
