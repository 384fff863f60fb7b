//! Factory synthesis: [`TypeSpec`] to an inherent `random`/`random_with` pair.
//!
//! Synthesis only assembles tokens. Range and strategy expressions are
//! re-parsed from their source text and spliced in unevaluated; whether they
//! type-check is up to the compiler of the consuming crate.

use proc_macro2::{Literal, TokenStream};
use quote::quote;
use syn::{parse_quote, Generics, Ident, Type};
use thiserror::Error;

use crate::model::{CaseSpec, FieldSpec, GenerationSource, RecordSpec, Shape, TypeKind, TypeSpec};

/// Options shared by the synthesizer and the conformance extender.
#[derive(Debug, Clone)]
pub struct EmitOptions {
    /// Path of the runtime crate.
    pub krate: syn::Path,
    /// Wrap output in `#[cfg(any(test, randomizing))]`.
    pub gated: bool,
}

impl Default for EmitOptions {
    fn default() -> Self {
        Self {
            krate: parse_quote!(::randomize),
            gated: true,
        }
    }
}

impl EmitOptions {
    /// The build-flag gate placed on every emitted item.
    pub fn gate(&self) -> TokenStream {
        if self.gated {
            quote! { #[cfg(any(test, randomizing))] }
        } else {
            quote! {}
        }
    }

    /// Generics of the deriving type, with `T: Randomizable` for every type parameter.
    pub fn bounded_generics(&self, generics: &Generics) -> Generics {
        let krate = &self.krate;
        let mut generics = generics.clone();
        let params: Vec<Ident> = generics.type_params().map(|p| p.ident.clone()).collect();
        if !params.is_empty() {
            let where_clause = generics.make_where_clause();
            for ident in params {
                where_clause
                    .predicates
                    .push(parse_quote!(#ident: #krate::Randomizable));
            }
        }
        generics
    }
}

/// Expression producing one value of `ty` from `rng`.
pub fn generation_expr(
    ty: &Type,
    source: &GenerationSource,
    options: &EmitOptions,
) -> syn::Result<TokenStream> {
    let krate = &options.krate;
    Ok(match source {
        GenerationSource::Range(text) => {
            let range: syn::Expr = syn::parse_str(text)?;
            quote! { <#ty as #krate::RandomizableInRange<_>>::random_in(#range, rng) }
        }
        GenerationSource::Strategy(text) => {
            let strategy: syn::Expr = syn::parse_str(text)?;
            quote! { (#strategy).random_with(rng) }
        }
        GenerationSource::Default => {
            quote! { <#ty as #krate::Randomizable>::random_with(rng) }
        }
    })
}

fn field_value(field: &FieldSpec, options: &EmitOptions) -> syn::Result<TokenStream> {
    if field.excluded {
        return Ok(quote! { ::core::default::Default::default() });
    }
    generation_expr(&field.ty, &field.source(), options)
}

/// Body constructing a random instance of a struct.
pub fn record_body(record: &RecordSpec, options: &EmitOptions) -> syn::Result<TokenStream> {
    let values = record
        .fields
        .iter()
        .map(|field| field_value(field, options))
        .collect::<syn::Result<Vec<_>>>()?;

    Ok(match record.shape {
        Shape::Named => {
            let members = record.fields.iter().map(|f| &f.member);
            quote! { Self { #( #members: #values ),* } }
        }
        Shape::Tuple => quote! { Self( #( #values ),* ) },
        Shape::Unit => quote! { Self },
    })
}

/// How one `match` arm selects its variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArmPattern {
    Index(usize),
    Wildcard,
}

/// One arm of the variant dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchArm {
    pub pattern: ArmPattern,
    /// Position of the variant in declaration order.
    pub case: usize,
}

/// A dispatch plan that breaks the last-arm invariant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    #[error("cannot dispatch over zero variants")]
    Empty,
    #[error("dispatch has {arms} arm(s) for {cases} variant(s)")]
    CountMismatch { arms: usize, cases: usize },
    #[error("the last arm must be the wildcard for the last variant")]
    MissingWildcard,
    #[error("arm {position} is a wildcard before the last arm")]
    MisplacedWildcard { position: usize },
    #[error("arm {position} is out of declaration order")]
    OutOfOrder { position: usize },
}

/// Plan the dispatch over `count` variants: an explicit index arm for every
/// variant but the last, which takes the wildcard.
pub fn dispatch_plan(count: usize) -> Vec<DispatchArm> {
    (0..count)
        .map(|case| DispatchArm {
            pattern: if case + 1 == count {
                ArmPattern::Wildcard
            } else {
                ArmPattern::Index(case)
            },
            case,
        })
        .collect()
}

/// Check that `arms` dispatch `count` variants in declaration order and that
/// the final arm is the only wildcard and belongs to the final variant.
pub fn verify_dispatch(arms: &[DispatchArm], count: usize) -> Result<(), DispatchError> {
    if count == 0 {
        return Err(DispatchError::Empty);
    }
    if arms.len() != count {
        return Err(DispatchError::CountMismatch {
            arms: arms.len(),
            cases: count,
        });
    }
    let (last, init) = arms.split_last().ok_or(DispatchError::Empty)?;
    if last.pattern != ArmPattern::Wildcard || last.case != count - 1 {
        return Err(DispatchError::MissingWildcard);
    }
    for (position, arm) in init.iter().enumerate() {
        match arm.pattern {
            ArmPattern::Wildcard => return Err(DispatchError::MisplacedWildcard { position }),
            ArmPattern::Index(index) if index == position && arm.case == position => {}
            ArmPattern::Index(_) => return Err(DispatchError::OutOfOrder { position }),
        }
    }
    Ok(())
}

fn case_constructor(case: &CaseSpec, options: &EmitOptions) -> syn::Result<TokenStream> {
    let name = &case.name;
    let values = case
        .params
        .iter()
        .enumerate()
        .map(|(index, param)| {
            if param.excluded {
                Ok(quote! { ::core::default::Default::default() })
            } else {
                generation_expr(&param.ty, &case.source(index), options)
            }
        })
        .collect::<syn::Result<Vec<_>>>()?;

    // Keep the declared syntax: `V {}` and `V()` are not `V`.
    Ok(match case.shape {
        Shape::Named => {
            let labels = case.params.iter().map(|p| &p.label);
            quote! { Self::#name { #( #labels: #values ),* } }
        }
        Shape::Tuple => quote! { Self::#name( #( #values ),* ) },
        Shape::Unit => quote! { Self::#name },
    })
}

/// Body picking a variant uniformly and constructing it.
pub fn union_body(
    name: &Ident,
    cases: &[CaseSpec],
    options: &EmitOptions,
) -> syn::Result<TokenStream> {
    let krate = &options.krate;
    let plan = dispatch_plan(cases.len());
    verify_dispatch(&plan, cases.len()).map_err(|err| syn::Error::new(name.span(), err))?;

    let arms = plan
        .iter()
        .map(|arm| {
            let constructor = case_constructor(&cases[arm.case], options)?;
            Ok(match arm.pattern {
                ArmPattern::Index(index) => {
                    let index = Literal::usize_unsuffixed(index);
                    quote! { #index => #constructor, }
                }
                ArmPattern::Wildcard => quote! { _ => #constructor, },
            })
        })
        .collect::<syn::Result<Vec<_>>>()?;

    let count = Literal::usize_unsuffixed(cases.len());
    Ok(quote! {
        let index: usize = #krate::rand::Rng::gen_range(rng, 0..#count);
        match index {
            #( #arms )*
        }
    })
}

/// Emit the inherent factory for an analyzed type.
pub fn synthesize(spec: &TypeSpec, options: &EmitOptions) -> syn::Result<TokenStream> {
    let krate = &options.krate;
    let name = &spec.name;
    let vis = &spec.vis;
    let gate = options.gate();
    let generics = options.bounded_generics(&spec.generics);
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let body = match &spec.kind {
        TypeKind::Record(record) => record_body(record, options)?,
        TypeKind::Union(union) => union_body(name, &union.cases, options)?,
    };

    Ok(quote! {
        #gate
        impl #impl_generics #name #ty_generics #where_clause {
            /// Produce a random value using the thread-local generator.
            #vis fn random() -> Self {
                Self::random_with(&mut #krate::rand::thread_rng())
            }

            /// Produce a random value drawing from `rng`.
            #[allow(unused_variables)]
            #vis fn random_with<__Rng: #krate::rand::Rng + ?Sized>(rng: &mut __Rng) -> Self {
                #body
            }
        }
    })
}
