use proc_macro2::TokenStream;
use quote::quote;

use crate::{model::TypeSpec, synth::EmitOptions};

/// Emit `impl Randomizable for T`, delegating to the inherent factory.
pub fn conform(spec: &TypeSpec, options: &EmitOptions) -> TokenStream {
    let krate = &options.krate;
    let name = &spec.name;
    let gate = options.gate();
    let generics = options.bounded_generics(&spec.generics);
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    quote! {
        #gate
        impl #impl_generics #krate::Randomizable for #name #ty_generics #where_clause {
            fn random_with<__Rng: #krate::rand::Rng + ?Sized>(rng: &mut __Rng) -> Self {
                Self::random_with(rng)
            }
        }
    }
}
