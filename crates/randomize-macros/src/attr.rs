use darling::{util::Flag, FromDeriveInput};
use proc_macro2::TokenStream;
use quote::ToTokens as _;
use syn::{ext::IdentExt as _, parse::ParseStream, Attribute, Ident, Token};

/// Options for `#[randomize(...)]` on the deriving type.
#[derive(Debug, Default, FromDeriveInput)]
#[darling(attributes(randomize), default)]
pub struct ContainerAttr {
    /// Turn analysis warnings into compile errors.
    pub strict: Flag,

    /// Emit the factory without the `any(test, randomizing)` gate.
    pub ungated: Flag,

    /// Path of the runtime crate. Default: `::randomize`.
    #[darling(rename = "crate")]
    pub krate: Option<syn::Path>,
}

/// Options for `#[randomize(...)]` on a field.
///
/// Parsed by hand because `in` is a keyword, which `syn::Meta` rejects.
#[derive(Debug, Default)]
pub struct FieldAttr {
    /// `in = <range>`
    pub range: Option<syn::Expr>,

    /// `strategy = <expr>`
    pub strategy: Option<syn::Expr>,

    /// `skip`: opt the field out.
    pub skip: bool,
}

impl FieldAttr {
    /// Collect the options of every `#[randomize(...)]` attribute in `attrs`.
    pub fn from_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut options = Self::default();
        for attr in attrs.iter().filter(|a| a.path().is_ident("randomize")) {
            attr.parse_args_with(|input: ParseStream| options.parse_options(input))?;
        }
        Ok(options)
    }

    fn parse_options(&mut self, input: ParseStream) -> syn::Result<()> {
        while !input.is_empty() {
            let key = input.call(Ident::parse_any)?;
            match key.to_string().as_str() {
                "in" => {
                    input.parse::<Token![=]>()?;
                    set_once(&mut self.range, input.parse()?, &key)?;
                }
                "strategy" => {
                    input.parse::<Token![=]>()?;
                    set_once(&mut self.strategy, input.parse()?, &key)?;
                }
                "skip" => {
                    if self.skip {
                        return Err(duplicate(&key));
                    }
                    self.skip = true;
                }
                _ => {
                    return Err(syn::Error::new(
                        key.span(),
                        format!(
                            "unknown field option `{}`, expected `in`, `strategy` or `skip`",
                            key
                        ),
                    ))
                }
            }

            if !input.is_empty() {
                input.parse::<Token![,]>()?;
            }
        }
        Ok(())
    }

    pub fn range_text(&self) -> Option<String> {
        self.range.as_ref().map(expr_text)
    }

    pub fn strategy_text(&self) -> Option<String> {
        self.strategy.as_ref().map(expr_text)
    }
}

fn set_once(slot: &mut Option<syn::Expr>, value: syn::Expr, key: &Ident) -> syn::Result<()> {
    if slot.is_some() {
        return Err(duplicate(key));
    }
    *slot = Some(value);
    Ok(())
}

fn duplicate(key: &Ident) -> syn::Error {
    syn::Error::new(key.span(), format!("duplicate field option `{}`", key))
}

/// Source text of an expression, as the tokens print.
pub fn expr_text(expr: &syn::Expr) -> String {
    expr.to_token_stream().to_string()
}

/// Raw `case = ...` value of a variant's `#[randomize(...)]` attributes.
///
/// The value is kept as tokens because a tuple with empty slots such as
/// `(1..5, , 10..20)` is not a Rust expression. When several attributes
/// carry `case`, the last one wins.
pub fn case_argument(attrs: &[Attribute]) -> syn::Result<Option<TokenStream>> {
    let mut found = None;
    for attr in attrs.iter().filter(|a| a.path().is_ident("randomize")) {
        if let Some(value) = attr.parse_args_with(parse_case_option)? {
            found = Some(value);
        }
    }
    Ok(found)
}

fn parse_case_option(input: ParseStream) -> syn::Result<Option<TokenStream>> {
    let mut found = None;
    while !input.is_empty() {
        let key = input.call(Ident::parse_any)?;
        if key != "case" {
            return Err(syn::Error::new(
                key.span(),
                format!("unknown variant option `{}`, expected `case`", key),
            ));
        }
        input.parse::<Token![=]>()?;

        let mut value = TokenStream::new();
        while !input.is_empty() && !input.peek(Token![,]) {
            let tt: proc_macro2::TokenTree = input.parse()?;
            value.extend(std::iter::once(tt));
        }
        if value.is_empty() {
            return Err(syn::Error::new(key.span(), "`case` needs a value"));
        }
        found = Some(value);

        if !input.is_empty() {
            input.parse::<Token![,]>()?;
        }
    }
    Ok(found)
}

/// Split a `case` value into positional override slots.
///
/// A value wrapped in parentheses is a tuple: it is split on every comma and
/// empty slots mean "no override". Anything else is a single override for
/// the first field. The split is not bracket aware, so a slot that itself
/// contains a comma is cut in pieces; callers validate each slot.
pub fn split_case_tuple(text: &str) -> Vec<Option<String>> {
    let text = text.trim();
    match text.strip_prefix('(').and_then(|t| t.strip_suffix(')')) {
        Some(inner) => inner
            .split(',')
            .map(str::trim)
            .map(|part| (!part.is_empty()).then(|| part.to_string()))
            .collect(),
        None => vec![Some(text.to_string())],
    }
}
