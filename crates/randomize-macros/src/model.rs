//! Normalized description of what a factory must generate.
//!
//! The analyzer produces these values from a `syn::DeriveInput`; the
//! synthesizer consumes them. Tests build them by hand, so nothing here
//! depends on the analyzer.

use syn::{Generics, Ident, Member, Type, Visibility};

/// Where a field's or parameter's value comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationSource {
    /// `in = <range>`: uniform value within the range.
    Range(String),
    /// `strategy = <expr>`: value produced by a strategy.
    Strategy(String),
    /// The type's default generator.
    Default,
}

impl GenerationSource {
    /// Resolve competing sources. A non-empty range wins over a strategy,
    /// a strategy wins over the default.
    pub fn resolve(range: Option<&str>, strategy: Option<&str>) -> Self {
        match (range, strategy) {
            (Some(range), _) if !range.trim().is_empty() => {
                GenerationSource::Range(range.to_string())
            }
            (_, Some(strategy)) if !strategy.trim().is_empty() => {
                GenerationSource::Strategy(strategy.to_string())
            }
            _ => GenerationSource::Default,
        }
    }
}

/// One stored field of a struct.
#[derive(Debug, Clone)]
pub struct FieldSpec {
    pub member: Member,
    pub ty: Type,
    pub range: Option<String>,
    pub strategy: Option<String>,
    /// Opted out, or not randomizable. Filled with `Default::default()`.
    pub excluded: bool,
}

impl FieldSpec {
    pub fn source(&self) -> GenerationSource {
        GenerationSource::resolve(self.range.as_deref(), self.strategy.as_deref())
    }
}

/// Construction syntax of a struct or an enum variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Named,
    Tuple,
    Unit,
}

#[derive(Debug, Clone)]
pub struct RecordSpec {
    pub shape: Shape,
    pub fields: Vec<FieldSpec>,
}

/// One field of an enum variant.
#[derive(Debug, Clone)]
pub struct ParamSpec {
    pub ty: Type,
    /// Field name for struct-like variants, `None` for tuple variants.
    pub label: Option<Ident>,
    /// Source declared on the field itself, used when the variant-level
    /// override for this position is empty.
    pub source: GenerationSource,
    /// Opted out, or not randomizable. Filled with `Default::default()`.
    pub excluded: bool,
}

impl ParamSpec {
    pub fn positional(ty: Type) -> Self {
        Self {
            ty,
            label: None,
            source: GenerationSource::Default,
            excluded: false,
        }
    }

    pub fn labeled(ty: Type, label: Ident) -> Self {
        Self {
            ty,
            label: Some(label),
            source: GenerationSource::Default,
            excluded: false,
        }
    }
}

/// One enum variant.
#[derive(Debug, Clone)]
pub struct CaseSpec {
    pub name: Ident,
    /// `V { .. }`, `V(..)` or `V`, as declared. An empty `V {}` stays braced.
    pub shape: Shape,
    pub params: Vec<ParamSpec>,
    /// Variant-level range overrides, always `params.len()` long.
    pub range_overrides: Vec<Option<String>>,
}

impl CaseSpec {
    /// Build a case, truncating or padding `overrides` to the parameter count.
    pub fn new(
        name: Ident,
        shape: Shape,
        params: Vec<ParamSpec>,
        overrides: Vec<Option<String>>,
    ) -> Self {
        let range_overrides = align_overrides(overrides, params.len());
        Self {
            name,
            shape,
            params,
            range_overrides,
        }
    }

    /// Source for the parameter at `index`: the variant-level override,
    /// then whatever the field itself declared.
    pub fn source(&self, index: usize) -> GenerationSource {
        match self.range_overrides.get(index) {
            Some(Some(range)) if !range.trim().is_empty() => GenerationSource::Range(range.clone()),
            _ => self.params[index].source.clone(),
        }
    }
}

/// Truncate or pad `overrides` to exactly `len` entries.
pub fn align_overrides(mut overrides: Vec<Option<String>>, len: usize) -> Vec<Option<String>> {
    overrides.resize(len, None);
    overrides
}

#[derive(Debug, Clone)]
pub struct UnionSpec {
    pub cases: Vec<CaseSpec>,
}

#[derive(Debug, Clone)]
pub enum TypeKind {
    Record(RecordSpec),
    Union(UnionSpec),
}

/// Everything the synthesizer needs for one type.
#[derive(Debug, Clone)]
pub struct TypeSpec {
    pub name: Ident,
    pub vis: Visibility,
    pub generics: Generics,
    pub kind: TypeKind,
}
