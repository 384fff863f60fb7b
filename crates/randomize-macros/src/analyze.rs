//! Declaration analysis: `syn::DeriveInput` to [`TypeSpec`].
//!
//! Analysis never fails. Anything that cannot be classified is degraded
//! (excluded field, missing override) and reported to the sink.

use syn::{
    spanned::Spanned as _, Data, DataEnum, DataStruct, DeriveInput, Field, Fields, Ident, Index,
    Member, Type, Variant,
};

use crate::{
    attr::{case_argument, split_case_tuple, FieldAttr},
    diagnostics::{Diagnostic, DiagnosticKind, DiagnosticSink},
    model::{CaseSpec, FieldSpec, ParamSpec, RecordSpec, Shape, TypeKind, TypeSpec, UnionSpec},
};

/// Analyze a declaration. Returns `None` for unions and empty enums.
pub fn analyze(input: &DeriveInput, sink: &dyn DiagnosticSink) -> Option<TypeSpec> {
    let kind = match &input.data {
        Data::Struct(data) => TypeKind::Record(analyze_record(data, sink)),
        Data::Enum(data) if !data.variants.is_empty() => {
            TypeKind::Union(analyze_union(data, sink))
        }
        Data::Enum(_) | Data::Union(_) => {
            sink.report(Diagnostic::new(
                DiagnosticKind::UnsupportedKind {
                    name: input.ident.to_string(),
                },
                input.ident.span(),
            ));
            return None;
        }
    };

    Some(TypeSpec {
        name: input.ident.clone(),
        vis: input.vis.clone(),
        generics: input.generics.clone(),
        kind,
    })
}

fn shape_of(fields: &Fields) -> Shape {
    match fields {
        Fields::Named(_) => Shape::Named,
        Fields::Unnamed(_) => Shape::Tuple,
        Fields::Unit => Shape::Unit,
    }
}

fn analyze_record(data: &DataStruct, sink: &dyn DiagnosticSink) -> RecordSpec {
    let shape = shape_of(&data.fields);
    let fields = data
        .fields
        .iter()
        .enumerate()
        .map(|(index, field)| analyze_field(None, index, field, sink))
        .collect();

    RecordSpec { shape, fields }
}

fn analyze_field(
    owner: Option<&Ident>,
    index: usize,
    field: &Field,
    sink: &dyn DiagnosticSink,
) -> FieldSpec {
    let member = match &field.ident {
        Some(ident) => Member::Named(ident.clone()),
        None => Member::Unnamed(Index::from(index)),
    };
    let item = describe(owner, &member);

    let attr = FieldAttr::from_attrs(&field.attrs).unwrap_or_else(|err| {
        sink.report(Diagnostic::new(
            DiagnosticKind::MalformedAnnotation {
                item: item.clone(),
                message: err.to_string(),
            },
            field.span(),
        ));
        FieldAttr::default()
    });

    let mut excluded = attr.skip;
    if excluded {
        sink.report(Diagnostic::new(
            DiagnosticKind::Excluded { field: item.clone() },
            field.span(),
        ));
    } else if let Some(reason) = unrandomizable_reason(&field.ty) {
        sink.report(Diagnostic::new(
            DiagnosticKind::Unrandomizable {
                field: item.clone(),
                reason: reason.to_string(),
            },
            field.ty.span(),
        ));
        excluded = true;
    }

    if attr.range.is_some() && attr.strategy.is_some() {
        sink.report(Diagnostic::new(
            DiagnosticKind::ConflictingSources { field: item },
            field.span(),
        ));
    }

    FieldSpec {
        member,
        ty: field.ty.clone(),
        range: attr.range_text(),
        strategy: attr.strategy_text(),
        excluded,
    }
}

fn describe(owner: Option<&Ident>, member: &Member) -> String {
    let member = match member {
        Member::Named(ident) => ident.to_string(),
        Member::Unnamed(index) => index.index.to_string(),
    };
    match owner {
        Some(owner) => format!("{}.{}", owner, member),
        None => member,
    }
}

/// Types with no meaningful random value.
fn unrandomizable_reason(ty: &Type) -> Option<&'static str> {
    match ty {
        Type::Reference(_) => Some("borrowed type"),
        Type::Ptr(_) => Some("raw pointer"),
        Type::Path(path)
            if path.qself.is_none()
                && path
                    .path
                    .segments
                    .last()
                    .is_some_and(|seg| seg.ident == "PhantomData") =>
        {
            Some("marker type")
        }
        _ => None,
    }
}

fn analyze_union(data: &DataEnum, sink: &dyn DiagnosticSink) -> UnionSpec {
    let cases = data
        .variants
        .iter()
        .map(|variant| analyze_variant(variant, sink))
        .collect();
    UnionSpec { cases }
}

fn analyze_variant(variant: &Variant, sink: &dyn DiagnosticSink) -> CaseSpec {
    let name = &variant.ident;

    let params: Vec<ParamSpec> = variant
        .fields
        .iter()
        .enumerate()
        .map(|(index, field)| {
            let spec = analyze_field(Some(name), index, field, sink);
            let source = spec.source();
            let mut param = match &field.ident {
                Some(label) => ParamSpec::labeled(spec.ty, label.clone()),
                None => ParamSpec::positional(spec.ty),
            };
            param.source = source;
            param.excluded = spec.excluded;
            param
        })
        .collect();

    let overrides = variant_overrides(variant, sink);
    if overrides.len() > params.len() {
        sink.report(Diagnostic::new(
            DiagnosticKind::ExtraOverrides {
                variant: name.to_string(),
                params: params.len(),
                discarded: overrides.len() - params.len(),
            },
            variant.span(),
        ));
    }

    CaseSpec::new(name.clone(), shape_of(&variant.fields), params, overrides)
}

/// Override slots declared with `#[randomize(case = ...)]`, validated.
fn variant_overrides(variant: &Variant, sink: &dyn DiagnosticSink) -> Vec<Option<String>> {
    let name = &variant.ident;
    let tokens = match case_argument(&variant.attrs) {
        Ok(Some(tokens)) => tokens,
        Ok(None) => return Vec::new(),
        Err(err) => {
            sink.report(Diagnostic::new(
                DiagnosticKind::MalformedAnnotation {
                    item: name.to_string(),
                    message: err.to_string(),
                },
                err.span(),
            ));
            return Vec::new();
        }
    };

    split_case_tuple(&tokens.to_string())
        .into_iter()
        .enumerate()
        .map(|(slot, text)| {
            let text = text?;
            if syn::parse_str::<syn::Expr>(&text).is_ok() {
                Some(text)
            } else {
                sink.report(Diagnostic::new(
                    DiagnosticKind::MalformedOverride {
                        variant: name.to_string(),
                        slot,
                        text,
                    },
                    tokens.span(),
                ));
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::DiagnosticCollector;
    use crate::model::GenerationSource;
    use syn::parse_quote;

    fn squash(text: &str) -> String {
        text.split_whitespace().collect()
    }

    fn record(spec: TypeSpec) -> RecordSpec {
        match spec.kind {
            TypeKind::Record(record) => record,
            TypeKind::Union(_) => panic!("expected a record"),
        }
    }

    fn union(spec: TypeSpec) -> UnionSpec {
        match spec.kind {
            TypeKind::Union(union) => union,
            TypeKind::Record(_) => panic!("expected a union"),
        }
    }

    #[test]
    fn test_record_fields_in_declaration_order() {
        let input: DeriveInput = parse_quote! {
            pub struct Player {
                #[randomize(in = 1..100)]
                level: u32,
                #[randomize(strategy = Strategy::word(6))]
                name: String,
                score: f64,
            }
        };
        let sink = DiagnosticCollector::new();
        let spec = analyze(&input, &sink).unwrap();
        assert_eq!(spec.name, "Player");

        let record = record(spec);
        assert_eq!(record.shape, Shape::Named);
        let names: Vec<_> = record
            .fields
            .iter()
            .map(|f| describe(None, &f.member))
            .collect();
        assert_eq!(names, vec!["level", "name", "score"]);

        assert_eq!(squash(record.fields[0].range.as_deref().unwrap()), "1..100");
        assert!(matches!(record.fields[1].source(), GenerationSource::Strategy(_)));
        assert_eq!(record.fields[2].source(), GenerationSource::Default);
        assert!(sink.kinds().is_empty());
    }

    #[test]
    fn test_excluded_field_is_reported() {
        let input: DeriveInput = parse_quote! {
            struct Sample {
                a: i64,
                #[randomize(skip)]
                b: String,
                c: f64,
            }
        };
        let sink = DiagnosticCollector::new();
        let record = record(analyze(&input, &sink).unwrap());

        let excluded: Vec<bool> = record.fields.iter().map(|f| f.excluded).collect();
        assert_eq!(excluded, vec![false, true, false]);
        assert_eq!(
            sink.kinds(),
            vec![DiagnosticKind::Excluded {
                field: "b".to_string()
            }]
        );
    }

    #[test]
    fn test_unrandomizable_fields_are_excluded() {
        let input: DeriveInput = parse_quote! {
            struct View<'a, T> {
                label: &'a str,
                marker: PhantomData<T>,
                count: usize,
            }
        };
        let sink = DiagnosticCollector::new();
        let record = record(analyze(&input, &sink).unwrap());

        assert!(record.fields[0].excluded);
        assert!(record.fields[1].excluded);
        assert!(!record.fields[2].excluded);
        assert_eq!(sink.kinds().len(), 2);
    }

    #[test]
    fn test_malformed_field_annotation_degrades() {
        let input: DeriveInput = parse_quote! {
            struct Broken {
                #[randomize(between = 1)]
                value: u8,
            }
        };
        let sink = DiagnosticCollector::new();
        let record = record(analyze(&input, &sink).unwrap());

        assert_eq!(record.fields[0].source(), GenerationSource::Default);
        assert!(!record.fields[0].excluded);
        assert!(matches!(
            sink.kinds()[0],
            DiagnosticKind::MalformedAnnotation { .. }
        ));
    }

    #[test]
    fn test_both_sources_reported() {
        let input: DeriveInput = parse_quote! {
            struct Both {
                #[randomize(in = 1..4, strategy = Strategy::word(3))]
                value: String,
            }
        };
        let sink = DiagnosticCollector::new();
        let record = record(analyze(&input, &sink).unwrap());

        assert!(matches!(record.fields[0].source(), GenerationSource::Range(_)));
        assert_eq!(
            sink.kinds(),
            vec![DiagnosticKind::ConflictingSources {
                field: "value".to_string()
            }]
        );
    }

    #[test]
    fn test_tuple_struct_members() {
        let input: DeriveInput = parse_quote! {
            struct Meters(#[randomize(in = 0.0..10.0)] f64, u8);
        };
        let record = record(analyze(&input, &DiagnosticCollector::new()).unwrap());
        assert_eq!(record.shape, Shape::Tuple);
        assert_eq!(record.fields[1].member, Member::Unnamed(Index::from(1)));
    }

    #[test]
    fn test_variant_shapes_follow_declaration() {
        let input: DeriveInput = parse_quote! {
            enum Forms { Braced {}, Paren(), Bare, Full { x: u8 } }
        };
        let union = union(analyze(&input, &DiagnosticCollector::new()).unwrap());
        let shapes: Vec<Shape> = union.cases.iter().map(|c| c.shape).collect();
        assert_eq!(
            shapes,
            vec![Shape::Named, Shape::Tuple, Shape::Unit, Shape::Named]
        );
    }

    #[test]
    fn test_variant_tuple_override() {
        let input: DeriveInput = parse_quote! {
            enum Shape {
                #[randomize(case = (1..5, , 10..20))]
                Box(i32, i32, i32),
                Empty,
            }
        };
        let sink = DiagnosticCollector::new();
        let union = union(analyze(&input, &sink).unwrap());

        let overrides: Vec<_> = union.cases[0]
            .range_overrides
            .iter()
            .map(|o| o.as_deref().map(squash))
            .collect();
        assert_eq!(
            overrides,
            vec![Some("1..5".to_string()), None, Some("10..20".to_string())]
        );
        assert!(union.cases[1].range_overrides.is_empty());
        assert!(sink.kinds().is_empty());
    }

    #[test]
    fn test_variant_overrides_truncated_and_padded() {
        let input: DeriveInput = parse_quote! {
            enum Event {
                #[randomize(case = (0..1, 2..3, 4..5))]
                Move(u8, u8),
                #[randomize(case = 0..9)]
                Resize { width: u16, height: u16 },
            }
        };
        let sink = DiagnosticCollector::new();
        let union = union(analyze(&input, &sink).unwrap());

        assert_eq!(union.cases[0].range_overrides.len(), 2);
        assert_eq!(union.cases[1].range_overrides.len(), 2);
        assert!(union.cases[1].range_overrides[1].is_none());
        assert_eq!(
            union.cases[1].params[0].label.as_ref().unwrap(),
            "width"
        );
        assert_eq!(
            sink.kinds(),
            vec![DiagnosticKind::ExtraOverrides {
                variant: "Move".to_string(),
                params: 2,
                discarded: 1,
            }]
        );
    }

    #[test]
    fn test_mis_split_slot_becomes_no_override() {
        let input: DeriveInput = parse_quote! {
            enum Pick {
                #[randomize(case = ([1, 2].len()..9, 3..4))]
                Two(usize, u8),
            }
        };
        let sink = DiagnosticCollector::new();
        let union = union(analyze(&input, &sink).unwrap());

        // "[1" does not parse, "2].len()..9" does not parse, "3..4" is dropped as extra.
        assert_eq!(union.cases[0].range_overrides, vec![None, None]);
        let kinds = sink.kinds();
        assert!(matches!(kinds[0], DiagnosticKind::MalformedOverride { slot: 0, .. }));
        assert!(matches!(kinds[1], DiagnosticKind::MalformedOverride { slot: 1, .. }));
    }

    #[test]
    fn test_unsupported_kinds() {
        let sink = DiagnosticCollector::new();

        let empty: DeriveInput = parse_quote! { enum Never {} };
        assert!(analyze(&empty, &sink).is_none());

        let raw: DeriveInput = parse_quote! { union Bits { a: u32, b: f32 } };
        assert!(analyze(&raw, &sink).is_none());

        assert_eq!(sink.kinds().len(), 2);
    }
}
