//! `#[derive(Settings)]` for layerconf record types.
//!
//! Responsibilities:
//! - Generate the `Settings` impl: one `FieldDescriptor` per named field, in
//!   declaration order, carrying the `#[setting(..)]` metadata.
//! - Generate the `Record` impl: index-based shared and mutable field access
//!   matching that order.
//!
//! Does NOT handle:
//! - File-side naming; `#[serde(..)]` attributes are left to serde.
//! - Checking that nested types implement `Settings` (the generated code fails
//!   to compile if they do not).
//!
//! Invariants:
//! - Field kinds are classified syntactically: a known scalar type is a leaf,
//!   `Vec<scalar>` is a list leaf, `Vec<Other>` is a list of records, and any
//!   other type is a nested record.
//! - `default`, `required` and `secret` are only accepted on leaf fields.

use proc_macro::TokenStream;
use proc_macro2::{Literal, TokenStream as TokenStream2};
use quote::quote;
use syn::ext::IdentExt;
use syn::spanned::Spanned;
use syn::{
    Data, DeriveInput, Field, Fields, GenericArgument, LitStr, PathArguments, PathSegment, Type,
    parse_macro_input,
};

/// Type names treated as scalar leaves.
const SCALAR_TYPES: &[&str] = &[
    "String",
    "bool",
    "i8",
    "i16",
    "i32",
    "i64",
    "isize",
    "u8",
    "u16",
    "u32",
    "u64",
    "usize",
    "f32",
    "f64",
    "SecretString",
];

#[proc_macro_derive(Settings, attributes(setting))]
pub fn derive_settings(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

#[derive(Default)]
#[cfg_attr(test, derive(Debug))]
struct SettingAttrs {
    env: Option<LitStr>,
    default: Option<LitStr>,
    required: bool,
    secret: bool,
}

enum Shape<'a> {
    Leaf,
    Record,
    Records(&'a Type),
}

impl Shape<'_> {
    fn is_leaf(&self) -> bool {
        matches!(self, Shape::Leaf)
    }
}

fn parse_attrs(field: &Field) -> syn::Result<SettingAttrs> {
    let mut attrs = SettingAttrs::default();
    for attr in field.attrs.iter().filter(|a| a.path().is_ident("setting")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("env") {
                attrs.env = Some(meta.value()?.parse()?);
            } else if meta.path.is_ident("default") {
                attrs.default = Some(meta.value()?.parse()?);
            } else if meta.path.is_ident("required") {
                attrs.required = true;
            } else if meta.path.is_ident("secret") {
                attrs.secret = true;
            } else {
                return Err(meta.error("expected `env`, `default`, `required` or `secret`"));
            }
            Ok(())
        })?;
    }
    Ok(attrs)
}

fn last_segment(ty: &Type) -> Option<&PathSegment> {
    match ty {
        Type::Path(path) if path.qself.is_none() => path.path.segments.last(),
        _ => None,
    }
}

fn is_scalar(ty: &Type) -> bool {
    last_segment(ty).is_some_and(|segment| {
        segment.arguments.is_none() && SCALAR_TYPES.iter().any(|name| segment.ident == name)
    })
}

fn vec_element(ty: &Type) -> Option<&Type> {
    let segment = last_segment(ty)?;
    if segment.ident != "Vec" {
        return None;
    }
    let PathArguments::AngleBracketed(args) = &segment.arguments else {
        return None;
    };
    args.args.iter().find_map(|arg| match arg {
        GenericArgument::Type(ty) => Some(ty),
        _ => None,
    })
}

fn classify(ty: &Type) -> Shape<'_> {
    if is_scalar(ty) {
        return Shape::Leaf;
    }
    match vec_element(ty) {
        Some(element) if is_scalar(element) => Shape::Leaf,
        Some(element) => Shape::Records(element),
        None => Shape::Record,
    }
}

fn descriptor(field: &Field) -> syn::Result<TokenStream2> {
    let attrs = parse_attrs(field)?;
    let ty = &field.ty;
    let name = field
        .ident
        .as_ref()
        .map(|ident| ident.unraw().to_string())
        .unwrap_or_default();

    let shape = classify(ty);
    if !shape.is_leaf() && (attrs.default.is_some() || attrs.required || attrs.secret) {
        return Err(syn::Error::new(
            ty.span(),
            "`default`, `required` and `secret` apply only to scalar and list-of-scalar fields",
        ));
    }

    let mut tokens = match shape {
        Shape::Leaf => quote! {
            ::layerconf::FieldDescriptor::new(#name, <#ty as ::layerconf::ScalarField>::KIND)
        },
        Shape::Record => quote! {
            ::layerconf::FieldDescriptor::record(#name, <#ty as ::layerconf::Settings>::schema)
        },
        Shape::Records(element) => quote! {
            ::layerconf::FieldDescriptor::records(#name, <#element as ::layerconf::Settings>::schema)
        },
    };
    if let Some(env) = &attrs.env {
        tokens.extend(quote! { .env(#env) });
    }
    if let Some(default) = &attrs.default {
        tokens.extend(quote! { .default_value(#default) });
    }
    if attrs.required {
        tokens.extend(quote! { .required() });
    }
    if attrs.secret {
        tokens.extend(quote! { .secret() });
    }
    Ok(tokens)
}

fn expand(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let Data::Struct(data) = &input.data else {
        return Err(syn::Error::new(
            input.ident.span(),
            "Settings can only be derived for structs",
        ));
    };
    let Fields::Named(named) = &data.fields else {
        return Err(syn::Error::new(
            data.fields.span(),
            "Settings requires a struct with named fields",
        ));
    };
    let fields: Vec<&Field> = named.named.iter().collect();

    let descriptors = fields
        .iter()
        .copied()
        .map(descriptor)
        .collect::<syn::Result<Vec<_>>>()?;

    let mut shared_arms = Vec::with_capacity(fields.len());
    let mut mut_arms = Vec::with_capacity(fields.len());
    for (index, field) in fields.iter().enumerate() {
        let index = Literal::usize_unsuffixed(index);
        let ident = &field.ident;
        let (shared, exclusive) = match classify(&field.ty) {
            Shape::Leaf => (
                quote! { ::layerconf::FieldRef::Scalar(&self.#ident as &dyn ::layerconf::Slot) },
                quote! { ::layerconf::FieldMut::Scalar(&mut self.#ident as &mut dyn ::layerconf::Slot) },
            ),
            Shape::Record => (
                quote! { ::layerconf::FieldRef::Record(&self.#ident as &dyn ::layerconf::Record) },
                quote! { ::layerconf::FieldMut::Record(&mut self.#ident as &mut dyn ::layerconf::Record) },
            ),
            Shape::Records(_) => (
                quote! { ::layerconf::FieldRef::Records(&self.#ident as &dyn ::layerconf::RecordList) },
                quote! { ::layerconf::FieldMut::Records(&mut self.#ident as &mut dyn ::layerconf::RecordList) },
            ),
        };
        shared_arms.push(quote! { #index => ::std::option::Option::Some(#shared), });
        mut_arms.push(quote! { #index => ::std::option::Option::Some(#exclusive), });
    }

    let ident = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics ::layerconf::Settings for #ident #ty_generics #where_clause {
            fn fields() -> ::std::vec::Vec<::layerconf::FieldDescriptor> {
                ::std::vec![#(#descriptors),*]
            }
        }

        impl #impl_generics ::layerconf::Record for #ident #ty_generics #where_clause {
            fn record_schema(&self) -> ::std::sync::Arc<::layerconf::Schema> {
                <Self as ::layerconf::Settings>::schema()
            }

            fn field(&self, index: usize) -> ::std::option::Option<::layerconf::FieldRef<'_>> {
                match index {
                    #(#shared_arms)*
                    _ => ::std::option::Option::None,
                }
            }

            fn field_mut(&mut self, index: usize) -> ::std::option::Option<::layerconf::FieldMut<'_>> {
                match index {
                    #(#mut_arms)*
                    _ => ::std::option::Option::None,
                }
            }
        }
    })
}
