//! Model derive macro implementation
//!
//! Reads `#[model(...)]` attributes from named struct fields and emits a
//! `Model` impl whose `field_declarations()` lists every field in declaration
//! order with its raw annotation values. Boolean values are passed through as
//! written; their interpretation happens at registration time.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{
    ext::IdentExt,
    meta::ParseNestedMeta,
    parse::Result,
    parse_macro_input, Data, DeriveInput, Error, Field, Fields, Lit, LitStr, Token,
};

/// Main implementation function for the Model derive
pub fn derive_model_impl(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match expand(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

/// Raw annotation values of one field
#[derive(Debug, Default)]
struct FieldAnnotations {
    table: Option<LitStr>,
    primary_key: Option<LitStr>,
    column: Option<LitStr>,
    soft_delete: Option<LitStr>,
}

fn expand(input: &DeriveInput) -> Result<TokenStream2> {
    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return Err(Error::new_spanned(
                    &input.ident,
                    "#[derive(Model)] requires a struct with named fields",
                ))
            }
        },
        _ => {
            return Err(Error::new_spanned(
                &input.ident,
                "#[derive(Model)] can only be applied to structs",
            ))
        }
    };

    let declarations = fields
        .iter()
        .map(field_declaration)
        .collect::<Result<Vec<_>>>()?;

    let struct_name = &input.ident;
    let model_name = struct_name.unraw().to_string();
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics ::model_registry::Model for #struct_name #ty_generics #where_clause {
            fn model_name() -> &'static str {
                #model_name
            }

            fn field_declarations() -> ::std::vec::Vec<::model_registry::FieldDeclaration> {
                ::std::vec![#(#declarations),*]
            }
        }
    })
}

fn field_declaration(field: &Field) -> Result<TokenStream2> {
    let name = field
        .ident
        .as_ref()
        .map(|ident| ident.unraw().to_string())
        .ok_or_else(|| Error::new_spanned(field, "expected a named field"))?;

    let annotations = parse_annotations(field)?;

    let mut declaration = quote! { ::model_registry::FieldDeclaration::new(#name) };
    if let Some(table) = annotations.table {
        declaration = quote! { #declaration.table(#table) };
    }
    if let Some(primary_key) = annotations.primary_key {
        declaration = quote! { #declaration.primary_key(#primary_key) };
    }
    if let Some(column) = annotations.column {
        declaration = quote! { #declaration.column(#column) };
    }
    if let Some(soft_delete) = annotations.soft_delete {
        declaration = quote! { #declaration.soft_delete(#soft_delete) };
    }

    Ok(declaration)
}

fn parse_annotations(field: &Field) -> Result<FieldAnnotations> {
    let mut annotations = FieldAnnotations::default();

    for attr in field.attrs.iter().filter(|attr| attr.path().is_ident("model")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("table") {
                set_once(&mut annotations.table, string_value(&meta)?, &meta, "table")
            } else if meta.path.is_ident("primary_key") {
                set_once(&mut annotations.primary_key, flag_value(&meta)?, &meta, "primary_key")
            } else if meta.path.is_ident("column") {
                set_once(&mut annotations.column, string_value(&meta)?, &meta, "column")
            } else if meta.path.is_ident("soft_delete") {
                set_once(&mut annotations.soft_delete, flag_value(&meta)?, &meta, "soft_delete")
            } else {
                Err(meta.error(
                    "unsupported model attribute, expected `table`, `primary_key`, `column` or `soft_delete`",
                ))
            }
        })?;
    }

    Ok(annotations)
}

fn set_once(slot: &mut Option<LitStr>, value: LitStr, meta: &ParseNestedMeta, key: &str) -> Result<()> {
    if slot.is_some() {
        return Err(meta.error(format!("duplicate `{}` attribute", key)));
    }
    *slot = Some(value);
    Ok(())
}

/// `key = "value"`
fn string_value(meta: &ParseNestedMeta) -> Result<LitStr> {
    meta.value()?.parse::<LitStr>()
}

/// Bare `key`, `key = true`, `key = 1` or `key = "raw"`
fn flag_value(meta: &ParseNestedMeta) -> Result<LitStr> {
    let span = meta.path.get_ident().map(|ident| ident.span()).unwrap_or_else(proc_macro2::Span::call_site);

    if !meta.input.peek(Token![=]) {
        return Ok(LitStr::new("true", span));
    }

    match meta.value()?.parse::<Lit>()? {
        Lit::Str(value) => Ok(value),
        Lit::Bool(value) => Ok(LitStr::new(if value.value { "true" } else { "false" }, value.span)),
        Lit::Int(value) => Ok(LitStr::new(value.base10_digits(), value.span())),
        other => Err(Error::new_spanned(other, "expected a boolean, integer or string literal")),
    }
}
