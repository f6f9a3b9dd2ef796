use std::collections::HashSet;

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::ext::IdentExt;
use syn::{parse_macro_input, Data, DeriveInput, Fields, Lit, LitStr, Meta};

/// Derive macro for argument records.
///
/// Implements `argloader::ArgRecord` on the annotated struct: one field
/// descriptor per field carrying `#[arg(...)]`, in declaration order.
/// Fields without the attribute are not touched by the loader.
///
/// # Example
///
/// ```ignore
/// #[derive(ArgRecord, Default)]
/// pub struct HelloArgs {
///     #[arg(name = "name", required = "true", desc = "Your name")]
///     pub name: String,
///
///     #[arg(name = "greeting", desc = "How to say hello")]
///     pub greeting: String,
///
///     // not an argument
///     pub calls: u32,
/// }
/// ```
///
/// Attribute keys:
/// - `name = "..."` — argument name (defaults to the field name).
/// - `required`, `required = true`, `required = "true"` — a missing argument
///   is an error. String values must be a boolean literal.
/// - `desc = "..."` / `description = "..."` — documentation string.
///
/// `required` strings must be boolean literals:
///
/// ```compile_fail
/// use argloader::ArgRecord;
///
/// #[derive(ArgRecord)]
/// struct Bad {
///     #[arg(name = "name", required = "yes")]
///     name: String,
/// }
/// ```
///
/// Each argument name may be used by one field only:
///
/// ```compile_fail
/// use argloader::ArgRecord;
///
/// #[derive(ArgRecord)]
/// struct Bad {
///     #[arg(name = "name")]
///     first: String,
///     #[arg(name = "name")]
///     second: String,
/// }
/// ```
///
/// Unknown keys and empty names are rejected as well:
///
/// ```compile_fail
/// use argloader::ArgRecord;
///
/// #[derive(ArgRecord)]
/// struct Bad {
///     #[arg(name = "name", default = "Joe")]
///     name: String,
/// }
/// ```
///
/// ```compile_fail
/// use argloader::ArgRecord;
///
/// #[derive(ArgRecord)]
/// struct Bad {
///     #[arg(name = "")]
///     name: String,
/// }
/// ```
///
/// Only structs with named fields can be derived:
///
/// ```compile_fail
/// use argloader::ArgRecord;
///
/// #[derive(ArgRecord)]
/// struct Bad(#[arg(name = "name")] String);
/// ```
///
/// A well-formed record compiles:
///
/// ```
/// use argloader::ArgRecord;
///
/// #[derive(ArgRecord, Default)]
/// struct Good {
///     #[arg(name = "name", required = "true", desc = "Your name")]
///     name: String,
///     #[arg]
///     greeting: String,
/// }
///
/// let args: Vec<_> = Good::arg_fields().iter().map(|f| f.arg()).collect();
/// assert_eq!(args, ["name", "greeting"]);
/// ```
#[proc_macro_derive(ArgRecord, attributes(arg))]
pub fn derive_arg_record(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match derive_impl(&input) {
        Ok(tokens) => tokens.into(),
        Err(e) => e.to_compile_error().into(),
    }
}

struct ArgAttr {
    name: Option<LitStr>,
    required: Option<String>,
    description: Option<LitStr>,
}

fn derive_impl(input: &DeriveInput) -> Result<TokenStream2, syn::Error> {
    let name = &input.ident;

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    name,
                    "ArgRecord only supports structs with named fields",
                ))
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                name,
                "ArgRecord only supports structs",
            ))
        }
    };

    let mut seen_args = HashSet::new();
    let mut field_tokens = Vec::new();

    for field in fields {
        let field_name = field.ident.as_ref().ok_or_else(|| {
            syn::Error::new_spanned(field, "expected named field")
        })?;
        let field_name_str = field_name.unraw().to_string();
        let field_ty = &field.ty;

        let Some(attr) = parse_arg_attr(field)? else {
            continue;
        };

        let arg_name = attr
            .name
            .as_ref()
            .map(LitStr::value)
            .unwrap_or_else(|| field_name_str.clone());
        if arg_name.is_empty() {
            return Err(syn::Error::new_spanned(
                field_name,
                "argument name must not be empty",
            ));
        }
        if !seen_args.insert(arg_name.clone()) {
            return Err(syn::Error::new_spanned(
                field_name,
                format!("argument '{arg_name}' is declared by more than one field"),
            ));
        }

        let mut descriptor = quote! {
            ::argloader::ArgField::new::<#field_ty>(
                #field_name_str,
                #arg_name,
                |__record: &mut Self, __value| __record.#field_name = __value,
            )
        };
        if let Some(required) = &attr.required {
            descriptor = quote! { #descriptor.with_required(#required) };
        }
        if let Some(description) = &attr.description {
            descriptor = quote! { #descriptor.with_description(#description) };
        }
        field_tokens.push(descriptor);
    }

    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let expanded = quote! {
        impl #impl_generics ::argloader::ArgRecord for #name #ty_generics #where_clause {
            fn arg_fields() -> ::std::vec::Vec<::argloader::ArgField<Self>> {
                ::std::vec![
                    #(#field_tokens),*
                ]
            }
        }
    };

    Ok(expanded)
}

/// Parse the `#[arg(...)]` attribute of a field, if any.
fn parse_arg_attr(field: &syn::Field) -> Result<Option<ArgAttr>, syn::Error> {
    let mut found = None;

    for attr in &field.attrs {
        if !attr.path().is_ident("arg") {
            continue;
        }
        if found.is_some() {
            return Err(syn::Error::new_spanned(attr, "duplicate #[arg] attribute"));
        }

        let mut parsed = ArgAttr {
            name: None,
            required: None,
            description: None,
        };

        // Bare `#[arg]` exposes the field under its own name.
        if !matches!(attr.meta, Meta::Path(_)) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("name") {
                    parsed.name = Some(meta.value()?.parse()?);
                } else if meta.path.is_ident("desc") || meta.path.is_ident("description") {
                    parsed.description = Some(meta.value()?.parse()?);
                } else if meta.path.is_ident("required") {
                    if meta.input.is_empty() || meta.input.peek(syn::Token![,]) {
                        parsed.required = Some("true".to_string());
                        return Ok(());
                    }
                    let tag = match meta.value()?.parse::<Lit>()? {
                        Lit::Bool(b) => b.value.to_string(),
                        Lit::Str(s) => {
                            let text = s.value();
                            if parse_bool_tag(&text).is_none() {
                                return Err(syn::Error::new_spanned(
                                    s,
                                    format!("'{text}' is not a valid 'required' value"),
                                ));
                            }
                            text
                        }
                        other => {
                            return Err(syn::Error::new_spanned(
                                other,
                                "expected `required`, `required = <bool>` or `required = \"<bool>\"`",
                            ))
                        }
                    };
                    parsed.required = Some(tag);
                } else {
                    return Err(meta.error("unknown #[arg] key (expected name, required, desc)"));
                }
                Ok(())
            })?;
        }

        found = Some(parsed);
    }

    Ok(found)
}

/// Same literal set the runtime accepts for a textual `required` tag.
fn parse_bool_tag(tag: &str) -> Option<bool> {
    match tag {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}
