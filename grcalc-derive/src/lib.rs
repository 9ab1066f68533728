use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, Data, DeriveInput, Fields, Lit, Meta};

/// Derive macro for closed, externally labelled enumerations.
///
/// Every variant must be a unit variant. The external label is taken from
/// `#[label = "..."]` when present, otherwise from the variant name.
///
/// Generates:
/// - `ALL: &'static [Self]` in declaration order
/// - `label(&self) -> &'static str`
/// - `from_label(&str) -> Option<Self>` (trimmed, ASCII case-insensitive)
/// - `Display` and `serde::Serialize`, both writing the label
#[proc_macro_derive(Labelled, attributes(label))]
pub fn derive_labelled(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let name = &input.ident;

    let variants = match &input.data {
        Data::Enum(data) => &data.variants,
        _ => panic!("Labelled only supports enums"),
    };

    let (idents, labels): (Vec<_>, Vec<_>) = variants
        .iter()
        .map(|variant| {
            if !matches!(variant.fields, Fields::Unit) {
                panic!("Labelled only supports unit variants");
            }
            let label = get_label(&variant.attrs).unwrap_or_else(|| variant.ident.to_string());
            (&variant.ident, label)
        })
        .unzip();

    let expanded = quote! {
        impl #name {
            pub const ALL: &'static [#name] = &[
                #(#name::#idents),*
            ];

            pub fn label(&self) -> &'static str {
                match self {
                    #(#name::#idents => #labels),*
                }
            }

            pub fn from_label(value: &str) -> ::std::option::Option<Self> {
                let value = value.trim();
                Self::ALL
                    .iter()
                    .copied()
                    .find(|candidate| candidate.label().eq_ignore_ascii_case(value))
            }
        }

        impl ::std::fmt::Display for #name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.label())
            }
        }

        impl ::serde::Serialize for #name {
            fn serialize<S>(&self, serializer: S) -> ::std::result::Result<S::Ok, S::Error>
            where
                S: ::serde::Serializer,
            {
                serializer.serialize_str(self.label())
            }
        }
    };

    TokenStream::from(expanded)
}

fn get_label(attrs: &[syn::Attribute]) -> Option<String> {
    attrs.iter().find_map(|attr| {
        if !attr.path().is_ident("label") {
            return None;
        }
        if let Meta::NameValue(meta) = &attr.meta {
            if let syn::Expr::Lit(expr_lit) = &meta.value {
                if let Lit::Str(lit_str) = &expr_lit.lit {
                    return Some(lit_str.value());
                }
            }
        }
        panic!("expected #[label = \"...\"]");
    })
}
