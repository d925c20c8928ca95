use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, Data, DeriveInput, Fields, Ident};

/// Implements `paginate::TotalCount` by reading an integer field.
///
/// The field is the one marked `#[total_count]`, or else the field named
/// `total_count`.
#[proc_macro_derive(TotalCount, attributes(total_count))]
pub fn derive_total_count(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let field = match total_count_field(&input) {
        Ok(field) => field,
        Err(err) => return err.to_compile_error().into(),
    };

    let expanded = quote! {
        impl #impl_generics ::paginate::TotalCount for #name #ty_generics #where_clause {
            fn total_count(&self) -> i64 {
                <i64 as ::core::convert::TryFrom<_>>::try_from(self.#field).unwrap_or(i64::MAX)
            }
        }
    };

    TokenStream::from(expanded)
}

fn total_count_field(input: &DeriveInput) -> syn::Result<Ident> {
    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    &input.ident,
                    "TotalCount can only be derived for structs with named fields",
                ))
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                &input.ident,
                "TotalCount can only be derived for structs",
            ))
        }
    };

    let marked = fields
        .iter()
        .find(|field| field.attrs.iter().any(|attr| attr.path().is_ident("total_count")));

    let named = || {
        fields
            .iter()
            .find(|field| field.ident.as_ref().is_some_and(|ident| ident == "total_count"))
    };

    marked
        .or_else(named)
        .and_then(|field| field.ident.clone())
        .ok_or_else(|| {
            syn::Error::new_spanned(
                &input.ident,
                "TotalCount needs a `total_count` field or a field marked #[total_count]",
            )
        })
}
