use darling::{FromDeriveInput, FromField, ast::Data};
use proc_macro_error2::abort;
use proc_macro2::TokenStream;
use quote::quote;
use syn::{DeriveInput, Ident, parse2};

#[derive(FromField)]
#[darling(attributes(kmedia))]
struct RowField {
    ident: Option<Ident>,
    column: Option<String>,
    #[darling(default)]
    skip: bool,
}

impl RowField {
    /// `field: <value>,` inside the generated struct literal.
    fn assignment(&self) -> TokenStream {
        let Some(ident) = &self.ident else {
            abort! {
                self.ident, "Field has no name";
                note = "FromSqlxRow cannot be derived for tuple structs.";
            };
        };

        if self.skip {
            return quote! { #ident: ::std::default::Default::default(), };
        }

        let column = self.column.clone().unwrap_or_else(|| ident.to_string());

        quote! { #ident: ::kmedia::sqlx::Row::try_get(row, #column)?, }
    }
}

#[derive(FromDeriveInput)]
struct RowTarget {
    ident: Ident,
    data: Data<(), RowField>,
}

/// Implement `ParseFromRow` by reading every field from the column of the same name, or the one
/// given with `#[kmedia(column = "...")]`.
pub fn parse_from_row(input: TokenStream) -> TokenStream {
    let input: DeriveInput = match parse2(input) {
        Ok(e) => e,
        Err(e) => return e.to_compile_error(),
    };

    let target = match RowTarget::from_derive_input(&input) {
        Ok(e) => e,
        Err(e) => return e.write_errors(),
    };

    let ident = target.ident;

    let Some(fields) = target.data.take_struct() else {
        abort! {
            ident, "Target is not a struct";
            note = "FromSqlxRow can only be derived for structs with named fields.";
        };
    };

    let assignments = fields.iter().map(RowField::assignment);

    quote! {
        impl ::kmedia::query::parse::ParseFromRow for #ident {
            fn parse_from_row(
                row: &::kmedia::sqlx::postgres::PgRow,
            ) -> ::std::result::Result<Self, ::kmedia::sqlx::Error> {
                ::std::result::Result::Ok(Self {
                    #(#assignments)*
                })
            }
        }
    }
}
