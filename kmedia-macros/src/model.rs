use convert_case::{Case, Casing};
use darling::{FromDeriveInput, FromField, ast::Data};
use proc_macro_error2::{abort, emit_error};
use proc_macro2::TokenStream;
use quote::quote;
use syn::{DeriveInput, Ident, Type, parse2};

#[derive(FromField, Debug, Clone)]
#[darling(attributes(kmedia))]
struct DeriveModelField {
    ident: Option<Ident>,
    ty: Type,
    column: Option<String>,
    #[darling(default)]
    primary_key: bool,
    #[darling(default, rename = "default")]
    has_default: bool,
    #[darling(default)]
    skip: bool,
}

#[derive(FromDeriveInput)]
#[darling(attributes(kmedia))]
struct DeriveModelTarget {
    ident: Ident,
    table: Option<String>,
    data: Data<(), DeriveModelField>,
}

#[derive(Clone)]
struct TargetColumn {
    field_ident: Ident,
    db_name: String,
    struct_ident: Ident,
    ty: Type,
    primary_key: bool,
    has_default: bool,
}

pub fn derive_database_model(input: TokenStream) -> TokenStream {
    let input: DeriveInput = match parse2(input) {
        Ok(e) => e,
        Err(e) => return e.to_compile_error(),
    };

    let target = match DeriveModelTarget::from_derive_input(&input) {
        Ok(r) => r,
        Err(e) => return e.write_errors(),
    };

    let Some(struct_data) = target.data.take_struct() else {
        abort! {
            input, "Target is not a struct.";
            note = "This macro must be run on a struct.";
        };
    };

    let skipped = struct_data
        .fields
        .iter()
        .filter(|e| e.skip)
        .filter_map(|e| e.ident.clone())
        .collect::<Vec<_>>();

    let columns = struct_data
        .fields
        .iter()
        .filter(|e| !e.skip)
        .map(|e| {
            let Some(ident) = &e.ident else {
                abort! {
                    e.ident, "Field has no ident.";
                    note = "This macro cannot be run on tuple structs.";
                };
            };

            TargetColumn {
                field_ident: ident.clone(),
                db_name: e.column.as_ref().cloned().unwrap_or(ident.to_string()),
                struct_ident: Ident::new(&ident.to_string().to_case(Case::Pascal), ident.span()),
                ty: e.ty.clone(),
                primary_key: e.primary_key,
                has_default: e.has_default,
            }
        })
        .collect::<Vec<_>>();

    // Make sure all columns have unique names.
    if let Some(duplicate) = columns
        .iter()
        .find(|e| columns.iter().filter(|o| e.db_name.eq(&o.db_name)).count() > 1)
    {
        columns.iter().for_each(|e| {
            if columns.iter().filter(|o| e.db_name.eq(&o.db_name)).count() > 1 {
                emit_error! {
                    e.field_ident.span(), "Clashing occurrence of \"{}\" here.", e.db_name
                };
            }
        });

        abort! {
            duplicate.field_ident.span(), "Duplicate column definition \"{}\"", duplicate.db_name;
            note = "Columns must have unique names, if necessary use the #[kmedia(column = \"my_column_name\")] attribute to specify a unique name.";
        }
    }

    let primary_key = columns.iter().filter(|e| e.primary_key).collect::<Vec<_>>();
    if primary_key.is_empty() {
        abort! {
            input, "Missing primary key.";
            note = "Mark the primary key column(s) with #[kmedia(primary_key)].";
        }
    }

    let model_ident = &target.ident;

    let columns_module = {
        let column_impls = columns.iter().map(|e| {
            let struct_ident = &e.struct_ident;
            let field_ident = &e.field_ident;
            let db_name = &e.db_name;
            let ty = &e.ty;

            quote! {
                pub struct #struct_ident;

                impl ::kmedia::entity::column::Column for #struct_ident {
                    type Type = #ty;
                    type Entity = super::Entity;
                    const NAME: &'static str = #db_name;

                    fn get(model: &super::#model_ident) -> &Self::Type {
                        &model.#field_ident
                    }

                    fn set(model: &mut super::#model_ident, value: Self::Type) {
                        model.#field_ident = value;
                    }
                }
            }
        });

        quote! {
            pub mod columns {
                #[allow(unused_imports)]
                use super::*;

                #(
                    #column_impls
                )*
            }
        }
    };

    let entity_impl = {
        let table_name = target
            .table
            .unwrap_or(target.ident.to_string().to_case(Case::Snake));

        let column_names = columns.iter().map(|e| &e.db_name);
        let with_default = columns.iter().filter(|e| e.has_default).map(|e| &e.db_name);
        let without_default = columns.iter().filter(|e| !e.has_default).map(|e| &e.db_name);
        let primary_key_names = primary_key.iter().map(|e| &e.db_name);

        quote! {
            pub struct Entity;

            impl ::kmedia::entity::Entity for Entity {
                type Model = #model_ident;

                const TABLE_NAME: &'static str = #table_name;

                const COLUMN_NAMES: &'static [&'static str] = &[
                    #(#column_names),*
                ];

                const COLUMNS_WITH_DEFAULT: &'static [&'static str] = &[
                    #(#with_default),*
                ];

                const COLUMNS_WITHOUT_DEFAULT: &'static [&'static str] = &[
                    #(#without_default),*
                ];

                const PRIMARY_KEY_COLUMNS: &'static [&'static str] = &[
                    #(#primary_key_names),*
                ];

                fn statement_cache() -> &'static ::kmedia::query::cache::StatementCache {
                    static CACHE: ::std::sync::LazyLock<::kmedia::query::cache::StatementCache> =
                        ::std::sync::LazyLock::new(::std::default::Default::default);

                    &CACHE
                }
            }
        }
    };

    let model_impl = {
        let (primary_key_type, primary_key_value, primary_key_binds) = if let [single] =
            primary_key.as_slice()
        {
            let ty = &single.ty;
            let ident = &single.field_ident;

            (
                quote! { #ty },
                quote! { ::std::clone::Clone::clone(&self.#ident) },
                quote! { query.bind(key) },
            )
        } else {
            let types = primary_key.iter().map(|e| &e.ty);
            let idents = primary_key.iter().map(|e| &e.field_ident);
            let indices = (0..primary_key.len()).map(syn::Index::from);

            (
                quote! { (#(#types),*) },
                quote! { (#(::std::clone::Clone::clone(&self.#idents)),*) },
                quote! { query #(.bind(key.#indices))* },
            )
        };

        let bind_arms = columns.iter().map(|e| {
            let field_ident = &e.field_ident;
            let db_name = &e.db_name;

            quote! {
                #db_name => Ok(query.bind(::std::clone::Clone::clone(&self.#field_ident))),
            }
        });

        let assign_arms = columns.iter().map(|e| {
            let field_ident = &e.field_ident;
            let struct_ident = &e.struct_ident;
            let db_name = &e.db_name;

            quote! {
                #db_name => self.#field_ident = columns::#struct_ident::value_from_row(row)?,
            }
        });

        let non_zero_checks = columns.iter().filter(|e| e.has_default).map(|e| {
            let field_ident = &e.field_ident;
            let db_name = &e.db_name;
            let ty = &e.ty;

            quote! {
                if self.#field_ident != <#ty as ::std::default::Default>::default() {
                    columns.push(#db_name);
                }
            }
        });

        let has_column = |name: &str| columns.iter().any(|e| e.db_name == name);
        let touch_timestamps = if has_column("created_at") || has_column("updated_at") {
            let fill_created = has_column("created_at").then(|| quote! {
                self.created_at.fill_if_unset(now);
            });
            let fill_updated = has_column("updated_at").then(|| quote! {
                self.updated_at.fill_if_unset(now);
            });
            let stamp_updated = has_column("updated_at").then(|| quote! {
                self.updated_at.stamp(now);
            });

            quote! {
                fn touch_timestamps(
                    &mut self,
                    now: ::kmedia::chrono::NaiveDateTime,
                    touch: ::kmedia::entity::model::Touch,
                ) {
                    use ::kmedia::entity::model::{Timestamp as _, Touch};

                    match touch {
                        Touch::Insert => {
                            #fill_created
                            #fill_updated
                        }
                        Touch::Update => {
                            #stamp_updated
                        }
                        Touch::Upsert => {
                            #fill_created
                            #stamp_updated
                        }
                    }
                }
            }
        } else {
            quote! {}
        };

        let column_field_assignments = columns.iter().map(|e| {
            let field_ident = &e.field_ident;
            let struct_ident = &e.struct_ident;

            quote! {
                #field_ident: columns::#struct_ident::value_from_row(row)?,
            }
        });

        quote! {
            impl ::kmedia::entity::model::Model for #model_ident {
                type Entity = Entity;
                type PrimaryKey = #primary_key_type;

                fn primary_key(&self) -> Self::PrimaryKey {
                    #primary_key_value
                }

                fn bind_primary_key<'q>(
                    key: Self::PrimaryKey,
                    query: ::kmedia::entity::model::PgQuery<'q>,
                ) -> ::kmedia::entity::model::PgQuery<'q> {
                    #primary_key_binds
                }

                fn bind_column<'q>(
                    &self,
                    column: &str,
                    query: ::kmedia::entity::model::PgQuery<'q>,
                ) -> ::kmedia::Result<::kmedia::entity::model::PgQuery<'q>> {
                    match column {
                        #(
                            #bind_arms
                        )*
                        _ => Err(::kmedia::Error::UnknownColumn {
                            table: <Entity as ::kmedia::entity::Entity>::TABLE_NAME,
                            column: column.to_string(),
                        }),
                    }
                }

                fn assign_column(
                    &mut self,
                    column: &str,
                    row: &::kmedia::sqlx::postgres::PgRow,
                ) -> ::std::result::Result<(), ::kmedia::sqlx::Error> {
                    use ::kmedia::entity::column::Column as _;

                    match column {
                        #(
                            #assign_arms
                        )*
                        _ => return Err(::kmedia::sqlx::Error::ColumnNotFound(column.to_string())),
                    }

                    Ok(())
                }

                fn non_zero_defaults(&self) -> ::std::vec::Vec<&'static str> {
                    #[allow(unused_mut)]
                    let mut columns = ::std::vec::Vec::new();

                    #(
                        #non_zero_checks
                    )*

                    columns
                }

                #touch_timestamps
            }

            impl ::kmedia::query::parse::ParseFromRow for #model_ident {
                fn parse_from_row(
                    row: &::kmedia::sqlx::postgres::PgRow,
                ) -> ::std::result::Result<Self, ::kmedia::sqlx::Error> {
                    use ::kmedia::entity::column::Column as _;

                    Ok(Self {
                        #(
                            #column_field_assignments
                        )*
                        #(
                            #skipped: ::std::default::Default::default(),
                        )*
                    })
                }
            }
        }
    };

    quote! {
        #model_impl

        #entity_impl

        #columns_module
    }
}
