mod decode_column;
mod decode_table;

use decode_table::{TableMetadata, decode_table};
use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{ItemStruct, parse_macro_input};

fn optional<T: quote::ToTokens>(value: Option<T>) -> TokenStream2 {
    match value {
        Some(v) => quote!(::std::option::Option::Some(#v)),
        None => quote!(::std::option::Option::None),
    }
}

/// Implements `tether::Entity` for a struct with named fields.
///
/// The struct must implement `Default`, which provides the blank instance rows are loaded into.
///
/// ```rust,ignore
/// #[derive(Default, Entity)]
/// #[tether(table = "clients")]
/// struct Client {
///     #[tether(column = "id", sql_type = "INTEGER", primary_key, auto_increment)]
///     id: Option<i64>,
///     #[tether(column = "phone_number", sql_type = "VARCHAR", length = 16, default = "+48 000-000-000")]
///     phone: Option<String>,
/// }
/// ```
#[proc_macro_derive(Entity, attributes(tether))]
pub fn derive_entity(input: TokenStream) -> TokenStream {
    let item = parse_macro_input!(input as ItemStruct);
    match decode_table(&item) {
        Ok(table) => encode_entity(&item, table).into(),
        Err(e) => e.to_compile_error().into(),
    }
}

fn encode_entity(item: &ItemStruct, table: TableMetadata) -> TokenStream2 {
    let ident = &item.ident;
    let type_name = ident.to_string();
    let table_name = optional(table.name);
    let fields_count = table.columns.len();
    let field_defs = table.columns.iter().map(|c| {
        let name = c.ident.to_string();
        let column = optional(c.column.as_deref());
        let sql_type = optional(c.sql_type.as_deref());
        let length = optional(c.length);
        let default = optional(c.default.as_deref());
        let (not_null, unique, primary_key, auto_increment) =
            (c.not_null, c.unique, c.primary_key, c.auto_increment);
        quote! {
            ::tether::FieldDef {
                name: #name,
                column: #column,
                sql_type: #sql_type,
                length: #length,
                not_null: #not_null,
                unique: #unique,
                primary_key: #primary_key,
                auto_increment: #auto_increment,
                default: #default,
            }
        }
    });
    let names: Vec<_> = table.columns.iter().map(|c| c.ident.to_string()).collect();
    let idents: Vec<_> = table.columns.iter().map(|c| &c.ident).collect();
    let types: Vec<_> = table.columns.iter().map(|c| &c.ty).collect();
    quote! {
        impl ::tether::Entity for #ident {
            fn table_def() -> &'static ::tether::TableDef {
                static FIELDS: [::tether::FieldDef; #fields_count] = [#(#field_defs),*];
                static TABLE: ::tether::TableDef = ::tether::TableDef {
                    type_name: #type_name,
                    table: #table_name,
                    fields: &FIELDS,
                };
                &TABLE
            }

            fn get_property(&self, name: &str) -> ::tether::Result<::tether::Value> {
                match name {
                    #(#names => ::std::result::Result::Ok(::tether::AsValue::as_value(
                        ::std::clone::Clone::clone(&self.#idents),
                    )),)*
                    _ => ::std::result::Result::Err(::tether::Error::PropertyNotFound(name.into())),
                }
            }

            fn set_property(
                &mut self,
                name: &str,
                value: ::tether::Value,
            ) -> ::tether::Result<()> {
                match name {
                    #(#names => {
                        self.#idents = <#types as ::tether::AsValue>::try_from_value(value)?;
                    })*
                    _ => {
                        return ::std::result::Result::Err(
                            ::tether::Error::PropertyNotFound(name.into()),
                        );
                    }
                }
                ::std::result::Result::Ok(())
            }

            fn blank() -> ::std::option::Option<Self> {
                ::std::option::Option::Some(::std::default::Default::default())
            }
        }
    }
}
