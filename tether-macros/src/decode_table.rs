use crate::decode_column::{ColumnMetadata, decode_column};
use syn::{Error, ItemStruct, LitStr, Result, parse::ParseBuffer, spanned::Spanned};

pub(crate) struct TableMetadata {
    pub(crate) name: Option<String>,
    pub(crate) columns: Vec<ColumnMetadata>,
}

pub(crate) fn decode_table(item: &ItemStruct) -> Result<TableMetadata> {
    if !item.generics.params.is_empty() {
        return Err(Error::new(
            item.generics.span(),
            "Entities cannot be generic",
        ));
    }
    let columns = item
        .fields
        .iter()
        .map(decode_column)
        .collect::<Result<Vec<_>>>()?;
    let mut name = None;
    for attr in &item.attrs {
        if !attr.path().is_ident("tether") {
            continue;
        }
        attr.parse_nested_meta(|arg| {
            if arg.path.is_ident("table") {
                let v = arg.value().and_then(ParseBuffer::parse::<LitStr>).map_err(|e| {
                    Error::new(
                        e.span(),
                        "Error while parsing `table`, use it like: `#[tether(table = \"my_table\")]`",
                    )
                })?;
                name = Some(v.value());
                Ok(())
            } else {
                Err(arg.error(
                    "Unknown attribute inside tether macro, the struct accepts only `table`",
                ))
            }
        })?;
    }
    Ok(TableMetadata { name, columns })
}
