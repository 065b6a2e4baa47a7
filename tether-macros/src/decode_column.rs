use proc_macro2::Span;
use syn::{
    Error, Field, GenericArgument, Ident, Lit, LitInt, LitStr, PathArguments, Result, Type,
    parse::ParseBuffer, spanned::Spanned,
};

pub(crate) struct ColumnMetadata {
    pub(crate) ident: Ident,
    pub(crate) ty: Type,
    pub(crate) column: Option<String>,
    pub(crate) sql_type: Option<String>,
    pub(crate) length: Option<i64>,
    pub(crate) not_null: bool,
    pub(crate) unique: bool,
    pub(crate) primary_key: bool,
    pub(crate) auto_increment: bool,
    pub(crate) default: Option<String>,
}

fn literal_text(lit: &Lit) -> Result<String> {
    Ok(match lit {
        Lit::Str(v) => v.value(),
        Lit::Int(v) => v.base10_digits().to_string(),
        Lit::Float(v) => v.base10_digits().to_string(),
        Lit::Bool(v) => v.value.to_string(),
        _ => {
            return Err(Error::new(
                lit.span(),
                "Error while parsing `default`, use it like: `#[tether(default = \"value\")]`",
            ));
        }
    })
}

fn is_option(ty: &Type) -> bool {
    let Type::Path(path) = ty else {
        return false;
    };
    path.qself.is_none()
        && path.path.segments.last().is_some_and(|segment| {
            segment.ident == "Option"
                && matches!(
                    &segment.arguments,
                    PathArguments::AngleBracketed(args)
                        if matches!(args.args.first(), Some(GenericArgument::Type(..)))
                )
        })
}

pub(crate) fn decode_column(field: &Field) -> Result<ColumnMetadata> {
    let Some(ident) = field.ident.clone() else {
        return Err(Error::new(
            field.span(),
            "Entity fields are expected to have a name",
        ));
    };
    let mut metadata = ColumnMetadata {
        ident,
        ty: field.ty.clone(),
        column: None,
        sql_type: None,
        length: None,
        not_null: false,
        unique: false,
        primary_key: false,
        auto_increment: false,
        default: None,
    };
    for attr in &field.attrs {
        if !attr.path().is_ident("tether") {
            continue;
        }
        attr.parse_nested_meta(|arg| {
            if arg.path.is_ident("column") {
                let v = arg.value().and_then(ParseBuffer::parse::<LitStr>).map_err(|e| {
                    Error::new(
                        e.span(),
                        "Error while parsing `column`, use it like: `#[tether(column = \"my_column\")]`",
                    )
                })?;
                metadata.column = Some(v.value());
            } else if arg.path.is_ident("sql_type") {
                let v = arg.value().and_then(ParseBuffer::parse::<LitStr>).map_err(|e| {
                    Error::new(
                        e.span(),
                        "Error while parsing `sql_type`, use it like: `#[tether(sql_type = \"VARCHAR\")]`",
                    )
                })?;
                metadata.sql_type = Some(v.value());
            } else if arg.path.is_ident("length") {
                let v = arg
                    .value()
                    .and_then(ParseBuffer::parse::<LitInt>)
                    .and_then(|v| v.base10_parse::<i64>())
                    .map_err(|e| {
                        Error::new(
                            e.span(),
                            "Error while parsing `length`, use it like: `#[tether(length = 32)]`",
                        )
                    })?;
                metadata.length = Some(v);
            } else if arg.path.is_ident("default") {
                let v = arg.value().and_then(ParseBuffer::parse::<Lit>)?;
                metadata.default = Some(literal_text(&v)?);
            } else {
                let flag = if arg.path.is_ident("not_null") {
                    &mut metadata.not_null
                } else if arg.path.is_ident("unique") {
                    &mut metadata.unique
                } else if arg.path.is_ident("primary_key") {
                    &mut metadata.primary_key
                } else if arg.path.is_ident("auto_increment") {
                    &mut metadata.auto_increment
                } else {
                    return Err(arg.error(format!(
                        "Unknown attribute `{}` inside tether macro",
                        arg.path
                            .get_ident()
                            .map(ToString::to_string)
                            .unwrap_or_default()
                    )));
                };
                // Flags carry no value
                if arg.input.peek(syn::Token![=]) {
                    return Err(
                        arg.error("This attribute is a flag, use it like: `#[tether(unique)]`")
                    );
                }
                *flag = true;
            }
            Ok(())
        })?;
    }
    if metadata.length.is_some_and(|v| v <= 0) {
        return Err(Error::new(
            Span::call_site(),
            format!("Column `{}` must have a positive length", metadata.ident),
        ));
    }
    // The storage assigns the key only when the entity leaves it empty
    if metadata.auto_increment && !is_option(&metadata.ty) {
        return Err(Error::new(
            metadata.ty.span(),
            format!(
                "Column `{}` is auto incremented, its type must be an `Option` like `Option<i64>`",
                metadata.ident
            ),
        ));
    }
    Ok(metadata)
}
