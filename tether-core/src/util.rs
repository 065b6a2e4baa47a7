/// Writes `values` into `out` through `f`, putting `separator` between the items that produced output.
pub fn separated_by<T, F>(
    out: &mut String,
    values: impl IntoIterator<Item = T>,
    mut f: F,
    separator: &str,
) where
    F: FnMut(&mut String, T),
{
    let mut len = out.len();
    for v in values {
        if out.len() > len {
            out.push_str(separator);
        }
        len = out.len();
        f(out, v);
    }
}

/// Copies `value` into `out` replacing every `search` char with `replace`.
pub fn write_escaped(out: &mut String, value: &str, search: char, replace: &str) {
    let mut position = 0;
    for (i, c) in value.char_indices() {
        if c == search {
            out.push_str(&value[position..i]);
            out.push_str(replace);
            position = i + c.len_utf8();
        }
    }
    out.push_str(&value[position..]);
}

/// Quote identifiers (`name`) doubling inner back-ticks.
pub fn write_identifier_quoted(out: &mut String, value: &str) {
    out.push('`');
    write_escaped(out, value, '`', "``");
    out.push('`');
}

/// Keeps only the ASCII word characters (`[A-Za-z0-9_]`) of an identifier.
pub fn sanitize_identifier(value: &str) -> String {
    value
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .collect()
}

/// Shortens a query for log and error messages, never splitting a character.
#[macro_export]
macro_rules! truncate_long {
    ($query:expr) => {{
        let query: &str = &$query;
        let mut end = ::std::cmp::min(query.len(), 497);
        while !query.is_char_boundary(end) {
            end -= 1;
        }
        format!(
            "{}{}",
            query[..end].trim_end(),
            if query.len() > end { "..." } else { "" },
        )
    }};
}
