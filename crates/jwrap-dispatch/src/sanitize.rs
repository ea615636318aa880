//! Markup stripping for request parameters.

use std::borrow::Cow;

use serde_json::Value;

/// Removes HTML/XML tags, comments and NUL bytes from `input`.
///
/// A `<` followed by whitespace or the end of input is kept as text.
/// An unterminated tag swallows the rest of the input.
pub fn strip_tags(input: &str) -> Cow<'_, str> {
    if !input.contains(['<', '\0']) {
        return Cow::Borrowed(input);
    }

    let mut out = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(c) = rest.chars().next() {
        match c {
            '\0' => rest = &rest[1..],
            '<' => {
                let after = &rest[1..];
                match after.chars().next() {
                    None => {
                        out.push('<');
                        rest = after;
                    }
                    Some(n) if n.is_whitespace() => {
                        out.push('<');
                        rest = after;
                    }
                    Some(_) if after.starts_with("!--") => {
                        rest = match after[3..].find("-->") {
                            Some(end) => &after[3 + end + 3..],
                            None => "",
                        };
                    }
                    Some(_) => rest = skip_tag(after),
                }
            }
            _ => {
                out.push(c);
                rest = &rest[c.len_utf8()..];
            }
        }
    }
    Cow::Owned(out)
}

/// Skips to just past the `>` closing a tag, honouring quoted attributes.
fn skip_tag(input: &str) -> &str {
    let mut quote: Option<char> = None;
    for (i, c) in input.char_indices() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"' | '\'') => quote = Some(c),
            (None, '>') => return &input[i + 1..],
            (None, _) => {}
        }
    }
    ""
}

/// Strips markup from every string inside `value`.
pub fn sanitize_value(value: Value) -> Value {
    match value {
        Value::String(s) => match strip_tags(&s) {
            Cow::Borrowed(_) => Value::String(s),
            Cow::Owned(clean) => Value::String(clean),
        },
        Value::Array(items) => Value::Array(items.into_iter().map(sanitize_value).collect()),
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(k, v)| (k, sanitize_value(v)))
                .collect(),
        ),
        other => other,
    }
}
