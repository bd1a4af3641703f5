//! HTML fragments produced by directives.

use crate::Attributes;

/// Escape text for a double-quoted HTML attribute value.
///
/// Only `&`, `<` and `"` are replaced; everything else is copied as is.
pub fn escape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '"' => result.push_str("&quot;"),
            _ => result.push(c),
        }
    }
    result
}

/// Render an `<img>` element.
///
/// `src` comes first, followed by the attributes in order. A `src`
/// attribute in `attributes` is ignored in favor of `src`.
pub fn image_tag(src: &str, attributes: &Attributes) -> String {
    let mut html = format!("<img src=\"{}\"", escape_html(src));
    for (key, value) in attributes.iter().filter(|(key, _)| *key != "src") {
        html.push(' ');
        html.push_str(key);
        html.push_str("=\"");
        html.push_str(&escape_html(value));
        html.push('"');
    }
    html.push('>');
    html
}
