//! ERB tag scanning and helper call parsing.
//!
//! Only a small slice of Ruby call syntax is understood: a helper name,
//! optional parentheses, and comma separated arguments that are string
//! literals, symbols, bare values, `key: value` labels or `key => value`
//! pairs.

use super::{Attributes, Directive, IMAGE_TAG, PARTIAL};

const OPEN: &str = "<%=";
const CLOSE: &str = "%>";

/// An ERB output tag located in a line.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct Tag<'a> {
    /// Byte offset of `<%=`.
    pub(crate) start: usize,
    /// Byte offset just past `%>`.
    pub(crate) end: usize,
    /// Code between the delimiters, trimmed.
    pub(crate) code: &'a str,
}

/// Result of parsing the code of a tag.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum ParsedTag {
    Directive(Directive),
    /// Not a supported helper; carries a short description for warnings.
    Unsupported(String),
}

#[derive(Debug, PartialEq, Eq)]
pub(crate) enum TagError {
    Syntax(String),
    MissingArgument {
        directive: &'static str,
        argument: &'static str,
    },
}

#[derive(Debug, PartialEq, Eq)]
enum Argument {
    Positional(String),
    Pair(String, String),
}

/// Find the next `<%= ... %>` tag starting at byte offset `from`.
///
/// Returns `None` when no complete tag remains on the line.
pub(crate) fn find_tag(line: &str, from: usize) -> Option<Tag<'_>> {
    let open = from + line[from..].find(OPEN)?;
    let code_start = open + OPEN.len();
    let close = code_start + line[code_start..].find(CLOSE)?;

    // An unterminated `<%=` before this tag is plain text
    let (start, code_start) = match line[code_start..close].rfind(OPEN) {
        Some(inner) => (
            code_start + inner,
            code_start + inner + OPEN.len(),
        ),
        None => (open, code_start),
    };

    let code = line[code_start..close].trim();
    // `-%>` trims the following newline in ERB; here it is just noise
    let code = code.strip_suffix('-').map_or(code, str::trim_end);

    Some(Tag {
        start,
        end: close + CLOSE.len(),
        code,
    })
}

/// Parse the code of a tag into a directive.
pub(crate) fn parse_tag(code: &str) -> Result<ParsedTag, TagError> {
    let name_len = code
        .find(|c: char| !is_ident_char(c))
        .unwrap_or(code.len());
    let (helper, rest) = code.split_at(name_len);

    if helper != PARTIAL && helper != IMAGE_TAG {
        let description = if helper.is_empty() { code } else { helper };
        return Ok(ParsedTag::Unsupported(description.to_owned()));
    }

    let Some(source) = call_arguments(rest)? else {
        return Ok(ParsedTag::Unsupported(code.to_owned()));
    };
    let args = parse_arguments(source)?;

    let directive = if helper == PARTIAL {
        partial(args)?
    } else {
        image_tag(args)?
    };
    Ok(ParsedTag::Directive(directive))
}

fn partial(args: Vec<Argument>) -> Result<Directive, TagError> {
    match args.into_iter().next() {
        Some(Argument::Positional(name)) if !name.trim().is_empty() => Ok(Directive::Partial {
            name: name.trim().to_owned(),
        }),
        _ => Err(TagError::MissingArgument {
            directive: PARTIAL,
            argument: "name",
        }),
    }
}

fn image_tag(args: Vec<Argument>) -> Result<Directive, TagError> {
    let mut args = args.into_iter();

    let path = match args.next() {
        Some(Argument::Positional(path)) if !path.trim().is_empty() => path.trim().to_owned(),
        _ => {
            return Err(TagError::MissingArgument {
                directive: IMAGE_TAG,
                argument: "path",
            });
        }
    };

    let mut attributes = Attributes::new();
    for arg in args {
        match arg {
            Argument::Pair(key, value) => attributes.insert(key, value),
            Argument::Positional(value) => {
                return Err(syntax(format!(
                    "unexpected argument {value:?} to `{IMAGE_TAG}`"
                )));
            }
        }
    }

    Ok(Directive::ImageTag { path, attributes })
}

/// Extract the argument list following the helper name.
///
/// Returns `Ok(None)` when the name is followed by something other than
/// whitespace or `(`, i.e. the tag is not a plain helper call.
fn call_arguments(rest: &str) -> Result<Option<&str>, TagError> {
    if rest.is_empty() {
        return Ok(Some(""));
    }

    let trimmed = rest.trim_start();
    let spaced = trimmed.len() < rest.len();

    if trimmed.starts_with('(') {
        return trimmed
            .strip_prefix('(')
            .and_then(|inner| inner.strip_suffix(')'))
            .map(Some)
            .ok_or_else(|| syntax("unbalanced parentheses".to_owned()));
    }

    Ok(spaced.then_some(trimmed))
}

fn parse_arguments(source: &str) -> Result<Vec<Argument>, TagError> {
    if source.trim().is_empty() {
        return Ok(Vec::new());
    }

    split_top_level(source)?
        .into_iter()
        .map(|piece| parse_argument(piece.trim()))
        .collect()
}

fn parse_argument(piece: &str) -> Result<Argument, TagError> {
    if let Some(idx) = find_unquoted(piece, "=>") {
        let key = parse_key(piece[..idx].trim())?;
        let value = parse_value(piece[idx + 2..].trim())?;
        return Ok(Argument::Pair(key, value));
    }

    if let Some((key, value)) = split_label(piece) {
        return Ok(Argument::Pair(key.to_owned(), parse_value(value.trim())?));
    }

    Ok(Argument::Positional(parse_value(piece)?))
}

/// Split on commas that are outside string literals and brackets.
fn split_top_level(source: &str) -> Result<Vec<&str>, TagError> {
    let mut pieces = Vec::new();
    let mut depth = 0usize;
    let mut quote = None;
    let mut escaped = false;
    let mut start = 0;

    for (i, c) in source.char_indices() {
        if let Some(q) = quote {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == q {
                quote = None;
            }
            continue;
        }

        match c {
            '\'' | '"' => quote = Some(c),
            '(' | '[' | '{' => depth += 1,
            ')' | ']' | '}' => {
                depth = depth
                    .checked_sub(1)
                    .ok_or_else(|| syntax("unbalanced brackets".to_owned()))?;
            }
            ',' if depth == 0 => {
                pieces.push(&source[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }

    if quote.is_some() {
        return Err(syntax("unterminated string literal".to_owned()));
    }
    if depth != 0 {
        return Err(syntax("unbalanced brackets".to_owned()));
    }

    pieces.push(&source[start..]);
    Ok(pieces)
}

/// Byte offset of `pattern` outside string literals.
fn find_unquoted(s: &str, pattern: &str) -> Option<usize> {
    let mut quote = None;
    let mut escaped = false;

    for (i, c) in s.char_indices() {
        if let Some(q) = quote {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == q {
                quote = None;
            }
            continue;
        }
        if c == '\'' || c == '"' {
            quote = Some(c);
        } else if s[i..].starts_with(pattern) {
            return Some(i);
        }
    }
    None
}

/// Split `key: value` into its label and the value source.
fn split_label(piece: &str) -> Option<(&str, &str)> {
    let len = ident_len(piece)?;
    let rest = piece[len..].strip_prefix(':')?;
    if rest.starts_with(':') {
        return None;
    }
    Some((&piece[..len], rest))
}

fn parse_key(s: &str) -> Result<String, TagError> {
    if s.starts_with(['\'', '"']) {
        return string_literal(s);
    }
    let name = s.strip_prefix(':').unwrap_or(s);
    if ident_len(name) == Some(name.len()) {
        Ok(name.to_owned())
    } else {
        Err(syntax(format!("invalid attribute name {s:?}")))
    }
}

fn parse_value(s: &str) -> Result<String, TagError> {
    if s.is_empty() {
        return Err(syntax("empty argument".to_owned()));
    }
    if s.starts_with(['\'', '"']) {
        return string_literal(s);
    }
    if let Some(symbol) = s.strip_prefix(':')
        && ident_len(symbol) == Some(symbol.len())
    {
        return Ok(symbol.to_owned());
    }
    // Numbers, booleans and anything else are kept as written
    Ok(s.to_owned())
}

/// Parse a quoted literal that spans the whole of `s`.
fn string_literal(s: &str) -> Result<String, TagError> {
    let mut chars = s.char_indices();
    let Some((_, quote)) = chars.next() else {
        return Err(syntax("empty argument".to_owned()));
    };

    let mut value = String::new();
    let mut escaped = false;

    for (i, c) in chars {
        if escaped {
            if c != quote && c != '\\' {
                value.push('\\');
            }
            value.push(c);
            escaped = false;
            continue;
        }
        if c == '\\' {
            escaped = true;
        } else if c == quote {
            let trailing = &s[i + c.len_utf8()..];
            if trailing.trim().is_empty() {
                return Ok(value);
            }
            return Err(syntax(format!(
                "unexpected {:?} after string literal",
                trailing.trim()
            )));
        } else {
            value.push(c);
        }
    }

    Err(syntax("unterminated string literal".to_owned()))
}

/// Length of the identifier at the start of `s`, if any.
fn ident_len(s: &str) -> Option<usize> {
    let first = s.chars().next()?;
    if !(first.is_alphabetic() || first == '_') {
        return None;
    }
    Some(s.find(|c: char| !is_ident_char(c)).unwrap_or(s.len()))
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn syntax(message: String) -> TagError {
    TagError::Syntax(message)
}
