//! Directive scanner.
//!
//! Recognizes the two directive forms that may appear in view text:
//!
//! ```text
//! ## include('layout.header') ##
//! ## @name ##   ## @name|default ##   ## e@name ##   ## e@name|default ##
//! ```
//!
//! Both scanners walk the text left to right and return non-overlapping
//! matches in order of appearance. A `##` that does not start a well-formed
//! directive is skipped one byte at a time, so a malformed marker never hides
//! a directive that starts inside it.
//!
//! All delimiters are ASCII, so slicing at the offsets found here always lands
//! on UTF-8 character boundaries.

const MARKER: &str = "##";
const INCLUDE_OPEN: &[u8] = b"include('";
const INCLUDE_CLOSE: &[u8] = b"')";

/// An `## include('...') ##` occurrence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IncludeDirective<'a> {
    /// The full matched directive text
    pub raw: &'a str,
    /// Dotted identifier of the partial
    pub target: &'a str,
}

/// An `## [e]@name[|default] ##` occurrence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VariableDirective<'a> {
    /// The full matched directive text
    pub raw: &'a str,
    /// Variable name, surrounding whitespace trimmed
    pub name: &'a str,
    /// Default value, surrounding whitespace trimmed; empty when absent
    pub default: &'a str,
    /// Whether the value must be HTML-escaped
    pub escaped: bool,
}

/// Find all inclusion directives in `text`
pub fn include_directives(text: &str) -> Vec<IncludeDirective<'_>> {
    scan(text, |bytes, start| {
        parse_include(bytes, start).map(|(end, target)| {
            let directive = IncludeDirective {
                raw: &text[start..end],
                target: &text[target.0..target.1],
            };
            (directive, end)
        })
    })
}

/// Find all variable directives in `text`
pub fn variable_directives(text: &str) -> Vec<VariableDirective<'_>> {
    scan(text, |bytes, start| {
        parse_variable(bytes, start).map(|parts| {
            let directive = VariableDirective {
                raw: &text[start..parts.end],
                name: trim_space(&text[parts.name.0..parts.name.1]),
                default: parts
                    .default
                    .map(|(from, to)| trim_space(&text[from..to]))
                    .unwrap_or(""),
                escaped: parts.escaped,
            };
            (directive, parts.end)
        })
    })
}

/// Drive `parse` over every `##` in `text`; `parse` returns the directive and
/// the offset just past it.
fn scan<'a, T, F>(text: &'a str, mut parse: F) -> Vec<T>
where
    F: FnMut(&'a [u8], usize) -> Option<(T, usize)>,
{
    let bytes = text.as_bytes();
    let mut found = Vec::new();
    let mut pos = 0;

    while let Some(offset) = text[pos..].find(MARKER) {
        let start = pos + offset;
        match parse(bytes, start) {
            Some((directive, end)) => {
                found.push(directive);
                pos = end;
            }
            None => pos = start + 1,
        }
    }

    found
}

/// `## include('target') ##`, with optional whitespace around `include(...)`
fn parse_include(bytes: &[u8], start: usize) -> Option<(usize, (usize, usize))> {
    let mut i = skip_space(bytes, start + MARKER.len());
    i = expect(bytes, i, INCLUDE_OPEN)?;

    let target_start = i;
    while i < bytes.len() && bytes[i] != b'\'' && !is_space(bytes[i]) {
        i += 1;
    }
    if i == target_start {
        return None;
    }
    let target_end = i;

    i = expect(bytes, i, INCLUDE_CLOSE)?;
    i = skip_space(bytes, i);
    i = expect(bytes, i, MARKER.as_bytes())?;

    Some((i, (target_start, target_end)))
}

struct VariableParts {
    end: usize,
    name: (usize, usize),
    default: Option<(usize, usize)>,
    escaped: bool,
}

/// `##` WS `[e]@` name `[|default]` `##`
fn parse_variable(bytes: &[u8], start: usize) -> Option<VariableParts> {
    let mut i = start + MARKER.len();

    if !bytes.get(i).copied().is_some_and(is_space) {
        return None;
    }
    i += 1;

    let escaped = bytes.get(i) == Some(&b'e');
    if escaped {
        i += 1;
    }
    i = expect(bytes, i, b"@")?;

    let name_start = i;
    while i < bytes.len() && (is_word(bytes[i]) || is_space(bytes[i])) {
        i += 1;
    }
    if i == name_start {
        return None;
    }
    let name = (name_start, i);

    let mut default = None;
    if bytes.get(i) == Some(&b'|') {
        i += 1;
        let default_start = i;
        loop {
            match bytes.get(i) {
                None | Some(b'|') => return None,
                Some(b'#') if bytes.get(i + 1) == Some(&b'#') => break,
                Some(_) => i += 1,
            }
        }
        default = Some((default_start, i));
    }

    let end = expect(bytes, i, MARKER.as_bytes())?;

    Some(VariableParts {
        end,
        name,
        default,
        escaped,
    })
}

fn expect(bytes: &[u8], at: usize, literal: &[u8]) -> Option<usize> {
    bytes
        .get(at..)
        .filter(|rest| rest.starts_with(literal))
        .map(|_| at + literal.len())
}

fn skip_space(bytes: &[u8], mut at: usize) -> usize {
    while at < bytes.len() && is_space(bytes[at]) {
        at += 1;
    }
    at
}

fn is_space(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r' | 0x0b | 0x0c)
}

fn is_word(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

fn trim_space(s: &str) -> &str {
    s.trim_matches(|c: char| c.is_ascii() && is_space(c as u8))
}
