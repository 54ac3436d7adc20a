//! Line-level parsing of properties text.
//!
//! Wire format, one *logical line* per entry:
//! ```text
//! # comment            ! also a comment
//! key=value            key: value            key value
//! long.value=first \
//!            second    (continuation; leading blanks of the next line dropped)
//! path=C:\\data\u0020x (escapes: \t \n \r \f \uXXXX, anything else is literal)
//! ```

use thiserror::Error;

/// A properties document could not be parsed.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("line {line}: {reason}")]
pub struct PropertiesError {
    /// 1-based line on which the offending logical line starts.
    pub line: usize,
    pub reason: String,
}

/// One parsed `key=value` entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub key: String,
    pub value: String,
    /// 1-based line on which the entry starts.
    pub line: usize,
}

/// Parses `text` into entries in file order.  Duplicates are kept; the
/// caller decides which one wins.
///
/// # Errors
///
/// Returns [`PropertiesError`] when a `\uXXXX` escape is not followed by four
/// hexadecimal digits.
pub fn parse_entries(text: &str) -> Result<Vec<Entry>, PropertiesError> {
    let mut entries = Vec::new();
    let mut lines = natural_lines(text).into_iter();

    while let Some((line_no, raw)) = lines.next() {
        let trimmed = raw.trim_start_matches(is_blank);
        if trimmed.is_empty() || trimmed.starts_with(['#', '!']) {
            continue;
        }

        let mut logical = trimmed.to_string();
        while ends_with_odd_backslashes(&logical) {
            logical.pop();
            match lines.next() {
                Some((_, next)) => logical.push_str(next.trim_start_matches(is_blank)),
                None => break,
            }
        }

        let (key, value) = split_key_value(&logical);
        entries.push(Entry {
            key: unescape(key, line_no)?,
            value: unescape(value, line_no)?,
            line: line_no,
        });
    }

    Ok(entries)
}

/// Splits on `\n`, `\r\n` and lone `\r`, numbering lines from 1.
fn natural_lines(text: &str) -> Vec<(usize, &str)> {
    let mut lines = Vec::new();
    let bytes = text.as_bytes();
    let mut start = 0;
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'\n' => {
                lines.push((lines.len() + 1, &text[start..i]));
                start = i + 1;
            }
            b'\r' => {
                lines.push((lines.len() + 1, &text[start..i]));
                if bytes.get(i + 1) == Some(&b'\n') {
                    i += 1;
                }
                start = i + 1;
            }
            _ => {}
        }
        i += 1;
    }
    if start < text.len() {
        lines.push((lines.len() + 1, &text[start..]));
    }
    lines
}

fn is_blank(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\x0c')
}

fn ends_with_odd_backslashes(line: &str) -> bool {
    line.bytes().rev().take_while(|b| *b == b'\\').count() % 2 == 1
}

/// Returns the still-escaped key and value halves of a logical line.
fn split_key_value(line: &str) -> (&str, &str) {
    let mut key_end = line.len();
    let mut value_start = line.len();
    let mut has_separator = false;
    let mut escaped = false;

    for (i, c) in line.char_indices() {
        if !escaped && (c == '=' || c == ':') {
            key_end = i;
            value_start = i + 1;
            has_separator = true;
            break;
        }
        if !escaped && is_blank(c) {
            key_end = i;
            value_start = i + c.len_utf8();
            break;
        }
        escaped = c == '\\' && !escaped;
    }

    // Blanks around the separator are skipped; a blank-separated key may still
    // be followed by one `=` or `:`.
    let mut rest = &line[value_start..];
    loop {
        let mut chars = rest.chars();
        match chars.next() {
            Some(c) if is_blank(c) => rest = chars.as_str(),
            Some('=' | ':') if !has_separator => {
                has_separator = true;
                rest = chars.as_str();
            }
            _ => break,
        }
    }

    (&line[..key_end], rest)
}

fn unescape(raw: &str, line: usize) -> Result<String, PropertiesError> {
    if !raw.contains('\\') {
        return Ok(raw.to_string());
    }

    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('f') => out.push('\x0c'),
            Some('u') => {
                let unit = read_code_unit(&mut chars, line)?;
                out.push(decode_code_unit(unit, &mut chars, line)?);
            }
            Some(other) => out.push(other),
            // A lone trailing backslash has nothing to escape.
            None => {}
        }
    }

    Ok(out)
}

fn read_code_unit(chars: &mut std::str::Chars<'_>, line: usize) -> Result<u32, PropertiesError> {
    let hex: String = chars.by_ref().take(4).collect();
    if hex.len() != 4 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(PropertiesError {
            line,
            reason: "malformed \\uxxxx encoding".to_string(),
        });
    }
    u32::from_str_radix(&hex, 16).map_err(|e| PropertiesError {
        line,
        reason: format!("malformed \\uxxxx encoding: {e}"),
    })
}

/// Turns a UTF-16 code unit into a `char`, consuming a following `\uXXXX`
/// low surrogate when `unit` is a high surrogate.  Unpaired surrogates
/// become U+FFFD.
fn decode_code_unit(
    unit: u32,
    chars: &mut std::str::Chars<'_>,
    line: usize,
) -> Result<char, PropertiesError> {
    if (0xD800..=0xDBFF).contains(&unit) {
        let mut lookahead = chars.clone();
        if lookahead.next() == Some('\\') && lookahead.next() == Some('u') {
            let low = read_code_unit(&mut lookahead, line)?;
            if (0xDC00..=0xDFFF).contains(&low) {
                *chars = lookahead;
                let combined = 0x10000 + ((unit - 0xD800) << 10) + (low - 0xDC00);
                return Ok(char::from_u32(combined).unwrap_or(char::REPLACEMENT_CHARACTER));
            }
        }
    }
    Ok(char::from_u32(unit).unwrap_or(char::REPLACEMENT_CHARACTER))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
