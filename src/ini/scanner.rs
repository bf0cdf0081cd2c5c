//! Line-level scanning: section headers, variable names and values.
//!
//! # Value grammar
//! - Unquoted leading/trailing whitespace is dropped, inner whitespace kept
//! - `"` toggles a quoted segment; quotes themselves are not part of the value
//! - `\\`, `\"`, `\n`, `\t`, `\b` are the only escapes
//! - `\` at end of line continues the value on the next line (outside quotes)
//! - `;` and `#` outside quotes start a comment
//! - End of line inside a quoted segment is an error

use crate::ini::error::{DecodeError, DecodeErrorKind};

/// A parsed `[name]` or `[name "subsection"]` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionHeader {
    pub name: String,
    pub subsection: Option<String>,
    /// 1-based line of the header.
    pub line: usize,
}

/// Scan a section header. `line` must start with `[`.
pub fn scan_section_header(line: &str, line_no: usize) -> Result<SectionHeader, DecodeError> {
    let invalid = || DecodeError::new(line_no, DecodeErrorKind::InvalidSectionHeader);

    let body = line.strip_prefix('[').ok_or_else(invalid)?.trim_start();
    let name_len = body
        .find(|c: char| !is_section_char(c))
        .unwrap_or(body.len());
    if name_len == 0 {
        return Err(invalid());
    }
    let name = body[..name_len].to_string();

    let mut rest = &body[name_len..];
    let subsection = match rest.trim_start().strip_prefix('"') {
        // Subsection must be separated from the name by whitespace.
        Some(quoted) if rest.starts_with(char::is_whitespace) => {
            let (sub, after) = scan_subsection(quoted).ok_or_else(invalid)?;
            rest = after;
            Some(sub)
        }
        Some(_) => return Err(invalid()),
        None => None,
    };

    let rest = rest
        .trim_start()
        .strip_prefix(']')
        .ok_or_else(invalid)?
        .trim_start();
    if !is_blank_or_comment(rest) {
        return Err(invalid());
    }

    Ok(SectionHeader {
        name,
        subsection,
        line: line_no,
    })
}

/// Scan the quoted subsection body, returning it unescaped along with the
/// text following the closing quote.
fn scan_subsection(s: &str) -> Option<(String, &str)> {
    let mut out = String::new();
    let mut chars = s.char_indices();
    while let Some((i, c)) = chars.next() {
        match c {
            '"' => return Some((out, &s[i + 1..])),
            '\\' => match chars.next() {
                Some((_, e @ ('"' | '\\'))) => out.push(e),
                _ => return None,
            },
            c => out.push(c),
        }
    }
    None
}

/// Split a variable line into its name and the remainder after the name.
pub fn scan_variable_name(line: &str, line_no: usize) -> Result<(&str, &str), DecodeError> {
    let mut chars = line.char_indices();
    match chars.next() {
        Some((_, c)) if c.is_ascii_alphabetic() => {}
        _ => {
            return Err(DecodeError::new(
                line_no,
                DecodeErrorKind::InvalidVariableName,
            ))
        }
    }
    let end = chars
        .find(|&(_, c)| !(c.is_ascii_alphanumeric() || c == '-'))
        .map(|(i, _)| i)
        .unwrap_or(line.len());
    Ok(line.split_at(end))
}

/// Scan a value starting at `first` (the text after `=`).
///
/// Continuation lines are pulled from `lines`, which yields `(line_no, text)`.
pub fn scan_value<'a, I>(first: &'a str, line_no: usize, lines: &mut I) -> Result<String, DecodeError>
where
    I: Iterator<Item = (usize, &'a str)>,
{
    let mut out = String::new();
    // Unquoted whitespace is held back until something follows it, which
    // trims it from the end of the value.
    let mut pending = String::new();
    let mut started = false;
    let mut in_quote = false;
    let mut current_line = line_no;
    let mut chunk = first;

    loop {
        let mut continued = false;
        let mut chars = chunk.chars();

        while let Some(c) = chars.next() {
            match c {
                '\\' => match chars.next() {
                    None if !in_quote => {
                        continued = true;
                        break;
                    }
                    None => {
                        return Err(DecodeError::new(
                            current_line,
                            DecodeErrorKind::UnterminatedQuote,
                        ))
                    }
                    Some(e) => {
                        let unescaped = unescape(e).ok_or_else(|| {
                            DecodeError::new(current_line, DecodeErrorKind::InvalidEscape(e))
                        })?;
                        out.push_str(&pending);
                        pending.clear();
                        out.push(unescaped);
                        started = true;
                    }
                },
                '"' => {
                    in_quote = !in_quote;
                    out.push_str(&pending);
                    pending.clear();
                    started = true;
                }
                ';' | '#' if !in_quote => break,
                c if c.is_whitespace() && !in_quote => {
                    if started {
                        pending.push(c);
                    }
                }
                c => {
                    out.push_str(&pending);
                    pending.clear();
                    out.push(c);
                    started = true;
                }
            }
        }

        if in_quote {
            return Err(DecodeError::new(
                current_line,
                DecodeErrorKind::UnterminatedQuote,
            ));
        }
        if !continued {
            return Ok(out);
        }

        match lines.next() {
            Some((next_no, next)) => {
                current_line = next_no;
                chunk = next;
            }
            None => {
                return Err(DecodeError::new(
                    current_line,
                    DecodeErrorKind::TrailingBackslash,
                ))
            }
        }
    }
}

fn unescape(c: char) -> Option<char> {
    match c {
        '\\' => Some('\\'),
        '"' => Some('"'),
        'n' => Some('\n'),
        't' => Some('\t'),
        'b' => Some('\u{8}'),
        _ => None,
    }
}

fn is_section_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '.'
}

/// True for an empty remainder or one that is only a comment.
pub fn is_blank_or_comment(s: &str) -> bool {
    matches!(s.trim_start().chars().next(), None | Some(';') | Some('#'))
}
