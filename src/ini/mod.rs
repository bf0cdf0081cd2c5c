//! INI (git-config dialect) decoder.
//!
//! # Data Flow
//! ```text
//! raw bytes
//!     → decode_utf8 (UTF-8 check)
//!     → scanner.rs (headers, names, quoted/escaped values)
//!     → Vec<Event> (section headers and key/value entries, in file order)
//!     → config::schema mapping table
//! ```
//!
//! # Design Decisions
//! - Decoder is schema-agnostic; it never decides whether a key is known
//! - Names are kept as written; callers compare case-insensitively
//! - A key without `=` has no value (`None`), distinct from an empty value
//! - Every section header is reported, including ones with no keys
//! - A leading byte-order mark is skipped

pub mod error;
pub mod scanner;

pub use error::{DecodeError, DecodeErrorKind};
pub use scanner::SectionHeader;

use scanner::{scan_section_header, scan_value, scan_variable_name};

/// One `key = value` assignment, resolved to the section it appeared in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub section: String,
    pub subsection: Option<String>,
    pub name: String,
    /// `None` when the line has no `=`.
    pub value: Option<String>,
    /// 1-based line the assignment started on.
    pub line: usize,
}

/// A decoded item, in the order it appears in the file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Section(SectionHeader),
    Entry(Entry),
}

/// Check that `bytes` is UTF-8, reporting the line of the first bad byte.
pub fn decode_utf8(bytes: &[u8]) -> Result<&str, DecodeError> {
    std::str::from_utf8(bytes).map_err(|e| {
        let valid = &bytes[..e.valid_up_to()];
        let line = valid.iter().filter(|&&b| b == b'\n').count() + 1;
        DecodeError::new(line, DecodeErrorKind::InvalidUtf8)
    })
}

/// Decode configuration text into section headers and entries, in file order.
pub fn parse_str(text: &str) -> Result<Vec<Event>, DecodeError> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut events = Vec::new();
    let mut section: Option<SectionHeader> = None;
    let mut lines = text.lines().enumerate().map(|(i, l)| (i + 1, l));

    while let Some((line_no, raw)) = lines.next() {
        let line = raw.trim_start();
        match line.chars().next() {
            None | Some(';') | Some('#') => continue,
            Some('[') => {
                let header = scan_section_header(line, line_no)?;
                events.push(Event::Section(header.clone()));
                section = Some(header);
            }
            Some(_) => {
                let current = section.as_ref().ok_or_else(|| {
                    DecodeError::new(line_no, DecodeErrorKind::VariableOutsideSection)
                })?;
                let (name, rest) = scan_variable_name(line, line_no)?;
                let rest = rest.trim_start();

                let value = if let Some(after_eq) = rest.strip_prefix('=') {
                    Some(scan_value(after_eq, line_no, &mut lines)?)
                } else if scanner::is_blank_or_comment(rest) {
                    None
                } else {
                    return Err(DecodeError::new(
                        line_no,
                        DecodeErrorKind::InvalidVariableName,
                    ));
                };

                events.push(Event::Entry(Entry {
                    section: current.name.clone(),
                    subsection: current.subsection.clone(),
                    name: name.to_string(),
                    value,
                    line: line_no,
                }));
            }
        }
    }

    Ok(events)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries(text: &str) -> Vec<Entry> {
        parse_str(text)
            .unwrap()
            .into_iter()
            .filter_map(|event| match event {
                Event::Entry(entry) => Some(entry),
                Event::Section(_) => None,
            })
            .collect()
    }

    #[test]
    fn test_parse_global_section() {
        let text = "
; vSphere connection
[Global]
user = administrator@vsphere.local
hostname=vc.example.com   # primary
insecure-flag
";
        let entries = entries(text);
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].section, "Global");
        assert_eq!(entries[0].name, "user");
        assert_eq!(entries[0].value.as_deref(), Some("administrator@vsphere.local"));
        assert_eq!(entries[0].line, 4);
        assert_eq!(entries[1].value.as_deref(), Some("vc.example.com"));
        assert_eq!(entries[2].name, "insecure-flag");
        assert_eq!(entries[2].value, None);
    }

    #[test]
    fn test_empty_section_is_reported() {
        let events = parse_str("[Labels]\n\n[Global]\nuser = a\n").unwrap();
        assert_eq!(events.len(), 3);
        assert_eq!(
            events[0],
            Event::Section(SectionHeader {
                name: "Labels".into(),
                subsection: None,
                line: 1,
            })
        );
        assert!(matches!(&events[1], Event::Section(h) if h.name == "Global" && h.line == 3));
        assert!(matches!(&events[2], Event::Entry(e) if e.name == "user"));
    }

    #[test]
    fn test_leading_byte_order_mark_skipped() {
        let entries = entries("\u{feff}[Global]\nuser = admin\n");
        assert_eq!(entries[0].section, "Global");
        assert_eq!(entries[0].value.as_deref(), Some("admin"));
    }

    #[test]
    fn test_byte_order_mark_only_at_start() {
        let err = parse_str("[Global]\n\u{feff}user = admin\n").unwrap_err();
        assert_eq!(err, DecodeError::new(2, DecodeErrorKind::InvalidVariableName));
    }

    #[test]
    fn test_invalid_utf8_reports_line() {
        assert_eq!(decode_utf8(b"[Global]\nuser = x\n").unwrap(), "[Global]\nuser = x\n");

        let err = decode_utf8(b"[Global]\nuser = caf\xe9\n").unwrap_err();
        assert_eq!(err, DecodeError::new(2, DecodeErrorKind::InvalidUtf8));
    }

    #[test]
    fn test_empty_value_is_some() {
        let entries = entries("[Global]\nport =\n");
        assert_eq!(entries[0].value.as_deref(), Some(""));
    }

    #[test]
    fn test_variable_before_section() {
        let err = parse_str("user=admin\n[Global]\n").unwrap_err();
        assert_eq!(err, DecodeError::new(1, DecodeErrorKind::VariableOutsideSection));
    }

    #[test]
    fn test_garbage_after_name() {
        let err = parse_str("[Global]\nuser admin\n").unwrap_err();
        assert_eq!(err.kind, DecodeErrorKind::InvalidVariableName);
        assert_eq!(err.line, 2);
    }

    #[test]
    fn test_unterminated_quote_reports_line() {
        let err = parse_str("\n[Global]\npassword=\"&)<;^}.\n").unwrap_err();
        assert_eq!(err, DecodeError::new(3, DecodeErrorKind::UnterminatedQuote));
        assert_eq!(err.to_string(), "line 3: unterminated quoted string");
    }

    #[test]
    fn test_continuation_spans_lines() {
        let text = "[Global]\ndatacenters = dc1,\\\ndc2\nuser = u\n";
        let entries = entries(text);
        assert_eq!(entries[0].value.as_deref(), Some("dc1,dc2"));
        assert_eq!(entries[1].name, "user");
        assert_eq!(entries[1].line, 4);
    }

    #[test]
    fn test_subsection_carried_on_entries() {
        let text = "[VirtualCenter \"vc1\"]\nport = 443\n";
        let entries = entries(text);
        assert_eq!(entries[0].section, "VirtualCenter");
        assert_eq!(entries[0].subsection.as_deref(), Some("vc1"));
    }

    #[test]
    fn test_crlf_line_endings() {
        let entries = entries("[Global]\r\nuser = admin\r\n");
        assert_eq!(entries[0].value.as_deref(), Some("admin"));
    }
}
