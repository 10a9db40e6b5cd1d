//! Directive scan and replace over configuration text.
//!
//! A directive is a label line followed immediately by a value line. Matching
//! is exact string equality on the trimmed line; the first occurrence wins.
//! No pattern matching, no partial matches.

use crate::error::{AquirunError, Result};

/// Return the trimmed content of the line following the first line whose
/// trimmed content equals `label`.
///
/// Fails with [`AquirunError::DirectiveNotFound`] when no line matches, or
/// when the matching label is the last line and has no value line after it.
pub fn lookup(contents: &str, label: &str) -> Result<String> {
    let mut lines = contents.lines();
    while let Some(line) = lines.next() {
        if line.trim() == label {
            return match lines.next() {
                Some(value) => Ok(value.trim().to_string()),
                None => Err(AquirunError::DirectiveNotFound(label.to_string())),
            };
        }
    }
    Err(AquirunError::DirectiveNotFound(label.to_string()))
}

/// Replace the line following the first occurrence of `label` with `value`,
/// returning the rewritten contents.
///
/// Every other line is carried over byte-identical, line terminators
/// included, so LF and CRLF files both survive a rewrite. The replaced line
/// keeps its original terminator; a final line without one gets `\n`. Fails
/// under the same conditions as [`lookup`].
pub fn replace(contents: &str, label: &str, value: &str) -> Result<String> {
    let mut out = String::with_capacity(contents.len() + value.len());
    let mut replaced = false;
    let mut replace_next = false;

    for segment in contents.split_inclusive('\n') {
        if replace_next {
            let (_, terminator) = split_line_ending(segment);
            out.push_str(value);
            out.push_str(if terminator.is_empty() { "\n" } else { terminator });
            replace_next = false;
            replaced = true;
            continue;
        }
        let (line, _) = split_line_ending(segment);
        if !replaced && line.trim() == label {
            replace_next = true;
        }
        out.push_str(segment);
    }

    if !replaced {
        return Err(AquirunError::DirectiveNotFound(label.to_string()));
    }
    Ok(out)
}

fn split_line_ending(segment: &str) -> (&str, &str) {
    if let Some(stripped) = segment.strip_suffix("\r\n") {
        (stripped, "\r\n")
    } else if let Some(stripped) = segment.strip_suffix('\n') {
        (stripped, "\n")
    } else {
        (segment, "")
    }
}
