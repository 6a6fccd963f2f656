//! Line-ending canonicalization applied to payloads before hashing.
//!
//! The platform signs the request body after collapsing every run of `\r`
//! and `\n` characters into a single `\r\n`. Depending on the transport and
//! the operating system in between, the body may reach us with LF, CRLF, or
//! mixed line endings, so the verifier has to apply the same transformation
//! before computing its own digest.

use std::borrow::Cow;

const CRLF: &str = "\r\n";

fn is_line_break(c: char) -> bool {
    c == '\r' || c == '\n'
}

/// Replace every maximal run of `\r`/`\n` characters with a single `\r\n`.
///
/// Text without any line break is returned borrowed. Note that blank lines
/// collapse too: `"a\n\nb"` becomes `"a\r\nb"`.
pub fn normalize_line_breaks(text: &str) -> Cow<'_, str> {
    if !text.contains(is_line_break) {
        return Cow::Borrowed(text);
    }

    let mut normalized = String::with_capacity(text.len() + text.len() / 16);
    let mut in_run = false;

    for c in text.chars() {
        if is_line_break(c) {
            if !in_run {
                normalized.push_str(CRLF);
                in_run = true;
            }
        } else {
            normalized.push(c);
            in_run = false;
        }
    }

    Cow::Owned(normalized)
}
