//! Lowercase, hyphen-separated, Linux-safe slugs.

use super::MAX_SLUG_BYTES;

/// Turns a display name into a slug usable as a file name.
///
/// - Keeps letters and digits (lowercased, Unicode aware)
/// - Whitespace, `_` and `-` runs become a single `-`
/// - Drops everything else (`/`, `.`, NUL, control chars, punctuation)
/// - Trims leading/trailing `-`
/// - Limits length to [`MAX_SLUG_BYTES`] on a char boundary
///
/// May return an empty string; callers decide what that means.
pub fn slugify(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut pending_sep = false;

    for c in name.chars() {
        if c.is_alphanumeric() {
            if pending_sep && !out.is_empty() {
                out.push('-');
            }
            pending_sep = false;
            out.extend(c.to_lowercase());
        } else if c.is_whitespace() || c == '_' || c == '-' {
            pending_sep = true;
        }
    }

    if out.len() > MAX_SLUG_BYTES {
        let mut take = MAX_SLUG_BYTES;
        while take > 0 && !out.is_char_boundary(take) {
            take -= 1;
        }
        out.truncate(take);
        while out.ends_with('-') {
            out.pop();
        }
    }
    out
}
