//! The `TAG:VALUE` token grammar shared by every SAM header line.
//!
//! A header line is a three-character record prefix (`@SQ`, `@RG`, ...) followed by
//! TAB-delimited tokens, each a two-letter tag, a `:` separator, and a value. Parsing is
//! positional: the tag is the first two characters and the value starts at the fourth. The
//! separator itself is not checked.

use crate::errors::{HeaderError, Result};

/// Length of a record prefix plus its trailing TAB, e.g. `"@SQ\t"`.
pub const PREFIX_LEN: usize = 4;

/// Splits `line` on `delimiter` with no trimming; empty fields are preserved.
///
/// # Examples
///
/// ```
/// use pbheader_lib::tokens::split;
///
/// assert_eq!(split("a\tb\t\tc", '\t'), vec!["a", "b", "", "c"]);
/// ```
#[must_use]
pub fn split(line: &str, delimiter: char) -> Vec<&str> {
    line.split(delimiter).collect()
}

/// Renders one header field as `"\t" + tag + ":" + value`.
///
/// Empty values render to an empty string so that unset optional fields are omitted.
///
/// # Examples
///
/// ```
/// use pbheader_lib::tokens::make_tag;
///
/// assert_eq!(make_tag("SN", "chr1"), "\tSN:chr1");
/// assert_eq!(make_tag("AS", ""), "");
/// ```
#[must_use]
pub fn make_tag(tag: &str, value: &str) -> String {
    let mut out = String::new();
    push_tag(&mut out, tag, value);
    out
}

/// Appends `"\t" + tag + ":" + value` to `out`, or nothing if `value` is empty.
pub fn push_tag(out: &mut String, tag: &str, value: &str) {
    if value.is_empty() {
        return;
    }
    out.reserve(tag.len() + value.len() + 2);
    out.push('\t');
    out.push_str(tag);
    out.push(':');
    out.push_str(value);
}

/// Splits a single token into its tag and value.
///
/// # Arguments
///
/// * `line` - The full header line, carried into the error for context
/// * `token` - One `TAG:VALUE` token from that line
///
/// # Returns
///
/// The two-character tag and the (possibly empty) value after the colon.
///
/// # Errors
///
/// Returns [`HeaderError::MalformedToken`] if the token is shorter than three characters or
/// its tag is not two ASCII characters.
pub fn split_token<'a>(line: &str, token: &'a str) -> Result<(&'a str, &'a str)> {
    if token.len() < 3 || !token.as_bytes()[..2].is_ascii() || !token.is_char_boundary(3) {
        return Err(HeaderError::MalformedToken {
            line: line.to_string(),
            token: token.to_string(),
        });
    }
    Ok((&token[..2], &token[3..]))
}

/// Returns the tokens of a header line after its `@XX\t` prefix.
///
/// Returns `None` if the line is too short to carry any token.
#[must_use]
pub fn body_tokens(line: &str) -> Option<Vec<&str>> {
    let body = line.get(PREFIX_LEN..).filter(|body| !body.is_empty())?;
    Some(split(body, '\t'))
}

/// Parses every token of a header line into `(tag, value)` pairs.
///
/// # Arguments
///
/// * `line` - A full header line including its `@XX` prefix
///
/// # Returns
///
/// The `(tag, value)` pairs in line order. Empty tokens (e.g. from a trailing TAB) are skipped,
/// and lines too short to carry a token give an empty list.
///
/// # Errors
///
/// Returns [`HeaderError::MalformedToken`] on the first token that cannot be split.
pub fn parse_fields(line: &str) -> Result<Vec<(&str, &str)>> {
    match body_tokens(line) {
        Some(tokens) => tokens
            .into_iter()
            .filter(|token| !token.is_empty())
            .map(|token| split_token(line, token))
            .collect(),
        None => Ok(Vec::new()),
    }
}
