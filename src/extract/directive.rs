//! `require '<ref>'` directive scanning.
//!
//! Matching is purely textual: the directive may sit anywhere in a line,
//! wrapped in arbitrary punctuation, and the reference may even span lines as
//! long as it contains no single quote.

use std::io::{self, BufRead};
use std::sync::OnceLock;

use regex::Regex;

/// The directive pattern. Group 1 is the reference.
pub const DIRECTIVE_PATTERN: &str = r"require '([^']*)'";

/// Literal prefix every directive starts with.
const KEYWORD: &str = "require '";

fn directive_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(DIRECTIVE_PATTERN).expect("directive pattern is valid"))
}

/// Returns every reference declared in `content`, in order of position.
///
/// # Example
///
/// ```
/// use filemerge::extract::scan_str;
///
/// let refs = scan_str("*require 'Folder2/File2-1.txt'*\nbody");
/// assert_eq!(refs, vec!["Folder2/File2-1.txt"]);
/// ```
pub fn scan_str(content: &str) -> Vec<String> {
    directive_regex()
        .captures_iter(content)
        .map(|caps| caps[1].to_string())
        .collect()
}

/// Returns every reference declared in the text produced by `reader`.
///
/// Reads one line at a time and keeps only the unmatched tail that could
/// still begin a directive, so memory stays bounded by the longest
/// unterminated reference rather than the file size. Produces exactly what
/// [`scan_str`] would on the full text.
pub fn scan_reader<R: BufRead>(mut reader: R) -> io::Result<Vec<String>> {
    let mut pending = String::new();
    let mut found = Vec::new();

    loop {
        if reader.read_line(&mut pending)? == 0 {
            break;
        }

        let mut consumed = 0;
        for caps in directive_regex().captures_iter(&pending) {
            found.push(caps[1].to_string());
            if let Some(whole) = caps.get(0) {
                consumed = whole.end();
            }
        }

        let keep_from = retain_from(&pending, consumed);
        pending.drain(..keep_from);
    }

    Ok(found)
}

/// Offset of the first byte of `pending` that may still be part of a match.
fn retain_from(pending: &str, consumed: usize) -> usize {
    // An opened but unterminated directive waits for its closing quote.
    if let Some(pos) = pending[consumed..].find(KEYWORD) {
        return consumed + pos;
    }

    // Otherwise only a partial keyword at the very end can matter.
    let mut start = pending
        .len()
        .saturating_sub(KEYWORD.len() - 1)
        .max(consumed);
    while !pending.is_char_boundary(start) {
        start += 1;
    }
    start
}
