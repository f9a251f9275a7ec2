//! This module implements small text-handling routines for keyword decks that
//! don't need a context of their own.

use std::str::FromStr;

/// Lines starting with this are keywords ("directives").
pub const DIRECTIVE_MARKER: char = '*';

/// Lines starting with this are comments.
pub const COMMENT_MARKER: &str = "**";

/// A keyword line broken down into its keyword and parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Directive<'a> {
  /// The keyword, upper-case, without the leading marker.
  pub keyword: String,
  /// The raw parameter fields, in order of appearance.
  params: Vec<&'a str>,
}

impl<'a> Directive<'a> {
  /// Breaks down a (trimmed) keyword line. Returns None if the line does not
  /// start with the directive marker or is a comment.
  pub fn parse(line: &'a str) -> Option<Self> {
    if line.starts_with(COMMENT_MARKER) {
      return None;
    }
    let body = line.strip_prefix(DIRECTIVE_MARKER)?;
    let mut fields = body.split(',');
    let keyword = fields.next().unwrap_or_default().trim().to_ascii_uppercase();
    return Some(Self { keyword, params: fields.map(str::trim).collect() });
  }

  /// Returns the value of a `key=value` parameter, matching the key without
  /// regard to case. The value is trimmed and upper-cased; empty values count
  /// as absent.
  pub fn param(&self, key: &str) -> Option<String> {
    return self.params.iter()
      .filter_map(|p| p.split_once('='))
      .find(|(k, _)| k.trim().eq_ignore_ascii_case(key))
      .map(|(_, v)| v.trim().to_ascii_uppercase())
      .filter(|v| !v.is_empty());
  }

  /// Checks for a bare flag parameter, such as `generate`.
  pub fn has_flag(&self, flag: &str) -> bool {
    return self.params.iter().any(|p| p.eq_ignore_ascii_case(flag));
  }
}

/// Splits a list line on commas or whitespace, dropping empty tokens.
pub fn list_tokens(line: &str) -> impl Iterator<Item = &str> {
  return line
    .split(|c: char| c == ',' || c.is_whitespace())
    .filter(|t| !t.is_empty());
}

/// Parses a single field, ignoring surrounding whitespace.
pub fn parse_field<T: FromStr>(field: &str) -> Option<T> {
  return field.trim().parse().ok();
}
