//! This module implements number formatting helpers for keyword files.

use std::fmt::Display;

/// Significant digits the general float format starts out with.
pub const GENERAL_DIGITS: usize = 6;

/// Significant digits that are always enough to read an f64 back exactly.
pub const MAX_GENERAL_DIGITS: usize = 17;

/// Displays an f64 in "general" notation, the way C's `%g` does: no trailing
/// zeros, and scientific notation only for very large or very small
/// magnitudes (with a signed, two-digit exponent).
///
/// Six significant digits are used when they read back to the same value;
/// otherwise precision grows until it does, so nothing is lost.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct General(pub f64);

/// Strips trailing zeros (and a dangling dot) after a decimal point.
fn trim_fraction(s: &str) -> &str {
  if !s.contains('.') {
    return s;
  }
  return s.trim_end_matches('0').trim_end_matches('.');
}

/// Formats a finite, non-zero number like `%.{digits}g`.
fn general(x: f64, digits: usize) -> Result<String, std::fmt::Error> {
  // round to the wanted digits first, the exponent depends on it
  let sci = format!("{:.*e}", digits - 1, x);
  let (mantissa, exp) = match sci.split_once('e') {
    Some((m, e)) => (m, e.parse::<i32>().map_err(|_| std::fmt::Error)?),
    None => return Err(std::fmt::Error),
  };
  if exp < -4 || exp >= digits as i32 {
    let sign = if exp < 0 { '-' } else { '+' };
    return Ok(format!("{}e{}{:02}", trim_fraction(mantissa), sign, exp.abs()));
  }
  let decimals = (digits as i32 - 1 - exp) as usize;
  return Ok(trim_fraction(&format!("{:.*}", decimals, x)).to_string());
}

impl Display for General {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    let x = self.0;
    if x.is_nan() {
      return write!(f, "nan");
    }
    if x.is_infinite() {
      return write!(f, "{}", if x < 0.0 { "-inf" } else { "inf" });
    }
    if x == 0.0 {
      return write!(f, "{}", if x.is_sign_negative() { "-0" } else { "0" });
    }
    let mut s = String::new();
    for digits in GENERAL_DIGITS..=MAX_GENERAL_DIGITS {
      s = general(x, digits)?;
      if s.parse::<f64>().map_or(false, |back| back == x) {
        break;
      }
    }
    return write!(f, "{}", s);
  }
}
