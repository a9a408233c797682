//! Value coercion and comparison
//!
//! Compiled fragments route every arithmetic operand, condition and
//! comparison through these functions. They are pure and total: any input
//! produces a value, never an error.

use super::types::Val;
use std::cmp::Ordering;

/* ===================== Casts ===================== */

/// Numeric coercion where unparsable input and NaN both become 0
pub fn to_number(value: &Val) -> f64 {
    to_not_nan(number(value))
}

/// Replace NaN with 0
///
/// Negative zero is also folded to 0, matching how the host language treats
/// both as falsy.
pub fn to_not_nan(n: f64) -> f64 {
    if n.is_nan() || n == 0.0 {
        0.0
    } else {
        n
    }
}

pub fn to_boolean(value: &Val) -> bool {
    match value {
        Val::Bool(b) => *b,
        Val::Str(s) => !(s.is_empty() || s == "0" || s.to_lowercase() == "false"),
        Val::Num(n) => !(n.is_nan() || *n == 0.0),
        Val::Null => false,
    }
}

pub fn to_string(value: &Val) -> String {
    match value {
        Val::Null => "null".to_string(),
        Val::Bool(b) => b.to_string(),
        Val::Num(n) => format_number(*n),
        Val::Str(s) => s.clone(),
    }
}

/// True for the absent value and for strings that are empty once trimmed
pub fn is_whitespace(value: &Val) -> bool {
    match value {
        Val::Null => true,
        Val::Str(s) => s.trim_matches(is_js_space).is_empty(),
        _ => false,
    }
}

/* ===================== Comparison ===================== */

/// Compare two values the way script operators do
///
/// Numeric when both sides parse as numbers. A side that reads as zero only
/// because it is blank counts as NaN, so `""` never equals `"0"`. Anything
/// NaN falls back to a case-insensitive string comparison.
pub fn compare(a: &Val, b: &Val) -> Ordering {
    let mut n1 = number(a);
    let mut n2 = number(b);
    if n1 == 0.0 && is_whitespace(a) {
        n1 = f64::NAN;
    } else if n2 == 0.0 && is_whitespace(b) {
        n2 = f64::NAN;
    }

    if n1.is_nan() || n2.is_nan() {
        let s1 = to_string(a).to_lowercase();
        let s2 = to_string(b).to_lowercase();
        return s1.encode_utf16().cmp(s2.encode_utf16());
    }

    if n1.is_infinite() && n1 == n2 {
        return Ordering::Equal;
    }
    n1.partial_cmp(&n2).unwrap_or(Ordering::Equal)
}

/// Modulo whose result takes the sign of the divisor
pub fn floor_mod(n: f64, modulus: f64) -> f64 {
    let mut result = n % modulus;
    if result / modulus < 0.0 {
        result += modulus;
    }
    result
}

/* ===================== Number parsing ===================== */

/// Raw numeric conversion; may return NaN
pub fn number(value: &Val) -> f64 {
    match value {
        Val::Null => 0.0,
        Val::Bool(b) => {
            if *b {
                1.0
            } else {
                0.0
            }
        }
        Val::Num(n) => *n,
        Val::Str(s) => parse_number(s),
    }
}

fn is_js_space(c: char) -> bool {
    c == '\u{feff}' || (c.is_whitespace() && c != '\u{85}')
}

fn parse_number(text: &str) -> f64 {
    let s = text.trim_matches(is_js_space);
    if s.is_empty() {
        return 0.0;
    }
    if let Some(n) = parse_prefixed_integer(s) {
        return n;
    }

    let (sign, unsigned) = match s.as_bytes()[0] {
        b'+' => (1.0, &s[1..]),
        b'-' => (-1.0, &s[1..]),
        _ => (1.0, s),
    };
    if unsigned == "Infinity" {
        return sign * f64::INFINITY;
    }
    parse_decimal(unsigned).map_or(f64::NAN, |n| sign * n)
}

/// `0x`, `0o` and `0b` literals; unsigned only. Malformed digits fall through
/// to the decimal parser, which rejects them.
fn parse_prefixed_integer(s: &str) -> Option<f64> {
    let radix = match s.get(..2)? {
        "0x" | "0X" => 16,
        "0o" | "0O" => 8,
        "0b" | "0B" => 2,
        _ => return None,
    };
    let digits = &s[2..];
    if digits.is_empty() {
        return None;
    }
    digits.chars().try_fold(0.0, |acc: f64, c| {
        c.to_digit(radix).map(|d| acc * radix as f64 + d as f64)
    })
}

/// Unsigned decimal literal with optional fraction and exponent
fn parse_decimal(s: &str) -> Option<f64> {
    let bytes = s.as_bytes();
    let len = bytes.len();
    let digits_from = |mut i: usize| {
        while i < len && bytes[i].is_ascii_digit() {
            i += 1;
        }
        i
    };

    let int_end = digits_from(0);
    let int_digits = &s[..int_end];
    let mut i = int_end;

    let mut frac_digits = "";
    if i < len && bytes[i] == b'.' {
        let frac_end = digits_from(i + 1);
        frac_digits = &s[i + 1..frac_end];
        i = frac_end;
    }
    if int_digits.is_empty() && frac_digits.is_empty() {
        return None;
    }

    let mut exponent = "0";
    if i < len && (bytes[i] == b'e' || bytes[i] == b'E') {
        let mut j = i + 1;
        if j < len && (bytes[j] == b'+' || bytes[j] == b'-') {
            j += 1;
        }
        let exp_end = digits_from(j);
        if exp_end == j {
            return None;
        }
        exponent = &s[i + 1..exp_end];
        i = exp_end;
    }
    if i != len {
        return None;
    }

    let normalized = format!(
        "{}.{}e{}",
        if int_digits.is_empty() { "0" } else { int_digits },
        if frac_digits.is_empty() { "0" } else { frac_digits },
        exponent
    );
    normalized.parse::<f64>().ok()
}

/* ===================== Number formatting ===================== */

/// Format a number the way the host language stringifies it
///
/// Integers print without a fraction, very large and very small magnitudes
/// switch to exponent form (`1e+21`, `1e-7`).
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        return "NaN".to_string();
    }
    if n.is_infinite() {
        return if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if n == 0.0 {
        return "0".to_string();
    }
    if n < 0.0 {
        return format!("-{}", format_number(-n));
    }

    // Shortest round-trip digits and decimal exponent
    let sci = format!("{:e}", n);
    let (mantissa, exp) = sci.split_once('e').unwrap_or((sci.as_str(), "0"));
    let digits: String = mantissa.chars().filter(|c| *c != '.').collect();
    let exp: i32 = exp.parse().unwrap_or(0);
    let k = digits.len() as i32;
    let point = exp + 1;

    if k <= point && point <= 21 {
        format!("{}{}", digits, "0".repeat((point - k) as usize))
    } else if 0 < point && point <= 21 {
        let (int_part, frac_part) = digits.split_at(point as usize);
        format!("{}.{}", int_part, frac_part)
    } else if -6 < point && point <= 0 {
        format!("0.{}{}", "0".repeat((-point) as usize), digits)
    } else {
        let e = point - 1;
        let sign = if e < 0 { '-' } else { '+' };
        let (first, rest) = digits.split_at(1);
        if rest.is_empty() {
            format!("{}e{}{}", first, sign, e.abs())
        } else {
            format!("{}.{}e{}{}", first, rest, sign, e.abs())
        }
    }
}
