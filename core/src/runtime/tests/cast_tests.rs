//! Tests for value coercion and comparison

use crate::runtime::cast::*;
use crate::runtime::types::Val;
use std::cmp::Ordering;

fn s(v: &str) -> Val {
    Val::Str(v.to_string())
}

#[test]
fn test_to_number_parses_numeric_strings() {
    assert_eq!(to_number(&s("12")), 12.0);
    assert_eq!(to_number(&s("  3.5 \n")), 3.5);
    assert_eq!(to_number(&s(".5")), 0.5);
    assert_eq!(to_number(&s("5.")), 5.0);
    assert_eq!(to_number(&s("+7")), 7.0);
    assert_eq!(to_number(&s("-2.25")), -2.25);
    assert_eq!(to_number(&s("1e3")), 1000.0);
    assert_eq!(to_number(&s("2.5E-1")), 0.25);
    assert_eq!(to_number(&s("0x1A")), 26.0);
    assert_eq!(to_number(&s("0b101")), 5.0);
    assert_eq!(to_number(&s("0o17")), 15.0);
}

#[test]
fn test_to_number_never_returns_nan() {
    for input in ["abc", "1_000", "1e", "-0x10", "0x", "infinity", "inf", "NaN", "1.2.3", "--1"] {
        let n = to_number(&s(input));
        assert_eq!(n, 0.0, "input {:?}", input);
    }
    assert_eq!(to_number(&Val::Num(f64::NAN)), 0.0);
}

#[test]
fn test_to_number_non_strings() {
    assert_eq!(to_number(&s("")), 0.0);
    assert_eq!(to_number(&Val::Null), 0.0);
    assert_eq!(to_number(&Val::Bool(true)), 1.0);
    assert_eq!(to_number(&Val::Bool(false)), 0.0);
    assert_eq!(to_number(&Val::Num(-4.5)), -4.5);
}

#[test]
fn test_to_number_infinity() {
    assert_eq!(to_number(&s("Infinity")), f64::INFINITY);
    assert_eq!(to_number(&s("-Infinity")), f64::NEG_INFINITY);
    assert_eq!(to_number(&s("+Infinity")), f64::INFINITY);
}

#[test]
fn test_to_number_folds_negative_zero() {
    let n = to_number(&s("-0"));
    assert_eq!(n, 0.0);
    assert!(n.is_sign_positive());
}

#[test]
fn test_to_not_nan() {
    assert_eq!(to_not_nan(f64::NAN), 0.0);
    assert_eq!(to_not_nan(2.5), 2.5);
    assert_eq!(to_not_nan(f64::INFINITY), f64::INFINITY);
}

#[test]
fn test_to_boolean_strings() {
    assert!(!to_boolean(&s("")));
    assert!(!to_boolean(&s("0")));
    assert!(!to_boolean(&s("false")));
    assert!(!to_boolean(&s("False")));
    assert!(!to_boolean(&s("FALSE")));
    assert!(to_boolean(&s("0.0")));
    assert!(to_boolean(&s(" ")));
    assert!(to_boolean(&s("true")));
    assert!(to_boolean(&s("no")));
}

#[test]
fn test_to_boolean_other_types() {
    assert!(to_boolean(&Val::Bool(true)));
    assert!(!to_boolean(&Val::Bool(false)));
    assert!(!to_boolean(&Val::Num(0.0)));
    assert!(!to_boolean(&Val::Num(f64::NAN)));
    assert!(to_boolean(&Val::Num(-1.0)));
    assert!(!to_boolean(&Val::Null));
}

#[test]
fn test_to_string_numbers() {
    assert_eq!(to_string(&Val::Num(1.0)), "1");
    assert_eq!(to_string(&Val::Num(-2.5)), "-2.5");
    assert_eq!(to_string(&Val::Num(0.1)), "0.1");
    assert_eq!(to_string(&Val::Num(123456789.123)), "123456789.123");
    assert_eq!(to_string(&Val::Num(1e20)), "100000000000000000000");
    assert_eq!(to_string(&Val::Num(1e21)), "1e+21");
    assert_eq!(to_string(&Val::Num(1.2345e25)), "1.2345e+25");
    assert_eq!(to_string(&Val::Num(0.000001)), "0.000001");
    assert_eq!(to_string(&Val::Num(1e-7)), "1e-7");
    assert_eq!(to_string(&Val::Num(1.5e-7)), "1.5e-7");
    assert_eq!(to_string(&Val::Num(-0.0)), "0");
    assert_eq!(to_string(&Val::Num(f64::NAN)), "NaN");
    assert_eq!(to_string(&Val::Num(f64::INFINITY)), "Infinity");
    assert_eq!(to_string(&Val::Num(f64::NEG_INFINITY)), "-Infinity");
}

#[test]
fn test_to_string_other_types() {
    assert_eq!(to_string(&Val::Bool(true)), "true");
    assert_eq!(to_string(&Val::Null), "null");
    assert_eq!(to_string(&s("hello")), "hello");
    assert_eq!(Val::Num(3.0).to_string(), "3");
}

#[test]
fn test_is_whitespace() {
    assert!(is_whitespace(&Val::Null));
    assert!(is_whitespace(&s("")));
    assert!(is_whitespace(&s(" \t\n")));
    assert!(!is_whitespace(&s(" a ")));
    assert!(!is_whitespace(&Val::Num(0.0)));
    assert!(!is_whitespace(&Val::Bool(false)));
}

#[test]
fn test_compare_empty_string_is_not_zero() {
    assert_ne!(compare(&s(""), &s("0")), Ordering::Equal);
    assert_ne!(compare(&s("0"), &s("")), Ordering::Equal);
    assert_ne!(compare(&s(" "), &Val::Num(0.0)), Ordering::Equal);
    assert_ne!(compare(&Val::Null, &Val::Num(0.0)), Ordering::Equal);
}

#[test]
fn test_compare_infinities() {
    let inf = Val::Num(f64::INFINITY);
    let neg = Val::Num(f64::NEG_INFINITY);
    assert_eq!(compare(&inf, &inf), Ordering::Equal);
    assert_eq!(compare(&neg, &neg), Ordering::Equal);
    assert_eq!(compare(&neg, &inf), Ordering::Less);
    assert_eq!(compare(&s("Infinity"), &inf), Ordering::Equal);
}

#[test]
fn test_compare_numeric() {
    assert_eq!(compare(&s("10"), &s("9")), Ordering::Greater);
    assert_eq!(compare(&Val::Num(1.0), &s("1.0")), Ordering::Equal);
    assert_eq!(compare(&Val::Bool(true), &Val::Num(1.0)), Ordering::Equal);
    assert_eq!(compare(&s("-3"), &Val::Num(2.0)), Ordering::Less);
    assert_eq!(compare(&s("0"), &Val::Num(0.0)), Ordering::Equal);
}

#[test]
fn test_compare_falls_back_to_strings() {
    assert_eq!(compare(&s("abc"), &s("abd")), Ordering::Less);
    assert_eq!(compare(&s("ABC"), &s("abc")), Ordering::Equal);
    assert_eq!(compare(&s("Zebra"), &s("apple")), Ordering::Greater);
    // "9a" is not numeric, so this is "10" vs "9a" as text
    assert_eq!(compare(&s("10"), &s("9a")), Ordering::Less);
    assert_eq!(compare(&s("apple"), &Val::Num(5.0)), Ordering::Greater);
}

#[test]
fn test_floor_mod() {
    assert_eq!(floor_mod(5.0, 3.0), 2.0);
    assert_eq!(floor_mod(-1.0, 3.0), 2.0);
    assert_eq!(floor_mod(5.0, -3.0), -1.0);
    assert_eq!(floor_mod(-5.0, -3.0), -2.0);
    assert!(floor_mod(1.0, 0.0).is_nan());
}
