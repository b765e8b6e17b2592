//! The closed set of values a console knows how to print.

use std::fmt;

/// A printable value.
///
/// `Json` is the structured kind: anything that is neither a primitive nor a
/// string is carried as a `serde_json::Value` and rendered through the
/// inspector.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Undefined,
    Null,
    Bool(bool),
    Number(f64),
    BigInt(i128),
    String(String),
    Json(serde_json::Value),
}

impl Value {
    pub fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    /// JavaScript truthiness.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Undefined | Value::Null => false,
            Value::Bool(b) => *b,
            Value::Number(n) => !(*n == 0.0 || n.is_nan()),
            Value::BigInt(n) => *n != 0,
            Value::String(s) => !s.is_empty(),
            Value::Json(_) => true,
        }
    }

    /// Numeric view used by `%d`, `%i` and `%f`.
    ///
    /// Returns `None` when the value has no sensible numeric reading, in
    /// which case the caller prints it unchanged.
    pub(crate) fn to_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            Value::Null => Some(0.0),
            Value::String(s) => parse_number(s),
            Value::Json(serde_json::Value::Number(n)) => n.as_f64(),
            _ => None,
        }
    }

    /// Parse a command line argument into a value.
    ///
    /// `undefined`, `null`, `true`, `false` and `NaN` map to their kinds, decimal
    /// numbers become `Number`, `<digits>n` becomes `BigInt`, anything that
    /// parses as a JSON object or array becomes `Json`. The rest is a string.
    pub fn parse_arg(arg: &str) -> Self {
        match arg {
            "undefined" => return Value::Undefined,
            "null" => return Value::Null,
            "true" => return Value::Bool(true),
            "false" => return Value::Bool(false),
            "NaN" => return Value::Number(f64::NAN),
            _ => {}
        }

        if let Some(digits) = arg.strip_suffix('n') {
            if let Ok(n) = digits.parse::<i128>() {
                return Value::BigInt(n);
            }
        }

        if let Some(n) = parse_number(arg) {
            return Value::Number(n);
        }

        if arg.starts_with('{') || arg.starts_with('[') {
            if let Ok(json) = serde_json::from_str::<serde_json::Value>(arg) {
                return Value::Json(json);
            }
        }

        Value::String(arg.to_string())
    }
}

/// Strict decimal parse: surrounding whitespace is allowed, any other
/// trailing garbage (`"5,6"`, `"12px"`) is not.
fn parse_number(s: &str) -> Option<f64> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return None;
    }
    match trimmed {
        "Infinity" | "+Infinity" => return Some(f64::INFINITY),
        "-Infinity" => return Some(f64::NEG_INFINITY),
        _ => {}
    }
    // Rust accepts "inf" and "nan", JavaScript does not.
    if trimmed
        .chars()
        .any(|c| !(c.is_ascii_digit() || matches!(c, '.' | '-' | '+' | 'e' | 'E')))
    {
        return None;
    }
    trimmed.parse::<f64>().ok()
}

/// JavaScript `Number.prototype.toString`: exponent form outside
/// `1e-6 <= |n| < 1e21`, plain decimal inside.
pub(crate) fn number_to_string(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string()
    } else if n == 0.0 {
        if n.is_sign_negative() { "-0" } else { "0" }.to_string()
    } else if n.abs() >= 1e21 || n.abs() < 1e-6 {
        let exp = format!("{:e}", n);
        match exp.split_once('e') {
            Some((mantissa, power)) if !power.starts_with('-') => {
                format!("{}e+{}", mantissa, power)
            }
            _ => exp,
        }
    } else if n.fract() == 0.0 {
        format!("{:.0}", n)
    } else {
        format!("{}", n)
    }
}

impl fmt::Display for Value {
    /// Plain string conversion, the way `%s` and the template see values.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Undefined => write!(f, "undefined"),
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Number(n) => write!(f, "{}", number_to_string(*n)),
            Value::BigInt(n) => write!(f, "{}n", n),
            Value::String(s) => write!(f, "{}", s),
            Value::Json(json) => write!(f, "{}", json),
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<&String> for Value {
    fn from(value: &String) -> Self {
        Value::String(value.clone())
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Number(value)
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Value::Number(value as f64)
    }
}

macro_rules! from_int {
    ($($t:ty),*) => {
        $(
        impl From<$t> for Value {
            fn from(value: $t) -> Self {
                Value::Number(value as f64)
            }
        }
        )*
    };
}

from_int!(i8, i16, i32, i64, u8, u16, u32, u64, usize, isize);

impl From<i128> for Value {
    fn from(value: i128) -> Self {
        Value::BigInt(value)
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        Value::Json(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Undefined, Into::into)
    }
}

/// Build a `Vec<Value>` from heterogeneous expressions.
///
/// ```
/// use conlog::{values, Value};
/// let args = values!["hello %s", "world", 42];
/// assert_eq!(args[2], Value::Number(42.0));
/// ```
#[macro_export]
macro_rules! values {
    () => { ::std::vec::Vec::<$crate::Value>::new() };
    ($($arg:expr),+ $(,)?) => {
        ::std::vec![$($crate::Value::from($arg)),+]
    };
}
