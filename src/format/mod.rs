//! printf-style formatting over [`Value`]s.
//!
//! `format("hello %s", ["world", "!"])` yields `"hello world !"`: conversions
//! consume arguments left to right, conversions without an argument are left
//! as written, and surplus arguments are appended separated by a space.

mod lexer;

pub use lexer::{Lexer, Segment, Specifier};

use crate::{
    inspect::{inspect_with, InspectOptions},
    value::{number_to_string, Value},
};

/// Format `template` with `args` using default (uncolored) options.
pub fn format(template: &str, args: &[Value]) -> String {
    format_with(InspectOptions::default(), template, args)
}

pub fn format_with(options: InspectOptions, template: &str, args: &[Value]) -> String {
    if args.is_empty() {
        return template.to_string();
    }

    let mut out = String::with_capacity(template.len());
    let mut remaining = args.iter();

    for segment in Lexer::new(template).segments() {
        match segment {
            Segment::Literal(text) => out.push_str(text),
            Segment::Percent => out.push('%'),
            Segment::Spec(spec) => match remaining.next() {
                Some(arg) => out.push_str(&convert(spec, arg, options)),
                None => out.push_str(spec.as_str()),
            },
        }
    }

    for arg in remaining {
        out.push(' ');
        out.push_str(&render(arg, options));
    }

    out
}

/// Console entry point: a leading string is the template, otherwise every
/// value is rendered and the results joined by single spaces.
pub fn format_values(args: &[Value]) -> String {
    format_values_with(InspectOptions::default(), args)
}

pub fn format_values_with(options: InspectOptions, args: &[Value]) -> String {
    match args.split_first() {
        None => String::new(),
        Some((Value::String(template), rest)) => format_with(options, template, rest),
        Some(_) => args
            .iter()
            .map(|arg| render(arg, options))
            .collect::<Vec<_>>()
            .join(" "),
    }
}

/// How a value prints when it is not consumed by a conversion.
fn render(value: &Value, options: InspectOptions) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => inspect_with(other, options),
    }
}

fn convert(spec: Specifier, arg: &Value, options: InspectOptions) -> String {
    match spec {
        Specifier::String => match arg {
            Value::Json(_) => inspect_with(arg, InspectOptions { colors: false, depth: 0 }),
            other => other.to_string(),
        },
        Specifier::Number => numeric(arg, number_to_string),
        Specifier::Integer => numeric(arg, |n| {
            if n.is_finite() {
                number_to_string(n.trunc())
            } else {
                number_to_string(n)
            }
        }),
        Specifier::Float => numeric(arg, number_to_string),
        Specifier::Json => match arg {
            Value::Undefined => "undefined".to_string(),
            Value::Json(json) => json.to_string(),
            Value::String(s) => serde_json::Value::String(s.clone()).to_string(),
            Value::Number(n) if !n.is_finite() => "null".to_string(),
            Value::Number(n) if *n == 0.0 => "0".to_string(),
            Value::BigInt(n) => n.to_string(),
            other => other.to_string(),
        },
        Specifier::Object | Specifier::ObjectPlain => inspect_with(arg, options),
        Specifier::Css => String::new(),
    }
}

/// `%d`, `%i` and `%f`: BigInt keeps its suffix, values without a numeric
/// reading pass through unchanged.
fn numeric(arg: &Value, conv: impl Fn(f64) -> String) -> String {
    if let Value::BigInt(n) = arg {
        return format!("{}n", n);
    }
    match arg.to_number() {
        Some(n) => conv(n),
        None => arg.to_string(),
    }
}
