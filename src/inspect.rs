//! Generic representation of values, with optional ANSI styling.

use serde_json::Value as Json;
use yansi::Paint;

use crate::value::{number_to_string, Value};

/// Nesting past this depth collapses to `[Object]` / `[Array]`.
const DEFAULT_DEPTH: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InspectOptions {
    pub colors: bool,
    pub depth: usize,
}

impl Default for InspectOptions {
    fn default() -> Self {
        Self {
            colors: false,
            depth: DEFAULT_DEPTH,
        }
    }
}

impl InspectOptions {
    pub fn colored(colors: bool) -> Self {
        Self {
            colors,
            ..Self::default()
        }
    }
}

/// Inspect a value with default options.
pub fn inspect(value: &Value) -> String {
    inspect_with(value, InspectOptions::default())
}

pub fn inspect_with(value: &Value, options: InspectOptions) -> String {
    let styler = Styler(options.colors);
    match value {
        Value::Undefined => styler.undefined("undefined"),
        Value::Null => styler.null("null"),
        Value::Bool(b) => styler.number(&b.to_string()),
        Value::Number(n) => styler.number(&number_to_string(*n)),
        Value::BigInt(n) => styler.number(&format!("{}n", n)),
        Value::String(s) => styler.string(&quote(s)),
        Value::Json(json) => inspect_json(json, 0, options),
    }
}

fn inspect_json(json: &Json, level: usize, options: InspectOptions) -> String {
    let styler = Styler(options.colors);
    match json {
        Json::Null => styler.null("null"),
        Json::Bool(b) => styler.number(&b.to_string()),
        Json::Number(n) => match n.as_f64() {
            Some(f) if n.is_f64() => styler.number(&number_to_string(f)),
            _ => styler.number(&n.to_string()),
        },
        Json::String(s) => styler.string(&quote(s)),
        Json::Array(items) => {
            if items.is_empty() {
                return "[]".to_string();
            }
            if level > options.depth {
                return styler.special("[Array]");
            }
            let items: Vec<String> = items
                .iter()
                .map(|item| inspect_json(item, level + 1, options))
                .collect();
            format!("[ {} ]", items.join(", "))
        }
        Json::Object(map) => {
            if map.is_empty() {
                return "{}".to_string();
            }
            if level > options.depth {
                return styler.special("[Object]");
            }
            let entries: Vec<String> = map
                .iter()
                .map(|(key, value)| {
                    format!("{}: {}", key_repr(key), inspect_json(value, level + 1, options))
                })
                .collect();
            format!("{{ {} }}", entries.join(", "))
        }
    }
}

/// Identifier-like keys print bare, everything else quoted.
fn key_repr(key: &str) -> String {
    let mut chars = key.chars();
    let is_ident = match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' || c == '$' => {
            chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
        }
        _ => false,
    };

    if is_ident {
        key.to_string()
    } else {
        quote(key)
    }
}

fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('\'');
    for c in s.chars() {
        match c {
            '\'' => out.push_str("\\'"),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            c => out.push(c),
        }
    }
    out.push('\'');
    out
}

struct Styler(bool);

impl Styler {
    fn number(&self, s: &str) -> String {
        if self.0 {
            s.yellow().to_string()
        } else {
            s.to_string()
        }
    }

    fn string(&self, s: &str) -> String {
        if self.0 {
            s.green().to_string()
        } else {
            s.to_string()
        }
    }

    fn null(&self, s: &str) -> String {
        if self.0 {
            s.bold().to_string()
        } else {
            s.to_string()
        }
    }

    fn undefined(&self, s: &str) -> String {
        if self.0 {
            s.dim().to_string()
        } else {
            s.to_string()
        }
    }

    fn special(&self, s: &str) -> String {
        if self.0 {
            s.cyan().to_string()
        } else {
            s.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn primitives() {
        assert_eq!(inspect(&Value::Undefined), "undefined");
        assert_eq!(inspect(&Value::from("it's")), r"'it\'s'");
        assert_eq!(inspect(&Value::BigInt(10)), "10n");
        assert_eq!(inspect(&Value::Number(-0.0)), "-0");
    }

    #[test]
    fn objects() {
        let value = Value::Json(json!({"a": 1, "b-c": "x", "list": [1, 2]}));
        assert_eq!(inspect(&value), "{ a: 1, 'b-c': 'x', list: [ 1, 2 ] }");
        assert_eq!(inspect(&Value::Json(json!({}))), "{}");
        assert_eq!(inspect(&Value::Json(json!([]))), "[]");
    }

    #[test]
    fn depth_limit() {
        let value = Value::Json(json!({"a": {"b": {"c": {}}}}));
        assert_eq!(inspect(&value), "{ a: { b: { c: {} } } }");

        let value = Value::Json(json!({"a": {"b": {"c": {"d": 1}}}}));
        assert_eq!(inspect(&value), "{ a: { b: { c: [Object] } } }");
    }

    #[test]
    fn colors_only_when_asked() {
        let plain = inspect_with(&Value::Number(3.0), InspectOptions::colored(false));
        assert_eq!(plain, "3");

        let colored = inspect_with(&Value::Number(3.0), InspectOptions::colored(true));
        assert!(colored.contains("\x1b["));
        assert!(colored.contains('3'));
    }
}
