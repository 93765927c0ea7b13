use std::fmt::{self, Write};

use crate::display_utils::write_quoted;

/// A constant GraphQL input value, as found in directive arguments and
/// default values.
///
/// The `Display` implementation renders GraphQL literal syntax, so a string
/// value `Foo` displays as `"Foo"`.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Int(i64),
    Float(f64),
    String(String),
    Boolean(bool),
    Enum(String),
    Variable(String),
    List(Vec<Value>),
    Object(Vec<(String, Value)>),
}

impl Value {
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(values) => Some(values),
            _ => None,
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_owned())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Int(i) => fmt::Display::fmt(i, f),
            // Debug keeps the fractional part, so `1.0` does not turn into an Int literal.
            Value::Float(val) => fmt::Debug::fmt(val, f),
            Value::String(s) => write_quoted(f, s),
            Value::Boolean(true) => f.write_str("true"),
            Value::Boolean(false) => f.write_str("false"),
            Value::Enum(val) => f.write_str(val),
            Value::Variable(name) => write!(f, "${name}"),
            Value::List(values) => {
                let mut values = values.iter().peekable();

                f.write_char('[')?;
                while let Some(value) = values.next() {
                    fmt::Display::fmt(value, f)?;

                    if values.peek().is_some() {
                        f.write_str(", ")?;
                    }
                }
                f.write_char(']')
            }
            Value::Object(key_values) => {
                let mut key_values = key_values.iter().peekable();

                f.write_char('{')?;
                while let Some((key, value)) = key_values.next() {
                    write!(f, "{key}: {value}")?;

                    if key_values.peek().is_some() {
                        f.write_str(", ")?;
                    }
                }
                f.write_char('}')
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strings_are_quoted_and_escaped() {
        assert_eq!(Value::from("Foo").to_string(), r#""Foo""#);
        assert_eq!(Value::from("a \"b\"\n").to_string(), r#""a \"b\"\n""#);
    }

    #[test]
    fn as_list() {
        let list = Value::List(vec!["A".into()]);

        assert_eq!(list.as_list(), Some(&[Value::from("A")][..]));
        assert_eq!(Value::from("A").as_list(), None);
    }

    #[test]
    fn nested_values() {
        let value = Value::Object(vec![
            ("types".to_owned(), Value::List(vec!["A".into(), Value::Enum("B".to_owned())])),
            ("limit".to_owned(), Value::Float(1.0)),
            ("on".to_owned(), Value::Boolean(true)),
        ]);

        assert_eq!(value.to_string(), r#"{types: ["A", B], limit: 1.0, on: true}"#);
    }
}
