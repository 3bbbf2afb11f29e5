//! # Column Type Inference
//!
//! A column is `Integer` when every value is an integer literal,
//! `Float` when every value is a finite real number, and `Text`
//! otherwise. The tag is resolved once per load and decides how cells
//! are stored and how filter literals are compared.

use serde::Serialize;

use super::value::Scalar;

/// Inferred type tag of a column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    Text,
    Integer,
    Float,
}

impl ColumnType {
    /// Classify a column from its (zero-filled) raw values.
    ///
    /// A column without any values is text.
    pub fn infer<'a, I>(values: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut seen = false;
        let mut all_integer = true;

        for value in values {
            seen = true;
            if all_integer && parse_integer(value).is_some() {
                continue;
            }
            all_integer = false;
            if parse_float(value).is_none() {
                return ColumnType::Text;
            }
        }

        match (seen, all_integer) {
            (false, _) => ColumnType::Text,
            (true, true) => ColumnType::Integer,
            (true, false) => ColumnType::Float,
        }
    }

    /// Convert a raw value into a scalar of this type.
    ///
    /// Returns `None` if the literal does not parse as this type.
    pub fn parse(&self, raw: &str) -> Option<Scalar> {
        match self {
            ColumnType::Text => Some(Scalar::Text(raw.to_string())),
            ColumnType::Integer => parse_integer(raw).map(Scalar::Integer),
            ColumnType::Float => parse_float(raw).map(Scalar::Float),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnType::Text => "text",
            ColumnType::Integer => "integer",
            ColumnType::Float => "float",
        }
    }
}

fn parse_integer(raw: &str) -> Option<i64> {
    raw.trim().parse::<i64>().ok()
}

fn parse_float(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|f| f.is_finite())
}

/// A named, typed column
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub name: String,
    pub column_type: ColumnType,
}

impl Column {
    pub fn new(name: impl Into<String>, column_type: ColumnType) -> Self {
        Self {
            name: name.into(),
            column_type,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_infer_integer() {
        assert_eq!(ColumnType::infer(["1950", "1951", "-3"]), ColumnType::Integer);
    }

    #[test]
    fn test_infer_float_when_one_value_is_fractional() {
        assert_eq!(ColumnType::infer(["1", "2.5", "0"]), ColumnType::Float);
    }

    #[test]
    fn test_infer_text() {
        assert_eq!(ColumnType::infer(["1", "MO", "2.5"]), ColumnType::Text);
        assert_eq!(ColumnType::infer(["nan", "1"]), ColumnType::Text);
        assert_eq!(ColumnType::infer(["inf"]), ColumnType::Text);
    }

    #[test]
    fn test_infer_empty_column_is_text() {
        assert_eq!(ColumnType::infer(std::iter::empty::<&str>()), ColumnType::Text);
    }

    #[test]
    fn test_parse_literal() {
        assert_eq!(ColumnType::Integer.parse("12"), Some(Scalar::Integer(12)));
        assert_eq!(ColumnType::Integer.parse("12.0"), None);
        assert_eq!(ColumnType::Float.parse("12"), Some(Scalar::Float(12.0)));
        assert_eq!(ColumnType::Float.parse("abc"), None);
        assert_eq!(
            ColumnType::Text.parse(" x "),
            Some(Scalar::Text(" x ".to_string()))
        );
    }
}
