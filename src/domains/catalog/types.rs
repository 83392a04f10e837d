//! Structural type descriptors for registered function parameters.
//!
//! Every parameter type implements [`ArgType`], which reports a
//! [`TypeDescriptor`] and converts protocol values into the Rust type.
//! Schema generation matches on the descriptor variant, so a sequence of
//! floats can never be mistaken for a float.

use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;
use serde_json::Value;

use super::error::ArgError;

/// Date format accepted for calendar-date parameters.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// The closed set of parameter kinds the catalog understands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeDescriptor {
    /// Floating-point number.
    Number,
    /// Whole number.
    Integer,
    /// Free text.
    Text,
    /// True or false.
    Boolean,
    /// Ordered sequence of one item kind.
    Sequence(Box<TypeDescriptor>),
    /// String-keyed mapping of one value kind.
    Mapping(Box<TypeDescriptor>),
    /// A closed set of allowed text values.
    Literal(Vec<String>),
    /// A domain type exposed to clients as plain text.
    Opaque(&'static str),
}

impl TypeDescriptor {
    /// Build a literal descriptor from the textual form of its values.
    ///
    /// Surrounding whitespace and quote characters are trimmed; empty
    /// values are dropped.
    pub fn literal<I, S>(raw_values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let values = raw_values
            .into_iter()
            .map(|value| {
                value
                    .as_ref()
                    .trim()
                    .trim_matches(|c| c == '"' || c == '\'')
                    .to_string()
            })
            .filter(|value| !value.is_empty())
            .collect();
        Self::Literal(values)
    }

    /// Build a sequence descriptor.
    pub fn sequence_of(item: TypeDescriptor) -> Self {
        Self::Sequence(Box::new(item))
    }

    /// Build a mapping descriptor.
    pub fn mapping_of(value: TypeDescriptor) -> Self {
        Self::Mapping(Box::new(value))
    }

    /// Whether this descriptor is a numeric primitive.
    pub fn is_numeric(&self) -> bool {
        matches!(self, Self::Number | Self::Integer)
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number => f.write_str("float"),
            Self::Integer => f.write_str("int"),
            Self::Text => f.write_str("str"),
            Self::Boolean => f.write_str("bool"),
            Self::Sequence(item) => write!(f, "list[{item}]"),
            Self::Mapping(value) => write!(f, "dict[str, {value}]"),
            Self::Literal(values) => {
                let quoted: Vec<String> = values.iter().map(|v| format!("'{v}'")).collect();
                write!(f, "Literal[{}]", quoted.join(", "))
            }
            Self::Opaque(name) => f.write_str(name),
        }
    }
}

/// Short name of a JSON value's shape, for error messages.
pub fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// A Rust type usable as a registered function parameter.
pub trait ArgType: Sized {
    /// Structural description of the type.
    fn descriptor() -> TypeDescriptor;

    /// Convert a protocol value into this type.
    fn from_arg(name: &str, value: &Value) -> Result<Self, ArgError>;

    /// Convert a value of this type back into protocol form.
    ///
    /// Used to record declared defaults.
    fn to_arg(&self) -> Value;

    /// Shorthand for a mismatch error against this type.
    fn mismatch(name: &str, value: &Value) -> ArgError {
        ArgError::type_mismatch(name, Self::descriptor().to_string(), json_kind(value))
    }
}

impl ArgType for f64 {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::Number
    }

    fn from_arg(name: &str, value: &Value) -> Result<Self, ArgError> {
        value.as_f64().ok_or_else(|| Self::mismatch(name, value))
    }

    fn to_arg(&self) -> Value {
        Value::from(*self)
    }
}

impl ArgType for i64 {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::Integer
    }

    fn from_arg(name: &str, value: &Value) -> Result<Self, ArgError> {
        if let Some(whole) = value.as_i64() {
            return Ok(whole);
        }
        // Clients frequently send 12.0 for an integer field.
        match value.as_f64() {
            Some(number) if number.fract() != 0.0 => Err(ArgError::invalid(
                name,
                format!("{number} is not a whole number"),
            )),
            // i64::MAX rounds up to 2^63 as f64, so the upper bound is exclusive.
            Some(number) if number >= i64::MIN as f64 && number < i64::MAX as f64 => {
                Ok(number as i64)
            }
            Some(number) => Err(ArgError::invalid(
                name,
                format!("{number} is outside the integer range"),
            )),
            None => Err(Self::mismatch(name, value)),
        }
    }

    fn to_arg(&self) -> Value {
        Value::from(*self)
    }
}

impl ArgType for bool {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::Boolean
    }

    fn from_arg(name: &str, value: &Value) -> Result<Self, ArgError> {
        value.as_bool().ok_or_else(|| Self::mismatch(name, value))
    }

    fn to_arg(&self) -> Value {
        Value::Bool(*self)
    }
}

impl ArgType for String {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::Text
    }

    fn from_arg(name: &str, value: &Value) -> Result<Self, ArgError> {
        value
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| Self::mismatch(name, value))
    }

    fn to_arg(&self) -> Value {
        Value::String(self.clone())
    }
}

impl<T: ArgType> ArgType for Vec<T> {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::sequence_of(T::descriptor())
    }

    fn from_arg(name: &str, value: &Value) -> Result<Self, ArgError> {
        let items = value.as_array().ok_or_else(|| Self::mismatch(name, value))?;
        items
            .iter()
            .enumerate()
            .map(|(index, item)| T::from_arg(&format!("{name}[{index}]"), item))
            .collect()
    }

    fn to_arg(&self) -> Value {
        Value::Array(self.iter().map(ArgType::to_arg).collect())
    }
}

impl<T: ArgType> ArgType for BTreeMap<String, T> {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::mapping_of(T::descriptor())
    }

    fn from_arg(name: &str, value: &Value) -> Result<Self, ArgError> {
        let entries = value
            .as_object()
            .ok_or_else(|| Self::mismatch(name, value))?;
        entries
            .iter()
            .map(|(key, item)| Ok((key.clone(), T::from_arg(&format!("{name}.{key}"), item)?)))
            .collect()
    }

    fn to_arg(&self) -> Value {
        Value::Object(
            self.iter()
                .map(|(key, item)| (key.clone(), item.to_arg()))
                .collect(),
        )
    }
}

impl ArgType for NaiveDate {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::Opaque("date")
    }

    fn from_arg(name: &str, value: &Value) -> Result<Self, ArgError> {
        let text = value.as_str().ok_or_else(|| Self::mismatch(name, value))?;
        NaiveDate::parse_from_str(text, DATE_FORMAT).map_err(|e| {
            ArgError::invalid(name, format!("'{text}' is not a YYYY-MM-DD date ({e})"))
        })
    }

    fn to_arg(&self) -> Value {
        Value::String(self.format(DATE_FORMAT).to_string())
    }
}

/// Declare an enumerated-literal parameter type.
///
/// Generates a fieldless enum whose variants map to fixed text values and
/// an [`ArgType`] implementation reporting those values as a
/// [`TypeDescriptor::Literal`].
///
/// ```rust,ignore
/// literal_type! {
///     pub enum Rounding { Up => "up", Down => "down" }
/// }
/// ```
#[macro_export]
macro_rules! literal_type {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident { $($variant:ident => $text:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        $vis enum $name {
            $($variant),+
        }

        impl $name {
            /// The text value clients send for this variant.
            pub const fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $text),+
                }
            }
        }

        impl $crate::domains::catalog::ArgType for $name {
            fn descriptor() -> $crate::domains::catalog::TypeDescriptor {
                $crate::domains::catalog::TypeDescriptor::literal([$(stringify!($text)),+])
            }

            fn from_arg(
                name: &str,
                value: &::serde_json::Value,
            ) -> ::std::result::Result<Self, $crate::domains::catalog::ArgError> {
                match value.as_str() {
                    $(Some($text) => Ok(Self::$variant),)+
                    _ => Err(<Self as $crate::domains::catalog::ArgType>::mismatch(name, value)),
                }
            }

            fn to_arg(&self) -> ::serde_json::Value {
                ::serde_json::Value::String(self.as_str().to_string())
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    crate::literal_type! {
        /// Test-only literal.
        enum Direction { North => "north", South => "south" }
    }

    #[test]
    fn test_container_descriptors_wrap_their_items() {
        assert_eq!(
            <Vec<f64>>::descriptor(),
            TypeDescriptor::Sequence(Box::new(TypeDescriptor::Number))
        );
        assert_eq!(
            <BTreeMap<String, i64>>::descriptor(),
            TypeDescriptor::Mapping(Box::new(TypeDescriptor::Integer))
        );
    }

    #[test]
    fn test_literal_trims_quotes_and_whitespace() {
        let descriptor = TypeDescriptor::literal([" 'float'", "\"decimal\" ", "''"]);
        assert_eq!(
            descriptor,
            TypeDescriptor::Literal(vec!["float".to_string(), "decimal".to_string()])
        );
    }

    #[test]
    fn test_literal_type_macro() {
        assert_eq!(
            Direction::descriptor(),
            TypeDescriptor::Literal(vec!["north".to_string(), "south".to_string()])
        );
        assert_eq!(
            Direction::from_arg("heading", &json!("south")),
            Ok(Direction::South)
        );
        assert!(Direction::from_arg("heading", &json!("east")).is_err());
        assert_eq!(Direction::North.to_arg(), json!("north"));
    }

    #[test]
    fn test_integer_accepts_whole_floats_only() {
        assert_eq!(i64::from_arg("n", &json!(12)), Ok(12));
        assert_eq!(i64::from_arg("n", &json!(12.0)), Ok(12));
        assert!(matches!(
            i64::from_arg("n", &json!(12.5)),
            Err(ArgError::Invalid { .. })
        ));
        assert!(matches!(
            i64::from_arg("n", &json!(1e19)),
            Err(ArgError::Invalid { .. })
        ));
        assert!(matches!(
            i64::from_arg("n", &json!(-1e300)),
            Err(ArgError::Invalid { .. })
        ));
        assert!(matches!(
            i64::from_arg("n", &json!("12")),
            Err(ArgError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn test_sequence_reports_failing_index() {
        let err = <Vec<f64>>::from_arg("fees", &json!([1.0, "two"])).unwrap_err();
        assert!(err.to_string().contains("fees[1]"));
    }

    #[test]
    fn test_mapping_conversion() {
        let map = <BTreeMap<String, f64>>::from_arg("m", &json!({"rent": 1200, "food": 400.5}))
            .unwrap();
        assert_eq!(map.get("food"), Some(&400.5));
        assert_eq!(map.to_arg(), json!({"food": 400.5, "rent": 1200.0}));
    }

    #[test]
    fn test_date_parsing() {
        let date = NaiveDate::from_arg("d", &json!("2020-02-29")).unwrap();
        assert_eq!(date.to_arg(), json!("2020-02-29"));
        assert!(NaiveDate::from_arg("d", &json!("02/29/2020")).is_err());
    }

    #[test]
    fn test_display_matches_annotation_style() {
        assert_eq!(<Vec<f64>>::descriptor().to_string(), "list[float]");
        assert_eq!(Direction::descriptor().to_string(), "Literal['north', 'south']");
    }
}
