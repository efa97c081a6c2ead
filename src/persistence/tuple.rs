use std::cmp::Ordering;
use std::fmt::Display;
use std::ops::Index;

use serde::{Deserialize, Serialize};

use super::schema::DomainType;

/// A single attribute value, tagged with its domain.
///
/// Values are totally ordered so they can take part in a [`super::KeyValue`]:
/// two values of the same domain compare naturally (floating point values by
/// their IEEE total order), values of different domains compare by the
/// declaration order of [`DomainType`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Value {
    Integer(i32),
    Long(i64),
    Short(i16),
    Byte(i8),
    Double(#[serde(with = "float_text::double")] f64),
    Float(#[serde(with = "float_text::float")] f32),
    Character(char),
    String(String),
}

impl Value {
    /// Returns the domain this value belongs to.
    pub fn domain(&self) -> DomainType {
        match self {
            Value::Integer(_) => DomainType::Integer,
            Value::Long(_) => DomainType::Long,
            Value::Short(_) => DomainType::Short,
            Value::Byte(_) => DomainType::Byte,
            Value::Double(_) => DomainType::Double,
            Value::Float(_) => DomainType::Float,
            Value::Character(_) => DomainType::Character,
            Value::String(_) => DomainType::String,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Value {}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Value {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Value::Integer(a), Value::Integer(b)) => a.cmp(b),
            (Value::Long(a), Value::Long(b)) => a.cmp(b),
            (Value::Short(a), Value::Short(b)) => a.cmp(b),
            (Value::Byte(a), Value::Byte(b)) => a.cmp(b),
            (Value::Double(a), Value::Double(b)) => a.total_cmp(b),
            (Value::Float(a), Value::Float(b)) => a.total_cmp(b),
            (Value::Character(a), Value::Character(b)) => a.cmp(b),
            (Value::String(a), Value::String(b)) => a.cmp(b),
            _ => self.domain().cmp(&other.domain()),
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Integer(v) => write!(f, "{}", v),
            Value::Long(v) => write!(f, "{}", v),
            Value::Short(v) => write!(f, "{}", v),
            Value::Byte(v) => write!(f, "{}", v),
            Value::Double(v) => write!(f, "{:?}", v),
            Value::Float(v) => write!(f, "{:?}", v),
            Value::Character(v) => write!(f, "{}", v),
            Value::String(v) => write!(f, "{}", v),
        }
    }
}

macro_rules! value_from {
    ($($source:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$source> for Value {
                fn from(value: $source) -> Self {
                    Value::$variant(value)
                }
            }
        )*
    };
}

value_from! {
    i32 => Integer,
    i64 => Long,
    i16 => Short,
    i8 => Byte,
    f64 => Double,
    f32 => Float,
    char => Character,
    String => String,
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

/// Serde helpers for the floating point variants.
///
/// JSON has no NaN or infinity, so finite values are written as numbers and
/// the rest as the strings `NaN`, `-NaN`, `inf` and `-inf`.
mod float_text {
    use serde::de::Error;
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Number(f64),
        Text(String),
    }

    fn non_finite_text(is_nan: bool, is_negative: bool) -> &'static str {
        match (is_nan, is_negative) {
            (true, false) => "NaN",
            (true, true) => "-NaN",
            (false, false) => "inf",
            (false, true) => "-inf",
        }
    }

    fn read<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        match Repr::deserialize(deserializer)? {
            Repr::Number(number) => Ok(number),
            Repr::Text(text) => match text.as_str() {
                "NaN" => Ok(f64::NAN),
                "-NaN" => Ok(-f64::NAN),
                "inf" => Ok(f64::INFINITY),
                "-inf" => Ok(f64::NEG_INFINITY),
                other => Err(D::Error::custom(format!("invalid float {}", other))),
            },
        }
    }

    pub(super) mod double {
        use serde::{Deserializer, Serializer};

        pub fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
            if value.is_finite() {
                serializer.serialize_f64(*value)
            } else {
                serializer.serialize_str(super::non_finite_text(
                    value.is_nan(),
                    value.is_sign_negative(),
                ))
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
            super::read(deserializer)
        }
    }

    pub(super) mod float {
        use serde::{Deserializer, Serializer};

        pub fn serialize<S: Serializer>(value: &f32, serializer: S) -> Result<S::Ok, S::Error> {
            if value.is_finite() {
                serializer.serialize_f32(*value)
            } else {
                serializer.serialize_str(super::non_finite_text(
                    value.is_nan(),
                    value.is_sign_negative(),
                ))
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f32, D::Error> {
            // f32 -> f64 -> f32 is exact
            super::read(deserializer).map(|value| value as f32)
        }
    }
}

/// One row: an ordered sequence of values, positionally matching a schema.
///
/// Tuples are never edited once they sit in a table; operators build new
/// ones.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Tuple(pub Vec<Value>);

impl Tuple {
    pub fn new(values: Vec<Value>) -> Tuple {
        Tuple(values)
    }

    pub fn get(&self, index: usize) -> Option<&Value> {
        self.0.get(index)
    }

    pub fn values(&self) -> &[Value] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub(crate) fn pick(&self, positions: &[usize]) -> Vec<Value> {
        //! Copy the values at `positions`, in that order.

        positions.iter().map(|&index| self.0[index].clone()).collect()
    }

    pub(crate) fn concat(&self, other: &Tuple) -> Tuple {
        let mut values = Vec::with_capacity(self.len() + other.len());
        values.extend(self.0.iter().cloned());
        values.extend(other.0.iter().cloned());
        Tuple(values)
    }
}

impl Index<usize> for Tuple {
    type Output = Value;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl From<Vec<Value>> for Tuple {
    fn from(values: Vec<Value>) -> Self {
        Tuple(values)
    }
}

impl Display for Tuple {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let row: Vec<String> = self.0.iter().map(|value| value.to_string()).collect();
        write!(f, "[{}]", row.join(", "))
    }
}

/// Build a [`Tuple`] from literals, converting each through [`Value::from`].
///
/// ```
/// use relation_engine::tuple;
///
/// let film = tuple!["Star_Wars", 1977, 124];
/// assert_eq!(film.len(), 3);
/// ```
#[macro_export]
macro_rules! tuple {
    ($($value:expr),* $(,)?) => {
        $crate::persistence::Tuple::new(vec![$($crate::persistence::Value::from($value)),*])
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literals_keep_their_exact_domain() {
        assert_eq!(Value::from(1977).domain(), DomainType::Integer);
        assert_eq!(Value::from(1977i64).domain(), DomainType::Long);
        assert_eq!(Value::from(10000.0).domain(), DomainType::Double);
        assert_eq!(Value::from('F').domain(), DomainType::Character);
    }

    #[test]
    fn values_of_different_domains_are_never_equal() {
        assert_ne!(Value::Integer(1), Value::Long(1));
        assert!(Value::Integer(5) < Value::Long(1));
    }

    #[test]
    fn floating_point_values_are_totally_ordered() {
        assert_eq!(Value::Double(f64::NAN), Value::Double(f64::NAN));
        assert!(Value::Double(1.5) < Value::Double(2.0));
    }

    #[test]
    fn non_finite_floats_are_written_as_text() {
        let values = vec![
            Value::Double(f64::NAN),
            Value::Double(f64::INFINITY),
            Value::Float(f32::NEG_INFINITY),
            Value::Float(2.5),
        ];

        let json = serde_json::to_string(&values).unwrap();
        assert_eq!(
            json,
            r#"[{"Double":"NaN"},{"Double":"inf"},{"Float":"-inf"},{"Float":2.5}]"#
        );

        let read: Vec<Value> = serde_json::from_str(&json).unwrap();
        assert_eq!(read, values);
    }

    #[test]
    fn unknown_float_text_is_rejected() {
        assert!(serde_json::from_str::<Value>(r#"{"Double":"huge"}"#).is_err());
    }

    #[test]
    fn tuple_display_lists_values() {
        let film = Tuple::new(vec![Value::from("Rocky"), Value::from(1985)]);
        assert_eq!(film.to_string(), "[Rocky, 1985]");
    }
}
