//! Deserializer building a callback data struct from the separated values.

use serde::de::{self, DeserializeOwned, DeserializeSeed, MapAccess, Visitor};
use serde::forward_to_deserialize_any;

use crate::error::{CallbackDataError, Result};

/// Deserializes `T` from `values` (prefix already stripped).
///
/// `check(expected, given)` runs once the number of declared fields is known, before any value
/// is parsed; it is where argument count and prefix are validated.
pub(crate) fn from_parts<T, F>(values: &[&str], check: F) -> Result<T>
where
    T: DeserializeOwned,
    F: FnOnce(usize, usize) -> Result<()>,
{
    T::deserialize(RootDeserializer { values, check })
}

struct RootDeserializer<'a, F> {
    values: &'a [&'a str],
    check: F,
}

impl<'de, F> de::Deserializer<'de> for RootDeserializer<'de, F>
where
    F: FnOnce(usize, usize) -> Result<()>,
{
    type Error = CallbackDataError;

    fn deserialize_any<V: Visitor<'de>>(self, _visitor: V) -> Result<V::Value> {
        Err(CallbackDataError::Message(
            "callback data must be a struct with named fields".to_string(),
        ))
    }

    fn deserialize_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        fields: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value> {
        (self.check)(fields.len(), self.values.len())?;
        visitor.visit_map(FieldValues {
            fields: fields.iter(),
            values: self.values.iter(),
            current: None,
        })
    }

    fn deserialize_unit_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        visitor: V,
    ) -> Result<V::Value> {
        (self.check)(0, self.values.len())?;
        visitor.visit_unit()
    }

    fn deserialize_newtype_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        visitor: V,
    ) -> Result<V::Value> {
        visitor.visit_newtype_struct(self)
    }

    forward_to_deserialize_any! {
        bool i8 i16 i32 i64 i128 u8 u16 u32 u64 u128 f32 f64 char str string
        bytes byte_buf option unit seq tuple tuple_struct map enum identifier ignored_any
    }
}

struct FieldValues<'de> {
    fields: std::slice::Iter<'static, &'static str>,
    values: std::slice::Iter<'de, &'de str>,
    current: Option<&'static str>,
}

impl<'de> MapAccess<'de> for FieldValues<'de> {
    type Error = CallbackDataError;

    fn next_key_seed<K: DeserializeSeed<'de>>(&mut self, seed: K) -> Result<Option<K::Value>> {
        match self.fields.next() {
            Some(field) => {
                self.current = Some(*field);
                let key: de::value::BorrowedStrDeserializer<'de, CallbackDataError> =
                    de::value::BorrowedStrDeserializer::new(field);
                seed.deserialize(key).map(Some)
            }
            None => Ok(None),
        }
    }

    fn next_value_seed<V: DeserializeSeed<'de>>(&mut self, seed: V) -> Result<V::Value> {
        let key = self.current.take().unwrap_or_default();
        let value = self.values.next().copied().unwrap_or_default();
        seed.deserialize(ValueDeserializer { key, value })
            .map_err(|e| match e {
                CallbackDataError::Message(message) => CallbackDataError::InvalidValue {
                    key: key.to_string(),
                    message,
                },
                other => other,
            })
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.fields.len())
    }
}

/// Parses a single separated value into the field's type.
struct ValueDeserializer<'de> {
    key: &'static str,
    value: &'de str,
}

impl ValueDeserializer<'_> {
    fn invalid<T>(&self, expected: &str) -> Result<T> {
        Err(CallbackDataError::InvalidValue {
            key: self.key.to_string(),
            message: format!("expected {}, got {:?}", expected, self.value),
        })
    }
}

macro_rules! parse_value {
    ($($method:ident => $visit:ident($ty:ty);)*) => {
        $(
            fn $method<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
                match self.value.parse::<$ty>() {
                    Ok(v) => visitor.$visit(v),
                    Err(_) => self.invalid(stringify!($ty)),
                }
            }
        )*
    };
}

impl<'de> de::Deserializer<'de> for ValueDeserializer<'de> {
    type Error = CallbackDataError;

    fn deserialize_any<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        visitor.visit_borrowed_str(self.value)
    }

    fn deserialize_bool<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        match self.value.to_ascii_lowercase().as_str() {
            "1" | "true" | "t" | "yes" | "y" | "on" => visitor.visit_bool(true),
            "0" | "false" | "f" | "no" | "n" | "off" => visitor.visit_bool(false),
            _ => self.invalid("bool"),
        }
    }

    parse_value! {
        deserialize_i8 => visit_i8(i8);
        deserialize_i16 => visit_i16(i16);
        deserialize_i32 => visit_i32(i32);
        deserialize_i64 => visit_i64(i64);
        deserialize_i128 => visit_i128(i128);
        deserialize_u8 => visit_u8(u8);
        deserialize_u16 => visit_u16(u16);
        deserialize_u32 => visit_u32(u32);
        deserialize_u64 => visit_u64(u64);
        deserialize_u128 => visit_u128(u128);
        deserialize_f32 => visit_f32(f32);
        deserialize_f64 => visit_f64(f64);
        deserialize_char => visit_char(char);
    }

    fn deserialize_str<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        visitor.visit_borrowed_str(self.value)
    }

    fn deserialize_string<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        visitor.visit_string(self.value.to_string())
    }

    fn deserialize_bytes<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        visitor.visit_borrowed_bytes(self.value.as_bytes())
    }

    fn deserialize_byte_buf<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        visitor.visit_byte_buf(self.value.as_bytes().to_vec())
    }

    fn deserialize_option<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        if self.value.is_empty() {
            visitor.visit_none()
        } else {
            visitor.visit_some(self)
        }
    }

    fn deserialize_unit<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        if self.value.is_empty() {
            visitor.visit_unit()
        } else {
            self.invalid("empty value")
        }
    }

    fn deserialize_unit_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        visitor: V,
    ) -> Result<V::Value> {
        self.deserialize_unit(visitor)
    }

    fn deserialize_newtype_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        visitor: V,
    ) -> Result<V::Value> {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_enum<V: Visitor<'de>>(
        self,
        _name: &'static str,
        _variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value> {
        let variant: de::value::BorrowedStrDeserializer<'de, CallbackDataError> =
            de::value::BorrowedStrDeserializer::new(self.value);
        visitor.visit_enum(variant)
    }

    fn deserialize_seq<V: Visitor<'de>>(self, _visitor: V) -> Result<V::Value> {
        self.invalid("a single value")
    }

    fn deserialize_tuple<V: Visitor<'de>>(self, _len: usize, _visitor: V) -> Result<V::Value> {
        self.invalid("a single value")
    }

    fn deserialize_tuple_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        _len: usize,
        _visitor: V,
    ) -> Result<V::Value> {
        self.invalid("a single value")
    }

    fn deserialize_map<V: Visitor<'de>>(self, _visitor: V) -> Result<V::Value> {
        self.invalid("a single value")
    }

    fn deserialize_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        _fields: &'static [&'static str],
        _visitor: V,
    ) -> Result<V::Value> {
        self.invalid("a single value")
    }

    fn deserialize_identifier<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        visitor.visit_borrowed_str(self.value)
    }

    fn deserialize_ignored_any<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        visitor.visit_unit()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Sample {
        flag: bool,
        count: i32,
        name: String,
        missing: Option<u8>,
    }

    fn accept(_: usize, _: usize) -> Result<()> {
        Ok(())
    }

    #[test]
    fn test_from_parts_parses_typed_values() {
        let sample: Sample = from_parts(&["yes", "-7", "", ""], accept).unwrap();
        assert_eq!(
            sample,
            Sample {
                flag: true,
                count: -7,
                name: String::new(),
                missing: None,
            }
        );
    }

    #[test]
    fn test_from_parts_reports_field_on_parse_error() {
        let err = from_parts::<Sample, _>(&["1", "x", "a", ""], accept).unwrap_err();
        assert!(matches!(err, CallbackDataError::InvalidValue { ref key, .. } if key == "count"));
    }

    #[test]
    fn test_from_parts_check_sees_field_and_value_counts() {
        let err = from_parts::<Sample, _>(&["1"], |expected, given| {
            assert_eq!((expected, given), (4, 1));
            Err(CallbackDataError::EmptyPrefix)
        })
        .unwrap_err();
        assert_eq!(err, CallbackDataError::EmptyPrefix);
    }
}
