//! Serializer turning a callback data struct into `(field, encoded value)` pairs.

use serde::ser::{self, Impossible, Serialize, SerializeStruct};

use crate::error::{CallbackDataError, Result};

type Parts = Vec<(String, String)>;

pub(crate) fn to_parts<T>(value: &T) -> Result<Parts>
where
    T: ?Sized + Serialize,
{
    value.serialize(RootSerializer)
}

fn not_a_struct<T>() -> Result<T> {
    Err(CallbackDataError::Message(
        "callback data must be a struct with named fields".to_string(),
    ))
}

/// Accepts only structs (and unit structs, which have no fields).
struct RootSerializer;

macro_rules! reject_root {
    ($($method:ident($($arg:ty),*);)*) => {
        $(
            fn $method(self, $(_: $arg),*) -> Result<Parts> {
                not_a_struct()
            }
        )*
    };
}

impl ser::Serializer for RootSerializer {
    type Ok = Parts;
    type Error = CallbackDataError;
    type SerializeSeq = Impossible<Parts, CallbackDataError>;
    type SerializeTuple = Impossible<Parts, CallbackDataError>;
    type SerializeTupleStruct = Impossible<Parts, CallbackDataError>;
    type SerializeTupleVariant = Impossible<Parts, CallbackDataError>;
    type SerializeMap = Impossible<Parts, CallbackDataError>;
    type SerializeStruct = FieldCollector;
    type SerializeStructVariant = Impossible<Parts, CallbackDataError>;

    reject_root! {
        serialize_bool(bool);
        serialize_i8(i8);
        serialize_i16(i16);
        serialize_i32(i32);
        serialize_i64(i64);
        serialize_u8(u8);
        serialize_u16(u16);
        serialize_u32(u32);
        serialize_u64(u64);
        serialize_f32(f32);
        serialize_f64(f64);
        serialize_char(char);
        serialize_str(&str);
        serialize_bytes(&[u8]);
        serialize_none();
        serialize_unit();
        serialize_unit_variant(&'static str, u32, &'static str);
    }

    fn serialize_some<T>(self, _value: &T) -> Result<Parts>
    where
        T: ?Sized + Serialize,
    {
        not_a_struct()
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<Parts> {
        Ok(Vec::new())
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<Parts>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _value: &T,
    ) -> Result<Parts>
    where
        T: ?Sized + Serialize,
    {
        not_a_struct()
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<Self::SerializeSeq> {
        not_a_struct()
    }

    fn serialize_tuple(self, _len: usize) -> Result<Self::SerializeTuple> {
        not_a_struct()
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleStruct> {
        not_a_struct()
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant> {
        not_a_struct()
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<Self::SerializeMap> {
        not_a_struct()
    }

    fn serialize_struct(self, _name: &'static str, len: usize) -> Result<FieldCollector> {
        Ok(FieldCollector {
            parts: Vec::with_capacity(len),
        })
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant> {
        not_a_struct()
    }
}

pub(crate) struct FieldCollector {
    parts: Parts,
}

impl SerializeStruct for FieldCollector {
    type Ok = Parts;
    type Error = CallbackDataError;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let encoded = value.serialize(ValueSerializer { key })?;
        self.parts.push((key.to_string(), encoded));
        Ok(())
    }

    fn end(self) -> Result<Parts> {
        Ok(self.parts)
    }
}

/// Encodes a single field value.
struct ValueSerializer {
    key: &'static str,
}

impl ValueSerializer {
    fn unsupported<T>(&self, kind: &'static str) -> Result<T> {
        Err(CallbackDataError::Unsupported {
            key: self.key.to_string(),
            kind,
        })
    }
}

macro_rules! display_value {
    ($($method:ident($ty:ty);)*) => {
        $(
            fn $method(self, v: $ty) -> Result<String> {
                Ok(v.to_string())
            }
        )*
    };
}

impl ser::Serializer for ValueSerializer {
    type Ok = String;
    type Error = CallbackDataError;
    type SerializeSeq = Impossible<String, CallbackDataError>;
    type SerializeTuple = Impossible<String, CallbackDataError>;
    type SerializeTupleStruct = Impossible<String, CallbackDataError>;
    type SerializeTupleVariant = Impossible<String, CallbackDataError>;
    type SerializeMap = Impossible<String, CallbackDataError>;
    type SerializeStruct = Impossible<String, CallbackDataError>;
    type SerializeStructVariant = Impossible<String, CallbackDataError>;

    fn serialize_bool(self, v: bool) -> Result<String> {
        Ok(if v { "1" } else { "0" }.to_string())
    }

    display_value! {
        serialize_i8(i8);
        serialize_i16(i16);
        serialize_i32(i32);
        serialize_i64(i64);
        serialize_i128(i128);
        serialize_u8(u8);
        serialize_u16(u16);
        serialize_u32(u32);
        serialize_u64(u64);
        serialize_u128(u128);
        serialize_f32(f32);
        serialize_f64(f64);
        serialize_char(char);
        serialize_str(&str);
    }

    fn serialize_bytes(self, _v: &[u8]) -> Result<String> {
        self.unsupported("bytes")
    }

    fn serialize_none(self) -> Result<String> {
        Ok(String::new())
    }

    fn serialize_some<T>(self, value: &T) -> Result<String>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<String> {
        Ok(String::new())
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<String> {
        Ok(String::new())
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<String> {
        Ok(variant.to_string())
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<String>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _value: &T,
    ) -> Result<String>
    where
        T: ?Sized + Serialize,
    {
        self.unsupported("enum variant with data")
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<Self::SerializeSeq> {
        self.unsupported("sequence")
    }

    fn serialize_tuple(self, _len: usize) -> Result<Self::SerializeTuple> {
        self.unsupported("tuple")
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleStruct> {
        self.unsupported("tuple struct")
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant> {
        self.unsupported("enum variant with data")
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<Self::SerializeMap> {
        self.unsupported("map")
    }

    fn serialize_struct(self, _name: &'static str, _len: usize) -> Result<Self::SerializeStruct> {
        self.unsupported("struct")
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant> {
        self.unsupported("enum variant with data")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;

    #[derive(Serialize)]
    #[serde(rename_all = "lowercase")]
    enum Color {
        Red,
    }

    #[derive(Serialize)]
    struct Sample {
        flag: bool,
        count: i32,
        ratio: f64,
        name: String,
        missing: Option<u8>,
        color: Color,
    }

    #[test]
    fn test_to_parts_encodes_in_declaration_order() {
        let parts = to_parts(&Sample {
            flag: true,
            count: -3,
            ratio: 1.5,
            name: "abc".to_string(),
            missing: None,
            color: Color::Red,
        })
        .unwrap();
        let values: Vec<&str> = parts.iter().map(|(_, v)| v.as_str()).collect();
        assert_eq!(values, ["1", "-3", "1.5", "abc", "", "red"]);
        assert_eq!(parts[0].0, "flag");
    }

    #[test]
    fn test_to_parts_rejects_nested_collections() {
        #[derive(Serialize)]
        struct WithList {
            items: Vec<u8>,
        }
        let err = to_parts(&WithList { items: vec![1] }).unwrap_err();
        assert_eq!(
            err,
            CallbackDataError::Unsupported {
                key: "items".to_string(),
                kind: "sequence"
            }
        );
    }

    #[test]
    fn test_to_parts_rejects_non_struct() {
        assert!(to_parts(&42u8).is_err());
    }
}
