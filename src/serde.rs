//! Both value types serialize as their text form and deserialize from a
//! string or bytes holding it.

use crate::error::ParseError;
use crate::{Date, FormattedTime, TimeFormat};
use serde::de::{self, Deserialize, Deserializer, Visitor};
use serde::ser::{Serialize, Serializer};
use std::fmt::{self, Formatter};
use std::marker::PhantomData;

trait UnmarshalText: Default {
    fn unmarshal_text(&mut self, data: &[u8]) -> Result<(), ParseError>;
    fn expecting(f: &mut Formatter<'_>) -> fmt::Result;
}

impl UnmarshalText for Date {
    fn unmarshal_text(&mut self, data: &[u8]) -> Result<(), ParseError> {
        Date::unmarshal_text(self, data)
    }

    fn expecting(f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "a date formatted as {:?}", Date::LAYOUT)
    }
}

impl<F: TimeFormat> UnmarshalText for FormattedTime<F> {
    fn unmarshal_text(&mut self, data: &[u8]) -> Result<(), ParseError> {
        FormattedTime::unmarshal_text(self, data)
    }

    fn expecting(f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "a timestamp formatted as {:?}", F::LAYOUT)
    }
}

struct TextVisitor<T>(PhantomData<T>);

impl<'de, T: UnmarshalText> Visitor<'de> for TextVisitor<T> {
    type Value = T;

    fn expecting(&self, f: &mut Formatter<'_>) -> fmt::Result {
        T::expecting(f)
    }

    #[inline]
    fn visit_bytes<E: de::Error>(self, value: &[u8]) -> Result<T, E> {
        let mut t = T::default();
        t.unmarshal_text(value).map_err(de::Error::custom)?;
        Ok(t)
    }

    #[inline]
    fn visit_str<E: de::Error>(self, value: &str) -> Result<T, E> {
        self.visit_bytes(value.as_bytes())
    }
}

impl Serialize for Date {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Date {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_str(TextVisitor(PhantomData))
    }
}

impl<F: TimeFormat> Serialize for FormattedTime<F> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de, F: TimeFormat> Deserialize<'de> for FormattedTime<F> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_str(TextVisitor(PhantomData))
    }
}
