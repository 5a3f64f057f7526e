//! Content classification for success payloads.
//!
//! Adapters that write an outcome to the wire pick a representation from the
//! payload's declared type:
//!
//! | payload type                                              | category    |
//! |-----------------------------------------------------------|-------------|
//! | `String`, `&'static str`, `Box<str>`, `Cow<'static, str>` | `PlainText` |
//! | `Vec<u8>`, `&'static [u8]`, `Box<[u8]>`, `Bytes`, `ByteStream` | `Binary` |
//! | `XmlDocument`, `XmlElement`                               | `Xml`       |
//! | anything else                                             | `Json`      |

use bytes::Bytes;
use futures::stream::{BoxStream, Stream, StreamExt};
use serde::{Serialize, Serializer};
use std::any::TypeId;
use std::borrow::Cow;

/// Wire representation chosen for a success payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentCategory {
    /// UTF-8 text written as-is.
    PlainText,
    /// Raw bytes or a byte stream.
    Binary,
    /// An XML document or element.
    Xml,
    /// Serialized as JSON.
    Json,
}

impl ContentCategory {
    /// Classify a payload type.
    ///
    /// # Examples
    ///
    /// ```
    /// use outcome_core::ContentCategory;
    ///
    /// assert_eq!(ContentCategory::of::<String>(), ContentCategory::PlainText);
    /// assert_eq!(ContentCategory::of::<Vec<u8>>(), ContentCategory::Binary);
    /// assert_eq!(ContentCategory::of::<Vec<u32>>(), ContentCategory::Json);
    /// ```
    #[must_use]
    pub fn of<T: ?Sized + 'static>() -> Self {
        let id = TypeId::of::<T>();

        let text = [
            TypeId::of::<String>(),
            TypeId::of::<str>(),
            TypeId::of::<&'static str>(),
            TypeId::of::<Box<str>>(),
            TypeId::of::<Cow<'static, str>>(),
        ];
        let binary = [
            TypeId::of::<Vec<u8>>(),
            TypeId::of::<[u8]>(),
            TypeId::of::<&'static [u8]>(),
            TypeId::of::<Box<[u8]>>(),
            TypeId::of::<Bytes>(),
            TypeId::of::<ByteStream>(),
        ];
        let xml = [TypeId::of::<XmlDocument>(), TypeId::of::<XmlElement>()];

        if text.contains(&id) {
            Self::PlainText
        } else if binary.contains(&id) {
            Self::Binary
        } else if xml.contains(&id) {
            Self::Xml
        } else {
            Self::Json
        }
    }

    /// Media type written for this category.
    #[must_use]
    pub const fn media_type(self) -> &'static str {
        match self {
            Self::PlainText => "text/plain; charset=utf-8",
            Self::Binary => "application/octet-stream",
            Self::Xml => "application/xml",
            Self::Json => "application/json",
        }
    }
}

/// Whether a payload type carries nothing, so success maps to "no content".
#[must_use]
pub fn is_empty_payload<T: ?Sized + 'static>() -> bool {
    TypeId::of::<T>() == TypeId::of::<()>()
}

/// A serialized XML document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlDocument(String);

impl XmlDocument {
    /// Wrap serialized XML.
    #[must_use]
    pub fn new(xml: impl Into<String>) -> Self {
        Self(xml.into())
    }

    /// The XML text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Take the XML text.
    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

/// A serialized XML element, written without a prolog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlElement(String);

impl XmlElement {
    /// Wrap a serialized element.
    #[must_use]
    pub fn new(xml: impl Into<String>) -> Self {
        Self(xml.into())
    }

    /// The XML text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Take the XML text.
    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl Serialize for XmlDocument {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl Serialize for XmlElement {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

/// A streamed binary payload.
pub struct ByteStream(BoxStream<'static, Result<Bytes, std::io::Error>>);

impl ByteStream {
    /// Wrap a stream of byte chunks.
    pub fn new<S>(stream: S) -> Self
    where
        S: Stream<Item = Result<Bytes, std::io::Error>> + Send + 'static,
    {
        Self(stream.boxed())
    }

    /// Take the underlying stream.
    #[must_use]
    pub fn into_inner(self) -> BoxStream<'static, Result<Bytes, std::io::Error>> {
        self.0
    }
}

impl std::fmt::Debug for ByteStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ByteStream(<stream>)")
    }
}

/// Streams are written as raw bodies; there is no JSON form.
impl Serialize for ByteStream {
    fn serialize<S: Serializer>(&self, _serializer: S) -> Result<S::Ok, S::Error> {
        Err(serde::ser::Error::custom(
            "byte streams are written as raw bodies and cannot be serialized",
        ))
    }
}

#[cfg(feature = "schemars")]
mod schema {
    use super::{ByteStream, XmlDocument, XmlElement};
    use schemars::{JsonSchema, Schema, SchemaGenerator, json_schema};
    use std::borrow::Cow;

    impl JsonSchema for XmlDocument {
        fn schema_name() -> Cow<'static, str> {
            "XmlDocument".into()
        }

        fn json_schema(_: &mut SchemaGenerator) -> Schema {
            json_schema!({ "type": "string", "contentMediaType": "application/xml" })
        }
    }

    impl JsonSchema for XmlElement {
        fn schema_name() -> Cow<'static, str> {
            "XmlElement".into()
        }

        fn json_schema(_: &mut SchemaGenerator) -> Schema {
            json_schema!({ "type": "string", "contentMediaType": "application/xml" })
        }
    }

    impl JsonSchema for ByteStream {
        fn schema_name() -> Cow<'static, str> {
            "ByteStream".into()
        }

        fn json_schema(_: &mut SchemaGenerator) -> Schema {
            json_schema!({ "type": "string", "format": "binary" })
        }
    }
}
