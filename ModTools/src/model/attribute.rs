//! Typed attribute values
//!
//! An [`Attribute`] pairs a [`DataType`] with a value in exactly the storage
//! shape that type calls for. Reading or writing the wrong shape is an error.

use uuid::Uuid;

use crate::error::{Error, Result};
use crate::formats::common::{DataType, Shape};
use crate::formats::lsx::LsxAttribute;

/// Stored value of an attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeValue {
    Scalar(String),
    /// Ordered elements; order is meaningful (e.g. spell order).
    List(Vec<String>),
    Handle { handle: String, version: u32 },
}

/// Borrowed view of a non-handle attribute value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Value<'a> {
    Scalar(&'a str),
    List(&'a [String]),
}

/// Loosely-typed input accepted by node builders and setters.
///
/// Coercion into an [`Attribute`] happens against the declared [`DataType`]:
/// text given to a list type is split on the type's delimiter, and text given
/// to a handle type becomes a version-1 handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttrValue {
    Text(String),
    List(Vec<String>),
    Handle { handle: String, version: u32 },
}

impl AttrValue {
    /// A handle/version pair.
    #[must_use]
    pub fn handle(handle: impl Into<String>, version: u32) -> Self {
        AttrValue::Handle {
            handle: handle.into(),
            version,
        }
    }

    fn shape_name(&self) -> &'static str {
        match self {
            AttrValue::Text(_) => Shape::Scalar.describe(),
            AttrValue::List(_) => Shape::List.describe(),
            AttrValue::Handle { .. } => Shape::Handle.describe(),
        }
    }
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        AttrValue::Text(value.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        AttrValue::Text(value)
    }
}

impl From<&String> for AttrValue {
    fn from(value: &String) -> Self {
        AttrValue::Text(value.clone())
    }
}

impl From<Vec<String>> for AttrValue {
    fn from(value: Vec<String>) -> Self {
        AttrValue::List(value)
    }
}

impl From<Vec<&str>> for AttrValue {
    fn from(value: Vec<&str>) -> Self {
        AttrValue::List(value.into_iter().map(str::to_string).collect())
    }
}

impl<const N: usize> From<[&str; N]> for AttrValue {
    fn from(value: [&str; N]) -> Self {
        AttrValue::List(value.iter().map(|s| (*s).to_string()).collect())
    }
}

impl From<bool> for AttrValue {
    fn from(value: bool) -> Self {
        AttrValue::Text(if value { "true" } else { "false" }.to_string())
    }
}

impl From<Uuid> for AttrValue {
    fn from(value: Uuid) -> Self {
        AttrValue::Text(value.hyphenated().to_string())
    }
}

macro_rules! attr_value_from_display {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for AttrValue {
                fn from(value: $ty) -> Self {
                    AttrValue::Text(value.to_string())
                }
            }
        )*
    };
}

attr_value_from_display!(u8, i8, u16, i16, u32, i32, u64, i64, f32, f64);

/// A single typed value bound to a name within a node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    data_type: DataType,
    value: AttributeValue,
}

fn shape_error(data_type: DataType, found: &'static str) -> Error {
    Error::AttributeShape {
        attribute: String::new(),
        data_type,
        found,
    }
}

fn split_list(text: &str, delimiter: char) -> Vec<String> {
    text.split(delimiter)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

impl Attribute {
    /// Creates a scalar attribute. Fails for list and handle types.
    pub fn new_scalar(data_type: DataType, value: impl Into<String>) -> Result<Self> {
        if data_type.shape() != Shape::Scalar {
            return Err(shape_error(data_type, Shape::Scalar.describe()));
        }
        Ok(Attribute {
            data_type,
            value: AttributeValue::Scalar(value.into()),
        })
    }

    /// Creates a list attribute. Fails unless `data_type` is a list type.
    pub fn new_list<I, S>(data_type: DataType, items: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if data_type.shape() != Shape::List {
            return Err(shape_error(data_type, Shape::List.describe()));
        }
        Ok(Attribute {
            data_type,
            value: AttributeValue::List(items.into_iter().map(Into::into).collect()),
        })
    }

    /// Creates a handle attribute. Fails unless `data_type` is a handle type.
    pub fn new_handle(data_type: DataType, handle: impl Into<String>, version: u32) -> Result<Self> {
        if data_type.shape() != Shape::Handle {
            return Err(shape_error(data_type, Shape::Handle.describe()));
        }
        Ok(Attribute {
            data_type,
            value: AttributeValue::Handle {
                handle: handle.into(),
                version,
            },
        })
    }

    /// Coerce builder input to the declared type.
    pub fn from_input(data_type: DataType, input: AttrValue) -> Result<Self> {
        match (data_type.shape(), input) {
            (Shape::Scalar, AttrValue::Text(text)) => Self::new_scalar(data_type, text),
            (Shape::List, AttrValue::Text(text)) => {
                let delimiter = data_type.delimiter().unwrap_or(';');
                Self::new_list(data_type, split_list(&text, delimiter))
            }
            (Shape::List, AttrValue::List(items)) => Self::new_list(data_type, items),
            (Shape::Handle, AttrValue::Text(handle)) => Self::new_handle(data_type, handle, 1),
            (Shape::Handle, AttrValue::Handle { handle, version }) => {
                Self::new_handle(data_type, handle, version)
            }
            (_, other) => Err(shape_error(data_type, other.shape_name())),
        }
    }

    /// Rebuild from an `.lsx` attribute whose type has already been checked.
    pub(crate) fn from_lsx(data_type: DataType, raw: &LsxAttribute, node: &str) -> Result<Self> {
        match data_type.shape() {
            Shape::Scalar => Self::new_scalar(data_type, raw.value.clone()),
            Shape::List => {
                let delimiter = data_type.delimiter().unwrap_or(';');
                Self::new_list(data_type, split_list(&raw.value, delimiter))
            }
            Shape::Handle => {
                let handle = raw.handle.clone().ok_or_else(|| Error::MissingHandle {
                    node: node.to_string(),
                    attribute: raw.id.clone(),
                })?;
                Self::new_handle(data_type, handle, raw.version.unwrap_or(1))
            }
        }
    }

    /// The immutable type tag.
    #[must_use]
    pub fn data_type(&self) -> DataType {
        self.data_type
    }

    /// The raw stored value, whatever its shape.
    #[must_use]
    pub fn raw(&self) -> &AttributeValue {
        &self.value
    }

    /// Scalar or list value. Fails for handle types.
    pub fn value(&self) -> Result<Value<'_>> {
        match &self.value {
            AttributeValue::Scalar(s) => Ok(Value::Scalar(s)),
            AttributeValue::List(items) => Ok(Value::List(items)),
            AttributeValue::Handle { .. } => Err(shape_error(self.data_type, "a value")),
        }
    }

    /// Scalar value. Fails for list and handle types.
    pub fn as_str(&self) -> Result<&str> {
        match &self.value {
            AttributeValue::Scalar(s) => Ok(s),
            _ => Err(shape_error(self.data_type, Shape::Scalar.describe())),
        }
    }

    /// List value. Fails unless this is a list type.
    pub fn as_list(&self) -> Result<&[String]> {
        match &self.value {
            AttributeValue::List(items) => Ok(items),
            _ => Err(shape_error(self.data_type, Shape::List.describe())),
        }
    }

    /// Mutable list value, for in-place patching.
    pub fn list_mut(&mut self) -> Result<&mut Vec<String>> {
        match &mut self.value {
            AttributeValue::List(items) => Ok(items),
            _ => Err(shape_error(self.data_type, Shape::List.describe())),
        }
    }

    /// Localization handle. Fails unless this is a handle type.
    pub fn handle(&self) -> Result<&str> {
        match &self.value {
            AttributeValue::Handle { handle, .. } => Ok(handle),
            _ => Err(shape_error(self.data_type, Shape::Handle.describe())),
        }
    }

    /// Localization version. Fails unless this is a handle type.
    pub fn version(&self) -> Result<u32> {
        match &self.value {
            AttributeValue::Handle { version, .. } => Ok(*version),
            _ => Err(shape_error(self.data_type, Shape::Handle.describe())),
        }
    }

    /// Encode as an `.lsx` attribute element.
    ///
    /// Lists join with the type's own delimiter; handles emit
    /// `handle`/`version` instead of `value`.
    #[must_use]
    pub fn to_lsx(&self, id: &str) -> LsxAttribute {
        let type_name = self.data_type.xml_name();
        match &self.value {
            AttributeValue::Scalar(s) => LsxAttribute::new(id, type_name, s.clone()),
            AttributeValue::List(items) => {
                let delimiter = self.data_type.delimiter().unwrap_or(';');
                LsxAttribute::new(id, type_name, items.join(&delimiter.to_string()))
            }
            AttributeValue::Handle { handle, version } => {
                LsxAttribute::translated(id, type_name, handle.clone(), *version)
            }
        }
    }

    /// Value as written in a stats `data` line.
    ///
    /// Lists always join with `;` here, whatever their XML delimiter.
    #[must_use]
    pub fn stats_value(&self) -> String {
        match &self.value {
            AttributeValue::Scalar(s) => s.clone(),
            AttributeValue::List(items) => items.join(";"),
            AttributeValue::Handle { handle, version } => format!("{handle};{version}"),
        }
    }

    /// A complete stats line: `data "Name" "value"`.
    #[must_use]
    pub fn to_stats_line(&self, name: &str) -> String {
        crate::formats::stats::data_line(name, &self.stats_value())
    }
}
