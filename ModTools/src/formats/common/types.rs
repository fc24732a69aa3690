//! Attribute type tags shared by the LSX and stats serializers

use std::fmt;

/// Primitive type of an attribute value.
///
/// The tag fixes the storage shape of an [`Attribute`](crate::model::Attribute):
/// scalars hold one string, list types hold an ordered `Vec<String>`, and
/// translated strings hold a handle and version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataType {
    UInt8,
    Int8,
    UInt16,
    Int16,
    UInt32,
    Int32,
    UInt64,
    Int64,
    Float,
    Double,
    Bool,
    IVec2,
    IVec3,
    IVec4,
    FVec2,
    FVec3,
    FVec4,
    FixedString,
    LSString,
    String,
    Guid,
    /// Handle + version pair referencing a localization entry.
    TranslatedString,
    /// `LSString` holding a `;`-delimited list.
    StringList,
    /// `LSString` holding a `,`-delimited list.
    CommaList,
}

/// Storage shape implied by a [`DataType`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Scalar,
    List,
    Handle,
}

impl Shape {
    /// Short description used in error messages.
    #[must_use]
    pub fn describe(self) -> &'static str {
        match self {
            Shape::Scalar => "a scalar",
            Shape::List => "a list",
            Shape::Handle => "a handle",
        }
    }
}

impl DataType {
    /// The storage shape values of this type use.
    #[must_use]
    pub fn shape(self) -> Shape {
        match self {
            DataType::TranslatedString => Shape::Handle,
            DataType::StringList | DataType::CommaList => Shape::List,
            _ => Shape::Scalar,
        }
    }

    /// Element delimiter inside an XML `value` for list types.
    #[must_use]
    pub fn delimiter(self) -> Option<char> {
        match self {
            DataType::StringList => Some(';'),
            DataType::CommaList => Some(','),
            _ => None,
        }
    }

    /// The `type="..."` name written to `.lsx` files.
    ///
    /// Both list variants are stored by the engine as `LSString`.
    #[must_use]
    pub fn xml_name(self) -> &'static str {
        match self {
            DataType::UInt8 => "uint8",
            DataType::Int8 => "int8",
            DataType::UInt16 => "uint16",
            DataType::Int16 => "int16",
            DataType::UInt32 => "uint32",
            DataType::Int32 => "int32",
            DataType::UInt64 => "uint64",
            DataType::Int64 => "int64",
            DataType::Float => "float",
            DataType::Double => "double",
            DataType::Bool => "bool",
            DataType::IVec2 => "ivec2",
            DataType::IVec3 => "ivec3",
            DataType::IVec4 => "ivec4",
            DataType::FVec2 => "fvec2",
            DataType::FVec3 => "fvec3",
            DataType::FVec4 => "fvec4",
            DataType::FixedString => "FixedString",
            DataType::LSString | DataType::StringList | DataType::CommaList => "LSString",
            DataType::String => "string",
            DataType::Guid => "guid",
            DataType::TranslatedString => "TranslatedString",
        }
    }

    /// Canonical XML type name for a type name or one of its LSLib aliases.
    ///
    /// Returns `None` for names this crate has no type for.
    #[must_use]
    pub fn canonical_xml_name(type_name: &str) -> Option<&'static str> {
        let name = match type_name {
            "uint8" | "Byte" => "uint8",
            "int8" | "Int8" => "int8",
            "uint16" | "UShort" => "uint16",
            "int16" | "Short" => "int16",
            "uint32" | "UInt" => "uint32",
            "int32" | "Int" => "int32",
            "uint64" | "ULongLong" => "uint64",
            "int64" | "Int64" | "old_int64" | "Long" => "int64",
            "float" | "Float" => "float",
            "double" | "Double" => "double",
            "bool" | "Bool" => "bool",
            "ivec2" | "IVec2" => "ivec2",
            "ivec3" | "IVec3" => "ivec3",
            "ivec4" | "IVec4" => "ivec4",
            "fvec2" | "Vec2" => "fvec2",
            "fvec3" | "Vec3" => "fvec3",
            "fvec4" | "Vec4" => "fvec4",
            "FixedString" => "FixedString",
            "LSString" | "LSWString" => "LSString",
            "string" | "String" | "WString" => "string",
            "guid" | "UUID" => "guid",
            "TranslatedString" | "TranslatedFSString" => "TranslatedString",
            _ => return None,
        };
        Some(name)
    }

    /// Whether an XML `type` attribute is acceptable for this type.
    #[must_use]
    pub fn accepts_xml_type(self, type_name: &str) -> bool {
        Self::canonical_xml_name(type_name) == Some(self.xml_name())
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataType::StringList => f.write_str("LSString[;]"),
            DataType::CommaList => f.write_str("LSString[,]"),
            other => f.write_str(other.xml_name()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_types_share_lsstring() {
        assert_eq!(DataType::StringList.xml_name(), "LSString");
        assert_eq!(DataType::CommaList.xml_name(), "LSString");
        assert_eq!(DataType::StringList.delimiter(), Some(';'));
        assert_eq!(DataType::CommaList.delimiter(), Some(','));
        assert_eq!(DataType::LSString.delimiter(), None);
    }

    #[test]
    fn test_aliases() {
        assert!(DataType::Guid.accepts_xml_type("UUID"));
        assert!(DataType::Int32.accepts_xml_type("Int"));
        assert!(DataType::TranslatedString.accepts_xml_type("TranslatedFSString"));
        assert!(!DataType::FixedString.accepts_xml_type("LSString"));
        assert!(!DataType::Guid.accepts_xml_type("mystery"));
    }

    #[test]
    fn test_shapes() {
        assert_eq!(DataType::TranslatedString.shape(), Shape::Handle);
        assert_eq!(DataType::CommaList.shape(), Shape::List);
        assert_eq!(DataType::Guid.shape(), Shape::Scalar);
    }
}
