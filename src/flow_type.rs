//! Mapping from protobuf field types to Flow type expressions.

use std::fmt;

use crate::descriptor::{Field, FieldKind, Label};

/// Placeholder for types with no Flow counterpart.
pub const ANY: &str = "any";

/// Placeholder for enum fields, whose values are not mapped.
pub const UNKNOWN_TYPE: &str = "UNKNOWN TYPE";

/// The Flow type of a single field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldType {
    pub base: BaseType,
    pub label: Label,
}

impl FieldType {
    /// The reason this field could not be mapped, if any.
    pub fn unsupported(&self) -> Option<Unsupported> {
        match self.base {
            BaseType::Unsupported(reason) => Some(reason),
            _ => None,
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.base)?;
        if self.label == Label::Repeated {
            f.write_str("[]")?;
        }
        Ok(())
    }
}

/// The element type, before any array suffix.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BaseType {
    Number,
    /// Strings, 64-bit integers and timestamps.
    String,
    Boolean,
    /// A message in the same package, referenced by its local name.
    Local(String),
    Unsupported(Unsupported),
}

impl fmt::Display for BaseType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            BaseType::Number => f.write_str("number"),
            BaseType::String => f.write_str("string"),
            BaseType::Boolean => f.write_str("boolean"),
            BaseType::Local(name) => f.write_str(name),
            BaseType::Unsupported(reason) => f.write_str(reason.placeholder()),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Unsupported {
    Bytes,
    Group,
    Enum,
    /// A message field without a type name.
    UnnamedMessage,
    Unrecognized(i32),
}

impl Unsupported {
    /// The text inlined into generated code in place of a real type.
    pub fn placeholder(self) -> &'static str {
        match self {
            Unsupported::Enum => UNKNOWN_TYPE,
            _ => ANY,
        }
    }

    pub fn reason(self) -> &'static str {
        match self {
            Unsupported::Bytes => "bytes fields have no Flow type",
            Unsupported::Group => "groups are not supported",
            Unsupported::Enum => "enum values are not mapped",
            Unsupported::UnnamedMessage => "message field without a type name",
            Unsupported::Unrecognized(_) => "unrecognized field type",
        }
    }
}

/// Maps a field declared in `package` to its Flow type.
///
/// The result depends only on the field's kind, label and type name and on
/// the package, so repeated runs produce identical output.
pub fn map_field(field: &Field, package: &str) -> FieldType {
    FieldType {
        base: map_base(field, package),
        label: field.label,
    }
}

fn map_base(field: &Field, package: &str) -> BaseType {
    match field.kind {
        FieldKind::Double
        | FieldKind::Float
        | FieldKind::Int32
        | FieldKind::Fixed32
        | FieldKind::Uint32
        | FieldKind::Sfixed32
        | FieldKind::Sint32 => BaseType::Number,
        // Flow numbers are doubles; 64-bit integers travel as decimal strings.
        FieldKind::Int64
        | FieldKind::Uint64
        | FieldKind::Fixed64
        | FieldKind::Sfixed64
        | FieldKind::Sint64 => BaseType::String,
        FieldKind::Bool => BaseType::Boolean,
        FieldKind::String => BaseType::String,
        FieldKind::Message => match field.type_name {
            Some(ref type_name) if type_name.is_timestamp() => BaseType::String,
            Some(ref type_name) => BaseType::Local(type_name.strip_package(package).to_string()),
            None => BaseType::Unsupported(Unsupported::UnnamedMessage),
        },
        FieldKind::Bytes => BaseType::Unsupported(Unsupported::Bytes),
        FieldKind::Group => BaseType::Unsupported(Unsupported::Group),
        FieldKind::Enum => BaseType::Unsupported(Unsupported::Enum),
        FieldKind::Unrecognized(tag) => BaseType::Unsupported(Unsupported::Unrecognized(tag)),
    }
}
