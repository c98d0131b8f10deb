//! The descriptor tree handed over by protoc.
//!
//! `CodeGeneratorRequest` is decoded with `prost` and immediately converted
//! into the smaller owned model below, keeping only what the Flow emitter
//! reads: files, their top-level messages, and each field's type tag,
//! label and referenced type name.

use log::trace;
use prost::Message as _;
use prost_types::compiler::CodeGeneratorRequest;
use prost_types::field_descriptor_proto::{Label as ProtoLabel, Type};
use prost_types::{DescriptorProto, FieldDescriptorProto, FileDescriptorProto};

use crate::{Error, FullyQualifiedName};

/// A decoded plugin request.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Request {
    /// The raw `--flow_opt` parameter string.
    pub parameter: String,
    /// Files explicitly named on the protoc command line.
    pub file_to_generate: Vec<String>,
    /// Every file protoc parsed, dependencies first.
    pub files: Vec<SchemaFile>,
}

impl Request {
    /// Decodes a serialized `CodeGeneratorRequest`.
    pub fn decode(buf: &[u8]) -> Result<Request, Error> {
        if buf.is_empty() {
            return Err(Error::EmptyInput);
        }

        let request = CodeGeneratorRequest::decode(buf)?;
        trace!("{:#?}", request);
        Ok(Request::from(request))
    }
}

impl From<CodeGeneratorRequest> for Request {
    fn from(request: CodeGeneratorRequest) -> Request {
        Request {
            parameter: request.parameter().to_string(),
            file_to_generate: request.file_to_generate,
            files: request.proto_file.into_iter().map(SchemaFile::from).collect(),
        }
    }
}

/// A single `.proto` file.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SchemaFile {
    pub name: String,
    pub package: String,
    pub messages: Vec<Message>,
}

impl From<FileDescriptorProto> for SchemaFile {
    fn from(file: FileDescriptorProto) -> SchemaFile {
        SchemaFile {
            name: file.name().to_string(),
            package: file.package().to_string(),
            messages: file.message_type.into_iter().map(Message::from).collect(),
        }
    }
}

/// A top-level message; fields keep their declaration order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Message {
    pub name: String,
    pub fields: Vec<Field>,
}

impl From<DescriptorProto> for Message {
    fn from(message: DescriptorProto) -> Message {
        Message {
            name: message.name().to_string(),
            fields: message.field.into_iter().map(Field::from).collect(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Field {
    pub name: String,
    /// The JSON name protoc computed, if it sent one.
    pub json_name: Option<String>,
    pub kind: FieldKind,
    pub label: Label,
    /// Referenced type for message, enum and group fields.
    pub type_name: Option<FullyQualifiedName>,
}

impl Field {
    pub fn new(name: &str, kind: FieldKind) -> Field {
        Field {
            name: name.to_string(),
            json_name: None,
            kind,
            label: Label::Singular,
            type_name: None,
        }
    }

    #[must_use]
    pub fn repeated(mut self) -> Field {
        self.label = Label::Repeated;
        self
    }

    #[must_use]
    pub fn with_type_name(mut self, type_name: &str) -> Field {
        self.type_name = Some(FullyQualifiedName::from_type_name(type_name));
        self
    }

    pub fn is_repeated(&self) -> bool {
        self.label == Label::Repeated
    }
}

impl From<FieldDescriptorProto> for Field {
    fn from(field: FieldDescriptorProto) -> Field {
        let kind = field.r#type.map_or(FieldKind::Unrecognized(0), FieldKind::from_i32);
        let label = match field.label.and_then(|l| ProtoLabel::try_from(l).ok()) {
            Some(ProtoLabel::Repeated) => Label::Repeated,
            _ => Label::Singular,
        };
        let type_name = field
            .type_name
            .as_deref()
            .filter(|name| !name.is_empty())
            .map(FullyQualifiedName::from_type_name);

        Field {
            name: field.name().to_string(),
            json_name: field.json_name.filter(|name| !name.is_empty()),
            kind,
            label,
            type_name,
        }
    }
}

/// Repetition qualifier. `required` and `optional` both collapse to `Singular`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Label {
    Singular,
    Repeated,
}

/// The protobuf type tag of a field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Double,
    Float,
    Int32,
    Int64,
    Uint32,
    Uint64,
    Fixed32,
    Fixed64,
    Sfixed32,
    Sfixed64,
    Sint32,
    Sint64,
    Bool,
    String,
    Group,
    Message,
    Bytes,
    Enum,
    /// A tag value this plugin does not know about.
    Unrecognized(i32),
}

impl FieldKind {
    pub fn from_i32(value: i32) -> FieldKind {
        match Type::try_from(value) {
            Ok(ty) => FieldKind::from(ty),
            Err(_) => FieldKind::Unrecognized(value),
        }
    }
}

impl From<Type> for FieldKind {
    fn from(ty: Type) -> FieldKind {
        match ty {
            Type::Double => FieldKind::Double,
            Type::Float => FieldKind::Float,
            Type::Int64 => FieldKind::Int64,
            Type::Uint64 => FieldKind::Uint64,
            Type::Int32 => FieldKind::Int32,
            Type::Fixed64 => FieldKind::Fixed64,
            Type::Fixed32 => FieldKind::Fixed32,
            Type::Bool => FieldKind::Bool,
            Type::String => FieldKind::String,
            Type::Group => FieldKind::Group,
            Type::Message => FieldKind::Message,
            Type::Bytes => FieldKind::Bytes,
            Type::Uint32 => FieldKind::Uint32,
            Type::Enum => FieldKind::Enum,
            Type::Sfixed32 => FieldKind::Sfixed32,
            Type::Sfixed64 => FieldKind::Sfixed64,
            Type::Sint32 => FieldKind::Sint32,
            Type::Sint64 => FieldKind::Sint64,
        }
    }
}
