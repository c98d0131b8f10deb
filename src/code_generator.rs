use std::borrow::Cow;

use heck::ToLowerCamelCase;
use log::{debug, warn};
use prost_types::compiler::code_generator_response;

use crate::config::{Config, FieldNames, UnsupportedPolicy};
use crate::descriptor::{Field, Message, SchemaFile};
use crate::flow_type::map_field;
use crate::Error;

/// Suffix replacing the `.proto` extension of generated file names.
pub const OUTPUT_SUFFIX: &str = ".flow.js";

/// Boilerplate opening every generated file.
pub const PREAMBLE: &str = "/* @flow */\n\
                            /* eslint-disable */\n\
                            // Code generated by protoc-gen-flow. DO NOT EDIT.\n";

/// One output unit, ready to be placed in the response.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratedFile {
    pub name: String,
    pub content: String,
}

impl From<GeneratedFile> for code_generator_response::File {
    fn from(file: GeneratedFile) -> Self {
        code_generator_response::File {
            name: Some(file.name),
            content: Some(file.content),
            ..Default::default()
        }
    }
}

pub struct CodeGenerator<'a> {
    config: &'a Config,
    file: &'a str,
    package: &'a str,
    buf: String,
}

impl<'a> CodeGenerator<'a> {
    pub fn generate(config: &'a Config, file: &'a SchemaFile) -> Result<GeneratedFile, Error> {
        debug!("file: {:?}, package: {:?}", file.name, file.package);

        let mut code_gen = CodeGenerator {
            config,
            file: &file.name,
            package: &file.package,
            buf: String::new(),
        };

        code_gen.push_preamble();
        for message in &file.messages {
            code_gen.push_message(message)?;
        }

        Ok(GeneratedFile {
            name: output_file_name(&file.name),
            content: code_gen.buf.trim_start_matches('\n').to_string(),
        })
    }

    fn push_preamble(&mut self) {
        self.buf.push_str(PREAMBLE);
    }

    fn push_message(&mut self, message: &Message) -> Result<(), Error> {
        debug!("  message: {:?}", message.name);

        self.buf.push_str("\nexport type ");
        self.buf.push_str(&message.name);
        self.buf.push_str(" = {\n");
        for field in &message.fields {
            self.push_field(message, field)?;
        }
        self.buf.push_str("};\n");
        Ok(())
    }

    fn push_field(&mut self, message: &Message, field: &Field) -> Result<(), Error> {
        let ty = map_field(field, self.package);
        debug!("    field: {:?}, type: {}", field.name, ty);

        if let Some(unsupported) = ty.unsupported() {
            match self.config.unsupported {
                UnsupportedPolicy::Inline => warn!(
                    "{}: {}.{}: {}, emitting `{}`",
                    self.file,
                    message.name,
                    field.name,
                    unsupported.reason(),
                    ty
                ),
                UnsupportedPolicy::Error => {
                    return Err(Error::UnsupportedField {
                        file: self.file.to_string(),
                        message: message.name.clone(),
                        field: field.name.clone(),
                        reason: unsupported.reason(),
                    })
                }
            }
        }

        let name = self.field_name(field);
        self.buf.push_str("  ");
        self.buf.push_str(&name);
        self.buf.push_str("?: ");
        self.buf.push_str(&ty.to_string());
        self.buf.push_str(",\n");
        Ok(())
    }

    fn field_name<'f>(&self, field: &'f Field) -> Cow<'f, str> {
        match self.config.field_names {
            FieldNames::Proto => Cow::Borrowed(&field.name),
            FieldNames::Json => match field.json_name {
                Some(ref json_name) => Cow::Borrowed(json_name),
                None => Cow::Owned(field.name.to_lower_camel_case()),
            },
        }
    }
}

/// Replaces the extension of `name`, if any, with [`OUTPUT_SUFFIX`].
///
/// Directory components are preserved; dots in directory names are not
/// treated as extensions.
pub fn output_file_name(name: &str) -> String {
    let stem = match name.rfind(|c: char| c == '/' || c == '.') {
        Some(idx) if name.as_bytes()[idx] == b'.' => &name[..idx],
        _ => name,
    };
    format!("{}{}", stem, OUTPUT_SUFFIX)
}
