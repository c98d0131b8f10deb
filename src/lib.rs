#![doc(html_root_url = "https://docs.rs/protoc-gen-flow/0.1.0")]

//! `protoc-gen-flow` is a `protoc` plugin which generates [Flow][1] type
//! declarations from Protocol Buffers schemas.
//!
//! Every message of a `.proto` file becomes an exported object type in a
//! sibling `.flow.js` file:
//!
//! ```text
//! // store.proto
//! package store;
//!
//! message Item {
//!   int64 id = 1;
//!   repeated string tags = 2;
//!   Category category = 3;
//! }
//! ```
//!
//! ```text
//! // store.flow.js
//! /* @flow */
//! /* eslint-disable */
//! // Code generated by protoc-gen-flow. DO NOT EDIT.
//!
//! export type Item = {
//!   id?: string,
//!   tags?: string[],
//!   category?: Category,
//! };
//! ```
//!
//! 64-bit integers and `google.protobuf.Timestamp` are declared as `string`,
//! following the protobuf JSON mapping. Fields without a Flow counterpart
//! (`bytes`, groups, enums) are declared with a placeholder type.
//!
//! [1]: https://flow.org

mod code_generator;
mod config;
mod descriptor;
mod error;
mod flow_type;
mod fully_qualified_name;

use itertools::Itertools;
use log::debug;
use prost_types::compiler::code_generator_response::Feature;
use prost_types::compiler::CodeGeneratorResponse;

pub use crate::code_generator::{output_file_name, GeneratedFile, OUTPUT_SUFFIX, PREAMBLE};
pub use crate::config::{Config, FieldNames, FileSelection, UnsupportedPolicy};
pub use crate::descriptor::{Field, FieldKind, Label, Message, Request, SchemaFile};
pub use crate::error::Error;
pub use crate::flow_type::{map_field, BaseType, FieldType, Unsupported, ANY, UNKNOWN_TYPE};
pub use crate::fully_qualified_name::{FullyQualifiedName, TIMESTAMP};

/// Runs code generation for a decoded request.
///
/// Option and generation errors are reported in the response's `error`
/// field, in which case it carries no files.
pub fn compile_request(request: &Request) -> CodeGeneratorResponse {
    let result =
        Config::new_from_opts(&request.parameter).and_then(|config| config.generate(request));

    let mut response = CodeGeneratorResponse {
        supported_features: Some(Feature::Proto3Optional as u64),
        ..Default::default()
    };
    match result {
        Ok(files) => {
            debug!("generated: {}", files.iter().map(|file| &file.name).join(", "));
            response.file = files.into_iter().map(Into::into).collect();
        }
        Err(error) => response.error = Some(error.to_string()),
    }
    response
}
