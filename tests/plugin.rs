//! Runs the `protoc-gen-flow` binary the way protoc does: a serialized
//! `CodeGeneratorRequest` on stdin, a `CodeGeneratorResponse` on stdout.

use std::io::Write;
use std::process::{Command, Output, Stdio};

use pretty_assertions::assert_eq;
use prost::Message;
use prost_types::compiler::code_generator_response::Feature;
use prost_types::compiler::{CodeGeneratorRequest, CodeGeneratorResponse};
use prost_types::field_descriptor_proto::{Label, Type};
use prost_types::{
    DescriptorProto, FieldDescriptorProto, FileDescriptorProto, OneofDescriptorProto,
};

fn run_plugin(input: &[u8]) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_protoc-gen-flow"))
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to spawn protoc-gen-flow");

    child
        .stdin
        .take()
        .unwrap()
        .write_all(input)
        .expect("failed to write request");
    child.wait_with_output().expect("failed to wait on protoc-gen-flow")
}

fn run_request(request: &CodeGeneratorRequest) -> CodeGeneratorResponse {
    let output = run_plugin(&request.encode_to_vec());
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    CodeGeneratorResponse::decode(output.stdout.as_slice()).unwrap()
}

fn field(name: &str, ty: Type, label: Label) -> FieldDescriptorProto {
    FieldDescriptorProto {
        name: Some(name.to_string()),
        number: Some(1),
        r#type: Some(ty as i32),
        label: Some(label as i32),
        ..Default::default()
    }
}

fn message_field(name: &str, type_name: &str) -> FieldDescriptorProto {
    FieldDescriptorProto {
        type_name: Some(type_name.to_string()),
        ..field(name, Type::Message, Label::Optional)
    }
}

fn well_known(name: &str) -> FileDescriptorProto {
    FileDescriptorProto {
        name: Some(format!("google/protobuf/{}", name)),
        package: Some("google.protobuf".to_string()),
        ..Default::default()
    }
}

fn store() -> FileDescriptorProto {
    FileDescriptorProto {
        name: Some("store.proto".to_string()),
        package: Some("store".to_string()),
        dependency: vec!["google/protobuf/timestamp.proto".to_string()],
        message_type: vec![
            DescriptorProto {
                name: Some("Item".to_string()),
                field: vec![
                    field("id", Type::Int64, Label::Optional),
                    field("name", Type::String, Label::Optional),
                    field("tags", Type::String, Label::Repeated),
                    field("total", Type::Double, Label::Optional),
                    message_field("ref", ".store.Category"),
                ],
                ..Default::default()
            },
            DescriptorProto {
                name: Some("Category".to_string()),
                field: vec![
                    field("title", Type::String, Label::Optional),
                    message_field("updated_at", ".google.protobuf.Timestamp"),
                    field("thumbnail", Type::Bytes, Label::Optional),
                ],
                ..Default::default()
            },
        ],
        syntax: Some("proto3".to_string()),
        ..Default::default()
    }
}

fn request(parameter: Option<&str>) -> CodeGeneratorRequest {
    CodeGeneratorRequest {
        file_to_generate: vec!["store.proto".to_string()],
        parameter: parameter.map(str::to_string),
        proto_file: vec![
            well_known("timestamp.proto"),
            well_known("any.proto"),
            well_known("wrappers.proto"),
            store(),
        ],
        ..Default::default()
    }
}

const STORE_FLOW: &str = "/* @flow */
/* eslint-disable */
// Code generated by protoc-gen-flow. DO NOT EDIT.

export type Item = {
  id?: string,
  name?: string,
  tags?: string[],
  total?: number,
  ref?: Category,
};

export type Category = {
  title?: string,
  updated_at?: string,
  thumbnail?: any,
};
";

#[test]
fn generates_store() {
    let response = run_request(&request(None));
    assert_eq!(None, response.error);
    assert_eq!(1, response.file.len());
    assert_eq!("store.flow.js", response.file[0].name());
    assert_eq!(STORE_FLOW, response.file[0].content());
}

#[test]
fn generation_is_reproducible() {
    let first = run_plugin(&request(None).encode_to_vec());
    let second = run_plugin(&request(None).encode_to_vec());
    assert!(first.status.success());
    assert_eq!(first.stdout, second.stdout);
}

#[test]
fn skip_prefix_matches_well_known_selection() {
    let response = run_request(&request(Some("skip_prefix=3")));
    assert_eq!(None, response.error);
    assert_eq!(1, response.file.len());
    assert_eq!(STORE_FLOW, response.file[0].content());
}

#[test]
fn skip_prefix_longer_than_request() {
    let mut request = request(Some("skip_prefix=3"));
    request.proto_file = vec![store()];

    let response = run_request(&request);
    assert_eq!(None, response.error);
    assert!(response.file.is_empty());
}

#[test]
fn unknown_option_is_reported_in_response() {
    let response = run_request(&request(Some("emit=typescript")));
    assert_eq!(Some("unknown option \"emit\"".to_string()), response.error);
    assert!(response.file.is_empty());
}

#[test]
fn unsupported_field_error_policy() {
    let response = run_request(&request(Some("unsupported=error")));
    assert_eq!(
        Some("store.proto: Category.thumbnail: bytes fields have no Flow type".to_string()),
        response.error
    );
    assert!(response.file.is_empty());
}

#[test]
fn malformed_request_produces_no_output() {
    let mut encoded = request(None).encode_to_vec();
    encoded.truncate(encoded.len() - 1);

    let output = run_plugin(&encoded);
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("unable to parse CodeGeneratorRequest"));
}

#[test]
fn empty_request_produces_no_output() {
    let output = run_plugin(&[]);
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
}

fn optional_request(parameter: Option<&str>) -> CodeGeneratorRequest {
    let file = FileDescriptorProto {
        name: Some("optional.proto".to_string()),
        package: Some("optional".to_string()),
        message_type: vec![DescriptorProto {
            name: Some("M".to_string()),
            field: vec![
                FieldDescriptorProto {
                    oneof_index: Some(0),
                    proto3_optional: Some(true),
                    ..field("x", Type::Int32, Label::Optional)
                },
                field("blob", Type::Bytes, Label::Optional),
            ],
            oneof_decl: vec![OneofDescriptorProto {
                name: Some("_x".to_string()),
                ..Default::default()
            }],
            ..Default::default()
        }],
        syntax: Some("proto3".to_string()),
        ..Default::default()
    };

    CodeGeneratorRequest {
        file_to_generate: vec!["optional.proto".to_string()],
        parameter: parameter.map(str::to_string),
        proto_file: vec![file],
        ..Default::default()
    }
}

#[test]
fn proto3_optional_fields_are_singular() {
    let response = run_request(&optional_request(None));
    assert_eq!(None, response.error);
    assert_eq!(Some(Feature::Proto3Optional as u64), response.supported_features);
    assert_eq!(1, response.file.len());
    assert_eq!("optional.flow.js", response.file[0].name());
    assert!(response.file[0]
        .content()
        .ends_with("export type M = {\n  x?: number,\n  blob?: any,\n};\n"));
}

#[test]
fn error_response_advertises_proto3_optional() {
    let response = run_request(&optional_request(Some("unsupported=error")));
    assert_eq!(
        Some("optional.proto: M.blob: bytes fields have no Flow type".to_string()),
        response.error
    );
    assert_eq!(Some(Feature::Proto3Optional as u64), response.supported_features);
    assert!(response.file.is_empty());
}
