use log::{debug, warn};

use crate::code_generator::{CodeGenerator, GeneratedFile};
use crate::descriptor::{Request, SchemaFile};
use crate::Error;

/// Path prefix of the well-known type definitions shipped with protoc.
const WELL_KNOWN_PREFIX: &str = "google/protobuf/";

/// Which of the request's files get an output file.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FileSelection {
    /// Everything except files under `google/protobuf/`.
    WellKnown,
    /// Only the files protoc was asked to generate.
    Requested,
    /// Everything after the first `n` files.
    SkipPrefix(usize),
}

/// What to do with a field whose type has no Flow equivalent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnsupportedPolicy {
    /// Emit a placeholder type and log a warning.
    Inline,
    /// Fail the request.
    Error,
}

/// The property names used in generated object types.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldNames {
    /// The name as written in the `.proto` file.
    Proto,
    /// The protobuf JSON mapping name. Without a `json_name` from protoc the
    /// name is lowerCamelCased with `heck`, which drops leading underscores
    /// (`_foo` becomes `foo`, where protoc would produce `Foo`).
    Json,
}

/// Configuration options for Flow code generation.
///
/// A `Config` is normally built from the plugin parameter with
/// [`Config::new_from_opts`]:
///
/// ```text
/// protoc --flow_out=out --flow_opt=skip=requested,field_names=json store.proto
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub(crate) file_selection: FileSelection,
    pub(crate) unsupported: UnsupportedPolicy,
    pub(crate) field_names: FieldNames,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            file_selection: FileSelection::WellKnown,
            unsupported: UnsupportedPolicy::Inline,
            field_names: FieldNames::Proto,
        }
    }
}

impl Config {
    /// Creates a new code generator configuration with default options.
    pub fn new() -> Config {
        Config::default()
    }

    /// Parses a comma separated `key=value` plugin parameter.
    ///
    /// Recognized keys are `skip` (`well_known` or `requested`), `skip_prefix`
    /// (a file count), `unsupported` (`inline` or `error`) and `field_names`
    /// (`proto` or `json`).
    pub fn new_from_opts(parameter: &str) -> Result<Config, Error> {
        let mut config = Config::new();

        for opt in parameter.split(',').map(str::trim).filter(|opt| !opt.is_empty()) {
            let (key, value) = opt.split_once('=').unwrap_or((opt, ""));
            let (key, value) = (key.trim(), value.trim());
            let invalid = || Error::InvalidOption {
                key: key.to_string(),
                value: value.to_string(),
            };

            match key {
                "skip" => {
                    config.file_selection(match value {
                        "well_known" => FileSelection::WellKnown,
                        "requested" => FileSelection::Requested,
                        _ => return Err(invalid()),
                    });
                }
                "skip_prefix" => {
                    let count = value.parse::<usize>().map_err(|_| invalid())?;
                    config.file_selection(FileSelection::SkipPrefix(count));
                }
                "unsupported" => {
                    config.unsupported(match value {
                        "inline" => UnsupportedPolicy::Inline,
                        "error" => UnsupportedPolicy::Error,
                        _ => return Err(invalid()),
                    });
                }
                "field_names" => {
                    config.field_names(match value {
                        "proto" => FieldNames::Proto,
                        "json" => FieldNames::Json,
                        _ => return Err(invalid()),
                    });
                }
                _ => return Err(Error::UnknownOption(key.to_string())),
            }
        }

        debug!("config: {:?}", config);
        Ok(config)
    }

    /// Configures which request files produce output.
    pub fn file_selection(&mut self, selection: FileSelection) -> &mut Self {
        self.file_selection = selection;
        self
    }

    /// Configures how fields without a Flow type are handled.
    pub fn unsupported(&mut self, policy: UnsupportedPolicy) -> &mut Self {
        self.unsupported = policy;
        self
    }

    /// Configures the property names of generated object types.
    pub fn field_names(&mut self, names: FieldNames) -> &mut Self {
        self.field_names = names;
        self
    }

    /// Generates one Flow file per selected schema file.
    pub fn generate(&self, request: &Request) -> Result<Vec<GeneratedFile>, Error> {
        self.selected_files(request)
            .into_iter()
            .map(|file| CodeGenerator::generate(self, file))
            .collect()
    }

    fn selected_files<'a>(&self, request: &'a Request) -> Vec<&'a SchemaFile> {
        match self.file_selection {
            FileSelection::WellKnown => request
                .files
                .iter()
                .filter(|file| !file.name.starts_with(WELL_KNOWN_PREFIX))
                .collect(),
            FileSelection::Requested => request
                .files
                .iter()
                .filter(|file| request.file_to_generate.contains(&file.name))
                .collect(),
            FileSelection::SkipPrefix(count) => {
                if request.files.len() < count {
                    warn!(
                        "request has {} files, fewer than the {} to skip; nothing to generate",
                        request.files.len(),
                        count
                    );
                }
                request.files.iter().skip(count).collect()
            }
        }
    }
}
