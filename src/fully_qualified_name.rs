use std::fmt;

/// The fully qualified name of the well-known Timestamp message.
pub const TIMESTAMP: &str = ".google.protobuf.Timestamp";

// Invariant: should always begin with a '.' (dot)
#[derive(Debug, PartialEq, Eq, Hash, Clone)]
pub struct FullyQualifiedName(String);

impl FullyQualifiedName {
    /// Builds a name from a descriptor `type_name`, which protoc always reports
    /// fully qualified. A missing leading dot is added.
    pub fn from_type_name(type_name: &str) -> Self {
        if type_name.starts_with('.') {
            Self(type_name.to_string())
        } else {
            Self(format!(".{}", type_name))
        }
    }

    pub fn is_timestamp(&self) -> bool {
        self.0 == TIMESTAMP
    }

    /// Strips the `.<package>.` prefix once, leaving a reference local to the
    /// package. Names outside the package are returned untouched. With an
    /// empty package only the leading dot is removed.
    pub fn strip_package(&self, package: &str) -> &str {
        let package = package.trim_matches('.');
        if package.is_empty() {
            return &self.0[1..];
        }

        self.0[1..]
            .strip_prefix(package)
            .and_then(|rest| rest.strip_prefix('.'))
            .unwrap_or(&self.0)
    }
}

impl AsRef<str> for FullyQualifiedName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FullyQualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}
