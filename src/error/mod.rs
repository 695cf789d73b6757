//! Error types for codec failures.
//!
//! Every codec operation reports failure through [`CodecError`]. Shape
//! mismatches carry [`Violations`], a non-empty list of per-path
//! [`Violation`]s collected in a single pass.

mod violation;

pub use violation::{Violation, Violations};

use crate::path::JsonPath;

/// Failure of an encode, decode, convert or construction call.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// The value holds something JSON cannot express. Nothing is written.
    #[error("cannot encode value at {}: {message}", .path.label())]
    Encoding { path: JsonPath, message: String },

    /// The input bytes are not well-formed JSON.
    #[error("malformed JSON: {message}")]
    Decoding {
        message: String,
        line: usize,
        column: usize,
    },

    /// Well-formed input that does not match the declared type.
    #[error(transparent)]
    Validation(#[from] Violations),

    /// A codec family was requested but compiled out of this build.
    #[error("{capability} codecs are unavailable: rebuild jsoncap with the `{feature}` feature enabled")]
    CapabilityUnavailable {
        capability: &'static str,
        feature: &'static str,
    },
}

impl CodecError {
    /// Builds an encoding error at `path`.
    pub fn encoding(path: JsonPath, message: impl Into<String>) -> Self {
        CodecError::Encoding {
            path,
            message: message.into(),
        }
    }

    /// Wraps a serde_json parse failure.
    pub fn decoding(err: serde_json::Error) -> Self {
        CodecError::Decoding {
            message: err.to_string(),
            line: err.line(),
            column: err.column(),
        }
    }

    /// Wraps a serde failure raised after the schema accepted the value.
    ///
    /// The schema and the serde impl disagree about the shape, so this is
    /// reported as a root violation with code `deserialize`.
    pub fn deserialize(err: serde_json::Error) -> Self {
        CodecError::Validation(Violations::single(
            Violation::new(JsonPath::root(), err.to_string()).with_code("deserialize"),
        ))
    }

    /// The error raised by every entry point of a compiled-out codec family.
    pub fn capability_unavailable() -> Self {
        CodecError::CapabilityUnavailable {
            capability: "validating",
            feature: "validation",
        }
    }

    /// Returns the violations when this is a validation failure.
    pub fn violations(&self) -> Option<&Violations> {
        match self {
            CodecError::Validation(violations) => Some(violations),
            _ => None,
        }
    }
}

const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<CodecError>();
    assert_sync::<CodecError>();
};
