//! Request body encoding for mutating calls.

use serde::Serialize;

use crate::error::{ApiError, Result};
use crate::locator::Params;

pub const JSON_CONTENT_TYPE: &str = "application/json";
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// How a payload is laid out on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    Json,
    Form,
}

impl Encoding {
    pub fn content_type(self) -> &'static str {
        match self {
            Encoding::Json => JSON_CONTENT_TYPE,
            Encoding::Form => FORM_CONTENT_TYPE,
        }
    }
}

/// A serialized request body together with its encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Body {
    encoding: Encoding,
    bytes: Vec<u8>,
}

impl Body {
    /// Serialize `payload` as a JSON document.
    ///
    /// Field omission rules (`skip_serializing_if`) belong to the payload
    /// type; this only serializes what it is handed.
    pub fn json<T: Serialize + ?Sized>(payload: &T) -> Result<Self> {
        let bytes = serde_json::to_vec(payload).map_err(ApiError::Encode)?;
        Ok(Self {
            encoding: Encoding::Json,
            bytes,
        })
    }

    /// Encode `fields` as `application/x-www-form-urlencoded`.
    pub fn form(fields: &Params) -> Self {
        Self {
            encoding: Encoding::Form,
            bytes: fields.encode().into_bytes(),
        }
    }

    pub fn encoding(&self) -> Encoding {
        self.encoding
    }

    pub fn content_type(&self) -> &'static str {
        self.encoding.content_type()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}
