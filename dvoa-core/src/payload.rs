//! Payloads crossing the C boundary: NUL-terminated JSON in, NUL-terminated text out.

use std::ffi::{CStr, CString};
use std::os::raw::c_char;

/// Input handed to the library. Owns a NUL-terminated copy of the raw bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputPayload {
    inner: CString,
}

impl InputPayload {
    /// Wrap raw input bytes. Fails if they contain a NUL, which would truncate the C string.
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, PayloadError> {
        let inner = CString::new(bytes).map_err(|e| PayloadError::InteriorNul {
            position: e.nul_position(),
        })?;
        Ok(Self { inner })
    }

    /// Bytes without the trailing NUL.
    pub fn as_bytes(&self) -> &[u8] {
        self.inner.as_bytes()
    }

    pub fn as_c_str(&self) -> &CStr {
        &self.inner
    }

    pub fn len(&self) -> usize {
        self.inner.as_bytes().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Check the payload parses as JSON. The bytes are left untouched either way.
    pub fn validate_json(&self) -> Result<(), PayloadError> {
        serde_json::from_slice::<serde_json::Value>(self.as_bytes())
            .map(|_| ())
            .map_err(PayloadError::InvalidJson)
    }
}

/// Text returned by the library, copied out of the buffer it owns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPayload {
    text: String,
}

impl OutputPayload {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Copy a library-owned result into an owned payload.
    ///
    /// # Safety
    /// `ptr` must be null or point to a NUL-terminated buffer that stays valid for the
    /// duration of this call.
    pub unsafe fn from_raw(ptr: *const c_char) -> Result<Self, PayloadError> {
        if ptr.is_null() {
            return Err(PayloadError::NullResult);
        }
        let raw = CStr::from_ptr(ptr);
        Self::from_c_str(raw)
    }

    pub fn from_c_str(raw: &CStr) -> Result<Self, PayloadError> {
        let text = raw.to_str().map_err(PayloadError::InvalidUtf8)?;
        Ok(Self::new(text))
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn into_string(self) -> String {
        self.text
    }
}

/// Error marshalling a payload across the C boundary.
#[derive(Debug, thiserror::Error)]
pub enum PayloadError {
    #[error("input contains a NUL byte at offset {position}")]
    InteriorNul { position: usize },
    #[error("input is not valid JSON: {0}")]
    InvalidJson(#[source] serde_json::Error),
    #[error("library returned a null result")]
    NullResult,
    #[error("library result is not valid UTF-8: {0}")]
    InvalidUtf8(#[source] std::str::Utf8Error),
}
