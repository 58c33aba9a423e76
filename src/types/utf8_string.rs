//! String payloads are kept as raw bytes and only checked as UTF-8 when asked for.
use bytes::Bytes;
use std::fmt;
use std::str::{self, Utf8Error};

#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Utf8String(Bytes);

impl Utf8String {
    pub fn from_bytes(bytes: Bytes) -> Utf8String {
        Utf8String(bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn as_str(&self) -> Result<&str, Utf8Error> {
        str::from_utf8(&self.0)
    }

    /// Length in bytes, not characters
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for Utf8String {
    fn from(s: &str) -> Self {
        Utf8String(Bytes::copy_from_slice(s.as_bytes()))
    }
}

impl From<String> for Utf8String {
    fn from(s: String) -> Self {
        Utf8String(Bytes::from(s))
    }
}

impl PartialEq<str> for Utf8String {
    fn eq(&self, other: &str) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl PartialEq<&str> for Utf8String {
    fn eq(&self, other: &&str) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl fmt::Display for Utf8String {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", String::from_utf8_lossy(&self.0))
    }
}
