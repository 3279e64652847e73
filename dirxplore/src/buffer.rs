use crate::crawl::ENCODE_FAILURE;
use std::ffi::{CString, c_char};

/// A NUL-terminated result string whose ownership can be handed to a host.
///
/// Memory is released exactly once: either when the handle is dropped, or
/// after the host returns the raw pointer through [`ResultBuffer::from_raw`]
/// and that handle is dropped.
#[derive(Debug)]
pub struct ResultBuffer(CString);

impl ResultBuffer {
    pub fn new(json: String) -> Self {
        match CString::new(json) {
            Ok(inner) => Self(inner),
            // serde_json escapes NUL, so this only guards against misuse
            Err(_) => Self(CString::new(ENCODE_FAILURE).unwrap_or_default()),
        }
    }

    pub fn as_str(&self) -> &str {
        self.0.to_str().unwrap_or_default()
    }

    /// Give up ownership. The pointer must come back through `from_raw`.
    pub fn into_raw(self) -> *mut c_char {
        self.0.into_raw()
    }

    /// Take back a pointer previously produced by [`ResultBuffer::into_raw`].
    ///
    /// # Safety
    ///
    /// `ptr` must come from `into_raw` and must not have been reclaimed
    /// already. The host must not touch it afterwards.
    pub unsafe fn from_raw(ptr: *mut c_char) -> Self {
        Self(unsafe { CString::from_raw(ptr) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_through_raw() {
        let buffer = ResultBuffer::new("[]".to_string());
        let ptr = buffer.into_raw();
        let buffer = unsafe { ResultBuffer::from_raw(ptr) };
        assert_eq!(buffer.as_str(), "[]");
    }

    #[test]
    fn test_interior_nul_falls_back() {
        let buffer = ResultBuffer::new("[\0]".to_string());
        assert_eq!(buffer.as_str(), ENCODE_FAILURE);
    }
}
