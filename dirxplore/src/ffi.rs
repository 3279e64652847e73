//! C ABI for hosts that load the shared library directly.
//!
//! Every string returned by [`DeepCrawl`] must be passed to [`FreeCString`]
//! exactly once.
#![allow(non_snake_case)]

use crate::buffer::ResultBuffer;
use crate::crawl::crawl;
use crate::logging;
use std::borrow::Cow;
use std::ffi::{CStr, c_char};
use std::panic::{self, AssertUnwindSafe};
use tracing::error;

const PANIC_RESULT: &str = r#"{"error": "internal error"}"#;

/// Crawl the index page at `target_url`, optionally through the SOCKS5 proxy
/// at `proxy_uri`, and return the JSON result.
///
/// Null arguments are read as empty strings. Never returns null.
///
/// # Safety
///
/// Non-null arguments must point to NUL-terminated strings that stay valid
/// for the duration of the call.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn DeepCrawl(
    target_url: *const c_char,
    proxy_uri: *const c_char,
) -> *mut c_char {
    logging::init();

    let target_url = unsafe { string_arg(target_url) };
    let proxy_uri = unsafe { string_arg(proxy_uri) };

    let json = panic::catch_unwind(AssertUnwindSafe(|| crawl(&target_url, &proxy_uri)))
        .unwrap_or_else(|_| {
            error!("Crawl of {} panicked", target_url);
            PANIC_RESULT.to_string()
        });

    ResultBuffer::new(json).into_raw()
}

/// Release a string returned by [`DeepCrawl`]. Null is ignored.
///
/// # Safety
///
/// `ptr` must be null or a pointer returned by `DeepCrawl` that has not been
/// freed yet.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn FreeCString(ptr: *mut c_char) {
    if ptr.is_null() {
        return;
    }
    drop(unsafe { ResultBuffer::from_raw(ptr) });
}

unsafe fn string_arg<'a>(ptr: *const c_char) -> Cow<'a, str> {
    if ptr.is_null() {
        Cow::Borrowed("")
    } else {
        unsafe { CStr::from_ptr(ptr) }.to_string_lossy()
    }
}
