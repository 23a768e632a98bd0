// FFI functions perform null checks before dereferencing raw pointers.
// Clippy cannot verify this statically, so we allow it at crate level.
#![allow(clippy::not_unsafe_ptr_arg_deref)]

//! C ABI over the transliteration engine for embedding in a host UI.
//!
//! All conversions go through one process-wide [`SharedEngine`], so the
//! `singlish_load_*` functions take effect for every later call without
//! disturbing conversions already running.

pub mod trace_init;

use std::ffi::{c_char, CStr, CString};
use std::path::Path;
use std::ptr;
use std::sync::OnceLock;

use singlish_core::{EngineError, SharedEngine};
use tracing::debug;

/// A pointer argument was null or not UTF-8.
pub const SINGLISH_ERR_ARGUMENT: i64 = -1;
/// The file could not be read.
pub const SINGLISH_ERR_IO: i64 = -2;
/// The file was read but is not a valid configuration document.
pub const SINGLISH_ERR_CONFIG: i64 = -3;

fn shared() -> &'static SharedEngine {
    static ENGINE: OnceLock<SharedEngine> = OnceLock::new();
    ENGINE.get_or_init(SharedEngine::from_global)
}

/// Safely convert a C string pointer to a `&str`.
/// Returns `None` if the pointer is null or contains invalid UTF-8.
unsafe fn cptr_to_str<'a>(ptr: *const c_char) -> Option<&'a str> {
    if ptr.is_null() {
        return None;
    }
    CStr::from_ptr(ptr).to_str().ok()
}

/// Hand an owned string to the caller; release with `singlish_free_string`.
fn into_c_string(s: String) -> *mut c_char {
    match CString::new(s) {
        Ok(c) => c.into_raw(),
        Err(_) => ptr::null_mut(),
    }
}

#[no_mangle]
pub extern "C" fn singlish_engine_version() -> *const c_char {
    c"0.1.0".as_ptr()
}

/// Convert a NUL-terminated UTF-8 buffer. Returns null for a null or
/// non-UTF-8 argument.
#[no_mangle]
pub extern "C" fn singlish_transliterate(input: *const c_char) -> *mut c_char {
    let Some(input) = (unsafe { cptr_to_str(input) }) else {
        return ptr::null_mut();
    };
    into_c_string(shared().transliterate(input))
}

/// Diagnostic conversion as a JSON document.
#[no_mangle]
pub extern "C" fn singlish_explain_json(input: *const c_char) -> *mut c_char {
    let Some(input) = (unsafe { cptr_to_str(input) }) else {
        return ptr::null_mut();
    };
    let result = shared().snapshot().engine.explain(input);
    match serde_json::to_string(&result) {
        Ok(json) => into_c_string(json),
        Err(_) => ptr::null_mut(),
    }
}

#[no_mangle]
pub extern "C" fn singlish_free_string(s: *mut c_char) {
    if !s.is_null() {
        unsafe {
            drop(CString::from_raw(s));
        }
    }
}

#[derive(Clone, Copy)]
enum Document {
    Graphemes,
    Lexicon,
    Settings,
}

/// Read `path` and publish an engine with that document replaced.
/// Returns the new engine version, or a negative error code.
fn load_into(engine: &SharedEngine, document: Document, path: *const c_char) -> i64 {
    let Some(path) = (unsafe { cptr_to_str(path) }) else {
        return SINGLISH_ERR_ARGUMENT;
    };
    let toml = match std::fs::read_to_string(Path::new(path)) {
        Ok(s) => s,
        Err(e) => {
            debug!(path, error = %e, "config read failed");
            return SINGLISH_ERR_IO;
        }
    };
    let result: Result<u64, EngineError> = match document {
        Document::Graphemes => engine.reload(Some(&toml), None, None),
        Document::Lexicon => engine.reload(None, Some(&toml), None),
        Document::Settings => engine.reload(None, None, Some(&toml)),
    };
    match result {
        Ok(version) => version as i64,
        Err(e) => {
            debug!(path, error = %e, "config rejected");
            SINGLISH_ERR_CONFIG
        }
    }
}

/// Replace the grapheme table from a TOML file.
#[no_mangle]
pub extern "C" fn singlish_load_graphemes(path: *const c_char) -> i64 {
    load_into(shared(), Document::Graphemes, path)
}

/// Replace the classifier lexicon from a TOML file.
#[no_mangle]
pub extern "C" fn singlish_load_lexicon(path: *const c_char) -> i64 {
    load_into(shared(), Document::Lexicon, path)
}

/// Replace the settings from a TOML file.
#[no_mangle]
pub extern "C" fn singlish_load_settings(path: *const c_char) -> i64 {
    load_into(shared(), Document::Settings, path)
}

/// Start writing JSON trace logs to `log_dir`. Returns 1 when tracing was
/// compiled in, 0 when it was not, -1 for a bad argument.
#[no_mangle]
pub extern "C" fn singlish_trace_init(log_dir: *const c_char) -> i32 {
    let Some(dir) = (unsafe { cptr_to_str(log_dir) }) else {
        return -1;
    };
    trace_init::init_tracing(Path::new(dir));
    i32::from(trace_init::enabled())
}
