mod context;
mod error;
mod types;

pub use context::*;
pub use error::*;
pub use types::*;

use std::ffi::CString;
use std::os::raw::c_char;

use em_kernel::{ensure_disjoint, MatrixView, MatrixViewMut};
use tracing::info;

/// Execute a closure that returns an `EmStatus`, catching any panics
/// and converting them into `EmStatus::ErrorInternal`.
fn catch_panic<F: FnOnce() -> EmStatus + std::panic::UnwindSafe>(f: F) -> EmStatus {
    match std::panic::catch_unwind(f) {
        Ok(status) => status,
        Err(_) => {
            set_last_error("internal panic".to_string());
            EmStatus::ErrorInternal
        }
    }
}

/// Multiply two N x N `int32_t` matrices inside the isolated context with
/// default kernel parameters.
///
/// See [`em_matprod_with_params`].
///
/// # Safety
/// Same contract as [`em_matprod_with_params`].
#[no_mangle]
pub unsafe extern "C" fn em_matprod(
    a: *const i32,
    b: *const i32,
    c: *mut i32,
    total_len: usize,
    len: usize,
) -> EmStatus {
    em_matprod_with_params(a, b, c, total_len, len, EmKernelParams::default())
}

/// Multiply two N x N `int32_t` matrices inside the isolated context.
///
/// `total_len` is the caller's claim for the byte length of ONE matrix and
/// `len` is N. The claim is checked against `len * len * 4` before any
/// handle is inspected. Null, misaligned or overlapping handles are
/// rejected too. Every rejection returns `ErrorInvalidArgument` and leaves
/// `c` unwritten; on `Ok`, `c` holds the full product. A `params.threads`
/// above `em_kernel::MAX_THREADS` is rejected the same way, before any
/// worker is spawned.
///
/// # Safety
/// When the arguments validate, `a` and `b` must each point to `total_len`
/// readable bytes and `c` to `total_len` writable bytes, all valid for the
/// duration of the call.
#[no_mangle]
pub unsafe extern "C" fn em_matprod_with_params(
    a: *const i32,
    b: *const i32,
    c: *mut i32,
    total_len: usize,
    len: usize,
    params: EmKernelParams,
) -> EmStatus {
    catch_panic(|| {
        let a_view = match unsafe { MatrixView::from_raw_parts(a, total_len, len, "a") } {
            Ok(v) => v,
            Err(e) => return error::fail(e),
        };
        let b_view = match unsafe { MatrixView::from_raw_parts(b, total_len, len, "b") } {
            Ok(v) => v,
            Err(e) => return error::fail(e),
        };
        if let Err(e) = ensure_disjoint(a, b, c, total_len) {
            return error::fail(e);
        }
        let mut c_view = match unsafe { MatrixViewMut::from_raw_parts(c, total_len, len, "c") } {
            Ok(v) => v,
            Err(e) => return error::fail(e),
        };

        let ctx = match IsolatedContext::new(params) {
            Ok(ctx) => ctx,
            Err(e) => return error::fail(e),
        };
        match ctx.matprod(a_view, b_view, &mut c_view) {
            Ok(()) => {
                info!(n = len, tile = ctx.kernel().config().tile, "matprod complete");
                EmStatus::Ok
            }
            Err(e) => error::fail(e),
        }
    })
}

/// Retrieve the last error message.
///
/// Returns a pointer to a C string describing the most recent error on
/// this thread, or null if none is pending. The caller must free the
/// returned string with `em_free_string`.
#[no_mangle]
pub extern "C" fn em_last_error() -> *mut c_char {
    match error::take_last_error() {
        Some(e) => e.into_raw(),
        None => std::ptr::null_mut(),
    }
}

/// Free a string previously returned by `em_last_error`.
///
/// # Safety
/// `s` must be null or a pointer obtained from `em_last_error` that has not
/// been freed yet.
#[no_mangle]
pub unsafe extern "C" fn em_free_string(s: *mut c_char) {
    if !s.is_null() {
        drop(CString::from_raw(s));
    }
}
