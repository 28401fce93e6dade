use std::cell::RefCell;
use std::ffi::CString;

use em_kernel::KernelError;
use tracing::warn;

use crate::types::EmStatus;

thread_local! {
    static LAST_ERROR: RefCell<Option<CString>> = const { RefCell::new(None) };
}

/// Store an error message for later retrieval via `em_last_error`.
pub fn set_last_error(msg: String) {
    LAST_ERROR.with(|e| {
        *e.borrow_mut() = CString::new(msg).ok();
    });
}

/// Take the last error message, leaving `None` in its place.
pub fn take_last_error() -> Option<CString> {
    LAST_ERROR.with(|e| e.borrow_mut().take())
}

/// Record a kernel failure and translate it to the status returned to the caller.
pub(crate) fn fail(err: KernelError) -> EmStatus {
    let status = EmStatus::from(&err);
    warn!(%status, error = %err, "boundary call rejected");
    set_last_error(err.to_string());
    status
}
