//! C ABI over [`NeuVector`], named after the code-along exercise's functions.
//!
//! Fallible calls return a status code; values come back through out-pointers.
//! Negative indices are index errors and never touch the array.

use log::warn;
use neu_vector::{ArrayError, NeuVector, NOT_FOUND};
use std::ffi::{CString, c_char};
use std::ptr;

pub const NEU_OK: i32 = 0;
pub const NEU_ERR_INDEX: i32 = 1;
pub const NEU_ERR_ALLOC: i32 = 2;
pub const NEU_ERR_NULL: i32 = 3;

fn status_of(err: &ArrayError) -> i32 {
    if err.is_alloc_error() {
        NEU_ERR_ALLOC
    } else {
        NEU_ERR_INDEX
    }
}

/// # Safety
///
/// `out` must be null or point to a writable `i32`.
unsafe fn status<T>(
    result: Result<T, ArrayError>,
    out: *mut i32,
    write: impl FnOnce(T) -> Option<i32>,
) -> i32 {
    match result {
        Ok(value) => {
            if let Some(v) = write(value) {
                if !out.is_null() {
                    unsafe { *out = v };
                }
            }
            NEU_OK
        }
        Err(e) => status_of(&e),
    }
}

/// Create a vector; null when `initial_capacity <= 0` or allocation fails.
#[unsafe(no_mangle)]
pub extern "C" fn create_vector(initial_capacity: i64) -> *mut NeuVector {
    let Ok(capacity) = usize::try_from(initial_capacity) else {
        warn!("create_vector: invalid capacity {initial_capacity}");
        return ptr::null_mut();
    };
    match NeuVector::with_capacity(capacity) {
        Ok(vector) => Box::into_raw(Box::new(vector)),
        Err(e) => {
            warn!("create_vector({initial_capacity}): {e}");
            ptr::null_mut()
        }
    }
}

/// Free the vector. A null handle is ignored.
///
/// # Safety
///
/// `vector` must be null or a live handle from [`create_vector`]; it must not
/// be used afterwards.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn free_vector(vector: *mut NeuVector) {
    if !vector.is_null() {
        let vector = unsafe { Box::from_raw(vector) };
        (*vector).release();
    }
}

/// # Safety
///
/// `vector` must be null or a live handle; `out` must be null or writable.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn get_vector_element(
    vector: *const NeuVector,
    index: i64,
    out: *mut i32,
) -> i32 {
    let Some(vector) = (unsafe { vector.as_ref() }) else {
        return NEU_ERR_NULL;
    };
    let Ok(index) = usize::try_from(index) else {
        return NEU_ERR_INDEX;
    };
    unsafe { status(vector.get(index), out, Some) }
}

/// # Safety
///
/// `vector` must be null or a live handle.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn set_vector_element(vector: *mut NeuVector, index: i64, value: i32) -> i32 {
    let Some(vector) = (unsafe { vector.as_mut() }) else {
        return NEU_ERR_NULL;
    };
    let Ok(index) = usize::try_from(index) else {
        return NEU_ERR_INDEX;
    };
    unsafe { status(vector.set(index, value), ptr::null_mut(), |()| None) }
}

/// # Safety
///
/// `vector` must be null or a live handle.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn insert_vector_element(
    vector: *mut NeuVector,
    index: i64,
    value: i32,
) -> i32 {
    let Some(vector) = (unsafe { vector.as_mut() }) else {
        return NEU_ERR_NULL;
    };
    let Ok(index) = usize::try_from(index) else {
        return NEU_ERR_INDEX;
    };
    unsafe { status(vector.insert(index, value), ptr::null_mut(), |()| None) }
}

/// # Safety
///
/// `vector` must be null or a live handle.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn append_vector_element(vector: *mut NeuVector, value: i32) -> i32 {
    let Some(vector) = (unsafe { vector.as_mut() }) else {
        return NEU_ERR_NULL;
    };
    unsafe { status(vector.append(value), ptr::null_mut(), |()| None) }
}

/// # Safety
///
/// `vector` must be null or a live handle; `out` must be null or writable.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn remove_vector_element(
    vector: *mut NeuVector,
    index: i64,
    out: *mut i32,
) -> i32 {
    let Some(vector) = (unsafe { vector.as_mut() }) else {
        return NEU_ERR_NULL;
    };
    let Ok(index) = usize::try_from(index) else {
        return NEU_ERR_INDEX;
    };
    unsafe { status(vector.remove(index), out, Some) }
}

/// # Safety
///
/// `vector` must be null or a live handle; `out` must be null or writable.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn pop_vector_element(vector: *mut NeuVector, out: *mut i32) -> i32 {
    let Some(vector) = (unsafe { vector.as_mut() }) else {
        return NEU_ERR_NULL;
    };
    unsafe { status(vector.pop(), out, Some) }
}

/// Index of the first `value`, or -1.
///
/// The return value is an index, not a status, so a null handle is treated
/// as an empty vector and also yields -1. Callers that need to tell the two
/// apart check the handle (or `get_vector_size`, which is -1 for null) first.
///
/// # Safety
///
/// `vector` must be null or a live handle.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn contains_element(vector: *const NeuVector, value: i32) -> i64 {
    match unsafe { vector.as_ref() } {
        Some(vector) => vector.find(&value) as i64,
        None => NOT_FOUND as i64,
    }
}

/// Number of elements, or -1 for a null handle.
///
/// # Safety
///
/// `vector` must be null or a live handle.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn get_vector_size(vector: *const NeuVector) -> i64 {
    unsafe { vector.as_ref() }.map_or(-1, |v| v.len() as i64)
}

/// Allocated slots, or -1 for a null handle.
///
/// # Safety
///
/// `vector` must be null or a live handle.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn get_vector_capacity(vector: *const NeuVector) -> i64 {
    unsafe { vector.as_ref() }.map_or(-1, |v| v.capacity() as i64)
}

/// Render as `"[1, 2, 3]"`. The caller owns the string and frees it with
/// [`free_vector_string`].
///
/// # Safety
///
/// `vector` must be null or a live handle.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn vector_to_string(vector: *const NeuVector) -> *mut c_char {
    let rendered = match unsafe { vector.as_ref() } {
        Some(vector) => vector.to_debug_string(),
        None => String::from("[]"),
    };
    // 数字与分隔符中不含 NUL
    CString::new(rendered).map_or(ptr::null_mut(), CString::into_raw)
}

/// # Safety
///
/// `s` must be null or a pointer returned by [`vector_to_string`].
#[unsafe(no_mangle)]
pub unsafe extern "C" fn free_vector_string(s: *mut c_char) {
    if !s.is_null() {
        drop(unsafe { CString::from_raw(s) });
    }
}
