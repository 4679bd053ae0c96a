//! C-ABI wrapper around `users-core`.
//!
//! # Overview
//! Exposes the users CRUD API through `extern "C"` functions so a native
//! mobile host can build requests, execute them with its own HTTP stack,
//! and hand the responses back for parsing.
//!
//! # Design
//! - Every `extern "C"` function wraps its body in `catch_unwind` so panics
//!   never cross the FFI boundary.
//! - Per-operation `build_*` / `parse_*` mirrors the core API 1:1.
//! - `users_parse_list_users` surfaces failures; a host that wants the
//!   "show an empty list" behaviour treats any error code as zero users.
//! - A single `FfiUsersResult` envelope with `FfiDataTag` + `void* data`
//!   conveys success payloads and errors uniformly.
//! - The C caller owns all returned pointers and must call the matching
//!   `users_free_*` function to release them.

pub mod types;

use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::panic::catch_unwind;

use users_core::http::HttpResponse;
use users_core::types::UserInput;

use types::*;

/// Copy a non-null C string. Invalid UTF-8 reads as empty, which the field
/// checks then reject as `EmptyField`.
///
/// # Safety
/// `ptr` must be non-null and point to a NUL-terminated string.
unsafe fn read_c_str(ptr: *const c_char) -> String {
    CStr::from_ptr(ptr)
        .to_str()
        .unwrap_or("")
        .to_string()
}

/// Build a `UserInput` from two C strings, or `None` if either is null.
fn read_input(name: *const c_char, email: *const c_char) -> Option<UserInput> {
    if name.is_null() || email.is_null() {
        return None;
    }
    Some(unsafe { UserInput::new(read_c_str(name), read_c_str(email)) })
}

// ---------------------------------------------------------------------------
// Client lifecycle
// ---------------------------------------------------------------------------

/// Create a new `UsersClient` bound to `base_url`.
///
/// Returns null if `base_url` is null, is not valid UTF-8, or if an internal
/// panic occurs. The caller must free the returned pointer with
/// `users_client_free`.
#[unsafe(no_mangle)]
pub extern "C" fn users_client_new(base_url: *const c_char) -> *mut FfiUsersClient {
    catch_unwind(|| {
        if base_url.is_null() {
            return std::ptr::null_mut();
        }
        let Ok(url) = unsafe { CStr::from_ptr(base_url) }.to_str() else {
            return std::ptr::null_mut();
        };
        let client = users_core::UsersClient::new(url);
        Box::into_raw(Box::new(FfiUsersClient { inner: client }))
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Free a `UsersClient` created by `users_client_new`. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn users_client_free(client: *mut FfiUsersClient) {
    if !client.is_null() {
        let _ = catch_unwind(|| {
            drop(unsafe { Box::from_raw(client) });
        });
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Check form fields before building a create or update request.
///
/// Returns `NullArg` if either pointer is null, `EmptyField` if either
/// string is empty, `Ok` otherwise.
#[unsafe(no_mangle)]
pub extern "C" fn users_validate_input(name: *const c_char, email: *const c_char) -> FfiErrorCode {
    catch_unwind(|| match read_input(name, email) {
        None => FfiErrorCode::NullArg,
        Some(input) => match input.validate() {
            Ok(()) => FfiErrorCode::Ok,
            Err(e) => FfiErrorCode::from(&e),
        },
    })
    .unwrap_or(FfiErrorCode::Panic)
}

// ---------------------------------------------------------------------------
// Build request functions
// ---------------------------------------------------------------------------

/// Build an HTTP request for listing all users.
///
/// Returns null if `client` is null.
/// The caller must free the returned pointer with `users_free_request`.
#[unsafe(no_mangle)]
pub extern "C" fn users_build_list_users(client: *const FfiUsersClient) -> *mut FfiHttpRequest {
    catch_unwind(|| {
        if client.is_null() {
            return std::ptr::null_mut();
        }
        let client = unsafe { &*client };
        FfiHttpRequest::from_core(client.inner.build_list_users())
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Build an HTTP request for creating a user.
///
/// Returns null if any argument is null or either field is empty; no
/// request should be sent in that case.
#[unsafe(no_mangle)]
pub extern "C" fn users_build_create_user(
    client: *const FfiUsersClient,
    name: *const c_char,
    email: *const c_char,
) -> *mut FfiHttpRequest {
    catch_unwind(|| {
        if client.is_null() {
            return std::ptr::null_mut();
        }
        let client = unsafe { &*client };
        let Some(input) = read_input(name, email) else {
            return std::ptr::null_mut();
        };
        match input
            .validate()
            .and_then(|()| client.inner.build_create_user(&input))
        {
            Ok(req) => FfiHttpRequest::from_core(req),
            Err(_) => std::ptr::null_mut(),
        }
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Build an HTTP request replacing `name` and `email` on the user at `id`.
///
/// Returns null if any pointer argument is null or either field is empty.
#[unsafe(no_mangle)]
pub extern "C" fn users_build_update_user(
    client: *const FfiUsersClient,
    id: u64,
    name: *const c_char,
    email: *const c_char,
) -> *mut FfiHttpRequest {
    catch_unwind(|| {
        if client.is_null() {
            return std::ptr::null_mut();
        }
        let client = unsafe { &*client };
        let Some(input) = read_input(name, email) else {
            return std::ptr::null_mut();
        };
        match input
            .validate()
            .and_then(|()| client.inner.build_update_user(id, &input))
        {
            Ok(req) => FfiHttpRequest::from_core(req),
            Err(_) => std::ptr::null_mut(),
        }
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Build an HTTP request for deleting the user at `id`.
///
/// Returns null if `client` is null.
#[unsafe(no_mangle)]
pub extern "C" fn users_build_delete_user(
    client: *const FfiUsersClient,
    id: u64,
) -> *mut FfiHttpRequest {
    catch_unwind(|| {
        if client.is_null() {
            return std::ptr::null_mut();
        }
        let client = unsafe { &*client };
        FfiHttpRequest::from_core(client.inner.build_delete_user(id))
    })
    .unwrap_or(std::ptr::null_mut())
}

// ---------------------------------------------------------------------------
// Parse response functions
// ---------------------------------------------------------------------------

/// Convert an `FfiHttpResponse` to a core `HttpResponse`. A null body reads
/// as empty.
fn ffi_response_to_core(resp: &FfiHttpResponse) -> HttpResponse {
    let body = if resp.body.is_null() {
        String::new()
    } else {
        unsafe { read_c_str(resp.body) }
    };
    HttpResponse {
        status: resp.status,
        headers: Vec::new(),
        body,
    }
}

/// Shared null checks and conversion for every `users_parse_*` function.
fn parse_with<F>(
    client: *const FfiUsersClient,
    response: *const FfiHttpResponse,
    parse: F,
) -> *mut FfiUsersResult
where
    F: FnOnce(&users_core::UsersClient, HttpResponse) -> *mut FfiUsersResult,
{
    if client.is_null() {
        return FfiUsersResult::null_arg("client");
    }
    if response.is_null() {
        return FfiUsersResult::null_arg("response");
    }
    let client = unsafe { &*client };
    let resp = unsafe { &*response };
    parse(&client.inner, ffi_response_to_core(resp))
}

/// Parse an HTTP response from a list-users request.
///
/// Returns a result with `data_tag = UserList` on success.
#[unsafe(no_mangle)]
pub extern "C" fn users_parse_list_users(
    client: *const FfiUsersClient,
    response: *const FfiHttpResponse,
) -> *mut FfiUsersResult {
    catch_unwind(|| {
        parse_with(client, response, |c, resp| match c.parse_list_users(resp) {
            Ok(users) => FfiUsersResult::ok_user_list(users),
            Err(e) => FfiUsersResult::from_error(e),
        })
    })
    .unwrap_or_else(|_| FfiUsersResult::panic("panic in users_parse_list_users"))
}

/// Parse an HTTP response from a create-user request.
///
/// Returns a result with `data_tag = User` on any 2xx status.
#[unsafe(no_mangle)]
pub extern "C" fn users_parse_create_user(
    client: *const FfiUsersClient,
    response: *const FfiHttpResponse,
) -> *mut FfiUsersResult {
    catch_unwind(|| {
        parse_with(client, response, |c, resp| match c.parse_create_user(resp) {
            Ok(user) => FfiUsersResult::ok_user(user),
            Err(e) => FfiUsersResult::from_error(e),
        })
    })
    .unwrap_or_else(|_| FfiUsersResult::panic("panic in users_parse_create_user"))
}

/// Parse an HTTP response from an update-user request.
///
/// Returns a result with `data_tag = User` on success.
#[unsafe(no_mangle)]
pub extern "C" fn users_parse_update_user(
    client: *const FfiUsersClient,
    response: *const FfiHttpResponse,
) -> *mut FfiUsersResult {
    catch_unwind(|| {
        parse_with(client, response, |c, resp| match c.parse_update_user(resp) {
            Ok(user) => FfiUsersResult::ok_user(user),
            Err(e) => FfiUsersResult::from_error(e),
        })
    })
    .unwrap_or_else(|_| FfiUsersResult::panic("panic in users_parse_update_user"))
}

/// Parse an HTTP response from a delete-user request.
///
/// Returns a result with `data_tag = None` on success. The body is ignored.
#[unsafe(no_mangle)]
pub extern "C" fn users_parse_delete_user(
    client: *const FfiUsersClient,
    response: *const FfiHttpResponse,
) -> *mut FfiUsersResult {
    catch_unwind(|| {
        parse_with(client, response, |c, resp| match c.parse_delete_user(resp) {
            Ok(()) => FfiUsersResult::ok_empty(),
            Err(e) => FfiUsersResult::from_error(e),
        })
    })
    .unwrap_or_else(|_| FfiUsersResult::panic("panic in users_parse_delete_user"))
}

// ---------------------------------------------------------------------------
// Free functions
// ---------------------------------------------------------------------------

/// Free an `FfiHttpRequest` returned by any `users_build_*` function.
/// Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn users_free_request(req: *mut FfiHttpRequest) {
    if req.is_null() {
        return;
    }
    let _ = catch_unwind(|| {
        let req = unsafe { Box::from_raw(req) };
        free_c_string(req.path);
        free_c_string(req.body);
        if !req.headers.is_null() && req.headers_len > 0 {
            let len = req.headers_len as usize;
            let headers = unsafe { Vec::from_raw_parts(req.headers, len, len) };
            for h in headers {
                free_c_string(h.key);
                free_c_string(h.value);
            }
        }
    });
}

/// Free an `FfiUsersResult` returned by any `users_parse_*` function.
/// Safe to call with null. Uses `data_tag` to determine what `data` points to.
#[unsafe(no_mangle)]
pub extern "C" fn users_free_result(result: *mut FfiUsersResult) {
    if result.is_null() {
        return;
    }
    let _ = catch_unwind(|| {
        let result = unsafe { Box::from_raw(result) };
        free_c_string(result.error_message);
        if result.data.is_null() {
            return;
        }
        match result.data_tag {
            FfiDataTag::User => {
                let user = unsafe { Box::from_raw(result.data as *mut FfiUser) };
                free_ffi_user_fields(&user);
            }
            FfiDataTag::UserList => {
                let list = unsafe { Box::from_raw(result.data as *mut FfiUserList) };
                if !list.items.is_null() && list.len > 0 {
                    let len = list.len as usize;
                    let items = unsafe { Vec::from_raw_parts(list.items, len, len) };
                    for item in &items {
                        free_ffi_user_fields(item);
                    }
                }
            }
            FfiDataTag::None => {}
        }
    });
}

/// Free the C-string fields of an `FfiUser` (but not the struct itself).
fn free_ffi_user_fields(user: &FfiUser) {
    free_c_string(user.name);
    free_c_string(user.email);
}

fn free_c_string(s: *mut c_char) {
    if !s.is_null() {
        drop(unsafe { CString::from_raw(s) });
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
