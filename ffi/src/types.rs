//! `#[repr(C)]` types for the FFI boundary.
//!
//! # Design
//! Each type mirrors a core type but uses C-compatible representations:
//! `*mut c_char` instead of `String`, raw pointers instead of `Vec`, and
//! tagged enums with explicit discriminants. Conversion functions live here
//! to keep `lib.rs` focused on the `extern "C"` surface.

use std::ffi::{c_void, CString};
use std::os::raw::c_char;

use users_core::error::ApiError;
use users_core::http::HttpMethod;
use users_core::User;

/// Opaque handle to a `UsersClient`. C callers receive a pointer to this
/// and pass it back into every FFI function.
pub struct FfiUsersClient {
    pub(crate) inner: users_core::UsersClient,
}

/// Move `s` onto the C heap. Only for strings built on this side of the
/// boundary: request paths (integers and a base URL read from a C string),
/// JSON bodies (which escape NUL) and error messages. Decoded user fields go
/// through `CheckedUser` instead, because JSON can carry `\u0000`.
pub(crate) fn into_c_string(s: String) -> *mut c_char {
    CString::new(s).unwrap_or_default().into_raw()
}

/// Leak a vector as a raw pointer, or null when it is empty. The length is
/// carried separately by the caller.
fn into_raw_parts<T>(items: Vec<T>) -> *mut T {
    if items.is_empty() {
        return std::ptr::null_mut();
    }
    // Freed with `Vec::from_raw_parts(ptr, len, len)`, so capacity must be len.
    let mut items = items.into_boxed_slice();
    let ptr = items.as_mut_ptr();
    std::mem::forget(items);
    ptr
}

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// HTTP method as a C enum.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FfiHttpMethod {
    Get = 0,
    Post = 1,
    Put = 2,
    Delete = 3,
}

impl From<HttpMethod> for FfiHttpMethod {
    fn from(m: HttpMethod) -> Self {
        match m {
            HttpMethod::Get => FfiHttpMethod::Get,
            HttpMethod::Post => FfiHttpMethod::Post,
            HttpMethod::Put => FfiHttpMethod::Put,
            HttpMethod::Delete => FfiHttpMethod::Delete,
        }
    }
}

/// A single HTTP header as a key-value pair of C strings.
#[repr(C)]
pub struct FfiHeader {
    pub key: *mut c_char,
    pub value: *mut c_char,
}

/// An HTTP request described as C-compatible plain data.
///
/// Built by `users_build_*` functions. The C caller executes the request
/// and passes the response back through `users_parse_*`.
#[repr(C)]
pub struct FfiHttpRequest {
    pub method: FfiHttpMethod,
    pub path: *mut c_char,
    pub headers: *mut FfiHeader,
    pub headers_len: u32,
    pub body: *mut c_char,
}

impl FfiHttpRequest {
    /// Convert a core `HttpRequest` into a heap-allocated `FfiHttpRequest`.
    pub(crate) fn from_core(req: users_core::HttpRequest) -> *mut Self {
        let headers_len = req.headers.len() as u32;
        let headers = into_raw_parts(
            req.headers
                .into_iter()
                .map(|(k, v)| FfiHeader {
                    key: into_c_string(k),
                    value: into_c_string(v),
                })
                .collect(),
        );

        Box::into_raw(Box::new(FfiHttpRequest {
            method: req.method.into(),
            path: into_c_string(req.path),
            headers,
            headers_len,
            body: req.body.map_or(std::ptr::null_mut(), into_c_string),
        }))
    }
}

// ---------------------------------------------------------------------------
// Response input (caller-provided, not heap-allocated by us)
// ---------------------------------------------------------------------------

/// An HTTP response described as C-compatible plain data.
///
/// The C caller constructs this on the stack after executing an HTTP request,
/// then passes a pointer to a `users_parse_*` function. The FFI layer reads
/// but does not free these fields.
#[repr(C)]
pub struct FfiHttpResponse {
    pub status: u16,
    pub body: *const c_char,
}

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// Error codes returned in `FfiUsersResult`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FfiErrorCode {
    Ok = 0,
    Transport = 1,
    Remote = 2,
    Decode = 3,
    Encode = 4,
    EmptyField = 5,
    Panic = 6,
    NullArg = 7,
}

impl From<&ApiError> for FfiErrorCode {
    fn from(err: &ApiError) -> Self {
        match err {
            ApiError::Transport(_) => FfiErrorCode::Transport,
            ApiError::Remote { .. } => FfiErrorCode::Remote,
            ApiError::Decode(_) => FfiErrorCode::Decode,
            ApiError::Encode(_) => FfiErrorCode::Encode,
            ApiError::EmptyField(_) => FfiErrorCode::EmptyField,
        }
    }
}

/// Tag that tells `users_free_result` what `FfiUsersResult::data` points to.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FfiDataTag {
    None = 0,
    User = 1,
    UserList = 2,
}

/// A single user exposed to C.
#[repr(C)]
pub struct FfiUser {
    pub id: u64,
    pub name: *mut c_char,
    pub email: *mut c_char,
}

/// A decoded user whose text fields are known to be NUL-free. Converting
/// every user before leaking any string means a rejected list frees cleanly.
pub(crate) struct CheckedUser {
    id: u64,
    name: CString,
    email: CString,
}

impl TryFrom<User> for CheckedUser {
    type Error = ApiError;

    fn try_from(user: User) -> Result<Self, ApiError> {
        Ok(CheckedUser {
            id: user.id,
            name: nul_free("name", user.name)?,
            email: nul_free("email", user.email)?,
        })
    }
}

fn nul_free(field: &str, value: String) -> Result<CString, ApiError> {
    CString::new(value)
        .map_err(|_| ApiError::Decode(format!("field `{field}` contains a NUL character")))
}

impl From<CheckedUser> for FfiUser {
    fn from(user: CheckedUser) -> Self {
        FfiUser {
            id: user.id,
            name: user.name.into_raw(),
            email: user.email.into_raw(),
        }
    }
}

/// A list of users exposed to C.
#[repr(C)]
pub struct FfiUserList {
    pub items: *mut FfiUser,
    pub len: u32,
}

/// Result envelope for all parse operations.
///
/// On success `error_code` is `Ok`, `error_message` is null, and `data`
/// points to the parsed payload (tagged by `data_tag`).
/// On failure `error_code` describes the category, `error_message` is a
/// human-readable C string, `http_status` is set for `Remote`, and `data`
/// is null.
#[repr(C)]
pub struct FfiUsersResult {
    pub error_code: FfiErrorCode,
    pub error_message: *mut c_char,
    pub http_status: u16,
    pub data_tag: FfiDataTag,
    pub data: *mut c_void,
}

impl FfiUsersResult {
    fn ok(data_tag: FfiDataTag, data: *mut c_void) -> *mut Self {
        Box::into_raw(Box::new(FfiUsersResult {
            error_code: FfiErrorCode::Ok,
            error_message: std::ptr::null_mut(),
            http_status: 0,
            data_tag,
            data,
        }))
    }

    fn error(error_code: FfiErrorCode, http_status: u16, msg: String) -> *mut Self {
        Box::into_raw(Box::new(FfiUsersResult {
            error_code,
            error_message: into_c_string(msg),
            http_status,
            data_tag: FfiDataTag::None,
            data: std::ptr::null_mut(),
        }))
    }

    /// Build a success result carrying a single `FfiUser`, or a `Decode`
    /// error if a field holds a NUL.
    pub(crate) fn ok_user(user: User) -> *mut Self {
        let user = match CheckedUser::try_from(user) {
            Ok(user) => user,
            Err(e) => return Self::from_error(e),
        };
        let ffi_user = Box::new(FfiUser::from(user));
        Self::ok(FfiDataTag::User, Box::into_raw(ffi_user) as *mut c_void)
    }

    /// Build a success result carrying a `FfiUserList`, or a `Decode` error
    /// if any user has a field holding a NUL.
    pub(crate) fn ok_user_list(users: Vec<User>) -> *mut Self {
        let users = match users
            .into_iter()
            .map(CheckedUser::try_from)
            .collect::<Result<Vec<_>, _>>()
        {
            Ok(users) => users,
            Err(e) => return Self::from_error(e),
        };
        let len = users.len() as u32;
        let items = into_raw_parts(users.into_iter().map(FfiUser::from).collect());
        let ffi_list = Box::new(FfiUserList { items, len });
        Self::ok(FfiDataTag::UserList, Box::into_raw(ffi_list) as *mut c_void)
    }

    /// Build a success result with no data payload (delete).
    pub(crate) fn ok_empty() -> *mut Self {
        Self::ok(FfiDataTag::None, std::ptr::null_mut())
    }

    /// Build an error result from an `ApiError`.
    pub(crate) fn from_error(err: ApiError) -> *mut Self {
        let code = FfiErrorCode::from(&err);
        Self::error(code, err.status().unwrap_or(0), err.to_string())
    }

    /// Build an error result for a null argument.
    pub(crate) fn null_arg(name: &str) -> *mut Self {
        Self::error(FfiErrorCode::NullArg, 0, format!("null argument: {name}"))
    }

    /// Build an error result for a caught panic.
    pub(crate) fn panic(msg: &str) -> *mut Self {
        Self::error(FfiErrorCode::Panic, 0, msg.to_string())
    }
}
