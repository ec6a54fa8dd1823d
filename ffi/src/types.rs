//! `#[repr(C)]` types for the FFI boundary.
//!
//! # Design
//! Each type mirrors a core type but uses C-compatible representations:
//! `*mut c_char` instead of `String`, raw pointers instead of `Vec`, and
//! tagged enums with explicit discriminants. Conversion functions live here
//! to keep `lib.rs` focused on the `extern "C"` surface.

use std::ffi::CString;
use std::os::raw::c_char;

use wardrobe_core::{ApiError, ClothingClient, ClothingItem, HttpMethod, HttpRequest, ItemId, Renderer};

/// Opaque handle to a configured client. C callers receive a pointer to
/// this and pass it back into every FFI function.
pub struct FfiClothingClient {
    pub(crate) inner: ClothingClient,
    pub(crate) renderer: Renderer,
}

/// Copy `s` into a C string owned by the caller. Interior NULs are dropped.
pub(crate) fn into_c_string(s: String) -> *mut c_char {
    let bytes: Vec<u8> = s.into_bytes().into_iter().filter(|&b| b != 0).collect();
    CString::new(bytes).unwrap_or_default().into_raw()
}

fn option_into_c_string(s: Option<String>) -> *mut c_char {
    s.map(into_c_string).unwrap_or(std::ptr::null_mut())
}

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// HTTP method as a C enum.
#[repr(C)]
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
/// Built by `wardrobe_build_*` functions. The C caller executes the request
/// and passes the response back through `wardrobe_parse_*`.
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
    pub(crate) fn from_core(req: HttpRequest) -> *mut Self {
        let headers_len = req.headers.len() as u32;
        let headers = if req.headers.is_empty() {
            std::ptr::null_mut()
        } else {
            let ffi_headers: Box<[FfiHeader]> = req
                .headers
                .into_iter()
                .map(|(k, v)| FfiHeader {
                    key: into_c_string(k),
                    value: into_c_string(v),
                })
                .collect();
            Box::into_raw(ffi_headers) as *mut FfiHeader
        };

        Box::into_raw(Box::new(FfiHttpRequest {
            method: req.method.into(),
            path: into_c_string(req.path),
            headers,
            headers_len,
            body: option_into_c_string(req.body),
        }))
    }
}

// ---------------------------------------------------------------------------
// Response input (caller-provided, not heap-allocated by us)
// ---------------------------------------------------------------------------

/// An HTTP response described as C-compatible plain data.
///
/// The C caller constructs this on the stack after executing a request and
/// passes a pointer to a `wardrobe_parse_*` function. `status_text` and
/// `body` may be null. The FFI layer reads but does not free these fields.
#[repr(C)]
pub struct FfiHttpResponse {
    pub status: u16,
    pub status_text: *const c_char,
    pub body: *const c_char,
}

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// Error codes returned in `FfiResult`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FfiErrorCode {
    Ok = 0,
    /// Non-2xx status; `http_status` holds it.
    Request = 1,
    Transport = 2,
    /// A 2xx response without the body the operation needs.
    MissingBody = 3,
    Deserialization = 4,
    Serialization = 5,
    Panic = 6,
    NullArg = 7,
}

/// Tag that tells `wardrobe_free_result` what `FfiResult::data` points to.
///
/// A successful get with `data_tag = None` means the record does not exist.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FfiDataTag {
    None = 0,
    Item = 1,
    ItemList = 2,
}

/// A clothing item exposed to C. Absent fields are null; `price` is only
/// meaningful when `has_price` is set.
#[repr(C)]
pub struct FfiClothingItem {
    pub id: *mut c_char,
    /// The backend sent the id as a JSON number rather than a string.
    pub id_is_number: bool,
    pub name: *mut c_char,
    pub description: *mut c_char,
    pub size: *mut c_char,
    pub price: f64,
    pub has_price: bool,
    pub image: *mut c_char,
}

impl FfiClothingItem {
    fn from_core(item: ClothingItem) -> Self {
        FfiClothingItem {
            id_is_number: matches!(item.id, ItemId::Number(_)),
            id: into_c_string(item.id.to_string()),
            name: option_into_c_string(item.name),
            description: option_into_c_string(item.description),
            size: option_into_c_string(item.size.map(|s| s.as_str().to_string())),
            price: item.price.unwrap_or(0.0),
            has_price: item.price.is_some(),
            image: option_into_c_string(item.image),
        }
    }

    /// Free the C-string fields (but not the struct itself).
    pub(crate) fn free_fields(&self) {
        for field in [self.id, self.name, self.description, self.size, self.image] {
            if !field.is_null() {
                drop(unsafe { CString::from_raw(field) });
            }
        }
    }
}

/// A list of clothing items exposed to C.
#[repr(C)]
pub struct FfiClothingItemList {
    pub items: *mut FfiClothingItem,
    pub len: u32,
}

/// Result envelope for all parse operations.
///
/// On success `error_code` is `Ok`, `error_message` is null, and `data`
/// points to the parsed payload (tagged by `data_tag`).
/// On failure `error_code` describes the category, `error_message` is a
/// human-readable C string, and `data` is null.
#[repr(C)]
pub struct FfiResult {
    pub error_code: FfiErrorCode,
    pub error_message: *mut c_char,
    pub http_status: u16,
    pub data_tag: FfiDataTag,
    pub data: *mut std::ffi::c_void,
}

impl FfiResult {
    fn boxed(
        error_code: FfiErrorCode,
        error_message: Option<String>,
        http_status: u16,
        data_tag: FfiDataTag,
        data: *mut std::ffi::c_void,
    ) -> *mut Self {
        Box::into_raw(Box::new(FfiResult {
            error_code,
            error_message: option_into_c_string(error_message),
            http_status,
            data_tag,
            data,
        }))
    }

    /// Build a success result carrying a single `FfiClothingItem`.
    pub(crate) fn ok_item(item: ClothingItem) -> *mut Self {
        let ffi_item = Box::new(FfiClothingItem::from_core(item));
        Self::boxed(
            FfiErrorCode::Ok,
            None,
            0,
            FfiDataTag::Item,
            Box::into_raw(ffi_item) as *mut std::ffi::c_void,
        )
    }

    /// Build a success result carrying an `FfiClothingItemList`.
    pub(crate) fn ok_item_list(items: Vec<ClothingItem>) -> *mut Self {
        let len = items.len() as u32;
        let items = if items.is_empty() {
            std::ptr::null_mut()
        } else {
            let ffi_items: Box<[FfiClothingItem]> =
                items.into_iter().map(FfiClothingItem::from_core).collect();
            Box::into_raw(ffi_items) as *mut FfiClothingItem
        };

        let ffi_list = Box::new(FfiClothingItemList { items, len });
        Self::boxed(
            FfiErrorCode::Ok,
            None,
            0,
            FfiDataTag::ItemList,
            Box::into_raw(ffi_list) as *mut std::ffi::c_void,
        )
    }

    /// Build a success result with no data payload (replace, delete, or a
    /// get that found nothing).
    pub(crate) fn ok_empty() -> *mut Self {
        Self::boxed(FfiErrorCode::Ok, None, 0, FfiDataTag::None, std::ptr::null_mut())
    }

    /// Build an error result from an `ApiError`.
    pub(crate) fn from_error(err: ApiError) -> *mut Self {
        let error_code = match &err {
            ApiError::Request { .. } => FfiErrorCode::Request,
            ApiError::Transport(_) => FfiErrorCode::Transport,
            ApiError::MissingBody(_) => FfiErrorCode::MissingBody,
            ApiError::Deserialization(_) => FfiErrorCode::Deserialization,
            ApiError::Serialization(_) => FfiErrorCode::Serialization,
        };
        Self::boxed(
            error_code,
            Some(err.to_string()),
            err.status().unwrap_or(0),
            FfiDataTag::None,
            std::ptr::null_mut(),
        )
    }

    /// Build an error result for a null argument.
    pub(crate) fn null_arg(name: &str) -> *mut Self {
        Self::boxed(
            FfiErrorCode::NullArg,
            Some(format!("null argument: {name}")),
            0,
            FfiDataTag::None,
            std::ptr::null_mut(),
        )
    }

    /// Build an error result for a caught panic.
    pub(crate) fn panic(msg: &str) -> *mut Self {
        Self::boxed(
            FfiErrorCode::Panic,
            Some(msg.to_string()),
            0,
            FfiDataTag::None,
            std::ptr::null_mut(),
        )
    }
}
