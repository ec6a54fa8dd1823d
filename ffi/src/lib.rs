//! C-ABI wrapper around `wardrobe-core`.
//!
//! # Overview
//! Exposes the clothing CRUD API, form validation, and the markup templates
//! through `extern "C"` functions so any language with a C FFI can build and
//! parse HTTP requests/responses without linking to serde directly.
//!
//! # Design
//! - Every `extern "C"` function wraps its body in `catch_unwind` so panics
//!   never cross the FFI boundary.
//! - Per-operation `build_*` / `parse_*` mirrors the core API 1:1.
//! - A single `FfiResult` envelope with `FfiDataTag` + `void* data`
//!   conveys success payloads and errors uniformly.
//! - Item ids travel as C strings plus an `is_number` flag, so a replace
//!   sends the id back in the JSON form the backend used.
//! - The C caller owns all returned pointers and must call the matching
//!   `wardrobe_free_*` function to release them.

pub mod types;

use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::panic::catch_unwind;

use wardrobe_core::{
    ClientConfig, ClothingItem, HttpResponse, ItemDraft, ItemForm, ItemId, Renderer, ValidationError,
};

use types::*;

/// Read a C string argument. Null and non-UTF-8 input read as `None`.
fn read_str<'a>(ptr: *const c_char) -> Option<&'a str> {
    if ptr.is_null() {
        return None;
    }
    unsafe { CStr::from_ptr(ptr) }.to_str().ok()
}

/// Turn a C id argument into an `ItemId`. Returns `None` when `id` is null,
/// or when `is_number` is set but the text is not a JSON number.
fn read_id(id: *const c_char, is_number: bool) -> Option<ItemId> {
    let text = read_str(id)?;
    if is_number {
        text.parse::<serde_json::Number>().ok().map(ItemId::Number)
    } else {
        Some(ItemId::from(text))
    }
}

/// Gather the five raw form inputs. Null reads as an empty field.
fn read_form(
    name: *const c_char,
    description: *const c_char,
    size: *const c_char,
    price: *const c_char,
    image: *const c_char,
) -> ItemForm {
    let field = |ptr| read_str(ptr).unwrap_or_default().to_string();
    ItemForm {
        name: field(name),
        description: field(description),
        size: field(size),
        price: field(price),
        image: field(image),
    }
}

fn read_draft(
    name: *const c_char,
    description: *const c_char,
    size: *const c_char,
    price: *const c_char,
    image: *const c_char,
) -> Result<ItemDraft, ValidationError> {
    read_form(name, description, size, price, image)
        .collect()
        .into_draft()
}

// ---------------------------------------------------------------------------
// Client lifecycle
// ---------------------------------------------------------------------------

/// Create a client for `base_url` and the collection `resource`.
///
/// Any argument may be null to take its default: `http://localhost:3000`,
/// `roupas`, and `BRL`. `currency` accepts `BRL` or `USD`.
/// Returns null if the configuration is invalid or an internal panic occurs.
/// The caller must free the returned pointer with `wardrobe_client_free`.
#[unsafe(no_mangle)]
pub extern "C" fn wardrobe_client_new(
    base_url: *const c_char,
    resource: *const c_char,
    currency: *const c_char,
) -> *mut FfiClothingClient {
    catch_unwind(|| {
        let config = ClientConfig::from_lookup(|key| {
            let ptr = match key {
                "WARDROBE_API_BASE" => base_url,
                "WARDROBE_RESOURCE" => resource,
                "WARDROBE_CURRENCY" => currency,
                _ => return None,
            };
            read_str(ptr).map(str::to_string)
        });
        match config {
            Ok(config) => client_from_config(&config),
            Err(_) => std::ptr::null_mut(),
        }
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Create a client from the `WARDROBE_*` environment variables.
///
/// Returns null if the configuration is invalid.
#[unsafe(no_mangle)]
pub extern "C" fn wardrobe_client_from_env() -> *mut FfiClothingClient {
    catch_unwind(|| match ClientConfig::from_env() {
        Ok(config) => client_from_config(&config),
        Err(_) => std::ptr::null_mut(),
    })
    .unwrap_or(std::ptr::null_mut())
}

fn client_from_config(config: &ClientConfig) -> *mut FfiClothingClient {
    Box::into_raw(Box::new(FfiClothingClient {
        inner: wardrobe_core::ClothingClient::from_config(config),
        renderer: Renderer::new(config.currency),
    }))
}

/// Free a client created by `wardrobe_client_new`. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn wardrobe_client_free(client: *mut FfiClothingClient) {
    if !client.is_null() {
        let _ = catch_unwind(|| {
            drop(unsafe { Box::from_raw(client) });
        });
    }
}

// ---------------------------------------------------------------------------
// Build request functions
// ---------------------------------------------------------------------------

/// Build an HTTP request for listing every item.
///
/// Returns null if `client` is null.
/// The caller must free the returned pointer with `wardrobe_free_request`.
#[unsafe(no_mangle)]
pub extern "C" fn wardrobe_build_list_items(client: *const FfiClothingClient) -> *mut FfiHttpRequest {
    catch_unwind(|| {
        if client.is_null() {
            return std::ptr::null_mut();
        }
        let client = unsafe { &*client };
        FfiHttpRequest::from_core(client.inner.build_list_items())
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Build an HTTP request for fetching a single item by id.
///
/// Returns null if `client` or `id` is null.
#[unsafe(no_mangle)]
pub extern "C" fn wardrobe_build_get_item(
    client: *const FfiClothingClient,
    id: *const c_char,
) -> *mut FfiHttpRequest {
    catch_unwind(|| {
        if client.is_null() {
            return std::ptr::null_mut();
        }
        let client = unsafe { &*client };
        match read_id(id, false) {
            Some(id) => FfiHttpRequest::from_core(client.inner.build_get_item(&id)),
            None => std::ptr::null_mut(),
        }
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Build an HTTP request creating an item from raw form inputs.
///
/// The inputs are trimmed and validated first. Returns null if `client` is
/// null or validation fails; `wardrobe_validate` reports why.
#[unsafe(no_mangle)]
pub extern "C" fn wardrobe_build_create_item(
    client: *const FfiClothingClient,
    name: *const c_char,
    description: *const c_char,
    size: *const c_char,
    price: *const c_char,
    image: *const c_char,
) -> *mut FfiHttpRequest {
    catch_unwind(|| {
        if client.is_null() {
            return std::ptr::null_mut();
        }
        let client = unsafe { &*client };
        let Ok(draft) = read_draft(name, description, size, price, image) else {
            return std::ptr::null_mut();
        };
        match client.inner.build_create_item(&draft) {
            Ok(req) => FfiHttpRequest::from_core(req),
            Err(_) => std::ptr::null_mut(),
        }
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Build an HTTP request fully replacing item `id` with raw form inputs.
///
/// Pass the `id` and `id_is_number` of the record as it was loaded.
/// Returns null if `client` or `id` is null, if `id_is_number` is set for a
/// non-numeric id, or if validation fails.
#[unsafe(no_mangle)]
pub extern "C" fn wardrobe_build_replace_item(
    client: *const FfiClothingClient,
    id: *const c_char,
    id_is_number: bool,
    name: *const c_char,
    description: *const c_char,
    size: *const c_char,
    price: *const c_char,
    image: *const c_char,
) -> *mut FfiHttpRequest {
    catch_unwind(|| {
        if client.is_null() {
            return std::ptr::null_mut();
        }
        let client = unsafe { &*client };
        let Some(id) = read_id(id, id_is_number) else {
            return std::ptr::null_mut();
        };
        let Ok(draft) = read_draft(name, description, size, price, image) else {
            return std::ptr::null_mut();
        };
        match client.inner.build_replace_item(&id, &draft) {
            Ok(req) => FfiHttpRequest::from_core(req),
            Err(_) => std::ptr::null_mut(),
        }
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Build an HTTP request for deleting an item by id.
///
/// Returns null if `client` or `id` is null.
#[unsafe(no_mangle)]
pub extern "C" fn wardrobe_build_delete_item(
    client: *const FfiClothingClient,
    id: *const c_char,
) -> *mut FfiHttpRequest {
    catch_unwind(|| {
        if client.is_null() {
            return std::ptr::null_mut();
        }
        let client = unsafe { &*client };
        match read_id(id, false) {
            Some(id) => FfiHttpRequest::from_core(client.inner.build_delete_item(&id)),
            None => std::ptr::null_mut(),
        }
    })
    .unwrap_or(std::ptr::null_mut())
}

// ---------------------------------------------------------------------------
// Parse response functions
// ---------------------------------------------------------------------------

/// Convert an `FfiHttpResponse` to a core `HttpResponse`.
fn ffi_response_to_core(resp: &FfiHttpResponse) -> HttpResponse {
    let mut core = HttpResponse::new(resp.status, read_str(resp.body).unwrap_or_default());
    // HTTP/2 hosts have no reason phrase; keep the canonical one then.
    if let Some(text) = read_str(resp.status_text).filter(|t| !t.trim().is_empty()) {
        core.status_text = text.to_string();
    }
    core
}

/// Shared null checks and panic guard for the `wardrobe_parse_*` functions.
fn parse_with(
    op: &str,
    client: *const FfiClothingClient,
    response: *const FfiHttpResponse,
    parse: impl FnOnce(&FfiClothingClient, HttpResponse) -> *mut FfiResult,
) -> *mut FfiResult {
    catch_unwind(std::panic::AssertUnwindSafe(|| {
        if client.is_null() {
            return FfiResult::null_arg("client");
        }
        if response.is_null() {
            return FfiResult::null_arg("response");
        }
        let client = unsafe { &*client };
        let resp = unsafe { &*response };
        parse(client, ffi_response_to_core(resp))
    }))
    .unwrap_or_else(|_| FfiResult::panic(&format!("panic in {op}")))
}

/// Parse the response to a list request.
///
/// Returns a result with `data_tag = ItemList` on success. A null or empty
/// body is an empty list.
#[unsafe(no_mangle)]
pub extern "C" fn wardrobe_parse_list_items(
    client: *const FfiClothingClient,
    response: *const FfiHttpResponse,
) -> *mut FfiResult {
    parse_with("wardrobe_parse_list_items", client, response, |client, resp| {
        match client.inner.parse_list_items(resp) {
            Ok(items) => FfiResult::ok_item_list(items),
            Err(e) => FfiResult::from_error(e),
        }
    })
}

/// Parse the response to a get request.
///
/// Returns `data_tag = Item` when found and `data_tag = None` with
/// `error_code = Ok` when the record does not exist (404 or empty body).
#[unsafe(no_mangle)]
pub extern "C" fn wardrobe_parse_get_item(
    client: *const FfiClothingClient,
    response: *const FfiHttpResponse,
) -> *mut FfiResult {
    parse_with("wardrobe_parse_get_item", client, response, |client, resp| {
        match client.inner.parse_get_item(resp) {
            Ok(Some(item)) => FfiResult::ok_item(item),
            Ok(None) => FfiResult::ok_empty(),
            Err(e) => FfiResult::from_error(e),
        }
    })
}

/// Parse the response to a create request.
///
/// Returns a result with `data_tag = Item` carrying the backend-assigned id.
#[unsafe(no_mangle)]
pub extern "C" fn wardrobe_parse_create_item(
    client: *const FfiClothingClient,
    response: *const FfiHttpResponse,
) -> *mut FfiResult {
    parse_with("wardrobe_parse_create_item", client, response, |client, resp| {
        match client.inner.parse_create_item(resp) {
            Ok(item) => FfiResult::ok_item(item),
            Err(e) => FfiResult::from_error(e),
        }
    })
}

/// Parse the response to a replace request. Any 2xx is success.
#[unsafe(no_mangle)]
pub extern "C" fn wardrobe_parse_replace_item(
    client: *const FfiClothingClient,
    response: *const FfiHttpResponse,
) -> *mut FfiResult {
    parse_with("wardrobe_parse_replace_item", client, response, |client, resp| {
        match client.inner.parse_replace_item(resp) {
            Ok(()) => FfiResult::ok_empty(),
            Err(e) => FfiResult::from_error(e),
        }
    })
}

/// Parse the response to a delete request. Any 2xx is success.
#[unsafe(no_mangle)]
pub extern "C" fn wardrobe_parse_delete_item(
    client: *const FfiClothingClient,
    response: *const FfiHttpResponse,
) -> *mut FfiResult {
    parse_with("wardrobe_parse_delete_item", client, response, |client, resp| {
        match client.inner.parse_delete_item(resp) {
            Ok(()) => FfiResult::ok_empty(),
            Err(e) => FfiResult::from_error(e),
        }
    })
}

// ---------------------------------------------------------------------------
// Validation and rendering
// ---------------------------------------------------------------------------

/// Validate raw form inputs.
///
/// Returns null when the inputs are acceptable, otherwise the message for
/// the first failing rule. Free it with `wardrobe_free_string`.
#[unsafe(no_mangle)]
pub extern "C" fn wardrobe_validate(
    name: *const c_char,
    description: *const c_char,
    size: *const c_char,
    price: *const c_char,
    image: *const c_char,
) -> *mut c_char {
    catch_unwind(|| match read_draft(name, description, size, price, image) {
        Ok(_) => std::ptr::null_mut(),
        Err(err) => into_c_string(err.to_string()),
    })
    .unwrap_or(std::ptr::null_mut())
}

fn render_with(
    client: *const FfiClothingClient,
    json: *const c_char,
    render: impl FnOnce(&Renderer, &str) -> Option<String>,
) -> *mut c_char {
    catch_unwind(std::panic::AssertUnwindSafe(|| {
        if client.is_null() {
            return std::ptr::null_mut();
        }
        let client = unsafe { &*client };
        read_str(json)
            .and_then(|json| render(&client.renderer, json))
            .map(into_c_string)
            .unwrap_or(std::ptr::null_mut())
    }))
    .unwrap_or(std::ptr::null_mut())
}

/// Render one list row from an item's JSON, escaping every record field.
///
/// Returns null if an argument is null or the JSON is not an item.
#[unsafe(no_mangle)]
pub extern "C" fn wardrobe_render_list_item(
    client: *const FfiClothingClient,
    item_json: *const c_char,
) -> *mut c_char {
    render_with(client, item_json, |renderer, json| {
        let item: ClothingItem = serde_json::from_str(json).ok()?;
        Some(renderer.render_list_item(&item))
    })
}

/// Render the whole list body from a JSON array, or the empty-state row.
#[unsafe(no_mangle)]
pub extern "C" fn wardrobe_render_list(
    client: *const FfiClothingClient,
    items_json: *const c_char,
) -> *mut c_char {
    render_with(client, items_json, |renderer, json| {
        let items: Vec<ClothingItem> = serde_json::from_str(json).ok()?;
        Some(renderer.render_list(&items))
    })
}

/// Render the detail card from an item's JSON.
#[unsafe(no_mangle)]
pub extern "C" fn wardrobe_render_detail(
    client: *const FfiClothingClient,
    item_json: *const c_char,
) -> *mut c_char {
    render_with(client, item_json, |renderer, json| {
        let item: ClothingItem = serde_json::from_str(json).ok()?;
        Some(renderer.render_detail(&item))
    })
}

// ---------------------------------------------------------------------------
// Free functions
// ---------------------------------------------------------------------------

/// Free an `FfiHttpRequest` returned by any `wardrobe_build_*` function.
/// Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn wardrobe_free_request(req: *mut FfiHttpRequest) {
    if req.is_null() {
        return;
    }
    let _ = catch_unwind(|| {
        let req = unsafe { Box::from_raw(req) };
        if !req.path.is_null() {
            drop(unsafe { CString::from_raw(req.path) });
        }
        if !req.body.is_null() {
            drop(unsafe { CString::from_raw(req.body) });
        }
        if !req.headers.is_null() && req.headers_len > 0 {
            let headers = unsafe {
                Box::from_raw(std::ptr::slice_from_raw_parts_mut(
                    req.headers,
                    req.headers_len as usize,
                ))
            };
            for h in headers.iter() {
                if !h.key.is_null() {
                    drop(unsafe { CString::from_raw(h.key) });
                }
                if !h.value.is_null() {
                    drop(unsafe { CString::from_raw(h.value) });
                }
            }
        }
    });
}

/// Free an `FfiResult` returned by any `wardrobe_parse_*` function.
/// Safe to call with null. Uses `data_tag` to determine what `data` points to.
#[unsafe(no_mangle)]
pub extern "C" fn wardrobe_free_result(result: *mut FfiResult) {
    if result.is_null() {
        return;
    }
    let _ = catch_unwind(|| {
        let result = unsafe { Box::from_raw(result) };
        if !result.error_message.is_null() {
            drop(unsafe { CString::from_raw(result.error_message) });
        }
        if result.data.is_null() {
            return;
        }
        match result.data_tag {
            FfiDataTag::Item => {
                let item = unsafe { Box::from_raw(result.data as *mut FfiClothingItem) };
                item.free_fields();
            }
            FfiDataTag::ItemList => {
                let list = unsafe { Box::from_raw(result.data as *mut FfiClothingItemList) };
                if !list.items.is_null() && list.len > 0 {
                    let items = unsafe {
                        Box::from_raw(std::ptr::slice_from_raw_parts_mut(
                            list.items,
                            list.len as usize,
                        ))
                    };
                    for item in items.iter() {
                        item.free_fields();
                    }
                }
            }
            FfiDataTag::None => {}
        }
    });
}

/// Free a C string allocated by this library. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn wardrobe_free_string(s: *mut c_char) {
    if !s.is_null() {
        let _ = catch_unwind(|| {
            drop(unsafe { CString::from_raw(s) });
        });
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
