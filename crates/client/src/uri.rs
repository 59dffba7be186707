//! URI template catalog.
//!
//! Every request path the client issues comes out of this fixed set of
//! templates. Identifier, name and filter values are percent-encoded.

use std::fmt::Write as _;

/// API root, served with a version banner.
pub const API_ROOT: &str = "/api";
/// Login endpoint; a GET with Basic auth establishes the session.
pub const LOGIN: &str = "/api/types/loginSessionInfo";
/// Logout action for the current session.
pub const LOGOUT: &str = "/api/types/loginSessionInfo/action/logout";
/// Unauthenticated system information.
pub const BASIC_SYSTEM_INFO: &str = "/api/types/basicSystemInfo/instances";

/// Join host and path without doubling or dropping the separating slash.
pub fn join_url(host: &str, path: &str) -> String {
    let host = host.trim_end_matches('/');
    let path = path.trim_start_matches('/');
    format!("{host}/{path}")
}

/// `/api/types/{type}/instances`
pub fn list_instances(resource_type: &str) -> String {
    format!("/api/types/{resource_type}/instances")
}

/// `/api/types/{type}/instances?fields={fields}`
pub fn list_instances_with_fields(resource_type: &str, fields: &str) -> String {
    format!("/api/types/{resource_type}/instances?fields={}", encode(fields))
}

/// `/api/types/{type}/instances?filter={filter}&compact=true`
pub fn list_instances_filtered(resource_type: &str, filter: &str) -> String {
    format!("/api/types/{resource_type}/instances?filter={}&compact=true", encode(filter))
}

/// `/api/instances/{type}/{id}`
pub fn instance_by_id(resource_type: &str, id: &str) -> String {
    format!("/api/instances/{resource_type}/{}", encode(id))
}

/// `/api/instances/{type}/{id}?fields={fields}`
pub fn instance_by_id_with_fields(resource_type: &str, id: &str, fields: &str) -> String {
    format!("/api/instances/{resource_type}/{}?fields={}", encode(id), encode(fields))
}

/// `/api/instances/{type}/name:{name}`
pub fn instance_by_name(resource_type: &str, name: &str) -> String {
    format!("/api/instances/{resource_type}/name:{}", encode(name))
}

/// `/api/instances/{type}/name:{name}?fields={fields}`
pub fn instance_by_name_with_fields(resource_type: &str, name: &str, fields: &str) -> String {
    format!("/api/instances/{resource_type}/name:{}?fields={}", encode(name), encode(fields))
}

/// `/api/instances/{type}/{id}/action/{action}`
pub fn instance_action(resource_type: &str, id: &str, action: &str) -> String {
    format!("/api/instances/{resource_type}/{}/action/{action}", encode(id))
}

/// `/api/types/storageResource/action/{action}`
pub fn storage_resource_action(action: &str) -> String {
    format!("/api/types/storageResource/action/{action}")
}

/// Append `page`/`per_page` to a path that may already carry a query.
pub fn paged(path: &str, page: u32, per_page: u32) -> String {
    let mut out = path.to_string();
    let separator = if path.contains('?') { '&' } else { '?' };
    // write! to a String cannot fail
    let _ = write!(out, "{separator}page={page}&per_page={per_page}");
    out
}

fn encode(value: &str) -> String {
    url::form_urlencoded::byte_serialize(value.as_bytes()).collect()
}
