use serde_json::Value;

/// List responses arrive in several historical envelope shapes. Extraction
/// is an ordered chain: bare array, then the resource-specific fields, then
/// the generic `data` and `content` wrappers. The first non-null array wins;
/// nothing matching yields an empty list, never an error.

pub const ORGANIZATION_LIST_FIELDS: &[&str] = &["recentAccessedOrganizations", "organizations"];
pub const PROJECT_LIST_FIELDS: &[&str] = &["recentAccessedProjects", "projects"];
pub const CATALOGUE_LIST_FIELDS: &[&str] = &["catalogs", "catalogues"];

const GENERIC_LIST_FIELDS: &[&str] = &["data", "content"];

pub(crate) fn bare_array(raw: &Value) -> Option<Vec<Value>> {
    raw.as_array().cloned()
}

pub(crate) fn named_array(raw: &Value, field: &str) -> Option<Vec<Value>> {
    raw.get(field).and_then(Value::as_array).cloned()
}

pub fn extract_list(raw: &Value, resource_fields: &[&str]) -> Vec<Value> {
    if let Some(items) = bare_array(raw) {
        return items;
    }
    for field in resource_fields.iter().chain(GENERIC_LIST_FIELDS.iter()) {
        if let Some(items) = named_array(raw, field) {
            return items;
        }
    }
    Vec::new()
}

pub fn extract_records<T>(
    raw: &Value,
    resource_fields: &[&str],
    map: impl Fn(&Value) -> T,
) -> Vec<T> {
    extract_list(raw, resource_fields).iter().map(map).collect()
}
