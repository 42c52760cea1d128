use super::records::field_bool;
use serde::Serialize;
use serde_json::Value;

/// A bounded slice of a larger result set. Serialized field names match the
/// paginated backend envelope, so a canonical page normalizes to itself.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    pub total_elements: u64,
    pub total_pages: u64,
    pub size: u64,
    pub number: u64,
    pub first: bool,
    pub last: bool,
}

impl Page<Value> {
    pub fn into_records<T>(self, map: impl Fn(&Value) -> T) -> Page<T> {
        Page {
            content: self.content.iter().map(map).collect(),
            total_elements: self.total_elements,
            total_pages: self.total_pages,
            size: self.size,
            number: self.number,
            first: self.first,
            last: self.last,
        }
    }
}

/// Accepts either a paginated envelope or a bare array. A bare array of N
/// elements becomes a synthetic single page; missing envelope fields fall
/// back to the caller-requested number/size, zero totals, and true flags.
pub fn normalize_page(raw: &Value, requested_number: u64, requested_size: u64) -> Page<Value> {
    if let Some(items) = raw.as_array() {
        return Page {
            total_elements: items.len() as u64,
            total_pages: 1,
            size: requested_size,
            number: requested_number,
            first: true,
            last: true,
            content: items.clone(),
        };
    }

    Page {
        content: raw
            .get("content")
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default(),
        total_elements: field_u64(raw, "totalElements", 0),
        total_pages: field_u64(raw, "totalPages", 0),
        size: field_u64(raw, "size", requested_size),
        number: field_u64(raw, "number", requested_number),
        first: field_bool(raw, "first", true),
        last: field_bool(raw, "last", true),
    }
}

fn field_u64(raw: &Value, key: &str, default: u64) -> u64 {
    let Some(value) = raw.get(key) else {
        return default;
    };
    value
        .as_u64()
        .or_else(|| value.as_str().and_then(|text| text.parse().ok()))
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_array_synthesizes_a_single_page() {
        let raw = serde_json::json!([{ "id": "a" }, { "id": "b" }, { "id": "c" }]);
        let page = normalize_page(&raw, 0, 12);
        assert_eq!(page.total_elements, 3);
        assert_eq!(page.total_pages, 1);
        assert_eq!(page.size, 12);
        assert_eq!(page.number, 0);
        assert!(page.first);
        assert!(page.last);
        assert_eq!(page.content.len(), 3);
    }

    #[test]
    fn envelope_fields_are_read_through() {
        let raw = serde_json::json!({
            "content": [{ "id": "a" }],
            "totalElements": 41,
            "totalPages": 4,
            "size": 12,
            "number": 2,
            "first": false,
            "last": false,
        });
        let page = normalize_page(&raw, 0, 12);
        assert_eq!(page.total_elements, 41);
        assert_eq!(page.total_pages, 4);
        assert_eq!(page.number, 2);
        assert!(!page.first);
        assert!(!page.last);
    }

    #[test]
    fn missing_envelope_fields_use_requested_and_zero_defaults() {
        let page = normalize_page(&serde_json::json!({ "content": [] }), 3, 8);
        assert_eq!(page.total_elements, 0);
        assert_eq!(page.total_pages, 0);
        assert_eq!(page.size, 8);
        assert_eq!(page.number, 3);
        assert!(page.first);
        assert!(page.last);
    }

    #[test]
    fn garbage_envelope_degrades_to_empty_content() {
        let page = normalize_page(&serde_json::json!({}), 0, 8);
        assert!(page.content.is_empty());
        assert_eq!(page.total_elements, 0);

        let page = normalize_page(&Value::Null, 1, 20);
        assert!(page.content.is_empty());
        assert_eq!(page.number, 1);
        assert_eq!(page.size, 20);
    }

    #[test]
    fn normalization_is_idempotent_on_canonical_pages() {
        let raw = serde_json::json!([{ "id": "a" }]);
        let once = normalize_page(&raw, 0, 12);
        let twice = normalize_page(&serde_json::to_value(&once).expect("serialize"), 0, 12);
        assert_eq!(once, twice);
    }
}
