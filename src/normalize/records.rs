use serde::Serialize;
use serde_json::Value;

/// Canonical records produced from raw backend payloads. Every mapper in
/// this module is total: any `Value` (including `Null`) maps to a fully
/// populated record, with absent or mistyped fields coalesced to defaults.
/// Serialized field names match the highest-priority raw names, so mapping
/// a canonical record again returns it unchanged.

const DEFAULT_VISIBILITY: &str = "PRIVATE";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub user_name: String,
    pub email: String,
    pub create_time: String,
    pub update_time: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Organization {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub visibility: String,
    pub create_time: String,
    pub update_time: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub kanban_board_enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Catalogue {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub version: String,
    pub status: String,
    pub create_time: String,
    pub update_time: String,
    pub root_collection_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResource {
    pub id: String,
    pub name: String,
    pub description: String,
    pub version: String,
    pub status: String,
    pub creator_id: String,
    pub modifier_id: String,
    #[serde(rename = "type")]
    pub resource_type: String,
    pub visibility: String,
}

pub fn map_user(raw: &Value) -> User {
    User {
        id: field_text(raw, "id"),
        user_name: first_text(raw, &["userName", "username"]),
        email: first_text(raw, &["emailAddress", "email"]),
        create_time: field_text(raw, "createTime"),
        update_time: field_text(raw, "updateTime"),
    }
}

pub fn map_organization(raw: &Value) -> Organization {
    Organization {
        id: field_text(raw, "id"),
        name: first_text(raw, &["name", "displayName"]),
        description: optional_text(raw, "description"),
        visibility: field_text_or(raw, "visibility", DEFAULT_VISIBILITY),
        create_time: field_text(raw, "createTime"),
        update_time: field_text(raw, "updateTime"),
    }
}

pub fn map_project(raw: &Value) -> Project {
    Project {
        id: field_text(raw, "id"),
        name: first_text(raw, &["name", "displayName", "projectName"]),
        description: optional_text(raw, "description"),
        kanban_board_enabled: field_bool(raw, "kanbanBoardEnabled", false),
    }
}

pub fn map_catalogue(raw: &Value) -> Catalogue {
    Catalogue {
        id: field_text(raw, "id"),
        name: field_text(raw, "name"),
        description: optional_text(raw, "description"),
        version: field_text(raw, "version"),
        status: field_text(raw, "status"),
        create_time: field_text(raw, "createTime"),
        update_time: field_text(raw, "updateTime"),
        root_collection_id: field_text(raw, "rootCollectionId"),
    }
}

pub fn map_api_resource(raw: &Value) -> ApiResource {
    ApiResource {
        id: field_text(raw, "id"),
        name: first_text(raw, &["name", "displayName", "apiName"]),
        description: field_text(raw, "description"),
        version: field_text(raw, "version"),
        status: field_text(raw, "status"),
        creator_id: field_text(raw, "creatorId"),
        modifier_id: field_text(raw, "modifierId"),
        resource_type: first_text(raw, &["type", "apiType"]),
        visibility: field_text(raw, "visibility"),
    }
}

// Backends have been seen returning numeric ids; render them as text
// rather than dropping them.
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

pub(crate) fn field_text(raw: &Value, key: &str) -> String {
    raw.get(key).and_then(scalar_text).unwrap_or_default()
}

fn field_text_or(raw: &Value, key: &str, default: &str) -> String {
    raw.get(key)
        .and_then(scalar_text)
        .filter(|text| !text.is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn first_text(raw: &Value, keys: &[&str]) -> String {
    for key in keys {
        if let Some(text) = raw.get(*key).and_then(scalar_text) {
            if !text.is_empty() {
                return text;
            }
        }
    }
    String::new()
}

fn optional_text(raw: &Value, key: &str) -> Option<String> {
    raw.get(key).and_then(scalar_text)
}

pub(crate) fn field_bool(raw: &Value, key: &str, default: bool) -> bool {
    raw.get(key).and_then(Value::as_bool).unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_mapper_prefers_user_name_over_username() {
        let raw = serde_json::json!({ "userName": "ada", "username": "ignored" });
        assert_eq!(map_user(&raw).user_name, "ada");

        let raw = serde_json::json!({ "username": "ada" });
        assert_eq!(map_user(&raw).user_name, "ada");
    }

    #[test]
    fn user_mapper_is_total_over_null() {
        let user = map_user(&Value::Null);
        assert_eq!(user.id, "");
        assert_eq!(user.email, "");
        assert_eq!(user.create_time, "");
    }

    #[test]
    fn organization_visibility_defaults_to_private() {
        let org = map_organization(&serde_json::json!({ "id": "o1", "name": "Acme" }));
        assert_eq!(org.visibility, "PRIVATE");

        let org = map_organization(&serde_json::json!({ "visibility": "PUBLIC" }));
        assert_eq!(org.visibility, "PUBLIC");
    }

    #[test]
    fn organization_name_falls_back_to_display_name() {
        let org = map_organization(&serde_json::json!({ "displayName": "Acme Inc" }));
        assert_eq!(org.name, "Acme Inc");
    }

    #[test]
    fn project_kanban_flag_defaults_false() {
        let project = map_project(&serde_json::json!({ "projectName": "billing" }));
        assert_eq!(project.name, "billing");
        assert!(!project.kanban_board_enabled);
    }

    #[test]
    fn catalogue_keeps_root_collection_id() {
        let raw = serde_json::json!({ "id": "c1", "rootCollectionId": "coll-9" });
        assert_eq!(map_catalogue(&raw).root_collection_id, "coll-9");
    }

    #[test]
    fn numeric_ids_are_rendered_as_text() {
        let raw = serde_json::json!({ "id": 42 });
        assert_eq!(map_api_resource(&raw).id, "42");
    }

    #[test]
    fn mappers_are_idempotent_on_canonical_records() {
        let raw = serde_json::json!({
            "id": "p1",
            "displayName": "Billing",
            "description": "money things",
            "kanbanBoardEnabled": true,
        });
        let once = map_project(&raw);
        let twice = map_project(&serde_json::to_value(&once).expect("serialize"));
        assert_eq!(once, twice);

        let org = map_organization(&serde_json::json!({ "id": "o1" }));
        let again = map_organization(&serde_json::to_value(&org).expect("serialize"));
        assert_eq!(org, again);
    }
}
