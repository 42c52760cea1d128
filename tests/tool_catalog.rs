use apihub::errors::ErrorCode;
use apihub::mcp::catalog::{tool_by_name, tool_catalog, validate_tool_args};
use serde_json::json;

#[test]
fn catalog_lists_exactly_the_hub_tool() {
    let names: Vec<&str> = tool_catalog().iter().map(|tool| tool.name.as_str()).collect();
    assert_eq!(names, vec!["mcp_hub"]);
}

#[test]
fn hub_schema_names_every_action() {
    let tool = tool_by_name("mcp_hub").expect("tool");
    let actions: Vec<&str> = tool.input_schema["properties"]["action"]["enum"]
        .as_array()
        .expect("enum")
        .iter()
        .filter_map(|value| value.as_str())
        .collect();
    for action in [
        "get_current_user",
        "test_connection",
        "list_organizations",
        "list_recent_projects",
        "search_projects",
        "list_catalogues",
        "filter_apis",
    ] {
        assert!(actions.contains(&action), "missing action {}", action);
    }
}

#[test]
fn required_ids_are_enforced_per_action() {
    let err = validate_tool_args("mcp_hub", &json!({ "action": "list_catalogues" }))
        .expect_err("must fail");
    assert_eq!(err.code, ErrorCode::InvalidParams);
    assert!(err.message.contains("organization_id") || err.message.contains("project_id"));

    let ok = validate_tool_args(
        "mcp_hub",
        &json!({
            "action": "list_catalogues",
            "organization_id": "org1",
            "project_id": "proj1",
        }),
    );
    assert!(ok.is_ok());
}

#[test]
fn unknown_action_is_rejected_by_the_schema() {
    let err = validate_tool_args("mcp_hub", &json!({ "action": "drop_everything" }))
        .expect_err("must fail");
    assert_eq!(err.code, ErrorCode::InvalidParams);
}
