use apihub::managers::{
    CataloguesParams, FilterApisParams, RecentProjectsParams, SearchProjectsParams,
};
use apihub::services::validation::Validation;
use serde_json::json;

#[test]
fn search_projects_applies_documented_defaults() {
    let validation = Validation::new();
    let params =
        SearchProjectsParams::from_args(&validation, &json!({ "organization_id": "org1" }))
            .expect("params");

    let effective = params.effective();
    assert_eq!(effective["searchString"], "");
    assert_eq!(effective["isAssign"], true);
    assert_eq!(effective["page"], 0);
    assert_eq!(effective["size"], 12);
    assert_eq!(effective["isDefault"], false);
    assert_eq!(effective["sort"], "name,asc");

    let spec = params.request();
    assert_eq!(spec.method.as_str(), "POST");
    assert_eq!(spec.path, "/api/v1/organizations/org1/projects/search");
    assert_eq!(
        spec.query_string(),
        "page=0&size=12&isAssign=true&isDefault=false&sort=name%2Casc"
    );
    assert_eq!(spec.body, Some(json!({ "searchString": "" })));
}

#[test]
fn search_projects_keeps_caller_overrides() {
    let validation = Validation::new();
    let params = SearchProjectsParams::from_args(
        &validation,
        &json!({
            "organization_id": "org1",
            "search_string": "billing",
            "is_assign": false,
            "page": 2,
            "size": 50,
            "sort": "updateTime,desc",
        }),
    )
    .expect("params");

    assert_eq!(params.search_string, "billing");
    assert!(!params.is_assign);
    assert_eq!(params.page, 2);
    assert_eq!(params.size, 50);
    assert_eq!(params.request().body, Some(json!({ "searchString": "billing" })));
}

#[test]
fn search_projects_requires_organization_id() {
    let validation = Validation::new();
    let err = SearchProjectsParams::from_args(&validation, &json!({})).expect_err("must fail");
    assert!(err.message.contains("organization_id"));
}

#[test]
fn filter_apis_builds_the_four_id_path_with_empty_filters() {
    let validation = Validation::new();
    let params = FilterApisParams::from_args(
        &validation,
        &json!({
            "organization_id": "org1",
            "project_id": "proj1",
            "catalogue_id": "cat1",
            "root_collection_id": "coll1",
        }),
    )
    .expect("params");

    let spec = params.request();
    assert_eq!(spec.method.as_str(), "POST");
    assert_eq!(
        spec.path,
        "/api/v1/organizations/org1/projects/proj1/catalogs/cat1/collections/coll1/apis/filter"
    );
    assert_eq!(spec.query_string(), "page=0&size=8");
    assert_eq!(
        spec.body,
        Some(json!({ "creators": [], "collections": [], "projects": [] }))
    );
}

#[test]
fn filter_apis_passes_filter_arrays_through() {
    let validation = Validation::new();
    let params = FilterApisParams::from_args(
        &validation,
        &json!({
            "organization_id": "org1",
            "project_id": "proj1",
            "catalogue_id": "cat1",
            "root_collection_id": "coll1",
            "creators": ["u1", "u2"],
            "collections": ["c9"],
            "page": 1,
            "size": 16,
        }),
    )
    .expect("params");

    let body = params.request().body.expect("body");
    assert_eq!(body["creators"], json!(["u1", "u2"]));
    assert_eq!(body["collections"], json!(["c9"]));
    assert_eq!(body["projects"], json!([]));
    assert_eq!(params.request().query_string(), "page=1&size=16");
}

#[test]
fn filter_apis_rejects_missing_ids() {
    let validation = Validation::new();
    let err = FilterApisParams::from_args(
        &validation,
        &json!({ "organization_id": "org1", "project_id": "proj1" }),
    )
    .expect_err("must fail");
    assert!(err.message.contains("catalogue_id"));
}

#[test]
fn recent_projects_and_catalogues_build_get_requests() {
    let validation = Validation::new();

    let recent =
        RecentProjectsParams::from_args(&validation, &json!({ "organization_id": "org1" }))
            .expect("params");
    let spec = recent.request();
    assert_eq!(spec.method.as_str(), "GET");
    assert_eq!(
        spec.path,
        "/api/v1/organizations/org1/projects/recent-accessed"
    );
    assert!(spec.body.is_none());

    let catalogues = CataloguesParams::from_args(
        &validation,
        &json!({ "organization_id": "org1", "project_id": "proj1" }),
    )
    .expect("params");
    let spec = catalogues.request();
    assert_eq!(spec.method.as_str(), "GET");
    assert_eq!(
        spec.path,
        "/api/v1/organizations/org1/projects/proj1/catalogs"
    );
    assert_eq!(spec.query_string(), "");
}
