use crate::constants::api::PATH_PREFIX;
use crate::constants::pagination;
use crate::errors::ToolError;
use crate::managers::ToolHandler;
use crate::normalize::{
    extract_records, map_api_resource, map_catalogue, map_organization, map_project, map_user,
    normalize_page, ApiResource, Catalogue, Organization, Page, Project, User,
    CATALOGUE_LIST_FIELDS, ORGANIZATION_LIST_FIELDS, PROJECT_LIST_FIELDS,
};
use crate::outcome::OpResult;
use crate::services::logger::Logger;
use crate::services::transport::{RequestSpec, Transport};
use crate::services::validation::Validation;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

const HUB_ACTIONS: &[&str] = &[
    "get_current_user",
    "test_connection",
    "list_organizations",
    "list_recent_projects",
    "search_projects",
    "list_catalogues",
    "filter_apis",
];

/// One operation per backend capability. Each operation builds a request
/// from typed parameters, runs it through the transport, normalizes the
/// body, and folds the outcome into an `OpResult`; transport errors never
/// escape as `Err`. Only argument-shape problems, caught before the
/// operation runs, surface as `ToolError`.
#[derive(Clone)]
pub struct HubManager {
    logger: Logger,
    validation: Validation,
    transport: Arc<Transport>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecentProjectsParams {
    pub organization_id: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchProjectsParams {
    pub organization_id: String,
    pub search_string: String,
    pub is_assign: bool,
    pub page: u64,
    pub size: u64,
    pub is_default: bool,
    pub sort: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CataloguesParams {
    pub organization_id: String,
    pub project_id: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FilterApisParams {
    pub organization_id: String,
    pub project_id: String,
    pub catalogue_id: String,
    pub root_collection_id: String,
    pub creators: Vec<String>,
    pub collections: Vec<String>,
    pub projects: Vec<String>,
    pub page: u64,
    pub size: u64,
}

impl HubManager {
    pub fn new(logger: Logger, validation: Validation, transport: Arc<Transport>) -> Self {
        Self {
            logger: logger.child("hub"),
            validation,
            transport,
        }
    }

    pub async fn handle_action(&self, args: Value) -> Result<Value, ToolError> {
        let action = args.get("action");
        let action_name = action.and_then(|v| v.as_str()).unwrap_or("");
        self.logger.debug(action_name, None);
        match action_name {
            "get_current_user" => Ok(self.get_current_user().await.into_value()),
            "test_connection" => Ok(self.test_connection().await.into_value()),
            "list_organizations" => Ok(self.list_organizations().await.into_value()),
            "list_recent_projects" => {
                let params = RecentProjectsParams::from_args(&self.validation, &args)?;
                Ok(self.list_recent_projects(&params).await.into_value())
            }
            "search_projects" => {
                let params = SearchProjectsParams::from_args(&self.validation, &args)?;
                Ok(self.search_projects(&params).await.into_value())
            }
            "list_catalogues" => {
                let params = CataloguesParams::from_args(&self.validation, &args)?;
                Ok(self.list_catalogues(&params).await.into_value())
            }
            "filter_apis" => {
                let params = FilterApisParams::from_args(&self.validation, &args)?;
                Ok(self.filter_apis(&params).await.into_value())
            }
            _ => Err(unknown_action_error(action, HUB_ACTIONS)),
        }
    }

    pub async fn get_current_user(&self) -> OpResult<User> {
        let spec = RequestSpec::get(format!("{}/users/current", PATH_PREFIX));
        match self.transport.execute(&spec).await {
            Ok(raw) => OpResult::success(map_user(&raw), "Current user retrieved"),
            Err(err) => OpResult::failure("get current user", &err, None),
        }
    }

    /// Delegates to `get_current_user` and translates its outcome into a
    /// boolean connected flag. Always a `Success`; an unreachable or
    /// unauthorized backend reports `false` with the failure message.
    pub async fn test_connection(&self) -> OpResult<bool> {
        connection_outcome(self.get_current_user().await)
    }

    pub async fn list_organizations(&self) -> OpResult<Vec<Organization>> {
        let spec = RequestSpec::get(format!("{}/organizations/recent-accessed", PATH_PREFIX));
        match self.transport.execute(&spec).await {
            Ok(raw) => {
                let organizations =
                    extract_records(&raw, ORGANIZATION_LIST_FIELDS, map_organization);
                let message = format!("Retrieved {} organizations", organizations.len());
                OpResult::success(organizations, message)
            }
            Err(err) => OpResult::failure("list accessed organizations", &err, None),
        }
    }

    pub async fn list_recent_projects(
        &self,
        params: &RecentProjectsParams,
    ) -> OpResult<Vec<Project>> {
        match self.transport.execute(&params.request()).await {
            Ok(raw) => {
                let projects = extract_records(&raw, PROJECT_LIST_FIELDS, map_project);
                let message = format!("Retrieved {} recent projects", projects.len());
                OpResult::success(projects, message)
            }
            Err(err) => OpResult::failure("list recent projects", &err, Some(params.effective())),
        }
    }

    pub async fn search_projects(&self, params: &SearchProjectsParams) -> OpResult<Page<Project>> {
        match self.transport.execute(&params.request()).await {
            Ok(raw) => {
                let page = normalize_page(&raw, params.page, params.size).into_records(map_project);
                let message = format!("Found {} projects", page.total_elements);
                OpResult::success_with_params(page, message, params.effective())
            }
            Err(err) => OpResult::failure("search projects", &err, Some(params.effective())),
        }
    }

    pub async fn list_catalogues(&self, params: &CataloguesParams) -> OpResult<Vec<Catalogue>> {
        match self.transport.execute(&params.request()).await {
            Ok(raw) => {
                let catalogues = extract_records(&raw, CATALOGUE_LIST_FIELDS, map_catalogue);
                let message = format!("Retrieved {} catalogues", catalogues.len());
                OpResult::success(catalogues, message)
            }
            Err(err) => OpResult::failure("list catalogues", &err, Some(params.effective())),
        }
    }

    pub async fn filter_apis(&self, params: &FilterApisParams) -> OpResult<Page<ApiResource>> {
        match self.transport.execute(&params.request()).await {
            Ok(raw) => {
                let page =
                    normalize_page(&raw, params.page, params.size).into_records(map_api_resource);
                let message = format!("Filtered {} API resources", page.total_elements);
                OpResult::success_with_params(page, message, params.effective())
            }
            Err(err) => OpResult::failure("filter API resources", &err, Some(params.effective())),
        }
    }
}

#[async_trait]
impl ToolHandler for HubManager {
    async fn handle(&self, args: Value) -> Result<Value, ToolError> {
        self.handle_action(args).await
    }
}

impl RecentProjectsParams {
    pub fn from_args(validation: &Validation, args: &Value) -> Result<Self, ToolError> {
        Ok(Self {
            organization_id: validation.ensure_string(
                args.get("organization_id").unwrap_or(&Value::Null),
                "organization_id",
            )?,
        })
    }

    pub fn request(&self) -> RequestSpec {
        RequestSpec::get(format!(
            "{}/organizations/{}/projects/recent-accessed",
            PATH_PREFIX, self.organization_id
        ))
    }

    pub fn effective(&self) -> Value {
        serde_json::json!({ "organizationId": self.organization_id })
    }
}

impl SearchProjectsParams {
    pub fn from_args(validation: &Validation, args: &Value) -> Result<Self, ToolError> {
        Ok(Self {
            organization_id: validation.ensure_string(
                args.get("organization_id").unwrap_or(&Value::Null),
                "organization_id",
            )?,
            search_string: validation
                .ensure_optional_string(args.get("search_string"), "search_string")?
                .unwrap_or_default(),
            is_assign: validation
                .ensure_optional_bool(args.get("is_assign"), "is_assign")?
                .unwrap_or(true),
            page: validation
                .ensure_optional_u64(args.get("page"), "page")?
                .unwrap_or(pagination::FIRST_PAGE),
            size: validation
                .ensure_optional_u64(args.get("size"), "size")?
                .unwrap_or(pagination::PROJECT_PAGE_SIZE),
            is_default: validation
                .ensure_optional_bool(args.get("is_default"), "is_default")?
                .unwrap_or(false),
            sort: validation
                .ensure_optional_string(args.get("sort"), "sort")?
                .filter(|sort| !sort.trim().is_empty())
                .unwrap_or_else(|| pagination::PROJECT_SORT.to_string()),
        })
    }

    pub fn request(&self) -> RequestSpec {
        RequestSpec::post(
            format!(
                "{}/organizations/{}/projects/search",
                PATH_PREFIX, self.organization_id
            ),
            serde_json::json!({ "searchString": self.search_string }),
        )
        .with_query("page", self.page)
        .with_query("size", self.size)
        .with_query("isAssign", self.is_assign)
        .with_query("isDefault", self.is_default)
        .with_query("sort", self.sort.clone())
    }

    pub fn effective(&self) -> Value {
        serde_json::json!({
            "organizationId": self.organization_id,
            "searchString": self.search_string,
            "isAssign": self.is_assign,
            "page": self.page,
            "size": self.size,
            "isDefault": self.is_default,
            "sort": self.sort,
        })
    }
}

impl CataloguesParams {
    pub fn from_args(validation: &Validation, args: &Value) -> Result<Self, ToolError> {
        Ok(Self {
            organization_id: validation.ensure_string(
                args.get("organization_id").unwrap_or(&Value::Null),
                "organization_id",
            )?,
            project_id: validation.ensure_string(
                args.get("project_id").unwrap_or(&Value::Null),
                "project_id",
            )?,
        })
    }

    pub fn request(&self) -> RequestSpec {
        RequestSpec::get(format!(
            "{}/organizations/{}/projects/{}/catalogs",
            PATH_PREFIX, self.organization_id, self.project_id
        ))
    }

    pub fn effective(&self) -> Value {
        serde_json::json!({
            "organizationId": self.organization_id,
            "projectId": self.project_id,
        })
    }
}

impl FilterApisParams {
    pub fn from_args(validation: &Validation, args: &Value) -> Result<Self, ToolError> {
        Ok(Self {
            organization_id: validation.ensure_string(
                args.get("organization_id").unwrap_or(&Value::Null),
                "organization_id",
            )?,
            project_id: validation.ensure_string(
                args.get("project_id").unwrap_or(&Value::Null),
                "project_id",
            )?,
            catalogue_id: validation.ensure_string(
                args.get("catalogue_id").unwrap_or(&Value::Null),
                "catalogue_id",
            )?,
            root_collection_id: validation.ensure_string(
                args.get("root_collection_id").unwrap_or(&Value::Null),
                "root_collection_id",
            )?,
            creators: validation.ensure_string_array(args.get("creators"), "creators")?,
            collections: validation.ensure_string_array(args.get("collections"), "collections")?,
            projects: validation.ensure_string_array(args.get("projects"), "projects")?,
            page: validation
                .ensure_optional_u64(args.get("page"), "page")?
                .unwrap_or(pagination::FIRST_PAGE),
            size: validation
                .ensure_optional_u64(args.get("size"), "size")?
                .unwrap_or(pagination::API_PAGE_SIZE),
        })
    }

    pub fn request(&self) -> RequestSpec {
        RequestSpec::post(
            format!(
                "{}/organizations/{}/projects/{}/catalogs/{}/collections/{}/apis/filter",
                PATH_PREFIX,
                self.organization_id,
                self.project_id,
                self.catalogue_id,
                self.root_collection_id
            ),
            serde_json::json!({
                "creators": self.creators,
                "collections": self.collections,
                "projects": self.projects,
            }),
        )
        .with_query("page", self.page)
        .with_query("size", self.size)
    }

    pub fn effective(&self) -> Value {
        serde_json::json!({
            "organizationId": self.organization_id,
            "projectId": self.project_id,
            "catalogueId": self.catalogue_id,
            "rootCollectionId": self.root_collection_id,
            "creators": self.creators,
            "collections": self.collections,
            "projects": self.projects,
            "page": self.page,
            "size": self.size,
        })
    }
}

fn connection_outcome(user: OpResult<User>) -> OpResult<bool> {
    match user {
        OpResult::Success { data, .. } => {
            let message = if data.user_name.is_empty() {
                "Connection OK".to_string()
            } else {
                format!("Connected as {}", data.user_name)
            };
            OpResult::success(true, message)
        }
        OpResult::Failure { message, .. } => {
            OpResult::success(false, format!("Connection failed: {}", message))
        }
    }
}

fn unknown_action_error(action: Option<&Value>, known_actions: &[&str]) -> ToolError {
    let action_value = action
        .and_then(|v| v.as_str().map(|s| s.to_string()))
        .unwrap_or_default();
    ToolError::invalid_params(format!("Unknown hub action: {}", action_value))
        .with_hint(format!("Use one of: {}.", known_actions.join(", ")))
        .with_details(serde_json::json!({ "known_actions": known_actions }))
}
