use crate::errors::ToolError;
use async_trait::async_trait;
use serde_json::Value;

mod hub;

pub use hub::{
    CataloguesParams, FilterApisParams, HubManager, RecentProjectsParams, SearchProjectsParams,
};

#[async_trait]
pub trait ToolHandler: Send + Sync {
    async fn handle(&self, args: Value) -> Result<Value, ToolError>;
}
