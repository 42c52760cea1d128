use crate::config::Config;
use crate::errors::ToolError;
use crate::managers::{HubManager, ToolHandler};
use crate::mcp::catalog::tool_catalog;
use crate::services::logger::Logger;
use crate::services::transport::Transport;
use crate::services::validation::Validation;
use std::collections::HashMap;
use std::sync::Arc;

pub struct App {
    pub logger: Logger,
    pub handlers: HashMap<String, Arc<dyn ToolHandler>>,
}

impl App {
    fn validate_tool_wiring(
        handlers: &HashMap<String, Arc<dyn ToolHandler>>,
    ) -> Result<(), ToolError> {
        let mut missing: Vec<String> = tool_catalog()
            .iter()
            .filter(|tool| !handlers.contains_key(&tool.name))
            .map(|tool| tool.name.clone())
            .collect();
        if missing.is_empty() {
            return Ok(());
        }
        missing.sort();
        Err(ToolError::internal("Tool wiring is incomplete")
            .with_hint("Every tool in tool_catalog.json must have a handler.")
            .with_details(serde_json::json!({ "missing_tools": missing })))
    }

    pub fn initialize() -> Result<Self, ToolError> {
        let logger = Logger::new("apihub");
        let validation = Validation::new();

        let config = Config::from_env().map_err(ToolError::from)?;

        let transport = Arc::new(Transport::new(logger.clone(), &config)?);
        let hub = Arc::new(HubManager::new(logger.clone(), validation, transport));

        let mut handlers: HashMap<String, Arc<dyn ToolHandler>> = HashMap::new();
        handlers.insert("mcp_hub".to_string(), hub);

        Self::validate_tool_wiring(&handlers)?;

        Ok(Self { logger, handlers })
    }
}
