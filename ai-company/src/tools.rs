//! Tools agents can call.
//!
//! A tool pairs the definition advertised to the model with the code that
//! runs when the model asks for it. Agents hold tools behind `Arc` so one
//! instance is shared across every role.

use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde_json::{Value, json};

use crate::llm::ToolDef;
use crate::search::WebSearch;

/// A callable the crew engine can dispatch to.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Name the model uses to call this tool.
    fn name(&self) -> &str;

    /// Definition sent with every request.
    fn definition(&self) -> ToolDef;

    /// Run the tool with the model-provided input.
    async fn call(&self, input: &Value) -> Result<String>;
}

/// Shared handle to a tool.
pub type ToolHandle = Arc<dyn Tool>;

/// `web_search`: DuckDuckGo lookup for current information.
pub struct WebSearchTool {
    search: WebSearch,
}

impl WebSearchTool {
    pub const NAME: &'static str = "web_search";

    pub fn new(search: WebSearch) -> Self {
        Self { search }
    }

    pub fn shared(search: WebSearch) -> ToolHandle {
        Arc::new(Self::new(search))
    }
}

#[async_trait]
impl Tool for WebSearchTool {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn definition(&self) -> ToolDef {
        ToolDef {
            name: Self::NAME.to_string(),
            description: "使用DuckDuckGo搜索最新信息".to_string(),
            input_schema: json!({
                "type": "object",
                "required": ["query"],
                "properties": {
                    "query": {
                        "type": "string",
                        "description": "Search query"
                    }
                }
            }),
        }
    }

    async fn call(&self, input: &Value) -> Result<String> {
        let query = input["query"]
            .as_str()
            .context("web_search requires a string `query`")?;
        self.search.run(query).await
    }
}

/// Definitions for a set of tools.
pub fn definitions(tools: &[ToolHandle]) -> Vec<ToolDef> {
    tools.iter().map(|t| t.definition()).collect()
}

/// Find a tool by the name the model used.
pub fn find<'a>(tools: &'a [ToolHandle], name: &str) -> Option<&'a ToolHandle> {
    tools.iter().find(|t| t.name() == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Echo;

    #[async_trait]
    impl Tool for Echo {
        fn name(&self) -> &str {
            "echo"
        }

        fn definition(&self) -> ToolDef {
            ToolDef {
                name: "echo".to_string(),
                description: "echo".to_string(),
                input_schema: json!({"type": "object", "properties": {}}),
            }
        }

        async fn call(&self, input: &Value) -> Result<String> {
            Ok(input.to_string())
        }
    }

    #[test]
    fn web_search_definition_requires_query() {
        let tool = WebSearchTool::new(WebSearch::new().unwrap());
        let def = tool.definition();
        assert_eq!(def.name, "web_search");
        assert_eq!(def.input_schema["required"][0], "query");
    }

    #[tokio::test]
    async fn web_search_rejects_missing_query() {
        let tool = WebSearchTool::new(WebSearch::new().unwrap());
        let err = tool.call(&json!({})).await.unwrap_err();
        assert!(err.to_string().contains("query"));
    }

    #[tokio::test]
    async fn find_dispatches_by_name() {
        let tools: Vec<ToolHandle> = vec![Arc::new(Echo)];
        assert!(find(&tools, "missing").is_none());
        let tool = find(&tools, "echo").unwrap();
        assert_eq!(tool.call(&json!({"a": 1})).await.unwrap(), r#"{"a":1}"#);
        assert_eq!(definitions(&tools).len(), 1);
    }
}
