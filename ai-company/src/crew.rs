//! Crew engine — runs tasks through their agents.
//!
//! Tasks run one after another. Each task is an agentic loop: the agent's
//! model answers, requested tools run, results go back, until the model
//! replies without tool calls. Outputs of earlier tasks are passed to later
//! ones as context.

use std::fmt;

use anyhow::{Context, Result};

use crate::llm::{ChatModel, ContentBlock, Message, ToolResultBlock, Usage};
use crate::output;
use crate::roles::Agent;
use crate::tasks::Task;
use crate::tools;

/// Default cap on model round-trips per task.
pub const DEFAULT_MAX_ITERATIONS: usize = 20;
/// Default completion budget per call.
pub const DEFAULT_MAX_TOKENS: u32 = 4096;

const FINAL_ANSWER_NUDGE: &str = "Now it's time you MUST give your absolute best final answer. You'll ignore all previous instructions, stop using any tools, and just return your absolute BEST Final answer.";

/// Order in which tasks are executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Process {
    #[default]
    Sequential,
}

/// Engine limits.
#[derive(Debug, Clone, Copy)]
pub struct CrewConfig {
    pub max_iterations: usize,
    pub max_tokens: u32,
}

impl Default for CrewConfig {
    fn default() -> Self {
        Self {
            max_iterations: DEFAULT_MAX_ITERATIONS,
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }
}

/// Output of a single task.
#[derive(Debug, Clone)]
pub struct TaskOutput {
    pub description: String,
    pub agent: String,
    pub raw: String,
}

/// Output of a whole crew run.
#[derive(Debug, Clone)]
pub struct CrewOutput {
    /// Output of the last task.
    pub raw: String,
    pub tasks_output: Vec<TaskOutput>,
    pub usage: Usage,
}

impl fmt::Display for CrewOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// A set of agents working through a list of tasks.
#[derive(Debug)]
pub struct Crew {
    pub agents: Vec<Agent>,
    pub tasks: Vec<Task>,
    pub process: Process,
    pub verbose: bool,
    config: CrewConfig,
}

impl Crew {
    pub fn new(agents: Vec<Agent>, tasks: Vec<Task>) -> Self {
        Self {
            agents,
            tasks,
            process: Process::Sequential,
            verbose: true,
            config: CrewConfig::default(),
        }
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn with_config(mut self, config: CrewConfig) -> Self {
        self.config = config;
        self
    }

    /// Run every task and return the combined output.
    pub async fn kickoff(&self, model: &dyn ChatModel) -> Result<CrewOutput> {
        if self.tasks.is_empty() {
            anyhow::bail!("Crew has no tasks to run");
        }

        tracing::info!(
            agents = self.agents.len(),
            tasks = self.tasks.len(),
            process = ?self.process,
            "Crew kickoff"
        );

        let mut usage = Usage::default();
        let mut outputs: Vec<TaskOutput> = Vec::with_capacity(self.tasks.len());

        for (index, task) in self.tasks.iter().enumerate() {
            let context: Vec<String> = outputs.iter().map(|o| o.raw.clone()).collect();
            let raw = self
                .execute_task(model, task, &context, &mut usage)
                .await
                .with_context(|| format!("Task {} ({}) failed", index + 1, task.agent.title))?;
            outputs.push(TaskOutput {
                description: task.description.clone(),
                agent: task.agent.title.clone(),
                raw,
            });
        }

        tracing::info!(
            input_tokens = usage.input_tokens,
            output_tokens = usage.output_tokens,
            "Crew finished"
        );

        let raw = outputs.last().map(|o| o.raw.clone()).unwrap_or_default();
        Ok(CrewOutput {
            raw,
            tasks_output: outputs,
            usage,
        })
    }

    fn announce(&self, agent: &Agent, emoji: &str, text: &str) {
        if self.verbose && agent.verbose {
            output::status(&agent.title, emoji, text);
        }
    }

    async fn execute_task(
        &self,
        model: &dyn ChatModel,
        task: &Task,
        context: &[String],
        usage: &mut Usage,
    ) -> Result<String> {
        let agent = &task.agent;
        let system = agent.system_prompt();
        let tool_defs = tools::definitions(&agent.tools);
        let mut messages = vec![Message::user(task.prompt(context))];

        tracing::info!(agent = %agent.title, "Task started");
        self.announce(agent, "📋", &task.description);

        for iteration in 1..=self.config.max_iterations {
            let resp = model
                .chat(&system, &messages, &tool_defs, self.config.max_tokens)
                .await?;
            if let Some(u) = &resp.usage {
                usage.add(u);
            }

            let tool_uses: Vec<_> = resp.tool_uses().into_iter().cloned().collect();
            tracing::debug!(
                iteration,
                tool_calls = tool_uses.len(),
                stop_reason = resp.stop_reason.as_deref().unwrap_or("-"),
                "Model turn"
            );

            if tool_uses.is_empty() {
                let answer = resp.text().trim().to_string();
                tracing::info!(agent = %agent.title, iterations = iteration, "Task complete");
                self.announce(agent, "✅", "Final answer ready");
                return Ok(answer);
            }

            let commentary = resp.text();
            if !commentary.trim().is_empty() {
                self.announce(agent, "💭", commentary.trim());
            }

            // Echo the assistant turn back verbatim so tool_use ids line up.
            messages.push(Message::assistant_blocks(resp.content.clone()));

            let mut result_blocks = Vec::with_capacity(tool_uses.len());
            for tu in &tool_uses {
                let (content, is_error) = match tools::find(&agent.tools, &tu.name) {
                    Some(tool) => {
                        self.announce(agent, "🔍", &format!("{} {}", tu.name, tu.input));
                        let out = tool
                            .call(&tu.input)
                            .await
                            .with_context(|| format!("Tool {} failed", tu.name))?;
                        (out, None)
                    }
                    None => {
                        tracing::warn!(tool = %tu.name, "Model requested unknown tool");
                        (
                            format!(
                                "Error: unknown tool `{}`. Available tools: {}",
                                tu.name,
                                tool_names(agent)
                            ),
                            Some(true),
                        )
                    }
                };
                result_blocks.push(ContentBlock::ToolResult(ToolResultBlock {
                    tool_use_id: tu.id.clone(),
                    content,
                    is_error,
                }));
            }
            messages.push(Message::user_blocks(result_blocks));
        }

        tracing::warn!(
            agent = %agent.title,
            max_iterations = self.config.max_iterations,
            "Iteration limit reached, forcing final answer"
        );
        messages.push(Message::user(FINAL_ANSWER_NUDGE));
        let resp = model
            .chat(&system, &messages, &[], self.config.max_tokens)
            .await?;
        if let Some(u) = &resp.usage {
            usage.add(u);
        }
        self.announce(agent, "✅", "Final answer ready");
        Ok(resp.text().trim().to_string())
    }
}

fn tool_names(agent: &Agent) -> String {
    let names: Vec<&str> = agent.tools.iter().map(|t| t.name()).collect();
    if names.is_empty() {
        "none".to_string()
    } else {
        names.join(", ")
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! Scripted model and stub tools shared by unit tests.

    use std::collections::VecDeque;
    use std::sync::Mutex;

    use anyhow::Result;
    use async_trait::async_trait;
    use serde_json::{Value, json};

    use crate::llm::{ApiResponse, ChatModel, ContentBlock, Message, ToolDef, ToolUseBlock, Usage};
    use crate::tools::Tool;

    /// What the scripted model saw on one call.
    #[derive(Debug, Clone)]
    pub struct SeenCall {
        pub system: String,
        pub messages: Vec<Message>,
        pub tool_names: Vec<String>,
    }

    /// Replays canned responses in order.
    pub struct ScriptedModel {
        replies: Mutex<VecDeque<ApiResponse>>,
        pub seen: Mutex<Vec<SeenCall>>,
    }

    impl ScriptedModel {
        pub fn new(replies: Vec<ApiResponse>) -> Self {
            Self {
                replies: Mutex::new(replies.into()),
                seen: Mutex::new(Vec::new()),
            }
        }

        pub fn calls(&self) -> Vec<SeenCall> {
            self.seen.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ChatModel for ScriptedModel {
        async fn chat(
            &self,
            system: &str,
            messages: &[Message],
            tools: &[ToolDef],
            _max_tokens: u32,
        ) -> Result<ApiResponse> {
            self.seen.lock().unwrap().push(SeenCall {
                system: system.to_string(),
                messages: messages.to_vec(),
                tool_names: tools.iter().map(|t| t.name.clone()).collect(),
            });
            self.replies
                .lock()
                .unwrap()
                .pop_front()
                .ok_or_else(|| anyhow::anyhow!("script exhausted"))
        }
    }

    pub fn text_reply(text: &str) -> ApiResponse {
        ApiResponse {
            content: vec![ContentBlock::Text {
                text: text.to_string(),
            }],
            stop_reason: Some("end_turn".to_string()),
            usage: Some(Usage {
                input_tokens: 10,
                output_tokens: 5,
            }),
        }
    }

    pub fn tool_reply(id: &str, name: &str, query: &str) -> ApiResponse {
        ApiResponse {
            content: vec![
                ContentBlock::Text {
                    text: "Searching.".to_string(),
                },
                ContentBlock::ToolUse(ToolUseBlock {
                    id: id.to_string(),
                    name: name.to_string(),
                    input: json!({ "query": query }),
                }),
            ],
            stop_reason: Some("tool_use".to_string()),
            usage: Some(Usage {
                input_tokens: 20,
                output_tokens: 8,
            }),
        }
    }

    /// Stands in for `web_search`; fails when `fail` is set.
    pub struct StubSearch {
        pub fail: bool,
        pub queries: Mutex<Vec<String>>,
    }

    impl StubSearch {
        pub fn new() -> Self {
            Self {
                fail: false,
                queries: Mutex::new(Vec::new()),
            }
        }

        pub fn failing() -> Self {
            Self {
                fail: true,
                queries: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl Tool for StubSearch {
        fn name(&self) -> &str {
            "web_search"
        }

        fn definition(&self) -> ToolDef {
            ToolDef {
                name: "web_search".to_string(),
                description: "stub".to_string(),
                input_schema: json!({"type": "object", "properties": {}}),
            }
        }

        async fn call(&self, input: &Value) -> Result<String> {
            let query = input["query"].as_str().unwrap_or_default().to_string();
            self.queries.lock().unwrap().push(query.clone());
            if self.fail {
                anyhow::bail!("network unreachable");
            }
            Ok(format!("snippet: results for {query}, title: T, link: https://t"))
        }
    }
}
