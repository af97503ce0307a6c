//! Workflows — one agent, one task, one sequential crew.

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;

use crate::crew::{Crew, CrewConfig, CrewOutput};
use crate::llm::ChatModel;
use crate::roles::{self, Agent};
use crate::tasks::{self, Task};
use crate::tools::ToolHandle;

/// The runnable workflows offered by the menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Workflow {
    /// CTO researches a technology topic.
    TechResearch,
    /// CMO analyses a market.
    MarketAnalysis,
    /// COO optimizes a capability area.
    Optimization,
}

impl Workflow {
    pub const ALL: [Workflow; 3] = [
        Workflow::TechResearch,
        Workflow::MarketAnalysis,
        Workflow::Optimization,
    ];

    /// Menu label.
    pub fn label(self) -> &'static str {
        match self {
            Workflow::TechResearch => "技术研究 (CTO)",
            Workflow::MarketAnalysis => "市场分析 (CMO)",
            Workflow::Optimization => "能力优化 (COO)",
        }
    }

    /// Prompt for the free-text field.
    pub fn input_prompt(self) -> &'static str {
        match self {
            Workflow::TechResearch => "请输入研究主题: ",
            Workflow::MarketAnalysis => "请输入分析领域: ",
            Workflow::Optimization => "请输入优化领域: ",
        }
    }

    pub fn start_notice(self) -> &'static str {
        match self {
            Workflow::TechResearch => "正在启动技术研究...",
            Workflow::MarketAnalysis => "正在启动市场分析...",
            Workflow::Optimization => "正在启动优化分析...",
        }
    }

    pub fn result_heading(self) -> &'static str {
        match self {
            Workflow::TechResearch => "研究结果：",
            Workflow::MarketAnalysis => "分析结果：",
            Workflow::Optimization => "优化建议：",
        }
    }

    /// The single agent this workflow runs.
    pub fn agent(self, tools: Vec<ToolHandle>) -> Agent {
        match self {
            Workflow::TechResearch => roles::cto(tools),
            Workflow::MarketAnalysis => roles::cmo(tools),
            Workflow::Optimization => roles::coo(tools),
        }
    }

    /// The single task this workflow runs, bound to `agent`.
    pub fn task(self, agent: Agent, input: &str) -> Task {
        match self {
            Workflow::TechResearch => tasks::research(agent, input),
            Workflow::MarketAnalysis => tasks::market(agent, input),
            Workflow::Optimization => tasks::optimization(agent, input),
        }
    }

    /// Assemble the one-agent, one-task crew.
    pub fn crew(self, input: &str, tools: Vec<ToolHandle>) -> Crew {
        let agent = self.agent(tools);
        let task = self.task(agent.clone(), input);
        Crew::new(vec![agent], vec![task])
    }
}

/// Runs a workflow and returns its printable result.
#[async_trait]
pub trait WorkflowExecutor: Send + Sync {
    async fn execute(&self, workflow: Workflow, input: &str) -> Result<String>;
}

/// Executes workflows against a chat model with a shared tool set.
pub struct CrewRunner {
    model: Arc<dyn ChatModel>,
    tools: Vec<ToolHandle>,
    config: CrewConfig,
    verbose: bool,
}

impl CrewRunner {
    pub fn new(model: Arc<dyn ChatModel>, tools: Vec<ToolHandle>) -> Self {
        Self {
            model,
            tools,
            config: CrewConfig::default(),
            verbose: true,
        }
    }

    pub fn with_config(mut self, config: CrewConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Build and kick off the crew for `workflow`.
    pub async fn run(&self, workflow: Workflow, input: &str) -> Result<CrewOutput> {
        let crew = workflow
            .crew(input, self.tools.clone())
            .with_config(self.config)
            .with_verbose(self.verbose);
        tracing::info!(?workflow, agent = %crew.agents[0].title, "Running workflow");
        crew.kickoff(self.model.as_ref()).await
    }
}

#[async_trait]
impl WorkflowExecutor for CrewRunner {
    async fn execute(&self, workflow: Workflow, input: &str) -> Result<String> {
        Ok(self.run(workflow, input).await?.raw)
    }
}
