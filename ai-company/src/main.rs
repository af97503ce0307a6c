//! ai-company: pick a workflow, give it a topic, read the agent's report.
//!
//!   1. 技术研究 (CTO)  — research a technology topic
//!   2. 市场分析 (CMO)  — analyse a market opportunity
//!   3. 能力优化 (COO)  — optimize a capability area
//!   4. 退出
//!
//! Requires ANTHROPIC_API_KEY (environment or .env) for options 1–3.

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;

use ai_company::config::{self, Args};
use ai_company::llm::LlmClient;
use ai_company::menu;
use ai_company::search::WebSearch;
use ai_company::tools::WebSearchTool;
use ai_company::workflow::CrewRunner;

#[tokio::main]
async fn main() -> Result<()> {
    let dotenv = config::load_dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ai_company=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let llm = LlmClient::new(args.api_key.clone().unwrap_or_default())
        .with_model(&args.model)
        .with_api_base(&args.api_base);
    let search = WebSearch::new()?.with_max_results(args.max_results);

    if let Some(path) = &dotenv {
        tracing::debug!(path = %path.display(), "Loaded .env");
    }
    tracing::debug!(model = %llm.model(), "Configured");

    let runner = CrewRunner::new(Arc::new(llm), vec![WebSearchTool::shared(search)])
        .with_config(args.crew_config())
        .with_verbose(!args.quiet);

    let stdin = std::io::stdin();
    let mut input = stdin.lock();
    let mut out = std::io::stdout();
    menu::run(&mut input, &mut out, &runner).await
}
