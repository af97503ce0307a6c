//! Command-line and environment configuration.
//!
//! `.env` in the working directory is loaded before arguments are parsed, so
//! every `env = ...` fallback below can come from that file.

use std::path::PathBuf;

use clap::Parser;

use crate::crew::{CrewConfig, DEFAULT_MAX_ITERATIONS, DEFAULT_MAX_TOKENS};
use crate::llm::{DEFAULT_API_BASE, DEFAULT_MODEL};
use crate::search::DEFAULT_MAX_RESULTS;

#[derive(Debug, Parser)]
#[command(name = "ai-company", about = "AI 公司系统 - 自主运营平台", version)]
pub struct Args {
    /// Anthropic API key (or set ANTHROPIC_API_KEY, e.g. in .env)
    #[arg(long, env = "ANTHROPIC_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Claude model every agent uses
    #[arg(long, env = "AI_COMPANY_MODEL", default_value = DEFAULT_MODEL)]
    pub model: String,

    /// Anthropic API base URL
    #[arg(long, env = "ANTHROPIC_BASE_URL", default_value = DEFAULT_API_BASE)]
    pub api_base: String,

    /// Completion token budget per model call
    #[arg(long, default_value_t = DEFAULT_MAX_TOKENS)]
    pub max_tokens: u32,

    /// Model round-trips allowed per task before forcing an answer
    #[arg(long, default_value_t = DEFAULT_MAX_ITERATIONS)]
    pub max_iterations: usize,

    /// Search hits returned to the agent per query
    #[arg(long, default_value_t = DEFAULT_MAX_RESULTS)]
    pub max_results: usize,

    /// Hide agent progress lines
    #[arg(long, short)]
    pub quiet: bool,
}

impl Args {
    pub fn crew_config(&self) -> CrewConfig {
        CrewConfig {
            max_iterations: self.max_iterations,
            max_tokens: self.max_tokens,
        }
    }
}

/// Load `.env` if present. A missing file is not an error.
pub fn load_dotenv() -> Option<PathBuf> {
    match dotenvy::dotenv() {
        Ok(path) => Some(path),
        Err(e) if e.not_found() => None,
        Err(e) => {
            eprintln!("Warning: can't load .env: {e}");
            None
        }
    }
}
