//! ai-company: role-playing AI executives run from a console menu.
//!
//! - Role catalog: CTO, COO, CMO, CPO personas
//! - Task templates: technology research, market analysis, optimization
//! - Crew engine: sequential agentic loop over Claude with tool use
//! - Web search tool backed by DuckDuckGo

pub mod config;
pub mod crew;
pub mod llm;
pub mod menu;
pub mod output;
pub mod roles;
pub mod search;
pub mod tasks;
pub mod tools;
pub mod workflow;
