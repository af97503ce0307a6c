//! Role catalog and agent factory.
//!
//! Four executive personas. Each agent is plain configuration: title, goal,
//! backstory and the tools it may call.

use std::fmt;

use crate::tools::ToolHandle;

/// Executive roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Cto,
    Coo,
    Cmo,
    Cpo,
}

impl Role {
    pub const ALL: [Role; 4] = [Role::Cto, Role::Coo, Role::Cmo, Role::Cpo];

    pub fn title(self) -> &'static str {
        match self {
            Role::Cto => "首席技术官 (CTO)",
            Role::Coo => "首席运营官 (COO)",
            Role::Cmo => "首席市场官 (CMO)",
            Role::Cpo => "首席产品官 (CPO)",
        }
    }

    pub fn goal(self) -> &'static str {
        match self {
            Role::Cto => "持续追踪AI领域前沿技术，将新技术转化为公司能力",
            Role::Coo => "优化公司运营效率，持续提升系统能力",
            Role::Cmo => "敏锐洞察市场机会，识别商业变现可能",
            Role::Cpo => "将商业想法转化为可交付的产品和服务",
        }
    }

    pub fn backstory(self) -> &'static str {
        match self {
            Role::Cto => {
                "您是公司的首席技术官，拥有深厚的技术背景和敏锐的技术洞察力。\n\
                 您的职责是确保公司始终掌握最新技术，保持竞争优势。\n\
                 您擅长技术调研、知识转化和技术路线规划。"
            }
            Role::Coo => {
                "您是公司的首席运营官，精通系统优化和流程改进。\n\
                 您的职责是评估现有能力，找出差距，制定并执行优化方案。\n\
                 您擅长数据分析、流程优化和质量控制。"
            }
            Role::Cmo => {
                "您是公司的首席市场官，拥有敏锐的商业嗅觉和出色的分析能力。\n\
                 您的职责是扫描市场动态，发现机会，评估可行性。\n\
                 您擅长市场分析、竞争分析和商业策划。"
            }
            Role::Cpo => {
                "您是公司的首席产品官，拥有出色的产品开发和项目管理能力。\n\
                 您的职责是执行项目，开发产品，确保交付质量。\n\
                 您擅长产品设计、代码开发和项目管理。"
            }
        }
    }
}

/// A configured persona handed to the crew engine.
#[derive(Clone)]
pub struct Agent {
    pub role: Role,
    pub title: String,
    pub goal: String,
    pub backstory: String,
    pub tools: Vec<ToolHandle>,
    pub verbose: bool,
    pub allow_delegation: bool,
}

impl Agent {
    /// Build the agent for a catalog role.
    pub fn for_role(role: Role, tools: Vec<ToolHandle>) -> Self {
        Self {
            role,
            title: role.title().to_string(),
            goal: role.goal().to_string(),
            backstory: role.backstory().to_string(),
            tools,
            verbose: true,
            allow_delegation: false,
        }
    }

    /// System prompt that puts the model in character.
    pub fn system_prompt(&self) -> String {
        format!(
            "You are {}. {}\nYour personal goal is: {}",
            self.title, self.backstory, self.goal
        )
    }
}

impl fmt::Debug for Agent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Agent")
            .field("title", &self.title)
            .field("goal", &self.goal)
            .field("tools", &self.tools.iter().map(|t| t.name()).collect::<Vec<_>>())
            .field("verbose", &self.verbose)
            .field("allow_delegation", &self.allow_delegation)
            .finish()
    }
}

/// CTO: tracks frontier technology.
pub fn cto(tools: Vec<ToolHandle>) -> Agent {
    Agent::for_role(Role::Cto, tools)
}

/// COO: operational efficiency.
pub fn coo(tools: Vec<ToolHandle>) -> Agent {
    Agent::for_role(Role::Coo, tools)
}

/// CMO: market opportunities.
pub fn cmo(tools: Vec<ToolHandle>) -> Agent {
    Agent::for_role(Role::Cmo, tools)
}

/// CPO: turns ideas into products. No workflow uses it yet.
pub fn cpo(tools: Vec<ToolHandle>) -> Agent {
    Agent::for_role(Role::Cpo, tools)
}
