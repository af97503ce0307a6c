//! Task factory.
//!
//! A task is a description filled in with the user's phrase, the shape of
//! the expected answer, and the agent responsible for it. The phrase is
//! inserted as-is.

use crate::roles::Agent;

/// A unit of work bound to one agent.
#[derive(Debug, Clone)]
pub struct Task {
    pub description: String,
    pub expected_output: String,
    pub agent: Agent,
}

impl Task {
    /// User prompt for the agent, with prior task outputs as context.
    pub fn prompt(&self, context: &[String]) -> String {
        let mut prompt = format!(
            "Current Task: {}\n\nThis is the expected criteria for your final answer: {}\n\
             you MUST return the actual complete content as the final answer, not a summary.",
            self.description, self.expected_output
        );
        if !context.is_empty() {
            prompt.push_str("\n\nThis is the context you're working with:\n");
            prompt.push_str(&context.join("\n\n"));
        }
        prompt.push_str("\n\nBegin! This is VERY important to you, use the tools available and give your best Final Answer, your job depends on it!");
        prompt
    }
}

/// Technology research task.
pub fn research(agent: Agent, topic: &str) -> Task {
    Task {
        description: format!(
            "请深入研究以下技术主题：{topic}\n\
             \n\
             要求：\n\
             1. 搜索最新的技术发展和行业动态\n\
             2. 分析该技术的核心原理和应用场景\n\
             3. 评估该技术对公司能力的提升价值\n\
             4. 提出具体的技术应用建议"
        ),
        expected_output: "详细的技术调研报告，包含核心发现、应用建议和实施计划".to_string(),
        agent,
    }
}

/// Market opportunity analysis task.
pub fn market(agent: Agent, focus_area: &str) -> Task {
    Task {
        description: format!(
            "请分析以下市场的商业机会：{focus_area}\n\
             \n\
             要求：\n\
             1. 扫描市场现状和趋势\n\
             2. 识别潜在客户群体和需求\n\
             3. 评估竞争格局和机会\n\
             4. 提出可行的商业模式建议"
        ),
        expected_output: "市场分析报告，包含机会评估和商业建议".to_string(),
        agent,
    }
}

/// Capability optimization task.
pub fn optimization(agent: Agent, focus_area: &str) -> Task {
    Task {
        description: format!(
            "请分析并优化以下领域：{focus_area}\n\
             \n\
             要求：\n\
             1. 评估当前能力水平\n\
             2. 对比行业最佳实践\n\
             3. 识别差距和改进点\n\
             4. 制定优化方案"
        ),
        expected_output: "优化方案报告，包含差距分析和实施计划".to_string(),
        agent,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roles;

    #[test]
    fn research_topic_follows_lead_in() {
        let task = research(roles::cto(vec![]), "大语言模型推理优化");
        assert!(
            task.description
                .contains("请深入研究以下技术主题：大语言模型推理优化")
        );
        assert_eq!(task.agent.title, "首席技术官 (CTO)");
    }

    #[test]
    fn every_template_contains_phrase_verbatim() {
        let phrase = "  边缘 AI {x} & <b>硬件</b>  ";
        let tasks = [
            research(roles::cto(vec![]), phrase),
            market(roles::cmo(vec![]), phrase),
            optimization(roles::coo(vec![]), phrase),
        ];
        for task in &tasks {
            assert!(task.description.contains(phrase), "{}", task.description);
            assert!(!task.expected_output.is_empty());
        }
    }

    #[test]
    fn templates_list_four_requirements() {
        let task = market(roles::cmo(vec![]), "SaaS");
        assert!(task.description.contains("要求：\n1. "));
        assert!(task.description.contains("\n4. 提出可行的商业模式建议"));
    }

    #[test]
    fn prompt_includes_context_only_when_present() {
        let task = optimization(roles::coo(vec![]), "客服");
        let bare = task.prompt(&[]);
        assert!(bare.starts_with("Current Task: 请分析并优化以下领域：客服"));
        assert!(bare.contains("优化方案报告，包含差距分析和实施计划"));
        assert!(!bare.contains("context you're working with"));

        let with_ctx = task.prompt(&["earlier findings".to_string()]);
        assert!(with_ctx.contains("context you're working with:\nearlier findings"));
    }
}
