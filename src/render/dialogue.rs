//! Dialogue transcripts rendered as knowledge-base articles.

use crate::error::Result;
use crate::model::{DialogueTurn, KeyInfo, TurnRole};
use crate::parser::dialogue::clean_dialogue_text;

/// Document returned for empty input.
pub const EMPTY_DIALOGUE_DOCUMENT: &str = "# 空内容\n\n请提供需要转换的AI对话文本。";

const STEP_KEYWORDS: &[&str] = &["步骤", "流程", "方法", "过程"];
const LISTING_KEYWORDS: &[&str] = &["包括", "包含", "有以下", "如下"];
const PLAN_KEYWORDS: &[&str] = &["项目", "计划"];

const ARTICLE_FOOTER: &[&str] = &[
    "---",
    "",
    "## 💡 使用建议",
    "",
    "1. **复制优化后的内容**到知识库",
    "2. **根据需要调整**标题和格式",
    "3. **添加标签**便于后续检索",
    "4. **关联相关文档**建立知识网络",
    "",
    "*本文档由 AI对话转换工具自动生成*",
];

const TEMPLATE_FOOTER: &[&str] = &[
    "---",
    "",
    "## 💡 使用说明",
    "",
    "1. **完善内容**：根据上述结构填充具体内容",
    "2. **调整格式**：根据实际需要修改标题和层级",
    "3. **添加细节**：补充相关的详细信息",
    "4. **定期更新**：保持文档的时效性",
    "",
    "*本模板由 AI对话转换工具生成*",
];

const PLAN_OUTLINE: &[&str] = &[
    "### 1. 项目概述",
    "- 项目背景",
    "- 项目目标",
    "- 预期成果",
    "",
    "### 2. 详细规划",
    "- 时间安排",
    "- 资源配置",
    "- 风险评估",
    "",
    "### 3. 执行计划",
    "- 阶段划分",
    "- 里程碑设置",
    "- 责任分工",
    "",
    "### 4. 监控与评估",
    "- 进度跟踪",
    "- 质量控制",
    "- 效果评估",
    "",
];

const GENERIC_OUTLINE: &[&str] = &[
    "### 1. 主要内容",
    "- 核心要点",
    "- 详细说明",
    "",
    "### 2. 相关信息",
    "- 背景资料",
    "- 参考资源",
    "",
    "### 3. 后续行动",
    "- 下一步计划",
    "- 注意事项",
    "",
];

/// Render detected turns as a knowledge article.
///
/// `full_text` is the cleaned transcript, used when no turns were detected.
pub fn to_dialogue_article(
    turns: &[DialogueTurn],
    info: &KeyInfo,
    full_text: &str,
) -> Result<String> {
    let mut lines: Vec<String> = Vec::new();

    lines.push(format!("# {}", info.title.as_deref().unwrap_or("AI对话记录")));
    lines.push(String::new());
    lines.push("## 📋 对话概述".to_string());
    lines.push(String::new());
    if info.has_keywords() {
        lines.push(format!("**关键词：** {}", info.keywords.join("、")));
        lines.push(String::new());
    }

    if turns.is_empty() {
        lines.push("## 📝 内容详情".to_string());
        lines.push(String::new());
        lines.push(full_text.to_string());
        lines.push(String::new());
    } else {
        lines.push("## 💬 对话内容".to_string());
        lines.push(String::new());
        for (i, turn) in turns.iter().enumerate() {
            match turn.role {
                TurnRole::User => {
                    lines.push(format!("### {}. 用户需求", i + 1));
                    lines.push(String::new());
                    lines.push(format!("**问题：** {}", turn.text));
                    lines.push(String::new());
                }
                TurnRole::Content => push_content(&mut lines, &turn.text),
            }
        }
    }

    lines.extend(ARTICLE_FOOTER.iter().map(|l| l.to_string()));
    Ok(lines.join("\n"))
}

fn push_content(lines: &mut Vec<String>, content: &str) {
    if contains_any(content, STEP_KEYWORDS) {
        lines.push("**解决方案：**".to_string());
        lines.push(String::new());
        let steps = content
            .split(['。', '！', '？'])
            .map(str::trim)
            .filter(|s| !s.is_empty());
        for (j, step) in steps.enumerate() {
            lines.push(format!("{}. {}", j + 1, step));
        }
        lines.push(String::new());
    } else if contains_any(content, LISTING_KEYWORDS) {
        lines.push("**详细说明：**".to_string());
        lines.push(String::new());
        lines.push(content.to_string());
        lines.push(String::new());
    } else {
        lines.push("**内容：**".to_string());
        lines.push(String::new());
        lines.push(content.to_string());
        lines.push(String::new());
    }
}

/// Render a single request with the fixed outline template.
pub fn to_request_template(text: &str, info: &KeyInfo) -> Result<String> {
    let cleaned = clean_dialogue_text(text);
    let mut lines: Vec<String> = Vec::new();

    lines.push(format!("# {}", info.title.as_deref().unwrap_or("项目规划文档")));
    lines.push(String::new());
    lines.push("## 📋 基本信息".to_string());
    lines.push(String::new());
    lines.push(format!("**创建需求：** {}", cleaned));
    lines.push(String::new());
    if info.has_keywords() {
        lines.push(format!("**关键词：** {}", info.keywords.join(", ")));
        lines.push(String::new());
    }

    lines.push("## 📖 建议文档结构".to_string());
    lines.push(String::new());
    let outline = if contains_any(&cleaned, PLAN_KEYWORDS) {
        PLAN_OUTLINE
    } else {
        GENERIC_OUTLINE
    };
    lines.extend(outline.iter().map(|l| l.to_string()));
    lines.extend(TEMPLATE_FOOTER.iter().map(|l| l.to_string()));
    Ok(lines.join("\n"))
}

fn contains_any(text: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| text.contains(k))
}
