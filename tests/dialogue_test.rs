//! Integration tests for dialogue conversion.

use notefmt::parser::{detect_dialogue, extract_key_info};
use notefmt::render::EMPTY_DIALOGUE_DOCUMENT;
use notefmt::{convert_dialogue, DialogueMode, TurnRole};

const TRANSCRIPT: &str = "用户: 请帮我创建笔记，标题是\"周报模板\"
AI: 好的，我来帮您创建。首先整理本周计划。然后记录进展。
这是补充说明，属于上一段。
用户: 如何把它同步到手机？
助手: 打开设置即可。";

#[test]
fn test_one_user_and_one_content_part() {
    let turns = detect_dialogue("用户: 请帮我创建一个笔记\nAI: 好的，我来帮您创建。");
    assert_eq!(turns.len(), 2);

    let users: Vec<_> = turns.iter().filter(|t| t.role == TurnRole::User).collect();
    let contents: Vec<_> = turns.iter().filter(|t| t.role == TurnRole::Content).collect();
    assert_eq!(users.len(), 1);
    assert_eq!(contents.len(), 1);
    assert!(users[0].text.contains("请帮我创建一个笔记"));
    assert!(contents[0].text.contains("好的，我来帮您创建。"));
}

#[test]
fn test_continuation_lines_merge_into_open_part() {
    let turns = detect_dialogue(TRANSCRIPT);
    assert_eq!(turns.len(), 4);
    assert!(turns[1].text.ends_with("然后记录进展。 这是补充说明，属于上一段。"));
    assert_eq!(turns[3].role, TurnRole::Content);
}

#[test]
fn test_key_info_is_stable() {
    let first = extract_key_info(TRANSCRIPT);
    let second = extract_key_info(TRANSCRIPT);
    assert_eq!(first, second);
    assert_eq!(first.title.as_deref(), Some("周报模板"));
    assert!(first.keywords.contains(&"计划".to_string()));
    assert!(first.keywords.contains(&"笔记".to_string()));
}

#[test]
fn test_dialogue_article() {
    let output = convert_dialogue(TRANSCRIPT, DialogueMode::Dialogue);
    assert!(output.starts_with("# 周报模板"));
    assert!(output.contains("## 📋 对话概述"));
    assert!(output.contains("## 💬 对话内容"));
    assert!(output.contains("### 1. 用户需求"));
    assert!(output.contains("### 3. 用户需求"));
}

#[test]
fn test_request_template() {
    let output = convert_dialogue("请帮我创建项目规划", DialogueMode::Simple);
    assert!(output.contains("## 📋 基本信息"));
    assert!(output.contains("**创建需求：** 请帮我创建项目规划"));
    assert!(output.contains("### 1. 项目概述"));
}

#[test]
fn test_unlabelled_text_uses_content_details() {
    let output = convert_dialogue("", DialogueMode::Dialogue);
    assert_eq!(output, EMPTY_DIALOGUE_DOCUMENT);

    let output = convert_dialogue("一些随手记下的想法", DialogueMode::Dialogue);
    assert!(output.contains("**内容：**"));
    assert!(output.contains("一些随手记下的想法"));
}

#[test]
fn test_output_is_never_empty() {
    for input in ["", " ", "\n\n", "AI:", "用户:", "？", "\"\""] {
        for mode in [DialogueMode::Dialogue, DialogueMode::Simple] {
            assert!(!convert_dialogue(input, mode).trim().is_empty(), "{:?}", input);
        }
    }
}
