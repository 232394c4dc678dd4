use crate::domain::model::ParsedTree;
use regex::Regex;
use std::sync::LazyLock;

static LEADING_INTEGER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*([+-]?)([0-9]+)").expect("valid leading integer pattern"));

static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid whitespace pattern"));

/// 單一值或 list 一律轉成有序序列。
///
/// 轉換器會把只出現一次的子元素摺疊成單一值，這裡把它還原成單元素序列。
pub fn as_list(value: Option<&ParsedTree>) -> Vec<&ParsedTree> {
    match value {
        None => Vec::new(),
        Some(tree) if tree.is_empty() => Vec::new(),
        Some(ParsedTree::List(items)) => items.iter().collect(),
        Some(tree) => vec![tree],
    }
}

/// 字串轉非負整數的唯一規則：取開頭的十進位數字，其餘忽略。
///
/// 沒有數字為 0，負數為 0，溢位時取 `u64::MAX`。
pub fn parse_count(value: Option<&str>) -> u64 {
    let Some(caps) = value.and_then(|v| LEADING_INTEGER.captures(v)) else {
        return 0;
    };
    if &caps[1] == "-" {
        return 0;
    }
    caps[2].parse::<u64>().unwrap_or(u64::MAX)
}

pub fn normalize_whitespace(value: &str) -> String {
    WHITESPACE_RUN.replace_all(value.trim(), " ").into_owned()
}
