use crate::domain::model::ParsedTree;

/// 已知信用報告的根元素名稱
pub const REPORT_ROOT: &str = "INProfileResponse";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification<'a> {
    /// 符合報告 schema，攜帶根節點
    KnownSchema(&'a ParsedTree),
    Unknown,
}

/// 只做結構檢查：唯一的頂層 key 必須是報告根元素，且其值為 mapping。
/// 更深層的欄位缺漏交給各欄位的預設值處理。
pub fn classify(tree: &ParsedTree) -> Classification<'_> {
    let Some(map) = tree.as_mapping() else {
        return Classification::Unknown;
    };
    if map.len() != 1 {
        return Classification::Unknown;
    }
    match map.get(REPORT_ROOT) {
        Some(root) if root.is_mapping() => Classification::KnownSchema(root),
        _ => Classification::Unknown,
    }
}
