//! 以點分路徑安全地走訪 `ParsedTree`。
//!
//! 缺少的資料一律回傳預設值，不視為錯誤；其他模組都透過這裡讀取樹，
//! 不直接索引。

use crate::domain::model::ParsedTree;

/// 依序走訪路徑片段。遇到非 mapping、key 不存在、或值為空時回傳 `None`。
///
/// 數字片段可以索引 `List`，例如 `"0.CAIS_Holder_Details"`。
pub fn lookup_in<'a, I, S>(tree: &'a ParsedTree, segments: I) -> Option<&'a ParsedTree>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut current = tree;
    for segment in segments {
        let segment = segment.as_ref();
        current = match current {
            ParsedTree::Mapping(map) => map.get(segment)?,
            ParsedTree::List(items) => items.get(segment.parse::<usize>().ok()?)?,
            ParsedTree::Scalar(_) => return None,
        };
        if current.is_empty() {
            return None;
        }
    }
    Some(current)
}

/// `lookup_in` 的點分字串版本
pub fn lookup<'a>(tree: &'a ParsedTree, path: &str) -> Option<&'a ParsedTree> {
    if path.is_empty() {
        return (!tree.is_empty()).then_some(tree);
    }
    lookup_in(tree, path.split('.'))
}

pub fn get<'a>(tree: &'a ParsedTree, path: &str, default: &'a ParsedTree) -> &'a ParsedTree {
    lookup(tree, path).unwrap_or(default)
}

/// 讀取路徑上的文字，沒有值時為 `None`
pub fn get_text<'a>(tree: &'a ParsedTree, path: &str) -> Option<&'a str> {
    lookup(tree, path)
        .and_then(ParsedTree::text)
        .filter(|text| !text.is_empty())
}

pub fn get_text_or<'a>(tree: &'a ParsedTree, path: &str, default: &'a str) -> &'a str {
    get_text(tree, path).unwrap_or(default)
}

pub fn get_string(tree: &ParsedTree, path: &str) -> Option<String> {
    get_text(tree, path).map(str::to_string)
}
