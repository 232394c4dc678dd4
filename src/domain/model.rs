use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// 由標記語言轉換而來的通用樹狀結構，尚未套用任何 schema 解讀。
///
/// 轉換器會把只出現一次的子元素摺疊成單一值，重複出現的才會變成 `List`，
/// 所以呼叫端不能假設某個節點一定是 list。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParsedTree {
    Scalar(String),
    List(Vec<ParsedTree>),
    Mapping(BTreeMap<String, ParsedTree>),
}

/// 帶屬性的元素，其文字內容放在這個 key 底下
pub const TEXT_KEY: &str = "_";
/// 元素屬性放在這個 key 底下
pub const ATTRIBUTES_KEY: &str = "$";

impl ParsedTree {
    pub fn as_mapping(&self) -> Option<&BTreeMap<String, ParsedTree>> {
        match self {
            ParsedTree::Mapping(map) => Some(map),
            _ => None,
        }
    }

    pub fn is_mapping(&self) -> bool {
        matches!(self, ParsedTree::Mapping(_))
    }

    /// 節點的文字內容：scalar 本身，或帶屬性元素的 `_` 文字
    pub fn text(&self) -> Option<&str> {
        match self {
            ParsedTree::Scalar(s) => Some(s),
            ParsedTree::Mapping(map) => match map.get(TEXT_KEY) {
                Some(ParsedTree::Scalar(s)) => Some(s),
                _ => None,
            },
            ParsedTree::List(_) => None,
        }
    }

    /// 空字串、空 list、空 mapping 都視為沒有值
    pub fn is_empty(&self) -> bool {
        match self {
            ParsedTree::Scalar(s) => s.is_empty(),
            ParsedTree::List(items) => items.is_empty(),
            ParsedTree::Mapping(map) => map.is_empty(),
        }
    }
}

impl From<&str> for ParsedTree {
    fn from(value: &str) -> Self {
        ParsedTree::Scalar(value.to_string())
    }
}

impl From<String> for ParsedTree {
    fn from(value: String) -> Self {
        ParsedTree::Scalar(value)
    }
}

impl From<serde_json::Value> for ParsedTree {
    /// 方便測試與外部轉換器直接餵 JSON；null 與空值都轉成空字串，
    /// 數字與布林轉成其字串表示。
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => ParsedTree::Scalar(String::new()),
            serde_json::Value::Bool(b) => ParsedTree::Scalar(b.to_string()),
            serde_json::Value::Number(n) => ParsedTree::Scalar(n.to_string()),
            serde_json::Value::String(s) => ParsedTree::Scalar(s),
            serde_json::Value::Array(items) => {
                ParsedTree::List(items.into_iter().map(ParsedTree::from).collect())
            }
            serde_json::Value::Object(obj) => ParsedTree::Mapping(
                obj.into_iter()
                    .map(|(key, value)| (key, ParsedTree::from(value)))
                    .collect(),
            ),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    pub name: String,
    pub mobile: Option<String>,
    pub pan: Option<String>,
    pub credit_score: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub total_accounts: u64,
    pub active_accounts: u64,
    pub closed_accounts: u64,
    pub current_balance: u64,
    pub secured_balance: u64,
    pub unsecured_balance: u64,
    pub recent_enquiries: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditCardAccount {
    pub account_number: Option<String>,
    pub bank_name: String,
    pub account_type_code: String,
    pub overdue_amount: u64,
    pub current_balance: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressEntry {
    pub full_address: String,
    pub city: Option<String>,
    pub state_code: Option<String>,
    pub zip: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedReport {
    pub identity: Identity,
    pub summary: Summary,
    pub credit_card_accounts: Vec<CreditCardAccount>,
    pub addresses: Vec<AddressEntry>,
}

/// 無法辨識 schema 的文件：原樣保留整棵樹
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenericRecord {
    pub is_generic: bool,
    pub raw_tree: ParsedTree,
}

impl GenericRecord {
    pub fn new(raw_tree: ParsedTree) -> Self {
        Self {
            is_generic: true,
            raw_tree,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ExtractedReport {
    Normalized(NormalizedReport),
    Generic(GenericRecord),
}

impl ExtractedReport {
    pub fn is_generic(&self) -> bool {
        matches!(self, ExtractedReport::Generic(_))
    }

    pub fn as_normalized(&self) -> Option<&NormalizedReport> {
        match self {
            ExtractedReport::Normalized(report) => Some(report),
            ExtractedReport::Generic(_) => None,
        }
    }

    pub fn as_generic(&self) -> Option<&GenericRecord> {
        match self {
            ExtractedReport::Generic(record) => Some(record),
            ExtractedReport::Normalized(_) => None,
        }
    }
}

/// 上傳後、解析前的原始文件
#[derive(Debug, Clone)]
pub struct SourceDocument {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// 持久化層保存的外層資料：id 與建立時間由呼叫端附加
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredReport {
    pub id: Uuid,
    pub file_name: String,
    pub created_at: DateTime<Utc>,
    #[serde(flatten)]
    pub report: ExtractedReport,
}

impl StoredReport {
    pub fn new(file_name: impl Into<String>, report: ExtractedReport) -> Self {
        Self {
            id: Uuid::new_v4(),
            file_name: file_name.into(),
            created_at: Utc::now(),
            report,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parsed_tree_from_json() {
        let tree = ParsedTree::from(json!({"a": {"b": ["1", 2]}, "c": null}));
        let map = tree.as_mapping().unwrap();
        assert_eq!(map["c"], ParsedTree::Scalar(String::new()));
        assert_eq!(
            map["a"].as_mapping().unwrap()["b"],
            ParsedTree::List(vec!["1".into(), "2".into()])
        );
    }

    #[test]
    fn test_text_reads_attribute_element_text() {
        let tree = ParsedTree::from(json!({"_": "720", "$": {"type": "bureau"}}));
        assert_eq!(tree.text(), Some("720"));
        assert_eq!(ParsedTree::List(vec![]).text(), None);
    }

    #[test]
    fn test_generic_record_serializes_flag_and_raw_tree() {
        let record = GenericRecord::new(ParsedTree::from(json!({"Other": {"x": "1"}})));
        let value = serde_json::to_value(ExtractedReport::Generic(record)).unwrap();
        assert_eq!(
            value,
            json!({"isGeneric": true, "rawTree": {"Other": {"x": "1"}}})
        );
    }

    #[test]
    fn test_stored_report_json_roundtrip_keeps_variant() {
        let stored = StoredReport::new(
            "report.xml",
            ExtractedReport::Normalized(NormalizedReport::default()),
        );
        let text = serde_json::to_string(&stored).unwrap();
        assert!(text.contains("\"fileName\":\"report.xml\""));
        assert!(text.contains("\"creditCardAccounts\":[]"));

        let back: StoredReport = serde_json::from_str(&text).unwrap();
        assert_eq!(back, stored);
        assert!(!back.report.is_generic());
    }
}
