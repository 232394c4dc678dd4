use crate::core::account_processor::extract_accounts;
use crate::core::classifier::{classify, Classification};
use crate::core::field_mapper::extract_scalars;
use crate::core::xml::{parse_document, ParseOptions};
use crate::domain::model::{ExtractedReport, GenericRecord, NormalizedReport, ParsedTree};
use crate::utils::error::Result;

/// 無狀態：辨識 schema 後產生正規化報告，否則原樣包成通用紀錄
pub fn assemble(tree: &ParsedTree) -> ExtractedReport {
    match classify(tree) {
        Classification::Unknown => ExtractedReport::Generic(GenericRecord::new(tree.clone())),
        Classification::KnownSchema(root) => {
            let (identity, summary) = extract_scalars(root);
            let (credit_card_accounts, addresses) = extract_accounts(root);
            ExtractedReport::Normalized(NormalizedReport {
                identity,
                summary,
                credit_card_accounts,
                addresses,
            })
        }
    }
}

/// 解析原始內容再組裝；只有無法解析時才回傳錯誤
pub fn extract_report(bytes: &[u8], options: &ParseOptions) -> Result<ExtractedReport> {
    let tree = parse_document(bytes, options)?;
    Ok(assemble(&tree))
}
