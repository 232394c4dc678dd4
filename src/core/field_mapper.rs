use crate::core::coerce::{as_list, parse_count};
use crate::core::navigator::{get_string, get_text, get_text_or, lookup};
use crate::domain::model::{Identity, ParsedTree, Summary};

const APPLICANT: &str = "Current_Application.Current_Application_Details.Current_Applicant_Details";
const FIRST_NAME: &str = "First_Name";
const LAST_NAME: &str = "Last_Name";
const MOBILE: &str = "MobilePhoneNumber";

pub(crate) const ACCOUNT_LIST: &str = "CAIS_Account.CAIS_Account_DETAILS";
const HOLDER_DETAILS: &str = "CAIS_Holder_Details";
const HOLDER_PAN: &str = "Income_TAX_PAN";

const BUREAU_SCORE: &str = "SCORE.BureauScore";

const CREDIT_ACCOUNT_TOTAL: &str = "CAIS_Account.CAIS_Summary.Credit_Account.CreditAccountTotal";
const CREDIT_ACCOUNT_ACTIVE: &str = "CAIS_Account.CAIS_Summary.Credit_Account.CreditAccountActive";
const CREDIT_ACCOUNT_CLOSED: &str = "CAIS_Account.CAIS_Summary.Credit_Account.CreditAccountClosed";

const BALANCE_ALL: &str = "CAIS_Account.CAIS_Summary.Total_Outstanding_Balance.Outstanding_Balance_All";
const BALANCE_SECURED: &str =
    "CAIS_Account.CAIS_Summary.Total_Outstanding_Balance.Outstanding_Balance_Secured";
const BALANCE_UNSECURED: &str =
    "CAIS_Account.CAIS_Summary.Total_Outstanding_Balance.Outstanding_Balance_UnSecured";

const ENQUIRIES_LAST_7_DAYS: &str = "TotalCAPS_Summary.TotalCAPSLast7Days";

/// 從報告根節點抽出身分與摘要欄位，純函式
pub fn extract_scalars(root: &ParsedTree) -> (Identity, Summary) {
    (extract_identity(root), extract_summary(root))
}

pub fn extract_identity(root: &ParsedTree) -> Identity {
    let applicant = lookup(root, APPLICANT);
    let first = applicant.map_or("", |a| get_text_or(a, FIRST_NAME, ""));
    let last = applicant.map_or("", |a| get_text_or(a, LAST_NAME, ""));

    Identity {
        name: format!("{} {}", first, last).trim().to_string(),
        mobile: applicant.and_then(|a| get_string(a, MOBILE)),
        pan: first_holder_pan(root),
        credit_score: count_at(root, BUREAU_SCORE),
    }
}

pub fn extract_summary(root: &ParsedTree) -> Summary {
    Summary {
        total_accounts: count_at(root, CREDIT_ACCOUNT_TOTAL),
        active_accounts: count_at(root, CREDIT_ACCOUNT_ACTIVE),
        closed_accounts: count_at(root, CREDIT_ACCOUNT_CLOSED),
        current_balance: count_at(root, BALANCE_ALL),
        secured_balance: count_at(root, BALANCE_SECURED),
        unsecured_balance: count_at(root, BALANCE_UNSECURED),
        recent_enquiries: count_at(root, ENQUIRIES_LAST_7_DAYS),
    }
}

// 只看第一個帳戶的第一位持有人
fn first_holder_pan(root: &ParsedTree) -> Option<String> {
    let accounts = as_list(lookup(root, ACCOUNT_LIST));
    let first_account = accounts.first()?;
    let holders = as_list(lookup(first_account, HOLDER_DETAILS));
    get_string(holders.first()?, HOLDER_PAN)
}

pub(crate) fn count_at(tree: &ParsedTree, path: &str) -> u64 {
    parse_count(get_text(tree, path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn report_root() -> ParsedTree {
        ParsedTree::from(json!({
            "Current_Application": {
                "Current_Application_Details": {
                    "Current_Applicant_Details": {
                        "First_Name": "Sagar",
                        "Last_Name": "Ugale",
                        "MobilePhoneNumber": "9819137672"
                    }
                }
            },
            "SCORE": {"BureauScore": "719"},
            "CAIS_Account": {
                "CAIS_Summary": {
                    "Credit_Account": {
                        "CreditAccountTotal": "4",
                        "CreditAccountActive": "3",
                        "CreditAccountClosed": "1"
                    },
                    "Total_Outstanding_Balance": {
                        "Outstanding_Balance_Secured": "85000",
                        "Outstanding_Balance_UnSecured": "160000",
                        "Outstanding_Balance_All": "245000"
                    }
                },
                "CAIS_Account_DETAILS": [
                    {"CAIS_Holder_Details": {"Income_TAX_PAN": "AOZPB0247P"}},
                    {"CAIS_Holder_Details": {"Income_TAX_PAN": "ZZZZZ9999Z"}}
                ]
            },
            "TotalCAPS_Summary": {"TotalCAPSLast7Days": "2"}
        }))
    }

    #[test]
    fn test_extract_full_identity_and_summary() {
        let (identity, summary) = extract_scalars(&report_root());

        assert_eq!(identity.name, "Sagar Ugale");
        assert_eq!(identity.mobile.as_deref(), Some("9819137672"));
        assert_eq!(identity.pan.as_deref(), Some("AOZPB0247P"));
        assert_eq!(identity.credit_score, 719);

        assert_eq!(
            summary,
            Summary {
                total_accounts: 4,
                active_accounts: 3,
                closed_accounts: 1,
                current_balance: 245000,
                secured_balance: 85000,
                unsecured_balance: 160000,
                recent_enquiries: 2,
            }
        );
    }

    #[test]
    fn test_empty_root_defaults_everything() {
        let (identity, summary) = extract_scalars(&ParsedTree::from(json!({})));
        assert_eq!(identity, Identity::default());
        assert_eq!(summary, Summary::default());
    }

    #[test]
    fn test_name_with_single_part_is_trimmed() {
        let root = ParsedTree::from(json!({
            "Current_Application": {"Current_Application_Details": {
                "Current_Applicant_Details": {"Last_Name": "Ugale"}
            }}
        }));
        assert_eq!(extract_identity(&root).name, "Ugale");
    }

    #[test]
    fn test_non_numeric_fields_default_to_zero() {
        let root = ParsedTree::from(json!({
            "SCORE": {"BureauScore": "N/A"},
            "TotalCAPS_Summary": {"TotalCAPSLast7Days": ""}
        }));
        let (identity, summary) = extract_scalars(&root);
        assert_eq!(identity.credit_score, 0);
        assert_eq!(summary.recent_enquiries, 0);
    }

    #[test]
    fn test_pan_from_singleton_account() {
        let root = ParsedTree::from(json!({
            "CAIS_Account": {"CAIS_Account_DETAILS": {
                "CAIS_Holder_Details": [
                    {"Income_TAX_PAN": "FIRST1234A"},
                    {"Income_TAX_PAN": "OTHER1234B"}
                ]
            }}
        }));
        assert_eq!(extract_identity(&root).pan.as_deref(), Some("FIRST1234A"));
    }

    #[test]
    fn test_pan_absent_when_first_account_lacks_it() {
        let root = ParsedTree::from(json!({
            "CAIS_Account": {"CAIS_Account_DETAILS": [
                {"Account_Type": "10"},
                {"CAIS_Holder_Details": {"Income_TAX_PAN": "SECOND123B"}}
            ]}
        }));
        assert_eq!(extract_identity(&root).pan, None);
    }
}
