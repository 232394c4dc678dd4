use crate::core::coerce::{as_list, normalize_whitespace};
use crate::core::field_mapper::{count_at, ACCOUNT_LIST};
use crate::core::navigator::{get_string, get_text, get_text_or, lookup};
use crate::domain::model::{AddressEntry, CreditCardAccount, ParsedTree};
use std::collections::HashSet;

/// 信用卡帳戶的帳戶類型代碼
pub const CREDIT_CARD_ACCOUNT_TYPE: &str = "10";

const ACCOUNT_TYPE: &str = "Account_Type";
const ACCOUNT_NUMBER: &str = "Account_Number";
const SUBSCRIBER_NAME: &str = "Subscriber_Name";
const AMOUNT_PAST_DUE: &str = "Amount_Past_Due";
const CURRENT_BALANCE: &str = "Current_Balance";

const ADDRESS_DETAILS: &str = "CAIS_Holder_Address_Details";
const ADDRESS_LINES: [&str; 3] = [
    "First_Line_Of_Address_non_normalized",
    "Second_Line_Of_Address_non_normalized",
    "Third_Line_Of_Address_non_normalized",
];
const CITY: &str = "City_non_normalized";
const STATE: &str = "State_non_normalized";
const ZIP: &str = "ZIP_Postal_Code_non_normalized";

/// 依帳戶順序收集信用卡帳戶與去重後的地址
pub fn extract_accounts(root: &ParsedTree) -> (Vec<CreditCardAccount>, Vec<AddressEntry>) {
    let mut credit_cards = Vec::new();
    let mut addresses = AddressBook::default();

    for account in as_list(lookup(root, ACCOUNT_LIST)) {
        if let Some(card) = credit_card_from(account) {
            credit_cards.push(card);
        }
        for address in as_list(lookup(account, ADDRESS_DETAILS)) {
            addresses.record(address);
        }
    }

    (credit_cards, addresses.into_entries())
}

fn credit_card_from(account: &ParsedTree) -> Option<CreditCardAccount> {
    let account_type = get_text(account, ACCOUNT_TYPE)?;
    if account_type != CREDIT_CARD_ACCOUNT_TYPE {
        return None;
    }

    Some(CreditCardAccount {
        account_number: get_string(account, ACCOUNT_NUMBER),
        bank_name: get_text_or(account, SUBSCRIBER_NAME, "").trim().to_string(),
        account_type_code: account_type.to_string(),
        overdue_amount: count_at(account, AMOUNT_PAST_DUE),
        current_balance: count_at(account, CURRENT_BALANCE),
    })
}

/// 依首次出現順序保存地址，以正規化後的完整地址去重
#[derive(Debug, Default)]
struct AddressBook {
    seen: HashSet<String>,
    entries: Vec<AddressEntry>,
}

impl AddressBook {
    fn record(&mut self, address: &ParsedTree) {
        let full_address = full_address(address);
        if full_address.is_empty() || self.seen.contains(&full_address) {
            return;
        }

        self.seen.insert(full_address.clone());
        self.entries.push(AddressEntry {
            full_address,
            city: get_string(address, CITY),
            state_code: get_string(address, STATE),
            zip: get_string(address, ZIP),
        });
    }

    fn into_entries(self) -> Vec<AddressEntry> {
        self.entries
    }
}

// TODO: 若 schema 出現第四行地址欄位，需要決定是否併入完整地址
fn full_address(address: &ParsedTree) -> String {
    let joined = ADDRESS_LINES
        .iter()
        .map(|line| get_text_or(address, line, ""))
        .collect::<Vec<_>>()
        .join(" ");
    normalize_whitespace(&joined)
}
