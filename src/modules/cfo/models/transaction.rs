use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

/// Income or expense flag carried by every transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CreditDebit {
    #[default]
    #[serde(rename = "CREDIT")]
    Credit,
    #[serde(rename = "DEBIT")]
    Debit,
}

impl CreditDebit {
    pub fn as_str(self) -> &'static str {
        match self {
            CreditDebit::Credit => "CREDIT",
            CreditDebit::Debit => "DEBIT",
        }
    }
}

impl std::fmt::Display for CreditDebit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One bank transaction from `categories.json`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub t_id: i64,
    #[serde(default)]
    pub flow: Option<String>,
    pub creditdebitindicator: CreditDebit,
    #[serde(deserialize_with = "deserialize_day")]
    pub date: NaiveDate,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub contragent_name: Option<String>,
    #[serde(default)]
    pub debtorparty_name: Option<String>,
    #[serde(default)]
    pub creditorparty_name: Option<String>,
    pub category: String,
    #[serde(
        default,
        serialize_with = "rust_decimal::serde::arbitrary_precision::serialize",
        deserialize_with = "deserialize_amount"
    )]
    pub corrected_amount: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bank: Option<String>,
}

/// Shape of `categories.json` as far as the typed routes care
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CategoriesFixture {
    #[serde(default)]
    pub all_transactions: Vec<Transaction>,
}

/// Accept `YYYY-MM-DD` or any longer timestamp that starts with it
fn deserialize_day<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    let day = raw.get(..10).unwrap_or(&raw);
    NaiveDate::parse_from_str(day, "%Y-%m-%d").map_err(serde::de::Error::custom)
}

/// A null or missing amount counts as zero
fn deserialize_amount<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    let amount = rust_decimal::serde::arbitrary_precision_option::deserialize(deserializer)?;
    Ok(amount.unwrap_or(Decimal::ZERO))
}
