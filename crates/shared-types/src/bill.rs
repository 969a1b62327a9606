use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

#[cfg(feature = "validation")]
use validator::Validate;

use crate::models::User;

/// Expense categories offered on the claim form, in display order.
pub const CATEGORIES: [&str; 5] = ["Travel", "Food", "Office Supplies", "Marketing", "Miscellaneous"];

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BillStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl BillStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BillStatus::Pending => "PENDING",
            BillStatus::Approved => "APPROVED",
            BillStatus::Rejected => "REJECTED",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "PENDING" => Some(BillStatus::Pending),
            "APPROVED" => Some(BillStatus::Approved),
            "REJECTED" => Some(BillStatus::Rejected),
            _ => None,
        }
    }
}

/// An expense claim. The wire shape doubles as the sheet row shape, so
/// every field tolerates the loose typing spreadsheet cells come back with.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct Bill {
    #[serde(deserialize_with = "lenient_string")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub employee_id: String,
    #[serde(default)]
    pub employee_name: String,
    /// `YYYY-MM-DD`.
    #[serde(default, deserialize_with = "lenient_date")]
    pub date: String,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub amount: f64,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image_url: String,
    #[serde(default, deserialize_with = "lenient_status")]
    pub status: BillStatus,
}

/// Fields an employee fills in when filing a claim.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "validation", derive(Validate))]
#[serde(rename_all = "camelCase")]
pub struct BillDraft {
    #[cfg_attr(
        feature = "validation",
        validate(length(equal = 10, message = "Date must be YYYY-MM-DD"))
    )]
    pub date: String,
    #[cfg_attr(
        feature = "validation",
        validate(range(min = 0.0, message = "Amount must be non-negative"))
    )]
    pub amount: f64,
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 1, message = "Category is required"))
    )]
    pub category: String,
    #[serde(default)]
    pub description: String,
    /// Data URL of the receipt image.
    #[serde(default)]
    pub image_url: String,
}

impl BillDraft {
    /// A blank claim dated `today`.
    pub fn new(today: &str) -> Self {
        Self {
            date: today.to_string(),
            amount: 0.0,
            category: CATEGORIES[0].to_string(),
            description: String::new(),
            image_url: String::new(),
        }
    }

    /// Merge AI-extracted receipt fields. Each field only overrides the
    /// draft when the analysis produced something usable.
    pub fn apply_analysis(&mut self, analysis: &ReceiptAnalysis) {
        if let Some(amount) = analysis.amount.filter(|a| *a != 0.0 && a.is_finite()) {
            self.amount = amount;
        }
        if let Some(category) = analysis.category.as_deref().and_then(match_category) {
            self.category = category.to_string();
        }
        if let Some(summary) = analysis.summary.as_deref().filter(|s| !s.is_empty()) {
            self.description = summary.to_string();
        }
        if let Some(date) = analysis.date.as_deref().filter(|d| !d.is_empty()) {
            self.date = normalize_bill_date(date);
        }
    }
}

/// Structured fields the AI extracts from a receipt photo.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ReceiptAnalysis {
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default, deserialize_with = "lenient_optional_amount")]
    pub amount: Option<f64>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
}

/// Case-insensitive lookup into [`CATEGORIES`].
pub fn match_category(raw: &str) -> Option<&'static str> {
    let raw = raw.trim();
    CATEGORIES
        .iter()
        .copied()
        .find(|c| c.eq_ignore_ascii_case(raw))
}

/// Keep the calendar-date prefix of a date or ISO timestamp.
pub fn normalize_bill_date(raw: &str) -> String {
    let raw = raw.trim();
    match raw.get(..10) {
        Some(prefix) if raw.len() > 10 && raw.as_bytes()[10] == b'T' => prefix.to_string(),
        _ => raw.to_string(),
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Loose {
    Num(f64),
    Text(String),
}

fn parse_amount(value: Loose) -> f64 {
    match value {
        Loose::Num(n) => n,
        Loose::Text(s) => s.trim().trim_start_matches(['$', '₹']).replace(',', "").parse().unwrap_or(0.0),
    }
}

fn lenient_amount<'de, D: Deserializer<'de>>(d: D) -> Result<f64, D::Error> {
    Ok(Option::<Loose>::deserialize(d)?.map(parse_amount).unwrap_or(0.0))
}

fn lenient_optional_amount<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
    Ok(Option::<Loose>::deserialize(d)?.map(parse_amount))
}

fn lenient_string<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    Ok(match Option::<Loose>::deserialize(d)? {
        Some(Loose::Num(n)) if n.fract() == 0.0 => format!("{}", n as i64),
        Some(Loose::Num(n)) => n.to_string(),
        Some(Loose::Text(s)) => s,
        None => String::new(),
    })
}

/// Unknown, blank or missing statuses read as pending.
fn lenient_status<'de, D: Deserializer<'de>>(d: D) -> Result<BillStatus, D::Error> {
    Ok(Option::<Loose>::deserialize(d)?
        .and_then(|v| match v {
            Loose::Text(s) => BillStatus::parse(s.trim()),
            Loose::Num(_) => None,
        })
        .unwrap_or_default())
}

fn lenient_date<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(d)?
        .map(|s| normalize_bill_date(&s))
        .unwrap_or_default())
}

/// Filters on the bills page. `None` means "all".
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema, utoipa::IntoParams))]
#[serde(rename_all = "camelCase")]
pub struct BillFilter {
    #[serde(default)]
    pub status: Option<BillStatus>,
    #[serde(default)]
    pub category: Option<String>,
    /// Inclusive lower bound, `YYYY-MM-DD`.
    #[serde(default)]
    pub start_date: Option<String>,
    /// Inclusive upper bound, `YYYY-MM-DD`.
    #[serde(default)]
    pub end_date: Option<String>,
}

impl BillFilter {
    pub fn is_active(&self) -> bool {
        self.status.is_some()
            || self.category.is_some()
            || self.start_date.as_deref().is_some_and(|d| !d.is_empty())
            || self.end_date.as_deref().is_some_and(|d| !d.is_empty())
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Date bounds compare as strings, which is chronological for ISO dates.
    pub fn matches(&self, bill: &Bill) -> bool {
        if self.status.is_some_and(|s| s != bill.status) {
            return false;
        }
        if self.category.as_deref().is_some_and(|c| c != bill.category) {
            return false;
        }
        if let Some(start) = self.start_date.as_deref().filter(|d| !d.is_empty()) {
            if bill.date.as_str() < start {
                return false;
            }
        }
        if let Some(end) = self.end_date.as_deref().filter(|d| !d.is_empty()) {
            if bill.date.as_str() > end {
                return false;
            }
        }
        true
    }

    pub fn apply<'a>(&self, bills: impl IntoIterator<Item = &'a Bill>) -> Vec<Bill> {
        bills.into_iter().filter(|b| self.matches(b)).cloned().collect()
    }
}

/// Owners see every bill; everyone else sees only their own.
pub fn scope_bills(bills: &[Bill], viewer: &User) -> Vec<Bill> {
    if viewer.role.is_owner() {
        bills.to_vec()
    } else {
        bills
            .iter()
            .filter(|b| b.employee_id == viewer.id)
            .cloned()
            .collect()
    }
}

/// Bills sharing one date.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BillGroup {
    pub date: String,
    pub items: Vec<Bill>,
    pub total: f64,
}

/// Group by date, newest date first. Order within a group is preserved.
pub fn group_by_date(bills: &[Bill]) -> Vec<BillGroup> {
    let mut groups: BTreeMap<&str, Vec<Bill>> = BTreeMap::new();
    for bill in bills {
        groups.entry(bill.date.as_str()).or_default().push(bill.clone());
    }
    groups
        .into_iter()
        .rev()
        .map(|(date, items)| BillGroup {
            date: date.to_string(),
            total: items.iter().map(|b| b.amount).sum(),
            items,
        })
        .collect()
}

/// Totals of approved and pending spend per `YYYY-MM` month, oldest first.
pub fn monthly_totals(bills: &[Bill]) -> Vec<(String, f64)> {
    let mut months: BTreeMap<String, f64> = BTreeMap::new();
    for bill in bills.iter().filter(|b| b.status != BillStatus::Rejected) {
        let month = bill.date.get(..7).unwrap_or(&bill.date).to_string();
        *months.entry(month).or_default() += bill.amount;
    }
    months.into_iter().collect()
}
