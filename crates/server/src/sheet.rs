use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use shared_types::{Bill, BillStatus, Coordinates};

/// Client for the spreadsheet macro that mirrors logins and bills.
///
/// Writes are `text/plain` POSTs carrying a JSON body with an `action`
/// discriminator; the macro answers with a redirect we do not read. Reads
/// are a plain GET returning a JSON array of bill rows.
#[derive(Clone, Debug)]
pub struct SheetClient {
    http: reqwest::Client,
    url: String,
}

/// One sign-in attempt, as recorded in the audit tab.
#[derive(Debug, Clone)]
pub struct LoginAudit {
    pub email: String,
    pub location: Option<Coordinates>,
    pub user_agent: String,
    pub at: DateTime<Utc>,
}

#[derive(Serialize)]
struct Action<'a, T: Serialize> {
    action: &'a str,
    #[serde(flatten)]
    body: T,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LoginRow<'a> {
    email: &'a str,
    location: String,
    user_agent: &'a str,
    timestamp: String,
}

#[derive(Serialize)]
struct StatusRow<'a> {
    id: &'a str,
    status: BillStatus,
}

impl SheetClient {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            url: url.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    async fn post_action<T: Serialize>(&self, action: &str, body: T) -> Result<(), String> {
        let payload = serde_json::to_string(&Action { action, body })
            .map_err(|e| format!("Failed to encode {action} payload: {e}"))?;
        let response = self
            .http
            .post(&self.url)
            .header(reqwest::header::CONTENT_TYPE, "text/plain")
            .body(payload)
            .send()
            .await
            .map_err(|e| format!("Sheet request failed: {e}"))?;

        let status = response.status();
        if !(status.is_success() || status.is_redirection()) {
            return Err(format!("Sheet macro error ({status}) for {action}"));
        }
        Ok(())
    }

    /// Record a sign-in attempt. The password is never forwarded.
    #[tracing::instrument(skip(self, audit), fields(email = %audit.email))]
    pub async fn log_login(&self, audit: &LoginAudit) {
        let row = LoginRow {
            email: &audit.email,
            location: audit
                .location
                .map(|c| format!("{}, {}", c.lat, c.lng))
                .unwrap_or_else(|| "Permission Denied/Unknown".to_string()),
            user_agent: &audit.user_agent,
            timestamp: audit.at.to_rfc3339_opts(SecondsFormat::Millis, true),
        };
        match self.post_action("login", row).await {
            Ok(()) => tracing::info!("Logged sign-in to sheet"),
            Err(e) => tracing::error!(error = %e, "Failed to log sign-in to sheet"),
        }
    }

    #[tracing::instrument(skip(self, bill), fields(bill_id = %bill.id))]
    pub async fn create_bill(&self, bill: &Bill) -> bool {
        match self.post_action("createBill", bill).await {
            Ok(()) => {
                tracing::info!("Bill created in sheet");
                true
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to create bill in sheet");
                false
            }
        }
    }

    #[tracing::instrument(skip(self))]
    pub async fn update_bill_status(&self, id: &str, status: BillStatus) -> bool {
        match self.post_action("updateBillStatus", StatusRow { id, status }).await {
            Ok(()) => {
                tracing::info!("Bill status updated in sheet");
                true
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to update bill status in sheet");
                false
            }
        }
    }

    /// All bill rows. Any failure is logged and reads as an empty list.
    #[tracing::instrument(skip(self))]
    pub async fn fetch_bills(&self) -> Vec<Bill> {
        match self.try_fetch_bills().await {
            Ok(bills) => bills,
            Err(e) => {
                tracing::error!(error = %e, "Failed to fetch bills from sheet");
                Vec::new()
            }
        }
    }

    async fn try_fetch_bills(&self) -> Result<Vec<Bill>, String> {
        let response = self
            .http
            .get(&self.url)
            .send()
            .await
            .map_err(|e| format!("Sheet request failed: {e}"))?;
        if !response.status().is_success() {
            return Err(format!("Sheet macro error ({})", response.status()));
        }
        let rows = response
            .json::<Vec<serde_json::Value>>()
            .await
            .map_err(|e| format!("Unreadable bill rows: {e}"))?;
        Ok(decode_rows(rows))
    }
}

/// Keeps every row that reads as a bill; a bad row is logged and skipped.
fn decode_rows(rows: Vec<serde_json::Value>) -> Vec<Bill> {
    rows.into_iter()
        .enumerate()
        .filter_map(|(index, row)| match serde_json::from_value::<Bill>(row) {
            Ok(bill) => Some(bill),
            Err(e) => {
                tracing::warn!(row = index, error = %e, "Skipping unreadable bill row");
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn one_bad_row_does_not_hide_the_rest() {
        let rows = vec![
            json!({"id": "b1", "employeeId": "2", "amount": 10, "status": "APPROVED"}),
            json!({"employeeId": "3", "amount": 5}),
            json!("not a row"),
            json!({"id": 7, "employeeId": 3, "amount": "12.50", "status": ""}),
        ];
        let bills = decode_rows(rows);
        assert_eq!(bills.len(), 2);
        assert_eq!(bills[0].id, "b1");
        assert_eq!(bills[0].status, BillStatus::Approved);
        assert_eq!(bills[1].id, "7");
        assert_eq!(bills[1].status, BillStatus::Pending);
    }

    #[test]
    fn action_payload_flattens_bill_fields() {
        let bill: Bill = serde_json::from_str(
            r#"{"id":"b1","employeeId":"2","employeeName":"Sarah Chen","date":"2025-03-01",
                "amount":42.0,"category":"Food","status":"PENDING"}"#,
        )
        .unwrap();
        let json = serde_json::to_value(Action { action: "createBill", body: &bill }).unwrap();
        assert_eq!(json["action"], "createBill");
        assert_eq!(json["employeeName"], "Sarah Chen");
        assert_eq!(json["status"], "PENDING");
    }

    #[test]
    fn login_row_uses_camel_case_and_never_has_password() {
        let row = LoginRow {
            email: "sarah@workforce.com",
            location: "Permission Denied/Unknown".into(),
            user_agent: "Mozilla/5.0",
            timestamp: "2025-03-01T09:00:00.000Z".into(),
        };
        let json = serde_json::to_value(Action { action: "login", body: row }).unwrap();
        assert_eq!(json["userAgent"], "Mozilla/5.0");
        assert!(json.get("password").is_none());
    }
}
