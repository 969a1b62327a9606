use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;
use server::service;
use shared_types::{BillDraft, BillStatus};

use crate::common::{self, MockSheet};

fn draft() -> BillDraft {
    BillDraft {
        date: "2025-03-01".into(),
        amount: 480.0,
        category: "Travel".into(),
        description: "Train to Madurai".into(),
        image_url: "data:image/jpeg;base64,AAAA".into(),
    }
}

#[tokio::test]
async fn submitted_bill_is_mirrored_and_reloaded() {
    let sheet = MockSheet::default();
    let state = common::state_with(Some(sheet.start().await), None);

    let bill = service::submit_bill(&state, "2", draft()).await.unwrap();

    let posts = sheet.posts();
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0]["action"], "createBill");
    assert_eq!(posts[0]["id"], bill.id.as_str());
    assert_eq!(posts[0]["employeeName"], "Sarah Chen");
    assert_eq!(posts[0]["status"], "PENDING");
    assert_eq!(sheet.data.lock().unwrap().content_types[0], "text/plain");

    // The refresh after the write reloads the sheet's copy.
    let wf = state.workforce.read().await;
    assert_eq!(wf.bills().len(), 1);
    assert_eq!(wf.bills()[0].id, bill.id);
}

#[tokio::test]
async fn approval_updates_the_sheet_row() {
    let sheet = MockSheet::default();
    let state = common::state_with(Some(sheet.start().await), None);
    let bill = service::submit_bill(&state, "2", draft()).await.unwrap();

    let approved = service::update_bill_status(&state, "1", &bill.id, BillStatus::Approved)
        .await
        .unwrap();
    assert_eq!(approved.status, BillStatus::Approved);

    let last = sheet.posts().pop().unwrap();
    assert_eq!(last, json!({ "action": "updateBillStatus", "id": bill.id, "status": "APPROVED" }));
    assert_eq!(sheet.rows()[0]["status"], "APPROVED");
    assert_eq!(
        state.workforce.read().await.bills()[0].status,
        BillStatus::Approved
    );
}

#[tokio::test]
async fn employees_cannot_approve_even_with_sheet_configured() {
    let sheet = MockSheet::default();
    let state = common::state_with(Some(sheet.start().await), None);
    let bill = service::submit_bill(&state, "2", draft()).await.unwrap();

    let err = service::update_bill_status(&state, "3", &bill.id, BillStatus::Approved)
        .await
        .unwrap_err();
    assert_eq!(err.kind, shared_types::AppErrorKind::Forbidden);
    // Only the createBill write reached the sheet.
    assert_eq!(sheet.posts().len(), 1);
}

#[tokio::test]
async fn loose_sheet_rows_replace_local_bills() {
    let sheet = MockSheet::with_rows(vec![
        common::sheet_row(1717000000001, 2, "1,250.50", "APPROVED"),
        common::sheet_row(1717000000002, 3, "", "PENDING"),
    ]);
    let state = common::state_with(Some(sheet.start().await), None);

    assert!(service::refresh_bills(&state).await);

    let wf = state.workforce.read().await;
    let bills = wf.bills();
    assert_eq!(bills.len(), 2);
    assert_eq!(bills[0].id, "1717000000001");
    assert_eq!(bills[0].employee_id, "2");
    assert_eq!(bills[0].date, "2025-02-14");
    assert_eq!(bills[0].amount, 1250.5);
    assert_eq!(bills[1].amount, 0.0);
}

#[tokio::test]
async fn empty_sheet_keeps_local_bills() {
    let sheet = MockSheet::default();
    let state = common::state_with(Some(sheet.start().await), None);
    state
        .workforce
        .write()
        .await
        .submit_bill("2", draft())
        .unwrap();

    assert!(!service::refresh_bills(&state).await);
    assert_eq!(state.workforce.read().await.bills().len(), 1);
}

#[tokio::test]
async fn sheet_outage_does_not_fail_the_claim() {
    let sheet = MockSheet::default();
    sheet.fail_with(StatusCode::INTERNAL_SERVER_ERROR);
    let state = common::state_with(Some(sheet.start().await), None);

    let bill = service::submit_bill(&state, "2", draft()).await.unwrap();
    assert_eq!(bill.status, BillStatus::Pending);

    // The failed fetch reads as empty, so the local copy survives.
    let wf = state.workforce.read().await;
    assert_eq!(wf.bills().len(), 1);
    assert_eq!(wf.bills()[0].id, bill.id);
}

#[tokio::test]
async fn unreachable_sheet_reads_as_empty() {
    let client = server::sheet::SheetClient::new("http://127.0.0.1:9/macro");
    assert!(client.fetch_bills().await.is_empty());
    assert!(!client.create_bill(&shared_types::Bill {
        id: "x".into(),
        employee_id: "2".into(),
        employee_name: "Sarah Chen".into(),
        date: "2025-03-01".into(),
        amount: 1.0,
        category: "Food".into(),
        description: String::new(),
        image_url: String::new(),
        status: BillStatus::Pending,
    })
    .await);
}
