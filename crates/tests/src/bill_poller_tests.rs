use pretty_assertions::assert_eq;
use shared_types::{AppConfig, SheetConfig};

use crate::common::{self, MockSheet};

#[tokio::test]
async fn poller_loads_sheet_bills_on_startup() {
    let sheet = MockSheet::with_rows(vec![common::sheet_row(42, 3, "99", "REJECTED")]);
    let state = common::state_with(Some(sheet.start().await), None);
    let config = AppConfig {
        sheet: SheetConfig {
            url: "unused".into(),
            poll_interval_secs: 60,
        },
        ..AppConfig::default()
    };

    let handles = server::sync::spawn_background_tasks(state.clone(), &config);
    assert_eq!(handles.len(), 2);

    let mut loaded = false;
    for _ in 0..100 {
        if !state.workforce.read().await.bills().is_empty() {
            loaded = true;
            break;
        }
        tokio::time::sleep(std::time::Duration::from_millis(20)).await;
    }
    for handle in handles {
        handle.abort();
    }

    assert!(loaded, "poller never replaced the bills");
    let wf = state.workforce.read().await;
    assert_eq!(wf.bills()[0].id, "42");
    assert_eq!(wf.bills()[0].employee_name, "Marcus Miller");
}
