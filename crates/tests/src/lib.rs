#[cfg(test)]
mod common;

#[cfg(test)]
mod sheet_sync_tests;

#[cfg(test)]
mod login_audit_tests;

#[cfg(test)]
mod bill_poller_tests;

#[cfg(test)]
mod gemini_tests;

#[cfg(test)]
mod receipt_flow_tests;
