use shared_types::{normalize_bill_date, AppError, Bill, BillDraft, BillStatus};

use super::{new_id, Workforce};

impl Workforce {
    /// File a claim as the acting user. New bills start pending and go to
    /// the top of the list.
    pub fn submit_bill(&mut self, actor_id: &str, draft: BillDraft) -> Result<Bill, AppError> {
        let actor = self.actor(actor_id)?;
        if draft.image_url.trim().is_empty() {
            return Err(AppError::bad_request("Please upload a bill image first."));
        }
        let bill = Bill {
            id: new_id(),
            employee_id: actor.id.clone(),
            employee_name: actor.name.clone(),
            date: normalize_bill_date(&draft.date),
            amount: draft.amount,
            category: draft.category,
            description: draft.description,
            image_url: draft.image_url,
            status: BillStatus::Pending,
        };
        self.bills.insert(0, bill.clone());
        Ok(bill)
    }

    /// Owner-only approval or rejection.
    pub fn update_bill_status(&mut self, actor_id: &str, bill_id: &str, status: BillStatus) -> Result<Bill, AppError> {
        self.owner(actor_id)?;
        let bill = self
            .bills
            .iter_mut()
            .find(|b| b.id == bill_id)
            .ok_or_else(|| AppError::not_found("Bill not found"))?;
        bill.status = status;
        Ok(bill.clone())
    }

    /// Overwrite local bills with a fetched list. An empty fetch is treated
    /// as "nothing to report" and leaves local bills alone.
    pub fn replace_bills(&mut self, fetched: Vec<Bill>) -> bool {
        if fetched.is_empty() {
            return false;
        }
        self.bills = fetched;
        true
    }
}
