use exam_core::model::{Transaction, TransactionStatus};
use exam_core::time::format_day;

use super::plans_vm::amount_label;

#[derive(Clone, Debug, PartialEq)]
pub struct TransactionRowVm {
    pub transaction: Transaction,
    pub plan_name: String,
    pub status_label: String,
    pub status_class: &'static str,
    pub number: String,
    pub amount_label: String,
    pub date_label: String,
    pub validity_label: String,
    pub payment_method: Option<String>,
    pub user_label: String,
}

fn status_class(status: TransactionStatus) -> &'static str {
    match status {
        TransactionStatus::Completed => "status-ok",
        TransactionStatus::Pending => "status-pending",
        TransactionStatus::Failed | TransactionStatus::Unknown => "status-bad",
    }
}

#[must_use]
pub fn map_transaction_row(transaction: &Transaction) -> TransactionRowVm {
    TransactionRowVm {
        transaction: transaction.clone(),
        plan_name: transaction.plan_name.clone(),
        status_label: transaction.status.as_str().to_uppercase(),
        status_class: status_class(transaction.status),
        number: transaction.transaction_number.clone(),
        amount_label: amount_label(transaction.amount, &transaction.currency),
        date_label: format_day(transaction.created_at),
        validity_label: format!(
            "{} - {}",
            format_day(transaction.validity_start),
            format_day(transaction.validity_end)
        ),
        payment_method: transaction
            .payment_method
            .clone()
            .filter(|method| !method.is_empty()),
        user_label: format!("{} ({})", transaction.user_name, transaction.user_email),
    }
}

/// Newest first.
#[must_use]
pub fn map_transaction_rows(transactions: &[Transaction]) -> Vec<TransactionRowVm> {
    let mut sorted: Vec<&Transaction> = transactions.iter().collect();
    sorted.sort_by(|left, right| right.created_at.cmp(&left.created_at));
    sorted.into_iter().map(map_transaction_row).collect()
}
