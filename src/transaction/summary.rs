//! Filtering, totals and day grouping for the transactions page.

use time::Date;

use crate::{transaction::Transaction, transaction_type::TransactionType};

/// Whether `transaction` matches the free-text `search` term.
///
/// A transaction matches if its description contains the term, ignoring
/// case, or the decimal text of its amount contains it. An empty term
/// matches everything.
pub fn matches_search(transaction: &Transaction, search: &str) -> bool {
    let search = search.trim().to_lowercase();

    search.is_empty()
        || transaction.description.to_lowercase().contains(&search)
        || transaction.amount.to_string().contains(&search)
}

/// The income, expense and balance of a list of transactions.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct TransactionSummary {
    pub income: f64,
    pub expense: f64,
    pub balance: f64,
}

impl TransactionSummary {
    pub fn from_transactions(transactions: &[Transaction]) -> Self {
        let (income, expense) =
            transactions
                .iter()
                .fold((0.0, 0.0), |(income, expense), transaction| {
                    match transaction.transaction_type {
                        TransactionType::Income => (income + transaction.amount, expense),
                        TransactionType::Expense => (income, expense + transaction.amount),
                    }
                });

        Self {
            income,
            expense,
            balance: income - expense,
        }
    }
}

/// The transactions that happened on one day.
#[derive(Debug, Clone, PartialEq)]
pub struct DayGroup {
    pub date: Date,
    pub transactions: Vec<Transaction>,
    /// Income minus expenses for the day.
    pub total: f64,
}

/// Group `transactions` by date, newest date first.
///
/// Transactions keep their original order within each day.
pub fn group_by_day(transactions: Vec<Transaction>) -> Vec<DayGroup> {
    let mut groups: Vec<DayGroup> = Vec::new();

    for transaction in transactions {
        match groups.iter_mut().find(|group| group.date == transaction.date) {
            Some(group) => {
                group.total += transaction.signed_amount();
                group.transactions.push(transaction);
            }
            None => groups.push(DayGroup {
                date: transaction.date,
                total: transaction.signed_amount(),
                transactions: vec![transaction],
            }),
        }
    }

    // Stable sort, so groups of equal dates cannot be reordered.
    groups.sort_by(|a, b| b.date.cmp(&a.date));

    groups
}

/// The heading for a day group: "Today", "Yesterday" or e.g. "14 March".
pub fn day_label(date: Date, today: Date) -> String {
    if date == today {
        "Today".to_owned()
    } else if today.previous_day() == Some(date) {
        "Yesterday".to_owned()
    } else {
        format!("{} {}", date.day(), date.month())
    }
}
