//! The dashboard: the month's income and spending, net worth, recent activity and upcoming bills.

mod domain;
mod page;

pub use domain::{DashboardData, DailyExpense, FlowBars, NetWorthData, TopCategory, UpcomingExpense};
pub use page::get_dashboard_page;
