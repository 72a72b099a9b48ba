//! The month that the transactions, budgets, cash flow and reports pages show.

use maud::{Markup, html};
use serde::Deserialize;
use time::{Date, Month};

use crate::html::LINK_STYLE;

/// A calendar month, e.g. March 2025.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct MonthYear {
    first_day: Date,
}

/// The `month` (1-12) and `year` query parameters used by the monthly pages.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct MonthQuery {
    pub month: Option<u8>,
    pub year: Option<i32>,
}

impl MonthYear {
    /// The month containing `date`.
    pub fn from_date(date: Date) -> Self {
        Self {
            first_day: date.replace_day(1).unwrap_or(date),
        }
    }

    /// The month selected by `query`, filling in missing or invalid parts from `today`.
    pub fn from_query(query: &MonthQuery, today: Date) -> Self {
        let month = query
            .month
            .and_then(|month| Month::try_from(month).ok())
            .unwrap_or(today.month());
        let year = query
            .year
            .filter(|year| (1900..=9999).contains(year))
            .unwrap_or(today.year());

        Date::from_calendar_date(year, month, 1)
            .map(Self::from_date)
            .unwrap_or_else(|_| Self::from_date(today))
    }

    pub fn month(self) -> Month {
        self.first_day.month()
    }

    /// The month as a number from 1 to 12.
    pub fn month_number(self) -> u8 {
        self.first_day.month() as u8
    }

    pub fn year(self) -> i32 {
        self.first_day.year()
    }

    pub fn first_day(self) -> Date {
        self.first_day
    }

    pub fn last_day(self) -> Date {
        let mut day = self.first_day;

        while let Some(next_day) = day.next_day().filter(|next| next.month() == day.month()) {
            day = next_day;
        }

        day
    }

    pub fn previous(self) -> Self {
        self.first_day
            .previous_day()
            .map(Self::from_date)
            .unwrap_or(self)
    }

    pub fn next(self) -> Self {
        self.last_day()
            .next_day()
            .map(Self::from_date)
            .unwrap_or(self)
    }

    pub fn contains(self, date: Date) -> bool {
        date.year() == self.year() && date.month() == self.month()
    }

    /// The month name and year, e.g. "March 2025".
    pub fn label(self) -> String {
        format!("{} {}", self.month(), self.year())
    }

    /// The query string selecting this month, e.g. "month=3&year=2025".
    pub fn to_query_string(self) -> String {
        format!("month={}&year={}", self.month_number(), self.year())
    }
}

/// Links to the previous and next month around the current month's label.
///
/// `extra_query` is appended to each link so that other filters survive
/// navigation, e.g. "&categoryId=3".
pub fn month_navigation(route: &str, month: MonthYear, extra_query: &str) -> Markup {
    let previous_url = format!(
        "{route}?{}{extra_query}",
        month.previous().to_query_string()
    );
    let next_url = format!("{route}?{}{extra_query}", month.next().to_query_string());

    html! {
        nav class="flex items-center justify-between gap-4 w-full" aria-label="Month navigation"
        {
            a href=(previous_url) class=(LINK_STYLE) rel="prev" { "← Previous" }

            span class="text-lg font-semibold" data-month-label { (month.label()) }

            a href=(next_url) class=(LINK_STYLE) rel="next" { "Next →" }
        }
    }
}
