use serde::{Deserialize, Serialize};
use time::Date;

use crate::{Error, api_client::zero_if_null};

/// The colour used for cards without one.
pub const DEFAULT_CARD_COLOR: &str = "#3b82f6";

/// A credit card as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditCard {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub last_four_digits: Option<String>,
    #[serde(default, deserialize_with = "zero_if_null")]
    pub limit_total: f64,
    #[serde(default, deserialize_with = "zero_if_null")]
    pub limit_used: f64,
    pub closing_day: u8,
    pub due_day: u8,
    #[serde(default)]
    pub color: Option<String>,
}

impl CreditCard {
    /// The share of the limit that has been used as a percentage, capped at 100.
    ///
    /// A card with no limit has a utilization of zero.
    pub fn utilization(&self) -> f64 {
        if self.limit_total <= 0.0 {
            return 0.0;
        }

        (self.limit_used / self.limit_total * 100.0).min(100.0)
    }

    /// The part of the limit that is still available.
    pub fn limit_available(&self) -> f64 {
        self.limit_total - self.limit_used
    }

    pub fn color(&self) -> &str {
        self.color
            .as_deref()
            .filter(|color| is_hex_color(color))
            .unwrap_or(DEFAULT_CARD_COLOR)
    }
}

/// The sum of the used limits of `cards`.
pub fn total_limit_used(cards: &[CreditCard]) -> f64 {
    cards.iter().map(|card| card.limit_used).sum()
}

/// The colour of a card's utilization bar: red above 90%, yellow above 70%, otherwise green.
pub fn utilization_bar_style(utilization: f64) -> &'static str {
    if utilization > 90.0 {
        "bg-red-500"
    } else if utilization > 70.0 {
        "bg-yellow-400"
    } else {
        "bg-green-500"
    }
}

/// Whether `today` is the day after the card's statement closes.
///
/// Purchases made on that day land on the next statement, giving the most
/// time before payment. Cards that close on the 31st roll over to the 1st.
pub fn is_best_day_to_buy(closing_day: u8, today: Date) -> bool {
    let best_day = if closing_day >= 31 { 1 } else { closing_day + 1 };

    today.day() == best_day
}

fn is_hex_color(color: &str) -> bool {
    color.len() == 7
        && color.starts_with('#')
        && color[1..].chars().all(|char| char.is_ascii_hexdigit())
}

/// The form data for creating or editing a credit card.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreditCardForm {
    pub name: String,
    pub last_four_digits: String,
    pub limit_total: f64,
    pub closing_day: u8,
    pub due_day: u8,
    #[serde(default)]
    pub color: String,
}

/// A validated credit card ready to be sent to the API.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCreditCard {
    pub name: String,
    pub last_four_digits: String,
    pub limit_total: f64,
    pub closing_day: u8,
    pub due_day: u8,
    pub color: String,
}

impl NewCreditCard {
    /// Validate the submitted credit card form.
    ///
    /// An empty colour is replaced with [DEFAULT_CARD_COLOR].
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - the name is blank,
    /// - the last four digits are not exactly four digits,
    /// - the closing or due day is not between 1 and 31,
    /// - or the colour is not of the form `#rrggbb`.
    pub fn from_form(form: &CreditCardForm) -> Result<Self, Error> {
        let name = form.name.trim();
        if name.is_empty() {
            return Err(Error::EmptyField("Card name"));
        }

        let last_four_digits = form.last_four_digits.trim();
        if last_four_digits.len() != 4 || !last_four_digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(Error::InvalidLastFourDigits);
        }

        for day in [form.closing_day, form.due_day] {
            if !(1..=31).contains(&day) {
                return Err(Error::InvalidDayOfMonth(day));
            }
        }

        let color = match form.color.trim() {
            "" => DEFAULT_CARD_COLOR.to_owned(),
            color if is_hex_color(color) => color.to_lowercase(),
            color => return Err(Error::InvalidColor(color.to_owned())),
        };

        Ok(Self {
            name: name.to_owned(),
            last_four_digits: last_four_digits.to_owned(),
            limit_total: form.limit_total,
            closing_day: form.closing_day,
            due_day: form.due_day,
            color,
        })
    }
}

#[cfg(test)]
mod credit_card_tests {
    use time::macros::date;

    use crate::credit_card::{
        CreditCard, DEFAULT_CARD_COLOR, is_best_day_to_buy, total_limit_used,
        utilization_bar_style,
    };

    fn card(limit_total: f64, limit_used: f64) -> CreditCard {
        CreditCard {
            id: 1,
            name: "Gold".to_owned(),
            last_four_digits: Some("1234".to_owned()),
            limit_total,
            limit_used,
            closing_day: 5,
            due_day: 12,
            color: None,
        }
    }

    #[test]
    fn utilization_is_percentage_of_limit() {
        assert_eq!(card(1000.0, 250.0).utilization(), 25.0);
    }

    #[test]
    fn utilization_is_capped_at_100() {
        assert_eq!(card(1000.0, 1500.0).utilization(), 100.0);
    }

    #[test]
    fn utilization_is_zero_without_limit() {
        assert_eq!(card(0.0, 50.0).utilization(), 0.0);
    }

    #[test]
    fn bar_colour_thresholds() {
        assert_eq!(utilization_bar_style(95.0), "bg-red-500");
        assert_eq!(utilization_bar_style(90.0), "bg-yellow-400");
        assert_eq!(utilization_bar_style(71.0), "bg-yellow-400");
        assert_eq!(utilization_bar_style(70.0), "bg-green-500");
    }

    #[test]
    fn best_day_is_day_after_closing() {
        assert!(is_best_day_to_buy(5, date!(2025 - 03 - 06)));
        assert!(!is_best_day_to_buy(5, date!(2025 - 03 - 05)));
    }

    #[test]
    fn closing_on_31st_rolls_over_to_first() {
        assert!(is_best_day_to_buy(31, date!(2025 - 04 - 01)));
        assert!(!is_best_day_to_buy(31, date!(2025 - 03 - 31)));
    }

    #[test]
    fn invalid_colour_falls_back_to_default() {
        let mut card = card(100.0, 0.0);
        card.color = Some("red".to_owned());

        assert_eq!(card.color(), DEFAULT_CARD_COLOR);
    }

    #[test]
    fn sums_limit_used() {
        assert_eq!(
            total_limit_used(&[card(1000.0, 100.0), card(500.0, 50.5)]),
            150.5
        );
    }
}
