//! REST API calls for credit cards.

use serde::Serialize;

use crate::{
    Error,
    api_client::ApiClient,
    credit_card::{CreditCard, NewCreditCard},
};

const CREDIT_CARDS_PATH: &str = "/credit-cards";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CreditCardRequest<'a> {
    name: &'a str,
    last_four_digits: &'a str,
    limit_total: f64,
    closing_day: u8,
    due_day: u8,
    color: &'a str,
}

impl<'a> From<&'a NewCreditCard> for CreditCardRequest<'a> {
    fn from(card: &'a NewCreditCard) -> Self {
        Self {
            name: &card.name,
            last_four_digits: &card.last_four_digits,
            limit_total: card.limit_total,
            closing_day: card.closing_day,
            due_day: card.due_day,
            color: &card.color,
        }
    }
}

pub async fn get_credit_cards(api: &ApiClient, token: &str) -> Result<Vec<CreditCard>, Error> {
    Ok(api.get(token, CREDIT_CARDS_PATH).await?)
}

pub async fn create_credit_card(
    api: &ApiClient,
    token: &str,
    card: &NewCreditCard,
) -> Result<(), Error> {
    Ok(api
        .post(token, CREDIT_CARDS_PATH, &CreditCardRequest::from(card))
        .await?)
}

pub async fn update_credit_card(
    api: &ApiClient,
    token: &str,
    id: i64,
    card: &NewCreditCard,
) -> Result<(), Error> {
    Ok(api
        .put(
            token,
            &format!("{CREDIT_CARDS_PATH}/{id}"),
            &CreditCardRequest::from(card),
        )
        .await?)
}

pub async fn delete_credit_card(api: &ApiClient, token: &str, id: i64) -> Result<(), Error> {
    Ok(api
        .delete(token, &format!("{CREDIT_CARDS_PATH}/{id}"))
        .await?)
}
