//! HTTP client for the remote finance REST API.
//!
//! The web app holds no data of its own. Every page fetches what it shows
//! from the REST API with the bearer token stored in the user's session.

mod client;
mod decode;
mod error;

pub use client::{ApiClient, DEFAULT_API_URL};
pub use decode::{iso_date, zero_if_null};
pub use error::ApiError;
