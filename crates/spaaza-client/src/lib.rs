//! HTTP client SDK for the Spaaza MyPrice API.
//!
//! This crate provides a thin client for the Spaaza REST API: it assembles
//! request headers from per-instance settings and per-call credentials,
//! dispatches the request over HTTPS, and normalizes the server's JSON
//! response envelope into either a decoded payload or an error.
//!
//! # Example
//!
//! ```no_run
//! use serde_json::json;
//! use spaaza_client::{Auth, SessionAuth, SpaazaClient};
//!
//! # async fn example() -> spaaza_client::Result<()> {
//! let mut client = SpaazaClient::builder()
//!     .base_url("https://apitest0.spaaza.com")
//!     .throw_api_errors(true)
//!     .build()?;
//!
//! client.set_locale("nl-NL");
//! client.set_api_version("2.0");
//!
//! // Session-authenticated GET; returns the envelope's `results` payload.
//! let auth = Auth::Session(SessionAuth::new().username("bob").user_id(42));
//! let basket = client
//!     .get(
//!         "my-price/get-basket",
//!         Some(json!({"basket_key": "abc123"})),
//!         Some(&auth),
//!         None,
//!     )
//!     .await?;
//! println!("basket: {basket}");
//!
//! // Bearer-authenticated JSON POST.
//! let auth = Auth::Bearer("tok123".into());
//! client
//!     .post_json(
//!         "vouchers/claim-voucher",
//!         Some(json!({"voucher_key": "xyz"})),
//!         Some(&auth),
//!         None,
//!     )
//!     .await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Error handling
//!
//! Transport failures and malformed JSON responses always surface as errors.
//! Server-reported application errors (the envelope's `error`/`errors`
//! fields) only become [`Error::Api`] when the client is configured with
//! `throw_api_errors(true)`; otherwise the decoded envelope is returned
//! as-is and the caller inspects it itself.

pub mod auth;
pub mod client;
pub mod error;
pub mod types;

mod config;

pub use auth::{Auth, SessionAuth};
pub use client::{ClientBuilder, SpaazaClient};
pub use error::{ApiError, Error, Result};
pub use types::Part;
