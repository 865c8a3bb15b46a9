//! Pardot API client for Rust.
//!
//! A credential-managing client for the Pardot marketing automation API
//! (version 3). Resources and operations are looked up by name in a static
//! registry, identifier parameters are guessed from the positional arguments,
//! and login happens lazily with a single transparent re-login when the
//! cached `api_key` expires.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use pardot_sdk::PardotClient;
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), pardot_sdk::PardotError> {
//!     let mut client = PardotClient::new("me@example.com", "password", "user-key").with_retries(3);
//!
//!     // prospect/version/3/do/read/email/a%40b.com/
//!     let prospect = client
//!         .resource("prospect")?
//!         .call("read", &[json!("a@b.com")], &[])
//!         .await?;
//!     println!("{}", prospect["prospect"]["id"]);
//!
//!     // snake_case aliases resolve to the provider name
//!     let content = client
//!         .invoke("dynamic_content", "query", &[], &[("limit", "20")])
//!         .await?;
//!     println!("{content}");
//!     Ok(())
//! }
//! ```
//!
//! # Identifier Matching
//!
//! Some operations accept several identifier shapes (`prospect.read` takes an
//! email or an id). Integers match `id`/`*_id` parameters, strings match
//! `email`/`*_email`, and arrays match `*[]`. The first candidate whose
//! positions all match wins; see [`params`].
//!
//! # Logging
//!
//! This crate emits debug-level logs through the [`log`](https://docs.rs/log/) facade
//! and a warning for every transport retry. Passwords, user keys and api keys
//! are never logged.
//!
//! # Errors
//!
//! All fallible operations return [`PardotError`]:
//!
//! - Dispatch failures (`UnsupportedResource`, `UnsupportedOperation`, `ArgumentMismatch`)
//! - API failures (`Api`, with code `"1"` meaning an expired api key)
//! - Transport/decoding failures (`HttpError`, `MalformedResponse`, `JsonError`)
pub mod api;
pub mod client;
pub mod config;
pub mod errors;
pub mod models;
pub mod params;
pub mod registry;
pub mod resource;
pub mod session;

// Re-export primary types for convenience.
pub use client::PardotClient;
pub use config::{ClientConfig, RetryPolicy};
pub use errors::PardotError;
pub use resource::Resource;
pub use session::{Credentials, Session};
