//! swap-quote: token price snapshot and currency swap quoting
//!
//! - Fetch token price records over HTTP and keep the latest positive price per currency
//! - Convert amounts between currencies by price ratio
//! - Drive a swap form through a pure reducer, validate it, and submit it to a mock
//! - Sum-to-n in three variants

pub mod aggregate;
pub mod config;
pub mod convert;
pub mod error;
pub mod form;
pub mod output;
pub mod sources;
pub mod submit;
pub mod sum;
pub mod types;
