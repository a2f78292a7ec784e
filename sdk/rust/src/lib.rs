//! Client for the address activity service.

mod client;

pub use client::{ActivityClient, CheckOutcome, CheckResponse};
