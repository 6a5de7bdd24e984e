//! Summary client
//!
//! Sends the query and extracted results to the summarization service and
//! always hands back a tagged outcome.

mod client;
mod types;

pub use client::{SummaryClient, SummaryError};
pub use types::{
    FailurePayload, SuccessPayload, SummaryRequest, SummaryResponse, UNKNOWN_ERROR, WireResponse,
};
