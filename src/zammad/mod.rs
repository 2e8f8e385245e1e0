pub mod client;
pub mod query;

use crate::error::ReportError;
use std::future::Future;

/// Anything that can answer "how many tickets match this filter".
pub trait TicketCounter {
    fn count(&self, query: &str) -> impl Future<Output = Result<u64, ReportError>> + Send;
}
