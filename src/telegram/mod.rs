pub mod formatter;
pub mod notifier;

use crate::error::ReportError;
use std::future::Future;

/// Delivers a finished message to the chat.
pub trait Notifier {
    fn notify(&self, text: &str) -> impl Future<Output = Result<(), ReportError>> + Send;
}
