use crate::config::Config;
use crate::error::ReportError;
use crate::report;
use crate::telegram::Notifier;
use crate::telegram::formatter;
use crate::zammad::TicketCounter;
use chrono::DateTime;
use chrono_tz::Tz;
use std::fmt::Display;
use std::future::Future;

/// Builds the report for `now` and sends it. On failure, tells the chat about
/// it once and returns the original error.
pub async fn run<C, N>(
    config: &Config,
    counter: &C,
    notifier: &N,
    now: &DateTime<Tz>,
) -> Result<(), ReportError>
where
    C: TicketCounter,
    N: Notifier,
{
    tracing::info!(language = ?config.language, "Starting report run");

    let result = async {
        let text = report::build_report(counter, config, now).await?;
        notifier.notify(&text).await
    }
    .await;

    if let Err(ref e) = result {
        tracing::error!(error = %e, "Report run failed");
        let text = formatter::format_failure(&config.template, e);
        suppressed("failure notification", notifier.notify(&text)).await;
    }

    result
}

/// Awaits a side effect whose failure must not surface: the error is logged
/// and dropped.
pub async fn suppressed<F, E>(what: &str, effect: F)
where
    F: Future<Output = Result<(), E>>,
    E: Display,
{
    if let Err(e) = effect.await {
        tracing::warn!(error = %e, "{what} failed, ignoring");
    }
}
