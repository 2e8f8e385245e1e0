use crate::config::Config;
use crate::error::ReportError;
use crate::models::{Report, TicketCounts};
use crate::telegram::formatter;
use crate::zammad::TicketCounter;
use crate::zammad::query;
use chrono::offset::LocalResult;
use chrono::{DateTime, NaiveTime, Offset, TimeDelta, TimeZone, Utc};
use chrono_tz::Tz;

/// Local midnight of `now`'s calendar day, as a UTC instant.
///
/// When a DST transition skips midnight, the offset in force before the
/// transition is applied, which lands on the first local instant of the day.
/// When midnight occurs twice, the earlier one wins.
pub fn start_of_day(now: &DateTime<Tz>) -> DateTime<Utc> {
    let tz = now.timezone();
    let midnight = now.date_naive().and_time(NaiveTime::MIN);

    match tz.from_local_datetime(&midnight) {
        LocalResult::Single(dt) | LocalResult::Ambiguous(dt, _) => dt.with_timezone(&Utc),
        LocalResult::None => {
            let before = tz
                .offset_from_utc_datetime(&(midnight - TimeDelta::days(1)))
                .fix();
            let utc = midnight - TimeDelta::seconds(i64::from(before.local_minus_utc()));
            Utc.from_utc_datetime(&utc)
        }
    }
}

/// Timestamp shown in the report header, e.g. `11/08/2025, 20:02:01`.
pub fn format_generated_at(now: &DateTime<Tz>) -> String {
    now.format("%d/%m/%Y, %H:%M:%S").to_string()
}

/// Runs the four count queries for the day containing `now`. Fails as soon as
/// any one of them fails.
pub async fn collect_counts<C: TicketCounter>(
    counter: &C,
    config: &Config,
    now: &DateTime<Tz>,
) -> Result<TicketCounts, ReportError> {
    let since = query::format_instant(start_of_day(now));
    tracing::info!(%since, timezone = %config.timezone, "Collecting ticket counts");

    let created = query::created_since(&since);
    let closed = query::closed_since(&config.closed_query, &since);

    let (total, created_today, active, closed_today) = tokio::try_join!(
        counter.count(query::ALL_TICKETS),
        counter.count(&created),
        counter.count(&config.active_query),
        counter.count(&closed),
    )?;

    let counts = TicketCounts {
        total,
        created_today,
        active,
        closed_today,
    };
    tracing::info!(?counts, "Ticket counts collected");
    Ok(counts)
}

pub async fn build_report<C: TicketCounter>(
    counter: &C,
    config: &Config,
    now: &DateTime<Tz>,
) -> Result<String, ReportError> {
    let counts = collect_counts(counter, config, now).await?;
    let report = Report {
        counts,
        generated_at: format_generated_at(now),
    };
    Ok(formatter::format_report(&config.template, &report))
}
