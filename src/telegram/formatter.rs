use crate::error::ConfigError;
use crate::models::{Language, Report};
use serde::Deserialize;
use std::path::Path;

/// Telegram rejects messages above 4096 characters.
const MAX_TOTAL_CHARS: usize = 4000;

/// Labels used to render a report. Each label is printed verbatim, followed by
/// a space and the value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    pub title: String,
    pub date: String,
    pub total: String,
    pub today: String,
    pub active: String,
    pub closed: String,
    pub failure: String,
}

/// Template file contents; every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct TemplateOverrides {
    title: Option<String>,
    date: Option<String>,
    total: Option<String>,
    today: Option<String>,
    active: Option<String>,
    closed: Option<String>,
    failure: Option<String>,
}

impl Template {
    pub fn builtin(language: Language) -> Self {
        let (title, date, total, today, active, closed) = match language {
            Language::Russian => (
                "\u{1f4ca}Ежедневный отчет:",
                "\u{1f4c6}Дата отчета:",
                "\u{1f5c3}\u{fe0f}Всего тикетов:",
                "\u{1f5c2}\u{fe0f}Сегодняшние тикеты:",
                "\u{1f7e0}Активные тикеты:",
                "\u{2705}Закрытые тикеты:",
            ),
            Language::Uzbek => (
                "\u{1f4ca}Kunlik report:",
                "\u{1f4c6}Report sanasi:",
                "\u{1f5c3}\u{fe0f}Hamma murojaatlar:",
                "\u{1f5c2}\u{fe0f}Bugungi murojaatlar:",
                "\u{1f7e0}Aktiv murojaatlar:",
                "\u{2705}Yopilgan murojaatlar:",
            ),
        };

        Self {
            title: title.to_string(),
            date: date.to_string(),
            total: total.to_string(),
            today: today.to_string(),
            active: active.to_string(),
            closed: closed.to_string(),
            failure: "\u{26a0}\u{fe0f} Zammad report failed:".to_string(),
        }
    }

    /// Loads the built-in template for `language` and replaces the labels set
    /// in the TOML file at `path`.
    pub fn load_with_overrides(language: Language, path: &Path) -> Result<Self, ConfigError> {
        let contents =
            std::fs::read_to_string(path).map_err(|source| ConfigError::TemplateRead {
                path: path.display().to_string(),
                source,
            })?;
        let overrides: TemplateOverrides =
            toml::from_str(&contents).map_err(|source| ConfigError::TemplateParse {
                path: path.display().to_string(),
                source,
            })?;
        Ok(Self::builtin(language).merge(overrides))
    }

    fn merge(self, overrides: TemplateOverrides) -> Self {
        Self {
            title: overrides.title.unwrap_or(self.title),
            date: overrides.date.unwrap_or(self.date),
            total: overrides.total.unwrap_or(self.total),
            today: overrides.today.unwrap_or(self.today),
            active: overrides.active.unwrap_or(self.active),
            closed: overrides.closed.unwrap_or(self.closed),
            failure: overrides.failure.unwrap_or(self.failure),
        }
    }
}

pub fn format_report(template: &Template, report: &Report) -> String {
    let counts = &report.counts;
    let message = format!(
        "{title}\n\n{date} {stamp}\n\n{total} {n_total}\n\n{today} {n_today}\n\n{active} {n_active}\n\n{closed} {n_closed}",
        title = template.title,
        date = template.date,
        stamp = report.generated_at,
        total = template.total,
        n_total = counts.total,
        today = template.today,
        n_today = counts.created_today,
        active = template.active,
        n_active = counts.active,
        closed = template.closed,
        n_closed = counts.closed_today,
    );

    truncate(&message, MAX_TOTAL_CHARS)
}

pub fn format_failure(template: &Template, error: &dyn std::fmt::Display) -> String {
    truncate(&format!("{} {error}", template.failure), MAX_TOTAL_CHARS)
}

fn truncate(s: &str, max: usize) -> String {
    if s.len() <= max {
        s.to_string()
    } else {
        let boundary = s.floor_char_boundary(max);
        format!("{}... (truncated)", &s[..boundary])
    }
}
