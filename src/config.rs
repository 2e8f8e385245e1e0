use crate::error::ConfigError;
use crate::models::Language;
use crate::telegram::formatter::Template;
use chrono_tz::Tz;
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_TIMEZONE: &str = "Asia/Tashkent";
pub const DEFAULT_TELEGRAM_API_URL: &str = "https://api.telegram.org";
const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

/// Everything a run needs, resolved once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub zammad_url: String,
    pub zammad_token: String,
    pub telegram_bot_token: String,
    pub telegram_chat_id: String,
    pub telegram_api_url: reqwest::Url,
    pub timezone: Tz,
    pub language: Language,
    pub active_query: String,
    pub closed_query: String,
    pub template: Template,
    pub http_timeout: Duration,
}

impl Config {
    /// Reads the process environment. Variables that are not valid unicode are
    /// treated as unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(
            std::env::vars_os()
                .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?))),
        )
    }

    pub fn from_vars<I>(vars: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let vars: HashMap<String, String> = vars
            .into_iter()
            .filter_map(|(k, v)| {
                let v = v.trim();
                (!v.is_empty()).then(|| (k, v.to_string()))
            })
            .collect();
        let get = |name: &str| vars.get(name).cloned();

        let zammad_url = get("ZAMMAD_URL").ok_or(ConfigError::Missing("ZAMMAD_URL"))?;
        let zammad_token = get("ZAMMAD_TOKEN").ok_or(ConfigError::Missing("ZAMMAD_TOKEN"))?;
        let telegram_bot_token = get("TG_TOKEN")
            .or_else(|| get("BOT_TOKEN"))
            .ok_or(ConfigError::Missing("TG_TOKEN"))?;
        let telegram_chat_id = get("TG_CHAT_ID")
            .or_else(|| get("CHAT_ID"))
            .ok_or(ConfigError::Missing("TG_CHAT_ID"))?;

        let zammad_url = zammad_url.trim_end_matches('/').to_string();
        if zammad_url.is_empty() {
            return Err(ConfigError::Missing("ZAMMAD_URL"));
        }

        let timezone_name = get("TIMEZONE").unwrap_or_else(|| DEFAULT_TIMEZONE.to_string());
        let timezone: Tz = timezone_name
            .parse()
            .map_err(|_| ConfigError::InvalidTimezone(timezone_name.clone()))?;

        let language = match get("REPORT_LANG") {
            Some(code) => Language::parse(&code).ok_or(ConfigError::UnknownLanguage(code))?,
            None => Language::Russian,
        };

        let active_query =
            get("ACTIVE_QUERY").unwrap_or_else(|| language.default_active_query().to_string());
        let closed_query =
            get("CLOSED_QUERY").unwrap_or_else(|| language.default_closed_query().to_string());

        let template = match get("REPORT_TEMPLATE") {
            Some(path) => Template::load_with_overrides(language, Path::new(&path))?,
            None => Template::builtin(language),
        };

        let http_timeout = match get("HTTP_TIMEOUT_SECONDS") {
            Some(raw) => parse_timeout(&raw)?,
            None => Duration::from_secs(DEFAULT_TIMEOUT_SECONDS),
        };

        let api_url =
            get("TELEGRAM_API_URL").unwrap_or_else(|| DEFAULT_TELEGRAM_API_URL.to_string());
        let telegram_api_url = reqwest::Url::parse(&api_url)
            .map_err(|_| ConfigError::InvalidApiUrl(api_url.clone()))?;

        Ok(Self {
            zammad_url,
            zammad_token,
            telegram_bot_token,
            telegram_chat_id,
            telegram_api_url,
            timezone,
            language,
            active_query,
            closed_query,
            template,
            http_timeout,
        })
    }
}

fn parse_timeout(raw: &str) -> Result<Duration, ConfigError> {
    match raw.parse::<u64>() {
        Ok(secs @ 1..=3600) => Ok(Duration::from_secs(secs)),
        _ => Err(ConfigError::InvalidTimeout(raw.to_string())),
    }
}
