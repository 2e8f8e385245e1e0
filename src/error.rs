use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required env var: {0}")]
    Missing(&'static str),

    #[error("Unknown timezone {0:?} (expected an IANA name such as Asia/Tashkent)")]
    InvalidTimezone(String),

    #[error("Unknown report language {0:?} (expected \"ru\" or \"uz\")")]
    UnknownLanguage(String),

    #[error("HTTP_TIMEOUT_SECONDS must be between 1 and 3600, got {0:?}")]
    InvalidTimeout(String),

    #[error("Invalid TELEGRAM_API_URL {0:?}")]
    InvalidApiUrl(String),

    #[error("Cannot read report template at {path}: {source}")]
    TemplateRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid TOML in {path}: {source}")]
    TemplateParse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Zammad request failed: {0}")]
    Zammad(#[from] reqwest::Error),

    #[error("Zammad API returned {status}: {body}")]
    ZammadStatus { status: u16, body: String },

    #[error("Telegram request failed: {0}")]
    Telegram(#[from] teloxide::RequestError),

    #[error("HTTP client setup failed: {0}")]
    ClientBuild(#[source] reqwest::Error),
}
