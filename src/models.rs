use serde::Deserialize;

/// Wording and filter policy of a report. Each variant matches one of the
/// deployments this tool was first written for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    Russian,
    Uzbek,
}

impl Language {
    pub fn parse(code: &str) -> Option<Self> {
        match code.to_ascii_lowercase().as_str() {
            "ru" => Some(Self::Russian),
            "uz" => Some(Self::Uzbek),
            _ => None,
        }
    }

    /// Zammad's stock state ids: new, open, pending reminder, pending close.
    pub const fn default_active_query(self) -> &'static str {
        match self {
            Self::Russian => "(state_id:1 OR state_id:2 OR state_id:3 OR state_id:6)",
            Self::Uzbek => "state:open",
        }
    }

    /// `{since}` is replaced with the start-of-day instant.
    pub const fn default_closed_query(self) -> &'static str {
        match self {
            Self::Russian => "state_id:4 AND close_at:>={since}",
            Self::Uzbek => "state:closed AND updated_at:>={since}",
        }
    }
}

/// Body of `GET /api/v1/tickets/search?only_total_count=true`.
#[derive(Debug, Deserialize)]
pub struct SearchCountResponse {
    #[serde(default)]
    pub total_count: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TicketCounts {
    pub total: u64,
    pub created_today: u64,
    pub active: u64,
    pub closed_today: u64,
}

/// One run's numbers, ready to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub counts: TicketCounts,
    pub generated_at: String,
}
