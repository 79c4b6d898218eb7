use entities::coordinates::Coordinates;
use profitability::ProfitabilityAnalysis;

/// Everything produced by one successful Calculate action: the economics
/// plus the route path for the map, plus the addresses and price inputs it
/// was computed from. Replaced atomically by the next calculation; never
/// merged, and never re-read from the form, so later edits cannot produce
/// a saved record that disagrees with its analysis.
#[derive(Clone, Debug, PartialEq)]
pub struct CompletedAnalysis {
    pub origin: String,
    pub destination: String,
    pub analysis: ProfitabilityAnalysis,
    pub trip_price: f64,
    pub desired_price_per_km: f64,
    pub geometry: Vec<Coordinates>,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum NotificationKind {
    Success,
    Error,
}

/// One transient, auto-dismissable message for the user. The session keeps
/// only the latest; display timing belongs to the UI layer.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Notification {
            kind: NotificationKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Notification {
            kind: NotificationKind::Error,
            message: message.into(),
        }
    }
}
