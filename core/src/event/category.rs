use serde::{Deserialize, Serialize};
use std::fmt;

/// Category tag of an event.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventCategory(String);

impl EventCategory {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EventCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EventCategory {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<TentaclesEventCategory> for EventCategory {
    fn from(value: TentaclesEventCategory) -> Self {
        Self::new(value.as_str())
    }
}

/// Built-in category names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TentaclesEventCategory {
    AppOnboarding,
    Content,
    DomainActivity,
    Error,
    InAppPurchase,
    Interaction,
    Lifecycle,
    Navigation,
    Promotions,
    Screen,
    Settings,
    ValueProposition,
}

impl TentaclesEventCategory {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AppOnboarding => "appOnboarding",
            Self::Content => "content",
            Self::DomainActivity => "domainActivity",
            Self::Error => "error",
            Self::InAppPurchase => "inAppPurchase",
            Self::Interaction => "interaction",
            Self::Lifecycle => "lifecycle",
            Self::Navigation => "navigation",
            Self::Promotions => "promotions",
            Self::Screen => "screen",
            Self::Settings => "settings",
            Self::ValueProposition => "valueProposition",
        }
    }
}
