use serde::{Deserialize, Serialize};
use std::fmt;

/// Initiator of an event, e.g. a click or a screen appearing.
///
/// Free-form so applications can define their own triggers; the built-in
/// names live in [`TentaclesEventTrigger`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventTrigger(String);

impl EventTrigger {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl Default for EventTrigger {
    fn default() -> Self {
        TentaclesEventTrigger::Clicked.into()
    }
}

impl fmt::Display for EventTrigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EventTrigger {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for EventTrigger {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<TentaclesEventTrigger> for EventTrigger {
    fn from(value: TentaclesEventTrigger) -> Self {
        Self::new(value.as_str())
    }
}

/// Built-in trigger names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TentaclesEventTrigger {
    AppLanguageChanged,
    AppSettingsChanged,
    ApplicationWillTerminate,
    ButtonLongPressed,
    CellSelected,
    Clicked,
    DeepLinkOpened,
    DidEnterForeground,
    PushNotificationTapped,
    ScreenDidAppear,
    UserInitiated,
    ViewTapped,
    WillResignActive,
}

impl TentaclesEventTrigger {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::AppLanguageChanged => "appLanguageChanged",
            Self::AppSettingsChanged => "appSettingsChanged",
            Self::ApplicationWillTerminate => "applicationWillTerminate",
            Self::ButtonLongPressed => "buttonLongPressed",
            Self::CellSelected => "cellSelected",
            Self::Clicked => "clicked",
            Self::DeepLinkOpened => "deepLinkOpened",
            Self::DidEnterForeground => "didEnterForeground",
            Self::PushNotificationTapped => "pushNotificationTapped",
            Self::ScreenDidAppear => "screenDidAppear",
            Self::UserInitiated => "userInitiated",
            Self::ViewTapped => "viewTapped",
            Self::WillResignActive => "willResignActive",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_name_matches_serde() {
        let v = serde_json::to_value(TentaclesEventTrigger::ScreenDidAppear).unwrap();
        assert_eq!(v, serde_json::json!("screenDidAppear"));
        assert_eq!(
            EventTrigger::from(TentaclesEventTrigger::ScreenDidAppear).name(),
            "screenDidAppear"
        );
    }

    #[test]
    fn test_default_is_clicked() {
        assert_eq!(EventTrigger::default().name(), "clicked");
    }
}
