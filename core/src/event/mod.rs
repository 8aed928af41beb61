mod analytics;
mod category;
mod raw;
mod trigger;

pub use analytics::AnalyticsEvent;
pub use category::{EventCategory, TentaclesEventCategory};
pub use raw::RawEvent;
pub use trigger::{EventTrigger, TentaclesEventTrigger};
