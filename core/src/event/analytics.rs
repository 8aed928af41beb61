use serde::Serialize;

use super::category::{EventCategory, TentaclesEventCategory};
use super::raw::RawEvent;
use super::trigger::{EventTrigger, TentaclesEventTrigger};
use crate::attributes::{
    merge_into, serialize_attributes, AttributeMap, EmptyAttributes, KeyAttributes,
};
use crate::error::TentaclesError;

/// A one-shot analytics event that is not tied to a session.
#[derive(Debug, Clone)]
pub struct AnalyticsEvent<A = EmptyAttributes> {
    pub name: String,
    pub category: EventCategory,
    pub trigger: EventTrigger,
    pub other_attributes: Option<A>,
}

impl AnalyticsEvent<EmptyAttributes> {
    pub fn new(
        name: impl Into<String>,
        category: impl Into<EventCategory>,
        trigger: impl Into<EventTrigger>,
    ) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
            trigger: trigger.into(),
            other_attributes: None,
        }
    }

    /// Screen view: category `screen`, trigger `screenDidAppear`.
    pub fn screen(name: impl Into<String>) -> Self {
        Self::new(
            name,
            TentaclesEventCategory::Screen,
            TentaclesEventTrigger::ScreenDidAppear,
        )
    }
}

impl<A> AnalyticsEvent<A> {
    pub fn with_attributes<B>(self, attributes: B) -> AnalyticsEvent<B> {
        AnalyticsEvent {
            name: self.name,
            category: self.category,
            trigger: self.trigger,
            other_attributes: Some(attributes),
        }
    }
}

impl<A: Serialize> AnalyticsEvent<A> {
    /// `trigger` and `category` first, then the event's own attributes.
    pub fn to_raw_event(&self) -> Result<RawEvent, TentaclesError> {
        let mut attributes = AttributeMap::new();
        attributes.insert(KeyAttributes::TRIGGER.to_string(), self.trigger.name().into());
        attributes.insert(
            KeyAttributes::CATEGORY.to_string(),
            self.category.name().into(),
        );
        if let Some(other) = &self.other_attributes {
            merge_into(&mut attributes, &serialize_attributes(other, "event")?);
        }
        Ok(RawEvent::new(self.name.clone(), attributes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::KeyValueAttribute;

    #[test]
    fn test_screen_event_defaults() {
        let raw = AnalyticsEvent::screen("Home").to_raw_event().unwrap();
        assert_eq!(raw.name, "Home");
        assert_eq!(raw.attribute_as::<String>("category").unwrap(), "screen");
        assert_eq!(
            raw.attribute_as::<String>("trigger").unwrap(),
            "screenDidAppear"
        );
        assert_eq!(raw.attributes.len(), 2);
    }

    #[test]
    fn test_other_attributes_are_merged() {
        let raw = AnalyticsEvent::new("purchase", "inAppPurchase", "clicked")
            .with_attributes(KeyValueAttribute::new("sku", "pro_yearly"))
            .to_raw_event()
            .unwrap();
        assert_eq!(raw.attribute_as::<String>("sku").unwrap(), "pro_yearly");
        assert_eq!(raw.attributes.len(), 3);
    }
}
