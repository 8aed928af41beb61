use serde::Serialize;

use crate::attributes::{serialize_attributes, AttributeMap, EmptyAttributes};
use crate::error::TentaclesError;
use crate::event::EventTrigger;
use crate::state::ActionStatus;

/// Request to move an activity's session to another status.
///
/// `attributes` belong to this single event only and are not merged into the
/// activity's own attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct Action<A = EmptyAttributes> {
    pub status: ActionStatus,
    pub trigger: EventTrigger,
    pub attributes: Option<A>,
}

impl Action<EmptyAttributes> {
    pub fn new(status: ActionStatus, trigger: impl Into<EventTrigger>) -> Self {
        Self {
            status,
            trigger: trigger.into(),
            attributes: None,
        }
    }

    pub fn open() -> Self {
        Self::new(ActionStatus::Open, EventTrigger::default())
    }

    pub fn start() -> Self {
        Self::new(ActionStatus::Start, EventTrigger::default())
    }

    pub fn pause() -> Self {
        Self::new(ActionStatus::Pause, EventTrigger::default())
    }

    pub fn complete() -> Self {
        Self::new(ActionStatus::Complete, EventTrigger::default())
    }

    pub fn cancel() -> Self {
        Self::new(ActionStatus::Cancel, EventTrigger::default())
    }
}

impl<A> Action<A> {
    pub fn with_trigger(mut self, trigger: impl Into<EventTrigger>) -> Self {
        self.trigger = trigger.into();
        self
    }

    pub fn with_attributes<B>(self, attributes: B) -> Action<B> {
        Action {
            status: self.status,
            trigger: self.trigger,
            attributes: Some(attributes),
        }
    }
}

impl<A: Serialize> Action<A> {
    /// Serializes the scoped attributes once, at the API boundary.
    pub fn to_raw(&self) -> Result<RawAction, TentaclesError> {
        let attributes = self
            .attributes
            .as_ref()
            .map(|a| serialize_attributes(a, "action"))
            .transpose()?;
        Ok(RawAction {
            status: self.status,
            trigger: self.trigger.clone(),
            attributes,
        })
    }
}

/// [`Action`] with its attributes already flattened.
#[derive(Debug, Clone, PartialEq)]
pub struct RawAction {
    pub status: ActionStatus,
    pub trigger: EventTrigger,
    pub attributes: Option<AttributeMap>,
}
