//! 事件构建

use super::clock::timestamp_seconds;
use super::session::Session;
use crate::attributes::{merge_into, AttributeMap, KeyAttributes};
use crate::event::{EventTrigger, RawEvent, TentaclesEventCategory};

/// What distinguishes the two session managers in the events they emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionKind {
    /// Value of the `category` attribute.
    pub category: &'static str,
    /// Attribute key carrying the session identity.
    pub session_id_key: &'static str,
}

impl SessionKind {
    pub const DOMAIN_ACTIVITY: SessionKind = SessionKind {
        category: TentaclesEventCategory::DomainActivity.as_str(),
        session_id_key: KeyAttributes::DOMAIN_ACTIVITY_SESSION_ID,
    };

    pub const VALUE_PROPOSITION: SessionKind = SessionKind {
        category: TentaclesEventCategory::ValueProposition.as_str(),
        session_id_key: KeyAttributes::VALUE_PROPOSITION_SESSION_ID,
    };
}

/// 构建会话事件
pub struct EventBuilder;

impl EventBuilder {
    /// Builds the event for the session's current status.
    ///
    /// Merge order, later wins on key collision:
    /// 1. status timestamps (`started`, `started_1`, ...)
    /// 2. session id, status, trigger, category
    /// 3. activity attributes
    /// 4. action attributes
    pub fn build(
        kind: SessionKind,
        session: &Session,
        trigger: &EventTrigger,
        action_attributes: Option<&AttributeMap>,
    ) -> RawEvent {
        let mut attributes = Self::timestamp_attributes(session);

        attributes.insert(kind.session_id_key.to_string(), session.id().into());
        attributes.insert(
            KeyAttributes::STATUS.to_string(),
            session.status().as_str().into(),
        );
        attributes.insert(KeyAttributes::TRIGGER.to_string(), trigger.name().into());
        attributes.insert(KeyAttributes::CATEGORY.to_string(), kind.category.into());

        merge_into(&mut attributes, session.activity().attributes());
        if let Some(scoped) = action_attributes {
            merge_into(&mut attributes, scoped);
        }

        RawEvent::new(session.activity().name(), attributes)
    }

    fn timestamp_attributes(session: &Session) -> AttributeMap {
        let mut attributes = AttributeMap::new();
        for (status, timestamps) in session.status_timestamps() {
            for (index, ts) in timestamps.iter().enumerate() {
                let key = if index == 0 {
                    status.as_str().to_string()
                } else {
                    format!("{}_{}", status.as_str(), index)
                };
                attributes.insert(key, timestamp_seconds(*ts).into());
            }
        }
        attributes
    }
}
