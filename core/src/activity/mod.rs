//! Activities and the actions requested on them.
//!
//! A [`DomainActivity`] describes a core functionality a user devotes time
//! to (watching a video, onboarding). A [`ValueProposition`] is tracked the
//! same way by an independent manager. Both are reduced to an [`Activity`]
//! (name plus serialized attributes) before they reach the session table.

mod action;

pub use action::{Action, RawAction};

use serde::{Deserialize, Serialize};

use crate::attributes::{serialize_attributes, AttributeMap};
use crate::error::TentaclesError;

/// Concrete activity identity.
///
/// Two activities are the same ongoing session target when the names are
/// equal and the serialized attributes are equal. Action attributes never
/// take part in this comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    name: String,
    attributes: AttributeMap,
}

impl Activity {
    pub fn new(name: impl Into<String>, attributes: AttributeMap) -> Self {
        Self {
            name: name.into(),
            attributes,
        }
    }

    pub fn from_attributes<A: Serialize>(
        name: impl Into<String>,
        attributes: &A,
    ) -> Result<Self, TentaclesError> {
        Ok(Self::new(name, serialize_attributes(attributes, "activity")?))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn attributes(&self) -> &AttributeMap {
        &self.attributes
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DomainActivity<A> {
    pub name: String,
    pub attributes: A,
}

impl<A> DomainActivity<A> {
    pub fn new(name: impl Into<String>, attributes: A) -> Self {
        Self {
            name: name.into(),
            attributes,
        }
    }
}

impl<A: Serialize> DomainActivity<A> {
    pub fn to_activity(&self) -> Result<Activity, TentaclesError> {
        Activity::from_attributes(self.name.clone(), &self.attributes)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValueProposition<A> {
    pub name: String,
    pub attributes: A,
}

impl<A> ValueProposition<A> {
    pub fn new(name: impl Into<String>, attributes: A) -> Self {
        Self {
            name: name.into(),
            attributes,
        }
    }
}

impl<A: Serialize> ValueProposition<A> {
    pub fn to_activity(&self) -> Result<Activity, TentaclesError> {
        Activity::from_attributes(self.name.clone(), &self.attributes)
    }
}
