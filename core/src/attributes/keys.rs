/// Default keys written into every generated event.
pub struct KeyAttributes;

impl KeyAttributes {
    pub const CATEGORY: &'static str = "category";
    pub const STATUS: &'static str = "status";
    pub const TRIGGER: &'static str = "trigger";
    pub const DOMAIN_ACTIVITY_SESSION_ID: &'static str = "domainActivitySessionId";
    pub const VALUE_PROPOSITION_SESSION_ID: &'static str = "valuePropositionSessionId";
}
