pub mod errors;
pub mod factory;
pub mod observability;
pub mod sinks;
