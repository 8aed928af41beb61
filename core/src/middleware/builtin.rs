//! 内置中间件
//!
//! Ready-made stages for event name normalisation, filtering and derived
//! attributes. Each one can also be built from a [`MiddlewareSpec`] in the
//! config file.

use lazy_static::lazy_static;
use regex::Regex;

use super::{Middleware, MiddlewareAction};
use crate::attributes::{AttributeMap, KeyAttributes};
use crate::config::MiddlewareSpec;
use crate::event::{EventCategory, TentaclesEventCategory};
use crate::state::ActionStatus;

lazy_static! {
    static ref SPACES: Regex = Regex::new(" +").unwrap();
    static ref REPEATED_UNDERSCORES: Regex = Regex::new("__+").unwrap();
    static ref UNDERSCORE_RUNS: Regex = Regex::new("_+").unwrap();
    static ref NON_IDENTIFIER: Regex = Regex::new("[^a-zA-Z0-9_]").unwrap();
}

/// `"UserSignUp"` -> `"usersignup"`
pub fn lowercase_event_name() -> Middleware {
    Middleware::map_name("lowercase_event_name", |name| name.to_lowercase())
}

/// `"watchVideo"` -> `"watch_video"`
pub fn camel_case_to_snake_case_event_name() -> Middleware {
    Middleware::map_name("camel_case_to_snake_case_event_name", camel_case_to_snake_case)
}

/// `"User Sign Up"` -> `"User_Sign_Up"`
pub fn replace_space_with_underscore() -> Middleware {
    Middleware::map_name("replace_space_with_underscore", |name| name.replace(' ', "_"))
}

/// `"a___b"` -> `"a_b"`
pub fn clean_up_multiple_underscores() -> Middleware {
    Middleware::map_name("clean_up_multiple_underscores", |name| {
        REPEATED_UNDERSCORES.replace_all(name, "_").into_owned()
    })
}

/// Spaces to underscores, camelCase to snake_case, lowercase, collapse
/// underscores, then drop everything outside `[a-zA-Z0-9_]`.
///
/// `"test  EventName#ForTransformation"` -> `"test_event_name_for_transformation"`
pub fn standardize_for_snake_case() -> Middleware {
    Middleware::map_name("standardize_for_snake_case", standardize)
}

/// Capitalises every attribute key: `first_name` -> `First_name`.
/// Keys that collide after capitalisation keep the last value seen.
pub fn capitalised_attribute_keys() -> Middleware {
    Middleware::new("capitalised_attribute_keys", |mut event| {
        let attributes = std::mem::take(&mut event.attributes);
        event.attributes = attributes
            .into_iter()
            .map(|(key, value)| (capitalize_words(&key), value))
            .collect::<AttributeMap>();
        MiddlewareAction::Forward(event)
    })
}

/// Skips events whose name is one of `names`.
pub fn skip_event_for_names<I, S>(names: I) -> Middleware
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let names: Vec<String> = names.into_iter().map(Into::into).collect();
    Middleware::new("skip_event_for_names", move |event| {
        if names.iter().any(|n| *n == event.name) {
            MiddlewareAction::Skip
        } else {
            MiddlewareAction::Forward(event)
        }
    })
}

/// Skips events whose `category` attribute equals `category`. Events without
/// a string category are forwarded.
pub fn skip_event_for_category(category: impl Into<EventCategory>) -> Middleware {
    let category = category.into();
    Middleware::new("skip_event_for_category", move |event| {
        match event.attribute_as::<String>(KeyAttributes::CATEGORY) {
            Ok(value) if value == category.name() => MiddlewareAction::Skip,
            _ => MiddlewareAction::Forward(event),
        }
    })
}

/// Adds `duration<From><To>` (seconds, `to - from`) to domain-activity
/// events that carry the first timestamp of both statuses.
///
/// `calculate_domain_activity_duration(Open, Complete)` writes
/// `durationOpenedCompleted`. Every other event passes unchanged.
pub fn calculate_domain_activity_duration(from: ActionStatus, to: ActionStatus) -> Middleware {
    let from_key = from.target_status().as_str();
    let to_key = to.target_status().as_str();
    let duration_key = format!(
        "duration{}{}",
        capitalize_words(from_key),
        capitalize_words(to_key)
    );

    Middleware::new("calculate_domain_activity_duration", move |mut event| {
        let is_domain_activity = event
            .attribute_as::<String>(KeyAttributes::CATEGORY)
            .map(|c| c == TentaclesEventCategory::DomainActivity.as_str())
            .unwrap_or(false);
        if !is_domain_activity {
            return MiddlewareAction::Forward(event);
        }

        if let (Ok(start), Ok(end)) = (
            event.attribute_as::<f64>(from_key),
            event.attribute_as::<f64>(to_key),
        ) {
            event.set_attribute(duration_key.clone(), end - start);
        }
        MiddlewareAction::Forward(event)
    })
}

/// Builds the stage described by a config entry.
pub fn from_spec(spec: &MiddlewareSpec) -> Middleware {
    match spec {
        MiddlewareSpec::LowercaseEventName => lowercase_event_name(),
        MiddlewareSpec::CamelCaseToSnakeCaseEventName => camel_case_to_snake_case_event_name(),
        MiddlewareSpec::ReplaceSpaceWithUnderscore => replace_space_with_underscore(),
        MiddlewareSpec::CleanUpMultipleUnderscores => clean_up_multiple_underscores(),
        MiddlewareSpec::StandardizeForSnakeCase => standardize_for_snake_case(),
        MiddlewareSpec::CapitalisedAttributeKeys => capitalised_attribute_keys(),
        MiddlewareSpec::SkipEventForNames { names } => skip_event_for_names(names.clone()),
        MiddlewareSpec::SkipEventForCategory { category } => {
            skip_event_for_category(category.as_str())
        }
        MiddlewareSpec::CalculateDomainActivityDuration { from, to } => {
            calculate_domain_activity_duration(*from, *to)
        }
    }
}

/// Inserts `_` before every uppercase letter except a leading one, and
/// lowercases it.
pub fn camel_case_to_snake_case(input: &str) -> String {
    let mut out = String::with_capacity(input.len() + 4);
    for c in input.chars() {
        if c.is_uppercase() {
            if !out.is_empty() {
                out.push('_');
            }
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

fn standardize(name: &str) -> String {
    let spaced = SPACES.replace_all(name, "_");
    let snake = camel_case_to_snake_case(&spaced).to_lowercase();
    let collapsed = UNDERSCORE_RUNS.replace_all(&snake, "_");
    NON_IDENTIFIER.replace_all(&collapsed, "").into_owned()
}

/// Uppercases the first letter of each whitespace-separated word and
/// lowercases the rest.
fn capitalize_words(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut at_word_start = true;
    for c in input.chars() {
        if c.is_whitespace() {
            at_word_start = true;
            out.push(c);
        } else if at_word_start {
            at_word_start = false;
            out.extend(c.to_uppercase());
        } else {
            out.extend(c.to_lowercase());
        }
    }
    out
}
