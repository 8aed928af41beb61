#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use chrono::{TimeZone, Utc};
use serde::Serialize;
use tentacles_core::api::{
    AnalyticsSink, DomainActivity, ErrorReporter, IdStrategy, ManualClock, RawEvent, Tentacles,
    TentaclesOptions,
};

/// Sink that keeps every event it receives.
#[derive(Default)]
pub struct CaptureSink {
    name: String,
    events: Mutex<Vec<RawEvent>>,
    setups: Mutex<usize>,
}

impl CaptureSink {
    pub fn new(name: &str) -> Arc<Self> {
        Arc::new(Self {
            name: name.to_string(),
            ..Default::default()
        })
    }

    pub fn events(&self) -> Vec<RawEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn names(&self) -> Vec<String> {
        self.events().into_iter().map(|e| e.name).collect()
    }

    pub fn statuses(&self) -> Vec<String> {
        self.events().iter().map(status).collect()
    }

    pub fn setups(&self) -> usize {
        *self.setups.lock().unwrap()
    }
}

impl AnalyticsSink for CaptureSink {
    fn name(&self) -> &str {
        &self.name
    }

    fn setup(&self) {
        *self.setups.lock().unwrap() += 1;
    }

    fn report(&self, event: &RawEvent) {
        self.events.lock().unwrap().push(event.clone());
    }
}

#[derive(Default)]
pub struct CaptureErrors(Mutex<Vec<String>>);

impl CaptureErrors {
    pub fn messages(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }
}

impl ErrorReporter for CaptureErrors {
    fn report_error(&self, error: &(dyn std::error::Error + 'static)) {
        self.0.lock().unwrap().push(error.to_string());
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoAttributes {
    pub video_name: String,
}

pub fn watch_video(name: &str) -> DomainActivity<VideoAttributes> {
    DomainActivity::new(
        "watchVideo",
        VideoAttributes {
            video_name: name.to_string(),
        },
    )
}

/// Deterministic instance: clock starts at t=1000s, ids are `da-n` / `vp-n`.
pub fn tentacles() -> (Tentacles, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::new(Utc.timestamp_opt(1_000, 0).unwrap()));
    let tentacles = Tentacles::with_options(TentaclesOptions {
        clock: clock.clone(),
        id_strategy: IdStrategy::Sequential,
        ..TentaclesOptions::default()
    });
    (tentacles, clock)
}

pub fn status(event: &RawEvent) -> String {
    event.attribute_as("status").unwrap()
}

pub fn trigger(event: &RawEvent) -> String {
    event.attribute_as("trigger").unwrap()
}

pub fn session_id(event: &RawEvent) -> String {
    event.attribute_as("domainActivitySessionId").unwrap()
}
