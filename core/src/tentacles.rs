//! The `Tentacles` facade: two session managers, the registry, and the
//! lifecycle hooks, wired together.

use std::sync::Arc;

use serde::Serialize;

use crate::activity::{Action, Activity, DomainActivity, RawAction, ValueProposition};
use crate::config::{LifecycleConfig, TentaclesConfig};
use crate::error::TentaclesError;
use crate::event::{AnalyticsEvent, EventTrigger, RawEvent};
use crate::middleware::{builtin, Middleware};
use crate::reporting::{
    dispatch, report_error, AnalyticsSink, DeliveryReport, ErrorReporter, Registry,
    RegistrySnapshot,
};
use crate::state::{Clock, IdStrategy, Session, SessionKind, SessionManager, SystemClock};

/// Construction knobs. `Default` uses the system clock, UUID session ids and
/// lifecycle handling on.
#[derive(Debug, Clone)]
pub struct TentaclesOptions {
    pub clock: Arc<dyn Clock>,
    pub id_strategy: IdStrategy,
    pub lifecycle: LifecycleConfig,
}

impl Default for TentaclesOptions {
    fn default() -> Self {
        Self {
            clock: Arc::new(SystemClock),
            id_strategy: IdStrategy::default(),
            lifecycle: LifecycleConfig::default(),
        }
    }
}

/// The event one `track` call produced and where it was delivered.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackReport {
    pub event: RawEvent,
    pub delivery: DeliveryReport,
}

/// Everything a suspend or resume emitted, domain activities first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LifecycleReport {
    pub reports: Vec<TrackReport>,
}

impl LifecycleReport {
    pub fn events(&self) -> impl Iterator<Item = &RawEvent> {
        self.reports.iter().map(|r| &r.event)
    }

    pub fn is_empty(&self) -> bool {
        self.reports.is_empty()
    }
}

pub struct Tentacles {
    domain_activities: SessionManager,
    value_propositions: SessionManager,
    registry: Registry,
    lifecycle: LifecycleConfig,
}

impl Default for Tentacles {
    fn default() -> Self {
        Self::new()
    }
}

impl Tentacles {
    pub fn new() -> Self {
        Self::with_options(TentaclesOptions::default())
    }

    pub fn with_options(options: TentaclesOptions) -> Self {
        Self {
            domain_activities: SessionManager::new(
                SessionKind::DOMAIN_ACTIVITY,
                options.id_strategy.build("da"),
                options.clock.clone(),
            ),
            value_propositions: SessionManager::new(
                SessionKind::VALUE_PROPOSITION,
                options.id_strategy.build("vp"),
                options.clock,
            ),
            registry: Registry::new(),
            lifecycle: options.lifecycle,
        }
    }

    /// Session and lifecycle settings plus the configured global middleware.
    /// Sinks are left to the caller (see `tentacles-plugins`).
    pub fn from_config(cfg: &TentaclesConfig) -> Self {
        let tentacles = Self::with_options(TentaclesOptions {
            id_strategy: cfg.session.id_strategy,
            lifecycle: cfg.lifecycle.clone(),
            ..TentaclesOptions::default()
        });
        for spec in &cfg.middleware.global {
            tentacles.register_global_middleware(builtin::from_spec(spec));
        }
        tentacles
    }

    // ========== Registration ==========

    /// Registers `sink` with its own middleware chain and calls its `setup`.
    pub fn register_sink(&self, sink: Arc<dyn AnalyticsSink>, middlewares: Vec<Middleware>) {
        sink.setup();
        tracing::info!(
            sink = %sink.name(),
            middlewares = middlewares.len(),
            "sink registered"
        );
        self.registry.add_sink(sink, middlewares);
    }

    pub fn register_global_middleware(&self, middleware: Middleware) {
        tracing::info!(middleware = %middleware.name(), "global middleware registered");
        self.registry.add_global_middleware(middleware);
    }

    pub fn register_error_reporter(&self, reporter: Arc<dyn ErrorReporter>) {
        self.registry.add_error_reporter(reporter);
    }

    // ========== Tracking ==========

    pub fn track_domain_activity<A, B>(
        &self,
        activity: &DomainActivity<A>,
        action: &Action<B>,
    ) -> Result<TrackReport, TentaclesError>
    where
        A: Serialize,
        B: Serialize,
    {
        let (activity, action) = self.resolve(activity.to_activity(), action)?;
        self.track_with(&self.domain_activities, &activity, &action)
    }

    pub fn track_value_proposition<A, B>(
        &self,
        proposition: &ValueProposition<A>,
        action: &Action<B>,
    ) -> Result<TrackReport, TentaclesError>
    where
        A: Serialize,
        B: Serialize,
    {
        let (activity, action) = self.resolve(proposition.to_activity(), action)?;
        self.track_with(&self.value_propositions, &activity, &action)
    }

    /// One-shot event outside any session, through the same pipeline.
    pub fn track_event<A: Serialize>(
        &self,
        event: &AnalyticsEvent<A>,
    ) -> Result<TrackReport, TentaclesError> {
        let event = event.to_raw_event().map_err(|e| self.fail(e))?;
        let delivery = dispatch(&self.registry.snapshot(), event.clone());
        Ok(TrackReport { event, delivery })
    }

    /// Forwards an application error to the registered error reporters.
    pub fn track_error(&self, error: &(dyn std::error::Error + 'static)) {
        report_error(&self.registry.snapshot(), error);
    }

    // ========== Lifecycle ==========

    /// Cancels every live session of both managers and remembers them.
    pub fn on_app_will_suspend(&self) -> LifecycleReport {
        if !self.lifecycle.enabled {
            return LifecycleReport::default();
        }
        let trigger = EventTrigger::new(self.lifecycle.suspend_trigger.as_str());
        let mut report = LifecycleReport::default();
        for manager in self.managers() {
            let (events, registry) = manager.suspend(&trigger, || self.registry.snapshot());
            report.reports.extend(deliver_all(&registry, events));
        }
        report
    }

    /// Reopens the sessions remembered at suspend under new ids.
    pub fn on_app_did_resume(&self) -> LifecycleReport {
        if !self.lifecycle.enabled {
            return LifecycleReport::default();
        }
        let trigger = EventTrigger::new(self.lifecycle.resume_trigger.as_str());
        let mut report = LifecycleReport::default();
        for manager in self.managers() {
            let (events, registry) = manager.resume(&trigger, || self.registry.snapshot());
            report.reports.extend(deliver_all(&registry, events));
        }
        report
    }

    /// Drops all sessions, suspended snapshots, sinks, middleware, error
    /// reporters and id counters. Holds every lock at once, so no `track`
    /// observes a half-reset state.
    pub fn reset(&self) {
        self.domain_activities.reset_with(|| {
            self.value_propositions
                .reset_with(|| self.registry.clear())
        });
        tracing::info!("tentacles reset");
    }

    // ========== Inspection ==========

    pub fn domain_activity_sessions(&self) -> Vec<Session> {
        self.domain_activities.live_sessions()
    }

    pub fn value_proposition_sessions(&self) -> Vec<Session> {
        self.value_propositions.live_sessions()
    }

    pub fn sink_names(&self) -> Vec<String> {
        self.registry.snapshot().sink_names()
    }

    fn managers(&self) -> [&SessionManager; 2] {
        [&self.domain_activities, &self.value_propositions]
    }

    fn resolve<B: Serialize>(
        &self,
        activity: Result<Activity, TentaclesError>,
        action: &Action<B>,
    ) -> Result<(Activity, RawAction), TentaclesError> {
        let activity = activity.map_err(|e| self.fail(e))?;
        let action = action.to_raw().map_err(|e| self.fail(e))?;
        Ok((activity, action))
    }

    fn track_with(
        &self,
        manager: &SessionManager,
        activity: &Activity,
        action: &RawAction,
    ) -> Result<TrackReport, TentaclesError> {
        let (event, registry) = manager
            .track(activity, action, || self.registry.snapshot())
            .map_err(|e| self.fail(e))?;
        let delivery = dispatch(&registry, event.clone());
        Ok(TrackReport { event, delivery })
    }

    fn fail(&self, error: TentaclesError) -> TentaclesError {
        tracing::warn!(kind = error.kind(), error = %error, "track rejected");
        report_error(&self.registry.snapshot(), &error);
        error
    }
}

fn deliver_all(
    registry: &RegistrySnapshot,
    events: Vec<RawEvent>,
) -> impl Iterator<Item = TrackReport> + '_ {
    events.into_iter().map(move |event| TrackReport {
        delivery: dispatch(registry, event.clone()),
        event,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::{EmptyAttributes, KeyValueAttribute};
    use crate::state::ManualClock;
    use chrono::{TimeZone, Utc};
    use std::sync::Mutex;

    #[derive(Default)]
    struct Errors(Mutex<Vec<String>>);

    impl ErrorReporter for Errors {
        fn report_error(&self, error: &(dyn std::error::Error + 'static)) {
            self.0.lock().unwrap().push(error.to_string());
        }
    }

    fn tentacles() -> Tentacles {
        Tentacles::with_options(TentaclesOptions {
            clock: Arc::new(ManualClock::new(Utc.timestamp_opt(0, 0).unwrap())),
            id_strategy: IdStrategy::Sequential,
            ..TentaclesOptions::default()
        })
    }

    #[test]
    fn test_managers_are_independent() {
        let t = tentacles();
        let video = DomainActivity::new("watchVideo", EmptyAttributes {});
        let offer = ValueProposition::new("watchVideo", EmptyAttributes {});

        let da = t.track_domain_activity(&video, &Action::open()).unwrap();
        let vp = t.track_value_proposition(&offer, &Action::open()).unwrap();
        assert_eq!(
            da.event.attribute_as::<String>("domainActivitySessionId").unwrap(),
            "da-1"
        );
        assert_eq!(
            vp.event
                .attribute_as::<String>("valuePropositionSessionId")
                .unwrap(),
            "vp-1"
        );
        assert_eq!(t.domain_activity_sessions().len(), 1);
        assert_eq!(t.value_proposition_sessions().len(), 1);
    }

    #[test]
    fn test_errors_reach_reporters() {
        let t = tentacles();
        let errors = Arc::new(Errors::default());
        t.register_error_reporter(errors.clone());

        let video = DomainActivity::new("watchVideo", EmptyAttributes {});
        let err = t
            .track_domain_activity(&video, &Action::start())
            .unwrap_err();
        assert!(matches!(err, TentaclesError::InitialActionNotOpen { .. }));

        let bad = DomainActivity::new("watchVideo", "not an object");
        let err = t.track_domain_activity(&bad, &Action::open()).unwrap_err();
        assert!(matches!(
            err,
            TentaclesError::AttributeSerialization { scope: "activity", .. }
        ));

        t.track_error(&std::io::Error::other("disk full"));
        let seen = errors.0.lock().unwrap();
        assert_eq!(seen.len(), 3);
        assert_eq!(seen[2], "disk full");
    }

    #[test]
    fn test_lifecycle_can_be_disabled() {
        let t = Tentacles::with_options(TentaclesOptions {
            lifecycle: LifecycleConfig {
                enabled: false,
                ..LifecycleConfig::default()
            },
            ..TentaclesOptions::default()
        });
        let video = DomainActivity::new("watchVideo", EmptyAttributes {});
        t.track_domain_activity(&video, &Action::open()).unwrap();

        assert!(t.on_app_will_suspend().is_empty());
        assert_eq!(t.domain_activity_sessions().len(), 1);
        assert!(t.on_app_did_resume().is_empty());
    }

    #[test]
    fn test_custom_lifecycle_triggers() {
        let t = Tentacles::with_options(TentaclesOptions {
            lifecycle: LifecycleConfig {
                suspend_trigger: "willResignActive".to_string(),
                resume_trigger: "didEnterForeground".to_string(),
                ..LifecycleConfig::default()
            },
            ..TentaclesOptions::default()
        });
        let video = DomainActivity::new("watchVideo", EmptyAttributes {});
        t.track_domain_activity(&video, &Action::open()).unwrap();

        let suspended = t.on_app_will_suspend();
        let triggers: Vec<String> = suspended
            .events()
            .map(|e| e.attribute_as::<String>("trigger").unwrap())
            .collect();
        assert_eq!(triggers, vec!["willResignActive"]);

        let resumed = t.on_app_did_resume();
        assert!(resumed
            .events()
            .all(|e| e.attribute_as::<String>("trigger").unwrap() == "didEnterForeground"));
        assert_eq!(resumed.reports.len(), 2);
    }

    #[test]
    fn test_track_event_uses_global_middleware() {
        let t = tentacles();
        t.register_global_middleware(builtin::standardize_for_snake_case());
        let report = t
            .track_event(
                &AnalyticsEvent::screen("Home Screen")
                    .with_attributes(KeyValueAttribute::new("tab", "feed")),
            )
            .unwrap();
        // no sinks registered: nothing delivered, the built event is still returned
        assert!(report.delivery.delivered.is_empty());
        assert_eq!(report.event.name, "Home Screen");
    }
}
