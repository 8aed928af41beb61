mod common;

use chrono::Duration;
use common::{session_id, status, tentacles, trigger, watch_video, CaptureErrors, CaptureSink};
use pretty_assertions::assert_eq;
use tentacles_core::api::{
    Action, ActionStatus, DomainActivity, EmptyAttributes, KeyValueAttribute, SessionStatus,
    TentaclesError,
};
use tentacles_core::state::StateTransition;

#[test]
fn open_emits_one_opened_event_with_activity_attributes() {
    let (t, _) = tentacles();
    let sink = CaptureSink::new("capture");
    t.register_sink(sink.clone(), Vec::new());

    t.track_domain_activity(&watch_video("X"), &Action::open())
        .unwrap();

    let events = sink.events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].name, "watchVideo");
    assert_eq!(status(&events[0]), "opened");
    assert_eq!(events[0].attribute_as::<String>("videoName").unwrap(), "X");
    assert_eq!(events[0].attribute_as::<String>("category").unwrap(), "domainActivity");
    assert_eq!(trigger(&events[0]), "clicked");
    assert_eq!(events[0].attribute_as::<f64>("opened").unwrap(), 1000.0);
}

#[test]
fn second_open_is_prohibited_and_delivers_nothing() {
    let (t, _) = tentacles();
    let sink = CaptureSink::new("capture");
    let errors = std::sync::Arc::new(CaptureErrors::default());
    t.register_sink(sink.clone(), Vec::new());
    t.register_error_reporter(errors.clone());

    t.track_domain_activity(&watch_video("X"), &Action::open())
        .unwrap();
    let err = t
        .track_domain_activity(&watch_video("X"), &Action::open())
        .unwrap_err();

    assert_eq!(
        err,
        TentaclesError::ProhibitedTransition {
            activity: "watchVideo".to_string(),
            from: SessionStatus::Opened,
            action: ActionStatus::Open,
        }
    );
    assert_eq!(sink.events().len(), 1);
    assert_eq!(errors.messages().len(), 1);
}

#[test]
fn full_lifecycle_keeps_identity_and_accumulates_timestamps() {
    let (t, clock) = tentacles();
    let sink = CaptureSink::new("capture");
    t.register_sink(sink.clone(), Vec::new());

    for action in [
        Action::open(),
        Action::start(),
        Action::pause(),
        Action::start(),
        Action::complete(),
    ] {
        clock.advance(Duration::seconds(10));
        t.track_domain_activity(&watch_video("X"), &action).unwrap();
    }

    let events = sink.events();
    assert_eq!(
        sink.statuses(),
        vec!["opened", "started", "paused", "started", "completed"]
    );
    assert!(events.iter().all(|e| session_id(e) == "da-1"));

    let last = events.last().unwrap();
    assert_eq!(last.attribute_as::<f64>("opened").unwrap(), 1010.0);
    assert_eq!(last.attribute_as::<f64>("started").unwrap(), 1020.0);
    assert_eq!(last.attribute_as::<f64>("paused").unwrap(), 1030.0);
    assert_eq!(last.attribute_as::<f64>("started_1").unwrap(), 1040.0);
    assert_eq!(last.attribute_as::<f64>("completed").unwrap(), 1050.0);
    assert!(last.attribute("opened_1").is_none());
    assert!(last.attribute("paused_1").is_none());
    assert!(last.attribute("started_2").is_none());

    assert!(t.domain_activity_sessions().is_empty());
}

#[test]
fn suspend_and_resume_reopen_under_a_new_identity() {
    let (t, clock) = tentacles();
    let sink = CaptureSink::new("capture");
    t.register_sink(sink.clone(), Vec::new());

    t.track_domain_activity(&watch_video("X"), &Action::open())
        .unwrap();
    t.track_domain_activity(&watch_video("X"), &Action::start())
        .unwrap();
    let before = session_id(&sink.events()[1]);

    clock.advance(Duration::seconds(30));
    let suspended = t.on_app_will_suspend();
    let suspended: Vec<_> = suspended.events().cloned().collect();
    assert_eq!(suspended.len(), 1);
    assert_eq!(status(&suspended[0]), "canceled");
    assert_eq!(trigger(&suspended[0]), "suspend");
    assert_eq!(session_id(&suspended[0]), before);
    assert!(t.domain_activity_sessions().is_empty());

    clock.advance(Duration::seconds(30));
    let resumed: Vec<_> = t.on_app_did_resume().events().cloned().collect();
    assert_eq!(resumed.len(), 2);
    assert_eq!(status(&resumed[0]), "opened");
    assert_eq!(status(&resumed[1]), "started");
    assert!(resumed.iter().all(|e| trigger(e) == "resume"));
    let after = session_id(&resumed[0]);
    assert_eq!(session_id(&resumed[1]), after);
    assert_ne!(after, before);

    // every emitted event reached the sink, in order
    assert_eq!(
        sink.statuses(),
        vec!["opened", "started", "canceled", "opened", "started"]
    );

    // the restored session continues normally
    let paused = t
        .track_domain_activity(&watch_video("X"), &Action::pause())
        .unwrap();
    assert_eq!(session_id(&paused.event), after);
    assert_eq!(paused.event.attribute_as::<f64>("opened").unwrap(), 1060.0);
}

#[test]
fn suspend_covers_both_managers() {
    let (t, _) = tentacles();
    let sink = CaptureSink::new("capture");
    t.register_sink(sink.clone(), Vec::new());

    t.track_domain_activity(&watch_video("X"), &Action::open())
        .unwrap();
    t.track_value_proposition(
        &tentacles_core::api::ValueProposition::new("premiumTrial", EmptyAttributes {}),
        &Action::open(),
    )
    .unwrap();

    let suspended = t.on_app_will_suspend();
    let categories: Vec<String> = suspended
        .events()
        .map(|e| e.attribute_as("category").unwrap())
        .collect();
    assert_eq!(categories, vec!["domainActivity", "valueProposition"]);
    assert!(t.value_proposition_sessions().is_empty());

    assert_eq!(t.on_app_did_resume().reports.len(), 4);
    assert_eq!(t.value_proposition_sessions().len(), 1);
}

#[test]
fn resume_restores_state_from_latest_suspend() {
    let (t, _) = tentacles();
    t.track_domain_activity(&watch_video("X"), &Action::open())
        .unwrap();
    t.track_domain_activity(&watch_video("X"), &Action::start())
        .unwrap();
    t.on_app_will_suspend();
    let reopened = t
        .track_domain_activity(&watch_video("X"), &Action::open())
        .unwrap();
    let canceled: Vec<_> = t.on_app_will_suspend().events().cloned().collect();
    assert_eq!(canceled.len(), 1);
    assert_eq!(session_id(&canceled[0]), session_id(&reopened.event));

    let resumed: Vec<_> = t.on_app_did_resume().events().cloned().collect();
    let statuses: Vec<String> = resumed.iter().map(status).collect();
    assert_eq!(statuses, vec!["opened", "opened"]);
    let live = t.domain_activity_sessions();
    assert_eq!(live.len(), 1);
    assert_eq!(live[0].status(), SessionStatus::Opened);
}

#[test]
fn resume_without_suspend_emits_nothing() {
    let (t, _) = tentacles();
    t.track_domain_activity(&watch_video("X"), &Action::open())
        .unwrap();
    assert!(t.on_app_did_resume().is_empty());
    assert_eq!(t.domain_activity_sessions().len(), 1);
}

#[test]
fn action_attributes_are_scoped_to_one_event() {
    let (t, _) = tentacles();
    t.track_domain_activity(&watch_video("X"), &Action::open())
        .unwrap();

    let started = t
        .track_domain_activity(
            &watch_video("X"),
            &Action::start().with_attributes(KeyValueAttribute::new("videoName", "override")),
        )
        .unwrap();
    assert_eq!(
        started.event.attribute_as::<String>("videoName").unwrap(),
        "override"
    );

    // the session still belongs to the original activity
    let paused = t
        .track_domain_activity(&watch_video("X"), &Action::pause())
        .unwrap();
    assert_eq!(paused.event.attribute_as::<String>("videoName").unwrap(), "X");
    assert_eq!(t.domain_activity_sessions().len(), 1);
}

#[test]
fn identity_changes_after_terminal_status_and_reopen() {
    let (t, _) = tentacles();
    let first = t
        .track_domain_activity(&watch_video("X"), &Action::open())
        .unwrap();
    t.track_domain_activity(&watch_video("X"), &Action::cancel())
        .unwrap();
    let second = t
        .track_domain_activity(&watch_video("X"), &Action::open())
        .unwrap();
    assert_ne!(session_id(&first.event), session_id(&second.event));

    // different attributes mean a different activity and a separate session
    let other = t
        .track_domain_activity(&watch_video("Y"), &Action::open())
        .unwrap();
    assert_ne!(session_id(&other.event), session_id(&second.event));
    assert_eq!(t.domain_activity_sessions().len(), 2);
}

#[test]
fn reset_clears_sessions_sinks_and_counters() {
    let (t, _) = tentacles();
    let sink = CaptureSink::new("capture");
    t.register_sink(sink.clone(), Vec::new());
    assert_eq!(sink.setups(), 1);
    t.track_domain_activity(&watch_video("X"), &Action::open())
        .unwrap();

    t.reset();
    assert!(t.domain_activity_sessions().is_empty());
    assert!(t.sink_names().is_empty());

    let report = t
        .track_domain_activity(&watch_video("X"), &Action::open())
        .unwrap();
    assert_eq!(session_id(&report.event), "da-1");
    assert!(report.delivery.delivered.is_empty());
    assert_eq!(sink.events().len(), 1);
}

/// Reference model of which actions a session accepts, written out from the
/// transition graph.
fn model_next(current: Option<SessionStatus>, action: ActionStatus) -> Option<SessionStatus> {
    use ActionStatus as A;
    use SessionStatus as S;
    match (current, action) {
        (None, A::Open) => Some(S::Opened),
        (Some(S::Opened), A::Start) => Some(S::Started),
        (Some(S::Opened), A::Cancel) => Some(S::Canceled),
        (Some(S::Started), A::Pause) => Some(S::Paused),
        (Some(S::Started), A::Complete) => Some(S::Completed),
        (Some(S::Started), A::Cancel) => Some(S::Canceled),
        (Some(S::Paused), A::Start) => Some(S::Started),
        (Some(S::Paused), A::Cancel) => Some(S::Canceled),
        _ => None,
    }
}

#[test]
fn emitted_statuses_are_the_validated_subsequence_of_any_action_sequence() {
    const ACTIONS: [ActionStatus; 5] = [
        ActionStatus::Open,
        ActionStatus::Start,
        ActionStatus::Pause,
        ActionStatus::Complete,
        ActionStatus::Cancel,
    ];
    let activity = DomainActivity::new("exhaustive", EmptyAttributes {});

    for code in 0..ACTIONS.len().pow(4) {
        let sequence: Vec<ActionStatus> = (0..4)
            .map(|i| ACTIONS[(code / ACTIONS.len().pow(i)) % ACTIONS.len()])
            .collect();

        let (t, _) = tentacles();
        let sink = CaptureSink::new("capture");
        t.register_sink(sink.clone(), Vec::new());

        let mut current = None;
        let mut expected = Vec::new();
        for action in &sequence {
            let result = t.track_domain_activity(&activity, &Action::new(*action, "clicked"));
            match model_next(current, *action) {
                Some(next) => {
                    assert!(result.is_ok(), "{sequence:?}: {action} should be accepted");
                    if let Some(from) = current {
                        assert_eq!(StateTransition::transition(from, *action), Ok(next));
                    }
                    expected.push(next.as_str().to_string());
                    current = (!next.is_terminal()).then_some(next);
                }
                None => assert!(result.is_err(), "{sequence:?}: {action} should be rejected"),
            }
        }
        assert_eq!(sink.statuses(), expected, "sequence {sequence:?}");
    }
}
