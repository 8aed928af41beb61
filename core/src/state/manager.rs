//! 会话管理器

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::builder::{EventBuilder, SessionKind};
use super::clock::Clock;
use super::identity::SessionIdGenerator;
use super::session::Session;
use super::store::SessionStore;
use super::transitions::StateTransition;
use super::types::SessionStatus;
use crate::activity::{Activity, RawAction};
use crate::error::TentaclesError;
use crate::event::{EventTrigger, RawEvent};

/// 会话管理器
///
/// Owns the live session table of one kind (domain activities or value
/// propositions) behind a single mutex. `track`, `suspend`, `resume` and
/// `reset_with` each run entirely under that mutex.
///
/// Every entry point takes a `snapshot` closure that runs while the lock is
/// still held. The dispatcher uses it to capture the sink registry, so the
/// events of a call are delivered to exactly the registry that was current
/// when the call committed.
pub struct SessionManager {
    kind: SessionKind,
    ids: Box<dyn SessionIdGenerator>,
    clock: Arc<dyn Clock>,
    state: Mutex<ManagerState>,
}

#[derive(Default)]
struct ManagerState {
    /// 活跃会话
    store: SessionStore,
    /// 挂起前的会话快照，等待恢复
    suspended: Vec<Session>,
}

impl SessionManager {
    pub fn new(kind: SessionKind, ids: Box<dyn SessionIdGenerator>, clock: Arc<dyn Clock>) -> Self {
        Self {
            kind,
            ids,
            clock,
            state: Mutex::new(ManagerState::default()),
        }
    }

    pub fn kind(&self) -> SessionKind {
        self.kind
    }

    /// 处理一个动作
    ///
    /// Resolves (or creates) the session of `activity`, applies the state
    /// machine and builds the resulting event. A rejected action leaves the
    /// table untouched and produces no event.
    pub fn track<S>(
        &self,
        activity: &Activity,
        action: &RawAction,
        snapshot: impl FnOnce() -> S,
    ) -> Result<(RawEvent, S), TentaclesError> {
        let mut state = self.lock();
        let now = self.clock.now();

        let session = match state.store.find_by_activity(activity).cloned() {
            Some(mut session) => {
                let next = StateTransition::transition(session.status(), action.status)
                    .map_err(|e| TentaclesError::prohibited(activity.name(), e))?;
                state.store.apply(&mut session, next, now);
                session
            }
            None => state
                .store
                .create(activity, action.status, now, || self.ids.next_id())?
                .clone(),
        };

        tracing::debug!(
            category = self.kind.category,
            activity = %activity.name(),
            session_id = %session.id(),
            status = %session.status(),
            "session transition"
        );

        let event = EventBuilder::build(
            self.kind,
            &session,
            &action.trigger,
            action.attributes.as_ref(),
        );
        Ok((event, snapshot()))
    }

    /// 应用挂起：取消所有活跃会话并缓存
    ///
    /// Each live session is forced to `canceled` without consulting the state
    /// machine and removed; one event per session is emitted. The pre-suspend
    /// sessions are kept for [`Self::resume`]. Suspending again before a
    /// resume adds to the cache; a newly drained session replaces any cached
    /// one of the same activity.
    pub fn suspend<S>(
        &self,
        trigger: &EventTrigger,
        snapshot: impl FnOnce() -> S,
    ) -> (Vec<RawEvent>, S) {
        let mut state = self.lock();
        let now = self.clock.now();
        let live = state.store.drain();

        let events = live
            .iter()
            .map(|session| {
                let mut canceled = session.clone();
                canceled.set_status(SessionStatus::Canceled, now);
                EventBuilder::build(self.kind, &canceled, trigger, None)
            })
            .collect::<Vec<_>>();

        if !live.is_empty() {
            tracing::info!(
                category = self.kind.category,
                sessions = live.len(),
                "sessions canceled on suspend"
            );
        }
        state
            .suspended
            .retain(|cached| !live.iter().any(|l| l.activity() == cached.activity()));
        state.suspended.extend(live);
        (events, snapshot())
    }

    /// 应用恢复：以新 ID 重新打开缓存的会话
    ///
    /// For every cached session: new identity, cleared history, an `opened`
    /// event, then the pre-suspend status is restored and a second event is
    /// emitted (also when that status was `opened`). A session whose activity
    /// was reopened while suspended is not restored; the live one wins.
    pub fn resume<S>(
        &self,
        trigger: &EventTrigger,
        snapshot: impl FnOnce() -> S,
    ) -> (Vec<RawEvent>, S) {
        let mut state = self.lock();
        let now = self.clock.now();
        let cached = std::mem::take(&mut state.suspended);
        let mut events = Vec::with_capacity(cached.len() * 2);

        for previous in cached {
            if state.store.find_by_activity(previous.activity()).is_some() {
                tracing::debug!(
                    category = self.kind.category,
                    activity = %previous.activity().name(),
                    "activity reopened while suspended, not restoring"
                );
                continue;
            }

            let mut session = previous.clone();
            session.reset(self.ids.next_id());
            session.set_status(SessionStatus::Opened, now);
            events.push(EventBuilder::build(self.kind, &session, trigger, None));

            session.set_status(previous.status(), now);
            events.push(EventBuilder::build(self.kind, &session, trigger, None));

            tracing::debug!(
                category = self.kind.category,
                activity = %session.activity().name(),
                previous_id = %previous.id(),
                session_id = %session.id(),
                status = %session.status(),
                "session restored on resume"
            );
            state.store.install(session);
        }

        (events, snapshot())
    }

    /// Clears live and cached sessions and the id counter, then runs `then`
    /// while the lock is still held.
    pub fn reset_with<R>(&self, then: impl FnOnce() -> R) -> R {
        let mut state = self.lock();
        state.store.clear();
        state.suspended.clear();
        self.ids.reset();
        then()
    }

    /// 获取所有活跃会话
    pub fn live_sessions(&self) -> Vec<Session> {
        self.lock().store.sessions().to_vec()
    }

    pub fn find_session(&self, activity: &Activity) -> Option<Session> {
        self.lock().store.find_by_activity(activity).cloned()
    }

    pub fn suspended_count(&self) -> usize {
        self.lock().suspended.len()
    }

    fn lock(&self) -> MutexGuard<'_, ManagerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
