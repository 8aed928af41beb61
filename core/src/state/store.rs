//! 会话存储

use chrono::{DateTime, Utc};

use super::session::Session;
use super::types::{ActionStatus, SessionStatus};
use crate::activity::Activity;
use crate::error::TentaclesError;

/// In-memory table of live sessions, at most one per activity.
///
/// Not synchronized on its own; [`super::SessionManager`] owns it behind a
/// mutex.
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: Vec<Session>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn find_by_activity(&self, activity: &Activity) -> Option<&Session> {
        self.sessions.iter().find(|s| s.activity() == activity)
    }

    /// Inserts a new `opened` session. Only an `open` action may create one;
    /// `next_id` is not called when the action is rejected.
    pub fn create(
        &mut self,
        activity: &Activity,
        action: ActionStatus,
        now: DateTime<Utc>,
        next_id: impl FnOnce() -> String,
    ) -> Result<&Session, TentaclesError> {
        if action != ActionStatus::Open {
            return Err(TentaclesError::InitialActionNotOpen {
                activity: activity.name().to_string(),
                action,
            });
        }
        self.sessions.push(Session::new(next_id(), activity.clone(), now));
        let index = self.sessions.len() - 1;
        Ok(&self.sessions[index])
    }

    /// Sets `status` on `session` (recording its timestamp), then stores the
    /// session if the status is live or removes it if the status is terminal.
    pub fn apply(&mut self, session: &mut Session, status: SessionStatus, now: DateTime<Utc>) {
        session.set_status(status, now);
        match self.index_of(session.activity()) {
            Some(index) if status.is_terminal() => {
                self.sessions.remove(index);
            }
            Some(index) => self.sessions[index] = session.clone(),
            None if !status.is_terminal() => self.sessions.push(session.clone()),
            None => {}
        }
    }

    /// Removes and returns every live session, in insertion order.
    pub fn drain(&mut self) -> Vec<Session> {
        std::mem::take(&mut self.sessions)
    }

    /// Adds `session` unless one for the same activity is already live.
    pub fn install(&mut self, session: Session) -> bool {
        if self.index_of(session.activity()).is_some() {
            return false;
        }
        self.sessions.push(session);
        true
    }

    pub fn clear(&mut self) {
        self.sessions.clear();
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    pub fn sessions(&self) -> &[Session] {
        &self.sessions
    }

    fn index_of(&self, activity: &Activity) -> Option<usize> {
        self.sessions.iter().position(|s| s.activity() == activity)
    }
}
