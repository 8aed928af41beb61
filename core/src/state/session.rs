//! 会话状态管理

use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

use super::types::SessionStatus;
use crate::activity::Activity;

/// 会话
///
/// One live lifecycle for one [`Activity`]. Every status change appends a
/// timestamp for the new status, so revisiting `started` or `paused` keeps the
/// full history.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    /// 会话唯一 ID
    id: String,
    /// 被追踪的活动
    activity: Activity,
    /// 当前状态
    status: SessionStatus,
    /// 每个状态的时间戳（按访问顺序）
    status_timestamps: BTreeMap<SessionStatus, Vec<DateTime<Utc>>>,
}

impl Session {
    /// 创建新会话，初始状态为 opened
    pub fn new(id: String, activity: Activity, now: DateTime<Utc>) -> Self {
        let mut session = Self {
            id,
            activity,
            status: SessionStatus::Opened,
            status_timestamps: BTreeMap::new(),
        };
        session.record_timestamp(SessionStatus::Opened, now);
        session
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn activity(&self) -> &Activity {
        &self.activity
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    /// 设置新状态并记录时间戳
    pub fn set_status(&mut self, status: SessionStatus, now: DateTime<Utc>) {
        self.status = status;
        self.record_timestamp(status, now);
    }

    /// 使用新 ID 并清空历史时间戳
    pub fn reset(&mut self, new_id: String) {
        self.id = new_id;
        self.status_timestamps.clear();
    }

    pub fn timestamps(&self, status: SessionStatus) -> &[DateTime<Utc>] {
        self.status_timestamps
            .get(&status)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn status_timestamps(&self) -> &BTreeMap<SessionStatus, Vec<DateTime<Utc>>> {
        &self.status_timestamps
    }

    /// 是否活跃
    pub fn is_active(&self) -> bool {
        !self.status.is_terminal()
    }

    fn record_timestamp(&mut self, status: SessionStatus, now: DateTime<Utc>) {
        self.status_timestamps.entry(status).or_default().push(now);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::AttributeMap;
    use chrono::{Duration, TimeZone};

    fn session() -> (Session, DateTime<Utc>) {
        let t0 = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let activity = Activity::new("watchVideo", AttributeMap::new());
        (Session::new("s-1".to_string(), activity, t0), t0)
    }

    #[test]
    fn test_session_creation() {
        let (session, t0) = session();
        assert_eq!(session.status(), SessionStatus::Opened);
        assert_eq!(session.timestamps(SessionStatus::Opened), &[t0]);
        assert!(session.timestamps(SessionStatus::Started).is_empty());
        assert!(session.is_active());
    }

    #[test]
    fn test_timestamps_accumulate() {
        let (mut session, t0) = session();
        let t1 = t0 + Duration::seconds(1);
        let t2 = t0 + Duration::seconds(2);
        let t3 = t0 + Duration::seconds(3);
        session.set_status(SessionStatus::Started, t1);
        session.set_status(SessionStatus::Paused, t2);
        session.set_status(SessionStatus::Started, t3);
        assert_eq!(session.timestamps(SessionStatus::Started), &[t1, t3]);
        assert_eq!(session.timestamps(SessionStatus::Paused), &[t2]);
        assert_eq!(session.id(), "s-1");
    }

    #[test]
    fn test_reset_changes_id_and_clears_history() {
        let (mut session, t0) = session();
        session.set_status(SessionStatus::Started, t0);
        session.reset("s-2".to_string());
        assert_eq!(session.id(), "s-2");
        assert!(session.status_timestamps().is_empty());
        assert_eq!(session.status(), SessionStatus::Started);
    }
}
