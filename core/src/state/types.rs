//! 状态类型定义

use serde::{Deserialize, Serialize};
use std::fmt;

/// 会话状态
///
/// `Canceled` 与 `Completed` 为终态，到达终态的会话会从存储中移除。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    /// 已打开
    Opened,
    /// 已开始
    Started,
    /// 已暂停
    Paused,
    /// 已取消
    Canceled,
    /// 已完成
    Completed,
}

impl SessionStatus {
    pub const ALL: [SessionStatus; 5] = [
        SessionStatus::Opened,
        SessionStatus::Started,
        SessionStatus::Paused,
        SessionStatus::Canceled,
        SessionStatus::Completed,
    ];

    /// Attribute key / wire name of the status.
    pub fn as_str(self) -> &'static str {
        match self {
            SessionStatus::Opened => "opened",
            SessionStatus::Started => "started",
            SessionStatus::Paused => "paused",
            SessionStatus::Canceled => "canceled",
            SessionStatus::Completed => "completed",
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, SessionStatus::Canceled | SessionStatus::Completed)
    }
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 调用方请求的状态变更
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionStatus {
    Open,
    Start,
    Pause,
    Cancel,
    Complete,
}

impl ActionStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ActionStatus::Open => "open",
            ActionStatus::Start => "start",
            ActionStatus::Pause => "pause",
            ActionStatus::Cancel => "cancel",
            ActionStatus::Complete => "complete",
        }
    }

    /// The status a session lands in when this action is accepted.
    pub fn target_status(self) -> SessionStatus {
        match self {
            ActionStatus::Open => SessionStatus::Opened,
            ActionStatus::Start => SessionStatus::Started,
            ActionStatus::Pause => SessionStatus::Paused,
            ActionStatus::Cancel => SessionStatus::Canceled,
            ActionStatus::Complete => SessionStatus::Completed,
        }
    }
}

impl fmt::Display for ActionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
