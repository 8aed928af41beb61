//! 状态转换规则和验证

use super::types::{ActionStatus, SessionStatus};
use thiserror::Error;

/// 状态转换错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransitionError {
    #[error("Invalid transition from {from} via {action}")]
    InvalidTransition {
        from: SessionStatus,
        action: ActionStatus,
    },
    #[error("Cannot transition from terminal state {state} via {action}")]
    FromTerminalState {
        state: SessionStatus,
        action: ActionStatus,
    },
}

impl TransitionError {
    pub fn from_status(&self) -> SessionStatus {
        match self {
            Self::InvalidTransition { from, .. } => *from,
            Self::FromTerminalState { state, .. } => *state,
        }
    }

    pub fn action(&self) -> ActionStatus {
        match self {
            Self::InvalidTransition { action, .. } | Self::FromTerminalState { action, .. } => {
                *action
            }
        }
    }
}

/// 状态转换
pub struct StateTransition;

impl StateTransition {
    /// 计算请求动作后的新状态
    ///
    /// Only the edges below are legal; self transitions (`opened` + `open`) and
    /// skipped states (`opened` + `pause`) are rejected.
    pub fn transition(
        from: SessionStatus,
        action: ActionStatus,
    ) -> Result<SessionStatus, TransitionError> {
        // 终态不能转换
        if from.is_terminal() {
            return Err(TransitionError::FromTerminalState {
                state: from,
                action,
            });
        }

        match (from, action) {
            (SessionStatus::Opened, ActionStatus::Start) => Ok(SessionStatus::Started),
            (SessionStatus::Opened, ActionStatus::Cancel)
            | (SessionStatus::Started, ActionStatus::Cancel)
            | (SessionStatus::Paused, ActionStatus::Cancel) => Ok(SessionStatus::Canceled),
            (SessionStatus::Started, ActionStatus::Pause) => Ok(SessionStatus::Paused),
            (SessionStatus::Started, ActionStatus::Complete) => Ok(SessionStatus::Completed),
            (SessionStatus::Paused, ActionStatus::Start) => Ok(SessionStatus::Started),
            _ => Err(TransitionError::InvalidTransition { from, action }),
        }
    }

    /// 验证状态转换是否合法
    pub fn validate(from: SessionStatus, action: ActionStatus) -> Result<(), TransitionError> {
        Self::transition(from, action).map(|_| ())
    }

    /// 获取当前状态下允许的动作
    pub fn allowed_actions(from: SessionStatus) -> &'static [ActionStatus] {
        match from {
            SessionStatus::Opened => &[ActionStatus::Start, ActionStatus::Cancel],
            SessionStatus::Started => &[
                ActionStatus::Pause,
                ActionStatus::Complete,
                ActionStatus::Cancel,
            ],
            SessionStatus::Paused => &[ActionStatus::Start, ActionStatus::Cancel],
            SessionStatus::Canceled | SessionStatus::Completed => &[],
        }
    }

    /// 判断是否为终态
    pub fn is_terminal(status: SessionStatus) -> bool {
        status.is_terminal()
    }
}
