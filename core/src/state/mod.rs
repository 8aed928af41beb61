//! # 状态管理模块
//!
//! 负责活动会话的生命周期：状态机、会话存储、事件构建以及挂起/恢复。
//!
//! ## 设计原则
//!
//! 1. **线程安全**：每个管理器持有一把 `Mutex`，所有读写在同一临界区内完成
//! 2. **合法转换**：只有状态机批准的转换会修改会话
//! 3. **可观测**：状态变更通过 `tracing` 记录
//! 4. **可测试**：时钟与 ID 生成器均可注入

pub mod builder;
pub mod clock;
pub mod identity;
pub mod manager;
pub mod session;
pub mod store;
pub mod transitions;
pub mod types;

pub use builder::{EventBuilder, SessionKind};
pub use clock::{timestamp_seconds, Clock, ManualClock, SystemClock};
pub use identity::{IdStrategy, SequentialIdGenerator, SessionIdGenerator, UuidIdGenerator};
pub use manager::SessionManager;
pub use session::Session;
pub use store::SessionStore;
pub use transitions::{StateTransition, TransitionError};
pub use types::{ActionStatus, SessionStatus};
