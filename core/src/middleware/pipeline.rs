//! 中间件链执行

use super::{Middleware, MiddlewareAction};
use crate::event::RawEvent;

/// Where an event ended up after running through one chain.
#[derive(Debug)]
pub enum ChainOutcome {
    Forwarded(RawEvent),
    Skipped { by: String },
    Failed { by: String, error: anyhow::Error },
}

#[cfg(test)]
impl ChainOutcome {
    fn forwarded(self) -> Option<RawEvent> {
        match self {
            ChainOutcome::Forwarded(event) => Some(event),
            _ => None,
        }
    }
}

/// Runs `chain` in order. The first `Skip` or failure ends the chain; later
/// stages never see the event.
pub fn apply_chain(chain: &[Middleware], event: RawEvent) -> ChainOutcome {
    let mut current = event;
    for middleware in chain {
        match middleware.apply(current) {
            Ok(MiddlewareAction::Forward(next)) => current = next,
            Ok(MiddlewareAction::Skip) => {
                return ChainOutcome::Skipped {
                    by: middleware.name().to_string(),
                }
            }
            Err(error) => {
                return ChainOutcome::Failed {
                    by: middleware.name().to_string(),
                    error,
                }
            }
        }
    }
    ChainOutcome::Forwarded(current)
}
