/// Crawl phase definitions for one crawl run
///
/// This module defines the lifecycle a crawl run moves through and which
/// transitions between phases are legal.
use crate::ScoutError;
use std::fmt;

/// Represents the current phase of a crawl run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CrawlPhase {
    /// Nothing has been queued yet
    #[default]
    Idle,

    /// The domain root is in the frontier
    Seeded,

    /// Workers are pulling URLs from the frontier
    Running,

    /// A terminal condition was observed; workers are finishing up
    Draining,

    /// All workers have been joined
    Done,
}

impl CrawlPhase {
    /// Returns true if moving from this phase to `next` is allowed
    pub fn can_transition_to(&self, next: CrawlPhase) -> bool {
        matches!(
            (self, next),
            (Self::Idle, Self::Seeded)
                | (Self::Seeded, Self::Running)
                | (Self::Running, Self::Draining)
                | (Self::Draining, Self::Done)
        )
    }

    /// Returns the next phase, or `InvalidTransition` if the move is illegal
    pub fn transition(self, next: CrawlPhase) -> Result<CrawlPhase, ScoutError> {
        if self.can_transition_to(next) {
            Ok(next)
        } else {
            Err(ScoutError::InvalidTransition {
                from: self,
                to: next,
            })
        }
    }

    /// Returns true if workers should stop claiming URLs
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Draining | Self::Done)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Seeded => "seeded",
            Self::Running => "running",
            Self::Draining => "draining",
            Self::Done => "done",
        }
    }
}

impl fmt::Display for CrawlPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
