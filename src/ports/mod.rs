//! Ports Layer - Trait definitions for external dependencies
//!
//! Interfaces the adapters implement:
//! - Loyalty API sessions (CSRF, login, check-in, quest claim)
//! - Social posting (create/delete status updates)
//! - Timed waits (mockable sleep)

pub mod clock;
pub mod loyalty;
pub mod mocks;
pub mod social;

pub use clock::{Sleeper, TokioSleeper};
pub use loyalty::{CheckInOutcome, ClaimOutcome, LoyaltyError, QuestSession, SessionFactory};
pub use social::{DeleteError, PostError, PostedTweet, SocialPort};
