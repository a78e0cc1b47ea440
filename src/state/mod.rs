//! State module for tracking crawl progress
//!
//! # Components
//!
//! - `CrawlPhase`: the frontier's `Idle → Seeded → Draining → Done` machine
//! - `FailureKind`: why an individual fetch contributed nothing

mod failure;
mod phase;

pub use failure::FailureKind;
pub use phase::CrawlPhase;
