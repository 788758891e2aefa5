//! Gamification engine.
//!
//! Orchestrates the write path of the platform: recording a daily
//! completion, the trust-score side effect, badge evaluation with grade
//! reclassification, and the challenge completion-rate recompute. Pure
//! math lives in `pacer-core`; storage in `pacer-db`; this module wires
//! them together: fail-fast before the completion is durable,
//! isolate-and-log afterwards.

pub mod badges;
pub mod completion;
pub mod rate;
