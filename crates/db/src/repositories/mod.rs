//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument and return
//! `Result<_, sqlx::Error>`.

pub mod badge_repo;
pub mod challenge_repo;
pub mod progress_repo;
pub mod ranking_repo;
pub mod user_repo;

pub use badge_repo::BadgeRepo;
pub use challenge_repo::ChallengeRepo;
pub use progress_repo::ProgressRepo;
pub use ranking_repo::RankingRepo;
pub use user_repo::UserRepo;
