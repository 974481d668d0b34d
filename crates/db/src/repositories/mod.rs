//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument. Multi-statement operations
//! (reward credits, redemptions, set rebuilds) own their transaction.

pub mod purchase_repo;
pub mod task_repo;
pub mod user_repo;

pub use purchase_repo::PurchaseRepo;
pub use task_repo::TaskRepo;
pub use user_repo::UserRepo;
