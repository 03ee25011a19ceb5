pub mod candidate;
pub mod job_order;
pub mod submittal;
pub mod user;
