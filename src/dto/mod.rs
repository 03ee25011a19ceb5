pub mod candidate_dto;
pub mod job_order_dto;
pub mod projections;
pub mod submittal_dto;
