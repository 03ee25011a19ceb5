pub mod access;
pub mod config;
pub mod database;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

use crate::services::{
    candidate_service::CandidateService, job_order_service::JobOrderService,
    submittal_service::SubmittalService,
};
use sqlx::PgPool;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub candidate_service: CandidateService,
    pub job_order_service: JobOrderService,
    pub submittal_service: SubmittalService,
}

impl AppState {
    pub fn new(pool: PgPool) -> Self {
        let candidate_service = CandidateService::new(pool.clone());
        let job_order_service = JobOrderService::new(pool.clone());
        let submittal_service = SubmittalService::new(pool.clone());

        Self {
            pool,
            candidate_service,
            job_order_service,
            submittal_service,
        }
    }
}
