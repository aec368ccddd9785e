pub mod job_service;
pub mod user_service;
