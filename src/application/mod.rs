// Application layer - Generation use cases and dashboard composition
pub mod dashboard_service;
pub mod random_source;
pub mod series_generator;
pub mod share_generator;
pub mod streaming_service;
pub mod survey_generator;
pub mod survey_repository;
