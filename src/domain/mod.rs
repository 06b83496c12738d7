// Domain layer - Survey tables and dashboard models
pub mod calendar;
pub mod dashboard;
pub mod error;
pub mod occasion;
pub mod series;
pub mod share;
pub mod snapshot;
