pub mod assignment;
pub mod dashboard;
pub mod decision;
