pub mod audit_result;
pub mod clause;
pub mod criteria;
pub mod dashboard;
pub mod document;
pub mod recommendation;
pub mod report;
pub mod timestamp;
pub mod user;
