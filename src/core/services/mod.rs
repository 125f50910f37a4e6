pub mod api_client;
pub mod audit_page;
pub mod auth_page;
pub mod clauses_page;
pub mod criteria_page;
pub mod dashboard_page;
pub mod recommendations_page;
pub mod reports_page;
pub mod router;
pub mod session;

#[cfg(test)]
pub mod test_support;
