pub mod account_manager;
pub mod app_user;
pub mod customer;
pub mod job;
pub mod job_kind;
pub mod job_snapshot;
pub mod job_state;
pub mod order;
pub mod order_snapshot;
pub mod report;
pub mod service_provider;
pub mod user_role;
pub mod user_snapshot;
