pub mod api;
pub mod backup_record;
pub mod config;
pub mod error;
pub mod flag;
pub mod grouped_view;
