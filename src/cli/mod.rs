pub mod exit_status;
pub mod output;
