pub mod availability;
pub mod backend;
pub mod configuration;
pub mod configuration_handler;
pub mod error;
pub mod http;
pub mod local_appointments;
pub mod scheduler;
pub mod store_client;
#[cfg(test)]
mod testutils;
pub mod types;
