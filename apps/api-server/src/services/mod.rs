//! Outbound service clients.

mod assist;

pub use assist::AssistClient;
