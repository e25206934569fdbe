pub mod configuration;
pub mod domain;
pub mod inbound;
pub mod outbound;
pub mod utils;
