pub mod email;
pub mod mail;
pub mod message;
pub mod name;
pub mod submission;
