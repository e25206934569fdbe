pub mod notifier;
pub mod telemetry;
