mod clock;
mod limiter;

pub use clock::{Clock, SystemClock};
pub use limiter::{RateLimitDecision, RateLimiter, RateWindow};
