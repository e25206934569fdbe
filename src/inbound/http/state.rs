use crate::domain::contact::ports::ContactService;
use crate::domain::rate_limit::RateLimiter;
use std::sync::Arc;

#[derive(Debug)]
pub struct ContactState<CS: ContactService> {
    contact_service: CS,
    rate_limiter: Arc<RateLimiter>,
    trust_forwarded_for: bool,
}

#[derive(Debug)]
pub struct SharedContactState<CS: ContactService>(Arc<ContactState<CS>>);

// Derived `Clone` would require `CS: Clone`.
impl<CS: ContactService> Clone for SharedContactState<CS> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<CS: ContactService> SharedContactState<CS> {
    pub fn new(
        contact_service: CS,
        rate_limiter: Arc<RateLimiter>,
        trust_forwarded_for: bool,
    ) -> Self {
        Self(Arc::new(ContactState {
            contact_service,
            rate_limiter,
            trust_forwarded_for,
        }))
    }

    pub fn contact_service(&self) -> &CS {
        &self.0.contact_service
    }

    pub fn rate_limiter(&self) -> &RateLimiter {
        &self.0.rate_limiter
    }

    pub fn trust_forwarded_for(&self) -> bool {
        self.0.trust_forwarded_for
    }
}
