use crate::configuration::ApplicationSettings;
use crate::domain::contact::ports::ContactService;
use crate::domain::rate_limit::RateLimiter;
use crate::inbound::http::handlers::send_email;
use crate::inbound::http::middleware::{cors, json_config, security_headers};
use actix_web::dev::Server;
use actix_web::{web, App, HttpServer};
use std::net::TcpListener;
use std::sync::Arc;
use tracing_actix_web::TracingLogger;

mod client;
pub mod errors;
mod handlers;
mod middleware;
pub mod state;

pub use state::SharedContactState;

pub struct Application<CS>
where
    CS: ContactService,
{
    port: u16,
    server: Server,
    contact_state: SharedContactState<CS>,
}

fn run<CS: ContactService>(
    listener: TcpListener,
    configuration: ApplicationSettings,
    contact_state: SharedContactState<CS>,
) -> Result<Server, std::io::Error> {
    let contact_state = web::Data::new(contact_state);
    let allowed_origins = configuration.allowed_origins();

    let server = HttpServer::new(move || {
        App::new()
            .wrap(cors(allowed_origins.as_deref()))
            .wrap(security_headers())
            .wrap(TracingLogger::default())
            .app_data(json_config(&configuration))
            .app_data(contact_state.clone())
            .route("/send-email", web::post().to(send_email::<CS>))
    })
    .listen(listener)?
    .run();

    Ok(server)
}

/// Empties expired rate windows once per window, so the limiter only holds
/// clients seen recently.
fn spawn_rate_window_sweeper(rate_limiter: &Arc<RateLimiter>) {
    let rate_limiter = Arc::downgrade(rate_limiter);
    tokio::spawn(async move {
        let period = match rate_limiter.upgrade() {
            Some(limiter) => limiter.window(),
            None => return,
        };
        let mut interval = tokio::time::interval(period);
        // The first tick completes immediately.
        interval.tick().await;
        loop {
            interval.tick().await;
            let Some(limiter) = rate_limiter.upgrade() else {
                break;
            };
            let purged = limiter.purge_expired();
            tracing::debug!(purged, "Purged expired rate limit windows");
        }
    });
}

impl<CS> Application<CS>
where
    CS: ContactService,
{
    pub async fn build(
        contact_service: CS,
        rate_limiter: RateLimiter,
        configuration: ApplicationSettings,
    ) -> Result<Self, std::io::Error> {
        let address = format!("{}:{}", configuration.host, configuration.port);
        let listener = TcpListener::bind(address)?;
        let port = listener.local_addr()?.port();

        let rate_limiter = Arc::new(rate_limiter);
        if !rate_limiter.window().is_zero() {
            spawn_rate_window_sweeper(&rate_limiter);
        }
        let contact_state = SharedContactState::new(
            contact_service,
            rate_limiter,
            configuration.trust_forwarded_for,
        );

        let server = run(listener, configuration, contact_state.clone())?;

        Ok(Self {
            port,
            server,
            contact_state,
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn contact_state(&self) -> SharedContactState<CS> {
        self.contact_state.clone()
    }

    pub async fn run_until_stopped(self) -> Result<(), std::io::Error> {
        self.server.await
    }
}
