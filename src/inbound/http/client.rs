use actix_web::HttpRequest;
use std::net::{IpAddr, SocketAddr};

pub const UNKNOWN_CLIENT: &str = "unknown";

/// Identity used as the rate limiting key: the client IP without its port.
pub fn client_identity(request: &HttpRequest, trust_forwarded_for: bool) -> String {
    if trust_forwarded_for {
        if let Some(address) = request.connection_info().realip_remote_addr() {
            return normalize(address);
        }
    }
    request
        .peer_addr()
        .map(|address| address.ip().to_string())
        .unwrap_or_else(|| UNKNOWN_CLIENT.to_string())
}

fn normalize(address: &str) -> String {
    if let Ok(socket) = address.parse::<SocketAddr>() {
        return socket.ip().to_string();
    }
    let bare = address.trim_start_matches('[').trim_end_matches(']');
    match bare.parse::<IpAddr>() {
        Ok(ip) => ip.to_string(),
        Err(_) => address.to_string(),
    }
}
