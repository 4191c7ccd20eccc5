//! Middleware de Rate Limiting
//!
//! Limita los requests por IP en una ventana de tiempo fija. Se aplica a la
//! superficie de ingestión GPS: los trackers reenvían en ráfagas cuando
//! recuperan cobertura.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

use crate::config::environment::EnvironmentConfig;
use crate::utils::errors::AppError;

/// Contador de requests de una IP dentro de la ventana actual
#[derive(Debug, Clone)]
struct WindowCounter {
    requests: u32,
    window_start: Instant,
}

/// Estado compartido del rate limiting
#[derive(Clone)]
pub struct RateLimitState {
    counters: Arc<RwLock<HashMap<String, WindowCounter>>>,
    max_requests: u32,
    window: Duration,
}

impl RateLimitState {
    pub fn new(config: &EnvironmentConfig) -> Self {
        Self {
            counters: Arc::new(RwLock::new(HashMap::new())),
            max_requests: config.rate_limit_requests,
            window: Duration::from_secs(config.rate_limit_window),
        }
    }

    /// Registrar un request de la IP; error si la ventana está agotada
    pub async fn check(&self, ip: &str) -> Result<(), AppError> {
        let mut counters = self.counters.write().await;
        let now = Instant::now();

        // Purgar ventanas expiradas para que el mapa no crezca sin límite
        counters.retain(|_, counter| now.duration_since(counter.window_start) < self.window);

        let counter = counters.entry(ip.to_string()).or_insert(WindowCounter {
            requests: 0,
            window_start: now,
        });

        if counter.requests >= self.max_requests {
            return Err(AppError::RateLimitExceeded);
        }

        counter.requests += 1;
        Ok(())
    }
}

/// Middleware de rate limiting por IP
pub async fn rate_limit_middleware(
    State(state): State<RateLimitState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let ip = client_ip(&request);
    state.check(&ip).await?;
    Ok(next.run(request).await)
}

fn client_ip(request: &Request) -> String {
    request
        .headers()
        .get("x-forwarded-for")
        .and_then(|header| header.to_str().ok())
        .and_then(|value| value.split(',').next())
        .unwrap_or("unknown")
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_state(max_requests: u32) -> RateLimitState {
        RateLimitState {
            counters: Arc::new(RwLock::new(HashMap::new())),
            max_requests,
            window: Duration::from_secs(60),
        }
    }

    #[tokio::test]
    async fn test_allows_up_to_limit() {
        let state = test_state(3);
        for _ in 0..3 {
            assert!(state.check("10.0.0.1").await.is_ok());
        }
        assert!(matches!(
            state.check("10.0.0.1").await,
            Err(AppError::RateLimitExceeded)
        ));
    }

    #[tokio::test]
    async fn test_limits_are_per_ip() {
        let state = test_state(1);
        assert!(state.check("10.0.0.1").await.is_ok());
        assert!(state.check("10.0.0.2").await.is_ok());
        assert!(state.check("10.0.0.1").await.is_err());
    }
}
