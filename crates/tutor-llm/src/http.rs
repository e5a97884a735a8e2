//! Shared HTTP client construction for consistent timeout configuration.

use std::time::Duration;

/// Create the HTTP client used by completion providers.
///
/// Config: 10s connect timeout, `request_timeout` overall, rustls TLS,
/// `tutor/{version}` user-agent, redirect limit 10.
#[must_use]
pub fn default_client(request_timeout: Duration) -> reqwest::Client {
    reqwest::Client::builder()
        .connect_timeout(Duration::from_secs(10))
        .timeout(request_timeout)
        .user_agent(concat!("tutor/", env!("CARGO_PKG_VERSION")))
        .redirect(reqwest::redirect::Policy::limited(10))
        .build()
        .expect("default HTTP client construction must not fail")
}
