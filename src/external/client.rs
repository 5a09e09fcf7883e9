use std::sync::LazyLock;
use std::time::Duration;

/// Global HTTP client instance shared by all channel adapters.
///
/// Initialized lazily on first access and reused across the application.
///
/// # Benefits
/// - **Connection pooling**: Reuses TCP connections for better performance
/// - **DNS caching**: Reduces DNS lookup overhead
/// - **Memory efficiency**: Single client instance for the entire application
///
/// Per-request timeouts are applied at the call site from the delivery
/// configuration; the builder timeout here is an upper bound.
pub static HTTP_CLIENT: LazyLock<reqwest::Client> = LazyLock::new(|| {
    reqwest::Client::builder()
        // Timeouts
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10))
        // Connection pooling
        .pool_max_idle_per_host(10)
        .pool_idle_timeout(Duration::from_secs(90))
        // HTTP/2 settings
        .http2_adaptive_window(true)
        .http2_keep_alive_interval(Duration::from_secs(10))
        .http2_keep_alive_timeout(Duration::from_secs(20))
        // Security
        .use_rustls_tls()
        .build()
        .expect("Failed to build HTTP client")
});
