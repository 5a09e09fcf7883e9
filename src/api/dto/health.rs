//! Health check DTOs for API responses.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use utoipa::ToSchema;

/// Health check response structure.
///
/// Provides the overall service status plus per-channel configuration
/// checks. Health checks never call the upstream services.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({
    "status": "healthy",
    "version": "0.1.0",
    "timestamp": "2024-01-01T12:00:00Z",
    "checks": {
        "discord": {
            "status": "healthy",
            "message": "configured"
        }
    }
}))]
pub struct HealthResponse {
    /// Overall health status
    pub status: HealthStatus,
    /// Application version
    pub version: String,
    /// Timestamp of the health check (ISO 8601 format)
    #[schema(value_type = String, format = DateTime)]
    pub timestamp: String,
    /// Per-channel configuration checks
    pub checks: HashMap<String, ComponentHealth>,
}

/// Health status enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    /// All systems operational
    Healthy,
    /// Some non-critical issues
    Degraded,
    /// Critical issues present
    Unhealthy,
}

/// Individual component health information.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ComponentHealth {
    /// Component status
    pub status: HealthStatus,
    /// Optional message with details
    pub message: Option<String>,
}

impl ComponentHealth {
    pub fn configured() -> Self {
        Self {
            status: HealthStatus::Healthy,
            message: Some("configured".to_string()),
        }
    }

    pub fn not_configured() -> Self {
        Self {
            status: HealthStatus::Degraded,
            message: Some("not configured".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_status_serialization() {
        let status = HealthStatus::Healthy;
        let json = serde_json::to_string(&status).unwrap();
        assert_eq!(json, "\"healthy\"");

        let degraded = serde_json::to_string(&HealthStatus::Degraded).unwrap();
        assert_eq!(degraded, "\"degraded\"");
    }

    #[test]
    fn test_component_health_constructors() {
        let configured = ComponentHealth::configured();
        assert_eq!(configured.status, HealthStatus::Healthy);
        assert_eq!(configured.message, Some("configured".to_string()));

        let missing = ComponentHealth::not_configured();
        assert_eq!(missing.status, HealthStatus::Degraded);
    }

    #[test]
    fn test_health_response_creation() {
        let mut checks = HashMap::new();
        checks.insert("discord".to_string(), ComponentHealth::configured());

        let response = HealthResponse {
            status: HealthStatus::Healthy,
            version: "0.1.0".to_string(),
            timestamp: "2024-01-01T12:00:00Z".to_string(),
            checks,
        };

        assert_eq!(response.status, HealthStatus::Healthy);
        assert_eq!(response.checks.len(), 1);
    }
}
