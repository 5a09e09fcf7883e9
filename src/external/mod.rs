//! Outbound HTTP plumbing shared by channel adapters.

pub mod client;

pub use client::HTTP_CLIENT;
