//! Async client for the Solar Manager cloud API.
//!
//! ```no_run
//! # async fn example() -> solarmanager_rs::ApiResult<()> {
//! use solarmanager_rs::{models::Period, SolarManagerClient};
//!
//! let client = SolarManagerClient::new("username", "password")?;
//! let sensors = client.get_sensors("1234123412341234").await?;
//! let statistics = client
//!     .get_gateway_consumption_statistics("1234123412341234", Period::Day)
//!     .await?;
//! println!("{} sensors, {} consumed today", sensors.len(), statistics.total_consumption);
//! # Ok(())
//! # }
//! ```

#[macro_use]
mod macros;

pub mod auth;
pub mod client;
mod dump;
mod endpoints;
pub mod error;
pub mod models;

pub use auth::{AuthStrategy, BasicAuth};
pub use client::{ApiResult, ClientConfig, ClientConfigBuilder, SolarManagerClient, DEFAULT_BASE_URL};
pub use error::ClientError;
