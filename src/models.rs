//! Response schemas of the Solar Manager API.
//!
//! Each type mirrors the JSON the service returns for one endpoint. Optional
//! values are absent from the payload when a device does not report them.

mod chart;
mod forecast;
mod gateway;
mod sensor;
mod statistics;
mod tariff;

use serde::{Deserialize, Deserializer, Serialize};

pub use self::{
    chart::{BatteryFlow, EnergyFlow, PieChart},
    forecast::ForecastEntry,
    gateway::{
        GatewayData,
        GatewayInfo,
        GatewayInfoResponse,
        GatewaySettings,
        TariffSeason,
        TariffSlot,
        UserInfo,
        Versions,
    },
    sensor::{DeviceReading, OperationState, SensorData, SensorDataResponse, SensorInfo, SensorTag},
    statistics::{
        GatewayConsumption,
        GatewayConsumptionStatistics,
        Period,
        SensorConsumption,
        SensorConsumptionStatistics,
    },
    tariff::LowRateTariff,
};

/// Connectivity reported for gateways and devices.
///
/// Values the service adds later are kept verbatim in `Unknown`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Signal {
    Connected,
    NotConnected,
    Unknown(String),
}

impl Signal {
    pub fn as_str(&self) -> &str {
        match self {
            Signal::Connected => "connected",
            Signal::NotConnected => "not connected",
            Signal::Unknown(raw) => raw,
        }
    }
}

impl Default for Signal {
    fn default() -> Self {
        Signal::Unknown(String::new())
    }
}

impl From<String> for Signal {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "connected" => Signal::Connected,
            "not connected" => Signal::NotConnected,
            _ => Signal::Unknown(raw),
        }
    }
}

impl From<Signal> for String {
    fn from(signal: Signal) -> Self {
        match signal {
            Signal::Unknown(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

/// Error code lists come as `null` from some firmware versions.
pub(crate) fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}
