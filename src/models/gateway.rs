use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{SensorData, Signal};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GatewayInfo {
    /// Database identifier.
    #[serde(rename = "_id")]
    pub id: String,

    pub signal: Signal,

    pub name: String,

    /// Identifier printed on the device.
    pub sm_id: String,

    /// Identifier of the owning user.
    pub owner: String,

    #[serde(rename = "isInstallationCompleted", default)]
    pub installation_completed: bool,

    pub firmware: String,

    #[serde(rename = "lastErrorDate", default, skip_serializing_if = "Option::is_none")]
    pub last_error_date: Option<DateTime<Utc>>,

    pub mac: String,

    pub ip: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GatewayInfoResponse {
    pub gateway: GatewayInfo,

    #[serde(default)]
    pub settings: GatewaySettings,

    #[serde(default)]
    pub user: UserInfo,

    #[serde(default)]
    pub versions: Versions,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewaySettings {
    pub offset_watt: i64,
    pub low_m_f_from: String,
    pub low_m_f_to: String,
    pub low_sat_from: String,
    pub low_sat_to: String,
    pub low_sun_from: String,
    pub low_sun_to: String,

    #[serde(rename = "kWp")]
    pub kilowatt_peak: f64,

    #[serde(rename = "houseFuse")]
    pub house_fuse: i64,

    #[serde(rename = "loadManagement")]
    pub load_management: bool,

    #[serde(rename = "commonSeasons")]
    pub common_seasons: TariffSeason,

    #[serde(rename = "winterSeason")]
    pub winter_season: TariffSeason,

    #[serde(rename = "isWinterTimeEnabled")]
    pub winter_time_enabled: bool,

    #[serde(rename = "highTariff")]
    pub high_tariff: f64,

    #[serde(rename = "lowTariff")]
    pub low_tariff: f64,

    pub provider: String,

    #[serde(rename = "tariffType")]
    pub tariff_type: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TariffSeason {
    pub monday_friday: Vec<TariffSlot>,
    pub saturday: Vec<TariffSlot>,
    pub sunday: Vec<TariffSlot>,
}

/// Tariff in effect from `from` (`HH:MM`) until the next slot starts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TariffSlot {
    pub from: String,
    pub tariff: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserInfo {
    pub first_name: String,
    pub user_id: String,
    pub last_name: String,
    pub email: String,
    pub status: String,
    pub country: String,
    pub city: String,
    pub zip: String,
    pub plant: String,
    pub company_name: String,
    pub company: String,

    #[serde(rename = "connectedOem")]
    pub connected_oem: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Versions {
    #[serde(rename = "supportContract")]
    pub support_contract: bool,
}

/// Live power flow of a whole installation. Power values are in watts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewayData {
    #[serde(rename = "Interface Version", default)]
    pub interface_version: String,

    #[serde(rename = "TimeStamp")]
    pub timestamp: DateTime<Utc>,

    /// Positive while charging, negative while discharging.
    pub current_battery_charge_discharge: i64,

    pub current_power_consumption: i64,

    pub current_pv_generation: i64,

    pub devices: Vec<SensorData>,

    #[serde(default, deserialize_with = "super::null_as_empty")]
    pub errors: Vec<i64>,

    /// Battery state of charge in percent.
    pub soc: i64,
}
