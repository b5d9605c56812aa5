use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::Signal;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SensorInfo {
    #[serde(rename = "_id")]
    pub id: String,

    pub priority: i64,

    pub device_type: String,

    pub signal: Signal,

    /// Human readable device category such as `Water Heater` or `Car Charging`.
    #[serde(rename = "type")]
    pub kind: String,

    pub device_group: String,

    #[serde(default)]
    pub ip: String,

    #[serde(default)]
    pub tag: Option<SensorTag>,

    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,

    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SensorTag {
    #[serde(rename = "_id")]
    pub id: String,

    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SensorDataResponse {
    pub date: DateTime<Utc>,
    pub data: SensorData,
}

/// Live reading of a single device attached to a gateway.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawSensorData", into = "RawSensorData")]
pub struct SensorData {
    pub id: String,
    pub signal: Signal,
    pub accumulated_error_count: i64,
    pub errors: Vec<i64>,
    pub reading: DeviceReading,
}

impl SensorData {
    pub fn operation_state(&self) -> Option<OperationState> {
        self.reading.operation_state()
    }
}

/// Measurements a device reports, by device kind.
///
/// The service never states the kind explicitly; it is recognized from the
/// fields present in the payload, checked in declaration order. Power is in
/// watts, temperatures in °C.
///
/// Only the fields of the recognized kind are kept. An inverter payload that
/// also carries `currentPower` or `activeDevice` loses those values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DeviceReading {
    Battery {
        soc: i64,
        current_power: Option<i64>,
        active_device: Option<i64>,
    },
    WaterHeater {
        current_water_temp: i64,
        current_power: Option<i64>,
        active_device: Option<i64>,
        status: Option<i64>,
    },
    Switch {
        switch_state: i64,
        current_power: Option<i64>,
        active_device: Option<i64>,
    },
    Inverter {
        current_power: i64,
        current_energy: Option<i64>,
    },
    Consumer {
        current_power: i64,
        active_device: Option<i64>,
    },
    #[default]
    Unreported,
}

impl DeviceReading {
    pub fn current_power(&self) -> Option<i64> {
        match *self {
            DeviceReading::Battery { current_power, .. }
            | DeviceReading::WaterHeater { current_power, .. }
            | DeviceReading::Switch { current_power, .. } => current_power,
            DeviceReading::Inverter { current_power, .. }
            | DeviceReading::Consumer { current_power, .. } => Some(current_power),
            DeviceReading::Unreported => None,
        }
    }

    /// Operation state of a heat pump or water heater, when it reports a known code.
    pub fn operation_state(&self) -> Option<OperationState> {
        match *self {
            DeviceReading::WaterHeater { status: Some(code), .. } => OperationState::from_code(code),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationState {
    NoInformation,
    Standby,
    Heating,
    WarmWater,
    PartialError,
    Failure,
    Cooling,
    /// Blocked by the utility (EVU lock).
    UtilityLock,
    Defrosting,
}

impl OperationState {
    pub fn from_code(code: i64) -> Option<Self> {
        let state = match code {
            0 => OperationState::NoInformation,
            1 => OperationState::Standby,
            2 => OperationState::Heating,
            3 => OperationState::WarmWater,
            4 => OperationState::PartialError,
            5 => OperationState::Failure,
            6 => OperationState::Cooling,
            7 => OperationState::UtilityLock,
            8 => OperationState::Defrosting,
            _ => return None,
        };
        Some(state)
    }

    pub fn code(self) -> i64 {
        self as i64
    }
}

/// Wire shape of [`SensorData`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSensorData {
    #[serde(rename = "_id")]
    id: String,

    #[serde(default)]
    signal: Signal,

    #[serde(default)]
    accumulated_error_count: i64,

    #[serde(default, deserialize_with = "super::null_as_empty")]
    errors: Vec<i64>,

    #[serde(rename = "SOC", default, skip_serializing_if = "Option::is_none")]
    soc: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    current_water_temp: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    switch_state: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    current_power_inv_sm: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    current_energy: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    current_power: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    active_device: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    status: Option<i64>,
}

impl From<RawSensorData> for SensorData {
    fn from(raw: RawSensorData) -> Self {
        let reading = if let Some(soc) = raw.soc {
            DeviceReading::Battery {
                soc,
                current_power: raw.current_power,
                active_device: raw.active_device,
            }
        } else if let Some(current_water_temp) = raw.current_water_temp {
            DeviceReading::WaterHeater {
                current_water_temp,
                current_power: raw.current_power,
                active_device: raw.active_device,
                status: raw.status,
            }
        } else if let Some(switch_state) = raw.switch_state {
            DeviceReading::Switch {
                switch_state,
                current_power: raw.current_power,
                active_device: raw.active_device,
            }
        } else if let Some(current_power) = raw.current_power_inv_sm {
            if raw.current_power.is_some() || raw.active_device.is_some() {
                debug!(id = %raw.id, "dropping consumer fields of inverter reading");
            }
            DeviceReading::Inverter {
                current_power,
                current_energy: raw.current_energy,
            }
        } else if let Some(current_power) = raw.current_power {
            DeviceReading::Consumer {
                current_power,
                active_device: raw.active_device,
            }
        } else {
            DeviceReading::Unreported
        };

        SensorData {
            id: raw.id,
            signal: raw.signal,
            accumulated_error_count: raw.accumulated_error_count,
            errors: raw.errors,
            reading,
        }
    }
}

impl From<SensorData> for RawSensorData {
    fn from(data: SensorData) -> Self {
        let mut raw = RawSensorData {
            id: data.id,
            signal: data.signal,
            accumulated_error_count: data.accumulated_error_count,
            errors: data.errors,
            ..RawSensorData::default()
        };
        match data.reading {
            DeviceReading::Battery { soc, current_power, active_device } => {
                raw.soc = Some(soc);
                raw.current_power = current_power;
                raw.active_device = active_device;
            }
            DeviceReading::WaterHeater { current_water_temp, current_power, active_device, status } => {
                raw.current_water_temp = Some(current_water_temp);
                raw.current_power = current_power;
                raw.active_device = active_device;
                raw.status = status;
            }
            DeviceReading::Switch { switch_state, current_power, active_device } => {
                raw.switch_state = Some(switch_state);
                raw.current_power = current_power;
                raw.active_device = active_device;
            }
            DeviceReading::Inverter { current_power, current_energy } => {
                raw.current_power_inv_sm = Some(current_power);
                raw.current_energy = current_energy;
            }
            DeviceReading::Consumer { current_power, active_device } => {
                raw.current_power = Some(current_power);
                raw.active_device = active_device;
            }
            DeviceReading::Unreported => {}
        }
        raw
    }
}
