use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Snapshot of where energy currently flows. Values are in watts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PieChart {
    pub last_update: DateTime<Utc>,
    pub production: i64,
    pub consumption: i64,
    pub battery: BatteryFlow,
    pub arrows: Vec<EnergyFlow>,
}

impl PieChart {
    /// Power along `direction` (e.g. `fromPVToGrid`), if the service reported it.
    pub fn flow(&self, direction: &str) -> Option<i64> {
        self.arrows
            .iter()
            .find(|arrow| arrow.direction == direction)
            .map(|arrow| arrow.value)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatteryFlow {
    /// State of charge in percent.
    pub capacity: i64,
    pub battery_charging: i64,
    pub battery_discharging: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnergyFlow {
    pub direction: String,
    pub value: i64,
}
