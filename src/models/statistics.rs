use serde::{Deserialize, Serialize};
use std::fmt;

/// Aggregation granularity of consumption statistics.
///
/// Endpoints accept any `AsRef<str>`, so values the service adds later can be
/// passed as plain strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    Day,
    Month,
    Year,
}

impl Period {
    pub fn as_str(self) -> &'static str {
        match self {
            Period::Day => "day",
            Period::Month => "month",
            Period::Year => "year",
        }
    }
}

impl AsRef<str> for Period {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SensorConsumptionStatistics {
    pub sensor_id: String,
    pub period: String,
    pub data: Vec<SensorConsumption>,
    pub total_consumption: f64,
}

/// One bucket of a consumption series. `created_at` is the bucket label the
/// service uses for the requested period, e.g. `2021-01-01`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SensorConsumption {
    pub created_at: String,
    pub consumption: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewayConsumptionStatistics {
    pub gateway_id: String,
    pub period: String,
    pub data: Vec<GatewayConsumption>,
    pub total_consumption: i64,
}

impl GatewayConsumptionStatistics {
    pub fn total_production(&self) -> i64 {
        self.data.iter().map(|point| point.production).sum()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewayConsumption {
    pub created_at: String,
    pub consumption: i64,
    pub production: i64,
}
