use serde::{Deserialize, Serialize};

/// Weekly low-rate tariff windows as `HH:MM` strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LowRateTariff {
    #[serde(rename = "Monday_Friday_from")]
    pub monday_friday_from: String,

    #[serde(rename = "Monday_Friday_to")]
    pub monday_friday_to: String,

    // The service spells it this way.
    #[serde(rename = "Satuday_from", alias = "Saturday_from")]
    pub saturday_from: String,

    #[serde(rename = "Satuday_to", alias = "Saturday_to")]
    pub saturday_to: String,

    #[serde(rename = "Sunday_from")]
    pub sunday_from: String,

    #[serde(rename = "Sunday_to")]
    pub sunday_to: String,
}
