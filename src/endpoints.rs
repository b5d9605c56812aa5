use crate::models::{
    ForecastEntry,
    GatewayConsumptionStatistics,
    GatewayData,
    GatewayInfoResponse,
    LowRateTariff,
    PieChart,
    SensorConsumptionStatistics,
    SensorDataResponse,
    SensorInfo,
};

define_api_endpoint! {
    /// Gateway metadata together with its settings, owner and contract details.
    fn get_gateway_info(gateway_id) -> GatewayInfoResponse;
    path: ["v1", "info", "gateway", gateway_id];
}

define_api_endpoint! {
    /// All devices attached to a gateway, in the order the service lists them.
    fn get_sensors(gateway_id) -> Vec<SensorInfo>;
    path: ["v1", "info", "sensors", gateway_id];
}

define_api_endpoint! {
    fn get_sensor(sensor_id) -> SensorInfo;
    path: ["v1", "info", "sensor", sensor_id];
}

define_api_endpoint! {
    /// Live power flow of the whole installation.
    fn get_gateway_data(gateway_id) -> GatewayData;
    path: ["v1", "info", "stream", "gateway", gateway_id];
}

define_api_endpoint! {
    fn get_sensor_data(gateway_id, sensor_id) -> SensorDataResponse;
    path: ["v1", "stream", "sensor", gateway_id, sensor_id];
}

define_api_endpoint! {
    /// `period` is one of [`Period`](crate::models::Period) or any string, forwarded as is.
    fn get_sensor_consumption_statistics(sensor_id) -> SensorConsumptionStatistics;
    path: ["v1", "consumption", "sensor", sensor_id];
    query: [period];
}

define_api_endpoint! {
    /// `period` is one of [`Period`](crate::models::Period) or any string, forwarded as is.
    fn get_gateway_consumption_statistics(gateway_id) -> GatewayConsumptionStatistics;
    path: ["v1", "consumption", "gateway", gateway_id];
    query: [period];
}

define_api_endpoint! {
    fn get_gateway_pie_chart(gateway_id) -> PieChart;
    path: ["v1", "chart", "gateway", gateway_id];
}

define_api_endpoint! {
    /// Production forecast, ordered by timestamp.
    fn get_gateway_forecast(gateway_id) -> Vec<ForecastEntry>;
    path: ["v1", "forecast", "gateways", gateway_id];
}

define_api_endpoint! {
    fn get_low_rate_tariff(gateway_id) -> LowRateTariff;
    path: ["v1", "low-rate-tariff", "gateways", gateway_id];
}
