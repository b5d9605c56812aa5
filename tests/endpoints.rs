use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use mockito::{Matcher, Mock, Server, ServerGuard};
use solarmanager_rs::models::{DeviceReading, Period, Signal};
use solarmanager_rs::{ClientError, SolarManagerClient};
use tracing_subscriber::fmt::MakeWriter;

const AUTHORIZATION: &str = "Basic dXNlcm5hbWU6cGFzc3dvcmQ=";

fn test_client(server: &ServerGuard) -> SolarManagerClient {
    SolarManagerClient::builder()
        .base_url(server.url())
        .username("username")
        .password("password")
        .connect()
        .unwrap()
}

async fn mock_get(server: &mut ServerGuard, path: &str, body: &str) -> Mock {
    server
        .mock("GET", path)
        .match_header("authorization", AUTHORIZATION)
        .match_header("accept", "application/json")
        .match_header("user-agent", "solarmanager-rs")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body)
        .create_async()
        .await
}

#[tokio::test]
async fn test_get_gateway_info() {
    let mut server = Server::new_async().await;
    let mock = mock_get(
        &mut server,
        "/v1/info/gateway/1234123412341234",
        r#"{
            "gateway": {
                "_id": "5c8fb8e7cdcda169da9d5fe3",
                "signal": "connected",
                "name": "1234123412341234",
                "sm_id": "1234123412341234",
                "owner": "5c8fb8fccdcda169da9d5fe4",
                "firmware": "0.20.1",
                "lastErrorDate": "2021-01-20T06:00:01.150Z",
                "mac": "2C:3E:51:C5:A0:CA",
                "ip": "192.168.1.51"
            },
            "versions": {"supportContract": false}
        }"#,
    )
    .await;

    let client = test_client(&server);
    let info = client.get_gateway_info("1234123412341234").await.unwrap();

    assert_eq!(info.gateway.owner, "5c8fb8fccdcda169da9d5fe4");
    assert_eq!(info.gateway.sm_id, "1234123412341234");
    assert_eq!(info.gateway.signal, Signal::Connected);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_get_sensors() {
    let mut server = Server::new_async().await;
    let mock = mock_get(
        &mut server,
        "/v1/info/sensors/1234123412341234",
        r#"[
            {
                "_id": "5da07dc5d32a997fd7fb80aa",
                "priority": 7,
                "device_type": "device",
                "signal": "connected",
                "type": "Water Heater",
                "device_group": "myPV AC THOR",
                "ip": "78.45.12.130",
                "tag": null,
                "createdAt": "2019-10-16T11:23:43.229Z",
                "updatedAt": "2020-10-20T11:31:14.842Z"
            },
            {
                "_id": "5da6fdbf6f9aab5013a5cb9f",
                "priority": 5,
                "device_type": "device",
                "signal": "connected",
                "device_group": "KEBA Wallbox P30",
                "type": "Car Charging",
                "createdAt": "2019-10-16T11:23:43.229Z",
                "updatedAt": "2020-10-20T11:31:14.842Z",
                "tag": {"_id": "5dfb86da1cdd557b82303f92", "name": "Tag_1"},
                "ip": "1.5.5.10"
            }
        ]"#,
    )
    .await;

    let client = test_client(&server);
    let sensors = client.get_sensors("1234123412341234").await.unwrap();

    assert_eq!(sensors.len(), 2);
    assert_eq!(sensors[0].device_group, "myPV AC THOR");
    assert_eq!(sensors[1].device_group, "KEBA Wallbox P30");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_get_sensor() {
    let mut server = Server::new_async().await;
    let mock = mock_get(
        &mut server,
        "/v1/info/sensor/5da07dc5d32a997fd7fb80aa",
        r#"{
            "_id": "5da07dc5d32a997fd7fb80aa",
            "priority": 7,
            "device_type": "device",
            "signal": "connected",
            "type": "Water Heater",
            "device_group": "myPV AC THOR",
            "ip": "78.45.12.130",
            "createdAt": "2019-10-11T13:04:05.719Z",
            "updatedAt": "2020-02-20T11:46:12.358Z",
            "tag": null
        }"#,
    )
    .await;

    let client = test_client(&server);
    let sensor = client.get_sensor("5da07dc5d32a997fd7fb80aa").await.unwrap();

    assert_eq!(sensor.id, "5da07dc5d32a997fd7fb80aa");
    assert_eq!(sensor.kind, "Water Heater");
    assert_eq!(sensor.ip, "78.45.12.130");
    assert!(sensor.tag.is_none());
    mock.assert_async().await;
}

#[tokio::test]
async fn test_get_gateway_data() {
    let mut server = Server::new_async().await;
    let mock = mock_get(
        &mut server,
        "/v1/info/stream/gateway/1234123412341234",
        r#"{
            "Interface Version": "1.0",
            "TimeStamp": "2021-02-01T16:09:39.744Z",
            "currentBatteryChargeDischarge": 0,
            "currentPowerConsumption": 494,
            "currentPvGeneration": 0,
            "devices": [
                {
                    "_id": "5e0cd6f6dde8943e7179ebda",
                    "accumulatedErrorCount": 0,
                    "activeDevice": 0,
                    "currentPower": 0,
                    "errors": [],
                    "signal": "connected",
                    "switchState": 1
                },
                {
                    "_id": "5ef0fe7cb9c6c4306c885133",
                    "accumulatedErrorCount": 2067,
                    "activeDevice": 0,
                    "currentPower": 0,
                    "errors": [1],
                    "signal": "not connected",
                    "switchState": 0
                }
            ],
            "errors": [],
            "soc": 0
        }"#,
    )
    .await;

    let client = test_client(&server);
    let data = client.get_gateway_data("1234123412341234").await.unwrap();

    assert_eq!(data.current_power_consumption, 494);
    assert_eq!(data.devices.len(), 2);
    assert!(matches!(data.devices[0].reading, DeviceReading::Switch { switch_state: 1, .. }));
    assert_eq!(data.devices[1].errors, [1]);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_get_sensor_data() {
    let mut server = Server::new_async().await;
    let mock = mock_get(
        &mut server,
        "/v1/stream/sensor/1234123412341234/5db9b0bc2b591c467a947428",
        r#"{
            "date": "2021-03-25T09:26:37.037Z",
            "data": {
                "_id": "5db9b0bc2b591c467a947428",
                "signal": "connected",
                "currentPower": 1,
                "currentWaterTemp": 26,
                "errors": [1, 15, 10]
            }
        }"#,
    )
    .await;

    let client = test_client(&server);
    let response = client
        .get_sensor_data("1234123412341234", "5db9b0bc2b591c467a947428")
        .await
        .unwrap();

    assert_eq!(response.data.id, "5db9b0bc2b591c467a947428");
    assert!(matches!(
        response.data.reading,
        DeviceReading::WaterHeater { current_water_temp: 26, .. }
    ));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_get_sensor_consumption_statistics() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/v1/consumption/sensor/5da6fdbf6f9aab5013a5cb9f")
        .match_query(Matcher::UrlEncoded("period".into(), "day".into()))
        .match_header("authorization", AUTHORIZATION)
        .with_status(200)
        .with_body(
            r#"{
                "sensorId": "5da6fdbf6f9aab5013a5cb9f",
                "period": "day",
                "data": [{"createdAt": "2021-01-01", "consumption": 120.83333429999996}],
                "totalConsumption": 120.83333429999996
            }"#,
        )
        .create_async()
        .await;

    let client = test_client(&server);
    let statistics = client
        .get_sensor_consumption_statistics("5da6fdbf6f9aab5013a5cb9f", Period::Day)
        .await
        .unwrap();

    assert_eq!(statistics.sensor_id, "5da6fdbf6f9aab5013a5cb9f");
    assert_eq!(statistics.data.len(), 1);
    assert_eq!(statistics.total_consumption, 120.83333429999996);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_get_gateway_consumption_statistics_forwards_unknown_period() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/v1/consumption/gateway/1234123412341234")
        .match_query(Matcher::UrlEncoded("period".into(), "week".into()))
        .with_status(200)
        .with_body(
            r#"{
                "gatewayId": "5c8fb8e7cdcda169da9d5fe3",
                "period": "week",
                "data": [{"createdAt": "2021-04-13", "consumption": 0, "production": 0}],
                "totalConsumption": 0
            }"#,
        )
        .create_async()
        .await;

    let client = test_client(&server);
    let statistics = client
        .get_gateway_consumption_statistics("1234123412341234", "week")
        .await
        .unwrap();

    assert_eq!(statistics.gateway_id, "5c8fb8e7cdcda169da9d5fe3");
    assert_eq!(statistics.period, "week");
    assert_eq!(statistics.data[0].created_at, "2021-04-13");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_get_gateway_pie_chart() {
    let mut server = Server::new_async().await;
    let mock = mock_get(
        &mut server,
        "/v1/chart/gateway/1234123412341234",
        r#"{
            "lastUpdate": "2021-04-07T15:24:55.608Z",
            "production": 20000,
            "consumption": 5000,
            "battery": {"capacity": 43, "batteryCharging": 0, "batteryDischarging": 0},
            "arrows": [
                {"direction": "fromPVToGrid", "value": 15000},
                {"direction": "fromGridToConsumer", "value": 0},
                {"direction": "fromPVToConsumer", "value": 5000}
            ]
        }"#,
    )
    .await;

    let client = test_client(&server);
    let chart = client.get_gateway_pie_chart("1234123412341234").await.unwrap();

    assert_eq!(chart.production, 20000);
    assert_eq!(chart.battery.capacity, 43);
    assert_eq!(chart.flow("fromPVToGrid"), Some(15000));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_get_gateway_forecast() {
    let mut server = Server::new_async().await;
    let mock = mock_get(
        &mut server,
        "/v1/forecast/gateways/1234123412341234",
        r#"[
            {"timestamp": 1641808800000, "expected": 1726, "min": 1183, "max": 2269},
            {"timestamp": 1641809700000, "expected": 1638, "min": 1120, "max": 2155}
        ]"#,
    )
    .await;

    let client = test_client(&server);
    let forecast = client.get_gateway_forecast("1234123412341234").await.unwrap();

    assert_eq!(forecast.len(), 2);
    assert_eq!(forecast[0].expected, 1726);
    assert_eq!(forecast[1].timestamp.timestamp_millis(), 1_641_809_700_000);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_get_low_rate_tariff() {
    let mut server = Server::new_async().await;
    let mock = mock_get(
        &mut server,
        "/v1/low-rate-tariff/gateways/1234123412341234",
        r#"{
            "Monday_Friday_from": "20:00",
            "Monday_Friday_to": "07:00",
            "Satuday_from": "13:00",
            "Satuday_to": "07:00",
            "Sunday_from": "00:00",
            "Sunday_to": "07:00"
        }"#,
    )
    .await;

    let client = test_client(&server);
    let tariff = client.get_low_rate_tariff("1234123412341234").await.unwrap();

    assert_eq!(tariff.monday_friday_from, "20:00");
    assert_eq!(tariff.saturday_from, "13:00");
    mock.assert_async().await;
}

#[test]
fn test_identifiers_are_path_escaped() {
    let client = SolarManagerClient::new("username", "password").unwrap();

    let url = client.get_gateway_info_url("abc/def").unwrap();
    assert_eq!(url.as_str(), "https://cloud.solar-manager.ch/v1/info/gateway/abc%2Fdef");

    let url = client.get_sensor_data_url("g/1", "s?2").unwrap();
    assert_eq!(url.path(), "/v1/stream/sensor/g%2F1/s%3F2");
    assert_eq!(url.query(), None);
}

#[tokio::test]
async fn test_dot_identifiers_are_rejected() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", Matcher::Any)
        .expect(0)
        .create_async()
        .await;
    let client = test_client(&server);

    assert!(matches!(
        client.get_sensor_data_url("..", "s1"),
        Err(ClientError::InvalidUrl(_))
    ));
    assert!(matches!(client.get_gateway_info_url("."), Err(ClientError::InvalidUrl(_))));
    assert!(matches!(
        client.get_sensor_data("..", "s1").await,
        Err(ClientError::InvalidUrl(_))
    ));
    mock.assert_async().await;
}

#[test]
fn test_period_is_query_encoded() {
    let client = SolarManagerClient::new("username", "password").unwrap();

    let url = client
        .get_sensor_consumption_statistics_url("5da6fdbf6f9aab5013a5cb9f", Period::Day)
        .unwrap();
    assert_eq!(
        url.as_str(),
        "https://cloud.solar-manager.ch/v1/consumption/sensor/5da6fdbf6f9aab5013a5cb9f?period=day"
    );

    let url = client
        .get_gateway_consumption_statistics_url("g", "day&x=1")
        .unwrap();
    assert_eq!(url.query(), Some("period=day%26x%3D1"));
}

#[tokio::test]
async fn test_no_content_yields_empty_result() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/v1/forecast/gateways/1234123412341234")
        .with_status(204)
        .create_async()
        .await;

    let client = test_client(&server);
    let forecast = client.get_gateway_forecast("1234123412341234").await.unwrap();

    assert!(forecast.is_empty());
    mock.assert_async().await;
}

#[tokio::test]
async fn test_invalid_json_is_decode_error() {
    let mut server = Server::new_async().await;
    let _mock = mock_get(
        &mut server,
        "/v1/forecast/gateways/1234123412341234",
        // Trailing comma.
        r#"[{"timestamp": 1641808800000, "expected": 1726, "min": 1183, "max": 2269},]"#,
    )
    .await;

    let client = test_client(&server);
    let result = client.get_gateway_forecast("1234123412341234").await;

    assert!(matches!(result, Err(ClientError::Decode { .. })), "{:?}", result);
}

#[tokio::test]
async fn test_error_status_is_reported() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/v1/info/sensor/missing")
        .with_status(404)
        .with_body(r#"{"message": "Sensor not found"}"#)
        .create_async()
        .await;

    let client = test_client(&server);
    let error = client.get_sensor("missing").await.unwrap_err();

    assert_eq!(error.status(), Some(reqwest::StatusCode::NOT_FOUND));
}

#[derive(Clone, Default)]
struct CapturedOutput(Arc<Mutex<Vec<u8>>>);

impl CapturedOutput {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl Write for CapturedOutput {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for CapturedOutput {
    type Writer = CapturedOutput;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

#[tokio::test]
async fn test_verbose_only_adds_diagnostics() {
    let output = CapturedOutput::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(output.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::INFO)
        .finish();
    let _guard = tracing::subscriber::set_default(subscriber);

    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/v1/low-rate-tariff/gateways/1234123412341234")
        .with_status(200)
        .with_body(
            r#"{
                "Monday_Friday_from": "20:00",
                "Monday_Friday_to": "07:00",
                "Satuday_from": "13:00",
                "Satuday_to": "07:00",
                "Sunday_from": "00:00",
                "Sunday_to": "07:00"
            }"#,
        )
        .expect(2)
        .create_async()
        .await;

    let mut client = test_client(&server);
    let quiet = client.get_low_rate_tariff("1234123412341234").await.unwrap();
    assert!(!output.contents().contains("solarmanager::dump"));

    client.set_verbose(true);
    let verbose = client.get_low_rate_tariff("1234123412341234").await.unwrap();

    assert_eq!(quiet, verbose);
    let logs = output.contents();
    assert!(logs.contains("solarmanager::dump"));
    assert!(logs.contains("GET http://"));
    assert!(logs.contains("/v1/low-rate-tariff/gateways/1234123412341234"));
    assert!(logs.contains("authorization: ***"));
    assert!(!logs.contains(AUTHORIZATION));
    assert!(logs.contains("200 OK"));
    assert!(logs.contains("Satuday_from"));
    mock.assert_async().await;
}
