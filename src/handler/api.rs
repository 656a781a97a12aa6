//! Fixed JSON responders
//!
//! `/api/hello` answers a constant greeting; `/api/weather` reads the sensor
//! bus once and reports the combined reading.

use std::sync::Arc;

use hyper::{Response, StatusCode};
use serde::Serialize;

use crate::http::{self, ResponseBody};
use crate::logger;
use crate::telemetry::TelemetryBridge;

pub const HELLO_MESSAGE: &str = "Hello, World!";

/// Client-facing text of a failed weather read; the detail stays in the log
pub const SENSOR_FAILURE_MESSAGE: &str = "sensor read failed";

#[derive(Debug, Serialize)]
struct Greeting {
    message: &'static str,
}

pub fn hello() -> Response<ResponseBody> {
    http::build_json_response(&Greeting {
        message: HELLO_MESSAGE,
    })
}

/// Read every sensor and answer with the combined reading
///
/// The bus read blocks, so it runs on the blocking pool rather than on the
/// connection's worker.
pub async fn weather(telemetry: &Arc<TelemetryBridge>) -> Response<ResponseBody> {
    let bridge = Arc::clone(telemetry);
    match tokio::task::spawn_blocking(move || bridge.read_all()).await {
        Ok(Ok(reading)) => {
            logger::log_debug(&format!(
                "Reading: {:.2} C, {:.2} %RH, {:.2} hPa",
                reading.temperature, reading.humidity, reading.pressure
            ));
            http::build_json_response(&reading)
        }
        Ok(Err(fault)) => {
            logger::log_error(&format!("Weather request failed: {fault}"));
            sensor_failure()
        }
        Err(e) => {
            logger::log_error(&format!("Sensor read task aborted: {e}"));
            sensor_failure()
        }
    }
}

fn sensor_failure() -> Response<ResponseBody> {
    http::build_json_error_response(StatusCode::INTERNAL_SERVER_ERROR, SENSOR_FAILURE_MESSAGE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::telemetry::{HardwareFault, SensorBus, SensorDevice};
    use http_body_util::BodyExt;

    struct Fixed(Result<(f32, f32), HardwareFault>);

    impl SensorDevice for Fixed {
        fn model(&self) -> &'static str {
            "fixed"
        }

        fn read(&mut self) -> Result<(f32, f32), HardwareFault> {
            self.0.clone()
        }
    }

    fn bridge(hygro: Result<(f32, f32), HardwareFault>, baro: Result<(f32, f32), HardwareFault>) -> Arc<TelemetryBridge> {
        Arc::new(TelemetryBridge::new(SensorBus::new(
            Box::new(Fixed(hygro)),
            Box::new(Fixed(baro)),
        )))
    }

    async fn body_json(resp: Response<ResponseBody>) -> serde_json::Value {
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_hello_exact_body() {
        let resp = hello();
        assert_eq!(resp.status(), StatusCode::OK);
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&bytes[..], br#"{"message":"Hello, World!"}"#);
    }

    #[tokio::test]
    async fn test_weather_reading() {
        let resp = weather(&bridge(Ok((22.25, 40.5)), Ok((30.0, 100_800.0)))).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers()["content-type"], "application/json");

        let json = body_json(resp).await;
        assert!((json["temperature"].as_f64().unwrap() - 22.25).abs() < 1e-3);
        assert!((json["humidity"].as_f64().unwrap() - 40.5).abs() < 1e-3);
        assert!((json["pressure"].as_f64().unwrap() - 1008.0).abs() < 1e-2);
    }

    #[tokio::test]
    async fn test_weather_fault_hides_diagnostics() {
        let resp = weather(&bridge(Ok((22.0, 40.0)), Err(HardwareFault::Bus("NACK at 0x77".to_string())))).await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(resp.headers()["access-control-allow-origin"], "*");

        let json = body_json(resp).await;
        assert_eq!(json["error"], SENSOR_FAILURE_MESSAGE);
        assert!(json.get("temperature").is_none());
        assert!(!json.to_string().contains("0x77"));
    }
}
