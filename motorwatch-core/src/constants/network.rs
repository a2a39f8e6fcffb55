//! Network Constants
//!
//! Collector endpoints and link credentials. These are compiled into the
//! firmware image. Credentials and addresses can be replaced at build time:
//!
//! ```bash
//! MOTORWATCH_WIFI_SSID=plant-floor MOTORWATCH_WIFI_PASSWORD=... cargo build --release
//! ```

/// Pick a build-time override if the variable was set, otherwise the default.
macro_rules! build_env_or {
    ($var:literal, $default:expr) => {
        match option_env!($var) {
            Some(value) => value,
            None => $default,
        }
    };
}

// ===== LINK CREDENTIALS =====

/// Wireless network name.
pub const WIFI_SSID: &str = build_env_or!("MOTORWATCH_WIFI_SSID", "motorwatch");

/// Wireless network passphrase.
pub const WIFI_PASSWORD: &str = build_env_or!("MOTORWATCH_WIFI_PASSWORD", "");

// ===== REQUEST/RESPONSE COLLECTOR =====

/// Inference endpoint that scores one reading per request.
pub const PREDICT_URL: &str = build_env_or!(
    "MOTORWATCH_API_URL",
    "https://motor-health-api.example.com/predict"
);

/// Response field carrying the predicted failure probability.
pub const PREDICTION_FIELD: &str = "failure_probability";

// ===== BROKER COLLECTOR =====

/// Broker host name or address.
pub const MQTT_BROKER_HOST: &str = build_env_or!("MOTORWATCH_MQTT_BROKER", "localhost");

/// Broker port (plain MQTT).
pub const MQTT_BROKER_PORT: u16 = 1883;

/// Topic every reading is published to.
pub const MQTT_TOPIC: &str = "motor/health/data";

/// Fixed prefix of the broker session identifier.
///
/// The hardware address is appended so that devices sharing a broker never
/// collide on client id.
pub const SESSION_ID_PREFIX: &str = "motorwatch-";

/// Capacity of a session identifier (prefix + 12 hex digits, with headroom).
pub const SESSION_ID_CAPACITY: usize = 48;
