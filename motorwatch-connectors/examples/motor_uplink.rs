//! Motor Uplink Example
//!
//! Runs the device-side sampling loop on a host machine: a simulated radio
//! stands in for the wireless link and a simulated motor produces readings,
//! while the collector side is real (HTTPS endpoint or MQTT broker).
//!
//! ## Running the Example
//!
//! ```bash
//! # Score each reading at the inference endpoint
//! MOTORWATCH_API_URL=http://localhost:8000/predict \
//!     cargo run --example motor_uplink -- http
//!
//! # Publish readings to a broker
//! MOTORWATCH_MQTT_BROKER=localhost cargo run --example motor_uplink -- mqtt
//! ```
//!
//! Endpoint and broker are read at build time, the same way device images
//! get them.

use std::cell::Cell;
use std::error::Error;
use std::net::{IpAddr, Ipv4Addr};

use motorwatch_connectors::{
    HttpConfig, MqttConfig, RequestTransport, RumqttChannel, SessionTransport, UreqChannel,
};
use motorwatch_core::{
    Credentials, Delay, LinkConfig, LinkDriver, LinkManager, MacAddress, Reading, StdDelay,
    SystemTime, TimeSource, Transport, Uplink,
};

const SAMPLE_INTERVAL_MS: u32 = 5000;
const CYCLES: u32 = 6;

/// Radio that associates after a few polls
struct SimulatedRadio {
    polls: Cell<u32>,
}

impl LinkDriver for SimulatedRadio {
    fn begin(&mut self, credentials: &Credentials) {
        println!("Associating with {:?}", credentials);
        self.polls.set(0);
    }

    fn is_connected(&self) -> bool {
        self.polls.set(self.polls.get() + 1);
        self.polls.get() > 3
    }

    fn local_address(&self) -> IpAddr {
        IpAddr::V4(Ipv4Addr::new(192, 168, 4, 21))
    }

    fn signal_strength(&self) -> i8 {
        -58
    }

    fn hardware_address(&self) -> MacAddress {
        MacAddress::new([0x24, 0x6F, 0x28, 0x9A, 0x41, 0x0C])
    }
}

/// Motor that slowly heats up and starts to shake
struct SimulatedMotor {
    cycle: u32,
}

impl SimulatedMotor {
    fn sample(&mut self, clock: &dyn TimeSource) -> Reading {
        let wear = self.cycle as f32 / CYCLES as f32;
        self.cycle += 1;
        Reading::sampled_now(
            60.0 + 30.0 * wear,
            0.02 + 0.4 * wear,
            1500 - (300.0 * wear) as i32,
            clock,
        )
    }
}

fn build_transport(kind: &str) -> Result<Box<dyn Transport>, Box<dyn Error>> {
    match kind {
        "http" => {
            let config = HttpConfig::from_build_env();
            println!("Request transport -> {}", config.url);
            Ok(Box::new(RequestTransport::new(config, UreqChannel::new())?))
        }
        "mqtt" => {
            // Bounded so the demo ends when no broker is running
            let config = MqttConfig::from_build_env().max_session_attempts(3);
            println!("Session transport -> {}:{} / {}", config.host, config.port, config.topic);
            let channel = RumqttChannel::from_config(&config);
            Ok(Box::new(SessionTransport::new(config, channel, StdDelay)))
        }
        other => Err(format!("unknown transport {:?}, expected http or mqtt", other).into()),
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    println!("MotorWatch Uplink Example");
    println!("=========================\n");

    let kind = std::env::args().nth(1).unwrap_or_else(|| "http".to_string());
    let transport = build_transport(&kind)?;

    let radio = SimulatedRadio { polls: Cell::new(0) };
    let link = LinkManager::new(radio, StdDelay, LinkConfig::default());
    let mut uplink = Uplink::new(link, transport);

    let info = uplink.start()?;
    println!("Link up: {} ({} dBm)\n", info.address, info.rssi_dbm);

    let clock = SystemTime;
    let mut motor = SimulatedMotor { cycle: 0 };
    let mut pause = StdDelay;

    for _ in 0..CYCLES {
        let reading = motor.sample(&clock);
        println!(
            "temperature={:.1} vibration={:.3} rpm={}",
            reading.temperature, reading.vibration, reading.rpm
        );

        let outcome = uplink.deliver(reading);
        match outcome.prediction() {
            Some(p) if kind == "http" => println!("  -> failure probability {:.3}", p),
            Some(_) => println!("  -> published"),
            None => println!("  -> {}", outcome),
        }

        uplink.service();
        pause.delay_ms(SAMPLE_INTERVAL_MS);
    }

    let stats = uplink.stats();
    println!("\n=== Summary ===");
    println!("Delivered: {}", stats.messages_sent);
    println!("Failed:    {}", stats.messages_failed);
    println!("Bytes:     {}", stats.bytes_sent);
    if let Some(err) = stats.last_error {
        println!("Last error: {}", err);
    }

    Ok(())
}
