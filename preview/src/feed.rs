//! Telemetry feeds
//!
//! Both feeds run on a background thread and write into the telemetry store
//! through an [`Ingestor`]. Bad updates are logged and dropped; the render
//! loop never waits on these threads.

use std::io::{self, BufRead};
use std::thread;
use std::time::Duration;

use agile_larson::{IngestError, Ingestor, Signal, TelemetryChannels, TelemetryWriter};
use rumqttc::{Client, Event, MqttOptions, Packet, QoS};

/// Client id presented to the broker
const CLIENT_ID: &str = "agile-larson-preview";

/// Pause before the client tries the broker again
const RECONNECT_DELAY: Duration = Duration::from_secs(5);

const KEEP_ALIVE: Duration = Duration::from_secs(30);

/// Broker connection settings
#[derive(Debug, Clone)]
pub(crate) struct MqttSettings {
    pub(crate) host: String,
    pub(crate) port: u16,
    pub(crate) user: Option<String>,
    pub(crate) password: Option<String>,
}

fn report(result: Result<(Signal, f32), IngestError>, update: &str) {
    match result {
        Ok((signal, value)) => tracing::debug!(?signal, value, "telemetry update"),
        Err(IngestError::UnknownChannel) => {
            tracing::debug!(update, "ignoring update for unknown channel");
        }
        Err(err) => tracing::warn!(%err, update, "discarding telemetry update"),
    }
}

/// Subscribe to every configured channel on an MQTT broker.
///
/// Subscriptions are renewed on each connection acknowledgement, so a broker
/// restart does not silently stop the updates.
pub(crate) fn spawn_mqtt_feed(
    settings: MqttSettings,
    channels: TelemetryChannels,
    writer: TelemetryWriter<'static>,
) -> io::Result<thread::JoinHandle<()>> {
    let password = match settings.password {
        Some(_) => "********",
        None => "-",
    };
    tracing::info!(
        host = %settings.host,
        port = settings.port,
        user = settings.user.as_deref().unwrap_or("-"),
        password,
        "connecting to broker"
    );

    let mut options = MqttOptions::new(CLIENT_ID, settings.host, settings.port);
    options.set_keep_alive(KEEP_ALIVE);
    if let Some(user) = settings.user {
        options.set_credentials(user, settings.password.unwrap_or_default());
    }
    let (client, mut connection) = Client::new(options, 10);

    thread::Builder::new()
        .name("telemetry-mqtt".into())
        .spawn(move || {
            let ingestor = Ingestor::new(channels, writer);
            for event in connection.iter() {
                match event {
                    Ok(Event::Incoming(Packet::ConnAck(_))) => {
                        tracing::info!("connected to broker");
                        subscribe(&client, &ingestor);
                    }
                    Ok(Event::Incoming(Packet::Publish(publish))) => {
                        report(
                            ingestor.handle(&publish.topic, &publish.payload),
                            &publish.topic,
                        );
                    }
                    Ok(_) => {}
                    Err(err) => {
                        tracing::warn!(
                            %err,
                            retry_in = ?RECONNECT_DELAY,
                            "broker connection lost, reconnecting"
                        );
                        thread::sleep(RECONNECT_DELAY);
                    }
                }
            }
            tracing::info!("telemetry feed closed, keeping last values");
        })
}

fn subscribe(client: &Client, ingestor: &Ingestor<'_>) {
    for topic in ingestor.channels().iter() {
        match client.try_subscribe(topic, QoS::AtMostOnce) {
            Ok(()) => tracing::info!(topic, "subscribed"),
            Err(err) => tracing::error!(%err, topic, "subscribe failed"),
        }
    }
}

/// Read `mosquitto_sub -v` style lines from stdin.
pub(crate) fn spawn_stdin_feed(
    channels: TelemetryChannels,
    writer: TelemetryWriter<'static>,
) -> io::Result<thread::JoinHandle<()>> {
    thread::Builder::new()
        .name("telemetry-feed".into())
        .spawn(move || {
            let ingestor = Ingestor::new(channels, writer);
            let stdin = io::stdin();
            for line in stdin.lock().lines() {
                let line = match line {
                    Ok(line) => line,
                    Err(err) => {
                        tracing::error!(%err, "telemetry feed read failed");
                        break;
                    }
                };
                report(ingestor.handle_line(&line), &line);
            }
            tracing::info!("telemetry feed closed, keeping last values");
        })
}
