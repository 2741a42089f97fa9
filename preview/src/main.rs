//! Desktop preview for the agile-larson scanner
//!
//! Draws the LED strip in a window and feeds the engine from the on-screen
//! controls, an MQTT broker, or `mosquitto_sub -v` output piped to stdin:
//!
//! ```sh
//! agile-larson-preview -s broker -u viewer -p secret -x emon/export
//!
//! mosquitto_sub -v -h broker -t agile/price -t emon/import -t emon/export \
//!     | agile-larson-preview --stdin -o agile/price -i emon/import -x emon/export
//! ```

mod app;
mod feed;

use agile_larson::config::{DEFAULT_HIGH_PRICE, DEFAULT_HIGH_USAGE_WATTS, DEFAULT_LOW_PRICE};
use agile_larson::{ConfigError, LarsonConfig, REFERENCE_KERNEL, TelemetryChannels, TelemetryStore};
use clap::Parser;
use eframe::egui;
use tracing_subscriber::EnvFilter;

use crate::app::PreviewApp;
use crate::feed::MqttSettings;

/// Shared between the feed thread, the UI controls and the renderer
static TELEMETRY: TelemetryStore = TelemetryStore::new();

#[derive(Debug, thiserror::Error)]
enum PreviewError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("failed to start the feed thread: {0}")]
    Feed(#[from] std::io::Error),
    #[error("preview window failed: {0}")]
    Ui(#[from] eframe::Error),
}

/// Energy price and power visualizer preview
#[derive(Debug, Parser)]
#[command(name = "agile-larson-preview", long_about = None)]
struct Args {
    /// Read "<channel> <payload>" lines from stdin, as printed by `mosquitto_sub -v`
    #[arg(long, conflicts_with = "mqtt_server")]
    stdin: bool,

    /// MQTT broker to subscribe to
    #[arg(short = 's', long)]
    mqtt_server: Option<String>,

    /// MQTT broker port
    #[arg(short = 't', long, default_value_t = 1883)]
    mqtt_port: u16,

    /// MQTT user name
    #[arg(short, long, requires = "mqtt_server")]
    user: Option<String>,

    /// MQTT password
    #[arg(short, long, requires = "user")]
    password: Option<String>,

    /// Channel carrying the energy price
    #[arg(short = 'o', long, default_value = "agile/price")]
    price_channel: String,

    /// Channel carrying imported power in watts
    #[arg(short, long, default_value = "emon/import")]
    import_channel: String,

    /// Channel carrying exported power in watts
    #[arg(short = 'x', long)]
    export_channel: Option<String>,

    /// Power considered high usage; the sweep cycles once per second at this level
    #[arg(short = 'g', long, default_value_t = DEFAULT_HIGH_USAGE_WATTS)]
    high_usage: f32,

    /// Price shown as blue, can be negative
    #[arg(long, default_value_t = DEFAULT_LOW_PRICE, allow_negative_numbers = true)]
    low_price: f32,

    /// Price shown as red
    #[arg(long, default_value_t = DEFAULT_HIGH_PRICE, allow_negative_numbers = true)]
    high_price: f32,

    /// Initial strip brightness (0.0-1.0)
    #[arg(short, long, default_value_t = 1.0)]
    brightness: f32,
}

fn main() -> Result<(), PreviewError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let config = LarsonConfig {
        high_usage_watts: args.high_usage,
        low_price: args.low_price,
        high_price: args.high_price,
        brightness: args.brightness,
        kernel: &REFERENCE_KERNEL,
    };
    config.validate()?;
    let channels = TelemetryChannels::new(
        &args.price_channel,
        &args.import_channel,
        args.export_channel.as_deref(),
    )?;

    tracing::info!(
        price = channels.price(),
        import = channels.import(),
        export = channels.export().unwrap_or("-"),
        "telemetry channels"
    );

    if let Some(host) = args.mqtt_server {
        let settings = MqttSettings {
            host,
            port: args.mqtt_port,
            user: args.user,
            password: args.password,
        };
        feed::spawn_mqtt_feed(settings, channels, TELEMETRY.writer())?;
    } else if args.stdin {
        feed::spawn_stdin_feed(channels, TELEMETRY.writer())?;
    }

    let app = PreviewApp::new(TELEMETRY.reader(), TELEMETRY.writer(), &config)?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([520.0, 260.0])
            .with_title("Agile Larson Preview"),
        ..Default::default()
    };

    eframe::run_native(
        "agile-larson-preview",
        options,
        Box::new(move |_cc| Ok(Box::new(app))),
    )?;

    Ok(())
}
