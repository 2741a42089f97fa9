//! Telemetry ingestion boundary
//!
//! Turns raw `(channel, payload)` updates delivered by the transport into
//! store writes. Anything that is not a finite decimal number on a configured
//! channel is rejected here and never reaches the render loop; the previous
//! value of the signal stays in effect.

use heapless::String;

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::error::{ConfigError, IngestError};
use crate::store::{Signal, TelemetryWriter};

/// Longest accepted channel identifier, in bytes.
pub const MAX_CHANNEL_ID_LEN: usize = 128;

/// Channel identifier storage.
pub type ChannelId = String<MAX_CHANNEL_ID_LEN>;

/// Identifiers of the telemetry channels feeding the display.
///
/// Identifiers are opaque; they are compared byte for byte with the channel
/// of each update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TelemetryChannels {
    price: ChannelId,
    import: ChannelId,
    /// Without an export channel export power stays at zero.
    export: Option<ChannelId>,
}

fn channel_id(id: &str) -> Result<ChannelId, ConfigError> {
    if id.is_empty() {
        return Err(ConfigError::ChannelId);
    }
    ChannelId::try_from(id).map_err(|()| ConfigError::ChannelId)
}

impl TelemetryChannels {
    pub fn new(price: &str, import: &str, export: Option<&str>) -> Result<Self, ConfigError> {
        Ok(Self {
            price: channel_id(price)?,
            import: channel_id(import)?,
            export: export.map(channel_id).transpose()?,
        })
    }

    pub fn price(&self) -> &str {
        &self.price
    }

    pub fn import(&self) -> &str {
        &self.import
    }

    pub fn export(&self) -> Option<&str> {
        self.export.as_deref()
    }

    /// Signal carried by `channel`, if it is one of ours.
    pub fn signal_of(&self, channel: &str) -> Option<Signal> {
        if channel == self.price.as_str() {
            Some(Signal::Price)
        } else if channel == self.import.as_str() {
            Some(Signal::ImportPower)
        } else if self.export.as_deref() == Some(channel) {
            Some(Signal::ExportPower)
        } else {
            None
        }
    }

    /// Configured identifiers, for subscribing.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        [Some(self.price()), Some(self.import()), self.export()]
            .into_iter()
            .flatten()
    }
}

/// Parse a telemetry payload as a finite decimal number.
///
/// Surrounding whitespace is ignored.
pub fn parse_payload(payload: &[u8]) -> Result<f32, IngestError> {
    let text = core::str::from_utf8(payload).map_err(|_| IngestError::Encoding)?;
    let value: f32 = text.trim().parse().map_err(|_| IngestError::Malformed)?;
    if !value.is_finite() {
        return Err(IngestError::Malformed);
    }
    Ok(value)
}

/// Split a `"<channel> <payload>"` line as printed by `mosquitto_sub -v`.
///
/// Numeric payloads never contain spaces, so the payload starts after the
/// last space and channels may contain spaces.
pub fn split_channel_line(line: &str) -> Option<(&str, &str)> {
    let line = line.trim_end();
    let (channel, payload) = line.rsplit_once(' ')?;
    if channel.is_empty() {
        return None;
    }
    Some((channel, payload))
}

/// Routes validated updates into the telemetry store.
pub struct Ingestor<'a> {
    channels: TelemetryChannels,
    writer: TelemetryWriter<'a>,
}

impl<'a> Ingestor<'a> {
    pub const fn new(channels: TelemetryChannels, writer: TelemetryWriter<'a>) -> Self {
        Self { channels, writer }
    }

    pub const fn channels(&self) -> &TelemetryChannels {
        &self.channels
    }

    /// Handle one update from the transport.
    ///
    /// On success the signal now holds the parsed value. On error the store
    /// is left untouched.
    pub fn handle(&self, channel: &str, payload: &[u8]) -> Result<(Signal, f32), IngestError> {
        let signal = self
            .channels
            .signal_of(channel)
            .ok_or(IngestError::UnknownChannel)?;
        let value = match parse_payload(payload) {
            Ok(value) => value,
            Err(err) => {
                #[cfg(feature = "esp32-log")]
                println!("[Ingestor.handle] discarding update on {}: {}", channel, err);
                return Err(err);
            }
        };
        self.writer.set(signal, value);
        Ok((signal, value))
    }

    /// Handle a `"<channel> <payload>"` line.
    pub fn handle_line(&self, line: &str) -> Result<(Signal, f32), IngestError> {
        let (channel, payload) = split_channel_line(line).ok_or(IngestError::Malformed)?;
        self.handle(channel, payload.as_bytes())
    }
}
