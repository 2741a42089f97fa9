//! Latest-value telemetry store shared between ingestion and rendering.
//!
//! The store keeps one value per signal behind a `critical-section` mutex, so
//! it can live in a `static` and be written from a thread, an interrupt or an
//! async task while the render loop reads snapshots.

use core::cell::Cell;

use critical_section::Mutex;

/// One of the three telemetry signals driving the display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    /// Energy price, currency per unit. May be negative.
    Price,
    /// Imported power in watts.
    ImportPower,
    /// Exported power in watts.
    ExportPower,
}

/// Snapshot of the latest known telemetry values.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TelemetryReading {
    pub import_power: f32,
    pub export_power: f32,
    pub price: f32,
}

impl TelemetryReading {
    /// All signals at zero, the state before any update arrives.
    pub const ZERO: Self = Self {
        import_power: 0.0,
        export_power: 0.0,
        price: 0.0,
    };

    /// Return a copy with a single signal replaced.
    #[must_use]
    pub const fn with(mut self, signal: Signal, value: f32) -> Self {
        match signal {
            Signal::Price => self.price = value,
            Signal::ImportPower => self.import_power = value,
            Signal::ExportPower => self.export_power = value,
        }
        self
    }

    /// Read a single signal.
    pub const fn get(&self, signal: Signal) -> f32 {
        match signal {
            Signal::Price => self.price,
            Signal::ImportPower => self.import_power,
            Signal::ExportPower => self.export_power,
        }
    }
}

/// Shared telemetry store.
///
/// Writes are last-write-wins per signal. There is no atomicity across
/// signals: a snapshot may combine a fresh price with an older power value.
pub struct TelemetryStore {
    inner: Mutex<Cell<TelemetryReading>>,
}

impl TelemetryStore {
    /// Create a store with every signal at `0.0`.
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(Cell::new(TelemetryReading::ZERO)),
        }
    }

    /// Get a writer handle for the ingestion side.
    pub const fn writer(&self) -> TelemetryWriter<'_> {
        TelemetryWriter { store: self }
    }

    /// Get a reader handle for the render side.
    pub const fn reader(&self) -> TelemetryReader<'_> {
        TelemetryReader { store: self }
    }

    /// Store the latest value of one signal.
    pub fn set(&self, signal: Signal, value: f32) {
        critical_section::with(|cs| {
            let cell = self.inner.borrow(cs);
            cell.set(cell.get().with(signal, value));
        });
    }

    /// Copy out the current values.
    pub fn snapshot(&self) -> TelemetryReading {
        critical_section::with(|cs| self.inner.borrow(cs).get())
    }
}

impl Default for TelemetryStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Write handle for a [`TelemetryStore`].
#[derive(Clone, Copy)]
pub struct TelemetryWriter<'a> {
    store: &'a TelemetryStore,
}

impl TelemetryWriter<'_> {
    pub fn set(&self, signal: Signal, value: f32) {
        self.store.set(signal, value);
    }
}

/// Read handle for a [`TelemetryStore`].
#[derive(Clone, Copy)]
pub struct TelemetryReader<'a> {
    store: &'a TelemetryStore,
}

impl TelemetryReader<'_> {
    pub fn snapshot(&self) -> TelemetryReading {
        self.store.snapshot()
    }
}
