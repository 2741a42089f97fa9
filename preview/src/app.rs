use std::time::{Duration as StdDuration, Instant as StdInstant};

use agile_larson::{
    BufferedSink, ColorMode, ConfigError, EngineState, FrameInfo, FrameScheduler, Instant,
    LarsonConfig, LedSink, OutputDriver, Renderer, Rgb, Signal, SinkError, TelemetryReader,
    TelemetryWriter, TickOutcome,
};
use eframe::egui;

/// Pixels on the simulated board
const PIXELS: usize = 8;

/// Size of each LED rectangle in pixels
const LED_SIZE: f32 = 40.0;

/// Gap between LEDs
const LED_GAP: f32 = 8.0;

/// Strip painted into the window
#[derive(Debug, Default)]
pub(crate) struct WindowStrip {
    pixels: [Rgb; PIXELS],
}

impl OutputDriver for WindowStrip {
    fn write(&mut self, colors: &[Rgb]) -> Result<(), SinkError> {
        for (pixel, color) in self.pixels.iter_mut().zip(colors) {
            *pixel = *color;
        }
        Ok(())
    }
}

type Scheduler = FrameScheduler<'static, BufferedSink<WindowStrip, PIXELS>, PIXELS>;

pub(crate) struct PreviewApp {
    scheduler: Scheduler,
    telemetry: TelemetryReader<'static>,
    writer: TelemetryWriter<'static>,
    /// Wall-clock reference for engine time
    started: StdInstant,
    /// When the scheduler asked to be ticked again
    next_tick: StdInstant,
    last_frame: Option<FrameInfo>,
    stopped: Option<SinkError>,
    brightness: f32,
}

impl PreviewApp {
    pub(crate) fn new(
        telemetry: TelemetryReader<'static>,
        writer: TelemetryWriter<'static>,
        config: &LarsonConfig<'static>,
    ) -> Result<Self, ConfigError> {
        let renderer = Renderer::<PIXELS>::new(telemetry, config)?;
        let scheduler = FrameScheduler::new(renderer, BufferedSink::new(WindowStrip::default()))?;
        let now = StdInstant::now();
        Ok(Self {
            scheduler,
            telemetry,
            writer,
            started: now,
            next_tick: now,
            last_frame: None,
            stopped: None,
            brightness: config.brightness,
        })
    }

    /// Engine time derived from the window's wall clock
    fn engine_now(&self) -> Instant {
        let micros = u64::try_from(self.started.elapsed().as_micros()).unwrap_or(u64::MAX);
        Instant::from_micros(micros)
    }

    /// Tick the scheduler if it is due and return how long to wait
    fn step(&mut self, ctx: &egui::Context) -> StdDuration {
        if self.stopped.is_some() {
            return StdDuration::from_secs(1);
        }
        let now = StdInstant::now();
        if now < self.next_tick {
            return self.next_tick - now;
        }
        match self.scheduler.tick(self.engine_now()) {
            Ok(result) => {
                if let TickOutcome::Rendered(info) = result.outcome {
                    self.last_frame = Some(info);
                }
                if let Some(err) = result.write_error {
                    tracing::warn!(%err, "frame skipped");
                }
                let sleep = StdDuration::from_micros(result.sleep_duration.as_micros());
                self.next_tick = now + sleep;
                sleep
            }
            Err(err) => {
                tracing::error!(%err, "LED sink gone, exiting");
                if let Err(clear_err) = self.scheduler.sink_mut().clear() {
                    tracing::warn!(err = %clear_err, "failed to clear the strip");
                }
                self.stopped = Some(err);
                ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                StdDuration::from_secs(1)
            }
        }
    }

    fn telemetry_controls(&self, ui: &mut egui::Ui) {
        let reading = self.telemetry.snapshot();
        let mut import_power = reading.import_power;
        let mut export_power = reading.export_power;
        let mut price = reading.price;

        egui::Grid::new("telemetry").num_columns(2).show(ui, |ui| {
            ui.label("Import (W):");
            if ui
                .add(egui::Slider::new(&mut import_power, 0.0..=6000.0))
                .changed()
            {
                self.writer.set(Signal::ImportPower, import_power);
            }
            ui.end_row();

            ui.label("Export (W):");
            if ui
                .add(egui::Slider::new(&mut export_power, 0.0..=6000.0))
                .changed()
            {
                self.writer.set(Signal::ExportPower, export_power);
            }
            ui.end_row();

            ui.label("Price:");
            if ui
                .add(egui::Slider::new(&mut price, -20.0..=60.0))
                .changed()
            {
                self.writer.set(Signal::Price, price);
            }
            ui.end_row();
        });
    }

    fn status(&self, ui: &mut egui::Ui) {
        if let Some(err) = self.stopped {
            ui.colored_label(egui::Color32::RED, format!("Stopped: {err}"));
            return;
        }
        match (self.scheduler.renderer().state(), self.last_frame) {
            (EngineState::Idle, _) | (_, None) => {
                ui.label("Idle: no import or export received");
            }
            (EngineState::Animating { activity, .. }, Some(info)) => {
                let mode = match info.mode {
                    ColorMode::Import => "importing",
                    ColorMode::Export => "exporting",
                };
                ui.label(format!(
                    "{mode}, activity {activity:.2}, phase {:.1} rad, pixel {}",
                    info.phase, info.pixel_index
                ));
            }
        }
    }

    fn strip(&self, ui: &mut egui::Ui) {
        let pitch = LED_SIZE + LED_GAP;
        #[allow(clippy::cast_precision_loss)]
        let width = PIXELS as f32 * pitch;
        let (response, painter) =
            ui.allocate_painter(egui::vec2(width, LED_SIZE), egui::Sense::hover());
        let origin = response.rect.min;

        #[allow(clippy::cast_precision_loss)]
        for (i, pixel) in self.scheduler.sink().driver().pixels.iter().enumerate() {
            let x = origin.x + i as f32 * pitch;
            let rect =
                egui::Rect::from_min_size(egui::pos2(x, origin.y), egui::vec2(LED_SIZE, LED_SIZE));
            let color = egui::Color32::from_rgb(pixel.r, pixel.g, pixel.b);
            painter.rect_filled(rect, 6.0, color);
        }
    }
}

impl eframe::App for PreviewApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let wait = self.step(ctx);
        ctx.request_repaint_after(wait);

        egui::CentralPanel::default().show(ctx, |ui| {
            self.strip(ui);
            ui.add_space(12.0);
            self.status(ui);
            ui.add_space(12.0);
            self.telemetry_controls(ui);

            ui.add_space(8.0);
            ui.horizontal(|ui| {
                ui.label("Brightness:");
                if ui
                    .add(egui::Slider::new(&mut self.brightness, 0.0..=1.0))
                    .changed()
                {
                    self.scheduler.sink_mut().set_brightness(self.brightness);
                }
            });
        });
    }
}
