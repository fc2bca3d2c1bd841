//! Desktop preview app for ring-clock-composer
//!
//! Renders the LED ring in a window with a simulated Wi-Fi link, the host
//! clock as time source and an in-memory settings store. Every control goes
//! through the intent channel, like the configuration page on the device.

use std::f32::consts::TAU;
use std::time::{Instant as StdInstant, SystemTime, UNIX_EPOCH};

use eframe::egui::{self};
use ring_clock_composer::{
    AnimationId, ClockIntent, Connectivity, HourHandMode, Instant, IntentChannel, IntentSender,
    MarkerMode, RingClock, RingClockConfig, Rgb, SettingsStorage, SettingsUpdate, TimeSource,
    TimezonePreset, color::format_hex_color,
};

/// Number of LEDs on the simulated ring
const LED_COUNT: usize = 60;

/// Intent channel size
const INTENT_CHANNEL_SIZE: usize = 16;

/// Simulated time until the NTP client reports a valid epoch
const SYNC_DELAY_MS: u128 = 1_500;

/// Diameter of each LED in pixels
const LED_SIZE: f32 = 14.0;

/// Static intent channel for communication between UI and clock
static INTENTS_CHANNEL: IntentChannel<INTENT_CHANNEL_SIZE> =
    IntentChannel::<INTENT_CHANNEL_SIZE>::new();

const TEST_ANIMATIONS: [AnimationId; 7] = [
    AnimationId::Rotating,
    AnimationId::Pulsating,
    AnimationId::Progress,
    AnimationId::Searching,
    AnimationId::Connecting,
    AnimationId::Connected,
    AnimationId::Failed,
];

/// Wi-Fi link toggled from the UI
#[derive(Default)]
struct SimulatedWifi {
    associated: bool,
}

impl Connectivity for SimulatedWifi {
    fn is_associated(&mut self) -> bool {
        self.associated
    }
}

/// Host clock that only reports time a while after being configured
#[derive(Default)]
struct HostClock {
    configured_at: Option<StdInstant>,
    reachable: bool,
}

impl TimeSource for HostClock {
    fn configure(&mut self, _ntp_server: &str, _fallback_servers: [&str; 2], _timezone_rule: &str) {
        self.configured_at = Some(StdInstant::now());
    }

    fn current_epoch(&mut self) -> i64 {
        let synced = self
            .configured_at
            .is_some_and(|at| self.reachable && at.elapsed().as_millis() >= SYNC_DELAY_MS);
        if !synced {
            return 0;
        }
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .ok()
            .and_then(|elapsed| i64::try_from(elapsed.as_secs()).ok())
            .unwrap_or(0)
    }
}

/// Settings bytes kept for the lifetime of the window
struct MemoryStorage {
    bytes: Vec<u8>,
}

impl SettingsStorage for MemoryStorage {
    type Error = &'static str;

    fn read(&mut self, offset: usize, buf: &mut [u8]) -> Result<(), Self::Error> {
        let src = self.bytes.get(offset..offset + buf.len()).ok_or("read out of range")?;
        buf.copy_from_slice(src);
        Ok(())
    }

    fn write(&mut self, offset: usize, data: &[u8]) -> Result<(), Self::Error> {
        let dst = self
            .bytes
            .get_mut(offset..offset + data.len())
            .ok_or("write out of range")?;
        dst.copy_from_slice(data);
        Ok(())
    }

    fn commit(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

type PreviewClock = RingClock<
    'static,
    SimulatedWifi,
    HostClock,
    MemoryStorage,
    LED_COUNT,
    INTENT_CHANNEL_SIZE,
>;

fn main() -> eframe::Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([720.0, 820.0])
            .with_title("Ring Clock Preview"),
        ..Default::default()
    };

    eframe::run_native(
        "ring-clock-preview",
        options,
        Box::new(|_cc| Ok(Box::new(PreviewApp::new()))),
    )
}

struct PreviewApp {
    clock: PreviewClock,
    intent_sender: IntentSender<'static, INTENT_CHANNEL_SIZE>,

    /// Wall-clock reference for the render deadline
    started: StdInstant,
    /// When the current frame's hold expires, in milliseconds since start
    next_deadline_ms: u64,
    /// Last pushed frame
    frame: Vec<Rgb>,

    // UI state (tracked to detect changes and send intents)
    wifi_on: bool,
    ntp_reachable: bool,
    timezone: TimezonePreset,
    brightness: u8,
    show_markers: bool,
    marker_mode: MarkerMode,
    hour_hand_mode: HourHandMode,
    colors: [[u8; 3]; 4],
    ntp_server: String,
}

impl PreviewApp {
    fn new() -> Self {
        let clock = PreviewClock::new(
            INTENTS_CHANNEL.receiver(),
            SimulatedWifi::default(),
            HostClock::default(),
            MemoryStorage {
                bytes: vec![0; 512],
            },
            RingClockConfig::default(),
        );
        let settings = clock.settings().clone();
        let rgb = |c: Rgb| [c.r, c.g, c.b];

        Self {
            intent_sender: INTENTS_CHANNEL.sender(),
            started: StdInstant::now(),
            next_deadline_ms: 0,
            frame: vec![Rgb::default(); LED_COUNT],
            wifi_on: false,
            ntp_reachable: true,
            timezone: settings.timezone_preset().unwrap_or(TimezonePreset::DEFAULT),
            brightness: settings.brightness,
            show_markers: settings.show_markers,
            marker_mode: settings.marker_mode,
            hour_hand_mode: settings.hour_hand_mode,
            colors: [
                rgb(settings.quadrant_color),
                rgb(settings.hour_color),
                rgb(settings.minute_color),
                rgb(settings.second_color),
            ],
            ntp_server: settings.ntp_server().to_string(),
            clock,
        }
    }

    fn send(&self, intent: ClockIntent) {
        let _ = self.intent_sender.try_send(intent);
    }

    fn send_update(&self, update: SettingsUpdate) {
        self.send(ClockIntent::Update(update));
    }

    /// Send all four colors through the same hex path the web form uses
    fn send_colors(&self) {
        let hex = self.colors.map(|[r, g, b]| format_hex_color(Rgb { r, g, b }));
        let update = SettingsUpdate::default().with_hex_colors(
            Some(hex[0].as_str()),
            Some(hex[1].as_str()),
            Some(hex[2].as_str()),
            Some(hex[3].as_str()),
        );
        self.send_update(update);
    }

    /// Render frames whose deadline has passed
    fn advance(&mut self) {
        #[allow(clippy::cast_possible_truncation)]
        let elapsed_ms = self.started.elapsed().as_millis() as u64;
        if elapsed_ms < self.next_deadline_ms {
            return;
        }

        self.clock.wifi_mut().associated = self.wifi_on;
        self.clock.time_mut().reachable = self.ntp_reachable;

        let rendered = self.clock.render(Instant::from_millis(elapsed_ms));
        self.frame.clear();
        self.frame.extend_from_slice(rendered.colors);
        self.next_deadline_ms = elapsed_ms + rendered.hold.as_millis();
    }

    fn status_panel(&mut self, ui: &mut egui::Ui) {
        let status = self.clock.status();
        ui.horizontal(|ui| {
            ui.label(format!("State: {}", status.state.as_str()));
            ui.add_space(8.0);
            ui.label(format!("Synced: {}", status.time_synced));
            ui.add_space(8.0);
            match status.local_time {
                Some(local) => ui.label(format!("Local time: {local}")),
                None => ui.label("Local time: --"),
            };
        });
        if let Some(at) = status.last_sync_attempt {
            #[allow(clippy::cast_precision_loss)]
            let seconds = at.as_millis() as f64 / 1000.0;
            ui.label(format!("Last sync attempt: {seconds:.1}s"));
        }
    }

    fn network_controls(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.checkbox(&mut self.wifi_on, "Wi-Fi associated");
            ui.checkbox(&mut self.ntp_reachable, "NTP reachable");
        });

        ui.horizontal(|ui| {
            ui.label("NTP server:");
            ui.text_edit_singleline(&mut self.ntp_server);
            if ui.button("Apply").clicked() {
                self.send_update(SettingsUpdate::default().with_ntp_server(&self.ntp_server));
            }
        });

        ui.horizontal(|ui| {
            ui.label("Timezone:");
            let mut selected = self.timezone;
            egui::ComboBox::from_id_salt("timezone_selector")
                .selected_text(selected.label())
                .show_ui(ui, |ui| {
                    for preset in TimezonePreset::ALL {
                        ui.selectable_value(&mut selected, preset, preset.label());
                    }
                });
            if selected != self.timezone {
                self.timezone = selected;
                self.send_update(SettingsUpdate::default().with_timezone(selected));
            }
        });
    }

    fn display_controls(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label("Brightness:");
            let old_brightness = self.brightness;
            ui.add(egui::Slider::new(&mut self.brightness, 0u8..=255u8));
            if self.brightness != old_brightness {
                self.send_update(
                    SettingsUpdate::default().with_brightness(i32::from(self.brightness)),
                );
            }
        });

        ui.horizontal(|ui| {
            let old = (self.show_markers, self.marker_mode, self.hour_hand_mode);
            ui.checkbox(&mut self.show_markers, "Markers");
            ui.selectable_value(&mut self.marker_mode, MarkerMode::Quadrants, "4");
            ui.selectable_value(&mut self.marker_mode, MarkerMode::Hours, "12");
            ui.add_space(8.0);
            ui.label("Hour hand:");
            ui.selectable_value(&mut self.hour_hand_mode, HourHandMode::Step, "step");
            ui.selectable_value(&mut self.hour_hand_mode, HourHandMode::Continuous, "continuous");

            if old != (self.show_markers, self.marker_mode, self.hour_hand_mode) {
                self.send_update(SettingsUpdate {
                    show_markers: Some(self.show_markers),
                    marker_mode: Some(self.marker_mode.count()),
                    hour_hand_mode: Some(self.hour_hand_mode.as_raw()),
                    ..Default::default()
                });
            }
        });

        ui.horizontal(|ui| {
            let mut changed = false;
            for (label, color) in ["Markers", "Hour", "Minute", "Second"]
                .into_iter()
                .zip(self.colors.iter_mut())
            {
                ui.label(label);
                changed |= ui.color_edit_button_srgb(color).changed();
                ui.add_space(4.0);
            }
            if changed {
                self.send_colors();
            }
        });

        ui.horizontal_wrapped(|ui| {
            ui.label("Test:");
            for id in TEST_ANIMATIONS {
                if ui.button(id.as_str()).clicked() {
                    self.send(ClockIntent::PlayAnimation(id));
                }
            }
        });
    }

    fn draw_ring(&self, ui: &mut egui::Ui) {
        let size = ui.available_width().min(ui.available_height()).max(LED_SIZE * 4.0);
        let (response, painter) =
            ui.allocate_painter(egui::vec2(size, size), egui::Sense::hover());
        let center = response.rect.center();
        let radius = size / 2.0 - LED_SIZE;

        painter.circle_filled(center, radius + LED_SIZE, egui::Color32::from_gray(20));

        #[allow(clippy::cast_precision_loss)]
        for (i, pixel) in self.frame.iter().enumerate() {
            // Index 0 sits at twelve o'clock, indices run clockwise
            let angle = i as f32 / LED_COUNT as f32 * TAU - TAU / 4.0;
            let position = center + egui::vec2(angle.cos(), angle.sin()) * radius;
            let color = egui::Color32::from_rgb(pixel.r, pixel.g, pixel.b);
            painter.circle_filled(position, LED_SIZE / 2.0, color);
        }
    }
}

impl eframe::App for PreviewApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.advance();

        // Request continuous repaint for animation
        ctx.request_repaint();

        egui::CentralPanel::default().show(ctx, |ui| {
            self.status_panel(ui);
            ui.separator();
            self.network_controls(ui);
            ui.separator();
            self.display_controls(ui);
            ui.add_space(16.0);
            self.draw_ring(ui);
        });
    }
}
