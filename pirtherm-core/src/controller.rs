//! Activation controller
//!
//! Owns every collaborator and runs the poll loop:
//!
//! ```text
//!            motion detected
//!   Idle ---------------------> Active
//!    ^   (read, show reading)     |
//!    |                            | window elapsed
//!    +----------------------------+
//!        (clear, settle)
//! ```
//!
//! Motion is only sampled while idle. The lit display can trip the PIR, so
//! polling it while active would keep the window open forever.

use crate::config::{ActivationConfig, AppConfig};
use crate::power::PowerPolicy;
use crate::reader::{TemperatureReader, TemperatureSample};
use crate::render::DisplayPresenter;
use crate::state::{ActivationWindow, Event, MotionState};
use crate::traits::{
    Clock, DisplayError, GraphicDisplay, MotionInput, PowerController, TemperatureSensor,
};

/// Shown while waiting out the sensor's minimum interval
pub const WAITING_MESSAGE: [&str; 2] = ["Waiting...", "sensor DHT"];

/// Shown when no valid reading could be obtained
pub const READ_ERROR_MESSAGE: [&str; 2] = ["Read error", "temperature"];

/// Motion-activated display controller
pub struct ActivationController<M, S, D, C, P> {
    motion: M,
    reader: TemperatureReader<S>,
    presenter: DisplayPresenter<D>,
    clock: C,
    power: PowerPolicy<P>,
    config: ActivationConfig,
    /// Forced wait before the second read attempt
    retry_wait_ms: u32,
    state: MotionState,
    window: Option<ActivationWindow>,
}

impl<M, S, D, C, P> ActivationController<M, S, D, C, P>
where
    M: MotionInput,
    S: TemperatureSensor,
    D: GraphicDisplay,
    C: Clock,
    P: PowerController,
{
    /// Create a new controller from its hardware and configuration
    pub fn new(motion: M, sensor: S, display: D, clock: C, power: P, config: AppConfig) -> Self {
        let AppConfig {
            sensor: sensor_config,
            activation,
            display: display_config,
            power: power_config,
        } = config;
        let retry_wait_ms = sensor_config.min_interval_ms;

        Self {
            motion,
            reader: TemperatureReader::new(sensor, sensor_config),
            presenter: DisplayPresenter::new(display, display_config),
            clock,
            power: PowerPolicy::new(power, power_config),
            config: activation,
            retry_wait_ms,
            state: MotionState::Idle,
            window: None,
        }
    }

    /// Get current state
    pub fn state(&self) -> MotionState {
        self.state
    }

    /// Get the open activation window, if any
    pub fn window(&self) -> Option<&ActivationWindow> {
        self.window.as_ref()
    }

    /// Get the temperature reader
    pub fn reader(&self) -> &TemperatureReader<S> {
        &self.reader
    }

    /// Get the display presenter
    pub fn presenter(&self) -> &DisplayPresenter<D> {
        &self.presenter
    }

    /// Get the power policy
    pub fn power(&self) -> &PowerPolicy<P> {
        &self.power
    }

    /// Power-on sequence: power settings, blank display, sensor warm-up
    pub fn start(&mut self) {
        info!("Starting");
        self.power.startup();
        report(self.presenter.clear());
        self.reader.warm_up(&mut self.clock);
        info!("Ready, waiting for motion");
    }

    /// Run one iteration of the state machine
    pub fn poll(&mut self) {
        match self.state {
            MotionState::Idle => {
                if self.motion.is_detected() {
                    self.activate();
                }
            }
            MotionState::Active => {
                let now = self.clock.now_ms();
                if self.window.map_or(true, |w| w.is_expired(now)) {
                    self.deactivate();
                }
            }
        }
    }

    /// Block until the next poll is due
    pub fn wait(&mut self) {
        self.power.idle_wait(self.state, &mut self.clock);
    }

    /// Start, then poll forever
    pub fn run(&mut self) -> ! {
        self.start();
        loop {
            self.poll();
            self.wait();
        }
    }

    fn activate(&mut self) {
        let now = self.clock.now_ms();
        info!("Motion detected at {=u32} ms", now);

        self.state = self.state.transition(Event::MotionDetected);
        self.window = Some(ActivationWindow::open(now, self.config.window_ms));

        if let Some(sample) = self.reader.read(now, &mut self.clock) {
            self.show_sample(&sample);
            return;
        }

        report(self.presenter.show_message(&WAITING_MESSAGE));
        self.clock.delay_ms(self.retry_wait_ms);

        let now = self.clock.now_ms();
        match self.reader.read(now, &mut self.clock) {
            Some(sample) => self.show_sample(&sample),
            None => {
                warn!("No valid temperature reading");
                report(self.presenter.show_message(&READ_ERROR_MESSAGE));
            }
        }
    }

    fn deactivate(&mut self) {
        self.state = self.state.transition(Event::WindowExpired);
        self.window = None;
        report(self.presenter.clear());
        info!("Display deactivated");

        if self.config.power_saving {
            self.clock.delay_ms(self.config.settle_ms);
        }
    }

    fn show_sample(&mut self, sample: &TemperatureSample) {
        info!("Temperature: {} C", sample.value_c());
        report(self.presenter.show_temperature(sample));
    }
}

/// Display failures never stop the loop
fn report(result: Result<(), DisplayError>) {
    if let Err(e) = result {
        warn!("Display update failed: {}", e);
    }
}
