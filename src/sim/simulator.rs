//! Owning simulation driver
//!
//! [`Simulator`] wraps a [`SimState`] with everything needed to run it from a
//! variable-rate frame loop: a fixed-timestep accumulator for physics, a
//! separate accumulator for the accelerometer cadence, queued gesture input,
//! and an outgoing contact event queue.

use super::boundary::Playfield;
use super::state::{Ball, ContactEvent, SimState};
use super::tick::{TickInput, tick};
use crate::error::Result;
use crate::input::{DragGesture, GestureQueue};
use crate::sensor::{AccelerationSample, SensorSource};
use crate::settings::Settings;

/// Lifecycle of a simulator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Running,
    Shutdown,
}

pub struct Simulator {
    state: SimState,
    settings: Settings,
    run_state: RunState,
    /// Unconsumed frame time (physics)
    accumulator: f32,
    /// Time since the sensor was due, carried between polls
    sensor_elapsed: f32,
    /// Set once a sensor has been found missing, so we only warn once
    sensor_missing: bool,
    pending_sample: Option<AccelerationSample>,
    gestures: GestureQueue,
    events: Vec<ContactEvent>,
}

impl Simulator {
    /// Create a running simulator for `ball` inside `playfield`
    pub fn new(playfield: Playfield, ball: Ball, settings: Settings) -> Result<Self> {
        settings.validate()?;
        playfield.check_fits(ball.radius)?;

        log::info!(
            "Simulator started: playfield {}x{}, ball r={} e={}, physics dt={}s, sensor every {}s",
            playfield.width(),
            playfield.height(),
            ball.radius,
            ball.elasticity,
            settings.physics_dt,
            settings.sensor_interval
        );

        let mut state = SimState::new(playfield, ball);
        state.gravity = settings.initial_gravity();
        let sensor_interval = settings.sensor_interval;

        Ok(Self {
            state,
            settings,
            run_state: RunState::Running,
            accumulator: 0.0,
            // Poll on the very first step
            sensor_elapsed: sensor_interval,
            sensor_missing: false,
            pending_sample: None,
            gestures: GestureQueue::new(),
            events: Vec::new(),
        })
    }

    /// Default ball inside `playfield`, configured from `settings`
    pub fn with_settings(playfield: Playfield, settings: Settings) -> Result<Self> {
        let ball = settings.ball();
        Self::new(playfield, ball, settings)
    }

    pub fn state(&self) -> &SimState {
        &self.state
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn run_state(&self) -> RunState {
        self.run_state
    }

    pub fn is_running(&self) -> bool {
        self.run_state == RunState::Running
    }

    /// Queue an accelerometer reading for the next tick (latest wins)
    pub fn submit_sample(&mut self, sample: AccelerationSample) {
        if self.is_running() {
            self.pending_sample = Some(sample);
        }
    }

    /// Queue a drag gesture for the next tick
    pub fn gesture(&mut self, gesture: DragGesture) {
        if self.is_running() {
            self.gestures.push(gesture);
        }
    }

    /// Run exactly one physics tick
    pub fn step(&mut self) {
        if !self.is_running() {
            return;
        }

        let input = TickInput {
            sample: self.pending_sample.take(),
            gestures: self.gestures.drain(),
        };
        let events = tick(&mut self.state, &input, &self.settings, self.settings.physics_dt);
        self.events.extend(events);
    }

    /// Advance by a variable frame time, polling `sensor` at the sensor cadence.
    ///
    /// Returns the number of physics ticks run. Frame time beyond
    /// `max_substeps` ticks is dropped.
    pub fn advance<S: SensorSource + ?Sized>(&mut self, frame_dt: f32, sensor: &mut S) -> u32 {
        if !self.is_running() || !frame_dt.is_finite() || frame_dt <= 0.0 {
            return 0;
        }

        let dt = self.settings.physics_dt;
        self.accumulator += frame_dt;

        let mut substeps = 0;
        while self.accumulator >= dt && substeps < self.settings.max_substeps {
            if self.sensor_elapsed >= self.settings.sensor_interval {
                self.sensor_elapsed %= self.settings.sensor_interval;
                self.poll_sensor(sensor);
            }
            self.sensor_elapsed += dt;

            self.step();
            self.accumulator -= dt;
            substeps += 1;
        }

        if substeps == self.settings.max_substeps && self.accumulator >= dt {
            log::debug!("Dropping {:.3}s of frame time", self.accumulator);
            self.accumulator = 0.0;
        }

        substeps
    }

    fn poll_sensor<S: SensorSource + ?Sized>(&mut self, sensor: &mut S) {
        if !sensor.is_available() {
            if !self.sensor_missing {
                log::warn!("No accelerometer available, gravity stays at its current value");
                self.sensor_missing = true;
            }
            return;
        }
        if let Some(sample) = sensor.latest() {
            self.submit_sample(sample);
        }
    }

    /// Take the contact events produced since the last drain
    pub fn drain_events(&mut self) -> Vec<ContactEvent> {
        std::mem::take(&mut self.events)
    }

    /// Stop ticking and drop pending input
    pub fn shutdown(&mut self) {
        if self.run_state == RunState::Shutdown {
            return;
        }
        self.run_state = RunState::Shutdown;
        self.pending_sample = None;
        self.gestures.clear();
        self.state.push.end();
        log::info!("Simulator shut down after {} ticks", self.state.time_ticks);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sensor::{NoAccelerometer, SampleMailbox, SyntheticAccelerometer};
    use crate::sim::{Boundary, GravityField};
    use glam::Vec2;

    fn simulator() -> Simulator {
        Simulator::with_settings(Playfield::default(), Settings::default()).unwrap()
    }

    #[test]
    fn test_advance_runs_fixed_steps() {
        let mut sim = simulator();
        let mut sensor = NoAccelerometer;
        // 0.05s at 16ms per tick = 3 ticks, 2ms carried over
        assert_eq!(sim.advance(0.05, &mut sensor), 3);
        assert_eq!(sim.state().time_ticks, 3);
        assert_eq!(sim.advance(0.02, &mut sensor), 1);
    }

    #[test]
    fn test_advance_caps_substeps() {
        let mut sim = simulator();
        let ticks = sim.advance(10.0, &mut NoAccelerometer);
        assert_eq!(ticks, sim.settings().max_substeps);
        // Backlog dropped rather than replayed
        assert_eq!(sim.advance(0.001, &mut NoAccelerometer), 0);
    }

    #[test]
    fn test_missing_sensor_keeps_initial_gravity() {
        let mut sim = simulator();
        for _ in 0..100 {
            sim.advance(0.016, &mut NoAccelerometer);
        }
        assert_eq!(sim.state().gravity, GravityField::default());
    }

    #[test]
    fn test_sensor_polled_at_its_own_cadence() {
        let mut sim = simulator();
        let mut mailbox = SampleMailbox::new();

        mailbox.post(AccelerationSample::new(1.0, 0.0));
        sim.advance(0.016, &mut mailbox);
        assert!(sim.state().gravity.angle.abs() < 1e-6);

        // Not yet time for the next poll: the new sample waits in the mailbox
        mailbox.post(AccelerationSample::new(-1.0, 0.0));
        sim.advance(0.016, &mut mailbox);
        assert!(sim.state().gravity.angle.abs() < 1e-6);

        for _ in 0..8 {
            sim.advance(0.016, &mut mailbox);
        }
        assert!((sim.state().gravity.angle - std::f32::consts::PI).abs() < 1e-6);
    }

    /// Counts how often it is polled
    #[derive(Default)]
    struct CountingSensor {
        polls: u32,
    }

    impl SensorSource for CountingSensor {
        fn is_available(&self) -> bool {
            true
        }

        fn latest(&mut self) -> Option<AccelerationSample> {
            self.polls += 1;
            None
        }
    }

    #[test]
    fn test_sensor_cadence_averages_interval() {
        let mut sim = simulator();
        let mut sensor = CountingSensor::default();

        // 625 ticks of 16 ms = 10 s, so about 100 polls at 100 ms
        for _ in 0..625 {
            sim.advance(0.016, &mut sensor);
        }
        assert_eq!(sim.state().time_ticks, 625);
        assert!((99..=101).contains(&sensor.polls), "polled {} times", sensor.polls);
    }

    #[test]
    fn test_events_drained_once() {
        let settings = Settings::default();
        let field = Playfield::new(0.0, 0.0, 400.0, 600.0).unwrap();
        let ball = Ball::new(Vec2::new(200.0, 575.0), 25.0);
        let mut sim = Simulator::new(field, ball, settings).unwrap();
        sim.submit_sample(AccelerationSample::new(0.0, -1.0));

        for _ in 0..30 {
            sim.step();
        }
        let events = sim.drain_events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].boundary, Boundary::Bottom);
        assert!(sim.drain_events().is_empty());
    }

    #[test]
    fn test_shutdown_stops_ticks_and_input() {
        let mut sim = simulator();
        sim.gesture(DragGesture::Began { x: 10.0, y: 10.0 });
        sim.step();
        assert!(sim.state().push.active);

        sim.shutdown();
        assert_eq!(sim.run_state(), RunState::Shutdown);
        assert!(!sim.state().push.active);

        let ticks = sim.state().time_ticks;
        sim.step();
        assert_eq!(sim.advance(1.0, &mut SyntheticAccelerometer::new(1, 0.1)), 0);
        sim.submit_sample(AccelerationSample::new(1.0, 0.0));
        assert_eq!(sim.state().time_ticks, ticks);
    }

    #[test]
    fn test_rejects_ball_that_does_not_fit() {
        let field = Playfield::new(0.0, 0.0, 40.0, 40.0).unwrap();
        assert!(Simulator::new(field, Ball::default(), Settings::default()).is_err());
    }
}
