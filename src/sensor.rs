//! Accelerometer input
//!
//! The simulation never talks to sensor hardware. A platform layer implements
//! [`SensorSource`] (or posts into a [`SampleMailbox`] from its own thread) and
//! the simulator polls it at the sensor cadence.

use std::sync::{Arc, Mutex};

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

/// One accelerometer reading, in g, device axes (y up)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AccelerationSample {
    pub x: f32,
    pub y: f32,
}

impl AccelerationSample {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Something that can report the latest accelerometer reading
pub trait SensorSource {
    /// Whether the device has an accelerometer at all
    fn is_available(&self) -> bool;

    /// Most recent reading, or `None` if nothing new has arrived
    fn latest(&mut self) -> Option<AccelerationSample>;
}

/// A device without an accelerometer
#[derive(Debug, Clone, Copy, Default)]
pub struct NoAccelerometer;

impl SensorSource for NoAccelerometer {
    fn is_available(&self) -> bool {
        false
    }

    fn latest(&mut self) -> Option<AccelerationSample> {
        None
    }
}

/// Latest-wins sample slot shared between a sensor thread and the simulator
#[derive(Debug, Clone, Default)]
pub struct SampleMailbox {
    slot: Arc<Mutex<Option<AccelerationSample>>>,
}

impl SampleMailbox {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace whatever sample is waiting
    pub fn post(&self, sample: AccelerationSample) {
        // A poisoned slot only ever held a plain sample; keep using it.
        let mut slot = self.slot.lock().unwrap_or_else(|e| e.into_inner());
        *slot = Some(sample);
    }

    /// Take the waiting sample, if any
    pub fn take(&self) -> Option<AccelerationSample> {
        let mut slot = self.slot.lock().unwrap_or_else(|e| e.into_inner());
        slot.take()
    }
}

impl SensorSource for SampleMailbox {
    fn is_available(&self) -> bool {
        true
    }

    fn latest(&mut self) -> Option<AccelerationSample> {
        self.take()
    }
}

/// Deterministic tilt generator for headless runs and tests.
///
/// Sweeps the device through a slow rocking motion with seeded jitter on top,
/// so the ball visits every wall.
#[derive(Debug, Clone)]
pub struct SyntheticAccelerometer {
    rng: Pcg32,
    /// Seconds of simulated device time
    time: f32,
    /// Seconds per reading
    interval: f32,
    /// Peak jitter added to each axis (g)
    jitter: f32,
}

impl SyntheticAccelerometer {
    pub fn new(seed: u64, interval: f32) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            time: 0.0,
            interval,
            jitter: 0.05,
        }
    }

    /// Produce the next reading and advance device time by one interval
    pub fn next_sample(&mut self) -> AccelerationSample {
        let t = self.time;
        self.time += self.interval;

        // Rocking left/right while mostly upright
        let x = 0.8 * (t * 0.7).sin();
        let y = -0.6 + 0.4 * (t * 0.45).cos();

        let jx = self.rng.random_range(-self.jitter..=self.jitter);
        let jy = self.rng.random_range(-self.jitter..=self.jitter);
        AccelerationSample::new(x + jx, y + jy)
    }
}

impl SensorSource for SyntheticAccelerometer {
    fn is_available(&self) -> bool {
        true
    }

    fn latest(&mut self) -> Option<AccelerationSample> {
        Some(self.next_sample())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_mailbox_latest_wins() {
        let mailbox = SampleMailbox::new();
        mailbox.post(AccelerationSample::new(0.1, 0.2));
        mailbox.post(AccelerationSample::new(0.3, 0.4));
        assert_eq!(mailbox.take(), Some(AccelerationSample::new(0.3, 0.4)));
        assert_eq!(mailbox.take(), None);
    }

    #[test]
    fn test_mailbox_across_threads() {
        let mailbox = SampleMailbox::new();
        let writer = mailbox.clone();
        thread::spawn(move || {
            writer.post(AccelerationSample::new(-0.5, 0.25));
        })
        .join()
        .unwrap();
        assert_eq!(mailbox.take(), Some(AccelerationSample::new(-0.5, 0.25)));
    }

    #[test]
    fn test_synthetic_is_deterministic() {
        let mut a = SyntheticAccelerometer::new(7, 0.1);
        let mut b = SyntheticAccelerometer::new(7, 0.1);
        for _ in 0..50 {
            let (sa, sb) = (a.next_sample(), b.next_sample());
            assert_eq!(sa, sb);
            assert!(sa.is_finite());
            assert!(sa.x.abs() <= 1.0 && sa.y.abs() <= 1.1);
        }
    }

    #[test]
    fn test_no_accelerometer() {
        let mut s = NoAccelerometer;
        assert!(!s.is_available());
        assert!(s.latest().is_none());
    }
}
