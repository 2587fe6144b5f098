//! Gravity Ball headless runner
//!
//! Drives the simulation with a synthetic accelerometer and a scripted drag,
//! logging every wall contact. Set `RUST_LOG=debug` for per-tick detail.

use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Result;
use clap::Parser;
use glam::Vec2;

use gravity_ball::Settings;
use gravity_ball::feedback::Feedback;
use gravity_ball::input::DragGesture;
use gravity_ball::sensor::{NoAccelerometer, SampleMailbox, SensorSource, SyntheticAccelerometer};
use gravity_ball::settings::CadencePreset;
use gravity_ball::sim::{Boundary, Playfield, Rect, Simulator};

#[derive(Parser, Debug)]
#[command(name = "gravity-ball", about = "Run the gravity ball simulation headless")]
struct Args {
    /// Settings JSON file
    #[arg(short, long)]
    settings: Option<PathBuf>,

    /// Simulated seconds to run
    #[arg(long, default_value_t = 10.0)]
    seconds: f32,

    /// Seed for the synthetic accelerometer
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Frame rate of the driving loop
    #[arg(long, default_value_t = 60.0)]
    fps: f32,

    /// Run physics on the 100 ms sensor timer
    #[arg(long)]
    classic: bool,

    /// Pace frames in wall-clock time with the sensor on its own thread
    #[arg(long)]
    realtime: bool,

    /// Simulate a device without an accelerometer
    #[arg(long)]
    no_sensor: bool,
}

/// A 375x667 screen with a 20-point edge view on each side
fn screen_playfield() -> gravity_ball::Result<Playfield> {
    let (w, h, edge) = (375.0, 667.0, 20.0);
    Playfield::from_edge_rects(
        Rect::new(0.0, 0.0, w, edge),
        Rect::new(0.0, h - edge, w, edge),
        Rect::new(0.0, 0.0, edge, h),
        Rect::new(w - edge, 0.0, edge, h),
    )
}

/// Drag toward the upper left between 3 s and 5 s, sweeping right as it goes
fn scripted_drag(prev_t: f32, t: f32) -> Option<DragGesture> {
    const START: f32 = 3.0;
    const END: f32 = 5.0;

    if prev_t < START && t >= START {
        return Some(DragGesture::Began { x: 80.0, y: 150.0 });
    }
    if prev_t < END && t >= END {
        return Some(DragGesture::Ended { x: 280.0, y: 150.0 });
    }
    if t > START && t < END {
        let x = 80.0 + 200.0 * (t - START) / (END - START);
        return Some(DragGesture::Moved { x, y: 150.0 });
    }
    None
}

/// Accelerometer that posts into a mailbox from its own thread
struct SensorThread {
    stop: Arc<AtomicBool>,
    handle: Option<thread::JoinHandle<()>>,
}

impl SensorThread {
    fn spawn(mailbox: SampleMailbox, mut device: SyntheticAccelerometer, interval: f32) -> Self {
        let stop = Arc::new(AtomicBool::new(false));
        let flag = stop.clone();
        let handle = thread::spawn(move || {
            while !flag.load(Ordering::Relaxed) {
                mailbox.post(device.next_sample());
                thread::sleep(Duration::from_secs_f32(interval));
            }
        });
        Self {
            stop,
            handle: Some(handle),
        }
    }

    fn stop(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                log::warn!("Sensor thread panicked");
            }
        }
    }
}

fn run(args: Args) -> Result<()> {
    let mut settings = Settings::load(args.settings.as_deref());
    if args.classic {
        settings.apply_preset(CadencePreset::Classic);
    }
    log::info!("Cadence: {} (physics dt {}s)", settings.cadence.as_str(), settings.physics_dt);

    let playfield = screen_playfield()?;
    let mut sim = Simulator::with_settings(playfield, settings.clone())?;
    let mut feedback = Feedback::new(&settings);

    let fps = if args.fps.is_finite() && args.fps > 0.0 { args.fps } else { 60.0 };
    let frame_dt = 1.0 / fps;
    let frames = (args.seconds.max(0.0) * fps).ceil() as u32;

    let device = SyntheticAccelerometer::new(args.seed, settings.sensor_interval);
    let mut sensor_thread = None;
    let mut sensor: Box<dyn SensorSource> = if args.no_sensor {
        Box::new(NoAccelerometer)
    } else if args.realtime {
        let mailbox = SampleMailbox::new();
        sensor_thread = Some(SensorThread::spawn(mailbox.clone(), device, settings.sensor_interval));
        Box::new(mailbox)
    } else {
        Box::new(device)
    };

    let mut contacts = [0u32; 4];
    let mut t = 0.0f32;
    for frame in 0..frames {
        let frame_start = Instant::now();
        let prev_t = t;
        t += frame_dt;

        if let Some(gesture) = scripted_drag(prev_t, t) {
            sim.gesture(gesture);
        }

        sim.advance(frame_dt, sensor.as_mut());

        for event in sim.drain_events() {
            contacts[event.boundary.index()] += 1;
            feedback.on_contact(&event);
            log::info!(
                "t={:.2}s hit {} wall at ({:.1}, {:.1})",
                t,
                event.boundary.as_str(),
                event.point.x,
                event.point.y
            );
        }
        feedback.advance(frame_dt);

        if frame % fps.round().max(1.0) as u32 == 0 {
            let state = sim.state();
            let shaking: Vec<&str> = Boundary::ALL
                .iter()
                .filter(|b| feedback.wall_offset(**b) != Vec2::ZERO)
                .map(|b| b.as_str())
                .collect();
            log::debug!(
                "t={:.2}s pos=({:.1}, {:.1}) vel=({:.1}, {:.1}) gravity={:.2}rad x{:.2} push={} shaking={:?}",
                t,
                state.ball.pos.x,
                state.ball.pos.y,
                state.ball.vel.x,
                state.ball.vel.y,
                state.gravity.angle,
                state.gravity.magnitude,
                state.push.active,
                shaking
            );
        }

        if args.realtime {
            let spent = frame_start.elapsed().as_secs_f32();
            if spent < frame_dt {
                thread::sleep(Duration::from_secs_f32(frame_dt - spent));
            }
        }
    }

    sim.shutdown();
    if let Some(mut sensor_thread) = sensor_thread {
        sensor_thread.stop();
    }

    let color = feedback.ball_color();
    log::info!(
        "Contacts: top={} bottom={} left={} right={}; final ball color ({:.2}, {:.2}, {:.2})",
        contacts[Boundary::Top.index()],
        contacts[Boundary::Bottom.index()],
        contacts[Boundary::Left.index()],
        contacts[Boundary::Right.index()],
        color.r,
        color.g,
        color.b
    );
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Gravity Ball (headless) starting...");

    run(Args::parse())
}
