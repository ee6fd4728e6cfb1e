//! edgetone - console demo of the edge-to-music pipeline
//!
//! Run with: cargo run
//!
//! Composes a performance from a synthetic edge set (a sine ridge plus a
//! diagonal) and "plays" it on a console engine: every note prints as it
//! fires on the real transport clock.

use std::sync::Arc;
use std::thread::sleep;
use std::time::Duration;

use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;

use edgetone::edge::{EdgePoint, EdgeSource, StyleClassifier};
use edgetone::pipeline::{compose, ComposeConfig};
use edgetone::playback::{
    AudioEngine, EngineError, FxChain, FxParams, Instrument, PlaybackClock, PlaybackController,
    Transport, VisualSync,
};
use edgetone::style::{note_name, InstrumentKind, Style};

const IMG_W: u32 = 128;
const IMG_H: u32 = 128;

/// Deterministic stand-in for a detector: a sine ridge across the image and
/// a diagonal stroke, magnitudes varied so velocities spread out.
struct SyntheticEdges;

impl EdgeSource for SyntheticEdges {
    fn edge_points(&mut self) -> Vec<EdgePoint> {
        let mut points = Vec::new();
        for x in (0..IMG_W).step_by(2) {
            let phase = x as f32 / IMG_W as f32 * std::f32::consts::TAU;
            let y = (IMG_H as f32 / 2.0 + phase.sin() * IMG_H as f32 / 3.0) as u32;
            points.push(EdgePoint::new(x, y.min(IMG_H - 1), 1.0 + phase.cos().abs(), 0.0));
        }
        for i in (0..IMG_W.min(IMG_H)).step_by(3) {
            points.push(EdgePoint::new(i, i, 2.0, std::f32::consts::FRAC_PI_4));
        }
        points
    }
}

/// Stand-in classifier that leans pentatonic.
struct FixedClassifier;

impl StyleClassifier for FixedClassifier {
    fn probabilities(&mut self) -> [f32; 2] {
        [0.35, 0.65]
    }
}

/// Prints each trigger instead of synthesizing it.
struct ConsoleVoice {
    label: &'static str,
}

impl Instrument for ConsoleVoice {
    fn trigger_note(&self, pitch: i32, duration: f64, at: f64, velocity: f64) {
        println!(
            "{:>7.3}s  {:<4} vel {:.2} dur {:.2}s  [{}]",
            at,
            note_name(pitch),
            velocity,
            duration,
            self.label
        );
    }
}

struct ConsoleFx;

impl FxChain for ConsoleFx {
    fn dispose(&mut self) {}
}

struct ConsoleEngine {
    clock: Arc<Transport>,
}

impl ConsoleEngine {
    fn new() -> Self {
        Self {
            clock: Arc::new(Transport::new()),
        }
    }
}

impl AudioEngine for ConsoleEngine {
    fn clock(&self) -> Arc<dyn PlaybackClock> {
        Arc::clone(&self.clock) as Arc<dyn PlaybackClock>
    }

    fn build_fx_chain(&mut self, _style: Style, params: &FxParams) -> Box<dyn FxChain> {
        info!(
            "fx: reverb decay {:.1}s wet {:.2}, delay fb {:.2} wet {:.2}",
            params.reverb_decay, params.reverb_wet, params.delay_feedback, params.delay_wet
        );
        Box::new(ConsoleFx)
    }

    fn load_instrument(&mut self, style: Style) -> Result<Arc<dyn Instrument>, EngineError> {
        let label = match style.profile().instrument {
            InstrumentKind::Pluck => "pluck",
            InstrumentKind::Poly => "poly",
        };
        Ok(Arc::new(ConsoleVoice { label }))
    }

    fn fallback_instrument(&mut self) -> Arc<dyn Instrument> {
        Arc::new(ConsoleVoice { label: "fallback" })
    }
}

struct NoVisual;

impl VisualSync for NoVisual {
    fn capture_baseline(&self) {}
    fn draw_marker(&self, _x: u32, _y: u32) {}
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let points = SyntheticEdges.edge_points();
    let style = Style::from_probabilities(FixedClassifier.probabilities());
    info!("{} synthetic edge points, style {:?}", points.len(), style);

    // Compressed timeline so the demo finishes in a few seconds.
    let config = ComposeConfig {
        bands: 16,
        span_seconds: 0.25,
        gap_seconds: 0.05,
        ..ComposeConfig::default()
    };

    let mut rng = StdRng::seed_from_u64(0xED6E);
    let performance = compose(&points, IMG_W, IMG_H, style, &config, &mut rng)?;
    info!(
        "composed {} events, {:.2}s of music",
        performance.events.len(),
        performance.end_seconds()
    );

    let mut controller = PlaybackController::new(Box::new(ConsoleEngine::new()));
    controller.play(&performance, Arc::new(NoVisual))?;

    sleep(Duration::from_secs_f64(performance.end_seconds() + 0.5));
    controller.stop();

    Ok(())
}
