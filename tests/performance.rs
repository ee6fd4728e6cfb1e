//! End-to-end pipeline tests: edge sets in, scheduled performances out.
//!
//! These drive `compose` the way the capture flow does, with the shipped
//! default configuration, and check the contracts the playback side relies
//! on: band pacing, onset ordering, scale confinement, and rejection of
//! unplayable input.

use rand::rngs::StdRng;
use rand::SeedableRng;

use edgetone::edge::EdgePoint;
use edgetone::pipeline::{compose, ComposeConfig, ComposeError};
use edgetone::style::Style;

const IMG_W: u32 = 128;
const IMG_H: u32 = 128;

/// One edge point per band, centered horizontally. With the default 48-band
/// split of a 128px image, band `b` starts at `y = 2 * b`.
fn one_point_per_band() -> Vec<EdgePoint> {
    (0..48u32)
        .map(|b| EdgePoint::new(64, b * 2, 1.0, 0.0))
        .collect()
}

#[test]
fn one_point_per_band_paces_the_default_timeline() {
    let mut rng = StdRng::seed_from_u64(3);
    let config = ComposeConfig::default();
    let performance = compose(
        &one_point_per_band(),
        IMG_W,
        IMG_H,
        Style::Diatonic,
        &config,
        &mut rng,
    )
    .unwrap();

    assert_eq!(performance.events.len(), 48);

    let slot = config.span_seconds + config.gap_seconds;
    for (b, event) in performance.events.iter().enumerate() {
        let band_start = b as f64 * slot;
        // First onset in a band sits on the band start, plus at most the
        // humanization jitter (negative jitter clamps at the grid).
        assert!(
            event.onset >= band_start - 1e-9,
            "band {b}: onset {} before band start {band_start}",
            event.onset
        );
        assert!(
            event.onset <= band_start + config.humanize + 1e-9,
            "band {b}: onset {} drifted past jitter bound",
            event.onset
        );
    }

    for pair in performance.events.windows(2) {
        assert!(pair[1].onset > pair[0].onset);
    }
}

#[test]
fn pitches_stay_on_the_active_scale() {
    let mut rng = StdRng::seed_from_u64(14);
    let config = ComposeConfig::default();

    for style in [Style::Diatonic, Style::Pentatonic] {
        let performance = compose(
            &one_point_per_band(),
            IMG_W,
            IMG_H,
            style,
            &config,
            &mut rng,
        )
        .unwrap();

        let scale = style.profile().scale;
        for event in &performance.events {
            let offset = (event.pitch - scale.root).rem_euclid(12);
            assert!(
                scale.intervals.contains(&offset),
                "{style:?}: pitch {} is off-scale",
                event.pitch
            );
        }
    }
}

#[test]
fn identical_seeds_replay_the_identical_performance() {
    let config = ComposeConfig::default();
    let points = one_point_per_band();

    let runs: Vec<_> = (0..2)
        .map(|_| {
            compose(
                &points,
                IMG_W,
                IMG_H,
                Style::Pentatonic,
                &config,
                &mut StdRng::seed_from_u64(777),
            )
            .unwrap()
        })
        .collect();

    assert_eq!(runs[0], runs[1]);
}

#[test]
fn zero_band_config_composes_as_a_single_band() {
    let mut rng = StdRng::seed_from_u64(6);
    let config = ComposeConfig {
        bands: 0,
        ..ComposeConfig::default()
    };

    let performance = compose(
        &one_point_per_band(),
        IMG_W,
        IMG_H,
        Style::Diatonic,
        &config,
        &mut rng,
    )
    .unwrap();

    // All input collapses into one band starting at time zero.
    assert!(!performance.events.is_empty());
    assert!(performance.events[0].onset < config.span_seconds);
}

#[test]
fn empty_edge_set_is_rejected() {
    let mut rng = StdRng::seed_from_u64(1);
    assert_eq!(
        compose(
            &[],
            IMG_W,
            IMG_H,
            Style::Diatonic,
            &ComposeConfig::default(),
            &mut rng
        ),
        Err(ComposeError::NoEdgePoints)
    );
}

#[test]
fn points_past_the_image_yield_no_playable_events() {
    let mut rng = StdRng::seed_from_u64(1);
    let stray = [EdgePoint::new(5, IMG_H * 4, 1.0, 0.0)];
    assert_eq!(
        compose(
            &stray,
            IMG_W,
            IMG_H,
            Style::Diatonic,
            &ComposeConfig::default(),
            &mut rng
        ),
        Err(ComposeError::NoPlayableEvents)
    );
}

#[test]
fn dense_capture_composes_and_ends_after_its_last_note() {
    let mut rng = StdRng::seed_from_u64(21);
    let mut points = Vec::new();
    for y in (0..IMG_H).step_by(2) {
        for x in (0..IMG_W).step_by(4) {
            points.push(EdgePoint::new(x, y, 0.5 + (y % 9) as f32, 0.0));
        }
    }

    let performance = compose(
        &points,
        IMG_W,
        IMG_H,
        Style::Pentatonic,
        &ComposeConfig::default(),
        &mut rng,
    )
    .unwrap();

    assert!(!performance.events.is_empty());
    let last = performance.events.last().unwrap();
    assert!(performance.end_seconds() >= last.onset + last.duration);

    for event in &performance.events {
        assert!(event.velocity >= 0.55 - 1e-9 && event.velocity <= 0.95 + 1e-9);
    }
}
