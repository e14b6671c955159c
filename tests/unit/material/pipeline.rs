use super::*;
use crate::foundation::core::Rgba8Premul;

#[derive(Default)]
struct Recorder {
    stages: Vec<Stage>,
    finished: usize,
    last_ok: Option<bool>,
}

impl PipelineObserver for Recorder {
    fn on_transition(&mut self, _from: Stage, to: Stage) {
        self.stages.push(to);
    }

    fn on_finish(&mut self, result: Result<&PixelBuffer, &AcrylicError>, _elapsed: Duration) {
        self.finished += 1;
        self.last_ok = Some(result.is_ok());
    }
}

fn red(w: u32, h: u32) -> PixelBuffer {
    PixelBuffer::solid(w, h, Rgba8Premul::from_straight_rgba(255, 0, 0, 255)).unwrap()
}

fn run_recorded(config: &Configuration) -> (AcrylicResult<PixelBuffer>, Recorder) {
    let mut rec = Recorder::default();
    let out = Pipeline::new(config).with_observer(&mut rec).run();
    (out, rec)
}

#[test]
fn new_pipeline_starts_configuring() {
    let config = Configuration::builder().build();
    let p = Pipeline::new(&config);
    assert_eq!(p.stage(), Stage::Configuring);
    assert!(!p.stage().is_terminal());
}

#[test]
fn successful_run_walks_every_stage() {
    let config = Configuration::builder()
        .background(red(8, 8))
        .stack_blur(2)
        .build();
    let (out, rec) = run_recorded(&config);
    out.unwrap();
    assert_eq!(
        rec.stages,
        vec![
            Stage::Validating,
            Stage::Scaling,
            Stage::Blurring,
            Stage::Saturating,
            Stage::Compositing,
            Stage::Done,
        ]
    );
    assert_eq!(rec.finished, 1);
    assert_eq!(rec.last_ok, Some(true));
}

#[test]
fn missing_background_fails_in_validation() {
    let config = Configuration::builder().stack_blur(2).build();
    let (out, rec) = run_recorded(&config);
    assert!(matches!(
        out.unwrap_err(),
        AcrylicError::MissingConfiguration(_)
    ));
    assert_eq!(rec.stages, vec![Stage::Validating, Stage::Failed]);
    assert_eq!(rec.last_ok, Some(false));
}

#[test]
fn missing_blur_fails_in_validation() {
    let config = Configuration::builder().background(red(4, 4)).build();
    let err = generate(&config).unwrap_err();
    assert!(matches!(err, AcrylicError::MissingConfiguration(_)));
}

#[test]
fn bad_scale_factor_fails_before_scaling() {
    let config = Configuration::builder()
        .background(red(4, 4))
        .scale_by(1.5)
        .stack_blur(2)
        .build();
    let (out, rec) = run_recorded(&config);
    assert!(matches!(out.unwrap_err(), AcrylicError::InvalidArgument(_)));
    assert_eq!(rec.stages, vec![Stage::Validating, Stage::Failed]);
}

#[test]
fn bad_gaussian_radius_is_invalid_argument() {
    let config = Configuration::builder()
        .background(red(4, 4))
        .gaussian_blur(26.0)
        .build();
    assert!(matches!(
        generate(&config).unwrap_err(),
        AcrylicError::InvalidArgument(_)
    ));
}

#[test]
fn empty_background_fails_while_blurring() {
    let empty = PixelBuffer::from_premul_rgba8(0, 0, Vec::new()).unwrap();
    let config = Configuration::builder()
        .background(empty)
        .gaussian_blur(5.0)
        .build();
    let (out, rec) = run_recorded(&config);
    assert!(matches!(out.unwrap_err(), AcrylicError::BlurFailed(_)));
    assert_eq!(
        rec.stages,
        vec![
            Stage::Validating,
            Stage::Scaling,
            Stage::Blurring,
            Stage::Failed
        ]
    );
}

#[test]
fn empty_noise_is_dropped_not_fatal() {
    let empty = PixelBuffer::from_premul_rgba8(0, 0, Vec::new()).unwrap();
    let config = Configuration::builder()
        .background(red(6, 6))
        .stack_blur(1)
        .noise(empty)
        .build();
    let out = generate(&config).unwrap();
    assert_eq!(out, red(6, 6));
}

#[test]
fn strict_alignment_surfaces_dimension_mismatch() {
    let config = Configuration::builder()
        .background(red(10, 10))
        .scale_by(0.5)
        .stack_blur(1)
        .noise(red(10, 10))
        .alignment(LayerAlignment::Strict)
        .build();
    let (out, rec) = run_recorded(&config);
    assert!(matches!(
        out.unwrap_err(),
        AcrylicError::DimensionMismatch(_)
    ));
    assert_eq!(rec.stages.last(), Some(&Stage::Failed));
    assert_eq!(rec.stages[rec.stages.len() - 2], Stage::Compositing);
}

#[test]
fn tint_sits_between_base_and_noise() {
    let config = Configuration::builder()
        .background(red(4, 4))
        .stack_blur(1)
        .tint_color(0xFF00_FF00u32)
        .build();
    let out = generate(&config).unwrap();
    assert!(
        out.pixels()
            .all(|px| px == Rgba8Premul::from_straight_rgba(0, 255, 0, 255))
    );

    let blue = PixelBuffer::solid(4, 4, Rgba8Premul::from_straight_rgba(0, 0, 255, 255)).unwrap();
    let config = Configuration::builder()
        .background(red(4, 4))
        .stack_blur(1)
        .tint_color(0xFF00_FF00u32)
        .noise(blue.clone())
        .build();
    assert_eq!(generate(&config).unwrap(), blue);
}

#[test]
fn background_is_never_mutated() {
    let bg = std::sync::Arc::new(red(12, 12));
    let config = Configuration::builder()
        .background(bg.clone())
        .saturation(0.0)
        .stack_blur(3)
        .build();
    generate(&config).unwrap();
    assert_eq!(*bg, red(12, 12));
}

#[test]
fn batch_keeps_input_order() {
    let configs: Vec<Configuration> = [4u32, 6, 8, 10]
        .iter()
        .map(|&n| {
            Configuration::builder()
                .background(red(n, n))
                .stack_blur(1)
                .build()
        })
        .collect();
    let mut bad = configs.clone();
    bad.push(Configuration::builder().build());

    let results = generate_batch(&bad, &BatchOptions { threads: Some(2) }).unwrap();
    assert_eq!(results.len(), 5);
    for (i, n) in [4u32, 6, 8, 10].iter().enumerate() {
        assert_eq!(results[i].as_ref().unwrap().dimensions(), (*n, *n));
    }
    assert!(matches!(
        results[4],
        Err(AcrylicError::MissingConfiguration(_))
    ));
}

#[test]
fn batch_rejects_zero_threads() {
    let err = generate_batch(&[], &BatchOptions { threads: Some(0) }).unwrap_err();
    assert!(matches!(err, AcrylicError::InvalidArgument(_)));
}
