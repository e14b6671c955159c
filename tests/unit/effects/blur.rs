use super::*;

fn checker(w: u32, h: u32) -> PixelBuffer {
    let mut data = Vec::with_capacity((w * h * 4) as usize);
    for y in 0..h {
        for x in 0..w {
            let v = if (x + y) % 2 == 0 { 230 } else { 20 };
            data.extend_from_slice(&[v, v / 2, 255 - v, 255]);
        }
    }
    PixelBuffer::from_premul_rgba8(w, h, data).unwrap()
}

fn variance(buf: &PixelBuffer, channel: usize) -> f64 {
    let vals: Vec<f64> = buf
        .as_bytes()
        .chunks_exact(4)
        .map(|px| f64::from(px[channel]))
        .collect();
    let mean = vals.iter().sum::<f64>() / vals.len() as f64;
    vals.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / vals.len() as f64
}

fn configs() -> [BlurConfig; 4] {
    [
        BlurConfig::gaussian(0.5),
        BlurConfig::gaussian(25.0),
        BlurConfig::stack(1),
        BlurConfig::stack(80),
    ]
}

#[test]
fn kind_selects_matching_algorithm() {
    assert_eq!(BlurKind::Gaussian.algorithm().kind(), BlurKind::Gaussian);
    assert_eq!(BlurKind::Stack.algorithm().kind(), BlurKind::Stack);
}

#[test]
fn output_dimensions_match_input() {
    let src = checker(13, 7);
    for cfg in configs() {
        let out = cfg.apply(&src).unwrap();
        assert_eq!(out.dimensions(), src.dimensions(), "{cfg:?}");
    }
}

#[test]
fn uniform_buffer_is_unchanged() {
    let px = crate::foundation::core::Rgba8Premul::from_array([10, 20, 30, 40]);
    let src = PixelBuffer::solid(9, 6, px).unwrap();
    for cfg in configs() {
        let out = cfg.apply(&src).unwrap();
        assert_eq!(out, src, "{cfg:?}");
    }
}

#[test]
fn variance_never_increases() {
    let src = checker(16, 16);
    for cfg in configs() {
        let out = cfg.apply(&src).unwrap();
        for c in 0..3 {
            assert!(
                variance(&out, c) <= variance(&src, c),
                "{cfg:?} channel {c}"
            );
        }
    }
}

#[test]
fn input_is_not_mutated() {
    let src = checker(8, 8);
    let before = src.clone();
    for cfg in configs() {
        let _ = cfg.apply(&src).unwrap();
        assert_eq!(src, before);
    }
}

#[test]
fn empty_input_reports_blur_failed() {
    let src = PixelBuffer::from_premul_rgba8(0, 0, Vec::new()).unwrap();
    for cfg in configs() {
        let err = cfg.apply(&src).unwrap_err();
        assert!(matches!(err, AcrylicError::BlurFailed(_)), "{cfg:?}");
    }
}

#[test]
fn config_validate_follows_algorithm_domain() {
    assert!(BlurConfig::gaussian(25.0).validate().is_ok());
    assert!(BlurConfig::gaussian(25.5).validate().is_err());
    assert!(BlurConfig::stack(1).validate().is_ok());
    assert!(BlurConfig::stack(0).validate().is_err());
}

#[test]
fn config_serde_uses_snake_case_kind() {
    let json = serde_json::to_string(&BlurConfig::stack(80)).unwrap();
    assert_eq!(json, r#"{"kind":"stack","radius":80.0}"#);
    let back: BlurConfig = serde_json::from_str(r#"{"kind":"gaussian","radius":12.5}"#).unwrap();
    assert_eq!(back, BlurConfig::gaussian(12.5));
}
