use super::*;

#[test]
fn from_premul_rejects_wrong_length() {
    let err = PixelBuffer::from_premul_rgba8(2, 2, vec![0u8; 15]).unwrap_err();
    assert!(matches!(err, AcrylicError::InvalidArgument(_)));
}

#[test]
fn zero_sized_buffer_is_representable() {
    let buf = PixelBuffer::from_premul_rgba8(0, 5, Vec::new()).unwrap();
    assert!(buf.is_empty());
    assert_eq!(buf.dimensions(), (0, 5));
}

#[test]
fn straight_rgba_is_premultiplied_on_construction() {
    let buf = PixelBuffer::from_straight_rgba8(1, 1, vec![100, 50, 200, 128]).unwrap();
    assert_eq!(
        buf.as_bytes(),
        &[
            ((100u16 * 128 + 127) / 255) as u8,
            ((50u16 * 128 + 127) / 255) as u8,
            ((200u16 * 128 + 127) / 255) as u8,
            128
        ]
    );
}

#[test]
fn straight_roundtrip_is_exact_for_opaque_and_transparent() {
    let src = vec![10u8, 20, 30, 255, 0, 0, 0, 0];
    let buf = PixelBuffer::from_straight_rgba8(2, 1, src.clone()).unwrap();
    assert_eq!(buf.to_straight_rgba8(), src);
}

#[test]
fn solid_fills_every_pixel() {
    let c = Rgba8Premul::from_straight_rgba(255, 0, 0, 255);
    let buf = PixelBuffer::solid(3, 2, c).unwrap();
    assert_eq!(buf.as_bytes().len(), 3 * 2 * 4);
    assert!(buf.pixels().all(|px| px == c));
    assert_eq!(buf.pixel(2, 1), Some(c));
    assert_eq!(buf.pixel(3, 0), None);
}

#[test]
fn argb_color_parses_and_displays() {
    let c: ArgbColor = "#80FF0000".parse().unwrap();
    assert_eq!(c, ArgbColor(0x80FF_0000));
    assert_eq!(c.alpha(), 0x80);
    assert_eq!(c.red(), 0xFF);
    assert_eq!(c.to_string(), "#80FF0000");

    let opaque: ArgbColor = "00ff00".parse().unwrap();
    assert_eq!(opaque, ArgbColor(0xFF00_FF00));

    assert!("#123".parse::<ArgbColor>().is_err());
    assert!("#GG000000".parse::<ArgbColor>().is_err());
}

#[test]
fn argb_color_premultiplies() {
    let px = ArgbColor(0x80FF_FFFF).to_premul();
    assert_eq!(px.a, 0x80);
    assert_eq!(px.r, 0x80);
}

#[test]
fn argb_color_serde_uses_hex_string() {
    let json = serde_json::to_string(&ArgbColor(0x40102030)).unwrap();
    assert_eq!(json, "\"#40102030\"");
    let back: ArgbColor = serde_json::from_str(&json).unwrap();
    assert_eq!(back, ArgbColor(0x40102030));
}
