use super::*;

fn solid(px: [u8; 4]) -> PixelBuffer {
    PixelBuffer::filled(3, 2, px).unwrap()
}

#[test]
fn blend_alpha_0_is_bottom_and_alpha_1_is_top() {
    let bottom = solid([10, 20, 30, 40]);
    let top = solid([200, 210, 220, 230]);
    assert_eq!(blend(&bottom, &top, 0.0).unwrap(), bottom);
    assert_eq!(blend(&bottom, &top, 1.0).unwrap(), top);
}

#[test]
fn blend_midpoint_interpolates_all_channels() {
    let bottom = solid([0, 100, 255, 255]);
    let top = solid([255, 100, 0, 0]);
    let out = blend(&bottom, &top, 0.5).unwrap();
    assert!(out.pixels().all(|p| p == [128, 100, 127, 127]));
}

#[test]
fn blend_rejects_bad_alpha_and_sizes() {
    let a = solid([0, 0, 0, 255]);
    let b = PixelBuffer::filled(2, 2, [0, 0, 0, 255]).unwrap();
    assert!(matches!(
        blend(&a, &a, 1.5),
        Err(EpicurusError::InvalidParameter(_))
    ));
    assert!(matches!(
        blend(&a, &a, f32::NAN),
        Err(EpicurusError::InvalidParameter(_))
    ));
    assert!(matches!(
        blend(&a, &b, 0.5),
        Err(EpicurusError::DimensionMismatch(_))
    ));
}

#[test]
fn merge_down_folds_in_stack_order() {
    let base = Layer::new("base", solid([0, 0, 0, 255])).unwrap();
    let red = Layer::new("red", solid([255, 0, 0, 255]))
        .unwrap()
        .with_alpha(1.0)
        .unwrap();
    let half_blue = Layer::new("blue", solid([0, 0, 255, 255]))
        .unwrap()
        .with_alpha(0.5)
        .unwrap();
    let out = merge_down(&[base, red, half_blue]).unwrap();
    assert!(out.pixels().all(|p| p == [127, 0, 128, 255]));
}

#[test]
fn merge_down_single_layer_is_base() {
    let base = Layer::new("base", solid([5, 6, 7, 8])).unwrap();
    assert_eq!(merge_down(std::slice::from_ref(&base)).unwrap(), *base.buffer());
}

#[test]
fn merge_down_checks_every_size_first() {
    let base = Layer::new("base", solid([0, 0, 0, 255])).unwrap();
    let ok = Layer::new("ok", solid([1, 1, 1, 255])).unwrap();
    let bad = Layer::new("bad", PixelBuffer::new(1, 1).unwrap()).unwrap();
    let err = merge_down(&[base, ok, bad]).unwrap_err();
    assert!(matches!(err, EpicurusError::DimensionMismatch(_)));
    assert!(err.to_string().contains("bad"));
    assert!(matches!(
        merge_down(&[]),
        Err(EpicurusError::InvalidParameter(_))
    ));
}
