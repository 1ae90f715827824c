use super::*;

fn ramp() -> PixelBuffer {
    let mut bytes = Vec::new();
    for i in 0..16u8 {
        bytes.extend_from_slice(&[i * 16, 255 - i * 16, i.wrapping_mul(37), 100 + i]);
    }
    PixelBuffer::from_rgba8(4, 4, bytes).unwrap()
}

#[test]
fn add_zero_and_mul_one_are_identities() {
    let buf = ramp();
    assert_eq!(add_scalar(&buf, 0), buf);
    assert_eq!(mul_scalar(&buf, 1), buf);
    assert_eq!(sub_scalar(&buf, 0), buf);
    assert_eq!(div_scalar(&buf, 1).unwrap(), buf);
}

#[test]
fn add_then_sub_restores_without_saturation() {
    let buf = PixelBuffer::filled(2, 2, [10, 100, 200, 255]).unwrap();
    let added = add_scalar(&buf, 50);
    assert_eq!(added.get(0, 0).unwrap(), [60, 150, 250, 255]);
    assert_eq!(sub_scalar(&added, 50), buf);
}

#[test]
fn add_saturates_high_on_wrap_and_never_decreases() {
    let buf = PixelBuffer::filled(1, 1, [250, 5, 128, 7]).unwrap();
    let out = add_scalar(&buf, 10);
    assert_eq!(out.get(0, 0).unwrap(), [255, 15, 138, 7]);

    let buf = ramp();
    for s in [1u32, 7, 100, 255, 256, 1000] {
        let out = add_scalar(&buf, s);
        for (o, i) in out.pixels().zip(buf.pixels()) {
            for c in 0..3 {
                assert!(o[c] >= i[c], "add {s} decreased channel");
            }
            assert_eq!(o[3], i[3]);
        }
    }
}

#[test]
fn add_by_multiple_of_256_wraps_onto_original() {
    let buf = PixelBuffer::filled(1, 1, [40, 0, 255, 255]).unwrap();
    assert_eq!(add_scalar(&buf, 256), buf);
}

#[test]
fn sub_saturates_low_on_wrap() {
    let buf = PixelBuffer::filled(1, 1, [5, 200, 0, 255]).unwrap();
    let out = sub_scalar(&buf, 10);
    assert_eq!(out.get(0, 0).unwrap(), [0, 190, 0, 255]);
}

#[test]
fn mul_saturates_whenever_result_drops() {
    let buf = PixelBuffer::filled(1, 1, [100, 16, 1, 255]).unwrap();
    // 300 wraps to 44 (< 100); 48 and 3 are kept.
    let out = mul_scalar(&buf, 3);
    assert_eq!(out.get(0, 0).unwrap(), [255, 48, 3, 255]);

    // 16 * 17 = 272 truncates to 16, equal to the source, so it is kept as-is.
    let out = mul_scalar(&buf, 17);
    assert_eq!(out.get(0, 0).unwrap()[1], 16);

    // Multiplying a non-zero channel by 0 violates the increasing direction.
    let out = mul_scalar(&PixelBuffer::filled(1, 1, [9, 0, 3, 255]).unwrap(), 0);
    assert_eq!(out.get(0, 0).unwrap(), [255, 0, 255, 255]);
}

#[test]
fn div_truncates_and_rejects_zero() {
    let buf = PixelBuffer::filled(1, 1, [255, 7, 0, 12]).unwrap();
    let out = div_scalar(&buf, 2).unwrap();
    assert_eq!(out.get(0, 0).unwrap(), [127, 3, 0, 12]);
    assert!(matches!(
        div_scalar(&buf, 0),
        Err(EpicurusError::DivisionByZero(_))
    ));
    assert!(matches!(
        apply_scalar(&buf, ArithOp::Div, 0),
        Err(EpicurusError::DivisionByZero(_))
    ));
}

#[test]
fn add_buffers_scenario_saturates_red_only() {
    let a = PixelBuffer::filled(2, 2, [255, 0, 0, 255]).unwrap();
    let b = PixelBuffer::filled(2, 2, [10, 10, 10, 255]).unwrap();
    let out = add_buffers(&a, &b).unwrap();
    assert!(out.pixels().all(|p| p == [255, 10, 10, 255]));
}

#[test]
fn mul_buffers_is_per_channel_and_keeps_lhs_alpha() {
    let a = PixelBuffer::filled(1, 2, [3, 20, 0, 90]).unwrap();
    let b = PixelBuffer::filled(1, 2, [5, 1, 200, 10]).unwrap();
    let out = mul_buffers(&a, &b).unwrap();
    assert!(out.pixels().all(|p| p == [15, 20, 0, 90]));
}

#[test]
fn binary_ops_reject_mismatched_dimensions_and_leave_operands() {
    let a = PixelBuffer::filled(2, 2, [1, 2, 3, 4]).unwrap();
    let b = PixelBuffer::filled(2, 3, [5, 6, 7, 8]).unwrap();
    let (a0, b0) = (a.clone(), b.clone());
    assert!(matches!(
        add_buffers(&a, &b),
        Err(EpicurusError::DimensionMismatch(_))
    ));
    assert!(matches!(
        mul_buffers(&b, &a),
        Err(EpicurusError::DimensionMismatch(_))
    ));
    assert_eq!(a, a0);
    assert_eq!(b, b0);
}

#[test]
fn scalar_ops_do_not_touch_input() {
    let buf = ramp();
    let before = buf.clone();
    let _ = add_scalar(&buf, 99);
    let _ = div_scalar(&buf, 3).unwrap();
    assert_eq!(buf, before);
}
