use super::*;

fn px() -> PixelBuffer {
    PixelBuffer::filled(3, 2, [1, 2, 3, 255]).unwrap()
}

#[test]
fn new_layer_has_defaults() {
    let layer = Layer::new("bg", px()).unwrap();
    assert_eq!(layer.name(), "bg");
    assert_eq!(layer.position(), Position::ORIGIN);
    assert_eq!(layer.alpha(), 1.0);
    assert_eq!(layer.buffer().dimensions(), (3, 2));
}

#[test]
fn empty_name_is_rejected() {
    assert!(matches!(
        Layer::new("", px()),
        Err(EpicurusError::InvalidParameter(_))
    ));
}

#[test]
fn alpha_outside_unit_interval_is_rejected_and_kept() {
    let mut layer = Layer::new("a", px()).unwrap().with_alpha(0.5).unwrap();
    assert!(layer.set_alpha(1.01).is_err());
    assert!(layer.set_alpha(f32::INFINITY).is_err());
    assert_eq!(layer.alpha(), 0.5);
}

#[test]
fn replace_buffer_keeps_identity() {
    let mut layer = Layer::new("a", px())
        .unwrap()
        .with_position(Position::new(4, 5));
    let old = layer.replace_buffer(PixelBuffer::new(1, 1).unwrap());
    assert_eq!(old, px());
    assert_eq!(layer.name(), "a");
    assert_eq!(layer.position(), Position::new(4, 5));
    assert_eq!(layer.buffer().dimensions(), (1, 1));
}

#[test]
fn info_snapshots_fields() {
    let layer = Layer::new("top", px()).unwrap().with_alpha(0.25).unwrap();
    let info = layer.info();
    assert_eq!(info.name, "top");
    assert_eq!((info.width, info.height), (3, 2));
    assert_eq!(info.alpha, 0.25);
    let json = serde_json::to_value(&info).unwrap();
    assert_eq!(json["position"]["x"], 0);
}
