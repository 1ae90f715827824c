use super::*;

fn layer(name: &str, px: [u8; 4]) -> Layer {
    Layer::new(name, PixelBuffer::filled(2, 2, px).unwrap()).unwrap()
}

fn names(store: &LayerStore) -> Vec<String> {
    store.list().map(|i| i.name).collect()
}

#[test]
fn insert_preserves_order_and_rejects_duplicates() {
    let mut store = LayerStore::new();
    store.insert(layer("a", [0, 0, 0, 255])).unwrap();
    store.insert(layer("b", [1, 1, 1, 255])).unwrap();
    assert!(matches!(
        store.insert(layer("a", [9, 9, 9, 255])),
        Err(EpicurusError::DuplicateName(_))
    ));
    assert_eq!(names(&store), ["a", "b"]);
    assert_eq!(store.find("a").unwrap().buffer().get(0, 0).unwrap(), [0, 0, 0, 255]);
}

#[test]
fn names_are_case_sensitive() {
    let mut store = LayerStore::new();
    store.insert(layer("Sky", [0, 0, 0, 255])).unwrap();
    store.insert(layer("sky", [0, 0, 0, 255])).unwrap();
    assert_eq!(store.len(), 2);
    assert!(matches!(store.find("SKY"), Err(EpicurusError::NotFound(_))));
}

#[test]
fn remove_shifts_but_keeps_relative_order() {
    let mut store = LayerStore::new();
    for n in ["a", "b", "c", "d"] {
        store.insert(layer(n, [0, 0, 0, 255])).unwrap();
    }
    let removed = store.remove("b").unwrap();
    assert_eq!(removed.name(), "b");
    assert_eq!(names(&store), ["a", "c", "d"]);
    assert_eq!(store.index_of("d").unwrap(), 2);
    assert!(matches!(store.remove("b"), Err(EpicurusError::NotFound(_))));
}

#[test]
fn list_is_restartable() {
    let mut store = LayerStore::new();
    store.insert(layer("a", [0, 0, 0, 255])).unwrap();
    store.insert(layer("b", [0, 0, 0, 255])).unwrap();
    assert_eq!(store.list().count(), 2);
    assert_eq!(store.list().count(), 2);
    let first = store.list().next().unwrap();
    assert_eq!((first.name.as_str(), first.width, first.height), ("a", 2, 2));
}

#[test]
fn replace_buffer_on_missing_layer_fails() {
    let mut store = LayerStore::new();
    assert!(matches!(
        store.replace_buffer("ghost", PixelBuffer::new(1, 1).unwrap()),
        Err(EpicurusError::NotFound(_))
    ));
}

#[test]
fn flatten_collapses_onto_base() {
    let mut store = LayerStore::new();
    store.insert(layer("base", [0, 0, 0, 255])).unwrap();
    store
        .insert(layer("top", [255, 255, 255, 255]).with_alpha(1.0).unwrap())
        .unwrap();
    let base = store.flatten().unwrap();
    assert_eq!(base.name(), "base");
    assert!(base.buffer().pixels().all(|p| p == [255, 255, 255, 255]));
    assert_eq!(store.len(), 1);
}

#[test]
fn flatten_mismatch_leaves_store_untouched() {
    let mut store = LayerStore::new();
    store.insert(layer("base", [0, 0, 0, 255])).unwrap();
    store.insert(layer("mid", [10, 10, 10, 255])).unwrap();
    store
        .insert(Layer::new("odd", PixelBuffer::new(3, 1).unwrap()).unwrap())
        .unwrap();
    assert!(matches!(
        store.flatten(),
        Err(EpicurusError::DimensionMismatch(_))
    ));
    assert_eq!(names(&store), ["base", "mid", "odd"]);
    assert!(
        store
            .find("base")
            .unwrap()
            .buffer()
            .pixels()
            .all(|p| p == [0, 0, 0, 255])
    );
}

#[test]
fn flatten_empty_store_fails() {
    let mut store = LayerStore::new();
    assert!(matches!(
        store.flatten(),
        Err(EpicurusError::InvalidParameter(_))
    ));
}
