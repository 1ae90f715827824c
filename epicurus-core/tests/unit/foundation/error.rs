use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        EpicurusError::out_of_range("x")
            .to_string()
            .contains("out of range:")
    );
    assert!(
        EpicurusError::dimension_mismatch("x")
            .to_string()
            .contains("dimension mismatch:")
    );
    assert!(
        EpicurusError::division_by_zero("x")
            .to_string()
            .contains("division by zero:")
    );
    assert!(
        EpicurusError::not_found("x")
            .to_string()
            .contains("not found:")
    );
    assert!(
        EpicurusError::duplicate_name("x")
            .to_string()
            .contains("duplicate name:")
    );
    assert!(
        EpicurusError::invalid_parameter("x")
            .to_string()
            .contains("invalid parameter:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = EpicurusError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
