use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        PhantomError::malformed("x")
            .to_string()
            .contains("malformed document:")
    );
    assert!(
        PhantomError::unsupported("x")
            .to_string()
            .contains("unsupported input:")
    );
    assert!(
        PhantomError::empty("x")
            .to_string()
            .contains("empty input:")
    );
    assert!(
        PhantomError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = PhantomError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
