use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        DrawError::geometry("x")
            .to_string()
            .contains("malformed geometry:")
    );
    assert!(
        DrawError::markup("x")
            .to_string()
            .contains("malformed markup:")
    );
    assert!(
        DrawError::config("x")
            .to_string()
            .contains("configuration error:")
    );
    assert!(
        DrawError::exhausted("x")
            .to_string()
            .contains("resource exhausted:")
    );
    assert!(DrawError::StaleBuffer(3).to_string().contains("3 pending"));
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = DrawError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
