use super::*;

#[test]
fn color_serializes_as_lowercase_hex() {
    let c = Rgb8::new(0x1a, 0x3a, 0x5a);
    assert_eq!(c.to_string(), "#1a3a5a");
    let json = serde_json::to_string(&AttrValue::Color(c)).unwrap();
    assert_eq!(json, "\"#1a3a5a\"");
    assert_eq!(Rgb8::new(255, 0x6b, 0x6b).to_string(), "#ff6b6b");
}

#[test]
fn attr_value_accessors_are_kind_checked() {
    let n = AttrValue::from(0.5);
    assert_eq!(n.as_number(), Some(0.5));
    assert_eq!(n.as_text(), None);

    let t = AttrValue::from("0 RPM");
    assert_eq!(t.as_text(), Some("0 RPM"));
    assert_eq!(t.as_color(), None);

    let a = AttrValue::from(Affine::IDENTITY);
    assert_eq!(a.as_transform(), Some(Affine::IDENTITY));
}

#[test]
fn era_key_is_transparent_in_json() {
    let key = EraKey::from("cloud");
    assert_eq!(serde_json::to_string(&key).unwrap(), "\"cloud\"");
    assert_eq!(key.to_string(), "cloud");
}
