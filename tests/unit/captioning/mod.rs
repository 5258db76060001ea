use super::*;

#[test]
fn aspect_ratio_parses_supported_values() {
    for ratio in AspectRatio::ALL {
        assert_eq!(ratio.as_str().parse::<AspectRatio>().unwrap(), ratio);
    }
    assert_eq!(" 16:9 ".parse::<AspectRatio>().unwrap(), AspectRatio::Landscape);
    assert_eq!(AspectRatio::default(), AspectRatio::Square);
}

#[test]
fn aspect_ratio_rejects_unknown_values() {
    for bad in ["2:1", "", "square", "16x9"] {
        let err = bad.parse::<AspectRatio>().unwrap_err();
        assert!(matches!(err, MemeError::Validation(_)), "{bad}: {err}");
    }
}

#[test]
fn aspect_ratio_serializes_as_ratio_string() {
    assert_eq!(
        serde_json::to_string(&AspectRatio::StandardPortrait).unwrap(),
        "\"3:4\""
    );
    let r: AspectRatio = serde_json::from_str("\"9:16\"").unwrap();
    assert_eq!(r, AspectRatio::Portrait);
    assert_eq!(r.to_string(), "9:16");
}
