use super::*;

fn tiny_png() -> ImageAsset {
    ImageAsset::from_rgba(image::RgbaImage::from_pixel(
        2,
        2,
        image::Rgba([10, 20, 30, 255]),
    ))
    .unwrap()
}

#[test]
fn caption_request_serializes_in_wire_shape() {
    let img = tiny_png();
    let req = GenerateContentRequest::single_turn(vec![Part::image(&img), Part::text("go")])
        .with_config(GenerationConfig::caption_list());
    let v = serde_json::to_value(&req).unwrap();

    let parts = &v["contents"][0]["parts"];
    assert_eq!(parts[0]["inlineData"]["mimeType"], "image/png");
    assert_eq!(parts[0]["inlineData"]["data"], img.to_base64());
    assert!(parts[0].get("text").is_none());
    assert_eq!(parts[1]["text"], "go");
    assert!(v["contents"][0].get("role").is_none());

    let cfg = &v["generationConfig"];
    assert_eq!(cfg["responseMimeType"], "application/json");
    assert_eq!(
        cfg["responseSchema"]["properties"]["captions"]["items"]["type"],
        "STRING"
    );
    assert!(cfg.get("responseModalities").is_none());
}

#[test]
fn image_request_carries_modalities_and_aspect_ratio() {
    let req = GenerateContentRequest::single_turn(vec![Part::text("a cat")]).with_config(
        GenerationConfig {
            image_config: Some(ImageConfig {
                aspect_ratio: "16:9".to_string(),
            }),
            ..GenerationConfig::image_output()
        },
    );
    let v = serde_json::to_value(&req).unwrap();
    assert_eq!(v["generationConfig"]["responseModalities"][0], "IMAGE");
    assert_eq!(v["generationConfig"]["imageConfig"]["aspectRatio"], "16:9");
}

#[test]
fn captions_parse_from_first_candidate_text() {
    let resp: GenerateContentResponse = serde_json::from_str(
        r#"{"candidates":[{"content":{"parts":[{"text":"{\"captions\":[\"a\",\"b\"]}"}]}}]}"#,
    )
    .unwrap();
    assert_eq!(
        resp.into_captions().unwrap(),
        vec![Caption::new("a"), Caption::new("b")]
    );
}

#[test]
fn missing_captions_field_is_empty_not_error() {
    assert!(parse_caption_list("{}").unwrap().is_empty());
    assert!(parse_caption_list(r#"{"other": 1}"#).unwrap().is_empty());
}

#[test]
fn malformed_caption_text_is_parse_error() {
    for bad in ["", "not json", r#"{"captions": "nope"}"#] {
        assert!(matches!(
            parse_caption_list(bad),
            Err(ServiceError::Parse(_))
        ));
    }
}

#[test]
fn image_is_taken_from_first_inline_part() {
    let img = tiny_png();
    let body = serde_json::json!({
        "candidates": [{ "content": { "parts": [
            { "text": "here you go" },
            { "inlineData": { "mimeType": "image/png", "data": img.to_base64() } }
        ]}}]
    });
    let resp: GenerateContentResponse = serde_json::from_value(body).unwrap();
    let out = resp.into_image().unwrap();
    assert_eq!((out.width(), out.height()), (2, 2));
    assert_eq!(out.pixels().get_pixel(1, 1).0, [10, 20, 30, 255]);
}

#[test]
fn text_only_or_empty_response_produces_no_image() {
    let text_only: GenerateContentResponse = serde_json::from_str(
        r#"{"candidates":[{"content":{"parts":[{"text":"sorry"}]}}]}"#,
    )
    .unwrap();
    assert!(matches!(
        text_only.into_image(),
        Err(ServiceError::NoImageProduced)
    ));

    let empty: GenerateContentResponse = serde_json::from_str("{}").unwrap();
    assert!(matches!(
        empty.into_image(),
        Err(ServiceError::NoImageProduced)
    ));
}

#[test]
fn description_is_trimmed_and_required() {
    let resp: GenerateContentResponse = serde_json::from_str(
        r#"{"candidates":[{"content":{"parts":[{"text":"  A dog. "},{"text":"On a couch."}]}}]}"#,
    )
    .unwrap();
    assert_eq!(resp.into_description().unwrap(), "A dog. On a couch.");

    let blank: GenerateContentResponse =
        serde_json::from_str(r#"{"candidates":[{"content":{"parts":[]}}]}"#).unwrap();
    assert!(matches!(
        blank.into_description(),
        Err(ServiceError::Parse(_))
    ));
}
