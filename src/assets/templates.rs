use crate::{
    assets::decode::ImageAsset,
    foundation::error::{MemeError, MemeResult},
};

/// A stock image users can start a meme from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct MemeTemplate {
    pub id: &'static str,
    pub name: &'static str,
    pub url: &'static str,
}

/// Built-in templates, in display order.
pub const MEME_TEMPLATES: [MemeTemplate; 8] = [
    MemeTemplate {
        id: "1",
        name: "Distracted Boyfriend",
        url: "https://picsum.photos/seed/meme1/500/300",
    },
    MemeTemplate {
        id: "2",
        name: "Doge",
        url: "https://picsum.photos/seed/meme2/500/300",
    },
    MemeTemplate {
        id: "3",
        name: "Woman Yelling at Cat",
        url: "https://picsum.photos/seed/meme3/500/300",
    },
    MemeTemplate {
        id: "4",
        name: "Surprised Pikachu",
        url: "https://picsum.photos/seed/meme4/500/300",
    },
    MemeTemplate {
        id: "5",
        name: "Is This a Pigeon?",
        url: "https://picsum.photos/seed/meme5/500/300",
    },
    MemeTemplate {
        id: "6",
        name: "Expanding Brain",
        url: "https://picsum.photos/seed/meme6/500/300",
    },
    MemeTemplate {
        id: "7",
        name: "Change My Mind",
        url: "https://picsum.photos/seed/meme7/500/300",
    },
    MemeTemplate {
        id: "8",
        name: "Success Kid",
        url: "https://picsum.photos/seed/meme8/500/300",
    },
];

/// Look up a template by id, or by name ignoring ASCII case.
pub fn find_template(key: &str) -> Option<&'static MemeTemplate> {
    MEME_TEMPLATES
        .iter()
        .find(|t| t.id == key || t.name.eq_ignore_ascii_case(key))
}

/// Download `template` and decode it.
///
/// The mime type comes from the response `Content-Type` when present and is sniffed from the
/// bytes otherwise. Every failure is reported as an input error.
#[tracing::instrument(skip(client, template), fields(template = template.name))]
pub async fn fetch_template(
    client: &reqwest::Client,
    template: &MemeTemplate,
) -> MemeResult<ImageAsset> {
    fetch_image_url(client, template.url).await.map_err(|e| {
        tracing::warn!(error = %e, "template fetch failed");
        MemeError::input(format!("failed to load template image '{}'", template.name))
    })
}

pub(crate) async fn fetch_image_url(client: &reqwest::Client, url: &str) -> MemeResult<ImageAsset> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| MemeError::input(format!("fetch '{url}': {e}")))?;
    if !response.status().is_success() {
        return Err(MemeError::input(format!(
            "fetch '{url}': HTTP {}",
            response.status().as_u16()
        )));
    }

    let mime = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.split(';').next().unwrap_or(v).trim().to_string())
        .filter(|v| v.starts_with("image/"));
    let bytes = response
        .bytes()
        .await
        .map_err(|e| MemeError::input(format!("read body of '{url}': {e}")))?
        .to_vec();

    match mime {
        Some(mime) => ImageAsset::from_bytes_with_mime(bytes, mime),
        None => ImageAsset::from_bytes(bytes),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/templates.rs"]
mod tests;
