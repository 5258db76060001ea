use reqwest::Url;

use crate::foundation::error::{MemeError, MemeResult};

/// Text posted alongside shared links.
pub const SHARE_TEXT: &str = "Check out this meme I made with the AI Meme Generator! #AIMeme";

/// Canonical URL promoted by shared links.
pub const SHARE_URL: &str = "https://studio.google.com/ai/app/project/gemini-pro-template";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SharePlatform {
    Twitter,
    Facebook,
    Reddit,
}

impl SharePlatform {
    pub const ALL: [SharePlatform; 3] = [Self::Twitter, Self::Facebook, Self::Reddit];

    pub fn label(self) -> &'static str {
        match self {
            Self::Twitter => "Twitter",
            Self::Facebook => "Facebook",
            Self::Reddit => "Reddit",
        }
    }
}

/// Build the share link for `platform` with the given text and canonical URL.
pub fn share_link(platform: SharePlatform, text: &str, url: &str) -> MemeResult<Url> {
    let (base, params): (&str, [(&str, &str); 2]) = match platform {
        SharePlatform::Twitter => (
            "https://twitter.com/intent/tweet",
            [("text", text), ("url", url)],
        ),
        SharePlatform::Facebook => (
            "https://www.facebook.com/sharer/sharer.php",
            [("u", url), ("quote", text)],
        ),
        SharePlatform::Reddit => (
            "https://www.reddit.com/submit",
            [("url", url), ("title", text)],
        ),
    };
    Url::parse_with_params(base, params)
        .map_err(|e| MemeError::validation(format!("build share link: {e}")))
}

/// Links for every platform using the default share text and URL.
pub fn default_share_links() -> MemeResult<Vec<(SharePlatform, Url)>> {
    SharePlatform::ALL
        .iter()
        .map(|&p| Ok((p, share_link(p, SHARE_TEXT, SHARE_URL)?)))
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/export/share.rs"]
mod tests;
