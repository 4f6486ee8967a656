#![forbid(unsafe_code)]

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Web {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub site: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub documentation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discord: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blog: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub playstore: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub appstore: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub webstore: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct WebLink {
    pub label: &'static str,
    pub url: String,
}

impl Web {
    /// Resolved outbound links in card order. Bare twitter handles and
    /// contact addresses are expanded into full URLs.
    pub fn links(&self) -> Vec<WebLink> {
        let mut links = Vec::new();
        let mut push = |label: &'static str, url: Option<String>| {
            if let Some(url) = url {
                links.push(WebLink { label, url });
            }
        };

        push("Website", present(&self.site).map(str::to_string));
        push("GitHub", present(&self.github).map(str::to_string));
        push("Docs", present(&self.documentation).map(str::to_string));
        push(
            "Twitter",
            present(&self.twitter).map(|v| expand_unless_url(v, "https://twitter.com/")),
        );
        push("Discord", present(&self.discord).map(str::to_string));
        push("Blog", present(&self.blog).map(str::to_string));
        push(
            "Contact",
            present(&self.contact).map(|v| expand_unless_url(v, "mailto:")),
        );
        push("Play Store", present(&self.playstore).map(str::to_string));
        push("App Store", present(&self.appstore).map(str::to_string));
        push("Web Store", present(&self.webstore).map(str::to_string));
        links
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn expand_unless_url(value: &str, prefix: &str) -> String {
    if value.starts_with("http") {
        value.to_string()
    } else {
        format!("{prefix}{value}")
    }
}
