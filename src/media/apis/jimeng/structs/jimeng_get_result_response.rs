use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct JimengGetResultData {
    pub status: Option<String>,
    #[serde(default)]
    pub image_urls: Option<Vec<String>>,
}

impl JimengGetResultData {
    pub fn first_image_url(&self) -> Option<&str> {
        self.image_urls
            .as_ref()
            .and_then(|urls| urls.iter().find(|url| !url.is_empty()))
            .map(String::as_str)
    }
}
