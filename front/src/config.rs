use {gloo::console::log, web_sys::Element};

const DEFAULT_UPLOAD_URL: &str = "/upload";

/// One expiring download link, as rendered by the server template.
#[derive(Clone, Debug, PartialEq, serde::Deserialize)]
pub struct DownloadRow {
    pub name: String,
    pub url: String,
    #[serde(default)]
    pub minutes: Option<u32>,
}

/// Everything the server template hands over through the mount element's
/// data attributes. Read once at startup.
#[derive(Clone, Debug, PartialEq, yew::Properties)]
pub struct PageConfig {
    pub upload_url: String,
    pub original_width: Option<u32>,
    pub original_height: Option<u32>,
    pub uploaded_name: Option<String>,
    pub downloads: Vec<DownloadRow>,
}

impl PageConfig {
    pub fn read(root: Option<&Element>) -> Self {
        let attr = |name: &str| root.and_then(|element| element.get_attribute(name));

        Self {
            upload_url: attr("data-upload-url")
                .unwrap_or_else(|| String::from(DEFAULT_UPLOAD_URL)),
            original_width: dimension(attr("data-original-width").as_deref()),
            original_height: dimension(attr("data-original-height").as_deref()),
            uploaded_name: attr("data-uploaded-name").filter(|name| !name.is_empty()),
            downloads: attr("data-downloads")
                .map(|raw| match downloads(&raw) {
                    Ok(rows) => rows,
                    Err(why) => {
                        log!(format!("Could not parse the download list: {why}"));
                        Vec::new()
                    }
                })
                .unwrap_or_default(),
        }
    }
}

/// Integers only, zero and garbage count as absent.
pub fn dimension(raw: Option<&str>) -> Option<u32> {
    raw.and_then(|raw| raw.trim().parse::<u32>().ok())
        .filter(|value| *value != 0)
}

pub fn downloads(raw: &str) -> Result<Vec<DownloadRow>, serde_json::Error> {
    serde_json::from_str(raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dimensions_must_be_nonzero_integers() {
        assert_eq!(dimension(Some("1280")), Some(1280));
        assert_eq!(dimension(Some(" 720 ")), Some(720));
        assert_eq!(dimension(Some("0")), None);
        assert_eq!(dimension(Some("12.5")), None);
        assert_eq!(dimension(Some("wide")), None);
        assert_eq!(dimension(None), None);
    }

    #[test]
    fn download_rows_parse_with_and_without_minutes() {
        let rows = downloads(
            r#"[
                {"name": "report.pdf", "url": "/dl/1", "minutes": 5},
                {"name": "photo.png", "url": "/dl/2"}
            ]"#,
        )
        .unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].minutes, Some(5));
        assert_eq!(rows[1].minutes, None);
    }

    #[test]
    fn a_broken_download_list_is_an_error() {
        assert!(downloads("not json").is_err());
        assert!(downloads(r#"{"name": "a"}"#).is_err());
    }
}
