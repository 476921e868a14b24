//! Converters turning reconstructed payload bytes into presentable forms.

use base64::Engine;

/// A payload prepared for presentation by a registered handler.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderedPayload {
    /// A parsed JSON document.
    Json(serde_json::Value),
    /// An image as a browser-ready data URI.
    Image {
        mime: &'static str,
        data_uri: String,
    },
    /// A command transcript: full text plus its individual lines.
    Transcript { text: String, lines: Vec<String> },
    /// A plain text decode, also the fallback for payloads that fail a
    /// richer conversion.
    Text(String),
}

impl RenderedPayload {
    /// One-line description suitable for log output.
    pub fn summary(&self) -> String {
        match self {
            RenderedPayload::Json(value) => match value.as_object() {
                Some(map) => format!("JSON document with {} top-level keys", map.len()),
                None => "JSON document".to_string(),
            },
            RenderedPayload::Image { mime, data_uri } => {
                format!("{} image, {} data URI characters", mime, data_uri.len())
            }
            RenderedPayload::Transcript { lines, .. } => {
                format!("command transcript, {} lines", lines.len())
            }
            RenderedPayload::Text(text) => format!("text, {} characters", text.len()),
        }
    }
}

/// Parse configuration bytes as JSON, falling back to their text form when
/// the document does not parse.
pub(crate) fn config_payload(raw_bytes: &[u8]) -> RenderedPayload {
    let text = String::from_utf8_lossy(raw_bytes).into_owned();
    match serde_json::from_str::<serde_json::Value>(&text) {
        Ok(value) => RenderedPayload::Json(value),
        Err(err) => {
            log::warn!("Config payload is not valid JSON: {}", err);
            RenderedPayload::Text(text)
        }
    }
}

/// Wrap image bytes in a data URI, sniffing the container for its MIME type.
pub(crate) fn image_payload(raw_bytes: &[u8]) -> RenderedPayload {
    let mime = sniff_image_mime(raw_bytes);
    let data_uri = format!(
        "data:{};base64,{}",
        mime,
        base64::prelude::BASE64_STANDARD.encode(raw_bytes)
    );
    RenderedPayload::Image { mime, data_uri }
}

/// Split a command transcript into text plus lines.
pub(crate) fn command_payload(raw_bytes: &[u8]) -> RenderedPayload {
    let text = String::from_utf8_lossy(raw_bytes).into_owned();
    let lines = text.lines().map(str::to_string).collect();
    RenderedPayload::Transcript { text, lines }
}

/// Lossy text decode for generic payloads.
pub(crate) fn text_payload(raw_bytes: &[u8]) -> RenderedPayload {
    RenderedPayload::Text(String::from_utf8_lossy(raw_bytes).into_owned())
}

/// Detect an image container from its magic bytes.
///
/// JPEG is the fallback for unrecognized containers.
pub fn sniff_image_mime(raw_bytes: &[u8]) -> &'static str {
    if raw_bytes.starts_with(b"\x89PNG\r\n\x1a\n") {
        "image/png"
    } else if raw_bytes.starts_with(b"\xff\xd8\xff") {
        "image/jpeg"
    } else if raw_bytes.starts_with(b"GIF87a") || raw_bytes.starts_with(b"GIF89a") {
        "image/gif"
    } else if raw_bytes.starts_with(b"BM") {
        "image/bmp"
    } else {
        "image/jpeg"
    }
}

/// File extension for a sniffed image MIME type.
pub fn image_extension(mime: &str) -> &'static str {
    match mime {
        "image/png" => "png",
        "image/gif" => "gif",
        "image/bmp" => "bmp",
        _ => "jpg",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_config_parses_to_json() {
        let rendered = config_payload(b"{\"server\":{\"port\":8080}}");
        match rendered {
            RenderedPayload::Json(value) => {
                assert_eq!(value["server"]["port"], 8080);
            }
            other => panic!("expected JSON, got {:?}", other),
        }
    }

    #[test]
    fn invalid_config_falls_back_to_text() {
        let rendered = config_payload(b"port = 8080");
        assert_eq!(rendered, RenderedPayload::Text("port = 8080".to_string()));
    }

    #[test]
    fn image_payload_builds_a_data_uri() {
        let rendered = image_payload(b"\xff\xd8\xff\xe0rest-of-jpeg");
        match rendered {
            RenderedPayload::Image { mime, data_uri } => {
                assert_eq!(mime, "image/jpeg");
                assert!(data_uri.starts_with("data:image/jpeg;base64,"));
            }
            other => panic!("expected image, got {:?}", other),
        }
    }

    #[test]
    fn command_payload_splits_lines() {
        let rendered = command_payload(b"$ uptime\n 10:46:03 up 2 days\n");
        match rendered {
            RenderedPayload::Transcript { text, lines } => {
                assert!(text.starts_with("$ uptime"));
                assert_eq!(lines.len(), 2);
            }
            other => panic!("expected transcript, got {:?}", other),
        }
    }

    #[test]
    fn sniffs_common_image_containers() {
        assert_eq!(sniff_image_mime(b"\x89PNG\r\n\x1a\n"), "image/png");
        assert_eq!(sniff_image_mime(b"\xff\xd8\xff\xdb"), "image/jpeg");
        assert_eq!(sniff_image_mime(b"GIF89a"), "image/gif");
        assert_eq!(sniff_image_mime(b"BM\x36\x00"), "image/bmp");
        assert_eq!(sniff_image_mime(b"plain bytes"), "image/jpeg");
        assert_eq!(sniff_image_mime(b""), "image/jpeg");
    }

    #[test]
    fn summaries_are_single_lines() {
        let rendered = command_payload(b"a\nb\nc");
        assert_eq!(rendered.summary(), "command transcript, 3 lines");
        assert!(!text_payload(b"x\ny").summary().contains('\n'));
    }
}
