//! 根据文件扩展名解析 Content-Type

use std::path::Path;

/// 未识别扩展名时的回退类型
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// 根据 key 的扩展名解析 Content-Type
pub fn content_type_for(path: &str) -> &'static str {
    let ext = Path::new(path)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    match ext.as_deref() {
        Some("html") | Some("htm") => "text/html",
        Some("css") => "text/css",
        Some("js") | Some("mjs") => "text/javascript",
        Some("json") => "application/json",
        Some("txt") => "text/plain",
        Some("md") => "text/markdown",
        Some("xml") => "application/xml",
        Some("csv") => "text/csv",
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("svg") => "image/svg+xml",
        Some("webp") => "image/webp",
        Some("ico") => "image/x-icon",
        Some("woff") => "font/woff",
        Some("woff2") => "font/woff2",
        Some("ttf") => "font/ttf",
        Some("pdf") => "application/pdf",
        Some("zip") => "application/zip",
        Some("gz") => "application/gzip",
        Some("wasm") => "application/wasm",
        Some("mp4") => "video/mp4",
        Some("mp3") => "audio/mpeg",
        _ => DEFAULT_CONTENT_TYPE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_extensions() {
        assert_eq!(content_type_for("index.html"), "text/html");
        assert_eq!(content_type_for("data/config.json"), "application/json");
        assert_eq!(content_type_for("logo.PNG"), "image/png");
    }

    #[test]
    fn test_unknown_extension_falls_back() {
        assert_eq!(content_type_for("archive.xyz"), DEFAULT_CONTENT_TYPE);
        assert_eq!(content_type_for("no_extension"), DEFAULT_CONTENT_TYPE);
    }
}
