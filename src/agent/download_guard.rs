// Reel Scout Download Guard
// Copyright (c) 2026 Xing_The_Creator | SYNOID
//
// Screens every image URL before fetch and every payload before it is
// written. Also owns the filename rules for the run folder.

use tracing::warn;
use url::Url;

/// Hard ceiling on a single image payload (50 MB).
pub const MAX_IMAGE_BYTES: u64 = 50 * 1024 * 1024;

/// Fallback when neither the content type nor the payload names a format.
pub const DEFAULT_EXTENSION: &str = "jpg";

pub struct DownloadGuard;

impl DownloadGuard {
    // -----------------------------------------------------------------------
    // URL Validation
    // -----------------------------------------------------------------------

    /// HTTPS everywhere, plain HTTP only for loopback hosts.
    pub fn validate_url(raw: &str) -> Result<Url, String> {
        let url = Url::parse(raw).map_err(|e| format!("Invalid URL '{}': {}", raw, e))?;

        match url.scheme() {
            "https" => {}
            "http" => {
                let loopback = matches!(url.host_str(), Some("localhost") | Some("127.0.0.1") | Some("[::1]"));
                if !loopback {
                    warn!("[GUARD] 🛡️ Blocked non-HTTPS URL: {}", raw);
                    return Err(format!("Unsafe protocol, only HTTPS allowed: {}", raw));
                }
            }
            other => {
                warn!("[GUARD] 🛡️ Blocked '{}' URL scheme: {}", other, raw);
                return Err(format!("Blocked URL scheme '{}'", other));
            }
        }

        if url.host_str().map(str::is_empty).unwrap_or(true) {
            return Err(format!("URL has no host: {}", raw));
        }

        Ok(url)
    }

    // -----------------------------------------------------------------------
    // Payload Validation
    // -----------------------------------------------------------------------

    /// Reject a body (declared or received so far) longer than `limit`.
    pub fn validate_size(len: u64, limit: u64) -> Result<(), String> {
        if len > limit {
            return Err(format!("Payload too large ({} bytes), limit is {} bytes", len, limit));
        }
        Ok(())
    }

    /// Reject empty, oversized, or executable payloads.
    pub fn validate_payload(bytes: &[u8]) -> Result<(), String> {
        if bytes.is_empty() {
            return Err("Empty response body".to_string());
        }
        Self::validate_size(bytes.len() as u64, MAX_IMAGE_BYTES)?;

        if bytes.len() >= 2 && bytes[0] == b'M' && bytes[1] == b'Z' {
            return Err("Payload contains Windows executable (MZ header)".to_string());
        }
        if bytes.len() >= 4 && bytes[0] == 0x7F && &bytes[1..4] == b"ELF" {
            return Err("Payload contains Linux executable (ELF header)".to_string());
        }
        if bytes.len() >= 2 && bytes[0] == b'#' && bytes[1] == b'!' {
            return Err("Payload contains script shebang (#!)".to_string());
        }

        Ok(())
    }

    // -----------------------------------------------------------------------
    // File Naming
    // -----------------------------------------------------------------------

    /// Extension for a response: Content-Type first, then magic bytes, then `jpg`.
    pub fn extension_for(content_type: Option<&str>, bytes: &[u8]) -> &'static str {
        content_type
            .and_then(extension_from_content_type)
            .or_else(|| sniff_extension(bytes))
            .unwrap_or(DEFAULT_EXTENSION)
    }

    /// Strip path traversal and characters that are unsafe in file names.
    pub fn sanitize_filename(name: &str) -> String {
        name.replace("..", "")
            .chars()
            .map(|c| match c {
                '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
                c if c.is_control() => '_',
                c => c,
            })
            .collect::<String>()
            .trim()
            .to_string()
    }

    /// `{NN}_{provider}_{id}.{ext}`
    pub fn file_name(index: usize, provider: &str, id: &str, ext: &str) -> String {
        format!(
            "{:02}_{}_{}.{}",
            index,
            provider,
            Self::sanitize_filename(id),
            ext
        )
    }
}

fn extension_from_content_type(content_type: &str) -> Option<&'static str> {
    let mime = content_type.split(';').next()?.trim().to_ascii_lowercase();
    let subtype = mime.strip_prefix("image/")?;
    match subtype {
        "jpeg" | "jpg" | "pjpeg" => Some("jpg"),
        "png" => Some("png"),
        "webp" => Some("webp"),
        "gif" => Some("gif"),
        "avif" => Some("avif"),
        "heic" | "heif" => Some("heic"),
        _ => None,
    }
}

fn sniff_extension(bytes: &[u8]) -> Option<&'static str> {
    if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
        Some("jpg")
    } else if bytes.starts_with(&[0x89, b'P', b'N', b'G']) {
        Some("png")
    } else if bytes.starts_with(b"GIF8") {
        Some("gif")
    } else if bytes.len() >= 12 && &bytes[0..4] == b"RIFF" && &bytes[8..12] == b"WEBP" {
        Some("webp")
    } else {
        None
    }
}
