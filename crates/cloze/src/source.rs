// ABOUTME: Reads exported source pages from disk and decodes them to UTF-8 text.
// ABOUTME: Honours a BOM, then a <meta charset> declaration, then falls back to chardetng detection.

use std::fs;
use std::path::Path;

use encoding_rs::Encoding;
use once_cell::sync::Lazy;
use regex::bytes::Regex;

use crate::error::{ClozeError, Result};

/// Bytes inspected for a `<meta charset>` declaration.
const SNIFF_LEN: usize = 1024;

static META_CHARSET_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)<meta[^>]*?charset\s*=\s*["']?([A-Za-z0-9_.:\-]+)"#).unwrap()
});

/// Reads and decodes a source page.
pub fn read_source(path: &Path) -> Result<String> {
    let bytes = fs::read(path).map_err(|e| {
        ClozeError::io(
            path.display().to_string(),
            "read source",
            Some(anyhow::Error::new(e)),
        )
    })?;
    Ok(decode_source(&bytes))
}

/// Decodes page bytes to a String. The BOM, if any, is dropped.
pub fn decode_source(bytes: &[u8]) -> String {
    if let Some((encoding, bom_len)) = Encoding::for_bom(bytes) {
        let (decoded, _) = encoding.decode_without_bom_handling(&bytes[bom_len..]);
        return decoded.into_owned();
    }

    if let Some(encoding) = declared_charset(bytes) {
        let (decoded, _, _) = encoding.decode(bytes);
        return decoded.into_owned();
    }

    let mut detector = chardetng::EncodingDetector::new();
    detector.feed(bytes, true);
    let encoding = detector.guess(None, true);
    let (decoded, _, _) = encoding.decode(bytes);
    decoded.into_owned()
}

fn declared_charset(bytes: &[u8]) -> Option<&'static Encoding> {
    let head = &bytes[..bytes.len().min(SNIFF_LEN)];
    let label = META_CHARSET_RE.captures(head)?.get(1)?;
    Encoding::for_label(label.as_bytes())
}
