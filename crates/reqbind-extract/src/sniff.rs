//! Content type detection for uploaded files.
//!
//! Implements the WHATWG MIME sniffing algorithm over the first 512 bytes of
//! a payload. The declared `Content-Type` of a multipart part is client
//! controlled, so uploads are classified by their bytes instead.

/// Number of leading bytes considered when sniffing.
pub const SNIFF_LEN: usize = 512;

/// Returned when nothing more specific matches.
pub const OCTET_STREAM: &str = "application/octet-stream";

const TEXT_UTF8: &str = "text/plain; charset=utf-8";
const HTML_UTF8: &str = "text/html; charset=utf-8";

enum Signature {
    /// Case-insensitive HTML tag followed by a space or `>`, after whitespace.
    Html(&'static [u8]),
    /// `data & mask == pattern` over the pattern's length.
    Masked {
        mask: &'static [u8],
        pattern: &'static [u8],
        skip_whitespace: bool,
        content_type: &'static str,
    },
    Exact(&'static [u8], &'static str),
    Mp4,
    Text,
}

/// Embedded OpenType: a 34-byte header of any content, then `LP`.
const EOT_MASK: &[u8] = &{
    let mut mask = [0u8; 36];
    mask[34] = 0xFF;
    mask[35] = 0xFF;
    mask
};
const EOT_PATTERN: &[u8] = &{
    let mut pattern = [0u8; 36];
    pattern[34] = b'L';
    pattern[35] = b'P';
    pattern
};

const SIGNATURES: &[Signature] = &[
    Signature::Html(b"<!DOCTYPE HTML"),
    Signature::Html(b"<HTML"),
    Signature::Html(b"<HEAD"),
    Signature::Html(b"<SCRIPT"),
    Signature::Html(b"<IFRAME"),
    Signature::Html(b"<H1"),
    Signature::Html(b"<DIV"),
    Signature::Html(b"<FONT"),
    Signature::Html(b"<TABLE"),
    Signature::Html(b"<A"),
    Signature::Html(b"<STYLE"),
    Signature::Html(b"<TITLE"),
    Signature::Html(b"<B"),
    Signature::Html(b"<BODY"),
    Signature::Html(b"<BR"),
    Signature::Html(b"<P"),
    Signature::Html(b"<!--"),
    Signature::Masked {
        mask: b"\xFF\xFF\xFF\xFF\xFF",
        pattern: b"<?xml",
        skip_whitespace: true,
        content_type: "text/xml; charset=utf-8",
    },
    Signature::Exact(b"%PDF-", "application/pdf"),
    Signature::Exact(b"%!PS-Adobe-", "application/postscript"),
    // byte order marks
    Signature::Masked {
        mask: b"\xFF\xFF\x00\x00",
        pattern: b"\xFE\xFF\x00\x00",
        skip_whitespace: false,
        content_type: "text/plain; charset=utf-16be",
    },
    Signature::Masked {
        mask: b"\xFF\xFF\x00\x00",
        pattern: b"\xFF\xFE\x00\x00",
        skip_whitespace: false,
        content_type: "text/plain; charset=utf-16le",
    },
    Signature::Masked {
        mask: b"\xFF\xFF\xFF\x00",
        pattern: b"\xEF\xBB\xBF\x00",
        skip_whitespace: false,
        content_type: TEXT_UTF8,
    },
    // images
    Signature::Exact(b"\x00\x00\x01\x00", "image/x-icon"),
    Signature::Exact(b"\x00\x00\x02\x00", "image/x-icon"),
    Signature::Exact(b"BM", "image/bmp"),
    Signature::Exact(b"GIF87a", "image/gif"),
    Signature::Exact(b"GIF89a", "image/gif"),
    Signature::Masked {
        mask: b"\xFF\xFF\xFF\xFF\x00\x00\x00\x00\xFF\xFF\xFF\xFF\xFF\xFF",
        pattern: b"RIFF\x00\x00\x00\x00WEBPVP",
        skip_whitespace: false,
        content_type: "image/webp",
    },
    Signature::Exact(b"\x89PNG\x0D\x0A\x1A\x0A", "image/png"),
    Signature::Exact(b"\xFF\xD8\xFF", "image/jpeg"),
    // audio and video
    Signature::Masked {
        mask: b"\xFF\xFF\xFF\xFF\x00\x00\x00\x00\xFF\xFF\xFF\xFF",
        pattern: b"FORM\x00\x00\x00\x00AIFF",
        skip_whitespace: false,
        content_type: "audio/aiff",
    },
    Signature::Masked {
        mask: b"\xFF\xFF\xFF",
        pattern: b"ID3",
        skip_whitespace: false,
        content_type: "audio/mpeg",
    },
    Signature::Masked {
        mask: b"\xFF\xFF\xFF\xFF\xFF",
        pattern: b"OggS\x00",
        skip_whitespace: false,
        content_type: "application/ogg",
    },
    Signature::Masked {
        mask: b"\xFF\xFF\xFF\xFF\xFF\xFF\xFF\xFF",
        pattern: b"MThd\x00\x00\x00\x06",
        skip_whitespace: false,
        content_type: "audio/midi",
    },
    Signature::Masked {
        mask: b"\xFF\xFF\xFF\xFF\x00\x00\x00\x00\xFF\xFF\xFF\xFF",
        pattern: b"RIFF\x00\x00\x00\x00AVI ",
        skip_whitespace: false,
        content_type: "video/avi",
    },
    Signature::Masked {
        mask: b"\xFF\xFF\xFF\xFF\x00\x00\x00\x00\xFF\xFF\xFF\xFF",
        pattern: b"RIFF\x00\x00\x00\x00WAVE",
        skip_whitespace: false,
        content_type: "audio/wave",
    },
    Signature::Mp4,
    Signature::Exact(b"\x1A\x45\xDF\xA3", "video/webm"),
    // fonts
    Signature::Masked {
        mask: EOT_MASK,
        pattern: EOT_PATTERN,
        skip_whitespace: false,
        content_type: "application/vnd.ms-fontobject",
    },
    Signature::Exact(b"\x00\x01\x00\x00", "font/ttf"),
    Signature::Exact(b"OTTO", "font/otf"),
    Signature::Exact(b"ttcf", "font/collection"),
    Signature::Exact(b"wOFF", "font/woff"),
    Signature::Exact(b"wOF2", "font/woff2"),
    // archives
    Signature::Exact(b"\x1F\x8B\x08", "application/x-gzip"),
    Signature::Exact(b"PK\x03\x04", "application/zip"),
    Signature::Exact(b"Rar!\x1A\x07\x00", "application/x-rar-compressed"),
    Signature::Exact(b"Rar!\x1A\x07\x01\x00", "application/x-rar-compressed"),
    Signature::Exact(b"\x00\x61\x73\x6D", "application/wasm"),
    Signature::Text,
];

/// Detects the content type of `data`.
///
/// Always returns a valid MIME type, falling back to
/// `application/octet-stream`. Empty input is plain text.
///
/// # Example
///
/// ```rust
/// use reqbind_extract::sniff::detect_content_type;
///
/// assert_eq!(detect_content_type(b"GIF89a..."), "image/gif");
/// assert_eq!(detect_content_type(b"hello"), "text/plain; charset=utf-8");
/// assert_eq!(detect_content_type(b"\x00\x01\x02"), "application/octet-stream");
/// ```
#[must_use]
pub fn detect_content_type(data: &[u8]) -> &'static str {
    let data = &data[..data.len().min(SNIFF_LEN)];
    let first_non_ws = data
        .iter()
        .position(|b| !is_whitespace(*b))
        .unwrap_or(data.len());

    SIGNATURES
        .iter()
        .find_map(|sig| sig.matches(data, first_non_ws))
        .unwrap_or(OCTET_STREAM)
}

impl Signature {
    fn matches(&self, data: &[u8], first_non_ws: usize) -> Option<&'static str> {
        match self {
            Self::Html(tag) => matches_html(tag, &data[first_non_ws..]).then_some(HTML_UTF8),
            Self::Masked {
                mask,
                pattern,
                skip_whitespace,
                content_type,
            } => {
                let data = if *skip_whitespace {
                    &data[first_non_ws..]
                } else {
                    data
                };
                (data.len() >= pattern.len()
                    && data
                        .iter()
                        .zip(mask.iter().zip(pattern.iter()))
                        .all(|(d, (m, p))| d & m == *p))
                .then_some(*content_type)
            }
            Self::Exact(sig, content_type) => data.starts_with(sig).then_some(*content_type),
            Self::Mp4 => matches_mp4(data).then_some("video/mp4"),
            Self::Text => (!data.iter().copied().any(is_binary)).then_some(TEXT_UTF8),
        }
    }
}

fn matches_html(tag: &[u8], data: &[u8]) -> bool {
    if data.len() < tag.len() + 1 {
        return false;
    }
    let same = tag
        .iter()
        .zip(data)
        .all(|(t, d)| if t.is_ascii_uppercase() { *t == d & 0xDF } else { t == d });
    same && matches!(data[tag.len()], b' ' | b'>')
}

fn matches_mp4(data: &[u8]) -> bool {
    if data.len() < 12 {
        return false;
    }
    let box_size = u32::from_be_bytes([data[0], data[1], data[2], data[3]]) as usize;
    if data.len() < box_size || box_size % 4 != 0 || &data[4..8] != b"ftyp" {
        return false;
    }
    // brand at 8, minor version at 12, compatible brands after
    (8..box_size)
        .step_by(4)
        .filter(|st| *st != 12)
        .any(|st| data.get(st..st + 3) == Some(b"mp4".as_slice()))
}

fn is_whitespace(b: u8) -> bool {
    matches!(b, b'\t' | b'\n' | 0x0C | b'\r' | b' ')
}

fn is_binary(b: u8) -> bool {
    matches!(b, 0x00..=0x08 | 0x0B | 0x0E..=0x1A | 0x1C..=0x1F)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_is_text() {
        assert_eq!(detect_content_type(b""), TEXT_UTF8);
    }

    #[test]
    fn test_html_detection() {
        assert_eq!(detect_content_type(b"<!DOCTYPE html><html>"), HTML_UTF8);
        assert_eq!(detect_content_type(b"  \n<html>"), HTML_UTF8);
        assert_eq!(detect_content_type(b"<p class=x>hi</p>"), HTML_UTF8);
        assert_eq!(detect_content_type(b"<!-- c -->"), HTML_UTF8);
    }

    #[test]
    fn test_html_tag_needs_terminator() {
        // "<pre" is not "<p" followed by a terminator
        assert_eq!(detect_content_type(b"<pre>"), TEXT_UTF8);
        assert_eq!(detect_content_type(b"<html"), TEXT_UTF8);
    }

    #[test]
    fn test_xml_detection() {
        assert_eq!(
            detect_content_type(b"\n<?xml version=\"1.0\"?><a/>"),
            "text/xml; charset=utf-8"
        );
    }

    #[test]
    fn test_document_formats() {
        assert_eq!(detect_content_type(b"%PDF-1.4\n"), "application/pdf");
        assert_eq!(detect_content_type(b"%!PS-Adobe-3.0"), "application/postscript");
    }

    #[test]
    fn test_byte_order_marks() {
        assert_eq!(detect_content_type(b"\xFE\xFF\x00h"), "text/plain; charset=utf-16be");
        assert_eq!(detect_content_type(b"\xFF\xFEh\x00"), "text/plain; charset=utf-16le");
        assert_eq!(detect_content_type(b"\xEF\xBB\xBFhello"), TEXT_UTF8);
    }

    #[test]
    fn test_images() {
        assert_eq!(detect_content_type(b"\x89PNG\r\n\x1a\n\x00\x00"), "image/png");
        assert_eq!(detect_content_type(b"\xFF\xD8\xFF\xE0"), "image/jpeg");
        assert_eq!(detect_content_type(b"GIF87a"), "image/gif");
        assert_eq!(detect_content_type(b"BM\x00\x00"), "image/bmp");
        assert_eq!(detect_content_type(b"RIFF\x10\x00\x00\x00WEBPVP8 "), "image/webp");
        assert_eq!(detect_content_type(b"\x00\x00\x01\x00\x01\x00"), "image/x-icon");
    }

    #[test]
    fn test_audio_video() {
        assert_eq!(detect_content_type(b"ID3\x04\x00"), "audio/mpeg");
        assert_eq!(detect_content_type(b"OggS\x00\x02"), "application/ogg");
        assert_eq!(detect_content_type(b"RIFF\x24\x00\x00\x00WAVEfmt "), "audio/wave");
        assert_eq!(detect_content_type(b"RIFF\x24\x00\x00\x00AVI LIST"), "video/avi");
        assert_eq!(detect_content_type(b"\x1A\x45\xDF\xA3\x01"), "video/webm");
    }

    #[test]
    fn test_mp4() {
        let data = b"\x00\x00\x00\x18ftypisom\x00\x00\x02\x00mp41isom";
        assert_eq!(detect_content_type(data), "video/mp4");

        let not_mp4 = b"\x00\x00\x00\x18ftypqt  \x00\x00\x02\x00qt  qt  ";
        assert_ne!(detect_content_type(not_mp4), "video/mp4");
    }

    #[test]
    fn test_archives_and_fonts() {
        assert_eq!(detect_content_type(b"PK\x03\x04\x14\x00"), "application/zip");
        assert_eq!(detect_content_type(b"\x1F\x8B\x08\x00"), "application/x-gzip");
        assert_eq!(detect_content_type(b"Rar!\x1A\x07\x00"), "application/x-rar-compressed");
        assert_eq!(detect_content_type(b"\x00asm\x01\x00\x00\x00"), "application/wasm");
        assert_eq!(detect_content_type(b"wOF2\x00\x01"), "font/woff2");

        let mut eot = vec![0x5Au8; 34];
        eot.extend_from_slice(b"LP\x00\x00");
        assert_eq!(detect_content_type(&eot), "application/vnd.ms-fontobject");
    }

    #[test]
    fn test_binary_falls_back_to_octet_stream() {
        assert_eq!(detect_content_type(&[0x00, 0x10, 0xFF]), OCTET_STREAM);
    }

    #[test]
    fn test_only_leading_bytes_considered() {
        let mut data = vec![b'a'; SNIFF_LEN];
        data.push(0x00);
        assert_eq!(detect_content_type(&data), TEXT_UTF8);
    }
}
