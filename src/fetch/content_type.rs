//! Content-Type header parsing and body decoding
//!
//! A missing or unknown charset decodes as UTF-8 rather than the Latin-1
//! default of HTTP/1.1; servers relying on that default are vanishingly rare.

use encoding_rs::Encoding;

/// Text encodings recognised in a `charset` parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextEncoding {
    Latin1,
    Latin2,
    Iso2022Jp,
    ShiftJis,
    Ascii,
    Utf8,
    Utf16,
    Utf16Be,
    Utf16Le,
    Utf32,
    Utf32Be,
    Utf32Le,
    Windows1250,
    Windows1251,
    Windows1252,
    Windows1253,
    Windows1254,
    MacRoman,
}

impl TextEncoding {
    /// Looks up a charset label, case-insensitively
    pub fn from_label(label: &str) -> Option<Self> {
        let encoding = match label.trim().to_ascii_lowercase().as_str() {
            "latin1" | "iso-8859-1" | "iso8859-1" => Self::Latin1,
            "latin2" | "iso-8859-2" | "iso8859-2" => Self::Latin2,
            "iso-2022-jp" => Self::Iso2022Jp,
            "shift_jis" | "shift-jis" | "sjis" => Self::ShiftJis,
            "ascii" | "us-ascii" => Self::Ascii,
            "utf-8" | "utf8" => Self::Utf8,
            "utf-16" => Self::Utf16,
            "utf-16be" => Self::Utf16Be,
            "utf-16le" => Self::Utf16Le,
            "utf-32" => Self::Utf32,
            "utf-32be" => Self::Utf32Be,
            "utf-32le" => Self::Utf32Le,
            "windows-1250" => Self::Windows1250,
            "windows-1251" => Self::Windows1251,
            "windows-1252" => Self::Windows1252,
            "windows-1253" => Self::Windows1253,
            "windows-1254" => Self::Windows1254,
            "mac-roman" | "macintosh" | "macroman" => Self::MacRoman,
            _ => return None,
        };
        Some(encoding)
    }

    /// Canonical name, used in error messages
    pub fn name(&self) -> &'static str {
        match self {
            Self::Latin1 => "iso-8859-1",
            Self::Latin2 => "iso-8859-2",
            Self::Iso2022Jp => "iso-2022-jp",
            Self::ShiftJis => "shift_jis",
            Self::Ascii => "us-ascii",
            Self::Utf8 => "utf-8",
            Self::Utf16 => "utf-16",
            Self::Utf16Be => "utf-16be",
            Self::Utf16Le => "utf-16le",
            Self::Utf32 => "utf-32",
            Self::Utf32Be => "utf-32be",
            Self::Utf32Le => "utf-32le",
            Self::Windows1250 => "windows-1250",
            Self::Windows1251 => "windows-1251",
            Self::Windows1252 => "windows-1252",
            Self::Windows1253 => "windows-1253",
            Self::Windows1254 => "windows-1254",
            Self::MacRoman => "macintosh",
        }
    }

    /// Decodes a body strictly; malformed input yields `None`
    pub fn decode(&self, bytes: &[u8]) -> Option<String> {
        match self {
            Self::Ascii => bytes
                .is_ascii()
                .then(|| String::from_utf8_lossy(bytes).into_owned()),
            Self::Utf8 => {
                let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
                String::from_utf8(bytes.to_vec()).ok()
            }
            Self::Utf16 => match bytes {
                [0xFF, 0xFE, rest @ ..] => decode_with(encoding_rs::UTF_16LE, rest),
                [0xFE, 0xFF, rest @ ..] => decode_with(encoding_rs::UTF_16BE, rest),
                _ => decode_with(encoding_rs::UTF_16BE, bytes),
            },
            Self::Utf32 => match bytes {
                [0xFF, 0xFE, 0x00, 0x00, rest @ ..] => decode_utf32(rest, false),
                [0x00, 0x00, 0xFE, 0xFF, rest @ ..] => decode_utf32(rest, true),
                _ => decode_utf32(bytes, true),
            },
            Self::Utf32Be => decode_utf32(bytes, true),
            Self::Utf32Le => decode_utf32(bytes, false),
            Self::Latin1 => decode_with(encoding_rs::WINDOWS_1252, bytes),
            Self::Latin2 => decode_with(encoding_rs::ISO_8859_2, bytes),
            Self::Iso2022Jp => decode_with(encoding_rs::ISO_2022_JP, bytes),
            Self::ShiftJis => decode_with(encoding_rs::SHIFT_JIS, bytes),
            Self::Utf16Be => decode_with(encoding_rs::UTF_16BE, bytes),
            Self::Utf16Le => decode_with(encoding_rs::UTF_16LE, bytes),
            Self::Windows1250 => decode_with(encoding_rs::WINDOWS_1250, bytes),
            Self::Windows1251 => decode_with(encoding_rs::WINDOWS_1251, bytes),
            Self::Windows1252 => decode_with(encoding_rs::WINDOWS_1252, bytes),
            Self::Windows1253 => decode_with(encoding_rs::WINDOWS_1253, bytes),
            Self::Windows1254 => decode_with(encoding_rs::WINDOWS_1254, bytes),
            Self::MacRoman => decode_with(encoding_rs::MACINTOSH, bytes),
        }
    }
}

fn decode_with(encoding: &'static Encoding, bytes: &[u8]) -> Option<String> {
    encoding
        .decode_without_bom_handling_and_without_replacement(bytes)
        .map(|text| text.into_owned())
}

fn decode_utf32(bytes: &[u8], big_endian: bool) -> Option<String> {
    if bytes.len() % 4 != 0 {
        return None;
    }

    bytes
        .chunks_exact(4)
        .map(|chunk| {
            let unit = [chunk[0], chunk[1], chunk[2], chunk[3]];
            let value = if big_endian {
                u32::from_be_bytes(unit)
            } else {
                u32::from_le_bytes(unit)
            };
            char::from_u32(value)
        })
        .collect()
}

/// A parsed Content-Type header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentType {
    /// Lowercased mime type, e.g. `text/html`
    pub mime_type: String,
    pub encoding: TextEncoding,
}

impl ContentType {
    /// True for mime types whose body is decoded as text
    ///
    /// Covers `text/*` plus JSON and XML under `application/`, including
    /// `+json`/`+xml` suffixed types such as `application/manifest+json`.
    /// Suffixed types of other families (`image/svg+xml`) stay binary.
    pub fn is_text(&self) -> bool {
        let mime = self.mime_type.as_str();
        if mime.starts_with("text/") {
            return true;
        }

        match mime.strip_prefix("application/") {
            Some(subtype) => {
                subtype == "json"
                    || subtype == "xml"
                    || subtype.ends_with("+json")
                    || subtype.ends_with("+xml")
            }
            None => false,
        }
    }
}

/// Parses a Content-Type header into its mime type and text encoding
///
/// Never fails: empty `;` segments and parameters that are not `key=value`
/// are skipped, and the encoding falls back to UTF-8.
///
/// # Example
///
/// ```
/// use favicon_scan::fetch::{parse_content_type, TextEncoding};
///
/// let content_type = parse_content_type("text/html;;charset=UTF-8");
/// assert_eq!(content_type.mime_type, "text/html");
/// assert_eq!(content_type.encoding, TextEncoding::Utf8);
/// ```
pub fn parse_content_type(header: &str) -> ContentType {
    let mut parts = header.split(';').map(str::trim);
    let mime_type = parts.next().unwrap_or_default().to_ascii_lowercase();

    let encoding = parts
        .filter(|part| !part.is_empty())
        .filter_map(|part| part.split_once('='))
        .find(|(key, _)| key.trim().eq_ignore_ascii_case("charset"))
        .and_then(|(_, value)| TextEncoding::from_label(value.trim().trim_matches('"')))
        .unwrap_or(TextEncoding::Utf8);

    ContentType {
        mime_type,
        encoding,
    }
}
