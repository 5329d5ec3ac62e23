use chardetng::EncodingDetector;
use encoding_rs::Encoding;
use jobscan_logging::scan_warn;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedPage {
    pub html: String,
    pub encoding_label: String,
    /// Malformed sequences were replaced with U+FFFD.
    pub lossy: bool,
}

/// Bytes of the document head scanned for a `<meta charset>` declaration.
const META_PRESCAN_BYTES: usize = 1024;

/// Decode a page body into UTF-8.
///
/// Order: BOM, then the Content-Type charset, then a `<meta>` charset in
/// the first kilobyte, then chardetng detection. Malformed bytes never fail
/// the decode; they become replacement characters the way a browser shows them.
pub fn decode_page(bytes: &[u8], content_type: Option<&str>) -> DecodedPage {
    if let Some((encoding, _)) = Encoding::for_bom(bytes) {
        return decode_with(bytes, encoding);
    }

    let declared = content_type
        .and_then(charset_param)
        .or_else(|| meta_charset(bytes))
        .and_then(|label| Encoding::for_label(label.as_bytes()));
    if let Some(encoding) = declared {
        return decode_with(bytes, encoding);
    }

    let mut detector = EncodingDetector::new();
    detector.feed(bytes, true);
    decode_with(bytes, detector.guess(None, true))
}

fn charset_param(content_type: &str) -> Option<String> {
    content_type.split(';').find_map(|part| {
        let (name, value) = part.split_once('=')?;
        if !name.trim().eq_ignore_ascii_case("charset") {
            return None;
        }
        let value = value.trim().trim_matches(&['"', '\''][..]);
        (!value.is_empty()).then(|| value.to_string())
    })
}

fn meta_charset(bytes: &[u8]) -> Option<String> {
    let head = &bytes[..bytes.len().min(META_PRESCAN_BYTES)];
    let head = String::from_utf8_lossy(head).to_ascii_lowercase();
    let start = head.find("charset=")? + "charset=".len();
    let label: String = head[start..]
        .trim_start_matches(&['"', '\''][..])
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | ':' | '.'))
        .collect();
    (!label.is_empty()).then_some(label)
}

fn decode_with(bytes: &[u8], encoding: &'static Encoding) -> DecodedPage {
    let (text, _, had_errors) = encoding.decode(bytes);
    if had_errors {
        scan_warn!(
            "Page is not valid {}; malformed bytes replaced",
            encoding.name()
        );
    }
    DecodedPage {
        html: text.into_owned(),
        encoding_label: encoding.name().to_string(),
        lossy: had_errors,
    }
}
