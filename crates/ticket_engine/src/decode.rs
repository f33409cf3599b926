use chardetng::EncodingDetector;
use encoding_rs::Encoding;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedPage {
    pub html: String,
    pub encoding: &'static str,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error("listing page is not valid {encoding}")]
    Malformed { encoding: &'static str },
}

/// Decodes listing page bytes to UTF-8.
///
/// Encoding is taken from the BOM, then the Content-Type charset, then
/// guessed by chardetng.
pub fn decode_page(bytes: &[u8], content_type: Option<&str>) -> Result<DecodedPage, DecodeError> {
    if let Some((encoding, _)) = Encoding::for_bom(bytes) {
        return decode_with(bytes, encoding);
    }

    if let Some(encoding) = content_type
        .and_then(charset_param)
        .and_then(|label| Encoding::for_label(label.as_bytes()))
    {
        return decode_with(bytes, encoding);
    }

    let mut detector = EncodingDetector::new();
    detector.feed(bytes, true);
    decode_with(bytes, detector.guess(None, true))
}

fn charset_param(content_type: &str) -> Option<&str> {
    content_type.split(';').find_map(|param| {
        let (key, value) = param.split_once('=')?;
        key.trim()
            .eq_ignore_ascii_case("charset")
            .then(|| value.trim().trim_matches(&['"', '\''][..]))
    })
}

fn decode_with(bytes: &[u8], encoding: &'static Encoding) -> Result<DecodedPage, DecodeError> {
    // Strips a BOM only if it belongs to `encoding`; never switches encodings.
    let (text, had_errors) = encoding.decode_with_bom_removal(bytes);
    if had_errors {
        return Err(DecodeError::Malformed {
            encoding: encoding.name(),
        });
    }
    Ok(DecodedPage {
        html: text.into_owned(),
        encoding: encoding.name(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn charset_param_is_case_insensitive_and_unquoted() {
        assert_eq!(charset_param("text/html; Charset=\"utf-8\""), Some("utf-8"));
        assert_eq!(charset_param("text/html;charset=ISO-8859-1"), Some("ISO-8859-1"));
        assert_eq!(charset_param("text/html"), None);
    }

    #[test]
    fn utf8_bom_is_stripped() {
        let decoded = decode_page(b"\xEF\xBB\xBF<p>Available</p>", None).unwrap();
        assert_eq!(decoded.html, "<p>Available</p>");
        assert_eq!(decoded.encoding, "UTF-8");
    }

    #[test]
    fn header_charset_is_used() {
        let decoded = decode_page(b"\xe9t\xe9", Some("text/html; charset=ISO-8859-1")).unwrap();
        assert_eq!(decoded.html, "été");
    }

    #[test]
    fn invalid_utf8_is_reported() {
        let err = decode_page(b"ok \xc3", Some("text/html; charset=utf-8")).unwrap_err();
        assert_eq!(err, DecodeError::Malformed { encoding: "UTF-8" });
    }
}
