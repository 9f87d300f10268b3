//! Charset-aware `application/x-www-form-urlencoded` value codec.

use encoding_rs::{Encoding, REPLACEMENT, UTF_16BE, UTF_16LE};
use percent_encoding::percent_decode_str;
use std::fmt;
use url::form_urlencoded;

use crate::error::{Result, UrlError};

/// Labels that mean true ISO-8859-1. The WHATWG registry folds these into
/// windows-1252, which would let `€` and friends through.
const LATIN1_LABELS: &[&str] = &[
    "iso-8859-1",
    "iso8859-1",
    "iso_8859-1",
    "iso_8859_1",
    "iso8859_1",
    "iso88591",
    "8859_1",
    "iso_8859-1:1987",
    "iso-ir-100",
    "latin1",
    "l1",
    "cp819",
    "ibm819",
    "ibm-819",
    "819",
    "csisolatin1",
];

/// How a charset turns text into bytes and back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Codec {
    /// ISO-8859-1: code points up to U+00FF map 1:1 to bytes.
    Latin1,
    /// UTF-16LE/BE. `encoding_rs` only decodes these, so encoding is done by hand.
    Utf16 { big_endian: bool },
    /// Any other registry encoding; ASCII-compatible on output.
    Registry(&'static Encoding),
}

/// Text encoding used to turn parameter values into bytes before escaping.
///
/// Labels are resolved through the WHATWG encoding registry, so the usual
/// aliases work ("utf8", "shift_jis", "windows-1251", ...), except that the
/// ISO-8859-1 aliases ("latin1", "iso-8859-1", ...) keep their strict meaning.
/// The label given by the caller is kept for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Charset {
    label: String,
    codec: Codec,
}

impl Charset {
    /// Looks up `label`. Unknown labels and the output-less "replacement"
    /// encoding are rejected.
    pub fn for_label(label: &str) -> Result<Self> {
        let key = label.trim();
        let codec = if LATIN1_LABELS.iter().any(|l| l.eq_ignore_ascii_case(key)) {
            Codec::Latin1
        } else {
            match Encoding::for_label(key.as_bytes()).filter(|e| *e != REPLACEMENT) {
                Some(e) if e == UTF_16LE => Codec::Utf16 { big_endian: false },
                Some(e) if e == UTF_16BE => Codec::Utf16 { big_endian: true },
                Some(e) => Codec::Registry(e),
                None => {
                    return Err(UrlError::InvalidArgument(format!(
                        "charset is not supported: {}",
                        label
                    )))
                }
            }
        };
        Ok(Self {
            label: label.to_string(),
            codec,
        })
    }

    /// The label this charset was created from.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Canonical name (e.g. "ISO-8859-1" for "latin1", "Shift_JIS" for "sjis").
    pub fn name(&self) -> &'static str {
        match self.codec {
            Codec::Latin1 => "ISO-8859-1",
            Codec::Utf16 { big_endian: false } => UTF_16LE.name(),
            Codec::Utf16 { big_endian: true } => UTF_16BE.name(),
            Codec::Registry(e) => e.name(),
        }
    }

    /// Encodes `value` in this charset and escapes every byte that is not an
    /// ASCII alphanumeric or one of `*-._`. Spaces become `+`.
    pub fn encode(&self, value: &str) -> Result<String> {
        let bytes = self.to_bytes(value)?;
        Ok(form_urlencoded::byte_serialize(&bytes).collect())
    }

    fn to_bytes(&self, value: &str) -> Result<Vec<u8>> {
        match self.codec {
            Codec::Latin1 => value
                .chars()
                .map(|c| u8::try_from(c).map_err(|_| self.unrepresentable(c)))
                .collect(),
            Codec::Utf16 { big_endian } => Ok(value
                .encode_utf16()
                .flat_map(|u| if big_endian { u.to_be_bytes() } else { u.to_le_bytes() })
                .collect()),
            Codec::Registry(encoding) => {
                let (bytes, _, had_errors) = encoding.encode(value);
                if had_errors {
                    let bad = value
                        .chars()
                        .find(|c| {
                            let mut buf = [0u8; 4];
                            encoding.encode(c.encode_utf8(&mut buf)).2
                        })
                        .unwrap_or(char::REPLACEMENT_CHARACTER);
                    return Err(self.unrepresentable(bad));
                }
                Ok(bytes.into_owned())
            }
        }
    }

    /// Reverses [`encode`](Self::encode): `+` becomes a space, `%XX`
    /// escapes become bytes, and the whole byte stream is decoded with this
    /// charset. Unescaped characters stand for their own encoding, so a
    /// Shift_JIS trail byte left as `A` or an unescaped `é` still decodes.
    pub fn decode(&self, value: &str) -> Result<String> {
        if let Some(at) = first_bad_escape(value) {
            return Err(UrlError::encoding(
                &self.label,
                format!("incomplete or invalid escape at offset {} in {:?}", at, value),
            ));
        }

        let mut bytes = Vec::with_capacity(value.len());
        let mut chars = value.char_indices();
        while let Some((i, c)) = chars.next() {
            match c {
                '%' => {
                    bytes.extend(percent_decode_str(&value[i..i + 3]));
                    // Skip the two hex digits.
                    chars.nth(1);
                }
                '+' => bytes.push(b' '),
                c if c.is_ascii() => bytes.push(c as u8),
                c => bytes.extend(self.to_bytes(c.encode_utf8(&mut [0u8; 4]))?),
            }
        }
        self.from_bytes(&bytes, value)
    }

    fn from_bytes(&self, bytes: &[u8], source: &str) -> Result<String> {
        let encoding = match self.codec {
            Codec::Latin1 => return Ok(bytes.iter().map(|&b| char::from(b)).collect()),
            Codec::Utf16 { big_endian: false } => UTF_16LE,
            Codec::Utf16 { big_endian: true } => UTF_16BE,
            Codec::Registry(e) => e,
        };
        encoding
            .decode_without_bom_handling_and_without_replacement(bytes)
            .map(|text| text.into_owned())
            .ok_or_else(|| {
                UrlError::encoding(
                    &self.label,
                    format!("{:?} is not valid {}", source, self.name()),
                )
            })
    }

    fn unrepresentable(&self, c: char) -> UrlError {
        UrlError::encoding(&self.label, format!("{:?} is not representable", c))
    }
}

impl fmt::Display for Charset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}

/// Offset of the first `%` not followed by two hex digits.
fn first_bad_escape(value: &str) -> Option<usize> {
    let b = value.as_bytes();
    b.iter().enumerate().find_map(|(i, &c)| {
        let ok = c != b'%'
            || (i + 2 < b.len() && b[i + 1].is_ascii_hexdigit() && b[i + 2].is_ascii_hexdigit());
        (!ok).then_some(i)
    })
}

/// Encodes with `charset`, or passes `value` through when there is none.
pub(crate) fn encode_opt(charset: Option<&Charset>, value: &str) -> Result<String> {
    match charset {
        Some(c) => c.encode(value),
        None => Ok(value.to_string()),
    }
}

/// Decodes with `charset`, or passes `value` through when there is none.
pub(crate) fn decode_opt(charset: Option<&Charset>, value: &str) -> Result<String> {
    match charset {
        Some(c) => c.decode(value),
        None => Ok(value.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utf8() -> Charset {
        Charset::for_label("utf-8").unwrap()
    }

    fn latin1() -> Charset {
        Charset::for_label("iso-8859-1").unwrap()
    }

    #[test]
    fn labels_and_aliases() {
        assert_eq!(Charset::for_label("UTF8").unwrap().name(), "UTF-8");
        assert_eq!(Charset::for_label("latin1").unwrap().name(), "ISO-8859-1");
        assert_eq!(Charset::for_label(" ISO-8859-1 ").unwrap().name(), "ISO-8859-1");
        assert_eq!(Charset::for_label("windows-1252").unwrap().name(), "windows-1252");
        assert_eq!(Charset::for_label("utf-16").unwrap().name(), "UTF-16LE");
        assert_eq!(Charset::for_label("iso-8859-1").unwrap().label(), "iso-8859-1");
    }

    #[test]
    fn unknown_label_is_invalid_argument() {
        let err = Charset::for_label("klingon").unwrap_err();
        assert!(matches!(err, UrlError::InvalidArgument(_)));
        assert!(Charset::for_label("replacement").is_err());
        assert!(Charset::for_label("iso-2022-kr").is_err());
    }

    #[test]
    fn encode_form_style() {
        let c = utf8();
        assert_eq!(c.encode("a b&c=d").unwrap(), "a+b%26c%3Dd");
        assert_eq!(c.encode("keep-._*").unwrap(), "keep-._*");
        assert_eq!(c.encode("café").unwrap(), "caf%C3%A9");
    }

    #[test]
    fn encode_latin1() {
        assert_eq!(latin1().encode("café").unwrap(), "caf%E9");
        assert_eq!(latin1().encode("\u{80}ÿ").unwrap(), "%80%FF");
    }

    #[test]
    fn encode_unrepresentable_fails() {
        let err = latin1().encode("5€").unwrap_err();
        assert!(matches!(err, UrlError::Encoding { .. }));
        assert!(err.to_string().contains('€'));

        let sjis = Charset::for_label("shift_jis").unwrap();
        assert!(matches!(sjis.encode("Ω☃").unwrap_err(), UrlError::Encoding { .. }));
    }

    #[test]
    fn latin1_decodes_bytes_one_to_one() {
        assert_eq!(latin1().decode("%80").unwrap(), "\u{80}");
        assert_eq!(latin1().decode("caf%E9").unwrap(), "café");
        // windows-1252 is the lenient cousin.
        let cp1252 = Charset::for_label("windows-1252").unwrap();
        assert_eq!(cp1252.decode("%80").unwrap(), "€");
        assert_eq!(cp1252.encode("€").unwrap(), "%80");
    }

    #[test]
    fn decode_form_style() {
        let c = utf8();
        assert_eq!(c.decode("a+b%26c%3Dd").unwrap(), "a b&c=d");
        assert_eq!(c.decode("caf%C3%A9").unwrap(), "café");
        assert_eq!(c.decode("%2B").unwrap(), "+");
        assert_eq!(c.decode("plain").unwrap(), "plain");
        assert_eq!(c.decode("").unwrap(), "");
    }

    #[test]
    fn decode_keeps_unescaped_non_ascii() {
        assert_eq!(latin1().decode("é%E9").unwrap(), "éé");
    }

    #[test]
    fn decode_bad_escape_fails() {
        let c = utf8();
        assert!(matches!(c.decode("100%").unwrap_err(), UrlError::Encoding { .. }));
        assert!(matches!(c.decode("%zz").unwrap_err(), UrlError::Encoding { .. }));
        assert!(matches!(c.decode("%4").unwrap_err(), UrlError::Encoding { .. }));
        assert!(matches!(c.decode("a%4").unwrap_err(), UrlError::Encoding { .. }));
    }

    #[test]
    fn decode_invalid_utf8_fails() {
        assert!(matches!(utf8().decode("%C3").unwrap_err(), UrlError::Encoding { .. }));
    }

    #[test]
    fn utf16_encodes_code_units() {
        let le = Charset::for_label("utf-16le").unwrap();
        assert_eq!(le.encode("é").unwrap(), "%E9%00");
        assert_eq!(le.encode("a b").unwrap(), "a%00+%00b%00");
        let be = Charset::for_label("utf-16be").unwrap();
        assert_eq!(be.encode("é").unwrap(), "%00%E9");
    }

    #[test]
    fn utf16_rejects_odd_byte_count() {
        let le = Charset::for_label("utf-16le").unwrap();
        assert!(matches!(le.decode("%E9").unwrap_err(), UrlError::Encoding { .. }));
        assert!(matches!(le.decode("a").unwrap_err(), UrlError::Encoding { .. }));
    }

    #[test]
    fn multibyte_trail_byte_left_unescaped() {
        let sjis = Charset::for_label("shift_jis").unwrap();
        // U+30A2 is 0x83 0x41 in Shift_JIS; 0x41 is 'A' and is not escaped.
        assert_eq!(sjis.encode("ア").unwrap(), "%83A");
        assert_eq!(sjis.decode("%83A").unwrap(), "ア");
    }

    #[test]
    fn unescaped_char_outside_charset_fails() {
        assert!(matches!(latin1().decode("東").unwrap_err(), UrlError::Encoding { .. }));
    }

    #[test]
    fn round_trip_per_charset_family() {
        let cases = [
            ("utf-8", "crème brûlée & 東京 +1"),
            ("iso-8859-1", "crème brûlée & ÿ +1"),
            ("windows-1252", "price: 5€ & “quoted”"),
            ("shift_jis", "東京 タワー a+b"),
            ("euc-kr", "서울 a=b"),
            ("gb18030", "北京 😀 x"),
            ("utf-16le", "é 東京 😀 a=b"),
            ("utf-16be", "é 東京 😀 a=b"),
            ("koi8-r", "Москва 1&2"),
        ];
        for (label, text) in cases {
            let c = Charset::for_label(label).unwrap();
            let encoded = c.encode(text).unwrap();
            assert!(encoded.is_ascii(), "{label}: {encoded}");
            assert_eq!(c.decode(&encoded).unwrap(), text, "{label}");
        }
    }

    #[test]
    fn passthrough_without_charset() {
        assert_eq!(encode_opt(None, "a b").unwrap(), "a b");
        assert_eq!(decode_opt(None, "a+b%20").unwrap(), "a+b%20");
    }
}
