//! Session record entity: the visitor's current URL and its QR image.

use serde::{Deserialize, Serialize};
use serde_with::{base64::Base64, serde_as};

use super::ValidatedUrl;

/// The pair persisted per visitor session.
///
/// Both fields are always written together; a record is replaced wholesale and
/// never patched field by field.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub url: ValidatedUrl,

    /// PNG bytes of the QR code encoding `url`.
    #[serde_as(as = "Base64")]
    pub png: Vec<u8>,
}

impl SessionRecord {
    pub fn new(url: ValidatedUrl, png: Vec<u8>) -> Self {
        Self { url, png }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_png_serialized_as_base64() {
        let record = SessionRecord::new(
            ValidatedUrl::parse("https://example.com").unwrap(),
            vec![0x89, b'P', b'N', b'G'],
        );

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["url"], "https://example.com");
        assert_eq!(json["png"], "iVBORw==");

        let back: SessionRecord = serde_json::from_value(json).unwrap();
        assert_eq!(back, record);
    }
}
