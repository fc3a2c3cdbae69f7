//! Versioned JSON envelope
//!
//! The payload is kept as an embedded JSON string so the digest covers the
//! exact bytes that were written.

use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Current envelope format
pub const FORMAT_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
struct Envelope {
    version: u32,
    digest: String,
    payload: String,
}

/// Why an envelope could not be opened
#[derive(Debug)]
pub enum EnvelopeError {
    /// Not an envelope at all
    Malformed(serde_json::Error),
    UnsupportedVersion(u32),
    DigestMismatch { stored: String, computed: String },
    /// Envelope intact but the payload does not match the expected type
    Payload(serde_json::Error),
}

impl fmt::Display for EnvelopeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EnvelopeError::Malformed(e) => write!(f, "malformed envelope: {}", e),
            EnvelopeError::UnsupportedVersion(v) => write!(f, "unsupported envelope version: {}", v),
            EnvelopeError::DigestMismatch { stored, computed } => {
                write!(f, "digest mismatch: stored {}, computed {}", stored, computed)
            }
            EnvelopeError::Payload(e) => write!(f, "invalid payload: {}", e),
        }
    }
}

impl std::error::Error for EnvelopeError {}

fn digest(bytes: &[u8]) -> String {
    blake3::hash(bytes).to_hex().to_string()
}

/// Wrap a value in a digest-protected envelope
pub fn seal<T: Serialize>(value: &T) -> Result<String, serde_json::Error> {
    let payload = serde_json::to_string(value)?;
    let envelope = Envelope {
        version: FORMAT_VERSION,
        digest: digest(payload.as_bytes()),
        payload,
    };
    serde_json::to_string(&envelope)
}

/// Verify and unwrap an envelope
pub fn open<T: DeserializeOwned>(text: &str) -> Result<T, EnvelopeError> {
    let envelope: Envelope = serde_json::from_str(text).map_err(EnvelopeError::Malformed)?;
    if envelope.version != FORMAT_VERSION {
        return Err(EnvelopeError::UnsupportedVersion(envelope.version));
    }
    let computed = digest(envelope.payload.as_bytes());
    if computed != envelope.digest {
        return Err(EnvelopeError::DigestMismatch {
            stored: envelope.digest,
            computed,
        });
    }
    serde_json::from_str(&envelope.payload).map_err(EnvelopeError::Payload)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Record {
        depth: i32,
        name: String,
    }

    #[test]
    fn test_seal_and_open() {
        let record = Record {
            depth: 420,
            name: "diver".into(),
        };
        let text = seal(&record).unwrap();
        let back: Record = open(&text).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn test_tampered_payload_detected() {
        let text = seal(&Record {
            depth: 10,
            name: "a".into(),
        })
        .unwrap();
        let tampered = text.replace("10", "9999");
        assert!(matches!(
            open::<Record>(&tampered),
            Err(EnvelopeError::DigestMismatch { .. })
        ));
    }

    #[test]
    fn test_garbage_is_malformed() {
        assert!(matches!(open::<Record>("{not json"), Err(EnvelopeError::Malformed(_))));
        assert!(matches!(open::<Record>("[1,2,3]"), Err(EnvelopeError::Malformed(_))));
    }

    #[test]
    fn test_future_version_rejected() {
        let payload = r#"{"depth":1,"name":"x"}"#;
        let text = serde_json::json!({
            "version": 7,
            "digest": digest(payload.as_bytes()),
            "payload": payload,
        })
        .to_string();
        assert!(matches!(
            open::<Record>(&text),
            Err(EnvelopeError::UnsupportedVersion(7))
        ));
    }

    #[test]
    fn test_wrong_payload_shape() {
        let text = seal(&vec![1, 2, 3]).unwrap();
        assert!(matches!(open::<Record>(&text), Err(EnvelopeError::Payload(_))));
    }
}
