//! Share-link payloads.
//!
//! After a draw, the organizer can hand each giver an opaque token carrying
//! their receiver's name and wishlist plus the event details. The token is
//! base64 over JSON, URL-safe so it survives a URL fragment. This is
//! obfuscation, not encryption.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ShareError {
    #[error("Share token is not valid base64: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("Share payload is not valid: {0}")]
    Payload(String),
}

/// Everything a giver needs to see after the reveal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShareData {
    pub recipient_name: String,
    #[serde(default)]
    pub recipient_wishlist: Vec<String>,
    pub group_name: String,
    pub budget: String,
    pub currency: String,
    pub exchange_date: Option<NaiveDate>,
    pub admin_name: String,
}

/// Encode a share payload into a URL-fragment-safe token.
pub fn encode_share_data(data: &ShareData) -> Result<String, ShareError> {
    let json = serde_json::to_vec(data).map_err(|e| ShareError::Payload(e.to_string()))?;
    Ok(URL_SAFE_NO_PAD.encode(json))
}

/// Decode a token produced by [`encode_share_data`].
pub fn decode_share_data(token: &str) -> Result<ShareData, ShareError> {
    let json = URL_SAFE_NO_PAD.decode(token.trim())?;
    serde_json::from_slice(&json).map_err(|e| ShareError::Payload(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ShareData {
        ShareData {
            recipient_name: "Ania".into(),
            recipient_wishlist: vec!["ksiazka".into(), "herbata".into()],
            group_name: "Wigilia w Pracy".into(),
            budget: "50".into(),
            currency: "PLN".into(),
            exchange_date: NaiveDate::from_ymd_opt(2026, 12, 6),
            admin_name: "Marek".into(),
        }
    }

    #[test]
    fn token_survives_encode_decode() {
        let data = sample();
        let token = encode_share_data(&data).unwrap();
        assert_eq!(decode_share_data(&token).unwrap(), data);
    }

    #[test]
    fn token_is_url_fragment_safe() {
        let token = encode_share_data(&sample()).unwrap();
        assert!(token
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
    }

    #[test]
    fn garbage_tokens_are_rejected() {
        assert!(matches!(
            decode_share_data("%%%"),
            Err(ShareError::Base64(_))
        ));
        let not_json = URL_SAFE_NO_PAD.encode(b"hello");
        assert!(matches!(
            decode_share_data(&not_json),
            Err(ShareError::Payload(_))
        ));
    }
}
