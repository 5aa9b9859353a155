//! RFC 6238 time-based one-time passwords for the totp second factor.
//!
//! SHA-1, 6 digits, 30 second step, secret supplied as RFC 4648 base32.

use std::time::{SystemTime, UNIX_EPOCH};

use hmac::{Hmac, Mac};
use sha1::Sha1;

use crate::ApiError;

type HmacSha1 = Hmac<Sha1>;

const STEP_SECONDS: u64 = 30;
const DIGITS: u32 = 6;

/// Shared TOTP secret configured alongside the credentials.
#[derive(Clone)]
pub struct TotpSecret {
    key: Vec<u8>,
}

impl std::fmt::Debug for TotpSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never print key material.
        f.write_str("TotpSecret(..)")
    }
}

impl TotpSecret {
    /// Parses a base32 secret. Whitespace and padding are tolerated;
    /// case is ignored.
    pub fn from_base32(secret: &str) -> Result<Self, ApiError> {
        let key = decode_base32(secret)
            .ok_or_else(|| ApiError::Configuration(String::from("invalid base32 TOTP secret")))?;
        if key.is_empty() {
            return Err(ApiError::Configuration(String::from(
                "TOTP secret must not be empty",
            )));
        }
        Ok(Self { key })
    }

    /// Code for the current system time.
    pub fn generate(&self) -> String {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs();
        self.generate_at(now)
    }

    /// Code for an explicit unix timestamp.
    pub fn generate_at(&self, unix_time: u64) -> String {
        let counter = unix_time / STEP_SECONDS;
        let mut mac =
            HmacSha1::new_from_slice(&self.key).expect("hmac accepts any key length");
        mac.update(&counter.to_be_bytes());
        let digest = mac.finalize().into_bytes();

        // RFC 4226 dynamic truncation.
        let offset = (digest[digest.len() - 1] & 0x0f) as usize;
        let binary = u32::from_be_bytes([
            digest[offset] & 0x7f,
            digest[offset + 1],
            digest[offset + 2],
            digest[offset + 3],
        ]);
        let code = binary % 10u32.pow(DIGITS);
        format!("{code:0width$}", width = DIGITS as usize)
    }
}

const BASE32_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ234567";

fn decode_base32(input: &str) -> Option<Vec<u8>> {
    let mut buffer: u32 = 0;
    let mut bits: u32 = 0;
    let mut output = Vec::with_capacity(input.len() * 5 / 8);

    for ch in input.chars() {
        if ch.is_whitespace() || ch == '=' {
            continue;
        }
        let upper = ch.to_ascii_uppercase();
        let value = BASE32_ALPHABET.iter().position(|&c| c as char == upper)? as u32;
        buffer = (buffer << 5) | value;
        bits += 5;
        if bits >= 8 {
            bits -= 8;
            output.push((buffer >> bits) as u8);
        }
    }

    Some(output)
}
