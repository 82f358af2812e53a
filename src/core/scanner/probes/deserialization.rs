// src/core/scanner/probes/deserialization.rs

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use reqwest::StatusCode;

use crate::core::http::HttpClient;
use crate::core::models::{Finding, VulnerabilityClass};
use crate::core::scanner::registry::{Probe, ProbeOutcome};

use super::with_param;

// Pickle protocol 4 opcodes.
const PROTO: u8 = 0x80;
const FRAME: u8 = 0x95;
const EMPTY_DICT: u8 = b'}';
const MEMOIZE: u8 = 0x94;
const SHORT_BINUNICODE: u8 = 0x8c;
const BINUNICODE: u8 = b'X';
const SETITEM: u8 = b's';
const STOP: u8 = b'.';

/// Python pickle (protocol 4) bytes of the one-entry dict `{key: value}`,
/// identical to what `pickle.dumps` emits.
pub fn pickle_str_entry(key: &str, value: &str) -> Vec<u8> {
    let mut frame = vec![EMPTY_DICT, MEMOIZE];
    push_unicode(&mut frame, key);
    push_unicode(&mut frame, value);
    frame.push(SETITEM);
    frame.push(STOP);

    let mut out = Vec::with_capacity(frame.len() + 11);
    out.extend_from_slice(&[PROTO, 4, FRAME]);
    out.extend_from_slice(&(frame.len() as u64).to_le_bytes());
    out.extend_from_slice(&frame);
    out
}

fn push_unicode(out: &mut Vec<u8>, text: &str) {
    let bytes = text.as_bytes();
    match u8::try_from(bytes.len()) {
        Ok(len) => out.extend_from_slice(&[SHORT_BINUNICODE, len]),
        Err(_) => {
            out.push(BINUNICODE);
            out.extend_from_slice(&(bytes.len() as u32).to_le_bytes());
        }
    }
    out.extend_from_slice(bytes);
    out.push(MEMOIZE);
}

/// Base64 of the pickled `{"test": "vulnerable"}` marker object.
pub fn deserialization_payload() -> String {
    STANDARD.encode(pickle_str_entry("test", "vulnerable"))
}

/// Insecure deserialization: a pickled object in a parameter crashes the
/// handler or leaks pickle internals.
pub struct DeserializationProbe {
    http: HttpClient,
    payload: String,
}

impl DeserializationProbe {
    pub fn new(http: HttpClient) -> Self {
        Self { http, payload: deserialization_payload() }
    }
}

#[async_trait]
impl Probe for DeserializationProbe {
    fn class(&self) -> VulnerabilityClass {
        VulnerabilityClass::InsecureDeserialization
    }

    async fn check(&self, endpoint: &str) -> ProbeOutcome {
        let url = with_param(endpoint, "data", &self.payload);
        let response = self.http.get(&url).await?;

        let suspicious = response.status == StatusCode::INTERNAL_SERVER_ERROR
            || response.body.to_lowercase().contains("pickle");
        Ok(suspicious.then(|| Finding::new(self.class(), url, self.payload.clone())))
    }
}
