use base64::{engine::general_purpose::STANDARD, Engine};
use serde::{de::Error, Deserialize, Deserializer, Serializer};

/// Utility function to serialize bytes as a standard base64 string, the way
/// the service transports binary values inside JSON
pub fn ser_to_base64<S>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&STANDARD.encode(bytes))
}

/// Utility function to deserialize a standard base64 string into bytes
pub fn de_from_base64<'de, D>(deserializer: D) -> Result<Vec<u8>, D::Error>
where
    D: Deserializer<'de>,
{
    let encoded = String::deserialize(deserializer)?;
    decode_base64(&encoded).map_err(D::Error::custom)
}

/// Decode standard base64, tolerating ASCII whitespace such as the line
/// breaks of wrapped (PEM or MIME style) text
pub fn decode_base64(encoded: &str) -> Result<Vec<u8>, base64::DecodeError> {
    let compact: Vec<u8> = encoded
        .bytes()
        .filter(|byte| !byte.is_ascii_whitespace())
        .collect();
    STANDARD.decode(compact)
}

/// Helper trait to move between raw bytes and the base64 text used on the
/// wire
pub trait Base64Content {
    fn to_base64(&self) -> String;
}

impl<T> Base64Content for T
where
    T: AsRef<[u8]> + ?Sized,
{
    fn to_base64(&self) -> String {
        STANDARD.encode(self.as_ref())
    }
}
