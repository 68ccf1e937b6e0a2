use std::str::FromStr;

use anyhow::{anyhow, Result};
use md5::Md5;
use serde::{Deserialize, Serialize};
use sha1::Sha1;
use sha2::{Digest, Sha256, Sha384, Sha512};
use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};

use crate::serde::{de_from_base64, ser_to_base64};

/// Digest algorithms the service may ask for, keyed on the identifiers used
/// by its API (`SHA256`, not `SHA-256`)
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
    IntoStaticStr,
)]
pub enum DigestAlgorithm {
    #[serde(rename = "MD5")]
    #[strum(serialize = "MD5")]
    Md5,
    #[serde(rename = "SHA1")]
    #[strum(serialize = "SHA1")]
    Sha1,
    #[serde(rename = "SHA256")]
    #[strum(serialize = "SHA256")]
    Sha256,
    #[serde(rename = "SHA384")]
    #[strum(serialize = "SHA384")]
    Sha384,
    #[serde(rename = "SHA512")]
    #[strum(serialize = "SHA512")]
    Sha512,
}

impl DigestAlgorithm {
    /// Resolve an algorithm from its API identifier
    pub fn from_api_algorithm(api_algorithm: &str) -> Result<Self> {
        DigestAlgorithm::from_str(api_algorithm)
            .map_err(|_| anyhow!("Unsupported digest algorithm: {}", api_algorithm))
    }

    /// The identifier used by the service API
    pub fn api_algorithm(&self) -> &'static str {
        self.into()
    }

    /// Human readable name
    pub fn name(&self) -> &'static str {
        match self {
            DigestAlgorithm::Md5 => "MD5",
            DigestAlgorithm::Sha1 => "SHA-1",
            DigestAlgorithm::Sha256 => "SHA-256",
            DigestAlgorithm::Sha384 => "SHA-384",
            DigestAlgorithm::Sha512 => "SHA-512",
        }
    }

    /// Dotted OID of the algorithm
    pub fn oid(&self) -> &'static str {
        match self {
            DigestAlgorithm::Md5 => "1.2.840.113549.2.5",
            DigestAlgorithm::Sha1 => "1.3.14.3.2.26",
            DigestAlgorithm::Sha256 => "2.16.840.1.101.3.4.2.1",
            DigestAlgorithm::Sha384 => "2.16.840.1.101.3.4.2.2",
            DigestAlgorithm::Sha512 => "2.16.840.1.101.3.4.2.3",
        }
    }

    /// Length of the digest in bytes
    pub fn byte_length(&self) -> usize {
        match self {
            DigestAlgorithm::Md5 => 16,
            DigestAlgorithm::Sha1 => 20,
            DigestAlgorithm::Sha256 => 32,
            DigestAlgorithm::Sha384 => 48,
            DigestAlgorithm::Sha512 => 64,
        }
    }

    /// Hash some data with this algorithm
    pub fn compute(&self, data: &[u8]) -> Vec<u8> {
        match self {
            DigestAlgorithm::Md5 => Md5::digest(data).to_vec(),
            DigestAlgorithm::Sha1 => Sha1::digest(data).to_vec(),
            DigestAlgorithm::Sha256 => Sha256::digest(data).to_vec(),
            DigestAlgorithm::Sha384 => Sha384::digest(data).to_vec(),
            DigestAlgorithm::Sha512 => Sha512::digest(data).to_vec(),
        }
    }
}

/// A digest together with the algorithm that produced it. This is the shape
/// of both the `dataHashes` entries sent to the service and the message
/// digests it reports for each signer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DigestAlgorithmAndValue {
    pub algorithm: DigestAlgorithm,
    #[serde(serialize_with = "ser_to_base64", deserialize_with = "de_from_base64")]
    pub value: Vec<u8>,
}

impl DigestAlgorithmAndValue {
    pub fn compute(algorithm: DigestAlgorithm, data: &[u8]) -> Self {
        DigestAlgorithmAndValue {
            algorithm,
            value: algorithm.compute(data),
        }
    }

    /// Lower-case hex rendering of the digest value
    pub fn hex_value(&self) -> String {
        self.value.iter().map(|byte| format!("{byte:02x}")).collect()
    }
}
