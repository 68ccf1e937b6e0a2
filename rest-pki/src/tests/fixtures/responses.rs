use serde_json::{json, Value};

/// Base64 of the bytes `signature`
pub const SIGNATURE_BASE64: &str = "c2lnbmF0dXJl";
pub const SIGNATURE_CONTENT: &[u8] = b"signature";
pub const DATA_CONTENT: &[u8] = b"The quick brown fox jumps over the lazy dog";

/// SHA-256 of `DATA_CONTENT`, base64
pub const DATA_SHA256_BASE64: &str = "16j7swfXgJRpypq8sAguT41WUeRtPNt2LQLQvzfJ5ZI=";
/// SHA-1 of `DATA_CONTENT`, base64
pub const DATA_SHA1_BASE64: &str = "L9ThxnotKPzthJ7hu3bnORuT6xI=";

pub fn signer_response() -> Value {
    json!({
        "messageDigest": {
            "algorithm": "SHA256",
            "value": DATA_SHA256_BASE64,
        },
        "signingTime": "2017-03-21T14:07:45-03:00",
        "signatureAlgorithm": { "name": "SHA256WithRSA" },
        "certificate": {
            "subjectName": { "commonName": "Pierre de Fermat" },
            "issuerName": { "commonName": "Lacuna CA Test v1" },
            "serialNumber": "27104",
            "pkiBrazil": {
                "certificateType": "A3",
                "cpf": "47363361886",
                "cnpj": null,
                "responsavel": "Pierre de Fermat",
            },
        },
        "validationResults": {
            "passedChecks": [
                { "type": "SignatureValid", "message": "Signature is valid" },
                { "type": "CertificateValid", "message": "Signer certificate is valid" },
            ],
            "errors": [],
            "warnings": [],
        },
    })
}

pub fn company_signer_response() -> Value {
    json!({
        "messageDigest": { "algorithm": "SHA1", "value": DATA_SHA1_BASE64 },
        "certificate": {
            "subjectName": { "commonName": "ACME LTDA" },
            "pkiBrazil": { "cnpj": "12345678000195" },
        },
        "validationResults": {
            "errors": [{ "type": "CertificateExpired", "message": "Certificate expired" }],
        },
    })
}

pub fn open_response() -> Value {
    json!({
        "encapsulatedContentType": "Data",
        "hasEncapsulatedContent": false,
        "signers": [signer_response(), company_signer_response()],
    })
}

pub fn open_response_with_content() -> Value {
    json!({
        "encapsulatedContentType": "Data",
        "hasEncapsulatedContent": true,
        "signers": [signer_response()],
        "encapsulatedContent": {
            "mimeType": "text/plain",
            "blobToken": "content-token",
            "url": "https://pki.rest/Api/Blobs/content-token",
        },
    })
}
