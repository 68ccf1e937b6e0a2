//! Wire-level records exchanged with the service.
//!
//! Requests serialize to, and responses deserialize from, camelCase JSON.
//! Optional fields are omitted from requests when unset.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::digest::DigestAlgorithmAndValue;

/// How a file is designated inside a request: either inline or by a blob
/// token obtained from a previous upload or operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileReferenceModel {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blob_token: Option<String>,
}

/// A file produced by the service
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileModel {
    #[serde(default)]
    pub mime_type: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub blob_token: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenSignatureRequest {
    pub file: FileReferenceModel,
    pub validate: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_signature_policy_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub acceptable_explicit_policies: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub security_context_id: Option<String>,
    pub ignore_revocation_status_unknown: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenCadesSignatureRequest {
    #[serde(flatten)]
    pub base: OpenSignatureRequest,
    pub extract_encapsulated_content: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_hashes: Option<Vec<DigestAlgorithmAndValue>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationItemModel {
    #[serde(rename = "type", default)]
    pub item_type: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub detail: Option<String>,
    #[serde(default)]
    pub inner_validation_results: Option<ValidationResultsModel>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResultsModel {
    #[serde(default)]
    pub passed_checks: Option<Vec<ValidationItemModel>>,
    #[serde(default)]
    pub errors: Option<Vec<ValidationItemModel>>,
    #[serde(default)]
    pub warnings: Option<Vec<ValidationItemModel>>,
}

/// Message digest as reported by the service, before the algorithm code is
/// resolved
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DigestAlgorithmAndValueModel {
    pub algorithm: String,
    #[serde(default)]
    pub value: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NameModel {
    #[serde(default)]
    pub common_name: Option<String>,
    #[serde(default)]
    pub organization: Option<String>,
    #[serde(default)]
    pub organization_unit: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub email_address: Option<String>,
}

/// ICP-Brasil fields of a certificate. The formatted variants are derived
/// locally after the response is received and are always present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PkiBrazilCertificateModel {
    #[serde(default)]
    pub certificate_type: Option<String>,
    #[serde(default)]
    pub cpf: Option<String>,
    #[serde(default)]
    pub cnpj: Option<String>,
    #[serde(default)]
    pub responsavel: Option<String>,
    #[serde(default)]
    pub company_name: Option<String>,
    #[serde(default)]
    pub date_of_birth: Option<String>,
    #[serde(default)]
    pub rg_numero: Option<String>,
    #[serde(default)]
    pub rg_emissor: Option<String>,
    #[serde(default, rename = "rgEmissorUF")]
    pub rg_emissor_uf: Option<String>,
    #[serde(default)]
    pub oab_numero: Option<String>,
    #[serde(default, rename = "oabUF")]
    pub oab_uf: Option<String>,
    #[serde(default)]
    pub cpf_formatted: String,
    #[serde(default)]
    pub cnpj_formatted: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificateModel {
    #[serde(default)]
    pub subject_name: Option<NameModel>,
    #[serde(default)]
    pub issuer_name: Option<NameModel>,
    #[serde(default)]
    pub serial_number: Option<String>,
    #[serde(default)]
    pub validity_start: Option<String>,
    #[serde(default)]
    pub validity_end: Option<String>,
    #[serde(default)]
    pub email_address: Option<String>,
    #[serde(default)]
    pub pki_brazil: Option<PkiBrazilCertificateModel>,
    #[serde(default)]
    pub issuer: Option<Box<CertificateModel>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CadesSignerModel {
    pub message_digest: DigestAlgorithmAndValueModel,
    #[serde(default)]
    pub signature: Option<Value>,
    #[serde(default)]
    pub signature_policy: Option<Value>,
    #[serde(default)]
    pub certificate: Option<CertificateModel>,
    #[serde(default)]
    pub signing_time: Option<String>,
    #[serde(default)]
    pub certified_date_reference: Option<String>,
    #[serde(default)]
    pub timestamps: Option<Vec<Value>>,
    #[serde(default)]
    pub validation_results: Option<ValidationResultsModel>,
    /// Fields this client does not model, kept as received
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CadesSignatureModel {
    #[serde(default)]
    pub encapsulated_content_type: Option<String>,
    #[serde(default)]
    pub has_encapsulated_content: bool,
    #[serde(default)]
    pub signers: Vec<CadesSignerModel>,
    #[serde(default)]
    pub encapsulated_content: Option<FileModel>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadModel {
    pub blob_token: String,
}
