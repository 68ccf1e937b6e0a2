use std::{fmt::Debug, path::Path};

use anyhow::{anyhow, Context, Result};
use log::debug;
use serde_json::{Map, Value};

use crate::{
    client::{post_json, RestClient},
    digest::{DigestAlgorithm, DigestAlgorithmAndValue},
    explorer::SignatureExplorer,
    file::{FileReference, FileResult},
    format::{format_optional_cnpj, format_optional_cpf, format_signing_time},
    models::{
        CadesSignatureModel, CadesSignerModel, CertificateModel, FileModel, FileReferenceModel,
        OpenCadesSignatureRequest,
    },
    serde::decode_base64,
    validation::ValidationResults,
};

/// MIME type of CMS signature files
pub const CMS_SIGNATURE_MIME_TYPE: &str = "application/pkcs7-signature";

pub const REQUIRED_HASHES_PATH: &str = "Api/CadesSignatures/RequiredHashes";
pub const OPEN_PATH: &str = "Api/CadesSignatures/Open";

/// One signer of a CAdES signature, with the fields derived locally from
/// the service's response
#[derive(Debug, Clone)]
pub struct CadesSignerInfo {
    pub message_digest: DigestAlgorithmAndValue,
    pub certificate: Option<CertificateModel>,
    /// `dd/mm/yyyy hh:mm:ss ±hh:mm`
    pub signing_time: Option<String>,
    pub certified_date_reference: Option<String>,
    pub signature: Option<Value>,
    pub signature_policy: Option<Value>,
    pub timestamps: Vec<Value>,
    pub validation_results: ValidationResults,
    pub other: Map<String, Value>,
}

impl TryFrom<CadesSignerModel> for CadesSignerInfo {
    type Error = anyhow::Error;

    fn try_from(model: CadesSignerModel) -> Result<Self, Self::Error> {
        let algorithm = DigestAlgorithm::from_api_algorithm(&model.message_digest.algorithm)?;
        let value = match &model.message_digest.value {
            Some(value) => decode_base64(value)
                .map_err(|error| anyhow!(error))
                .context("Could not decode signer message digest")?,
            None => Vec::new(),
        };

        let certificate = model.certificate.map(|mut certificate| {
            format_certificate(&mut certificate);
            certificate
        });

        Ok(CadesSignerInfo {
            message_digest: DigestAlgorithmAndValue { algorithm, value },
            certificate,
            signing_time: model.signing_time.as_deref().map(format_signing_time),
            certified_date_reference: model.certified_date_reference,
            signature: model.signature,
            signature_policy: model.signature_policy,
            timestamps: model.timestamps.unwrap_or_default(),
            validation_results: model
                .validation_results
                .map(ValidationResults::from)
                .unwrap_or_default(),
            other: model.other,
        })
    }
}

/// Fill in the formatted ICP-Brasil IDs of a signer certificate
fn format_certificate(certificate: &mut CertificateModel) {
    if let Some(pki_brazil) = certificate.pki_brazil.as_mut() {
        pki_brazil.cpf_formatted = format_optional_cpf(pki_brazil.cpf.as_deref());
        pki_brazil.cnpj_formatted = format_optional_cnpj(pki_brazil.cnpj.as_deref());
    }
}

/// A decoded (and, unless disabled, validated) CAdES signature
#[derive(Debug, Clone)]
pub struct CadesSignature {
    pub encapsulated_content_type: Option<String>,
    pub has_encapsulated_content: bool,
    pub signers: Vec<CadesSignerInfo>,
}

impl CadesSignature {
    /// True when every signer passed validation
    pub fn is_valid(&self) -> bool {
        self.signers
            .iter()
            .all(|signer| signer.validation_results.is_valid())
    }
}

pub struct CadesSignatureWithEncapsulatedContent<'a, C>
where
    C: RestClient + ?Sized,
{
    pub signature: CadesSignature,
    pub encapsulated_content: FileResult<'a, C>,
}

impl<'a, C> Debug for CadesSignatureWithEncapsulatedContent<'a, C>
where
    C: RestClient + ?Sized,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CadesSignatureWithEncapsulatedContent")
            .field("signature", &self.signature)
            .field("encapsulated_content", &self.encapsulated_content)
            .finish()
    }
}

/// Opens CAdES (CMS) signatures through the service. For detached
/// signatures, set the data file: the digests the service needs are
/// negotiated and computed locally, so the data itself never leaves the
/// machine.
pub struct CadesSignatureExplorer<'a, C>
where
    C: RestClient + ?Sized,
{
    explorer: SignatureExplorer<'a, C>,
    data_file: Option<FileReference>,
}

impl<'a, C> CadesSignatureExplorer<'a, C>
where
    C: RestClient + ?Sized,
{
    pub fn new(client: &'a C) -> Self {
        CadesSignatureExplorer {
            explorer: SignatureExplorer::new(client),
            data_file: None,
        }
    }

    /// Signature file and validation options
    pub fn explorer(&self) -> &SignatureExplorer<'a, C> {
        &self.explorer
    }

    pub fn explorer_mut(&mut self) -> &mut SignatureExplorer<'a, C> {
        &mut self.explorer
    }

    pub fn data_file(&self) -> Option<&FileReference> {
        self.data_file.as_ref()
    }

    pub fn set_data_file_from_path<P: AsRef<Path>>(&mut self, path: P) {
        self.data_file = Some(FileReference::from_file(path));
    }

    pub fn set_data_file_from_content_raw<B: Into<Vec<u8>>>(&mut self, content: B) {
        self.data_file = Some(FileReference::from_content_raw(content));
    }

    pub fn set_data_file_from_content_base64<S: Into<String>>(&mut self, content: S) {
        self.data_file = Some(FileReference::from_content_base64(content));
    }

    /// Alias of `set_data_file_from_path`
    pub fn set_data_file<P: AsRef<Path>>(&mut self, path: P) {
        self.set_data_file_from_path(path);
    }

    /// Open the signature, without extracting its encapsulated content
    pub async fn open(&self) -> Result<CadesSignature> {
        let (signature, _) = self.open_common(false).await?;
        Ok(signature)
    }

    /// Open the signature and retrieve the content it encapsulates
    pub async fn open_and_extract_content(
        &self,
    ) -> Result<CadesSignatureWithEncapsulatedContent<'a, C>> {
        let (signature, encapsulated_content) = self.open_common(true).await?;
        let encapsulated_content = encapsulated_content
            .ok_or_else(|| anyhow!("The signature has no encapsulated content"))?;

        Ok(CadesSignatureWithEncapsulatedContent {
            signature,
            encapsulated_content: FileResult::new(self.explorer.client(), encapsulated_content),
        })
    }

    /// Ask the service which digests of the data file must accompany the
    /// signature
    pub async fn required_hashes(&self) -> Result<Vec<DigestAlgorithm>> {
        let file = self.explorer.signature_file_reference().await?;
        self.fetch_required_hashes(&file).await
    }

    async fn fetch_required_hashes(
        &self,
        file: &FileReferenceModel,
    ) -> Result<Vec<DigestAlgorithm>> {
        debug!("Requesting required hashes");
        let response: Vec<String> =
            post_json(self.explorer.client(), REQUIRED_HASHES_PATH, file).await?;

        response
            .iter()
            .map(|algorithm| DigestAlgorithm::from_api_algorithm(algorithm))
            .collect()
    }

    async fn open_common(
        &self,
        extract_encapsulated_content: bool,
    ) -> Result<(CadesSignature, Option<FileModel>)> {
        let base = self.explorer.request().await?;

        let data_hashes = match &self.data_file {
            Some(data_file) => {
                let required_hashes = self.fetch_required_hashes(&base.file).await?;
                match required_hashes.is_empty() {
                    true => None,
                    false => Some(data_file.compute_data_hashes(&required_hashes)?),
                }
            }
            None => None,
        };

        let request = OpenCadesSignatureRequest {
            base,
            extract_encapsulated_content,
            data_hashes,
        };

        debug!(
            "Opening CAdES signature (extract content: {})",
            extract_encapsulated_content
        );
        let response: CadesSignatureModel =
            post_json(self.explorer.client(), OPEN_PATH, &request).await?;

        let signers = response
            .signers
            .into_iter()
            .map(CadesSignerInfo::try_from)
            .collect::<Result<Vec<_>>>()?;

        Ok((
            CadesSignature {
                encapsulated_content_type: response.encapsulated_content_type,
                has_encapsulated_content: response.has_encapsulated_content,
                signers,
            },
            response.encapsulated_content,
        ))
    }
}
