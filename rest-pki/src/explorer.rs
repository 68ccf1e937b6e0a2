use std::path::Path;

use anyhow::{anyhow, Result};

use crate::{
    client::RestClient,
    file::{FileReference, FileResult},
    models::{FileReferenceModel, OpenSignatureRequest},
};

/// State shared by the explorers of every signature format: the client, the
/// signature file and the options steering the server-side validation.
///
/// Before opening, you need to at least set the signature file through one
/// of the `set_signature_file*` methods.
pub struct SignatureExplorer<'a, C>
where
    C: RestClient + ?Sized,
{
    client: &'a C,
    signature_file: Option<FileReference>,

    validate: bool,
    default_signature_policy_id: Option<String>,
    acceptable_explicit_policies: Option<Vec<String>>,
    security_context_id: Option<String>,
    ignore_revocation_status_unknown: bool,
}

impl<'a, C> SignatureExplorer<'a, C>
where
    C: RestClient + ?Sized,
{
    pub fn new(client: &'a C) -> Self {
        SignatureExplorer {
            client,
            signature_file: None,

            validate: true,
            default_signature_policy_id: None,
            acceptable_explicit_policies: None,
            security_context_id: None,
            ignore_revocation_status_unknown: false,
        }
    }

    pub fn client(&self) -> &'a C {
        self.client
    }

    pub fn signature_file(&self) -> Option<&FileReference> {
        self.signature_file.as_ref()
    }

    pub fn set_signature_file_from_path<P: AsRef<Path>>(&mut self, path: P) {
        self.signature_file = Some(FileReference::from_file(path));
    }

    pub fn set_signature_file_from_content_raw<B: Into<Vec<u8>>>(&mut self, content: B) {
        self.signature_file = Some(FileReference::from_content_raw(content));
    }

    pub fn set_signature_file_from_content_base64<S: Into<String>>(&mut self, content: S) {
        self.signature_file = Some(FileReference::from_content_base64(content));
    }

    /// Use a file produced by a previous operation as the signature
    pub async fn set_signature_file_from_result<R>(
        &mut self,
        result: &FileResult<'_, R>,
    ) -> Result<()>
    where
        R: RestClient + ?Sized,
    {
        self.signature_file = Some(result.to_file_reference().await?);
        Ok(())
    }

    /// Alias of `set_signature_file_from_path`
    pub fn set_signature_file<P: AsRef<Path>>(&mut self, path: P) {
        self.set_signature_file_from_path(path);
    }

    /// Whether the service should validate the signatures, or just decode
    /// them. Validation is on by default.
    pub fn set_validate(&mut self, validate: bool) {
        self.validate = validate;
    }

    /// Policy to validate signatures against when they do not carry an
    /// explicit one
    pub fn set_default_signature_policy_id<S: Into<String>>(&mut self, policy_id: S) {
        self.default_signature_policy_id = Some(policy_id.into());
    }

    /// Restrict the explicit policies a signature may declare
    pub fn set_acceptable_explicit_policies<I, S>(&mut self, policy_ids: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.acceptable_explicit_policies =
            Some(policy_ids.into_iter().map(Into::into).collect());
    }

    /// Security context (set of trusted roots) to validate against
    pub fn set_security_context_id<S: Into<String>>(&mut self, security_context_id: S) {
        self.security_context_id = Some(security_context_id.into());
    }

    pub fn set_ignore_revocation_status_unknown(&mut self, ignore: bool) {
        self.ignore_revocation_status_unknown = ignore;
    }

    fn require_signature_file(&self) -> Result<&FileReference> {
        self.signature_file
            .as_ref()
            .ok_or_else(|| anyhow!("The signature file to open was not set"))
    }

    /// Reference the signature file the way requests expect it
    pub async fn signature_file_reference(&self) -> Result<FileReferenceModel> {
        self.require_signature_file()?
            .upload_or_reference(self.client)
            .await
    }

    /// The request body fields common to every "open signature" operation
    pub async fn request(&self) -> Result<OpenSignatureRequest> {
        Ok(OpenSignatureRequest {
            file: self.signature_file_reference().await?,
            validate: self.validate,
            default_signature_policy_id: self.default_signature_policy_id.clone(),
            acceptable_explicit_policies: self.acceptable_explicit_policies.clone(),
            security_context_id: self.security_context_id.clone(),
            ignore_revocation_status_unknown: self.ignore_revocation_status_unknown,
        })
    }
}
