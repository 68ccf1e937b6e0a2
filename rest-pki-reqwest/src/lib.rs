//! HTTP transport for the `rest-pki` client.
//!
//! ```no_run
//! use rest_pki::cades::CadesSignatureExplorer;
//! use rest_pki_reqwest::{ClientConfig, RestPkiClient};
//!
//! # async fn run() -> anyhow::Result<()> {
//! let client = RestPkiClient::new(ClientConfig::new("https://pki.rest/", "access token")?)?;
//!
//! let mut explorer = CadesSignatureExplorer::new(&client);
//! explorer.explorer_mut().set_signature_file("signature.p7s");
//! explorer.set_data_file("document.pdf");
//!
//! let signature = explorer.open().await?;
//! for signer in &signature.signers {
//!     println!("{}", signer.validation_results);
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;

pub use client::RestPkiClient;
pub use config::ClientConfig;
pub use error::RestError;
