//! Client for the CAdES signature operations of the REST PKI service.
//!
//! The service does the cryptographic work: parsing the CMS container,
//! validating certificate chains and checking message digests. This crate
//! composes the requests, negotiates the digests required for detached
//! signatures, and reshapes the responses for local consumption.
//!
//! Transport is abstracted behind [`client::RestClient`]; see the
//! `rest-pki-reqwest` crate for an HTTP implementation.

pub mod cades;
pub mod client;
pub mod digest;
pub mod explorer;
pub mod file;
pub mod format;
pub mod models;
pub mod serde;
pub mod validation;

#[cfg(test)]
mod tests;
