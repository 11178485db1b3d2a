//! TLS listener configuration from PEM files.

use std::sync::Arc;

use rustls::pki_types::pem::PemObject;
use rustls::pki_types::{CertificateDer, PrivateKeyDer};
use rustls::ServerConfig;
use tracing::info;

use crate::config::app::TlsPaths;
use crate::error::AppError;

/// Build the rustls server configuration from the certificate chain and
/// private key at `paths`.
pub fn load_rustls_config(paths: &TlsPaths) -> Result<ServerConfig, AppError> {
    let cert_path = paths.cert_path.display();
    let key_path = paths.key_path.display();

    let certs = CertificateDer::pem_file_iter(&paths.cert_path)
        .map_err(|e| AppError::config(format!("cannot read TLS certificate {cert_path}: {e}")))?
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| AppError::config(format!("invalid TLS certificate {cert_path}: {e}")))?;
    if certs.is_empty() {
        return Err(AppError::config(format!(
            "no certificates found in {cert_path}"
        )));
    }

    let key = PrivateKeyDer::from_pem_file(&paths.key_path)
        .map_err(|e| AppError::config(format!("cannot read TLS private key {key_path}: {e}")))?;

    let chain_len = certs.len();
    let config = ServerConfig::builder_with_provider(Arc::new(
        rustls::crypto::ring::default_provider(),
    ))
    .with_safe_default_protocol_versions()
    .map_err(|e| AppError::config(format!("unsupported TLS protocol versions: {e}")))?
    .with_no_client_auth()
    .with_single_cert(certs, key)
    .map_err(|e| AppError::config(format!("TLS certificate and key do not form a valid pair: {e}")))?;

    info!(cert_path = %cert_path, chain_len, "TLS material loaded");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::path::PathBuf;

    use tempfile::NamedTempFile;

    use super::load_rustls_config;
    use crate::config::app::TlsPaths;
    use crate::error::AppError;

    fn file_with(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    fn expect_config_error(paths: &TlsPaths, needle: &str) {
        match load_rustls_config(paths) {
            Err(AppError::Config { detail }) => {
                assert!(detail.contains(needle), "unexpected detail: {detail}")
            }
            Err(other) => panic!("expected config error, got {other:?}"),
            Ok(_) => panic!("expected config error, got a TLS config"),
        }
    }

    #[test]
    fn test_missing_certificate_file() {
        let key = file_with("");
        let paths = TlsPaths {
            cert_path: PathBuf::from("/nonexistent/cert.pem"),
            key_path: key.path().to_path_buf(),
        };

        expect_config_error(&paths, "cannot read TLS certificate");
    }

    #[test]
    fn test_empty_certificate_chain() {
        let cert = file_with("not a pem file\n");
        let key = file_with("");
        let paths = TlsPaths {
            cert_path: cert.path().to_path_buf(),
            key_path: key.path().to_path_buf(),
        };

        expect_config_error(&paths, "no certificates found");
    }

    #[test]
    fn test_missing_private_key() {
        let cert = file_with(
            "-----BEGIN CERTIFICATE-----\nMIIBszCCAVmgAwIBAgIUQ2VydGlmaWNhdGU=\n-----END CERTIFICATE-----\n",
        );
        let key = file_with("no key here\n");
        let paths = TlsPaths {
            cert_path: cert.path().to_path_buf(),
            key_path: key.path().to_path_buf(),
        };

        expect_config_error(&paths, "cannot read TLS private key");
    }
}
