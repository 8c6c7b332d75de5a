//! Tencent-COS-style object storage client.
//!
//! Implements the PUT-object request with the COS `q-signature` scheme: a
//! time-windowed signing key derived from the secret key, applied to a digest
//! of the request, both steps HMAC-SHA1.

use crate::packager::error::{Error, ErrorExt, Result};
use crate::packager::publish::Uploader;
use async_trait::async_trait;
use sha1::{Digest, Sha1};
use std::path::Path;
use tokio_util::io::ReaderStream;

/// Environment variable holding the credential id.
pub const SECRET_ID_VAR: &str = "SECRETID";

/// Environment variable holding the credential key.
pub const SECRET_KEY_VAR: &str = "SECRETKEY";

/// Validity window of a signing key, in seconds.
const KEY_TIME_WINDOW_SECS: i64 = 3600;

/// Object storage upload client authenticating with the `q-signature` scheme.
pub struct CosUploader {
    secret_id: String,
    secret_key: String,
    endpoint: String,
}

impl CosUploader {
    /// Creates an uploader for the given endpoint with explicit credentials.
    pub fn new<S: Into<String>>(secret_id: S, secret_key: S, endpoint: S) -> Self {
        Self {
            secret_id: secret_id.into(),
            secret_key: secret_key.into(),
            endpoint: endpoint.into(),
        }
    }

    /// Creates an uploader reading credentials from the environment.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingCredential`] naming the absent variable.
    pub fn from_env<S: Into<String>>(endpoint: S) -> Result<Self> {
        let secret_id =
            std::env::var(SECRET_ID_VAR).map_err(|_| Error::MissingCredential(SECRET_ID_VAR))?;
        let secret_key =
            std::env::var(SECRET_KEY_VAR).map_err(|_| Error::MissingCredential(SECRET_KEY_VAR))?;

        Ok(Self {
            secret_id,
            secret_key,
            endpoint: endpoint.into(),
        })
    }
}

#[async_trait]
impl Uploader for CosUploader {
    async fn upload_file(&self, local_path: &Path, remote_key: &str) -> Result<()> {
        let url = format!("{}/{}", self.endpoint, remote_key);
        log::info!("Uploading {} to {}", local_path.display(), url);

        let metadata = tokio::fs::metadata(local_path)
            .await
            .fs_context("reading upload metadata", local_path)?;
        let file = tokio::fs::File::open(local_path)
            .await
            .fs_context("opening upload source", local_path)?;

        let now = chrono::Utc::now().timestamp();
        let key_time = format!("{};{}", now - 60, now + KEY_TIME_WINDOW_SECS);
        let authorization = authorization(
            &self.secret_id,
            &self.secret_key,
            "put",
            &format!("/{remote_key}"),
            &key_time,
        );

        let response = reqwest::Client::new()
            .put(&url)
            .header(reqwest::header::AUTHORIZATION, authorization)
            .header(reqwest::header::CONTENT_LENGTH, metadata.len())
            .body(reqwest::Body::wrap_stream(ReaderStream::new(file)))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Error::GenericError(format!(
                "Upload of {remote_key} failed with status {}",
                response.status()
            )));
        }

        log::info!("Uploaded {remote_key}");
        Ok(())
    }
}

/// Builds the `q-signature` authorization header for a request.
fn authorization(
    secret_id: &str,
    secret_key: &str,
    method: &str,
    uri_path: &str,
    key_time: &str,
) -> String {
    let sign_key = hex::encode(hmac_sha1(secret_key.as_bytes(), key_time.as_bytes()));

    // Canonical request with empty parameter and header lists
    let http_string = format!("{method}\n{uri_path}\n\n\n");
    let http_string_digest = hex::encode(Sha1::digest(http_string.as_bytes()));
    let string_to_sign = format!("sha1\n{key_time}\n{http_string_digest}\n");

    let signature = hex::encode(hmac_sha1(sign_key.as_bytes(), string_to_sign.as_bytes()));

    format!(
        "q-sign-algorithm=sha1&q-ak={secret_id}&q-sign-time={key_time}&q-key-time={key_time}\
         &q-header-list=&q-url-param-list=&q-signature={signature}"
    )
}

/// HMAC-SHA1 per RFC 2104, composed over the SHA-1 digest.
fn hmac_sha1(key: &[u8], message: &[u8]) -> [u8; 20] {
    const BLOCK_SIZE: usize = 64;

    let mut block_key = [0u8; BLOCK_SIZE];
    if key.len() > BLOCK_SIZE {
        let digest = Sha1::digest(key);
        block_key[..digest.len()].copy_from_slice(&digest);
    } else {
        block_key[..key.len()].copy_from_slice(key);
    }

    let mut inner = Sha1::new();
    let ipad: Vec<u8> = block_key.iter().map(|b| b ^ 0x36).collect();
    inner.update(&ipad);
    inner.update(message);
    let inner_digest = inner.finalize();

    let mut outer = Sha1::new();
    let opad: Vec<u8> = block_key.iter().map(|b| b ^ 0x5c).collect();
    outer.update(&opad);
    outer.update(inner_digest);
    outer.finalize().into()
}

#[cfg(test)]
mod tests {
    use super::*;

    // RFC 2202 HMAC-SHA1 test vectors
    #[test]
    fn hmac_sha1_matches_rfc_2202_vectors() {
        assert_eq!(
            hex::encode(hmac_sha1(&[0x0b; 20], b"Hi There")),
            "b617318655057264e28bc0b6fb378c8ef146be00"
        );
        assert_eq!(
            hex::encode(hmac_sha1(b"Jefe", b"what do ya want for nothing?")),
            "effcbdf48b1d91a3c28b5dca0b63b1b6ba5ebc6f"
        );
        // Larger-than-block-size key, hashed first
        assert_eq!(
            hex::encode(hmac_sha1(&[0xaa; 80], b"Test Using Larger Than Block-Size Key - Hash Key First")),
            "aa4ae5e15272d00e95705637ce8a3b55ed402112"
        );
    }

    #[test]
    fn authorization_header_has_signature_shape() {
        let header = authorization(
            "AKIDexample",
            "secret",
            "put",
            "/package/release/AmiyaBot-v6.0.1-linux.zip",
            "1700000000;1700003600",
        );

        assert!(header.starts_with("q-sign-algorithm=sha1&q-ak=AKIDexample&q-sign-time="));
        assert!(header.contains("&q-key-time=1700000000;1700003600"));
        assert!(header.contains("&q-header-list=&q-url-param-list=&q-signature="));

        let signature = header.split("&q-signature=").nth(1).expect("signature");
        assert_eq!(signature.len(), 40);
        assert!(signature.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn signature_is_deterministic_for_fixed_key_time() {
        let a = authorization("ak", "sk", "put", "/key", "1;2");
        let b = authorization("ak", "sk", "put", "/key", "1;2");
        assert_eq!(a, b);

        let c = authorization("ak", "sk", "put", "/other", "1;2");
        assert_ne!(a, c);
    }

    #[test]
    fn from_env_names_the_missing_credential() {
        unsafe {
            std::env::remove_var(SECRET_ID_VAR);
            std::env::remove_var(SECRET_KEY_VAR);
        }
        let result = CosUploader::from_env("https://cos.amiyabot.com");
        assert!(matches!(result, Err(Error::MissingCredential(SECRET_ID_VAR))));
    }
}
