//! OAuth 1.0a request signing (HMAC-SHA1), as used by the v1.1 account API.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use hmac::{Hmac, Mac};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use sha1::Sha1;

use statbanner_core::{Error, Result, TwitterCredentials};

type HmacSha1 = Hmac<Sha1>;

/// RFC 3986 unreserved characters stay as-is; everything else is encoded.
const OAUTH_ENCODE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

pub fn percent_encode(s: &str) -> String {
    utf8_percent_encode(s, OAUTH_ENCODE).to_string()
}

/// Per-request values that must be unique (nonce) and current (timestamp).
#[derive(Debug, Clone)]
pub struct RequestNonce {
    pub nonce: String,
    pub timestamp: i64,
}

impl RequestNonce {
    pub fn generate() -> Self {
        Self {
            nonce: uuid::Uuid::new_v4().simple().to_string(),
            timestamp: chrono::Utc::now().timestamp(),
        }
    }
}

/// Signs requests with a fixed set of user-context credentials.
pub struct OAuthSigner<'a> {
    credentials: &'a TwitterCredentials,
}

impl<'a> OAuthSigner<'a> {
    pub fn new(credentials: &'a TwitterCredentials) -> Self {
        Self { credentials }
    }

    fn oauth_params(&self, nonce: &RequestNonce) -> Vec<(String, String)> {
        vec![
            ("oauth_consumer_key".into(), self.credentials.consumer_key.clone()),
            ("oauth_nonce".into(), nonce.nonce.clone()),
            ("oauth_signature_method".into(), "HMAC-SHA1".into()),
            ("oauth_timestamp".into(), nonce.timestamp.to_string()),
            ("oauth_token".into(), self.credentials.access_token.clone()),
            ("oauth_version".into(), "1.0".into()),
        ]
    }

    /// Signature base string: method, URL and the sorted, encoded parameters.
    pub fn base_string(
        &self,
        method: &str,
        url: &str,
        params: &[(String, String)],
        nonce: &RequestNonce,
    ) -> String {
        let mut encoded: Vec<(String, String)> = params
            .iter()
            .cloned()
            .chain(self.oauth_params(nonce))
            .map(|(k, v)| (percent_encode(&k), percent_encode(&v)))
            .collect();
        encoded.sort();

        let param_string = encoded
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join("&");

        format!(
            "{}&{}&{}",
            method.to_ascii_uppercase(),
            percent_encode(url),
            percent_encode(&param_string)
        )
    }

    /// Base64 HMAC-SHA1 of the base string.
    pub fn signature(
        &self,
        method: &str,
        url: &str,
        params: &[(String, String)],
        nonce: &RequestNonce,
    ) -> Result<String> {
        let key = format!(
            "{}&{}",
            percent_encode(&self.credentials.consumer_secret),
            percent_encode(&self.credentials.access_secret)
        );
        let mut mac = HmacSha1::new_from_slice(key.as_bytes())
            .map_err(|e| Error::Publish(format!("Invalid signing key: {}", e)))?;
        mac.update(self.base_string(method, url, params, nonce).as_bytes());
        Ok(BASE64.encode(mac.finalize().into_bytes()))
    }

    /// Value for the `Authorization` header. `params` are the query and
    /// form-body parameters that will be sent with the request.
    pub fn authorization_header(
        &self,
        method: &str,
        url: &str,
        params: &[(String, String)],
        nonce: &RequestNonce,
    ) -> Result<String> {
        let signature = self.signature(method, url, params, nonce)?;
        let mut header_params = self.oauth_params(nonce);
        header_params.push(("oauth_signature".into(), signature));
        header_params.sort();

        let fields = header_params
            .iter()
            .map(|(k, v)| format!("{}=\"{}\"", percent_encode(k), percent_encode(v)))
            .collect::<Vec<_>>()
            .join(", ");
        Ok(format!("OAuth {}", fields))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Worked example from the platform's "creating a signature" guide.
    fn doc_credentials() -> TwitterCredentials {
        TwitterCredentials {
            consumer_key: "xvz1evFS4wEEPTGEFPHBog".into(),
            consumer_secret: "kAcSOqF21Fu85e7zjz7ZN2U4ZRhfV3WpwPAoE3Z7kBw".into(),
            access_token: "370773112-GmHxMAgYyLbNEtIKZeRNFsMKPR9EyMZeS9weJAEb".into(),
            access_secret: "LswwdoUaIvS8ltyTt5jkRh4J50vUPVVHtR2YPi5kE".into(),
        }
    }

    fn doc_nonce() -> RequestNonce {
        RequestNonce {
            nonce: "kYjzVBB8Y0ZFabxSWbWovY3uYSQ2pTgmZeNu2VS4cg".into(),
            timestamp: 1318622958,
        }
    }

    fn doc_params() -> Vec<(String, String)> {
        vec![
            ("include_entities".into(), "true".into()),
            (
                "status".into(),
                "Hello Ladies + Gentlemen, a signed OAuth request!".into(),
            ),
        ]
    }

    const DOC_URL: &str = "https://api.twitter.com/1.1/statuses/update.json";

    #[test]
    fn test_percent_encode() {
        assert_eq!(percent_encode("Ladies + Gentlemen"), "Ladies%20%2B%20Gentlemen");
        assert_eq!(percent_encode("An encoded string!"), "An%20encoded%20string%21");
        assert_eq!(percent_encode("Dogs, Cats & Mice"), "Dogs%2C%20Cats%20%26%20Mice");
        assert_eq!(percent_encode("a-b.c_d~e"), "a-b.c_d~e");
        assert_eq!(percent_encode("☃"), "%E2%98%83");
    }

    #[test]
    fn test_base_string_matches_reference() {
        let creds = doc_credentials();
        let signer = OAuthSigner::new(&creds);
        let base = signer.base_string("post", DOC_URL, &doc_params(), &doc_nonce());
        assert_eq!(
            base,
            "POST&https%3A%2F%2Fapi.twitter.com%2F1.1%2Fstatuses%2Fupdate.json&\
             include_entities%3Dtrue%26oauth_consumer_key%3Dxvz1evFS4wEEPTGEFPHBog%26\
             oauth_nonce%3DkYjzVBB8Y0ZFabxSWbWovY3uYSQ2pTgmZeNu2VS4cg%26\
             oauth_signature_method%3DHMAC-SHA1%26oauth_timestamp%3D1318622958%26\
             oauth_token%3D370773112-GmHxMAgYyLbNEtIKZeRNFsMKPR9EyMZeS9weJAEb%26\
             oauth_version%3D1.0%26status%3DHello%2520Ladies%2520%252B%2520Gentlemen%252C%2520\
             a%2520signed%2520OAuth%2520request%2521"
        );
    }

    #[test]
    fn test_signature_matches_reference() {
        let creds = doc_credentials();
        let signer = OAuthSigner::new(&creds);
        let sig = signer
            .signature("POST", DOC_URL, &doc_params(), &doc_nonce())
            .unwrap();
        assert_eq!(sig, "hCtSmYh+iHYCEqBWrE7C7hYmtUk=");
    }

    #[test]
    fn test_authorization_header_fields() {
        let creds = doc_credentials();
        let signer = OAuthSigner::new(&creds);
        let header = signer
            .authorization_header("POST", DOC_URL, &doc_params(), &doc_nonce())
            .unwrap();
        assert!(header.starts_with("OAuth oauth_consumer_key=\"xvz1evFS4wEEPTGEFPHBog\""));
        assert!(header.contains("oauth_signature=\"hCtSmYh%2BiHYCEqBWrE7C7hYmtUk%3D\""));
        assert!(header.contains("oauth_version=\"1.0\""));
        assert!(!header.contains("status="));
    }

    #[test]
    fn test_generated_nonces_differ() {
        let a = RequestNonce::generate();
        let b = RequestNonce::generate();
        assert_ne!(a.nonce, b.nonce);
        assert_eq!(a.nonce.len(), 32);
    }
}
