//! Subscription link decoding.
//!
//! One subscription link encodes one proxy endpoint:
//!
//! ```text
//! ss://<base64(method:password)>@<host>:<port>#<url-encoded remarks>
//! ```
//!
//! Decoding is a pure function; every failure maps to
//! [`TproxyError::MalformedLink`].

use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine as _;
use percent_encoding::percent_decode_str;
use serde::{Deserialize, Serialize};

use crate::error::TproxyError;

const SCHEME: &str = "ss://";

/// Standard-alphabet base64, tolerant of missing padding. Subscription
/// providers are inconsistent about padding their blobs.
pub(crate) const BASE64: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// One decoded proxy endpoint.
///
/// Field order matters: it is the serialization order of the entries in the
/// rendered server-config document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerDescriptor {
    pub server: String,
    pub server_port: u16,
    pub password: String,
    pub method: String,
    pub remarks: String,
}

/// Decode a single subscription link into a [`ServerDescriptor`].
///
/// # Examples
/// ```
/// use tproxyctl::link::decode_link;
///
/// let d = decode_link("ss://bTE6cGFzcw==@1.2.3.4:8388#My%20Node").unwrap();
/// assert_eq!(d.server, "1.2.3.4");
/// assert_eq!(d.server_port, 8388);
/// assert_eq!(d.method, "m1");
/// assert_eq!(d.password, "pass");
/// assert_eq!(d.remarks, "My Node");
/// ```
pub fn decode_link(link: &str) -> Result<ServerDescriptor, TproxyError> {
    let rest = link
        .strip_prefix(SCHEME)
        .ok_or_else(|| TproxyError::MalformedLink(format!("missing '{}' scheme", SCHEME)))?;

    let (credentials_b64, host_part) = rest
        .split_once('@')
        .ok_or_else(|| TproxyError::MalformedLink("missing '@' separator".to_string()))?;

    // A missing '#' means the link simply has no remarks.
    let (address_port, remarks_encoded) = match host_part.split_once('#') {
        Some((addr, remarks)) => (addr, remarks),
        None => (host_part, ""),
    };

    let (server, port_str) = address_port
        .split_once(':')
        .ok_or_else(|| TproxyError::MalformedLink("missing ':' before port".to_string()))?;
    if server.is_empty() {
        return Err(TproxyError::MalformedLink("empty server address".to_string()));
    }

    let server_port: u16 = port_str
        .parse()
        .map_err(|_| TproxyError::MalformedLink(format!("invalid port '{}'", port_str)))?;

    let remarks = decode_form_component(remarks_encoded)?;

    let decoded = BASE64
        .decode(credentials_b64)
        .map_err(|e| TproxyError::MalformedLink(format!("invalid base64 credentials: {}", e)))?;
    let decoded = String::from_utf8(decoded)
        .map_err(|_| TproxyError::MalformedLink("credentials are not UTF-8".to_string()))?;

    let (method, password) = split_credentials(&decoded);

    Ok(ServerDescriptor {
        server: server.to_string(),
        server_port,
        password,
        method,
        remarks,
    })
}

/// Percent-decode with `application/x-www-form-urlencoded` semantics
/// (`+` decodes to a space).
///
/// Every `%` must introduce a two-hex-digit escape; `percent_decode_str`
/// passes malformed sequences through verbatim, so they are rejected here
/// first.
fn decode_form_component(s: &str) -> Result<String, TproxyError> {
    let plus_decoded = s.replace('+', " ");

    let bytes = plus_decoded.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let complete = i + 2 < bytes.len()
                && bytes[i + 1].is_ascii_hexdigit()
                && bytes[i + 2].is_ascii_hexdigit();
            if !complete {
                return Err(TproxyError::MalformedLink(format!(
                    "invalid percent-encoding in '{}'",
                    s
                )));
            }
            i += 3;
        } else {
            i += 1;
        }
    }

    percent_decode_str(&plus_decoded)
        .decode_utf8()
        .map(|cow| cow.into_owned())
        .map_err(|_| TproxyError::MalformedLink(format!("invalid percent-encoding in '{}'", s)))
}

/// Split a decoded `method:password` credential string.
///
/// The method is everything before the first colon, the password everything
/// after the last one. With no colon at all, both degrade to the whole
/// string — preserved exactly as the upstream format behaves.
fn split_credentials(decoded: &str) -> (String, String) {
    match (decoded.find(':'), decoded.rfind(':')) {
        (Some(first), Some(last)) => (
            decoded[..first].to_string(),
            decoded[last + 1..].to_string(),
        ),
        _ => (decoded.to_string(), decoded.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_full_link() {
        // base64("m1:pass") == "bTE6cGFzcw=="
        let d = decode_link("ss://bTE6cGFzcw==@1.2.3.4:8388#My%20Node").unwrap();
        assert_eq!(
            d,
            ServerDescriptor {
                server: "1.2.3.4".to_string(),
                server_port: 8388,
                password: "pass".to_string(),
                method: "m1".to_string(),
                remarks: "My Node".to_string(),
            }
        );
    }

    #[test]
    fn test_decode_unpadded_base64() {
        // Same credentials without padding characters.
        let d = decode_link("ss://bTE6cGFzcw@1.2.3.4:8388#x").unwrap();
        assert_eq!(d.method, "m1");
        assert_eq!(d.password, "pass");
    }

    #[test]
    fn test_missing_hash_means_empty_remarks() {
        let d = decode_link("ss://bTE6cGFzcw==@1.2.3.4:8388").unwrap();
        assert_eq!(d.remarks, "");
    }

    #[test]
    fn test_missing_at_fails() {
        let err = decode_link("ss://bTE6cGFzcw==1.2.3.4:8388").unwrap_err();
        assert!(matches!(err, TproxyError::MalformedLink(_)));
    }

    #[test]
    fn test_missing_scheme_fails() {
        assert!(decode_link("vmess://whatever").is_err());
        assert!(decode_link("ss:").is_err());
        assert!(decode_link("").is_err());
    }

    #[test]
    fn test_invalid_base64_fails() {
        let err = decode_link("ss://!!!not-base64!!!@1.2.3.4:8388#x").unwrap_err();
        assert!(matches!(err, TproxyError::MalformedLink(_)));
    }

    #[test]
    fn test_non_numeric_port_fails() {
        let err = decode_link("ss://bTE6cGFzcw==@1.2.3.4:https#x").unwrap_err();
        assert!(matches!(err, TproxyError::MalformedLink(_)));
    }

    #[test]
    fn test_port_out_of_range_fails() {
        assert!(decode_link("ss://bTE6cGFzcw==@1.2.3.4:65536#x").is_err());
        assert!(decode_link("ss://bTE6cGFzcw==@1.2.3.4:-1#x").is_err());
    }

    #[test]
    fn test_missing_port_separator_fails() {
        let err = decode_link("ss://bTE6cGFzcw==@host#x").unwrap_err();
        assert!(matches!(err, TproxyError::MalformedLink(_)));
    }

    #[test]
    fn test_invalid_percent_sequence_in_remarks_fails() {
        // '%' not followed by two hex digits is malformed, not literal text.
        let err = decode_link("ss://bTE6cGFzcw==@1.2.3.4:8388#Bad%GGRemark").unwrap_err();
        assert!(matches!(err, TproxyError::MalformedLink(_)));
    }

    #[test]
    fn test_truncated_percent_sequence_in_remarks_fails() {
        assert!(decode_link("ss://bTE6cGFzcw==@1.2.3.4:8388#trail%2").is_err());
        assert!(decode_link("ss://bTE6cGFzcw==@1.2.3.4:8388#trail%").is_err());
    }

    #[test]
    fn test_plus_decodes_to_space_in_remarks() {
        let d = decode_link("ss://bTE6cGFzcw==@1.2.3.4:8388#My+Node+%231").unwrap();
        assert_eq!(d.remarks, "My Node #1");
    }

    #[test]
    fn test_credentials_without_colon() {
        // base64("secret") == "c2VjcmV0"
        let d = decode_link("ss://c2VjcmV0@1.2.3.4:8388").unwrap();
        assert_eq!(d.method, "secret");
        assert_eq!(d.password, "secret");
    }

    #[test]
    fn test_credentials_with_multiple_colons() {
        // base64("aes-256-gcm:pa:ss:word") == "YWVzLTI1Ni1nY206cGE6c3M6d29yZA=="
        let d = decode_link("ss://YWVzLTI1Ni1nY206cGE6c3M6d29yZA==@1.2.3.4:8388").unwrap();
        assert_eq!(d.method, "aes-256-gcm");
        assert_eq!(d.password, "word");
    }

    #[test]
    fn test_empty_password() {
        // base64("m1:") == "bTE6"
        let d = decode_link("ss://bTE6@1.2.3.4:8388").unwrap();
        assert_eq!(d.method, "m1");
        assert_eq!(d.password, "");
    }

    #[test]
    fn test_empty_server_fails() {
        let err = decode_link("ss://bTE6cGFzcw==@:8388").unwrap_err();
        assert!(matches!(err, TproxyError::MalformedLink(_)));
    }

    #[test]
    fn test_descriptor_serializes_in_wire_order() {
        let d = ServerDescriptor {
            server: "h".to_string(),
            server_port: 1,
            password: "p".to_string(),
            method: "m".to_string(),
            remarks: "r".to_string(),
        };
        let json = serde_json::to_string(&d).unwrap();
        assert_eq!(
            json,
            r#"{"server":"h","server_port":1,"password":"p","method":"m","remarks":"r"}"#
        );
    }
}
