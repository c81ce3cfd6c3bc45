//! Subresource Integrity(SRI) 검증.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use sha2::{Digest, Sha256, Sha384, Sha512};

use crate::domain::errors::ScriptLoadError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum HashAlgorithm {
    Sha256,
    Sha384,
    Sha512,
}

impl HashAlgorithm {
    fn parse(prefix: &str) -> Option<Self> {
        match prefix {
            "sha256" => Some(Self::Sha256),
            "sha384" => Some(Self::Sha384),
            "sha512" => Some(Self::Sha512),
            _ => None,
        }
    }

    fn digest(self, body: &[u8]) -> Vec<u8> {
        match self {
            Self::Sha256 => Sha256::digest(body).to_vec(),
            Self::Sha384 => Sha384::digest(body).to_vec(),
            Self::Sha512 => Sha512::digest(body).to_vec(),
        }
    }
}

/// `sha384-<base64>` 형태의 토큰 목록(공백 구분)으로 본문을 검증한다.
///
/// 지원하는 알고리즘 중 가장 강한 것만 비교하며, 그 알고리즘의 토큰 중
/// 하나라도 일치하면 통과한다. `?opt` 접미사는 무시한다.
pub fn verify_integrity(src: &str, integrity: &str, body: &[u8]) -> Result<(), ScriptLoadError> {
    let mut expected: Vec<(HashAlgorithm, Vec<u8>)> = Vec::new();
    for token in integrity.split_whitespace() {
        let token = token.split('?').next().unwrap_or(token);
        let Some((prefix, encoded)) = token.split_once('-') else {
            continue;
        };
        let Some(algorithm) = HashAlgorithm::parse(prefix) else {
            continue;
        };
        let Ok(digest) = STANDARD.decode(encoded) else {
            continue;
        };
        expected.push((algorithm, digest));
    }

    let Some(strongest) = expected.iter().map(|(algorithm, _)| *algorithm).max() else {
        return Err(ScriptLoadError::InvalidIntegrity {
            src: src.to_string(),
            value: integrity.to_string(),
        });
    };

    let actual = strongest.digest(body);
    let matched = expected
        .iter()
        .any(|(algorithm, digest)| *algorithm == strongest && *digest == actual);
    if matched {
        Ok(())
    } else {
        Err(ScriptLoadError::IntegrityMismatch {
            src: src.to_string(),
        })
    }
}

/// 테스트와 진단에서 쓰는 SRI 문자열 생성기.
pub fn sri_sha384(body: &[u8]) -> String {
    format!("sha384-{}", STANDARD.encode(Sha384::digest(body)))
}
