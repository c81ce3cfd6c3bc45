//! 프록시 요청 전 대상 URL 검사(SSRF 차단).
//!
//! 공개 프록시를 통해 호출자 내부망을 탐색하지 못하도록
//! 프로토콜 허용 목록과 로컬/사설 주소 차단 목록을 적용한다.
//! 호스트 이름을 실제로 DNS 조회하지는 않는다. 공개 도메인이 사설 IP로
//! 해석되는 경우(DNS rebinding)는 여기서 잡을 수 없다.

use std::net::{Ipv4Addr, Ipv6Addr};

use url::{Host, Url};

use crate::domain::errors::FetchError;

/// 입력 URL을 파싱하고 허용 가능한 외부 주소인지 확인한다.
pub fn validate_target_url(input: &str) -> Result<Url, FetchError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(FetchError::EmptyUrl);
    }

    let url = Url::parse(input).map_err(|_| FetchError::InvalidUrl)?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(FetchError::InvalidProtocol(format!("{}:", url.scheme())));
    }

    match url.host().ok_or(FetchError::InvalidUrl)? {
        Host::Domain(domain) => check_domain(&domain.to_ascii_lowercase())?,
        Host::Ipv4(addr) => check_ipv4(addr)?,
        Host::Ipv6(addr) => check_ipv6(addr)?,
    }

    Ok(url)
}

fn check_domain(domain: &str) -> Result<(), FetchError> {
    // FQDN 표기(`localhost.`)도 같은 이름이다.
    let domain = domain.trim_end_matches('.');
    if domain == "localhost" || domain.ends_with(".localhost") {
        return Err(FetchError::LocalAccessDenied);
    }

    // 10.0.0.1.nip.io 처럼 앞쪽 레이블에 사설 IP를 숨긴 이름.
    // 4개 레이블이 모두 0-255 숫자일 때만 주소로 본다.
    let labels: Vec<&str> = domain.split('.').collect();
    for window in labels.windows(4) {
        let Some(octets) = parse_octets(window) else {
            continue;
        };
        if is_private_ipv4(Ipv4Addr::from(octets)) {
            return Err(FetchError::EmbeddedPrivateAddress);
        }
    }

    Ok(())
}

fn parse_octets(labels: &[&str]) -> Option<[u8; 4]> {
    let mut octets = [0u8; 4];
    for (slot, label) in octets.iter_mut().zip(labels) {
        if label.is_empty() || !label.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        *slot = label.parse().ok()?;
    }
    Some(octets)
}

fn check_ipv4(addr: Ipv4Addr) -> Result<(), FetchError> {
    if is_private_ipv4(addr) {
        return Err(FetchError::LocalAccessDenied);
    }
    Ok(())
}

fn check_ipv6(addr: Ipv6Addr) -> Result<(), FetchError> {
    let first = addr.segments()[0];
    let blocked = addr.is_loopback()
        || addr.is_unspecified()
        // fc00::/7 unique local
        || (first & 0xfe00) == 0xfc00
        // fe80::/10 link local
        || (first & 0xffc0) == 0xfe80
        || addr.to_ipv4_mapped().is_some_and(is_private_ipv4)
        // ::a.b.c.d (IPv4-compatible)
        || (addr.segments()[..6].iter().all(|s| *s == 0)
            && addr.to_ipv4().is_some_and(is_private_ipv4));

    if blocked {
        return Err(FetchError::LocalAccessDenied);
    }
    Ok(())
}

/// 10/8, 172.16/12, 192.168/16, 127/8, 169.254/16, 0/8
pub fn is_private_ipv4(addr: Ipv4Addr) -> bool {
    let [a, b, _, _] = addr.octets();
    a == 10
        || (a == 172 && (16..=31).contains(&b))
        || (a == 192 && b == 168)
        || a == 127
        || (a == 169 && b == 254)
        || a == 0
}
