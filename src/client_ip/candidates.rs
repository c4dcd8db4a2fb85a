use std::collections::HashSet;
use std::net::{Ipv4Addr, Ipv6Addr};
use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;

use super::HeaderSet;

pub const CF_CONNECTING_IP: &str = "cf-connecting-ip";
pub const TRUE_CLIENT_IP: &str = "true-client-ip";
pub const CLOUDFRONT_VIEWER_ADDRESS: &str = "cloudfront-viewer-address";
pub const X_APIGATEWAY_EVENT: &str = "x-apigateway-event";
pub const X_FORWARDED_FOR: &str = "x-forwarded-for";
pub const X_REAL_IP: &str = "x-real-ip";
pub const X_CLIENT_IP: &str = "x-client-ip";
pub const FORWARDED: &str = "forwarded";
pub const X_REMOTE_ADDR: &str = "x-remote-addr";

/// A header that may carry the client address, with its trust priority.
#[derive(Debug, Clone, Copy)]
pub struct CandidateHeader {
    pub name: &'static str,
    pub priority: u8,
    /// The value is always `address:port`, including unbracketed IPv6.
    pub carries_port: bool,
}

const fn header(name: &'static str, priority: u8) -> CandidateHeader {
    CandidateHeader {
        name,
        priority,
        carries_port: false,
    }
}

/// Scanned in this order, highest trust first.
pub const CANDIDATE_HEADERS: [CandidateHeader; 9] = [
    header(CF_CONNECTING_IP, 100),
    header(TRUE_CLIENT_IP, 95),
    CandidateHeader {
        name: CLOUDFRONT_VIEWER_ADDRESS,
        priority: 90,
        carries_port: true,
    },
    header(X_APIGATEWAY_EVENT, 85),
    header(X_FORWARDED_FOR, 80),
    header(X_REAL_IP, 75),
    header(X_CLIENT_IP, 70),
    header(FORWARDED, 65),
    header(X_REMOTE_ADDR, 60),
];

/// `(network, prefix length)` blocks never treated as a public client.
const RESERVED_V4: [([u8; 4], u32); 6] = [
    ([0, 0, 0, 0], 8),
    ([127, 0, 0, 0], 8),
    ([10, 0, 0, 0], 8),
    ([172, 16, 0, 0], 12),
    ([192, 168, 0, 0], 16),
    ([169, 254, 0, 0], 16),
];

/// Unique-local and link-local, matched on the literal leading group.
const RESERVED_V6_PREFIXES: [&str; 2] = ["fc00:", "fe80:"];

#[allow(clippy::expect_used)]
static IPV4: LazyLock<Regex> = LazyLock::new(|| {
    let octet = r"(?:25[0-5]|2[0-4]\d|1\d\d|[1-9]?\d)";
    Regex::new(&format!(r"^{octet}(?:\.{octet}){{3}}$")).expect("valid regex")
});

#[allow(clippy::expect_used)]
static IPV6: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9A-Fa-f]{0,4}(?::[0-9A-Fa-f]{0,4}){2,7}$").expect("valid regex")
});

#[allow(clippy::expect_used)]
static FORWARDED_FOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)for=\s*"?\[?([^\]";,\s]+)"#).expect("valid regex")
});

/// One address pulled from one header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IpCandidate {
    pub ip: String,
    pub priority: u8,
    pub source: &'static str,
}

/// Everything the header scan found, in scan order.
#[derive(Debug, Default)]
pub struct Scan {
    pub candidates: Vec<IpCandidate>,
    /// Distinct addresses in first-seen order.
    pub chain: Vec<String>,
}

/// Walk [`CANDIDATE_HEADERS`] and collect every valid public address.
#[must_use]
pub fn scan(headers: &HeaderSet) -> Scan {
    let mut scan = Scan::default();
    let mut chained: HashSet<String> = HashSet::new();

    for candidate_header in &CANDIDATE_HEADERS {
        let Some(raw) = headers.get(candidate_header.name) else {
            continue;
        };

        let mut seen_here: HashSet<String> = HashSet::new();
        for token in HeaderValue::classify(raw).tokens() {
            let Some(ip) = normalize(&token, candidate_header.carries_port) else {
                continue;
            };
            if !seen_here.insert(ip.clone()) {
                continue;
            }
            if chained.insert(ip.clone()) {
                scan.chain.push(ip.clone());
            }
            scan.candidates.push(IpCandidate {
                ip,
                priority: candidate_header.priority,
                source: candidate_header.name,
            });
        }
    }

    scan
}

/// Shape of a raw header value.
#[derive(Debug, PartialEq, Eq)]
enum HeaderValue<'a> {
    /// API gateway event JSON exposing the caller's source address.
    GatewayEvent(String),
    /// Comma or whitespace separated list, possibly with `for=` pairs.
    Delimited(&'a str),
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GatewayEvent {
    request_context: RequestContext,
}

#[derive(Deserialize)]
struct RequestContext {
    /// REST API shape.
    identity: Option<SourceIdentity>,
    /// HTTP API shape.
    http: Option<SourceIdentity>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SourceIdentity {
    source_ip: Option<String>,
}

impl<'a> HeaderValue<'a> {
    fn classify(raw: &'a str) -> Self {
        if raw.trim_start().starts_with('{') {
            let source_ip = serde_json::from_str::<GatewayEvent>(raw)
                .ok()
                .and_then(|event| {
                    let ctx = event.request_context;
                    ctx.identity
                        .and_then(|id| id.source_ip)
                        .or_else(|| ctx.http.and_then(|http| http.source_ip))
                });
            if let Some(ip) = source_ip {
                return Self::GatewayEvent(ip);
            }
        }
        Self::Delimited(raw)
    }

    fn tokens(self) -> Vec<String> {
        match self {
            Self::GatewayEvent(ip) => vec![ip],
            Self::Delimited(raw) => raw
                .split(|c: char| c == ',' || c.is_whitespace())
                .filter(|token| !token.is_empty())
                .map(|token| {
                    FORWARDED_FOR
                        .captures(token)
                        .and_then(|caps| caps.get(1))
                        .map_or(token, |m| m.as_str())
                        .to_string()
                })
                .collect(),
        }
    }
}

/// Strip port and brackets, then keep the address only if it is a
/// well-formed public IPv4 or IPv6 literal.
#[must_use]
pub fn normalize(token: &str, carries_port: bool) -> Option<String> {
    let ip = strip_port(token.trim().trim_matches('"'), carries_port);

    if IPV4.is_match(ip) {
        let addr: Ipv4Addr = ip.parse().ok()?;
        return (!is_reserved_v4(addr)).then(|| ip.to_string());
    }
    if IPV6.is_match(ip) {
        let addr: Ipv6Addr = ip.parse().ok()?;
        return (!addr.is_unspecified() && !is_reserved_v6(ip)).then(|| ip.to_string());
    }
    None
}

fn strip_port(token: &str, carries_port: bool) -> &str {
    if let Some(rest) = token.strip_prefix('[') {
        return rest.split_once(']').map_or(rest, |(inner, _)| inner);
    }

    let split = if carries_port {
        token.rsplit_once(':')
    } else if token.matches(':').count() == 1 {
        token.split_once(':')
    } else {
        None
    };

    match split {
        Some((host, port)) if !port.is_empty() && port.bytes().all(|b| b.is_ascii_digit()) => host,
        _ => token,
    }
}

fn is_reserved_v4(addr: Ipv4Addr) -> bool {
    let bits = u32::from(addr);
    RESERVED_V4.iter().any(|&(network, prefix_len)| {
        let mask = u32::MAX << (32 - prefix_len);
        bits & mask == u32::from_be_bytes(network)
    })
}

fn is_reserved_v6(ip: &str) -> bool {
    let lower = ip.to_ascii_lowercase();
    RESERVED_V6_PREFIXES
        .iter()
        .any(|prefix| lower.starts_with(prefix))
}
