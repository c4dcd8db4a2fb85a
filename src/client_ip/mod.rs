//! Best-effort client IP resolution from proxy and CDN headers.
//!
//! [`resolve`] scans a fixed, priority-ordered list of headers, filters out
//! private and reserved addresses, ranks what is left and scores how much the
//! winning header can be trusted given the detected hosting environment.
//! It is a pure function of the header set and never fails: when nothing
//! usable is found the result carries `0.0.0.0` with zero confidence.

pub mod candidates;
pub mod environment;
pub mod extract;
pub mod headers;

use serde::Serialize;

pub use candidates::{CANDIDATE_HEADERS, CandidateHeader, IpCandidate};
pub use environment::{Environment, EnvironmentTag};
pub use extract::ClientIp;
pub use headers::HeaderSet;

use candidates::{CF_CONNECTING_IP, CLOUDFRONT_VIEWER_ADDRESS, X_FORWARDED_FOR};

/// Reported when no header yields a usable address.
pub const UNRESOLVED_IP: &str = "0.0.0.0";
pub const UNRESOLVED_SOURCE: &str = "none";

const BASE_CONFIDENCE: u8 = 70;

/// Outcome of one resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Resolution {
    pub ip: String,
    /// Every other distinct candidate, in rank order. Never contains `ip`.
    #[serde(rename = "alternativeIPs")]
    pub alternative_ips: Vec<String>,
    pub source: &'static str,
    pub confidence: u8,
    pub debug: ResolutionDebug,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolutionDebug {
    pub headers: HeaderSet,
    pub environment: String,
    /// Distinct addresses in the order the scan first met them.
    pub ip_chain: Vec<String>,
}

impl Resolution {
    #[must_use]
    pub fn is_resolved(&self) -> bool {
        self.source != UNRESOLVED_SOURCE
    }
}

/// Resolve the most plausible public client address for a request.
#[must_use]
pub fn resolve(headers: &HeaderSet) -> Resolution {
    let environment = Environment::detect(headers);
    let scan = candidates::scan(headers);

    let mut ranked = scan.candidates;
    // `sort_by` is stable, so equal priorities keep discovery order.
    ranked.sort_by(|a, b| b.priority.cmp(&a.priority));

    let debug = ResolutionDebug {
        headers: headers.clone(),
        environment: environment.to_string(),
        ip_chain: scan.chain,
    };

    let mut ranked = ranked.into_iter();
    let Some(primary) = ranked.next() else {
        return Resolution {
            ip: UNRESOLVED_IP.to_string(),
            alternative_ips: Vec::new(),
            source: UNRESOLVED_SOURCE,
            confidence: 0,
            debug,
        };
    };

    let mut alternative_ips: Vec<String> = Vec::new();
    for candidate in ranked {
        if candidate.ip != primary.ip && !alternative_ips.contains(&candidate.ip) {
            alternative_ips.push(candidate.ip);
        }
    }

    Resolution {
        confidence: confidence(primary.source, &environment),
        ip: primary.ip,
        alternative_ips,
        source: primary.source,
        debug,
    }
}

fn confidence(source: &str, environment: &Environment) -> u8 {
    match source {
        CF_CONNECTING_IP if environment.has(EnvironmentTag::Cloudflare) => 100,
        CLOUDFRONT_VIEWER_ADDRESS if environment.has(EnvironmentTag::Aws) => 95,
        X_FORWARDED_FOR if environment.has(EnvironmentTag::Aws) => 90,
        X_FORWARDED_FOR => 80,
        _ => BASE_CONFIDENCE,
    }
}
