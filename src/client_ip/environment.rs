use std::fmt;

use super::HeaderSet;

/// Hosting or CDN platform inferred from marker headers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvironmentTag {
    Cloudflare,
    Aws,
    Vercel,
    Amplify,
}

impl EnvironmentTag {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Cloudflare => "Cloudflare",
            Self::Aws => "AWS",
            Self::Vercel => "Vercel",
            Self::Amplify => "Amplify",
        }
    }
}

struct Marker {
    tag: EnvironmentTag,
    header: &'static str,
    /// When set, the header value must contain this substring.
    contains: Option<&'static str>,
}

/// Checked in order; the order fixes how tags appear in the joined string.
const MARKERS: [Marker; 4] = [
    Marker {
        tag: EnvironmentTag::Cloudflare,
        header: "cf-ray",
        contains: None,
    },
    Marker {
        tag: EnvironmentTag::Aws,
        header: "x-amzn-trace-id",
        contains: None,
    },
    Marker {
        tag: EnvironmentTag::Vercel,
        header: "x-vercel-id",
        contains: None,
    },
    Marker {
        tag: EnvironmentTag::Amplify,
        header: "host",
        contains: Some("amplifyapp.com"),
    },
];

/// Set of environment tags detected for one request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Environment {
    tags: Vec<EnvironmentTag>,
}

impl Environment {
    #[must_use]
    pub fn detect(headers: &HeaderSet) -> Self {
        let tags = MARKERS
            .iter()
            .filter(|marker| {
                headers
                    .get(marker.header)
                    .is_some_and(|value| {
                        marker
                            .contains
                            .is_none_or(|s| value.to_ascii_lowercase().contains(s))
                    })
            })
            .map(|marker| marker.tag)
            .collect();

        Self { tags }
    }

    #[must_use]
    pub fn has(&self, tag: EnvironmentTag) -> bool {
        self.tags.contains(&tag)
    }

    #[must_use]
    pub fn tags(&self) -> &[EnvironmentTag] {
        &self.tags
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.tags.is_empty() {
            return f.write_str("Unknown");
        }
        for (i, tag) in self.tags.iter().enumerate() {
            if i > 0 {
                f.write_str("+")?;
            }
            f.write_str(tag.as_str())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(pairs: &[(&str, &str)]) -> HeaderSet {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_no_markers_is_unknown() {
        let env = Environment::detect(&headers(&[("host", "example.com")]));
        assert!(env.tags().is_empty());
        assert_eq!(env.to_string(), "Unknown");
    }

    #[test]
    fn test_tags_follow_marker_order() {
        let env = Environment::detect(&headers(&[
            ("host", "main.d1x2y3.amplifyapp.com"),
            ("x-amzn-trace-id", "Root=1-abc"),
            ("cf-ray", "8a1b2c3d4e5f-NRT"),
        ]));
        assert_eq!(env.to_string(), "Cloudflare+AWS+Amplify");
        assert!(env.has(EnvironmentTag::Cloudflare));
        assert!(!env.has(EnvironmentTag::Vercel));
    }

    #[test]
    fn test_host_marker_ignores_case() {
        let env = Environment::detect(&headers(&[("host", "Main.D1X2Y3.AmplifyApp.com")]));
        assert!(env.has(EnvironmentTag::Amplify));
    }

    #[test]
    fn test_host_marker_needs_substring() {
        let env = Environment::detect(&headers(&[("host", "status.example.org")]));
        assert!(!env.has(EnvironmentTag::Amplify));

        let env = Environment::detect(&headers(&[("x-vercel-id", "hnd1::abc")]));
        assert_eq!(env.to_string(), "Vercel");
    }
}
