// ABOUTME: Pure hostname normalization and classification for tenant resolution
// ABOUTME: Maps a raw Host header to base domain, tenant subdomain, or custom domain shape
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Codeopx

//! # Hostname Normalizer
//!
//! Pure, infallible classification of a raw request hostname. No I/O happens
//! here; the [`crate::tenant::resolver`] consults the tenant directory only
//! after classification.
//!
//! Malformed input classifies as [`NormalizedHost::BaseDomain`]: a request we
//! cannot attribute to a tenant must fail safe toward "no tenant", never
//! toward a guessed one.

/// Shape of a normalized request hostname
///
/// A closed variant set: every consumer is forced to handle all cases.
/// `PossibleCustomDomain` is pending a directory lookup; classification alone
/// cannot tell a bound custom domain from an unknown host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NormalizedHost {
    /// The platform's own domain (or a reserved/unparseable host)
    BaseDomain,
    /// `{label}.{root_domain}` for a non-empty, non-reserved label
    TenantSubdomain {
        /// The extracted subdomain label, lowercased
        label: String,
    },
    /// Any other syntactically plausible hostname
    PossibleCustomDomain {
        /// The normalized (lowercased, port-stripped) hostname
        host: String,
    },
}

/// Hostname normalizer configured with the platform root domain and the
/// reserved labels that never resolve to a tenant
#[derive(Debug, Clone)]
pub struct HostnameNormalizer {
    root_domain: String,
    reserved_labels: Vec<String>,
}

impl HostnameNormalizer {
    /// Create a normalizer for the given root domain and reserved labels
    #[must_use]
    pub fn new(root_domain: &str, reserved_labels: &[String]) -> Self {
        Self {
            root_domain: root_domain.trim().to_lowercase(),
            reserved_labels: reserved_labels
                .iter()
                .map(|label| label.trim().to_lowercase())
                .collect(),
        }
    }

    /// The configured platform root domain
    #[must_use]
    pub fn root_domain(&self) -> &str {
        &self.root_domain
    }

    /// Whether a label is reserved and must never resolve to a tenant
    #[must_use]
    pub fn is_reserved(&self, label: &str) -> bool {
        self.reserved_labels
            .iter()
            .any(|reserved| reserved == &label.to_lowercase())
    }

    /// Rebuild the full hostname for a subdomain label
    #[must_use]
    pub fn subdomain_host(&self, label: &str) -> String {
        format!("{label}.{}", self.root_domain)
    }

    /// Normalize and classify a raw request hostname
    ///
    /// Strips a trailing `:port`, a trailing FQDN dot, and lowercases. Never
    /// fails: anything that does not parse as a plausible hostname classifies
    /// as `BaseDomain`.
    #[must_use]
    pub fn normalize(&self, raw_host: &str) -> NormalizedHost {
        let host = raw_host.trim().to_lowercase();
        let host = strip_port(&host);
        let host = host.trim_end_matches('.');

        if host.is_empty() || !is_plausible_hostname(host) {
            return NormalizedHost::BaseDomain;
        }

        if host == self.root_domain || self.is_reserved(host) {
            return NormalizedHost::BaseDomain;
        }

        if let Some(label) = host.strip_suffix(&format!(".{}", self.root_domain)) {
            // Only a single DNS label counts as a tenant subdomain; deeper
            // names under the root may still be bound custom domains.
            if !label.is_empty() && !label.contains('.') {
                if self.is_reserved(label) {
                    return NormalizedHost::BaseDomain;
                }
                return NormalizedHost::TenantSubdomain {
                    label: label.to_owned(),
                };
            }
        }

        NormalizedHost::PossibleCustomDomain {
            host: host.to_owned(),
        }
    }
}

/// Strip a trailing `:port` if the suffix is purely numeric
fn strip_port(host: &str) -> &str {
    match host.rsplit_once(':') {
        Some((name, port)) if !port.is_empty() && port.bytes().all(|b| b.is_ascii_digit()) => name,
        _ => host,
    }
}

/// Syntactic sanity check; rejects hosts we should never attribute to a tenant
fn is_plausible_hostname(host: &str) -> bool {
    !host.contains([':', '/', '@', ' ']) && !host.starts_with('.') && !host.contains("..")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normalizer() -> HostnameNormalizer {
        HostnameNormalizer::new("codeopx.com", &["www".into(), "localhost".into()])
    }

    #[test]
    fn test_base_domain() {
        assert_eq!(normalizer().normalize("codeopx.com"), NormalizedHost::BaseDomain);
        assert_eq!(
            normalizer().normalize("CODEOPX.COM:443"),
            NormalizedHost::BaseDomain
        );
    }

    #[test]
    fn test_subdomain_extraction() {
        assert_eq!(
            normalizer().normalize("shop1.codeopx.com"),
            NormalizedHost::TenantSubdomain {
                label: "shop1".into()
            }
        );
        assert_eq!(
            normalizer().normalize("Shop1.Codeopx.Com:8080"),
            NormalizedHost::TenantSubdomain {
                label: "shop1".into()
            }
        );
    }

    #[test]
    fn test_reserved_labels_are_base_domain() {
        assert_eq!(
            normalizer().normalize("www.codeopx.com"),
            NormalizedHost::BaseDomain
        );
        assert_eq!(normalizer().normalize("localhost"), NormalizedHost::BaseDomain);
        assert_eq!(
            normalizer().normalize("localhost:3000"),
            NormalizedHost::BaseDomain
        );
    }

    #[test]
    fn test_custom_domain_shape() {
        assert_eq!(
            normalizer().normalize("anjums-store.pk"),
            NormalizedHost::PossibleCustomDomain {
                host: "anjums-store.pk".into()
            }
        );
        // Multi-level names under the root are custom-domain shaped, not labels
        assert_eq!(
            normalizer().normalize("a.b.codeopx.com"),
            NormalizedHost::PossibleCustomDomain {
                host: "a.b.codeopx.com".into()
            }
        );
    }

    #[test]
    fn test_malformed_input_fails_safe() {
        assert_eq!(normalizer().normalize(""), NormalizedHost::BaseDomain);
        assert_eq!(normalizer().normalize("   "), NormalizedHost::BaseDomain);
        assert_eq!(
            normalizer().normalize("[::1]:8080"),
            NormalizedHost::BaseDomain
        );
        assert_eq!(
            normalizer().normalize("bad..host.codeopx.com"),
            NormalizedHost::BaseDomain
        );
        assert_eq!(
            normalizer().normalize("user@host.codeopx.com"),
            NormalizedHost::BaseDomain
        );
    }

    #[test]
    fn test_fqdn_trailing_dot() {
        assert_eq!(
            normalizer().normalize("shop1.codeopx.com."),
            NormalizedHost::TenantSubdomain {
                label: "shop1".into()
            }
        );
    }
}
