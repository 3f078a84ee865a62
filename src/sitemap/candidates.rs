//! Cross product of domains, TLDs and subdomains.

use crate::domain::Candidate;

/// Yield every `(subdomain, domain, tld)` combination.
///
/// Order is domain-major, then TLD, then subdomain, so all subdomains of one
/// registered name are probed together.
pub fn candidates<'a>(
    domains: &'a [String],
    subdomains: &'a [String],
    tlds: &'a [String],
) -> impl Iterator<Item = Candidate> + 'a {
    domains.iter().flat_map(move |domain| {
        tlds.iter().flat_map(move |tld| {
            subdomains
                .iter()
                .map(move |subdomain| Candidate::new(subdomain.as_str(), domain.as_str(), tld.as_str()))
        })
    })
}
