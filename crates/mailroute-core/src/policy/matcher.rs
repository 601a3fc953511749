//! Sender matching: domain rule compilation and lookup.
//!
//! Domain entries containing `*` are wildcard patterns (`*.example.com`):
//! every other character is literal, `*` matches any substring, the whole
//! domain must match, case-insensitively. Entries without `*` compare by
//! case-insensitive equality. Email entries compare exactly.

use regex::{Regex, RegexBuilder};

/// Compiled domain rule.
#[derive(Debug, Clone)]
pub enum DomainRule {
    /// Lower-cased literal domain.
    Exact(String),
    /// Anchored, case-insensitive pattern plus the source entry.
    Wildcard { raw: String, re: Regex },
}

impl DomainRule {
    pub fn raw(&self) -> &str {
        match self {
            DomainRule::Exact(d) => d,
            DomainRule::Wildcard { raw, .. } => raw,
        }
    }

    /// `domain` is expected lower-cased.
    pub fn matches(&self, domain: &str) -> bool {
        match self {
            DomainRule::Exact(d) => d == domain,
            DomainRule::Wildcard { re, .. } => re.is_match(domain),
        }
    }
}

/// Compile one stored domain entry.
///
/// The escaped pattern is always valid; should the regex engine refuse it
/// anyway (size limits), the entry degrades to a literal comparison.
pub fn compile_domain_rule(raw: &str) -> DomainRule {
    if !raw.contains('*') {
        return DomainRule::Exact(raw.to_lowercase());
    }
    let body = raw
        .split('*')
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join(".*");
    match RegexBuilder::new(&format!("^{body}$"))
        .case_insensitive(true)
        .build()
    {
        Ok(re) => DomainRule::Wildcard {
            raw: raw.to_string(),
            re,
        },
        Err(_) => DomainRule::Exact(raw.to_lowercase()),
    }
}

pub fn compile_domain_rules<'a>(raw: impl IntoIterator<Item = &'a str>) -> Vec<DomainRule> {
    raw.into_iter().map(compile_domain_rule).collect()
}

/// First rule matching `domain`, if any.
pub fn find_domain<'r>(rules: &'r [DomainRule], domain: &str) -> Option<&'r DomainRule> {
    rules.iter().find(|r| r.matches(domain))
}

pub fn is_email_listed<'a>(mut emails: impl Iterator<Item = &'a str>, sender: &str) -> bool {
    emails.any(|e| e == sender)
}

/// Domain part of a sender address, lower-cased.
///
/// Takes the text between the first `@` and the next one (or the end).
/// No `@` yields an empty domain, which only an explicit empty rule matches.
pub fn sender_domain(sender: &str) -> String {
    sender
        .split('@')
        .nth(1)
        .map(str::to_lowercase)
        .unwrap_or_default()
}
