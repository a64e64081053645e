// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Derived contact statistics. Recomputed on demand, never persisted.

use std::collections::{BTreeMap, BTreeSet};

use super::{Contact, ContactSource, VerificationStatus};

/// Summary over a set of contacts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContactStatistics {
    pub total: usize,
    pub by_source: BTreeMap<ContactSource, usize>,
    pub by_verification: BTreeMap<VerificationStatus, usize>,
    /// Number of distinct tags across all contacts.
    pub distinct_tags: usize,
    /// Unix timestamp of when these numbers were computed.
    pub computed_at: u64,
}

impl ContactStatistics {
    /// Computes statistics over `contacts` as of `computed_at`.
    pub fn compute(contacts: &[Contact], computed_at: u64) -> Self {
        let mut by_source = BTreeMap::new();
        let mut by_verification = BTreeMap::new();
        let mut tags = BTreeSet::new();

        for contact in contacts {
            *by_source.entry(contact.source()).or_insert(0) += 1;
            *by_verification
                .entry(contact.verification_status())
                .or_insert(0) += 1;
            tags.extend(contact.tags().iter().map(String::as_str));
        }

        ContactStatistics {
            total: contacts.len(),
            by_source,
            by_verification,
            distinct_tags: tags.len(),
            computed_at,
        }
    }

    /// Count for one source, zero when absent.
    pub fn source_count(&self, source: ContactSource) -> usize {
        self.by_source.get(&source).copied().unwrap_or(0)
    }

    /// Count for one verification status, zero when absent.
    pub fn verification_count(&self, status: VerificationStatus) -> usize {
        self.by_verification.get(&status).copied().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::BusinessCard;

    #[test]
    fn test_empty() {
        let stats = ContactStatistics::compute(&[], 42);
        assert_eq!(stats.total, 0);
        assert_eq!(stats.distinct_tags, 0);
        assert_eq!(stats.source_count(ContactSource::QrCode), 0);
        assert_eq!(stats.computed_at, 42);
    }

    #[test]
    fn test_histograms_and_tags() {
        let mut a = Contact::new(BusinessCard::new("A"), ContactSource::QrCode);
        a.add_tag("work");
        a.add_tag("rust");
        let mut b = Contact::new(BusinessCard::new("B"), ContactSource::QrCode);
        b.add_tag("work");
        b.set_verification_status(VerificationStatus::Verified);
        let c = Contact::new(BusinessCard::new("C"), ContactSource::ShareLink);

        let stats = ContactStatistics::compute(&[a, b, c], 0);

        assert_eq!(stats.total, 3);
        assert_eq!(stats.source_count(ContactSource::QrCode), 2);
        assert_eq!(stats.source_count(ContactSource::ShareLink), 1);
        assert_eq!(stats.verification_count(VerificationStatus::Unverified), 2);
        assert_eq!(stats.verification_count(VerificationStatus::Verified), 1);
        assert_eq!(stats.distinct_tags, 2);
    }
}
