//! Information-theoretic features.
//!
//! Both features estimate symbol probabilities over the whole population and
//! then sum the Shannon terms `-p * log2(p)` of each symbol a host carries.
//! A host with rare symbols scores higher than one made of common symbols.
//!
//! When the population holds no symbols at all every host scores 0.

use std::collections::HashMap;
use std::hash::Hash;

use hostrank_common::models::Host;

use crate::features::{Feature, per_host};

/// Symbol counts over a population.
#[derive(Debug)]
pub struct Frequencies<T> {
    counts: HashMap<T, usize>,
    total: usize,
}

impl<T: Eq + Hash> FromIterator<T> for Frequencies<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut counts: HashMap<T, usize> = HashMap::new();
        let mut total: usize = 0;
        for symbol in iter {
            *counts.entry(symbol).or_insert(0) += 1;
            total += 1;
        }
        Self { counts, total }
    }
}

impl<T: Eq + Hash> Frequencies<T> {
    pub fn total(&self) -> usize {
        self.total
    }

    /// Estimated probability of `symbol`, 0 for unseen symbols or an empty table.
    pub fn probability(&self, symbol: &T) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.counts.get(symbol).copied().unwrap_or(0) as f64 / self.total as f64
    }

    /// `-p * log2(p)` for `symbol`, with the `0 * log2(0) = 0` convention.
    pub fn shannon_term(&self, symbol: &T) -> f64 {
        let p: f64 = self.probability(symbol);
        if p > 0.0 { -p * p.log2() } else { 0.0 }
    }

    /// Sum of the Shannon terms of `symbols`, never negative.
    pub fn entropy_of<'a>(&self, symbols: impl IntoIterator<Item = &'a T>) -> f64
    where
        T: 'a,
    {
        symbols
            .into_iter()
            .fold(0.0, |acc, symbol| acc + self.shannon_term(symbol))
            .max(0.0)
    }
}

/// Entropy of the host's port numbers against the population's port distribution.
pub struct PortEntropy;

impl Feature for PortEntropy {
    fn name(&self) -> &str {
        "port_entropy"
    }

    fn compute(&self, hosts: &[Host]) -> Vec<f64> {
        let frequencies: Frequencies<u16> = hosts
            .iter()
            .flat_map(|host| host.ports.iter().map(|port| port.number))
            .collect();

        per_host(hosts, |host| {
            frequencies.entropy_of(host.ports.iter().map(|port| &port.number))
        })
    }
}

/// Entropy of the hostname's characters against the population's character
/// distribution. Hosts without a hostname score 0.
pub struct HostnameEntropy;

impl Feature for HostnameEntropy {
    fn name(&self) -> &str {
        "hostname_entropy"
    }

    fn compute(&self, hosts: &[Host]) -> Vec<f64> {
        let frequencies: Frequencies<char> = hosts
            .iter()
            .filter_map(|host| host.hostname.as_deref())
            .flat_map(str::chars)
            .collect();

        per_host(hosts, |host| match host.hostname.as_deref() {
            Some(name) => {
                let chars: Vec<char> = name.chars().collect();
                frequencies.entropy_of(chars.iter())
            }
            None => 0.0,
        })
    }
}
