use std::env;

use serde::{Deserialize, Serialize};

use crate::utils::split_list;

pub const DEFAULT_REASONS: &[&str] = &[
    "High Distance From Home",
    "Vehicle Sold",
    "Wrong number",
    "Not Interested",
    "Serviced Elsewhere",
    "Out Of Station",
];

/// Closed set of reasons a customer gives for not returning.
///
/// Served to clients by `GET /reasons`; both sides read their copy from
/// `FOLLOWUP_REASONS` so the list can change without a rebuild.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReasonSet {
    reasons: Vec<String>,
}

impl Default for ReasonSet {
    fn default() -> Self {
        ReasonSet {
            reasons: DEFAULT_REASONS.iter().map(|r| r.to_string()).collect(),
        }
    }
}

impl ReasonSet {
    pub fn new(reasons: Vec<String>) -> Self {
        ReasonSet { reasons }
    }

    /// Parses a comma separated list; a blank list falls back to the defaults.
    pub fn parse(raw: &str) -> Self {
        let reasons = split_list(raw);
        if reasons.is_empty() {
            ReasonSet::default()
        } else {
            ReasonSet { reasons }
        }
    }

    pub fn from_env() -> Self {
        match env::var("FOLLOWUP_REASONS") {
            Ok(raw) => ReasonSet::parse(&raw),
            Err(_) => ReasonSet::default(),
        }
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.reasons.get(index).map(String::as_str)
    }

    pub fn contains(&self, reason: &str) -> bool {
        self.reasons.iter().any(|r| r == reason)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.reasons.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.reasons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reasons.is_empty()
    }
}
