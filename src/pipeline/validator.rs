//! Five-rule validity check for candidate records.
//!
//! Rules run in a fixed order and stop at the first failure, so the logged reason is the
//! earliest rule that rejected the record. The boolean outcome does not depend on order.

use log::info;
use std::fmt;

use crate::CandidateRecord;
use crate::utils::config::FilterDefaults;

/// Why a record was rejected. One variant per rule, in rule order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Rejection {
    /// Duration missing (`None`) or below the floor.
    TooShort(Option<u64>),
    /// View count missing (`None`) or below the floor.
    TooFewViews(Option<u64>),
    /// Title or description contains this blacklisted keyword.
    Blacklisted(String),
    /// No category in the allowlist.
    OffCategory,
    /// Channel name has no character in the target script.
    ForeignChannel(String),
}

impl Rejection {
    /// Position of the rule that produced this rejection (0..5).
    pub fn rule_index(&self) -> usize {
        match self {
            Rejection::TooShort(_) => 0,
            Rejection::TooFewViews(_) => 1,
            Rejection::Blacklisted(_) => 2,
            Rejection::OffCategory => 3,
            Rejection::ForeignChannel(_) => 4,
        }
    }
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::TooShort(Some(d)) => write!(f, "duration {d}s below minimum"),
            Rejection::TooShort(None) => write!(f, "duration unknown"),
            Rejection::TooFewViews(Some(v)) => write!(f, "view count {v} below minimum"),
            Rejection::TooFewViews(None) => write!(f, "view count unknown"),
            Rejection::Blacklisted(k) => write!(f, "title or description contains '{k}'"),
            Rejection::OffCategory => write!(f, "not a cooking-related category"),
            Rejection::ForeignChannel(c) => write!(f, "channel '{c}' not in target locale"),
        }
    }
}

/// Thresholds and word lists for the validator. `Default` gives the production values.
#[derive(Clone, Debug)]
pub struct ValidationRules {
    pub min_duration_secs: u64,
    pub min_view_count: u64,
    /// Case-sensitive substrings.
    pub blacklist: Vec<String>,
    /// Lowercase category names.
    pub categories: Vec<String>,
    /// Inclusive char range a channel name must touch.
    pub script_range: (char, char),
}

impl Default for ValidationRules {
    fn default() -> Self {
        Self {
            min_duration_secs: FilterDefaults::MIN_DURATION_SECS,
            min_view_count: FilterDefaults::MIN_VIEW_COUNT,
            blacklist: FilterDefaults::BLACKLIST.iter().map(|s| s.to_string()).collect(),
            categories: FilterDefaults::CATEGORIES
                .iter()
                .map(|s| s.to_string())
                .collect(),
            script_range: FilterDefaults::SCRIPT_RANGE,
        }
    }
}

type Rule = fn(&ValidationRules, &CandidateRecord) -> Result<(), Rejection>;

fn duration_floor(rules: &ValidationRules, r: &CandidateRecord) -> Result<(), Rejection> {
    match r.duration {
        Some(d) if d >= rules.min_duration_secs => Ok(()),
        other => Err(Rejection::TooShort(other)),
    }
}

fn popularity_floor(rules: &ValidationRules, r: &CandidateRecord) -> Result<(), Rejection> {
    match r.view_count {
        Some(v) if v >= rules.min_view_count => Ok(()),
        other => Err(Rejection::TooFewViews(other)),
    }
}

fn keyword_blacklist(rules: &ValidationRules, r: &CandidateRecord) -> Result<(), Rejection> {
    let text = format!("{} {}", r.title, r.description);
    match rules.blacklist.iter().find(|k| text.contains(k.as_str())) {
        Some(k) => Err(Rejection::Blacklisted(k.clone())),
        None => Ok(()),
    }
}

fn category_allowlist(rules: &ValidationRules, r: &CandidateRecord) -> Result<(), Rejection> {
    let hit = r.categories.iter().any(|c| {
        let c = c.to_lowercase();
        rules.categories.iter().any(|a| a.to_lowercase() == c)
    });
    if hit { Ok(()) } else { Err(Rejection::OffCategory) }
}

fn locale_heuristic(rules: &ValidationRules, r: &CandidateRecord) -> Result<(), Rejection> {
    let (lo, hi) = rules.script_range;
    if r.channel.chars().any(|ch| (lo..=hi).contains(&ch)) {
        Ok(())
    } else {
        Err(Rejection::ForeignChannel(r.channel.clone()))
    }
}

const RULES: [Rule; 5] = [
    duration_floor,
    popularity_floor,
    keyword_blacklist,
    category_allowlist,
    locale_heuristic,
];

#[derive(Clone, Debug, Default)]
pub struct Validator {
    rules: ValidationRules,
}

impl Validator {
    pub fn new(rules: ValidationRules) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &ValidationRules {
        &self.rules
    }

    /// Run the rules in order; first failure wins. No logging.
    pub fn check(&self, record: &CandidateRecord) -> Result<(), Rejection> {
        RULES.iter().try_for_each(|rule| rule(&self.rules, record))
    }

    /// [`check`](Self::check) plus an info line naming the rejection.
    pub fn is_valid(&self, record: &CandidateRecord) -> bool {
        match self.check(record) {
            Ok(()) => true,
            Err(reason) => {
                info!("Filtered {}: {}", record.id, reason);
                false
            }
        }
    }
}
