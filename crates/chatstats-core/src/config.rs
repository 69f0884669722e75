//! Run configuration, read from `CHATSTATS_*` environment variables.

use std::str::FromStr;

use crate::errors::{StatsError, StatsResult};
use crate::query::guards::{clamp_limit, clamp_workers, normalize_keywords, MAX_TOP_N};

pub const DEFAULT_TOP_N: usize = 5;
pub const DEFAULT_CACHE_ENTRIES: usize = 64;

/// How a reply reference is mapped onto a store position.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LinkMode {
    /// `position - (id - reply_to_id)`: the legacy export heuristic that
    /// assumes ids advance in lockstep with positions.
    #[default]
    Offset,
    /// Look the reply target up by its id.
    Direct,
}

impl FromStr for LinkMode {
    type Err = StatsError;

    fn from_str(value: &str) -> StatsResult<Self> {
        match value.trim().to_lowercase().as_str() {
            "offset" | "legacy" => Ok(LinkMode::Offset),
            "direct" | "id" => Ok(LinkMode::Direct),
            other => Err(StatsError::Config(format!("unknown link mode: {other:?}"))),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatsConfig {
    pub link_mode: LinkMode,
    pub top_n: usize,
    pub keywords: Vec<String>,
    pub workers: usize,
    pub cache_entries: usize,
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            link_mode: LinkMode::Offset,
            top_n: DEFAULT_TOP_N,
            keywords: Vec::new(),
            workers: 1,
            cache_entries: DEFAULT_CACHE_ENTRIES,
        }
    }
}

impl StatsConfig {
    pub fn from_env() -> StatsResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Unset keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> StatsResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(mode) = lookup("CHATSTATS_LINK_MODE") {
            config.link_mode = mode.parse()?;
        }
        if let Some(top) = lookup("CHATSTATS_TOP_N") {
            config.top_n = parse_number("CHATSTATS_TOP_N", &top)?;
        }
        if let Some(keywords) = lookup("CHATSTATS_KEYWORDS") {
            config.keywords = keywords.split(',').map(str::to_string).collect();
        }
        if let Some(workers) = lookup("CHATSTATS_WORKERS") {
            config.workers = parse_number("CHATSTATS_WORKERS", &workers)?;
        }
        if let Some(entries) = lookup("CHATSTATS_CACHE_ENTRIES") {
            config.cache_entries = parse_number("CHATSTATS_CACHE_ENTRIES", &entries)?;
        }
        Ok(config.clamped())
    }

    /// Apply guard bounds to every user-supplied value.
    pub fn clamped(mut self) -> Self {
        self.top_n = clamp_limit(self.top_n, MAX_TOP_N);
        self.workers = clamp_workers(self.workers);
        self.keywords = normalize_keywords(&self.keywords);
        self.cache_entries = self.cache_entries.max(1);
        self
    }
}

fn parse_number(key: &str, raw: &str) -> StatsResult<usize> {
    raw.trim()
        .parse::<usize>()
        .map_err(|e| StatsError::Config(format!("{key}={raw:?}: {e}")))
}
