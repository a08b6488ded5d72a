use std::collections::BTreeMap;
use std::fmt::Debug;
use std::path::Path;

use anyhow::Context;
use serde::Deserialize;
use tracing::info;

use crate::many_to_one::{match_children_above, Assignment};
use crate::one_to_one::{match_groups_above, Correspondence};
use crate::{validate, Error, Interval, Result};

/// How child keys are ordered inside each parent's list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChildOrder {
    #[default]
    Key,
    /// interval start, ties by key
    Start,
}

/// `[matching]` section of a host config file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// Log every pair score at info level during one-to-one matching.
    pub verbose: bool,
    /// A pair is accepted only if its IoU is strictly above this value.
    pub min_iou: f64,
    pub child_order: ChildOrder,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self { verbose: false, min_iou: 0.0, child_order: ChildOrder::Key }
    }
}

impl MatchConfig {
    pub fn validate(&self) -> Result<()> {
        if !(0.0..1.0).contains(&self.min_iou) {
            return Err(Error::InvalidConfig(format!(
                "matching.min_iou must be in [0, 1), got {}",
                self.min_iou
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
struct ConfigFile {
    matching: Option<MatchConfig>,
}

/// Parses the `[matching]` section out of a TOML document; other sections are ignored.
pub fn parse_config(s: &str) -> anyhow::Result<MatchConfig> {
    let file: ConfigFile = toml::from_str(s).context("parse config toml")?;
    let cfg = file.matching.unwrap_or_default();
    cfg.validate()?;
    Ok(cfg)
}

pub fn load_config(path: impl AsRef<Path>) -> anyhow::Result<MatchConfig> {
    let path = path.as_ref();
    let s = std::fs::read_to_string(path).with_context(|| format!("read config {}", path.display()))?;
    parse_config(&s)
}

/// Both matchers bound to one validated [`MatchConfig`].
#[derive(Debug, Clone)]
pub struct Matcher {
    cfg: MatchConfig,
}

impl Matcher {
    pub fn new(cfg: MatchConfig) -> Result<Self> {
        cfg.validate()?;
        info!(
            "match: matcher ready (min_iou={}, child_order={:?}, verbose={})",
            cfg.min_iou, cfg.child_order, cfg.verbose
        );
        Ok(Self { cfg })
    }

    pub fn config(&self) -> &MatchConfig {
        &self.cfg
    }

    pub fn match_groups<K>(
        &self,
        reference: &BTreeMap<K, Vec<Interval>>,
        candidate: &BTreeMap<K, Vec<Interval>>,
    ) -> Correspondence<K>
    where
        K: Ord + Clone + Debug,
    {
        validate::check_inputs(reference, candidate);
        match_groups_above(reference, candidate, self.cfg.min_iou, self.cfg.verbose)
    }

    pub fn match_children<K>(
        &self,
        parents: &BTreeMap<K, Interval>,
        children: &BTreeMap<K, Interval>,
    ) -> Assignment<K>
    where
        K: Ord + Clone + Debug,
    {
        validate::degenerate_intervals(parents);
        validate::degenerate_intervals(children);
        match_children_above(parents, children, self.cfg.min_iou, self.cfg.child_order)
    }
}
