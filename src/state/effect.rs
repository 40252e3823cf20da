//! Transient stage effect and the remaining-time thresholds that fire it

use chrono::{DateTime, Duration, Utc};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Longest effect window, in seconds
pub const MAX_EFFECT_SECS: u64 = 3600;

/// How a sampled remaining-time value is matched against a threshold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum TriggerPolicy {
    /// Fire only when a sample lands exactly on the threshold. A late tick misses it.
    Exact,
    /// Fire on the first sample at or below the threshold after a sample at or above it.
    #[default]
    Crossing,
}

/// Thresholds and effect length used when sampling the countdown
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EffectTrigger {
    pub thresholds: Vec<u64>,
    pub effect_secs: u64,
    pub policy: TriggerPolicy,
}

impl EffectTrigger {
    pub fn new(thresholds: Vec<u64>, effect_secs: u64, policy: TriggerPolicy) -> Self {
        Self {
            thresholds,
            effect_secs,
            policy,
        }
    }

    fn matches(&self, threshold: u64, previous: Option<u64>, remaining: u64) -> bool {
        match self.policy {
            TriggerPolicy::Exact => remaining == threshold,
            TriggerPolicy::Crossing => {
                remaining <= threshold && previous.is_some_and(|prev| prev >= threshold)
            }
        }
    }
}

impl Default for EffectTrigger {
    fn default() -> Self {
        Self::new(vec![60, 30], 5, TriggerPolicy::default())
    }
}

/// Effect window plus the sampling memory needed to edge-trigger it
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectState {
    /// Effect is visible while `now < until`
    pub until: Option<DateTime<Utc>>,
    #[serde(skip)]
    last_sample: Option<u64>,
    #[serde(skip)]
    fired: Vec<u64>,
}

impl EffectState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        self.until.is_some_and(|until| now < until)
    }

    /// Open the effect window for `secs` seconds starting at `now`
    pub fn fire(&mut self, now: DateTime<Utc>, secs: u64) {
        let secs = secs.min(MAX_EFFECT_SECS) as i64;
        let until = now + Duration::seconds(secs);
        // A second trigger inside an open window never shortens it
        self.until = Some(self.until.map_or(until, |current| current.max(until)));
    }

    /// Feed one remaining-time sample. Returns the threshold that fired, if any.
    pub fn sample(
        &mut self,
        trigger: &EffectTrigger,
        remaining: u64,
        now: DateTime<Utc>,
    ) -> Option<u64> {
        let previous = self.last_sample.replace(remaining);
        let hit = trigger
            .thresholds
            .iter()
            .copied()
            .filter(|t| !self.fired.contains(t))
            .find(|&t| trigger.matches(t, previous, remaining))?;

        // Thresholds the countdown jumped past in the same sample are spent too
        if trigger.policy == TriggerPolicy::Crossing {
            for t in trigger.thresholds.iter().copied() {
                if t >= remaining && !self.fired.contains(&t) {
                    self.fired.push(t);
                }
            }
        } else {
            self.fired.push(hit);
        }

        self.fire(now, trigger.effect_secs);
        Some(hit)
    }

    /// Record the remaining time a run starts from, so the first sample of
    /// the run can already count as a crossing
    pub fn prime(&mut self, remaining: u64) {
        self.last_sample = Some(remaining);
    }

    /// Forget the previous sample so the next one cannot count as a crossing
    pub fn interrupt(&mut self) {
        self.last_sample = None;
    }

    /// Re-arm every threshold for a freshly set countdown
    pub fn rearm(&mut self) {
        self.last_sample = None;
        self.fired.clear();
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn at(secs: i64) -> DateTime<Utc> {
        let base: DateTime<Utc> = "2024-03-27T12:00:00Z".parse().unwrap();
        base + Duration::seconds(secs)
    }

    #[test]
    fn window_closes_after_deadline() {
        let mut effect = EffectState::new();
        effect.fire(at(0), 5);

        assert!(effect.is_active(at(0)));
        assert!(effect.is_active(at(4)));
        assert!(!effect.is_active(at(5)));
    }

    #[test]
    fn exact_policy_misses_skipped_second() {
        let trigger = EffectTrigger::new(vec![60], 5, TriggerPolicy::Exact);
        let mut effect = EffectState::new();

        assert_eq!(effect.sample(&trigger, 62, at(0)), None);
        assert_eq!(effect.sample(&trigger, 59, at(3)), None);
        assert!(!effect.is_active(at(3)));
    }

    #[test]
    fn exact_policy_fires_once_on_match() {
        let trigger = EffectTrigger::new(vec![60], 5, TriggerPolicy::Exact);
        let mut effect = EffectState::new();

        assert_eq!(effect.sample(&trigger, 60, at(0)), Some(60));
        assert_eq!(effect.sample(&trigger, 60, at(0)), None);
        assert!(effect.is_active(at(1)));
    }

    #[test]
    fn crossing_policy_fires_on_late_tick() {
        let trigger = EffectTrigger::new(vec![60, 30], 5, TriggerPolicy::Crossing);
        let mut effect = EffectState::new();

        assert_eq!(effect.sample(&trigger, 62, at(0)), None);
        assert_eq!(effect.sample(&trigger, 59, at(3)), Some(60));
        assert_eq!(effect.sample(&trigger, 58, at(4)), None);
        assert_eq!(effect.sample(&trigger, 30, at(32)), Some(30));
    }

    #[test]
    fn crossing_policy_ignores_threshold_started_below() {
        let trigger = EffectTrigger::new(vec![60], 5, TriggerPolicy::Crossing);
        let mut effect = EffectState::new();

        assert_eq!(effect.sample(&trigger, 45, at(0)), None);
        assert_eq!(effect.sample(&trigger, 44, at(1)), None);
    }

    #[test]
    fn crossing_both_thresholds_in_one_sample_fires_once() {
        let trigger = EffectTrigger::new(vec![60, 30], 5, TriggerPolicy::Crossing);
        let mut effect = EffectState::new();

        effect.sample(&trigger, 61, at(0));
        assert_eq!(effect.sample(&trigger, 20, at(41)), Some(60));
        assert_eq!(effect.sample(&trigger, 19, at(42)), None);
    }

    #[test]
    fn primed_run_fires_on_first_sample() {
        let trigger = EffectTrigger::new(vec![60], 5, TriggerPolicy::Crossing);
        let mut effect = EffectState::new();

        effect.prime(61);
        assert_eq!(effect.sample(&trigger, 60, at(1)), Some(60));
    }

    #[test]
    fn primed_at_threshold_fires() {
        let trigger = EffectTrigger::new(vec![60], 5, TriggerPolicy::Crossing);
        let mut effect = EffectState::new();

        effect.prime(60);
        assert_eq!(effect.sample(&trigger, 60, at(0)), Some(60));
        assert_eq!(effect.sample(&trigger, 59, at(1)), None);
    }

    #[test]
    fn oversized_window_is_capped() {
        let mut effect = EffectState::new();
        effect.fire(at(0), u64::MAX);

        assert_eq!(effect.until, Some(at(MAX_EFFECT_SECS as i64)));
    }

    #[test]
    fn rearm_allows_threshold_to_fire_again() {
        let trigger = EffectTrigger::new(vec![60], 5, TriggerPolicy::Crossing);
        let mut effect = EffectState::new();

        effect.sample(&trigger, 61, at(0));
        assert_eq!(effect.sample(&trigger, 60, at(1)), Some(60));

        effect.rearm();
        effect.sample(&trigger, 61, at(10));
        assert_eq!(effect.sample(&trigger, 60, at(11)), Some(60));
    }
}
