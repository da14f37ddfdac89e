//! Per-agent cache of one pre-fetched broker answer

/// Last pre-fetched value, or a safe default.
#[derive(Clone, Debug, PartialEq)]
pub struct DecisionCache<T> {
    value: T,
    default: T,
    refreshed_at: Option<u64>,
    failures: u64,
}

impl<T: Clone> DecisionCache<T> {
    /// Empty cache holding `default` until the first pre-fetch
    pub fn new(default: T) -> Self {
        DecisionCache {
            value: default.clone(),
            default,
            refreshed_at: None,
            failures: 0,
        }
    }

    /// Store an answer fetched during `tick`
    pub fn store(&mut self, value: T, tick: u64) {
        self.value = value;
        self.refreshed_at = Some(tick);
    }

    /// Pre-fetch failed or timed out during `tick`: fall back to the default
    pub fn fail(&mut self, tick: u64) {
        self.value = self.default.clone();
        self.refreshed_at = Some(tick);
        self.failures += 1;
    }

    /// Store `Some` or fall back on `None`
    pub fn update(&mut self, value: Option<T>, tick: u64) {
        match value {
            Some(v) => self.store(v, tick),
            None => self.fail(tick),
        }
    }

    pub fn get(&self) -> &T {
        &self.value
    }

    pub fn default_value(&self) -> &T {
        &self.default
    }

    /// Tick of the last refresh
    pub fn refreshed_at(&self) -> Option<u64> {
        self.refreshed_at
    }

    pub fn failures(&self) -> u64 {
        self.failures
    }

    /// Ticks since the last refresh, `None` if never refreshed
    pub fn staleness(&self, tick: u64) -> Option<u64> {
        self.refreshed_at.map(|at| tick.saturating_sub(at))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_until_stored() {
        let mut cache = DecisionCache::new(false);
        assert!(!cache.get());
        assert_eq!(cache.staleness(3), None);

        cache.store(true, 3);
        assert!(cache.get());
        assert_eq!(cache.staleness(4), Some(1));
    }

    #[test]
    fn test_failure_resets_to_default() {
        let mut cache = DecisionCache::new(false);
        cache.update(Some(true), 1);
        cache.update(None, 2);
        assert!(!cache.get());
        assert_eq!(cache.failures(), 1);
        assert_eq!(cache.refreshed_at(), Some(2));
    }
}
