use crate::useragent::cache::{verdict_key, DashMapVerdictCache, VerdictCache};
use crate::useragent::rules::{first_broken_rule, BrokenRule};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, trace};

/// Decides whether a user agent handles `SameSite` cookies correctly.
///
/// Build one at startup and share it across requests; the verdict cache it
/// holds is process-wide.
pub struct CompatibilityClassifier {
    cache: Option<Arc<dyn VerdictCache>>,
    evaluations: AtomicU64,
}

impl Default for CompatibilityClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl CompatibilityClassifier {
    /// Classifier backed by a fresh [`DashMapVerdictCache`].
    pub fn new() -> Self {
        Self::with_cache(Arc::new(DashMapVerdictCache::new()))
    }

    pub fn with_cache(cache: Arc<dyn VerdictCache>) -> Self {
        Self {
            cache: Some(cache),
            evaluations: AtomicU64::new(0),
        }
    }

    /// Classifier that evaluates the rule table on every call.
    pub fn uncached() -> Self {
        Self {
            cache: None,
            evaluations: AtomicU64::new(0),
        }
    }

    /// `true` unless a known-broken signature matches. Empty and unparseable
    /// strings are compatible.
    pub fn is_compatible(&self, user_agent: &str) -> bool {
        let Some(cache) = &self.cache else {
            return self.evaluate(user_agent);
        };

        let key = verdict_key(user_agent);
        if let Some(verdict) = cache.get(&key) {
            trace!(key = %key, verdict, "samesite verdict cache hit");
            return verdict;
        }

        let verdict = self.evaluate(user_agent);
        cache.put(&key, verdict);
        verdict
    }

    /// The rule that disqualifies `user_agent`, bypassing the cache.
    pub fn classify(&self, user_agent: &str) -> Option<BrokenRule> {
        first_broken_rule(user_agent)
    }

    /// Number of times the rule table has been evaluated by `is_compatible`.
    pub fn evaluations(&self) -> u64 {
        self.evaluations.load(Ordering::Relaxed)
    }

    /// Number of cached verdicts; 0 when uncached.
    pub fn cached_verdicts(&self) -> usize {
        self.cache.as_ref().map_or(0, |cache| cache.len())
    }

    fn evaluate(&self, user_agent: &str) -> bool {
        self.evaluations.fetch_add(1, Ordering::Relaxed);
        match first_broken_rule(user_agent) {
            Some(rule) => {
                debug!(rule = %rule, user_agent, "user agent mishandles SameSite");
                false
            }
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CRIOS_66: &str = "Mozilla/5.0 (iPhone; CPU iPhone OS 13_1 like Mac OS X) AppleWebKit/605.1.15 (KHTML, like Gecko) CriOS/66.0.3359.122 Mobile/15E148 Safari/604.1";
    const CRIOS_67: &str = "Mozilla/5.0 (iPhone; CPU iPhone OS 13_1 like Mac OS X) AppleWebKit/605.1.15 (KHTML, like Gecko) CriOS/67.0.3396.87 Mobile/15E148 Safari/604.1";

    #[test]
    fn test_crios_threshold() {
        let classifier = CompatibilityClassifier::new();
        assert!(!classifier.is_compatible(CRIOS_66));
        assert!(classifier.is_compatible(CRIOS_67));
    }

    #[test]
    fn test_second_call_hits_cache() {
        let classifier = CompatibilityClassifier::new();
        let first = classifier.is_compatible(CRIOS_66);
        assert_eq!(classifier.evaluations(), 1);

        let second = classifier.is_compatible(CRIOS_66);
        assert_eq!(first, second);
        assert_eq!(classifier.evaluations(), 1);
        assert_eq!(classifier.cached_verdicts(), 1);
    }

    #[test]
    fn test_distinct_agents_get_distinct_entries() {
        let classifier = CompatibilityClassifier::new();
        classifier.is_compatible(CRIOS_66);
        classifier.is_compatible(CRIOS_67);
        classifier.is_compatible("");
        assert_eq!(classifier.cached_verdicts(), 3);
        assert_eq!(classifier.evaluations(), 3);
    }

    #[test]
    fn test_uncached_evaluates_every_time() {
        let classifier = CompatibilityClassifier::uncached();
        assert!(!classifier.is_compatible(CRIOS_66));
        assert!(!classifier.is_compatible(CRIOS_66));
        assert_eq!(classifier.evaluations(), 2);
        assert_eq!(classifier.cached_verdicts(), 0);
    }

    #[test]
    fn test_shared_cache_across_classifiers() {
        let cache = Arc::new(DashMapVerdictCache::new());
        let a = CompatibilityClassifier::with_cache(cache.clone());
        let b = CompatibilityClassifier::with_cache(cache);

        a.is_compatible(CRIOS_66);
        assert!(!b.is_compatible(CRIOS_66));
        assert_eq!(b.evaluations(), 0);
    }

    #[test]
    fn test_classify_names_rule() {
        let classifier = CompatibilityClassifier::new();
        assert_eq!(
            classifier.classify(CRIOS_66),
            Some(BrokenRule::ChromeBefore67)
        );
        assert_eq!(classifier.classify(CRIOS_67), None);
        assert_eq!(classifier.evaluations(), 0);
    }
}
