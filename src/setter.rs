use crate::base::cookieerror::CookieError;
use crate::config::{EmissionMode, SameSiteConfig};
use crate::cookies::attributes::CookieAttributes;
use crate::cookies::emitter::CookieEmitter;
use crate::cookies::environment::CookieEnvironment;
use crate::useragent::classifier::CompatibilityClassifier;
use std::sync::Arc;

/// Entry point: sets SameSite-aware cookies and answers compatibility
/// queries against one shared classifier.
pub struct SameSiteCookieSetter {
    emitter: CookieEmitter,
}

impl SameSiteCookieSetter {
    /// Build a setter for environments of type `E`, resolving the emission
    /// mode from `config` and `E`'s capability.
    pub fn from_config<E: CookieEnvironment>(config: &SameSiteConfig) -> Self {
        let classifier = if config.cache_verdicts {
            CompatibilityClassifier::new()
        } else {
            CompatibilityClassifier::uncached()
        };
        Self::with_classifier::<E>(config, Arc::new(classifier))
    }

    pub fn with_classifier<E: CookieEnvironment>(
        config: &SameSiteConfig,
        classifier: Arc<CompatibilityClassifier>,
    ) -> Self {
        Self {
            emitter: CookieEmitter::for_environment::<E>(classifier, config.mode),
        }
    }

    pub fn set_cookie<E: CookieEnvironment>(
        &self,
        env: &mut E,
        name: &str,
        value: &str,
        attrs: &CookieAttributes,
    ) -> Result<(), CookieError> {
        self.emitter.set_cookie(env, name, value, attrs)
    }

    pub fn is_browser_compatible(&self, user_agent: &str) -> bool {
        self.emitter.classifier().is_compatible(user_agent)
    }

    pub fn mode(&self) -> EmissionMode {
        self.emitter.mode()
    }

    pub fn classifier(&self) -> &Arc<CompatibilityClassifier> {
        self.emitter.classifier()
    }
}
