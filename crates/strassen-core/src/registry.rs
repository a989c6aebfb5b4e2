//! Multiplier factory and registry.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use strassen_memory::BufferPool;

use crate::element::Element;
use crate::error::MatrixError;
use crate::mode::MultiplyMode;
use crate::multiplier::{ConventionalMultiplier, HybridMultiplier, Multiplier, StrassenMultiplier};
use crate::options::Options;

/// Factory trait for creating multipliers.
pub trait MultiplierFactory<T: Element>: Send + Sync {
    /// Get or create a multiplier by name.
    fn get(&self, name: &str) -> Result<Arc<dyn Multiplier<T>>, MatrixError>;

    /// List all available multiplier names.
    fn available(&self) -> Vec<&str>;
}

/// Default factory with lazy creation and cache.
///
/// Hybrid multipliers use the configured cutoff unless the name carries
/// one (`hybrid:<n>`). With `use_pool`, every multiplier it creates shares
/// one scratch pool.
pub struct DefaultFactory<T: Element> {
    options: Options,
    pool: Option<Arc<BufferPool<T>>>,
    cache: RwLock<HashMap<String, Arc<dyn Multiplier<T>>>>,
}

impl<T: Element> DefaultFactory<T> {
    /// Create a new default factory.
    #[must_use]
    pub fn new() -> Self {
        Self::with_options(Options::default())
    }

    /// Create a factory configured by `options` (normalized first).
    #[must_use]
    pub fn with_options(options: Options) -> Self {
        let options = options.normalize();
        let pool = options.use_pool.then(|| Arc::new(BufferPool::default()));
        Self {
            options,
            pool,
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// Options this factory was built with.
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Shared scratch pool, when pooling is enabled.
    pub fn pool(&self) -> Option<&Arc<BufferPool<T>>> {
        self.pool.as_ref()
    }

    fn create_multiplier(&self, name: &str) -> Result<Arc<dyn Multiplier<T>>, MatrixError> {
        let mode = match name {
            "hybrid" => MultiplyMode::Hybrid {
                cutoff: self.options.cutoff,
            },
            other => other.parse()?,
        };
        let pool = self.pool.clone();
        Ok(match (mode, pool) {
            (MultiplyMode::Conventional, _) => Arc::new(ConventionalMultiplier::new()),
            (MultiplyMode::Strassen, None) => Arc::new(StrassenMultiplier::new()),
            (MultiplyMode::Strassen, Some(p)) => Arc::new(StrassenMultiplier::with_pool(p)),
            (MultiplyMode::Hybrid { cutoff }, None) => Arc::new(HybridMultiplier::new(cutoff)),
            (MultiplyMode::Hybrid { cutoff }, Some(p)) => {
                Arc::new(HybridMultiplier::with_pool(cutoff, p))
            }
        })
    }
}

impl<T: Element> Default for DefaultFactory<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Element> MultiplierFactory<T> for DefaultFactory<T> {
    fn get(&self, name: &str) -> Result<Arc<dyn Multiplier<T>>, MatrixError> {
        // Check cache first
        if let Some(m) = self.cache.read().get(name) {
            return Ok(Arc::clone(m));
        }

        // Create and cache
        let m = self.create_multiplier(name)?;
        self.cache.write().insert(name.to_string(), Arc::clone(&m));
        Ok(m)
    }

    fn available(&self) -> Vec<&str> {
        vec!["conventional", "strassen", "hybrid"]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn factory_creates_each_algorithm() {
        let factory: DefaultFactory<i64> = DefaultFactory::new();
        assert_eq!(factory.get("conventional").unwrap().name(), "Conventional");
        assert_eq!(factory.get("naive").unwrap().name(), "Conventional");
        assert_eq!(factory.get("strassen").unwrap().name(), "Strassen");
        assert_eq!(factory.get("hybrid").unwrap().name(), "Hybrid");
    }

    #[test]
    fn hybrid_uses_configured_cutoff() {
        let factory: DefaultFactory<i64> = DefaultFactory::with_options(Options {
            cutoff: 16,
            ..Default::default()
        });
        assert_eq!(
            factory.get("hybrid").unwrap().mode(),
            MultiplyMode::Hybrid { cutoff: 16 }
        );
        assert_eq!(
            factory.get("hybrid:4").unwrap().mode(),
            MultiplyMode::Hybrid { cutoff: 4 }
        );
    }

    #[test]
    fn factory_caches() {
        let factory: DefaultFactory<f64> = DefaultFactory::new();
        let m1 = factory.get("strassen").unwrap();
        let m2 = factory.get("strassen").unwrap();
        assert!(Arc::ptr_eq(&m1, &m2));
    }

    #[test]
    fn factory_unknown_name() {
        let factory: DefaultFactory<i64> = DefaultFactory::new();
        assert!(matches!(
            factory.get("winograd"),
            Err(MatrixError::Config(_))
        ));
    }

    #[test]
    fn factory_available() {
        let factory: DefaultFactory<i64> = DefaultFactory::new();
        let available = factory.available();
        assert!(available.contains(&"conventional"));
        assert!(available.contains(&"strassen"));
        assert!(available.contains(&"hybrid"));
    }

    #[test]
    fn pooled_factory_shares_one_pool() {
        let factory: DefaultFactory<i64> = DefaultFactory::with_options(Options {
            use_pool: true,
            ..Default::default()
        });
        let pool = Arc::clone(factory.pool().unwrap());

        let a = crate::Matrix::filled(8, 1i64).unwrap();
        let mut c = crate::Matrix::allocate(8).unwrap();
        factory.get("strassen").unwrap().multiply(&a, &a, &mut c).unwrap();
        factory.get("hybrid:2").unwrap().multiply(&a, &a, &mut c).unwrap();
        assert!(pool.stats().hits > 0);
        assert!(c.as_slice().iter().all(|&x| x == 8));
    }

    #[test]
    fn unpooled_factory_has_no_pool() {
        let factory: DefaultFactory<i64> = DefaultFactory::new();
        assert!(factory.pool().is_none());
    }
}
