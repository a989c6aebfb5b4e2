//! Multiplier selection logic.

use std::sync::Arc;

use strassen_core::{Element, MatrixError, Multiplier, MultiplierFactory};

/// Get multipliers to run based on algorithm selection (`all` or one name).
pub fn get_multipliers_to_run<T: Element>(
    algo: &str,
    factory: &dyn MultiplierFactory<T>,
) -> Result<Vec<Arc<dyn Multiplier<T>>>, MatrixError> {
    match algo {
        "all" => factory
            .available()
            .into_iter()
            .map(|name| factory.get(name))
            .collect(),
        name => Ok(vec![factory.get(name)?]),
    }
}
