//! Fan-out over independent units of work.
//!
//! Assets in a beta estimation and scenarios in a stress run do not depend on
//! each other. Large batches go to rayon when the crate is built with the
//! `parallel` feature and the config allows it.

use meridian_config::AnalyticsConfig;

/// Applies `f` to every item, in parallel for large enough batches.
///
/// Runs on rayon only if the `parallel` feature is compiled in and
/// [`AnalyticsConfig::should_parallelize`] accepts `items.len()`. Results are
/// returned in input order either way.
#[cfg_attr(not(feature = "parallel"), allow(unused_variables))]
pub fn maybe_parallel_map<T, U, F>(items: &[T], config: &AnalyticsConfig, f: F) -> Vec<U>
where
    T: Sync,
    U: Send,
    F: Fn(&T) -> U + Sync + Send,
{
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        if config.should_parallelize(items.len()) {
            return items.par_iter().map(f).collect();
        }
    }

    items.iter().map(f).collect()
}
