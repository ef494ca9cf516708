use super::{
    CapabilityProfile, CoarseFilter, ConfigCandidate, Result, SurfaceError,
};

/// Platform side of configuration selection.
///
/// Implementations enumerate the configurations the display offers for the
/// given coarse filter, in platform order, and query their attributes.
pub trait ConfigSource {
    /// Platform configuration handle.
    type Config: Clone;

    fn enumerate(&mut self, filter: &CoarseFilter) -> Result<Vec<ConfigCandidate<Self::Config>>>;
}

/// Picks the first platform configuration that matches a profile exactly.
#[derive(Debug, Clone)]
pub struct CapabilityMatcher {
    required: CapabilityProfile,
    filter: CoarseFilter,
    verbose: bool,
}

impl CapabilityMatcher {
    pub fn new(required: CapabilityProfile) -> Self {
        Self {
            required,
            filter: CoarseFilter::GLES2,
            verbose: false,
        }
    }

    /// Enables per-candidate attribute dumps. Only honored in debug builds.
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn required(&self) -> &CapabilityProfile {
        &self.required
    }

    /// Enumerates `source` and selects a configuration.
    ///
    /// Fails with `ConfigurationUnavailable` when nothing passes the coarse
    /// filter and with `ExactMatchNotFound` when nothing matches exactly.
    pub fn choose<S: ConfigSource>(&self, source: &mut S) -> Result<ConfigCandidate<S::Config>> {
        let mut candidates = source.enumerate(&self.filter)?;
        candidates.retain(|c| self.filter.admits(&c.attributes));

        if candidates.is_empty() {
            log::error!("no configuration matches the coarse filter {:?}", self.filter);
            return Err(SurfaceError::ConfigurationUnavailable);
        }

        if self.verbose {
            dump_configs(&candidates);
        }

        let count = candidates.len();
        match select_configuration(&self.required, candidates) {
            Some(found) => {
                log::info!("selected configuration ({}) for {}", found.attributes, self.required);
                Ok(found)
            }
            None => {
                log::error!("none of {count} configurations matches {} exactly", self.required);
                Err(SurfaceError::ExactMatchNotFound { profile: self.required })
            }
        }
    }
}

/// Returns the first candidate that satisfies `required`, preserving order.
pub fn select_configuration<H, I>(required: &CapabilityProfile, candidates: I) -> Option<ConfigCandidate<H>>
where
    I: IntoIterator<Item = ConfigCandidate<H>>,
{
    candidates
        .into_iter()
        .find(|c| c.attributes.satisfies(required))
}

#[cfg(debug_assertions)]
fn dump_configs<H>(candidates: &[ConfigCandidate<H>]) {
    log::info!("{} configurations", candidates.len());
    for (i, c) in candidates.iter().enumerate() {
        log::info!("configuration {i}: {}", c.attributes);
    }
}

// Attribute dumps are too expensive for release builds.
#[cfg(not(debug_assertions))]
fn dump_configs<H>(_candidates: &[ConfigCandidate<H>]) {}
