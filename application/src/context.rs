//! [`Context`]-related definitions.

use std::{sync::Arc, time::Duration};

use common::Cache;
use service::read;

use crate::Service;

/// Shared state of the HTTP application.
///
/// Carries the [`Service`] and the result caches. The caches live here, in
/// explicitly passed state, instead of module-level globals.
#[derive(Clone, Debug)]
pub struct Context(Arc<Inner>);

/// Inner representation of a [`Context`].
#[derive(Debug)]
struct Inner {
    /// [`Service`] the API works on top of.
    service: Service,

    /// Cache of listing pages, keyed by the full filter set.
    listings: Cache<read::property::list::Selector, read::property::list::Page>,

    /// Cache of the featured selections, keyed by the requested limit.
    featured: Cache<usize, Vec<read::property::Listing>>,

    /// Optional [`Capabilities`] of this deployment.
    capabilities: Capabilities,
}

impl Context {
    /// Creates a new [`Context`] with the provided [`Service`], cache TTL and
    /// [`Capabilities`].
    #[must_use]
    pub fn new(
        service: Service,
        cache_ttl: Duration,
        capabilities: Capabilities,
    ) -> Self {
        Self(Arc::new(Inner {
            service,
            listings: Cache::new(cache_ttl),
            featured: Cache::new(cache_ttl),
            capabilities,
        }))
    }

    /// Returns the [`Service`] of this [`Context`].
    #[must_use]
    pub fn service(&self) -> &Service {
        &self.0.service
    }

    /// Returns the listing pages cache of this [`Context`].
    #[must_use]
    pub fn listings(
        &self,
    ) -> &Cache<read::property::list::Selector, read::property::list::Page>
    {
        &self.0.listings
    }

    /// Returns the featured selections cache of this [`Context`].
    #[must_use]
    pub fn featured(&self) -> &Cache<usize, Vec<read::property::Listing>> {
        &self.0.featured
    }

    /// Returns the [`Capabilities`] of this [`Context`].
    #[must_use]
    pub fn capabilities(&self) -> Capabilities {
        self.0.capabilities
    }
}

/// Optional capabilities of a deployment.
#[derive(Clone, Copy, Debug, Default)]
pub struct Capabilities {
    /// Indicator whether the share counters are backed by storage.
    pub shares_supported: bool,
}
