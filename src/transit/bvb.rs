//! Basel (BVB) provider.

use super::{
    EfaProvider, EfaTransport, Location, NetworkId, SuggestLocationsResult, TransitProvider,
};
use crate::error::TransitError;

/// Provider for the Basler Verkehrs-Betriebe EFA endpoint.
#[derive(Debug, Clone)]
pub struct BvbProvider<T> {
    efa: EfaProvider<T>,
}

impl<T: EfaTransport> BvbProvider<T> {
    /// EFA endpoint of the BVB network.
    pub const API_BASE: &'static str = "http://www.efa-bvb.ch/bvb/";

    /// Creates the provider on top of `transport`.
    #[must_use]
    pub fn new(transport: T) -> Self {
        Self {
            efa: EfaProvider::new(NetworkId::Bvb, Self::API_BASE, transport),
        }
    }

    /// The endpoint requests go to.
    pub fn api_base(&self) -> &str {
        self.efa.api_base()
    }
}

impl<T: EfaTransport> TransitProvider for BvbProvider<T> {
    fn network(&self) -> NetworkId {
        self.efa.network()
    }

    fn suggest_locations(&self, constraint: &str) -> Result<SuggestLocationsResult, TransitError> {
        self.efa
            .xml_stopfinder_request(&Location::station_named(constraint))
    }
}
