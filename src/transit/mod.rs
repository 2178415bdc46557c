//! Public transport providers.
//!
//! Providers answer station-name lookups. EFA-based networks share one
//! request shape (the stop finder), so a provider for such a network is an
//! [`EfaProvider`] bound to the network's API base. The XML/HTTP exchange
//! itself is done by an injected [`EfaTransport`].

mod bvb;

pub use bvb::BvbProvider;

use serde::{Deserialize, Serialize};

use crate::error::TransitError;

/// Transit networks with a provider in this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum NetworkId {
    /// Basler Verkehrs-Betriebe.
    Bvb,
}

impl NetworkId {
    /// Short network name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Bvb => "BVB",
        }
    }
}

/// Kind of location a lookup refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocationType {
    /// Unspecified; the server decides.
    Any,
    /// A stop or station.
    Station,
    /// A point of interest.
    Poi,
    /// A street address.
    Address,
    /// Raw coordinates.
    Coord,
}

/// A location, fully or partially specified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    /// What kind of location this is.
    pub location_type: LocationType,
    /// Network-specific identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Locality, e.g. the town.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub place: Option<String>,
    /// Name within the locality.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Location {
    /// A station known only by (part of) its name.
    #[must_use]
    pub fn station_named(name: impl Into<String>) -> Self {
        Self {
            location_type: LocationType::Station,
            id: None,
            place: None,
            name: Some(name.into()),
        }
    }
}

/// Candidate locations for a lookup, best match first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestLocationsResult {
    /// Suggested locations.
    pub locations: Vec<Location>,
}

/// A transit provider answering station-name lookups.
pub trait TransitProvider {
    /// The network this provider serves.
    fn network(&self) -> NetworkId;

    /// Suggests locations whose name matches `constraint`.
    ///
    /// # Errors
    ///
    /// Returns a `TransitError` when the remote service cannot be reached or
    /// its answer cannot be read.
    fn suggest_locations(&self, constraint: &str) -> Result<SuggestLocationsResult, TransitError>;
}

/// The XML/HTTP side of an EFA endpoint.
pub trait EfaTransport {
    /// Runs a stop-finder request for `location` against `api_base`.
    ///
    /// # Errors
    ///
    /// Any connection or parse failure of the exchange.
    fn xml_stopfinder_request(
        &self,
        api_base: &str,
        location: &Location,
    ) -> Result<SuggestLocationsResult, TransitError>;
}

impl<T: EfaTransport + ?Sized> EfaTransport for &T {
    fn xml_stopfinder_request(
        &self,
        api_base: &str,
        location: &Location,
    ) -> Result<SuggestLocationsResult, TransitError> {
        (**self).xml_stopfinder_request(api_base, location)
    }
}

/// Shared behaviour of providers backed by an EFA endpoint.
#[derive(Debug, Clone)]
pub struct EfaProvider<T> {
    network: NetworkId,
    api_base: String,
    transport: T,
}

impl<T: EfaTransport> EfaProvider<T> {
    /// Binds `transport` to a network endpoint.
    #[must_use]
    pub fn new(network: NetworkId, api_base: impl Into<String>, transport: T) -> Self {
        Self {
            network,
            api_base: api_base.into(),
            transport,
        }
    }

    /// The network served.
    pub const fn network(&self) -> NetworkId {
        self.network
    }

    /// The endpoint requests go to.
    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    /// Runs the stop finder for `location`.
    ///
    /// # Errors
    ///
    /// Propagates the transport's failure.
    pub fn xml_stopfinder_request(
        &self,
        location: &Location,
    ) -> Result<SuggestLocationsResult, TransitError> {
        tracing::debug!(network = self.network.name(), "efa stop finder request");
        self.transport
            .xml_stopfinder_request(&self.api_base, location)
    }
}
