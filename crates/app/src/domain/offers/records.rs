//! Offer Records

use jiff::Timestamp;
use offerdesk::offers::OfferDetails;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Offer UUID
///
/// Time-ordered (v7) so ids sort roughly by creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OfferUuid(Uuid);

impl OfferUuid {
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    #[must_use]
    pub const fn into_uuid(self) -> Uuid {
        self.0
    }
}

impl Default for OfferUuid {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for OfferUuid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.0, f)
    }
}

impl From<Uuid> for OfferUuid {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<OfferUuid> for Uuid {
    fn from(value: OfferUuid) -> Self {
        value.0
    }
}

/// Offer Record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OfferRecord {
    pub uuid: OfferUuid,

    #[serde(flatten)]
    pub details: OfferDetails,

    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl AsRef<OfferDetails> for OfferRecord {
    fn as_ref(&self) -> &OfferDetails {
        &self.details
    }
}
