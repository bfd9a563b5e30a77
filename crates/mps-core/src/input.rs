//! # Quote Inputs
//!
//! The four values a caller hands to `compute_quote`: who the quote is
//! for, which devices, which managed-service pack, and how many pages.
//!
//! All of these are plain, already-coerced values. Turning raw form text
//! into them is `form.rs`'s job.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use ts_rs::TS;

use crate::catalog::{self, ServicePack};
use crate::{DEFAULT_INCLUDED_COLOUR, DEFAULT_INCLUDED_MONO, MAX_DEVICE_QUANTITY, MAX_PAGE_VOLUME};

// =============================================================================
// Client Info
// =============================================================================

/// Identity of the client the quote is prepared for.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ClientInfo {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    pub sector: String,
}

impl ClientInfo {
    /// Phone number, or an empty string when none was given.
    pub fn phone_or_empty(&self) -> &str {
        self.phone.as_deref().map(str::trim).unwrap_or("")
    }
}

// =============================================================================
// Selection
// =============================================================================

/// Device quantities keyed by catalog model.
///
/// ## Invariants
/// - Models that were never set have quantity 0
/// - Models not in the catalog are kept but never priced
/// - Quantities never exceed `MAX_DEVICE_QUANTITY`, including selections
///   read from a request file
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, TS)]
#[ts(export)]
pub struct Selection(BTreeMap<String, u32>);

/// Every entry goes through [`Selection::set`], so the cap and the
/// zero-removal rule hold for deserialized selections too.
impl<'de> Deserialize<'de> for Selection {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = BTreeMap::<String, u64>::deserialize(deserializer)?;
        Ok(raw.into_iter().fold(Selection::new(), |sel, (model, quantity)| {
            let quantity = quantity.min(u64::from(MAX_DEVICE_QUANTITY)) as u32;
            sel.with(model, quantity)
        }))
    }
}

impl Selection {
    /// Creates an empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`Selection::set`].
    ///
    /// ## Example
    /// ```rust
    /// use mps_core::Selection;
    ///
    /// let sel = Selection::new()
    ///     .with("Ricoh IM 7000", 1)
    ///     .with("Ricoh IM 370", 2);
    /// assert_eq!(sel.quantity("Ricoh IM 370"), 2);
    /// assert_eq!(sel.quantity("Ricoh IM 3000"), 0);
    /// ```
    pub fn with(mut self, model: impl Into<String>, quantity: u32) -> Self {
        self.set(model, quantity);
        self
    }

    /// Sets the quantity for a model, capped at `MAX_DEVICE_QUANTITY`.
    /// Setting 0 removes it.
    pub fn set(&mut self, model: impl Into<String>, quantity: u32) {
        let model = model.into();
        let quantity = quantity.min(MAX_DEVICE_QUANTITY);
        if quantity == 0 {
            self.0.remove(&model);
        } else {
            self.0.insert(model, quantity);
        }
    }

    /// Quantity for a model (0 if unset).
    pub fn quantity(&self, model: &str) -> u32 {
        self.0.get(model).copied().unwrap_or(0)
    }

    /// Total quantity across catalog devices.
    pub fn total_devices(&self) -> u32 {
        catalog::devices()
            .iter()
            .map(|d| self.quantity(d.model))
            .fold(0u32, u32::saturating_add)
    }

    /// Models set in this selection that the catalog does not know.
    pub fn unknown_models(&self) -> impl Iterator<Item = &str> {
        self.0
            .keys()
            .map(String::as_str)
            .filter(|m| catalog::find_device(m).is_none())
    }
}

// =============================================================================
// Service Config
// =============================================================================

/// Managed-print-services choice.
///
/// A pack only exists when the service is enabled, so it lives inside the
/// `Enabled` variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(tag = "mode", rename_all = "camelCase")]
#[ts(export)]
pub enum ServiceConfig {
    #[default]
    Disabled,
    Enabled {
        pack: ServicePack,
        /// Machines covered, clamped to the device count. `None` covers all.
        #[serde(default)]
        machines: Option<u32>,
    },
}

impl ServiceConfig {
    /// Enables a pack covering every selected device.
    pub fn pack(pack: ServicePack) -> Self {
        ServiceConfig::Enabled {
            pack,
            machines: None,
        }
    }

    /// Enables a pack covering at most `machines` devices.
    ///
    /// `pack_for(p, 0)` covers nothing; use [`ServiceConfig::pack`] for
    /// "every device".
    pub fn pack_for(pack: ServicePack, machines: u32) -> Self {
        ServiceConfig::Enabled {
            pack,
            machines: Some(machines),
        }
    }

    /// Returns true when a pack is applied.
    pub fn is_enabled(&self) -> bool {
        matches!(self, ServiceConfig::Enabled { .. })
    }
}

// =============================================================================
// Credit Config
// =============================================================================

/// Print volumes for the term.
///
/// Included volumes are a flat 60-month allowance; excess volumes are the
/// pages expected beyond it, billed at the overage rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase", default)]
#[ts(export)]
pub struct CreditConfig {
    #[ts(type = "number")]
    pub included_mono: u64,
    #[ts(type = "number")]
    pub included_colour: u64,
    #[ts(type = "number")]
    pub excess_mono: u64,
    #[ts(type = "number")]
    pub excess_colour: u64,
}

impl Default for CreditConfig {
    /// 120,000 mono + 30,000 colour included, no excess.
    fn default() -> Self {
        CreditConfig {
            included_mono: DEFAULT_INCLUDED_MONO,
            included_colour: DEFAULT_INCLUDED_COLOUR,
            excess_mono: 0,
            excess_colour: 0,
        }
    }
}

impl CreditConfig {
    /// Returns true when any excess volume is expected.
    pub fn has_excess(&self) -> bool {
        self.excess_mono > 0 || self.excess_colour > 0
    }

    /// Same volumes with every field capped at `MAX_PAGE_VOLUME`.
    pub fn capped(&self) -> Self {
        CreditConfig {
            included_mono: self.included_mono.min(MAX_PAGE_VOLUME),
            included_colour: self.included_colour.min(MAX_PAGE_VOLUME),
            excess_mono: self.excess_mono.min(MAX_PAGE_VOLUME),
            excess_colour: self.excess_colour.min(MAX_PAGE_VOLUME),
        }
    }
}

// =============================================================================
// Quote Request
// =============================================================================

/// Everything `compute_quote` needs, bundled for transport (IPC, files).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct QuoteRequest {
    pub client: ClientInfo,
    #[serde(default)]
    pub selection: Selection,
    #[serde(default)]
    pub service: ServiceConfig,
    #[serde(default)]
    pub credit: CreditConfig,
}

// =============================================================================
// Unit Tests
// =============================================================================
