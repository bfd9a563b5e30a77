//! # Catalog
//!
//! The fixed reference data every quote is computed against: device
//! offerings, managed-service packs, and the two per-page rate tables.
//!
//! ## Catalog Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                           Catalog                                       │
//! │                                                                         │
//! │  ┌─────────────────────┐   ┌─────────────────┐   ┌──────────────────┐  │
//! │  │      Device         │   │  ServicePack    │   │   RateTable      │  │
//! │  │  ─────────────────  │   │  ─────────────  │   │  ──────────────  │  │
//! │  │  model (unique)     │   │  Basic    €20   │   │  mono   €/page   │  │
//! │  │  description        │   │  Plus     €35   │   │  colour €/page   │  │
//! │  │  monthly_cost       │   │  Platinum €45   │   │                  │  │
//! │  │  capital_cost       │   └─────────────────┘   │  OVERAGE_RATES   │  │
//! │  │  compliance_score   │                         │  COST_PER_PRINT  │  │
//! │  └─────────────────────┘                         └──────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Everything here is a compiled-in constant: no lookups can fail except
//! for asking about a model or pack that does not exist.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::{CoreError, ValidationError};
use crate::money::{Money, PrintRate};
use crate::validation::ValidationResult;

// =============================================================================
// Device
// =============================================================================

/// A device offering: one line of the quote form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Device {
    /// Stable identifier, also used as the label in submission messages.
    pub model: &'static str,

    /// Display label for the device picker.
    pub description: &'static str,

    /// Rental per unit per month.
    pub monthly_cost: Money,

    /// One-time hardware cost per unit.
    pub capital_cost: Money,

    /// Weight towards the compliance score.
    pub compliance_score: u32,
}

const fn device(
    model: &'static str,
    description: &'static str,
    monthly: i64,
    capex: i64,
    score: u32,
) -> Device {
    Device {
        model,
        description,
        monthly_cost: Money::from_major(monthly),
        capital_cost: Money::from_major(capex),
        compliance_score: score,
    }
}

/// Device catalog in display order.
const DEVICES: &[Device] = &[
    device("Ricoh IM 7000", "Ricoh IM 7000 (A3 Mono)", 300, 4150, 100),
    device("Ricoh IM C3010", "Ricoh IM C3010 (A3 Colour)", 150, 2000, 100),
    device("Ricoh IM C320F", "Ricoh IM C320F (A4 Colour)", 50, 1000, 50),
    device("Ricoh IM 370", "Ricoh IM 370 (A4 Mono)", 25, 700, 25),
    device("Ricoh IM 3000", "Ricoh IM 3000 (A3 Mono)", 100, 1710, 75),
    device("Competitor A3 copier", "Pay per print A3 colour", 75, 1710, 75),
    device("Competitor A4 copier", "Pay per print A4 colour", 25, 700, 25),
];

/// All devices, in the order the picker shows them.
pub fn devices() -> &'static [Device] {
    DEVICES
}

/// Looks up a device by its model identifier.
///
/// ## Example
/// ```rust
/// use mps_core::catalog;
///
/// let im7000 = catalog::find_device("Ricoh IM 7000").unwrap();
/// assert_eq!(im7000.compliance_score, 100);
/// assert!(catalog::find_device("Ricoh IM 9999").is_none());
/// ```
pub fn find_device(model: &str) -> Option<&'static Device> {
    DEVICES.iter().find(|d| d.model == model)
}

/// Checks the catalog invariant: models are unique and non-empty.
pub fn validate_devices(devices: &[Device]) -> ValidationResult<()> {
    for (i, d) in devices.iter().enumerate() {
        if d.model.trim().is_empty() {
            return Err(ValidationError::Required {
                field: "model".to_string(),
            });
        }
        if devices[..i].iter().any(|other| other.model == d.model) {
            return Err(ValidationError::Duplicate {
                field: "model".to_string(),
                value: d.model.to_string(),
            });
        }
    }
    Ok(())
}

// =============================================================================
// Service Pack
// =============================================================================

/// Managed-print-services pack, charged per covered machine per month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum ServicePack {
    Basic,
    Plus,
    Platinum,
}

impl ServicePack {
    /// Every pack, cheapest first.
    pub const ALL: [ServicePack; 3] = [ServicePack::Basic, ServicePack::Plus, ServicePack::Platinum];

    /// Monthly rate per covered machine.
    pub const fn monthly_rate(&self) -> Money {
        match self {
            ServicePack::Basic => Money::from_major(20),
            ServicePack::Plus => Money::from_major(35),
            ServicePack::Platinum => Money::from_major(45),
        }
    }

    /// Name as shown in the pack selector and on the quote.
    pub const fn name(&self) -> &'static str {
        match self {
            ServicePack::Basic => "Basic",
            ServicePack::Plus => "Plus",
            ServicePack::Platinum => "Platinum",
        }
    }
}

impl fmt::Display for ServicePack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Pack names are matched exactly, as they come from a fixed selector.
impl FromStr for ServicePack {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ServicePack::ALL
            .into_iter()
            .find(|p| p.name() == s.trim())
            .ok_or_else(|| CoreError::UnknownPack(s.to_string()))
    }
}

// =============================================================================
// Rate Tables
// =============================================================================

/// Per-page rates for the two billing classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RateTable {
    pub mono: PrintRate,
    pub colour: PrintRate,
}

impl RateTable {
    /// Unrounded cost of the given page volumes, in micro-units.
    pub(crate) fn micros_for(&self, mono_pages: u64, colour_pages: u64) -> i128 {
        self.mono.micros_for(mono_pages) + self.colour.micros_for(colour_pages)
    }
}

/// Client-facing rate for pages beyond the included credit.
pub const OVERAGE_RATES: RateTable = RateTable {
    mono: PrintRate::from_micros(5_000),    // €0.005
    colour: PrintRate::from_micros(50_000), // €0.05
};

/// Provider's internal cost to fulfil one page.
pub const COST_PER_PRINT: RateTable = RateTable {
    mono: PrintRate::from_micros(3_800),    // €0.0038
    colour: PrintRate::from_micros(38_000), // €0.038
};

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_models_are_unique() {
        assert!(validate_devices(devices()).is_ok());
        assert_eq!(devices().len(), 7);
    }

    #[test]
    fn test_validate_devices_rejects_duplicates() {
        let dup = [devices()[0], devices()[0]];
        assert!(matches!(
            validate_devices(&dup),
            Err(ValidationError::Duplicate { .. })
        ));
    }

    #[test]
    fn test_display_order_is_stable() {
        let models: Vec<_> = devices().iter().map(|d| d.model).collect();
        assert_eq!(models[0], "Ricoh IM 7000");
        assert_eq!(models[6], "Competitor A4 copier");
    }

    #[test]
    fn test_find_device() {
        let d = find_device("Ricoh IM C320F").unwrap();
        assert_eq!(d.monthly_cost, Money::from_major(50));
        assert_eq!(d.capital_cost, Money::from_major(1000));
        assert_eq!(d.compliance_score, 50);
        assert!(find_device("ricoh im c320f").is_none());
    }

    #[test]
    fn test_pack_rates() {
        assert_eq!(ServicePack::Basic.monthly_rate().cents(), 2000);
        assert_eq!(ServicePack::Plus.monthly_rate().cents(), 3500);
        assert_eq!(ServicePack::Platinum.monthly_rate().cents(), 4500);
    }

    #[test]
    fn test_pack_parsing() {
        assert_eq!("Plus".parse::<ServicePack>().unwrap(), ServicePack::Plus);
        assert_eq!(" Platinum ".parse::<ServicePack>().unwrap(), ServicePack::Platinum);
        assert_eq!(
            "Gold".parse::<ServicePack>(),
            Err(CoreError::UnknownPack("Gold".to_string()))
        );
    }

    #[test]
    fn test_cost_per_print_below_overage() {
        assert!(COST_PER_PRINT.mono.micros() < OVERAGE_RATES.mono.micros());
        assert!(COST_PER_PRINT.colour.micros() < OVERAGE_RATES.colour.micros());
    }
}
