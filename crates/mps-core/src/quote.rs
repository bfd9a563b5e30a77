//! # Quote Calculator
//!
//! Turns a selection, a managed-service choice and print volumes into a
//! [`Quote`]: every financial figure of a 60-month lease plus the
//! compliance gate.
//!
//! ## Computation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        compute_quote()                                  │
//! │                                                                         │
//! │  1. validate_client_info ──► IncompleteClientInfo                      │
//! │  2. total devices == 0   ──► NoDevicesSelected                         │
//! │                                                                         │
//! │  3. per catalog device:  qty × score    → total_score                  │
//! │                          qty × monthly  → device_monthly               │
//! │                          qty × capex    → capex_total                  │
//! │                                                                         │
//! │  4. MPS:   min(machines, total) × pack rate → mps.monthly              │
//! │                                                                         │
//! │  5. total_monthly_ex_vat = device_monthly + mps.monthly                │
//! │     revenue_60mo         = total_monthly_ex_vat × 60                   │
//! │     cpp_cost_60mo        = included pages × cost-per-print             │
//! │     net_profit           = revenue − capex − cpp                       │
//! │                                                                         │
//! │  6. excess (only if excess pages > 0): overage vs cost-per-print × 5   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A Quote is immutable. Recomputing with the same inputs produces an equal
//! Quote; nothing time-dependent is captured here.

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::catalog::{self, ServicePack, COST_PER_PRINT, OVERAGE_RATES};
use crate::error::{CoreError, CoreResult};
use crate::input::{ClientInfo, CreditConfig, QuoteRequest, Selection, ServiceConfig};
use crate::money::{micros_to_money, Money};
use crate::validation::validate_client_info;
use crate::{COMPLIANCE_THRESHOLD, CONTRACT_TERM_MONTHS, EXCESS_TERM_YEARS, VAT_RATE};

// =============================================================================
// Quote Types
// =============================================================================

/// One selected device line (quantity > 0), in catalog order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct QuoteLine {
    pub model: String,
    pub quantity: u32,
    /// Rental per unit per month.
    pub unit_monthly: Money,
    /// Hardware cost per unit.
    pub unit_capex: Money,
    /// Compliance weight per unit.
    pub unit_score: u32,
}

impl QuoteLine {
    pub fn line_monthly(&self) -> Money {
        self.unit_monthly.multiply_quantity(self.quantity)
    }

    pub fn line_capex(&self) -> Money {
        self.unit_capex.multiply_quantity(self.quantity)
    }

    pub fn line_score(&self) -> u32 {
        self.unit_score.saturating_mul(self.quantity)
    }
}

/// Managed-print-services charge.
///
/// When the service is disabled `pack` is `None` and every amount is zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct MpsCharge {
    pub pack: Option<ServicePack>,
    /// Pack rate per machine per month.
    pub pack_cost: Money,
    pub machines: u32,
    pub monthly: Money,
}

impl MpsCharge {
    /// Pack name as shown on the quote, `"None"` when disabled.
    pub fn pack_name(&self) -> &'static str {
        self.pack.map(|p| p.name()).unwrap_or("None")
    }

    /// MPS amount over the contract term.
    pub fn term_total(&self) -> Money {
        self.monthly * CONTRACT_TERM_MONTHS
    }
}

/// Economics of pages printed beyond the included credit, over 5 years.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ExcessEconomics {
    pub revenue_5yr: Money,
    pub cost_5yr: Money,
    pub profit_5yr: Money,
    pub margin_pct: f64,
}

/// Result of the compliance gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "UPPERCASE")]
#[ts(export)]
pub enum ComplianceVerdict {
    Pass,
    Fail,
}

impl ComplianceVerdict {
    pub fn for_score(score: u32) -> Self {
        if score >= COMPLIANCE_THRESHOLD {
            ComplianceVerdict::Pass
        } else {
            ComplianceVerdict::Fail
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            ComplianceVerdict::Pass => "PASS",
            ComplianceVerdict::Fail => "FAIL",
        }
    }
}

impl fmt::Display for ComplianceVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A computed quote.
///
/// Holds the inputs it was computed from so it can be re-displayed and
/// submitted without the original form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Quote {
    // Inputs
    pub client: ClientInfo,
    pub selection: Selection,
    pub service: ServiceConfig,
    pub credit: CreditConfig,

    // Devices
    pub lines: Vec<QuoteLine>,
    pub total_devices: u32,
    pub total_score: u32,

    // Monthly
    pub device_monthly: Money,
    pub mps: MpsCharge,
    pub total_monthly_ex_vat: Money,

    // Contract term
    pub revenue_60mo: Money,
    pub capex_total: Money,
    pub cpp_cost_60mo: Money,
    pub net_profit: Money,
    pub margin_pct: f64,

    /// Present only when excess pages were entered.
    pub excess: Option<ExcessEconomics>,
}

impl Quote {
    /// Returns true when the score reaches the compliance threshold.
    pub fn is_compliant(&self) -> bool {
        self.total_score >= COMPLIANCE_THRESHOLD
    }

    pub fn verdict(&self) -> ComplianceVerdict {
        ComplianceVerdict::for_score(self.total_score)
    }

    /// Gate checked before any submission attempt.
    ///
    /// ## Example
    /// ```rust
    /// use mps_core::{compute_quote, ClientInfo, CoreError, CreditConfig, Selection, ServiceConfig};
    ///
    /// let client = ClientInfo {
    ///     name: "Acme".into(),
    ///     email: "ops@acme.ie".into(),
    ///     phone: None,
    ///     sector: "Retail".into(),
    /// };
    /// let sel = Selection::new().with("Ricoh IM 370", 1);
    /// let quote = compute_quote(&client, &sel, &ServiceConfig::Disabled, &CreditConfig::default()).unwrap();
    ///
    /// assert_eq!(
    ///     quote.ensure_submittable(),
    ///     Err(CoreError::ComplianceFailed { score: 25, threshold: 100 })
    /// );
    /// ```
    pub fn ensure_submittable(&self) -> CoreResult<()> {
        if !self.is_compliant() {
            return Err(CoreError::ComplianceFailed {
                score: self.total_score,
                threshold: COMPLIANCE_THRESHOLD,
            });
        }
        Ok(())
    }

    /// Device rental over the contract term.
    pub fn device_term_total(&self) -> Money {
        self.device_monthly * CONTRACT_TERM_MONTHS
    }

    /// Monthly total including VAT.
    pub fn total_monthly_incl_vat(&self) -> Money {
        self.total_monthly_ex_vat + self.total_monthly_ex_vat.calculate_vat(VAT_RATE)
    }
}

// =============================================================================
// Calculator
// =============================================================================

/// Computes a quote.
///
/// ## Errors
/// - `IncompleteClientInfo` when name, email or sector is blank
/// - `NoDevicesSelected` when no catalog device has a quantity
///
/// Validation runs before any figure is derived. Models the catalog does
/// not know are ignored. Page volumes above `MAX_PAGE_VOLUME` are capped,
/// and the quote records the capped volumes.
///
/// ## Example
/// ```rust
/// use mps_core::{compute_quote, ClientInfo, CreditConfig, Money, Selection, ServiceConfig};
///
/// let client = ClientInfo {
///     name: "Acme".into(),
///     email: "ops@acme.ie".into(),
///     phone: None,
///     sector: "Education".into(),
/// };
/// let sel = Selection::new().with("Ricoh IM 7000", 1);
///
/// let quote = compute_quote(&client, &sel, &ServiceConfig::Disabled, &CreditConfig::default()).unwrap();
/// assert_eq!(quote.revenue_60mo, Money::from_major(18_000));
/// assert_eq!(quote.net_profit, Money::from_major(12_254));
/// assert!(quote.is_compliant());
/// ```
pub fn compute_quote(
    client: &ClientInfo,
    selection: &Selection,
    service: &ServiceConfig,
    credit: &CreditConfig,
) -> CoreResult<Quote> {
    validate_client_info(client)?;
    let credit = credit.capped();

    let total_devices = selection.total_devices();
    if total_devices == 0 {
        return Err(CoreError::NoDevicesSelected);
    }

    let lines: Vec<QuoteLine> = catalog::devices()
        .iter()
        .filter_map(|d| {
            let quantity = selection.quantity(d.model);
            (quantity > 0).then(|| QuoteLine {
                model: d.model.to_string(),
                quantity,
                unit_monthly: d.monthly_cost,
                unit_capex: d.capital_cost,
                unit_score: d.compliance_score,
            })
        })
        .collect();

    let total_score = lines
        .iter()
        .map(QuoteLine::line_score)
        .fold(0u32, u32::saturating_add);
    let device_monthly: Money = lines.iter().map(QuoteLine::line_monthly).sum();
    let capex_total: Money = lines.iter().map(QuoteLine::line_capex).sum();

    let mps = mps_charge(service, total_devices);
    let total_monthly_ex_vat = device_monthly + mps.monthly;
    let revenue_60mo = total_monthly_ex_vat * CONTRACT_TERM_MONTHS;

    let cpp_cost_60mo = micros_to_money(
        COST_PER_PRINT.micros_for(credit.included_mono, credit.included_colour),
        1,
    );
    let net_profit = revenue_60mo - capex_total - cpp_cost_60mo;
    let margin_pct = net_profit.percent_of(revenue_60mo);

    Ok(Quote {
        client: client.clone(),
        selection: selection.clone(),
        service: *service,
        credit,
        lines,
        total_devices,
        total_score,
        device_monthly,
        mps,
        total_monthly_ex_vat,
        revenue_60mo,
        capex_total,
        cpp_cost_60mo,
        net_profit,
        margin_pct,
        excess: excess_economics(&credit),
    })
}

fn mps_charge(service: &ServiceConfig, total_devices: u32) -> MpsCharge {
    match *service {
        ServiceConfig::Disabled => MpsCharge::default(),
        ServiceConfig::Enabled { pack, machines } => {
            let machines = machines.map_or(total_devices, |m| m.min(total_devices));
            let pack_cost = pack.monthly_rate();
            MpsCharge {
                pack: Some(pack),
                pack_cost,
                machines,
                monthly: pack_cost.multiply_quantity(machines),
            }
        }
    }
}

fn excess_economics(credit: &CreditConfig) -> Option<ExcessEconomics> {
    if !credit.has_excess() {
        return None;
    }

    let revenue_5yr = micros_to_money(
        OVERAGE_RATES.micros_for(credit.excess_mono, credit.excess_colour),
        EXCESS_TERM_YEARS,
    );
    let cost_5yr = micros_to_money(
        COST_PER_PRINT.micros_for(credit.excess_mono, credit.excess_colour),
        EXCESS_TERM_YEARS,
    );
    let profit_5yr = revenue_5yr - cost_5yr;

    Some(ExcessEconomics {
        revenue_5yr,
        cost_5yr,
        profit_5yr,
        margin_pct: profit_5yr.percent_of(revenue_5yr),
    })
}

impl QuoteRequest {
    /// Computes the quote for this request.
    pub fn compute(&self) -> CoreResult<Quote> {
        compute_quote(&self.client, &self.selection, &self.service, &self.credit)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
