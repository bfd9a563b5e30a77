//! # Quote Form
//!
//! Raw form state as the UI holds it (every field is text) and the
//! permissive coercion that turns it into a [`QuoteRequest`].
//!
//! ## Coercion Rules
//! ```text
//! ┌────────────────────┬──────────────────────────┬────────────────────────┐
//! │ Field              │ Junk / empty / zero      │ Negative               │
//! ├────────────────────┼──────────────────────────┼────────────────────────┤
//! │ device quantity    │ 0                        │ 0                      │
//! │ included credit    │ default (120000 / 30000) │ 0                      │
//! │ excess pages       │ 0                        │ 0                      │
//! │ MPS machines       │ all devices              │ 0                      │
//! └────────────────────┴──────────────────────────┴────────────────────────┘
//! ```
//! Fractional values are truncated, quantities are capped at
//! `MAX_DEVICE_QUANTITY` and page volumes at `MAX_PAGE_VOLUME`. Numeric
//! fields never produce an error; only an unknown pack name does.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use ts_rs::TS;

use crate::catalog::{self, ServicePack};
use crate::error::CoreResult;
use crate::input::{ClientInfo, CreditConfig, QuoteRequest, Selection, ServiceConfig};
use crate::quote::Quote;
use crate::validation::validate_client_info;
use crate::{DEFAULT_INCLUDED_COLOUR, DEFAULT_INCLUDED_MONO, MAX_DEVICE_QUANTITY, MAX_PAGE_VOLUME};

// =============================================================================
// Number Parsing
// =============================================================================

/// Parses form text the way a browser number field reads it.
///
/// Blank text is 0. Anything that is not a number is NaN. Accepts decimal,
/// exponent and `0x`/`0o`/`0b` integer forms plus `Infinity`.
///
/// ## Example
/// ```rust
/// use mps_core::form::parse_number;
///
/// assert_eq!(parse_number(" 12 "), 12.0);
/// assert_eq!(parse_number(""), 0.0);
/// assert_eq!(parse_number("1e3"), 1000.0);
/// assert_eq!(parse_number("0x10"), 16.0);
/// assert!(parse_number("twelve").is_nan());
/// assert!(parse_number("inf").is_nan());
/// ```
pub fn parse_number(raw: &str) -> f64 {
    let s = raw.trim();
    if s.is_empty() {
        return 0.0;
    }

    for (prefix, radix) in [("0x", 16), ("0X", 16), ("0o", 8), ("0O", 8), ("0b", 2), ("0B", 2)] {
        if let Some(digits) = s.strip_prefix(prefix) {
            return u64::from_str_radix(digits, radix)
                .map(|n| n as f64)
                .unwrap_or(f64::NAN);
        }
    }

    match s {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }

    // Rust also accepts "inf" and "nan" spellings; a number field does not.
    if s.bytes().any(|b| b.is_ascii_alphabetic() && b != b'e' && b != b'E') {
        return f64::NAN;
    }

    s.parse().unwrap_or(f64::NAN)
}

/// Whole non-negative count: junk and negatives become 0.
pub fn coerce_count(raw: &str) -> u64 {
    let n = parse_number(raw);
    if n.is_nan() || n <= 0.0 {
        0
    } else {
        (n.trunc() as u64).min(MAX_PAGE_VOLUME)
    }
}

/// Included page credit: junk, blank and zero fall back to `default`,
/// negatives become 0.
pub fn coerce_credit(raw: &str, default: u64) -> u64 {
    let n = parse_number(raw);
    if n.is_nan() || n == 0.0 {
        default
    } else if n < 0.0 {
        0
    } else {
        (n.trunc() as u64).min(MAX_PAGE_VOLUME)
    }
}

/// MPS machine count: junk, blank and zero mean "all devices", negatives
/// cover nothing.
pub fn coerce_machines(raw: &str) -> Option<u32> {
    let n = parse_number(raw);
    if n.is_nan() || n == 0.0 {
        None
    } else if n < 0.0 {
        Some(0)
    } else {
        Some(n.trunc() as u32)
    }
}

fn quantity_from(raw: &str) -> u32 {
    u32::try_from(coerce_count(raw))
        .unwrap_or(u32::MAX)
        .min(MAX_DEVICE_QUANTITY)
}

// =============================================================================
// Quote Form
// =============================================================================

/// Text state of the quote form.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase", default)]
#[ts(export)]
pub struct QuoteForm {
    pub client_name: String,
    pub client_email: String,
    pub client_phone: String,
    pub client_sector: String,

    /// Quantity field per model.
    pub quantities: BTreeMap<String, String>,

    pub mps_enabled: bool,
    /// Selected pack name; read only when `mps_enabled`.
    pub pack: String,
    pub mps_machines: String,

    pub mono_included: String,
    pub colour_included: String,
    pub mono_excess: String,
    pub colour_excess: String,
}

impl QuoteForm {
    /// Current quantity for a model as the calculator would read it.
    pub fn quantity(&self, model: &str) -> u32 {
        self.quantities
            .get(model)
            .map(|raw| quantity_from(raw))
            .unwrap_or(0)
    }

    /// Sum of catalog quantities.
    pub fn total_devices(&self) -> u32 {
        catalog::devices()
            .iter()
            .map(|d| self.quantity(d.model))
            .sum()
    }

    /// The +/− buttons: adds `delta` to a model's quantity, never going
    /// below zero. Returns the new quantity.
    ///
    /// ## Example
    /// ```rust
    /// use mps_core::form::QuoteForm;
    ///
    /// let mut form = QuoteForm::default();
    /// assert_eq!(form.adjust_quantity("Ricoh IM 370", 1), 1);
    /// assert_eq!(form.adjust_quantity("Ricoh IM 370", -5), 0);
    /// ```
    pub fn adjust_quantity(&mut self, model: &str, delta: i64) -> u32 {
        let current = i64::from(self.quantity(model));
        let next = current
            .saturating_add(delta)
            .clamp(0, i64::from(MAX_DEVICE_QUANTITY)) as u32;
        self.quantities.insert(model.to_string(), next.to_string());
        next
    }

    /// Toggles MPS. Turning it on pre-fills the machine count with the
    /// current device total.
    pub fn set_mps_enabled(&mut self, enabled: bool) {
        self.mps_enabled = enabled;
        if enabled {
            self.mps_machines = self.total_devices().to_string();
        }
    }

    /// Coerces the form into typed inputs.
    ///
    /// ## Errors
    /// `UnknownPack` when MPS is enabled with a pack name the catalog does
    /// not have. Client fields are not checked here; `compute_quote` does.
    pub fn to_request(&self) -> CoreResult<QuoteRequest> {
        let client = self.client_info();

        let selection = self
            .quantities
            .iter()
            .fold(Selection::new(), |sel, (model, raw)| {
                sel.with(model.as_str(), quantity_from(raw))
            });

        let service = if self.mps_enabled {
            ServiceConfig::Enabled {
                pack: self.pack.parse::<ServicePack>()?,
                machines: coerce_machines(&self.mps_machines),
            }
        } else {
            ServiceConfig::Disabled
        };

        let credit = CreditConfig {
            included_mono: coerce_credit(&self.mono_included, DEFAULT_INCLUDED_MONO),
            included_colour: coerce_credit(&self.colour_included, DEFAULT_INCLUDED_COLOUR),
            excess_mono: coerce_count(&self.mono_excess),
            excess_colour: coerce_count(&self.colour_excess),
        };

        Ok(QuoteRequest {
            client,
            selection,
            service,
            credit,
        })
    }

    /// Client fields, trimmed. A blank phone becomes `None`.
    pub fn client_info(&self) -> ClientInfo {
        ClientInfo {
            name: self.client_name.trim().to_string(),
            email: self.client_email.trim().to_string(),
            phone: Some(self.client_phone.trim())
                .filter(|p| !p.is_empty())
                .map(str::to_string),
            sector: self.client_sector.trim().to_string(),
        }
    }

    /// Coerces and computes in one step (the Calculate button).
    ///
    /// Client fields are checked first, so a blank name is reported even
    /// when the pack name is also wrong.
    pub fn compute(&self) -> CoreResult<Quote> {
        validate_client_info(&self.client_info())?;
        self.to_request()?.compute()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
