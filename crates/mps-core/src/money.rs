//! # Money Module
//!
//! Provides the `Money` type for monetary values, plus the two rate types
//! the quote needs: `PrintRate` (sub-cent, per page) and `VatRate`.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In floating point:                                                     │
//! │    120000 × 0.0038 = 455.99999999999994  ❌ WRONG!                      │
//! │                                                                         │
//! │  OUR SOLUTION: Integer cents, integer micro-rates                      │
//! │    0.0038 €/page  = 3800 micros/page                                   │
//! │    120000 × 3800  = 456_000_000 micros = 45600 cents = €456.00         │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use mps_core::money::{Money, PrintRate};
//!
//! let rental = Money::from_major(300);       // €300.00 / month
//! let term = rental * 60;                    // €18000.00
//! assert_eq!(term.cents(), 1_800_000);
//!
//! let mono = PrintRate::from_micros(3800);   // €0.0038 / page
//! assert_eq!(mono.cost_of(120_000).cents(), 45_600);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use ts_rs::TS;

/// Currency symbol used for every rendered amount.
pub const CURRENCY_SYMBOL: &str = "€";

/// Micro-units (millionths of the major unit) per cent.
const MICROS_PER_CENT: i128 = 10_000;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in cents.
///
/// ## Design Decisions
/// - **i64 (signed)**: net profit can be negative
/// - **Single field tuple struct**: Zero-cost abstraction over i64
///
/// ## Where Money is Used
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Device.monthly_cost ──► device_monthly ──┐                             │
/// │  ServicePack rate ─────► mps_monthly ─────┴► total_monthly_ex_vat       │
/// │                                                   │                     │
/// │                                              × 60 months                │
/// │                                                   ▼                     │
/// │  Device.capital_cost ──► capex_total ──► net_profit ◄── revenue_60mo    │
/// │  PrintRate × pages ────► cpp_cost_60mo ──┘                              │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    ///
    /// ## Example
    /// ```rust
    /// use mps_core::money::Money;
    ///
    /// let price = Money::from_cents(1099); // €10.99
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from whole currency units.
    ///
    /// Catalog prices are all whole euros, so this is how the catalog is built.
    #[inline]
    pub const fn from_major(major: i64) -> Self {
        Money(major * 100)
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the whole-unit (euro) portion.
    #[inline]
    pub const fn major(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the cents portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies money by a device or machine count.
    ///
    /// ## Example
    /// ```rust
    /// use mps_core::money::Money;
    ///
    /// let plus_pack = Money::from_major(35);
    /// assert_eq!(plus_pack.multiply_quantity(2).cents(), 7000); // €70.00
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: u32) -> Self {
        Money(self.0 * qty as i64)
    }

    /// Calculates VAT on this amount, rounding half up to the cent.
    ///
    /// ## Implementation
    /// Integer math: `(amount * bps + 5000) / 10000`
    ///
    /// ## Example
    /// ```rust
    /// use mps_core::money::{Money, VatRate};
    ///
    /// let monthly = Money::from_major(300);
    /// let vat = monthly.calculate_vat(VatRate::from_bps(2300)); // 23%
    /// assert_eq!(vat.cents(), 6900);
    /// ```
    pub fn calculate_vat(&self, rate: VatRate) -> Money {
        let vat_cents = (self.0 as i128 * rate.bps() as i128 + 5000).div_euclid(10000);
        Money::from_cents(vat_cents as i64)
    }

    /// Ratio of `self` to `base` as a percentage, or 0 when `base` is not
    /// positive.
    ///
    /// ## Example
    /// ```rust
    /// use mps_core::money::Money;
    ///
    /// let profit = Money::from_major(600);
    /// let revenue = Money::from_major(2400);
    /// assert_eq!(profit.percent_of(revenue), 25.0);
    /// assert_eq!(profit.percent_of(Money::zero()), 0.0);
    /// ```
    pub fn percent_of(&self, base: Money) -> f64 {
        if !base.is_positive() {
            return 0.0;
        }
        self.0 as f64 / base.0 as f64 * 100.0
    }

    /// Value in major units as a float, for records consumed by the UI.
    #[inline]
    pub fn to_major_f64(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Short form used inside calculation formulas: no trailing `.00`.
    ///
    /// ## Example
    /// ```rust
    /// use mps_core::money::Money;
    ///
    /// assert_eq!(Money::from_major(300).to_compact_string(), "300");
    /// assert_eq!(Money::from_cents(4550).to_compact_string(), "45.5");
    /// assert_eq!(Money::from_cents(1099).to_compact_string(), "10.99");
    /// ```
    pub fn to_compact_string(&self) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        let whole = self.major().abs();
        match self.cents_part() {
            0 => format!("{}{}", sign, whole),
            c if c % 10 == 0 => format!("{}{}.{}", sign, whole, c / 10),
            c => format!("{}{}.{:02}", sign, whole, c),
        }
    }

    /// Converts an amount expressed in micro-units to cents, rounding half
    /// away from zero. Saturates at the `i64` range.
    fn from_micros(micros: i128) -> Money {
        let half = MICROS_PER_CENT / 2;
        let cents = if micros >= 0 {
            (micros + half) / MICROS_PER_CENT
        } else {
            (micros - half) / MICROS_PER_CENT
        };
        let cents = i64::try_from(cents).unwrap_or(if cents < 0 { i64::MIN } else { i64::MAX });
        Money::from_cents(cents)
    }
}

/// Display renders the amount with the currency symbol and two decimals.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}{}{}.{:02}",
            sign,
            CURRENCY_SYMBOL,
            self.major().abs(),
            self.cents_part()
        )
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Multiplication by a term length (months, years).
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, factor: i64) -> Self {
        Money(self.0 * factor)
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Print Rate
// =============================================================================

/// A per-page rate in micro-units (millionths of a euro).
///
/// ## Why Micros?
/// Print rates are fractions of a cent: €0.0038 per mono page cannot be
/// held in `Money`. 1 micro = €0.000001, so 0.0038 = 3800 micros.
///
/// Page counts multiply into micros first; the total is rounded to cents
/// once, at the end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PrintRate(u32);

impl PrintRate {
    /// Creates a rate from micro-units per page.
    #[inline]
    pub const fn from_micros(micros: u32) -> Self {
        PrintRate(micros)
    }

    /// Returns the rate in micro-units per page.
    #[inline]
    pub const fn micros(&self) -> u32 {
        self.0
    }

    /// Cost of `pages` pages at this rate, rounded to the cent.
    pub fn cost_of(&self, pages: u64) -> Money {
        Money::from_micros(self.micros_for(pages))
    }

    /// Unrounded cost of `pages` pages in micro-units.
    #[inline]
    pub(crate) fn micros_for(&self, pages: u64) -> i128 {
        pages as i128 * self.0 as i128
    }
}

/// Sums per-class micro amounts, scales by `factor`, and rounds once.
pub(crate) fn micros_to_money(micros: i128, factor: i64) -> Money {
    Money::from_micros(micros * factor as i128)
}

/// Display shows the rate as a plain decimal: `0.0038`, `0.05`.
impl fmt::Display for PrintRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self.0 / 1_000_000;
        let frac = self.0 % 1_000_000;
        if frac == 0 {
            return write!(f, "{}", whole);
        }
        let digits = format!("{:06}", frac);
        write!(f, "{}.{}", whole, digits.trim_end_matches('0'))
    }
}

// =============================================================================
// VAT Rate
// =============================================================================

/// VAT rate represented in basis points (bps).
///
/// 1 basis point = 0.01%, so 2300 bps = 23% (Irish standard rate).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct VatRate(u32);

impl VatRate {
    /// Creates a VAT rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        VatRate(bps)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
