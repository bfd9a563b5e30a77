//! # Quote Formatting
//!
//! Renders a computed [`Quote`] as text: the result panel breakdown
//! ([`QuoteDisplay`]) and the plain-text submission message.
//!
//! ## Display Conventions
//! - Amounts: `€` + two decimals (`€18000.00`)
//! - Percentages: one decimal (`68.1%`)
//! - Formula unit prices: no trailing zeros (`1×€300`, `2×€35/mo`)
//! - Page volumes in formulas: thousands separators (`120,000×€0.0038`)

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::catalog::COST_PER_PRINT;
use crate::money::{Money, CURRENCY_SYMBOL};
use crate::quote::{ExcessEconomics, Quote, QuoteLine};
use crate::CONTRACT_TERM_MONTHS;

/// Placeholder for an empty formula or a missing phone number.
pub const EMPTY_FIELD: &str = "—";

// =============================================================================
// Helpers
// =============================================================================

/// Formats an integer with `,` thousands separators.
///
/// ## Example
/// ```rust
/// use mps_core::format::group_thousands;
///
/// assert_eq!(group_thousands(120_000), "120,000");
/// assert_eq!(group_thousands(999), "999");
/// assert_eq!(group_thousands(1_000_000), "1,000,000");
/// ```
pub fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Formats a percentage with one decimal.
pub fn format_percent(pct: f64) -> String {
    format!("{:.1}%", pct)
}

/// Joins `qty×€price` terms with ` + `, or returns the placeholder.
fn formula(lines: &[QuoteLine], price: impl Fn(&QuoteLine) -> Money) -> String {
    if lines.is_empty() {
        return EMPTY_FIELD.to_string();
    }
    lines
        .iter()
        .map(|l| format!("{}×{}{}", l.quantity, CURRENCY_SYMBOL, price(l).to_compact_string()))
        .collect::<Vec<_>>()
        .join(" + ")
}

// =============================================================================
// Result Panel
// =============================================================================

/// Excess block of the result panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ExcessDisplay {
    pub revenue: String,
    pub cost: String,
    pub profit: String,
    pub margin: String,
}

impl From<&ExcessEconomics> for ExcessDisplay {
    fn from(ex: &ExcessEconomics) -> Self {
        ExcessDisplay {
            revenue: ex.revenue_5yr.to_string(),
            cost: ex.cost_5yr.to_string(),
            profit: ex.profit_5yr.to_string(),
            margin: format_percent(ex.margin_pct),
        }
    }
}

/// Every string the result panel shows, in panel order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct QuoteDisplay {
    pub device_calc: String,
    pub device_amount: String,
    pub mps_calc: String,
    pub mps_amount: String,
    pub revenue: String,
    pub capex_calc: String,
    pub capex_amount: String,
    pub cpp_calc: String,
    pub cpp_amount: String,
    pub profit: String,
    pub margin: String,
    pub score: u32,
    pub verdict: String,
    pub monthly_ex_vat: String,
    pub monthly_incl_vat: String,
    pub excess: Option<ExcessDisplay>,
}

impl From<&Quote> for QuoteDisplay {
    fn from(q: &Quote) -> Self {
        let (mps_calc, mps_amount) = if q.mps.machines > 0 {
            (
                format!(
                    "{}×{}{}/mo × {} mo",
                    q.mps.machines,
                    CURRENCY_SYMBOL,
                    q.mps.pack_cost.to_compact_string(),
                    CONTRACT_TERM_MONTHS
                ),
                q.mps.term_total().to_string(),
            )
        } else {
            (EMPTY_FIELD.to_string(), Money::zero().to_string())
        };

        let cpp_calc = format!(
            "{}×{}{} + {}×{}{}",
            group_thousands(q.credit.included_mono),
            CURRENCY_SYMBOL,
            COST_PER_PRINT.mono,
            group_thousands(q.credit.included_colour),
            CURRENCY_SYMBOL,
            COST_PER_PRINT.colour,
        );

        QuoteDisplay {
            device_calc: formula(&q.lines, |l| l.unit_monthly),
            device_amount: q.device_term_total().to_string(),
            mps_calc,
            mps_amount,
            revenue: q.revenue_60mo.to_string(),
            capex_calc: formula(&q.lines, |l| l.unit_capex),
            capex_amount: q.capex_total.to_string(),
            cpp_calc,
            cpp_amount: q.cpp_cost_60mo.to_string(),
            profit: q.net_profit.to_string(),
            margin: format_percent(q.margin_pct),
            score: q.total_score,
            verdict: q.verdict().to_string(),
            monthly_ex_vat: q.total_monthly_ex_vat.to_string(),
            monthly_incl_vat: q.total_monthly_incl_vat().to_string(),
            excess: q.excess.as_ref().map(ExcessDisplay::from),
        }
    }
}

// =============================================================================
// Submission Text
// =============================================================================

/// Subject line of the submitted quote.
pub fn submission_subject(quote: &Quote) -> String {
    format!("[QUOTE] {}", quote.client.name)
}

/// Plain-text body of the submitted quote.
///
/// ## Layout
/// ```text
/// CLIENT: Acme Ltd (Education)
/// EMAIL: ops@acme.ie
/// PHONE: —
///
/// DEVICES:
/// - 1 × Ricoh IM 7000
///
/// PRINT CREDIT: 120000 mono + 30000 colour (60 months)
/// MONTHLY (ex VAT): €300.00
/// COMPLIANCE SCORE: 100 (PASS)
/// ```
pub fn submission_message(quote: &Quote) -> String {
    let client = &quote.client;
    let phone = match client.phone_or_empty() {
        "" => EMPTY_FIELD,
        p => p,
    };

    let mut lines = vec![
        format!("CLIENT: {} ({})", client.name, client.sector),
        format!("EMAIL: {}", client.email),
        format!("PHONE: {}", phone),
        String::new(),
        "DEVICES:".to_string(),
    ];
    lines.extend(
        quote
            .lines
            .iter()
            .map(|line| format!("- {} × {}", line.quantity, line.model)),
    );
    lines.extend([
        String::new(),
        format!(
            "PRINT CREDIT: {} mono + {} colour ({} months)",
            quote.credit.included_mono, quote.credit.included_colour, CONTRACT_TERM_MONTHS
        ),
        format!("MONTHLY (ex VAT): {}", quote.total_monthly_ex_vat),
        format!("COMPLIANCE SCORE: {} ({})", quote.total_score, quote.verdict()),
    ]);
    lines.join("\n")
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ServicePack;
    use crate::input::{ClientInfo, CreditConfig, Selection, ServiceConfig};
    use crate::quote::compute_quote;

    fn client(phone: Option<&str>) -> ClientInfo {
        ClientInfo {
            name: "Acme Ltd".to_string(),
            email: "ops@acme.ie".to_string(),
            phone: phone.map(str::to_string),
            sector: "Education".to_string(),
        }
    }

    fn quote_for(sel: Selection, service: ServiceConfig, credit: CreditConfig) -> Quote {
        compute_quote(&client(None), &sel, &service, &credit).unwrap()
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(30_000), "30,000");
    }

    #[test]
    fn test_display_single_device() {
        let q = quote_for(
            Selection::new().with("Ricoh IM 7000", 1),
            ServiceConfig::Disabled,
            CreditConfig::default(),
        );
        let d = QuoteDisplay::from(&q);

        assert_eq!(d.device_calc, "1×€300");
        assert_eq!(d.device_amount, "€18000.00");
        assert_eq!(d.mps_calc, "—");
        assert_eq!(d.mps_amount, "€0.00");
        assert_eq!(d.revenue, "€18000.00");
        assert_eq!(d.capex_calc, "1×€4150");
        assert_eq!(d.capex_amount, "€4150.00");
        assert_eq!(d.cpp_calc, "120,000×€0.0038 + 30,000×€0.038");
        assert_eq!(d.cpp_amount, "€1596.00");
        assert_eq!(d.profit, "€12254.00");
        assert_eq!(d.margin, "68.1%");
        assert_eq!(d.score, 100);
        assert_eq!(d.verdict, "PASS");
        assert_eq!(d.monthly_ex_vat, "€300.00");
        assert_eq!(d.monthly_incl_vat, "€369.00");
        assert!(d.excess.is_none());
    }

    #[test]
    fn test_display_multi_device_with_mps() {
        let q = quote_for(
            Selection::new()
                .with("Ricoh IM 7000", 1)
                .with("Ricoh IM C320F", 2),
            ServiceConfig::pack_for(ServicePack::Plus, 2),
            CreditConfig::default(),
        );
        let d = QuoteDisplay::from(&q);

        assert_eq!(d.device_calc, "1×€300 + 2×€50");
        assert_eq!(d.capex_calc, "1×€4150 + 2×€1000");
        assert_eq!(d.mps_calc, "2×€35/mo × 60 mo");
        assert_eq!(d.mps_amount, "€4200.00");
    }

    #[test]
    fn test_display_excess_block() {
        let q = quote_for(
            Selection::new().with("Ricoh IM 7000", 1),
            ServiceConfig::Disabled,
            CreditConfig {
                excess_mono: 1000,
                ..CreditConfig::default()
            },
        );
        let ex = QuoteDisplay::from(&q).excess.unwrap();
        assert_eq!(ex.revenue, "€25.00");
        assert_eq!(ex.cost, "€19.00");
        assert_eq!(ex.profit, "€6.00");
        assert_eq!(ex.margin, "24.0%");
    }

    #[test]
    fn test_submission_message_layout() {
        let q = quote_for(
            Selection::new()
                .with("Ricoh IM 370", 2)
                .with("Ricoh IM 7000", 1),
            ServiceConfig::Disabled,
            CreditConfig::default(),
        );
        let expected = "CLIENT: Acme Ltd (Education)\n\
                        EMAIL: ops@acme.ie\n\
                        PHONE: —\n\
                        \n\
                        DEVICES:\n\
                        - 1 × Ricoh IM 7000\n\
                        - 2 × Ricoh IM 370\n\
                        \n\
                        PRINT CREDIT: 120000 mono + 30000 colour (60 months)\n\
                        MONTHLY (ex VAT): €350.00\n\
                        COMPLIANCE SCORE: 150 (PASS)";
        assert_eq!(submission_message(&q), expected);
        assert_eq!(submission_subject(&q), "[QUOTE] Acme Ltd");
    }

    #[test]
    fn test_submission_message_with_phone_and_fail() {
        let q = compute_quote(
            &client(Some("087 123 4567")),
            &Selection::new().with("Ricoh IM 370", 1),
            &ServiceConfig::Disabled,
            &CreditConfig::default(),
        )
        .unwrap();
        let msg = submission_message(&q);
        assert!(msg.contains("PHONE: 087 123 4567\n"));
        assert!(msg.ends_with("COMPLIANCE SCORE: 25 (FAIL)"));
    }
}
