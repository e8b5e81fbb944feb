//! Pricing engine for solar financing quotes.
//!
//! Pure functions from sizing inputs to the derived pricing bundle: purchase
//! price, financed principal, risk classification and the amortized offer
//! menu. No I/O and no side effects; identical inputs always produce
//! identical results.

use rust_decimal::{Decimal, MathematicalOps, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Purchase price per installed kilowatt, in currency units. The stored
/// currency is a label only; the rate does not change with it.
pub const PRICE_PER_KW: Decimal = dec!(1200);

/// Loan terms offered with every quote, in years.
pub const TERMS_YEARS: [u32; 3] = [5, 10, 15];

/// Coarse creditworthiness tier driving the base interest rate, A best.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskBand {
    A,
    B,
    C,
}

impl RiskBand {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskBand::A => "A",
            RiskBand::B => "B",
            RiskBand::C => "C",
        }
    }

    /// Base annual percentage rate for the band.
    pub fn base_apr(&self) -> Decimal {
        match self {
            RiskBand::A => dec!(6.9),
            RiskBand::B => dec!(8.9),
            RiskBand::C => dec!(11.9),
        }
    }
}

impl From<&str> for RiskBand {
    fn from(s: &str) -> Self {
        match s {
            "A" => RiskBand::A,
            "B" => RiskBand::B,
            _ => RiskBand::C,
        }
    }
}

/// One loan term's figures against the shared principal and band APR.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingOffer {
    pub term_years: u32,
    pub apr: Decimal,
    pub principal_used: Decimal,
    pub monthly_payment: Decimal,
}

/// Full derived pricing bundle for a quote request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuotePricing {
    pub system_price: Decimal,
    pub principal_amount: Decimal,
    pub risk_band: RiskBand,
    pub base_apr: Decimal,
    pub currency: String,
    pub offers: Vec<PricingOffer>,
}

/// Purchase price of an installation of the given size.
pub fn system_price(system_size_kw: Decimal) -> Decimal {
    system_size_kw * PRICE_PER_KW
}

/// Amount financed after the down payment. Not floored at zero: a down
/// payment above the system price yields a negative principal.
pub fn principal_amount(system_price: Decimal, down_payment: Decimal) -> Decimal {
    system_price - down_payment
}

/// Risk classification from consumption and system size.
///
/// The conjunctive A check runs before the B threshold, so a high-consumption
/// system larger than 6 kW lands in B, not A.
pub fn risk_band(monthly_consumption_kwh: Decimal, system_size_kw: Decimal) -> RiskBand {
    if monthly_consumption_kwh >= dec!(400) && system_size_kw <= dec!(6) {
        RiskBand::A
    } else if monthly_consumption_kwh >= dec!(250) {
        RiskBand::B
    } else {
        RiskBand::C
    }
}

/// Level monthly payment that retires `principal` plus interest over the term.
///
/// Standard amortization: r = rate/100/12, n = years*12,
/// payment = principal * r(1+r)^n / ((1+r)^n - 1), rounded half away from
/// zero on the cent. A zero rate degenerates to straight-line principal/n.
pub fn monthly_payment(principal: Decimal, annual_rate: Decimal, term_years: u32) -> Decimal {
    let monthly_rate = annual_rate / dec!(100) / dec!(12);
    let payments = Decimal::from(term_years * 12);

    if monthly_rate.is_zero() {
        return (principal / payments)
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    }

    let growth = (Decimal::ONE + monthly_rate).powi(i64::from(term_years) * 12);
    let payment = principal * (monthly_rate * growth) / (growth - Decimal::ONE);
    payment.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// One offer per term in [`TERMS_YEARS`], all sharing the band APR and the
/// same principal.
pub fn generate_offers(principal: Decimal, band: RiskBand) -> Vec<PricingOffer> {
    let apr = band.base_apr();

    TERMS_YEARS
        .iter()
        .map(|&term_years| PricingOffer {
            term_years,
            apr,
            principal_used: principal,
            monthly_payment: monthly_payment(principal, apr, term_years),
        })
        .collect()
}

/// Computes all pricing components for a quote. Total for any finite input;
/// a negative principal is propagated into the offers, not rejected.
pub fn calculate_quote_pricing(
    system_size_kw: Decimal,
    monthly_consumption_kwh: Decimal,
    down_payment: Decimal,
    currency: &str,
) -> QuotePricing {
    let price = system_price(system_size_kw);
    let principal = principal_amount(price, down_payment);
    let band = risk_band(monthly_consumption_kwh, system_size_kw);

    QuotePricing {
        system_price: price,
        principal_amount: principal,
        risk_band: band,
        base_apr: band.base_apr(),
        currency: currency.to_string(),
        offers: generate_offers(principal, band),
    }
}
