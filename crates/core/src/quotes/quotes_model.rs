use chrono::{DateTime, NaiveDateTime, Utc};
use diesel::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::pricing::{PricingOffer, RiskBand};
use super::quotes_errors::QuoteError;
use crate::users::{User, UserDB};

/// Domain model representing a priced financing quote. Derived fields are
/// fixed at creation; a quote is never updated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub id: String,
    pub user_id: String,
    pub system_size_kw: Decimal,
    pub monthly_consumption_kwh: Decimal,
    pub down_payment: Decimal,
    pub currency: String,
    pub system_price: Decimal,
    pub principal_amount: Decimal,
    pub risk_band: RiskBand,
    pub base_apr: Decimal,
    pub offers: Vec<PricingOffer>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Database model for quotes. Decimal values are stored as text; the offer
/// menu is a JSON column.
#[derive(
    Queryable,
    Identifiable,
    Selectable,
    Insertable,
    AsChangeset,
    Associations,
    PartialEq,
    Debug,
    Clone,
)]
#[diesel(table_name = crate::schema::quotes)]
#[diesel(belongs_to(UserDB, foreign_key = user_id))]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct QuoteDB {
    pub id: String,
    pub user_id: String,
    pub system_size_kw: String,
    pub monthly_consumption_kwh: String,
    pub down_payment: String,
    pub currency: String,
    pub system_price: String,
    pub principal_amount: String,
    pub risk_band: String,
    pub base_apr: String,
    pub offers: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Input model for requesting a new quote
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewQuote {
    pub system_size_kw: Decimal,
    pub monthly_consumption_kwh: Decimal,
    pub down_payment: Decimal,
    pub currency: Option<String>,
}

impl NewQuote {
    /// Validates the quote request data
    pub fn validate(&self) -> Result<(), QuoteError> {
        if self.system_size_kw <= Decimal::ZERO {
            return Err(QuoteError::InvalidData(
                "systemSizeKw must be positive".to_string(),
            ));
        }
        if self.monthly_consumption_kwh <= Decimal::ZERO {
            return Err(QuoteError::InvalidData(
                "monthlyConsumptionKwh must be positive".to_string(),
            ));
        }
        if self.down_payment < Decimal::ZERO {
            return Err(QuoteError::InvalidData(
                "downPayment must be non-negative".to_string(),
            ));
        }
        Ok(())
    }
}

/// Quote view with the owner's profile fields denormalized alongside
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct QuoteView {
    #[serde(flatten)]
    pub quote: Quote,
    pub full_name: String,
    pub email: String,
    pub address: Option<String>,
}

impl QuoteView {
    pub fn new(quote: Quote, full_name: String, email: String, address: Option<String>) -> Self {
        QuoteView {
            quote,
            full_name,
            email,
            address,
        }
    }

    pub fn for_owner(quote: Quote, owner: &User) -> Self {
        Self::new(
            quote,
            owner.full_name.clone(),
            owner.email.clone(),
            owner.address.clone(),
        )
    }
}

/// Compact author sub-object returned with single-quote lookups
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct QuoteAuthor {
    pub id: String,
    pub full_name: String,
    pub email: String,
}

/// Single-quote view: the denormalized fields plus the author sub-object
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct QuoteWithAuthor {
    #[serde(flatten)]
    pub view: QuoteView,
    pub author: QuoteAuthor,
}

impl QuoteWithAuthor {
    pub fn new(
        quote: Quote,
        author_id: String,
        full_name: String,
        email: String,
        address: Option<String>,
    ) -> Self {
        let author = QuoteAuthor {
            id: author_id,
            full_name: full_name.clone(),
            email: email.clone(),
        };
        QuoteWithAuthor {
            view: QuoteView::new(quote, full_name, email, address),
            author,
        }
    }
}

/// One page of quote views with pagination totals
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct QuotePage {
    pub quotes: Vec<QuoteView>,
    pub total_count: i64,
    pub total_pages: i64,
    pub current_page: i64,
}

impl From<QuoteDB> for Quote {
    fn from(db: QuoteDB) -> Self {
        let offers: Vec<PricingOffer> = serde_json::from_str(&db.offers).unwrap_or_default();

        Quote {
            id: db.id,
            user_id: db.user_id,
            system_size_kw: Decimal::from_str(&db.system_size_kw).unwrap_or_default(),
            monthly_consumption_kwh: Decimal::from_str(&db.monthly_consumption_kwh)
                .unwrap_or_default(),
            down_payment: Decimal::from_str(&db.down_payment).unwrap_or_default(),
            currency: db.currency,
            system_price: Decimal::from_str(&db.system_price).unwrap_or_default(),
            principal_amount: Decimal::from_str(&db.principal_amount).unwrap_or_default(),
            risk_band: RiskBand::from(db.risk_band.as_str()),
            base_apr: Decimal::from_str(&db.base_apr).unwrap_or_default(),
            offers,
            created_at: DateTime::from_naive_utc_and_offset(db.created_at, Utc),
            updated_at: DateTime::from_naive_utc_and_offset(db.updated_at, Utc),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn request(down_payment: Decimal) -> NewQuote {
        NewQuote {
            system_size_kw: dec!(5),
            monthly_consumption_kwh: dec!(500),
            down_payment,
            currency: None,
        }
    }

    #[test]
    fn test_validate_accepts_zero_down_payment() {
        assert!(request(Decimal::ZERO).validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_non_positive_inputs() {
        let mut quote = request(dec!(100));
        quote.system_size_kw = Decimal::ZERO;
        assert!(quote.validate().is_err());

        let mut quote = request(dec!(100));
        quote.monthly_consumption_kwh = dec!(-1);
        assert!(quote.validate().is_err());

        assert!(request(dec!(-0.01)).validate().is_err());
    }

    #[test]
    fn test_offers_round_trip_through_json_column() {
        let offers = vec![PricingOffer {
            term_years: 5,
            apr: dec!(6.9),
            principal_used: dec!(5000),
            monthly_payment: dec!(98.77),
        }];
        let encoded = serde_json::to_string(&offers).unwrap();
        let decoded: Vec<PricingOffer> = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded, offers);
    }
}
