use chrono::Utc;
use diesel::prelude::*;
use std::sync::Arc;
use uuid::Uuid;

use super::pricing::QuotePricing;
use super::quotes_errors::QuoteError;
use super::quotes_model::{NewQuote, Quote, QuoteDB, QuoteView, QuoteWithAuthor};
use super::quotes_traits::QuoteRepositoryTrait;
use crate::db::{get_connection, DbPool};
use crate::errors::Result;
use crate::schema::{quotes, users};

/// Repository for managing quote rows in the database
pub struct QuoteRepository {
    pool: Arc<DbPool>,
}

impl QuoteRepository {
    /// Creates a new QuoteRepository instance
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }
}

impl QuoteRepositoryTrait for QuoteRepository {
    fn create(
        &self,
        new_quote: NewQuote,
        pricing: QuotePricing,
        owner_user_id: &str,
    ) -> Result<Quote> {
        let mut conn = get_connection(&self.pool)?;

        let offers = serde_json::to_string(&pricing.offers)?;
        let now = Utc::now().naive_utc();
        let row = QuoteDB {
            id: Uuid::now_v7().to_string(),
            user_id: owner_user_id.to_string(),
            system_size_kw: new_quote.system_size_kw.to_string(),
            monthly_consumption_kwh: new_quote.monthly_consumption_kwh.to_string(),
            down_payment: new_quote.down_payment.to_string(),
            currency: pricing.currency.clone(),
            system_price: pricing.system_price.to_string(),
            principal_amount: pricing.principal_amount.to_string(),
            risk_band: pricing.risk_band.as_str().to_string(),
            base_apr: pricing.base_apr.to_string(),
            offers,
            created_at: now,
            updated_at: now,
        };

        diesel::insert_into(quotes::table)
            .values(&row)
            .get_result::<QuoteDB>(&mut conn)
            .map(Quote::from)
            .map_err(|e| QuoteError::from(e).into())
    }

    fn find_by_id_for_owner(
        &self,
        quote_id: &str,
        owner_user_id: &str,
    ) -> Result<Option<QuoteWithAuthor>> {
        let mut conn = get_connection(&self.pool)?;

        let row = quotes::table
            .inner_join(users::table)
            .filter(quotes::id.eq(quote_id))
            .filter(quotes::user_id.eq(owner_user_id))
            .select((
                QuoteDB::as_select(),
                (users::id, users::full_name, users::email, users::address),
            ))
            .first::<(QuoteDB, (String, String, String, Option<String>))>(&mut conn)
            .optional()
            .map_err(QuoteError::from)?;

        Ok(row.map(|(quote, (author_id, full_name, email, address))| {
            QuoteWithAuthor::new(Quote::from(quote), author_id, full_name, email, address)
        }))
    }

    fn search(
        &self,
        owner_filter: Option<&str>,
        page: i64,
        limit: i64,
    ) -> Result<(Vec<QuoteView>, i64)> {
        let mut conn = get_connection(&self.pool)?;

        let offset = (page - 1) * limit;

        // Count and page are two separate reads; they are not atomic against
        // concurrent inserts.
        let total_count = match owner_filter {
            Some(owner_id) => quotes::table
                .filter(quotes::user_id.eq(owner_id))
                .count()
                .get_result::<i64>(&mut conn),
            None => quotes::table.count().get_result::<i64>(&mut conn),
        }
        .map_err(QuoteError::from)?;

        // UUIDv7 ids keep equal-timestamp rows in insertion order.
        let mut query = quotes::table
            .inner_join(users::table)
            .select((
                QuoteDB::as_select(),
                (users::full_name, users::email, users::address),
            ))
            .order(quotes::created_at.desc())
            .then_order_by(quotes::id.asc())
            .into_boxed();
        if let Some(owner_id) = owner_filter {
            query = query.filter(quotes::user_id.eq(owner_id.to_string()));
        }

        let rows = query
            .limit(limit)
            .offset(offset)
            .load::<(QuoteDB, (String, String, Option<String>))>(&mut conn)
            .map_err(QuoteError::from)?;

        let views = rows
            .into_iter()
            .map(|(quote, (full_name, email, address))| {
                QuoteView::new(Quote::from(quote), full_name, email, address)
            })
            .collect();

        Ok((views, total_count))
    }
}
