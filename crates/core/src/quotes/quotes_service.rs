use async_trait::async_trait;
use log::error;
use std::sync::Arc;

use super::pricing;
use super::quotes_errors::QuoteError;
use super::quotes_model::{NewQuote, QuotePage, QuoteView, QuoteWithAuthor};
use super::quotes_traits::{QuoteRepositoryTrait, QuoteServiceTrait};
use crate::constants::{DEFAULT_CURRENCY, MAX_PAGE_SIZE, MIN_PAGE_SIZE, ROLE_ADMIN};
use crate::errors::Result;
use crate::users::{UserError, UserRepositoryTrait};

/// Service owning read/write access to quotes. Creation invokes the pricing
/// engine; retrieval enforces per-principal visibility.
pub struct QuoteService {
    quote_repository: Arc<dyn QuoteRepositoryTrait>,
    user_repository: Arc<dyn UserRepositoryTrait>,
}

impl QuoteService {
    /// Creates a new QuoteService instance
    pub fn new(
        quote_repository: Arc<dyn QuoteRepositoryTrait>,
        user_repository: Arc<dyn UserRepositoryTrait>,
    ) -> Self {
        Self {
            quote_repository,
            user_repository,
        }
    }
}

#[async_trait]
impl QuoteServiceTrait for QuoteService {
    async fn create_quote(&self, new_quote: NewQuote, owner_user_id: &str) -> Result<QuoteView> {
        new_quote.validate()?;

        let currency = new_quote
            .currency
            .clone()
            .unwrap_or_else(|| DEFAULT_CURRENCY.to_string());
        let pricing = pricing::calculate_quote_pricing(
            new_quote.system_size_kw,
            new_quote.monthly_consumption_kwh,
            new_quote.down_payment,
            &currency,
        );

        let quote = self
            .quote_repository
            .create(new_quote, pricing, owner_user_id)
            .map_err(|e| {
                error!("Error creating quote for user {}: {}", owner_user_id, e);
                e
            })?;

        // Separate read after the insert; no transaction spans the two. If the
        // owner vanished in between, the cascade has already removed the row.
        let owner = self
            .user_repository
            .find_by_id(owner_user_id)?
            .ok_or_else(|| {
                error!(
                    "Quote {} created but owner {} no longer exists",
                    quote.id, owner_user_id
                );
                UserError::NotFound(format!("User {} not found", owner_user_id))
            })?;

        Ok(QuoteView::for_owner(quote, &owner))
    }

    fn get_quote_by_id(
        &self,
        quote_id: &str,
        requesting_user_id: &str,
    ) -> Result<Option<QuoteWithAuthor>> {
        // Strictly owner-scoped: an ADMIN caller is restricted to quotes they
        // own, unlike the role-aware listing.
        self.quote_repository
            .find_by_id_for_owner(quote_id, requesting_user_id)
            .map_err(|e| {
                error!("Error fetching quote {}: {}", quote_id, e);
                e
            })
    }

    fn get_all_quotes(
        &self,
        requesting_user_id: &str,
        page: i64,
        limit: i64,
        role_name: Option<&str>,
    ) -> Result<QuotePage> {
        if page < 1 {
            return Err(QuoteError::InvalidData("Page must be greater than 0".to_string()).into());
        }
        if !(MIN_PAGE_SIZE..=MAX_PAGE_SIZE).contains(&limit) {
            return Err(
                QuoteError::InvalidData("Limit must be between 1 and 100".to_string()).into(),
            );
        }

        let owner_filter = if role_name == Some(ROLE_ADMIN) {
            None
        } else {
            Some(requesting_user_id)
        };

        let (quotes, total_count) = self
            .quote_repository
            .search(owner_filter, page, limit)
            .map_err(|e| {
                error!("Error fetching quotes for user {}: {}", requesting_user_id, e);
                e
            })?;

        let total_pages = if total_count == 0 {
            0
        } else {
            (total_count + limit - 1) / limit
        };

        Ok(QuotePage {
            quotes,
            total_count,
            total_pages,
            current_page: page,
        })
    }
}
