use async_trait::async_trait;

use super::pricing::QuotePricing;
use super::quotes_model::{NewQuote, Quote, QuotePage, QuoteView, QuoteWithAuthor};
use crate::errors::Result;

/// Trait defining the contract for Quote repository operations.
pub trait QuoteRepositoryTrait: Send + Sync {
    /// Persists a new quote row owned by `owner_user_id`, generating its id.
    fn create(
        &self,
        new_quote: NewQuote,
        pricing: QuotePricing,
        owner_user_id: &str,
    ) -> Result<Quote>;

    /// Loads a quote together with its author, only when it is owned by
    /// `owner_user_id`.
    fn find_by_id_for_owner(
        &self,
        quote_id: &str,
        owner_user_id: &str,
    ) -> Result<Option<QuoteWithAuthor>>;

    /// Returns one page of quote views (newest first) plus the total row
    /// count. `owner_filter` of `None` spans all owners.
    fn search(
        &self,
        owner_filter: Option<&str>,
        page: i64,
        limit: i64,
    ) -> Result<(Vec<QuoteView>, i64)>;
}

/// Trait defining the contract for Quote service operations.
#[async_trait]
pub trait QuoteServiceTrait: Send + Sync {
    async fn create_quote(&self, new_quote: NewQuote, owner_user_id: &str) -> Result<QuoteView>;
    fn get_quote_by_id(
        &self,
        quote_id: &str,
        requesting_user_id: &str,
    ) -> Result<Option<QuoteWithAuthor>>;
    fn get_all_quotes(
        &self,
        requesting_user_id: &str,
        page: i64,
        limit: i64,
        role_name: Option<&str>,
    ) -> Result<QuotePage>;
}
