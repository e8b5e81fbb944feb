// Module declarations
pub mod pricing;
pub(crate) mod quotes_errors;
pub(crate) mod quotes_model;
pub(crate) mod quotes_repository;
pub(crate) mod quotes_service;
#[cfg(test)]
mod quotes_service_tests;
pub(crate) mod quotes_traits;

// Re-export the public interface
pub use pricing::{PricingOffer, QuotePricing, RiskBand};
pub use quotes_errors::QuoteError;
pub use quotes_model::{NewQuote, Quote, QuoteAuthor, QuoteDB, QuotePage, QuoteView, QuoteWithAuthor};
pub use quotes_repository::QuoteRepository;
pub use quotes_service::QuoteService;
pub use quotes_traits::{QuoteRepositoryTrait, QuoteServiceTrait};
