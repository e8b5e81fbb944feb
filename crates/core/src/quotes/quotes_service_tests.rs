//! Tests for the quote service contract: visibility scoping, pagination
//! bounds, and the non-transactional create path.

use chrono::{Duration, Utc};
use rust_decimal_macros::dec;
use std::sync::{Arc, RwLock};
use uuid::Uuid;

use super::pricing::QuotePricing;
use super::quotes_model::{NewQuote, Quote, QuotePage, QuoteView, QuoteWithAuthor};
use super::quotes_service::QuoteService;
use super::quotes_traits::{QuoteRepositoryTrait, QuoteServiceTrait};
use crate::constants::{ROLE_ADMIN, ROLE_USER};
use crate::errors::{Error, Result};
use crate::quotes::QuoteError;
use crate::users::{NewUser, User, UserError, UserRepositoryTrait};

// ============== Mock repositories ==============

struct MockUserRepository {
    users: RwLock<Vec<User>>,
}

impl MockUserRepository {
    fn new(users: Vec<User>) -> Self {
        Self {
            users: RwLock::new(users),
        }
    }

    fn remove(&self, user_id: &str) {
        self.users.write().unwrap().retain(|u| u.id != user_id);
    }
}

impl UserRepositoryTrait for MockUserRepository {
    fn create(&self, _: NewUser) -> Result<User> {
        unimplemented!()
    }

    fn find_by_id(&self, user_id: &str) -> Result<Option<User>> {
        Ok(self
            .users
            .read()
            .unwrap()
            .iter()
            .find(|u| u.id == user_id)
            .cloned())
    }

    fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        Ok(self
            .users
            .read()
            .unwrap()
            .iter()
            .find(|u| u.email == email.to_lowercase())
            .cloned())
    }

    fn touch_last_login(&self, _: &str) -> Result<()> {
        Ok(())
    }

    fn delete(&self, _: &str) -> Result<usize> {
        unimplemented!()
    }
}

struct MockQuoteRepository {
    quotes: RwLock<Vec<Quote>>,
    users: Arc<MockUserRepository>,
}

impl MockQuoteRepository {
    fn new(users: Arc<MockUserRepository>) -> Self {
        Self {
            quotes: RwLock::new(Vec::new()),
            users,
        }
    }

    fn stored_count(&self) -> usize {
        self.quotes.read().unwrap().len()
    }

    fn author_fields(&self, user_id: &str) -> (String, String, String, Option<String>) {
        let users = self.users.users.read().unwrap();
        let user = users
            .iter()
            .find(|u| u.id == user_id)
            .expect("quote owner must exist in the mock user set");
        (
            user.id.clone(),
            user.full_name.clone(),
            user.email.clone(),
            user.address.clone(),
        )
    }
}

impl QuoteRepositoryTrait for MockQuoteRepository {
    fn create(
        &self,
        new_quote: NewQuote,
        pricing: QuotePricing,
        owner_user_id: &str,
    ) -> Result<Quote> {
        let mut quotes = self.quotes.write().unwrap();
        let now = Utc::now() + Duration::milliseconds(quotes.len() as i64);
        let quote = Quote {
            id: Uuid::now_v7().to_string(),
            user_id: owner_user_id.to_string(),
            system_size_kw: new_quote.system_size_kw,
            monthly_consumption_kwh: new_quote.monthly_consumption_kwh,
            down_payment: new_quote.down_payment,
            currency: pricing.currency.clone(),
            system_price: pricing.system_price,
            principal_amount: pricing.principal_amount,
            risk_band: pricing.risk_band,
            base_apr: pricing.base_apr,
            offers: pricing.offers,
            created_at: now,
            updated_at: now,
        };
        quotes.push(quote.clone());
        Ok(quote)
    }

    fn find_by_id_for_owner(
        &self,
        quote_id: &str,
        owner_user_id: &str,
    ) -> Result<Option<QuoteWithAuthor>> {
        let quote = self
            .quotes
            .read()
            .unwrap()
            .iter()
            .find(|q| q.id == quote_id && q.user_id == owner_user_id)
            .cloned();
        Ok(quote.map(|q| {
            let (id, full_name, email, address) = self.author_fields(&q.user_id);
            QuoteWithAuthor::new(q, id, full_name, email, address)
        }))
    }

    fn search(
        &self,
        owner_filter: Option<&str>,
        page: i64,
        limit: i64,
    ) -> Result<(Vec<QuoteView>, i64)> {
        let mut matching: Vec<Quote> = self
            .quotes
            .read()
            .unwrap()
            .iter()
            .filter(|q| owner_filter.map_or(true, |owner| q.user_id == owner))
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        let total = matching.len() as i64;
        let offset = ((page - 1) * limit) as usize;
        let views = matching
            .into_iter()
            .skip(offset)
            .take(limit as usize)
            .map(|q| {
                let (_, full_name, email, address) = self.author_fields(&q.user_id);
                QuoteView::new(q, full_name, email, address)
            })
            .collect();
        Ok((views, total))
    }
}

// ============== Fixtures ==============

fn user(id: &str, role: &str) -> User {
    User {
        id: id.to_string(),
        full_name: format!("User {}", id),
        role_name: role.to_string(),
        email: format!("{}@example.com", id),
        address: Some("12 Sun St".to_string()),
        password_hash: "$argon2id$stub".to_string(),
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

fn service_with_users(users: Vec<User>) -> (QuoteService, Arc<MockQuoteRepository>, Arc<MockUserRepository>) {
    let user_repo = Arc::new(MockUserRepository::new(users));
    let quote_repo = Arc::new(MockQuoteRepository::new(user_repo.clone()));
    let service = QuoteService::new(quote_repo.clone(), user_repo.clone());
    (service, quote_repo, user_repo)
}

fn quote_request(system_size_kw: rust_decimal::Decimal) -> NewQuote {
    NewQuote {
        system_size_kw,
        monthly_consumption_kwh: dec!(500),
        down_payment: dec!(1000),
        currency: None,
    }
}

// ============== Tests ==============

#[tokio::test]
async fn test_create_quote_prices_and_denormalizes_author() {
    let (service, _, _) = service_with_users(vec![user("alice", ROLE_USER)]);

    let view = service
        .create_quote(quote_request(dec!(5)), "alice")
        .await
        .unwrap();

    assert_eq!(view.quote.user_id, "alice");
    assert_eq!(view.quote.system_price, dec!(6000));
    assert_eq!(view.quote.principal_amount, dec!(5000));
    assert_eq!(view.quote.base_apr, dec!(6.9));
    assert_eq!(view.quote.currency, "USD");
    assert_eq!(view.quote.offers.len(), 3);
    assert_eq!(view.full_name, "User alice");
    assert_eq!(view.email, "alice@example.com");
    assert_eq!(view.address.as_deref(), Some("12 Sun St"));
}

#[tokio::test]
async fn test_create_quote_rejects_invalid_input_before_pricing() {
    let (service, quote_repo, _) = service_with_users(vec![user("alice", ROLE_USER)]);

    let mut bad = quote_request(dec!(5));
    bad.down_payment = dec!(-1);
    let err = service.create_quote(bad, "alice").await.unwrap_err();

    assert!(matches!(err, Error::Quote(QuoteError::InvalidData(_))));
    assert_eq!(quote_repo.stored_count(), 0);
}

#[tokio::test]
async fn test_create_quote_fails_when_owner_vanishes_after_insert() {
    let (service, quote_repo, user_repo) = service_with_users(vec![user("alice", ROLE_USER)]);

    // Simulate the account-deletion race: the owner disappears after the
    // insert but before the profile read.
    user_repo.remove("alice");
    let err = service
        .create_quote(quote_request(dec!(5)), "alice")
        .await
        .unwrap_err();

    assert!(matches!(err, Error::User(UserError::NotFound(_))));
    // The row was already written; the create path does not roll it back.
    assert_eq!(quote_repo.stored_count(), 1);
}

#[tokio::test]
async fn test_get_quote_by_id_is_owner_scoped_even_for_admin() {
    let (service, _, _) =
        service_with_users(vec![user("alice", ROLE_USER), user("root", ROLE_ADMIN)]);

    let view = service
        .create_quote(quote_request(dec!(5)), "alice")
        .await
        .unwrap();
    let quote_id = view.quote.id.clone();

    assert!(service.get_quote_by_id(&quote_id, "alice").unwrap().is_some());
    // Ownership scoping applies regardless of role.
    assert!(service.get_quote_by_id(&quote_id, "root").unwrap().is_none());
    assert!(service.get_quote_by_id("missing", "alice").unwrap().is_none());
}

#[tokio::test]
async fn test_get_quote_by_id_includes_author_object() {
    let (service, _, _) = service_with_users(vec![user("alice", ROLE_USER)]);

    let view = service
        .create_quote(quote_request(dec!(5)), "alice")
        .await
        .unwrap();
    let found = service
        .get_quote_by_id(&view.quote.id, "alice")
        .unwrap()
        .unwrap();

    assert_eq!(found.author.id, "alice");
    assert_eq!(found.author.full_name, "User alice");
    assert_eq!(found.author.email, "alice@example.com");
    assert_eq!(found.view.quote.id, view.quote.id);
}

#[tokio::test]
async fn test_list_scopes_to_caller_unless_admin() {
    let (service, _, _) =
        service_with_users(vec![user("alice", ROLE_USER), user("bob", ROLE_USER), user("root", ROLE_ADMIN)]);

    service.create_quote(quote_request(dec!(5)), "alice").await.unwrap();
    service.create_quote(quote_request(dec!(6)), "bob").await.unwrap();
    service.create_quote(quote_request(dec!(7)), "bob").await.unwrap();

    let mine = service
        .get_all_quotes("alice", 1, 10, Some(ROLE_USER))
        .unwrap();
    assert_eq!(mine.total_count, 1);
    assert!(mine.quotes.iter().all(|v| v.quote.user_id == "alice"));

    // A missing role gets the restrictive default.
    let unscoped = service.get_all_quotes("bob", 1, 10, None).unwrap();
    assert_eq!(unscoped.total_count, 2);

    let everything = service
        .get_all_quotes("root", 1, 10, Some(ROLE_ADMIN))
        .unwrap();
    assert_eq!(everything.total_count, 3);
}

#[tokio::test]
async fn test_list_orders_newest_first_and_paginates() {
    let (service, _, _) = service_with_users(vec![user("alice", ROLE_USER)]);

    let first = service.create_quote(quote_request(dec!(1)), "alice").await.unwrap();
    let second = service.create_quote(quote_request(dec!(2)), "alice").await.unwrap();

    let page = service
        .get_all_quotes("alice", 1, 1, Some(ROLE_USER))
        .unwrap();
    assert_eq!(page.total_count, 2);
    assert_eq!(page.total_pages, 2);
    assert_eq!(page.current_page, 1);
    assert_eq!(page.quotes[0].quote.id, second.quote.id);

    let next = service
        .get_all_quotes("alice", 2, 1, Some(ROLE_USER))
        .unwrap();
    assert_eq!(next.quotes[0].quote.id, first.quote.id);

    let past_the_end = service
        .get_all_quotes("alice", 3, 1, Some(ROLE_USER))
        .unwrap();
    assert!(past_the_end.quotes.is_empty());
    assert_eq!(past_the_end.total_count, 2);
}

#[test]
fn test_list_empty_has_zero_pages() {
    let (service, _, _) = service_with_users(vec![user("alice", ROLE_USER)]);

    let page: QuotePage = service
        .get_all_quotes("alice", 1, 10, Some(ROLE_USER))
        .unwrap();
    assert_eq!(page.total_count, 0);
    assert_eq!(page.total_pages, 0);
    assert_eq!(page.current_page, 1);
}

#[test]
fn test_list_rejects_malformed_pagination() {
    let (service, _, _) = service_with_users(vec![user("alice", ROLE_USER)]);

    for (page, limit) in [(0, 10), (-1, 10), (1, 0), (1, 101), (1, -5)] {
        let err = service
            .get_all_quotes("alice", page, limit, Some(ROLE_USER))
            .unwrap_err();
        assert!(
            matches!(err, Error::Quote(QuoteError::InvalidData(_))),
            "expected page={page}, limit={limit} to be rejected"
        );
    }

    // Bounds themselves are accepted.
    assert!(service.get_all_quotes("alice", 1, 1, None).is_ok());
    assert!(service.get_all_quotes("alice", 1, 100, None).is_ok());
}
