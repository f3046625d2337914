//! Business logic services

pub mod books;
pub mod catalog;
pub mod loans;
pub mod users;

use std::sync::Arc;

use crate::{error::AppResult, repository::RecordStore};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub books: books::BooksService,
    pub users: users::UsersService,
    pub loans: loans::LoansService,
    store: Arc<dyn RecordStore>,
}

impl Services {
    /// Wire every service to the same record store
    pub fn new(store: Arc<dyn RecordStore>, catalog: Arc<dyn catalog::CatalogLookup>) -> Self {
        Self {
            books: books::BooksService::new(store.clone(), catalog),
            users: users::UsersService::new(store.clone()),
            loans: loans::LoansService::new(store.clone()),
            store,
        }
    }

    /// Check that the record store answers
    pub async fn ping(&self) -> AppResult<()> {
        self.store.ping().await
    }
}
