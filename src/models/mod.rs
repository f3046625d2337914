//! Data models for Biblioteca

pub mod book;
pub mod catalog_entry;
pub mod loan;
pub mod user;

// Re-export commonly used types
pub use book::{Book, CreateBook, UpdateBook};
pub use catalog_entry::CatalogEntry;
pub use loan::{CreateLoan, Loan, LoanDetails, LoanStatus, NewLoan};
pub use user::{CreateUser, UpdateUser, User};
