//! Service layer for the account resource.
//! - `account::repository` abstracts persistence behind an injectable trait.
//! - `account::service` holds the create/update rules on top of it.

pub mod errors;
pub mod account;
#[cfg(test)]
pub mod test_support;
