use async_trait::async_trait;
use models::account::{self, Entity as AccountEntity};
use sea_orm::{ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, NotSet, QueryOrder, Set, Unchanged};

use crate::errors::ServiceError;

/// Persistence operations for accounts.
///
/// Injected into the HTTP layer so handlers never reach for a global
/// connection.
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Every stored account, ordered by id.
    async fn all(&self) -> Result<Vec<account::Model>, ServiceError>;
    async fn find(&self, id: i32) -> Result<Option<account::Model>, ServiceError>;
    /// Persist a new account; the store assigns the id (any id on `account` is ignored).
    async fn create(&self, account: account::Model) -> Result<account::Model, ServiceError>;
    /// Overwrite the stored row with the same id; `NotFound` if there is none.
    async fn update(&self, account: account::Model) -> Result<account::Model, ServiceError>;
    /// Returns whether a row was removed.
    async fn delete(&self, id: i32) -> Result<bool, ServiceError>;
}

/// SeaORM-backed repository implementation.
pub struct SeaOrmAccountRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmAccountRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

#[async_trait]
impl AccountRepository for SeaOrmAccountRepository {
    async fn all(&self) -> Result<Vec<account::Model>, ServiceError> {
        let rows = AccountEntity::find().order_by_asc(account::Column::Id).all(&self.db).await?;
        Ok(rows)
    }

    async fn find(&self, id: i32) -> Result<Option<account::Model>, ServiceError> {
        let found = AccountEntity::find_by_id(id).one(&self.db).await?;
        Ok(found)
    }

    async fn create(&self, account: account::Model) -> Result<account::Model, ServiceError> {
        let am = account::ActiveModel {
            id: NotSet,
            name: Set(account.name),
            email: Set(account.email),
            address: Set(account.address),
            phone_number: Set(account.phone_number),
            date_joined: Set(account.date_joined),
        };
        let created = am.insert(&self.db).await?;
        Ok(created)
    }

    async fn update(&self, account: account::Model) -> Result<account::Model, ServiceError> {
        let id = account.id;
        let am = account::ActiveModel {
            id: Unchanged(id),
            name: Set(account.name),
            email: Set(account.email),
            address: Set(account.address),
            phone_number: Set(account.phone_number),
            date_joined: Set(account.date_joined),
        };
        match am.update(&self.db).await {
            Ok(updated) => Ok(updated),
            Err(DbErr::RecordNotUpdated) => Err(ServiceError::not_found("account", id)),
            Err(e) => Err(e.into()),
        }
    }

    async fn delete(&self, id: i32) -> Result<bool, ServiceError> {
        let res = AccountEntity::delete_by_id(id).exec(&self.db).await?;
        Ok(res.rows_affected > 0)
    }
}

/// Simple in-memory repository for tests and benchmarks
pub mod mock {
    use super::*;
    use std::collections::BTreeMap;
    use tokio::sync::Mutex;

    #[derive(Default)]
    struct Rows {
        by_id: BTreeMap<i32, account::Model>,
        last_id: i32,
    }

    #[derive(Default)]
    pub struct MockAccountRepository {
        rows: Mutex<Rows>,
    }

    #[async_trait]
    impl AccountRepository for MockAccountRepository {
        async fn all(&self) -> Result<Vec<account::Model>, ServiceError> {
            let rows = self.rows.lock().await;
            Ok(rows.by_id.values().cloned().collect())
        }

        async fn find(&self, id: i32) -> Result<Option<account::Model>, ServiceError> {
            let rows = self.rows.lock().await;
            Ok(rows.by_id.get(&id).cloned())
        }

        async fn create(&self, mut account: account::Model) -> Result<account::Model, ServiceError> {
            let mut rows = self.rows.lock().await;
            rows.last_id += 1;
            account.id = rows.last_id;
            rows.by_id.insert(account.id, account.clone());
            Ok(account)
        }

        async fn update(&self, account: account::Model) -> Result<account::Model, ServiceError> {
            let mut rows = self.rows.lock().await;
            match rows.by_id.get_mut(&account.id) {
                Some(slot) => {
                    *slot = account.clone();
                    Ok(account)
                }
                None => Err(ServiceError::not_found("account", account.id)),
            }
        }

        async fn delete(&self, id: i32) -> Result<bool, ServiceError> {
            let mut rows = self.rows.lock().await;
            Ok(rows.by_id.remove(&id).is_some())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::get_db;
    use sea_orm::prelude::Date;

    fn jane() -> account::Model {
        account::Model {
            id: 0,
            name: "Jane".into(),
            email: "jane@example.com".into(),
            address: String::new(),
            phone_number: None,
            date_joined: Date::from_ymd_opt(2024, 5, 1),
        }
    }

    #[tokio::test]
    async fn seaorm_account_crud() -> Result<(), anyhow::Error> {
        let repo = SeaOrmAccountRepository::new(get_db().await?);

        assert!(repo.all().await?.is_empty());

        let a = repo.create(jane()).await?;
        assert!(a.id > 0);
        let b = repo.create(account::Model { name: "Bob".into(), ..jane() }).await?;
        assert_ne!(a.id, b.id);

        let found = repo.find(a.id).await?.unwrap();
        assert_eq!(found, a);
        assert_eq!(found.date_joined, Date::from_ymd_opt(2024, 5, 1));

        let updated = repo
            .update(account::Model { phone_number: Some("555-0100".into()), ..a.clone() })
            .await?;
        assert_eq!(updated.id, a.id);
        assert_eq!(repo.find(a.id).await?.unwrap().phone_number.as_deref(), Some("555-0100"));

        let all = repo.all().await?;
        assert_eq!(all.iter().map(|x| x.id).collect::<Vec<_>>(), vec![a.id, b.id]);

        assert!(repo.delete(a.id).await?);
        assert!(!repo.delete(a.id).await?);
        assert!(repo.find(a.id).await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn seaorm_update_missing_is_not_found() -> Result<(), anyhow::Error> {
        let repo = SeaOrmAccountRepository::new(get_db().await?);
        let err = repo.update(account::Model { id: 4242, ..jane() }).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
        Ok(())
    }

    #[tokio::test]
    async fn seaorm_find_missing_is_none() -> Result<(), anyhow::Error> {
        let repo = SeaOrmAccountRepository::new(get_db().await?);
        assert!(repo.find(1).await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn mock_assigns_increasing_ids() -> Result<(), anyhow::Error> {
        let repo = mock::MockAccountRepository::default();
        let a = repo.create(jane()).await?;
        let b = repo.create(jane()).await?;
        assert_eq!((a.id, b.id), (1, 2));
        assert!(repo.delete(a.id).await?);
        let c = repo.create(jane()).await?;
        assert_eq!(c.id, 3);
        assert!(matches!(
            repo.update(account::Model { id: 99, ..jane() }).await,
            Err(ServiceError::NotFound(_))
        ));
        Ok(())
    }
}
