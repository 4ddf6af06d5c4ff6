//! Create `account` table.
//!
//! Optional contact fields are nullable; `email` and `address` are stored
//! as empty strings when not supplied.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Account::Table)
                    .if_not_exists()
                    .col(pk_auto(Account::Id))
                    .col(string_len(Account::Name, 64))
                    .col(string_len(Account::Email, 64))
                    .col(string_len(Account::Address, 256))
                    .col(string_len_null(Account::PhoneNumber, 32))
                    .col(date_null(Account::DateJoined))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Account::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Account { Table, Id, Name, Email, Address, PhoneNumber, DateJoined }
