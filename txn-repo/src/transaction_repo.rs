use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageOptions {
    pub offset: i64,
    pub limit: i64,
}

impl PageOptions {
    pub(crate) fn validate(&self) -> Result<(), TransactionRepoError> {
        if self.offset < 0 {
            return Err(TransactionRepoError::InvalidArgument(
                "offset must not be negative",
            ));
        }
        if self.limit < 0 {
            return Err(TransactionRepoError::InvalidArgument(
                "limit must not be negative",
            ));
        }
        Ok(())
    }
}

/// Storage for transaction records.
///
/// Listing operations return transactions ordered by date, ties broken by
/// transaction id. Transaction ids are not required to be unique.
#[async_trait]
pub trait TransactionRepo: Sync + Send {
    async fn count_transactions(&self) -> Result<i64, TransactionRepoError>;

    /// Returns every transaction, or a single page of them when `page_options` is given.
    async fn get_all_transactions(
        &self,
        page_options: Option<PageOptions>,
    ) -> Result<Vec<Transaction>, TransactionRepoError>;

    /// Returns the first transaction with the given id, if there is one.
    async fn get_transaction(
        &self,
        transaction_id: &str,
    ) -> Result<Option<Transaction>, TransactionRepoError>;

    /// Returns transactions dated between `from` and `until`, both inclusive.
    async fn get_transactions_in_range(
        &self,
        from: Option<NaiveDate>,
        until: Option<NaiveDate>,
    ) -> Result<Vec<Transaction>, TransactionRepoError>;

    async fn create_new_transaction(
        &self,
        new_transaction: Transaction,
    ) -> Result<Transaction, TransactionRepoError>;

    /// Inserts a batch of transactions. Either every transaction is stored or none are.
    async fn create_new_transactions(
        &self,
        new_transactions: Vec<Transaction>,
    ) -> Result<u64, TransactionRepoError>;

    async fn delete_all_transactions(&self) -> Result<u64, TransactionRepoError>;
}

#[derive(Error, Debug)]
pub enum TransactionRepoError {
    #[error("{0}")]
    InvalidArgument(&'static str),
    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

pub(crate) fn require_range(
    from: Option<NaiveDate>,
    until: Option<NaiveDate>,
) -> Result<(NaiveDate, NaiveDate), TransactionRepoError> {
    match (from, until) {
        (Some(from), Some(until)) => Ok((from, until)),
        _ => Err(TransactionRepoError::InvalidArgument(
            "Both start_date and end_date are required",
        )),
    }
}

#[derive(Serialize, Deserialize, Clone, PartialEq, Eq, Debug)]
pub struct Transaction {
    pub date: NaiveDate,
    pub transaction_id: String,
    pub item: String,
    pub amount: Decimal,
    pub location: String,
}

impl Transaction {
    pub fn new(
        date: NaiveDate,
        transaction_id: String,
        item: String,
        amount: Decimal,
        location: String,
    ) -> Transaction {
        Transaction {
            date,
            transaction_id,
            item,
            amount,
            location,
        }
    }

    /// Compares by date, then by transaction id.
    pub fn listing_order(&self, other: &Self) -> Ordering {
        self.date
            .cmp(&other.date)
            .then_with(|| self.transaction_id.cmp(&other.transaction_id))
    }
}
