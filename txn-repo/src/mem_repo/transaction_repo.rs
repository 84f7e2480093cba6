use crate::transaction_repo::{
    require_range, PageOptions, Transaction, TransactionRepo, TransactionRepoError,
};
use anyhow::anyhow;
use async_trait::async_trait;
use chrono::NaiveDate;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::instrument;

struct State {
    // insertion order
    transactions: Vec<Transaction>,
}

pub struct MemTransactionRepo {
    state: RwLock<State>,
}

impl MemTransactionRepo {
    pub fn new() -> MemTransactionRepo {
        let state = State {
            transactions: Vec::new(),
        };
        MemTransactionRepo {
            state: RwLock::new(state),
        }
    }

    fn read_lock(&self) -> Result<RwLockReadGuard<State>, anyhow::Error> {
        self.state
            .read()
            .map_err(|_| anyhow!("Unable to acquire lock"))
    }

    fn write_lock(&self) -> Result<RwLockWriteGuard<State>, anyhow::Error> {
        self.state
            .write()
            .map_err(|_| anyhow!("Unable to acquire lock"))
    }

    fn sorted_transactions(&self) -> Result<Vec<Transaction>, TransactionRepoError> {
        let read_guard = self.read_lock()?;
        let mut transactions = read_guard.transactions.clone();
        // stable, so equal date and id keep insertion order
        transactions.sort_by(Transaction::listing_order);
        Ok(transactions)
    }
}

impl Default for MemTransactionRepo {
    fn default() -> Self {
        MemTransactionRepo::new()
    }
}

#[async_trait]
impl TransactionRepo for MemTransactionRepo {
    async fn count_transactions(&self) -> Result<i64, TransactionRepoError> {
        let read_guard = self.read_lock()?;
        Ok(read_guard.transactions.len() as i64)
    }

    #[instrument(skip(self))]
    async fn get_all_transactions(
        &self,
        page_options: Option<PageOptions>,
    ) -> Result<Vec<Transaction>, TransactionRepoError> {
        if let Some(page_options) = &page_options {
            page_options.validate()?;
        }

        let transactions = self.sorted_transactions()?;
        let Some(page_options) = page_options else {
            return Ok(transactions);
        };

        let offset = usize::try_from(page_options.offset).unwrap_or(usize::MAX);
        let limit = usize::try_from(page_options.limit).unwrap_or(usize::MAX);
        Ok(transactions.into_iter().skip(offset).take(limit).collect())
    }

    #[instrument(skip(self))]
    async fn get_transaction(
        &self,
        transaction_id: &str,
    ) -> Result<Option<Transaction>, TransactionRepoError> {
        let transaction = self
            .sorted_transactions()?
            .into_iter()
            .find(|t| t.transaction_id == transaction_id);
        Ok(transaction)
    }

    #[instrument(skip(self))]
    async fn get_transactions_in_range(
        &self,
        from: Option<NaiveDate>,
        until: Option<NaiveDate>,
    ) -> Result<Vec<Transaction>, TransactionRepoError> {
        let (from, until) = require_range(from, until)?;

        let transactions = self
            .sorted_transactions()?
            .into_iter()
            .filter(|t| t.date >= from && t.date <= until)
            .collect();
        Ok(transactions)
    }

    async fn create_new_transaction(
        &self,
        new_transaction: Transaction,
    ) -> Result<Transaction, TransactionRepoError> {
        let mut write_guard = self.write_lock()?;
        write_guard.transactions.push(new_transaction.clone());
        Ok(new_transaction)
    }

    #[instrument(skip(self, new_transactions), fields(count = new_transactions.len()))]
    async fn create_new_transactions(
        &self,
        new_transactions: Vec<Transaction>,
    ) -> Result<u64, TransactionRepoError> {
        let mut write_guard = self.write_lock()?;
        let count = new_transactions.len() as u64;
        write_guard.transactions.extend(new_transactions);
        Ok(count)
    }

    #[instrument(skip(self))]
    async fn delete_all_transactions(&self) -> Result<u64, TransactionRepoError> {
        let mut write_guard = self.write_lock()?;
        let count = write_guard.transactions.len() as u64;
        write_guard.transactions.clear();
        Ok(count)
    }
}
