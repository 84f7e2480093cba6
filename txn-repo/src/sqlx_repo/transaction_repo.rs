use crate::transaction_repo::{
    require_range, PageOptions, Transaction, TransactionRepo, TransactionRepoError,
};
use anyhow::Context;
use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::{query, query_as, query_scalar, Executor, Pool, Postgres, QueryBuilder};
use tracing::instrument;

const SELECT_TRANSACTIONS: &str =
    "SELECT date, transaction_id, item, amount, location FROM transactions";
const LISTING_ORDER: &str = " ORDER BY date, transaction_id";

#[derive(sqlx::FromRow)]
struct TransactionEntry {
    date: NaiveDate,
    transaction_id: String,
    item: String,
    amount: Decimal,
    location: String,
}

impl From<TransactionEntry> for Transaction {
    fn from(value: TransactionEntry) -> Self {
        Transaction::new(
            value.date,
            value.transaction_id,
            value.item,
            value.amount,
            value.location,
        )
    }
}

pub struct SQLxTransactionRepo {
    pool: Pool<Postgres>,
}

impl SQLxTransactionRepo {
    pub fn new(pool: Pool<Postgres>) -> SQLxTransactionRepo {
        SQLxTransactionRepo { pool }
    }

    #[instrument(
        skip(db_executor, new_transaction),
        fields(transaction_id = %new_transaction.transaction_id)
    )]
    async fn insert_transaction_entry<'e, E>(
        db_executor: E,
        new_transaction: &Transaction,
    ) -> Result<(), TransactionRepoError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        query(
            "INSERT INTO transactions(date, transaction_id, item, amount, location) VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(new_transaction.date)
        .bind(&new_transaction.transaction_id)
        .bind(&new_transaction.item)
        .bind(new_transaction.amount)
        .bind(&new_transaction.location)
        .execute(db_executor)
        .await
        .with_context(|| {
            format!(
                "Unable to insert transaction {}",
                new_transaction.transaction_id
            )
        })?;
        Ok(())
    }
}

#[async_trait]
impl TransactionRepo for SQLxTransactionRepo {
    #[instrument(skip(self))]
    async fn count_transactions(&self) -> Result<i64, TransactionRepoError> {
        let count: i64 = query_scalar::<_, i64>("SELECT COUNT(*) FROM transactions")
            .fetch_one(&self.pool)
            .await
            .context("Unable to count transactions")?;
        Ok(count)
    }

    #[instrument(skip(self))]
    async fn get_all_transactions(
        &self,
        page_options: Option<PageOptions>,
    ) -> Result<Vec<Transaction>, TransactionRepoError> {
        let mut query_builder = QueryBuilder::<Postgres>::new(SELECT_TRANSACTIONS);
        query_builder.push(LISTING_ORDER);
        if let Some(po) = page_options {
            po.validate()?;
            query_builder
                .push(" OFFSET ")
                .push_bind(po.offset)
                .push(" LIMIT ")
                .push_bind(po.limit);
        }

        let transaction_entries: Vec<TransactionEntry> = query_builder
            .build_query_as::<TransactionEntry>()
            .fetch_all(&self.pool)
            .await
            .context("Unable to get transactions")?;

        Ok(transaction_entries.into_iter().map(|t| t.into()).collect())
    }

    #[instrument(skip(self))]
    async fn get_transaction(
        &self,
        transaction_id: &str,
    ) -> Result<Option<Transaction>, TransactionRepoError> {
        let sql = format!(
            "{} WHERE transaction_id = $1{} LIMIT 1",
            SELECT_TRANSACTIONS, LISTING_ORDER
        );
        let transaction_entry: Option<TransactionEntry> = query_as::<_, TransactionEntry>(&sql)
            .bind(transaction_id)
            .fetch_optional(&self.pool)
            .await
            .with_context(|| format!("Unable to get transaction {}", transaction_id))?;
        Ok(transaction_entry.map(|t| t.into()))
    }

    #[instrument(skip(self))]
    async fn get_transactions_in_range(
        &self,
        from: Option<NaiveDate>,
        until: Option<NaiveDate>,
    ) -> Result<Vec<Transaction>, TransactionRepoError> {
        let (from, until) = require_range(from, until)?;

        let sql = format!(
            "{} WHERE date BETWEEN $1 AND $2{}",
            SELECT_TRANSACTIONS, LISTING_ORDER
        );
        let transaction_entries: Vec<TransactionEntry> = query_as::<_, TransactionEntry>(&sql)
            .bind(from)
            .bind(until)
            .fetch_all(&self.pool)
            .await
            .with_context(|| format!("Unable to get transactions from {} to {}", from, until))?;

        Ok(transaction_entries.into_iter().map(|t| t.into()).collect())
    }

    #[instrument(skip(self, new_transaction))]
    async fn create_new_transaction(
        &self,
        new_transaction: Transaction,
    ) -> Result<Transaction, TransactionRepoError> {
        Self::insert_transaction_entry(&self.pool, &new_transaction).await?;
        Ok(new_transaction)
    }

    #[instrument(skip(self, new_transactions), fields(count = new_transactions.len()))]
    async fn create_new_transactions(
        &self,
        new_transactions: Vec<Transaction>,
    ) -> Result<u64, TransactionRepoError> {
        let mut db_transaction = self
            .pool
            .begin()
            .await
            .context("Unable to start database transaction")?;

        for new_transaction in &new_transactions {
            // dropping db_transaction on error rolls back the whole batch
            Self::insert_transaction_entry(&mut *db_transaction, new_transaction).await?;
        }

        db_transaction
            .commit()
            .await
            .context("Unable to commit inserted transactions")?;
        Ok(new_transactions.len() as u64)
    }

    #[instrument(skip(self))]
    async fn delete_all_transactions(&self) -> Result<u64, TransactionRepoError> {
        let result = query("DELETE FROM transactions")
            .execute(&self.pool)
            .await
            .context("Unable to delete transactions")?;
        Ok(result.rows_affected())
    }
}
