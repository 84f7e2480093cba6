//! Synthetic transactions for demos and load testing. Nothing generated here is stored.

use anyhow::anyhow;
use chrono::{Datelike, Local, NaiveDate};
use rand::seq::SliceRandom;
use rand::Rng;
use rust_decimal::Decimal;
use serde::Deserialize;
use txn_repo::transaction_repo::Transaction;

const ID_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
const ID_LENGTH: usize = 10;

// in cents
const MIN_AMOUNT: i64 = 10_00;
const MAX_AMOUNT: i64 = 1000_00;

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct TransactionGenerator {
    pub items: Vec<String>,
    pub locations: Vec<String>,
}

impl Default for TransactionGenerator {
    fn default() -> Self {
        TransactionGenerator {
            items: ["Laptop", "Smartphone", "Headphones", "Keyboard", "Monitor"]
                .map(String::from)
                .to_vec(),
            locations: [
                "New York",
                "San Francisco",
                "Los Angeles",
                "Chicago",
                "Houston",
            ]
            .map(String::from)
            .to_vec(),
        }
    }
}

impl TransactionGenerator {
    /// Generates `count` transactions dated this year, up to and including today.
    ///
    /// Ids are drawn independently and may collide with each other or with stored transactions.
    pub fn generate(&self, count: usize) -> Vec<Transaction> {
        let today = Local::now().date_naive();
        self.generate_with(&mut rand::thread_rng(), today, count)
    }

    /// Both sets must be non-empty for every generated field to come from them.
    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.items.is_empty() {
            return Err(anyhow!("Generator items must not be empty"));
        }
        if self.locations.is_empty() {
            return Err(anyhow!("Generator locations must not be empty"));
        }
        Ok(())
    }

    pub fn generate_with<R: Rng>(
        &self,
        rng: &mut R,
        today: NaiveDate,
        count: usize,
    ) -> Vec<Transaction> {
        (0..count).map(|_| self.generate_one(rng, today)).collect()
    }

    fn generate_one<R: Rng>(&self, rng: &mut R, today: NaiveDate) -> Transaction {
        let transaction_id: String = (0..ID_LENGTH)
            .map(|_| ID_CHARSET[rng.gen_range(0..ID_CHARSET.len())] as char)
            .collect();
        let item = self.items.choose(rng).cloned().unwrap_or_default();
        let location = self.locations.choose(rng).cloned().unwrap_or_default();
        let amount = Decimal::new(rng.gen_range(MIN_AMOUNT..=MAX_AMOUNT), 2);
        let date = today
            .with_ordinal(rng.gen_range(1..=today.ordinal()))
            .unwrap_or(today);

        Transaction::new(date, transaction_id, item, amount, location)
    }
}
