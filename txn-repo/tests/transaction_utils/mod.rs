use chrono::NaiveDate;
use fake::faker::address::en::CityName;
use fake::{Fake, Faker};
use rand::seq::SliceRandom;
use rand::Rng;
use rust_decimal::Decimal;
use txn_repo::transaction_repo::Transaction;
use uuid::Uuid;

pub trait Generator<T> {
    fn gen(&mut self) -> T;
}

pub struct Predefined<T> {
    values: Vec<T>,
    current_pos: usize,
}

impl<T> Predefined<T> {
    pub fn boxed(values: Vec<T>) -> Box<Predefined<T>> {
        Box::new(Predefined {
            values,
            current_pos: 0,
        })
    }
}

impl<T: Clone> Generator<T> for Predefined<T> {
    fn gen(&mut self) -> T {
        let v = self.values[self.current_pos].clone();
        self.current_pos += 1;
        v
    }
}

pub struct RandomSample<T> {
    values: Vec<T>,
}

impl<T> RandomSample<T> {
    pub fn boxed(values: Vec<T>) -> Box<RandomSample<T>> {
        Box::new(RandomSample { values })
    }
}

impl<T: Clone> Generator<T> for RandomSample<T> {
    fn gen(&mut self) -> T {
        self.values.choose(&mut rand::thread_rng()).unwrap().clone()
    }
}

pub struct FakeGenerator<F: Fake> {
    fake: F,
}

impl<F: Fake> FakeGenerator<F> {
    pub fn boxed(fake: F) -> Box<FakeGenerator<F>> {
        Box::new(FakeGenerator { fake })
    }
}

impl<T: fake::Dummy<F>, F> Generator<T> for FakeGenerator<F> {
    fn gen(&mut self) -> T {
        self.fake.fake()
    }
}

pub struct FakeId;

impl Generator<String> for FakeId {
    fn gen(&mut self) -> String {
        Uuid::new_v4().simple().to_string()
    }
}

pub struct FakeDate;

impl Generator<NaiveDate> for FakeDate {
    fn gen(&mut self) -> NaiveDate {
        let mut rng = rand::thread_rng();
        NaiveDate::from_yo_opt(rng.gen_range(2000..2030), rng.gen_range(1..=365)).unwrap()
    }
}

pub struct FakeAmount;

impl Generator<Decimal> for FakeAmount {
    fn gen(&mut self) -> Decimal {
        Decimal::new(Faker.fake::<i32>() as i64, 2)
    }
}

#[allow(dead_code)]
pub struct TransactionGenerator {
    date_gen: Box<dyn Generator<NaiveDate>>,
    id_gen: Box<dyn Generator<String>>,
    item_gen: Box<dyn Generator<String>>,
    amnt_gen: Box<dyn Generator<Decimal>>,
    loc_gen: Box<dyn Generator<String>>,
}

#[allow(dead_code)]
impl TransactionGenerator {
    pub fn with_dates(mut self, dates: Vec<NaiveDate>) -> TransactionGenerator {
        self.date_gen = Predefined::boxed(dates);
        self
    }

    pub fn with_ids(mut self, ids: Vec<&str>) -> TransactionGenerator {
        let ids = ids.into_iter().map(|s| s.to_string()).collect();
        self.id_gen = Predefined::boxed(ids);
        self
    }

    pub fn with_amounts(mut self, amounts: Vec<Decimal>) -> TransactionGenerator {
        self.amnt_gen = Predefined::boxed(amounts);
        self
    }

    pub fn generate(&mut self) -> Transaction {
        Transaction::new(
            self.date_gen.gen(),
            self.id_gen.gen(),
            self.item_gen.gen(),
            self.amnt_gen.gen(),
            self.loc_gen.gen(),
        )
    }

    pub fn generate_many(&mut self, count: usize) -> Vec<Transaction> {
        let mut vec = Vec::with_capacity(count);
        for _ in 0..count {
            vec.push(self.generate())
        }
        vec
    }
}

impl Default for TransactionGenerator {
    fn default() -> Self {
        TransactionGenerator {
            date_gen: Box::new(FakeDate),
            id_gen: Box::new(FakeId),
            item_gen: RandomSample::boxed(vec![
                "Laptop".to_string(),
                "Groceries".to_string(),
                "Bus fare".to_string(),
                "Coffee".to_string(),
            ]),
            amnt_gen: Box::new(FakeAmount),
            loc_gen: FakeGenerator::boxed(CityName()),
        }
    }
}

#[allow(dead_code)]
pub fn generate_transaction() -> Transaction {
    TransactionGenerator::default().generate()
}

#[allow(dead_code)]
pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}
