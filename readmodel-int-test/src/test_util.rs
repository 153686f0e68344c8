use chrono::{DateTime, Utc};
use fake::faker::address::en::CityName;
use fake::faker::chrono::en::DateTime as FakeDateTime;
use fake::faker::company::en::CompanyName;
use fake::faker::internet::en::FreeEmail;
use fake::faker::name::en::Name;
use fake::Fake;
use rand::{random, rng, Rng};
use readmodel::collection::{
    Document, DocumentCollection, DocumentCollectionProvider, UpdateOptions, WriteResult,
};
use readmodel::errors::{ErrorKind, ReadModelError, ReadModelResult};
use readmodel::filter::Filter;
use readmodel::repository::RepositoryFactory;
use readmodel::store::memory::{InMemoryStore, InMemoryStoreConfig};
use readmodel::store::DocumentStore;
use readmodel_derive::Identifiable;
use serde::{Deserialize, Serialize};
use std::backtrace::Backtrace;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Instant;
use uuid::Uuid;

/// Runs a test between a setup and a teardown step.
///
/// The teardown runs even when the test fails; panics are caught so the
/// failure report carries the phase that failed.
pub fn run_test<T, B, A>(before: B, test: T, after: A)
where
    T: Fn(TestContext) -> ReadModelResult<()> + std::panic::UnwindSafe + std::panic::RefUnwindSafe,
    B: Fn() -> ReadModelResult<TestContext> + std::panic::UnwindSafe + std::panic::RefUnwindSafe,
    A: Fn(TestContext) -> ReadModelResult<()> + std::panic::UnwindSafe + std::panic::RefUnwindSafe,
{
    let start_time = Instant::now();
    let result = std::panic::catch_unwind(|| {
        let backtrace = Backtrace::capture();
        match before() {
            Ok(ctx) => match test(ctx.clone()) {
                Ok(_) => after(ctx)
                    .map_err(|e| (format!("After run failed: {:?}", e), backtrace.to_string())),
                Err(e) => {
                    let _ = after(ctx);
                    Err((format!("Test failed: {:?}", e), backtrace.to_string()))
                }
            },
            Err(e) => Err((format!("Before run failed: {:?}", e), backtrace.to_string())),
        }
    });

    let error = match result {
        Ok(Ok(_)) => return,
        Ok(Err((e, bt))) => {
            if !bt.is_empty() && !bt.contains("disabled") {
                eprintln!("\nBacktrace:\n{}", bt);
            }
            e
        }
        Err(panic_err) => {
            if let Some(s) = panic_err.downcast_ref::<&str>() {
                format!("Panic: {}", s)
            } else if let Some(s) = panic_err.downcast_ref::<String>() {
                format!("Panic: {}", s)
            } else {
                "Panic: unknown payload".to_string()
            }
        }
    };

    panic!(
        "Test failed after {:?}. Error: {}",
        start_time.elapsed(),
        error
    );
}

#[derive(Clone)]
pub struct TestContext {
    name: String,
    store: DocumentStore,
}

impl TestContext {
    pub fn new(name: String, store: DocumentStore) -> Self {
        Self { name, store }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn store(&self) -> DocumentStore {
        self.store.clone()
    }

    pub fn factory(&self) -> RepositoryFactory {
        RepositoryFactory::new(self.store.clone())
    }
}

pub fn random_name() -> String {
    format!("store-{}", Uuid::new_v4())
}

pub fn create_test_context() -> ReadModelResult<TestContext> {
    let name = random_name();
    let store = DocumentStore::new(InMemoryStore::new(
        InMemoryStoreConfig::new().with_name(&name),
    ));
    Ok(TestContext::new(name, store))
}

pub fn cleanup(ctx: TestContext) -> ReadModelResult<()> {
    if !ctx.store().is_closed() {
        for name in ctx.store().collection_names()? {
            ctx.store().drop_collection(&name)?;
        }
    }
    ctx.store().close()
}

/// Call counters shared between a [RecordingCollection] and the test.
#[derive(Clone, Default)]
pub struct CallCounter {
    updates: Arc<AtomicUsize>,
    finds: Arc<AtomicUsize>,
    removes: Arc<AtomicUsize>,
}

impl CallCounter {
    pub fn updates(&self) -> usize {
        self.updates.load(Ordering::SeqCst)
    }

    pub fn finds(&self) -> usize {
        self.finds.load(Ordering::SeqCst)
    }

    pub fn removes(&self) -> usize {
        self.removes.load(Ordering::SeqCst)
    }

    pub fn total(&self) -> usize {
        self.updates() + self.finds() + self.removes()
    }
}

/// A collection that counts the calls it forwards to another collection.
pub struct RecordingCollection {
    target: DocumentCollection,
    counter: CallCounter,
}

impl RecordingCollection {
    pub fn wrap(target: DocumentCollection) -> (DocumentCollection, CallCounter) {
        let counter = CallCounter::default();
        let collection = DocumentCollection::new(RecordingCollection {
            target,
            counter: counter.clone(),
        });
        (collection, counter)
    }
}

impl DocumentCollectionProvider for RecordingCollection {
    fn name(&self) -> String {
        self.target.name()
    }

    fn update_with_options(
        &self,
        filter: Filter,
        update: &Document,
        update_options: &UpdateOptions,
    ) -> ReadModelResult<WriteResult> {
        self.counter.updates.fetch_add(1, Ordering::SeqCst);
        self.target.update_with_options(filter, update, update_options)
    }

    fn find_one(&self, filter: Filter) -> ReadModelResult<Option<Document>> {
        self.counter.finds.fetch_add(1, Ordering::SeqCst);
        self.target.find_one(filter)
    }

    fn find(&self, filter: Filter) -> ReadModelResult<Vec<Document>> {
        self.counter.finds.fetch_add(1, Ordering::SeqCst);
        self.target.find(filter)
    }

    fn remove(&self, filter: Filter, just_once: bool) -> ReadModelResult<WriteResult> {
        self.counter.removes.fetch_add(1, Ordering::SeqCst);
        self.target.remove(filter, just_once)
    }

    fn size(&self) -> ReadModelResult<u64> {
        self.target.size()
    }
}

/// A collection whose every operation fails with the same error.
pub struct FailingCollection {
    kind: ErrorKind,
    message: String,
}

impl FailingCollection {
    pub fn new(kind: ErrorKind, message: &str) -> DocumentCollection {
        DocumentCollection::new(FailingCollection {
            kind,
            message: message.to_string(),
        })
    }

    fn fail<R>(&self) -> ReadModelResult<R> {
        Err(ReadModelError::new(&self.message, self.kind.clone()))
    }
}

impl DocumentCollectionProvider for FailingCollection {
    fn name(&self) -> String {
        "failing".to_string()
    }

    fn update_with_options(
        &self,
        _filter: Filter,
        _update: &Document,
        _update_options: &UpdateOptions,
    ) -> ReadModelResult<WriteResult> {
        self.fail()
    }

    fn find_one(&self, _filter: Filter) -> ReadModelResult<Option<Document>> {
        self.fail()
    }

    fn find(&self, _filter: Filter) -> ReadModelResult<Vec<Document>> {
        self.fail()
    }

    fn remove(&self, _filter: Filter, _just_once: bool) -> ReadModelResult<WriteResult> {
        self.fail()
    }

    fn size(&self) -> ReadModelResult<u64> {
        self.fail()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Identifiable)]
pub struct OrderView {
    pub id: String,
    pub customer: String,
    pub status: String,
    pub total: i64,
    pub lines: Vec<OrderLine>,
    pub placed_at: DateTime<Utc>,
    pub note: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLine {
    pub sku: String,
    pub quantity: u32,
    pub price: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Identifiable)]
#[read_model(class = "CustomerSummary", id = "customer_no")]
pub struct Customer {
    pub customer_no: u64,
    pub name: String,
    pub email: String,
    pub city: String,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Identifiable)]
#[read_model(class = "Invoice")]
pub struct Invoice {
    pub id: String,
    pub order_id: String,
    pub amount: f64,
}

pub fn generate_order_line() -> OrderLine {
    OrderLine {
        sku: format!("SKU-{:05}", rng().random_range(0..100_000)),
        quantity: rng().random_range(1..10),
        price: (rng().random_range(100..100_000) as f64) / 100.0,
    }
}

pub fn generate_order(status: &str) -> OrderView {
    let line_count = rng().random_range(1..4);
    OrderView {
        id: Uuid::new_v4().to_string(),
        customer: Name().fake(),
        status: status.to_string(),
        total: rng().random_range(0..1_000_000),
        lines: (0..line_count).map(|_| generate_order_line()).collect(),
        placed_at: FakeDateTime().fake(),
        note: if random::<bool>() {
            Some(CompanyName().fake())
        } else {
            None
        },
    }
}

pub fn generate_orders(count: usize, status: &str) -> Vec<OrderView> {
    (0..count).map(|_| generate_order(status)).collect()
}

pub fn generate_customer(customer_no: u64) -> Customer {
    Customer {
        customer_no,
        name: Name().fake(),
        email: FreeEmail().fake(),
        city: CityName().fake(),
        active: random::<bool>(),
    }
}
