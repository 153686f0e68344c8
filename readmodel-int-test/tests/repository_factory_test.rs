use readmodel::errors::{ErrorKind, ReadModelResult};
use readmodel::repository::{Identifiable, RepositoryConfig, RepositoryFactory};
use readmodel::serializer::{SerdeSerializer, SerializedEnvelope, Serializer};
use readmodel_int_test::test_util::{
    cleanup, create_test_context, generate_order, run_test, Invoice, OrderView,
};

#[ctor::ctor]
fn init() {
    colog::init();
}

/// Stores invoices with the amount in cents.
struct CentsSerializer;

impl Serializer<Invoice> for CentsSerializer {
    fn serialize(&self, object: &Invoice) -> ReadModelResult<SerializedEnvelope> {
        let mut payload = SerdeSerializer::<Invoice>::new()
            .serialize(object)?
            .into_payload();
        let cents = (object.amount * 100.0).round() as i64;
        payload.insert("amount".to_string(), cents.into());
        Ok(SerializedEnvelope::new(object.id(), Invoice::model_class(), payload))
    }

    fn deserialize(&self, envelope: SerializedEnvelope) -> ReadModelResult<Invoice> {
        let mut invoice = SerdeSerializer::<Invoice>::new().deserialize(envelope)?;
        invoice.amount /= 100.0;
        Ok(invoice)
    }
}

fn invoice(id: &str, amount: f64) -> Invoice {
    Invoice {
        id: id.to_string(),
        order_id: "o-1".to_string(),
        amount,
    }
}

#[test]
fn test_repositories_share_collection_by_name() {
    run_test(
        create_test_context,
        |ctx| {
            let first = ctx.factory().create::<OrderView>("orders")?;
            let second = ctx.factory().create::<OrderView>("orders")?;
            let order = generate_order("open");
            first.save(&order)?;

            assert_eq!(second.find(&order.id)?, Some(order));
            assert_eq!(ctx.store().collection_names()?, vec!["orders"]);
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_repositories_of_different_collections_are_isolated() {
    run_test(
        create_test_context,
        |ctx| {
            let open = ctx.factory().create::<OrderView>("open_orders")?;
            let archived = ctx.factory().create::<OrderView>("archived_orders")?;
            let order = generate_order("open");
            open.save(&order)?;

            assert_eq!(archived.find(&order.id)?, None);
            assert_eq!(
                ctx.store().collection_names()?,
                vec!["archived_orders", "open_orders"]
            );
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_create_with_serializer() {
    run_test(
        create_test_context,
        |ctx| {
            let repository = ctx
                .factory()
                .create_with_serializer::<Invoice, _>("invoices", CentsSerializer)?;
            repository.save(&invoice("inv-1", 12.5))?;

            let stored = repository
                .collection()
                .find_one(readmodel::filter::field("_id").eq("inv-1"))?
                .unwrap();
            assert_eq!(
                stored.get("amount").and_then(|value| value.as_i128()),
                Some(1250)
            );
            assert_eq!(repository.find(&"inv-1")?, Some(invoice("inv-1", 12.5)));
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_create_with_config() {
    run_test(
        create_test_context,
        |ctx| {
            let config = RepositoryConfig::new("Invoice").with_store_id_field("invoice_key")?;
            let repository = ctx.factory().create_with_config::<Invoice, _>(
                "invoices",
                SerdeSerializer::<Invoice>::new(),
                config,
            )?;
            repository.save(&invoice("inv-2", 3.0))?;

            let stored = repository
                .collection()
                .find_one(readmodel::filter::field("invoice_key").eq("inv-2"))?
                .unwrap();
            assert!(!stored.contains_key("_id"));
            assert_eq!(repository.find(&"inv-2")?, Some(invoice("inv-2", 3.0)));
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_factory_on_closed_store_fails() {
    run_test(
        create_test_context,
        |ctx| {
            let factory = RepositoryFactory::new(ctx.store());
            ctx.store().close()?;
            let err = factory.create::<OrderView>("orders").err().unwrap();
            assert_eq!(err.kind(), &ErrorKind::StoreUnavailable);
            Ok(())
        },
        cleanup,
    )
}
