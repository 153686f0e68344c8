use readmodel::common::Value;
use readmodel::doc;
use readmodel::errors::ErrorKind;
use readmodel::filter::{all, field};
use readmodel_int_test::test_util::{
    cleanup, create_test_context, generate_order, generate_orders, run_test, OrderView,
};

#[ctor::ctor]
fn init() {
    colog::init();
}

#[test]
fn test_save_and_find() {
    run_test(
        create_test_context,
        |ctx| {
            let repository = ctx.factory().create::<OrderView>("orders")?;
            let order = generate_order("open");
            repository.save(&order)?;

            let found = repository.find(&order.id)?;
            assert_eq!(found, Some(order));
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_find_missing_returns_none() {
    run_test(
        create_test_context,
        |ctx| {
            let repository = ctx.factory().create::<OrderView>("orders")?;
            repository.save(&generate_order("open"))?;
            assert_eq!(repository.find(&"no-such-order")?, None);
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_save_twice_stores_one_document() {
    run_test(
        create_test_context,
        |ctx| {
            let repository = ctx.factory().create::<OrderView>("orders")?;
            let order = generate_order("open");
            repository.save(&order)?;
            repository.save(&order)?;

            assert_eq!(repository.collection().size()?, 1);
            assert_eq!(repository.find_all()?, vec![order]);
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_save_replaces_previous_state() {
    run_test(
        create_test_context,
        |ctx| {
            let repository = ctx.factory().create::<OrderView>("orders")?;
            let mut order = generate_order("open");
            order.note = Some("call before delivery".to_string());
            repository.save(&order)?;

            order.status = "shipped".to_string();
            order.note = None;
            order.lines.truncate(1);
            repository.save(&order)?;

            assert_eq!(repository.find(&order.id)?, Some(order.clone()));

            let stored = repository
                .collection()
                .find_one(field("_id").eq(order.id.as_str()))?
                .unwrap();
            assert_eq!(stored.get("status").and_then(Value::as_str), Some("shipped"));
            assert!(stored.get("note").is_some_and(Value::is_null));
            assert_eq!(stored.get("lines").and_then(Value::as_array).map(Vec::len), Some(1));
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_stored_document_layout() {
    run_test(
        create_test_context,
        |ctx| {
            let repository = ctx.factory().create::<OrderView>("orders")?;
            let order = generate_order("open");
            repository.save(&order)?;

            let stored = repository.collection().find(all())?;
            assert_eq!(stored.len(), 1);
            let document = &stored[0];
            assert_eq!(
                document.get("_id").and_then(Value::as_str),
                Some(order.id.as_str())
            );
            assert!(!document.contains_key("id"));
            assert_eq!(
                document.get("customer").and_then(Value::as_str),
                Some(order.customer.as_str())
            );
            assert_eq!(
                document.get("total").and_then(Value::as_i128),
                Some(order.total as i128)
            );
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_find_all() {
    run_test(
        create_test_context,
        |ctx| {
            let repository = ctx.factory().create::<OrderView>("orders")?;
            assert!(repository.find_all()?.is_empty());

            let mut saved = generate_orders(5, "open");
            for order in &saved {
                repository.save(order)?;
            }

            let mut found = repository.find_all()?;
            found.sort_by(|a, b| a.id.cmp(&b.id));
            saved.sort_by(|a, b| a.id.cmp(&b.id));
            assert_eq!(found, saved);
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_remove() {
    run_test(
        create_test_context,
        |ctx| {
            let repository = ctx.factory().create::<OrderView>("orders")?;
            let kept = generate_order("open");
            let removed = generate_order("cancelled");
            repository.save(&kept)?;
            repository.save(&removed)?;

            repository.remove(&removed.id)?;
            assert_eq!(repository.find(&removed.id)?, None);
            assert_eq!(repository.find_all()?, vec![kept]);
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_remove_is_idempotent() {
    run_test(
        create_test_context,
        |ctx| {
            let repository = ctx.factory().create::<OrderView>("orders")?;
            let order = generate_order("open");
            repository.save(&order)?;

            repository.remove(&order.id)?;
            repository.remove(&order.id)?;
            repository.remove(&"never-saved")?;
            assert_eq!(repository.collection().size()?, 0);
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_find_by_status() {
    run_test(
        create_test_context,
        |ctx| {
            let repository = ctx.factory().create::<OrderView>("orders")?;
            for order in generate_orders(3, "open") {
                repository.save(&order)?;
            }
            for order in generate_orders(2, "shipped") {
                repository.save(&order)?;
            }

            let open = repository.find_by(&doc! { "status": "open" })?;
            assert_eq!(open.len(), 3);
            assert!(open.iter().all(|order| order.status == "open"));

            assert!(repository.find_by(&doc! { "status": "lost" })?.is_empty());
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_find_by_several_fields() {
    run_test(
        create_test_context,
        |ctx| {
            let repository = ctx.factory().create::<OrderView>("orders")?;
            let mut target = generate_order("open");
            target.customer = "Ada Lovelace".to_string();
            let mut other = generate_order("shipped");
            other.customer = "Ada Lovelace".to_string();
            repository.save(&target)?;
            repository.save(&other)?;

            let found = repository.find_by(&doc! {
                "customer": "Ada Lovelace",
                "status": "open",
            })?;
            assert_eq!(found, vec![target]);
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_find_by_number_of_other_width() {
    run_test(
        create_test_context,
        |ctx| {
            let repository = ctx.factory().create::<OrderView>("orders")?;
            let order = generate_order("open");
            repository.save(&order)?;

            let found = repository.find_by(&doc! { "total": (order.total as i32) })?;
            assert!(found.contains(&order));

            let as_text = repository.find_by(&doc! { "total": (order.total.to_string()) })?;
            assert!(as_text.is_empty());
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_find_by_id_field() {
    run_test(
        create_test_context,
        |ctx| {
            let repository = ctx.factory().create::<OrderView>("orders")?;
            let order = generate_order("open");
            repository.save(&order)?;
            repository.save(&generate_order("open"))?;

            let by_id = repository.find_by(&doc! { "id": (order.id.clone()) })?;
            assert_eq!(by_id, vec![order.clone()]);

            let by_store_id = repository.find_by(&doc! { "_id": (order.id.clone()) })?;
            assert_eq!(by_store_id, vec![order]);
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_find_by_empty_document_returns_nothing() {
    run_test(
        create_test_context,
        |ctx| {
            let repository = ctx.factory().create::<OrderView>("orders")?;
            repository.save(&generate_order("open"))?;
            assert!(repository.find_by(&doc! {})?.is_empty());
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_dropped_collection_surfaces_store_error() {
    run_test(
        create_test_context,
        |ctx| {
            let repository = ctx.factory().create::<OrderView>("orders")?;
            repository.save(&generate_order("open"))?;
            ctx.store().drop_collection("orders")?;

            let err = repository.find_all().unwrap_err();
            assert_eq!(err.kind(), &ErrorKind::CollectionNotFound);
            Ok(())
        },
        cleanup,
    )
}
