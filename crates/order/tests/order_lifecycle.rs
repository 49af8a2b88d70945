mod common;

use cafe_orders::{
    abstract_trait::order::service::{OrderCommandServiceTrait, OrderQueryServiceTrait},
    domain::requests::order::{FindAllOrder, OrderItemRequest, UpdateOrderRequest},
    model::status::OrderStatus,
};
use chrono::TimeDelta;
use common::*;
use shared::errors::ErrorKind;

fn update(order_id: i32, status: Option<&str>, items: Vec<OrderItemRequest>) -> UpdateOrderRequest {
    UpdateOrderRequest {
        order_id,
        customer_name: "Hà".into(),
        phone: Some("0912000111".into()),
        status: status.map(str::to_string),
        items,
    }
}

#[tokio::test]
async fn create_computes_total_from_items() {
    let h = harness().await;

    let order = h
        .create("Lan", vec![item(CA_PHE_SUA, 2, 25_000), item(BAC_XIU, 1, 15_000)])
        .await;

    assert_eq!(order.total, 65_000);
    assert_eq!(order.status, OrderStatus::Pending);
    assert_eq!(order.created_by, Some(1));
    assert_eq!(order.updated_at, None);

    let detail = h
        .deps
        .order_query
        .find_by_id(&h.auth, order.id)
        .await
        .unwrap()
        .data;
    let line_sum: i64 = detail.items.iter().map(|i| i.line_total).sum();
    assert_eq!(line_sum, detail.order.total);
    assert_eq!(detail.items[0].product_name, "Cà phê sữa đá");
}

#[tokio::test]
async fn stale_product_reference_persists_nothing() {
    let h = harness().await;
    h.create("Lan", vec![item(CA_PHE_SUA, 1, 25_000)]).await;
    h.store.set_product_active(TRA_DAO, false).await;

    for missing in [TRA_DAO, 99] {
        let err = h
            .deps
            .order_command
            .create_order(
                &h.auth,
                &new_order("Minh", vec![item(BANH_MI, 1, 20_000), item(missing, 1, 35_000)]),
            )
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::ReferenceNotFound);
        assert_eq!(h.store.order_count().await, 1);
        assert_eq!(h.store.item_count().await, 1);
    }
}

#[tokio::test]
async fn update_replaces_the_whole_item_set() {
    let h = harness().await;
    let order = h
        .create("Lan", vec![item(CA_PHE_SUA, 2, 25_000), item(BAC_XIU, 1, 29_000)])
        .await;

    h.clock.advance(TimeDelta::minutes(5));
    let updated = h
        .deps
        .order_command
        .update_order(&h.auth, &update(order.id, None, vec![item(BANH_MI, 3, 20_000)]))
        .await
        .unwrap()
        .data;

    assert_eq!(updated.total, 60_000);
    assert_eq!(updated.customer_name, "Hà");
    assert_eq!(updated.created_at, order.created_at);
    assert_eq!(updated.updated_at, Some(at(2025, 3, 12, 9, 20)));

    let detail = h
        .deps
        .order_query
        .find_by_id(&h.auth, order.id)
        .await
        .unwrap()
        .data;
    assert_eq!(detail.items.len(), 1);
    assert_eq!(detail.items[0].product_id, BANH_MI);
    assert_eq!(detail.items[0].quantity, 3);
    assert_eq!(h.store.item_count().await, 1);
}

#[tokio::test]
async fn update_may_reference_a_deactivated_product() {
    let h = harness().await;
    let order = h.create("Lan", vec![item(TRA_DAO, 1, 35_000)]).await;
    h.store.set_product_active(TRA_DAO, false).await;

    let updated = h
        .deps
        .order_command
        .update_order(&h.auth, &update(order.id, None, vec![item(TRA_DAO, 2, 35_000)]))
        .await
        .unwrap()
        .data;
    assert_eq!(updated.total, 70_000);

    let err = h
        .deps
        .order_command
        .update_order(&h.auth, &update(order.id, None, vec![item(42, 1, 1_000)]))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ReferenceNotFound);
    assert_eq!(h.store.item_count().await, 1);
}

#[tokio::test]
async fn update_error_kinds() {
    let h = harness().await;
    let order = h.create("Lan", vec![item(CA_PHE_SUA, 1, 25_000)]).await;

    let missing = h
        .deps
        .order_command
        .update_order(&h.auth, &update(404, None, vec![item(CA_PHE_SUA, 1, 25_000)]))
        .await
        .unwrap_err();
    assert_eq!(missing.kind(), ErrorKind::NotFound);

    let empty = h
        .deps
        .order_command
        .update_order(&h.auth, &update(order.id, None, vec![]))
        .await
        .unwrap_err();
    assert_eq!(empty.kind(), ErrorKind::ValidationFailed);

    let unknown = h
        .deps
        .order_command
        .update_order(
            &h.auth,
            &update(order.id, Some("paid"), vec![item(CA_PHE_SUA, 1, 25_000)]),
        )
        .await
        .unwrap_err();
    assert_eq!(unknown.kind(), ErrorKind::InvalidStatus);

    let skipped = h
        .deps
        .order_command
        .update_order(
            &h.auth,
            &update(order.id, Some("done"), vec![item(CA_PHE_SUA, 1, 25_000)]),
        )
        .await
        .unwrap_err();
    assert_eq!(skipped.kind(), ErrorKind::Conflict);

    let progressed = h
        .deps
        .order_command
        .update_order(
            &h.auth,
            &update(order.id, Some("processing"), vec![item(CA_PHE_SUA, 1, 25_000)]),
        )
        .await
        .unwrap()
        .data;
    assert_eq!(progressed.status, OrderStatus::Processing);
}

#[tokio::test]
async fn completed_orders_are_frozen() {
    let h = harness().await;
    let order = h
        .order_at(at(2025, 3, 12, 8, 0), "Lan", vec![item(CA_PHE_SUA, 1, 25_000)], "done")
        .await;

    let edit = h
        .deps
        .order_command
        .update_order(&h.auth, &update(order.id, None, vec![item(BAC_XIU, 1, 29_000)]))
        .await
        .unwrap_err();
    assert_eq!(edit.kind(), ErrorKind::Conflict);

    let delete = h
        .deps
        .order_command
        .delete_order(&h.auth, order.id)
        .await
        .unwrap_err();
    assert_eq!(delete.kind(), ErrorKind::Conflict);
    assert_eq!(h.store.order_count().await, 1);
    assert_eq!(h.store.item_count().await, 1);
}

#[tokio::test]
async fn status_follows_the_transition_graph() {
    let h = harness().await;
    let order = h.create("Lan", vec![item(CA_PHE_SUA, 1, 25_000)]).await;

    assert_eq!(h.move_to(order.id, "processing").await.status, OrderStatus::Processing);
    h.clock.advance(TimeDelta::minutes(10));
    let done = h.move_to(order.id, "done").await;
    assert_eq!(done.status, OrderStatus::Done);
    assert_eq!(done.updated_at, Some(at(2025, 3, 12, 9, 25)));

    let back = h
        .deps
        .order_command
        .update_status(&h.auth, order.id, &status("pending"))
        .await
        .unwrap_err();
    assert_eq!(back.kind(), ErrorKind::Conflict);

    // re-asserting the current state is accepted
    assert_eq!(h.move_to(order.id, "done").await.status, OrderStatus::Done);
}

#[tokio::test]
async fn cancelled_is_terminal_but_deletable() {
    let h = harness().await;
    let order = h.create("Lan", vec![item(CA_PHE_SUA, 1, 25_000)]).await;
    h.move_to(order.id, "cancelled").await;

    let reopen = h
        .deps
        .order_command
        .update_status(&h.auth, order.id, &status("processing"))
        .await
        .unwrap_err();
    assert_eq!(reopen.kind(), ErrorKind::Conflict);

    h.deps
        .order_command
        .delete_order(&h.auth, order.id)
        .await
        .unwrap();
    assert_eq!(h.store.order_count().await, 0);
    assert_eq!(h.store.item_count().await, 0);
}

#[tokio::test]
async fn pending_and_processing_orders_delete_with_their_items() {
    let h = harness().await;
    let pending = h
        .create("Lan", vec![item(CA_PHE_SUA, 1, 25_000), item(BANH_MI, 2, 20_000)])
        .await;
    let processing = h.create("Minh", vec![item(BAC_XIU, 1, 29_000)]).await;
    h.move_to(processing.id, "processing").await;

    for id in [pending.id, processing.id] {
        h.deps.order_command.delete_order(&h.auth, id).await.unwrap();
    }
    assert_eq!(h.store.order_count().await, 0);
    assert_eq!(h.store.item_count().await, 0);

    let gone = h
        .deps
        .order_command
        .delete_order(&h.auth, pending.id)
        .await
        .unwrap_err();
    assert_eq!(gone.kind(), ErrorKind::NotFound);
}

#[tokio::test]
async fn listing_is_newest_first_with_item_counts() {
    let h = harness().await;
    for (minute, name) in [(0, "An"), (10, "Bình"), (20, "Chi")] {
        h.order_at(
            at(2025, 3, 12, 10, minute),
            name,
            vec![item(CA_PHE_SUA, 1, 25_000), item(BANH_MI, 1, 20_000)],
            "pending",
        )
        .await;
    }

    let page = h
        .deps
        .order_query
        .find_all(
            &h.auth,
            &FindAllOrder {
                page: 1,
                page_size: 2,
                ..FindAllOrder::default()
            },
        )
        .await
        .unwrap();

    let names: Vec<&str> = page
        .data
        .iter()
        .map(|o| o.order.customer_name.as_str())
        .collect();
    assert_eq!(names, vec!["Chi", "Bình"]);
    assert_eq!(page.data[0].item_count, 2);
    assert_eq!(page.pagination.total_items, 3);
    assert_eq!(page.pagination.total_pages, 2);

    let bad_filter = h
        .deps
        .order_query
        .find_all(
            &h.auth,
            &FindAllOrder {
                status: Some("archived".into()),
                ..FindAllOrder::default()
            },
        )
        .await
        .unwrap_err();
    assert_eq!(bad_filter.kind(), ErrorKind::InvalidStatus);
}

#[tokio::test]
async fn unknown_order_is_not_found() {
    let h = harness().await;
    let err = h
        .deps
        .order_query
        .find_by_id(&h.auth, 7)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[tokio::test]
async fn oversized_lines_are_rejected_before_storage() {
    let h = harness().await;
    let err = h
        .deps
        .order_command
        .create_order(
            &h.auth,
            &new_order(
                "Lan",
                vec![item(CA_PHE_SUA, 1, i64::MAX / 2 + 1), item(BAC_XIU, 1, i64::MAX / 2 + 1)],
            ),
        )
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::ValidationFailed);
    assert_eq!(h.store.order_count().await, 0);
}

#[tokio::test]
async fn non_positive_product_ids_are_dangling_references() {
    let h = harness().await;
    for product_id in [0, -3] {
        let err = h
            .deps
            .order_command
            .create_order(&h.auth, &new_order("Lan", vec![item(product_id, 1, 25_000)]))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ReferenceNotFound);
    }
    assert_eq!(h.store.item_count().await, 0);
}
