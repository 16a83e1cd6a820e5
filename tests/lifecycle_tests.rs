mod common;

use common::{ADMIN, USER, engine};
use orderdesk::domain::notice::Notice;
use orderdesk::domain::order::PaymentStatus;
use orderdesk::domain::review::ReviewStatus;
use orderdesk::error::DeskError;
use orderdesk::infrastructure::notify::Recipient;
use rust_decimal_macros::dec;

#[tokio::test]
async fn test_happy_path_order_to_payment_claim() {
    let (engine, notifier) = engine();

    // User orders Telegram Stars (price 2000); admins are asked to review.
    let created = engine.create_order(USER, "Telegram Stars").await.unwrap();
    assert_eq!(created.price, dec!(2000));
    assert_eq!(created.order.status, ReviewStatus::Pending);
    let deliveries = notifier.drain().await;
    assert_eq!(deliveries[0].recipient, Recipient::Admins);

    // Admin approves; the owner receives the payment-method options.
    let order = engine.approve_order(ADMIN, &created.order.id).await.unwrap();
    assert_eq!(order.status, ReviewStatus::Approved);
    let deliveries = notifier.drain().await;
    assert_eq!(deliveries.len(), 1);
    assert_eq!(deliveries[0].recipient, Recipient::User(USER));
    match &deliveries[0].notice {
        Notice::OrderApproved {
            payment_methods, ..
        } => assert_eq!(payment_methods, &["TeleBirr", "CBE"]),
        other => panic!("unexpected notice: {other:?}"),
    }

    // User selects CBE; the order carries the method and a pending payment.
    let order = engine
        .select_payment_method(USER, &created.order.id, "CBE")
        .await
        .unwrap();
    assert_eq!(order.payment_method.as_deref(), Some("CBE"));
    assert_eq!(order.payment_status, Some(PaymentStatus::Pending));
    notifier.drain().await;

    // The payment claim reaches the admins and changes nothing on the order.
    engine
        .record_payment_claim(USER, &created.order.id, "CBE")
        .await
        .unwrap();
    let deliveries = notifier.drain().await;
    assert_eq!(deliveries.len(), 1);
    assert_eq!(deliveries[0].recipient, Recipient::Admins);
    assert!(matches!(deliveries[0].notice, Notice::PaymentClaimed { .. }));

    let stored = engine.list_user_orders(USER).await.unwrap().remove(0);
    assert_eq!(stored.status, ReviewStatus::Approved);
    assert_eq!(stored.payment_method.as_deref(), Some("CBE"));
    assert_eq!(stored.payment_status, Some(PaymentStatus::Pending));
}

#[tokio::test]
async fn test_terminal_orders_cannot_be_redecided() {
    let (engine, notifier) = engine();
    let approved = engine.create_order(USER, "Telegram Stars").await.unwrap();
    let rejected = engine.create_order(USER, "Telegram Stars").await.unwrap();
    engine.approve_order(ADMIN, &approved.order.id).await.unwrap();
    engine.reject_order(ADMIN, &rejected.order.id).await.unwrap();
    notifier.drain().await;

    for id in [&approved.order.id, &rejected.order.id] {
        assert!(matches!(
            engine.approve_order(ADMIN, id).await,
            Err(DeskError::AlreadyDecided { .. })
        ));
        assert!(matches!(
            engine.reject_order(ADMIN, id).await,
            Err(DeskError::AlreadyDecided { .. })
        ));
    }
    // Idempotence: the owner was not re-notified.
    assert!(notifier.drain().await.is_empty());

    let orders = engine.list_user_orders(USER).await.unwrap();
    assert_eq!(orders[0].status, ReviewStatus::Approved);
    assert_eq!(orders[1].status, ReviewStatus::Rejected);
}

#[tokio::test]
async fn test_non_admin_approval_changes_nothing_and_says_nothing() {
    let (engine, notifier) = engine();
    let created = engine.create_order(USER, "Telegram Stars").await.unwrap();
    notifier.drain().await;

    let intruder = 555;
    assert!(matches!(
        engine.approve_order(intruder, &created.order.id).await,
        Err(DeskError::Unauthorized { .. })
    ));
    assert!(matches!(
        engine.approve_order(intruder, "ORD-does-not-exist").await,
        Err(DeskError::Unauthorized { .. })
    ));

    assert!(notifier.drain().await.is_empty());
    let order = engine.list_user_orders(USER).await.unwrap().remove(0);
    assert_eq!(order.status, ReviewStatus::Pending);
}

#[tokio::test]
async fn test_pending_listing_matches_status_filter() {
    let (engine, _notifier) = engine();
    for _ in 0..3 {
        engine.create_order(USER, "Telegram Stars").await.unwrap();
    }
    let first = engine.list_user_orders(USER).await.unwrap().remove(0);
    engine.approve_order(ADMIN, &first.id).await.unwrap();

    let pending = engine.pending_orders(USER).await.unwrap();
    let filtered: Vec<_> = engine
        .list_user_orders(USER)
        .await
        .unwrap()
        .into_iter()
        .filter(|o| o.status == ReviewStatus::Pending)
        .collect();
    assert_eq!(pending, filtered);
    assert_eq!(pending.len(), 2);
}

#[tokio::test]
async fn test_concurrent_approvals_keep_both_associations() {
    // Two approvals for the same user no longer clobber a shared slot:
    // each order keeps its own awaiting-payment association.
    let (engine, _notifier) = engine();
    let a = engine.create_order(USER, "Telegram Stars").await.unwrap();
    let b = engine
        .create_order(USER, "Telegram Premium - 1 Month")
        .await
        .unwrap();

    engine.approve_order(ADMIN, &a.order.id).await.unwrap();
    engine.approve_order(ADMIN, &b.order.id).await.unwrap();
    assert!(engine.is_awaiting_payment(USER, &a.order.id).await.unwrap());
    assert!(engine.is_awaiting_payment(USER, &b.order.id).await.unwrap());

    // Paying the older order still works after the newer approval.
    let paid = engine
        .select_payment_method(USER, &a.order.id, "TeleBirr")
        .await
        .unwrap();
    assert_eq!(paid.payment_method.as_deref(), Some("TeleBirr"));
    assert!(engine.is_awaiting_payment(USER, &b.order.id).await.unwrap());
}

#[tokio::test]
async fn test_feedback_mirrors_order_workflow() {
    let (engine, notifier) = engine();
    let feedback = engine.submit_feedback(USER, "please add Stars gifting").await.unwrap();
    assert_eq!(feedback.status, ReviewStatus::Pending);
    let deliveries = notifier.drain().await;
    assert_eq!(deliveries[0].recipient, Recipient::Admins);

    engine.reject_feedback(ADMIN, feedback.id).await.unwrap();
    assert!(matches!(
        engine.approve_feedback(ADMIN, feedback.id).await,
        Err(DeskError::AlreadyDecided { .. })
    ));
    assert!(matches!(
        engine.approve_feedback(ADMIN, 999).await,
        Err(DeskError::NotFound { .. })
    ));
    assert!(matches!(
        engine.approve_feedback(USER, feedback.id).await,
        Err(DeskError::Unauthorized { .. })
    ));
}

#[tokio::test]
async fn test_price_edit_round_trip() {
    let (engine, _notifier) = engine();
    engine
        .set_service_price(ADMIN, "Telegram Premium - 1 Month", dec!(1500))
        .await
        .unwrap();
    assert_eq!(
        engine
            .get_service_price("Telegram Premium - 1 Month")
            .await
            .unwrap(),
        dec!(1500)
    );

    // Catalog mutation changes the price seen by later approvals of an
    // existing order, since prices are looked up live.
    let created = engine
        .create_order(USER, "Telegram Premium - 1 Month")
        .await
        .unwrap();
    assert_eq!(created.price, dec!(1500));
}
