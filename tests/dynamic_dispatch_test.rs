use chrono::Utc;
use payment_records::domain::channel::Channel;
use payment_records::domain::payment::{NewPayment, PaymentStatus, PaymentUpdate};
use payment_records::domain::ports::PaymentStoreBox;
use payment_records::infrastructure::in_memory::InMemoryPaymentStore;
use rust_decimal_macros::dec;

#[tokio::test]
async fn test_store_as_trait_object() {
    let store: PaymentStoreBox = Box::new(InMemoryPaymentStore::new());

    let record = NewPayment::new(Channel::ApplePay, "user-1")
        .amount(dec!(100.0))
        .currency("USD")
        .into_record(Utc::now())
        .unwrap();
    let id = record.id.clone();

    // Verify Send + Sync by moving the boxed store into a task
    let handle = tokio::spawn(async move {
        store.insert(record).await.unwrap();
        store
            .update(&id, &PaymentUpdate::status(PaymentStatus::Confirmed))
            .await
            .unwrap()
            .unwrap()
    });

    let updated = handle.await.unwrap();
    assert_eq!(updated.channel, Channel::ApplePay);
    assert_eq!(updated.payment_status, PaymentStatus::Confirmed);
}
