use payment_records::application::ledger::PaymentLedger;
use payment_records::domain::channel::Channel;
use payment_records::domain::payment::NewPayment;
use payment_records::domain::ports::{PaymentStoreBox, PaymentStoreFactory};
use payment_records::infrastructure::in_memory::InMemoryPaymentStore;
use rust_decimal_macros::dec;

#[tokio::test]
async fn test_factory_instantiation() {
    let factory: PaymentStoreFactory =
        Box::new(|| Box::new(InMemoryPaymentStore::new()) as PaymentStoreBox);

    let ledger = PaymentLedger::new(factory());
    let record = ledger
        .create(
            NewPayment::new(Channel::GooglePay, "user-1")
                .amount(dec!(1))
                .currency("EUR"),
        )
        .await
        .unwrap();

    assert_eq!(ledger.get(&record.id).await.unwrap(), record);
}

#[tokio::test]
async fn test_factory_stores_are_independent() {
    let factory: PaymentStoreFactory =
        Box::new(|| Box::new(InMemoryPaymentStore::with_shards(2)) as PaymentStoreBox);

    let first = PaymentLedger::new(factory());
    let handle = tokio::spawn(async move {
        let second = PaymentLedger::new(factory());
        second
            .create(
                NewPayment::new(Channel::SamsungPay, "user-2")
                    .amount(dec!(2))
                    .currency("KRW"),
            )
            .await
            .unwrap()
    });

    let record = handle.await.unwrap();
    assert!(first.get(&record.id).await.is_err());
    assert!(first.records().await.unwrap().is_empty());
}
