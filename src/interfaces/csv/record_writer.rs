use crate::domain::payment::PaymentRecord;
use crate::error::Result;
use std::io::Write;

/// Export columns, in `PaymentRecord` field order.
pub const HEADER: [&str; 11] = [
    "id",
    "channel",
    "user_id",
    "amount",
    "currency",
    "payment_id",
    "payment_reference",
    "transaction_reference",
    "payment_status",
    "description",
    "timestamp",
];

/// Writes payment records as CSV, one row per record with a header line.
/// The header is written even when there are no records.
pub struct RecordWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> RecordWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(sink),
        }
    }

    pub fn write_records<I>(&mut self, records: I) -> Result<()>
    where
        I: IntoIterator<Item = PaymentRecord>,
    {
        let mut written = 0usize;
        for record in records {
            self.writer.serialize(record)?;
            written += 1;
        }
        if written == 0 {
            self.writer.write_record(HEADER)?;
        }
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::channel::Channel;
    use crate::domain::payment::{NewPayment, PaymentStatus};
    use chrono::Utc;
    use rust_decimal_macros::dec;

    #[test]
    fn test_write_records() {
        let record = NewPayment::new(Channel::MobileMoney, "user-9")
            .amount(dec!(25.50))
            .currency("KES")
            .status(PaymentStatus::Confirmed)
            .into_record(Utc::now())
            .unwrap();

        let mut buffer = Vec::new();
        RecordWriter::new(&mut buffer)
            .write_records(vec![record.clone()])
            .unwrap();
        let output = String::from_utf8(buffer).unwrap();
        let mut lines = output.lines();

        assert_eq!(lines.next().unwrap(), HEADER.join(","));
        let row = lines.next().unwrap();
        assert!(row.starts_with(&format!("{},mobile-money,user-9,25.50,KES,", record.id)));
        assert!(row.contains(",confirmed,,"));
        assert!(lines.next().is_none());
    }

    #[test]
    fn test_empty_export_writes_header_only() {
        let mut buffer = Vec::new();
        RecordWriter::new(&mut buffer)
            .write_records(Vec::new())
            .unwrap();
        let output = String::from_utf8(buffer).unwrap();
        assert_eq!(output.lines().count(), 1);
        assert_eq!(
            output.trim_end(),
            "id,channel,user_id,amount,currency,payment_id,payment_reference,transaction_reference,payment_status,description,timestamp"
        );
    }
}
