use crate::domain::dashboard::Bill;
use crate::error::Result;
use jiff::civil::Date;
use serde::Serialize;
use std::io::Write;

#[derive(Serialize)]
struct BillRow<'a> {
    id: &'a str,
    provider: &'a str,
    amount: String,
    due_date: String,
    status: String,
    overdue: bool,
}

/// Writes dashboard bills as CSV with an
/// `id,provider,amount,due_date,status,overdue` header.
pub struct BillWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> BillWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(sink),
        }
    }

    /// Overdue is judged against `today`.
    pub fn write_bills<'a>(
        &mut self,
        bills: impl IntoIterator<Item = &'a Bill>,
        today: Date,
    ) -> Result<()> {
        for bill in bills {
            self.writer.serialize(BillRow {
                id: bill.id.as_str(),
                provider: &bill.provider,
                amount: bill.amount.round_dp(2).to_string(),
                due_date: bill.due_date.to_string(),
                status: bill.status.to_string(),
                overdue: bill.is_overdue(today),
            })?;
        }
        self.writer.flush()?;
        Ok(())
    }
}
