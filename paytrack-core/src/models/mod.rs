pub mod invoice;
pub mod report;

pub use invoice::{DerivedInvoice, InvoiceRecord};
pub use report::{CompanyReport, MonthlyAverageDays, MonthlyTotal};
