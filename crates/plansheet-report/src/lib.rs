//! Report outputs: the hyperlinked workbook, its JSON twin, output file
//! housekeeping, and mail delivery.

pub mod error;
pub mod json;
pub mod mail;
pub mod output;
pub mod read;
pub mod xlsx;

pub use error::ReportError;
pub use json::write_json;
pub use mail::{build_message, notify, send_report, NotifyOutcome};
pub use output::{duplicate_to, ensure_directory, report_file_name};
pub use read::read_workbook;
pub use xlsx::{write_workbook, WorkbookOptions};
