//! # inventario
//!
//! Expiry tracking for product batches pasted as plain text.
//!
//! Each pasted line describes one batch: packaging quantities, a product
//! name and an expiry date. Lines are parsed into records, each record is
//! classified by how many days it has left, and the collection is shown as
//! a searchable list with the soonest-expiring batches first.
//!
//! ## Overview
//!
//! - **Parsing**: `<int>x<int> <name> (<DD>/<MM>/<YY>)`, all-or-nothing per
//!   submission
//! - **Status**: Critical (≤21 days), Upcoming (≤30), Moderate (≤60), Normal
//! - **View**: case-insensitive name search, sorted by days remaining
//! - **Export**: CSV of the visible records
//! - **Store**: one owner for the collection, saved after every change
//!
//! ## Example
//!
//! ```
//! use chrono::NaiveDate;
//! use inventario::{Inventory, MemoryStorage, Status, export_csv};
//!
//! let now = NaiveDate::from_ymd_opt(2026, 5, 1)
//!     .unwrap()
//!     .and_hms_opt(9, 0, 0)
//!     .unwrap();
//!
//! let mut inventory = Inventory::empty(MemoryStorage::new());
//! inventory
//!     .submit("130x24 speed 250 (02/06/26)\n5x12 speed 473 (14/08/26)", now)
//!     .unwrap();
//!
//! let view = inventory.visible("250");
//! assert_eq!(view.len(), 1);
//! assert_eq!(view[0].record.total_quantity(), 3120);
//! assert_eq!(view[0].status, Status::Moderate);
//!
//! let csv = export_csv(&view).unwrap();
//! assert!(csv.starts_with("Producto,Cantidad Total"));
//! ```

pub mod error;
pub mod export;
pub mod parser;
pub mod record;
pub mod status;
pub mod store;
pub mod view;

pub use error::{ExportError, FormatFault, ParseError, StoreError};
pub use export::{CSV_HEADER, export_csv, export_file_name, export_file_name_now};
pub use parser::{parse, parse_entries, parse_line, parse_now};
pub use record::{BatchEntry, InventoryRecord, days_remaining, end_of_day};
pub use status::{Status, is_urgent};
pub use store::{Inventory, JsonFile, MemoryStorage, STORAGE_KEY, Storage, SubmitError};
pub use uuid::Uuid;
pub use view::{VisibleRecord, format_date, format_quantity, matches_search, visible};
