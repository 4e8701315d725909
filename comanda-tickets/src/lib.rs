//! # comanda-tickets
//!
//! Thermal-document rendering for the POS: kitchen tickets, client
//! receipts (fiscal and not), fiscal X/Z/audit reports, cash closings,
//! vouchers and the ARCA electronic-invoice QR payload.
//!
//! ## Scope
//!
//! This crate decides WHAT to print. Each generator is a pure function
//! from value records to a base64-encoded ESC/POS stream, built on
//! `comanda-printer`. The stream goes to the Print Bridge, which owns
//! transport; this crate performs no I/O except the one async seam: the
//! external QR image renderer ([`qr::QrRenderer`]).
//!
//! Generators never fail. Degraded inputs (missing names, empty item
//! lists, malformed invoice numbers) render documented placeholders; a
//! receipt must always print *something* at the point of sale.
//!
//! ## Example
//!
//! ```
//! use comanda_tickets::documents::{TicketContext, kitchen_ticket};
//! use comanda_tickets::models::{LineItem, Order, ServiceType};
//!
//! let ctx = TicketContext::new("Sucursal Centro", 80);
//! let order = Order {
//!     number: 42,
//!     service: ServiceType::Takeaway,
//!     channel: None,
//!     caller_number: Some(17),
//!     customer_name: None,
//!     customer_phone: None,
//!     customer_address: None,
//!     external_ref: None,
//!     requested_at: None,
//!     created_at: 1705912335000,
//!     items: vec![LineItem {
//!         name: Some("Burger".to_string()),
//!         quantity: 2,
//!         note: None,
//!         modifiers: vec![],
//!         unit_price: None,
//!         total: None,
//!     }],
//!     totals: None,
//! };
//! let payload = kitchen_ticket(&order, &ctx);
//! assert!(!payload.is_empty());
//! ```

pub mod documents;
pub mod error;
pub mod format;
pub mod models;
pub mod qr;
pub mod reports;

// Re-exports
pub use comanda_printer::{EscPosBuilder, PaperWidth};
pub use documents::TicketContext;
pub use error::{QrError, QrResult};
