//! # comanda-printer
//!
//! ESC/POS command building for thermal receipt printers - low level only.
//!
//! ## Scope
//!
//! This crate handles HOW a document is encoded:
//! - ESC/POS command building (fluent byte builder)
//! - CP-1252 text encoding for Spanish text
//! - Paper-width contract (80mm/58mm -> 42/32 columns)
//! - Bitmap marker sub-protocol for the Print Bridge
//!
//! Business logic (WHAT to print) stays in application code:
//! - Ticket/receipt/report rendering → comanda-tickets
//!
//! The builder never fails: every operation appends and returns the
//! builder, so a receipt always encodes to *something*. Transport to the
//! physical printer belongs to the Print Bridge, not this crate.
//!
//! ## Example
//!
//! ```
//! use comanda_printer::{EscPosBuilder, PaperWidth};
//!
//! let mut b = EscPosBuilder::new(PaperWidth::Mm80);
//! b.align_center();
//! b.size_double();
//! b.line("COMANDA");
//! b.size_normal();
//! b.separator('=');
//! b.align_left();
//! b.line_lr("TOTAL", "$ 2.500");
//! b.cut();
//! let payload = b.to_base64();
//! assert!(!payload.is_empty());
//! ```

mod encoding;
mod escpos;
mod paper;

// Re-exports
pub use encoding::{encode_cp1252, pad_cp1252, text_width, truncate_cp1252};
pub use escpos::{BITMAP_MARKER_END, BITMAP_MARKER_START, EscPosBuilder};
pub use paper::PaperWidth;
