//! Document generators
//!
//! One pure function per document type: `(data, context) -> base64`.
//! Every variant composes the same skeleton - brand header, banner,
//! identification block, body sections, cut - with its own information
//! density. Paper width is threaded from the context into every layout
//! call; generators never hard-code a column count.
//!
//! Generators never fail. Missing optional data renders a placeholder
//! or an empty section, and the document always ends with a cut.

mod kitchen;
mod receipt;
mod voucher;

pub use kitchen::{kitchen_ticket, kitchen_ticket_delivery, kitchen_ticket_station};
pub use receipt::{client_receipt, delivery_receipt, void_receipt};
pub use voucher::{redemption_voucher, test_page};

use chrono_tz::Tz;
use comanda_printer::{EscPosBuilder, PaperWidth};

use crate::format::{
    channel_label, format_date_time, format_money, format_time, modifier_prefix,
    payment_method_label,
};
use crate::models::{LineItem, Modifier, ModifierKind, Order, OrderTotals, Payment};

/// Placeholder name for items that arrive without one
pub const ITEM_NAME_PLACEHOLDER: &str = "Producto";

/// Per-terminal rendering context, built once at startup.
///
/// Carries the branch label printed under the logo, the paper width,
/// the display timezone and the logo bitmap (a configuration asset; the
/// wordmark is part of the image, so the brand name is never printed as
/// text).
#[derive(Debug, Clone)]
pub struct TicketContext {
    pub branch: String,
    pub paper: PaperWidth,
    pub tz: Tz,
    pub logo_png: Option<String>,
}

impl TicketContext {
    /// Context for a branch and a paper width in millimeters (80 or 58;
    /// anything else degrades to the 58mm layout).
    pub fn new(branch: impl Into<String>, paper_mm: u32) -> Self {
        Self {
            branch: branch.into(),
            paper: PaperWidth::from_mm(paper_mm),
            tz: chrono_tz::America::Argentina::Buenos_Aires,
            logo_png: None,
        }
    }

    pub fn with_logo(mut self, png_b64: impl Into<String>) -> Self {
        self.logo_png = Some(png_b64.into());
        self
    }

    pub fn with_tz(mut self, tz: Tz) -> Self {
        self.tz = tz;
        self
    }
}

/// Run a body over the shared skeleton: brand header first, cut last.
pub(crate) fn compose<F>(ctx: &TicketContext, body: F) -> String
where
    F: FnOnce(&mut EscPosBuilder),
{
    let mut b = EscPosBuilder::new(ctx.paper);
    brand_header(&mut b, ctx);
    body(&mut b);
    b.cut();
    b.to_base64()
}

/// Skeleton without the brand header (redemption vouchers must be
/// visually distinct from receipts).
pub(crate) fn compose_bare<F>(ctx: &TicketContext, body: F) -> String
where
    F: FnOnce(&mut EscPosBuilder),
{
    let mut b = EscPosBuilder::new(ctx.paper);
    body(&mut b);
    b.cut();
    b.to_base64()
}

fn brand_header(b: &mut EscPosBuilder, ctx: &TicketContext) {
    b.align_center();
    if let Some(logo) = &ctx.logo_png {
        b.bitmap(logo);
    }
    // The logo carries the wordmark; only the local name goes below it
    b.line(&ctx.branch);
    b.newline();
    b.align_left();
}

/// Document-type banner: double size, emphasized, centered
pub(crate) fn banner(b: &mut EscPosBuilder, text: &str) {
    b.align_center();
    b.size_double();
    b.bold_on();
    b.line(text);
    b.bold_off();
    b.size_normal();
    b.newline();
    b.align_left();
}

/// Order identification block: oversized order number (scannable from
/// across a kitchen), channel/service label, timestamp, pager and
/// external reference when present.
pub(crate) fn order_header(b: &mut EscPosBuilder, order: &Order, ctx: &TicketContext) {
    b.align_center();
    b.size_double();
    b.line(&format!("#{:03}", order.number));
    b.size_normal();
    b.align_left();
    b.line_lr(
        channel_label(order.channel, order.service),
        &format_date_time(order.created_at, ctx.tz),
    );
    if let Some(caller) = order.caller_number {
        b.line_lr("LLAMADOR", &caller.to_string());
    }
    if let Some(ext) = &order.external_ref {
        b.line_lr("REF", ext);
    }
    b.separator('-');
}

fn modifier_text(m: &Modifier) -> String {
    let text = format!("{}{}", modifier_prefix(m.kind), m.description);
    match m.kind {
        // Removals print upper-cased (and emphasized by the caller):
        // a missed "SIN" line is a remade dish
        ModifierKind::Removal => text.to_uppercase(),
        _ => text,
    }
}

/// Line-item block. `show_prices` is off for food-prep tickets.
pub(crate) fn items_block(b: &mut EscPosBuilder, items: &[LineItem], show_prices: bool) {
    for item in items {
        let name = item.name.as_deref().unwrap_or(ITEM_NAME_PLACEHOLDER);
        let qty_line = format!("{}x {}", item.quantity, name);
        match item.total {
            Some(total) if show_prices => {
                b.line_lr(&qty_line, &format_money(total));
            }
            _ => {
                b.line(&qty_line);
            }
        }
        for m in &item.modifiers {
            let text = format!("   {}", modifier_text(m));
            if m.kind == ModifierKind::Removal {
                b.bold_on();
                b.line(&text);
                b.bold_off();
            } else {
                b.line(&text);
            }
        }
        if let Some(note) = &item.note
            && !note.is_empty()
        {
            b.bold_on();
            b.line(&format!("   * {}", note));
            b.bold_off();
        }
    }
}

/// Totals block: subtotal/discount rows when a discount exists, then
/// the grand total enlarged.
pub(crate) fn totals_block(b: &mut EscPosBuilder, totals: &OrderTotals) {
    b.separator('=');
    if let Some(discount) = totals.discount {
        b.line_lr("SUBTOTAL", &format_money(totals.subtotal));
        let label = match totals.discount_percent {
            Some(p) => format!("DESCUENTO (-{}%)", p.normalize()),
            None => "DESCUENTO".to_string(),
        };
        b.line_lr(&label, &format_money(-discount));
    }
    b.size_double();
    b.bold_on();
    b.line(&format!("TOTAL {}", format_money(totals.total)));
    b.bold_off();
    b.size_normal();
}

/// Payment method / tendered / change block
pub(crate) fn payment_block(b: &mut EscPosBuilder, payment: &Payment) {
    b.newline();
    b.line_lr("PAGO", payment_method_label(payment.method));
    b.line_lr("ENTREGA", &format_money(payment.paid));
    b.line_lr("VUELTO", &format_money(payment.change));
}

/// Delivery data block: name, address, phone, requested time
pub(crate) fn delivery_block(b: &mut EscPosBuilder, order: &Order, ctx: &TicketContext) {
    b.bold_on();
    b.line("ENTREGA");
    b.bold_off();
    if let Some(name) = &order.customer_name {
        b.line(&format!("Nombre: {}", name));
    }
    if let Some(address) = &order.customer_address {
        b.line(&format!("Direccion: {}", address));
    }
    if let Some(phone) = &order.customer_phone {
        b.line(&format!("Tel: {}", phone));
    }
    if let Some(requested) = order.requested_at {
        b.line_lr("Hora pedida", &format_time(requested, ctx.tz));
    }
    b.separator('-');
}
