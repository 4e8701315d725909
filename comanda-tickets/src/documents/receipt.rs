//! Client receipt generators
//!
//! Non-fiscal ticket, fiscal invoice/credit note, delivery receipt and
//! void receipt. Presence of the `factura` is the sole branch between
//! the fiscal and non-fiscal layouts; a fiscal document always carries
//! its issuer/recipient blocks, transparency disclosure and CAE line,
//! and a non-fiscal one always carries the "NO VALIDO COMO FACTURA"
//! banner.

use comanda_printer::EscPosBuilder;

use super::{
    TicketContext, banner, compose, delivery_block, items_block, order_header, payment_block,
    totals_block,
};
use crate::format::format_money;
use crate::models::{FiscalInvoice, InvoiceLetter, Order, Payment};

/// Mandatory banner of every non-fiscal client document
pub const NOT_INVOICE_BANNER: &str = "*** NO VALIDO COMO FACTURA ***";

/// Client receipt. Fiscal layout iff `factura` is present.
pub fn client_receipt(
    order: &Order,
    factura: Option<&FiscalInvoice>,
    payment: Option<&Payment>,
    reprint: bool,
    ctx: &TicketContext,
) -> String {
    compose(ctx, |b| {
        if reprint {
            banner(b, "*** REIMPRESION ***");
        }
        match factura {
            Some(f) => fiscal_body(b, order, f, payment, ctx),
            None => non_fiscal_body(b, order, payment, ctx),
        }
    })
}

/// Delivery client receipt, printed at "ready" time. Totals, no fiscal
/// blocks.
pub fn delivery_receipt(order: &Order, ctx: &TicketContext) -> String {
    compose(ctx, |b| {
        banner(b, "DELIVERY");
        order_header(b, order, ctx);
        delivery_block(b, order, ctx);
        items_block(b, &order.items, true);
        if let Some(totals) = &order.totals {
            totals_block(b, totals);
        }
        not_invoice_footer(b);
    })
}

/// Void receipt: reprints the items and original total under a VOIDED
/// banner. The cut is unconditional.
pub fn void_receipt(order: &Order, ctx: &TicketContext) -> String {
    compose(ctx, |b| {
        banner(b, "*** ANULADO ***");
        order_header(b, order, ctx);
        items_block(b, &order.items, true);
        if let Some(totals) = &order.totals {
            totals_block(b, totals);
        }
        b.newline();
        b.align_center();
        b.bold_on();
        b.line("PEDIDO ANULADO - SIN VALOR");
        b.bold_off();
        b.align_left();
    })
}

fn non_fiscal_body(
    b: &mut EscPosBuilder,
    order: &Order,
    payment: Option<&Payment>,
    ctx: &TicketContext,
) {
    banner(b, "TICKET");
    order_header(b, order, ctx);
    items_block(b, &order.items, true);
    if let Some(totals) = &order.totals {
        totals_block(b, totals);
    }
    if let Some(p) = payment {
        payment_block(b, p);
    }
    not_invoice_footer(b);
}

fn fiscal_body(
    b: &mut EscPosBuilder,
    order: &Order,
    f: &FiscalInvoice,
    payment: Option<&Payment>,
    ctx: &TicketContext,
) {
    let doc_label = if f.is_credit_note() {
        format!("NOTA DE CREDITO {}", f.letter.as_str())
    } else {
        format!("FACTURA {}", f.letter.as_str())
    };
    banner(b, &doc_label);

    issuer_block(b, f);
    b.line_lr(&format!("Comp. Nro: {}", f.number), &f.issue_date);
    recipient_block(b, f);

    order_header(b, order, ctx);
    items_block(b, &order.items, true);
    if let Some(totals) = &order.totals {
        totals_block(b, totals);
    }
    if let Some(p) = payment {
        payment_block(b, p);
    }

    // Discriminated VAT only on letter A documents
    if f.letter == InvoiceLetter::A {
        b.newline();
        b.line_lr("Neto Gravado", &format_money(f.net_amount));
        b.line_lr("IVA", &format_money(f.vat_amount));
        b.line_lr("Otros Tributos", &format_money(f.other_taxes));
    }

    transparency_block(b, f);

    if let Some(qr) = &f.qr_png {
        b.newline();
        b.align_center();
        b.bitmap(qr);
        b.align_left();
    }
    b.line_lr(&format!("CAE: {}", f.cae), &format!("Vto: {}", f.cae_expiry));
}

fn issuer_block(b: &mut EscPosBuilder, f: &FiscalInvoice) {
    let i = &f.issuer;
    b.line(&i.legal_name);
    b.line(&i.address);
    b.line(&format!("CUIT: {}", i.cuit));
    b.line(&format!("IIBB: {}", i.gross_income));
    b.line(&i.tax_regime);
    b.line(&format!("Inicio de actividades: {}", i.activity_start));
    b.separator('-');
}

fn recipient_block(b: &mut EscPosBuilder, f: &FiscalInvoice) {
    let r = &f.recipient;
    b.line(&format!("Cliente: {}", r.name));
    match &r.doc_number {
        Some(n) => b.line(&format!("{}: {}", r.doc_type, n)),
        None => b.line(&r.doc_type),
    };
    b.line(&format!("Cond. IVA: {}", r.tax_regime));
    b.separator('-');
}

/// Consumer tax-transparency disclosure (Ley 27.743). Amounts must
/// match the printed totals exactly; both come off the same invoice.
fn transparency_block(b: &mut EscPosBuilder, f: &FiscalInvoice) {
    b.newline();
    b.align_center();
    b.line("Regimen de Transparencia Fiscal");
    b.line("al Consumidor (Ley 27.743)");
    b.align_left();
    b.line_lr("IVA Contenido", &format_money(f.vat_disclosed));
    b.line_lr(
        "Otros Imp. Nacionales",
        &format_money(f.other_national_taxes),
    );
}

fn not_invoice_footer(b: &mut EscPosBuilder) {
    b.newline();
    b.align_center();
    b.bold_on();
    b.line(NOT_INVOICE_BANNER);
    b.bold_off();
    b.line("GRACIAS POR SU COMPRA");
    b.align_left();
}
