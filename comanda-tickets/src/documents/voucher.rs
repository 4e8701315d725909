//! Redemption voucher and printer test page

use super::{TicketContext, banner, compose, compose_bare};
use crate::format::format_date;
use crate::models::Voucher;

/// Redemption voucher: minimal layout, no logo, so it cannot be
/// mistaken for a receipt.
pub fn redemption_voucher(voucher: &Voucher, ctx: &TicketContext) -> String {
    compose_bare(ctx, |b| {
        banner(b, "VALE");
        b.align_center();
        b.size_double();
        b.bold_on();
        b.line(&voucher.code);
        b.bold_off();
        b.size_normal();
        b.newline();
        b.line(&voucher.detail);
        if let Some(expires) = voucher.expires_at {
            b.line(&format!("Valido hasta: {}", format_date(expires, ctx.tz)));
        }
        b.align_left();
    })
}

/// Printer test page: exercises every text style once for hardware
/// verification.
pub fn test_page(ctx: &TicketContext) -> String {
    compose(ctx, |b| {
        banner(b, "PRUEBA DE IMPRESION");
        b.line("Texto normal");
        b.bold_on();
        b.line("Texto en negrita");
        b.bold_off();
        b.underline_on();
        b.line("Texto subrayado");
        b.underline_off();
        b.size_double_height();
        b.line("Doble alto");
        b.size_normal();
        b.size_double_width();
        b.line("Doble ancho");
        b.size_normal();
        b.size_double();
        b.line("Doble");
        b.size_normal();
        b.align_center();
        b.line("Centrado");
        b.align_right();
        b.line("Derecha");
        b.align_left();
        b.separator('=');
        b.line_lr("Izquierda", "Derecha");
        b.line("ñ á é í ó ú ü Ñ");
    })
}
