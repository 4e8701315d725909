//! Fiscal period reports and cash-register closing
//!
//! Single-shot renderings of already-aggregated totals; aggregation
//! happens upstream. Informe X is a repeatable, non-closing snapshot;
//! Cierre Z is the terminal, sequence-numbered daily closing - their
//! banners must never be confusable. Every report prints its monetary
//! sections in the same fixed order: document counts, VAT brackets,
//! totals, payment methods.

use comanda_printer::EscPosBuilder;

use crate::documents::{TicketContext, banner, compose};
use crate::format::{format_date, format_date_time, format_money, format_time};
use crate::models::{AuditReport, CashClosing, MovementKind, PeriodTotals, ZReport};

/// Informe X: non-closing snapshot of the running day. May be issued
/// any number of times.
pub fn report_x(totals: &PeriodTotals, generated_at: i64, ctx: &TicketContext) -> String {
    compose(ctx, |b| {
        banner(b, "INFORME X");
        b.align_center();
        b.line("NO FISCAL - NO CIERRA JORNADA");
        b.align_left();
        b.newline();
        b.line_lr("Emitido", &format_date_time(generated_at, ctx.tz));
        b.separator('=');
        totals_sections(b, totals);
    })
}

/// Cierre Z: terminal daily closing. The z-number and period bounds are
/// caller-supplied; rendering the same input twice yields identical
/// bytes.
pub fn report_z(z: &ZReport, ctx: &TicketContext) -> String {
    compose(ctx, |b| {
        banner(b, "CIERRE Z");
        b.align_center();
        b.size_double_height();
        b.bold_on();
        b.line(&format!("Z Nro {:04}", z.z_number));
        b.bold_off();
        b.size_normal();
        b.align_left();
        b.line_lr("Jornada", &format_date(z.business_date, ctx.tz));
        b.line_lr("Emitido", &format_date_time(z.generated_at, ctx.tz));
        if let Some(first) = &z.first_doc {
            b.line_lr("Primer comp.", first);
        }
        if let Some(last) = &z.last_doc {
            b.line_lr("Ultimo comp.", last);
        }
        b.separator('=');
        totals_sections(b, &z.totals);
    })
}

/// Audit report: one line per closed day plus period-wide totals.
pub fn report_audit(audit: &AuditReport, ctx: &TicketContext) -> String {
    compose(ctx, |b| {
        banner(b, "AUDITORIA");
        b.line_lr("Desde", &format_date(audit.from_date, ctx.tz));
        b.line_lr("Hasta", &format_date(audit.to_date, ctx.tz));
        b.separator('=');
        b.bold_on();
        b.line("POR JORNADA");
        b.bold_off();
        let mut period = PeriodTotals::default();
        for day in &audit.days {
            b.line_lr(
                &format!(
                    "Z {:04} {}",
                    day.z_number,
                    format_date(day.business_date, ctx.tz)
                ),
                &format_money(day.totals.total),
            );
            period.accumulate(&day.totals);
        }
        b.separator('=');
        b.bold_on();
        b.line("TOTALES DEL PERIODO");
        b.bold_off();
        totals_sections(b, &period);
    })
}

/// Cash-register closing: opening/closing amounts, income/expense
/// totals and the signed movement list.
pub fn cash_closing(closing: &CashClosing, ctx: &TicketContext) -> String {
    compose(ctx, |b| {
        banner(b, "CIERRE DE CAJA");
        b.line_lr("Apertura", &format_date_time(closing.opened_at, ctx.tz));
        b.line_lr("Cierre", &format_date_time(closing.closed_at, ctx.tz));
        b.separator('-');
        b.line_lr("Fondo inicial", &format_money(closing.opening_amount));
        b.line_lr("Ingresos", &format_money(closing.income_total));
        b.line_lr("Egresos", &format_money(-closing.expense_total));
        b.line_lr("Efectivo final", &format_money(closing.closing_amount));
        if !closing.movements.is_empty() {
            b.separator('-');
            b.bold_on();
            b.line("MOVIMIENTOS");
            b.bold_off();
            for m in &closing.movements {
                let signed = match m.kind {
                    MovementKind::Income => m.amount,
                    MovementKind::Expense => -m.amount,
                };
                b.line_lr(
                    &format!("{} {}", format_time(m.at, ctx.tz), m.description),
                    &format_money(signed),
                );
            }
        }
        b.newline();
        b.newline();
        b.separator('_');
        b.align_center();
        b.line("Firma responsable");
        b.align_left();
    })
}

/// Fixed section order shared by X, Z and audit reports.
fn totals_sections(b: &mut EscPosBuilder, t: &PeriodTotals) {
    // Document counts
    b.bold_on();
    b.line("DOCUMENTOS");
    b.bold_off();
    b.line_lr(
        &format!("Facturas ({})", t.invoice_count),
        &format_money(t.invoice_total),
    );
    b.line_lr(
        &format!("Notas de credito ({})", t.credit_note_count),
        &format_money(t.credit_note_total),
    );
    b.separator('-');

    // VAT-rate brackets
    b.bold_on();
    b.line("IVA");
    b.bold_off();
    b.line_lr("Neto 21%", &format_money(t.net_21));
    b.line_lr("IVA 21%", &format_money(t.vat_21));
    b.line_lr("Neto 10,5%", &format_money(t.net_10_5));
    b.line_lr("IVA 10,5%", &format_money(t.vat_10_5));
    b.line_lr("Exento", &format_money(t.exempt));
    b.line_lr("No gravado", &format_money(t.untaxed));
    b.separator('-');

    // Period total
    b.size_double_height();
    b.bold_on();
    b.line(&format!("TOTAL {}", format_money(t.total)));
    b.bold_off();
    b.size_normal();
    b.separator('-');

    // Payment methods
    b.bold_on();
    b.line("MEDIOS DE PAGO");
    b.bold_off();
    b.line_lr("Efectivo", &format_money(t.cash));
    b.line_lr("Debito", &format_money(t.debit));
    b.line_lr("Credito", &format_money(t.credit));
    b.line_lr("QR / Billetera", &format_money(t.qr_wallet));
    b.line_lr("Transferencia", &format_money(t.transfer));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::documents::test_support::decode;
    use rust_decimal_macros::dec;

    fn sample_totals() -> PeriodTotals {
        PeriodTotals {
            invoice_count: 38,
            invoice_total: dec!(412350.50),
            credit_note_count: 2,
            credit_note_total: dec!(5200),
            net_21: dec!(290000),
            vat_21: dec!(60900),
            net_10_5: dec!(48000),
            vat_10_5: dec!(5040),
            exempt: dec!(2000),
            untaxed: dec!(1210.50),
            total: dec!(407150.50),
            cash: dec!(120000),
            debit: dec!(95000),
            credit: dec!(88150.50),
            qr_wallet: dec!(84000),
            transfer: dec!(20000),
        }
    }

    fn sample_z(z_number: u64) -> ZReport {
        ZReport {
            z_number,
            business_date: 1705912335000,
            generated_at: 1705940000000,
            first_doc: Some("00003-00001201".to_string()),
            last_doc: Some("00003-00001240".to_string()),
            totals: sample_totals(),
        }
    }

    #[test]
    fn test_x_and_z_banners_distinct() {
        let ctx = TicketContext::new("Sucursal Centro", 80);
        let x = decode(&report_x(&sample_totals(), 1705940000000, &ctx));
        let z = decode(&report_z(&sample_z(42), &ctx));
        assert!(x.contains("INFORME X"));
        assert!(x.contains("NO CIERRA JORNADA"));
        assert!(!x.contains("CIERRE Z"));
        assert!(z.contains("CIERRE Z"));
        assert!(z.contains("Z Nro 0042"));
        assert!(!z.contains("INFORME X"));
    }

    #[test]
    fn test_section_order() {
        let ctx = TicketContext::new("Sucursal Centro", 80);
        let s = decode(&report_x(&sample_totals(), 1705940000000, &ctx));
        let docs = s.find("DOCUMENTOS").unwrap();
        let vat = s.find("IVA 21%").unwrap();
        let total = s.find("TOTAL $407.150,50").unwrap();
        let payments = s.find("MEDIOS DE PAGO").unwrap();
        assert!(docs < vat && vat < total && total < payments);
    }

    #[test]
    fn test_z_report_deterministic() {
        let ctx = TicketContext::new("Sucursal Centro", 80);
        let z = sample_z(42);
        assert_eq!(report_z(&z, &ctx), report_z(&z, &ctx));
    }

    #[test]
    fn test_z_period_bounds() {
        let ctx = TicketContext::new("Sucursal Centro", 58);
        let s = decode(&report_z(&sample_z(7), &ctx));
        assert!(s.contains("00003-00001201"));
        assert!(s.contains("00003-00001240"));
    }

    #[test]
    fn test_audit_one_line_per_day_plus_period() {
        let ctx = TicketContext::new("Sucursal Centro", 80);
        let audit = AuditReport {
            from_date: 1705912335000,
            to_date: 1706085135000,
            days: vec![sample_z(41), sample_z(42), sample_z(43)],
        };
        let s = decode(&report_audit(&audit, &ctx));
        assert!(s.contains("Z 0041"));
        assert!(s.contains("Z 0042"));
        assert!(s.contains("Z 0043"));
        // 3 x 407150.50 = 1221451.50
        assert!(s.contains("TOTAL $1.221.451,50"));
        // Counts summed: 3 x 38
        assert!(s.contains("Facturas (114)"));
    }

    #[test]
    fn test_cash_closing_signed_movements() {
        let ctx = TicketContext::new("Sucursal Centro", 80);
        let closing = CashClosing {
            opened_at: 1705912335000,
            closed_at: 1705940000000,
            opening_amount: dec!(10000),
            closing_amount: dec!(95500),
            income_total: dec!(120000),
            expense_total: dec!(34500),
            movements: vec![
                crate::models::CashMovement {
                    kind: MovementKind::Expense,
                    description: "Proveedor pan".to_string(),
                    amount: dec!(34500),
                    at: 1705920000000,
                },
                crate::models::CashMovement {
                    kind: MovementKind::Income,
                    description: "Cambio".to_string(),
                    amount: dec!(5000),
                    at: 1705925000000,
                },
            ],
        };
        let s = decode(&cash_closing(&closing, &ctx));
        assert!(s.contains("CIERRE DE CAJA"));
        assert!(s.contains("Fondo inicial"));
        assert!(s.contains("-$34.500"));
        assert!(s.contains("$5.000"));
        assert!(s.contains("Firma responsable"));
    }
}
