//! Kitchen ticket generators
//!
//! Food-prep documents: no prices, oversized order number, removals
//! emphasized. Station tickets receive the pre-filtered item subset
//! (routing happens upstream) and are stamped with the station name.

use comanda_printer::EscPosBuilder;

use super::{TicketContext, banner, compose, delivery_block, items_block, order_header};
use crate::models::{LineItem, Order};

/// Full kitchen ticket: every item, no prices.
pub fn kitchen_ticket(order: &Order, ctx: &TicketContext) -> String {
    compose(ctx, |b| {
        banner(b, "COCINA");
        order_header(b, order, ctx);
        items_block(b, &order.items, false);
    })
}

/// Station-scoped kitchen ticket: one prep station's subset of the
/// order, stamped with the station name.
pub fn kitchen_ticket_station(
    order: &Order,
    station: &str,
    items: &[LineItem],
    ctx: &TicketContext,
) -> String {
    compose(ctx, |b| {
        banner(b, "COCINA");
        station_stamp(b, station);
        order_header(b, order, ctx);
        items_block(b, items, false);
    })
}

/// Delivery kitchen ticket: adds the delivery block and an optional
/// tracking QR (already rendered to a base64 PNG by the caller).
pub fn kitchen_ticket_delivery(
    order: &Order,
    tracking_png: Option<&str>,
    ctx: &TicketContext,
) -> String {
    compose(ctx, |b| {
        banner(b, "COCINA DELIVERY");
        order_header(b, order, ctx);
        delivery_block(b, order, ctx);
        items_block(b, &order.items, false);
        if let Some(png) = tracking_png {
            b.newline();
            b.align_center();
            b.bitmap(png);
            b.align_left();
        }
    })
}

fn station_stamp(b: &mut EscPosBuilder, station: &str) {
    b.align_center();
    b.bold_on();
    b.line(&format!("[ {} ]", station.to_uppercase()));
    b.bold_off();
    b.align_left();
    b.newline();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::documents::test_support::{burger_order, decode};
    use crate::models::ServiceType;

    #[test]
    fn test_kitchen_ticket_has_no_prices() {
        let ctx = TicketContext::new("Sucursal Centro", 80);
        let s = decode(&kitchen_ticket(&burger_order(), &ctx));
        assert!(s.contains("COCINA"));
        assert!(s.contains("#042"));
        assert!(s.contains("2x Burger"));
        assert!(s.contains("1x Papas"));
        assert!(!s.contains('$'));
    }

    #[test]
    fn test_removal_modifier_emphasized_uppercase() {
        let ctx = TicketContext::new("Sucursal Centro", 80);
        let s = decode(&kitchen_ticket(&burger_order(), &ctx));
        // bold-on, upper-cased removal, bold-off
        assert!(s.contains("\u{1B}E\u{1}   SIN CEBOLLA\n\u{1B}E\u{0}"));
        assert!(!s.contains("sin cebolla"));
    }

    #[test]
    fn test_width_threading() {
        let order = burger_order();
        let wide = decode(&kitchen_ticket(&order, &TicketContext::new("X", 80)));
        let narrow = decode(&kitchen_ticket(&order, &TicketContext::new("X", 58)));
        assert!(wide.contains(&"-".repeat(42)));
        assert!(narrow.contains(&"-".repeat(32)));
        assert!(!narrow.contains(&"-".repeat(42)));
    }

    #[test]
    fn test_station_ticket_stamp_and_subset() {
        let order = burger_order();
        let subset = vec![order.items[1].clone()];
        let ctx = TicketContext::new("Sucursal Centro", 80);
        let s = decode(&kitchen_ticket_station(&order, "Freidora", &subset, &ctx));
        assert!(s.contains("[ FREIDORA ]"));
        assert!(s.contains("1x Papas"));
        assert!(!s.contains("Burger"));
    }

    #[test]
    fn test_delivery_ticket_block_and_qr() {
        let mut order = burger_order();
        order.service = ServiceType::Delivery;
        order.customer_name = Some("Ana Paz".to_string());
        order.customer_address = Some("Olazabal 950".to_string());
        order.customer_phone = Some("11-5555-0000".to_string());
        order.requested_at = Some(order.created_at);
        let ctx = TicketContext::new("Sucursal Centro", 58);
        let s = decode(&kitchen_ticket_delivery(&order, Some("dHJhY2s="), &ctx));
        assert!(s.contains("COCINA DELIVERY"));
        assert!(s.contains("Nombre: Ana Paz"));
        assert!(s.contains("Direccion: Olazabal 950"));
        assert!(s.contains("Tel: 11-5555-0000"));
        assert!(s.contains("__BITMAP_B64:dHJhY2s=:END__"));
    }

    #[test]
    fn test_empty_order_still_cuts() {
        let mut order = burger_order();
        order.items.clear();
        let ctx = TicketContext::new("Sucursal Centro", 58);
        let s = decode(&kitchen_ticket(&order, &ctx));
        assert!(s.ends_with("\u{1D}VA\u{3}"));
    }

    #[test]
    fn test_missing_item_name_placeholder() {
        let mut order = burger_order();
        order.items[0].name = None;
        let ctx = TicketContext::new("Sucursal Centro", 80);
        let s = decode(&kitchen_ticket(&order, &ctx));
        assert!(s.contains("2x Producto"));
    }
}
