//! Printable document data model
//!
//! Plain, immutable value records handed to the generators. Everything
//! is constructed by the caller (order/fiscal lookup lives upstream)
//! and discarded once the byte stream exists; nothing here is mutated
//! or persisted by this crate. Timestamps travel as unix millis.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// How a modifier changes the base item
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ModifierKind {
    /// Leave an ingredient out. Always printed emphasized and
    /// upper-cased: a missed removal is a kitchen error, not a typo.
    Removal,
    Addition,
    Substitution,
    Other,
}

/// Line item modifier ("sin cebolla", "+ queso", ...)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Modifier {
    pub description: String,
    pub kind: ModifierKind,
}

/// One ordered product
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineItem {
    pub name: Option<String>,
    pub quantity: u32,
    pub note: Option<String>,
    pub modifiers: Vec<Modifier>,
    /// Unit price in currency units
    pub unit_price: Option<Decimal>,
    /// Line subtotal in currency units
    pub total: Option<Decimal>,
}

/// Service type of an order
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ServiceType {
    DineIn,
    Delivery,
    Takeaway,
}

/// Sales channel (overrides the service-type label when present)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SalesChannel {
    WebPropia,
    PedidosYa,
    Rappi,
}

/// Order-level totals (absent on food-prep tickets)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderTotals {
    pub subtotal: Decimal,
    pub discount: Option<Decimal>,
    pub discount_percent: Option<Decimal>,
    pub total: Decimal,
}

/// Order entity as printed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub number: u32,
    pub service: ServiceType,
    pub channel: Option<SalesChannel>,
    /// Caller/pager number announced at the counter
    pub caller_number: Option<u32>,
    pub customer_name: Option<String>,
    pub customer_phone: Option<String>,
    pub customer_address: Option<String>,
    /// Reference on the external platform (PedidosYa/Rappi order id)
    pub external_ref: Option<String>,
    /// Requested delivery time (unix millis)
    pub requested_at: Option<i64>,
    /// Creation timestamp (unix millis)
    pub created_at: i64,
    pub items: Vec<LineItem>,
    pub totals: Option<OrderTotals>,
}

/// Payment method (receipts and report breakdowns)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    Cash,
    Debit,
    Credit,
    QrWallet,
    Transfer,
}

/// Payment block data for a client receipt
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payment {
    pub method: PaymentMethod,
    pub paid: Decimal,
    pub change: Decimal,
}

/// Fiscal invoice letter class
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum InvoiceLetter {
    A,
    B,
    C,
}

impl InvoiceLetter {
    /// ARCA document-type code for an invoice of this letter
    pub fn invoice_code(self) -> u32 {
        match self {
            Self::A => 1,
            Self::B => 6,
            Self::C => 11,
        }
    }

    /// ARCA document-type code for a credit note of this letter
    pub fn credit_note_code(self) -> u32 {
        match self {
            Self::A => 3,
            Self::B => 8,
            Self::C => 13,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
        }
    }
}

/// Invoice issuer (the business)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Issuer {
    pub legal_name: String,
    /// Tax id, punctuated form ("30-12345678-9")
    pub cuit: String,
    /// Gross-revenue registration (IIBB)
    pub gross_income: String,
    pub tax_regime: String,
    pub address: String,
    /// Activity start date, display form
    pub activity_start: String,
}

/// Invoice recipient (the customer)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recipient {
    pub name: String,
    /// Document type label ("CUIT", "DNI", "CF")
    pub doc_type: String,
    pub doc_number: Option<String>,
    pub tax_regime: String,
}

/// Electronic fiscal invoice, CAE already granted
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FiscalInvoice {
    pub letter: InvoiceLetter,
    /// Legal document-type code (1/6/11 invoices, 3/8/13 credit notes)
    pub doc_code: u32,
    /// Composite number "NNNNN-NNNNNNNN" (point of sale + sequential)
    pub number: String,
    /// Issue date, ISO or DD/MM/YYYY display form
    pub issue_date: String,
    pub issuer: Issuer,
    pub recipient: Recipient,
    /// Taxable base
    pub net_amount: Decimal,
    pub vat_amount: Decimal,
    pub other_taxes: Decimal,
    /// VAT disclosed to the consumer (Ley 27.743 transparency block)
    pub vat_disclosed: Decimal,
    pub other_national_taxes: Decimal,
    /// Authorization code
    pub cae: String,
    /// Authorization expiry, display form
    pub cae_expiry: String,
    /// Pre-rendered ARCA QR bitmap (base64 PNG, no data-URL prefix)
    pub qr_png: Option<String>,
}

impl FiscalInvoice {
    pub fn is_credit_note(&self) -> bool {
        matches!(self.doc_code, 3 | 8 | 13)
    }
}

/// Totals of a fiscal period, already aggregated upstream.
///
/// Flat on purpose: each field maps to exactly one printed line in the
/// fixed section order (document counts, VAT brackets, totals, payment
/// methods).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PeriodTotals {
    // Document counts
    pub invoice_count: u32,
    pub invoice_total: Decimal,
    pub credit_note_count: u32,
    pub credit_note_total: Decimal,

    // VAT-rate brackets
    pub net_21: Decimal,
    pub vat_21: Decimal,
    pub net_10_5: Decimal,
    pub vat_10_5: Decimal,
    pub exempt: Decimal,
    pub untaxed: Decimal,

    // Period total
    pub total: Decimal,

    // Payment methods
    pub cash: Decimal,
    pub debit: Decimal,
    pub credit: Decimal,
    pub qr_wallet: Decimal,
    pub transfer: Decimal,
}

impl PeriodTotals {
    /// Fold another period in (audit aggregation across Z snapshots)
    pub fn accumulate(&mut self, other: &PeriodTotals) {
        self.invoice_count += other.invoice_count;
        self.invoice_total += other.invoice_total;
        self.credit_note_count += other.credit_note_count;
        self.credit_note_total += other.credit_note_total;
        self.net_21 += other.net_21;
        self.vat_21 += other.vat_21;
        self.net_10_5 += other.net_10_5;
        self.vat_10_5 += other.vat_10_5;
        self.exempt += other.exempt;
        self.untaxed += other.untaxed;
        self.total += other.total;
        self.cash += other.cash;
        self.debit += other.debit;
        self.credit += other.credit;
        self.qr_wallet += other.qr_wallet;
        self.transfer += other.transfer;
    }
}

/// Terminal daily closing. At most one per business day, `z_number`
/// strictly increasing; the sequence itself is managed upstream.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ZReport {
    pub z_number: u64,
    /// Business date being closed (unix millis)
    pub business_date: i64,
    /// Caller-supplied generation timestamp (unix millis)
    pub generated_at: i64,
    pub first_doc: Option<String>,
    pub last_doc: Option<String>,
    pub totals: PeriodTotals,
}

/// Range of Z closings for the audit report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditReport {
    pub from_date: i64,
    pub to_date: i64,
    pub days: Vec<ZReport>,
}

/// Cash register movement sign
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MovementKind {
    Income,
    Expense,
}

/// Manual cash movement (paid-in/paid-out)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CashMovement {
    pub kind: MovementKind,
    pub description: String,
    pub amount: Decimal,
    /// Unix millis
    pub at: i64,
}

/// Cash-register closing snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CashClosing {
    pub opened_at: i64,
    pub closed_at: i64,
    pub opening_amount: Decimal,
    pub closing_amount: Decimal,
    pub income_total: Decimal,
    pub expense_total: Decimal,
    pub movements: Vec<CashMovement>,
}

/// Redemption voucher (visually distinct from a receipt: no logo)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Voucher {
    pub code: String,
    pub detail: String,
    pub expires_at: Option<i64>,
}
