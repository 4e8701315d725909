//! Fiscal QR payload encoding (ARCA) and QR image rendering
//!
//! The payload format is fixed by the tax authority: key names, key
//! order and numeric-vs-string typing must match exactly or the
//! verification app rejects the code. The serde struct's declaration
//! order is the wire order - do not reorder fields.
//!
//! Rendering the payload to a PNG is the one async seam of the whole
//! subsystem. It is a trait so callers (and tests) can substitute the
//! external service; a failure leaves the receipt printable without its
//! QR block.

use async_trait::async_trait;
use base64::{Engine as _, engine::general_purpose::STANDARD};
use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use crate::error::{QrError, QrResult};
use crate::format::round_money;
use crate::models::FiscalInvoice;

/// Fixed URL template mandated by the authority
pub const ARCA_QR_URL: &str = "https://www.afip.gob.ar/fe/qr/?p=";

/// Recipient document-type code for a CUIT
const DOC_TYPE_CUIT: u32 = 80;
/// Recipient document-type code for anything else ("consumidor final")
const DOC_TYPE_OTHER: u32 = 99;

/// ARCA QR payload, field order fixed by the authority spec
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ArcaQrPayload {
    pub ver: u8,
    /// Invoice date, `YYYY-MM-DD`
    pub fecha: String,
    /// Issuer tax id, digits only
    pub cuit: u64,
    #[serde(rename = "ptoVta")]
    pub pto_vta: u32,
    #[serde(rename = "tipoCmp")]
    pub tipo_cmp: u32,
    #[serde(rename = "nroCmp")]
    pub nro_cmp: u64,
    pub importe: f64,
    pub moneda: String,
    pub ctz: u8,
    #[serde(rename = "tipoDocRec")]
    pub tipo_doc_rec: u32,
    #[serde(rename = "nroDocRec")]
    pub nro_doc_rec: u64,
    #[serde(rename = "tipoCodAut")]
    pub tipo_cod_aut: String,
    #[serde(rename = "codAut")]
    pub cod_aut: u64,
}

impl ArcaQrPayload {
    /// Build the payload from an invoice.
    ///
    /// Malformed inputs degrade to documented placeholders (zeroed
    /// numbers, epoch date) instead of failing: a broken QR must never
    /// block printing the legally-required document.
    pub fn from_invoice(invoice: &FiscalInvoice) -> Self {
        let (pto_vta, nro_cmp) = parse_composite_number(&invoice.number);
        let total = round_money(invoice.net_amount + invoice.vat_amount + invoice.other_taxes);
        let tipo_doc_rec = if invoice.recipient.doc_type.eq_ignore_ascii_case("CUIT") {
            DOC_TYPE_CUIT
        } else {
            DOC_TYPE_OTHER
        };
        let nro_doc_rec = invoice
            .recipient
            .doc_number
            .as_deref()
            .map(parse_digits)
            .unwrap_or(0);

        Self {
            ver: 1,
            fecha: normalize_date(&invoice.issue_date),
            cuit: parse_digits(&invoice.issuer.cuit),
            pto_vta,
            tipo_cmp: invoice.doc_code,
            nro_cmp,
            importe: total.to_f64().unwrap_or(0.0),
            moneda: "PES".to_string(),
            ctz: 1,
            tipo_doc_rec,
            nro_doc_rec,
            tipo_cod_aut: "E".to_string(),
            cod_aut: parse_digits(&invoice.cae),
        }
    }
}

/// Build the full verification URL for an invoice:
/// `https://www.afip.gob.ar/fe/qr/?p=<base64(JSON)>`
pub fn arca_qr_url(invoice: &FiscalInvoice) -> String {
    let payload = ArcaQrPayload::from_invoice(invoice);
    let json = match serde_json::to_string(&payload) {
        Ok(json) => json,
        Err(e) => {
            warn!(error = %e, "ARCA payload serialization failed");
            String::new()
        }
    };
    format!("{}{}", ARCA_QR_URL, STANDARD.encode(json))
}

/// Split "NNNNN-NNNNNNNN" into (point of sale, document number).
/// Malformed input degrades to (0, 0).
fn parse_composite_number(number: &str) -> (u32, u64) {
    let Some((pos, seq)) = number.split_once('-') else {
        warn!(number, "malformed composite invoice number");
        return (0, 0);
    };
    match (pos.trim().parse::<u32>(), seq.trim().parse::<u64>()) {
        (Ok(p), Ok(s)) => (p, s),
        _ => {
            warn!(number, "malformed composite invoice number");
            (0, 0)
        }
    }
}

/// Strip punctuation and parse the remaining digits; 0 when none parse
fn parse_digits(s: &str) -> u64 {
    let digits: String = s.chars().filter(|c| c.is_ascii_digit()).collect();
    digits.parse().unwrap_or(0)
}

/// Normalize a display date to `YYYY-MM-DD`; epoch on unparseable input
fn normalize_date(s: &str) -> String {
    let candidate = s.trim();
    let head = candidate.get(..10).unwrap_or(candidate);
    for (input, fmt) in [
        (head, "%Y-%m-%d"),
        (candidate, "%d/%m/%Y"),
        (candidate, "%Y-%m-%d"),
    ] {
        if let Ok(d) = NaiveDate::parse_from_str(input, fmt) {
            return d.format("%Y-%m-%d").to_string();
        }
    }
    warn!(date = candidate, "unparseable invoice date");
    "1970-01-01".to_string()
}

// ============================================================================
// QR image rendering (external dependency seam)
// ============================================================================

/// Rendering options passed to the external QR service
#[derive(Debug, Clone)]
pub struct QrOptions {
    /// Error-correction level ("M" for fiscal codes)
    pub error_correction: &'static str,
    /// Output size in pixels (square)
    pub size: u32,
}

impl Default for QrOptions {
    fn default() -> Self {
        Self {
            error_correction: "M",
            size: 256,
        }
    }
}

/// External QR image renderer.
///
/// Takes the encoded content and returns a PNG data URL
/// (`data:image/png;base64,...`).
#[async_trait]
pub trait QrRenderer: Send + Sync {
    async fn render(&self, content: &str, opts: &QrOptions) -> QrResult<String>;
}

/// `QrRenderer` backed by an HTTP render endpoint
pub struct HttpQrRenderer {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpQrRenderer {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl QrRenderer for HttpQrRenderer {
    #[instrument(skip(self, content), fields(content_len = content.len()))]
    async fn render(&self, content: &str, opts: &QrOptions) -> QrResult<String> {
        let size = format!("{}x{}", opts.size, opts.size);
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("data", content),
                ("size", &size),
                ("ecc", opts.error_correction),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(QrError::Service(response.status().to_string()));
        }

        let bytes = response.bytes().await?;
        if bytes.is_empty() {
            return Err(QrError::InvalidImage);
        }
        debug!(bytes = bytes.len(), "QR image rendered");
        Ok(format!("data:image/png;base64,{}", STANDARD.encode(&bytes)))
    }
}

/// Strip the `data:image/png;base64,` prefix from a data URL
fn strip_data_url(data_url: &str) -> QrResult<String> {
    match data_url.split_once("base64,") {
        Some((_, b64)) if !b64.is_empty() => Ok(b64.to_string()),
        _ => Err(QrError::InvalidImage),
    }
}

/// Render the ARCA verification QR for an invoice.
///
/// Returns the bare base64 PNG ready for a bitmap marker. Callers treat
/// failure as a soft warning and print without the QR block.
pub async fn render_invoice_qr(
    invoice: &FiscalInvoice,
    renderer: &dyn QrRenderer,
) -> QrResult<String> {
    let url = arca_qr_url(invoice);
    let data_url = renderer.render(&url, &QrOptions::default()).await?;
    strip_data_url(&data_url)
}

/// Render a delivery-tracking QR for a plain URL (no fixed schema)
pub async fn render_tracking_qr(url: &str, renderer: &dyn QrRenderer) -> QrResult<String> {
    let data_url = renderer.render(url, &QrOptions::default()).await?;
    strip_data_url(&data_url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{InvoiceLetter, Issuer, Recipient};
    use rust_decimal_macros::dec;

    fn sample_invoice() -> FiscalInvoice {
        FiscalInvoice {
            letter: InvoiceLetter::B,
            doc_code: InvoiceLetter::B.invoice_code(),
            number: "00001-00000042".to_string(),
            issue_date: "2025-08-12".to_string(),
            issuer: Issuer {
                legal_name: "La Comanda SRL".to_string(),
                cuit: "30-12345678-9".to_string(),
                gross_income: "901-123456-7".to_string(),
                tax_regime: "Responsable Inscripto".to_string(),
                address: "Av. Corrientes 1234, CABA".to_string(),
                activity_start: "01/03/2019".to_string(),
            },
            recipient: Recipient {
                name: "Consumidor Final".to_string(),
                doc_type: "CF".to_string(),
                doc_number: None,
                tax_regime: "Consumidor Final".to_string(),
            },
            net_amount: dec!(2066.12),
            vat_amount: dec!(433.88),
            other_taxes: dec!(0),
            vat_disclosed: dec!(433.88),
            other_national_taxes: dec!(0),
            cae: "12345678901234".to_string(),
            cae_expiry: "22/08/2025".to_string(),
            qr_png: None,
        }
    }

    #[test]
    fn test_payload_fields() {
        let p = ArcaQrPayload::from_invoice(&sample_invoice());
        assert_eq!(p.ver, 1);
        assert_eq!(p.fecha, "2025-08-12");
        assert_eq!(p.cuit, 30123456789);
        assert_eq!(p.pto_vta, 1);
        assert_eq!(p.tipo_cmp, 6);
        assert_eq!(p.nro_cmp, 42);
        assert_eq!(p.importe, 2500.0);
        assert_eq!(p.moneda, "PES");
        assert_eq!(p.ctz, 1);
        assert_eq!(p.tipo_doc_rec, 99);
        assert_eq!(p.nro_doc_rec, 0);
        assert_eq!(p.tipo_cod_aut, "E");
        assert_eq!(p.cod_aut, 12345678901234);
    }

    #[test]
    fn test_payload_key_order() {
        let p = ArcaQrPayload::from_invoice(&sample_invoice());
        let json = serde_json::to_string(&p).unwrap();
        let key_positions: Vec<usize> = [
            "\"ver\"",
            "\"fecha\"",
            "\"cuit\"",
            "\"ptoVta\"",
            "\"tipoCmp\"",
            "\"nroCmp\"",
            "\"importe\"",
            "\"moneda\"",
            "\"ctz\"",
            "\"tipoDocRec\"",
            "\"nroDocRec\"",
            "\"tipoCodAut\"",
            "\"codAut\"",
        ]
        .iter()
        .map(|k| json.find(k).unwrap())
        .collect();
        assert!(key_positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_url_embeds_payload() {
        let invoice = sample_invoice();
        let url = arca_qr_url(&invoice);
        assert!(url.starts_with(ARCA_QR_URL));
        let b64 = &url[ARCA_QR_URL.len()..];
        let decoded = STANDARD.decode(b64).unwrap();
        let round: ArcaQrPayload = serde_json::from_slice(&decoded).unwrap();
        assert_eq!(round, ArcaQrPayload::from_invoice(&invoice));
    }

    #[test]
    fn test_cuit_recipient() {
        let mut invoice = sample_invoice();
        invoice.recipient.doc_type = "CUIT".to_string();
        invoice.recipient.doc_number = Some("30-99999999-7".to_string());
        let p = ArcaQrPayload::from_invoice(&invoice);
        assert_eq!(p.tipo_doc_rec, 80);
        assert_eq!(p.nro_doc_rec, 30999999997);
    }

    #[test]
    fn test_degraded_composite_and_date() {
        let mut invoice = sample_invoice();
        invoice.number = "garbage".to_string();
        invoice.issue_date = "not a date".to_string();
        let p = ArcaQrPayload::from_invoice(&invoice);
        assert_eq!((p.pto_vta, p.nro_cmp), (0, 0));
        assert_eq!(p.fecha, "1970-01-01");
    }

    #[test]
    fn test_normalize_date_formats() {
        assert_eq!(normalize_date("12/08/2025"), "2025-08-12");
        assert_eq!(normalize_date("2025-08-12"), "2025-08-12");
        assert_eq!(normalize_date("2025-08-12T14:00:00"), "2025-08-12");
    }

    struct FakeRenderer;

    #[async_trait]
    impl QrRenderer for FakeRenderer {
        async fn render(&self, _content: &str, _opts: &QrOptions) -> QrResult<String> {
            Ok("data:image/png;base64,cG5nLWJ5dGVz".to_string())
        }
    }

    struct FailingRenderer;

    #[async_trait]
    impl QrRenderer for FailingRenderer {
        async fn render(&self, _content: &str, _opts: &QrOptions) -> QrResult<String> {
            Err(QrError::Service("503 Service Unavailable".to_string()))
        }
    }

    #[tokio::test]
    async fn test_render_invoice_qr_strips_prefix() {
        let png = render_invoice_qr(&sample_invoice(), &FakeRenderer)
            .await
            .unwrap();
        assert_eq!(png, "cG5nLWJ5dGVz");
    }

    #[tokio::test]
    async fn test_render_failure_is_recoverable() {
        let res = render_tracking_qr("https://example.com/t/1", &FailingRenderer).await;
        assert!(res.is_err());
    }
}
