//! ESC/POS command builder
//!
//! Provides a fluent API for building ESC/POS print data.

use base64::{Engine as _, engine::general_purpose::STANDARD};
use tracing::debug;

use crate::encoding::{encode_cp1252, text_width, truncate_cp1252};
use crate::paper::PaperWidth;

/// Opening token of the bitmap marker sub-protocol.
///
/// The byte stream is binary ESC/POS except for this ASCII marker, which
/// the Print Bridge replaces with a `GS v 0` raster sequence before
/// transmission. Bridges without bitmap support print it as literal
/// text; that degradation is accepted. The literal is a frozen
/// compatibility contract - changing it is a breaking protocol change.
pub const BITMAP_MARKER_START: &str = "__BITMAP_B64:";
/// Closing token of the bitmap marker sub-protocol.
pub const BITMAP_MARKER_END: &str = ":END__";

/// ESC/POS command builder
///
/// Builds ESC/POS byte sequences for thermal printers. All text goes
/// through the lossy CP-1252 transform, one byte per character.
///
/// Every operation appends and returns `&mut Self`; nothing validates
/// and nothing fails. A malformed layout degrades (empty separator,
/// truncated column) instead of blocking a sale.
pub struct EscPosBuilder {
    buf: Vec<u8>,
    width: usize,
}

impl EscPosBuilder {
    /// Create a new builder for the given paper width.
    ///
    /// Emits the printer reset (ESC @) followed by code page selection
    /// (ESC t 16, Windows-1252) so Spanish diacritics render correctly.
    pub fn new(paper: PaperWidth) -> Self {
        let mut buf = Vec::with_capacity(4096);
        // Initialize printer (ESC @)
        buf.extend_from_slice(&[0x1B, 0x40]);
        // Select CP-1252 code page (ESC t 16)
        buf.extend_from_slice(&[0x1B, 0x74, 0x10]);
        Self {
            buf,
            width: paper.columns(),
        }
    }

    /// Get the configured paper width in columns
    pub fn width(&self) -> usize {
        self.width
    }

    // === Text Output ===

    /// Write raw text (lossy CP-1252, `?` for out-of-range chars)
    pub fn text(&mut self, s: &str) -> &mut Self {
        self.buf.extend(s.chars().map(encode_cp1252));
        self
    }

    /// Write text followed by newline
    pub fn line(&mut self, s: &str) -> &mut Self {
        self.text(s);
        self.buf.push(b'\n');
        self
    }

    /// Write empty line
    pub fn newline(&mut self) -> &mut Self {
        self.buf.push(b'\n');
        self
    }

    /// Feed n lines (ESC d n)
    pub fn feed(&mut self, lines: u8) -> &mut Self {
        self.buf.extend_from_slice(&[0x1B, 0x64, lines]);
        self
    }

    // === Alignment ===

    /// Align text to left (default)
    pub fn align_left(&mut self) -> &mut Self {
        self.buf.extend_from_slice(&[0x1B, 0x61, 0x00]);
        self
    }

    /// Align text to center
    pub fn align_center(&mut self) -> &mut Self {
        self.buf.extend_from_slice(&[0x1B, 0x61, 0x01]);
        self
    }

    /// Align text to right
    pub fn align_right(&mut self) -> &mut Self {
        self.buf.extend_from_slice(&[0x1B, 0x61, 0x02]);
        self
    }

    // === Text Style ===

    /// Enable emphasized (bold) text
    pub fn bold_on(&mut self) -> &mut Self {
        self.buf.extend_from_slice(&[0x1B, 0x45, 0x01]);
        self
    }

    /// Disable emphasized text
    pub fn bold_off(&mut self) -> &mut Self {
        self.buf.extend_from_slice(&[0x1B, 0x45, 0x00]);
        self
    }

    /// Enable underline
    pub fn underline_on(&mut self) -> &mut Self {
        self.buf.extend_from_slice(&[0x1D, 0x2D, 0x01]);
        self
    }

    /// Disable underline
    pub fn underline_off(&mut self) -> &mut Self {
        self.buf.extend_from_slice(&[0x1D, 0x2D, 0x00]);
        self
    }

    /// Double width and height
    pub fn size_double(&mut self) -> &mut Self {
        self.buf.extend_from_slice(&[0x1D, 0x21, 0x11]);
        self
    }

    /// Double height only
    pub fn size_double_height(&mut self) -> &mut Self {
        self.buf.extend_from_slice(&[0x1D, 0x21, 0x01]);
        self
    }

    /// Double width only
    pub fn size_double_width(&mut self) -> &mut Self {
        self.buf.extend_from_slice(&[0x1D, 0x21, 0x10]);
        self
    }

    /// Reset to normal size
    pub fn size_normal(&mut self) -> &mut Self {
        self.buf.extend_from_slice(&[0x1D, 0x21, 0x00]);
        self
    }

    // === Layout Helpers ===

    /// Print a full-width line of a repeated character
    pub fn separator(&mut self, ch: char) -> &mut Self {
        let s = ch.to_string().repeat(self.width);
        self.line(&s)
    }

    /// Print left and right text on the same line
    ///
    /// The right value is always preserved in full; the left column is
    /// truncated when both plus one space exceed the paper width. The
    /// gap is padded with spaces (minimum one), so the printed line is
    /// exactly `width` characters.
    pub fn line_lr(&mut self, left: &str, right: &str) -> &mut Self {
        let lw = text_width(left);
        let rw = text_width(right);

        if lw + rw + 1 > self.width {
            let avail = self.width.saturating_sub(rw + 1);
            let left_cut = truncate_cp1252(left, avail);
            let gap = self.width.saturating_sub(text_width(&left_cut) + rw).max(1);
            self.text(&left_cut);
            self.text(&" ".repeat(gap));
            self.line(right);
        } else {
            let gap = self.width - lw - rw;
            self.text(left);
            self.text(&" ".repeat(gap));
            self.line(right);
        }
        self
    }

    // === Bitmap Marker ===

    /// Embed a base64 PNG as a bitmap marker
    ///
    /// Appends `__BITMAP_B64:<base64>:END__` as literal ASCII bytes for
    /// the Print Bridge to resolve into raster commands.
    pub fn bitmap(&mut self, base64_png: &str) -> &mut Self {
        debug!(bytes = base64_png.len(), "embedding bitmap marker");
        self.buf.extend_from_slice(BITMAP_MARKER_START.as_bytes());
        self.buf.extend_from_slice(base64_png.as_bytes());
        self.buf.extend_from_slice(BITMAP_MARKER_END.as_bytes());
        self.buf.push(b'\n');
        self
    }

    // === Paper Control ===

    /// Feed 3 lines then cut (GS V A 3)
    pub fn cut(&mut self) -> &mut Self {
        self.buf.extend_from_slice(&[0x1D, 0x56, 0x41, 0x03]);
        self
    }

    // === Raw Commands ===

    /// Write raw bytes directly
    pub fn raw(&mut self, bytes: &[u8]) -> &mut Self {
        self.buf.extend_from_slice(bytes);
        self
    }

    // === Build ===

    /// Consume the builder and return the raw byte stream
    pub fn build(self) -> Vec<u8> {
        self.buf
    }

    /// Consume the builder and return the transport-safe base64 stream
    pub fn to_base64(self) -> String {
        STANDARD.encode(&self.buf)
    }
}

impl Default for EscPosBuilder {
    fn default() -> Self {
        Self::new(PaperWidth::Mm58)
    }
}
