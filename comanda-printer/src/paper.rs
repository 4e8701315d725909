//! Paper-width contract
//!
//! Callers speak in millimeters (the physical roll), the builder speaks
//! in character columns. Only two widths exist; anything else degrades
//! to the narrow layout instead of failing.

/// Physical paper width of the target printer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaperWidth {
    /// 80mm roll, 42 printable columns
    Mm80,
    /// 58mm roll, 32 printable columns
    Mm58,
}

impl PaperWidth {
    /// Map a caller-supplied millimeter value to a paper width.
    ///
    /// Unrecognized values fall back to the narrower 58mm layout so a
    /// misconfigured terminal still prints a readable ticket.
    pub fn from_mm(mm: u32) -> Self {
        match mm {
            80 => Self::Mm80,
            _ => Self::Mm58,
        }
    }

    /// Printable columns for this paper width.
    pub fn columns(self) -> usize {
        match self {
            Self::Mm80 => 42,
            Self::Mm58 => 32,
        }
    }
}

impl Default for PaperWidth {
    fn default() -> Self {
        Self::Mm58
    }
}
