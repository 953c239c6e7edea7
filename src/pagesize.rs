//! Pre-defined page sizes for common paper formats.
//!
//! All sizes are provided in portrait orientation (width, height) where width ≤ height.
//!
//! # Example
//!
//! ```
//! use resume_pdf::pagesize::{self, A4};
//!
//! let (width, height) = A4;
//! assert!(width < height);
//! assert_eq!(pagesize::by_name("letter"), Some(pagesize::LETTER));
//! ```

use crate::units::*;

/// Page dimensions as (width, height) in points.
pub type PageSize = (Pt, Pt);

// north american sizes
pub const LETTER: PageSize = (Pt(8.5 * 72.0), Pt(11.0 * 72.0));
pub const LEGAL: PageSize = (Pt(8.5 * 72.0), Pt(13.0 * 72.0));

// iso a-series (converted from mm to points)
pub const A4: PageSize = (Pt(210.0 * 72.0 / 25.4), Pt(297.0 * 72.0 / 25.4));
pub const A5: PageSize = (Pt(148.0 * 72.0 / 25.4), Pt(210.0 * 72.0 / 25.4));

/// Look up a page size by its common name, ignoring case
pub fn by_name(name: &str) -> Option<PageSize> {
    match name.to_ascii_lowercase().as_str() {
        "a4" => Some(A4),
        "a5" => Some(A5),
        "letter" => Some(LETTER),
        "legal" => Some(LEGAL),
        _ => None,
    }
}
