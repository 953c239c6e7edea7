use crate::pagesize::{self, PageSize};
use crate::units::Pt;
use crate::Error;

/// The fixed physical layout of every page in a document: its size, a uniform
/// margin on all four sides, and the baseline-to-baseline distance used when
/// advancing the layout cursor.
///
/// Geometry is validated on construction and never changes afterwards, so the
/// flow engine can rely on there always being room between the margins.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PageGeometry {
    width: Pt,
    height: Pt,
    margin: Pt,
    line_spacing: Pt,
}

impl PageGeometry {
    pub const DEFAULT_MARGIN: Pt = Pt(50.0);
    pub const DEFAULT_LINE_SPACING: Pt = Pt(15.0);

    /// Create a new geometry, checking that the margins leave a usable content area
    pub fn new(size: PageSize, margin: Pt, line_spacing: Pt) -> Result<PageGeometry, Error> {
        let (width, height) = size;
        let values = [width, height, margin, line_spacing];
        if values.iter().any(|v| !v.is_finite() || *v < Pt(0.0)) {
            return Err(Error::InvalidGeometry(format!(
                "dimensions must be finite and non-negative, got {width}x{height}, margin {margin}, line spacing {line_spacing}"
            )));
        }
        if margin * 2.0 >= width || margin * 2.0 >= height {
            return Err(Error::InvalidGeometry(format!(
                "margin {margin} leaves no room on a {width}x{height} page"
            )));
        }
        if line_spacing <= Pt(0.0) {
            return Err(Error::InvalidGeometry("line spacing must be positive".into()));
        }

        Ok(PageGeometry {
            width,
            height,
            margin,
            line_spacing,
        })
    }

    pub fn width(&self) -> Pt {
        self.width
    }

    pub fn height(&self) -> Pt {
        self.height
    }

    pub fn margin(&self) -> Pt {
        self.margin
    }

    pub fn line_spacing(&self) -> Pt {
        self.line_spacing
    }

    pub fn size(&self) -> PageSize {
        (self.width, self.height)
    }

    /// Where the cursor is placed at the top of every page after the first
    pub fn top(&self) -> Pt {
        self.height - self.margin
    }

    /// Horizontal room between the left and right margins
    pub fn usable_width(&self) -> Pt {
        self.width - self.margin * 2.0
    }

    /// Vertical room between the top and bottom margins
    pub fn body_height(&self) -> Pt {
        self.height - self.margin * 2.0
    }
}

impl Default for PageGeometry {
    /// ISO A4 with 50pt margins and 15pt line spacing
    fn default() -> Self {
        PageGeometry {
            width: pagesize::A4.0,
            height: pagesize::A4.1,
            margin: Self::DEFAULT_MARGIN,
            line_spacing: Self::DEFAULT_LINE_SPACING,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derived_measurements() {
        let geometry = PageGeometry::new((Pt(595.0), Pt(842.0)), Pt(50.0), Pt(15.0)).unwrap();
        assert_eq!(geometry.top(), Pt(792.0));
        assert_eq!(geometry.usable_width(), Pt(495.0));
        assert_eq!(geometry.body_height(), Pt(742.0));
    }

    #[test]
    fn rejects_margins_that_swallow_the_page() {
        let err = PageGeometry::new((Pt(100.0), Pt(842.0)), Pt(50.0), Pt(15.0)).unwrap_err();
        assert!(matches!(err, Error::InvalidGeometry(_)));
    }

    #[test]
    fn rejects_non_positive_line_spacing() {
        assert!(PageGeometry::new(pagesize::A4, Pt(50.0), Pt(0.0)).is_err());
        assert!(PageGeometry::new(pagesize::A4, Pt(-1.0), Pt(15.0)).is_err());
        assert!(PageGeometry::new(pagesize::A4, Pt(f32::NAN), Pt(15.0)).is_err());
    }
}
