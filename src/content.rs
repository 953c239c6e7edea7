//! Content stream rendering: converts page contents into low-level PDF operators.

use crate::colour::{Colour, Paint};
use crate::font::encode_win_ansi;
use crate::page::{LineLayout, PageContents, ShapeLayout, SpanFont, SpanLayout};
use crate::units::Pt;
use std::io::Write;

// control point distance for approximating a quarter circle with a cubic bezier
const KAPPA: f32 = 0.552_284_8;

/// Renders page contents to a PDF content stream.
#[allow(clippy::write_with_newline)]
pub(crate) fn render_contents(contents: &[PageContents]) -> Result<Vec<u8>, std::io::Error> {
    let mut content: Vec<u8> = Vec::default();

    for page_content in contents.iter() {
        match page_content {
            PageContents::Text(spans) => render_text_spans(&mut content, spans)?,
            PageContents::Shape(shape) => render_shape(&mut content, shape)?,
            PageContents::Line(line) => render_line(&mut content, line)?,
        }
    }

    Ok(content)
}

#[allow(clippy::write_with_newline)]
fn render_text_spans(content: &mut Vec<u8>, spans: &[SpanLayout]) -> Result<(), std::io::Error> {
    let Some(first) = spans.first() else {
        return Ok(());
    };

    write!(content, "q\n")?;

    let mut current_font: SpanFont = first.font;
    let mut current_colour: Paint = first.colour;
    let mut char_spacing = Pt(0.0);
    let mut word_spacing = Pt(0.0);

    write_font(content, current_font)?;
    write_alpha(content, current_colour)?;
    write_colour(content, current_colour.colour, false)?;

    for span in spans.iter() {
        if span.font != current_font {
            current_font = span.font;
            write_font(content, current_font)?;
        }
        if span.colour != current_colour {
            current_colour = span.colour;
            write_alpha(content, current_colour)?;
            write_colour(content, current_colour.colour, false)?;
        }
        if span.char_spacing != char_spacing {
            char_spacing = span.char_spacing;
            write!(content, "{char_spacing} Tc\n")?;
        }
        if span.word_spacing != word_spacing {
            word_spacing = span.word_spacing;
            write!(content, "{word_spacing} Tw\n")?;
        }

        write!(content, "BT\n")?;
        write!(content, "{} {} Td\n", span.coords.0, span.coords.1)?;
        write!(content, "<")?;
        for byte in encode_win_ansi(&span.text) {
            write!(content, "{byte:02x}")?;
        }
        write!(content, "> Tj\n")?;
        write!(content, "ET\n")?;
    }

    write!(content, "Q\n")?;
    Ok(())
}

#[allow(clippy::write_with_newline)]
fn render_shape(content: &mut Vec<u8>, shape: &ShapeLayout) -> Result<(), std::io::Error> {
    write!(content, "q\n")?;
    // one graphics state is shared by fill and stroke; the fill's opacity wins
    if let Some(paint) = shape.fill.or(shape.stroke) {
        write_alpha(content, paint)?;
    }
    if let Some(fill) = shape.fill {
        write_colour(content, fill.colour, false)?;
    }
    if let Some(stroke) = shape.stroke {
        write_colour(content, stroke.colour, true)?;
        write!(content, "{} w\n", shape.line_width)?;
    }

    let PathBox { x, y, w, h } = PathBox::of(shape);
    let r = shape.radius.0.min(w / 2.0).min(h / 2.0).max(0.0);
    if r == 0.0 {
        write!(content, "{x} {y} {w} {h} re\n")?;
    } else {
        let k = r * KAPPA;
        let (right, top) = (x + w, y + h);
        write!(content, "{} {y} m\n", x + r)?;
        write!(content, "{} {y} l\n", right - r)?;
        write!(
            content,
            "{} {y} {right} {} {right} {} c\n",
            right - r + k,
            y + r - k,
            y + r
        )?;
        write!(content, "{right} {} l\n", top - r)?;
        write!(
            content,
            "{right} {} {} {top} {} {top} c\n",
            top - r + k,
            right - r + k,
            right - r
        )?;
        write!(content, "{} {top} l\n", x + r)?;
        write!(
            content,
            "{} {top} {x} {} {x} {} c\n",
            x + r - k,
            top - r + k,
            top - r
        )?;
        write!(content, "{x} {} l\n", y + r)?;
        write!(content, "{x} {} {} {y} {} {y} c\n", y + r - k, x + r - k, x + r)?;
        write!(content, "h\n")?;
    }

    let paint_op = match (shape.fill.is_some(), shape.stroke.is_some()) {
        (true, true) => "B",
        (true, false) => "f",
        (false, true) => "S",
        (false, false) => "n",
    };
    write!(content, "{paint_op}\n")?;
    write!(content, "Q\n")?;
    Ok(())
}

#[allow(clippy::write_with_newline)]
fn render_line(content: &mut Vec<u8>, line: &LineLayout) -> Result<(), std::io::Error> {
    write!(content, "q\n")?;
    write_alpha(content, line.colour)?;
    write_colour(content, line.colour.colour, true)?;
    write!(content, "{} w\n", line.width)?;
    write!(content, "{} {} m\n", line.from.0, line.from.1)?;
    write!(content, "{} {} l\n", line.to.0, line.to.1)?;
    write!(content, "S\n")?;
    write!(content, "Q\n")?;
    Ok(())
}

/// Plain `f32` view of a shape's rectangle, for writing path operators
struct PathBox {
    x: f32,
    y: f32,
    w: f32,
    h: f32,
}

impl PathBox {
    fn of(shape: &ShapeLayout) -> PathBox {
        PathBox {
            x: shape.rect.x1.0,
            y: shape.rect.y1.0,
            w: shape.rect.width().0,
            h: shape.rect.height().0,
        }
    }
}

#[allow(clippy::write_with_newline)]
fn write_font(content: &mut Vec<u8>, font: SpanFont) -> Result<(), std::io::Error> {
    write!(content, "/F{} {} Tf\n", font.font.index(), font.size)
}

#[allow(clippy::write_with_newline)]
fn write_alpha(content: &mut Vec<u8>, paint: Paint) -> Result<(), std::io::Error> {
    if paint.is_opaque() {
        return Ok(());
    }
    write!(content, "/GS{} gs\n", paint.alpha_key())
}

#[allow(clippy::write_with_newline)]
fn write_colour(content: &mut Vec<u8>, colour: Colour, stroke: bool) -> Result<(), std::io::Error> {
    match (colour, stroke) {
        (Colour::RGB { r, g, b }, false) => write!(content, "{r} {g} {b} rg\n"),
        (Colour::RGB { r, g, b }, true) => write!(content, "{r} {g} {b} RG\n"),
        (Colour::CMYK { c, m, y, k }, false) => write!(content, "{c} {m} {y} {k} k\n"),
        (Colour::CMYK { c, m, y, k }, true) => write!(content, "{c} {m} {y} {k} K\n"),
        (Colour::Grey { g }, false) => write!(content, "{g} g\n"),
        (Colour::Grey { g }, true) => write!(content, "{g} G\n"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colour::colours;
    use crate::font::BuiltinFont;
    use crate::rect;

    fn rendered(contents: &[PageContents]) -> String {
        String::from_utf8(render_contents(contents).expect("renders")).expect("ascii output")
    }

    #[test]
    fn text_is_hex_encoded_with_spacing_operators() {
        let out = rendered(&[PageContents::Text(vec![SpanLayout {
            text: "Hi".into(),
            font: SpanFont {
                font: BuiltinFont::HelveticaBold,
                size: Pt(16.0),
            },
            colour: colours::BLACK.into(),
            coords: (Pt(50.0), Pt(700.0)),
            char_spacing: Pt(1.0),
            word_spacing: Pt(0.0),
        }])]);

        assert!(out.contains("/F1 16 Tf\n"));
        assert!(out.contains("0 g\n"));
        assert!(out.contains("1 Tc\n"));
        assert!(!out.contains("Tw\n"));
        assert!(out.contains("50 700 Td\n<4869> Tj\n"));
    }

    #[test]
    fn translucent_rounded_shapes_select_a_graphics_state() {
        let out = rendered(&[PageContents::Shape(ShapeLayout {
            rect: rect::Rect::from_xywh(Pt(10.0), Pt(10.0), Pt(40.0), Pt(20.0)),
            radius: Pt(8.0),
            fill: Some(Paint::new(colours::CHIP_GREY, 0.3)),
            stroke: Some(Paint::new(colours::CHIP_GREY, 0.3)),
            line_width: Pt(1.0),
        })]);

        assert!(out.contains("/GS300 gs\n"));
        assert!(out.contains("18 10 m\n"));
        assert!(out.contains(" c\n"));
        assert!(out.trim_end().ends_with("B\nQ"));
    }

    #[test]
    fn square_corners_use_the_rectangle_operator() {
        let out = rendered(&[PageContents::Shape(ShapeLayout {
            rect: rect::Rect::from_xywh(Pt(0.0), Pt(832.0), Pt(595.0), Pt(10.0)),
            radius: Pt(0.0),
            fill: Some(colours::BLACK.into()),
            stroke: None,
            line_width: Pt(1.0),
        })]);

        assert!(out.contains("0 832 595 10 re\nf\n"));
        assert!(!out.contains("gs"));
    }
}
