//! A plotters backend that records drawing calls as PDF vector operators.
//!
//! Device coordinates are a `dpi`-resolution pixel grid (y pointing down), the
//! same grid a bitmap of that resolution would use; every operator is scaled
//! into PDF points on the way out so layouts computed for one backend carry
//! over to the other. Text is set in the standard Helvetica faces, which need
//! no embedding, and is measured with [`super::helvetica`].

use super::helvetica;
use chrono::{Datelike, Local, Timelike};
use pdf_writer::{Content, Date, Finish, Name, Pdf, Rect, Ref, Str, TextStr};
use plotters_backend::text_anchor::{HPos, VPos};
use plotters_backend::{
    BackendColor, BackendCoord, BackendStyle, BackendTextStyle, DrawingBackend, DrawingErrorKind,
    FontStyle, FontTransform,
};
use std::collections::BTreeSet;
use std::io;
use std::path::{Path, PathBuf};

const REGULAR: &[u8] = b"F1";
const BOLD: &[u8] = b"F2";

const ASCENT: f64 = 0.72;
const DESCENT: f64 = 0.21;

/// Control-point distance for a quarter circle drawn as one cubic.
const KAPPA: f64 = 0.552_284_75;

pub struct PdfBackend {
    path: PathBuf,
    size: (u32, u32),
    dpi: u32,
    content: Content,
    stream: Vec<u8>,
    alphas: BTreeSet<u8>,
}

impl PdfBackend {
    pub fn new<P: AsRef<Path>>(path: P, size: (u32, u32), dpi: u32) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            size,
            dpi: dpi.max(1),
            content: Content::new(),
            stream: Vec::new(),
            alphas: BTreeSet::new(),
        }
    }

    fn scale(&self) -> f64 {
        72.0 / self.dpi as f64
    }

    /// Page size in points.
    pub fn page_size(&self) -> (f32, f32) {
        let s = self.scale();
        ((self.size.0 as f64 * s) as f32, (self.size.1 as f64 * s) as f32)
    }

    fn to_pt(&self, x: f64, y: f64) -> (f32, f32) {
        let s = self.scale();
        ((x * s) as f32, ((self.size.1 as f64 - y) * s) as f32)
    }

    fn width_pt(&self, width: u32) -> f32 {
        (width as f64 * self.scale()) as f32
    }

    /// Open a graphics state carrying `color` for both painting operations.
    fn begin(&mut self, color: BackendColor) {
        self.content.save_state();
        let alpha = (color.alpha.clamp(0.0, 1.0) * 100.0).round() as u8;
        if alpha < 100 {
            self.alphas.insert(alpha);
            let name = alpha_state_name(alpha);
            self.content.set_parameters(Name(name.as_bytes()));
        }
        let (r, g, b) = color.rgb;
        let (r, g, b) = (r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0);
        self.content.set_fill_rgb(r, g, b);
        self.content.set_stroke_rgb(r, g, b);
    }

    fn end(&mut self) {
        self.content.restore_state();
    }

    fn trace<I: IntoIterator<Item = BackendCoord>>(&mut self, path: I) -> usize {
        let mut n = 0;
        for (x, y) in path {
            let (px, py) = self.to_pt(x as f64, y as f64);
            if n == 0 {
                self.content.move_to(px, py);
            } else {
                self.content.line_to(px, py);
            }
            n += 1;
        }
        n
    }

    /// Serialize everything drawn so far into a complete document.
    fn render(&mut self) -> Vec<u8> {
        let pending = std::mem::replace(&mut self.content, Content::new());
        self.stream.extend_from_slice(&pending.finish());

        let catalog_id = Ref::new(1);
        let tree_id = Ref::new(2);
        let page_id = Ref::new(3);
        let content_id = Ref::new(4);
        let regular_id = Ref::new(5);
        let bold_id = Ref::new(6);
        let info_id = Ref::new(7);
        let states: Vec<(String, u8, Ref)> = self
            .alphas
            .iter()
            .enumerate()
            .map(|(i, &a)| (alpha_state_name(a), a, Ref::new(8 + i as i32)))
            .collect();

        let mut pdf = Pdf::new();
        pdf.catalog(catalog_id).pages(tree_id);
        pdf.pages(tree_id).kids([page_id]).count(1);

        let (w, h) = self.page_size();
        let mut page = pdf.page(page_id);
        page.media_box(Rect::new(0.0, 0.0, w, h));
        page.parent(tree_id);
        page.contents(content_id);
        {
            let mut resources = page.resources();
            resources
                .fonts()
                .pair(Name(REGULAR), regular_id)
                .pair(Name(BOLD), bold_id);
            let mut ext = resources.ext_g_states();
            for (name, _, id) in &states {
                ext.pair(Name(name.as_bytes()), *id);
            }
        }
        page.finish();

        pdf.stream(content_id, &self.stream);
        pdf.type1_font(regular_id).base_font(Name(b"Helvetica"));
        pdf.type1_font(bold_id).base_font(Name(b"Helvetica-Bold"));
        for (_, alpha, id) in &states {
            let a = *alpha as f32 / 100.0;
            pdf.ext_graphics(*id).non_stroking_alpha(a).stroking_alpha(a);
        }

        let now = Local::now();
        pdf.document_info(info_id)
            .producer(TextStr("avalanche-plot"))
            .creation_date(
                Date::new(now.year() as u16)
                    .month(now.month() as u8)
                    .day(now.day() as u8)
                    .hour(now.hour() as u8)
                    .minute(now.minute() as u8)
                    .second(now.second() as u8),
            );

        pdf.finish()
    }
}

fn alpha_state_name(alpha: u8) -> String {
    format!("GA{alpha:03}")
}

/// Unit vector along the text baseline, in device coordinates.
fn direction(transform: FontTransform) -> (f64, f64) {
    match transform {
        FontTransform::None => (1.0, 0.0),
        FontTransform::Rotate90 => (0.0, 1.0),
        FontTransform::Rotate180 => (-1.0, 0.0),
        FontTransform::Rotate270 => (0.0, -1.0),
    }
}

impl DrawingBackend for PdfBackend {
    type ErrorType = io::Error;

    fn get_size(&self) -> (u32, u32) {
        self.size
    }

    fn ensure_prepared(&mut self) -> Result<(), DrawingErrorKind<io::Error>> {
        Ok(())
    }

    fn present(&mut self) -> Result<(), DrawingErrorKind<io::Error>> {
        let bytes = self.render();
        std::fs::write(&self.path, bytes).map_err(DrawingErrorKind::DrawingError)?;
        log::debug!("wrote {}", self.path.display());
        Ok(())
    }

    fn draw_pixel(
        &mut self,
        point: BackendCoord,
        color: BackendColor,
    ) -> Result<(), DrawingErrorKind<io::Error>> {
        if color.alpha <= 0.0 {
            return Ok(());
        }
        self.begin(color);
        let (x, y) = self.to_pt(point.0 as f64, point.1 as f64 + 1.0);
        let unit = self.width_pt(1);
        self.content.rect(x, y, unit, unit);
        self.content.fill_nonzero();
        self.end();
        Ok(())
    }

    fn draw_line<S: BackendStyle>(
        &mut self,
        from: BackendCoord,
        to: BackendCoord,
        style: &S,
    ) -> Result<(), DrawingErrorKind<io::Error>> {
        self.draw_path([from, to], style)
    }

    fn draw_rect<S: BackendStyle>(
        &mut self,
        upper_left: BackendCoord,
        bottom_right: BackendCoord,
        style: &S,
        fill: bool,
    ) -> Result<(), DrawingErrorKind<io::Error>> {
        let color = style.color();
        if color.alpha <= 0.0 {
            return Ok(());
        }
        self.begin(color);
        let (x0, y0) = self.to_pt(upper_left.0 as f64, bottom_right.1 as f64);
        let (x1, y1) = self.to_pt(bottom_right.0 as f64, upper_left.1 as f64);
        self.content.rect(x0, y0, x1 - x0, y1 - y0);
        if fill {
            self.content.fill_nonzero();
        } else {
            let width = self.width_pt(style.stroke_width());
            self.content.set_line_width(width);
            self.content.stroke();
        }
        self.end();
        Ok(())
    }

    fn draw_path<S: BackendStyle, I: IntoIterator<Item = BackendCoord>>(
        &mut self,
        path: I,
        style: &S,
    ) -> Result<(), DrawingErrorKind<io::Error>> {
        let color = style.color();
        if color.alpha <= 0.0 || style.stroke_width() == 0 {
            return Ok(());
        }
        self.begin(color);
        let width = self.width_pt(style.stroke_width());
        self.content.set_line_width(width);
        if self.trace(path) > 1 {
            self.content.stroke();
        } else {
            self.content.end_path();
        }
        self.end();
        Ok(())
    }

    fn draw_circle<S: BackendStyle>(
        &mut self,
        center: BackendCoord,
        radius: u32,
        style: &S,
        fill: bool,
    ) -> Result<(), DrawingErrorKind<io::Error>> {
        let color = style.color();
        if color.alpha <= 0.0 {
            return Ok(());
        }
        self.begin(color);
        let (cx, cy) = (center.0 as f64, center.1 as f64);
        let r = radius as f64;
        let k = r * KAPPA;
        let quarters = [
            ((cx + r, cy + k), (cx + k, cy + r), (cx, cy + r)),
            ((cx - k, cy + r), (cx - r, cy + k), (cx - r, cy)),
            ((cx - r, cy - k), (cx - k, cy - r), (cx, cy - r)),
            ((cx + k, cy - r), (cx + r, cy - k), (cx + r, cy)),
        ];
        let (sx, sy) = self.to_pt(cx + r, cy);
        self.content.move_to(sx, sy);
        for (c1, c2, end) in quarters {
            let (x1, y1) = self.to_pt(c1.0, c1.1);
            let (x2, y2) = self.to_pt(c2.0, c2.1);
            let (x3, y3) = self.to_pt(end.0, end.1);
            self.content.cubic_to(x1, y1, x2, y2, x3, y3);
        }
        self.content.close_path();
        if fill {
            self.content.fill_nonzero();
        } else {
            let width = self.width_pt(style.stroke_width());
            self.content.set_line_width(width);
            self.content.stroke();
        }
        self.end();
        Ok(())
    }

    fn fill_polygon<S: BackendStyle, I: IntoIterator<Item = BackendCoord>>(
        &mut self,
        vert: I,
        style: &S,
    ) -> Result<(), DrawingErrorKind<io::Error>> {
        let color = style.color();
        if color.alpha <= 0.0 {
            return Ok(());
        }
        self.begin(color);
        if self.trace(vert) > 2 {
            self.content.close_path();
            self.content.fill_nonzero();
        } else {
            self.content.end_path();
        }
        self.end();
        Ok(())
    }

    fn draw_text<TStyle: BackendTextStyle>(
        &mut self,
        text: &str,
        style: &TStyle,
        pos: BackendCoord,
    ) -> Result<(), DrawingErrorKind<io::Error>> {
        let color = style.color();
        if color.alpha <= 0.0 || text.is_empty() {
            return Ok(());
        }
        let size = style.size();
        let bold = matches!(style.style(), FontStyle::Bold);
        let width = helvetica::text_width(text, size, bold);
        let anchor = style.anchor();
        let along = match anchor.h_pos {
            HPos::Left => 0.0,
            HPos::Center => -width / 2.0,
            HPos::Right => -width,
        };
        let rise = match anchor.v_pos {
            VPos::Top => -ASCENT * size,
            VPos::Center => -(ASCENT - DESCENT) * size / 2.0,
            VPos::Bottom => DESCENT * size,
        };

        let (dx, dy) = direction(style.transform());
        // glyph "up" is the baseline direction turned a quarter counter-clockwise on screen
        let (ux, uy) = (dy, -dx);
        let origin_x = pos.0 as f64 + dx * along + ux * rise;
        let origin_y = pos.1 as f64 + dy * along + uy * rise;
        let (ox, oy) = self.to_pt(origin_x, origin_y);

        let font = if bold { BOLD } else { REGULAR };
        let size_pt = (size * self.scale()) as f32;

        self.begin(color);
        self.content.begin_text();
        self.content.set_font(Name(font), size_pt);
        self.content.set_text_matrix([
            dx as f32, -dy as f32, ux as f32, -uy as f32, ox, oy,
        ]);
        self.content.show(Str(&helvetica::encode(text)));
        self.content.end_text();
        self.end();
        Ok(())
    }

    fn estimate_text_size<TStyle: BackendTextStyle>(
        &self,
        text: &str,
        style: &TStyle,
    ) -> Result<(u32, u32), DrawingErrorKind<io::Error>> {
        let size = style.size();
        let bold = matches!(style.style(), FontStyle::Bold);
        let width = helvetica::text_width(text, size, bold);
        Ok((width.ceil() as u32, size.ceil() as u32))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plotters::prelude::*;
    use tempfile::tempdir;

    #[test]
    fn page_is_sized_in_points() {
        let backend = PdfBackend::new("unused.pdf", (3000, 1800), 300);
        assert_eq!(backend.page_size(), (720.0, 432.0));
    }

    #[test]
    fn y_axis_is_flipped() {
        let backend = PdfBackend::new("unused.pdf", (720, 432), 72);
        assert_eq!(backend.to_pt(0.0, 0.0), (0.0, 432.0));
        assert_eq!(backend.to_pt(720.0, 432.0), (720.0, 0.0));
    }

    #[test]
    fn writes_a_pdf_with_text_and_alpha() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.pdf");
        {
            let root = PdfBackend::new(&path, (600, 400), 150).into_drawing_area();
            root.fill(&WHITE).unwrap();
            root.draw(&Rectangle::new([(10, 10), (100, 100)], BLUE.mix(0.5).filled()))
                .unwrap();
            root.draw(&Circle::new((200, 200), 20, RED.filled())).unwrap();
            root.draw(&Text::new("hello figure", (20, 300), ("sans-serif", 20)))
                .unwrap();
            root.present().unwrap();
        }
        let bytes = std::fs::read(&path).unwrap();
        let text = String::from_utf8_lossy(&bytes);
        assert!(text.starts_with("%PDF-"));
        assert!(text.contains("/Helvetica"));
        assert!(text.contains("(hello figure)"));
        assert!(text.contains("/GA050"));
        assert!(text.trim_end().ends_with("%%EOF"));
    }

    #[test]
    fn text_estimate_uses_helvetica_widths() {
        let backend = PdfBackend::new("unused.pdf", (100, 100), 72);
        let style = TextStyle::from(("sans-serif", 10.0));
        let (w, h) = backend.estimate_text_size("00", &style).unwrap();
        assert_eq!((w, h), (12, 10));
    }
}
