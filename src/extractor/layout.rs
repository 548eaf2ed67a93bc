// file: src/extractor/layout.rs
// description: reading-order text reconstruction from pdf content streams
// reference: PDF 1.7 text operators (section 9.4), https://docs.rs/lopdf

use crate::config::LayoutParams;
use crate::extractor::patterns::is_vertical_cmap;
use lopdf::content::Operation;
use lopdf::{Dictionary, Document, Encoding, Object, ObjectId, Result as LopdfResult};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use tracing::trace;

const IDENTITY: [f32; 6] = [1.0, 0.0, 0.0, 1.0, 0.0, 0.0];

// Fallback glyph metrics in 1/1000 text space units
const DEFAULT_SIMPLE_WIDTH: f32 = 500.0;
const DEFAULT_CID_WIDTH: f32 = 1000.0;
const DESCENT_RATIO: f32 = 0.2;

/// Text shown by a single string operand, positioned in user space.
#[derive(Debug, Clone, PartialEq)]
pub struct TextFragment {
    pub text: String,
    pub x0: f32,
    pub y0: f32,
    pub x1: f32,
    pub y1: f32,
    pub size: f32,
    pub vertical: bool,
}

impl TextFragment {
    fn width(&self) -> f32 {
        self.x1 - self.x0
    }

    fn height(&self) -> f32 {
        self.y1 - self.y0
    }
}

/// Extracts one page's text with lines and text boxes reconstructed.
pub fn page_text(doc: &Document, page_id: ObjectId, params: &LayoutParams) -> LopdfResult<String> {
    let fragments = collect_fragments(doc, page_id, params)?;
    Ok(assemble(fragments, params))
}

pub fn collect_fragments(
    doc: &Document,
    page_id: ObjectId,
    params: &LayoutParams,
) -> LopdfResult<Vec<TextFragment>> {
    let content = doc.get_and_decode_page_content(page_id)?;
    let page_fonts = doc.get_page_fonts(page_id)?;

    let fonts = page_fonts
        .iter()
        .map(|(name, dict)| {
            FontInfo::from_dict(doc, *dict, params.detect_vertical).map(|info| (name.clone(), info))
        })
        .collect::<LopdfResult<BTreeMap<Vec<u8>, FontInfo>>>()?;

    let mut walker = PageWalker::new(&fonts);
    for op in &content.operations {
        walker.apply(op)?;
    }

    trace!(
        "Collected {} text fragments from page object {:?}",
        walker.fragments.len(),
        page_id
    );

    Ok(walker.fragments)
}

struct FontInfo<'a> {
    encoding: Encoding<'a>,
    widths: Vec<f32>,
    first_char: i64,
    default_width: f32,
    two_byte: bool,
    vertical: bool,
}

impl<'a> FontInfo<'a> {
    fn from_dict(doc: &'a Document, dict: &'a Dictionary, detect_vertical: bool) -> LopdfResult<Self> {
        let encoding = dict.get_font_encoding(doc)?;

        let two_byte = dict
            .get(b"Subtype")
            .and_then(Object::as_name)
            .map(|subtype| subtype == b"Type0")
            .unwrap_or(false);

        let vertical = detect_vertical && two_byte && writes_vertically(doc, dict);

        let widths = dict
            .get(b"Widths")
            .map(|obj| resolve(doc, obj))
            .and_then(Object::as_array)
            .map(|arr| arr.iter().map(|w| number(resolve(doc, w))).collect())
            .unwrap_or_default();

        let first_char = dict
            .get(b"FirstChar")
            .and_then(Object::as_i64)
            .unwrap_or(0);

        let default_width = if two_byte {
            descendant_default_width(doc, dict).unwrap_or(DEFAULT_CID_WIDTH)
        } else {
            DEFAULT_SIMPLE_WIDTH
        };

        Ok(Self {
            encoding,
            widths,
            first_char,
            default_width,
            two_byte,
            vertical,
        })
    }

    /// Total glyph advance of `bytes` in 1/1000 units plus the count of codes
    /// and of single-byte spaces (which also receive word spacing).
    fn measure(&self, bytes: &[u8]) -> (f32, usize, usize) {
        if self.two_byte {
            let codes = bytes.len().div_ceil(2);
            return (codes as f32 * self.default_width, codes, 0);
        }

        let mut advance = 0.0;
        let mut spaces = 0;
        for &code in bytes {
            let index = i64::from(code) - self.first_char;
            let width = usize::try_from(index)
                .ok()
                .and_then(|i| self.widths.get(i))
                .copied()
                .filter(|w| *w > 0.0)
                .unwrap_or(self.default_width);
            advance += width;
            if code == b' ' {
                spaces += 1;
            }
        }
        (advance, bytes.len(), spaces)
    }
}

fn writes_vertically(doc: &Document, dict: &Dictionary) -> bool {
    match dict.get(b"Encoding").map(|obj| resolve(doc, obj)) {
        Ok(Object::Name(name)) => is_vertical_cmap(&String::from_utf8_lossy(name)),
        Ok(Object::Stream(stream)) => stream
            .dict
            .get(b"WMode")
            .and_then(Object::as_i64)
            .map(|mode| mode == 1)
            .unwrap_or(false),
        _ => false,
    }
}

fn descendant_default_width(doc: &Document, dict: &Dictionary) -> Option<f32> {
    let descendants = resolve(doc, dict.get(b"DescendantFonts").ok()?).as_array().ok()?;
    let descendant = resolve(doc, descendants.first()?).as_dict().ok()?;
    descendant
        .get(b"DW")
        .ok()
        .map(|dw| number(resolve(doc, dw)))
}

fn resolve<'a>(doc: &'a Document, object: &'a Object) -> &'a Object {
    match object {
        Object::Reference(id) => doc.get_object(*id).unwrap_or(object),
        _ => object,
    }
}

fn number(object: &Object) -> f32 {
    match object {
        Object::Integer(i) => *i as f32,
        Object::Real(f) => *f,
        _ => 0.0,
    }
}

#[derive(Debug, Clone)]
struct GraphicsState {
    ctm: [f32; 6],
    font: Option<Vec<u8>>,
    font_size: f32,
    character_spacing: f32,
    word_spacing: f32,
    horizontal_scaling: f32,
    leading: f32,
    rise: f32,
}

impl Default for GraphicsState {
    fn default() -> Self {
        Self {
            ctm: IDENTITY,
            font: None,
            font_size: 0.0,
            character_spacing: 0.0,
            word_spacing: 0.0,
            horizontal_scaling: 1.0,
            leading: 0.0,
            rise: 0.0,
        }
    }
}

struct PageWalker<'f, 'a> {
    fonts: &'f BTreeMap<Vec<u8>, FontInfo<'a>>,
    stack: Vec<GraphicsState>,
    text_matrix: [f32; 6],
    text_line_matrix: [f32; 6],
    fragments: Vec<TextFragment>,
}

impl<'f, 'a> PageWalker<'f, 'a> {
    fn new(fonts: &'f BTreeMap<Vec<u8>, FontInfo<'a>>) -> Self {
        Self {
            fonts,
            stack: vec![GraphicsState::default()],
            text_matrix: IDENTITY,
            text_line_matrix: IDENTITY,
            fragments: Vec::new(),
        }
    }

    fn state(&mut self) -> &mut GraphicsState {
        if self.stack.is_empty() {
            self.stack.push(GraphicsState::default());
        }
        let last = self.stack.len() - 1;
        &mut self.stack[last]
    }

    fn operand(op: &Operation, index: usize) -> f32 {
        op.operands.get(index).map(number).unwrap_or(0.0)
    }

    fn apply(&mut self, op: &Operation) -> LopdfResult<()> {
        match op.operator.as_str() {
            "q" => {
                let current = self.state().clone();
                self.stack.push(current);
            }
            "Q" => {
                if self.stack.len() > 1 {
                    self.stack.pop();
                }
            }
            "cm" => {
                let matrix = matrix_from_operands(op);
                let state = self.state();
                state.ctm = multiply_matrices(&matrix, &state.ctm);
            }
            "BT" => {
                self.text_matrix = IDENTITY;
                self.text_line_matrix = IDENTITY;
            }
            "Tf" => {
                if let Some(Object::Name(name)) = op.operands.first() {
                    let size = Self::operand(op, 1);
                    let state = self.state();
                    state.font = Some(name.clone());
                    state.font_size = size;
                }
            }
            "Tc" => self.state().character_spacing = Self::operand(op, 0),
            "Tw" => self.state().word_spacing = Self::operand(op, 0),
            "Tz" => self.state().horizontal_scaling = Self::operand(op, 0) / 100.0,
            "TL" => self.state().leading = Self::operand(op, 0),
            "Ts" => self.state().rise = Self::operand(op, 0),
            "Tm" => {
                let matrix = matrix_from_operands(op);
                self.text_matrix = matrix;
                self.text_line_matrix = matrix;
            }
            "Td" => self.move_line(Self::operand(op, 0), Self::operand(op, 1)),
            "TD" => {
                let ty = Self::operand(op, 1);
                self.state().leading = -ty;
                self.move_line(Self::operand(op, 0), ty);
            }
            "T*" => self.next_line(),
            "Tj" | "TJ" => self.show(&op.operands)?,
            "'" => {
                self.next_line();
                self.show(&op.operands)?;
            }
            "\"" => {
                let word_spacing = Self::operand(op, 0);
                let character_spacing = Self::operand(op, 1);
                let state = self.state();
                state.word_spacing = word_spacing;
                state.character_spacing = character_spacing;
                self.next_line();
                if let Some(text) = op.operands.get(2) {
                    self.show(std::slice::from_ref(text))?;
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn move_line(&mut self, tx: f32, ty: f32) {
        self.text_line_matrix = multiply_matrices(&translate_matrix(tx, ty), &self.text_line_matrix);
        self.text_matrix = self.text_line_matrix;
    }

    fn next_line(&mut self) {
        let leading = self.state().leading;
        self.move_line(0.0, -leading);
    }

    fn show(&mut self, operands: &[Object]) -> LopdfResult<()> {
        for operand in operands {
            match operand {
                Object::String(bytes, _) => self.show_string(bytes)?,
                Object::Array(items) => {
                    for item in items {
                        match item {
                            Object::String(bytes, _) => self.show_string(bytes)?,
                            Object::Integer(_) | Object::Real(_) => self.adjust(number(item)),
                            _ => {}
                        }
                    }
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// TJ positioning adjustment, in thousandths of text space.
    fn adjust(&mut self, amount: f32) {
        let state = self.state().clone();
        let vertical = self.current_font().map(|f| f.vertical).unwrap_or(false);
        let shift = -amount / 1000.0 * state.font_size;

        let translation = if vertical {
            translate_matrix(0.0, shift)
        } else {
            translate_matrix(shift * state.horizontal_scaling, 0.0)
        };
        self.text_matrix = multiply_matrices(&translation, &self.text_matrix);
    }

    fn current_font(&self) -> Option<&'f FontInfo<'a>> {
        let fonts = self.fonts;
        self.stack
            .last()
            .and_then(|state| state.font.as_ref())
            .and_then(|name| fonts.get(name))
    }

    fn show_string(&mut self, bytes: &[u8]) -> LopdfResult<()> {
        let Some(font) = self.current_font() else {
            return Ok(());
        };
        let state = self.state().clone();

        let text = Document::decode_text(&font.encoding, bytes)?;
        let (glyph_advance, codes, spaces) = font.measure(bytes);
        let spacing = codes as f32 * state.character_spacing + spaces as f32 * state.word_spacing;

        let render = multiply_matrices(&self.text_matrix, &state.ctm);
        let origin = transform_point(&render, 0.0, state.rise);

        if font.vertical {
            let advance = glyph_advance / 1000.0 * state.font_size + spacing;
            let end = transform_point(&render, 0.0, state.rise - advance);
            let size = state.font_size * render[0].hypot(render[1]);

            if !text.trim().is_empty() {
                self.fragments.push(TextFragment {
                    text,
                    x0: origin.0 - size / 2.0,
                    x1: origin.0 + size / 2.0,
                    y0: origin.1.min(end.1),
                    y1: origin.1.max(end.1),
                    size,
                    vertical: true,
                });
            }
            self.text_matrix = multiply_matrices(&translate_matrix(0.0, -advance), &self.text_matrix);
        } else {
            let advance =
                (glyph_advance / 1000.0 * state.font_size + spacing) * state.horizontal_scaling;
            let end = transform_point(&render, advance, state.rise);
            let size = state.font_size * render[2].hypot(render[3]);

            if !text.trim().is_empty() {
                self.fragments.push(TextFragment {
                    text,
                    x0: origin.0.min(end.0),
                    x1: origin.0.max(end.0),
                    y0: origin.1 - size * DESCENT_RATIO,
                    y1: origin.1 + size * (1.0 - DESCENT_RATIO),
                    size,
                    vertical: false,
                });
            }
            self.text_matrix = multiply_matrices(&translate_matrix(advance, 0.0), &self.text_matrix);
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
struct TextLine {
    text: String,
    x0: f32,
    y0: f32,
    x1: f32,
    y1: f32,
    size: f32,
    vertical: bool,
}

impl TextLine {
    fn start(fragment: TextFragment) -> Self {
        Self {
            x0: fragment.x0,
            y0: fragment.y0,
            x1: fragment.x1,
            y1: fragment.y1,
            size: fragment.size,
            vertical: fragment.vertical,
            text: fragment.text,
        }
    }

    fn height(&self) -> f32 {
        self.y1 - self.y0
    }

    fn width(&self) -> f32 {
        self.x1 - self.x0
    }

    fn accepts(&self, fragment: &TextFragment, params: &LayoutParams) -> bool {
        if fragment.vertical != self.vertical {
            return false;
        }

        let margin = params.char_margin * self.size.max(fragment.size);
        if self.vertical {
            let overlap = overlap(self.x0, self.x1, fragment.x0, fragment.x1);
            let distance = distance(self.y0, self.y1, fragment.y0, fragment.y1);
            overlap > params.line_overlap * self.width().min(fragment.width()) && distance <= margin
        } else {
            let overlap = overlap(self.y0, self.y1, fragment.y0, fragment.y1);
            let distance = distance(self.x0, self.x1, fragment.x0, fragment.x1);
            overlap > params.line_overlap * self.height().min(fragment.height())
                && distance <= margin
        }
    }

    fn push(&mut self, fragment: TextFragment, params: &LayoutParams) {
        let gap = if self.vertical {
            self.y0 - fragment.y1
        } else {
            fragment.x0 - self.x1
        };

        if gap > params.word_margin * fragment.size
            && !self.text.ends_with(char::is_whitespace)
            && !fragment.text.starts_with(char::is_whitespace)
        {
            self.text.push(' ');
        }

        self.text.push_str(&fragment.text);
        self.x0 = self.x0.min(fragment.x0);
        self.y0 = self.y0.min(fragment.y0);
        self.x1 = self.x1.max(fragment.x1);
        self.y1 = self.y1.max(fragment.y1);
        self.size = self.size.max(fragment.size);
    }
}

#[derive(Debug, Clone)]
struct TextBox {
    lines: Vec<TextLine>,
    x0: f32,
    y0: f32,
    x1: f32,
    y1: f32,
    vertical: bool,
}

impl TextBox {
    fn start(line: TextLine) -> Self {
        Self {
            x0: line.x0,
            y0: line.y0,
            x1: line.x1,
            y1: line.y1,
            vertical: line.vertical,
            lines: vec![line],
        }
    }

    fn accepts(&self, line: &TextLine, params: &LayoutParams) -> bool {
        if line.vertical != self.vertical {
            return false;
        }

        let Some(last) = self.lines.last() else {
            return false;
        };

        if self.vertical {
            overlap(self.y0, self.y1, line.y0, line.y1) > 0.0
                && distance(self.x0, self.x1, line.x0, line.x1)
                    <= params.line_margin * last.width().max(line.width())
        } else {
            overlap(self.x0, self.x1, line.x0, line.x1) > 0.0
                && distance(self.y0, self.y1, line.y0, line.y1)
                    <= params.line_margin * last.height().max(line.height())
        }
    }

    fn push(&mut self, line: TextLine) {
        self.x0 = self.x0.min(line.x0);
        self.y0 = self.y0.min(line.y0);
        self.x1 = self.x1.max(line.x1);
        self.y1 = self.y1.max(line.y1);
        self.lines.push(line);
    }

    fn sort_lines(&mut self) {
        if self.vertical {
            self.lines.sort_by(|a, b| descending(a.x1, b.x1));
        } else {
            self.lines.sort_by(|a, b| descending(a.y1, b.y1));
        }
    }

    /// Reading-order key: top-to-bottom for horizontal text (nudged by x as
    /// `boxes_flow` drops), right-to-left for vertical text.
    fn order_key(&self, flow: f32) -> f32 {
        if self.vertical {
            -(1.0 + flow) * (self.x0 + self.x1) - (1.0 - flow) * self.y1
        } else {
            (1.0 - flow) * self.x0 - (1.0 + flow) * (self.y0 + self.y1)
        }
    }
}

/// Groups fragments (in content-stream order) into lines and boxes and renders
/// each box as its lines followed by a blank line.
pub fn assemble(fragments: Vec<TextFragment>, params: &LayoutParams) -> String {
    let mut lines: Vec<TextLine> = Vec::new();
    for fragment in fragments {
        match lines.last_mut() {
            Some(line) if line.accepts(&fragment, params) => line.push(fragment, params),
            _ => lines.push(TextLine::start(fragment)),
        }
    }

    let mut boxes: Vec<TextBox> = Vec::new();
    for line in lines {
        match boxes.iter_mut().rev().find(|b| b.accepts(&line, params)) {
            Some(text_box) => text_box.push(line),
            None => boxes.push(TextBox::start(line)),
        }
    }

    for text_box in &mut boxes {
        text_box.sort_lines();
    }
    boxes.sort_by(|a, b| {
        a.order_key(params.boxes_flow)
            .partial_cmp(&b.order_key(params.boxes_flow))
            .unwrap_or(Ordering::Equal)
    });

    let mut text = String::new();
    for text_box in &boxes {
        for line in &text_box.lines {
            text.push_str(line.text.trim_end());
            text.push('\n');
        }
        text.push('\n');
    }
    text
}

fn overlap(a0: f32, a1: f32, b0: f32, b1: f32) -> f32 {
    a1.min(b1) - a0.max(b0)
}

fn distance(a0: f32, a1: f32, b0: f32, b1: f32) -> f32 {
    (b0 - a1).max(a0 - b1).max(0.0)
}

fn descending(a: f32, b: f32) -> Ordering {
    b.partial_cmp(&a).unwrap_or(Ordering::Equal)
}

fn matrix_from_operands(op: &Operation) -> [f32; 6] {
    op.operands
        .iter()
        .map(number)
        .collect::<Vec<f32>>()
        .try_into()
        .unwrap_or(IDENTITY)
}

fn transform_point(matrix: &[f32; 6], x: f32, y: f32) -> (f32, f32) {
    (
        matrix[0] * x + matrix[2] * y + matrix[4],
        matrix[1] * x + matrix[3] * y + matrix[5],
    )
}

pub fn multiply_matrices(a: &[f32; 6], b: &[f32; 6]) -> [f32; 6] {
    [
        a[0] * b[0] + a[1] * b[2],
        a[0] * b[1] + a[1] * b[3],
        a[2] * b[0] + a[3] * b[2],
        a[2] * b[1] + a[3] * b[3],
        a[4] * b[0] + a[5] * b[2] + b[4],
        a[4] * b[1] + a[5] * b[3] + b[5],
    ]
}

pub fn translate_matrix(x: f32, y: f32) -> [f32; 6] {
    [1.0, 0.0, 0.0, 1.0, x, y]
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use lopdf::dictionary;

    fn horizontal(text: &str, x0: f32, baseline: f32, width: f32) -> TextFragment {
        TextFragment {
            text: text.to_string(),
            x0,
            x1: x0 + width,
            y0: baseline - 2.0,
            y1: baseline + 8.0,
            size: 10.0,
            vertical: false,
        }
    }

    fn vertical(text: &str, x: f32, top: f32, height: f32) -> TextFragment {
        TextFragment {
            text: text.to_string(),
            x0: x - 5.0,
            x1: x + 5.0,
            y0: top - height,
            y1: top,
            size: 10.0,
            vertical: true,
        }
    }

    #[test]
    fn test_fragments_on_one_baseline_form_a_line() {
        let params = LayoutParams::default();
        let text = assemble(
            vec![
                horizontal("Hello", 0.0, 700.0, 25.0),
                horizontal("world", 28.0, 700.0, 25.0),
            ],
            &params,
        );
        assert_eq!(text, "Hello world\n\n");
    }

    #[test]
    fn test_touching_fragments_are_not_spaced() {
        let params = LayoutParams::default();
        let text = assemble(
            vec![
                horizontal("Sustain", 0.0, 700.0, 35.0),
                horizontal("ability", 35.0, 700.0, 35.0),
            ],
            &params,
        );
        assert_eq!(text, "Sustainability\n\n");
    }

    #[test]
    fn test_close_lines_share_a_box() {
        let params = LayoutParams::default();
        let text = assemble(
            vec![
                horizontal("first line", 0.0, 700.0, 50.0),
                horizontal("second line", 0.0, 688.0, 55.0),
            ],
            &params,
        );
        assert_eq!(text, "first line\nsecond line\n\n");
    }

    #[test]
    fn test_distant_lines_are_separated_by_blank_line() {
        let params = LayoutParams::default();
        let text = assemble(
            vec![
                horizontal("Climate risk section", 0.0, 700.0, 100.0),
                horizontal("Green bond section", 0.0, 600.0, 90.0),
            ],
            &params,
        );
        assert_eq!(text, "Climate risk section\n\nGreen bond section\n\n");
    }

    #[test]
    fn test_boxes_read_top_to_bottom_regardless_of_stream_order() {
        let params = LayoutParams::default();
        let text = assemble(
            vec![
                horizontal("footer text", 0.0, 100.0, 55.0),
                horizontal("header text", 0.0, 700.0, 55.0),
            ],
            &params,
        );
        assert_eq!(text, "header text\n\nfooter text\n\n");
    }

    #[test]
    fn test_vertical_fragments_stack_into_a_column() {
        let params = LayoutParams::default();
        let text = assemble(
            vec![
                vertical("縦", 100.0, 700.0, 10.0),
                vertical("書き", 100.0, 690.0, 20.0),
            ],
            &params,
        );
        assert_eq!(text, "縦書き\n\n");
    }

    #[test]
    fn test_vertical_columns_read_right_to_left() {
        let params = LayoutParams::default();
        let text = assemble(
            vec![
                vertical("左", 40.0, 700.0, 10.0),
                vertical("右", 200.0, 700.0, 10.0),
            ],
            &params,
        );
        assert_eq!(text, "右\n\n左\n\n");
    }

    #[test]
    fn test_empty_page_yields_empty_text() {
        assert_eq!(assemble(Vec::new(), &LayoutParams::default()), "");
    }

    #[test]
    fn test_matrix_multiplication_applies_translation_last() {
        let scale = [2.0, 0.0, 0.0, 2.0, 0.0, 0.0];
        let shift = translate_matrix(10.0, 20.0);
        let combined = multiply_matrices(&scale, &shift);
        assert_eq!(transform_point(&combined, 1.0, 1.0), (12.0, 22.0));
    }

    fn type0_font(encoding: Object) -> Dictionary {
        lopdf::dictionary! {
            "Type" => "Font",
            "Subtype" => "Type0",
            "BaseFont" => "KozMinPro-Regular",
            "Encoding" => encoding,
        }
    }

    #[test]
    fn test_identity_v_font_writes_vertically() {
        let doc = Document::with_version("1.5");
        assert!(writes_vertically(&doc, &type0_font(Object::Name(b"Identity-V".to_vec()))));
        assert!(!writes_vertically(&doc, &type0_font(Object::Name(b"Identity-H".to_vec()))));
    }

    #[test]
    fn test_embedded_cmap_with_wmode_one_writes_vertically() {
        let mut doc = Document::with_version("1.5");
        let vertical_cmap = doc.add_object(lopdf::Stream::new(
            lopdf::dictionary! { "Type" => "CMap", "CMapName" => "Custom-V", "WMode" => 1 },
            Vec::new(),
        ));
        let horizontal_cmap = doc.add_object(lopdf::Stream::new(
            lopdf::dictionary! { "Type" => "CMap", "CMapName" => "Custom", "WMode" => 0 },
            Vec::new(),
        ));

        assert!(writes_vertically(&doc, &type0_font(vertical_cmap.into())));
        assert!(!writes_vertically(&doc, &type0_font(horizontal_cmap.into())));
    }

    #[test]
    fn test_only_composite_fonts_are_vertical() {
        let doc = Document::with_version("1.5");
        let cjk = type0_font(Object::Name(b"UniJIS-UCS2-V".to_vec()));
        let mut simple = cjk.clone();
        simple.set("Subtype", "Type1");

        assert!(FontInfo::from_dict(&doc, &cjk, true).unwrap().vertical);
        assert!(!FontInfo::from_dict(&doc, &cjk, false).unwrap().vertical);
        assert!(!FontInfo::from_dict(&doc, &simple, true).unwrap().vertical);
    }
}
