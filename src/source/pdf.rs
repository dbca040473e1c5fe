//! PDF document source backed by lopdf.
//!
//! Walks each page's content stream and rebuilds a block → line → span tree:
//! every `BT`/`ET` pair becomes a block, a change of baseline starts a new
//! line, and every text-showing operator yields a span.

use std::collections::{BTreeMap, HashMap};
use std::io::Read;
use std::path::Path;

use lopdf::{Dictionary, Document as LopdfDocument, Object, ObjectId};

use super::{BBox, DocumentSource, LayoutBlock, LayoutLine, LayoutSpan, PageLayout};
use crate::detect::{detect_format_from_bytes, detect_format_from_path};
use crate::error::{Error, Result};

/// Default page height (US Letter) when no MediaBox is found.
const DEFAULT_PAGE_HEIGHT: f32 = 792.0;

/// TJ adjustment (thousandths of text space) treated as a word break.
const TJ_SPACE_THRESHOLD: f32 = 200.0;

/// Baseline difference that starts a new line.
const BASELINE_TOLERANCE: f32 = 0.5;

/// Guard against cyclic /Parent chains.
const MAX_TREE_DEPTH: usize = 32;

/// A PDF document opened with lopdf.
pub struct PdfDocument {
    doc: LopdfDocument,
    pages: BTreeMap<u32, ObjectId>,
}

impl PdfDocument {
    /// Open a PDF file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        detect_format_from_path(path)?;

        let doc = LopdfDocument::load(path).map_err(|e| match e {
            lopdf::Error::Decryption(_) => Error::Encrypted,
            _ => Error::from(e),
        })?;
        Self::from_document(doc)
    }

    /// Open a PDF from bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        detect_format_from_bytes(data)?;

        let doc = LopdfDocument::load_mem(data).map_err(|e| match e {
            lopdf::Error::Decryption(_) => Error::Encrypted,
            _ => Error::from(e),
        })?;
        Self::from_document(doc)
    }

    /// Open a PDF from a reader.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Self::from_bytes(&data)
    }

    /// Wrap an already loaded lopdf document.
    pub fn from_document(doc: LopdfDocument) -> Result<Self> {
        if doc.is_encrypted() {
            return Err(Error::Encrypted);
        }
        let pages = doc.get_pages();
        Ok(Self { doc, pages })
    }

    /// PDF version string.
    pub fn version(&self) -> String {
        self.doc.version.to_string()
    }

    fn page_id(&self, page: u32) -> Result<ObjectId> {
        self.pages
            .get(&page)
            .copied()
            .ok_or(Error::PageOutOfRange(page, self.pages.len() as u32))
    }

    /// Page height from the MediaBox, looking through the parent chain.
    fn page_height(&self, page_id: ObjectId) -> f32 {
        let mut current = self.doc.get_dictionary(page_id).ok();
        let mut depth = 0;
        while let Some(dict) = current {
            depth += 1;
            if depth > MAX_TREE_DEPTH {
                break;
            }
            if let Ok(media_box) = dict.get(b"MediaBox") {
                let media_box = match media_box {
                    Object::Reference(r) => self.doc.get_object(*r).ok(),
                    other => Some(other),
                };
                if let Some(Ok(array)) = media_box.map(|o| o.as_array()) {
                    if array.len() >= 4 {
                        let y0 = get_number(&array[1]).unwrap_or(0.0);
                        let y1 = get_number(&array[3]).unwrap_or(DEFAULT_PAGE_HEIGHT);
                        return (y1 - y0).abs();
                    }
                }
            }
            current = dict
                .get(b"Parent")
                .and_then(|p| p.as_reference())
                .and_then(|r| self.doc.get_dictionary(r))
                .ok();
        }
        DEFAULT_PAGE_HEIGHT
    }

    /// Raw (decompressed) content stream bytes of a page.
    fn page_content(&self, page_id: ObjectId) -> std::result::Result<Vec<u8>, String> {
        let page_dict = self
            .doc
            .get_dictionary(page_id)
            .map_err(|e| e.to_string())?;

        let contents = match page_dict.get(b"Contents") {
            Ok(contents) => contents,
            // A page without content is blank, not broken.
            Err(_) => return Ok(Vec::new()),
        };

        match contents {
            Object::Reference(r) => match self.doc.get_object(*r) {
                Ok(Object::Stream(s)) => Ok(stream_bytes(s)),
                Ok(Object::Array(arr)) => Ok(self.concat_streams(arr)),
                _ => Err("Invalid content stream".to_string()),
            },
            Object::Array(arr) => Ok(self.concat_streams(arr)),
            _ => Err("Invalid content stream".to_string()),
        }
    }

    fn concat_streams(&self, refs: &[Object]) -> Vec<u8> {
        let mut content = Vec::new();
        for obj in refs {
            if let Object::Reference(r) = obj {
                if let Ok(Object::Stream(s)) = self.doc.get_object(*r) {
                    content.extend_from_slice(&stream_bytes(s));
                    content.push(b' ');
                }
            }
        }
        content
    }

    /// Decode a string operand with the font's encoding.
    fn decode(&self, fonts: &BTreeMap<Vec<u8>, &Dictionary>, font: &[u8], bytes: &[u8]) -> String {
        if let Some(font_dict) = fonts.get(font) {
            if let Ok(enc) = font_dict.get_font_encoding(&self.doc) {
                if let Ok(text) = LopdfDocument::decode_text(&enc, bytes) {
                    return text;
                }
            }
        }
        decode_text_simple(bytes)
    }

    fn build_layout(&self, page: u32) -> std::result::Result<PageLayout, String> {
        let page_id = self.page_id(page).map_err(|e| e.to_string())?;
        let fonts = self
            .doc
            .get_page_fonts(page_id)
            .map_err(|e| e.to_string())?;

        let base_fonts: HashMap<Vec<u8>, String> = fonts
            .iter()
            .map(|(name, dict)| {
                let base = dict
                    .get(b"BaseFont")
                    .ok()
                    .and_then(|o| o.as_name().ok())
                    .map(|n| String::from_utf8_lossy(n).to_string())
                    .unwrap_or_else(|| String::from_utf8_lossy(name).to_string());
                (name.clone(), base)
            })
            .collect();

        let content = self.page_content(page_id)?;
        if content.is_empty() {
            return Ok(PageLayout::new());
        }
        let content = lopdf::content::Content::decode(&content).map_err(|e| e.to_string())?;

        let mut builder = LayoutBuilder::new(self.page_height(page_id));
        let mut font_key: Vec<u8> = Vec::new();
        let mut font_name = String::new();
        let mut font_size: f32 = 12.0;
        let mut matrix = TextMatrix::default();
        let mut ctm = Matrix::IDENTITY;
        let mut ctm_stack: Vec<Matrix> = Vec::new();
        let mut in_text = false;

        for op in content.operations {
            match op.operator.as_str() {
                "q" => ctm_stack.push(ctm),
                "Q" => {
                    if let Some(saved) = ctm_stack.pop() {
                        ctm = saved;
                    }
                }
                "cm" => {
                    if let Some(m) = Matrix::from_operands(&op.operands) {
                        ctm = m.multiply(&ctm);
                    }
                }
                "BT" => {
                    in_text = true;
                    matrix = TextMatrix::default().with_leading(matrix.leading);
                }
                "ET" => {
                    in_text = false;
                    builder.end_block();
                }
                "Tf" => {
                    if op.operands.len() >= 2 {
                        if let Object::Name(name) = &op.operands[0] {
                            font_key = name.clone();
                            font_name = base_fonts
                                .get(name)
                                .cloned()
                                .unwrap_or_else(|| String::from_utf8_lossy(name).to_string());
                        }
                        font_size = get_number(&op.operands[1]).unwrap_or(12.0);
                    }
                }
                "TL" => {
                    if let Some(leading) = op.operands.first().and_then(get_number) {
                        matrix.leading = leading;
                    }
                }
                "Td" | "TD" => {
                    if op.operands.len() >= 2 {
                        let tx = get_number(&op.operands[0]).unwrap_or(0.0);
                        let ty = get_number(&op.operands[1]).unwrap_or(0.0);
                        if op.operator == "TD" {
                            matrix.leading = -ty;
                        }
                        matrix.translate(tx, ty);
                    }
                }
                "Tm" => {
                    if let Some(m) = Matrix::from_operands(&op.operands) {
                        matrix.set(m);
                    }
                }
                "T*" => matrix.next_line(),
                "Tj" | "TJ" | "'" | "\"" if in_text => {
                    if op.operator == "'" || op.operator == "\"" {
                        matrix.next_line();
                    }
                    let text = match op.operator.as_str() {
                        "TJ" => match op.operands.first() {
                            Some(Object::Array(items)) => {
                                self.decode_tj(&fonts, &font_key, items)
                            }
                            _ => String::new(),
                        },
                        "\"" => match op.operands.get(2) {
                            Some(Object::String(bytes, _)) => self.decode(&fonts, &font_key, bytes),
                            _ => String::new(),
                        },
                        _ => match op.operands.first() {
                            Some(Object::String(bytes, _)) => self.decode(&fonts, &font_key, bytes),
                            _ => String::new(),
                        },
                    };

                    if !text.trim().is_empty() {
                        // Text space to page space.
                        let rendering = matrix.current().multiply(&ctm);
                        let (x, y) = (rendering.e, rendering.f);
                        let size = font_size * rendering.vertical_scale();
                        builder.push_span(text, font_name.clone(), size, x, y);
                    }
                }
                _ => {}
            }
        }

        Ok(builder.finish())
    }

    /// Decode a TJ array, turning large negative kerning into word spaces.
    fn decode_tj(
        &self,
        fonts: &BTreeMap<Vec<u8>, &Dictionary>,
        font: &[u8],
        items: &[Object],
    ) -> String {
        let mut combined = String::new();
        for item in items {
            let adjustment = match item {
                Object::String(bytes, _) => {
                    combined.push_str(&self.decode(fonts, font, bytes));
                    continue;
                }
                Object::Integer(n) => -(*n as f32),
                Object::Real(n) => -(*n as f32),
                _ => continue,
            };

            if adjustment > TJ_SPACE_THRESHOLD
                && !combined.ends_with(' ')
                && !combined.ends_with('\u{00A0}')
            {
                if let Some(c) = combined.chars().last() {
                    if !is_spaceless_script_char(c) {
                        combined.push(' ');
                    }
                }
            }
        }
        combined
    }
}

impl DocumentSource for PdfDocument {
    fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    fn page_layout(&self, page: u32) -> Result<PageLayout> {
        self.page_id(page)?;
        self.build_layout(page)
            .map_err(|message| Error::Extraction { page, message })
    }

    fn metadata_title(&self) -> Option<String> {
        let info = self.doc.trailer.get(b"Info").ok()?;
        let dict = match info {
            Object::Reference(r) => self.doc.get_dictionary(*r).ok()?,
            Object::Dictionary(d) => d,
            _ => return None,
        };
        get_string_from_dict(dict, b"Title")
    }
}

/// Accumulates spans into lines and blocks, converting PDF's bottom-up
/// baseline coordinates into top-down bounding boxes.
struct LayoutBuilder {
    page_height: f32,
    blocks: Vec<LayoutBlock>,
    lines: Vec<LayoutLine>,
    spans: Vec<LayoutSpan>,
    baseline: Option<f32>,
}

impl LayoutBuilder {
    fn new(page_height: f32) -> Self {
        Self {
            page_height,
            blocks: Vec::new(),
            lines: Vec::new(),
            spans: Vec::new(),
            baseline: None,
        }
    }

    fn push_span(&mut self, text: String, font: String, size: f32, x: f32, y: f32) {
        if let Some(baseline) = self.baseline {
            if (baseline - y).abs() > BASELINE_TOLERANCE {
                self.end_line();
            }
        }
        self.baseline = Some(y);

        // Ascender/descender approximations, as fractions of the font size.
        let top = self.page_height - (y + size * 0.8);
        let bottom = self.page_height - (y - size * 0.2);
        let width = text.chars().count() as f32 * size * 0.5;
        self.spans.push(LayoutSpan::new(
            text,
            font,
            size,
            BBox::new(x, top, x + width, bottom),
        ));
    }

    fn end_line(&mut self) {
        if !self.spans.is_empty() {
            self.lines
                .push(LayoutLine::new(std::mem::take(&mut self.spans)));
        }
        self.baseline = None;
    }

    fn end_block(&mut self) {
        self.end_line();
        if !self.lines.is_empty() {
            self.blocks
                .push(LayoutBlock::new(std::mem::take(&mut self.lines)));
        }
    }

    fn finish(mut self) -> PageLayout {
        self.end_block();
        PageLayout {
            blocks: self.blocks,
        }
    }
}

/// Affine transform `[a b c d e f]`, applied to row vectors as in PDF.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Matrix {
    a: f32,
    b: f32,
    c: f32,
    d: f32,
    e: f32,
    f: f32,
}

impl Matrix {
    const IDENTITY: Matrix = Matrix {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 1.0,
        e: 0.0,
        f: 0.0,
    };

    /// Six numeric operands of `cm` or `Tm`.
    fn from_operands(operands: &[Object]) -> Option<Self> {
        if operands.len() < 6 {
            return None;
        }
        Some(Self {
            a: get_number(&operands[0])?,
            b: get_number(&operands[1])?,
            c: get_number(&operands[2])?,
            d: get_number(&operands[3])?,
            e: get_number(&operands[4])?,
            f: get_number(&operands[5])?,
        })
    }

    /// `self` followed by `other`.
    fn multiply(&self, other: &Matrix) -> Matrix {
        Matrix {
            a: self.a * other.a + self.b * other.c,
            b: self.a * other.b + self.b * other.d,
            c: self.c * other.a + self.d * other.c,
            d: self.c * other.b + self.d * other.d,
            e: self.e * other.a + self.f * other.c + other.e,
            f: self.e * other.b + self.f * other.d + other.f,
        }
    }

    /// Length of the transformed unit vertical vector.
    fn vertical_scale(&self) -> f32 {
        (self.c * self.c + self.d * self.d).sqrt()
    }
}

/// Text matrix for tracking position in a content stream.
#[derive(Debug, Clone)]
struct TextMatrix {
    tm: Matrix,
    /// Line start, used by T* and Td
    line_e: f32,
    line_f: f32,
    leading: f32,
}

impl Default for TextMatrix {
    fn default() -> Self {
        Self {
            tm: Matrix::IDENTITY,
            line_e: 0.0,
            line_f: 0.0,
            leading: 0.0,
        }
    }
}

impl TextMatrix {
    fn with_leading(mut self, leading: f32) -> Self {
        self.leading = leading;
        self
    }

    fn set(&mut self, tm: Matrix) {
        self.tm = tm;
        self.line_e = tm.e;
        self.line_f = tm.f;
    }

    fn translate(&mut self, tx: f32, ty: f32) {
        self.line_e += tx * self.tm.a + ty * self.tm.c;
        self.line_f += tx * self.tm.b + ty * self.tm.d;
        self.tm.e = self.line_e;
        self.tm.f = self.line_f;
    }

    fn next_line(&mut self) {
        // Fall back to a 12pt leading when TL was never set.
        let leading = if self.leading > 0.0 { self.leading } else { 12.0 };
        self.translate(0.0, -leading);
    }

    fn current(&self) -> Matrix {
        self.tm
    }
}

/// Stream data, decompressed when a filter is present.
fn stream_bytes(stream: &lopdf::Stream) -> Vec<u8> {
    stream
        .decompressed_content()
        .unwrap_or_else(|_| stream.content.clone())
}

fn get_number(obj: &Object) -> Option<f32> {
    match obj {
        Object::Integer(i) => Some(*i as f32),
        Object::Real(r) => Some(*r as f32),
        _ => None,
    }
}

/// Chinese and Japanese text does not separate words with spaces.
fn is_spaceless_script_char(c: char) -> bool {
    let code = c as u32;
    (0x4E00..=0x9FFF).contains(&code)
        || (0x3400..=0x4DBF).contains(&code)
        || (0x3040..=0x30FF).contains(&code)
        || (0xF900..=0xFAFF).contains(&code)
}

/// Decode text bytes without a font encoding: UTF-16BE (BOM), UTF-8, then Latin-1.
fn decode_text_simple(bytes: &[u8]) -> String {
    if bytes.len() >= 2 && bytes[0] == 0xFE && bytes[1] == 0xFF {
        let utf16: Vec<u16> = bytes[2..]
            .chunks_exact(2)
            .map(|c| u16::from_be_bytes([c[0], c[1]]))
            .collect();
        return String::from_utf16_lossy(&utf16);
    }

    if let Ok(s) = std::str::from_utf8(bytes) {
        return s.to_string();
    }

    bytes.iter().map(|&b| b as char).collect()
}

fn get_string_from_dict(dict: &Dictionary, key: &[u8]) -> Option<String> {
    match dict.get(key).ok()? {
        Object::String(bytes, _) => Some(decode_text_simple(bytes)),
        Object::Name(bytes) => String::from_utf8(bytes.clone()).ok(),
        _ => None,
    }
}
