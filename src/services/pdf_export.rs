use std::{
    borrow::Cow,
    path::{Path, PathBuf},
};

use chrono::Local;
use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference};

use crate::{
    errors::{AppError, AppResult},
    models::domain::{QuizQuestion, QuizSession},
};

const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const MARGIN_MM: f32 = 20.0;
const PT_TO_MM: f32 = 0.3528;
// Average Helvetica glyph width as a fraction of the font size.
const AVG_GLYPH_WIDTH: f32 = 0.5;

const TITLE_SIZE: f32 = 20.0;
const BODY_SIZE: f32 = 11.0;

pub struct PdfExport {
    pub filename: String,
    pub path: PathBuf,
    pub bytes: Vec<u8>,
}

#[derive(Clone, Copy)]
enum Style {
    Regular,
    Bold,
    Italic,
}

/// Lays out a quiz with the PDF builtin Helvetica faces. Those faces only
/// cover the WinAnsi character set; anything else is written as `?`.
struct QuizPdfWriter {
    doc: PdfDocumentReference,
    layer: PdfLayerReference,
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    italic: IndirectFontRef,
    cursor_mm: f32,
}

impl QuizPdfWriter {
    fn new(title: &str) -> AppResult<Self> {
        let (doc, page, layer) =
            PdfDocument::new(title, Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Layer 1");
        let regular = doc.add_builtin_font(BuiltinFont::Helvetica).map_err(pdf_error)?;
        let bold = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(pdf_error)?;
        let italic = doc
            .add_builtin_font(BuiltinFont::HelveticaOblique)
            .map_err(pdf_error)?;
        let layer = doc.get_page(page).get_layer(layer);

        Ok(Self {
            doc,
            layer,
            regular,
            bold,
            italic,
            cursor_mm: PAGE_HEIGHT_MM - MARGIN_MM,
        })
    }

    fn font(&self, style: Style) -> &IndirectFontRef {
        match style {
            Style::Regular => &self.regular,
            Style::Bold => &self.bold,
            Style::Italic => &self.italic,
        }
    }

    fn new_page(&mut self) {
        let (page, layer) = self
            .doc
            .add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Layer 1");
        self.layer = self.doc.get_page(page).get_layer(layer);
        self.cursor_mm = PAGE_HEIGHT_MM - MARGIN_MM;
    }

    fn paragraph(&mut self, text: &str, style: Style, size: f32, indent_mm: f32) {
        let line_height = size * PT_TO_MM * 1.4;
        let usable = PAGE_WIDTH_MM - 2.0 * MARGIN_MM - indent_mm;
        let max_chars = (usable / (size * PT_TO_MM * AVG_GLYPH_WIDTH)) as usize;

        for line in wrap_text(&to_builtin_charset(text), max_chars) {
            if self.cursor_mm - line_height < MARGIN_MM {
                self.new_page();
            }
            self.cursor_mm -= line_height;
            self.layer.use_text(
                line,
                size,
                Mm(MARGIN_MM + indent_mm),
                Mm(self.cursor_mm),
                self.font(style),
            );
        }
    }

    fn space(&mut self, mm: f32) {
        self.cursor_mm -= mm;
    }

    fn finish(self) -> AppResult<Vec<u8>> {
        self.doc.save_to_bytes().map_err(pdf_error)
    }
}

fn pdf_error(err: printpdf::Error) -> AppError {
    AppError::InternalError(format!("PDF rendering failed: {:?}", err))
}

// Characters of WinAnsiEncoding outside Latin-1.
const WIN_ANSI_EXTRAS: &str = "€‚ƒ„…†‡ˆ‰Š‹ŒŽ‘’“”•–—˜™š›œžŸ";

/// Replaces characters the builtin fonts cannot draw with `?`.
pub fn to_builtin_charset(text: &str) -> Cow<'_, str> {
    let drawable = |c: char| {
        matches!(c, '\n' | ' '..='~' | '\u{a0}'..='\u{ff}') || WIN_ANSI_EXTRAS.contains(c)
    };
    if text.chars().all(drawable) {
        Cow::Borrowed(text)
    } else {
        Cow::Owned(
            text.chars()
                .map(|c| if drawable(c) { c } else { '?' })
                .collect(),
        )
    }
}

/// Greedy word wrap; words longer than `max_chars` are split.
pub fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut lines = Vec::new();

    for paragraph in text.lines() {
        let mut current = String::new();
        for word in paragraph.split_whitespace() {
            let mut word: Vec<char> = word.chars().collect();
            while word.len() > max_chars {
                if !current.is_empty() {
                    lines.push(std::mem::take(&mut current));
                }
                let rest = word.split_off(max_chars);
                lines.push(word.into_iter().collect());
                word = rest;
            }
            let word: String = word.into_iter().collect();
            let needed = if current.is_empty() {
                word.chars().count()
            } else {
                current.chars().count() + 1 + word.chars().count()
            };
            if needed > max_chars && !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(&word);
        }
        if !current.is_empty() {
            lines.push(current);
        }
    }

    lines
}

/// Capitalizes the first letter of every word, lowercasing the rest.
pub fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

fn option_label(index: usize) -> String {
    match u8::try_from(index).ok().filter(|i| *i < 26) {
        Some(i) => char::from(b'A' + i).to_string(),
        None => (index + 1).to_string(),
    }
}

fn write_question(writer: &mut QuizPdfWriter, number: usize, question: &QuizQuestion, hide_answers: bool) {
    writer.paragraph(
        &format!("{}. {}", number, question.question),
        Style::Bold,
        BODY_SIZE,
        0.0,
    );

    if question.is_multiple_choice() {
        for (index, option) in question.options.iter().flatten().enumerate() {
            writer.paragraph(
                &format!("{}. {}", option_label(index), option),
                Style::Regular,
                BODY_SIZE,
                6.0,
            );
        }
    }

    if !hide_answers && question.show_answer {
        writer.paragraph(
            &format!("Answer: {}", question.answer),
            Style::Italic,
            BODY_SIZE,
            0.0,
        );
    }
    writer.space(5.0);
}

pub fn render_quiz_pdf(topic: &str, questions: &[QuizQuestion], hide_answers: bool) -> AppResult<Vec<u8>> {
    let title = format!("Quiz Topic: {}", title_case(topic));
    let mut writer = QuizPdfWriter::new(&title)?;

    writer.paragraph(&title, Style::Bold, TITLE_SIZE, 0.0);
    writer.space(8.0);

    for (index, question) in questions.iter().enumerate() {
        write_question(&mut writer, index + 1, question, hide_answers);
    }

    writer.finish()
}

/// `quiz_<topic>_<YYYYmmdd_HHMMSS>.pdf` with the topic reduced to a safe alphabet.
pub fn export_filename(topic: &str) -> String {
    let topic: String = topic
        .trim()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' { c } else { '_' })
        .collect();
    format!("quiz_{}_{}.pdf", topic, Local::now().format("%Y%m%d_%H%M%S"))
}

/// Renders the session, writes it under `exports_dir` and returns the bytes.
pub async fn export_quiz_pdf(
    exports_dir: &Path,
    session: &QuizSession,
    hide_answers: bool,
) -> AppResult<PdfExport> {
    let bytes = render_quiz_pdf(&session.topic, &session.questions, hide_answers)?;
    let filename = export_filename(&session.topic);
    let path = exports_dir.join(&filename);

    tokio::fs::create_dir_all(exports_dir).await?;
    tokio::fs::write(&path, &bytes).await?;
    log::info!("Quiz PDF written to {}", path.display());

    Ok(PdfExport {
        filename,
        path,
        bytes,
    })
}
