//! DOCX の表抽出
//!
//! DOCX は ZIP アーカイブで、本文は `word/document.xml` にある。
//! 本文直下の表（w:tbl）だけを対象にし、セル内の入れ子の表は無視する。
//!
//! セルの扱い:
//! - 段落（w:p）ごとのテキストを改行で連結し、前後の空白を除去
//! - w:t はそのまま、w:tab はタブ、w:br / w:cr は改行
//! - テキストボックス（w:txbxContent）と mc:Fallback の中身は読まない
//! - 横結合（w:gridSpan=n）は同じテキストを n 回繰り返す
//! - 縦結合の継続セル（restart 以外の w:vMerge）は上の行の同じ列のテキスト

use crate::error::{Result, TemplateError};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::io::{Read, Seek};
use word_templates_common::RawTable;
use zip::ZipArchive;

const DOCUMENT_XML: &str = "word/document.xml";

/// 1セルの横結合の上限（Wordの最大列数）
const MAX_GRID_SPAN: usize = 63;

/// 要素の属性値を取得
fn attr_value(e: &BytesStart, key: &[u8]) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|a| a.key.as_ref() == key)
        .map(|a| String::from_utf8_lossy(&a.value).into_owned())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum VerticalMerge {
    #[default]
    None,
    Restart,
    Continue,
}

#[derive(Debug)]
struct CellBuilder {
    paragraphs: Vec<String>,
    grid_span: usize,
    v_merge: VerticalMerge,
}

impl CellBuilder {
    fn new() -> Self {
        Self {
            paragraphs: Vec::new(),
            grid_span: 1,
            v_merge: VerticalMerge::None,
        }
    }

    fn text(&self) -> String {
        self.paragraphs.join("\n").trim().to_string()
    }
}

#[derive(Debug, Default)]
struct TableBuilder {
    rows: Vec<Vec<String>>,
    /// 縦結合の参照用（結合展開後の直前の行）
    previous_row: Vec<String>,
}

impl TableBuilder {
    fn finish_row(&mut self, cells: Vec<CellBuilder>) {
        let mut row: Vec<String> = Vec::with_capacity(cells.len());
        for cell in cells {
            let text = match cell.v_merge {
                VerticalMerge::Continue => self
                    .previous_row
                    .get(row.len())
                    .cloned()
                    .unwrap_or_default(),
                VerticalMerge::None | VerticalMerge::Restart => cell.text(),
            };
            for _ in 0..cell.grid_span {
                row.push(text.clone());
            }
        }
        self.previous_row = row.clone();
        self.rows.push(row);
    }
}

/// document.xml を走査して表を組み立てる状態
#[derive(Debug, Default)]
struct TableWalker {
    /// 開いている要素名
    stack: Vec<Vec<u8>>,
    table_depth: usize,
    /// テキストボックス等、読み飛ばす領域の深さ
    skip_depth: usize,
    table: Option<TableBuilder>,
    row: Option<Vec<CellBuilder>>,
    cell: Option<CellBuilder>,
    paragraph: Option<String>,
    tables: Vec<RawTable>,
}

impl TableWalker {
    fn in_top_table(&self) -> bool {
        self.table_depth == 1 && self.skip_depth == 0 && self.table.is_some()
    }

    fn in_top_cell(&self) -> bool {
        self.in_top_table() && self.cell.is_some()
    }

    fn parent_is(&self, name: &[u8]) -> bool {
        self.stack.last().map(Vec::as_slice) == Some(name)
    }

    /// w:r 直下にいて、セルの段落を組み立て中か
    fn in_cell_run(&self) -> bool {
        self.in_top_cell() && self.paragraph.is_some() && self.parent_is(b"w:r")
    }

    fn in_cell_text(&self) -> bool {
        let n = self.stack.len();
        self.in_top_cell()
            && self.paragraph.is_some()
            && n >= 2
            && self.stack[n - 1] == b"w:t"
            && self.stack[n - 2] == b"w:r"
    }

    fn handle_cell_property(&mut self, e: &BytesStart) {
        if !self.in_top_cell() || !self.parent_is(b"w:tcPr") {
            return;
        }
        let Some(cell) = self.cell.as_mut() else {
            return;
        };
        match e.name().as_ref() {
            b"w:gridSpan" => {
                cell.grid_span = attr_value(e, b"w:val")
                    .and_then(|v| v.parse::<usize>().ok())
                    .unwrap_or(1)
                    .clamp(1, MAX_GRID_SPAN);
            }
            b"w:vMerge" => {
                cell.v_merge = match attr_value(e, b"w:val").as_deref() {
                    Some("restart") => VerticalMerge::Restart,
                    _ => VerticalMerge::Continue,
                };
            }
            _ => {}
        }
    }

    fn start(&mut self, e: &BytesStart) {
        match e.name().as_ref() {
            b"w:tbl" => {
                self.table_depth += 1;
                if self.table_depth == 1 && self.skip_depth == 0 {
                    self.table = Some(TableBuilder::default());
                }
            }
            b"w:tr" if self.in_top_table() => self.row = Some(Vec::new()),
            b"w:tc" if self.in_top_table() && self.row.is_some() => {
                self.cell = Some(CellBuilder::new());
            }
            b"w:p" if self.in_top_cell() && self.paragraph.is_none() => {
                self.paragraph = Some(String::new());
            }
            b"w:txbxContent" | b"mc:Fallback" => self.skip_depth += 1,
            b"w:gridSpan" | b"w:vMerge" => self.handle_cell_property(e),
            _ => {}
        }
        self.stack.push(e.name().as_ref().to_vec());
    }

    fn empty(&mut self, e: &BytesStart) {
        match e.name().as_ref() {
            b"w:tab" if self.in_cell_run() => self.push_text("\t"),
            b"w:br" | b"w:cr" if self.in_cell_run() => self.push_text("\n"),
            b"w:p" if self.in_top_cell() && self.paragraph.is_none() => {
                if let Some(cell) = self.cell.as_mut() {
                    cell.paragraphs.push(String::new());
                }
            }
            b"w:tc" if self.in_top_table() => {
                if let Some(row) = self.row.as_mut() {
                    row.push(CellBuilder::new());
                }
            }
            b"w:tr" if self.in_top_table() => {
                if let Some(table) = self.table.as_mut() {
                    table.finish_row(Vec::new());
                }
            }
            b"w:gridSpan" | b"w:vMerge" => self.handle_cell_property(e),
            _ => {}
        }
    }

    fn end(&mut self, name: &[u8]) {
        self.stack.pop();
        match name {
            b"w:p" if self.in_top_cell() => {
                if let (Some(paragraph), Some(cell)) = (self.paragraph.take(), self.cell.as_mut()) {
                    cell.paragraphs.push(paragraph);
                }
            }
            b"w:tc" if self.in_top_table() => {
                if let (Some(cell), Some(row)) = (self.cell.take(), self.row.as_mut()) {
                    row.push(cell);
                }
            }
            b"w:tr" if self.in_top_table() => {
                if let (Some(cells), Some(table)) = (self.row.take(), self.table.as_mut()) {
                    table.finish_row(cells);
                }
            }
            b"w:tbl" => {
                if self.table_depth == 1 && self.skip_depth == 0 {
                    if let Some(table) = self.table.take() {
                        if table.rows.is_empty() {
                            tracing::debug!("空の表をスキップ");
                        } else {
                            self.tables.push(RawTable::new(table.rows));
                        }
                    }
                }
                self.table_depth = self.table_depth.saturating_sub(1);
            }
            b"w:txbxContent" | b"mc:Fallback" => {
                self.skip_depth = self.skip_depth.saturating_sub(1);
            }
            _ => {}
        }
    }

    fn push_text(&mut self, text: &str) {
        if let Some(paragraph) = self.paragraph.as_mut() {
            paragraph.push_str(text);
        }
    }
}

/// document.xml の内容から表を抽出
pub fn parse_document_xml(xml: &str) -> Result<Vec<RawTable>> {
    let mut reader = Reader::from_str(xml);
    let mut walker = TableWalker::default();

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => walker.start(&e),
            Ok(Event::Empty(e)) => walker.empty(&e),
            Ok(Event::End(e)) => walker.end(e.name().as_ref()),
            Ok(Event::Text(t)) if walker.in_cell_text() => {
                let text = t.unescape().map_err(|e| {
                    TemplateError::Parse(format!("{} のテキストが不正: {}", DOCUMENT_XML, e))
                })?;
                walker.push_text(&text);
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(TemplateError::Parse(format!(
                    "{} の解析エラー (位置 {}): {}",
                    DOCUMENT_XML,
                    reader.buffer_position(),
                    e
                )))
            }
            _ => {}
        }
    }

    Ok(walker.tables)
}

/// ZIP として読める任意のリーダーから表を抽出
pub fn extract_tables_from_reader<R: Read + Seek>(reader: R) -> Result<Vec<RawTable>> {
    let mut archive = ZipArchive::new(reader)
        .map_err(|e| TemplateError::Parse(format!("DOCXをZIPとして開けません: {}", e)))?;

    let xml = {
        let mut file = archive
            .by_name(DOCUMENT_XML)
            .map_err(|e| TemplateError::Parse(format!("{} がありません: {}", DOCUMENT_XML, e)))?;
        let mut content = String::new();
        file.read_to_string(&mut content)
            .map_err(|e| TemplateError::Parse(format!("{} を読めません: {}", DOCUMENT_XML, e)))?;
        content
    };

    parse_document_xml(&xml)
}
