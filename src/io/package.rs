//! Adds a worksheet to an existing `.xlsx` package.
//!
//! Every part already in the archive is raw-copied, so the bytes of the
//! existing sheets, styles and shared strings do not change. Only the
//! workbook, its relationships and `[Content_Types].xml` are rewritten, each
//! gaining one entry for the new sheet.

use std::collections::{HashMap, HashSet};
use std::io::{Read, Seek, Write};

use quick_xml::events::attributes::AttrError;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::name::Prefix;
use quick_xml::{Reader, Writer};
use rust_xlsxwriter::utility::row_col_to_cell;
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

use crate::table::{Cell, Table};

const CONTENT_TYPES_PART: &str = "[Content_Types].xml";
const PACKAGE_RELS_PART: &str = "_rels/.rels";
const SPREADSHEET_NS: &str = "http://schemas.openxmlformats.org/spreadsheetml/2006/main";
const RELATIONSHIPS_NS: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
const WORKSHEET_REL_TYPE: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet";
const WORKSHEET_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml";

/// Characters Excel refuses in a sheet name
const INVALID_SHEET_CHARS: [char; 7] = ['[', ']', ':', '*', '?', '/', '\\'];
const MAX_SHEET_NAME_CHARS: usize = 31;

#[derive(Debug, thiserror::Error)]
pub enum PackageError {
    #[error("zip error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("xml error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("xml attribute error: {0}")]
    Attr(#[from] AttrError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("workbook part '{0}' is missing")]
    MissingPart(String),

    #[error("malformed workbook: {0}")]
    Malformed(&'static str),

    #[error("invalid sheet name '{name}': {reason}")]
    SheetName { name: String, reason: &'static str },
}

type Result<T> = std::result::Result<T, PackageError>;

/// Copies the package in `source` to `output` with `table` added as the
/// last sheet, named `sheet`. Returns the new sheet count.
pub fn append_worksheet<R, W>(source: R, output: W, sheet: &str, table: &Table) -> Result<usize>
where
    R: Read + Seek,
    W: Write + Seek,
{
    let mut archive = ZipArchive::new(source)?;
    let existing: HashSet<String> = archive
        .file_names()
        .map(|name| name.to_ascii_lowercase())
        .collect();

    let workbook = workbook_part(&mut archive)?;
    let (dir, file) = split_part(&workbook);
    let rels = join_part(dir, &format!("_rels/{file}.rels"));
    let target = unused_worksheet_target(dir, &existing);
    let sheet_part = join_part(dir, &target);

    let (rels_xml, rel_id) = add_relationship(&read_part(&mut archive, &rels)?, &target)?;
    let (workbook_xml, sheet_count) =
        add_sheet_entry(&read_part(&mut archive, &workbook)?, sheet, &rel_id)?;
    let content_types_xml =
        add_content_type(&read_part(&mut archive, CONTENT_TYPES_PART)?, &sheet_part)?;

    let mut replaced: HashMap<&str, Vec<u8>> = HashMap::new();
    replaced.insert(rels.as_str(), rels_xml);
    replaced.insert(workbook.as_str(), workbook_xml);
    replaced.insert(CONTENT_TYPES_PART, content_types_xml);

    let mut zip = ZipWriter::new(output);
    let options = FileOptions::<()>::default().compression_method(CompressionMethod::Deflated);
    for i in 0..archive.len() {
        let file = archive.by_index_raw(i)?;
        match replaced.get(file.name()) {
            Some(bytes) => {
                zip.start_file(file.name().to_string(), options)?;
                zip.write_all(bytes)?;
            }
            None => zip.raw_copy_file(file)?,
        }
    }
    zip.start_file(sheet_part, options)?;
    zip.write_all(&worksheet_xml(table)?)?;
    zip.finish()?;

    Ok(sheet_count)
}

/// Rejects names Excel would refuse, including a case-insensitive repeat
/// of one of `existing`
pub fn validate_sheet_name(name: &str, existing: &[String]) -> Result<()> {
    let invalid = |reason: &'static str| -> Result<()> {
        Err(PackageError::SheetName {
            name: name.to_string(),
            reason,
        })
    };
    if name.is_empty() {
        return invalid("name is empty");
    }
    if name.chars().count() > MAX_SHEET_NAME_CHARS {
        return invalid("longer than 31 characters");
    }
    if name.contains(INVALID_SHEET_CHARS) {
        return invalid("contains one of [ ] : * ? / \\");
    }
    if name.starts_with('\'') || name.ends_with('\'') {
        return invalid("starts or ends with an apostrophe");
    }
    if existing.iter().any(|other| other.to_lowercase() == name.to_lowercase()) {
        return invalid("a sheet with that name already exists");
    }
    Ok(())
}

fn read_part<R: Read + Seek>(archive: &mut ZipArchive<R>, name: &str) -> Result<Vec<u8>> {
    let mut file = match archive.by_name(name) {
        Ok(file) => file,
        Err(zip::result::ZipError::FileNotFound) => {
            return Err(PackageError::MissingPart(name.to_string()))
        }
        Err(e) => return Err(e.into()),
    };
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes)?;
    Ok(bytes)
}

/// The main workbook part named by the package relationships
fn workbook_part<R: Read + Seek>(archive: &mut ZipArchive<R>) -> Result<String> {
    let rels = read_part(archive, PACKAGE_RELS_PART)?;
    let mut target = None;
    for_each_element(&rels, |element| {
        if local_name(element.name().as_ref()) == b"Relationship"
            && attribute(element, b"Type")?.is_some_and(|t| t.ends_with("/officeDocument"))
        {
            target = attribute(element, b"Target")?;
        }
        Ok(())
    })?;
    target
        .map(|t| t.trim_start_matches('/').to_string())
        .ok_or(PackageError::Malformed("no officeDocument relationship"))
}

fn split_part(part: &str) -> (&str, &str) {
    part.rsplit_once('/').unwrap_or(("", part))
}

fn join_part(dir: &str, relative: &str) -> String {
    if dir.is_empty() {
        relative.to_string()
    } else {
        format!("{dir}/{relative}")
    }
}

/// First `worksheets/sheetN.xml` (relative to the workbook) not in the archive
fn unused_worksheet_target(dir: &str, existing: &HashSet<String>) -> String {
    let mut n = 1;
    loop {
        let target = format!("worksheets/sheet{n}.xml");
        if !existing.contains(&join_part(dir, &target).to_ascii_lowercase()) {
            return target;
        }
        n += 1;
    }
}

fn local_name(name: &[u8]) -> &[u8] {
    name.rsplit(|&b| b == b':').next().unwrap_or(name)
}

fn qualified(prefix: Option<Prefix<'_>>, local: &str) -> String {
    match prefix {
        Some(prefix) => format!("{}:{local}", String::from_utf8_lossy(prefix.as_ref())),
        None => local.to_string(),
    }
}

fn attribute(element: &BytesStart<'_>, key: &[u8]) -> Result<Option<String>> {
    for attr in element.attributes() {
        let attr = attr?;
        if local_name(attr.key.as_ref()) == key {
            return Ok(Some(attr.unescape_value()?.into_owned()));
        }
    }
    Ok(None)
}

/// Prefix bound to `namespace` by an `xmlns:` attribute of `element`
fn namespace_prefix(element: &BytesStart<'_>, namespace: &str) -> Result<Option<String>> {
    for attr in element.attributes() {
        let attr = attr?;
        if let Some(prefix) = attr.key.as_ref().strip_prefix(b"xmlns:") {
            if attr.unescape_value()? == namespace {
                return Ok(Some(String::from_utf8_lossy(prefix).into_owned()));
            }
        }
    }
    Ok(None)
}

fn for_each_element<F>(xml: &[u8], mut visit: F) -> Result<()>
where
    F: FnMut(&BytesStart<'_>) -> Result<()>,
{
    let mut reader = Reader::from_reader(xml);
    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) | Event::Empty(e) => visit(&e)?,
            Event::Eof => return Ok(()),
            _ => {}
        }
        buf.clear();
    }
}

/// Streams `xml` through unchanged, calling `visit` before each event is
/// written so it can emit extra events in front of it
fn rewrite<F>(xml: &[u8], mut visit: F) -> Result<Vec<u8>>
where
    F: FnMut(&Event<'_>, &mut Writer<Vec<u8>>) -> Result<()>,
{
    let mut reader = Reader::from_reader(xml);
    reader.config_mut().trim_text(false);
    let mut writer = Writer::new(Vec::with_capacity(xml.len() + 256));
    let mut buf = Vec::new();
    loop {
        let event = reader.read_event_into(&mut buf)?;
        if matches!(event, Event::Eof) {
            break;
        }
        visit(&event, &mut writer)?;
        writer.write_event(event)?;
        buf.clear();
    }
    Ok(writer.into_inner())
}

/// Adds a worksheet relationship; returns the new XML and its id
fn add_relationship(xml: &[u8], target: &str) -> Result<(Vec<u8>, String)> {
    let mut ids = HashSet::new();
    let mut new_id = None;
    let patched = rewrite(xml, |event, writer| {
        match event {
            Event::Start(e) | Event::Empty(e)
                if local_name(e.name().as_ref()) == b"Relationship" =>
            {
                if let Some(id) = attribute(e, b"Id")? {
                    ids.insert(id);
                }
            }
            Event::End(e) if local_name(e.name().as_ref()) == b"Relationships" => {
                let id = unused_relationship_id(&ids);
                let mut rel = BytesStart::new(qualified(e.name().prefix(), "Relationship"));
                rel.push_attribute(("Id", id.as_str()));
                rel.push_attribute(("Type", WORKSHEET_REL_TYPE));
                rel.push_attribute(("Target", target));
                writer.write_event(Event::Empty(rel))?;
                new_id = Some(id);
            }
            _ => {}
        }
        Ok(())
    })?;
    let id = new_id.ok_or(PackageError::Malformed("workbook relationships are not closed"))?;
    Ok((patched, id))
}

fn unused_relationship_id(ids: &HashSet<String>) -> String {
    let mut n = ids.len() + 1;
    loop {
        let id = format!("rId{n}");
        if !ids.contains(&id) {
            return id;
        }
        n += 1;
    }
}

/// Adds a `<sheet>` to the end of `<sheets>`; returns the new XML and the
/// sheet count
fn add_sheet_entry(xml: &[u8], sheet: &str, rel_id: &str) -> Result<(Vec<u8>, usize)> {
    let mut names = Vec::new();
    let mut max_sheet_id = 0u32;
    let mut rel_prefix = None;
    let mut added = false;
    let patched = rewrite(xml, |event, writer| {
        match event {
            Event::Start(e) if local_name(e.name().as_ref()) == b"workbook" => {
                rel_prefix = namespace_prefix(e, RELATIONSHIPS_NS)?;
            }
            Event::Start(e) | Event::Empty(e) if local_name(e.name().as_ref()) == b"sheet" => {
                if let Some(name) = attribute(e, b"name")? {
                    names.push(name);
                }
                if let Some(id) = attribute(e, b"sheetId")? {
                    max_sheet_id = max_sheet_id.max(id.parse().unwrap_or(0));
                }
            }
            Event::End(e) if local_name(e.name().as_ref()) == b"sheets" && !added => {
                validate_sheet_name(sheet, &names)?;
                let mut entry = BytesStart::new(qualified(e.name().prefix(), "sheet"));
                entry.push_attribute(("name", sheet));
                entry.push_attribute(("sheetId", (max_sheet_id + 1).to_string().as_str()));
                match &rel_prefix {
                    Some(prefix) => entry.push_attribute((format!("{prefix}:id").as_str(), rel_id)),
                    None => {
                        entry.push_attribute(("xmlns:r", RELATIONSHIPS_NS));
                        entry.push_attribute(("r:id", rel_id));
                    }
                }
                writer.write_event(Event::Empty(entry))?;
                added = true;
            }
            _ => {}
        }
        Ok(())
    })?;
    if !added {
        return Err(PackageError::Malformed("workbook has no sheet list"));
    }
    Ok((patched, names.len() + 1))
}

fn add_content_type(xml: &[u8], part: &str) -> Result<Vec<u8>> {
    let mut added = false;
    let patched = rewrite(xml, |event, writer| {
        if let Event::End(e) = event {
            if local_name(e.name().as_ref()) == b"Types" {
                let mut entry = BytesStart::new(qualified(e.name().prefix(), "Override"));
                entry.push_attribute(("PartName", format!("/{part}").as_str()));
                entry.push_attribute(("ContentType", WORKSHEET_CONTENT_TYPE));
                writer.write_event(Event::Empty(entry))?;
                added = true;
            }
        }
        Ok(())
    })?;
    if !added {
        return Err(PackageError::Malformed("content types are not closed"));
    }
    Ok(patched)
}

/// Worksheet XML for `table`: header in row 1, strings stored inline so the
/// workbook's shared string table stays as it is
pub fn worksheet_xml(table: &Table) -> Result<Vec<u8>> {
    let mut writer = Writer::new(Vec::new());
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))?;
    let mut root = BytesStart::new("worksheet");
    root.push_attribute(("xmlns", SPREADSHEET_NS));
    root.push_attribute(("xmlns:r", RELATIONSHIPS_NS));
    writer.write_event(Event::Start(root))?;
    writer.write_event(Event::Start(BytesStart::new("sheetData")))?;

    let header: Vec<Cell> = table.headers.iter().map(Cell::text).collect();
    write_row(&mut writer, 0, &header)?;
    for (idx, row) in table.rows.iter().enumerate() {
        write_row(&mut writer, (idx + 1) as u32, row)?;
    }

    writer.write_event(Event::End(BytesEnd::new("sheetData")))?;
    writer.write_event(Event::End(BytesEnd::new("worksheet")))?;
    Ok(writer.into_inner())
}

fn write_row<W: Write>(writer: &mut Writer<W>, row: u32, cells: &[Cell]) -> Result<()> {
    let mut tag = BytesStart::new("row");
    tag.push_attribute(("r", (row + 1).to_string().as_str()));
    writer.write_event(Event::Start(tag))?;

    for (col, cell) in cells.iter().enumerate() {
        let reference = row_col_to_cell(row, col as u16);
        let mut tag = BytesStart::new("c");
        tag.push_attribute(("r", reference.as_str()));
        match cell {
            Cell::Empty => continue,
            Cell::Text(s) => {
                tag.push_attribute(("t", "inlineStr"));
                writer.write_event(Event::Start(tag))?;
                writer.write_event(Event::Start(BytesStart::new("is")))?;
                let mut text = BytesStart::new("t");
                text.push_attribute(("xml:space", "preserve"));
                writer.write_event(Event::Start(text))?;
                writer.write_event(Event::Text(BytesText::new(s)))?;
                writer.write_event(Event::End(BytesEnd::new("t")))?;
                writer.write_event(Event::End(BytesEnd::new("is")))?;
            }
            Cell::Bool(b) => {
                tag.push_attribute(("t", "b"));
                write_value(writer, tag, if *b { "1" } else { "0" })?;
            }
            Cell::Int(i) => write_value(writer, tag, &i.to_string())?,
            Cell::Float(f) | Cell::DateTime(f) => write_value(writer, tag, &f.to_string())?,
        }
        writer.write_event(Event::End(BytesEnd::new("c")))?;
    }

    writer.write_event(Event::End(BytesEnd::new("row")))?;
    Ok(())
}

/// Opens `tag` and writes its `<v>`; the caller closes the cell
fn write_value<W: Write>(writer: &mut Writer<W>, tag: BytesStart<'_>, value: &str) -> Result<()> {
    writer.write_event(Event::Start(tag))?;
    writer.write_event(Event::Start(BytesStart::new("v")))?;
    writer.write_event(Event::Text(BytesText::new(value)))?;
    writer.write_event(Event::End(BytesEnd::new("v")))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const WORKBOOK: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"><sheets><sheet name="Knee" sheetId="1" r:id="rId1"/><sheet name="Hip" sheetId="4" r:id="rId2"/></sheets><calcPr calcId="124519"/></workbook>"#;

    const RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/><Relationship Id="rId3" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/></Relationships>"#;

    fn text(bytes: Vec<u8>) -> String {
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn test_sheet_entry_is_added_after_existing_sheets() {
        let (xml, count) = add_sheet_entry(WORKBOOK.as_bytes(), "CABG & Valve", "rId9").unwrap();
        let xml = text(xml);

        assert_eq!(count, 3);
        assert!(xml.contains(
            r#"<sheet name="Hip" sheetId="4" r:id="rId2"/><sheet name="CABG &amp; Valve" sheetId="5" r:id="rId9"/></sheets>"#
        ));
        assert!(xml.ends_with(r#"<calcPr calcId="124519"/></workbook>"#));
    }

    #[test]
    fn test_duplicate_sheet_name_is_rejected_ignoring_case() {
        let result = add_sheet_entry(WORKBOOK.as_bytes(), "knee", "rId9");

        assert!(matches!(result, Err(PackageError::SheetName { .. })));
    }

    #[test]
    fn test_relationship_id_skips_ids_in_use() {
        let (xml, id) = add_relationship(RELS.as_bytes(), "worksheets/sheet2.xml").unwrap();

        assert_eq!(id, "rId4");
        assert!(text(xml).contains(r#"<Relationship Id="rId4" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet2.xml"/></Relationships>"#));
    }

    #[test]
    fn test_sheet_name_rules() {
        assert!(validate_sheet_name("CABG_2024-03-01_14-05-09", &[]).is_ok());
        assert!(validate_sheet_name("", &[]).is_err());
        assert!(validate_sheet_name("bad[name]", &[]).is_err());
        assert!(validate_sheet_name("'quoted'", &[]).is_err());
        assert!(validate_sheet_name(&"x".repeat(32), &[]).is_err());
    }

    #[test]
    fn test_worksheet_cells_are_placed_by_reference() {
        let mut table = Table::with_headers(&["Quantity", "Service", "Hold"]);
        table.push_row(vec![Cell::Int(3), Cell::Empty, Cell::Bool(true)]);

        let xml = text(worksheet_xml(&table).unwrap());

        assert!(xml.contains(r#"<c r="B1" t="inlineStr"><is><t xml:space="preserve">Service</t></is></c>"#));
        assert!(xml.contains(r#"<row r="2"><c r="A2"><v>3</v></c><c r="C2" t="b"><v>1</v></c></row>"#));
    }
}
