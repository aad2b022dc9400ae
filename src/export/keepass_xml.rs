//! KeePass 2.x XML serializer
//!
//! Writes the plain (unencrypted) XML flavour that KeePass, KeePassXC and
//! MacPass accept through "Import > KeePass XML". Tag names, nesting and the
//! fixed `Meta` values are what those importers expect; do not reorder them.
//!
//! ```text
//! KeePassFile
//! ├── Meta
//! └── Root
//!     ├── Group "General"
//!     │   ├── Entry ...          ungrouped entries
//!     │   ├── Group "Finance"    one per LastPass folder
//!     │   │   └── Entry ...
//!     │   └── Group ...
//!     └── DeletedObjects
//! ```

use std::borrow::Cow;
use std::io::Write;

use quick_xml::escape::escape;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use super::identifier::{new_uuid, PLACEHOLDER_UUID};
use crate::error::ConvertResult;
use crate::pipeline::{Group, GroupedRecords, Record, RunContext};

/// Value of `Meta/Generator`.
pub const GENERATOR: &str = "lastpasscsv2keepassxml";

/// Expiry written for items that never expire.
pub const NEVER_EXPIRES: &str = "4001-01-01T00:00:00Z";

const GROUP_ICON_ID: &str = "48";
const ENTRY_ICON_ID: &str = "0";
const MAINTENANCE_HISTORY_DAYS: &str = "365";
const HISTORY_MAX_ITEMS: &str = "10";
const HISTORY_MAX_SIZE: &str = "6291456";

type XmlResult = quick_xml::Result<()>;

/// Render the document for `groups` into a byte buffer.
pub fn render_document(ctx: &RunContext, groups: &GroupedRecords) -> ConvertResult<Vec<u8>> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);

    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    start(&mut writer, "KeePassFile")?;
    write_meta(&mut writer, ctx)?;

    start(&mut writer, "Root")?;
    write_root_group(&mut writer, ctx, groups)?;
    empty(&mut writer, "DeletedObjects")?;
    end(&mut writer, "Root")?;

    end(&mut writer, "KeePassFile")?;

    let mut buf = writer.into_inner();
    buf.push(b'\n');
    Ok(buf)
}

/// Render the document and write it to `output` in a single call.
pub fn write_document<W: Write>(
    mut output: W,
    ctx: &RunContext,
    groups: &GroupedRecords,
) -> ConvertResult<()> {
    let buf = render_document(ctx, groups)?;
    output.write_all(&buf)?;
    output.flush()?;
    Ok(())
}

fn write_meta<W: Write>(w: &mut Writer<W>, ctx: &RunContext) -> XmlResult {
    let ts = ctx.timestamp();

    start(w, "Meta")?;
    text(w, "Generator", GENERATOR)?;
    text(w, "DatabaseName", ctx.database_name())?;
    text(w, "DatabaseNameChanged", ts)?;
    empty(w, "DatabaseDescription")?;
    text(w, "DatabaseDescriptionChanged", ts)?;
    empty(w, "DefaultUserName")?;
    text(w, "DefaultUserNameChanged", ts)?;
    text(w, "MaintenanceHistoryDays", MAINTENANCE_HISTORY_DAYS)?;
    empty(w, "Color")?;
    empty(w, "MasterKeyChanged")?;
    text(w, "MasterKeyChangeRec", "-1")?;
    text(w, "MasterKeyChangeForce", "-1")?;

    start(w, "MemoryProtection")?;
    text(w, "ProtectTitle", "False")?;
    text(w, "ProtectUserName", "False")?;
    text(w, "ProtectPassword", "True")?;
    text(w, "ProtectURL", "False")?;
    text(w, "ProtectNotes", "False")?;
    end(w, "MemoryProtection")?;

    text(w, "RecycleBinEnabled", "False")?;
    text(w, "RecycleBinUUID", PLACEHOLDER_UUID)?;
    text(w, "RecycleBinChanged", ts)?;
    text(w, "EntryTemplatesGroup", PLACEHOLDER_UUID)?;
    text(w, "EntryTemplatesGroupChanged", ts)?;
    text(w, "HistoryMaxItems", HISTORY_MAX_ITEMS)?;
    text(w, "HistoryMaxSize", HISTORY_MAX_SIZE)?;
    text(w, "LastSelectedGroup", PLACEHOLDER_UUID)?;
    text(w, "LastTopVisibleGroup", PLACEHOLDER_UUID)?;
    empty(w, "Binaries")?;
    empty(w, "CustomData")?;
    end(w, "Meta")
}

/// The default group encloses every other group.
fn write_root_group<W: Write>(w: &mut Writer<W>, ctx: &RunContext, groups: &GroupedRecords) -> XmlResult {
    let general = groups.general();
    write_group_header(w, ctx, &general.name)?;
    for record in &general.records {
        write_entry(w, ctx, record)?;
    }
    for group in groups.others() {
        write_group(w, ctx, group)?;
    }
    end(w, "Group")
}

fn write_group<W: Write>(w: &mut Writer<W>, ctx: &RunContext, group: &Group) -> XmlResult {
    write_group_header(w, ctx, &group.name)?;
    for record in &group.records {
        write_entry(w, ctx, record)?;
    }
    end(w, "Group")
}

/// Everything up to the group's entries. The caller closes the element.
fn write_group_header<W: Write>(w: &mut Writer<W>, ctx: &RunContext, name: &str) -> XmlResult {
    start(w, "Group")?;
    text(w, "UUID", &new_uuid())?;
    text(w, "Name", name)?;
    empty(w, "Notes")?;
    text(w, "IconID", GROUP_ICON_ID)?;
    write_times(w, ctx)?;
    text(w, "IsExpanded", "True")?;
    empty(w, "DefaultAutoTypeSequence")?;
    text(w, "EnableAutoType", "null")?;
    text(w, "EnableSearching", "null")?;
    text(w, "LastTopVisibleEntry", PLACEHOLDER_UUID)
}

fn write_entry<W: Write>(w: &mut Writer<W>, ctx: &RunContext, record: &Record) -> XmlResult {
    start(w, "Entry")?;
    text(w, "UUID", &new_uuid())?;
    text(w, "IconID", ENTRY_ICON_ID)?;
    empty(w, "ForegroundColor")?;
    empty(w, "BackgroundColor")?;
    empty(w, "OverrideURL")?;
    match record.tags.as_deref() {
        Some(tags) if !tags.is_empty() => text(w, "Tags", tags)?,
        _ => empty(w, "Tags")?,
    }
    write_times(w, ctx)?;

    for (field, value) in record.present_fields() {
        start(w, "String")?;
        text(w, "Key", field.key())?;
        let value_element = w.create_element("Value");
        let value_element = if field.is_protected() {
            value_element.with_attribute(("ProtectInMemory", "True"))
        } else {
            value_element
        };
        value_element.write_text_content(escaped_text(value))?;
        end(w, "String")?;
    }

    start(w, "AutoType")?;
    text(w, "Enabled", "True")?;
    text(w, "DataTransferObfuscation", "0")?;
    end(w, "AutoType")?;
    empty(w, "History")?;
    end(w, "Entry")
}

fn write_times<W: Write>(w: &mut Writer<W>, ctx: &RunContext) -> XmlResult {
    let ts = ctx.timestamp();

    start(w, "Times")?;
    text(w, "LastModificationTime", ts)?;
    text(w, "CreationTime", ts)?;
    text(w, "LastAccessTime", ts)?;
    text(w, "ExpiryTime", NEVER_EXPIRES)?;
    text(w, "Expires", "False")?;
    text(w, "UsageCount", "0")?;
    text(w, "LocationChanged", ts)?;
    end(w, "Times")
}

fn start<W: Write>(w: &mut Writer<W>, tag: &str) -> XmlResult {
    w.write_event(Event::Start(BytesStart::new(tag)))
}

fn end<W: Write>(w: &mut Writer<W>, tag: &str) -> XmlResult {
    w.write_event(Event::End(BytesEnd::new(tag)))
}

fn empty<W: Write>(w: &mut Writer<W>, tag: &str) -> XmlResult {
    w.create_element(tag).write_empty()?;
    Ok(())
}

/// Leaf element with escaped text content.
fn text<W: Write>(w: &mut Writer<W>, tag: &str, value: &str) -> XmlResult {
    w.create_element(tag).write_text_content(escaped_text(value))?;
    Ok(())
}

/// Entity-escape `value`. Carriage returns become `&#13;` because parsers
/// fold a literal CRLF into LF, which would lose Windows line endings in notes.
fn escaped_text(value: &str) -> BytesText<'static> {
    let escaped = escape(xml_chars(value).as_ref()).replace('\r', "&#13;");
    BytesText::from_escaped(escaped)
}

/// Drop characters XML 1.0 cannot carry at all (most C0 controls). Importers
/// reject the whole file otherwise.
fn xml_chars(value: &str) -> Cow<'_, str> {
    fn allowed(c: char) -> bool {
        matches!(c, '\t' | '\n' | '\r') || (c >= ' ' && c != '\u{fffe}' && c != '\u{ffff}')
    }

    if value.chars().all(allowed) {
        Cow::Borrowed(value)
    } else {
        Cow::Owned(value.chars().filter(|&c| allowed(c)).collect())
    }
}
