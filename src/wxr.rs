//! WXR document assembly and serialization.
//!
//! A WXR file is an RSS 2.0 document with WordPress namespace extensions.
//! The whole document is accumulated in memory and written once, so a
//! failure partway through processing never leaves a half-written file.

use std::io::Write;

use quick_xml::Writer;
use quick_xml::events::{BytesCData, BytesDecl, BytesEnd, BytesStart, BytesText, Event};

use crate::project::OutputRecord;

const NAMESPACES: &[(&str, &str)] = &[
    ("xmlns:excerpt", "http://wordpress.org/export/1.2/excerpt/"),
    ("xmlns:content", "http://purl.org/rss/1.0/modules/content/"),
    ("xmlns:wfw", "http://wellformedweb.org/CommentAPI/"),
    ("xmlns:dc", "http://purl.org/dc/elements/1.1/"),
    ("xmlns:wp", "http://wordpress.org/export/1.2/"),
];

const WXR_VERSION: &str = "1.2";

/// The output document: header fields plus items in arrival order.
#[derive(Debug, Default)]
pub struct WxrDocument {
    items: Vec<OutputRecord>,
}

impl WxrDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: OutputRecord) {
        self.items.push(record);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Serialize the whole document, pretty-printed with two-space indent.
    ///
    /// Element text is escaped by the XML layer; the rich-text body is the
    /// one exception and goes out as a CDATA section so its markup survives
    /// verbatim.
    pub fn write_to<W: Write>(&self, out: W) -> anyhow::Result<()> {
        let mut writer = Writer::new_with_indent(out, b' ', 2);

        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;
        let mut rss = BytesStart::new("rss");
        rss.push_attribute(("version", "2.0"));
        for (name, uri) in NAMESPACES {
            rss.push_attribute((*name, *uri));
        }
        writer.write_event(Event::Start(rss))?;
        writer.write_event(Event::Start(BytesStart::new("channel")))?;
        text_element(&mut writer, "wp:wxr_version", WXR_VERSION)?;
        for item in &self.items {
            write_item(&mut writer, item)?;
        }
        writer.write_event(Event::End(BytesEnd::new("channel")))?;
        writer.write_event(Event::End(BytesEnd::new("rss")))?;
        Ok(())
    }
}

fn write_item<W: Write>(writer: &mut Writer<W>, record: &OutputRecord) -> anyhow::Result<()> {
    writer.write_event(Event::Start(BytesStart::new("item")))?;
    text_element(writer, "wp:post_type", record.post_type)?;
    if let Some(title) = &record.title {
        text_element(writer, "title", title)?;
    }
    text_element(writer, "dc:creator", record.creator)?;
    if let Some(body) = &record.body {
        writer.write_event(Event::Start(BytesStart::new("content:encoded")))?;
        writer.write_event(Event::CData(BytesCData::new(body.as_str())))?;
        writer.write_event(Event::End(BytesEnd::new("content:encoded")))?;
    }
    for tag in &record.tags {
        let mut category = BytesStart::new("category");
        category.push_attribute(("domain", "post_tag"));
        category.push_attribute(("nicename", tag.slug.as_str()));
        writer.write_event(Event::Start(category))?;
        writer.write_event(Event::Text(BytesText::new(&tag.name)))?;
        writer.write_event(Event::End(BytesEnd::new("category")))?;
    }
    for meta in &record.meta {
        writer.write_event(Event::Start(BytesStart::new("wp:postmeta")))?;
        text_element(writer, "wp:meta_key", meta.key)?;
        text_element(writer, "wp:meta_value", &meta.value)?;
        writer.write_event(Event::End(BytesEnd::new("wp:postmeta")))?;
    }
    writer.write_event(Event::End(BytesEnd::new("item")))?;
    Ok(())
}

fn text_element<W: Write>(writer: &mut Writer<W>, name: &str, value: &str) -> anyhow::Result<()> {
    writer.write_event(Event::Start(BytesStart::new(name)))?;
    writer.write_event(Event::Text(BytesText::new(value)))?;
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}
