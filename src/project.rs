//! Projection of one Zotero row into one WordPress publication item.
//!
//! The destination is a custom `publications` post type built with the
//! Toolset Types plugin, so almost everything lands in `wpcf-pub-*` meta
//! fields rather than in the structural post fields.

use crate::{
    dedupe::TitleRegistry,
    source::SourceRecord,
    transform::{date_specificity, extract_kv, parse_partial_date, split_name_list, split_title_subtitle},
};

/// Post type every exported item is imported as.
pub const POST_TYPE: &str = "publications";

/// Attribution lives in `wpcf-pub-author` metadata; the structural author
/// field is pinned to a placeholder account.
pub const CREATOR: &str = "anonymous";

/// Surname fragments worth tagging, with their canonical display names.
/// Slice order is tag emission order.
static AUTHOR_TAGS: &[(&str, &str)] = &[
    ("Juengst", "Eric Juengst"),
    ("Lyerly", "Anne Lyerly"),
    ("Buchbinder", "Mara Buchbinder"),
    ("Cadigan", "Jean Cadigan"),
    ("Davis", "Arlene Davis"),
    ("Fisher", "Jill Fisher"),
    ("MacKay", "Doug MacKay"),
    ("Rennie", "Stuart Rennie"),
    ("Walker", "Rebecca Walker"),
    ("Winstanly", "Louise Winstanly"),
];

/// One destination entity, ready for serialization.
#[derive(Debug)]
pub struct OutputRecord {
    pub post_type: &'static str,
    pub title: Option<String>,
    pub creator: &'static str,
    pub body: Option<String>,
    pub tags: Vec<Tag>,
    pub meta: Vec<Meta>,
}

/// A `post_tag` taxonomy term: display name plus URL slug.
#[derive(Debug, PartialEq)]
pub struct Tag {
    pub name: String,
    pub slug: String,
}

/// One `wp:postmeta` key/value pair. Keys may repeat (one entry per
/// author, editor, or reviewed author).
#[derive(Debug, PartialEq)]
pub struct Meta {
    pub key: &'static str,
    pub value: String,
}

/// Derive a URL slug from a display name.
pub fn slug(name: &str) -> String {
    name.to_lowercase().replace(' ', "-")
}

/// Build the output record for one source row.
///
/// The title is deduplicated through `titles` before use. Meta entries are
/// emitted in a fixed order, and every entry whose source value is empty is
/// dropped rather than emitted blank.
pub fn project_record(record: &SourceRecord, titles: &mut TitleRegistry) -> OutputRecord {
    let (short_title, subtitle) = split_title_subtitle(&record.title);
    let title = titles.resolve(short_title);

    let mut tags = Vec::new();
    let names_on_record = format!("{}{}{}", record.author, record.editor, record.reviewed_author);
    for (fragment, full_name) in AUTHOR_TAGS {
        if names_on_record.contains(fragment) {
            tags.push(Tag {
                name: (*full_name).to_string(),
                slug: slug(full_name),
            });
        }
    }

    let mut meta = Vec::new();
    let mut push = |key: &'static str, value: String| {
        if !value.is_empty() {
            meta.push(Meta { key, value });
        }
    };
    push("wpcf-pub-type", record.item_type.clone());
    push("wpcf-pub-subtitle", subtitle.unwrap_or_default());
    push(
        "wpcf-pub-date",
        parse_partial_date(&record.date)
            .map(|t| t.to_string())
            .unwrap_or_default(),
    );
    push(
        "wpcf-pub-date-specificity",
        date_specificity(&record.date)
            .map(str::to_string)
            .unwrap_or_default(),
    );
    for name in split_name_list(&record.author) {
        push("wpcf-pub-author", name);
    }
    push("wpcf-pub-journal-book", record.publication_title.clone());
    push("wpcf-pub-volume", record.volume.clone());
    push("wpcf-pub-issue", record.issue.clone());
    push("wpcf-pub-pages", record.pages.clone());
    push("wpcf-pub-doi", record.doi.clone());
    push(
        "wpcf-pub-pmcid",
        extract_kv(&record.extra, "PMCID")
            .map(str::to_string)
            .unwrap_or_default(),
    );
    push("wpcf-pub-url", record.url.clone());
    for name in split_name_list(&record.editor) {
        push("wpcf-pub-editor", name);
    }
    push("wpcf-pub-publisher", record.publisher.clone());
    push("wpcf-pub-publisher-place", record.place.clone());
    for name in split_name_list(&record.reviewed_author) {
        push("wpcf-pub-reviewed-author", name);
    }
    push("wpcf-pub-zotero-key", record.key.clone());

    OutputRecord {
        post_type: POST_TYPE,
        title: (!title.is_empty()).then_some(title),
        creator: CREATOR,
        body: (!record.abstract_note.is_empty()).then(|| record.abstract_note.clone()),
        tags,
        meta,
    }
}
