//! The typed block model: the input tree a document is built from.
//!
//! A [`Document`] is a list of [`Section`]s, each holding a flat run of
//! [`Block`]s. Pagination consumes a flattened block list; section headings
//! are synthesized during [`flatten`] so downstream stages never see the
//! section structure.

use std::sync::Arc;

/// Immutable, cheaply cloneable raw image bytes (PNG or JPEG).
pub type SharedData = Arc<Vec<u8>>;

/// Text emphasis for a paragraph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParagraphStyle {
    #[default]
    Body,
    /// Smaller face for captions and fine print.
    Small,
    /// Bold face at body size.
    Emphasis,
}

/// The closed set of renderable content kinds.
#[derive(Debug, Clone, PartialEq)]
pub enum BlockContent {
    Heading {
        text: String,
        /// 1 = section heading, 2 = sub-heading. Higher levels clamp to 2.
        level: u8,
    },
    Paragraph {
        text: String,
        style: ParagraphStyle,
    },
    /// Two-column label/value rows, e.g. a metadata summary.
    KeyValueRows {
        pairs: Vec<(String, String)>,
    },
    BulletList {
        items: Vec<String>,
    },
    Table {
        title: Option<String>,
        headers: Vec<String>,
        rows: Vec<Vec<String>>,
    },
    Image {
        data: SharedData,
        caption: Option<String>,
    },
    /// A fixed-height signature box with a title, name line and optional
    /// date and signature image.
    SignatureCard {
        title: String,
        name: String,
        date: Option<String>,
        image: Option<SharedData>,
    },
    /// A titled container of child blocks, drawn with a left inset.
    Group {
        title: Option<String>,
        children: Vec<Block>,
    },
    /// Explicit vertical whitespace.
    Spacer {
        height: f32,
    },
}

/// A content payload plus its layout flags.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub content: BlockContent,
    /// Never split this block across pages; move it whole to the next page
    /// instead (unless it is taller than a full page).
    pub keep_together: bool,
    /// Close the current page before placing this block.
    pub force_page_break_before: bool,
}

impl Block {
    pub fn new(content: BlockContent) -> Self {
        Self {
            content,
            keep_together: false,
            force_page_break_before: false,
        }
    }

    pub fn heading(text: impl Into<String>, level: u8) -> Self {
        Self::new(BlockContent::Heading {
            text: text.into(),
            level,
        })
    }

    pub fn paragraph(text: impl Into<String>) -> Self {
        Self::new(BlockContent::Paragraph {
            text: text.into(),
            style: ParagraphStyle::Body,
        })
    }

    pub fn styled_paragraph(text: impl Into<String>, style: ParagraphStyle) -> Self {
        Self::new(BlockContent::Paragraph {
            text: text.into(),
            style,
        })
    }

    pub fn key_value_rows(pairs: Vec<(String, String)>) -> Self {
        Self::new(BlockContent::KeyValueRows { pairs })
    }

    pub fn bullet_list(items: Vec<String>) -> Self {
        Self::new(BlockContent::BulletList { items })
    }

    pub fn table(title: Option<String>, headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self::new(BlockContent::Table {
            title,
            headers,
            rows,
        })
    }

    pub fn image(data: SharedData, caption: Option<String>) -> Self {
        Self::new(BlockContent::Image { data, caption })
    }

    pub fn signature_card(
        title: impl Into<String>,
        name: impl Into<String>,
        date: Option<String>,
        image: Option<SharedData>,
    ) -> Self {
        Self::new(BlockContent::SignatureCard {
            title: title.into(),
            name: name.into(),
            date,
            image,
        })
    }

    pub fn group(title: Option<String>, children: Vec<Block>) -> Self {
        Self::new(BlockContent::Group { title, children })
    }

    pub fn spacer(height: f32) -> Self {
        Self::new(BlockContent::Spacer { height })
    }

    pub fn keep_together(mut self) -> Self {
        self.keep_together = true;
        self
    }

    pub fn page_break_before(mut self) -> Self {
        self.force_page_break_before = true;
        self
    }

    /// Stable kind name for log messages.
    pub fn kind(&self) -> &'static str {
        match &self.content {
            BlockContent::Heading { .. } => "heading",
            BlockContent::Paragraph { .. } => "paragraph",
            BlockContent::KeyValueRows { .. } => "key_value_rows",
            BlockContent::BulletList { .. } => "bullet_list",
            BlockContent::Table { .. } => "table",
            BlockContent::Image { .. } => "image",
            BlockContent::SignatureCard { .. } => "signature_card",
            BlockContent::Group { .. } => "group",
            BlockContent::Spacer { .. } => "spacer",
        }
    }

    /// True when the block carries nothing worth placing on a page.
    pub fn is_empty(&self) -> bool {
        match &self.content {
            BlockContent::Heading { text, .. } => text.trim().is_empty(),
            BlockContent::Paragraph { text, .. } => text.trim().is_empty(),
            BlockContent::KeyValueRows { pairs } => pairs.is_empty(),
            BlockContent::BulletList { items } => items.is_empty(),
            BlockContent::Table { headers, rows, .. } => headers.is_empty() && rows.is_empty(),
            BlockContent::Image { data, .. } => data.is_empty(),
            BlockContent::SignatureCard { .. } => false,
            BlockContent::Group { title, children } => {
                title.is_none() && children.iter().all(Block::is_empty)
            }
            BlockContent::Spacer { height } => *height <= 0.0,
        }
    }
}

/// A titled run of blocks. Sections exist for authoring convenience only.
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub title: String,
    pub blocks: Vec<Block>,
    /// Start this section on a fresh page.
    pub starts_on_new_page: bool,
}

impl Section {
    pub fn new(title: impl Into<String>, blocks: Vec<Block>) -> Self {
        Self {
            title: title.into(),
            blocks,
            starts_on_new_page: false,
        }
    }

    pub fn on_new_page(mut self) -> Self {
        self.starts_on_new_page = true;
        self
    }
}

/// The root of the block tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub title: String,
    /// Short reference shown in the running header, e.g. a report number.
    pub reference: Option<String>,
    pub sections: Vec<Section>,
}

impl Document {
    pub fn new(title: impl Into<String>, sections: Vec<Section>) -> Self {
        Self {
            title: title.into(),
            reference: None,
            sections,
        }
    }

    pub fn with_reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = Some(reference.into());
        self
    }
}

/// Flattens a document into the block run pagination consumes.
///
/// Each section contributes a synthesized level-1 heading followed by its
/// blocks. The heading carries the section's forced-break flag and is kept
/// together with nothing; heading orphan control is pagination's concern.
pub fn flatten(document: &Document) -> Vec<Block> {
    let mut out = Vec::new();
    for section in &document.sections {
        if !section.title.trim().is_empty() {
            let mut heading = Block::heading(section.title.clone(), 1);
            heading.force_page_break_before = section.starts_on_new_page;
            out.push(heading);
        } else if section.starts_on_new_page {
            if let Some(mut first) = section.blocks.first().cloned() {
                first.force_page_break_before = true;
                out.push(first);
                out.extend(section.blocks.iter().skip(1).cloned());
                continue;
            }
        }
        out.extend(section.blocks.iter().cloned());
    }
    out
}

#[cfg(test)]
mod flatten_test;
