//! Splitting oversized blocks at content boundaries.
//!
//! Every split consumes the original block and returns fresh head/tail
//! blocks; nothing is mutated in place. Heads are sized for the space left
//! on the current page, tails re-enter the pagination queue.

use quire_blocks::{Block, BlockContent, SharedData};

use crate::fonts;
use crate::measure;
use crate::raster;
use crate::text;

/// Outcome of asking a block to split into `remaining` points of space.
#[derive(Debug)]
pub enum SplitResult {
    /// The block divided. Either half may be `None` when it carried no
    /// content worth keeping (e.g. a blank image slice).
    Split {
        head: Option<Block>,
        tail: Option<Block>,
    },
    /// The block is atomic at this position; place it whole on a later page.
    Refused(Block),
}

fn continued(title: Option<&String>) -> Option<String> {
    title.map(|t| {
        if t.ends_with(" (cont.)") {
            t.clone()
        } else {
            format!("{t} (cont.)")
        }
    })
}

fn tail_block(content: BlockContent, keep_together: bool) -> Block {
    let mut block = Block::new(content);
    block.keep_together = keep_together;
    block
}

/// Attempts to split `block` so the head fits within `remaining` points at
/// `width`. `at_page_top` means the block sits at the top of a fresh page,
/// so the head must make progress: it takes at least one line, row, or
/// image band even when nothing fits cleanly.
pub fn split_block(block: Block, remaining: f32, width: f32, at_page_top: bool) -> SplitResult {
    let keep = block.keep_together;
    match block.content {
        BlockContent::Paragraph { text, style } => {
            split_paragraph(text, style, keep, remaining, width, at_page_top)
        }
        BlockContent::KeyValueRows { pairs } => {
            split_kv_rows(pairs, keep, remaining, width, at_page_top)
        }
        BlockContent::BulletList { items } => {
            split_bullets(items, keep, remaining, width, at_page_top)
        }
        BlockContent::Table {
            title,
            headers,
            rows,
        } => split_table(title, headers, rows, keep, remaining, width, at_page_top),
        BlockContent::Image { data, caption } => {
            split_image(data, caption, keep, remaining, width, at_page_top)
        }
        BlockContent::Group { title, children } => {
            split_group(title, children, keep, remaining, width, at_page_top)
        }
        BlockContent::Heading { .. }
        | BlockContent::SignatureCard { .. }
        | BlockContent::Spacer { .. } => SplitResult::Refused(block),
    }
}

fn split_paragraph(
    text: String,
    style: quire_blocks::ParagraphStyle,
    keep: bool,
    remaining: f32,
    width: f32,
    at_page_top: bool,
) -> SplitResult {
    let (font, size) = measure::paragraph_font(style);
    let lines = text::wrap_tagged(&text, font, size, width);
    let line_h = fonts::line_height(size);

    let mut fit = (remaining / line_h).floor() as usize;
    if fit == 0 {
        if at_page_top {
            fit = 1;
        } else {
            return SplitResult::Refused(Block::styled_paragraph(text, style));
        }
    }
    if fit >= lines.len() {
        return SplitResult::Split {
            head: Some(Block::styled_paragraph(text, style)),
            tail: None,
        };
    }
    // Rejoin through the break markers so a char-broken word is not torn
    // apart by an inserted space.
    let head = text::rejoin(&lines[..fit]);
    let tail = text::rejoin(&lines[fit..]);
    SplitResult::Split {
        head: Some(Block::styled_paragraph(head, style)),
        tail: Some(tail_block(
            BlockContent::Paragraph { text: tail, style },
            keep,
        )),
    }
}

/// Shared prefix logic for row-structured blocks: the largest row count
/// whose cumulative height stays within `remaining`, forced to one row when
/// the block leads a fresh page.
fn fitting_prefix(row_heights: &[f32], remaining: f32, at_page_top: bool) -> Option<usize> {
    let mut used = 0.0;
    let mut fit = 0usize;
    for h in row_heights {
        if used + h > remaining {
            break;
        }
        used += h;
        fit += 1;
    }
    if fit == 0 {
        if at_page_top && !row_heights.is_empty() {
            fit = 1;
        } else {
            return None;
        }
    }
    Some(fit)
}

fn split_kv_rows(
    pairs: Vec<(String, String)>,
    keep: bool,
    remaining: f32,
    width: f32,
    at_page_top: bool,
) -> SplitResult {
    let heights: Vec<f32> = pairs
        .iter()
        .map(|(l, v)| measure::kv_row_height(l, v, width))
        .collect();
    let Some(fit) = fitting_prefix(&heights, remaining, at_page_top) else {
        return SplitResult::Refused(Block::key_value_rows(pairs));
    };
    if fit >= pairs.len() {
        return SplitResult::Split {
            head: Some(Block::key_value_rows(pairs)),
            tail: None,
        };
    }
    let mut pairs = pairs;
    let tail_pairs = pairs.split_off(fit);
    SplitResult::Split {
        head: Some(Block::key_value_rows(pairs)),
        tail: Some(tail_block(
            BlockContent::KeyValueRows { pairs: tail_pairs },
            keep,
        )),
    }
}

fn split_bullets(
    items: Vec<String>,
    keep: bool,
    remaining: f32,
    width: f32,
    at_page_top: bool,
) -> SplitResult {
    let heights: Vec<f32> = items
        .iter()
        .map(|item| measure::bullet_item_height(item, width))
        .collect();
    let Some(fit) = fitting_prefix(&heights, remaining, at_page_top) else {
        return SplitResult::Refused(Block::bullet_list(items));
    };
    if fit >= items.len() {
        return SplitResult::Split {
            head: Some(Block::bullet_list(items)),
            tail: None,
        };
    }
    let mut items = items;
    let tail_items = items.split_off(fit);
    SplitResult::Split {
        head: Some(Block::bullet_list(items)),
        tail: Some(tail_block(
            BlockContent::BulletList { items: tail_items },
            keep,
        )),
    }
}

fn split_table(
    title: Option<String>,
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
    keep: bool,
    remaining: f32,
    width: f32,
    at_page_top: bool,
) -> SplitResult {
    if rows.len() < 2 {
        return SplitResult::Refused(Block::table(title, headers, rows));
    }
    let cols = measure::table_column_widths(&headers, width);
    let mut overhead = 0.0;
    if title.is_some() {
        overhead += measure::table_title_height();
    }
    if !headers.is_empty() {
        overhead += measure::table_row_height(&headers, &cols, true);
    }

    let heights: Vec<f32> = rows
        .iter()
        .map(|row| measure::table_row_height(row, &cols, false))
        .collect();
    let Some(fit) = fitting_prefix(&heights, remaining - overhead, at_page_top) else {
        return SplitResult::Refused(Block::table(title, headers, rows));
    };
    if fit >= rows.len() {
        return SplitResult::Split {
            head: Some(Block::table(title, headers, rows)),
            tail: None,
        };
    }

    let tail_title = continued(title.as_ref());
    let mut rows = rows;
    let tail_rows = rows.split_off(fit);
    SplitResult::Split {
        head: Some(Block::table(title, headers.clone(), rows)),
        // The continuation repeats the header row so every page reads on
        // its own.
        tail: Some(tail_block(
            BlockContent::Table {
                title: tail_title,
                headers,
                rows: tail_rows,
            },
            keep,
        )),
    }
}

fn split_image(
    data: SharedData,
    caption: Option<String>,
    keep: bool,
    remaining: f32,
    width: f32,
    at_page_top: bool,
) -> SplitResult {
    let Some(img) = raster::decode(&data) else {
        // Unreadable images measure as empty; drop rather than abort.
        return SplitResult::Split {
            head: None,
            tail: None,
        };
    };
    let px_w = img.width().max(1);
    let scale = width / px_w as f32;
    if scale <= 0.0 {
        return SplitResult::Refused(Block::image(data, caption));
    }

    let target_px = (remaining / scale).floor() as i64;
    if target_px < 1 && !at_page_top {
        return SplitResult::Refused(Block::image(data, caption));
    }
    let target_px = target_px.clamp(1, i64::from(img.height().max(2) - 1)) as u32;

    let cut = raster::find_break_row(&img, target_px);
    let (top, bottom) = raster::split_at_row(&img, cut);

    match (top, bottom) {
        (None, None) => SplitResult::Split {
            head: None,
            tail: None,
        },
        (Some(top), None) => SplitResult::Split {
            head: Some(Block::image(top.into(), caption)),
            tail: None,
        },
        (None, Some(bottom)) => SplitResult::Split {
            head: None,
            tail: Some(tail_block(
                BlockContent::Image {
                    data: bottom.into(),
                    caption,
                },
                keep,
            )),
        },
        (Some(top), Some(bottom)) => SplitResult::Split {
            // The caption travels with the final slice.
            head: Some(Block::image(top.into(), None)),
            tail: Some(tail_block(
                BlockContent::Image {
                    data: bottom.into(),
                    caption,
                },
                keep,
            )),
        },
    }
}

fn split_group(
    title: Option<String>,
    children: Vec<Block>,
    keep: bool,
    remaining: f32,
    width: f32,
    at_page_top: bool,
) -> SplitResult {
    let children: Vec<Block> = children.into_iter().filter(|c| !c.is_empty()).collect();
    if children.is_empty() {
        return SplitResult::Split {
            head: None,
            tail: None,
        };
    }

    let child_width = (width - measure::GROUP_INDENT).max(1.0);
    let title_h = if title.is_some() {
        measure::group_title_height()
    } else {
        0.0
    };

    // Count whole children that fit under the title.
    let mut used = title_h;
    let mut fit = 0usize;
    for (i, child) in children.iter().enumerate() {
        let spacing = if i == 0 { 0.0 } else { measure::BLOCK_SPACING };
        let h = measure::block_height(child, child_width);
        if used + spacing + h > remaining {
            break;
        }
        used += spacing + h;
        fit += 1;
    }

    if fit >= children.len() {
        return SplitResult::Split {
            head: Some(Block::group(title, children)),
            tail: None,
        };
    }

    if fit == 0 {
        if !at_page_top {
            return SplitResult::Refused(Block::group(title, children));
        }
        // Fresh page and even the first child is too tall: split the child
        // itself so the page is not left empty.
        let mut children = children;
        let first = children.remove(0);
        let child_budget = (remaining - title_h).max(0.0);
        return match split_block(first, child_budget, child_width, true) {
            SplitResult::Split { head, tail } => {
                let head = head.map(|h| Block::group(title.clone(), vec![h]));
                let mut tail_children = Vec::new();
                if let Some(t) = tail {
                    tail_children.push(t);
                }
                tail_children.extend(children);
                let tail = (!tail_children.is_empty()).then(|| {
                    tail_block(
                        BlockContent::Group {
                            title: continued(title.as_ref()),
                            children: tail_children,
                        },
                        keep,
                    )
                });
                SplitResult::Split { head, tail }
            }
            SplitResult::Refused(first) => {
                // The child is atomic and oversized; let it overflow inside
                // the head rather than stall.
                let head = Some(Block::group(title.clone(), vec![first]));
                let tail = (!children.is_empty()).then(|| {
                    tail_block(
                        BlockContent::Group {
                            title: continued(title.as_ref()),
                            children,
                        },
                        keep,
                    )
                });
                SplitResult::Split { head, tail }
            }
        };
    }

    // A seam between two sub-groups is the coarsest boundary available;
    // fall back to the plain child boundary when none sits within reach.
    let is_group = |b: &Block| matches!(b.content, BlockContent::Group { .. });
    let cut = (1..=fit)
        .rev()
        .find(|&k| is_group(&children[k - 1]) && is_group(&children[k]))
        .unwrap_or(fit);

    let mut children = children;
    let tail_children = children.split_off(cut);
    SplitResult::Split {
        head: Some(Block::group(title.clone(), children)),
        tail: Some(tail_block(
            BlockContent::Group {
                title: continued(title.as_ref()),
                children: tail_children,
            },
            keep,
        )),
    }
}
