//! The pagination engine: pours a flat block run into page buckets.
//!
//! Blocks are consumed from a work queue; a block that will not fit is
//! either split (its tail re-queued at the front) or carried whole to the
//! next page. Pagination is total: it never fails, and a block that cannot
//! fit anywhere is force-placed on its own overflow page with a warning
//! rather than lost.

use std::collections::VecDeque;

use quire_blocks::Block;
use quire_types::PageShell;

use crate::measure;
use crate::split::{self, SplitResult};

/// Slack for floating-point fit checks, in points.
pub const FIT_EPSILON: f32 = 0.01;

/// One page's worth of placed blocks, in draw order.
#[derive(Debug, Default, Clone)]
pub struct PageBucket {
    pub blocks: Vec<Block>,
    /// Height consumed inside the content rect, inter-block spacing included.
    pub used_height: f32,
}

impl PageBucket {
    fn place(&mut self, block: Block, spacing: f32, height: f32) {
        self.used_height += spacing + height;
        self.blocks.push(block);
    }
}

/// Distributes `blocks` into page buckets for `shell`.
///
/// Empty blocks are dropped, forced breaks close the current page, and
/// every produced bucket is non-empty.
pub fn paginate(blocks: Vec<Block>, shell: &PageShell) -> Vec<PageBucket> {
    let width = shell.content_width();
    let page_height = shell.content_height();

    let mut pending: VecDeque<Block> = blocks.into();
    let mut buckets: Vec<PageBucket> = Vec::new();
    let mut current = PageBucket::default();

    while let Some(block) = pending.pop_front() {
        if block.is_empty() {
            log::debug!("dropping empty {} block", block.kind());
            continue;
        }
        if block.force_page_break_before && !current.blocks.is_empty() {
            buckets.push(std::mem::take(&mut current));
        }

        let at_top = current.blocks.is_empty();
        let spacing = if at_top { 0.0 } else { measure::BLOCK_SPACING };
        let height = measure::block_height(&block, width);
        let remaining = page_height - current.used_height - spacing;

        if height <= remaining + FIT_EPSILON {
            current.place(block, spacing, height);
            continue;
        }

        // keep_together is honored unless the block is taller than a full
        // page, in which case refusing to split would stall forever.
        let splittable = !block.keep_together || height > page_height + FIT_EPSILON;
        if !splittable {
            close_and_requeue(&mut buckets, &mut current, &mut pending, block);
            continue;
        }

        match split::split_block(block, remaining, width, at_top) {
            SplitResult::Split { head, tail } => {
                let mut head_placed = false;
                if let Some(head) = head {
                    if head.is_empty() {
                        log::debug!("dropping empty split head");
                    } else {
                        let head_height = measure::block_height(&head, width);
                        if head_height <= remaining + FIT_EPSILON {
                            current.place(head, spacing, head_height);
                            head_placed = true;
                        } else if at_top {
                            log::warn!(
                                "{} head ({head_height:.1}pt) exceeds the page; overflowing",
                                head.kind(),
                            );
                            current.place(head, spacing, head_height);
                            head_placed = true;
                        } else {
                            // The head came out taller than the gap it was
                            // cut for; retry it at the top of a fresh page.
                            if let Some(tail) = tail {
                                pending.push_front(tail);
                            }
                            pending.push_front(head);
                            buckets.push(std::mem::take(&mut current));
                            continue;
                        }
                    }
                }
                if let Some(tail) = tail {
                    // The head may have dissolved (e.g. a blank image half)
                    // while the page is still empty; keep it open for the
                    // tail instead of emitting a blank page.
                    pending.push_front(tail);
                    if !current.blocks.is_empty() {
                        buckets.push(std::mem::take(&mut current));
                    }
                } else if !head_placed {
                    log::debug!("block dissolved during split; nothing placed");
                }
            }
            SplitResult::Refused(block) => {
                if at_top {
                    log::warn!(
                        "{} ({height:.1}pt) is taller than the page ({page_height:.1}pt) \
                         and cannot split; overflowing",
                        block.kind(),
                    );
                    current.place(block, 0.0, height);
                    buckets.push(std::mem::take(&mut current));
                } else {
                    close_and_requeue(&mut buckets, &mut current, &mut pending, block);
                }
            }
        }
    }

    if !current.blocks.is_empty() {
        buckets.push(current);
    }
    buckets
}

fn close_and_requeue(
    buckets: &mut Vec<PageBucket>,
    current: &mut PageBucket,
    pending: &mut VecDeque<Block>,
    block: Block,
) {
    pending.push_front(block);
    if !current.blocks.is_empty() {
        buckets.push(std::mem::take(current));
    }
}
