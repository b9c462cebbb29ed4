use crate::pagination::*;
use crate::measure;
use crate::fonts;
use crate::test_utils::{bottom_heavy_png, striped_png, top_heavy_png};
use quire_blocks::{Block, BlockContent};
use quire_types::{Margins, PageShell};

/// A shell with round numbers so budgets are easy to reason about.
fn shell(content_height: f32) -> PageShell {
    PageShell {
        page_width: 500.0,
        page_height: content_height + 40.0,
        margins: Margins::uniform(20.0),
        header_band: 0.0,
        footer_band: 0.0,
    }
}

fn paragraph_lines(count: usize) -> Block {
    // One word per line: each word is wide enough that two never share a
    // line at the narrow width used by `shell`.
    let word = "wwwwwwwwwwwwwwwwwwwwwwwwwwwwwwwwwwwwwwwwwwwwwwwwwwww";
    Block::paragraph(vec![word; count].join(" "))
}

fn count_leaf_paragraph_words(buckets: &[PageBucket]) -> usize {
    buckets
        .iter()
        .flat_map(|b| &b.blocks)
        .map(|block| match &block.content {
            BlockContent::Paragraph { text, .. } => text.split_whitespace().count(),
            _ => 0,
        })
        .sum()
}

#[test]
fn everything_fits_on_one_page() {
    let blocks = vec![
        Block::heading("Summary", 1),
        Block::paragraph("All systems nominal."),
    ];
    let buckets = paginate(blocks, &shell(600.0));
    assert_eq!(buckets.len(), 1);
    assert_eq!(buckets[0].blocks.len(), 2);
}

#[test]
fn empty_input_yields_no_pages() {
    assert!(paginate(vec![], &shell(600.0)).is_empty());
    let only_empties = vec![Block::paragraph("  "), Block::bullet_list(vec![])];
    assert!(paginate(only_empties, &shell(600.0)).is_empty());
}

#[test]
fn forced_break_closes_the_page() {
    let blocks = vec![
        Block::paragraph("page one"),
        Block::paragraph("page two").page_break_before(),
    ];
    let buckets = paginate(blocks, &shell(600.0));
    assert_eq!(buckets.len(), 2);
    assert_eq!(buckets[0].blocks.len(), 1);
    assert_eq!(buckets[1].blocks.len(), 1);
}

#[test]
fn forced_break_on_first_block_does_not_make_a_blank_page() {
    let blocks = vec![Block::paragraph("starts fresh anyway").page_break_before()];
    let buckets = paginate(blocks, &shell(600.0));
    assert_eq!(buckets.len(), 1);
}

#[test]
fn no_page_exceeds_content_height() {
    let sh = shell(300.0);
    let mut blocks = Vec::new();
    for i in 0..12 {
        blocks.push(Block::paragraph(format!("Finding {i}: ") + &"detail ".repeat(40)));
    }
    let buckets = paginate(blocks, &sh);
    assert!(buckets.len() > 1);
    for (i, bucket) in buckets.iter().enumerate() {
        assert!(
            bucket.used_height <= sh.content_height() + FIT_EPSILON,
            "page {i} used {} of {}",
            bucket.used_height,
            sh.content_height()
        );
        assert!(!bucket.blocks.is_empty(), "page {i} is empty");
    }
}

#[test]
fn used_height_matches_remeasured_blocks() {
    let sh = shell(300.0);
    let blocks = vec![
        Block::heading("Readings", 2),
        Block::paragraph("alpha ".repeat(60)),
        Block::bullet_list((0..8).map(|i| format!("item {i}")).collect()),
    ];
    let buckets = paginate(blocks, &sh);
    for bucket in &buckets {
        let mut expected = 0.0;
        for (i, block) in bucket.blocks.iter().enumerate() {
            if i > 0 {
                expected += measure::BLOCK_SPACING;
            }
            expected += measure::block_height(block, sh.content_width());
        }
        assert!((bucket.used_height - expected).abs() < 0.01);
    }
}

// Scenario: a long table spills onto later pages with its header repeated
// and its title marked as continued.
#[test]
fn long_table_continues_with_repeated_header() {
    let sh = shell(500.0);
    let headers: Vec<String> = vec!["Item".into(), "Description".into(), "Result".into()];
    let rows: Vec<Vec<String>> = (0..50)
        .map(|i| vec![format!("{i}"), format!("check {i}"), "ok".into()])
        .collect();
    let block = Block::table(Some("Checklist".into()), headers.clone(), rows);

    let width = sh.content_width();
    let cols = measure::table_column_widths(&headers, width);
    let row_h = measure::table_row_height(&["0".into(), "check 0".into(), "ok".into()], &cols, false);
    let overhead =
        measure::table_title_height() + measure::table_row_height(&headers, &cols, true);
    let expected_first = ((500.0 - overhead) / row_h).floor() as usize;

    let buckets = paginate(vec![block], &sh);
    assert!(buckets.len() > 1, "50 rows cannot fit one 500pt page");

    let BlockContent::Table {
        rows: first_rows, ..
    } = &buckets[0].blocks[0].content
    else {
        panic!("first page holds the table head");
    };
    assert_eq!(first_rows.len(), expected_first);

    let mut total_rows = 0;
    for (i, bucket) in buckets.iter().enumerate() {
        let BlockContent::Table {
            title,
            headers: page_headers,
            rows,
        } = &bucket.blocks[0].content
        else {
            panic!("page {i} should hold a table fragment");
        };
        assert_eq!(page_headers, &headers, "header repeats on page {i}");
        if i == 0 {
            assert_eq!(title.as_deref(), Some("Checklist"));
        } else {
            assert_eq!(title.as_deref(), Some("Checklist (cont.)"));
        }
        total_rows += rows.len();
    }
    assert_eq!(total_rows, 50, "no row lost or duplicated");
}

// Scenario: a keep-together card that fits an empty page is deferred whole.
#[test]
fn keep_together_card_defers_instead_of_splitting() {
    let sh = shell(400.0);
    // Fill the page so only ~50pt remain.
    let filler_lines = ((400.0 - 50.0) / fonts::line_height(measure::BODY_SIZE)).ceil() as usize;
    let blocks = vec![
        paragraph_lines(filler_lines),
        Block::signature_card("Surveyor", "J. Doe", Some("2026-08-01".into()), None)
            .keep_together(),
    ];
    let buckets = paginate(blocks, &sh);
    assert_eq!(buckets.len(), 2);
    assert_eq!(
        buckets[1].blocks.len(),
        1,
        "card moves whole to its own page"
    );
    assert_eq!(buckets[1].blocks[0].kind(), "signature_card");
    assert!((buckets[1].used_height - measure::SIGNATURE_CARD_HEIGHT).abs() < 0.01);
}

#[test]
fn keep_together_group_that_fits_a_page_is_never_split() {
    let sh = shell(300.0);
    let group = Block::group(
        Some("Area 3".into()),
        (0..5).map(|i| Block::paragraph(format!("note {i}"))).collect(),
    )
    .keep_together();
    let group_h = measure::block_height(&group, sh.content_width());
    assert!(group_h < 300.0, "precondition: group fits an empty page");

    let filler_lines = ((300.0 - group_h / 2.0) / fonts::line_height(measure::BODY_SIZE)).ceil()
        as usize;
    let buckets = paginate(vec![paragraph_lines(filler_lines), group], &sh);
    assert_eq!(buckets.len(), 2);
    let BlockContent::Group { children, .. } = &buckets[1].blocks[0].content else {
        panic!("group moved whole");
    };
    assert_eq!(children.len(), 5);
}

// Scenario: an oversized image splits at a low-ink row; the blank lower
// half is discarded instead of producing a near-empty page.
#[test]
fn image_splits_and_blank_half_is_dropped() {
    let sh = shell(400.0);
    let width = sh.content_width();
    // 460 px wide so 1 px ≈ 1 pt; dark only in the top 150 rows.
    let px_w = width.round() as u32;
    let image = Block::image(top_heavy_png(px_w, 900, 150).into(), None);

    let buckets = paginate(vec![image], &sh);
    assert_eq!(buckets.len(), 1, "blank lower slice should be dropped");
    let BlockContent::Image { data, .. } = &buckets[0].blocks[0].content else {
        panic!("page holds the image head");
    };
    let (_, slice_h) = measure::image_dimensions(data).expect("slice decodes");
    assert!(slice_h <= 400 + 1, "head fits the page, got {slice_h} px");
    assert!(slice_h >= 150, "head keeps the inked region");
}

// A blank upper half dissolves during the split; the open page must wait
// for the inked tail instead of being emitted empty.
#[test]
fn blank_upper_half_leaves_no_empty_page() {
    let sh = shell(400.0);
    let px_w = sh.content_width().round() as u32;
    let image = Block::image(bottom_heavy_png(px_w, 900, 500).into(), None);

    let buckets = paginate(vec![image], &sh);
    assert_eq!(buckets.len(), 2);
    let mut slice_px = 0;
    for (i, bucket) in buckets.iter().enumerate() {
        assert!(!bucket.blocks.is_empty(), "page {i} is empty");
        let BlockContent::Image { data, .. } = &bucket.blocks[0].content else {
            panic!("page {i} holds an image slice");
        };
        let (_, h) = measure::image_dimensions(data).expect("slice decodes");
        slice_px += h;
    }
    assert!(slice_px >= 395, "inked region survives, got {slice_px} px");
}

#[test]
fn tall_striped_image_spans_multiple_pages_without_overflow() {
    let sh = shell(400.0);
    let px_w = sh.content_width().round() as u32;
    let image = Block::image(striped_png(px_w, 1200).into(), None);

    let buckets = paginate(vec![image], &sh);
    assert!(buckets.len() >= 3, "1200pt of image needs 3+ 400pt pages");
    let mut total_px = 0;
    for bucket in &buckets {
        assert!(bucket.used_height <= sh.content_height() + FIT_EPSILON);
        let BlockContent::Image { data, .. } = &bucket.blocks[0].content else {
            panic!("each page holds one slice");
        };
        let (_, h) = measure::image_dimensions(data).expect("slice decodes");
        total_px += h;
    }
    assert!(total_px <= 1200, "slices never exceed the source");
}

// Scenario: a paragraph with one line of room keeps one line and re-queues
// the rest; rejoined text matches the original word-for-word.
#[test]
fn paragraph_head_takes_exactly_the_fitting_lines() {
    let line_h = fonts::line_height(measure::BODY_SIZE);
    // After a three-line filler and the inter-block gap, just over one
    // line of room is left.
    let sh = shell(line_h * 4.0 + measure::BLOCK_SPACING + 1.0);
    let filler = paragraph_lines(3);
    let para = paragraph_lines(3);
    let original_words = match &para.content {
        BlockContent::Paragraph { text, .. } => {
            text.split_whitespace().map(String::from).collect::<Vec<_>>()
        }
        _ => unreachable!(),
    };

    let buckets = paginate(vec![filler, para], &sh);
    assert_eq!(buckets.len(), 2);
    assert_eq!(buckets[0].blocks.len(), 2, "head shares page one");

    let BlockContent::Paragraph { text: head, .. } = &buckets[0].blocks[1].content else {
        panic!("head is a paragraph");
    };
    let BlockContent::Paragraph { text: tail, .. } = &buckets[1].blocks[0].content else {
        panic!("tail is a paragraph");
    };
    assert_eq!(head.split_whitespace().count(), 1, "one line fits");
    assert_eq!(tail.split_whitespace().count(), 2);

    let rejoined: Vec<String> = head
        .split_whitespace()
        .chain(tail.split_whitespace())
        .map(String::from)
        .collect();
    assert_eq!(rejoined, original_words);
}

#[test]
fn coverage_no_content_lost_or_duplicated() {
    let sh = shell(250.0);
    let blocks: Vec<Block> = (0..9).map(|_| paragraph_lines(7)).collect();
    let total_words = 9 * 7;
    let buckets = paginate(blocks, &sh);
    assert_eq!(count_leaf_paragraph_words(&buckets), total_words);
}

#[test]
fn oversized_atomic_block_gets_its_own_overflow_page() {
    let sh = shell(80.0);
    let blocks = vec![
        Block::paragraph("before"),
        Block::signature_card("Chief Engineer", "A. B. Seaman", None, None),
        Block::paragraph("after"),
    ];
    let buckets = paginate(blocks, &sh);
    assert_eq!(buckets.len(), 3);
    assert_eq!(buckets[1].blocks.len(), 1);
    assert_eq!(buckets[1].blocks[0].kind(), "signature_card");
    assert!(buckets[1].used_height > sh.content_height());
    assert_eq!(buckets[2].blocks[0].kind(), "paragraph");
}

#[test]
fn pagination_is_idempotent() {
    let sh = shell(300.0);
    let blocks: Vec<Block> = vec![
        Block::heading("Report", 1),
        Block::paragraph("body ".repeat(150)),
        Block::table(
            Some("Data".into()),
            vec!["A".into(), "B".into()],
            (0..30).map(|i| vec![format!("{i}"), "x".into()]).collect(),
        ),
    ];
    let first = paginate(blocks.clone(), &sh);
    let second = paginate(blocks, &sh);
    assert_eq!(first.len(), second.len());
    for (a, b) in first.iter().zip(&second) {
        assert_eq!(a.blocks, b.blocks);
        assert_eq!(a.used_height, b.used_height);
    }
}
