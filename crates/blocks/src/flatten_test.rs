use super::*;

fn doc_with_sections(sections: Vec<Section>) -> Document {
    Document::new("Test Document", sections)
}

#[test]
fn flatten_synthesizes_section_headings() {
    let doc = doc_with_sections(vec![
        Section::new("Overview", vec![Block::paragraph("intro")]),
        Section::new("Findings", vec![Block::paragraph("detail")]),
    ]);

    let blocks = flatten(&doc);
    assert_eq!(blocks.len(), 4, "two headings plus two paragraphs");
    match &blocks[0].content {
        BlockContent::Heading { text, level } => {
            assert_eq!(text, "Overview");
            assert_eq!(*level, 1);
        }
        other => panic!("expected heading, got {other:?}"),
    }
    assert_eq!(blocks[2].kind(), "heading");
}

#[test]
fn flatten_carries_new_page_flag_onto_heading() {
    let doc = doc_with_sections(vec![
        Section::new("First", vec![Block::paragraph("a")]),
        Section::new("Second", vec![Block::paragraph("b")]).on_new_page(),
    ]);

    let blocks = flatten(&doc);
    assert!(!blocks[0].force_page_break_before);
    assert!(blocks[2].force_page_break_before, "second heading forces a break");
}

#[test]
fn flatten_untitled_section_pushes_flag_to_first_block() {
    let doc = doc_with_sections(vec![
        Section::new("First", vec![Block::paragraph("a")]),
        Section::new("", vec![Block::paragraph("b"), Block::paragraph("c")]).on_new_page(),
    ]);

    let blocks = flatten(&doc);
    // heading, a, b, c
    assert_eq!(blocks.len(), 4);
    assert!(blocks[2].force_page_break_before);
    assert!(!blocks[3].force_page_break_before);
}

#[test]
fn empty_detection_per_kind() {
    assert!(Block::paragraph("   ").is_empty());
    assert!(Block::bullet_list(vec![]).is_empty());
    assert!(Block::table(None, vec![], vec![]).is_empty());
    assert!(Block::spacer(0.0).is_empty());
    assert!(Block::group(None, vec![Block::paragraph("")]).is_empty());
    assert!(!Block::paragraph("text").is_empty());
    assert!(!Block::group(Some("Titled".into()), vec![]).is_empty());
    assert!(!Block::signature_card("Inspector", "A. Name", None, None).is_empty());
}
