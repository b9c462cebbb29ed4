use chrono::{TimeZone, Utc};
use quire::{export_document, render_document, Block, Document, ExportOptions, Section};

fn sample_document() -> Document {
    Document::new(
        "Inspection Report",
        vec![
            Section::new(
                "Overview",
                vec![
                    Block::key_value_rows(vec![
                        ("Asset".into(), "Pump P-204".into()),
                        ("Inspector".into(), "M. Berg".into()),
                    ]),
                    Block::paragraph("General condition was found acceptable.".to_string()),
                ],
            ),
            Section::new(
                "Findings",
                vec![Block::bullet_list(vec![
                    "Minor surface corrosion on the base frame".into(),
                    "Coupling guard bolt missing, replaced on site".into(),
                ])],
            ),
        ],
    )
    .with_reference("IR-2041")
}

fn fixed_options() -> ExportOptions {
    ExportOptions {
        generated_at: Some(Utc.with_ymd_and_hms(2026, 8, 12, 9, 30, 0).unwrap()),
        ..ExportOptions::default()
    }
}

#[test]
fn rendered_bytes_form_a_pdf() {
    let bytes = render_document(&sample_document(), &fixed_options());
    assert!(bytes.len() > 1000, "suspiciously small artifact");
    assert_eq!(&bytes[..5], b"%PDF-");
    assert!(
        bytes.windows(5).any(|w| w == b"%%EOF"),
        "missing PDF trailer"
    );
}

#[test]
fn empty_document_still_produces_one_page() {
    let doc = Document::new("Empty", vec![]);
    let bytes = render_document(&doc, &fixed_options());
    assert_eq!(&bytes[..5], b"%PDF-");
}

#[test]
fn export_writes_artifact_at_destination() {
    let dir = tempfile::tempdir().expect("tempdir");
    let dest = dir.path().join("report.pdf");

    let written =
        export_document(&sample_document(), &dest, &fixed_options()).expect("export succeeds");
    assert_eq!(written, dest);

    let bytes = std::fs::read(&dest).expect("artifact readable");
    assert_eq!(&bytes[..5], b"%PDF-");

    // No staging leftovers beside the artifact.
    let entries: Vec<_> = std::fs::read_dir(dir.path())
        .expect("read dir")
        .map(|e| e.expect("entry").file_name())
        .collect();
    assert_eq!(entries, vec![std::ffi::OsString::from("report.pdf")]);
}

#[test]
fn export_overwrites_existing_artifact() {
    let dir = tempfile::tempdir().expect("tempdir");
    let dest = dir.path().join("report.pdf");
    std::fs::write(&dest, b"stale").expect("seed file");

    export_document(&sample_document(), &dest, &fixed_options()).expect("export succeeds");
    let bytes = std::fs::read(&dest).expect("artifact readable");
    assert_eq!(&bytes[..5], b"%PDF-", "old content fully replaced");
}

#[test]
fn export_creates_missing_destination_directory() {
    let dir = tempfile::tempdir().expect("tempdir");
    let dest = dir.path().join("out").join("nested").join("report.pdf");

    export_document(&sample_document(), &dest, &fixed_options()).expect("export succeeds");
    assert!(dest.exists());
}
