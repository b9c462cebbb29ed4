use std::path::PathBuf;
use std::process::ExitCode;

use quire::{export_document, Block, Document, ExportOptions, Section};

fn demo_document() -> Document {
    Document::new(
        "Lifting Operation Report",
        vec![
            Section::new(
                "Summary",
                vec![
                    Block::key_value_rows(vec![
                        ("Vessel".into(), "MV Northern Light".into()),
                        ("Location".into(), "Berth 4, Eastern Quay".into()),
                        ("Date of operation".into(), "2026-08-12".into()),
                        ("Supervisor".into(), "K. Halvorsen".into()),
                    ]),
                    Block::paragraph(
                        "The lift was completed without incident. Rigging was inspected \
                         before and after the operation and all equipment remained within \
                         certification. Weather conditions stayed inside the agreed limits \
                         for the full duration of the lift.",
                    ),
                ],
            ),
            Section::new(
                "Checks",
                vec![
                    Block::table(
                        Some("Pre-lift checklist".into()),
                        vec!["Item".into(), "Description".into(), "Result".into()],
                        (1..=30)
                            .map(|i| {
                                vec![
                                    format!("{i}"),
                                    format!("Verification step {i} as per the lift plan"),
                                    "Pass".into(),
                                ]
                            })
                            .collect(),
                    ),
                    Block::bullet_list(vec![
                        "Exclusion zone established and maintained".into(),
                        "Tag lines manned on both corners".into(),
                        "Crane daily inspection recorded".into(),
                    ]),
                ],
            ),
            Section::new(
                "Sign-off",
                vec![
                    Block::signature_card(
                        "Lift Supervisor",
                        "K. Halvorsen",
                        Some("2026-08-12".into()),
                        None,
                    )
                    .keep_together(),
                    Block::signature_card("Client Representative", "R. Voss", None, None)
                        .keep_together(),
                ],
            )
            .on_new_page(),
        ],
    )
    .with_reference("QR-2026-0812")
}

fn main() -> ExitCode {
    env_logger::init();

    let dest = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("report.pdf"));

    match export_document(&demo_document(), &dest, &ExportOptions::default()) {
        Ok(path) => {
            println!("wrote {}", path.display());
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("export failed: {err}");
            ExitCode::FAILURE
        }
    }
}
