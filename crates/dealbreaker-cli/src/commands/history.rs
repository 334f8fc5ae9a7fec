//! History command: list past scans, most recent first.

use anyhow::Result;
use dealbreaker_application::AnalysisUseCase;
use dealbreaker_core::analysis::SourceKind;

pub async fn run(usecase: &AnalysisUseCase) -> Result<()> {
    let entries = usecase.history().await;
    if entries.is_empty() {
        println!("No scan history yet.");
        return Ok(());
    }

    for entry in entries {
        let kind = match entry.source_kind {
            SourceKind::Pdf => "pdf",
            SourceKind::Url => "url",
        };
        println!(
            "{}  [{}]  {}  score {}  {} risks",
            entry.timestamp,
            kind,
            entry.filename,
            entry.analysis.safety_score,
            entry.analysis.red_flags.len()
        );
        println!("    {}", entry.analysis.summary);
        if entry.source_kind == SourceKind::Pdf {
            // Only metadata is stored for PDFs; re-upload to view the source.
            println!("    (re-upload the file to reload the viewer)");
        }
    }

    Ok(())
}
