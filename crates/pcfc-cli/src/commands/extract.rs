//! Extract command - run the extraction pipeline on one local PDF.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use tracing::{debug, info};

use pcfc_core::{ExtractionResult, FormExtractor};

use super::config::load_config;
use super::is_pdf_filename;

/// Arguments for the extract command.
#[derive(Args)]
pub struct ExtractArgs {
    /// Input PDF
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Match concepts in the page text instead of reading form fields
    #[arg(long)]
    text: bool,

    /// Skip validation/correction of extracted values
    #[arg(long)]
    no_correct: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON object
    Json,
    /// One `label: value` line per field
    Text,
}

pub async fn run(args: ExtractArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let mut config = load_config(config_path)?;
    if args.no_correct {
        config.extraction.correct_fields = false;
    }

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    let name = args
        .input
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("");
    if !is_pdf_filename(name) {
        anyhow::bail!("Please provide a PDF file: {}", args.input.display());
    }

    info!("Processing file: {}", args.input.display());

    let extractor = FormExtractor::from_config(&config.extraction);
    let result = if args.text {
        let data = fs::read(&args.input)?;
        extractor.extract_concepts(&data)
    } else {
        extractor.extract_file(&args.input)
    };

    let output = format_result(&result, args.format)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    debug!("Total processing time: {:?}", start.elapsed());

    if result.is_error() {
        anyhow::bail!("Extraction failed for {}", args.input.display());
    }

    Ok(())
}

fn format_result(result: &ExtractionResult, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(result)?),
        OutputFormat::Text => Ok(format_text(result)),
    }
}

fn format_text(result: &ExtractionResult) -> String {
    match result {
        ExtractionResult::Fields(fields) => fields
            .iter()
            .map(|(label, value)| format!("{}: {}", label, value))
            .collect::<Vec<_>>()
            .join("\n"),
        ExtractionResult::Error(message) => format!("error: {}", message),
        ExtractionResult::Message(message) => message.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pcfc_core::FieldMap;

    #[test]
    fn test_format_text() {
        let result = ExtractionResult::Fields(FieldMap::from([
            ("IFSC Code".to_string(), "SBIN0001234".to_string()),
            ("Applicant Name".to_string(), "Rao Exports".to_string()),
        ]));
        assert_eq!(
            format_text(&result),
            "Applicant Name: Rao Exports\nIFSC Code: SBIN0001234"
        );
        assert_eq!(
            format_text(&ExtractionResult::no_fields()),
            "No form fields found in the PDF."
        );
    }

    #[test]
    fn test_format_json() {
        let json = format_result(&ExtractionResult::Error("boom".to_string()), OutputFormat::Json)
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value, serde_json::json!({"error": "boom"}));
    }
}
