//! Report and export writer
//!
//! Renders the deck as a plain-text decklist and the deck plus all issues as
//! a JSON report. Each file is written all-or-nothing.

use log::{error, info};
use mtg_common::ColorIdentity;
use serde::Serialize;
use std::collections::HashSet;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::OutputError;
use crate::models::{CardRequest, Deck, DeckEntry, Rule, Severity, ValidationIssue};

/// One deck entry as it appears in the JSON report
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportCard {
    pub name: String,
    pub set: String,
    pub collector_number: String,
    pub quantity: u32,
    pub color_identity: ColorIdentity,
    pub type_line: String,
    pub commander_legality: Option<String>,
    pub commander: bool,
}

impl From<&DeckEntry> for ReportCard {
    fn from(entry: &DeckEntry) -> Self {
        Self {
            name: entry.card.name.clone(),
            set: entry.card.set_code.clone(),
            collector_number: entry.card.collector_number.clone(),
            quantity: entry.quantity,
            color_identity: entry.card.color_identity.clone(),
            type_line: entry.card.type_line.clone(),
            commander_legality: entry.card.commander_legality().map(|s| s.to_string()),
            commander: entry.commander,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    /// Sum of quantities, commanders included
    pub total_cards: u32,
    pub unique_cards: usize,
    /// CSV data rows read, malformed ones included
    pub requested_rows: usize,
    pub malformed_rows: usize,
    pub resolved_rows: usize,
    pub unresolved_rows: usize,
    pub errors: usize,
    pub warnings: usize,
    /// True when no error-severity issue was found
    pub legal: bool,
}

/// Final artifact of a run
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub commanders: Vec<String>,
    pub commander_color_identity: ColorIdentity,
    pub deck: Vec<ReportCard>,
    pub unresolved: Vec<CardRequest>,
    pub issues: Vec<ValidationIssue>,
    pub summary: Summary,
}

impl Report {
    pub fn new(deck: &Deck, unresolved: Vec<CardRequest>, issues: Vec<ValidationIssue>) -> Self {
        let errors = issues.iter().filter(|i| i.severity == Severity::Error).count();
        let warnings = issues.len() - errors;
        let unique_cards = deck
            .entries()
            .iter()
            .map(|e| e.card.name.as_str())
            .collect::<HashSet<_>>()
            .len();

        // Commanders given only on the command line carry no row
        let malformed_rows = issues.iter().filter(|i| i.rule == Rule::MalformedRow).count();
        let resolved_rows = deck.entries().iter().filter(|e| e.row.is_some()).count();
        let unresolved_rows = unresolved.iter().filter(|r| r.row.is_some()).count();

        let summary = Summary {
            total_cards: deck.total_cards(),
            unique_cards,
            requested_rows: malformed_rows + resolved_rows + unresolved_rows,
            malformed_rows,
            resolved_rows,
            unresolved_rows,
            errors,
            warnings,
            legal: errors == 0,
        };

        Self {
            commanders: deck.commanders().map(|e| e.card.name.clone()).collect(),
            commander_color_identity: deck.commander_identity(),
            deck: deck.entries().iter().map(ReportCard::from).collect(),
            unresolved,
            issues,
            summary,
        }
    }

    pub fn errors(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.issues.iter().filter(|i| i.severity == Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.issues.iter().filter(|i| i.severity == Severity::Warning)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

fn decklist_line(entry: &DeckEntry) -> String {
    format!(
        "{}x {} ({})",
        entry.quantity,
        entry.card.name,
        entry.card.set_code.to_uppercase()
    )
}

/// Plain-text decklist with the commander(s) listed first
pub fn render_decklist(deck: &Deck) -> String {
    let mut output = String::from("// Commander\n");
    for entry in deck.commanders() {
        output.push_str(&decklist_line(entry));
        output.push('\n');
    }

    output.push_str("\n// Deck\n");
    for entry in deck.main_deck() {
        output.push_str(&decklist_line(entry));
        output.push('\n');
    }
    output
}

/// Paths of the two output files for a prefix
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    pub text: PathBuf,
    pub json: PathBuf,
}

impl OutputPaths {
    /// Appends `.txt` / `.json` to the prefix (so "out/my.deck" keeps its dot)
    pub fn from_prefix<P: AsRef<Path>>(prefix: P) -> Self {
        let with_suffix = |suffix: &str| {
            let mut path: OsString = prefix.as_ref().as_os_str().to_owned();
            path.push(suffix);
            PathBuf::from(path)
        };
        Self {
            text: with_suffix(".txt"),
            json: with_suffix(".json"),
        }
    }
}

/// Write the decklist and the JSON report next to each other.
///
/// Both files are attempted even if the first fails; a written file is never
/// removed because the other one failed.
pub fn write_outputs<P: AsRef<Path>>(
    deck: &Deck,
    report: &Report,
    prefix: P,
) -> Result<OutputPaths, OutputError> {
    let paths = OutputPaths::from_prefix(prefix);
    let json = report.to_json()?;
    let text = render_decklist(deck);

    let failures: Vec<OutputError> = [(&paths.text, text), (&paths.json, json)]
        .into_iter()
        .filter_map(|(path, contents)| write_atomic(path, &contents).err())
        .collect();

    if failures.is_empty() {
        Ok(paths)
    } else {
        for failure in &failures {
            error!("{}", failure);
        }
        Err(OutputError::Partial(failures))
    }
}

/// Write via a sibling temporary file and rename it into place
fn write_atomic(path: &Path, contents: &str) -> Result<(), OutputError> {
    let io_error = |source| OutputError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_error)?;
    }

    let mut tmp: OsString = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);

    fs::write(&tmp, contents).map_err(io_error)?;
    if let Err(e) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(io_error(e));
    }

    info!("Wrote {}", path.display());
    Ok(())
}

/// Console summary printed after a run
pub fn format_summary(report: &Report, paths: &OutputPaths) -> String {
    let mut output = String::from("=== Commander Deck Builder Report ===\n");

    if !report.commanders.is_empty() {
        output.push_str(&format!("Commander(s): {}\n", report.commanders.join(", ")));
        output.push_str(&format!(
            "Color Identity: {}\n",
            report.commander_color_identity
        ));
    }
    output.push_str(&format!("Deck size: {}\n", report.summary.total_cards));
    if !report.unresolved.is_empty() {
        output.push_str(&format!("Unresolved cards: {}\n", report.unresolved.len()));
    }

    if report.summary.errors > 0 {
        output.push_str("Issues (must fix):\n");
        for issue in report.errors() {
            output.push_str(&format!(" - {}\n", issue));
        }
    } else {
        output.push_str("No blocking issues detected.\n");
    }

    if report.summary.warnings > 0 {
        output.push_str("Warnings:\n");
        for issue in report.warnings() {
            output.push_str(&format!(" - {}\n", issue));
        }
    }

    output.push_str(&format!("Wrote: {}\n", paths.text.display()));
    output.push_str(&format!("Wrote: {}\n", paths.json.display()));
    output
}

#[cfg(test)]
#[path = "report_tests.rs"]
mod tests;
