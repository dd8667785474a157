use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::Serialize;

use kfh_dashboard::dataset::{CategoryColumn, KfhDataset};
use kfh_dashboard::export::{export_csv, export_pdf, DEFAULT_CSV_FILE_NAME, DEFAULT_PDF_FILE_NAME};
use kfh_dashboard::ingestion::{LoadOptions, TracingObserver};
use kfh_dashboard::processing::FilterSelection;
use kfh_dashboard::session::Session;
use kfh_dashboard::summary::{Aggregates, SummaryRecord};

use crate::cli::{ExportArgs, InputArgs, SelectionArgs, ShowArgs};
use crate::render::{print_charts, print_options, print_rows, print_summary};

pub fn run_options(args: &InputArgs) -> Result<()> {
    let session = open_session(&args.input)?;
    let options: Vec<_> = CategoryColumn::ALL
        .into_iter()
        .map(|column| (column, session.options(column)))
        .collect();
    print_options(&options);
    Ok(())
}

#[derive(Serialize)]
struct ShowOutput {
    summary: SummaryRecord,
    aggregates: Aggregates,
}

pub fn run_show(args: &ShowArgs) -> Result<()> {
    let mut session = open_session(&args.input.input)?;
    let selection = resolve_selection(session.dataset(), &args.selection)?;
    session.set_selection(selection);

    let view = session.view();
    let summary = session.summary();
    let aggregates = session.aggregates_with_limit(args.top);

    if args.json {
        let out = ShowOutput { summary, aggregates };
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    print_rows(&view, args.rows);
    print_summary(&summary);
    print_charts(&aggregates);
    Ok(())
}

/// Returns `Ok(false)` when at least one artifact failed; the others are still written.
pub fn run_export(args: &ExportArgs) -> Result<bool> {
    let mut session = open_session(&args.input.input)?;
    let selection = resolve_selection(session.dataset(), &args.selection)?;
    session.set_selection(selection);

    let mut ok = true;
    if let Some(path) = &args.csv {
        let path = artifact_path(path.as_deref(), &args.out_dir, DEFAULT_CSV_FILE_NAME);
        let view = session.view();
        ok &= report_export("CSV", &path, export_csv(view.data(), &path));
    }
    if let Some(path) = &args.pdf {
        let path = artifact_path(path.as_deref(), &args.out_dir, DEFAULT_PDF_FILE_NAME);
        ok &= report_export("PDF", &path, export_pdf(&session.summary(), &path));
    }
    Ok(ok)
}

fn report_export(label: &str, path: &Path, result: kfh_dashboard::DashboardResult<()>) -> bool {
    match result {
        Ok(()) => {
            println!("{label} written to {}", path.display());
            true
        }
        Err(error) => {
            tracing::error!(artifact = label, path = %path.display(), %error, "export failed");
            eprintln!("error: {label} export to {} failed: {error}", path.display());
            false
        }
    }
}

fn artifact_path(explicit: Option<&Path>, out_dir: &Path, default_name: &str) -> PathBuf {
    explicit.map_or_else(|| out_dir.join(default_name), Path::to_path_buf)
}

fn open_session(path: &Path) -> Result<Session> {
    let options = LoadOptions {
        observer: Some(Arc::new(TracingObserver)),
        ..LoadOptions::default()
    };
    Session::open(path, &options).with_context(|| format!("failed to load {}", path.display()))
}

/// Build the selection: every value by default, then the selection file, then the flags.
fn resolve_selection(dataset: &KfhDataset, args: &SelectionArgs) -> Result<FilterSelection> {
    let mut selection = FilterSelection::all(dataset);

    if let Some(file) = &args.selection_file {
        let text = fs::read_to_string(file)
            .with_context(|| format!("failed to read selection file {}", file.display()))?;
        let columns: BTreeMap<CategoryColumn, Vec<String>> = serde_json::from_str(&text)
            .with_context(|| format!("invalid selection file {}", file.display()))?;
        for (column, values) in columns {
            selection = selection.with(column, values);
        }
    }

    for (column, values) in [
        (CategoryColumn::Kfh, &args.kfh),
        (CategoryColumn::Rack, &args.rack),
        (CategoryColumn::Section, &args.section),
    ] {
        if !values.is_empty() {
            selection = selection.with(column, values.iter().cloned());
        }
    }

    tracing::debug!(?selection, "resolved filter selection");
    Ok(selection)
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;

    use kfh_dashboard::dataset::CategoryColumn;
    use kfh_dashboard::ingestion::{load_from_path, LoadOptions};

    use super::{resolve_selection, run_export};
    use crate::cli::{ExportArgs, InputArgs, SelectionArgs};

    const FIXTURE: &str = "tests/fixtures/kfh.csv";

    fn no_flags() -> SelectionArgs {
        SelectionArgs {
            kfh: Vec::new(),
            rack: Vec::new(),
            section: Vec::new(),
            selection_file: None,
        }
    }

    fn values(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn selection_defaults_to_every_value() {
        let ds = load_from_path(FIXTURE, &LoadOptions::default()).unwrap();
        let selection = resolve_selection(&ds, &no_flags()).unwrap();

        assert_eq!(selection.values(CategoryColumn::Kfh).len(), 3);
        assert_eq!(selection.values(CategoryColumn::Rack).len(), 5);
        assert_eq!(selection.values(CategoryColumn::Section).len(), 3);
    }

    #[test]
    fn flags_override_the_selection_file_per_column() {
        let ds = load_from_path(FIXTURE, &LoadOptions::default()).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("selection.json");
        fs::write(&file, r#"{"KFHName": ["North"], "RackName": ["R1", "R2"], "SectionName": []}"#)
            .unwrap();

        let args = SelectionArgs {
            rack: values(&["R5"]),
            selection_file: Some(file),
            ..no_flags()
        };
        let selection = resolve_selection(&ds, &args).unwrap();

        // File value kept, flag wins over file, empty list selects nothing.
        assert_eq!(selection.values(CategoryColumn::Kfh).iter().collect::<Vec<_>>(), ["North"]);
        assert_eq!(selection.values(CategoryColumn::Rack).iter().collect::<Vec<_>>(), ["R5"]);
        assert!(selection.values(CategoryColumn::Section).is_empty());
    }

    #[test]
    fn columns_missing_from_the_file_keep_every_value() {
        let ds = load_from_path(FIXTURE, &LoadOptions::default()).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("selection.json");
        fs::write(&file, r#"{"SectionName": ["Dairy"]}"#).unwrap();

        let args = SelectionArgs {
            selection_file: Some(file),
            ..no_flags()
        };
        let selection = resolve_selection(&ds, &args).unwrap();

        assert_eq!(selection.values(CategoryColumn::Kfh).len(), 3);
        assert_eq!(selection.values(CategoryColumn::Section).iter().collect::<Vec<_>>(), ["Dairy"]);
    }

    #[test]
    fn invalid_selection_file_is_an_error() {
        let ds = load_from_path(FIXTURE, &LoadOptions::default()).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("selection.json");
        fs::write(&file, r#"{"Shift": ["Night"]}"#).unwrap();

        let args = SelectionArgs {
            selection_file: Some(file),
            ..no_flags()
        };
        let err = resolve_selection(&ds, &args).unwrap_err();
        assert!(format!("{err:#}").starts_with("invalid selection file"));
    }

    #[test]
    fn failed_artifact_does_not_stop_the_other() {
        let dir = tempfile::tempdir().unwrap();
        let csv_path = dir.path().join("rows.csv");
        let pdf_path = dir.path().join("missing").join("report.pdf");

        let args = ExportArgs {
            input: InputArgs {
                input: PathBuf::from(FIXTURE),
            },
            selection: SelectionArgs {
                kfh: values(&["East"]),
                ..no_flags()
            },
            csv: Some(Some(csv_path.clone())),
            pdf: Some(Some(pdf_path.clone())),
            out_dir: dir.path().to_path_buf(),
        };

        assert!(!run_export(&args).unwrap());
        assert!(!pdf_path.exists());
        let text = fs::read_to_string(&csv_path).unwrap();
        assert_eq!(text.lines().count(), 3);
    }

    #[test]
    fn default_names_land_in_the_output_directory() {
        let dir = tempfile::tempdir().unwrap();
        let args = ExportArgs {
            input: InputArgs {
                input: PathBuf::from(FIXTURE),
            },
            selection: no_flags(),
            csv: Some(None),
            pdf: Some(None),
            out_dir: dir.path().to_path_buf(),
        };

        assert!(run_export(&args).unwrap());
        assert!(dir.path().join("filtered_kfh_data.csv").is_file());
        assert!(dir.path().join("kfh_report.pdf").is_file());
    }
}
