//! Subcommand execution
//!
//! Every command opens the file-backed response store described by the
//! global options and writes its user-facing output to `output`. Diagnostics
//! go through `tracing`, so stdout only ever carries command output.

use crate::cli::args::{CliArgs, Command};
use crate::core::{validator, write_statistics_csv, AdminGate, FileStore, ResponseStore};
use crate::io::ImportReader;
use crate::types::{Submission, SurveyError};
use chrono::Utc;
use std::io::Write;
use std::path::Path;
use tracing::{info, warn};

/// Run the parsed command line
///
/// # Errors
///
/// Returns the first fatal error: unusable store directory, failed store
/// write, invalid submission, refused listing or export, or unreadable
/// import file.
/// Invalid import rows are logged and skipped rather than returned.
pub fn run(args: CliArgs, output: &mut dyn Write) -> Result<(), SurveyError> {
    let store = FileStore::open(&args.store_dir)?;
    let responses = ResponseStore::with_key(store, args.storage_key);

    match args.command {
        Command::Submit {
            name,
            phone,
            region,
            occupation,
        } => {
            let submission = Submission::new(name, phone, region, occupation);
            validator::validate(&submission)?;
            responses.append(submission.into_record(Utc::now()))?;

            writeln!(output, "問卷提交成功！")?;
            write_statistics_csv(&responses.statistics(), output)
        }
        Command::List { password } => {
            AdminGate::new(args.admin_password).authorize(&password)?;
            writeln!(output, "{}", responses.export_text())?;
            Ok(())
        }
        Command::Stats => write_statistics_csv(&responses.statistics(), output),
        Command::Export {
            password,
            output_dir,
        } => {
            let gate = AdminGate::new(args.admin_password);
            let path = responses.export(&gate, &password, &output_dir, Utc::now())?;
            writeln!(output, "{}", path.display())?;
            Ok(())
        }
        Command::Import { input_file } => import(&responses, &input_file, output),
    }
}

fn import(
    responses: &ResponseStore<FileStore>,
    input_file: &Path,
    output: &mut dyn Write,
) -> Result<(), SurveyError> {
    let reader = ImportReader::new(input_file, Utc::now())?;

    let mut accepted = Vec::new();
    let mut rejected = 0usize;
    for result in reader {
        match result {
            Ok(record) => accepted.push(record),
            Err(e) => {
                rejected += 1;
                warn!(file = %input_file.display(), error = %e, "import row rejected");
            }
        }
    }

    let imported = responses.extend(accepted)?;
    info!(file = %input_file.display(), imported, rejected, "import finished");
    writeln!(output, "Imported {} responses ({} rejected)", imported, rejected)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::fs;
    use tempfile::tempdir;

    fn run_with(store_dir: &Path, args: &[&str]) -> Result<String, SurveyError> {
        let mut argv = vec!["program", "--store-dir", store_dir.to_str().unwrap()];
        argv.extend_from_slice(args);
        let parsed = CliArgs::try_parse_from(argv).unwrap();

        let mut output = Vec::new();
        run(parsed, &mut output)?;
        Ok(String::from_utf8(output).unwrap())
    }

    fn submit(store_dir: &Path, name: &str, region: &str) -> Result<String, SurveyError> {
        run_with(
            store_dir,
            &[
                "submit",
                "--name",
                name,
                "--phone",
                "0912345678",
                "--region",
                region,
                "--occupation",
                "藥師",
            ],
        )
    }

    #[test]
    fn test_submit_then_list() {
        let dir = tempdir().unwrap();

        let output = submit(dir.path(), "王小明", "台北市").unwrap();
        assert!(output.starts_with("問卷提交成功！\n"));
        assert!(output.contains("總計,總回覆數,1"));

        let listed = run_with(dir.path(), &["list", "--password", "3939889"]).unwrap();
        let lines: Vec<&str> = listed.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "姓名,電話,地區,工作性質,提交時間");
        assert!(lines[1].starts_with("王小明,0912345678,台北市,藥師,"));
    }

    #[test]
    fn test_submit_rejects_invalid_input() {
        let dir = tempdir().unwrap();

        let result = submit(dir.path(), "王小明", "火星");
        assert!(matches!(result, Err(SurveyError::Validation { .. })));

        let listed = run_with(dir.path(), &["list", "--password", "3939889"]).unwrap();
        assert_eq!(listed, "姓名,電話,地區,工作性質,提交時間\n");
    }

    #[test]
    fn test_list_gated_by_password() {
        let dir = tempdir().unwrap();
        submit(dir.path(), "王小明", "台北市").unwrap();

        let result = run_with(dir.path(), &["list"]);
        assert_eq!(result, Err(SurveyError::MissingPassword));

        let result = run_with(dir.path(), &["list", "--password", "wrong"]);
        assert_eq!(result, Err(SurveyError::AuthenticationFailed));

        let result = run_with(
            dir.path(),
            &["--admin-password", "pilot", "list", "--password", "pilot"],
        );
        assert!(result.unwrap().contains("王小明,0912345678,台北市,藥師,"));
    }

    #[test]
    fn test_stats() {
        let dir = tempdir().unwrap();
        submit(dir.path(), "王小明", "台北市").unwrap();
        submit(dir.path(), "李小華", "台中市").unwrap();
        submit(dir.path(), "陳大同", "台北市").unwrap();

        let output = run_with(dir.path(), &["stats"]).unwrap();
        assert_eq!(
            output,
            "分類,項目,回覆數\n總計,總回覆數,3\n地區,台北市,2\n地區,台中市,1\n職業類型,藥師,3\n"
        );
    }

    #[test]
    fn test_export_gated_by_password() {
        let dir = tempdir().unwrap();
        let out = tempdir().unwrap();
        submit(dir.path(), "王小明", "台北市").unwrap();
        let out_dir = out.path().to_str().unwrap();

        let result = run_with(dir.path(), &["export", "--output-dir", out_dir]);
        assert_eq!(result, Err(SurveyError::MissingPassword));

        let result = run_with(
            dir.path(),
            &["export", "--password", "wrong", "--output-dir", out_dir],
        );
        assert_eq!(result, Err(SurveyError::AuthenticationFailed));
        assert_eq!(fs::read_dir(out.path()).unwrap().count(), 0);

        let printed = run_with(
            dir.path(),
            &["export", "--password", "3939889", "--output-dir", out_dir],
        )
        .unwrap();
        let path = Path::new(printed.trim_end());
        assert!(path.starts_with(out.path()));
        assert!(fs::read_to_string(path).unwrap().starts_with('\u{feff}'));
    }

    #[test]
    fn test_export_with_configured_password() {
        let dir = tempdir().unwrap();
        let out = tempdir().unwrap();
        let out_dir = out.path().to_str().unwrap();

        let result = run_with(
            dir.path(),
            &["--admin-password", "pilot", "export", "--password", "3939889", "--output-dir", out_dir],
        );
        assert_eq!(result, Err(SurveyError::AuthenticationFailed));

        let result = run_with(
            dir.path(),
            &["--admin-password", "pilot", "export", "--password", "pilot", "--output-dir", out_dir],
        );
        assert!(result.is_ok());
    }

    #[test]
    fn test_import_skips_invalid_rows() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("input.csv");
        fs::write(
            &input,
            "姓名,電話,地區,工作性質,提交時間\n\
             王小明,0912345678,台北市,藥師,2024-01-01T00:00:00.000Z\n\
             ,0912345678,台北市,藥師,2024-01-01T00:00:00.000Z\n\
             李小華,0987654321,台南市,其他,2024-01-02T00:00:00.000Z\n",
        )
        .unwrap();

        let output = run_with(dir.path(), &["import", input.to_str().unwrap()]).unwrap();
        assert_eq!(output, "Imported 2 responses (1 rejected)\n");

        let stats = run_with(dir.path(), &["stats"]).unwrap();
        assert!(stats.contains("總計,總回覆數,2"));
    }

    #[test]
    fn test_import_missing_file() {
        let dir = tempdir().unwrap();
        let result = run_with(dir.path(), &["import", "does-not-exist.csv"]);
        assert!(matches!(result, Err(SurveyError::FileNotFound { .. })));
    }

    #[test]
    fn test_storage_key_selects_document() {
        let dir = tempdir().unwrap();
        submit(dir.path(), "王小明", "台北市").unwrap();

        run_with(
            dir.path(),
            &[
                "--storage-key", "pilot", "submit", "--name", "李小華", "--phone",
                "0912345678", "--region", "台中市", "--occupation", "藥助",
            ],
        )
        .unwrap();

        assert!(dir.path().join("survey_responses_csv.csv").exists());
        assert!(dir.path().join("pilot.csv").exists());
        let stats = run_with(dir.path(), &["--storage-key", "pilot", "stats"]).unwrap();
        assert!(stats.contains("總計,總回覆數,1"));
        assert!(stats.contains("台中市"));
    }
}
