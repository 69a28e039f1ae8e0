//! Walk the root and convert every config sheet found

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::{ConvertContext, RunOptions};
use crate::convert::{ConvertError, Shape, convert_sheet, load_sheet};
use crate::output::{output_path, write_document};
use crate::report::RunReport;
use crate::walker::{SheetWalker, WalkError};

/// A sheet that was converted and written
#[derive(Debug, Clone)]
pub struct Conversion {
    pub source: PathBuf,
    pub output: PathBuf,
    pub shape: Shape,
    /// Array elements (list shape) or object keys (single shape)
    pub entries: usize,
}

/// A run stopped by an error reading the directory tree
///
/// Carries what was converted or failed before the walk broke off.
#[derive(Debug, Error)]
#[error("failed to walk {}: {source}", .root.display())]
pub struct WalkAborted {
    pub root: PathBuf,
    pub report: RunReport,
    #[source]
    pub source: WalkError,
}

/// Load, parse and write one spreadsheet
pub fn convert_file(ctx: &ConvertContext, source: &Path) -> Result<Conversion, ConvertError> {
    let sheet = load_sheet(source, &ctx.sheet)?;
    let value = convert_sheet(&sheet, ctx.strictness)?;

    let entries = match &value {
        serde_json::Value::Array(items) => items.len(),
        serde_json::Value::Object(map) => map.len(),
        _ => 0,
    };

    let output = output_path(ctx, source, &sheet.output_name);
    write_document(&output, &value)?;

    Ok(Conversion {
        source: source.to_path_buf(),
        output,
        shape: sheet.shape,
        entries,
    })
}

/// Convert every sheet under `ctx.root`
///
/// A failed file is recorded and the walk moves on, unless
/// `options.fail_fast` is set. An error reading the directory tree itself
/// aborts the run.
pub fn run(ctx: &ConvertContext, options: RunOptions) -> Result<RunReport, WalkAborted> {
    let mut report = RunReport::default();

    for source in SheetWalker::new(&ctx.root, &ctx.extensions) {
        let source = match source {
            Ok(source) => source,
            Err(error) => {
                log::error!("Walk of {} aborted: {}", ctx.root.display(), error);
                return Err(WalkAborted {
                    root: ctx.root.clone(),
                    report,
                    source: error,
                });
            }
        };

        match convert_file(ctx, &source) {
            Ok(conversion) => {
                log::info!(
                    "Converted {} -> {} ({} {} entries)",
                    conversion.source.display(),
                    conversion.output.display(),
                    conversion.entries,
                    conversion.shape
                );
                report.record_success(conversion);
            }
            Err(error) => {
                log::warn!("[{}]: {}", source.display(), error);
                report.record_failure(source, error);
                if options.fail_fast {
                    report.aborted = true;
                    break;
                }
            }
        }
    }

    Ok(report)
}
