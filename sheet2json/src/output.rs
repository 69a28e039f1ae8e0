//! Write converted configs as JSON files

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

use crate::config::ConvertContext;
use crate::convert::ConvertError;

/// Output location for a source sheet, mirroring its place under the root
///
/// `<output_dir>/<source dir relative to root>/<output_name>.json`
pub fn output_path(ctx: &ConvertContext, source: &Path, output_name: &str) -> PathBuf {
    let parent = source.parent().unwrap_or(Path::new(""));
    let relative = parent.strip_prefix(&ctx.root).unwrap_or(Path::new(""));
    ctx.output_dir
        .join(relative)
        .join(format!("{}.json", output_name))
}

/// Write `value` as tab-indented JSON, replacing any existing file
pub fn write_document(path: &Path, value: &serde_json::Value) -> Result<(), ConvertError> {
    let io_err = |source: std::io::Error| ConvertError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(io_err)?;
    }

    let file = File::create(path).map_err(io_err)?;
    let mut writer = BufWriter::new(file);
    let mut serializer = Serializer::with_formatter(&mut writer, PrettyFormatter::with_indent(b"\t"));
    value
        .serialize(&mut serializer)
        .map_err(|e| io_err(e.into()))?;
    writer.flush().map_err(io_err)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::Strictness;
    use serde_json::json;
    use tempfile::TempDir;

    fn context(root: &Path, output_dir: &Path) -> ConvertContext {
        ConvertContext {
            root: root.to_path_buf(),
            output_dir: output_dir.to_path_buf(),
            sheet: "Sheet1".into(),
            extensions: vec!["xlsx".into()],
            strictness: Strictness::Permissive,
        }
    }

    #[test]
    fn test_output_path_mirrors_source_dir() {
        let ctx = context(Path::new("/data/tables"), Path::new("/work/json"));

        assert_eq!(
            output_path(&ctx, Path::new("/data/tables/units/hero.xlsx"), "heroes"),
            PathBuf::from("/work/json/units/heroes.json")
        );
        assert_eq!(
            output_path(&ctx, Path::new("/data/tables/boss.xlsx"), "boss"),
            PathBuf::from("/work/json/boss.json")
        );
    }

    #[test]
    fn test_write_uses_tab_indent() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("a").join("b").join("cfg.json");

        write_document(&path, &json!([{"id": 1, "name": "Alice"}])).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert_eq!(text, "[\n\t{\n\t\t\"id\": 1,\n\t\t\"name\": \"Alice\"\n\t}\n]");
    }

    #[test]
    fn test_write_truncates_existing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("cfg.json");
        fs::write(&path, "x".repeat(200)).unwrap();

        write_document(&path, &json!({})).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "{}");
    }

    #[test]
    fn test_write_reports_path_on_failure() {
        let dir = TempDir::new().unwrap();
        // A file where a directory is needed
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "").unwrap();
        let path = blocker.join("cfg.json");

        let err = write_document(&path, &json!({})).unwrap_err();

        match err {
            ConvertError::Io { path: p, .. } => assert_eq!(p, path),
            other => panic!("unexpected error: {other}"),
        }
    }
}
