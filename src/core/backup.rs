use crate::config::Config;
use crate::db::log::audit_quiet;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, success, warning};
use rusqlite::Connection;
use std::fs;
use std::io::{Write, stdin, stdout};
use std::path::{Path, PathBuf};
use zip::ZipWriter;
use zip::write::FileOptions;

pub struct BackupLogic;

impl BackupLogic {
    /// Copy the configured database to `dest_file`, optionally zipped.
    /// Returns the path actually written, or `None` when the user declined
    /// to overwrite an existing file.
    pub fn backup(cfg: &Config, dest_file: &str, compress: bool) -> AppResult<Option<PathBuf>> {
        let src = Path::new(&cfg.database);
        let dest = Path::new(dest_file);

        if !src.exists() {
            return Err(AppError::NotFound(format!("Database {}", src.display())));
        }

        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)?;
        }

        if dest.exists() && !confirm_overwrite(dest)? {
            warning("Backup cancelled by user.");
            return Ok(None);
        }

        fs::copy(src, dest)?;
        success(format!("Backup created: {}", dest.display()));

        let final_path = if compress {
            let compressed = compress_backup(dest)?;
            if compressed.as_path() != dest {
                match fs::remove_file(dest) {
                    Ok(()) => info(format!("Removed uncompressed backup: {}", dest.display())),
                    Err(e) => warning(format!("Failed to remove uncompressed backup: {e}")),
                }
            }
            compressed
        } else {
            dest.to_path_buf()
        };

        let conn = Connection::open(src)?;
        audit_quiet(
            &conn,
            "backup",
            &final_path.to_string_lossy(),
            if compress {
                "Backup created and compressed"
            } else {
                "Backup created"
            },
        );

        Ok(Some(final_path))
    }
}

fn confirm_overwrite(dest: &Path) -> AppResult<bool> {
    println!(
        "⚠️  The file '{}' already exists.\nDo you want to overwrite it? [y/N]: ",
        dest.display()
    );
    print!("> ");
    stdout().flush()?;

    let mut answer = String::new();
    stdin().read_line(&mut answer)?;
    let answer = answer.trim().to_lowercase();
    Ok(answer == "y" || answer == "yes")
}

/// Compress a backup using .zip
fn compress_backup(path: &Path) -> AppResult<PathBuf> {
    let zip_path = path.with_extension("zip");
    let entry_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .ok_or_else(|| AppError::Other(format!("invalid backup path {}", path.display())))?;

    let file = fs::File::create(&zip_path)?;
    let mut zip = ZipWriter::new(file);
    let options: FileOptions<'_, ()> =
        FileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    let mut f = fs::File::open(path)?;
    zip.start_file(entry_name, options)
        .map_err(std::io::Error::other)?;
    std::io::copy(&mut f, &mut zip)?;
    zip.finish().map_err(std::io::Error::other)?;

    info(format!("Compressed: {}", zip_path.display()));
    Ok(zip_path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compressed_backup_replaces_plain_copy() {
        let tmp = tempfile::tempdir().unwrap();
        let db = tmp.path().join("pec.sqlite");
        let conn = Connection::open(&db).unwrap();
        crate::db::initialize::init_db(&conn).unwrap();
        drop(conn);

        let cfg = Config {
            database: db.to_string_lossy().to_string(),
            ..Config::default()
        };
        let dest = tmp.path().join("out").join("copy.sqlite");

        let written = BackupLogic::backup(&cfg, &dest.to_string_lossy(), true)
            .unwrap()
            .unwrap();

        assert_eq!(written, tmp.path().join("out").join("copy.zip"));
        assert!(written.exists());
        assert!(!dest.exists());
    }

    #[test]
    fn missing_database_is_reported() {
        let tmp = tempfile::tempdir().unwrap();
        let cfg = Config {
            database: tmp.path().join("none.sqlite").to_string_lossy().to_string(),
            ..Config::default()
        };
        let err = BackupLogic::backup(&cfg, "/tmp/unused.sqlite", false).unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
