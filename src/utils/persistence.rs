use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use serde::Serialize;

use crate::errors::Result;

const TMP_SUFFIX: &str = "tmp";

/// Replaces `path` with `data` by staging to a sibling temporary file and renaming it into place.
///
/// The parent directory must already exist. On failure the staging file is removed and the
/// previous contents of `path` are left untouched.
pub fn write_atomic(path: &Path, data: &str) -> Result<()> {
    let tmp = tmp_path(path);
    let staged = File::create(&tmp).and_then(|mut file| {
        file.write_all(data.as_bytes())?;
        file.flush()?;
        file.sync_all()?;
        fs::rename(&tmp, path)
    });
    if let Err(err) = staged {
        let _ = fs::remove_file(&tmp);
        return Err(err.into());
    }
    Ok(())
}

/// Writes any serializable value as pretty JSON, atomically, creating missing parent directories.
pub fn save_json_to_file<T: Serialize>(value: &T, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    write_atomic(path, &json)
}

/// Staging path used by [`write_atomic`]: `records.txt` becomes `records.txt.tmp`.
pub fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}
