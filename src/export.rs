use crate::error::Result;
use opportunity_common::CsvFile;
use std::path::{Path, PathBuf};

/// ディレクトリ（または拡張子なし）ならその中に favorites.csv を作る
pub fn output_path_for(output: &Path, file_name: &str) -> PathBuf {
    if output.is_dir() || output.extension().is_none() {
        output.join(file_name)
    } else {
        output.to_path_buf()
    }
}

pub fn write_csv(file: &CsvFile, output: &Path) -> Result<PathBuf> {
    let path = output_path_for(output, &file.file_name);

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(&path, &file.content)?;
    Ok(path)
}
