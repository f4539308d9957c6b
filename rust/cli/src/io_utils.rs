//! Reading hand histories from disk.
//!
//! `.zst` files are decompressed transparently and a leading UTF-8 BOM is
//! dropped, so plain and compressed JSONL can be mixed in one directory.

use std::path::{Path, PathBuf};

/// Read a text file, decompressing it first when the name ends in `.zst`.
///
/// ```rust,no_run
/// # use holdem_cli::io_utils::read_text_auto;
/// # use std::path::Path;
/// let plain = read_text_auto(Path::new("data/hands.jsonl")).unwrap();
/// let packed = read_text_auto(Path::new("data/hands.jsonl.zst")).unwrap();
/// ```
pub fn read_text_auto(path: &Path) -> Result<String, String> {
    let is_zst = path.extension().is_some_and(|ext| ext == "zst");
    let mut content = if is_zst {
        let comp = std::fs::read(path).map_err(|e| e.to_string())?;
        let dec = zstd::stream::decode_all(comp.as_slice()).map_err(|e| e.to_string())?;
        String::from_utf8(dec).map_err(|e| e.to_string())?
    } else {
        std::fs::read_to_string(path).map_err(|e| e.to_string())?
    };
    strip_utf8_bom(&mut content);
    Ok(content)
}

/// Hand history files (`*.jsonl`, `*.jsonl.zst`) under `dir`, recursively,
/// in path order so results do not depend on directory iteration order.
pub fn collect_history_files(dir: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();
    let mut stack = vec![dir.to_path_buf()];
    while let Some(d) = stack.pop() {
        let Ok(rd) = std::fs::read_dir(&d) else {
            continue;
        };
        for entry in rd.filter_map(Result::ok) {
            let p = entry.path();
            if p.is_dir() {
                stack.push(p);
            } else if let Some(name) = p.file_name().and_then(|f| f.to_str())
                && (name.ends_with(".jsonl") || name.ends_with(".jsonl.zst"))
            {
                files.push(p);
            }
        }
    }
    files.sort();
    files
}

fn strip_utf8_bom(s: &mut String) {
    const UTF8_BOM: &str = "\u{feff}";
    if s.starts_with(UTF8_BOM) {
        s.drain(..UTF8_BOM.len());
    }
}
