use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// 末尾の `(N)` を分離する。`foo(5)` -> (`foo`, Some(5))
pub fn split_counter(stem: &str) -> (&str, Option<u64>) {
    let Some(body) = stem.strip_suffix(')') else {
        return (stem, None);
    };
    let Some(open) = body.rfind('(') else {
        return (stem, None);
    };
    let digits = &body[open + 1..];
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return (stem, None);
    }
    match digits.parse::<u64>() {
        Ok(n) => (&stem[..open], Some(n)),
        Err(_) => (stem, None),
    }
}

pub fn next_candidate(stem: &str) -> Result<String> {
    match split_counter(stem) {
        (prefix, Some(n)) => {
            let next = n
                .checked_add(1)
                .with_context(|| format!("重複カウンタが上限に達しました: {stem}"))?;
            Ok(format!("{prefix}({next})"))
        }
        (_, None) => Ok(format!("{stem}(0)")),
    }
}

pub fn file_path_for(directory: &Path, stem: &str, extension: &str) -> PathBuf {
    if extension.is_empty() {
        directory.join(stem)
    } else {
        directory.join(format!("{stem}.{extension}"))
    }
}

/// `directory/<stem>.<extension>` が存在しない stem を返す。
pub fn resolve_unique_stem(stem: &str, extension: &str, directory: &Path) -> Result<String> {
    resolve_stem(stem, extension, directory, None)
}

/// リネーム対象自身のパスは衝突とみなさない版。
pub fn resolve_unique_stem_for(
    stem: &str,
    extension: &str,
    directory: &Path,
    source: &Path,
) -> Result<String> {
    resolve_stem(stem, extension, directory, Some(source))
}

fn resolve_stem(
    stem: &str,
    extension: &str,
    directory: &Path,
    source: Option<&Path>,
) -> Result<String> {
    let mut candidate = stem.to_string();
    while !is_available(&file_path_for(directory, &candidate, extension), source) {
        candidate = next_candidate(&candidate)?;
    }
    Ok(candidate)
}

fn is_available(candidate: &Path, source: Option<&Path>) -> bool {
    if source.is_some_and(|source| source == candidate) {
        return true;
    }
    // 壊れたシンボリックリンクも占有済みとして扱う
    candidate.symlink_metadata().is_err()
}
