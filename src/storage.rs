//! 输出目录与目录遍历辅助模块
//!
//! # 设计思路
//!
//! 统一管理输出目录的创建，以及按确定顺序列出目录项，
//! 保证两次运行的日志顺序一致。
//!
//! # 实现思路
//!
//! - 目录不存在时自动 `create_dir_all`，已存在则直接复用。
//! - 目录项按文件名的字节序升序排列。
//! - 所有可能失败的操作均返回 `Result`，不使用 `expect()` / `unwrap()`。

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::AppError;

/// 确保目录存在
///
/// # 返回
/// - `Ok(PathBuf)` — 可用的目录
/// - `Err(AppError::Storage)` — 路径被普通文件占用或无法创建
pub fn ensure_dir(path: &Path) -> Result<PathBuf, AppError> {
    if path.is_dir() {
        return Ok(path.to_path_buf());
    }
    if path.exists() {
        return Err(AppError::Storage(format!(
            "'{}' 已存在但不是目录",
            path.display()
        )));
    }

    fs::create_dir_all(path).map_err(|e| {
        AppError::Storage(format!("创建目录 '{}' 失败: {}", path.display(), e))
    })?;
    log::debug!("📂 已创建目录 {}", path.display());
    Ok(path.to_path_buf())
}

/// 列出目录下所有条目，按文件名字节序升序排列
pub fn sorted_entries(dir: &Path) -> Result<Vec<PathBuf>, AppError> {
    let mut entries = fs::read_dir(dir)?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<Result<Vec<_>, _>>()?;
    entries.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(entries)
}

/// 统计目录下扩展名恰好为 `extension` 的普通文件个数（区分大小写）
///
/// 以 `.` 开头的隐藏文件（如 macOS 的 `._img.jpg`）不计入。
pub fn count_files_with_extension(dir: &Path, extension: &str) -> Result<usize, AppError> {
    let mut file_count = 0;

    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        if entry.file_name().to_string_lossy().starts_with('.') {
            continue;
        }
        if entry.path().extension().is_some_and(|ext| ext == extension) {
            file_count += 1;
        }
    }

    Ok(file_count)
}
