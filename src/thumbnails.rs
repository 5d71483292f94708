//! 步道缩略图生成模块
//!
//! # 设计思路
//!
//! 目录结构固定为 `trails/<步道>/photos/<航点>/<图片>`，
//! 每个航点下生成 `thumbs/<文件名>.jpg`：沿短边居中裁方，缩放到 160×160，JPEG 质量 85。
//!
//! # 实现思路
//!
//! - 步道、航点、图片都按文件名字节序遍历，保证日志可复现。
//! - `trails/` 缺失只提示不报错；步道缺少 `photos/` 时跳过该步道。
//! - 航点内的子目录（包括 `thumbs/`）与非图片文件一律忽略。
//! - 带 alpha 的图片直接丢弃 alpha 转 RGB，不铺白底（与图标生成不同）。
//! - 同名不同扩展名的图片会写到同一个缩略图，后遍历到的覆盖先遍历到的。
//! - 默认任何单个文件失败都中止整批；`continue_on_error` 打开时记录失败并继续。

use std::path::{Path, PathBuf};

use crate::error::AppError;
use crate::image_handler::{
    crop_center_square, normalize_for_jpeg, write_jpeg, ImageHandler, OutputFile, ThumbnailConfig,
};
use crate::storage::{count_files_with_extension, ensure_dir, sorted_entries};

const THUMBNAIL_EXTENSION: &str = "jpg";

/// 单个航点的处理结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WaypointSummary {
    pub trail: String,
    pub waypoint: String,
    /// 处理完成后 `thumbs/` 内 `.jpg` 文件总数（包括此前已存在的）
    pub thumbnail_count: usize,
}

/// 单个文件的失败记录（仅 `continue_on_error` 打开时产生）
#[derive(Debug)]
pub struct ThumbnailFailure {
    pub source: PathBuf,
    pub error: AppError,
}

/// 一次缩略图生成的结果
#[derive(Debug, Default)]
pub struct ThumbnailReport {
    /// 根目录是否存在
    pub trails_root_found: bool,
    pub trails_processed: Vec<String>,
    /// 缺少 `photos/` 而被跳过的步道
    pub trails_skipped: Vec<String>,
    pub waypoints: Vec<WaypointSummary>,
    pub written: Vec<OutputFile>,
    pub failures: Vec<ThumbnailFailure>,
}

impl ThumbnailReport {
    pub fn thumbnail_count(&self, trail: &str, waypoint: &str) -> Option<usize> {
        self.waypoints
            .iter()
            .find(|summary| summary.trail == trail && summary.waypoint == waypoint)
            .map(|summary| summary.thumbnail_count)
    }
}

/// 缩略图生成器
pub struct ThumbnailGenerator {
    root: PathBuf,
    config: ThumbnailConfig,
    handler: ImageHandler,
}

impl ThumbnailGenerator {
    /// # 参数
    /// * `root` - 项目根目录，`trails/` 相对于它
    /// * `config` - 缩略图配置
    pub fn new(root: impl Into<PathBuf>, config: ThumbnailConfig) -> Self {
        let handler = ImageHandler::new(config.resize_filter);
        Self {
            root: root.into(),
            config,
            handler,
        }
    }

    pub fn trails_dir(&self) -> PathBuf {
        self.root.join(&self.config.trails_dir)
    }

    /// 遍历全部步道生成缩略图
    pub fn run(&self) -> Result<ThumbnailReport, AppError> {
        self.config.validate()?;

        let trails_dir = self.trails_dir();
        let mut report = ThumbnailReport::default();

        if !trails_dir.is_dir() {
            println!("Trails directory not found at {}", trails_dir.display());
            log::warn!("⚠️ 步道目录不存在，跳过: {}", trails_dir.display());
            return Ok(report);
        }
        report.trails_root_found = true;

        for trail_dir in sorted_entries(&trails_dir)? {
            if !trail_dir.is_dir() {
                continue;
            }

            let trail_name = display_name(&trail_dir);
            println!("\nProcessing trail: {}", trail_name);
            self.process_trail(&trail_dir, &trail_name, &mut report)?;
        }

        if !report.failures.is_empty() {
            println!("\n{} file(s) failed:", report.failures.len());
            for failure in &report.failures {
                println!("  {}: {}", failure.source.display(), failure.error);
            }
        }

        println!("\nDone!");
        log::info!(
            "✅ 缩略图生成完成 - 步道 {} 个，航点 {} 个，写入 {} 个，失败 {} 个",
            report.trails_processed.len(),
            report.waypoints.len(),
            report.written.len(),
            report.failures.len()
        );

        Ok(report)
    }

    fn process_trail(
        &self,
        trail_dir: &Path,
        trail_name: &str,
        report: &mut ThumbnailReport,
    ) -> Result<(), AppError> {
        let photos_dir = trail_dir.join(&self.config.photos_dir_name);

        if !photos_dir.is_dir() {
            println!("No photos directory found at {}", photos_dir.display());
            report.trails_skipped.push(trail_name.to_string());
            return Ok(());
        }

        for waypoint_dir in sorted_entries(&photos_dir)? {
            if !waypoint_dir.is_dir() {
                continue;
            }

            let waypoint_name = display_name(&waypoint_dir);
            let thumbs_dir = ensure_dir(&waypoint_dir.join(&self.config.thumbs_dir_name))?;

            self.process_waypoint(&waypoint_dir, &thumbs_dir, report)?;

            let thumbnail_count = count_files_with_extension(&thumbs_dir, THUMBNAIL_EXTENSION)?;
            println!(
                "Processed waypoint {}: {} thumbnails",
                waypoint_name, thumbnail_count
            );

            report.waypoints.push(WaypointSummary {
                trail: trail_name.to_string(),
                waypoint: waypoint_name,
                thumbnail_count,
            });
        }

        report.trails_processed.push(trail_name.to_string());
        Ok(())
    }

    fn process_waypoint(
        &self,
        waypoint_dir: &Path,
        thumbs_dir: &Path,
        report: &mut ThumbnailReport,
    ) -> Result<(), AppError> {
        for source in sorted_entries(waypoint_dir)? {
            if !self.is_candidate_image(&source) {
                continue;
            }

            let Some(thumb_name) = thumbnail_file_name(&source) else {
                continue;
            };
            let thumb_path = thumbs_dir.join(&thumb_name);

            println!("  {} -> {}/{}", display_name(&source), self.config.thumbs_dir_name, thumb_name);

            match self.create_square_thumbnail(&source, &thumb_path) {
                Ok(output) => report.written.push(output),
                Err(err) if self.config.continue_on_error => {
                    log::warn!("⚠️ 缩略图生成失败，继续处理其余文件: {} - {}", source.display(), err);
                    report.failures.push(ThumbnailFailure { source, error: err });
                }
                Err(err) => return Err(err),
            }
        }

        Ok(())
    }

    /// 为单张图片生成居中裁方的缩略图
    pub fn create_square_thumbnail(&self, source: &Path, output: &Path) -> Result<OutputFile, AppError> {
        let image = normalize_for_jpeg(self.handler.open(source)?);
        let cropped = crop_center_square(&image);
        let thumbnail = self.handler.resize_square(&cropped, self.config.size)?;

        Ok(write_jpeg(&thumbnail, output, self.config.jpeg_quality)?)
    }

    /// 普通文件且扩展名（忽略大小写）在白名单内
    fn is_candidate_image(&self, path: &Path) -> bool {
        if !path.is_file() {
            return false;
        }

        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| self.config.accepts_extension(ext))
    }
}

/// 输出文件名：保留原文件名主干，扩展名固定为 `.jpg`
fn thumbnail_file_name(source: &Path) -> Option<String> {
    source
        .file_stem()
        .map(|stem| format!("{}.{}", stem.to_string_lossy(), THUMBNAIL_EXTENSION))
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thumbnail_name_forces_jpg() {
        assert_eq!(thumbnail_file_name(Path::new("a/img.PNG")).as_deref(), Some("img.jpg"));
        assert_eq!(thumbnail_file_name(Path::new("a/photo.v2.webp")).as_deref(), Some("photo.v2.jpg"));
        assert_eq!(thumbnail_file_name(Path::new("a/img.jpeg")).as_deref(), Some("img.jpg"));
    }

    #[test]
    fn test_candidate_filter_skips_dirs_and_other_extensions() {
        let root = tempfile::tempdir().expect("create temp dir failed");
        let generator = ThumbnailGenerator::new(root.path(), ThumbnailConfig::default());

        let image_file = root.path().join("a.JPEG");
        let text_file = root.path().join("notes.txt");
        let dir_named_like_image = root.path().join("folder.png");
        std::fs::write(&image_file, b"").expect("write failed");
        std::fs::write(&text_file, b"").expect("write failed");
        std::fs::create_dir(&dir_named_like_image).expect("create dir failed");

        assert!(generator.is_candidate_image(&image_file));
        assert!(!generator.is_candidate_image(&text_file));
        assert!(!generator.is_candidate_image(&dir_named_like_image));
    }

    #[test]
    fn test_missing_trails_root_is_not_an_error() {
        let root = tempfile::tempdir().expect("create temp dir failed");

        let report = ThumbnailGenerator::new(root.path(), ThumbnailConfig::default())
            .run()
            .expect("missing trails dir should not fail");

        assert!(!report.trails_root_found);
        assert!(report.waypoints.is_empty());
    }

    #[test]
    fn test_invalid_quality_is_rejected() {
        let root = tempfile::tempdir().expect("create temp dir failed");
        let config = ThumbnailConfig {
            jpeg_quality: 0,
            ..ThumbnailConfig::default()
        };

        let result = ThumbnailGenerator::new(root.path(), config).run();

        assert!(matches!(result, Err(AppError::Image(_))));
    }
}
