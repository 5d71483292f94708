//! 图标生成模块
//!
//! # 设计思路
//!
//! 从单张 logo 生成站点所需的固定图标目录：
//!
//! | 输出 | 尺寸 | 透明通道 |
//! |------|------|----------|
//! | `icon-{192,512}.png` | 192 / 512 | 保留 |
//! | `apple-touch-icon.png` | 180 | 铺白底 |
//! | `favicon.ico` | 16 / 32 / 48 | 铺白底 |
//! | `favicon-32.png` | 32 | 保留 |
//!
//! # 实现思路
//!
//! - logo 解码后统一转为 RGBA，之后每个尺寸都从同一张 RGBA 原图缩放。
//! - 需要不透明输出时先缩放、再以 alpha 为蒙版贴到白底。
//! - logo 不存在直接返回 `AppError::InputNotFound`，不做兜底。
//! - 输出目录按需创建，同名文件直接覆盖。

use std::path::{Path, PathBuf};

use image::DynamicImage;

use crate::error::AppError;
use crate::image_handler::{
    flatten_onto_white, write_ico, write_png, IconConfig, ImageHandler, OutputFile,
};
use crate::storage::ensure_dir;

/// 一次图标生成的结果
#[derive(Debug, Clone, Default)]
pub struct IconReport {
    /// 按写出顺序排列的输出文件
    pub outputs: Vec<OutputFile>,
}

/// 图标生成器
pub struct IconGenerator {
    root: PathBuf,
    config: IconConfig,
    handler: ImageHandler,
}

impl IconGenerator {
    /// # 参数
    /// * `root` - 项目根目录，logo 与输出目录均相对于它
    /// * `config` - 图标目录配置
    pub fn new(root: impl Into<PathBuf>, config: IconConfig) -> Self {
        let handler = ImageHandler::new(config.resize_filter);
        Self {
            root: root.into(),
            config,
            handler,
        }
    }

    pub fn logo_path(&self) -> PathBuf {
        self.root.join(&self.config.logo_path)
    }

    pub fn output_dir(&self) -> PathBuf {
        self.root.join(&self.config.output_dir)
    }

    /// 生成全部图标
    pub fn run(&self) -> Result<IconReport, AppError> {
        self.config.validate()?;

        let logo_path = self.logo_path();
        let icons_dir = ensure_dir(&self.output_dir())?;

        log::info!("🎨 开始生成图标 - 源: {}", logo_path.display());

        let logo = DynamicImage::ImageRgba8(self.handler.open(&logo_path)?.into_rgba8());
        let mut report = IconReport::default();

        for &size in &self.config.pwa_sizes {
            let resized = self.handler.resize_rgba(&logo, size)?;
            let output = icons_dir.join(format!("icon-{}.png", size));
            report.push(
                write_png(&DynamicImage::ImageRgba8(resized), &output)?,
                format!("{}x{}", size, size),
            );
        }

        let apple_size = self.config.apple_touch_size;
        let apple = self.flattened(&logo, apple_size)?;
        report.push(
            write_png(&DynamicImage::ImageRgb8(apple), &icons_dir.join("apple-touch-icon.png"))?,
            format!("{}x{}", apple_size, apple_size),
        );

        let favicon_frames = self
            .config
            .favicon_sizes
            .iter()
            .map(|&size| self.flattened(&logo, size))
            .collect::<Result<Vec<_>, _>>()?;
        let declared_sizes = self
            .config
            .favicon_sizes
            .iter()
            .map(|size| format!("{}x{}", size, size))
            .collect::<Vec<_>>()
            .join(", ");
        report.push(
            write_ico(&favicon_frames, &icons_dir.join("favicon.ico"))?,
            declared_sizes,
        );

        let favicon_png_size = self.config.favicon_png_size;
        let favicon_png = self.handler.resize_rgba(&logo, favicon_png_size)?;
        report.push(
            write_png(
                &DynamicImage::ImageRgba8(favicon_png),
                &icons_dir.join(format!("favicon-{}.png", favicon_png_size)),
            )?,
            format!("{}x{}", favicon_png_size, favicon_png_size),
        );

        println!("\nDone!");
        log::info!("✅ 图标生成完成 - 共 {} 个文件", report.outputs.len());

        Ok(report)
    }

    fn flattened(&self, logo: &DynamicImage, size: u32) -> Result<image::RgbImage, AppError> {
        let resized = self.handler.resize_rgba(logo, size)?;
        Ok(flatten_onto_white(&resized))
    }
}

impl IconReport {
    fn push(&mut self, output: OutputFile, dimensions: String) {
        println!("Created {} ({})", file_name(&output.path), dimensions);
        self.outputs.push(output);
    }

    /// 按文件名查找输出
    pub fn find(&self, name: &str) -> Option<&OutputFile> {
        self.outputs
            .iter()
            .find(|output| output.path.file_name().is_some_and(|n| n == name))
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, Rgba};

    fn write_logo(root: &Path, width: u32, height: u32) {
        let dir = root.join("images");
        std::fs::create_dir_all(&dir).expect("create images dir failed");
        let logo = ImageBuffer::from_fn(width, height, |x, y| {
            if x < width / 2 { Rgba([0, 0, 0, 0]) } else { Rgba([(y % 255) as u8, 80, 160, 255]) }
        });
        logo.save(dir.join("fcf-logo.png")).expect("save logo failed");
    }

    #[test]
    fn test_missing_logo_is_input_not_found() {
        let root = tempfile::tempdir().expect("create temp dir failed");

        let result = IconGenerator::new(root.path(), IconConfig::default()).run();

        assert!(matches!(result, Err(AppError::InputNotFound(_))));
    }

    #[test]
    fn test_report_lists_catalog_in_order() {
        let root = tempfile::tempdir().expect("create temp dir failed");
        write_logo(root.path(), 64, 64);

        let report = IconGenerator::new(root.path(), IconConfig::default())
            .run()
            .expect("icon generation failed");

        let names: Vec<String> = report.outputs.iter().map(|o| file_name(&o.path)).collect();
        assert_eq!(
            names,
            vec!["icon-192.png", "icon-512.png", "apple-touch-icon.png", "favicon.ico", "favicon-32.png"]
        );
        assert!(report.find("favicon.ico").is_some());
        assert!(report.find("favicon-16.png").is_none());
    }

    #[test]
    fn test_invalid_config_fails_before_touching_disk() {
        let root = tempfile::tempdir().expect("create temp dir failed");
        write_logo(root.path(), 32, 32);
        let config = IconConfig {
            favicon_sizes: vec![],
            ..IconConfig::default()
        };

        let result = IconGenerator::new(root.path(), config).run();

        assert!(matches!(result, Err(AppError::Image(_))));
        assert!(!root.path().join("icons").exists());
    }
}
