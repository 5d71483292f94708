//! # 配置模块
//!
//! ## 设计思路
//!
//! 将两个生成器的“可调参数”集中到 `IconConfig` / `ThumbnailConfig`，
//! 保证行为可观测、可测试。没有配置文件，也没有命令行参数：
//! `Default` 即生产配置，测试按需覆盖字段。
//!
//! ## 实现思路
//!
//! - `Default` 给出站点实际使用的图标目录与缩略图参数。
//! - `validate` 在生成器启动前统一做范围检查，尽早失败。
//! - 路径字段均为相对项目根目录的路径，根目录由调用方显式传入。

use std::path::PathBuf;

use image::imageops::FilterType;

use super::ImageError;

/// ICO 目录项的宽高字段只有一个字节，256 以 0 表示。
const ICO_MAX_DIMENSION: u32 = 256;

/// 图标生成配置。
#[derive(Debug, Clone)]
pub struct IconConfig {
    /// 源 logo，相对项目根目录。
    pub logo_path: PathBuf,
    /// 输出目录，相对项目根目录。
    pub output_dir: PathBuf,
    /// 保留透明通道的 PWA 图标边长，输出为 `icon-{size}.png`。
    pub pwa_sizes: Vec<u32>,
    /// Apple touch icon 边长（铺白底）。
    pub apple_touch_size: u32,
    /// favicon.ico 内各帧边长，第一项为主图。
    pub favicon_sizes: Vec<u32>,
    /// 独立 PNG favicon 边长（保留透明通道）。
    pub favicon_png_size: u32,
    /// 缩放滤镜。
    pub resize_filter: FilterType,
}

impl Default for IconConfig {
    fn default() -> Self {
        Self {
            logo_path: PathBuf::from("images").join("fcf-logo.png"),
            output_dir: PathBuf::from("icons"),
            pwa_sizes: vec![192, 512],
            apple_touch_size: 180,
            favicon_sizes: vec![16, 32, 48],
            favicon_png_size: 32,
            resize_filter: FilterType::Lanczos3,
        }
    }
}

impl IconConfig {
    /// 校验尺寸参数。
    pub fn validate(&self) -> Result<(), ImageError> {
        let all_sizes = self
            .pwa_sizes
            .iter()
            .copied()
            .chain(self.favicon_sizes.iter().copied())
            .chain([self.apple_touch_size, self.favicon_png_size]);

        for size in all_sizes {
            if size == 0 {
                return Err(ImageError::InvalidConfig("图标尺寸不能为 0".to_string()));
            }
        }

        if self.favicon_sizes.is_empty() {
            return Err(ImageError::InvalidConfig("favicon_sizes 不能为空".to_string()));
        }

        if let Some(&size) = self.favicon_sizes.iter().find(|&&s| s > ICO_MAX_DIMENSION) {
            return Err(ImageError::InvalidConfig(format!(
                "ICO 帧尺寸 {} 超出上限 {}",
                size, ICO_MAX_DIMENSION
            )));
        }

        Ok(())
    }
}

/// 缩略图生成配置。
#[derive(Debug, Clone)]
pub struct ThumbnailConfig {
    /// 步道根目录，相对项目根目录。
    pub trails_dir: PathBuf,
    /// 每条步道下存放航点照片的目录名。
    pub photos_dir_name: String,
    /// 每个航点下存放缩略图的目录名。
    pub thumbs_dir_name: String,
    /// 缩略图边长（像素）。
    pub size: u32,
    /// JPEG 质量（1~100）。
    pub jpeg_quality: u8,
    /// 需要处理的扩展名（小写、不带点），匹配时忽略大小写。
    pub extensions: Vec<String>,
    /// 缩放滤镜。
    pub resize_filter: FilterType,
    /// 单个文件失败时是否继续处理其余文件。
    ///
    /// 默认关闭：任何一个文件失败都会中止整批处理。
    pub continue_on_error: bool,
}

impl Default for ThumbnailConfig {
    fn default() -> Self {
        Self {
            trails_dir: PathBuf::from("trails"),
            photos_dir_name: "photos".to_string(),
            thumbs_dir_name: "thumbs".to_string(),
            size: 160,
            jpeg_quality: 85,
            extensions: ["jpg", "jpeg", "png", "webp"]
                .iter()
                .map(|ext| ext.to_string())
                .collect(),
            resize_filter: FilterType::Lanczos3,
            continue_on_error: false,
        }
    }
}

impl ThumbnailConfig {
    /// 校验尺寸与质量参数。
    pub fn validate(&self) -> Result<(), ImageError> {
        if self.size == 0 {
            return Err(ImageError::InvalidConfig("缩略图尺寸不能为 0".to_string()));
        }
        if !(1..=100).contains(&self.jpeg_quality) {
            return Err(ImageError::InvalidConfig(format!(
                "jpeg_quality 必须在 1~100 之间（当前：{}）",
                self.jpeg_quality
            )));
        }
        if self.photos_dir_name.is_empty() || self.thumbs_dir_name.is_empty() {
            return Err(ImageError::InvalidConfig("目录名不能为空".to_string()));
        }
        Ok(())
    }

    /// 判断扩展名是否属于待处理图片（忽略大小写）。
    pub fn accepts_extension(&self, extension: &str) -> bool {
        self.extensions
            .iter()
            .any(|ext| ext.eq_ignore_ascii_case(extension))
    }
}
