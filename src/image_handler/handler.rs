//! # 核心编排模块
//!
//! ## 设计思路
//!
//! `ImageHandler` 只持有缩放滤镜，不关心图标目录或步道目录的结构。
//! 单张图片的处理链路固定为：
//! 1. 读取原始字节（`loader`）
//! 2. 解码（`pipeline`）
//! 3. 裁剪 / 缩放 / 铺白底（`pipeline`）
//! 4. 编码写盘（`encoder`）
//!
//! ## 实现思路
//!
//! - 生成器持有一个 `ImageHandler`，所有缩放都经由它，保证滤镜一致。
//! - `open` 把“文件不存在”单独映射为 `AppError::InputNotFound`。
//! - 记录 `load/decode` 阶段耗时，便于性能诊断。

use std::path::Path;
use std::time::Instant;

use image::DynamicImage;
use image::imageops::FilterType;

use crate::error::AppError;

/// 图片处理器。
pub struct ImageHandler {
    pub(super) resize_filter: FilterType,
}

impl ImageHandler {
    /// 使用指定缩放滤镜创建处理器。
    ///
    /// # 示例
    /// ```rust
    /// use image::imageops::FilterType;
    /// use site_assets::image_handler::ImageHandler;
    ///
    /// let handler = ImageHandler::new(FilterType::Lanczos3);
    /// assert_eq!(handler.resize_filter(), FilterType::Lanczos3);
    /// ```
    pub fn new(resize_filter: FilterType) -> Self {
        Self { resize_filter }
    }

    pub fn resize_filter(&self) -> FilterType {
        self.resize_filter
    }

    /// 读取并解码一张图片。
    ///
    /// # 返回
    /// - `Err(AppError::InputNotFound)` — 路径不存在
    /// - `Err(AppError::Image)` — 读取失败或无法解码
    pub fn open(&self, path: &Path) -> Result<DynamicImage, AppError> {
        if !path.exists() {
            return Err(AppError::InputNotFound(path.to_path_buf()));
        }

        let total_start = Instant::now();

        let load_start = Instant::now();
        let raw = self.load_from_file(path)?;
        let load_ms = load_start.elapsed().as_millis();

        let decode_start = Instant::now();
        let image = self.decode(raw)?;
        let decode_ms = decode_start.elapsed().as_millis();

        log::debug!(
            "⏱️ 图片读取耗时 - {} load={}ms decode={}ms total={}ms",
            path.display(),
            load_ms,
            decode_ms,
            total_start.elapsed().as_millis()
        );

        Ok(image)
    }
}
