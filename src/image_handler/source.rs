//! # 数据源与中间模型
//!
//! ## 设计思路
//!
//! 将“磁盘上的输入”和“流水线中间结果”解耦：
//! - `RawImageData` 表示已读取但未解码的字节
//! - `CropBox` 表示居中正方形裁剪区域
//! - `OutputFile` 表示一次写盘的目标路径与编码方式
//!
//! 所有实体都只存活于单张图片的处理过程中。

use std::path::PathBuf;

/// 加载阶段输出：原始字节与来源路径。
pub(crate) struct RawImageData {
    /// 原始图片字节。
    pub(crate) bytes: Vec<u8>,
    /// 来源路径（用于日志与诊断）。
    pub(crate) source_path: PathBuf,
}

/// 居中正方形裁剪框。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropBox {
    pub left: u32,
    pub top: u32,
    /// 边长，恒等于 `min(width, height)`。
    pub side: u32,
}

impl CropBox {
    /// 计算宽 `width`、高 `height` 的图片沿短边取中的最大正方形。
    ///
    /// 横图水平居中，竖图与方图垂直居中；偏移量按整数除法向下取整。
    ///
    /// # 示例
    /// ```rust
    /// use site_assets::image_handler::CropBox;
    ///
    /// let crop = CropBox::centered_square(300, 200);
    /// assert_eq!((crop.left, crop.top, crop.side), (50, 0, 200));
    /// ```
    pub fn centered_square(width: u32, height: u32) -> Self {
        if width > height {
            Self {
                left: (width - height) / 2,
                top: 0,
                side: height,
            }
        } else {
            Self {
                left: 0,
                top: (height - width) / 2,
                side: width,
            }
        }
    }

    pub fn right(&self) -> u32 {
        self.left + self.side
    }

    pub fn bottom(&self) -> u32 {
        self.top + self.side
    }
}

/// 输出编码方式。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputEncoding {
    /// 无损 PNG，保留透明通道。
    Png,
    /// 无损 PNG，已铺白底、不含透明通道。
    PngOpaque,
    /// 多分辨率 ICO。
    Ico,
    /// 有损 JPEG。
    Jpeg { quality: u8 },
}

/// 一次写盘的目标。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputFile {
    pub path: PathBuf,
    pub encoding: OutputEncoding,
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_landscape_crop_is_horizontally_centered() {
        let crop = CropBox::centered_square(300, 200);
        assert_eq!(crop, CropBox { left: 50, top: 0, side: 200 });
    }

    #[test]
    fn test_portrait_crop_is_vertically_centered() {
        let crop = CropBox::centered_square(200, 301);
        // (301 - 200) / 2 向下取整
        assert_eq!(crop, CropBox { left: 0, top: 50, side: 200 });
    }

    #[test]
    fn test_square_crop_is_whole_image() {
        let crop = CropBox::centered_square(128, 128);
        assert_eq!(crop, CropBox { left: 0, top: 0, side: 128 });
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(256))]

        #[test]
        fn prop_crop_box_is_centered_and_in_bounds(width in 1u32..5000, height in 1u32..5000) {
            let crop = CropBox::centered_square(width, height);

            prop_assert_eq!(crop.side, width.min(height));
            prop_assert!(crop.right() <= width);
            prop_assert!(crop.bottom() <= height);

            // 两侧留白之差最多 1 像素
            let slack_x = (width - crop.right()) as i64 - crop.left as i64;
            let slack_y = (height - crop.bottom()) as i64 - crop.top as i64;
            prop_assert!((0..=1).contains(&slack_x));
            prop_assert!((0..=1).contains(&slack_y));
        }
    }
}
