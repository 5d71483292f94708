//! # 解码与变换流水线模块
//!
//! ## 设计思路
//!
//! 将“字节 → 图像 → 目标像素”的过程集中管理。
//! 缩放优先走 `fast_image_resize` 的卷积实现，失败时回退 `image::resize_exact`，
//! 两条路径使用同一个滤镜。
//!
//! ## 实现思路
//!
//! 1. 猜测格式并完整解码
//! 2. 按生成器需要做色彩模式归一（RGBA / RGB）
//! 3. 居中裁剪为正方形
//! 4. 缩放到目标边长
//! 5. 需要不透明输出时按 alpha 铺白底

use fast_image_resize as fr;
use image::{DynamicImage, GenericImageView, GrayImage, Rgb, RgbImage, Rgba, RgbaImage};

use super::source::{CropBox, RawImageData};
use super::{ImageError, ImageHandler};

impl ImageHandler {
    /// 将原始字节解码为图像。
    pub(crate) fn decode(&self, raw: RawImageData) -> Result<DynamicImage, ImageError> {
        let format = image::guess_format(&raw.bytes)
            .map_err(|e| ImageError::InvalidFormat(format!("不支持的图片格式：{}", e)))?;

        let decoded = image::load_from_memory_with_format(&raw.bytes, format).map_err(|e| {
            ImageError::Decode(format!("图片解码失败：{}（{}）", raw.source_path.display(), e))
        })?;

        let (width, height) = decoded.dimensions();
        log::debug!(
            "✅ 图片解码成功 - 来源: {} 格式: {:?} 色彩: {:?} 尺寸: {}x{}",
            raw.source_path.display(),
            format,
            decoded.color(),
            width,
            height
        );

        Ok(decoded)
    }

    /// 缩放为 `size`×`size` 的正方形，保持输入的色彩模式。
    pub fn resize_square(&self, image: &DynamicImage, size: u32) -> Result<DynamicImage, ImageError> {
        if size == 0 {
            return Err(ImageError::InvalidConfig("目标尺寸不能为 0".to_string()));
        }

        match Self::resize_with_fast_image_resize(image, size, size, self.resize_filter) {
            Ok(resized) => Ok(resized),
            Err(err) => {
                log::warn!(
                    "⚠️ fast_image_resize 缩放失败，回退 image::resize_exact：{}",
                    err
                );
                Ok(image.resize_exact(size, size, self.resize_filter))
            }
        }
    }

    /// 缩放并转为 RGBA，供图标使用。
    pub fn resize_rgba(&self, image: &DynamicImage, size: u32) -> Result<RgbaImage, ImageError> {
        Ok(self.resize_square(image, size)?.into_rgba8())
    }

    fn resize_with_fast_image_resize(
        image: &DynamicImage,
        target_width: u32,
        target_height: u32,
        filter: image::imageops::FilterType,
    ) -> Result<DynamicImage, ImageError> {
        let (src_width, src_height) = image.dimensions();

        // 灰度与 RGB 直接按原通道数缩放，其余统一转 RGBA
        let (pixel_type, src_bytes) = match image {
            DynamicImage::ImageLuma8(buf) => (fr::PixelType::U8, buf.as_raw().clone()),
            DynamicImage::ImageRgb8(buf) => (fr::PixelType::U8x3, buf.as_raw().clone()),
            other => (fr::PixelType::U8x4, other.to_rgba8().into_raw()),
        };

        let src_image = fr::images::Image::from_vec_u8(src_width, src_height, src_bytes, pixel_type)
            .map_err(|e| ImageError::Decode(format!("构建源图像缓冲失败：{}", e)))?;

        let mut dst_image = fr::images::Image::new(target_width, target_height, pixel_type);

        let mut resizer = fr::Resizer::new();
        let options = fr::ResizeOptions::new().resize_alg(fr::ResizeAlg::Convolution(
            Self::to_fast_filter(filter),
        ));

        resizer
            .resize(&src_image, &mut dst_image, Some(&options))
            .map_err(|e| ImageError::Decode(format!("fast_image_resize 执行失败：{}", e)))?;

        let bytes = dst_image.into_vec();
        let resized = match pixel_type {
            fr::PixelType::U8 => GrayImage::from_raw(target_width, target_height, bytes)
                .map(DynamicImage::ImageLuma8),
            fr::PixelType::U8x3 => RgbImage::from_raw(target_width, target_height, bytes)
                .map(DynamicImage::ImageRgb8),
            _ => RgbaImage::from_raw(target_width, target_height, bytes)
                .map(DynamicImage::ImageRgba8),
        };

        resized.ok_or_else(|| ImageError::Decode("fast_image_resize 输出缓冲长度异常".to_string()))
    }

    fn to_fast_filter(filter: image::imageops::FilterType) -> fr::FilterType {
        match filter {
            image::imageops::FilterType::Nearest => fr::FilterType::Box,
            image::imageops::FilterType::Triangle => fr::FilterType::Bilinear,
            image::imageops::FilterType::CatmullRom => fr::FilterType::CatmullRom,
            image::imageops::FilterType::Gaussian => fr::FilterType::Mitchell,
            image::imageops::FilterType::Lanczos3 => fr::FilterType::Lanczos3,
        }
    }
}

/// 按 `CropBox::centered_square` 裁出居中正方形。
pub fn crop_center_square(image: &DynamicImage) -> DynamicImage {
    let (width, height) = image.dimensions();
    let crop = CropBox::centered_square(width, height);
    image.crop_imm(crop.left, crop.top, crop.side, crop.side)
}

/// 归一为 JPEG 可编码的色彩模式。
///
/// 8 位灰度与 8 位 RGB 原样保留；带 alpha 或其它位深的图像直接丢弃 alpha 转为 RGB，
/// 不做铺底混合。
pub fn normalize_for_jpeg(image: DynamicImage) -> DynamicImage {
    match image {
        DynamicImage::ImageLuma8(_) | DynamicImage::ImageRgb8(_) => image,
        other => DynamicImage::ImageRgb8(other.to_rgb8()),
    }
}

/// 以 alpha 为蒙版把 RGBA 图像贴到纯白画布上，输出不透明 RGB。
pub fn flatten_onto_white(image: &RgbaImage) -> RgbImage {
    RgbImage::from_fn(image.width(), image.height(), |x, y| {
        let Rgba([r, g, b, a]) = *image.get_pixel(x, y);
        Rgb([
            blend_over_white(r, a),
            blend_over_white(g, a),
            blend_over_white(b, a),
        ])
    })
}

fn blend_over_white(channel: u8, alpha: u8) -> u8 {
    let alpha = u32::from(alpha);
    let mixed = u32::from(channel) * alpha + 255 * (255 - alpha);
    ((mixed + 127) / 255) as u8
}
