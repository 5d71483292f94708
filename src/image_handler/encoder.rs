//! # 编码写盘模块
//!
//! ## 设计思路
//!
//! 所有输出都经由这里写盘，编码参数（PNG / JPEG 质量 / ICO 多帧）集中在一处。
//! 每次写入独立打开、刷新、关闭文件，不跨图片持有句柄；同名文件直接覆盖。

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use image::codecs::ico::{IcoEncoder, IcoFrame};
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{DynamicImage, ExtendedColorType, RgbImage};

use super::source::{OutputEncoding, OutputFile};
use super::ImageError;

/// 以 PNG 写出图像，色彩模式由图像本身决定（RGBA 保留透明，RGB 不含透明）。
pub fn write_png(image: &DynamicImage, path: &Path) -> Result<OutputFile, ImageError> {
    let encoding = if image.color().has_alpha() {
        OutputEncoding::Png
    } else {
        OutputEncoding::PngOpaque
    };

    write_with(path, |writer| {
        image
            .write_with_encoder(PngEncoder::new(writer))
            .map_err(|e| ImageError::Encode(format!("PNG 编码失败：{}（{}）", path.display(), e)))
    })?;

    Ok(OutputFile {
        path: path.to_path_buf(),
        encoding,
    })
}

/// 以指定质量写出 JPEG。
pub fn write_jpeg(image: &DynamicImage, path: &Path, quality: u8) -> Result<OutputFile, ImageError> {
    if !(1..=100).contains(&quality) {
        return Err(ImageError::Encode(format!("JPEG 质量超出范围：{}", quality)));
    }

    write_with(path, |writer| {
        image
            .write_with_encoder(JpegEncoder::new_with_quality(writer, quality))
            .map_err(|e| ImageError::Encode(format!("JPEG 编码失败：{}（{}）", path.display(), e)))
    })?;

    Ok(OutputFile {
        path: path.to_path_buf(),
        encoding: OutputEncoding::Jpeg { quality },
    })
}

/// 把多张不透明 RGB 帧打包为一个 ICO，目录项顺序与 `frames` 一致。
///
/// ICO 内嵌 PNG 只允许 32 位 RGBA，写入前补上全不透明的 alpha。
pub fn write_ico(frames: &[RgbImage], path: &Path) -> Result<OutputFile, ImageError> {
    if frames.is_empty() {
        return Err(ImageError::Encode("ICO 至少需要一帧".to_string()));
    }

    let ico_frames = frames
        .iter()
        .map(|frame| {
            let rgba = DynamicImage::ImageRgb8(frame.clone()).into_rgba8();
            IcoFrame::as_png(rgba.as_raw(), rgba.width(), rgba.height(), ExtendedColorType::Rgba8)
                .map_err(|e| {
                    ImageError::Encode(format!(
                        "ICO 帧编码失败（{}x{}）：{}",
                        frame.width(),
                        frame.height(),
                        e
                    ))
                })
        })
        .collect::<Result<Vec<_>, _>>()?;

    write_with(path, |writer| {
        IcoEncoder::new(writer)
            .encode_images(&ico_frames)
            .map_err(|e| ImageError::Encode(format!("ICO 编码失败：{}（{}）", path.display(), e)))
    })?;

    Ok(OutputFile {
        path: path.to_path_buf(),
        encoding: OutputEncoding::Ico,
    })
}

fn write_with<F>(path: &Path, encode: F) -> Result<(), ImageError>
where
    F: FnOnce(&mut BufWriter<File>) -> Result<(), ImageError>,
{
    let file = File::create(path)
        .map_err(|e| ImageError::FileSystem(format!("无法创建输出文件：{}（{}）", path.display(), e)))?;
    let mut writer = BufWriter::new(file);

    encode(&mut writer)?;

    writer
        .flush()
        .map_err(|e| ImageError::FileSystem(format!("写入输出文件失败：{}（{}）", path.display(), e)))?;

    log::debug!("💾 已写入 {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GenericImageView, ImageBuffer, ImageFormat, Rgb, Rgba};

    #[test]
    fn test_png_keeps_alpha_channel() {
        let dir = tempfile::tempdir().expect("create temp dir failed");
        let path = dir.path().join("alpha.png");
        let img = DynamicImage::ImageRgba8(ImageBuffer::from_pixel(8, 8, Rgba([1, 2, 3, 0])));

        let output = write_png(&img, &path).expect("write png failed");

        assert_eq!(output.encoding, OutputEncoding::Png);
        let decoded = image::open(&path).expect("decode png failed");
        assert!(decoded.color().has_alpha());
    }

    #[test]
    fn test_opaque_png_has_no_alpha_channel() {
        let dir = tempfile::tempdir().expect("create temp dir failed");
        let path = dir.path().join("opaque.png");
        let img = DynamicImage::ImageRgb8(ImageBuffer::from_pixel(8, 8, Rgb([255, 255, 255])));

        let output = write_png(&img, &path).expect("write png failed");

        assert_eq!(output.encoding, OutputEncoding::PngOpaque);
        let decoded = image::open(&path).expect("decode png failed");
        assert!(!decoded.color().has_alpha());
    }

    #[test]
    fn test_jpeg_rejects_out_of_range_quality() {
        let dir = tempfile::tempdir().expect("create temp dir failed");
        let img = DynamicImage::ImageRgb8(ImageBuffer::from_pixel(8, 8, Rgb([0, 0, 0])));

        let result = write_jpeg(&img, &dir.path().join("bad.jpg"), 0);

        assert!(matches!(result, Err(ImageError::Encode(_))));
    }

    #[test]
    fn test_jpeg_round_trip_dimensions() {
        let dir = tempfile::tempdir().expect("create temp dir failed");
        let path = dir.path().join("thumb.jpg");
        let img = DynamicImage::ImageRgb8(ImageBuffer::from_pixel(160, 160, Rgb([40, 80, 120])));

        write_jpeg(&img, &path, 85).expect("write jpeg failed");

        let bytes = std::fs::read(&path).expect("read jpeg failed");
        assert_eq!(image::guess_format(&bytes).expect("guess failed"), ImageFormat::Jpeg);
        assert_eq!(image::load_from_memory(&bytes).expect("decode failed").dimensions(), (160, 160));
    }

    #[test]
    fn test_ico_directory_lists_frames_in_order() {
        let dir = tempfile::tempdir().expect("create temp dir failed");
        let path = dir.path().join("favicon.ico");
        let frames: Vec<RgbImage> = [16u32, 32, 48]
            .iter()
            .map(|&size| ImageBuffer::from_pixel(size, size, Rgb([255, 255, 255])))
            .collect();

        write_ico(&frames, &path).expect("write ico failed");

        let bytes = std::fs::read(&path).expect("read ico failed");
        // ICONDIR: reserved(2) type(2) count(2)，之后每项 16 字节，首两字节为宽高
        assert_eq!(u16::from_le_bytes([bytes[2], bytes[3]]), 1);
        assert_eq!(u16::from_le_bytes([bytes[4], bytes[5]]), 3);
        let sizes: Vec<(u8, u8)> = (0..3)
            .map(|i| (bytes[6 + i * 16], bytes[7 + i * 16]))
            .collect();
        assert_eq!(sizes, vec![(16, 16), (32, 32), (48, 48)]);
    }

    #[test]
    fn test_ico_requires_frames() {
        let dir = tempfile::tempdir().expect("create temp dir failed");
        assert!(matches!(
            write_ico(&[], &dir.path().join("empty.ico")),
            Err(ImageError::Encode(_))
        ));
    }
}
