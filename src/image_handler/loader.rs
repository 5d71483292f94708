//! # 加载与校验模块
//!
//! ## 设计思路
//!
//! 统一处理本地文件的原始字节加载，并在解码前先校验文件签名，
//! 让“不是图片”的输入尽快失败。

use std::path::Path;

use super::source::RawImageData;
use super::{ImageError, ImageHandler};

impl ImageHandler {
    /// 从本地路径加载图片原始字节。
    pub(super) fn load_from_file(&self, path: &Path) -> Result<RawImageData, ImageError> {
        log::debug!("📁 读取本地图片 - 路径: {}", path.display());

        let metadata = std::fs::metadata(path)
            .map_err(|e| ImageError::FileSystem(format!("无法读取文件信息：{}（{}）", path.display(), e)))?;

        if !metadata.is_file() {
            return Err(ImageError::FileSystem(format!("不是普通文件：{}", path.display())));
        }

        let bytes = std::fs::read(path)
            .map_err(|e| ImageError::FileSystem(format!("无法读取图片文件：{}（{}）", path.display(), e)))?;
        Self::validate_image_signature(&bytes, path)?;

        Ok(RawImageData {
            bytes,
            source_path: path.to_path_buf(),
        })
    }

    /// 依据文件头判断是否为可识别的图片格式。
    fn validate_image_signature(bytes: &[u8], path: &Path) -> Result<(), ImageError> {
        if bytes.is_empty() {
            return Err(ImageError::InvalidFormat(format!("空文件：{}", path.display())));
        }

        image::guess_format(bytes)
            .map(|_| ())
            .map_err(|e| ImageError::InvalidFormat(format!("无法识别图片格式：{}（{}）", path.display(), e)))
    }
}
