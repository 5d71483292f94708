//! 统一错误类型模块
//!
//! # 设计思路
//!
//! 定义全局统一的 `AppError` 枚举，两个生成器（图标 / 缩略图）的入口
//! 统一返回 `Result<T, AppError>`，二进制入口只需要处理这一种错误。
//!
//! # 实现思路
//!
//! - 使用 `thiserror` 派生可读错误消息。
//! - 为 `ImageError` 与 `std::io::Error` 提供 `From` 转换，无需手动 map。
//! - 输入缺失单独建模为 `InputNotFound`，与“文件存在但无法解码”区分开。

use std::path::PathBuf;

use crate::image_handler::ImageError;

/// 应用级统一错误类型
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// 源文件或源目录不存在
    #[error("输入不存在: {}", .0.display())]
    InputNotFound(PathBuf),

    /// 图片处理流水线错误（解码 / 缩放 / 编码）
    #[error("{0}")]
    Image(#[from] ImageError),

    /// 文件系统 I/O 错误
    #[error("文件系统错误: {0}")]
    Io(#[from] std::io::Error),

    /// 输出目录不可用
    #[error("输出目录不可用: {0}")]
    Storage(String),
}
