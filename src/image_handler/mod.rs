//! # 图片处理模块（image_handler）
//!
//! ## 设计思路
//!
//! 该模块将“读取 → 解码 → 裁剪缩放铺底 → 编码写盘”按职责拆分为多个子模块，
//! 两个生成器共享同一套实现，避免各自重复处理色彩模式与滤镜。
//!
//! - `handler`：`ImageHandler`，持有缩放滤镜并编排读取链路
//! - `loader`：本地文件读取与签名校验
//! - `pipeline`：解码、缩放、居中裁剪、铺白底、色彩模式归一
//! - `encoder`：PNG / JPEG / ICO 编码写盘
//! - `config/error/source`：配置、错误、中间数据模型
//!
//! ## 新同事快速上手
//!
//! ```text
//! icons.rs / thumbnails.rs（生成器，决定“产出什么”）
//!    ↓
//! handler.rs（open：读取 + 解码）
//!    ├─ loader.rs（存在性 + 签名校验）
//!    └─ pipeline.rs（解码 + 变换）
//!    ↓
//! encoder.rs（写盘）
//! ```

mod config;
mod encoder;
mod error;
mod handler;
mod loader;
mod pipeline;
mod source;

pub use config::{IconConfig, ThumbnailConfig};
pub use encoder::{write_ico, write_jpeg, write_png};
pub use error::ImageError;
pub use handler::ImageHandler;
pub use pipeline::{crop_center_square, flatten_onto_white, normalize_for_jpeg};
pub use source::{CropBox, OutputEncoding, OutputFile};
