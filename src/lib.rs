//! # 站点图片资源工具 — 库入口
//!
//! ## 架构总览
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  bin/generate_icons.rs      bin/generate_thumbnails.rs   │
//! │   (env_logger 初始化 + 项目根目录 + 退出码)               │
//! └───────┬──────────────────────────────┬───────────────────┘
//!         ↓                              ↓
//! ┌───────┴──────────┐         ┌─────────┴──────────────────┐
//! │ icons            │         │ thumbnails                 │
//! │  IconGenerator   │         │  ThumbnailGenerator        │
//! │  logo → 图标目录 │         │  trails/*/photos/* → thumbs│
//! └───────┬──────────┘         └─────────┬──────────────────┘
//!         └──────────────┬───────────────┘
//!                        ↓
//! ┌──────────────────────┴───────────────────────────────────┐
//! │  image_handler   读取 · 解码 · 裁剪缩放 · 铺白底 · 编码     │
//! │  storage         输出目录创建 · 有序遍历 · 计数             │
//! │  error           AppError (统一错误类型)                    │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! ## 模块职责
//!
//! | 模块 | 职责 |
//! |------|------|
//! | [`error`] | 统一错误类型 `AppError`，两个生成器的返回类型 |
//! | [`image_handler`] | 图片读取、解码、缩放、裁剪、铺白底与编码写盘 |
//! | [`icons`] | 从 logo 生成 PWA 图标、Apple touch icon 与 favicon |
//! | [`thumbnails`] | 遍历步道目录，为航点照片生成方形缩略图 |
//! | [`storage`] | 输出目录的创建、目录项排序与文件计数 |

pub mod error;
pub mod icons;
pub mod image_handler;
pub mod storage;
pub mod thumbnails;

pub use error::AppError;
pub use icons::{IconGenerator, IconReport};
pub use thumbnails::{ThumbnailGenerator, ThumbnailReport};
