//! # 缩略图生成 — 应用入口
//!
//! 以当前工作目录为项目根目录，为 `trails/*/photos/*/` 下的照片生成缩略图。

use std::process::ExitCode;

use site_assets::image_handler::ThumbnailConfig;
use site_assets::ThumbnailGenerator;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let root = match std::env::current_dir() {
        Ok(root) => root,
        Err(err) => {
            log::error!("无法获取当前工作目录: {err}");
            return ExitCode::FAILURE;
        }
    };

    match ThumbnailGenerator::new(root, ThumbnailConfig::default()).run() {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("缩略图生成失败: {err}");
            eprintln!("Error: {err:?}");
            ExitCode::FAILURE
        }
    }
}
