//! # 图标生成 — 应用入口
//!
//! 以当前工作目录为项目根目录，从 `images/fcf-logo.png` 生成 `icons/` 下的全部图标。

use std::process::ExitCode;

use site_assets::image_handler::IconConfig;
use site_assets::IconGenerator;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let root = match std::env::current_dir() {
        Ok(root) => root,
        Err(err) => {
            log::error!("无法获取当前工作目录: {err}");
            return ExitCode::FAILURE;
        }
    };

    match IconGenerator::new(root, IconConfig::default()).run() {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("图标生成失败: {err}");
            eprintln!("Error: {err:?}");
            ExitCode::FAILURE
        }
    }
}
