//! 生成 C 头文件 `card_render.h` 到 OUT_DIR

use std::env;
use std::path::PathBuf;

fn main() {
    println!("cargo:rerun-if-changed=src/ffi.rs");

    let crate_dir = match env::var("CARGO_MANIFEST_DIR") {
        Ok(dir) => dir,
        Err(_) => return,
    };
    let out_dir = match env::var("OUT_DIR") {
        Ok(dir) => PathBuf::from(dir),
        Err(_) => return,
    };

    let mut config = cbindgen::Config::default();
    config.language = cbindgen::Language::C;
    config.include_guard = Some("CARD_RENDER_H".to_string());
    config.export.include = vec!["CrInteractionCallback".to_string()];

    // 头文件生成失败不影响库本身的构建
    match cbindgen::generate_with_config(&crate_dir, config) {
        Ok(bindings) => {
            bindings.write_to_file(out_dir.join("card_render.h"));
        }
        Err(err) => println!("cargo:warning=cbindgen skipped: {}", err),
    }
}
