//! Build script for vigil-drivers
//!
//! When the `edge-impulse` feature is enabled, compiles the exported Edge
//! Impulse SDK plus the C shim in `csrc/` and links them in. Without the
//! feature this script does nothing and the crate uses the stub backend.
//!
//! Place the exported Arduino/C++ library at `vigil-drivers/model-export/`
//! (the directory containing `src/edge-impulse-sdk/`), or point
//! `VIGIL_MODEL_DIR` at it.

use std::path::{Path, PathBuf};

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=csrc/vigil_classifier.cpp");
    println!("cargo:rerun-if-env-changed=VIGIL_MODEL_DIR");

    if std::env::var("CARGO_FEATURE_EDGE_IMPULSE").is_ok() {
        build_model();
    }
}

fn build_model() {
    let sdk_root = std::env::var("VIGIL_MODEL_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("model-export"));
    if !sdk_root.join("src").is_dir() {
        panic!(
            "edge-impulse feature enabled but no model export found at {}",
            sdk_root.display()
        );
    }

    let mut build = cc::Build::new();
    build
        .cpp(true)
        .flag("-std=c++14")
        .flag("-O3")
        .flag("-fno-exceptions")
        .flag("-fno-rtti")
        .flag("-mfpu=fpv4-sp-d16")
        .flag("-mfloat-abi=hard")
        .define("EI_CLASSIFIER_TFLITE_ENABLE_CMSIS_NN", "1")
        .include(&sdk_root)
        .include(sdk_root.join("src"))
        .include(sdk_root.join("src/edge-impulse-sdk"))
        .include(sdk_root.join("src/model-parameters"))
        .include(sdk_root.join("src/tflite-model"))
        .file("csrc/vigil_classifier.cpp");

    add_source_files(&mut build, &sdk_root.join("src"));

    build.compile("vigil-model");

    println!("cargo:rerun-if-changed={}", sdk_root.display());
}

fn add_source_files(build: &mut cc::Build, dir: &Path) {
    for entry in std::fs::read_dir(dir).expect("failed to read model export directory") {
        let path = entry.expect("failed to read directory entry").path();
        if path.is_dir() {
            add_source_files(build, &path);
        } else if let Some(ext) = path.extension() {
            if ext == "c" || ext == "cpp" || ext == "cc" {
                build.file(&path);
            }
        }
    }
}
