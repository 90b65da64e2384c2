//! Build script for vigil-firmware
//!
//! Sets up linker search paths for memory.x, which carries the flash/RAM
//! split between the S140 SoftDevice and the application.

use std::env;
use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

fn main() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Stage memory.x where the linker scripts can find it
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();
    println!("cargo:rustc-link-search={}", out_dir.display());

    // The memory split moves whenever the SoftDevice version does
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}
