//! Build script for bert-bench.
//!
//! With the `paddle` feature enabled, links the Paddle Inference C library
//! (`libpaddle_inference_c`). Without it, nothing is linked.
//!
//! # Environment Variables
//!
//! - `PADDLE_INFERENCE_DIR`: Root of the unpacked `paddle_inference_c`
//!   package (the directory holding `paddle/lib` and `version.txt`).
//! - `PADDLE_SKIP_LINK`: Set to "1" to skip linking (for development).

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

fn main() {
    println!("cargo:rerun-if-env-changed=PADDLE_INFERENCE_DIR");
    println!("cargo:rerun-if-env-changed=PADDLE_SKIP_LINK");

    if env::var_os("CARGO_FEATURE_PADDLE").is_none() {
        return;
    }
    link_paddle_inference();
}

/// Emit the library version recorded in the package's `version.txt`.
fn emit_paddle_version(root: &Path) {
    let Ok(content) = fs::read_to_string(root.join("version.txt")) else {
        return;
    };
    let field = |prefix: &str| {
        content
            .lines()
            .find_map(|line| line.trim().strip_prefix(prefix))
            .map(str::trim)
            .map(str::to_string)
    };
    if let Some(version) = field("Paddle version:").or_else(|| field("GIT COMMIT ID:")) {
        println!("cargo:rustc-env=PADDLE_INFERENCE_VERSION={}", version);
    }
}

fn link_paddle_inference() {
    if env::var("PADDLE_SKIP_LINK").map(|v| v == "1").unwrap_or(false) {
        println!("cargo:warning=Skipping paddle_inference_c link (PADDLE_SKIP_LINK=1)");
        return;
    }

    let root = match env::var("PADDLE_INFERENCE_DIR") {
        Ok(path) => PathBuf::from(path),
        Err(_) => panic!(
            "The `paddle` feature requires PADDLE_INFERENCE_DIR.\n\
             \n\
             Download the Paddle Inference C library for your platform and set\n\
             PADDLE_INFERENCE_DIR to the directory containing paddle/lib."
        ),
    };

    let lib_dir = root.join("paddle/lib");
    if !lib_dir.exists() {
        panic!(
            "Paddle library directory does not exist: {}\n\
             PADDLE_INFERENCE_DIR must point at the unpacked paddle_inference_c package.",
            lib_dir.display()
        );
    }

    emit_paddle_version(&root);

    println!("cargo:rustc-link-search=native={}", lib_dir.display());
    println!("cargo:rustc-link-lib=dylib=paddle_inference_c");

    // Use RPATH (not RUNPATH) so third-party libs next to it resolve too
    println!("cargo:rustc-link-arg=-Wl,--disable-new-dtags");
    println!("cargo:rustc-link-arg=-Wl,-rpath,{}", lib_dir.display());

    // Bundled MKL/oneDNN libraries ship under third_party/install
    for dep in ["mklml/lib", "onednn/lib", "mkldnn/lib"] {
        let dir = root.join("third_party/install").join(dep);
        if dir.exists() {
            println!("cargo:rustc-link-search=native={}", dir.display());
            println!("cargo:rustc-link-arg=-Wl,-rpath,{}", dir.display());
        }
    }
}
