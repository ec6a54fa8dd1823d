//! Generate `wardrobe.h` for C callers into `OUT_DIR`.

use std::env;
use std::path::PathBuf;

fn main() {
    println!("cargo:rerun-if-changed=src");

    let crate_dir = env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".to_string());
    let Some(out_dir) = env::var_os("OUT_DIR").map(PathBuf::from) else {
        return;
    };

    // A header failure must not break the Rust build.
    match cbindgen::Builder::new()
        .with_crate(&crate_dir)
        .with_language(cbindgen::Language::C)
        .with_include_guard("WARDROBE_H")
        .generate()
    {
        Ok(bindings) => {
            bindings.write_to_file(out_dir.join("wardrobe.h"));
        }
        Err(err) => println!("cargo:warning=skipping wardrobe.h: {err}"),
    }
}
