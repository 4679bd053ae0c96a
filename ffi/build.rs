//! Generates `users_ffi.h` for native hosts.
//!
//! The header always lands in `OUT_DIR`. Set `USERS_FFI_HEADER_DIR` to also
//! copy it somewhere a host build can pick it up.

use std::env;
use std::path::PathBuf;

fn main() {
    println!("cargo:rerun-if-changed=src");
    println!("cargo:rerun-if-env-changed=USERS_FFI_HEADER_DIR");

    let crate_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".to_string()));
    let Ok(out_dir) = env::var("OUT_DIR").map(PathBuf::from) else {
        println!("cargo:warning=OUT_DIR is not set; skipping header generation");
        return;
    };
    let header = out_dir.join("users_ffi.h");

    let bindings = match cbindgen::Builder::new()
        .with_crate(&crate_dir)
        .with_language(cbindgen::Language::C)
        .with_include_guard("USERS_FFI_H")
        .with_cpp_compat(true)
        .generate()
    {
        Ok(bindings) => bindings,
        // A header that fails to generate must not block the Rust build.
        Err(e) => {
            println!("cargo:warning=cbindgen: {e}");
            return;
        }
    };
    bindings.write_to_file(&header);

    if let Some(dir) = env::var_os("USERS_FFI_HEADER_DIR") {
        let dir = PathBuf::from(dir);
        let copied = std::fs::create_dir_all(&dir)
            .and_then(|()| std::fs::copy(&header, dir.join("users_ffi.h")));
        if let Err(e) = copied {
            println!("cargo:warning=copying users_ffi.h to {}: {e}", dir.display());
        }
    }
}
