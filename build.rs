//! Build script for the demo firmware
//!
//! Adds the Cortex-M linker scripts when building the `embedded` binary.

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    // Host builds (tests, std) need no linker scripts.
    if std::env::var_os("CARGO_FEATURE_EMBEDDED").is_none() {
        return;
    }

    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");
}
