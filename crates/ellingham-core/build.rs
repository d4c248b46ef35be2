// File: crates/ellingham-core/build.rs
// Summary: Build script; links Windows system libraries for Skia/ICU and tracks the bundled table.

fn main() {
    println!("cargo:rerun-if-changed=data/ellingham.csv");
    #[cfg(target_os = "windows")]
    {
        // Needed for RegOpenKeyExW, RegQueryInfoKeyW, etc.
        println!("cargo:rustc-link-lib=advapi32");
    }
}
