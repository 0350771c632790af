use std::{env, path::PathBuf, process::Command};

fn main() {
    let manifest_dir = env::var("CARGO_MANIFEST_DIR")
        .expect("CARGO_MANIFEST_DIR not set");

    let manifest_path = PathBuf::from(&manifest_dir);
    let workspace_root = manifest_path
        .parent() // crates/
        .and_then(|crates| crates.parent()) // workspace root
        .expect("testing crate lives two levels below the workspace root");

    let program_dir = workspace_root.join("programs").join("split-protocol");
    let program_manifest = program_dir.join("Cargo.toml");
    let program_src = program_dir.join("src");

    // Rebuild the program whenever its sources change
    println!("cargo:rerun-if-changed={}", program_manifest.display());
    println!("cargo:rerun-if-changed={}", program_src.display());

    let output = Command::new("cargo")
        .args(["build-sbf", "--manifest-path", &program_manifest.to_string_lossy()])
        .output();

    match output {
        Ok(output) => {
            if !output.status.success() {
                eprintln!("Failed to build Split Protocol program:");
                eprintln!("stdout: {}", String::from_utf8_lossy(&output.stdout));
                eprintln!("stderr: {}", String::from_utf8_lossy(&output.stderr));
                std::process::exit(1);
            }
        }
        Err(e) => {
            eprintln!("Failed to execute cargo build-sbf: {}", e);
            eprintln!("Make sure you have the Solana CLI tools installed and in your PATH");
            std::process::exit(1);
        }
    }
}
