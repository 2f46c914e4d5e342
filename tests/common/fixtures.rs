//! Reusable grammar layouts.

use std::path::PathBuf;

use super::env::TestEnv;

pub const PARSER_C: &str = "const void *tree_sitter_json(void) { return 0; }\n";

pub const GLUE_JS: &str = "export default async function init() {}\n";

/// Bytes the fake compiler writes to its `-o` argument
pub const FAKE_WASM: &[u8] = b"\0asm\x01\0\0\0";

/// Shell script standing in for emcc: writes FAKE_WASM to the `-o` path
pub const FAKE_COMPILER: &str = r#"#!/bin/sh
out=""
while [ $# -gt 0 ]; do
  if [ "$1" = "-o" ]; then
    out="$2"
    shift
  fi
  shift
done
echo "fake-emcc $out"
printf '\000asm\001\000\000\000' > "$out"
"#;

/// Install an installed dependency grammar under node_modules
#[allow(dead_code)]
pub fn install_dependency(env: &TestEnv, name: &str) {
    env.write(&format!("node_modules/{}/src/parser.c", name), PARSER_C);
}

/// Create a local grammar package with its generated glue module installed
#[allow(dead_code)]
pub fn local_package(env: &TestEnv, dir: &str, name: &str) {
    env.write(&format!("{}/{}/src/parser.c", dir, name), PARSER_C);
    env.write(
        &format!("node_modules/{}/{}.js", name, name.replace('-', "_")),
        GLUE_JS,
    );
}

/// Write an executable fake compiler and return its path
#[cfg(unix)]
#[allow(dead_code)]
pub fn fake_compiler(env: &TestEnv) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = env.write("bin/fake-emcc", FAKE_COMPILER);
    let mut perms = std::fs::metadata(&path).unwrap().permissions();
    perms.set_mode(0o755);
    std::fs::set_permissions(&path, perms).unwrap();
    path
}
