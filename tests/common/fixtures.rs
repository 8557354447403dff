//! Test fixtures - reusable project content.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use zip::write::SimpleFileOptions;
use zip::ZipWriter;

/// Build script that satisfies every default convention rule
pub const CONFORMING_BUILD_SCRIPT: &str = r#"plugins {
    `java-library`
}

dependencies {
    compileOnly(libs.paper.api)
    compileOnly(project(":zakum-api"))
}

tasks.processResources {
    filesMatching("plugin.yml") {
        expand("version" to project.version)
    }
}
"#;

/// Descriptor for `name` depending on `core`
pub fn plugin_descriptor(name: &str, core: &str) -> String {
    format!(
        "name: {name}\nversion: \"${{version}}\"\nmain: net.orbis.{lower}.{name}Plugin\napi-version: \"1.21\"\ndepend: [{core}]\n",
        lower = name.to_lowercase()
    )
}

/// Shaded build script declaring `relocations` as (source, target) pairs
pub fn shaded_build_script(archive: &str, relocations: &[(&str, &str)]) -> String {
    let mut script = String::from(
        "plugins {\n    alias(libs.plugins.shadow)\n}\n\ntasks.named<ShadowJar>(\"shadowJar\") {\n",
    );
    script.push_str(&format!("    archiveBaseName.set(\"{}\")\n", archive));
    for (source, target) in relocations {
        script.push_str(&format!("    relocate(\"{}\", \"{}\")\n", source, target));
    }
    script.push_str("}\n");
    script
}

/// Minimal configuration with small, explicit rule sets
pub const SMALL_CONFIG: &str = r#"
[[boundary.rules]]
modules = ["featureA"]
forbidden_root = "core.internal"

[descriptor]
core_module = "core"
core_plugin = "Core"
exempt = []

[conventions]
rules = []

[shading]
namespace_root = "acme.libs"
primary_module = "core"
forbidden_raw_packages = ["okio"]

[shading.required_relocations]
core = ["acme.libs.okio"]
"#;

/// Write a zip archive with the given entries (`/`-suffixed names are dirs)
pub fn write_jar(path: &Path, entries: &[&str]) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("Failed to create directories");
    }
    let file = File::create(path).expect("Failed to create jar");
    let mut zip = ZipWriter::new(file);
    let options = SimpleFileOptions::default().compression_method(zip::CompressionMethod::Stored);
    for name in entries {
        if name.ends_with('/') {
            zip.add_directory(*name, options).expect("add directory");
        } else {
            zip.start_file(*name, options).expect("start file");
            zip.write_all(b"\xca\xfe\xba\xbe").expect("write entry");
        }
    }
    zip.finish().expect("finish jar");
}
