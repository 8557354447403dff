//! Test environment builder for isolated modgate runs.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use serde_json::Value;
use tempfile::TempDir;

use super::fixtures::{plugin_descriptor, write_jar, CONFORMING_BUILD_SCRIPT};

/// Result of running a modgate CLI command
#[derive(Debug)]
pub struct TestResult {
    pub success: bool,
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl TestResult {
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Combine stdout and stderr
    pub fn combined_output(&self) -> String {
        format!("{}\n{}", self.stdout, self.stderr)
    }

    /// Parse stdout as NDJSON events
    pub fn events(&self) -> Vec<Value> {
        self.stdout
            .lines()
            .filter(|l| !l.trim().is_empty())
            .map(|l| serde_json::from_str(l).unwrap_or_else(|e| panic!("bad event {l}: {e}")))
            .collect()
    }
}

/// Isolated project directory
pub struct TestEnv {
    pub project_root: TempDir,
    bin: PathBuf,
}

impl TestEnv {
    pub fn builder() -> TestEnvBuilder {
        TestEnvBuilder::default()
    }

    pub fn project_path(&self, relative: &str) -> PathBuf {
        self.project_root.path().join(relative)
    }

    pub fn root(&self) -> &Path {
        self.project_root.path()
    }

    /// Run modgate with the project root as working directory
    pub fn run(&self, args: &[&str]) -> TestResult {
        self.run_with_env(args, &[])
    }

    pub fn run_with_env(&self, args: &[&str], env_vars: &[(&str, &str)]) -> TestResult {
        let mut cmd = Command::new(&self.bin);
        cmd.current_dir(self.project_root.path())
            .args(args)
            .env_remove("RUST_LOG")
            .env_remove("MODGATE_REPORT_DIR")
            .env_remove("MODGATE_PRIMARY_MODULE");
        for (key, value) in env_vars {
            cmd.env(key, value);
        }
        let output = cmd.output().expect("Failed to execute modgate");
        to_result(output)
    }

    /// Read a report file relative to the project root
    pub fn read(&self, relative: &str) -> String {
        let path = self.project_path(relative);
        std::fs::read_to_string(&path)
            .unwrap_or_else(|e| panic!("Failed to read {}: {}", path.display(), e))
    }

    pub fn write_file(&self, relative: &str, content: &str) {
        write_file(&self.project_path(relative), content);
    }
}

fn to_result(output: Output) -> TestResult {
    TestResult {
        success: output.status.success(),
        exit_code: output.status.code().unwrap_or(-1),
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
    }
}

pub fn write_file(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("Failed to create directories");
    }
    std::fs::write(path, content).expect("Failed to write file");
}

/// Builder for TestEnv with fluent API
#[derive(Default)]
pub struct TestEnvBuilder {
    files: Vec<(String, String)>,
    jars: Vec<(String, Vec<String>)>,
    config: Option<String>,
}

impl TestEnvBuilder {
    /// Add an arbitrary project file
    pub fn with_file(mut self, relative: &str, content: &str) -> Self {
        self.files.push((relative.to_string(), content.to_string()));
        self
    }

    /// Add a Java source file under `<module>/src/main/java/`
    pub fn with_source(self, module: &str, file: &str, content: &str) -> Self {
        let path = format!("{}/src/main/java/{}", module, file);
        self.with_file(&path, content)
    }

    pub fn with_descriptor(self, module: &str, content: &str) -> Self {
        let path = format!("{}/src/main/resources/plugin.yml", module);
        self.with_file(&path, content)
    }

    pub fn with_build_script(self, module: &str, content: &str) -> Self {
        let path = format!("{}/build.gradle.kts", module);
        self.with_file(&path, content)
    }

    /// A module with a descriptor and build script that satisfy every rule
    pub fn with_conforming_plugin(self, module: &str, plugin: &str, core: &str) -> Self {
        self.with_source(module, "Plugin.java", "package plugin;\n")
            .with_descriptor(module, &plugin_descriptor(plugin, core))
            .with_build_script(module, CONFORMING_BUILD_SCRIPT)
    }

    /// A jar under `<module>/build/libs/<name>`
    pub fn with_jar(mut self, module: &str, name: &str, entries: &[&str]) -> Self {
        self.jars.push((
            format!("{}/build/libs/{}", module, name),
            entries.iter().map(|e| e.to_string()).collect(),
        ));
        self
    }

    /// Contents of `modgate.toml`
    pub fn with_config(mut self, toml: &str) -> Self {
        self.config = Some(toml.to_string());
        self
    }

    pub fn build(self) -> TestEnv {
        let project_root = TempDir::new().expect("Failed to create temp dir");
        for (relative, content) in &self.files {
            write_file(&project_root.path().join(relative), content);
        }
        for (relative, entries) in &self.jars {
            let refs: Vec<&str> = entries.iter().map(String::as_str).collect();
            write_jar(&project_root.path().join(relative), &refs);
        }
        if let Some(config) = &self.config {
            write_file(&project_root.path().join("modgate.toml"), config);
        }
        TestEnv {
            project_root,
            bin: PathBuf::from(env!("CARGO_BIN_EXE_modgate")),
        }
    }
}
