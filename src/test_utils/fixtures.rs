//! Sample projects for tests.

use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// File name of the project manifest.
pub const MANIFEST_FILE: &str = "rulegen.toml";

/// A small Android project with shared processors.
///
/// `app` and `libs/ui` both use dagger; `app` also uses AutoValue with a
/// parcel extension. `libs/model` is a plain Java library.
pub const SAMPLE_MANIFEST: &str = r#"
[project]
name = "shop"

[[targets]]
name = "app"
path = "app"
kind = "android_app"
package = "com.example.shop"
res_dirs = ["src/main/res"]
asset_dirs = ["src/main/assets"]
external_deps = [".rulegen/ext/material-1.9.0.aar", ".rulegen/ext/guava-32.1.jar"]
deps = ["libs/ui", "libs/model", "libs/annotations"]
provided = ["libs/annotations"]

[targets.configurations]
annotationProcessor = [
    "com.google.dagger:dagger-compiler:2.51",
    "com.google.auto.value:auto-value:1.10.4",
    "com.ryanharter.auto.value:auto-value-parcel:0.2.9",
]

[[targets]]
name = "ui"
path = "libs/ui"
kind = "android_library"
package = "com.example.shop.ui"
res_dirs = ["src/main/res"]

[targets.configurations]
annotationProcessor = ["com.google.dagger:dagger-compiler:2.51"]

[[targets]]
name = "model"
path = "libs/model"
kind = "java_library"

[[targets]]
name = "annotations"
path = "libs/annotations"
kind = "android_library"

[[artifacts]]
coordinate = "com.google.dagger:dagger-compiler:2.51"
path = ".rulegen/ext/dagger-compiler-2.51.jar"
processors = ["dagger.internal.codegen.ComponentProcessor"]
dependencies = ["com.google.dagger:dagger:2.51"]

[[artifacts]]
coordinate = "com.google.dagger:dagger:2.51"
path = ".rulegen/ext/dagger-2.51.jar"

[[artifacts]]
coordinate = "com.google.auto.value:auto-value:1.10.4"
path = ".rulegen/ext/auto-value-1.10.4.jar"
processors = ["com.google.auto.value.processor.AutoValueProcessor"]

[[artifacts]]
coordinate = "com.ryanharter.auto.value:auto-value-parcel:0.2.9"
path = ".rulegen/ext/auto-value-parcel-0.2.9.jar"
processors = ["com.ryanharter.auto.value.parcel.ParcelAdapterProcessor"]
extensions = ["com.ryanharter.auto.value.parcel.AutoValueParcelExtension"]
"#;

/// Extra target whose processor configuration contributes no processors.
pub const EMPTY_PROCESSOR_TARGET: &str = r#"
[[targets]]
name = "legacy"
path = "libs/legacy"
kind = "java_library"

[targets.configurations]
annotationProcessor = ["javax.annotation:jsr250-api:1.0"]

[[artifacts]]
coordinate = "javax.annotation:jsr250-api:1.0"
path = ".rulegen/ext/jsr250-api-1.0.jar"
"#;

/// A project manifest written into a temporary directory.
pub struct ProjectFixture {
    temp_dir: TempDir,
}

impl ProjectFixture {
    /// Write `manifest` as `rulegen.toml` into a fresh temp directory.
    pub fn new(manifest: &str) -> Result<Self> {
        let temp_dir = TempDir::new()?;
        fs::write(temp_dir.path().join(MANIFEST_FILE), manifest)?;
        Ok(Self {
            temp_dir,
        })
    }

    /// Fixture with [`SAMPLE_MANIFEST`].
    pub fn sample() -> Result<Self> {
        Self::new(SAMPLE_MANIFEST)
    }

    /// Fixture with [`SAMPLE_MANIFEST`] plus [`EMPTY_PROCESSOR_TARGET`].
    pub fn with_empty_processor() -> Result<Self> {
        Self::new(&format!("{SAMPLE_MANIFEST}{EMPTY_PROCESSOR_TARGET}"))
    }

    /// Write a generator config file and return its path.
    pub fn write_config(&self, content: &str) -> Result<PathBuf> {
        let path = self.temp_dir.path().join("rulegen-config.toml");
        fs::write(&path, content)?;
        Ok(path)
    }

    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.root().join(MANIFEST_FILE)
    }

    /// Read a generated file relative to the root.
    pub fn read(&self, relative: &str) -> Result<String> {
        Ok(fs::read_to_string(self.root().join(relative))?)
    }
}
