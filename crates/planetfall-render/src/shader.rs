//! Shader module loading and caching by name.

use log::{debug, info};
use std::{collections::HashMap, path::PathBuf, sync::Arc};
use thiserror::Error;
use wgpu::{ShaderModuleDescriptor, ShaderSource};

#[derive(Debug, Error)]
pub enum ShaderError {
    #[error("shader '{name}' failed to compile: {message}")]
    CompilationFailed { name: String, message: String },

    #[error("shader '{name}' failed to link: {message}")]
    LinkFailed { name: String, message: String },

    #[error("shader file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to read shader file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("shader '{name}' not found in library")]
    NotLoaded { name: String },

    #[error("no shader directory configured for file-based loading")]
    NoShaderDir,
}

/// Compiled shader modules keyed by name. With a shader directory set,
/// modules can also be read from `.wgsl` files and reloaded.
pub struct ShaderLibrary {
    modules: HashMap<String, Arc<wgpu::ShaderModule>>,
    files: HashMap<String, String>,
    shader_dir: Option<PathBuf>,
}

impl ShaderLibrary {
    pub fn new() -> Self {
        Self {
            modules: HashMap::new(),
            files: HashMap::new(),
            shader_dir: None,
        }
    }

    pub fn with_shader_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.shader_dir = Some(dir.into());
        self
    }

    pub fn load_from_source(
        &mut self,
        device: &wgpu::Device,
        name: &str,
        source: &str,
    ) -> Result<Arc<wgpu::ShaderModule>, ShaderError> {
        debug!("Loading shader '{}' from source", name);

        if source.trim().is_empty() {
            return Err(ShaderError::CompilationFailed {
                name: name.to_string(),
                message: "empty source".to_string(),
            });
        }

        // Keep compile errors out of the device's uncaptured-error handler.
        let scope = device.push_error_scope(wgpu::ErrorFilter::Validation);
        let module = device.create_shader_module(ShaderModuleDescriptor {
            label: Some(name),
            source: ShaderSource::Wgsl(source.into()),
        });
        if let Some(err) = pollster::block_on(scope.pop()) {
            return Err(ShaderError::CompilationFailed {
                name: name.to_string(),
                message: err.to_string(),
            });
        }
        let module = Arc::new(module);

        if self
            .modules
            .insert(name.to_string(), module.clone())
            .is_some()
        {
            info!("Replaced shader '{}'", name);
        } else {
            info!("Loaded shader '{}'", name);
        }

        Ok(module)
    }

    /// Read `filename` from the shader directory and compile it as `name`.
    pub fn load_from_file(
        &mut self,
        device: &wgpu::Device,
        name: &str,
        filename: &str,
    ) -> Result<Arc<wgpu::ShaderModule>, ShaderError> {
        let source = self.read_source(filename)?;
        let module = self.load_from_source(device, name, &source)?;
        self.files.insert(name.to_string(), filename.to_string());
        Ok(module)
    }

    pub fn get(&self, name: &str) -> Option<Arc<wgpu::ShaderModule>> {
        self.modules.get(name).cloned()
    }

    /// Recompile a file-backed shader from disk.
    pub fn reload(
        &mut self,
        device: &wgpu::Device,
        name: &str,
    ) -> Result<Arc<wgpu::ShaderModule>, ShaderError> {
        let filename = self
            .files
            .get(name)
            .cloned()
            .ok_or_else(|| ShaderError::NotLoaded {
                name: name.to_string(),
            })?;
        info!("Reloading shader '{}'", name);
        let source = self.read_source(&filename)?;
        self.load_from_source(device, name, &source)
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    fn read_source(&self, filename: &str) -> Result<String, ShaderError> {
        let shader_dir = self.shader_dir.as_ref().ok_or(ShaderError::NoShaderDir)?;
        let path = shader_dir.join(filename);
        debug!("Reading shader file {:?}", path);
        if !path.exists() {
            return Err(ShaderError::FileNotFound { path });
        }
        Ok(std::fs::read_to_string(&path)?)
    }
}

impl Default for ShaderLibrary {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PLANET_SHADER_SOURCE;
    use crate::gpu::tests::create_test_device;

    #[test]
    fn test_library_starts_empty() {
        let library = ShaderLibrary::new();
        assert!(library.is_empty());
        assert_eq!(library.len(), 0);
        assert!(library.get("planet").is_none());
    }

    #[test]
    fn test_read_without_shader_dir() {
        let library = ShaderLibrary::new();
        assert!(matches!(
            library.read_source("planet.wgsl"),
            Err(ShaderError::NoShaderDir)
        ));
    }

    #[test]
    fn test_read_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let library = ShaderLibrary::new().with_shader_dir(dir.path());
        match library.read_source("missing.wgsl") {
            Err(ShaderError::FileNotFound { path }) => {
                assert_eq!(path, dir.path().join("missing.wgsl"));
            }
            other => panic!("expected FileNotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_read_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("planet.wgsl"), PLANET_SHADER_SOURCE).unwrap();
        let library = ShaderLibrary::new().with_shader_dir(dir.path());
        assert_eq!(library.read_source("planet.wgsl").unwrap(), PLANET_SHADER_SOURCE);
    }

    #[test]
    fn test_empty_source_fails_to_compile() {
        let Some((device, _queue)) = create_test_device() else {
            return;
        };
        let mut library = ShaderLibrary::new();
        assert!(matches!(
            library.load_from_source(&device, "blank", "  \n"),
            Err(ShaderError::CompilationFailed { .. })
        ));
        assert!(library.is_empty());
    }

    #[test]
    fn test_cache_returns_same_module() {
        let Some((device, _queue)) = create_test_device() else {
            return;
        };
        let mut library = ShaderLibrary::new();
        library
            .load_from_source(&device, "planet", PLANET_SHADER_SOURCE)
            .unwrap();
        let a = library.get("planet").unwrap();
        let b = library.get("planet").unwrap();
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn test_invalid_wgsl_fails_to_compile() {
        let Some((device, _queue)) = create_test_device() else {
            return;
        };
        let mut library = ShaderLibrary::new();
        match library.load_from_source(&device, "bad", "fn vs_main( { this is not wgsl }") {
            Err(ShaderError::CompilationFailed { name, message }) => {
                assert_eq!(name, "bad");
                assert!(!message.is_empty());
            }
            other => panic!("expected CompilationFailed, got {other:?}"),
        }
        assert!(library.get("bad").is_none());
    }

    #[test]
    fn test_invalid_file_keeps_previous_module() {
        let Some((device, _queue)) = create_test_device() else {
            return;
        };
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("planet.wgsl");
        std::fs::write(&path, PLANET_SHADER_SOURCE).unwrap();
        let mut library = ShaderLibrary::new().with_shader_dir(dir.path());
        let loaded = library
            .load_from_file(&device, "planet", "planet.wgsl")
            .unwrap();

        std::fs::write(&path, "@vertex fn vs_main() -> @builtin(position) vec4<f32> {").unwrap();
        assert!(matches!(
            library.reload(&device, "planet"),
            Err(ShaderError::CompilationFailed { .. })
        ));
        assert!(Arc::ptr_eq(&library.get("planet").unwrap(), &loaded));
    }

    #[test]
    fn test_reload_from_file_replaces_module() {
        let Some((device, _queue)) = create_test_device() else {
            return;
        };
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("planet.wgsl"), PLANET_SHADER_SOURCE).unwrap();
        let mut library = ShaderLibrary::new().with_shader_dir(dir.path());
        let original = library
            .load_from_file(&device, "planet", "planet.wgsl")
            .unwrap();
        let reloaded = library.reload(&device, "planet").unwrap();
        assert!(!Arc::ptr_eq(&original, &reloaded));
        assert_eq!(library.len(), 1);
    }

    #[test]
    fn test_reload_source_only_shader_is_not_loaded() {
        let Some((device, _queue)) = create_test_device() else {
            return;
        };
        let mut library = ShaderLibrary::new();
        library
            .load_from_source(&device, "planet", PLANET_SHADER_SOURCE)
            .unwrap();
        assert!(matches!(
            library.reload(&device, "planet"),
            Err(ShaderError::NotLoaded { .. })
        ));
    }
}
