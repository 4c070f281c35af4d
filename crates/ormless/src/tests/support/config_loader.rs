//! Test configuration loaders backed by descriptor files in temporary
//! directories.

use std::ffi::OsString;
use std::fs;
use std::sync::Arc;

use camino::Utf8PathBuf;
use ormless_config::Config;
use ortho_config::OrthoError;
use tempfile::TempDir;

use crate::bootstrap::ConfigLoader;

/// Descriptor table mirroring the deployment the gateway was built for.
pub const REFERENCE_CATALOGUE: &str = r##"[
    {"cmd_name":"entity.category_list","db_proc_name":"Entity.CategoryList",
     "call_method":"GET","parameters":[{"name":"p","type":"int"}]},
    {"cmd_name":"entity.category_save","db_proc_name":"Entity.CategorySave",
     "call_method":"POST","parameters":[
        {"name":"name","type":"string"},
        {"name":"sort","type":"float","default":"1.0"},
        {"name":"visible","type":"bool","default":"true"}]},
    {"cmd_name":"entity.internal","db_proc_name":"Entity.Internal",
     "call_method":"ORMLESS"},
    {"cmd_name":"entity.legacy","db_proc_name":"Entity.Legacy",
     "call_method":"PUT"},
    {"cmd_name":"#USER_REGISTER#","db_proc_name":"Entity.UserRegister",
     "call_method":"ORMLESS"}
]"##;

/// Loader that writes a descriptor table to a temporary directory.
///
/// The parameter ceiling is lowered to three so limit scenarios stay short.
pub struct TestConfigLoader {
    _dir: TempDir,
    descriptor_path: Utf8PathBuf,
}

impl TestConfigLoader {
    /// Loader serving [`REFERENCE_CATALOGUE`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_descriptors(REFERENCE_CATALOGUE)
    }

    /// Loader serving the given descriptor JSON.
    #[must_use]
    pub fn with_descriptors(json: &str) -> Self {
        let dir = TempDir::new().expect("failed to create temporary descriptor directory");
        let path = Utf8PathBuf::from_path_buf(dir.path().join("commands.json"))
            .expect("temporary descriptor path was not valid UTF-8");
        fs::write(&path, json).expect("write descriptor file");
        Self {
            _dir: dir,
            descriptor_path: path,
        }
    }

    /// Loader pointing at a descriptor file that does not exist.
    #[must_use]
    pub fn missing_descriptors() -> Self {
        let dir = TempDir::new().expect("failed to create temporary descriptor directory");
        let path = Utf8PathBuf::from_path_buf(dir.path().join("absent.json"))
            .expect("temporary descriptor path was not valid UTF-8");
        Self {
            _dir: dir,
            descriptor_path: path,
        }
    }
}

impl ConfigLoader for TestConfigLoader {
    fn load(&self) -> Result<Config, Arc<OrthoError>> {
        Ok(Config {
            descriptor_path: self.descriptor_path.clone(),
            parameters_count_limit: 3,
            ..Config::default()
        })
    }
}

/// Loader that intentionally fails by passing an invalid CLI value.
pub struct FailingConfigLoader;

impl ConfigLoader for FailingConfigLoader {
    fn load(&self) -> Result<Config, Arc<OrthoError>> {
        let args = vec![
            OsString::from("ormless"),
            OsString::from("--multi-value-policy"),
            OsString::from("explode"),
        ];
        Config::load_from_iter(args)
    }
}
