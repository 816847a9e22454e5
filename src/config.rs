use crate::error::AnsibleError;
use crate::inventory::Inventory;
use crate::playbook::{DEFAULT_HOST_PATTERN, Playbook};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetHost {
    pub host: String,
    pub port: i32,
    pub user: String,
}

/// 一次 ansible 调用的完整配置，构建后不可变
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnsibleConfig {
    #[serde(default = "default_host_pattern")]
    pub host_pattern: String,
    #[serde(default)]
    pub target: Option<TargetHost>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub disable_host_key_checking: bool,
    #[serde(default)]
    pub inventory: Option<Inventory>,
    #[serde(default)]
    pub playbook: Option<Playbook>,
    #[serde(default)]
    pub module: Option<String>,
    /// ad-hoc 模块参数，按插入顺序拼接
    #[serde(default)]
    pub module_args: Vec<(String, String)>,
    #[serde(default)]
    pub timeout: Option<Duration>,
}

fn default_host_pattern() -> String {
    DEFAULT_HOST_PATTERN.to_string()
}

impl Default for AnsibleConfig {
    fn default() -> Self {
        Self {
            host_pattern: default_host_pattern(),
            target: None,
            password: None,
            disable_host_key_checking: false,
            inventory: None,
            playbook: None,
            module: None,
            module_args: Vec::new(),
            timeout: None,
        }
    }
}

impl AnsibleConfig {
    /// 从YAML文件加载配置
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self, AnsibleError> {
        let content = std::fs::read_to_string(&path)
            .map_err(|e| AnsibleError::FileOperationError(format!("Failed to read config file: {}", e)))?;

        serde_yaml::from_str(&content)
            .map_err(|e| AnsibleError::SerializationError(format!("Failed to parse YAML: {}", e)))
    }

    /// 从JSON文件加载配置
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, AnsibleError> {
        let content = std::fs::read_to_string(&path)
            .map_err(|e| AnsibleError::FileOperationError(format!("Failed to read config file: {}", e)))?;

        serde_json::from_str(&content)
            .map_err(|e| AnsibleError::SerializationError(format!("Failed to parse JSON: {}", e)))
    }

    pub fn save_to_yaml<P: AsRef<Path>>(&self, path: P) -> Result<(), AnsibleError> {
        let yaml_content = serde_yaml::to_string(self)?;

        std::fs::write(path, yaml_content)
            .map_err(|e| AnsibleError::FileOperationError(format!("Failed to write file: {}", e)))
    }

    pub fn save_to_json<P: AsRef<Path>>(&self, path: P) -> Result<(), AnsibleError> {
        let json_content = serde_json::to_string_pretty(self)?;

        std::fs::write(path, json_content)
            .map_err(|e| AnsibleError::FileOperationError(format!("Failed to write file: {}", e)))
    }
}
