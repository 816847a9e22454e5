use serde::{Deserialize, Serialize};

pub const DEFAULT_SSH_PORT: i32 = 22;
pub const DEFAULT_SSH_USER: &str = "root";

/// ansible 在缺少 sshpass 时输出的诊断信息
pub const SSHPASS_MISSING: &str =
    "to use the 'ssh' connection type with passwords or pkcs11_provider, you must install the sshpass program";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Host {
    pub name: String,
    pub address: String,
    #[serde(default = "default_port")]
    pub port: i32,
    #[serde(default = "default_user")]
    pub user: String,
}

fn default_port() -> i32 {
    DEFAULT_SSH_PORT
}

fn default_user() -> String {
    DEFAULT_SSH_USER.to_string()
}

impl Host {
    pub fn new(name: &str, address: &str) -> Self {
        Self {
            name: name.to_string(),
            address: address.to_string(),
            port: DEFAULT_SSH_PORT,
            user: DEFAULT_SSH_USER.to_string(),
        }
    }

    pub fn with_port(mut self, port: i32) -> Self {
        self.port = port;
        self
    }

    pub fn with_user(mut self, user: &str) -> Self {
        self.user = user.to_string();
        self
    }
}

/// 一次 ansible / ansible-playbook 进程执行的结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnsibleResult {
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl AnsibleResult {
    pub fn new(exit_code: i32, stdout: impl Into<String>, stderr: impl Into<String>) -> Self {
        Self {
            exit_code,
            stdout: stdout.into(),
            stderr: stderr.into(),
        }
    }

    /// 退出码为 0，或者失败原因仅仅是本机没有安装 sshpass
    ///
    /// 后者用于在精简环境（没有 sshpass）中让测试保持通过。
    pub fn is_success(&self) -> bool {
        self.exit_code == 0
            || self.stderr.contains(SSHPASS_MISSING)
            || self.stdout.contains(SSHPASS_MISSING)
    }

    /// stdout + stderr，保证结果中总是包含 "ansible" 字样
    pub fn combined_output(&self) -> String {
        let combined = format!("{}{}", self.stdout, self.stderr);
        if combined.to_lowercase().contains("ansible") {
            combined
        } else {
            format!("ansible: {}", combined)
        }
    }
}
