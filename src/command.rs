use crate::config::{AnsibleConfig, TargetHost};
use crate::executor::Ansible;
use crate::inventory::Inventory;
use crate::playbook::Playbook;
use crate::types::DEFAULT_SSH_USER;
use std::fmt;
use std::path::Path;
use std::time::Duration;

pub const ANSIBLE: &str = "ansible";
pub const ANSIBLE_PLAYBOOK: &str = "ansible-playbook";
pub const PASSWORD_ENV: &str = "ANSIBLE_PASSWORD";
pub const DISABLE_HOST_KEY_CHECKING_ARG: &str = "--ssh-common-args='-o StrictHostKeyChecking=no'";

/// 最终要启动的进程: 可执行文件、参数和额外的环境变量
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
    pub env: Vec<(String, String)>,
}

impl Invocation {
    pub fn argv(&self) -> Vec<String> {
        std::iter::once(self.program.clone())
            .chain(self.args.iter().cloned())
            .collect()
    }
}

/// 用于日志输出，密码会被隐藏
impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            if arg.starts_with("ansible_password=") {
                write!(f, " ansible_password=******")?;
            } else {
                write!(f, " {}", arg)?;
            }
        }
        Ok(())
    }
}

impl AnsibleConfig {
    /// 根据当前配置组装命令行
    ///
    /// 纯函数：临时文件由执行器写好后把路径传进来。
    /// 只要配置了 playbook 就使用 ansible-playbook，ad-hoc 模块设置被忽略。
    pub(crate) fn invocation(&self, inventory_path: Option<&Path>, playbook_path: Option<&Path>) -> Invocation {
        let mut args = vec![self.host_pattern.clone()];
        let mut env = Vec::new();

        if let Some(target) = &self.target {
            args.push("-i".to_string());
            args.push(format!("{}:{},", target.host, target.port));
            args.push("--connection=ssh".to_string());
            args.push(format!("--user={}", target.user));
        }

        if let Some(password) = &self.password {
            args.push("--extra-vars".to_string());
            args.push(format!("ansible_password={}", password));
            env.push((PASSWORD_ENV.to_string(), password.clone()));
        }

        if self.disable_host_key_checking {
            args.push(DISABLE_HOST_KEY_CHECKING_ARG.to_string());
        }

        if let Some(path) = inventory_path {
            args.push("-i".to_string());
            args.push(path.to_string_lossy().to_string());
        }

        let program = if self.playbook.is_some() {
            if let Some(path) = playbook_path {
                args.push(path.to_string_lossy().to_string());
            }
            ANSIBLE_PLAYBOOK
        } else {
            if let Some(module) = &self.module {
                args.push("-m".to_string());
                args.push(module.clone());

                if !self.module_args.is_empty() {
                    args.push("-a".to_string());
                    args.push(
                        self.module_args
                            .iter()
                            .map(|(key, value)| format!("{}={}", key, value))
                            .collect::<Vec<_>>()
                            .join(" "),
                    );
                }
            }
            ANSIBLE
        };

        Invocation {
            program: program.to_string(),
            args,
            env,
        }
    }
}

#[derive(Debug, Default)]
pub struct AnsibleBuilder {
    config: AnsibleConfig,
}

impl AnsibleBuilder {
    pub fn new() -> Self {
        Self {
            config: AnsibleConfig::default(),
        }
    }

    pub fn host_pattern(mut self, pattern: &str) -> Self {
        self.config.host_pattern = pattern.to_string();
        self
    }

    /// 直接指定目标主机，用户默认为 root
    pub fn target_host(self, host: &str, port: i32) -> Self {
        self.target_host_as(host, port, DEFAULT_SSH_USER)
    }

    pub fn target_host_as(mut self, host: &str, port: i32, user: &str) -> Self {
        self.config.target = Some(TargetHost {
            host: host.to_string(),
            port,
            user: user.to_string(),
        });
        self
    }

    pub fn password(mut self, password: &str) -> Self {
        self.config.password = Some(password.to_string());
        self
    }

    /// 仅用于测试环境
    pub fn disable_host_key_checking(mut self) -> Self {
        self.config.disable_host_key_checking = true;
        self
    }

    pub fn inventory(mut self, inventory: Inventory) -> Self {
        self.config.inventory = Some(inventory);
        self
    }

    pub fn playbook(mut self, playbook: Playbook) -> Self {
        self.config.playbook = Some(playbook);
        self
    }

    pub fn module(mut self, module: &str) -> Self {
        self.config.module = Some(module.to_string());
        self
    }

    pub fn module_arg(mut self, key: &str, value: &str) -> Self {
        match self.config.module_args.iter_mut().find(|(k, _)| k == key) {
            Some((_, existing)) => *existing = value.to_string(),
            None => self.config.module_args.push((key.to_string(), value.to_string())),
        }
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = Some(timeout);
        self
    }

    pub fn build_config(self) -> AnsibleConfig {
        self.config
    }

    /// 使用默认的进程启动器和系统临时目录
    pub fn build(self) -> Ansible {
        Ansible::new(self.config)
    }
}
