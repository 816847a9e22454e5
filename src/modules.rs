use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};

/// playbook 任务中的一次模块调用
///
/// `name` 为完整模块名（例如 `ansible.builtin.ping`），参数保持插入顺序。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleInvocation {
    pub name: String,
    #[serde(default)]
    pub args: Mapping,
}

impl ModuleInvocation {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            args: Mapping::new(),
        }
    }

    /// 同名参数会覆盖之前的值
    pub fn with_arg(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.args.insert(Value::String(key.to_string()), value.into());
        self
    }

    /// 任务中嵌入的片段: `{<name>: <args>}`，没有参数时值为 null
    pub fn to_fragment(&self) -> Mapping {
        let value = if self.args.is_empty() {
            Value::Null
        } else {
            Value::Mapping(self.args.clone())
        };

        let mut fragment = Mapping::new();
        fragment.insert(Value::String(self.name.clone()), value);
        fragment
    }
}

/// ansible.builtin 内置模块
pub mod builtin {
    use super::ModuleInvocation;

    pub const PING: &str = "ansible.builtin.ping";
    pub const DEBUG: &str = "ansible.builtin.debug";
    pub const COMMAND: &str = "ansible.builtin.command";
    pub const SHELL: &str = "ansible.builtin.shell";

    pub fn ping() -> ModuleInvocation {
        ModuleInvocation::new(PING)
    }

    pub fn debug(msg: &str) -> ModuleInvocation {
        ModuleInvocation::new(DEBUG).with_arg("msg", msg)
    }

    pub fn command(cmd: &str) -> ModuleInvocation {
        ModuleInvocation::new(COMMAND).with_arg("cmd", cmd)
    }

    pub fn shell(cmd: &str) -> ModuleInvocation {
        ModuleInvocation::new(SHELL).with_arg("cmd", cmd)
    }
}
