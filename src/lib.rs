pub mod error;
pub mod types;
pub mod inventory;
pub mod modules;
pub mod playbook;
pub mod config;
pub mod command;
pub mod runner;
pub mod executor;
pub mod utils;


pub use error::AnsibleError;
pub use types::{AnsibleResult, Host};
pub use inventory::Inventory;
pub use modules::{ModuleInvocation, builtin};
pub use playbook::{Playbook, Task};
pub use config::{AnsibleConfig, TargetHost};
pub use command::{AnsibleBuilder, Invocation};
pub use runner::{LocalTempStore, ProcessRunner, TempFileGuard, TempStore, TokioProcessRunner};
pub use executor::Ansible;

// 便捷的重新导出
pub type Result<T> = std::result::Result<T, AnsibleError>;
