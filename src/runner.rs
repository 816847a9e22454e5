use crate::command::Invocation;
use crate::error::AnsibleError;
use crate::types::AnsibleResult;
use crate::utils::generate_temp_path;
use async_trait::async_trait;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// 启动外部进程并收集退出码、stdout、stderr
#[async_trait]
pub trait ProcessRunner: Send + Sync {
    async fn run(&self, invocation: &Invocation) -> Result<AnsibleResult, AnsibleError>;
}

/// 基于 tokio::process 的默认实现，继承当前进程的环境变量
#[derive(Debug, Default, Clone)]
pub struct TokioProcessRunner;

#[async_trait]
impl ProcessRunner for TokioProcessRunner {
    async fn run(&self, invocation: &Invocation) -> Result<AnsibleResult, AnsibleError> {
        let output = tokio::process::Command::new(&invocation.program)
            .args(&invocation.args)
            .envs(invocation.env.iter().map(|(k, v)| (k.as_str(), v.as_str())))
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| AnsibleError::SpawnError {
                program: invocation.program.clone(),
                message: e.to_string(),
            })?;

        // 被信号终止时没有退出码
        let exit_code = output.status.code().unwrap_or(-1);

        Ok(AnsibleResult {
            exit_code,
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        })
    }
}

/// 临时 inventory / playbook 文件的存放位置
pub trait TempStore: Send + Sync {
    /// 创建一个新的唯一文件并写入内容，返回其路径
    fn create(&self, prefix: &str, extension: &str, contents: &str) -> Result<PathBuf, AnsibleError>;

    /// 在已知路径上重新写入内容
    fn write(&self, path: &Path, contents: &str) -> Result<(), AnsibleError>;

    fn remove(&self, path: &Path) -> std::io::Result<()>;
}

#[derive(Debug, Clone)]
pub struct LocalTempStore {
    dir: PathBuf,
}

impl Default for LocalTempStore {
    fn default() -> Self {
        Self {
            dir: std::env::temp_dir(),
        }
    }
}

impl LocalTempStore {
    pub fn new<P: Into<PathBuf>>(dir: P) -> Self {
        Self { dir: dir.into() }
    }
}

impl TempStore for LocalTempStore {
    fn create(&self, prefix: &str, extension: &str, contents: &str) -> Result<PathBuf, AnsibleError> {
        let path = generate_temp_path(&self.dir, prefix, extension);

        let mut file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .map_err(|e| {
                AnsibleError::FileOperationError(format!(
                    "Failed to create temporary file {}: {}",
                    path.display(),
                    e
                ))
            })?;
        fill_new_file(&path, &mut file, contents)?;

        Ok(path)
    }

    fn write(&self, path: &Path, contents: &str) -> Result<(), AnsibleError> {
        std::fs::write(path, contents).map_err(|e| {
            AnsibleError::FileOperationError(format!(
                "Failed to write temporary file {}: {}",
                path.display(),
                e
            ))
        })
    }

    fn remove(&self, path: &Path) -> std::io::Result<()> {
        match std::fs::remove_file(path) {
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            other => other,
        }
    }
}

/// 向刚创建的文件写入内容，写入失败时删除这个不完整的文件
fn fill_new_file<W: Write>(path: &Path, writer: &mut W, contents: &str) -> Result<(), AnsibleError> {
    writer
        .write_all(contents.as_bytes())
        .and_then(|_| writer.flush())
        .map_err(|e| {
            let _ = std::fs::remove_file(path);
            AnsibleError::FileOperationError(format!(
                "Failed to write temporary file {}: {}",
                path.display(),
                e
            ))
        })
}

/// 离开作用域时删除临时文件，删除失败只记录日志
pub struct TempFileGuard<'a, S: TempStore + ?Sized> {
    store: &'a S,
    path: PathBuf,
}

impl<'a, S: TempStore + ?Sized> TempFileGuard<'a, S> {
    pub fn create(store: &'a S, prefix: &str, extension: &str, contents: &str) -> Result<Self, AnsibleError> {
        let path = store.create(prefix, extension, contents)?;
        debug!("Created temporary file {}:\n{}", path.display(), contents);
        Ok(Self { store, path })
    }

    /// 接管一个已经存在的文件
    pub fn adopt(store: &'a S, path: PathBuf) -> Self {
        Self { store, path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl<S: TempStore + ?Sized> Drop for TempFileGuard<'_, S> {
    fn drop(&mut self) {
        if let Err(e) = self.store.remove(&self.path) {
            warn!("Failed to remove temporary file {}: {}", self.path.display(), e);
        }
    }
}
