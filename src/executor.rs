use crate::command::AnsibleBuilder;
use crate::config::AnsibleConfig;
use crate::error::AnsibleError;
use crate::runner::{LocalTempStore, ProcessRunner, TempFileGuard, TempStore, TokioProcessRunner};
use crate::types::AnsibleResult;
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// 执行器：持有不可变配置，以及注入的进程启动器和临时文件存储
///
/// `execute` 需要 `&mut self`，同一个执行器不能并发执行。
pub struct Ansible<R = TokioProcessRunner, S = LocalTempStore> {
    config: AnsibleConfig,
    runner: R,
    store: S,
    // 第一次执行时创建，之后的执行复用同一路径
    inventory_path: Option<PathBuf>,
}

impl Ansible {
    pub fn builder() -> AnsibleBuilder {
        AnsibleBuilder::new()
    }

    pub fn new(config: AnsibleConfig) -> Self {
        Self::with_backends(config, TokioProcessRunner, LocalTempStore::default())
    }
}

impl<R: ProcessRunner, S: TempStore> Ansible<R, S> {
    pub fn with_backends(config: AnsibleConfig, runner: R, store: S) -> Self {
        Self {
            config,
            runner,
            store,
            inventory_path: None,
        }
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    pub fn inventory_path(&self) -> Option<&PathBuf> {
        self.inventory_path.as_ref()
    }

    /// 写入临时文件，组装命令行，启动 ansible / ansible-playbook 并等待结束
    ///
    /// 非零退出码照常返回 `Ok`；只有进程无法启动、临时文件写入失败或超时才返回错误。
    /// 无论哪种情况，本次创建的临时文件都会在返回前删除。
    pub async fn execute(&mut self) -> Result<AnsibleResult, AnsibleError> {
        let inventory_file = self
            .prepare_inventory()?
            .map(|path| TempFileGuard::adopt(&self.store, path));

        let playbook_file = match &self.config.playbook {
            Some(playbook) => Some(TempFileGuard::create(
                &self.store,
                "playbook",
                "yaml",
                &playbook.to_yaml()?,
            )?),
            None => None,
        };

        let invocation = self.config.invocation(
            inventory_file.as_ref().map(|f| f.path()),
            playbook_file.as_ref().map(|f| f.path()),
        );
        debug!("Executing command: {}", invocation);

        let result = match self.config.timeout {
            Some(limit) => tokio::time::timeout(limit, self.runner.run(&invocation))
                .await
                .map_err(|_| {
                    warn!("Command '{}' timed out after {:?}", invocation.program, limit);
                    AnsibleError::TimedOut(limit.as_millis())
                })??,
            None => self.runner.run(&invocation).await?,
        };

        info!(
            "Command '{}' finished with exit code: {}",
            invocation.program, result.exit_code
        );

        Ok(result)
    }

    fn prepare_inventory(&mut self) -> Result<Option<PathBuf>, AnsibleError> {
        let Some(inventory) = &self.config.inventory else {
            return Ok(None);
        };
        let contents = inventory.to_file_contents();

        let path = match &self.inventory_path {
            Some(path) => {
                self.store.write(path, &contents)?;
                path.clone()
            }
            None => {
                let path = self.store.create("inventory", "ini", &contents)?;
                self.inventory_path = Some(path.clone());
                path
            }
        };

        debug!("Prepared inventory file {}:\n{}", path.display(), contents);
        Ok(Some(path))
    }
}
