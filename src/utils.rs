use std::path::{Path, PathBuf};

/// 生成唯一的临时文件后缀
///
/// 使用纳秒级时间戳 + 随机数，确保多个执行器同时运行时不会产生文件名冲突。
pub fn generate_temp_suffix() -> String {
    let now = chrono::Utc::now();
    let timestamp = now.timestamp();
    let nanos = now.timestamp_subsec_nanos();
    let random_suffix: u32 = rand::random();

    format!("{}.{}.{}", timestamp, nanos, random_suffix)
}

/// 生成本地临时文件路径
///
/// # 示例
/// ```
/// let path = kable::utils::generate_temp_path(&std::env::temp_dir(), "inventory", "ini");
/// // 类似: "/tmp/inventory_1732492800.123456789.987654321.ini"
/// assert!(path.to_string_lossy().ends_with(".ini"));
/// ```
pub fn generate_temp_path(dir: &Path, prefix: &str, extension: &str) -> PathBuf {
    dir.join(format!("{}_{}.{}", prefix, generate_temp_suffix(), extension))
}
