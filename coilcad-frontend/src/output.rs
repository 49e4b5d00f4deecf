use std::env;
use std::path::{Path, PathBuf};

use coilcad_config::ExportFormat;

/// 覆盖配置中 `[export] output_dir` 的环境变量。
pub const OUTPUT_DIR_ENV: &str = "COILCAD_OUTPUT_DIR";

const FALLBACK_STEM: &str = "coil";

/// 把图名转换为可用作文件名的形式：`/` 变为 `-`，仅保留字母数字与 `-_.`。
///
/// `5/8"x1330FLx1400FHx6Rx35TPRx13FPIx35NC - LHS` → `5-8x1330FLx1400FHx6Rx35TPRx13FPIx35NC-LHS`
pub fn sanitize_title(title: &str) -> String {
    let stem: String = title
        .chars()
        .filter_map(|ch| match ch {
            '/' | '\\' => Some('-'),
            c if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.') => Some(c),
            _ => None,
        })
        .collect();
    let stem = stem.trim_matches('.');
    if stem.is_empty() {
        FALLBACK_STEM.to_string()
    } else {
        stem.to_string()
    }
}

/// 读取环境变量中的输出目录，空值视为未设置。
pub fn output_dir_from_env() -> Option<PathBuf> {
    env::var_os(OUTPUT_DIR_ENV)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}

/// 确定导出路径：显式路径优先；否则为 `<目录>/<图名>.<扩展名>`，
/// 目录取环境变量，其次取配置。
pub fn resolve_output_path(
    explicit: Option<&Path>,
    configured_dir: &Path,
    env_dir: Option<PathBuf>,
    title: &str,
    format: ExportFormat,
) -> PathBuf {
    if let Some(path) = explicit {
        return path.to_path_buf();
    }
    let dir = env_dir.unwrap_or_else(|| configured_dir.to_path_buf());
    dir.join(format!("{}.{}", sanitize_title(title), format.extension()))
}
