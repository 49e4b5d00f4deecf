use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use coilcad_config::{AppConfig, ConfigError, ExportFormat};
use coilcad_frontend::{FrontendError, ParameterArgs, RunOutcome, RunRequest};

/// 换热器盘管参数化出图：生成俯视、集管侧、主视、回弯侧四视图及尺寸、技术要求与标题栏。
#[derive(Debug, Parser)]
#[command(name = "coilcad", version)]
struct Cli {
    /// 配置文件路径，缺省时依次尝试 `COILCAD_CONFIG` 与 `./config/default.toml`
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// 导出格式：dxf、svg 或 json
    #[arg(long, value_name = "FORMAT")]
    format: Option<ExportFormat>,
    /// 输出文件路径，缺省为 `<输出目录>/<图名>.<扩展名>`
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,
    /// 只校验参数并打印概要，不写文件
    #[arg(long)]
    check: bool,
    #[command(flatten)]
    params: ParameterArgs,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // 先初始化日志，再报告配置加载失败。
    let (config, config_error) = match load_configuration(cli.config.clone()) {
        Ok(config) => (config, None),
        Err(err) => (AppConfig::default(), Some(err)),
    };
    init_logging(&config);
    if let Some(err) = config_error {
        report_config_error(cli.config.is_some(), &err);
    }
    info!("启动 coilcad");

    let request = RunRequest {
        params: cli.params.to_parameters(),
        format: cli.format,
        output: cli.output,
        check_only: cli.check,
    };

    match coilcad_frontend::run(&request, &config) {
        Ok(RunOutcome::Checked) => {
            println!("参数校验通过");
            ExitCode::SUCCESS
        }
        Ok(RunOutcome::Exported { path, format }) => {
            println!("已导出 {format}：{}", path.display());
            ExitCode::SUCCESS
        }
        Err(FrontendError::InvalidParameters { issues }) => {
            eprintln!("参数校验失败：");
            for issue in &issues {
                eprintln!("  - {issue}");
            }
            ExitCode::FAILURE
        }
        Err(err) => {
            error!(error = %err, "出图失败");
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn load_configuration(override_path: Option<PathBuf>) -> Result<AppConfig, ConfigError> {
    match override_path {
        Some(path) => AppConfig::from_file(path),
        None => AppConfig::discover(),
    }
}

fn report_config_error(explicit: bool, err: &ConfigError) {
    match err {
        ConfigError::Io { path, .. } | ConfigError::Parse { path, .. } if explicit => {
            warn!(path = %path.display(), error = %err, "加载指定配置失败，使用默认配置");
        }
        ConfigError::Io { path, .. } | ConfigError::Parse { path, .. } => {
            warn!(path = %path.display(), error = %err, "加载默认配置失败，使用内建默认值");
        }
        ConfigError::Context { .. } => {
            warn!(error = %err, "加载默认配置失败，使用内建默认值");
        }
    }
}

fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_new(config.logging.level.clone()).unwrap_or_else(|_| EnvFilter::new("info"));
    // 日志写入 stderr，stdout 只留给概要输出。
    let subscriber = fmt().with_env_filter(filter).with_writer(std::io::stderr);
    if subscriber.try_init().is_err() {
        // 已初始化，忽略
    }
}
