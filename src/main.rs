use clap::Parser;
use clipeditor_lib::bootstrap::{self, tracing::init_tracing_subscriber};
use clipeditor_lib::Cli;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // 配置先于日志加载: the log filter lives in the config file
    let app_config = bootstrap::resolve_app_config(cli.config.as_deref())?;
    if let Err(e) = init_tracing_subscriber(&app_config.log_filter) {
        eprintln!("Failed to initialize tracing: {e}");
    }

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    runtime.block_on(clipeditor_lib::run(cli, app_config))
}
