use anyhow::{Context, Result};
use clap::Parser;
use docsum::cli::Cli;
use docsum::utils::logging;
use docsum::{App, Config};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // 加载 .env.<DOCSUM_ENV> 和 .env
    load_dotenv();

    // 加载配置
    let base = Config::load(cli.config.as_deref()).context("加载配置失败")?;
    let config = cli.apply(base);

    // 初始化日志
    logging::init(config.verbose_logging);

    // 初始化并运行应用
    let app = App::initialize(config).context("初始化失败")?;
    app.run().await.context("运行失败")?;

    Ok(())
}

fn load_dotenv() {
    let env = std::env::var("DOCSUM_ENV").unwrap_or_else(|_| "development".to_string());
    dotenvy::from_filename(format!(".env.{}", env)).ok();
    dotenvy::dotenv().ok();
}
