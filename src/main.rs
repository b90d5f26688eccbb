use clap::Parser;
use env_logger::Env;
use std::process;

use rtti_extract::{
    cli::{Cli, USAGE_EXIT_CODE},
    handler::handle_extract,
};

/// 程序的主入口点
///
/// 解析命令行参数并初始化日志，然后把提取工作交给 `handle_extract`。
/// 参数错误时打印用法并以退出码 1 结束。
fn main() -> anyhow::Result<()> {
    let cli = Cli::try_parse().unwrap_or_else(|err| {
        // --help / --version 也会走到这里，它们不算错误
        let code = if err.use_stderr() { USAGE_EXIT_CODE } else { 0 };
        let _ = err.print();
        process::exit(code);
    });

    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_level)).init();

    handle_extract(cli.extract)?;
    Ok(())
}
