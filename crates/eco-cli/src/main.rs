//! EcoReward CLI
//!
//! 回收奖励系统的命令行入口点。

use clap::Parser;
use eco_cli::cli::{Cli, CommandRunner, Commands, UserCommands};
use eco_shared::config::AppConfig;
use eco_shared::observability;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load("eco-reward")?;
    // 命令行参数优先于配置文件
    if let Some(level) = &cli.log_level {
        config.observability.log_level = level.clone();
    }
    observability::init(&config.service_name, &config.observability)?;

    let mut runner = CommandRunner::open(&config, cli.data_file)?;

    let output = match cli.command {
        Commands::User { command } => match command {
            UserCommands::Add { name } => runner.run_user_add(&name)?,
            UserCommands::List => runner.run_user_list(cli.json)?,
            UserCommands::Show { id } => runner.run_user_show(&id, cli.json)?,
        },
        Commands::Bins => runner.run_bins(cli.json)?,
        Commands::Rates => runner.run_rates(cli.json)?,
        Commands::Deposit {
            user,
            bin,
            material,
            weight,
        } => runner.run_deposit(&user, &bin, material.as_deref(), weight, cli.json)?,
    };

    println!("{output}");
    Ok(())
}
