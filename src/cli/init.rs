//! Init command - create the user config file

use crate::config::UserConfig;
use anyhow::Result;
use console::style;

pub fn run() -> Result<()> {
    let config_path = UserConfig::init_user_config()?;

    println!(
        "{} Config file at {}",
        style("✓").green(),
        style(config_path.display()).cyan()
    );
    println!("\nNext steps:");
    println!(
        "  {} Add your GitHub token to the config file (or set GITHUB_TOKEN)",
        style("1.").bold()
    );
    println!(
        "  {} Run {}",
        style("2.").bold(),
        style("platscore score <input.xlsx>").cyan()
    );

    Ok(())
}
