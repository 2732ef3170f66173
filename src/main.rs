mod cargo;
mod checks;
mod commands;
mod core;
mod graph;
mod release;
mod ui;

#[cfg(test)]
mod testing;

use clap::{Parser, Subcommand};
use crate::core::error::{GateError, print_error};

/// Guarded releases: verify, tag, publish
#[derive(Parser)]
#[command(name = "cargo")]
#[command(bin_name = "cargo")]
#[command(styles = get_styles())]
enum CargoCli {
  Gate(GateCli),
}

#[derive(Parser)]
#[command(name = "gate")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
#[command(styles = get_styles())]
struct GateCli {
  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Show what a release would tag and publish (runs no commands)
  Plan {
    /// Output the plan in JSON format
    #[arg(long)]
    json: bool,
  },

  /// Run every release check without tagging or publishing
  Check {
    /// Output the report in JSON format
    #[arg(long)]
    json: bool,
  },

  /// Verify, tag and publish the current version
  Release {
    /// Output the report in JSON format (progress goes to stderr)
    #[arg(long)]
    json: bool,
    /// Publish one publication at a time
    #[arg(long)]
    sequential: bool,
  },
}

fn get_styles() -> clap::builder::Styles {
  clap::builder::Styles::styled()
    .usage(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .header(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .literal(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))))
    .invalid(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .error(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .valid(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))),
    )
    .placeholder(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::White))))
}

fn main() {
  let CargoCli::Gate(cli) = CargoCli::parse();

  let project_root = match std::env::current_dir() {
    Ok(dir) => dir,
    Err(e) => {
      eprintln!("Error: Failed to get current directory: {}", e);
      std::process::exit(1);
    }
  };

  let result = match cli.command {
    Commands::Plan { json } => commands::run_plan(&project_root, json),
    Commands::Check { json } => commands::run_check(&project_root, json),
    Commands::Release { json, sequential } => commands::run_release(&project_root, json, sequential),
  };

  if let Err(err) = result {
    handle_error(err);
  }
}

fn handle_error(err: GateError) -> ! {
  print_error(&err);
  std::process::exit(err.exit_code().as_i32());
}
