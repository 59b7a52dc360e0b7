mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::auto_loan::AutoLoanArgs;
use commands::debt_payoff::DebtPayoffArgs;
use commands::investment::GrowthArgs;
use commands::mortgage::{AffordabilityArgs, MortgageArgs};

/// Personal finance calculators
#[derive(Parser)]
#[command(
    name = "pfc",
    version,
    about = "Personal finance calculators with decimal precision",
    long_about = "A CLI for personal finance calculations with decimal precision. \
                  Supports mortgage amortization with lump-sum prepayments, \
                  multi-debt payoff projections, auto loans, investment growth, \
                  and home affordability."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Mortgage payment, amortization schedule, and prepayment savings
    Mortgage(MortgageArgs),
    /// Debt payoff projection with and without an extra payment
    DebtPayoff(DebtPayoffArgs),
    /// Auto loan payment and total cost
    AutoLoan(AutoLoanArgs),
    /// Investment growth projection
    Growth(GrowthArgs),
    /// Maximum affordable home price from income and debts
    Affordability(AffordabilityArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    let cli = Cli::parse();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Mortgage(args) => commands::mortgage::run_mortgage(args),
        Commands::DebtPayoff(args) => commands::debt_payoff::run_debt_payoff(args),
        Commands::AutoLoan(args) => commands::auto_loan::run_auto_loan(args),
        Commands::Growth(args) => commands::investment::run_growth(args),
        Commands::Affordability(args) => commands::mortgage::run_affordability(args),
        Commands::Version => {
            println!("pfc {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
