// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{value_parser, Arg, ArgAction, Command};

fn json_args() -> [Arg; 2] {
    [
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print pretty JSON"),
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .conflicts_with("json")
            .help("Print one JSON object per line"),
    ]
}

fn as_of_arg() -> Arg {
    Arg::new("as-of")
        .long("as-of")
        .help("Reference date YYYY-MM-DD (default: today)")
}

fn id_arg() -> Arg {
    Arg::new("id")
        .long("id")
        .required(true)
        .value_parser(value_parser!(i64))
}

fn amount_arg(name: &'static str) -> Arg {
    Arg::new(name).long(name).allow_negative_numbers(true)
}

/// Filters shared by `tx list` and `export transactions`.
fn tx_filter_args() -> Vec<Arg> {
    vec![
        Arg::new("search")
            .long("search")
            .help("Match description or notes (case-insensitive)"),
        Arg::new("type")
            .long("type")
            .default_value("all")
            .help("all|income|expense"),
        Arg::new("category").long("category"),
        Arg::new("from").long("from").help("Earliest date YYYY-MM-DD"),
        Arg::new("to").long("to").help("Latest date YYYY-MM-DD"),
        Arg::new("sort")
            .long("sort")
            .default_value("newest")
            .help("newest|oldest|highest|lowest"),
        Arg::new("limit")
            .long("limit")
            .value_parser(value_parser!(usize)),
    ]
}

fn tx_cmd() -> Command {
    Command::new("tx")
        .about("Record and browse transactions")
        .subcommand(
            Command::new("add")
                .arg(Arg::new("date").long("date").required(true))
                .arg(Arg::new("description").long("description").short('d').required(true))
                .arg(amount_arg("amount").required(true).help("Negative for expenses"))
                .arg(Arg::new("category").long("category").required(true))
                .arg(Arg::new("payment-method").long("payment-method"))
                .arg(Arg::new("notes").long("notes")),
        )
        .subcommand(
            Command::new("edit")
                .arg(id_arg())
                .arg(Arg::new("date").long("date"))
                .arg(Arg::new("description").long("description").short('d'))
                .arg(amount_arg("amount"))
                .arg(Arg::new("category").long("category"))
                .arg(Arg::new("payment-method").long("payment-method"))
                .arg(Arg::new("notes").long("notes")),
        )
        .subcommand(Command::new("rm").arg(id_arg()))
        .subcommand(
            Command::new("list")
                .args(tx_filter_args())
                .args(json_args()),
        )
}

fn goal_cmd() -> Command {
    Command::new("goal")
        .about("Financial goals")
        .subcommand(
            Command::new("add")
                .arg(Arg::new("title").long("title").required(true))
                .arg(Arg::new("target").long("target").required(true))
                .arg(Arg::new("current").long("current").default_value("0"))
                .arg(
                    Arg::new("category")
                        .long("category")
                        .default_value("emergency_fund"),
                )
                .arg(Arg::new("deadline").long("deadline"))
                .arg(Arg::new("status").long("status").default_value("not_started"))
                .arg(Arg::new("notes").long("notes")),
        )
        .subcommand(
            Command::new("update")
                .arg(id_arg())
                .arg(Arg::new("title").long("title"))
                .arg(Arg::new("target").long("target"))
                .arg(Arg::new("current").long("current"))
                .arg(Arg::new("category").long("category"))
                .arg(Arg::new("deadline").long("deadline"))
                .arg(Arg::new("status").long("status"))
                .arg(Arg::new("notes").long("notes")),
        )
        .subcommand(Command::new("complete").arg(id_arg()))
        .subcommand(Command::new("rm").arg(id_arg()))
        .subcommand(
            Command::new("list")
                .arg(Arg::new("status").long("status"))
                .args(json_args()),
        )
        .subcommand(
            Command::new("top")
                .arg(
                    Arg::new("limit")
                        .long("limit")
                        .default_value("3")
                        .value_parser(value_parser!(usize)),
                )
                .arg(as_of_arg())
                .args(json_args()),
        )
}

fn insight_cmd() -> Command {
    Command::new("insight")
        .about("Financial insights and their status")
        .subcommand(
            Command::new("add")
                .arg(Arg::new("title").long("title").required(true))
                .arg(Arg::new("content").long("content").required(true))
                .arg(Arg::new("category").long("category").default_value("general"))
                .arg(Arg::new("priority").long("priority").default_value("medium"))
                .arg(Arg::new("date").long("date")),
        )
        .subcommand(
            Command::new("list")
                .arg(Arg::new("status").long("status"))
                .arg(Arg::new("category").long("category"))
                .arg(Arg::new("priority").long("priority"))
                .args(json_args()),
        )
        .subcommand(Command::new("implement").arg(id_arg()))
        .subcommand(Command::new("dismiss").arg(id_arg()))
        .subcommand(Command::new("rm").arg(id_arg()))
}

fn profile_cmd() -> Command {
    Command::new("profile")
        .about("Income, savings rate and budget settings")
        .subcommand(Command::new("show").args(json_args()))
        .subcommand(
            Command::new("set")
                .arg(Arg::new("income").long("income"))
                .arg(Arg::new("savings-rate").long("savings-rate"))
                .arg(Arg::new("currency").long("currency"))
                .arg(Arg::new("budget-type").long("budget-type").help("percentage|absolute"))
                .arg(Arg::new("literacy").long("literacy"))
                .arg(Arg::new("risk").long("risk")),
        )
        .subcommand(
            Command::new("allocate")
                .arg(Arg::new("category").long("category").required(true))
                .arg(Arg::new("value").long("value").required(true)),
        )
}

pub fn build_cli() -> Command {
    Command::new("finflow")
        .about("Budgets, transactions, goals and insights")
        .version(clap::crate_version!())
        .arg(
            Arg::new("db")
                .long("db")
                .global(true)
                .help("Database file (default: $FINFLOW_DB or the platform data dir)"),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .subcommand(Command::new("init").about("Create the database"))
        .subcommand(tx_cmd())
        .subcommand(goal_cmd())
        .subcommand(insight_cmd())
        .subcommand(profile_cmd())
        .subcommand(
            Command::new("budget")
                .about("Budget versus actual spending")
                .subcommand(Command::new("report").arg(as_of_arg()).args(json_args())),
        )
        .subcommand(
            Command::new("report")
                .about("Spending reports")
                .subcommand(
                    Command::new("spend-by-category")
                        .arg(
                            Arg::new("range")
                                .long("range")
                                .default_value("month")
                                .help("month|quarter|year"),
                        )
                        .arg(
                            Arg::new("category")
                                .long("category")
                                .help("List the transactions behind one category"),
                        )
                        .arg(as_of_arg())
                        .args(json_args()),
                )
                .subcommand(Command::new("overview").arg(as_of_arg()).args(json_args())),
        )
        .subcommand(
            Command::new("export")
                .about("Export data")
                .subcommand(
                    Command::new("transactions")
                        .arg(Arg::new("format").long("format").required(true))
                        .arg(Arg::new("out").long("out").required(true))
                        .args(tx_filter_args()),
                ),
        )
}
