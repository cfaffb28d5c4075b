// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use finflow::goals::{rank, summarize, time_remaining, top_goals, ProgressTier};
use finflow::models::{FinancialGoal, GoalCategory, GoalStatus};
use finflow::{cli, commands::goals, db, store};
use rusqlite::Connection;
use rust_decimal::Decimal;

fn d(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn goal(id: i64, status: GoalStatus, current: &str, target: &str) -> FinancialGoal {
    FinancialGoal {
        id,
        title: format!("goal {}", id),
        category: GoalCategory::EmergencyFund,
        target_amount: d(target),
        current_amount: d(current),
        deadline: None,
        status,
        notes: None,
    }
}

#[test]
fn ranks_in_progress_first_then_by_completion() {
    let goals = vec![
        goal(1, GoalStatus::InProgress, "50", "100"),
        goal(2, GoalStatus::NotStarted, "80", "100"),
        goal(3, GoalStatus::InProgress, "90", "100"),
        goal(4, GoalStatus::Completed, "100", "100"),
    ];
    let ids: Vec<i64> = rank(&goals).iter().map(|g| g.id).collect();
    assert_eq!(ids, vec![3, 1, 2]);

    let ids: Vec<i64> = top_goals(&goals, 2).iter().map(|g| g.id).collect();
    assert_eq!(ids, vec![3, 1]);
}

#[test]
fn ties_keep_input_order() {
    let goals = vec![
        goal(7, GoalStatus::NotStarted, "0", "10"),
        goal(8, GoalStatus::NotStarted, "0", "20"),
    ];
    let ids: Vec<i64> = rank(&goals).iter().map(|g| g.id).collect();
    assert_eq!(ids, vec![7, 8]);
}

#[test]
fn zero_target_means_zero_progress() {
    let g = goal(1, GoalStatus::InProgress, "50", "0");
    assert_eq!(g.progress_percent(), Decimal::ZERO);
    assert_eq!(g.tier(), ProgressTier::Warning);
    assert_eq!(goal(2, GoalStatus::InProgress, "80", "100").tier(), ProgressTier::Success);
    assert_eq!(goal(3, GoalStatus::InProgress, "40", "100").tier(), ProgressTier::Primary);
}

#[test]
fn summary_totals() {
    let goals = vec![
        goal(1, GoalStatus::InProgress, "250", "1000"),
        goal(2, GoalStatus::Completed, "500", "500"),
    ];
    let s = summarize(&goals);
    assert_eq!(s.total_target, d("1500"));
    assert_eq!(s.total_current, d("750"));
    assert_eq!(s.overall_percent, d("50"));
    assert_eq!((s.in_progress, s.completed), (1, 1));
}

#[test]
fn time_remaining_labels() {
    let today = NaiveDate::from_ymd_opt(2026, 10, 17).unwrap();
    let later = |days: i64| Some(today + chrono::Duration::days(days));
    assert_eq!(time_remaining(None, today), "No deadline");
    assert_eq!(time_remaining(later(-1), today), "Overdue");
    assert_eq!(time_remaining(later(0), today), "Today");
    assert_eq!(time_remaining(later(1), today), "Tomorrow");
    assert_eq!(time_remaining(later(10), today), "10 days");
    assert_eq!(time_remaining(later(90), today), "3 months");
    assert_eq!(time_remaining(later(800), today), "2 years");
}

#[test]
fn add_and_complete_via_cli() {
    let conn = Connection::open_in_memory().unwrap();
    db::init_schema(&conn).unwrap();
    let matches = cli::build_cli().get_matches_from([
        "finflow", "goal", "add", "--title", "Rainy day", "--target", "1000", "--current", "100",
        "--status", "in_progress",
    ]);
    if let Some(("goal", sub)) = matches.subcommand() {
        goals::handle(&conn, sub).unwrap();
    } else {
        panic!("no goal subcommand");
    }
    let saved = store::list_goals(&conn).unwrap();
    assert_eq!(saved.len(), 1);
    assert_eq!(saved[0].progress_percent(), d("10"));

    store::set_goal_status(&conn, saved[0].id, GoalStatus::Completed).unwrap();
    let saved = store::list_goals(&conn).unwrap();
    assert!(rank(&saved).is_empty());
}

#[test]
fn invalid_goal_rejected_with_field_errors() {
    let conn = Connection::open_in_memory().unwrap();
    db::init_schema(&conn).unwrap();
    let matches = cli::build_cli().get_matches_from([
        "finflow", "goal", "add", "--title", " ", "--target", "abc",
    ]);
    let Some(("goal", sub)) = matches.subcommand() else {
        panic!("no goal subcommand");
    };
    let err = goals::handle(&conn, sub).unwrap_err();
    let err = err.downcast_ref::<finflow::Error>().unwrap();
    let fields: Vec<&str> = err.field_errors().iter().map(|f| f.field).collect();
    assert_eq!(fields, vec!["title", "target_amount"]);
    assert!(store::list_goals(&conn).unwrap().is_empty());
}

#[test]
fn zero_target_goals_rank_last_in_their_group() {
    let goals = vec![
        goal(1, GoalStatus::InProgress, "0", "0"),
        goal(2, GoalStatus::InProgress, "0", "100"),
    ];
    let ids: Vec<i64> = rank(&goals).iter().map(|g| g.id).collect();
    assert_eq!(ids, vec![2, 1]);

    let goals = vec![
        goal(3, GoalStatus::NotStarted, "5", "0"),
        goal(4, GoalStatus::NotStarted, "10", "100"),
        goal(5, GoalStatus::InProgress, "0", "0"),
    ];
    let ids: Vec<i64> = rank(&goals).iter().map(|g| g.id).collect();
    assert_eq!(ids, vec![5, 4, 3]);
}

#[test]
fn tier_boundaries() {
    assert_eq!(ProgressTier::for_percent(d("75")), ProgressTier::Success);
    assert_eq!(ProgressTier::for_percent(d("74.99")), ProgressTier::Primary);
    assert_eq!(ProgressTier::for_percent(d("40")), ProgressTier::Primary);
    assert_eq!(ProgressTier::for_percent(d("39.99")), ProgressTier::Warning);
}

#[test]
fn extreme_ratio_saturates_instead_of_panicking() {
    let valid = finflow::validate::goal(&finflow::validate::GoalInput {
        title: "Moonshot",
        target_amount: "0.0000000001",
        current_amount: "10000000000000000000",
    })
    .unwrap();
    let g = FinancialGoal {
        target_amount: valid.target_amount,
        current_amount: valid.current_amount,
        ..goal(1, GoalStatus::InProgress, "0", "1")
    };
    assert_eq!(g.progress_percent(), Decimal::MAX);
    assert_eq!(g.tier(), ProgressTier::Success);

    let goals = vec![g, goal(2, GoalStatus::InProgress, "1", "2")];
    let ids: Vec<i64> = rank(&goals).iter().map(|g| g.id).collect();
    assert_eq!(ids, vec![1, 2]);
    assert_eq!(summarize(&goals).overall_percent, d("100"));
}

#[test]
fn extreme_goal_renders_through_cli() {
    let conn = Connection::open_in_memory().unwrap();
    db::init_schema(&conn).unwrap();
    for argv in [
        vec![
            "finflow", "goal", "add", "--title", "Moonshot", "--target", "0.0000000001",
            "--current", "10000000000000000000", "--status", "in_progress",
        ],
        vec!["finflow", "goal", "list"],
        vec!["finflow", "goal", "top", "--as-of", "2026-10-17"],
        vec!["finflow", "report", "overview", "--as-of", "2026-10-17"],
    ] {
        let matches = cli::build_cli().get_matches_from(argv);
        match matches.subcommand() {
            Some(("goal", sub)) => goals::handle(&conn, sub).unwrap(),
            Some(("report", sub)) => finflow::commands::reports::handle(&conn, sub).unwrap(),
            _ => panic!("unexpected subcommand"),
        }
    }
}
