//! Shell command handlers.

use std::path::PathBuf;

use chrono::NaiveDate;
use spendwise_core::CoreError;
use spendwise_domain::Period;

use crate::cli::output;
use crate::cli::registry::{CommandEntry, CommandRegistry, CommandResult};
use crate::cli::render;
use crate::cli::shell_context::ShellContext;
use crate::config::DashboardRange;
use crate::errors::CommandError;
use crate::utils::build_info;

pub fn register_all(registry: &mut CommandRegistry) {
    registry.register(CommandEntry::new(
        "load",
        "Load a ledger snapshot JSON file",
        "load [path]",
        cmd_load,
    ));
    registry.register(
        CommandEntry::new(
            "dashboard",
            "Income, expenses, category spending and monthly trend",
            "dashboard [start end]",
            cmd_dashboard,
        )
        .with_aliases(&["dash"]),
    );
    registry.register(
        CommandEntry::new(
            "categories",
            "Expense totals per category",
            "categories [start end]",
            cmd_categories,
        )
        .with_aliases(&["cats"]),
    );
    registry.register(CommandEntry::new(
        "accounts",
        "Expense totals per account",
        "accounts [start end]",
        cmd_accounts,
    ));
    registry.register(CommandEntry::new(
        "trend",
        "Expense totals per month",
        "trend [start end]",
        cmd_trend,
    ));
    registry.register(CommandEntry::new(
        "budgets",
        "Budget progress and alerts",
        "budgets [reference] | budgets category <name> [reference]",
        cmd_budgets,
    ));
    registry.register(CommandEntry::new(
        "json",
        "Toggle JSON output for reports",
        "json on|off",
        cmd_json,
    ));
    registry.register(CommandEntry::new(
        "config",
        "Show or change preferences",
        "config [show] | config set <key> <value>",
        cmd_config,
    ));
    registry.register(CommandEntry::new(
        "version",
        "Show build information",
        "version",
        cmd_version,
    ));
    registry.register(
        CommandEntry::new("help", "List commands", "help [command]", cmd_help)
            .with_aliases(&["?"]),
    );
    registry.register(
        CommandEntry::new("exit", "Leave the shell", "exit", cmd_exit).with_aliases(&["quit"]),
    );
}

fn cmd_load(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let path = match args {
        [] => context.config.resolve_snapshot_path(),
        [path] => PathBuf::from(path),
        _ => return Err(usage("load [path]")),
    };
    context.load_snapshot(&path)
}

fn cmd_dashboard(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let today = context.today();
    let range = parse_range(args, context.config.dashboard_window(today))?;
    let report = context.reports()?.build_dashboard(range)?;
    if context.json_output {
        return context.emit_json(&report);
    }
    output::section(format!("Dashboard {range}"));
    println!("{}", render::dashboard(&report, &context.amount_formatter()));
    Ok(())
}

fn cmd_categories(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let today = context.today();
    let range = parse_range(args, context.config.report_window(today))?;
    let rows = context.reports()?.build_category_breakdown(range)?;
    if context.json_output {
        return context.emit_json(&rows);
    }
    output::section(format!("Spending by category {range}"));
    println!("{}", render::category_breakdown(&rows, &context.amount_formatter()));
    Ok(())
}

fn cmd_accounts(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let today = context.today();
    let range = parse_range(args, context.config.report_window(today))?;
    let rows = context.reports()?.build_account_breakdown(range)?;
    if context.json_output {
        return context.emit_json(&rows);
    }
    output::section(format!("Spending by account {range}"));
    println!("{}", render::account_breakdown(&rows, &context.amount_formatter()));
    Ok(())
}

fn cmd_trend(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let today = context.today();
    let range = parse_range(args, context.config.report_window(today))?;
    let rows = context.reports()?.build_monthly_trend(range)?;
    if context.json_output {
        return context.emit_json(&rows);
    }
    output::section(format!("Monthly trend {range}"));
    println!("{}", render::monthly_trend(&rows, &context.amount_formatter()));
    Ok(())
}

fn cmd_budgets(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    const USAGE: &str = "budgets [reference] | budgets category <name> [reference]";
    let (category, reference) = match args {
        [] => (None, context.today()),
        [reference] => (None, parse_date(reference)?),
        ["category", name] => (Some(*name), context.today()),
        ["category", name, reference] => (Some(*name), parse_date(reference)?),
        _ => return Err(usage(USAGE)),
    };

    let snapshot = context.snapshot()?;
    let reports = context.reports()?;
    let statuses = match category {
        Some(name) => {
            let category = snapshot
                .categories
                .iter()
                .find(|category| category.name.eq_ignore_ascii_case(name))
                .ok_or_else(|| {
                    CommandError::InvalidArguments(format!("unknown category `{name}`"))
                })?;
            reports.build_budget_statuses_for_category(category.id, reference)?
        }
        None => reports.build_budget_status_list(reference)?,
    };

    if context.json_output {
        return context.emit_json(&statuses);
    }
    output::section(format!("Budgets as of {reference}"));
    println!(
        "{}",
        render::budget_statuses(&statuses, snapshot, &context.amount_formatter())
    );
    let alerts = statuses
        .iter()
        .filter(|status| status.is_over_budget || status.is_near_limit)
        .count();
    if alerts > 0 {
        output::warning(format!("{alerts} budget(s) need attention."));
    }
    Ok(())
}

fn cmd_json(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    context.json_output = match args {
        ["on"] => true,
        ["off"] => false,
        _ => return Err(usage("json on|off")),
    };
    output::info(format!(
        "JSON output {}.",
        if context.json_output { "enabled" } else { "disabled" }
    ));
    Ok(())
}

fn cmd_config(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args {
        [] | ["show"] => {
            if context.json_output {
                return context.emit_json(&context.config);
            }
            let config = &context.config;
            output::section("Configuration");
            println!("currency          {}", config.currency);
            println!("locale            {}", config.locale);
            println!("color             {}", on_off(config.ui_color_enabled));
            println!("precision         {}", config.amount_precision);
            println!("dashboard_range   {}", config.dashboard_range);
            println!("lookback          {} months", config.report_lookback_months);
            println!(
                "snapshot          {}",
                config.resolve_snapshot_path().display()
            );
            Ok(())
        }
        ["set", key, value] => {
            apply_setting(context, key, value)?;
            context.persist_config()?;
            output::success(format!("Updated `{key}`."));
            Ok(())
        }
        _ => Err(usage("config [show] | config set <key> <value>")),
    }
}

fn apply_setting(context: &mut ShellContext, key: &str, value: &str) -> CommandResult {
    let config = &mut context.config;
    match key {
        "currency" => config.currency = value.to_ascii_uppercase(),
        "locale" => config.locale = value.to_string(),
        "color" => {
            config.ui_color_enabled = parse_switch(value)?;
            colored::control::set_override(config.ui_color_enabled);
        }
        "precision" => {
            config.amount_precision = value
                .parse::<u8>()
                .ok()
                .filter(|digits| *digits <= 8)
                .ok_or_else(|| invalid(format!("precision must be 0-8, got `{value}`")))?;
        }
        "dashboard_range" => config.dashboard_range = DashboardRange::from_str(value),
        "lookback" => {
            config.report_lookback_months = value
                .parse::<u32>()
                .ok()
                .filter(|months| *months > 0)
                .ok_or_else(|| invalid(format!("lookback must be a positive number, got `{value}`")))?;
        }
        "snapshot" => config.default_snapshot_path = Some(PathBuf::from(value)),
        other => return Err(invalid(format!("unknown setting `{other}`"))),
    }
    Ok(())
}

fn cmd_version(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let meta = build_info::current();
    output::info(format!("spendwise {}", meta.short()));
    output::info(format!(
        "built {} for {} ({}), {}",
        meta.timestamp, meta.target, meta.profile, meta.rustc
    ));
    Ok(())
}

fn cmd_help(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if let [name] = args {
        let entry = context
            .registry
            .find(name)
            .ok_or_else(|| invalid(format!("unknown command `{name}`")))?;
        output::info(format!("{}: {}", entry.name, entry.description));
        output::info(format!("usage: {}", entry.usage));
        return Ok(());
    }
    output::section("Available commands");
    for entry in context.registry.entries() {
        println!("  {:<12} {}", entry.name, entry.description);
    }
    println!("\nDates use YYYY-MM-DD. Ranges default to the configured windows.");
    Ok(())
}

fn cmd_exit(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    Err(CommandError::ExitRequested)
}

/// `[]` selects `default`; `[start, end]` is parsed and validated.
pub(crate) fn parse_range(
    args: &[&str],
    default: (NaiveDate, NaiveDate),
) -> Result<Period, CommandError> {
    let (start, end) = match args {
        [] => default,
        [start, end] => (parse_date(start)?, parse_date(end)?),
        _ => return Err(invalid("expected no arguments or `<start> <end>`")),
    };
    Period::new(start, end)
        .map_err(CoreError::from)
        .map_err(CommandError::from)
}

pub(crate) fn parse_date(input: &str) -> Result<NaiveDate, CommandError> {
    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .map_err(|_| invalid(format!("invalid date `{input}` (use YYYY-MM-DD)")))
}

fn parse_switch(value: &str) -> Result<bool, CommandError> {
    match value.to_ascii_lowercase().as_str() {
        "on" | "true" | "yes" => Ok(true),
        "off" | "false" | "no" => Ok(false),
        _ => Err(invalid(format!("expected on/off, got `{value}`"))),
    }
}

fn on_off(value: bool) -> &'static str {
    if value {
        "on"
    } else {
        "off"
    }
}

fn usage(usage: &str) -> CommandError {
    invalid(format!("usage: {usage}"))
}

fn invalid(message: impl Into<String>) -> CommandError {
    CommandError::InvalidArguments(message.into())
}
