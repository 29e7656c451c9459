use clap::Parser;
use std::fs;
use std::str::FromStr;
use tagprune::application::{
    apply_changes, export_banned, import_into_config, init::init, preview_changes,
    read_banned_file, scan_tags, write_banned_file, CancelFlag, ConfigService, RewriteOptions,
    ScanOptions,
};
use tagprune::cli::{
    format_apply_report, format_preview_report, format_rule_list, format_scan_report,
    BannedCommand, Cli, Commands, RemovalArgs, RuleArgs,
};
use tagprune::domain::{BannedRules, MatchMode, RemovalSet, Selection};
use tagprune::error::TagpruneError;
use tagprune::infrastructure::{Config, FileSystemRepository, TagRepository};

fn main() {
    let cli = Cli::parse();

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();

    let result = run(cli);

    match result {
        Ok(_) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {}", e.display_with_suggestions());
            std::process::exit(e.exit_code());
        }
    }
}

fn run(cli: Cli) -> Result<(), TagpruneError> {
    match cli.command {
        Commands::Init {
            path,
            mode,
            min_count,
        } => {
            let match_mode = MatchMode::from_str(&mode).map_err(TagpruneError::Config)?;
            init(&path, match_mode, min_count)
        }
        Commands::Scan {
            root,
            min_count,
            rules,
            json,
        } => {
            let repo = FileSystemRepository::open(&root)?;
            let config = repo.load_config()?;
            let options = ScanOptions {
                min_count: min_count.unwrap_or(config.min_count),
                rules: build_rules(&config, &rules)?,
            };

            let report = scan_tags(&repo, &options, &mut |_| {}, &CancelFlag::new());
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print!("{}", format_scan_report(&report, &repo.root));
            }
            Ok(())
        }
        Commands::Preview {
            root,
            removal,
            limit,
            json,
        } => {
            let repo = FileSystemRepository::open(&root)?;
            let config = repo.load_config()?;
            let options = build_rewrite_options(&config, &removal)?;
            let limit = limit.unwrap_or(config.preview_limit);

            let report = preview_changes(&repo, &options, limit, &mut |_| {}, &CancelFlag::new());
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print!("{}", format_preview_report(&report, &repo.root));
            }
            Ok(())
        }
        Commands::Apply {
            root,
            removal,
            yes,
            json,
        } => {
            let repo = FileSystemRepository::open(&root)?;
            let config = repo.load_config()?;
            let options = build_rewrite_options(&config, &removal)?;

            if !yes {
                let report = preview_changes(
                    &repo,
                    &options,
                    config.preview_limit,
                    &mut |_| {},
                    &CancelFlag::new(),
                );
                if json {
                    println!("{}", serde_json::to_string_pretty(&report)?);
                } else {
                    print!("{}", format_preview_report(&report, &repo.root));
                    println!("Nothing written. Re-run with --yes to apply.");
                }
                return Ok(());
            }

            let report = apply_changes(&repo, &options, &mut |_| {}, &CancelFlag::new())?;
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print!("{}", format_apply_report(&report, &repo.root));
            }
            Ok(())
        }
        Commands::Banned { action } => run_banned(action),
        Commands::Config {
            root,
            key,
            value,
            list,
        } => {
            let repo = FileSystemRepository::open(&root)?;
            let service = ConfigService::new(repo);

            if list {
                let config = service.list()?;
                println!("min_count = {}", config.min_count);
                println!("match_mode = {}", config.match_mode);
                println!("case_insensitive = {}", config.case_insensitive);
                println!("sort_lines = {}", config.sort_lines);
                println!("preview_limit = {}", config.preview_limit);
                println!("banned = {:?}", config.banned);
                Ok(())
            } else if let Some(k) = key {
                if let Some(v) = value {
                    service.set(&k, &v)?;
                    println!("Set {} = {}", k, v);
                } else {
                    println!("{}", service.get(&k)?);
                }
                Ok(())
            } else {
                println!("Usage: tagprune config <ROOT> [--list | <key> [<value>]]");
                println!(
                    "Valid keys: min_count, match_mode, case_insensitive, sort_lines, preview_limit, banned"
                );
                Ok(())
            }
        }
    }
}

fn run_banned(action: BannedCommand) -> Result<(), TagpruneError> {
    match action {
        BannedCommand::Export {
            banned,
            banned_file,
            root,
            output,
        } => {
            let mut rules = Vec::new();
            if let Some(root) = root {
                let repo = FileSystemRepository::open(&root)?;
                rules.extend(repo.load_config()?.banned);
            }
            rules.extend(banned);
            if let Some(file) = banned_file {
                rules.extend(read_banned_file(&file)?);
            }

            match output {
                Some(path) => {
                    let count = write_banned_file(&path, &rules)?;
                    println!("Exported {} rule(s) to {}", count, path.display());
                }
                None => {
                    let text = export_banned(&rules);
                    if !text.is_empty() {
                        println!("{}", text);
                    }
                }
            }
            Ok(())
        }
        BannedCommand::Import { file, root, append } => {
            let rules = read_banned_file(&file)?;
            match root {
                Some(root) => {
                    let repo = FileSystemRepository::open(&root)?;
                    let stored = import_into_config(&repo, rules, append)?;
                    println!("Imported {} rule(s) into {}", stored, root.display());
                }
                None => print!("{}", format_rule_list(&rules)),
            }
            Ok(())
        }
        BannedCommand::List { root } => {
            let repo = FileSystemRepository::open(&root)?;
            let config = repo.load_config()?;
            print!("{}", format_rule_list(&config.banned));
            if config.banned.is_empty() {
                println!();
            }
            Ok(())
        }
    }
}

/// Config rules plus command-line rules; flags win over config settings
fn build_rules(config: &Config, args: &RuleArgs) -> Result<BannedRules, TagpruneError> {
    let mut rules = config.banned.clone();
    rules.extend(args.banned.iter().cloned());
    if let Some(file) = &args.banned_file {
        rules.extend(read_banned_file(file)?);
    }

    let mode = match &args.match_mode {
        Some(mode) => MatchMode::from_str(mode).map_err(TagpruneError::Config)?,
        None => config.effective_match_mode()?,
    };
    let case_insensitive = args.case_insensitive || config.case_insensitive;

    Ok(BannedRules::new(rules, mode, case_insensitive))
}

fn build_rewrite_options(
    config: &Config,
    args: &RemovalArgs,
) -> Result<RewriteOptions, TagpruneError> {
    let mut selection = Selection::from_specs(&args.remove)?;
    if let Some(file) = &args.selection {
        selection.extend(Selection::from_json(&fs::read_to_string(file)?)?);
    }

    Ok(RewriteOptions {
        removal: RemovalSet::new(selection, build_rules(config, &args.rules)?),
        sort_lines: args.sort || config.sort_lines,
    })
}
