// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

mod config;
mod logging;
mod runtime;

use anyhow::{Context, Result, anyhow};
use config::Config;
use logging::LogTarget;
use propdash_app::DashboardState;
use runtime::{DemoRuntime, HttpRuntime};
use std::env;
use std::path::PathBuf;
use tracing::info;

fn main() {
    if let Err(error) = run() {
        eprintln!("{error:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let options = parse_cli_args(env::args().skip(1), Config::default_path()?)?;
    if options.show_help {
        print_help();
        return Ok(());
    }

    if options.print_config_path {
        println!("{}", options.config_path.display());
        return Ok(());
    }

    if options.print_example {
        print!("{}", Config::example_config(&options.config_path));
        return Ok(());
    }

    let config = Config::load(&options.config_path).with_context(|| {
        format!(
            "load config {}; run `propdash --print-example-config` to generate a template",
            options.config_path.display()
        )
    })?;

    let log_target = if options.check_only {
        LogTarget::Stderr
    } else {
        LogTarget::File(logging::default_log_path()?)
    };
    logging::init(&log_target)?;

    let filter = config.query_filter(options.suburb.as_deref(), options.state.as_deref());
    let mut state = DashboardState::default();

    if options.demo {
        if options.check_only {
            return Ok(());
        }
        info!("starting with demo data");
        let mut runtime = DemoRuntime::new(filter);
        return propdash_tui::run_app(&mut state, &mut runtime);
    }

    let base_url = config.api_base_url(options.api_base.as_deref());
    let client = propdash_api::Client::new(&base_url, config.api_timeout()?)
        .with_context(|| {
            format!(
                "invalid [api] settings in {}; fix base_url/timeout or pass --api-base",
                options.config_path.display()
            )
        })?
        .with_filter(filter);

    if options.check_only {
        client.health().context("backend health check failed")?;
        info!(base_url = client.base_url(), "backend is healthy");
        return Ok(());
    }

    info!(
        base_url = client.base_url(),
        timeout_ms = client.timeout().as_millis() as u64,
        "starting dashboard"
    );
    let mut runtime = HttpRuntime::new(client);
    propdash_tui::run_app(&mut state, &mut runtime)
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct CliOptions {
    config_path: PathBuf,
    api_base: Option<String>,
    suburb: Option<String>,
    state: Option<String>,
    print_config_path: bool,
    print_example: bool,
    demo: bool,
    check_only: bool,
    show_help: bool,
}

fn parse_cli_args<I, S>(args: I, default_config_path: PathBuf) -> Result<CliOptions>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut options = CliOptions {
        config_path: default_config_path,
        api_base: None,
        suburb: None,
        state: None,
        print_config_path: false,
        print_example: false,
        demo: false,
        check_only: false,
        show_help: false,
    };

    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        match arg.as_ref() {
            "--config" => {
                let value = iter
                    .next()
                    .ok_or_else(|| anyhow!("--config requires a file path"))?;
                options.config_path = PathBuf::from(value.as_ref());
            }
            "--api-base" => {
                let value = iter
                    .next()
                    .ok_or_else(|| anyhow!("--api-base requires a URL"))?;
                options.api_base = Some(value.as_ref().to_owned());
            }
            "--suburb" => {
                let value = iter
                    .next()
                    .ok_or_else(|| anyhow!("--suburb requires a suburb name"))?;
                options.suburb = Some(value.as_ref().to_owned());
            }
            "--state" => {
                let value = iter
                    .next()
                    .ok_or_else(|| anyhow!("--state requires a state code such as VIC"))?;
                options.state = Some(value.as_ref().to_owned());
            }
            "--print-config-path" => {
                options.print_config_path = true;
            }
            "--print-example-config" => {
                options.print_example = true;
            }
            "--demo" => {
                options.demo = true;
            }
            "--check" => {
                options.check_only = true;
            }
            "--help" | "-h" => {
                options.show_help = true;
            }
            unknown => {
                return Err(anyhow!(
                    "unknown argument {unknown:?}; run with --help to see supported options"
                ));
            }
        }
    }

    Ok(options)
}

fn print_help() {
    println!("propdash: Australian property micro-dashboard");
    println!("  --config <path>          Use a specific config path");
    println!("  --print-config-path      Print resolved config path");
    println!("  --print-example-config   Print a config template");
    println!("  --api-base <url>         Backend base URL (default http://localhost:8000)");
    println!("  --suburb <name>          Only show listings in this suburb");
    println!("  --state <code>           Only show listings in this state");
    println!("  --demo                   Launch with built-in sample listings (no network)");
    println!("  --check                  Validate config and probe the backend health endpoint");
    println!("  --help                   Show this help");
}

#[cfg(test)]
mod tests {
    use super::{CliOptions, parse_cli_args};
    use anyhow::Result;
    use std::path::PathBuf;

    fn default_options_path() -> PathBuf {
        PathBuf::from("/tmp/propdash-config.toml")
    }

    #[test]
    fn parse_cli_args_defaults_to_provided_config_path() -> Result<()> {
        let options = parse_cli_args(Vec::<String>::new(), default_options_path())?;
        assert_eq!(
            options,
            CliOptions {
                config_path: default_options_path(),
                api_base: None,
                suburb: None,
                state: None,
                print_config_path: false,
                print_example: false,
                demo: false,
                check_only: false,
                show_help: false,
            }
        );
        Ok(())
    }

    #[test]
    fn parse_cli_args_sets_config_path_override() -> Result<()> {
        let options = parse_cli_args(
            vec!["--config", "/custom/config.toml"],
            default_options_path(),
        )?;
        assert_eq!(options.config_path, PathBuf::from("/custom/config.toml"));
        Ok(())
    }

    #[test]
    fn parse_cli_args_reads_backend_and_filter_values() -> Result<()> {
        let options = parse_cli_args(
            vec![
                "--api-base",
                "http://10.0.0.5:8000",
                "--suburb",
                "Sandy Bay",
                "--state",
                "TAS",
            ],
            default_options_path(),
        )?;
        assert_eq!(options.api_base.as_deref(), Some("http://10.0.0.5:8000"));
        assert_eq!(options.suburb.as_deref(), Some("Sandy Bay"));
        assert_eq!(options.state.as_deref(), Some("TAS"));
        Ok(())
    }

    #[test]
    fn parse_cli_args_errors_for_missing_values() {
        for (flag, expected) in [
            ("--config", "--config requires a file path"),
            ("--api-base", "--api-base requires a URL"),
            ("--suburb", "--suburb requires"),
            ("--state", "--state requires"),
        ] {
            let error = parse_cli_args(vec![flag], default_options_path())
                .expect_err("missing value should fail");
            assert!(error.to_string().contains(expected), "{flag}: {error}");
        }
    }

    #[test]
    fn parse_cli_args_errors_for_unknown_argument() {
        let error = parse_cli_args(vec!["--wat"], default_options_path())
            .expect_err("unknown arg should fail");
        let message = error.to_string();
        assert!(message.contains("unknown argument"));
        assert!(message.contains("--help"));
    }

    #[test]
    fn parse_cli_args_sets_print_demo_and_check_flags() -> Result<()> {
        let options = parse_cli_args(
            vec!["--print-config-path", "--print-example-config", "--demo", "--check"],
            default_options_path(),
        )?;
        assert!(options.print_config_path);
        assert!(options.print_example);
        assert!(options.demo);
        assert!(options.check_only);
        assert!(!options.show_help);
        Ok(())
    }

    #[test]
    fn parse_cli_args_sets_help_flag_for_long_and_short_variants() -> Result<()> {
        let long = parse_cli_args(vec!["--help"], default_options_path())?;
        assert!(long.show_help);

        let short = parse_cli_args(vec!["-h"], default_options_path())?;
        assert!(short.show_help);
        Ok(())
    }
}
