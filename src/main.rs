use cidr_subnet_planner::input::read_plan_request;
use cidr_subnet_planner::models::PlanRequest;
use cidr_subnet_planner::output::{render, render_tree, subnets_to_csv, OutputFormat};
use cidr_subnet_planner::{
    calculate_subnet, collect_visible_subnets, generate_kubernetes_network_plan,
    get_deployment_tier_info, get_subnet_class, split_to_depth, CidrError, PlanError,
    PlannerConfig, SubnetInfo,
};
use clap::{Parser, Subcommand, ValueEnum};
use log::LevelFilter;
use log4rs::append::console::{ConsoleAppender, Target};
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;
use serde::Serialize;
use std::error::Error;
use std::path::{Path, PathBuf};

/// CIDR subnet calculator and Kubernetes network planner.
#[derive(Parser)]
#[command(name = "subnet-planner", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Calculate one CIDR block.
    Calc {
        cidr: String,
        #[arg(long, short, value_enum)]
        format: Option<CliFormat>,
    },
    /// Split a CIDR block into halves, `depth` levels deep.
    Split {
        cidr: String,
        #[arg(long, short, default_value_t = 1)]
        depth: usize,
        /// Only print the leaves of the split.
        #[arg(long)]
        leaves: bool,
        #[arg(long, short, value_enum)]
        format: Option<CliFormat>,
    },
    /// Generate a Kubernetes network plan.
    Plan {
        /// micro, standard, professional, enterprise or hyperscale.
        #[arg(long, short)]
        size: Option<String>,
        /// eks, gke, aks, kubernetes or k8s.
        #[arg(long, short)]
        provider: Option<String>,
        /// RFC 1918 VPC CIDR; a random one is drawn when omitted.
        #[arg(long)]
        vpc: Option<String>,
        #[arg(long, short)]
        name: Option<String>,
        /// JSON or YAML request file; flags override its fields.
        #[arg(long, short)]
        request: Option<PathBuf>,
        #[arg(long, short, value_enum)]
        format: Option<CliFormat>,
    },
    /// Show the deployment tier table.
    Tiers {
        name: Option<String>,
        #[arg(long, short, value_enum)]
        format: Option<CliFormat>,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum CliFormat {
    Json,
    Yaml,
    Csv,
    Tree,
}

#[derive(Serialize)]
struct CalcOutput<'a> {
    #[serde(flatten)]
    subnet: &'a SubnetInfo,
    class: String,
}

fn main() {
    // Do as little as possible in main.rs as it can't contain any tests
    dotenv::dotenv().ok();
    let config = PlannerConfig::from_env();
    init_logging(&config.log_config);
    log::info!("#Start main()");

    let cli = Cli::parse();
    if let Err(e) = run(cli.command, &config) {
        eprintln!("error [{}]: {e}", error_code(e.as_ref()));
        std::process::exit(1);
    }
}

fn init_logging(log_config: &str) {
    if Path::new(log_config).exists() {
        if let Err(e) = log4rs::init_file(log_config, Default::default()) {
            eprintln!("Error initializing log4rs from {log_config}: {e}");
        }
        return;
    }
    let stderr = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new("{d(%H:%M:%S)} {l} {t} - {m}{n}")))
        .build();
    let fallback = Config::builder()
        .appender(Appender::builder().build("stderr", Box::new(stderr)))
        .build(Root::builder().appender("stderr").build(LevelFilter::Warn));
    match fallback {
        Ok(fallback) => {
            log4rs::init_config(fallback).ok();
        }
        Err(e) => eprintln!("Error building fallback log config: {e}"),
    }
}

fn error_code(e: &(dyn Error + 'static)) -> &'static str {
    if let Some(e) = e.downcast_ref::<CidrError>() {
        e.code()
    } else if let Some(e) = e.downcast_ref::<PlanError>() {
        e.code()
    } else {
        "INVALID_REQUEST"
    }
}

fn structured(
    format: Option<CliFormat>,
    config: &PlannerConfig,
) -> Result<OutputFormat, Box<dyn Error>> {
    match format {
        None => Ok(config.output_format),
        Some(CliFormat::Json) => Ok(OutputFormat::Json),
        Some(CliFormat::Yaml) => Ok(OutputFormat::Yaml),
        Some(other) => Err(format!("format {other:?} is not available for this command").into()),
    }
}

fn run(command: Command, config: &PlannerConfig) -> Result<(), Box<dyn Error>> {
    match command {
        Command::Calc { cidr, format } => {
            let subnet = calculate_subnet(&cidr)?;
            if format == Some(CliFormat::Csv) {
                print!("{}", subnets_to_csv([&subnet]));
            } else {
                let out = CalcOutput {
                    subnet: &subnet,
                    class: get_subnet_class(&cidr)?.to_string(),
                };
                println!("{}", render(&out, structured(format, config)?)?);
            }
        }
        Command::Split {
            cidr,
            depth,
            leaves,
            format,
        } => {
            let mut root = calculate_subnet(&cidr)?;
            let mut tree_size = 1;
            split_to_depth(&mut root, depth, &mut tree_size)?;
            log::info!("split {cidr} depth={depth} => {tree_size} nodes");
            let visible = collect_visible_subnets(&root, leaves);
            match format {
                Some(CliFormat::Tree) => println!("{}", render_tree(&root)),
                Some(CliFormat::Csv) => print!("{}", subnets_to_csv(visible)),
                other => {
                    // Flat list: children are already part of the sequence.
                    let flat: Vec<SubnetInfo> = visible
                        .into_iter()
                        .map(|s| SubnetInfo {
                            children: None,
                            ..s.clone()
                        })
                        .collect();
                    println!("{}", render(&flat, structured(other, config)?)?);
                }
            }
        }
        Command::Plan {
            size,
            provider,
            vpc,
            name,
            request,
            format,
        } => {
            let mut req = match request {
                Some(path) => read_plan_request(&path)?,
                None => PlanRequest::default(),
            };
            if let Some(size) = size {
                req.deployment_size = size;
            }
            if req.deployment_size.is_empty() {
                return Err("missing deployment size: pass --size or a request file".into());
            }
            req.provider = provider.or(req.provider);
            req.vpc_cidr = vpc.or(req.vpc_cidr);
            req.deployment_name = name.or(req.deployment_name);

            let plan = generate_kubernetes_network_plan(&req, config)?;
            println!("{}", render(&plan, structured(format, config)?)?);
        }
        Command::Tiers { name, format } => {
            let info = get_deployment_tier_info(name.as_deref())?;
            println!("{}", render(&info, structured(format, config)?)?);
        }
    }
    Ok(())
}
