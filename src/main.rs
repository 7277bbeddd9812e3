//! Provisions a segment table against an in-memory cluster and prints the
//! resulting schema.
//!
//! Usage:
//!   cube-htable --config kylin.properties --cube sales --segment 20240101_20240201 \
//!       --family F1 --family F2:hungry --split 0001 --split 0002

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use log::error;

use cube_htable::htable::{JarCoprocessorDeployer, MemoryCluster, TableProvisioner};
use cube_htable::{BuildInfo, ColumnFamilyMapping, CubeDesc, CubeInstance, ProvisionConfig, Segment};

#[derive(Parser, Debug)]
#[command(name = "cube-htable")]
#[command(about = "Provision the wide-column table backing a cube segment")]
#[command(version)]
struct Args {
    /// Properties file with provisioning defaults
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// File holding the commit hash and branch of this build
    #[arg(long)]
    commit_file: Option<PathBuf>,

    #[arg(long, default_value = "sample_cube")]
    cube: String,

    #[arg(long, default_value = "ADMIN")]
    owner: String,

    #[arg(short, long, default_value = "FULL_BUILD")]
    segment: String,

    /// Storage table name; derived from cube and segment when omitted
    #[arg(short, long)]
    table: Option<String>,

    /// Column family, `NAME` or `NAME:hungry`
    #[arg(short, long = "family", default_value = "F1")]
    families: Vec<String>,

    /// Region boundary row key
    #[arg(long = "split")]
    splits: Vec<String>,

    /// Treat the cluster as running with security enabled
    #[arg(long)]
    secure: bool,
}

fn parse_family(spec: &str) -> ColumnFamilyMapping {
    match spec.split_once(':') {
        Some((name, flag)) => ColumnFamilyMapping::new(name, flag.eq_ignore_ascii_case("hungry")),
        None => ColumnFamilyMapping::new(spec, false),
    }
}

fn main() -> ExitCode {
    env_logger::init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => match ProvisionConfig::from_path(path) {
            Ok(config) => config,
            Err(e) => {
                error!("failed to load {}: {}", path.display(), e);
                return ExitCode::FAILURE;
            }
        },
        None => ProvisionConfig::default(),
    };

    let build_info = match &args.commit_file {
        Some(path) => match BuildInfo::from_commit_file(path) {
            Ok(info) => info,
            Err(e) => {
                error!("failed to read {}: {}", path.display(), e);
                return ExitCode::FAILURE;
            }
        },
        None => BuildInfo::default(),
    };

    let cube = Arc::new(CubeInstance {
        name: args.cube.clone(),
        owner: args.owner.clone(),
        descriptor: CubeDesc {
            column_families: args.families.iter().map(|f| parse_family(f)).collect(),
        },
    });
    let table = args
        .table
        .clone()
        .unwrap_or_else(|| format!("KYLIN_{}_{}", args.cube, args.segment).to_uppercase());
    let segment = Segment::new(args.segment.clone(), table.clone(), cube);
    let split_keys: Vec<Vec<u8>> = args.splits.iter().map(|s| s.as_bytes().to_vec()).collect();

    let cluster = MemoryCluster::new().with_security(args.secure);
    let deployer = JarCoprocessorDeployer::from_config(&config);
    let provisioner = TableProvisioner::new(cluster.clone(), config)
        .with_deployer(deployer)
        .with_build_info(build_info);

    if let Err(e) = provisioner.create_table(&segment, &split_keys) {
        eprintln!("{}", e);
        return ExitCode::FAILURE;
    }

    if let Some(descriptor) = cluster.table(&table) {
        print!("{}", descriptor);
        println!("  regions: {}", split_keys.len() + 1);
    }
    ExitCode::SUCCESS
}
