//! apigen — generate API documentation from Doxygen XML.
//!
//! Reads the Doxygen compound XML for a C++ package namespace, regroups the
//! documented members by source subdirectory, and emits:
//!
//! - one Sphinx RST page per subdirectory (`api_gen_<subdir>.rst`)
//! - one SWIG docstring interface stub per subdirectory (`docstrings.i`)
//! - one mock Python module so docs build without the compiled backend

mod group;
mod model;
mod parser;
mod paths;
mod render;

use anyhow::{Context, Result};
use clap::Parser;
use model::Namespace;
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;
use thiserror::Error;

/// The Doxygen XML directory is absent and `--allow-empty-xml` was not given.
#[derive(Debug, Error)]
#[error("missing doxygen XML directory: {}", .0.display())]
struct MissingInputError(PathBuf);

#[derive(Parser)]
#[command(
    name = "apigen",
    about = "Generate RST pages, SWIG docstring stubs and mock Python modules from Doxygen XML"
)]
struct Cli {
    /// Directory containing the Doxygen compound XML files
    #[arg(long, default_value = "doxygen/xml")]
    xml_dir: PathBuf,

    /// Output directory for the generated RST pages
    #[arg(short = 'o', long, default_value = "generated_rst_files")]
    output: PathBuf,

    /// Package name: the documented namespace and the anchor directory in
    /// header paths
    #[arg(long, default_value = "dolfin")]
    package: String,

    /// Package source root, enumerated with --allow-empty-xml to pre-create
    /// per-subdirectory groups
    #[arg(long, default_value = "../dolfin")]
    package_dir: PathBuf,

    /// Root directory for the SWIG interface stubs
    #[arg(long, default_value = "../dolfin/swig")]
    stub_dir: PathBuf,

    /// File name of the per-subdirectory interface stub
    #[arg(long, default_value = "docstrings.i")]
    stub_file: String,

    /// File whose contents are prepended to every interface stub
    #[arg(long)]
    stub_header: Option<PathBuf>,

    /// Directory containing one binding-module descriptor per module
    #[arg(long, default_value = "../dolfin/swig/modules")]
    module_root: PathBuf,

    /// Path of the generated mock Python module
    #[arg(long, default_value = "mock_cpp_modules.py")]
    mock_output: PathBuf,

    /// Suppress SWIG interface-stub emission
    #[arg(long)]
    no_swig: bool,

    /// Suppress mock Python module emission
    #[arg(long)]
    no_mock: bool,

    /// Tolerate a missing XML directory: proceed with an empty namespace and
    /// pre-create empty groups for every subdirectory of the package root
    #[arg(long)]
    allow_empty_xml: bool,
}

/// Pipeline configuration — every recognized option, resolved from the CLI.
struct Config {
    xml_dir: PathBuf,
    output_dir: PathBuf,
    package: String,
    package_dir: PathBuf,
    /// `None` disables interface-stub emission.
    stub_dir: Option<PathBuf>,
    stub_filename: String,
    stub_header: String,
    module_root: PathBuf,
    /// `None` disables mock emission.
    mock_output: Option<PathBuf>,
    allow_empty_xml: bool,
}

impl Config {
    fn from_cli(cli: Cli) -> Result<Config> {
        let stub_header = match &cli.stub_header {
            Some(path) => fs::read_to_string(path)
                .with_context(|| format!("failed to read stub header: {}", path.display()))?,
            None => String::new(),
        };
        Ok(Config {
            xml_dir: cli.xml_dir,
            output_dir: cli.output,
            package: cli.package,
            package_dir: cli.package_dir,
            stub_dir: (!cli.no_swig).then_some(cli.stub_dir),
            stub_filename: cli.stub_file,
            stub_header,
            module_root: cli.module_root,
            mock_output: (!cli.no_mock).then_some(cli.mock_output),
            allow_empty_xml: cli.allow_empty_xml,
        })
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::from_cli(cli)?;
    run(&config)
}

/// Full pipeline: parse → group → emit.
fn run(config: &Config) -> Result<()> {
    // Missing-XML policy is decided here, not in the parser.
    let mut create_missing_groups = false;
    let mut namespaces: BTreeMap<String, Namespace> = if config.xml_dir.is_dir() {
        parser::read_xml_dir(&config.xml_dir, &[config.package.as_str()])?
    } else if config.allow_empty_xml {
        create_missing_groups = true;
        let mut map = BTreeMap::new();
        map.insert(config.package.clone(), Namespace::new(&config.package));
        map
    } else {
        return Err(MissingInputError(config.xml_dir.clone()).into());
    };

    let namespace = namespaces
        .remove(&config.package)
        .unwrap_or_else(|| Namespace::new(&config.package));

    // BTreeMap iteration already yields qualified-name order.
    let members: Vec<model::Member> = namespace.members.into_values().collect();

    let mut groups = group::group_members(&members, &config.package)?;
    if create_missing_groups {
        group::ensure_subdir_groups(&mut groups, &config.package_dir)?;
    }

    for (subdir, kinds) in &groups {
        let rst_path = render::rst::write_rst(subdir, kinds, &config.output_dir, &config.package)?;
        println!("Generating {}", rst_path.display());

        if let Some(ref stub_dir) = config.stub_dir {
            let stub_path = render::swig::write_stub(
                subdir,
                kinds,
                stub_dir,
                &config.stub_filename,
                &config.stub_header,
            )?;
            println!("Generating {}", stub_path.display());
        }
    }

    if let Some(ref mock_output) = config.mock_output {
        println!("Generating {}", mock_output.display());
        render::mock::write_mock(
            &members,
            &config.module_root,
            mock_output,
            &config.package,
            &config.package,
        )?;
    }

    Ok(())
}
