use anyhow::Result;
use chrono::NaiveDate;
use clap::Parser;
use reqwest::Client;
use std::path::PathBuf;

use ofri::catalog::{self, Release, ReleaseFilter, SelectorSchema};
use ofri::download::download_release;
use ofri::http::HttpClient;
use ofri::install::{Installer, JavaRunner};
use ofri::mirror::resolve_download_url;
use ofri::runtime::RealRuntime;
use ofri::site::OptiFineSite;

/// ofri - OptiFine Release Installer
///
/// List, download and install OptiFine releases from the official download
/// site.
///
/// Examples:
///   ofri list --mc-version 1.19.2
///   ofri download --mc-version 1.19.2 --output ~/Downloads
///   ofri install --mc-version 1.19.2
#[derive(Parser, Debug)]
#[command(author, version = env!("OFRI_VERSION"), about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Download site base URL (defaults to https://optifine.net)
    #[arg(
        long = "base-url",
        env = "OFRI_BASE_URL",
        value_name = "URL",
        global = true
    )]
    pub base_url: Option<String>,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// List releases from the catalog
    List(ListArgs),

    /// Resolve the direct download URL of a release
    Url(FilterArgs),

    /// Download a release's jar
    Download(DownloadArgs),

    /// Download a release and run the installer on it
    Install(InstallArgs),
}

#[derive(clap::Args, Debug)]
struct ListArgs {
    #[command(flatten)]
    filter: FilterArgs,

    /// Print the releases as JSON
    #[arg(long)]
    json: bool,
}

#[derive(clap::Args, Debug)]
struct DownloadArgs {
    #[command(flatten)]
    filter: FilterArgs,

    /// Destination file or directory (defaults to the current directory)
    #[arg(long, short = 'o', value_name = "PATH")]
    output: Option<PathBuf>,
}

#[derive(clap::Args, Debug)]
struct InstallArgs {
    #[command(flatten)]
    filter: FilterArgs,

    /// Open the installer UI instead of installing silently
    #[arg(long)]
    interactive: bool,
}

#[derive(clap::Args, Debug)]
struct FilterArgs {
    /// Exact Minecraft version (e.g. 1.19.2)
    #[arg(long, value_name = "VERSION")]
    mc_version: Option<String>,

    /// Exact OptiFine version label (e.g. "OptiFine HD U H9")
    #[arg(long, value_name = "VERSION")]
    of_version: Option<String>,

    /// Exact Forge compatibility label
    #[arg(long, value_name = "VERSION")]
    forge_version: Option<String>,

    /// Exact file name (e.g. OptiFine_1.19.2_HD_U_H9.jar)
    #[arg(long, value_name = "FILE")]
    file: Option<String>,

    /// Exact publication date (e.g. 2022-11-05)
    #[arg(long, value_name = "DATE")]
    published: Option<NaiveDate>,
}

impl FilterArgs {
    fn to_filter(&self) -> Option<ReleaseFilter> {
        let filter = ReleaseFilter {
            optifine_version: self.of_version.clone(),
            file_name: self.file.clone(),
            forge_version: self.forge_version.clone(),
            minecraft_version: self.mc_version.clone(),
            published: self.published,
            changelog_url: None,
        };

        (filter != ReleaseFilter::default()).then_some(filter)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    let http_client = HttpClient::new(Client::new());
    let site = OptiFineSite::new(http_client.clone(), cli.base_url);
    let schema = SelectorSchema::v1();
    let runtime = RealRuntime;

    match cli.command {
        Commands::List(args) => {
            let filter = args.filter.to_filter();
            let releases = catalog::fetch_releases(&site, &schema, filter.as_ref()).await?;
            print_releases(&releases, args.json)?;
        }
        Commands::Url(args) => {
            let release = select_release(&site, &schema, &args).await?;
            let url = resolve_download_url(&site, &schema, &release.file_name).await?;
            println!("{}", url);
        }
        Commands::Download(args) => {
            let release = select_release(&site, &schema, &args.filter).await?;
            let path = download_release(
                &runtime,
                &site,
                &http_client,
                &schema,
                &release,
                args.output.as_deref(),
            )
            .await?;
            println!(" downloaded {} {}", release.file_name, path.display());
        }
        Commands::Install(args) => {
            let release = select_release(&site, &schema, &args.filter).await?;
            let installer =
                Installer::new(runtime, site, http_client, JavaRunner::new(), schema);
            if args.interactive {
                installer.run_installer(&release).await?;
            } else {
                installer.install(&release).await?;
            }
            println!("  installed {}", release.file_name);
        }
    }
    Ok(())
}

/// Picks the first catalog entry matching the filter; the site lists newest
/// releases first.
async fn select_release(
    site: &OptiFineSite,
    schema: &SelectorSchema,
    filter_args: &FilterArgs,
) -> Result<Release> {
    let filter = filter_args.to_filter();
    let releases = catalog::fetch_releases(site, schema, filter.as_ref()).await?;

    releases
        .into_iter()
        .next()
        .ok_or_else(|| anyhow::anyhow!("No release matches the given filter"))
}

fn print_releases(releases: &[Release], json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(releases)?);
        return Ok(());
    }

    if releases.is_empty() {
        println!("No matching releases.");
        return Ok(());
    }

    for release in releases {
        println!(
            "{}  mc {}  forge {}  {}  {}",
            release.optifine_version,
            release.minecraft_version,
            release.forge_version,
            release.published,
            release.file_name
        );
    }
    Ok(())
}
