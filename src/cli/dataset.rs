use clap::Args;

use crate::catalog::hierarchy::HierarchyAudit;
use crate::catalog::store::RegionTable;
use crate::cli::OutputFormat;
use crate::config::AppConfig;
use crate::core::types::Tier;

#[derive(Args)]
pub struct DatasetArgs {
    /// Number of findings to list in text output
    #[arg(short = 'n', long, default_value = "20")]
    pub max_findings: usize,

    /// Exit with an error if any row breaks the code hierarchy
    #[arg(long)]
    pub strict: bool,
}

/// Load the dataset and report its tier counts and hierarchy findings
///
/// # Errors
///
/// Returns an error if the dataset cannot be loaded, or in strict mode if
/// the audit has findings.
pub fn run(args: DatasetArgs, config: AppConfig, format: OutputFormat) -> anyhow::Result<()> {
    let client = config.http_client()?;
    let rt = tokio::runtime::Runtime::new()?;
    let table = rt.block_on(RegionTable::load(&client, &config.dataset))?;
    let audit = table.audit();

    match format {
        OutputFormat::Text => print_text(&audit, &config, args.max_findings),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&audit)?),
    }

    if args.strict && !audit.is_clean() {
        anyhow::bail!("{} rows break the code hierarchy", audit.findings.len());
    }
    Ok(())
}

fn print_text(audit: &HierarchyAudit, config: &AppConfig, max_findings: usize) {
    println!("Dataset: {}", config.dataset);
    println!("Rows:    {}", audit.total_rows);
    for tier in Tier::ALL {
        println!("  {:<9} {}", tier.to_string(), audit.count(tier));
    }

    if audit.is_clean() {
        println!("Hierarchy: OK");
        return;
    }

    println!("Hierarchy: {} findings", audit.findings.len());
    for finding in audit.findings.iter().take(max_findings) {
        println!("  {:?}: {} {}", finding.violation, finding.code, finding.name);
    }
    if audit.findings.len() > max_findings {
        println!("  ... and {} more", audit.findings.len() - max_findings);
    }
}
