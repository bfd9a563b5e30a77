//! # quote-preview
//!
//! Computes a quote from a TOML request file and prints the result panel
//! and the submission message. Optionally verifies a client code and
//! submits the quote.
//!
//! ```text
//! quote-preview demos/quote-request.toml
//! quote-preview demos/quote-request.toml --client-code ACME01 --submit
//! ```

use clap::Parser;
use mps_core::{QuoteDisplay, QuoteRequest};
use mps_submit::{
    init_tracing, ClientRoster, HttpRoster, HttpTransport, QuoteSubmitter, SessionStore,
    SubmitConfig, SubmitError,
};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;

#[derive(Debug, Parser)]
#[command(name = "quote-preview", about = "Preview and submit an MPS lease quote")]
struct Args {
    /// Quote request file (TOML)
    request: PathBuf,

    /// Submit config file (defaults to the platform config dir)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Verify this client code against the roster first
    #[arg(long)]
    client_code: Option<String>,

    /// Deliver the quote after previewing it
    #[arg(long)]
    submit: bool,

    /// Debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("{}", message);
            ExitCode::FAILURE
        }
    }
}

/// Runs the preview; errors come back as the message to show the user.
async fn run(args: Args) -> Result<(), String> {
    let contents = std::fs::read_to_string(&args.request)
        .map_err(|e| format!("Cannot read {}: {}", args.request.display(), e))?;
    let request: QuoteRequest = toml::from_str(&contents)
        .map_err(|e| format!("Invalid quote request {}: {}", args.request.display(), e))?;

    let needs_config = args.submit || args.client_code.is_some();
    let config = if needs_config {
        Some(SubmitConfig::load(args.config.clone()).map_err(|e| describe(&e))?)
    } else {
        None
    };

    if let (Some(code), Some(config)) = (&args.client_code, &config) {
        let roster = HttpRoster::from_config(config).map_err(|e| describe(&e))?;
        let client = roster.verify(code).await.map_err(|e| {
            debug!(error = %e, "Roster lookup failed");
            e.user_message().to_string()
        })?;
        println!("Client code {} verified", client.code);
    }

    let quote = request.compute().map_err(|e| e.to_string())?;
    print_panel(&QuoteDisplay::from(&quote));
    println!();
    println!("{}", mps_core::format::submission_message(&quote));

    if let (true, Some(config)) = (args.submit, &config) {
        let transport = HttpTransport::from_config(config).map_err(|e| describe(&e))?;
        let submitter = QuoteSubmitter::new(transport, SessionStore::new(), config.recipient());

        let submission = submitter.submit(&quote).await.map_err(|e| describe(&e))?;
        let summary = submission
            .summary
            .to_json()
            .map_err(|e| describe(&SubmitError::from(e)))?;
        println!();
        println!("Quote sent successfully");
        println!("{}", summary);
    }

    Ok(())
}

/// User-facing text for a submit error; the detail only goes to the log.
fn describe(err: &SubmitError) -> String {
    debug!(error = %err, "Submit step failed");
    err.user_message()
}

fn print_panel(d: &QuoteDisplay) {
    let rows = [
        ("Devices (60 mo)", format!("{} = {}", d.device_calc, d.device_amount)),
        ("MPS", format!("{} = {}", d.mps_calc, d.mps_amount)),
        ("Revenue (60 mo)", d.revenue.clone()),
        ("CapEx", format!("{} = {}", d.capex_calc, d.capex_amount)),
        ("Cost per print", format!("{} = {}", d.cpp_calc, d.cpp_amount)),
        ("Net profit", d.profit.clone()),
        ("Margin", d.margin.clone()),
        ("Compliance score", format!("{} {}", d.score, d.verdict)),
        ("Monthly (ex VAT)", d.monthly_ex_vat.clone()),
        ("Monthly (incl VAT)", d.monthly_incl_vat.clone()),
    ];
    for (label, value) in rows {
        println!("{:<20} {}", label, value);
    }

    if let Some(ex) = &d.excess {
        println!();
        println!("Excess print (5 years)");
        println!("{:<20} {}", "Revenue", ex.revenue);
        println!("{:<20} {}", "Cost", ex.cost);
        println!("{:<20} {}", "Profit", ex.profit);
        println!("{:<20} {}", "Margin", ex.margin);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_hides_internal_detail() {
        let err = SubmitError::Connectivity(
            "error sending request for url (http://10.0.0.7/f/quotes)".to_string(),
        );
        let text = describe(&err);
        assert_eq!(text, "Failed to send. Check network connection.");
        assert!(!text.contains("10.0.0.7"));

        let text = describe(&SubmitError::InvalidConfig("timeout_secs must be > 0".to_string()));
        assert_eq!(text, "Quote delivery is not configured correctly.");
    }
}
