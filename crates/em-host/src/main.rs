use std::process::ExitCode;

use em_host::{logging, run_once, SubmitConfig, Verdict};
use tracing::{error, info};

fn main() -> ExitCode {
    logging::init_cli();

    let config = SubmitConfig::default();
    info!(n = config.n, reference = ?config.reference, "starting");

    match run_once(&config) {
        Ok(report) => match report.verdict {
            Verdict::Match => {
                info!("whole operation completed, product verified");
                ExitCode::SUCCESS
            }
            Verdict::Mismatch(m) => {
                error!(row = m.row, col = m.col, "product differs from reference");
                ExitCode::FAILURE
            }
        },
        Err(e) => {
            error!(error = %e, "fatal");
            ExitCode::FAILURE
        }
    }
}
