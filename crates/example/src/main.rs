//! Pareto contraction demo CLI.
//!
//! Enumerates the terminal graphs of the reference trade-off graph and writes
//! them to standard output.
//!
//! # Usage
//!
//! ```bash
//! pareto-demo
//! ```
//!
//! # Environment
//!
//! | Variable | Meaning |
//! |----------|---------|
//! | `PARETO_LOG` | `EnvFilter` directive, e.g. `pareto_graph=debug` |
//! | `PARETO_LOG_FORMAT` | `pretty`, `compact` or `json` |
//! | `PARETO_LOG_SPANS` | `1` to log span enter/exit (search depth) |
//! | `PARETO_MAX_TERMINALS` | Fail once more terminal graphs are found |
//! | `PARETO_MAX_FUSIONS` | Fail once more fusions are needed |
//!
//! A `.env` file in the working directory is loaded first.

use std::io::Write as _;

use example::{DemoConfig, reference_graph, render, run};
use pareto_graph::ParetoSearch;

fn main() {
    let _ = dotenvy::dotenv();

    let config = DemoConfig::from_env();
    config.tracing.init();
    config.report_warnings();

    let search = ParetoSearch::with_limits(config.limits);
    let terminals = match run(&reference_graph(), &search) {
        Ok(terminals) => terminals,
        Err(err) => {
            tracing::error!(error = %err, "contraction failed");
            std::process::exit(1);
        }
    };

    let mut stdout = std::io::stdout().lock();
    if let Err(err) = stdout.write_all(render(&terminals).as_bytes()) {
        tracing::error!(error = %err, "cannot write results");
        std::process::exit(1);
    }
}
