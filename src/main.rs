use std::io::{self, BufRead, Write};

use llrb::command::{Command, Outcome};
use llrb::config::Config;
use llrb::{LLRBTree, TracingObserver};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Reads commands from standard input, one per line, and applies them to a
/// single tree. Every rebalancing step is reported through `tracing`.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env()?;

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.log_filter))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut tree = LLRBTree::with_observer(TracingObserver {
        track_slots: config.track_slots,
    });
    info!(seed = ?config.seed, track_slots = config.track_slots, "ready");

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    for line in stdin.lock().lines() {
        let line = line?;
        let command = match Command::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(err) => {
                warn!("{}", err);
                continue;
            }
        };

        let outcome = command.apply(&mut tree, &mut rng);
        writeln!(stdout, "{}", outcome)?;
        if outcome == Outcome::Quit {
            break;
        }
        if cfg!(debug_assertions) {
            tree.assert_correctness();
        }
        info!(len = tree.len(), black_height = tree.black_height(), "tree updated");
    }

    if !tree.is_empty() {
        match (tree.min(), tree.max()) {
            (Some(min), Some(max)) => info!(len = tree.len(), min, max, "final tree"),
            _ => error!("a non-empty tree has no extremes"),
        }
    }
    Ok(())
}
