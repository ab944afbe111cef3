//! Agents command - list agent identifiers and persisted metrics

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use crate::{
    agents::{AgentKind, Policy},
    app::App,
    cli::output::{print_kv, print_section, print_subsection},
};

#[derive(Parser, Debug)]
#[command(about = "List agent identifiers and persisted metrics")]
pub struct AgentsArgs {
    /// Agent state file (overrides the configured path)
    #[arg(long)]
    pub state: Option<PathBuf>,
}

pub fn execute(args: AgentsArgs, app: &App) -> Result<()> {
    print_section("Agents");
    for kind in AgentKind::ALL {
        let name = match kind.alias() {
            Some(alias) => format!("{kind} ({alias})"),
            None => kind.to_string(),
        };
        print_kv(&name, kind.description());
    }

    let app = match args.state {
        Some(path) => App::with_config(app.config().clone().with_state_path(path)),
        None => App::with_config(app.config().clone()),
    };
    let roster = app.load_roster();
    if roster.is_empty() {
        println!(
            "\nNo persisted agents in {}",
            app.config().state_path.display()
        );
        return Ok(());
    }

    for (slot, agent) in roster.iter() {
        print_subsection(&format!("{slot} [{}]", agent.kind()));
        print_kv("IQ", &format!("{:.2}", agent.iq()));
        for (name, value) in agent.metrics() {
            print_kv(name, &format!("{value:.2}"));
        }
        let mood = agent.core().mood;
        print_kv("Difficulty", &format!("{:.2}", mood.difficulty));
        print_kv("Frustration", &format!("{:.2}", mood.frustration));
        print_kv("Sentiment", &agent.sentiment().to_string());
        print_kv("Experiences", &agent.core().experiences.to_string());
        print_kv(
            "Average rally",
            &format!("{:.1} ticks", agent.core().rallies.average()),
        );
    }
    Ok(())
}
