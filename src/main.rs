mod cli;
mod settings;
mod workflow;

use adwiz::logging;
use anyhow::Result;
use cli::{OutputFormat, parse_cli, print_json, print_plain};
use settings::ResolvedConfig;
use workflow::FormWorkflow;

fn main() -> Result<()> {
    let cli = parse_cli();

    if cli.list_themes {
        for name in adwiz::tui::theme::names() {
            println!("{name}");
        }
        return Ok(());
    }

    let resolved = settings::load(&cli)?;

    if cli.print_config {
        resolved.print_summary();
    }

    logging::initialize(&resolved.logging)?;

    run_form(cli.output, resolved)
}

/// Execute the form workflow and print output in the chosen format.
fn run_form(format: OutputFormat, settings: ResolvedConfig) -> Result<()> {
    let workflow = FormWorkflow::from_config(settings)?;
    let outcome = workflow.run()?;

    match format {
        OutputFormat::Plain => print_plain(&outcome),
        OutputFormat::Json => print_json(&outcome)?,
    }

    Ok(())
}
