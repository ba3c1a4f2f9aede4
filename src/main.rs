mod app;
mod calculator;
mod config;
mod theme;
mod ui;

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use app::App;
use calculator::{format_money, BillInputs};
use config::AppConfig;

#[derive(Parser, Debug)]
#[command(name = "gratuity")]
#[command(version)]
#[command(about = "Split a bill with tax and tip, in the terminal")]
struct Args {
    /// Bill amount before tax and tip (prints the result and exits)
    #[arg(short, long)]
    base: Option<String>,

    /// Tax rate in percent
    #[arg(short = 'x', long)]
    tax: Option<String>,

    /// Tip rate in percent, clamped to the configured range
    #[arg(short, long)]
    tip: Option<f64>,

    /// Number of people, clamped to the configured range
    #[arg(short, long)]
    split: Option<f64>,

    /// Print the one-shot result as JSON
    #[arg(short, long)]
    json: bool,

    /// Config file to use instead of the default
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl Args {
    fn is_one_shot(&self) -> bool {
        self.base.is_some()
            || self.tax.is_some()
            || self.tip.is_some()
            || self.split.is_some()
            || self.json
    }
}

fn main() -> Result<()> {
    // Initialize logging (silent unless RUST_LOG is set)
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let config = AppConfig::load(args.config.as_deref());

    if args.is_one_shot() {
        tracing::info!("Computing one-shot split");
        return print_split(&args, &config);
    }

    tracing::info!("Starting gratuity TUI");
    run_tui(&config)
}

fn print_split(args: &Args, config: &AppConfig) -> Result<()> {
    println!("{}", render_split(args, config)?);
    Ok(())
}

/// Compute once from CLI flags, applying the same ranges as the sliders
fn render_split(args: &Args, config: &AppConfig) -> Result<String> {
    let tip = config.tip.clamp(args.tip.unwrap_or(config.tip.default as f64));
    let split = config.split.clamp(args.split.unwrap_or(config.split.default as f64));

    let breakdown = calculator::compute(&BillInputs {
        base_text: args.base.as_deref().unwrap_or(""),
        tax_text: args.tax.as_deref().unwrap_or(""),
        tip_percent: tip,
        split_count: split,
    });

    if args.json {
        let output = serde_json::json!({
            "tip_percent": breakdown.tip_percent,
            "split": breakdown.split_count,
            "per_person": format_money(breakdown.per_person),
            "total": format_money(breakdown.total),
            "breakdown": breakdown,
        });
        Ok(serde_json::to_string(&output)?)
    } else {
        Ok([
            breakdown.tip_label(),
            breakdown.split_label(),
            breakdown.per_person_label(),
            breakdown.total_label(),
        ]
        .join("\n"))
    }
}

fn run_tui(config: &AppConfig) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(config);

    // Main loop
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        if event::poll(std::time::Duration::from_millis(250))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    match key.code {
                        KeyCode::Char('q') if app.accepts_quit() => return Ok(()),
                        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                            return Ok(())
                        }
                        _ => app.handle_key(key),
                    }
                }
            }
        }

        // Clear expired status messages
        app.tick();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_select_one_shot_mode() {
        let args = Args::parse_from(["gratuity", "--base", "100", "--tip", "18"]);
        assert!(args.is_one_shot());
        assert_eq!(args.base.as_deref(), Some("100"));

        let args = Args::parse_from(["gratuity"]);
        assert!(!args.is_one_shot());
    }

    #[test]
    fn test_one_shot_clamps_like_sliders() {
        let config = AppConfig::default();
        let args = Args::parse_from(["gratuity", "-b", "40", "-x", "abc", "-t", "2", "-s", "0"]);
        assert_eq!(config.tip.clamp(args.tip.unwrap()), 5.0);
        assert_eq!(config.split.clamp(args.split.unwrap()), 1.0);
        assert!(print_split(&args, &config).is_ok());
    }

    #[test]
    fn test_one_shot_prints_labels() {
        let config = AppConfig::default();
        let args = Args::parse_from(["gratuity", "-b", "40", "-x", "abc", "-t", "5", "-s", "1"]);
        let output = render_split(&args, &config).unwrap();
        assert_eq!(output, "Tip: 5%\nSplit: 1\nPer Person: $42.00\nTotal: $42.00");
    }

    #[test]
    fn test_one_shot_json() {
        let config = AppConfig::default();
        let args = Args::parse_from([
            "gratuity", "--base", "75.50", "--tax", "5", "--tip", "25", "--split", "5", "--json",
        ]);
        let output = render_split(&args, &config).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["total"], "$98.15");
        assert_eq!(value["per_person"], "$19.63");
        assert_eq!(value["tip_percent"], 25);
        assert_eq!(value["split"], 5);
    }
}
