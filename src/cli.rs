use std::time::Duration;

use clap::Parser;
use log::info;
use musiclist::{
    Browser, BrowserState, ConfigBuilder, PrimaryContext, SurfaceKind,
    browser::DEFAULT_VISIBLE,
    clients::errors::Result,
    presentation::{Cell, Surface},
};
use tokio::io::{AsyncBufReadExt, BufReader};

#[derive(Parser)]
#[command(name = "musiclist")]
#[command(version, about = "Search the iTunes catalog for music tracks", long_about = None)]
struct Cli {
    /// Term for the song list loaded at startup
    #[arg(long)]
    term: Option<String>,

    /// Available width in points used to size grid cells
    #[arg(long, default_value_t = 390.0)]
    width: f32,

    /// Grid columns
    #[arg(long)]
    columns: Option<u16>,

    /// Space between grid cells
    #[arg(long)]
    spacing: Option<f32>,

    /// Rows or cells whose artwork is loaded
    #[arg(long, default_value_t = DEFAULT_VISIBLE)]
    visible: usize,

    /// Seconds before a search or artwork request is abandoned
    #[arg(long)]
    timeout: Option<u64>,
}

enum Turn {
    Line(Option<String>),
    Applied,
}

pub async fn run() -> Result<()> {
    let cli = Cli::parse();

    info!("Building config ...");
    let mut builder = ConfigBuilder::new().visible(cli.visible);
    if let Some(term) = cli.term {
        builder = builder.default_term(term);
    }
    if let Some(columns) = cli.columns {
        builder = builder.columns(columns);
    }
    if let Some(spacing) = cli.spacing {
        builder = builder.spacing(spacing);
    }
    if let Some(secs) = cli.timeout {
        builder = builder.timeout(Duration::from_secs(secs));
    }
    let config = builder.build()?;

    let mut context = PrimaryContext::new(config.state());
    let browser = Browser::new(config.search, config.artwork, context.handle());
    browser.start(context.state_mut(), &config.default_term);

    println!("Type a search term and press enter. An empty line quits.");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let turn = tokio::select! {
            line = lines.next_line() => Turn::Line(line?),
            _ = context.run_next() => Turn::Applied,
        };

        if let Turn::Line(line) = turn {
            match line.as_deref().map(str::trim) {
                Some(term) if !term.is_empty() => {
                    browser.search(context.state_mut(), SurfaceKind::Grid, term);
                }
                _ => break,
            }
        }

        if context.state_mut().take_dirty() {
            render(context.state(), cli.width);
        }
    }
    Ok(())
}

fn render(state: &BrowserState, width: f32) {
    render_list(&state.list);
    if state.grid.records().term().is_some() {
        render_grid(&state.grid, width);
    }
}

fn render_list(surface: &Surface) {
    let records = surface.records();
    println!(
        "\n== Songs {:?} ({} rows, {}pt each) ==",
        records.term().unwrap_or_default(),
        records.count(),
        surface.layout().row_height(0.0)
    );
    if records.is_empty() {
        print_empty_state(surface);
        return;
    }
    for (row, record) in records.records().iter().enumerate() {
        println!(
            "{:>3}. {} - {} | {} | {} {}",
            row + 1,
            record.song_name.as_deref().unwrap_or("?"),
            record.artist_name.as_deref().unwrap_or("?"),
            record.album_name.as_deref().unwrap_or("?"),
            record.release_date.as_deref().unwrap_or(""),
            artwork_status(surface.cells(), row),
        );
    }
}

fn render_grid(surface: &Surface, width: f32) {
    let records = surface.records();
    let layout = surface.layout();
    println!(
        "\n== Search {:?} ({} results, {}pt cells) ==",
        records.term().unwrap_or_default(),
        records.count(),
        layout.cell_width(width)
    );
    if records.is_empty() {
        print_empty_state(surface);
        return;
    }
    let columns = usize::from(layout.columns());
    for (start, line) in records.records().chunks(columns).enumerate() {
        let cells: Vec<String> = line
            .iter()
            .enumerate()
            .map(|(offset, record)| {
                format!(
                    "{} {}",
                    artwork_status(surface.cells(), start * columns + offset),
                    record.song_name.as_deref().unwrap_or("?")
                )
            })
            .collect();
        println!("  {}", cells.join("  |  "));
    }
}

fn print_empty_state(surface: &Surface) {
    match surface.records().last_error() {
        Some(error) => println!("  no results: {error}"),
        None => println!("  no results"),
    }
}

fn artwork_status(cells: &[Cell], row: usize) -> String {
    match cells.iter().find(|cell| cell.row() == Some(row)) {
        Some(cell) => match (cell.artwork.image(), cell.artwork.url()) {
            (Some(image), _) => format!("[art {}x{}]", image.width(), image.height()),
            (None, Some(_)) => "[art ...]".to_string(),
            (None, None) => "[no art]".to_string(),
        },
        None => String::new(),
    }
}
