//! Notepreview - live markdown preview for notes.
//!
//! # Usage
//!
//! ```bash
//! notepreview note.md > note.html
//! notepreview --watch -o preview.html note.md
//! notepreview --mode structured --emit tree note.md
//! notepreview --create "Meeting notes.md"
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;

use notepreview::config::{
    ConfigFlags, clear_config_flags, global_config_path, load_config_flags, local_override_path,
    parse_flag_tokens, save_config_flags,
};
use notepreview::document::{NoteDocument, RenderMode};
use notepreview::note::Note;
use notepreview::perf;
use notepreview::preview::{FileSurface, LivePreview, MarkupSurface, PreviewSession, StdoutSurface};

/// What to print for the note.
#[derive(clap::ValueEnum, Debug, Default, Clone, Copy, PartialEq, Eq)]
enum Emit {
    /// Full HTML preview page
    #[default]
    Html,
    /// Parsed node tree as JSON
    Tree,
}

/// Live markdown preview for notes
#[derive(Parser, Debug)]
#[command(name = "notepreview", version, about, long_about = None)]
struct Cli {
    /// Note to render
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Write the page here instead of stdout
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Keep running and re-render whenever the note changes
    #[arg(short, long)]
    watch: bool,

    /// Rendering strategy
    #[arg(long, value_enum)]
    mode: Option<RenderMode>,

    /// Output format
    #[arg(long, value_enum, default_value = "html")]
    emit: Emit,

    /// Create FILE as a new note if it does not exist
    #[arg(long)]
    create: bool,

    /// Debounce for file change events, in milliseconds
    #[arg(long, value_name = "MS")]
    debounce: Option<u64>,

    /// Print render timings to stderr
    #[arg(long)]
    perf: bool,

    /// Write detailed render/watch debug events to a file
    #[arg(long, value_name = "PATH")]
    render_debug_log: Option<PathBuf>,

    /// Save current command-line flags as defaults
    #[arg(long)]
    save: bool,

    /// Clear saved defaults
    #[arg(long)]
    clear: bool,
}

fn open_note(path: &Path, create: bool) -> Result<Note> {
    if create && !path.exists() {
        let dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        return Note::create(dir, &name).context("Failed to create note");
    }
    Note::open(path).context("Failed to open note")
}

fn run_preview<S: MarkupSurface>(
    note: Note,
    surface: S,
    mode: RenderMode,
    watch: Option<Duration>,
) -> Result<()> {
    let path = note.path().to_path_buf();
    let session = PreviewSession::new(note.into_buffer(), surface).with_mode(mode);
    let mut live = LivePreview::new(session, path);
    {
        let _scope = perf::scope("startup.first_render");
        live.refresh()?;
    }
    let Some(debounce) = watch else {
        return Ok(());
    };
    live.start_watch(debounce)?;
    tracing::info!(path = %live.path().display(), "watching for changes");
    live.run()
}

fn emit_tree(note: &Note) -> Result<()> {
    let doc = NoteDocument::parse(&note.buffer().text());
    let json = serde_json::to_string_pretty(&doc).context("Failed to serialize node tree")?;
    println!("{json}");
    Ok(())
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let raw_args = std::env::args().collect::<Vec<_>>();
    let cli = Cli::parse();
    let global_path = global_config_path();
    let local_path = local_override_path();
    let cli_flags = parse_flag_tokens(&raw_args);

    if cli.clear {
        clear_config_flags(&global_path)?;
    }
    if cli.save {
        save_config_flags(&global_path, &cli_flags)?;
    }

    let file_flags = if cli.clear {
        ConfigFlags::default()
    } else {
        let global_flags = load_config_flags(&global_path)?;
        let local_flags = load_config_flags(&local_path)?;
        global_flags.union(&local_flags)
    };
    let effective = file_flags.union(&cli_flags);

    perf::set_enabled(effective.perf);
    let render_debug_log_path = effective
        .render_debug_log
        .clone()
        .or_else(|| std::env::var_os("NOTEPREVIEW_RENDER_DEBUG_LOG").map(PathBuf::from));
    if let Err(err) = perf::set_debug_log_path(render_debug_log_path.as_deref()) {
        let path = render_debug_log_path
            .as_ref()
            .map_or_else(|| "<unset>".to_string(), |p| p.display().to_string());
        tracing::warn!(%path, %err, "failed to initialize render debug log");
    }

    let note = open_note(&cli.file, cli.create)?;

    if cli.emit == Emit::Tree {
        if effective.watch {
            tracing::warn!("--watch is ignored with --emit tree");
        }
        return emit_tree(&note);
    }

    let mode = effective.mode.unwrap_or_default();
    let watch = effective
        .watch
        .then(|| Duration::from_millis(effective.debounce_ms()));

    let result = match cli.output {
        Some(path) => run_preview(note, FileSurface::new(path), mode, watch),
        None => run_preview(note, StdoutSurface, mode, watch),
    };
    result.context("Preview error")
}
