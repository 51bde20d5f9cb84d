//! notefmt CLI - notes reformatting tool

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;

use notefmt::notes::{NoteService, OsaScriptStore, ToolResponse};
use notefmt::{
    CleanupPreset, ConvertOptions, ConverterRegistry, DialogueMode, DocumentConverter,
    HtmlStyle, JsonFormat, ParseOptions, RenderOptions, RenderResult, TimestampMode,
};

#[derive(Parser)]
#[command(name = "notefmt")]
#[command(version)]
#[command(about = "Reformat notes-app HTML, Markdown and AI dialogues", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Reformat notes-app HTML
    Html {
        /// Input file (stdin if not specified)
        #[arg(value_name = "FILE")]
        input: Option<PathBuf>,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output layout
        #[arg(long, value_enum, default_value = "detailed")]
        style: StyleArg,

        /// Text cleanup preset
        #[arg(long, value_enum)]
        cleanup: Option<CleanupLevel>,

        /// Leave the generation time out of the report
        #[arg(long)]
        no_timestamp: bool,

        /// Minimum characters for a plain paragraph
        #[arg(long)]
        min_paragraph: Option<usize>,

        /// Minimum characters for a block to be kept
        #[arg(long)]
        min_block: Option<usize>,

        /// Title and heading font thresholds in px
        #[arg(long, num_args = 2, value_names = ["TITLE", "HEADING"])]
        font_px: Option<Vec<f32>>,

        /// Block tags to scan, comma separated
        #[arg(long, value_delimiter = ',')]
        tags: Option<Vec<String>>,

        /// Extra monospace font family (repeatable)
        #[arg(long = "mono-font", value_name = "FAMILY")]
        mono_fonts: Vec<String>,

        /// Extra keyword marking a bold line as a subheading (repeatable)
        #[arg(long = "keyword", value_name = "WORD")]
        keywords: Vec<String>,

        /// Reject inputs larger than this many bytes
        #[arg(long)]
        max_bytes: Option<usize>,

        /// Treat short emoji-led lines as headings in either style
        #[arg(long)]
        emoji_headings: Option<bool>,

        /// Fail instead of passing unparseable markup through
        #[arg(long)]
        strict: bool,

        /// Print extraction statistics to stderr
        #[arg(long)]
        stats: bool,
    },

    /// Convert Markdown to spaced plain text
    #[command(alias = "md")]
    Markdown {
        /// Input file (stdin if not specified)
        #[arg(value_name = "FILE")]
        input: Option<PathBuf>,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Text cleanup preset
        #[arg(long, value_enum)]
        cleanup: Option<CleanupLevel>,

        /// Print extraction statistics to stderr
        #[arg(long)]
        stats: bool,
    },

    /// Convert an AI dialogue into a knowledge article
    Dialogue {
        /// Input file (stdin if not specified)
        #[arg(value_name = "FILE")]
        input: Option<PathBuf>,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Article template
        #[arg(long, value_enum, default_value = "dialogue")]
        mode: ModeArg,
    },

    /// Detect the input format and reformat it
    Auto {
        /// Input file (stdin if not specified)
        #[arg(value_name = "FILE")]
        input: Option<PathBuf>,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Leave the generation time out of the report
        #[arg(long)]
        no_timestamp: bool,
    },

    /// Show how HTML is scanned and classified as JSON
    Inspect {
        /// Input file (stdin if not specified)
        #[arg(value_name = "FILE")]
        input: Option<PathBuf>,

        /// Dump classified blocks instead of sections
        #[arg(long)]
        blocks: bool,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Work with notes through AppleScript
    Note {
        /// Directory holding the note scripts
        #[arg(long, env = "NOTEFMT_SCRIPTS", default_value = "applescripts")]
        scripts: PathBuf,

        #[command(subcommand)]
        action: NoteAction,
    },

    /// List available pipelines
    Pipelines,

    /// Show version information
    Version,
}

#[derive(Subcommand)]
enum NoteAction {
    /// Print a note's raw body
    Get {
        /// Note title
        title: String,

        /// Folder holding the note
        #[arg(short, long, default_value = "")]
        folder: String,
    },

    /// List note titles
    List {
        /// Folder to list (all notes if not specified)
        #[arg(short, long, default_value = "")]
        folder: String,
    },

    /// Reformat a note with a pipeline
    Format {
        /// Note title
        title: String,

        /// Folder holding the note
        #[arg(short, long, default_value = "")]
        folder: String,

        /// Pipeline name or alias
        #[arg(short, long, default_value = "html-detailed")]
        pipeline: String,
    },
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum CleanupLevel {
    /// Minimal cleanup (Unicode normalization only)
    Minimal,
    /// Standard cleanup (default)
    Standard,
    /// Aggressive cleanup (tight spacing)
    Aggressive,
}

impl From<CleanupLevel> for CleanupPreset {
    fn from(level: CleanupLevel) -> Self {
        match level {
            CleanupLevel::Minimal => CleanupPreset::Minimal,
            CleanupLevel::Standard => CleanupPreset::Standard,
            CleanupLevel::Aggressive => CleanupPreset::Aggressive,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum StyleArg {
    /// Box-framed knowledge-base report
    Detailed,
    /// Compact heading/list Markdown
    Simple,
}

impl From<StyleArg> for HtmlStyle {
    fn from(style: StyleArg) -> Self {
        match style {
            StyleArg::Detailed => HtmlStyle::Detailed,
            StyleArg::Simple => HtmlStyle::Simple,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum ModeArg {
    /// Turn-by-turn article
    Dialogue,
    /// Request outline template
    Simple,
}

impl From<ModeArg> for DialogueMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Dialogue => DialogueMode::Dialogue,
            ModeArg::Simple => DialogueMode::Simple,
        }
    }
}

type CmdResult = Result<(), Box<dyn std::error::Error>>;

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Html {
            input,
            output,
            style,
            cleanup,
            no_timestamp,
            min_paragraph,
            min_block,
            font_px,
            tags,
            mono_fonts,
            keywords,
            max_bytes,
            emoji_headings,
            strict,
            stats,
        } => {
            let mut parse = ParseOptions::new();
            if let Some(chars) = min_paragraph {
                parse = parse.with_min_paragraph_chars(chars);
            }
            if let Some(chars) = min_block {
                parse = parse.with_min_block_chars(chars);
            }
            if let Some([title, heading]) = font_px.as_deref() {
                parse = parse.with_font_thresholds(*title, *heading);
            }
            if let Some(tags) = tags {
                parse = parse.with_target_tags(tags);
            }
            for family in mono_fonts {
                parse = parse.with_monospace_family(family);
            }
            for keyword in keywords {
                parse = parse.with_subheading_keyword(keyword);
            }
            if let Some(bytes) = max_bytes {
                parse = parse.with_max_input_bytes(bytes);
            }

            let mut render = render_options(cleanup, no_timestamp);
            if let Some(enabled) = emoji_headings {
                render = render.with_emoji_headings(enabled);
            }
            cmd_html(
                input.as_deref(),
                output.as_deref(),
                style.into(),
                &parse,
                &render,
                strict,
                stats,
            )
        }
        Commands::Markdown {
            input,
            output,
            cleanup,
            stats,
        } => cmd_markdown(
            input.as_deref(),
            output.as_deref(),
            &render_options(cleanup, false),
            stats,
        ),
        Commands::Dialogue {
            input,
            output,
            mode,
        } => cmd_dialogue(input.as_deref(), output.as_deref(), mode.into()),
        Commands::Auto {
            input,
            output,
            no_timestamp,
        } => cmd_auto(input.as_deref(), output.as_deref(), no_timestamp),
        Commands::Inspect {
            input,
            blocks,
            compact,
        } => cmd_inspect(input.as_deref(), blocks, compact),
        Commands::Note { scripts, action } => cmd_note(&scripts, action),
        Commands::Pipelines => {
            cmd_pipelines();
            Ok(())
        }
        Commands::Version => {
            cmd_version();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn render_options(cleanup: Option<CleanupLevel>, no_timestamp: bool) -> RenderOptions {
    let mut options = RenderOptions::new();
    if let Some(level) = cleanup {
        options = options.with_cleanup_preset(level.into());
    }
    if no_timestamp {
        options = options.with_timestamp(TimestampMode::Omit);
    }
    options
}

fn read_input(input: Option<&Path>) -> io::Result<String> {
    match input {
        Some(path) if path != Path::new("-") => fs::read_to_string(path),
        _ => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            Ok(buffer)
        }
    }
}

fn write_output(text: &str, output: Option<&Path>) -> io::Result<()> {
    if let Some(path) = output {
        fs::write(path, text)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", text);
    }
    Ok(())
}

fn print_stats(result: &RenderResult) {
    let stats = &result.stats;
    eprintln!("{}", "Extraction Statistics".cyan().bold());
    eprintln!("{}", "─".repeat(40).dimmed());
    eprintln!("{}: {}", "Blocks".bold(), stats.block_count);
    eprintln!("{}: {}", "Sections".bold(), stats.section_count);
    eprintln!("{}: {}", "Headings".bold(), stats.heading_count);
    eprintln!("{}: {}", "List items".bold(), stats.list_item_count);
    eprintln!("{}: {}", "Code lines".bold(), stats.code_line_count);
    eprintln!("{}: {}", "Paragraphs".bold(), stats.paragraph_count);
    eprintln!("{}: {}", "Table rows".bold(), stats.table_row_count);
    eprintln!("{}: {}", "Words".bold(), stats.word_count);
    eprintln!("{}: {}", "Characters".bold(), stats.char_count);
    eprintln!("{}: {} bytes", "Output".bold(), result.content_len());
}

fn cmd_html(
    input: Option<&Path>,
    output: Option<&Path>,
    style: HtmlStyle,
    parse: &ParseOptions,
    render: &RenderOptions,
    strict: bool,
    stats: bool,
) -> CmdResult {
    let html = read_input(input)?;

    let text = if stats {
        let result = notefmt::render_html_with_stats(&html, style, parse, render)?;
        print_stats(&result);
        result.content
    } else if strict {
        notefmt::render_html(&html, style, parse, render)?
    } else {
        notefmt::classify_and_render_html_with_options(&html, style, parse, render)
    };

    write_output(&text, output)?;
    Ok(())
}

fn cmd_markdown(
    input: Option<&Path>,
    output: Option<&Path>,
    render: &RenderOptions,
    stats: bool,
) -> CmdResult {
    let markdown = read_input(input)?;

    let text = if stats {
        let result = notefmt::render::to_plaintext_surface_with_stats(&markdown, render)?;
        print_stats(&result);
        result.content
    } else {
        notefmt::transform_markdown_for_plaintext_surface_with_options(&markdown, render)
    };

    write_output(&text, output)?;
    Ok(())
}

fn cmd_dialogue(input: Option<&Path>, output: Option<&Path>, mode: DialogueMode) -> CmdResult {
    let text = read_input(input)?;
    let article = notefmt::convert_dialogue(&text, mode);
    write_output(&article, output)?;
    Ok(())
}

fn cmd_auto(input: Option<&Path>, output: Option<&Path>, no_timestamp: bool) -> CmdResult {
    let text = read_input(input)?;
    let format = notefmt::detect_format(&text);
    eprintln!("{} {}", "Detected".cyan(), format);

    let options = ConvertOptions::new().with_render_options(render_options(None, no_timestamp));
    let result = ConverterRegistry::with_defaults().convert_auto(&text, &options)?;
    write_output(&result.content, output)?;
    Ok(())
}

fn cmd_inspect(input: Option<&Path>, blocks: bool, compact: bool) -> CmdResult {
    let html = read_input(input)?;
    let parse = ParseOptions::new();
    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };

    let json = if blocks {
        let classified = notefmt::inspect_html(&html, &parse)?;
        notefmt::render::to_json(&classified, format)?
    } else {
        let doc = notefmt::parse_html(&html, HtmlStyle::Detailed, &parse, &RenderOptions::new())?;
        notefmt::render::to_json(&doc, format)?
    };

    println!("{}", json);
    Ok(())
}

fn cmd_note(scripts: &Path, action: NoteAction) -> CmdResult {
    let service = NoteService::new(OsaScriptStore::new(scripts));

    let response = match action {
        NoteAction::Get { title, folder } => service.note_content(&title, &folder),
        NoteAction::List { folder } => service.list_notes(&folder),
        NoteAction::Format {
            title,
            folder,
            pipeline,
        } => service.formatted_note(&title, &folder, &pipeline),
    };

    print_response(&response)
}

fn print_response(response: &ToolResponse) -> CmdResult {
    if !response.is_success() {
        return Err(response.message.clone().into());
    }

    eprintln!("{}", response.message.green());
    if let Some(data) = response.data.as_ref() {
        if let Some(content) = data.get("content").and_then(|c| c.as_str()) {
            println!("{}", content);
        } else if let Some(titles) = data.get("titles").and_then(|t| t.as_array()) {
            for title in titles.iter().filter_map(|t| t.as_str()) {
                println!("{}", title);
            }
        } else {
            println!("{}", serde_json::to_string_pretty(data)?);
        }
    }
    Ok(())
}

fn cmd_pipelines() {
    let registry = ConverterRegistry::with_defaults();
    println!("{}", "Pipelines".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    for converter in registry.converters() {
        let aliases = converter.aliases();
        if aliases.is_empty() {
            println!("{}: {}", converter.name().bold(), converter.description());
        } else {
            println!(
                "{} ({}): {}",
                converter.name().bold(),
                aliases.join(", ").dimmed(),
                converter.description()
            );
        }
    }
}

fn cmd_version() {
    println!("{} {}", "notefmt".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Notes reformatting tool");
    println!();
    println!("License: MIT");
}
