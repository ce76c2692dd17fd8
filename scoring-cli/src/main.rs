/*!
A command-line filter utility for scoring a drawing of a character
against a font's rendering of it, or for rendering a reference glyph
alone.

```text
user@system:/path$ score -h
score
Score a handwriting drawing against a font glyph, or render a reference.

USAGE:
    score [OPTIONS] --character <CHARACTER> --font <FONT>

OPTIONS:
    -c, --character <CHARACTER>      the single character being scored or rendered
    -f, --font <FONT>                path to a .ttf or .otf font file
    -i, --image <IMAGE>              drawing to score [default: read from stdin]
        --render-only                skip scoring; just render the reference glyph
        --render-size <RENDER_SIZE>  pixel size for --render-only output [default: 128]
    -r, --reference-out <REFERENCE_OUT>
                                     where to write the (re-encoded) reference PNG
        --json                       print the result as JSON instead of text
    -h, --help                       Print help information
```

By default this reads a drawing PNG from stdin and a font from the path
given by `--font`, scores the drawing against the requested `--character`,
and prints a short summary to stdout.
*/
use std::fmt::{Debug, Display, Formatter};
use std::io::{Read, Write};

use clap::Parser;
use scoring_core::ScoreResult;
use serde::Serialize;

/// This is a hack to simplify error propagation and reporting.
///
/// All possible errors get cast to `ErrorShim`s, and then printed
/// semi-nicely for the user.
struct ErrorShim(String);

impl<D> From<D> for ErrorShim
where
    D: Display,
{
    fn from(d: D) -> Self {
        let s = format!("{}", &d);
        Self(s)
    }
}

impl Debug for ErrorShim {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "{}", &self.0)
    }
}

/// Struct used by clap to generate the CLI parsing code, and also to
/// hold the arguments passed from the command line.
#[derive(Parser, Debug)]
#[clap(
    name = "score",
    version,
    author,
    about = "Score a handwriting drawing against a font glyph, or render a reference."
)]
struct Args {
    /// the single character being scored or rendered
    #[clap(short, long)]
    character: char,

    /// path to a .ttf or .otf font file
    #[clap(short, long)]
    font: String,

    /// drawing to score [default: read from stdin]
    #[clap(short, long)]
    image: Option<String>,

    /// skip scoring; just render the reference glyph
    #[clap(long)]
    render_only: bool,

    /// pixel size for --render-only output
    #[clap(long, default_value = "128")]
    render_size: u32,

    /// where to write the (re-encoded) reference PNG
    #[clap(short = 'r', long)]
    reference_out: Option<String>,

    /// print the result as JSON instead of text
    #[clap(long)]
    json: bool,
}

#[derive(Serialize)]
struct JsonResult {
    score: u8,
    stars: u8,
    feedback: &'static str,
    coverage: u8,
    accuracy: u8,
    similarity: u8,
}

impl From<&ScoreResult> for JsonResult {
    fn from(r: &ScoreResult) -> Self {
        JsonResult {
            score: r.score,
            stars: r.stars,
            feedback: r.feedback,
            coverage: r.coverage,
            accuracy: r.accuracy,
            similarity: r.similarity,
        }
    }
}

fn read_image_bytes(path: &Option<String>) -> Result<Vec<u8>, ErrorShim> {
    match path {
        Some(p) => Ok(std::fs::read(p)?),
        None => {
            log::debug!("reading drawing PNG from stdin");
            let mut v = Vec::new();
            std::io::stdin().lock().read_to_end(&mut v)?;
            Ok(v)
        }
    }
}

fn write_reference_png(path: &Option<String>, bytes: &[u8]) -> Result<(), ErrorShim> {
    if let Some(p) = path {
        std::fs::write(p, bytes)?;
        log::debug!("wrote {} bytes of reference PNG to {}", bytes.len(), p);
    }
    Ok(())
}

fn run() -> Result<(), ErrorShim> {
    let args = Args::parse();
    let font_bytes = std::fs::read(&args.font)?;

    if args.render_only {
        let png = scoring_core::render_reference(args.character, &font_bytes, args.render_size)
            .map_err(|e| ErrorShim(format!("{}", e)))?;
        write_reference_png(&args.reference_out, &png)?;
        if args.reference_out.is_none() {
            std::io::stdout().write_all(&png)?;
        }
        return Ok(());
    }

    let image_bytes = read_image_bytes(&args.image)?;
    let result = scoring_core::score(&image_bytes, args.character, &font_bytes)
        .map_err(|e| ErrorShim(format!("{}", e)))?;

    write_reference_png(&args.reference_out, &result.reference_image)?;

    if args.json {
        let json = JsonResult::from(&result);
        println!("{}", serde_json::to_string_pretty(&json)?);
    } else {
        println!(
            "score: {}  stars: {}  ({})",
            result.score, result.stars, result.feedback
        );
        println!(
            "coverage: {}  accuracy: {}  similarity: {}",
            result.coverage, result.accuracy, result.similarity
        );
    }

    Ok(())
}

fn main() -> Result<(), ErrorShim> {
    env_logger::init();
    run()
}
