//! Command-line entry point.

use clap::Parser;
use freepaint_app::{AppError, FrameSummary, Script, run};
use freepaint_core::{Canvas, Settings};
use std::path::PathBuf;

/// Input value that starts from an empty page instead of a file.
const NEW_DOCUMENT: &str = "--new";

/// Replay a gesture script against an SVG document.
#[derive(Debug, Parser)]
#[command(name = "freepaint", version, about)]
struct Args {
    /// SVG file to start from, or `--new` for an empty page.
    #[arg(value_name = "INPUT|--new", allow_hyphen_values = true)]
    input: String,

    /// JSON list of steps to replay.
    script: PathBuf,

    /// Where to write the resulting SVG.
    output: PathBuf,

    /// Settings file (JSON); defaults apply when omitted.
    #[arg(long, value_name = "SETTINGS")]
    config: Option<PathBuf>,
}

impl Args {
    fn input_file(&self) -> Option<PathBuf> {
        (self.input != NEW_DOCUMENT).then(|| PathBuf::from(&self.input))
    }
}

fn execute(args: &Args) -> Result<(), AppError> {
    let settings = match &args.config {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };
    let mut canvas = Canvas::new(settings);
    if let Some(input) = args.input_file() {
        canvas.open(input)?;
    }

    let script = Script::load(&args.script)?;
    run(&mut canvas, &script);

    let frame = FrameSummary::of(&canvas);
    log::info!("Final page renders {} fills and {} strokes", frame.fills, frame.strokes);

    canvas.save(&args.output)?;
    log::info!("Wrote {}", args.output.display());
    Ok(())
}

fn main() {
    env_logger::init();
    log::info!("Starting FreePaint");

    let args = Args::parse();
    if let Err(err) = execute(&args) {
        log::error!("{}", err);
        eprintln!("{}", err);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Result<Args, clap::Error> {
        Args::try_parse_from(std::iter::once("freepaint").chain(list.iter().copied()))
    }

    #[test]
    fn test_parse_args() {
        let parsed = args(&["--new", "s.json", "out.svg", "--config", "c.json"]).unwrap();
        assert_eq!(parsed.input_file(), None);
        assert_eq!(parsed.script, PathBuf::from("s.json"));
        assert_eq!(parsed.config, Some(PathBuf::from("c.json")));

        let parsed = args(&["in.svg", "s.json", "out.svg"]).unwrap();
        assert_eq!(parsed.input_file(), Some(PathBuf::from("in.svg")));
        assert_eq!(parsed.output, PathBuf::from("out.svg"));
        assert_eq!(parsed.config, None);

        assert!(args(&["in.svg", "s.json"]).is_err());
        assert!(args(&["a", "b", "c", "--config"]).is_err());
    }

    #[test]
    fn test_execute_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let script = dir.path().join("script.json");
        let config = dir.path().join("settings.json");
        let output = dir.path().join("out.svg");
        std::fs::write(
            &script,
            r#"[{"op":"tool","kind":"rectangle"},{"op":"down","x":10,"y":10},{"op":"move","x":60,"y":40},{"op":"up"}]"#,
        )
        .unwrap();
        std::fs::write(&config, r##"{"fill_color": {"r": 0, "g": 0, "b": 255, "a": 255}}"##).unwrap();

        let first = Args {
            input: NEW_DOCUMENT.to_string(),
            script: script.clone(),
            output: output.clone(),
            config: Some(config),
        };
        execute(&first).unwrap();
        let svg = std::fs::read_to_string(&output).unwrap();
        assert!(svg.contains("#0000FF"));

        // Feed the result back in and draw a second rectangle.
        let second_output = dir.path().join("out2.svg");
        let second = Args {
            input: output.display().to_string(),
            script,
            output: second_output.clone(),
            config: None,
        };
        execute(&second).unwrap();
        let mut canvas = Canvas::default();
        canvas.open(&second_output).unwrap();
        assert_eq!(canvas.document.paths.len(), 2);
    }

    #[test]
    fn test_missing_input_fails() {
        let dir = tempfile::tempdir().unwrap();
        let args = Args {
            input: dir.path().join("nope.svg").display().to_string(),
            script: dir.path().join("nope.json"),
            output: dir.path().join("out.svg"),
            config: None,
        };
        assert!(matches!(execute(&args), Err(AppError::Svg(_))));
    }
}
