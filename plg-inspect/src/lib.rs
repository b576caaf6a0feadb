/// Command line inspector for PLG object files
use clap::{Parser, ValueEnum};
use plg_core::{ConfigError, Importer, ImporterConfig, PlgError, RadiusMode};
use std::io::{self, Write};
use std::path::PathBuf;

pub mod renderer;

pub use renderer::ReportRenderer;

#[derive(Parser, Debug)]
#[command(name = "plg-inspect", about = "Import a PLG object file and report what was loaded")]
pub struct Args {
    /// PLG file to import
    pub file: PathBuf,

    /// Uniform scale applied to every vertex
    #[arg(short, long, default_value_t = 1.0)]
    pub scale: f32,

    /// TOML importer configuration
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Override the configured radius aggregation
    #[arg(long, value_enum)]
    pub radius: Option<RadiusArg>,

    /// Also dump the scaled local vertices
    #[arg(long)]
    pub vertices: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum RadiusArg {
    Max,
    Average,
}

impl From<RadiusArg> for RadiusMode {
    fn from(arg: RadiusArg) -> Self {
        match arg {
            RadiusArg::Max => RadiusMode::Max,
            RadiusArg::Average => RadiusMode::Average,
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum InspectError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Import(#[from] PlgError),

    #[error("Output error: {0}")]
    Output(#[from] io::Error),
}

/// Build the importer configuration from the file and flag overrides
pub fn load_config(args: &Args) -> Result<ImporterConfig, InspectError> {
    let mut config = match &args.config {
        Some(path) => {
            log::debug!("Loading importer config from {}", path.display());
            ImporterConfig::load_from_file(path)?
        }
        None => ImporterConfig::default(),
    };
    if let Some(radius) = args.radius {
        config.radius_mode = radius.into();
    }
    Ok(config)
}

/// Import the requested file and write its report
pub fn run<W: Write>(args: &Args, out: &mut W) -> Result<(), InspectError> {
    let config = load_config(args)?;
    let mut importer = Importer::new(config);
    let object = importer.import(&args.file, args.scale)?;

    let renderer = ReportRenderer::new(!args.no_color);
    renderer.draw(&object, out)?;
    if args.vertices {
        writeln!(out, "# vertices")?;
        renderer.draw_vertices(&object, out)?;
    }
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(cli: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("plg-inspect").chain(cli.iter().copied())).unwrap()
    }

    fn temp_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_args_defaults() {
        let args = args(&["cube.plg"]);
        assert_eq!(args.file, PathBuf::from("cube.plg"));
        assert_eq!(args.scale, 1.0);
        assert!(args.config.is_none());
        assert!(args.radius.is_none());
        assert!(!args.vertices);
    }

    #[test]
    fn test_run_reports_object() {
        let file = temp_file("tri 3 1\n0 0 0\n1 0 0\n0 1 0\n0x1003 3 0 1 2\n");
        let path = file.path().to_str().unwrap();
        let args = args(&[path, "--scale", "2", "--vertices", "--no-color"]);

        let mut out = Vec::new();
        run(&args, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("Object tri (id 0)\n"));
        assert!(text.contains("normal length 4.000000"));
        assert!(text.ends_with("# vertices\n0 0 0\n2 0 0\n0 2 0\n"));
    }

    #[test]
    fn test_radius_flag_overrides_config() {
        let config = temp_file("radius_mode = \"max\"\n");
        let args = args(&[
            "obj.plg",
            "--config",
            config.path().to_str().unwrap(),
            "--radius",
            "average",
        ]);
        assert_eq!(load_config(&args).unwrap().radius_mode, RadiusMode::Average);
    }

    #[test]
    fn test_run_fails_on_bad_file() {
        let file = temp_file("tri 3 1\n0 0 0\n1 0 0\n0 1 0\n5 0 0 1 2\n");
        let args = args(&[file.path().to_str().unwrap(), "--no-color"]);
        let err = run(&args, &mut Vec::new()).unwrap_err();
        match err {
            InspectError::Import(err) => assert!(matches!(
                err.root(),
                PlgError::InvalidPolygonVertexCount { .. }
            )),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
