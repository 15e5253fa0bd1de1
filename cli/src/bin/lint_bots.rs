use clap::Parser;
use encoding_rs::Encoding;
use std::{fs, path::PathBuf};
use tracing::{debug, error};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use y2_engine::Catalog;

#[derive(Parser)]
#[command(name = "lint-bots")]
#[command(about = "Compile bot table files and report authoring errors")]
struct Args {
    /// YAML files, each holding one or more `---`-separated bots
    #[arg(required = true)]
    files: Vec<PathBuf>,
}

// Table files edited on Windows often carry a BOM.
fn read_text_auto(path: &std::path::Path) -> anyhow::Result<String> {
    let bytes = fs::read(path)?;
    if let Some((enc, bom_len)) = Encoding::for_bom(&bytes) {
        let (cow, _, _) = enc.decode(&bytes[bom_len..]);
        Ok(cow.into_owned())
    } else {
        Ok(String::from_utf8(bytes)?)
    }
}

fn lint(path: &std::path::Path) -> anyhow::Result<Catalog> {
    let text = read_text_auto(path)?;
    debug!(path = %path.display(), bytes = text.len(), "linting");
    Ok(Catalog::from_yaml_stream(&text)?)
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();
    let mut failed = 0;
    for path in &args.files {
        match lint(path) {
            Ok(catalog) => {
                let names: Vec<&str> = catalog.iter().map(|b| b.name.as_str()).collect();
                println!("ok {}: {}", path.display(), names.join(", "));
            }
            Err(e) => {
                error!(path = %path.display(), "bot table rejected");
                eprintln!("error {}: {}", path.display(), e);
                failed += 1;
            }
        }
    }
    if failed > 0 {
        anyhow::bail!("{} of {} file(s) failed", failed, args.files.len());
    }
    Ok(())
}
