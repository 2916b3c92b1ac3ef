//! Print the OpenAPI document as JSON, or YAML with `--yaml`.

use std::io::Write;

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use users_api::ApiDoc;
use utoipa::OpenApi;

#[derive(Debug, Parser)]
#[command(about = "Print the users API OpenAPI document")]
struct Args {
    /// Emit YAML instead of JSON.
    #[arg(long)]
    yaml: bool,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();

    let doc = ApiDoc::openapi();
    let rendered = if args.yaml {
        doc.to_yaml().wrap_err("failed to render OpenAPI YAML")?
    } else {
        doc.to_pretty_json()
            .wrap_err("failed to render OpenAPI JSON")?
    };

    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{rendered}").wrap_err("failed to write OpenAPI document")?;
    Ok(())
}
