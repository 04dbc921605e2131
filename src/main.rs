use cardpress::{
    CardError, CardFieldValues, CardGenerator, CardRequest, DirectoryDeliverySink,
    FilesystemUploadStore, ImageCodec, LogoAsset, TemplateCatalog, TemplateId, UploadStore,
};
use clap::Parser;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Renders a two-sided business card to PDF.
#[derive(Parser, Debug)]
#[command(name = "cardpress", version, about)]
struct Cli {
    /// JSON file with the card fields (name, title, phone, email, logo).
    #[arg(long, value_name = "FILE", required_unless_present = "list_templates")]
    fields: Option<PathBuf>,

    /// Catalog id of the chosen design.
    #[arg(long, value_name = "ID", required_unless_present = "list_templates")]
    template: Option<String>,

    /// PNG or JPEG logo; overrides any logo in the fields file.
    #[arg(long, value_name = "FILE")]
    logo: Option<PathBuf>,

    /// Directory the card is saved into.
    #[arg(long, value_name = "DIR", default_value = ".")]
    out_dir: PathBuf,

    /// Time allowed for reading the logo, in milliseconds. 0 waits forever.
    #[arg(long, value_name = "MS")]
    asset_timeout_ms: Option<u64>,

    /// Title stored in the document metadata.
    #[arg(long, value_name = "TEXT")]
    title: Option<String>,

    /// Write uncompressed page content streams.
    #[arg(long)]
    no_compress: bool,

    /// Print the template catalog and exit.
    #[arg(long)]
    list_templates: bool,
}

#[derive(Error, Debug)]
enum CliError {
    #[error("Failed to read '{path}': {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid fields file '{path}': {source}")]
    Fields {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("Logo path '{0}' has no file name")]
    LogoPath(PathBuf),
    #[error("Logo '{name}' not found in '{dir}'")]
    LogoMissing { name: String, dir: PathBuf },
    #[error(transparent)]
    Card(#[from] CardError),
}

fn mime_for(path: &Path) -> Option<String> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    let codec = match ext.as_str() {
        "png" => ImageCodec::Png,
        "jpg" | "jpeg" => ImageCodec::Jpeg,
        _ => return None,
    };
    Some(codec.mime_type().to_string())
}

fn load_fields(path: &Path) -> Result<CardFieldValues, CliError> {
    let text = fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| CliError::Fields {
        path: path.to_path_buf(),
        source,
    })
}

fn print_catalog(catalog: &TemplateCatalog) {
    for entry in catalog.entries() {
        println!("{:>3}  {}", entry.id, entry.title);
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let mut builder = CardGenerator::builder().with_compression(!cli.no_compress);
    if let Some(ms) = cli.asset_timeout_ms {
        builder = builder.with_asset_timeout((ms > 0).then(|| Duration::from_millis(ms)));
    }
    if let Some(title) = cli.title {
        builder = builder.with_document_title(title);
    }

    let (Some(fields_path), Some(template)) = (cli.fields.as_deref(), cli.template) else {
        print_catalog(&TemplateCatalog::builtin());
        return Ok(());
    };
    let mut fields = load_fields(fields_path)?;

    if let Some(logo) = &cli.logo {
        let file_name = logo
            .file_name()
            .ok_or_else(|| CliError::LogoPath(logo.clone()))?;
        let key = PathBuf::from(file_name);
        let base = logo
            .parent()
            .filter(|dir| !dir.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        let store = FilesystemUploadStore::new(base);
        if !store.contains(&key) {
            return Err(CliError::LogoMissing {
                name: key.display().to_string(),
                dir: store.base().to_path_buf(),
            });
        }
        builder = builder.with_upload_store(Arc::new(store));
        fields.logo = LogoAsset::UploadedFile {
            key,
            mime_hint: mime_for(logo),
        };
    }

    let generator = builder.build();
    let sink = DirectoryDeliverySink::new(&cli.out_dir);
    let request = CardRequest::new(fields, TemplateId::from(template));
    let name = generator.generate_and_deliver(request, &sink).await?;
    println!("{}", sink.output_dir().join(name).display());
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    if cli.list_templates {
        print_catalog(&TemplateCatalog::builtin());
        return ExitCode::SUCCESS;
    }

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
