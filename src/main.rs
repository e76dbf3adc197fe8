use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use albumdata_catalog::{Collection, Library, Producer};
use albumdata_core::Value;

#[derive(Parser, Debug)]
#[command(name = "albumdata")]
#[command(about = "Build a photo library graph from iPhoto or Aperture album data", long_about = None)]
struct Cli {
    /// JSON rendition of AlbumData.xml or ApertureData.xml
    path: PathBuf,

    /// Read the document as Aperture data
    #[arg(long, conflicts_with = "iphoto")]
    aperture: bool,

    /// Read the document as iPhoto data
    #[arg(long)]
    iphoto: bool,

    /// Report events and regular albums holding more images than this
    #[arg(long, default_value_t = 1000)]
    max_album_size: usize,

    /// Print the whole graph as JSON instead of the report
    #[arg(long)]
    dump: bool,
}

impl Cli {
    /// The explicit producer flag, or a guess from the file name.
    fn producer(&self) -> Producer {
        if self.aperture {
            Producer::Aperture
        } else if self.iphoto {
            Producer::IPhoto
        } else {
            Producer::from_data_file_name(&self.path.to_string_lossy())
        }
    }
}

fn load(path: &Path, producer: Producer) -> Result<Library> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read album data: {}", path.display()))?;
    let document: Value = serde_json::from_str(&text)
        .with_context(|| format!("failed to decode album data: {}", path.display()))?;
    Library::from_document(&document, producer)
        .with_context(|| format!("failed to load library: {}", path.display()))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let producer = cli.producer();
    info!(path = ?cli.path, %producer, "loading library");
    let library = load(&cli.path, producer)?;

    if cli.dump {
        let graph = serde_json::json!({
            "images": library.images().collect::<Vec<_>>(),
            "events": library.events().collect::<Vec<_>>(),
            "albums": library.albums().collect::<Vec<_>>(),
            "faces": library.face_groups(),
        });
        println!("{}", serde_json::to_string_pretty(&graph)?);
        return Ok(());
    }

    println!(
        "{} {}: {} images, {} events, {} albums, {} faces",
        library.producer(),
        library.application_version(),
        library.images().count(),
        library.events().count(),
        library.albums().count(),
        library.face_groups().len(),
    );
    for album in library.albums().filter(|album| album.is_folder()) {
        println!("folder {}", album.describe());
    }
    for anomaly in library.anomalies() {
        println!("warning: {anomaly}");
    }
    for message in library.check_album_sizes(cli.max_album_size) {
        println!("{message}");
    }
    for message in library.check_in_albums() {
        println!("{message}");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_defaults() {
        let cli = Cli::try_parse_from(["albumdata", "/lib/AlbumData.json"]).unwrap();
        assert_eq!(cli.path, PathBuf::from("/lib/AlbumData.json"));
        assert_eq!(cli.max_album_size, 1000);
        assert!(!cli.dump);
        assert_eq!(cli.producer(), Producer::IPhoto);

        let cli = Cli::try_parse_from(["albumdata", "/lib/ApertureData.json"]).unwrap();
        assert_eq!(cli.producer(), Producer::Aperture);
    }

    #[test]
    fn parses_flags() {
        let cli = Cli::try_parse_from([
            "albumdata",
            "--aperture",
            "data.json",
            "--max-album-size",
            "50",
            "--dump",
        ])
        .unwrap();
        assert_eq!(cli.producer(), Producer::Aperture);
        assert_eq!(cli.max_album_size, 50);
        assert!(cli.dump);

        let cli = Cli::try_parse_from(["albumdata", "--iphoto", "ApertureData.json"]).unwrap();
        assert_eq!(cli.producer(), Producer::IPhoto);
    }

    #[test]
    fn rejects_bad_input() {
        assert!(Cli::try_parse_from(["albumdata"]).is_err());
        assert!(Cli::try_parse_from(["albumdata", "a.json", "--max-album-size", "many"]).is_err());
        assert!(Cli::try_parse_from(["albumdata", "a.json", "b.json"]).is_err());
        assert!(Cli::try_parse_from(["albumdata", "a.json", "--aperture", "--iphoto"]).is_err());
    }

    #[test]
    fn load_reports_missing_file() {
        let err = load(Path::new("/nonexistent/AlbumData.json"), Producer::IPhoto).unwrap_err();
        assert!(err.to_string().contains("failed to read album data"));
    }
}
