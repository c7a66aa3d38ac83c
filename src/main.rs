use anyhow::Result;
use clap::Parser;
use tracing::info;

use dynbuf::{BufferConfig, ByteBuffer, DEFAULT_CAPACITY};

#[derive(Parser)]
#[command(name = "dynbuf")]
#[command(about = "Growable byte buffer demonstration")]
struct Cli {
    #[arg(long, help = "Config file path")]
    config: Option<String>,

    #[arg(long, help = "Initial capacity (overrides the default)")]
    capacity: Option<usize>,

    #[arg(long, help = "Load a file into the buffer and print it")]
    load: Option<String>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("dynbuf=debug")
        .init();

    let cli = Cli::parse();

    let config = match cli.config.as_deref() {
        Some(path) => BufferConfig::load_or_create(Some(path))?,
        None => BufferConfig::default(),
    };
    let capacity = cli.capacity.unwrap_or(DEFAULT_CAPACITY);

    let mut buf = ByteBuffer::with_config(capacity, config);

    buf.append_str("hello ")?;
    buf.append_str("world")?;
    buf.append_fmt(format_args!(" [{} bytes]", buf.len()))?;
    info!("buffer holds {} bytes (capacity {})", buf.len(), buf.capacity());

    if let Some(path) = cli.load {
        buf.clear();
        buf.load_file(&path)?;
        info!("loaded {}: {} bytes", path, buf.len());
    }

    println!("{}", String::from_utf8_lossy(buf.as_slice()));
    Ok(())
}
