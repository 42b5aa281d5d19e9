use std::io::{self, Write};

use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_FILTER: &str = "gametes_sweep_cluster=info,gametes_sweep_core=info";

/// Writer factory for stdout that flushes after every write, so progress is
/// visible immediately when output is piped into a scheduler log.
#[derive(Debug, Clone, Copy, Default)]
pub struct FlushingStdout;

/// Wraps a writer so every `write` is followed by a `flush`.
pub struct FlushingWriter<W: Write> {
    inner: W,
}

impl<W: Write> FlushingWriter<W> {
    pub fn new(inner: W) -> Self {
        Self { inner }
    }
}

impl<W: Write> Write for FlushingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let written = self.inner.write(buf)?;
        self.inner.flush()?;
        Ok(written)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

impl<'a> MakeWriter<'a> for FlushingStdout {
    type Writer = FlushingWriter<io::Stdout>;

    fn make_writer(&'a self) -> Self::Writer {
        FlushingWriter::new(io::stdout())
    }
}

/// Installs the global subscriber. `RUST_LOG` overrides the default filter.
pub fn init_logging() -> anyhow::Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(FlushingStdout)
                .with_ansi(false)
                .with_target(false),
        )
        .try_init()?;

    Ok(())
}
