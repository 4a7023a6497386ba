// One error type for the whole app.
// Every variant states *where* things went wrong.
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Creating the window failed
    #[error("window init error: {0}")]
    WindowInit(String),
    /// Pushing a frame to the window failed
    #[error("window update error: {0}")]
    WindowUpdate(String),

    #[error("could not read config {}: {source}", .path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("could not parse config {}: {source}", .path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    /// Config parsed fine but holds values we can't draw with
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("invalid color {0:?}, expected #rrggbb or #rgb")]
    InvalidColor(String),

    /// A layer row asked for a layer that doesn't exist
    #[error("layer index {index} out of range (have {len} layers)")]
    LayerOutOfRange { index: usize, len: usize },
}
